//! The alignment engine: boundary rules, the affine-gap fill, maximum cells
//! and the suboptimal clear-and-refill step.
//!
//! Uses the three-layer affine formulation (Gotoh):
//!
//! - `align`: best score of any alignment of the two prefixes
//! - `row_gap`: best score ending with a row symbol against a gap (Top)
//! - `col_gap`: best score ending with a column symbol against a gap (Left)

use log::{debug, trace};

use crate::aligned::AlignMode;
use crate::error::{AlignError, Result};
use crate::matrix::{CellScores, DpMatrices, GapOrigin, Origin, NEG_INF};
use crate::score::ScoreMatrix;
use crate::symbol::Sequence;
use crate::traceback::{Alignments, Traceback};

#[derive(Debug, Clone, PartialEq, Eq)]
enum GapCosts {
    Uniform { open: i32, extend: i32 },
    /// Profile penalties, one per column boundary `0..=cols`.
    PerColumn(Vec<i32>),
}

impl GapCosts {
    /// (open, extend) for a Top gap in column `j`.
    fn top(&self, j: usize) -> (i32, i32) {
        match self {
            GapCosts::Uniform { open, extend } => (*open, *extend),
            GapCosts::PerColumn(p) => (p[j], p[j]),
        }
    }

    /// (open, extend) for a Left gap consuming column symbol `j - 1`.
    fn left(&self, j: usize) -> (i32, i32) {
        match self {
            GapCosts::Uniform { open, extend } => (*open, *extend),
            GapCosts::PerColumn(p) => (p[j - 1], p[j - 1]),
        }
    }
}

/// Running set of cells sharing the largest value seen.
#[derive(Debug, Default)]
struct MaxCells {
    score: Option<i32>,
    cells: Vec<(usize, usize)>,
}

impl MaxCells {
    fn offer(&mut self, cell: (usize, usize), value: i32) {
        match self.score {
            Some(best) if value < best => {}
            Some(best) if value == best => self.cells.push(cell),
            _ => {
                self.score = Some(value);
                self.cells.clear();
                self.cells.push(cell);
            }
        }
    }
}

/// Owns the matrices of one alignment run.
///
/// Built and filled by [`AlignmentEngine::new`]; results are then read out
/// with [`traceback`](Self::traceback) (borrowing, restartable) or
/// [`into_alignments`](Self::into_alignments) (owning, can continue into
/// suboptimal rounds).
#[derive(Debug, Clone)]
pub struct AlignmentEngine {
    mode: AlignMode,
    row_seq: Sequence,
    col_seq: Sequence,
    gaps: GapCosts,
    /// Substitution scores, `row_len x col_len`, looked up once.
    subst: Vec<i32>,
    dp: DpMatrices,
    max_cells: Vec<(usize, usize)>,
    best_score: i32,
    suboptimal_depth: usize,
}

impl AlignmentEngine {
    /// Build and fill the matrices for `row_seq` against `col_seq`.
    ///
    /// `gap_extend` defaults to `gap_open`. When `matrix` answers
    /// [`ScoreMatrix::gap_penalty`] for every column, those penalties replace
    /// the uniform ones.
    ///
    /// # Errors
    ///
    /// - [`AlignError::InvalidInput`] if a sequence is empty, if opening a gap
    ///   is cheaper than extending one, or if position-specific penalties
    ///   cover only some columns.
    /// - [`AlignError::UnknownSymbol`] if `matrix` cannot score a symbol.
    pub fn new<M: ScoreMatrix + ?Sized>(
        row_seq: &Sequence,
        col_seq: &Sequence,
        matrix: &M,
        gap_open: i32,
        gap_extend: Option<i32>,
        mode: AlignMode,
    ) -> Result<Self> {
        if row_seq.is_empty() || col_seq.is_empty() {
            return Err(AlignError::InvalidInput(
                "sequences to align cannot be empty".into(),
            ));
        }
        let gap_extend = gap_extend.unwrap_or(gap_open);
        if gap_open > gap_extend {
            return Err(AlignError::InvalidInput(format!(
                "gap open penalty {gap_open} is cheaper than gap extend penalty {gap_extend}"
            )));
        }

        let profile = (0..=col_seq.len())
            .map(|column| matrix.gap_penalty(column))
            .collect::<Vec<_>>();
        let gaps = if profile.iter().all(Option::is_none) {
            GapCosts::Uniform {
                open: gap_open,
                extend: gap_extend,
            }
        } else if let Some(penalties) = profile.into_iter().collect::<Option<Vec<i32>>>() {
            GapCosts::PerColumn(penalties)
        } else {
            return Err(AlignError::InvalidInput(
                "position-specific gap penalties must cover every column".into(),
            ));
        };

        let mut subst = Vec::with_capacity(row_seq.len() * col_seq.len());
        for &a in row_seq {
            for &b in col_seq {
                subst.push(matrix.score(a, b)?);
            }
        }

        let mut engine = Self {
            mode,
            row_seq: row_seq.clone(),
            col_seq: col_seq.clone(),
            gaps,
            subst,
            dp: DpMatrices::new(row_seq.len(), col_seq.len()),
            max_cells: Vec::new(),
            best_score: 0,
            suboptimal_depth: 0,
        };
        engine.fill();
        debug!(
            "{} matrices {}x{} filled, best score {} at {} cell(s)",
            engine.mode,
            engine.dp.rows(),
            engine.dp.cols(),
            engine.best_score,
            engine.max_cells.len()
        );
        Ok(engine)
    }

    pub fn mode(&self) -> AlignMode {
        self.mode
    }

    pub fn row_seq(&self) -> &Sequence {
        &self.row_seq
    }

    pub fn col_seq(&self) -> &Sequence {
        &self.col_seq
    }

    pub fn matrices(&self) -> &DpMatrices {
        &self.dp
    }

    /// Optimal score of the current round. 0 for a local run with no
    /// positive-scoring cell.
    pub fn best_score(&self) -> i32 {
        self.best_score
    }

    /// Traceback start cells, ascending by row then column.
    pub fn max_cells(&self) -> &[(usize, usize)] {
        &self.max_cells
    }

    /// Number of suboptimal rounds applied so far.
    pub fn suboptimal_depth(&self) -> usize {
        self.suboptimal_depth
    }

    /// Substitution score of `row_seq[i - 1]` against `col_seq[j - 1]`.
    #[inline]
    pub(crate) fn substitution(&self, i: usize, j: usize) -> i32 {
        self.subst[(i - 1) * self.col_seq.len() + (j - 1)]
    }

    /// Whether a traceback standing in the `align` layer at `(i, j)` is done.
    pub(crate) fn is_stop(&self, i: usize, j: usize) -> bool {
        match self.mode {
            AlignMode::Global => i == 0 && j == 0,
            AlignMode::SemiGlobal => i == 0 || j == 0,
            AlignMode::Local => self.dp.align(i, j) == 0,
        }
    }

    /// Enumerate every alignment tied for the current best score, lazily.
    ///
    /// Each call starts afresh from the same matrices. `result_count` caps
    /// the number of results.
    pub fn traceback(&self, result_count: Option<usize>) -> Traceback<'_> {
        Traceback::new(self, result_count)
    }

    /// Owning enumeration that, once the optimal results are exhausted, runs
    /// up to `suboptimal_depth` clear-and-refill rounds (local mode only).
    pub fn into_alignments(self, result_count: Option<usize>, suboptimal_depth: usize) -> Alignments {
        let depth = if self.mode == AlignMode::Local {
            suboptimal_depth
        } else {
            0
        };
        Alignments::new(self, result_count, depth)
    }

    fn init_boundaries(&mut self) {
        let unreachable = CellScores {
            align: 0,
            row_gap: NEG_INF,
            col_gap: NEG_INF,
        };
        self.dp
            .set(0, 0, unreachable, Origin::empty(), GapOrigin::empty());

        match self.mode {
            AlignMode::Global => {
                let mut running: i32 = 0;
                for j in 1..self.dp.cols() {
                    let (open, extend) = self.gaps.left(j);
                    let (cost, flag) = if j == 1 {
                        (open, GapOrigin::LEFT_OPEN)
                    } else {
                        (extend, GapOrigin::LEFT_EXTEND)
                    };
                    running = running.saturating_add(cost);
                    let scores = CellScores {
                        align: running,
                        row_gap: NEG_INF,
                        col_gap: running,
                    };
                    self.dp.set(0, j, scores, Origin::LEFT, flag);
                }

                let mut running: i32 = 0;
                for i in 1..self.dp.rows() {
                    let (open, extend) = self.gaps.top(0);
                    let (cost, flag) = if i == 1 {
                        (open, GapOrigin::TOP_OPEN)
                    } else {
                        (extend, GapOrigin::TOP_EXTEND)
                    };
                    running = running.saturating_add(cost);
                    let scores = CellScores {
                        align: running,
                        row_gap: running,
                        col_gap: NEG_INF,
                    };
                    self.dp.set(i, 0, scores, Origin::TOP, flag);
                }
            }
            // Free leading gaps; traceback stops on the border anyway.
            AlignMode::SemiGlobal => {
                for j in 1..self.dp.cols() {
                    self.dp
                        .set(0, j, unreachable, Origin::LEFT, GapOrigin::empty());
                }
                for i in 1..self.dp.rows() {
                    self.dp
                        .set(i, 0, unreachable, Origin::TOP, GapOrigin::empty());
                }
            }
            AlignMode::Local => {
                for j in 1..self.dp.cols() {
                    self.dp
                        .set(0, j, unreachable, Origin::empty(), GapOrigin::empty());
                }
                for i in 1..self.dp.rows() {
                    self.dp
                        .set(i, 0, unreachable, Origin::empty(), GapOrigin::empty());
                }
            }
        }
    }

    /// Evaluate the recurrence for interior cell `(i, j)` from its three
    /// upstream neighbours. Sums saturate at the `i32` bounds.
    fn compute_cell(&self, i: usize, j: usize) -> (CellScores, Origin, GapOrigin) {
        let (top_open, top_extend) = self.gaps.top(j);
        let (left_open, left_extend) = self.gaps.left(j);
        let up = self.dp.scores(i - 1, j);
        let left = self.dp.scores(i, j - 1);

        let top_opened = up.align.saturating_add(top_open);
        let top_extended = up.row_gap.saturating_add(top_extend);
        let row_gap = top_opened.max(top_extended);

        let left_opened = left.align.saturating_add(left_open);
        let left_extended = left.col_gap.saturating_add(left_extend);
        let col_gap = left_opened.max(left_extended);

        let diagonal = self
            .dp
            .align(i - 1, j - 1)
            .saturating_add(self.substitution(i, j));

        let mut align = row_gap.max(col_gap).max(diagonal);
        if self.mode == AlignMode::Local {
            align = align.max(0);
        }

        let mut origin = Origin::empty();
        // Local cells at the floor start nothing.
        if !(self.mode == AlignMode::Local && align == 0) {
            origin.set(Origin::LEFT, col_gap == align);
            origin.set(Origin::DIAGONAL, diagonal == align);
            origin.set(Origin::TOP, row_gap == align);
            debug_assert!(!origin.is_empty(), "cell ({i}, {j}) has no origin");
        }

        let mut gap_origin = GapOrigin::empty();
        gap_origin.set(GapOrigin::TOP_OPEN, top_opened == row_gap);
        gap_origin.set(GapOrigin::TOP_EXTEND, top_extended == row_gap);
        gap_origin.set(GapOrigin::LEFT_OPEN, left_opened == col_gap);
        gap_origin.set(GapOrigin::LEFT_EXTEND, left_extended == col_gap);

        (
            CellScores {
                align,
                row_gap,
                col_gap,
            },
            origin,
            gap_origin,
        )
    }

    /// Whether interior cell `(i, j)` may end an alignment in this mode.
    ///
    /// Semi-global leaves both trailing tails unaligned for free, so any
    /// interior cell can end it.
    fn is_endpoint(&self, i: usize, j: usize) -> bool {
        match self.mode {
            AlignMode::Global => i == self.dp.rows() - 1 && j == self.dp.cols() - 1,
            AlignMode::SemiGlobal => true,
            AlignMode::Local => self.dp.align(i, j) > 0,
        }
    }

    fn fill(&mut self) {
        self.init_boundaries();

        let mut max = MaxCells::default();
        for i in 1..self.dp.rows() {
            for j in 1..self.dp.cols() {
                let (scores, origin, gap_origin) = self.compute_cell(i, j);
                self.dp.set(i, j, scores, origin, gap_origin);
                if self.is_endpoint(i, j) {
                    max.offer((i, j), scores.align);
                }
            }
        }
        self.set_max(max);
    }

    /// Rescan the whole matrix for the maximum cells.
    fn find_best(&mut self) {
        let mut max = MaxCells::default();
        for i in 1..self.dp.rows() {
            for j in 1..self.dp.cols() {
                if self.is_endpoint(i, j) {
                    max.offer((i, j), self.dp.align(i, j));
                }
            }
        }
        self.set_max(max);
    }

    fn set_max(&mut self, max: MaxCells) {
        self.best_score = max.score.unwrap_or(0);
        self.max_cells = max.cells;
    }

    /// Zero the cells of `path` and refill what depends on them.
    ///
    /// Cells are swept row-major from the top-left-most cleared cell, and a
    /// cell is recomputed only when one of its inputs is dirty (cleared, or
    /// recomputed to new scores). Cleared cells stay cleared across rounds.
    pub(crate) fn clear_path(&mut self, path: &[(usize, usize)]) {
        if path.is_empty() {
            return;
        }

        let mut dirty = vec![false; self.dp.rows() * self.dp.cols()];
        let (mut top, mut left) = (self.dp.rows() - 1, self.dp.cols() - 1);
        for &(i, j) in path {
            self.dp.clear(i, j);
            dirty[self.dp.index(i, j)] = true;
            top = top.min(i);
            left = left.min(j);
        }

        let mut recomputed = 0usize;
        for i in top.max(1)..self.dp.rows() {
            for j in left.max(1)..self.dp.cols() {
                if self.dp.is_cleared(i, j) {
                    continue;
                }
                let upstream_dirty = dirty[self.dp.index(i - 1, j)]
                    || dirty[self.dp.index(i, j - 1)]
                    || dirty[self.dp.index(i - 1, j - 1)];
                if !upstream_dirty {
                    continue;
                }
                let before = self.dp.scores(i, j);
                let (scores, origin, gap_origin) = self.compute_cell(i, j);
                self.dp.set(i, j, scores, origin, gap_origin);
                recomputed += 1;
                if scores != before {
                    let k = self.dp.index(i, j);
                    dirty[k] = true;
                }
            }
        }

        self.suboptimal_depth += 1;
        self.find_best();
        trace!(
            "cleared {} cells from ({top}, {left}), recomputed {recomputed}",
            path.len()
        );
        debug!(
            "suboptimal round {}: best score {} at {} cell(s)",
            self.suboptimal_depth,
            self.best_score,
            self.max_cells.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::SubstitutionTable;
    use crate::symbol::AminoAcid::{self, *};

    /// A C G T alphabet, `matched` on the diagonal and `mismatched` elsewhere.
    fn toy_table(matched: i32, mismatched: i32) -> SubstitutionTable {
        let alphabet = vec![Ala, Cys, Gly, Thr];
        let mut table = SubstitutionTable::new(alphabet.clone()).unwrap();
        for &a in &alphabet {
            for &b in &alphabet {
                let score = if a == b { matched } else { mismatched };
                table.set_score(a, b, score).unwrap();
            }
        }
        table
    }

    fn seq(s: &str) -> Sequence {
        s.parse().unwrap()
    }

    fn engine(row: &str, col: &str, open: i32, extend: i32, mode: AlignMode) -> AlignmentEngine {
        AlignmentEngine::new(
            &seq(row),
            &seq(col),
            &SubstitutionTable::blosum62(),
            open,
            Some(extend),
            mode,
        )
        .unwrap()
    }

    /// Every interior cell satisfies the recurrence against its neighbours.
    fn assert_recurrence(e: &AlignmentEngine) {
        let dp = e.matrices();
        for i in 1..dp.rows() {
            for j in 1..dp.cols() {
                if dp.is_cleared(i, j) {
                    continue;
                }
                let (scores, origin, gap_origin) = e.compute_cell(i, j);
                assert_eq!(dp.scores(i, j), scores, "scores at ({i}, {j})");
                assert_eq!(dp.origin(i, j), origin, "origin at ({i}, {j})");
                assert_eq!(dp.gap_origin(i, j), gap_origin, "gap origin at ({i}, {j})");
            }
        }
    }

    #[test]
    fn global_boundaries_carry_affine_cost() {
        let e = engine("ISALIGNED", "THISLINE", -10, -1, AlignMode::Global);
        let dp = e.matrices();
        assert_eq!(dp.align(0, 0), 0);
        assert_eq!(dp.align(0, 1), -10);
        assert_eq!(dp.align(0, 3), -12);
        assert_eq!(dp.align(4, 0), -13);
        assert_eq!(dp.origin(0, 5), Origin::LEFT);
        assert_eq!(dp.origin(2, 0), Origin::TOP);
        assert_eq!(dp.gap_origin(0, 1), GapOrigin::LEFT_OPEN);
        assert_eq!(dp.gap_origin(0, 2), GapOrigin::LEFT_EXTEND);
        assert_eq!(dp.row_gap(0, 3), NEG_INF);
        assert_eq!(dp.col_gap(3, 0), NEG_INF);
        assert_recurrence(&e);
    }

    #[test]
    fn semi_global_and_local_boundaries_are_zero() {
        for mode in [AlignMode::SemiGlobal, AlignMode::Local] {
            let e = engine("ISALIGNED", "THISLINE", -8, -8, mode);
            let dp = e.matrices();
            for j in 0..dp.cols() {
                assert_eq!(dp.align(0, j), 0);
            }
            for i in 0..dp.rows() {
                assert_eq!(dp.align(i, 0), 0);
            }
            assert_recurrence(&e);
        }
        let local = engine("ISALIGNED", "THISLINE", -8, -8, AlignMode::Local);
        assert!(local.matrices().origin(0, 3).is_empty());
        assert!(local.matrices().origin(3, 0).is_empty());
    }

    #[test]
    fn local_floor_cells_have_no_origin() {
        let e = engine("WWWW", "PPPP", -8, -8, AlignMode::Local);
        let dp = e.matrices();
        for i in 1..dp.rows() {
            for j in 1..dp.cols() {
                assert_eq!(dp.align(i, j), 0);
                assert!(dp.origin(i, j).is_empty());
            }
        }
        assert_eq!(e.best_score(), 0);
        assert!(e.max_cells().is_empty());
    }

    #[test]
    fn global_maximum_is_bottom_right() {
        let e = engine("ISALIGNED", "THISLINE", -8, -8, AlignMode::Global);
        assert_eq!(e.max_cells(), &[(9, 8)]);
        assert_eq!(e.best_score(), e.matrices().align(9, 8));
        assert_eq!(e.best_score(), -4);
    }

    #[test]
    fn semi_global_leaves_both_tails_free() {
        let mut table = SubstitutionTable::new(vec![Trp, Gly, Pro]).unwrap();
        for a in [Trp, Gly, Pro] {
            for b in [Trp, Gly, Pro] {
                table.set_score(a, b, if a == b { 5 } else { -2 }).unwrap();
            }
        }
        let e = AlignmentEngine::new(
            &seq("WWWGGG"),
            &seq("WWWPPP"),
            &table,
            -8,
            None,
            AlignMode::SemiGlobal,
        )
        .unwrap();
        assert_eq!(e.best_score(), 15);
        assert_eq!(e.max_cells(), &[(3, 3)]);
        let dp = e.matrices();
        assert!(dp.align(6, 6) < 15);

        let r = e.traceback(None).next().unwrap();
        assert_eq!(r.row().to_string(), "WWW");
        assert_eq!(r.col().to_string(), "WWW");
        assert_eq!(r.score(), 15);
    }

    #[test]
    fn semi_global_maximum_scans_interior() {
        let e = engine("ISALIGNED", "THISLINE", -8, -8, AlignMode::SemiGlobal);
        assert_eq!(e.best_score(), 11);
        assert_eq!(e.max_cells(), &[(8, 8)]);

        let e = engine("ISALIGNED", "THISLINE", -10, -1, AlignMode::SemiGlobal);
        assert_eq!(e.best_score(), 9);
        assert_eq!(e.max_cells(), &[(4, 6), (8, 8)]);
        let dp = e.matrices();
        for i in 1..dp.rows() {
            for j in 1..dp.cols() {
                assert!(dp.align(i, j) <= 9);
            }
        }
    }

    #[test]
    fn local_maximum_scans_interior() {
        let e = engine("ISALIGNED", "THISLINE", -8, -8, AlignMode::Local);
        assert_eq!(e.best_score(), 12);
        assert_eq!(e.max_cells(), &[(8, 8)]);
    }

    #[test]
    fn ties_collect_every_maximum_cell_in_row_major_order() {
        let table = toy_table(2, -3);
        let e = AlignmentEngine::new(
            &seq("GACG"),
            &seq("GTG"),
            &table,
            -5,
            None,
            AlignMode::Local,
        )
        .unwrap();
        assert_eq!(e.best_score(), 2);
        assert_eq!(e.max_cells(), &[(1, 1), (1, 3), (4, 1), (4, 3)]);
    }

    #[test]
    fn empty_sequences_rejected() {
        let table = SubstitutionTable::blosum62();
        for (row, col) in [("", "ACD"), ("ACD", ""), ("", "")] {
            let result =
                AlignmentEngine::new(&seq(row), &seq(col), &table, -8, None, AlignMode::Global);
            assert!(matches!(result, Err(AlignError::InvalidInput(_))));
        }
    }

    #[test]
    fn cheaper_open_than_extend_rejected() {
        let table = SubstitutionTable::blosum62();
        let result =
            AlignmentEngine::new(&seq("AC"), &seq("AC"), &table, -1, Some(-4), AlignMode::Local);
        assert!(matches!(result, Err(AlignError::InvalidInput(_))));
    }

    #[test]
    fn huge_penalties_saturate() {
        let table = SubstitutionTable::blosum62();
        let e = AlignmentEngine::new(
            &seq("ACD"),
            &seq("ACDEF"),
            &table,
            -1_000_000_000,
            None,
            AlignMode::Global,
        )
        .unwrap();
        assert_eq!(e.matrices().align(0, 3), i32::MIN);
        assert_eq!(e.best_score(), 4 + 9 + 6 - 2_000_000_000);
        let results: Vec<_> = e.traceback(None).collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].row().to_string(), "ACD--");

        for mode in [AlignMode::Global, AlignMode::SemiGlobal, AlignMode::Local] {
            let e = AlignmentEngine::new(
                &seq("ACDW"),
                &seq("ACW"),
                &table,
                -2_000_000_000,
                Some(-2_000_000_000),
                mode,
            );
            assert!(e.is_ok());
        }
    }

    #[test]
    fn unknown_symbol_surfaces_before_fill() {
        let table = toy_table(1, -1);
        let result =
            AlignmentEngine::new(&seq("ACW"), &seq("AC"), &table, -2, None, AlignMode::Global);
        assert!(matches!(result, Err(AlignError::UnknownSymbol(Trp))));
    }

    struct Profile {
        table: SubstitutionTable,
        penalties: Vec<Option<i32>>,
    }

    impl ScoreMatrix for Profile {
        fn score(&self, a: AminoAcid, b: AminoAcid) -> Result<i32> {
            self.table.score(a, b)
        }

        fn gap_penalty(&self, column: usize) -> Option<i32> {
            self.penalties.get(column).copied().flatten()
        }
    }

    #[test]
    fn position_specific_gap_penalties() {
        let profile = Profile {
            table: toy_table(2, -1),
            penalties: vec![Some(-1), Some(-4), Some(-9)],
        };
        let e = AlignmentEngine::new(
            &seq("AC"),
            &seq("AC"),
            &profile,
            -100,
            None,
            AlignMode::Global,
        )
        .unwrap();
        let dp = e.matrices();
        // Row 0 pays the penalty of each skipped column, column 0 pays p[0].
        assert_eq!(dp.align(0, 1), -1);
        assert_eq!(dp.align(0, 2), -5);
        assert_eq!(dp.align(2, 0), -2);
        // Top gap in column 1 costs p[1]; Left gap over column 2 costs p[1].
        assert_eq!(dp.row_gap(2, 1), dp.align(1, 1) - 4);
        assert_eq!(dp.col_gap(1, 2), dp.align(1, 1) - 4);
        assert_eq!(e.best_score(), 4);
        assert_recurrence(&e);
    }

    #[test]
    fn partial_profile_rejected() {
        let profile = Profile {
            table: toy_table(2, -1),
            penalties: vec![Some(-1), None, Some(-2)],
        };
        let result =
            AlignmentEngine::new(&seq("AC"), &seq("AC"), &profile, -3, None, AlignMode::Local);
        assert!(matches!(result, Err(AlignError::InvalidInput(_))));
    }

    /// Refill from scratch every cell that was not cleared.
    fn full_refill(e: &mut AlignmentEngine) {
        for i in 1..e.dp.rows() {
            for j in 1..e.dp.cols() {
                if !e.dp.is_cleared(i, j) {
                    let (scores, origin, gap_origin) = e.compute_cell(i, j);
                    e.dp.set(i, j, scores, origin, gap_origin);
                }
            }
        }
    }

    #[test]
    fn clear_path_matches_full_recompute() {
        let mut e = engine("HEAGAWGHEEPAWHEAE", "PAWHEAEHEAGAW", -10, -2, AlignMode::Local);
        for _ in 0..3 {
            let mut tb = e.traceback(Some(1));
            assert!(tb.next().is_some());
            let path = tb.first_path().to_vec();
            let mut reference = e.clone();
            e.clear_path(&path);
            for &(i, j) in &path {
                reference.dp.clear(i, j);
            }
            full_refill(&mut reference);
            for i in 0..e.dp.rows() {
                for j in 0..e.dp.cols() {
                    assert_eq!(e.dp.scores(i, j), reference.dp.scores(i, j));
                    assert_eq!(e.dp.origin(i, j), reference.dp.origin(i, j));
                    assert_eq!(e.dp.gap_origin(i, j), reference.dp.gap_origin(i, j));
                }
            }
            assert_recurrence(&e);
        }
        assert_eq!(e.suboptimal_depth(), 3);
    }

    #[test]
    fn clear_path_leaves_upstream_cells_alone() {
        let mut e = engine("GGVTTFAAAA", "PPPPGGVTTF", -8, -8, AlignMode::Local);
        let before = e.clone();
        let path: Vec<(usize, usize)> = (1..=6).rev().map(|k| (k, k + 4)).collect();
        e.clear_path(&path);
        for i in 0..e.dp.rows() {
            for j in 0..e.dp.cols() {
                if i < 1 || j < 5 {
                    assert_eq!(e.dp.scores(i, j), before.dp.scores(i, j));
                }
            }
        }
        for &(i, j) in &path {
            assert!(e.dp.is_cleared(i, j));
            assert_eq!(e.dp.align(i, j), 0);
        }
        assert!(e.best_score() < before.best_score());
    }
}
