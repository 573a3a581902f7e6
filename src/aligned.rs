use std::fmt;

use crate::symbol::Sequence;

/// Where an alignment may start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignMode {
    /// End to end; every leading and trailing gap is paid for.
    Global,
    /// End to end, but gaps before the first and after the last aligned
    /// pair are free.
    SemiGlobal,
    /// Best-scoring pair of substrings (Smith-Waterman).
    Local,
}

impl fmt::Display for AlignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignMode::Global => write!(f, "global"),
            AlignMode::SemiGlobal => write!(f, "semiglobal"),
            AlignMode::Local => write!(f, "local"),
        }
    }
}

/// The mode that produced a result, and how many suboptimal rounds preceded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlignKind {
    pub mode: AlignMode,
    pub suboptimal_depth: usize,
}

impl AlignKind {
    pub fn is_suboptimal(&self) -> bool {
        self.suboptimal_depth > 0
    }
}

impl fmt::Display for AlignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_suboptimal() {
            write!(f, "{}-suboptimal({})", self.mode, self.suboptimal_depth)
        } else {
            write!(f, "{}", self.mode)
        }
    }
}

/// One concrete alignment.
///
/// `row` and `col` are the gapped aligned segments, always of equal length.
/// Start positions are 0-based offsets of the first aligned residue in the
/// input sequences; ends are exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedResult {
    row: Sequence,
    col: Sequence,
    row_start: usize,
    col_start: usize,
    score: i32,
    identity: usize,
    similarity: usize,
    gaps: usize,
    kind: AlignKind,
    shorter_input: usize,
}

impl AlignedResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        row: Sequence,
        col: Sequence,
        row_start: usize,
        col_start: usize,
        score: i32,
        similarity: usize,
        kind: AlignKind,
        shorter_input: usize,
    ) -> Self {
        debug_assert_eq!(row.len(), col.len());
        let identity = row
            .iter()
            .zip(col.iter())
            .filter(|(a, b)| a == b && !a.is_gap())
            .count();
        let gaps = row.gap_count() + col.gap_count();
        Self {
            row,
            col,
            row_start,
            col_start,
            score,
            identity,
            similarity,
            gaps,
            kind,
            shorter_input,
        }
    }

    /// Aligned row segment, with the row input's description.
    pub fn row(&self) -> &Sequence {
        &self.row
    }

    pub fn col(&self) -> &Sequence {
        &self.col
    }

    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    pub fn row_start(&self) -> usize {
        self.row_start
    }

    pub fn col_start(&self) -> usize {
        self.col_start
    }

    pub fn row_end(&self) -> usize {
        self.row_start + self.row.len() - self.row.gap_count()
    }

    pub fn col_end(&self) -> usize {
        self.col_start + self.col.len() - self.col.gap_count()
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Identical aligned pairs.
    pub fn identity(&self) -> usize {
        self.identity
    }

    /// Non-identical aligned pairs the score table does not penalize.
    pub fn similarity(&self) -> usize {
        self.similarity
    }

    /// Gap symbols on both rows.
    pub fn gaps(&self) -> usize {
        self.gaps
    }

    /// `identity` relative to the shorter input sequence.
    pub fn identity_percent(&self) -> f64 {
        self.identity as f64 / self.shorter_input as f64 * 100.0
    }

    pub fn kind(&self) -> AlignKind {
        self.kind
    }
}

impl fmt::Display for AlignedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.row)?;
        writeln!(f, "{}", self.col)?;
        write!(
            f,
            "{} score={} identity={} ({:.1}%) similarity={} gaps={} row={}..{} col={}..{}",
            self.kind,
            self.score,
            self.identity,
            self.identity_percent(),
            self.similarity,
            self.gaps,
            self.row_start,
            self.row_end(),
            self.col_start,
            self.col_end(),
        )
    }
}
