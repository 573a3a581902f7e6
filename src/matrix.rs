//! Dynamic-programming grids for one alignment run.
//!
//! All layers live in flat arenas indexed by `i * cols + j`, where row 0 and
//! column 0 stand for the empty prefix.

use bitflags::bitflags;

/// Stands in for minus infinity in gap layers that no path can end in.
pub(crate) const NEG_INF: i32 = i32::MIN / 2;

bitflags! {
    /// Recurrence branches attaining `align[i][j]`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Origin: u8 {
        /// Column symbol against a gap (`colGap`).
        const LEFT = 0b001;
        /// Row symbol against column symbol.
        const DIAGONAL = 0b010;
        /// Row symbol against a gap (`rowGap`).
        const TOP = 0b100;
    }
}

bitflags! {
    /// How the gap layers of a cell were reached: a fresh gap opened from
    /// `align`, or a running gap extended.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GapOrigin: u8 {
        const TOP_OPEN = 0b0001;
        const TOP_EXTEND = 0b0010;
        const LEFT_OPEN = 0b0100;
        const LEFT_EXTEND = 0b1000;
    }
}

/// The three score layers of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScores {
    pub align: i32,
    pub row_gap: i32,
    pub col_gap: i32,
}

impl CellScores {
    pub const ZERO: CellScores = CellScores {
        align: 0,
        row_gap: 0,
        col_gap: 0,
    };
}

#[derive(Debug, Clone)]
pub struct DpMatrices {
    rows: usize,
    cols: usize,
    align: Vec<i32>,
    row_gap: Vec<i32>,
    col_gap: Vec<i32>,
    origin: Vec<Origin>,
    gap_origin: Vec<GapOrigin>,
    cleared: Vec<bool>,
}

impl DpMatrices {
    /// Grids for a `row_len` x `col_len` alignment, i.e. `(row_len + 1) x (col_len + 1)` cells.
    pub fn new(row_len: usize, col_len: usize) -> Self {
        let rows = row_len + 1;
        let cols = col_len + 1;
        let n = rows * cols;
        Self {
            rows,
            cols,
            align: vec![0; n],
            row_gap: vec![0; n],
            col_gap: vec![0; n],
            origin: vec![Origin::empty(); n],
            gap_origin: vec![GapOrigin::empty(); n],
            cleared: vec![false; n],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub(crate) fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        i * self.cols + j
    }

    #[inline]
    pub fn align(&self, i: usize, j: usize) -> i32 {
        self.align[self.index(i, j)]
    }

    #[inline]
    pub fn row_gap(&self, i: usize, j: usize) -> i32 {
        self.row_gap[self.index(i, j)]
    }

    #[inline]
    pub fn col_gap(&self, i: usize, j: usize) -> i32 {
        self.col_gap[self.index(i, j)]
    }

    #[inline]
    pub fn origin(&self, i: usize, j: usize) -> Origin {
        self.origin[self.index(i, j)]
    }

    #[inline]
    pub fn gap_origin(&self, i: usize, j: usize) -> GapOrigin {
        self.gap_origin[self.index(i, j)]
    }

    /// Whether the cell lies on a path removed by a suboptimal round.
    #[inline]
    pub fn is_cleared(&self, i: usize, j: usize) -> bool {
        self.cleared[self.index(i, j)]
    }

    #[inline]
    pub fn scores(&self, i: usize, j: usize) -> CellScores {
        let k = self.index(i, j);
        CellScores {
            align: self.align[k],
            row_gap: self.row_gap[k],
            col_gap: self.col_gap[k],
        }
    }

    pub(crate) fn set(
        &mut self,
        i: usize,
        j: usize,
        scores: CellScores,
        origin: Origin,
        gap_origin: GapOrigin,
    ) {
        let k = self.index(i, j);
        self.align[k] = scores.align;
        self.row_gap[k] = scores.row_gap;
        self.col_gap[k] = scores.col_gap;
        self.origin[k] = origin;
        self.gap_origin[k] = gap_origin;
    }

    /// Zero every layer of the cell and mark it cleared for good.
    pub(crate) fn clear(&mut self, i: usize, j: usize) {
        self.set(i, j, CellScores::ZERO, Origin::empty(), GapOrigin::empty());
        let k = self.index(i, j);
        self.cleared[k] = true;
    }
}
