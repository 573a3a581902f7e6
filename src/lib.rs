//! Pairwise protein alignment with affine gaps.
//!
//! Global, semi-global and local (Smith-Waterman) alignment share one
//! three-layer recurrence. Traceback enumerates every alignment tied for the
//! best score, lazily, and local alignment can continue into suboptimal
//! rounds by clearing the best path and refilling the cells that depend on it.
//!
//! ```
//! use protalign::{AlignOptions, Aligner, Sequence, SubstitutionTable};
//!
//! let blosum = SubstitutionTable::blosum62();
//! let row: Sequence = "ISALIGNED".parse()?;
//! let col: Sequence = "THISLINE".parse()?;
//! let aligner = Aligner::with(&blosum).with_options(AlignOptions::default().with_gap_open(-8));
//! let best = aligner.local_align(&row, &col)?.next().unwrap();
//! assert_eq!(best.score(), 12);
//! # Ok::<(), protalign::AlignError>(())
//! ```

pub mod aligned;
pub mod batch;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod score;
pub mod symbol;
pub mod traceback;

pub use aligned::{AlignKind, AlignMode, AlignedResult};
pub use engine::AlignmentEngine;
pub use error::{AlignError, Result};
pub use score::{ScoreMatrix, SubstitutionTable};
pub use symbol::{AminoAcid, Sequence};
pub use traceback::{Alignments, Traceback};

/// Penalties and result limits for one alignment call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignOptions {
    /// Cost of the first position of a gap.
    pub gap_open: i32,
    /// Cost of every further position; `None` means `gap_open`.
    pub gap_extend: Option<i32>,
    /// Results per round; `None` enumerates all ties.
    pub result_count: Option<usize>,
    /// Suboptimal rounds after the optimal one. Local alignment only.
    pub suboptimal_depth: usize,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            gap_open: -8,
            gap_extend: None,
            result_count: None,
            suboptimal_depth: 0,
        }
    }
}

impl AlignOptions {
    pub fn with_gap_open(mut self, gap_open: i32) -> Self {
        self.gap_open = gap_open;
        self
    }

    pub fn with_gap_extend(mut self, gap_extend: i32) -> Self {
        self.gap_extend = Some(gap_extend);
        self
    }

    pub fn with_result_count(mut self, result_count: usize) -> Self {
        self.result_count = Some(result_count);
        self
    }

    pub fn with_suboptimal_depth(mut self, suboptimal_depth: usize) -> Self {
        self.suboptimal_depth = suboptimal_depth;
        self
    }
}

/// Global alignment of `row` against `col`, or semi-global when `semi_global`
/// is set (leading and trailing gaps free).
///
/// # Errors
///
/// - [`AlignError::InvalidInput`] if either sequence is empty.
/// - [`AlignError::InvalidInput`] if `gap_open` is cheaper than the effective
///   `gap_extend` (e.g. open -1, extend -4). Affine traceback tells a gap
///   open from an extension by cost, so such penalties are refused rather
///   than aligned.
/// - [`AlignError::InvalidInput`] if position-specific gap penalties cover
///   only some columns.
/// - [`AlignError::UnknownSymbol`] if `matrix` cannot score a residue.
pub fn global_align<M: ScoreMatrix + ?Sized>(
    row: &Sequence,
    col: &Sequence,
    matrix: &M,
    options: &AlignOptions,
    semi_global: bool,
) -> Result<Alignments> {
    let mode = if semi_global {
        AlignMode::SemiGlobal
    } else {
        AlignMode::Global
    };
    let engine = AlignmentEngine::new(row, col, matrix, options.gap_open, options.gap_extend, mode)?;
    Ok(engine.into_alignments(options.result_count, 0))
}

/// Local alignment of `row` against `col`, continuing into
/// `options.suboptimal_depth` suboptimal rounds.
///
/// # Errors
///
/// As [`global_align`].
pub fn local_align<M: ScoreMatrix + ?Sized>(
    row: &Sequence,
    col: &Sequence,
    matrix: &M,
    options: &AlignOptions,
) -> Result<Alignments> {
    let engine = AlignmentEngine::new(
        row,
        col,
        matrix,
        options.gap_open,
        options.gap_extend,
        AlignMode::Local,
    )?;
    Ok(engine.into_alignments(options.result_count, options.suboptimal_depth))
}

/// A score table paired with options, reusable across many alignments.
#[derive(Debug)]
pub struct Aligner<'m, M: ?Sized> {
    matrix: &'m M,
    options: AlignOptions,
}

impl<'m, M: ScoreMatrix + ?Sized> Aligner<'m, M> {
    pub fn with(matrix: &'m M) -> Self {
        Self {
            matrix,
            options: AlignOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AlignOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AlignOptions {
        &self.options
    }

    pub fn matrix(&self) -> &'m M {
        self.matrix
    }

    pub fn global_align(&self, row: &Sequence, col: &Sequence) -> Result<Alignments> {
        global_align(row, col, self.matrix, &self.options, false)
    }

    pub fn semi_global_align(&self, row: &Sequence, col: &Sequence) -> Result<Alignments> {
        global_align(row, col, self.matrix, &self.options, true)
    }

    pub fn local_align(&self, row: &Sequence, col: &Sequence) -> Result<Alignments> {
        local_align(row, col, self.matrix, &self.options)
    }

    pub fn align(&self, row: &Sequence, col: &Sequence, mode: AlignMode) -> Result<Alignments> {
        match mode {
            AlignMode::Global => self.global_align(row, col),
            AlignMode::SemiGlobal => self.semi_global_align(row, col),
            AlignMode::Local => self.local_align(row, col),
        }
    }

    /// Optimal score only; no traceback.
    pub fn best_score(&self, row: &Sequence, col: &Sequence, mode: AlignMode) -> Result<i32> {
        let engine = AlignmentEngine::new(
            row,
            col,
            self.matrix,
            self.options.gap_open,
            self.options.gap_extend,
            mode,
        )?;
        Ok(engine.best_score())
    }
}
