//! Many independent pairs at once.
//!
//! Each pair gets its own engine on a rayon worker; a single alignment never
//! spans threads.

use log::debug;
use rayon::prelude::*;

use crate::aligned::{AlignMode, AlignedResult};
use crate::error::Result;
use crate::score::ScoreMatrix;
use crate::symbol::Sequence;
use crate::Aligner;

/// First (best) alignment of every pair, in input order.
///
/// `None` marks a local pair with no positive-scoring cell.
///
/// # Errors
///
/// The first error of any pair, as [`Aligner::align`].
pub fn align_batch<M: ScoreMatrix + Sync + ?Sized>(
    aligner: &Aligner<'_, M>,
    pairs: &[(Sequence, Sequence)],
    mode: AlignMode,
) -> Result<Vec<Option<AlignedResult>>> {
    debug!("aligning {} pairs ({mode})", pairs.len());
    pairs
        .par_iter()
        .map(|(row, col)| {
            aligner
                .align(row, col, mode)
                .map(|mut alignments| alignments.next())
        })
        .collect()
}

/// Optimal score of every pair, without traceback.
///
/// # Errors
///
/// The first error of any pair, as [`Aligner::best_score`].
pub fn best_scores<M: ScoreMatrix + Sync + ?Sized>(
    aligner: &Aligner<'_, M>,
    pairs: &[(Sequence, Sequence)],
    mode: AlignMode,
) -> Result<Vec<i32>> {
    debug!("scoring {} pairs ({mode})", pairs.len());
    pairs
        .par_iter()
        .map(|(row, col)| aligner.best_score(row, col, mode))
        .collect()
}
