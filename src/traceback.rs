//! Lazy enumeration of tied-optimal alignments.
//!
//! The walk is an explicit depth-first search over `(i, j, layer)` states.
//! Every frame remembers the path length it was pushed at, so popping a frame
//! truncates the shared path buffer back to that point before extending it.
//! Branches are pushed in reverse so Left is explored before Diagonal before
//! Top, and a gap open before a gap extend.

use crate::aligned::{AlignKind, AlignedResult};
use crate::engine::AlignmentEngine;
use crate::matrix::{GapOrigin, Origin};
use crate::symbol::{AminoAcid, Sequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Align,
    RowGap,
    ColGap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Left,
    Diagonal,
    Top,
}

/// One consumed column of the alignment, taken at cell `(i, j)`.
#[derive(Debug, Clone, Copy)]
struct PathStep {
    i: usize,
    j: usize,
    kind: Move,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    i: usize,
    j: usize,
    layer: Layer,
    /// Directions not to take from this `align` state: the gap that was just
    /// opened into it.
    ban: Origin,
    depth: usize,
    step: Option<PathStep>,
}

impl Frame {
    fn new(i: usize, j: usize, layer: Layer, depth: usize) -> Self {
        Self {
            i,
            j,
            layer,
            ban: Origin::empty(),
            depth,
            step: None,
        }
    }

    fn banning(mut self, ban: Origin) -> Self {
        self.ban = ban;
        self
    }

    fn stepping(mut self, i: usize, j: usize, kind: Move) -> Self {
        self.step = Some(PathStep { i, j, kind });
        self
    }
}

/// Suspended search over one round of maximum cells.
#[derive(Debug, Clone)]
pub(crate) struct TracebackState {
    starts: Vec<(usize, usize)>,
    next_start: usize,
    stack: Vec<Frame>,
    path: Vec<PathStep>,
    score: i32,
    remaining: Option<usize>,
    first_path: Option<Vec<(usize, usize)>>,
}

impl TracebackState {
    pub(crate) fn new(engine: &AlignmentEngine, result_count: Option<usize>) -> Self {
        Self {
            starts: engine.max_cells().to_vec(),
            next_start: 0,
            stack: Vec::new(),
            path: Vec::new(),
            score: 0,
            remaining: result_count,
            first_path: None,
        }
    }

    /// Cells walked by the first result of this round.
    pub(crate) fn first_path(&self) -> &[(usize, usize)] {
        self.first_path.as_deref().unwrap_or(&[])
    }

    pub(crate) fn next_result(&mut self, engine: &AlignmentEngine) -> Option<AlignedResult> {
        let dp = engine.matrices();
        loop {
            if self.remaining == Some(0) {
                return None;
            }
            let Some(frame) = self.stack.pop() else {
                let &(i, j) = self.starts.get(self.next_start)?;
                self.next_start += 1;
                self.score = dp.align(i, j);
                self.stack.push(Frame::new(i, j, Layer::Align, 0));
                continue;
            };

            self.path.truncate(frame.depth);
            if let Some(step) = frame.step {
                self.path.push(step);
            }
            let (i, j) = (frame.i, frame.j);
            let depth = self.path.len();

            match frame.layer {
                Layer::Align => {
                    if engine.is_stop(i, j) {
                        if let Some(n) = self.remaining.as_mut() {
                            *n -= 1;
                        }
                        if self.first_path.is_none() {
                            self.first_path = Some(self.path.iter().map(|s| (s.i, s.j)).collect());
                        }
                        return Some(self.emit(engine, i, j));
                    }
                    let origin = dp.origin(i, j).difference(frame.ban);
                    if origin.contains(Origin::TOP) {
                        self.stack.push(Frame::new(i, j, Layer::RowGap, depth));
                    }
                    if origin.contains(Origin::DIAGONAL) {
                        self.stack.push(
                            Frame::new(i - 1, j - 1, Layer::Align, depth).stepping(i, j, Move::Diagonal),
                        );
                    }
                    if origin.contains(Origin::LEFT) {
                        self.stack.push(Frame::new(i, j, Layer::ColGap, depth));
                    }
                }
                Layer::RowGap => {
                    let gap_origin = dp.gap_origin(i, j);
                    if gap_origin.contains(GapOrigin::TOP_EXTEND) {
                        self.stack.push(
                            Frame::new(i - 1, j, Layer::RowGap, depth).stepping(i, j, Move::Top),
                        );
                    }
                    if gap_origin.contains(GapOrigin::TOP_OPEN) {
                        self.stack.push(
                            Frame::new(i - 1, j, Layer::Align, depth)
                                .banning(Origin::TOP)
                                .stepping(i, j, Move::Top),
                        );
                    }
                }
                Layer::ColGap => {
                    let gap_origin = dp.gap_origin(i, j);
                    if gap_origin.contains(GapOrigin::LEFT_EXTEND) {
                        self.stack.push(
                            Frame::new(i, j - 1, Layer::ColGap, depth).stepping(i, j, Move::Left),
                        );
                    }
                    if gap_origin.contains(GapOrigin::LEFT_OPEN) {
                        self.stack.push(
                            Frame::new(i, j - 1, Layer::Align, depth)
                                .banning(Origin::LEFT)
                                .stepping(i, j, Move::Left),
                        );
                    }
                }
            }
        }
    }

    /// Materialize the current path, which stopped at `(i, j)`.
    fn emit(&self, engine: &AlignmentEngine, i: usize, j: usize) -> AlignedResult {
        let row_seq = engine.row_seq();
        let col_seq = engine.col_seq();
        let mut row = Vec::with_capacity(self.path.len());
        let mut col = Vec::with_capacity(self.path.len());
        let mut similarity = 0;

        for step in self.path.iter().rev() {
            match step.kind {
                Move::Diagonal => {
                    let (a, b) = (row_seq[step.i - 1], col_seq[step.j - 1]);
                    if a != b && engine.substitution(step.i, step.j) >= 0 {
                        similarity += 1;
                    }
                    row.push(a);
                    col.push(b);
                }
                Move::Top => {
                    row.push(row_seq[step.i - 1]);
                    col.push(AminoAcid::Gap);
                }
                Move::Left => {
                    row.push(AminoAcid::Gap);
                    col.push(col_seq[step.j - 1]);
                }
            }
        }

        AlignedResult::new(
            Sequence::new(row).with_description(row_seq.description()),
            Sequence::new(col).with_description(col_seq.description()),
            i,
            j,
            self.score,
            similarity,
            AlignKind {
                mode: engine.mode(),
                suboptimal_depth: engine.suboptimal_depth(),
            },
            row_seq.len().min(col_seq.len()),
        )
    }
}

/// Borrowing iterator over the alignments tied for the engine's best score.
///
/// Returned by [`AlignmentEngine::traceback`]; the matrices are only read,
/// so any number of these can be started over the same engine.
pub struct Traceback<'a> {
    engine: &'a AlignmentEngine,
    state: TracebackState,
}

impl<'a> Traceback<'a> {
    pub(crate) fn new(engine: &'a AlignmentEngine, result_count: Option<usize>) -> Self {
        Self {
            engine,
            state: TracebackState::new(engine, result_count),
        }
    }

    pub(crate) fn first_path(&self) -> &[(usize, usize)] {
        self.state.first_path()
    }
}

impl Iterator for Traceback<'_> {
    type Item = AlignedResult;

    fn next(&mut self) -> Option<AlignedResult> {
        self.state.next_result(self.engine)
    }
}

/// Owning iterator: the optimal alignments, then up to `suboptimal_depth`
/// rounds of next-best alignments.
///
/// Each round clears the cells of the first alignment of the previous round
/// and refills what depends on them. Enumeration ends early when a round
/// yields nothing.
#[derive(Debug, Clone)]
pub struct Alignments {
    engine: AlignmentEngine,
    state: TracebackState,
    result_count: Option<usize>,
    rounds_left: usize,
}

impl Alignments {
    pub(crate) fn new(engine: AlignmentEngine, result_count: Option<usize>, suboptimal_depth: usize) -> Self {
        let state = TracebackState::new(&engine, result_count);
        Self {
            engine,
            state,
            result_count,
            rounds_left: suboptimal_depth,
        }
    }

    /// The engine in its current round.
    pub fn engine(&self) -> &AlignmentEngine {
        &self.engine
    }
}

impl Iterator for Alignments {
    type Item = AlignedResult;

    fn next(&mut self) -> Option<AlignedResult> {
        loop {
            if let Some(result) = self.state.next_result(&self.engine) {
                return Some(result);
            }
            if self.rounds_left == 0 || self.state.first_path().is_empty() {
                return None;
            }
            self.rounds_left -= 1;
            let path = self.state.first_path.take().unwrap_or_default();
            self.engine.clear_path(&path);
            self.state = TracebackState::new(&self.engine, self.result_count);
        }
    }
}
