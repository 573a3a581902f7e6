use std::path::Path;

use protalign::{AlignOptions, Aligner, Sequence, SubstitutionTable};

/// Row and column sequences from the first two lines of `benches/<file>`.
pub fn load_pair(file: &str) -> (Sequence, Sequence) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("benches").join(file);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("could not read {}: {e}", path.display()));
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let mut next = |which: &str| -> Sequence {
        let line = lines
            .next()
            .unwrap_or_else(|| panic!("{} has no {which} sequence", path.display()));
        line.parse()
            .unwrap_or_else(|e| panic!("bad {which} sequence in {}: {e}", path.display()))
    };
    let row = next("row");
    let col = next("column");
    (row, col)
}

/// BLOSUM62 with -11/-1 gaps, one alignment per round.
pub fn aligner(blosum: &SubstitutionTable) -> Aligner<'_, SubstitutionTable> {
    Aligner::with(blosum).with_options(
        AlignOptions::default()
            .with_gap_open(-11)
            .with_gap_extend(-1)
            .with_result_count(1),
    )
}
