//! Symbol-pair scoring.
//!
//! The engine only ever talks to [`ScoreMatrix`]. [`SubstitutionTable`] is the
//! stock implementation: a symmetric table over an ordered alphabet, stored as
//! its lower triangle.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{AlignError, Result};
use crate::symbol::AminoAcid;

pub trait ScoreMatrix {
    /// Score of aligning `a` against `b`. Must be symmetric.
    ///
    /// # Errors
    ///
    /// [`AlignError::UnknownSymbol`] if either symbol has no entry.
    fn score(&self, a: AminoAcid, b: AminoAcid) -> Result<i32>;

    /// Position-specific gap penalty for profile column `column`.
    ///
    /// Tables returning `None` (the default) leave gap costs to the uniform
    /// open/extend penalties of the alignment call.
    fn gap_penalty(&self, _column: usize) -> Option<i32> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    alphabet: Vec<AminoAcid>,
    index: HashMap<AminoAcid, usize>,
    /// Lower triangle, row-major: entry (i, j) with j <= i lives at i*(i+1)/2 + j.
    scores: Vec<i32>,
    description: String,
}

fn triangle(i: usize, j: usize) -> usize {
    let (hi, lo) = if i >= j { (i, j) } else { (j, i) };
    hi * (hi + 1) / 2 + lo
}

impl SubstitutionTable {
    /// Create a table over `alphabet` with every score set to 0.
    ///
    /// # Errors
    ///
    /// Returns an error if `alphabet` is empty or lists a symbol twice.
    pub fn new(alphabet: Vec<AminoAcid>) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(AlignError::InvalidInput("alphabet must not be empty".into()));
        }
        let mut index = HashMap::with_capacity(alphabet.len());
        for (i, &aa) in alphabet.iter().enumerate() {
            if index.insert(aa, i).is_some() {
                return Err(AlignError::InvalidInput(format!(
                    "symbol {aa} appears twice in the alphabet"
                )));
            }
        }
        let n = alphabet.len();
        Ok(Self {
            alphabet,
            index,
            scores: vec![0; n * (n + 1) / 2],
            description: String::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn alphabet(&self) -> &[AminoAcid] {
        &self.alphabet
    }

    fn position(&self, aa: AminoAcid) -> Result<usize> {
        self.index
            .get(&aa)
            .copied()
            .ok_or(AlignError::UnknownSymbol(aa))
    }

    /// Set the score of the unordered pair `{a, b}`.
    pub fn set_score(&mut self, a: AminoAcid, b: AminoAcid, score: i32) -> Result<()> {
        let k = triangle(self.position(a)?, self.position(b)?);
        self.scores[k] = score;
        Ok(())
    }

    /// BLOSUM62 (NCBI), over `A R N D C Q E G H I L K M F P S T W Y V B Z X *`.
    pub fn blosum62() -> Self {
        use AminoAcid::*;
        let alphabet = vec![
            Ala, Arg, Asn, Asp, Cys, Gln, Glu, Gly, His, Ile, Leu, Lys, Met, Phe, Pro, Ser, Thr,
            Trp, Tyr, Val, Asx, Glx, Xaa, Term,
        ];
        let index = alphabet.iter().enumerate().map(|(i, &aa)| (aa, i)).collect();
        Self {
            alphabet,
            index,
            scores: BLOSUM62.iter().flat_map(|row| row.iter().copied()).collect(),
            description: "BLOSUM62".into(),
        }
    }
}

impl ScoreMatrix for SubstitutionTable {
    fn score(&self, a: AminoAcid, b: AminoAcid) -> Result<i32> {
        Ok(self.scores[triangle(self.position(a)?, self.position(b)?)])
    }
}

impl FromStr for SubstitutionTable {
    type Err = AlignError;

    /// Parse the lower-triangular text format.
    ///
    /// Lines starting with `#` are comments. The first remaining line lists
    /// the alphabet; each following line `k` holds the `k + 1` scores of
    /// symbol `k` against symbols `0..=k`.
    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let header = lines
            .next()
            .ok_or_else(|| AlignError::Parse("score table has no alphabet line".into()))?;
        let alphabet = header
            .split_whitespace()
            .map(|name| name.parse::<AminoAcid>())
            .collect::<Result<Vec<_>>>()?;
        let mut table = SubstitutionTable::new(alphabet)?;

        let mut row = 0;
        for line in lines {
            if row == table.alphabet.len() {
                return Err(AlignError::Parse(format!(
                    "score table has more than {} rows",
                    table.alphabet.len()
                )));
            }
            let values = line
                .split_whitespace()
                .map(|v| {
                    v.parse::<i32>()
                        .map_err(|e| AlignError::Parse(format!("bad score '{v}': {e}")))
                })
                .collect::<Result<Vec<i32>>>()?;
            if values.len() != row + 1 {
                return Err(AlignError::Parse(format!(
                    "row {} of the score table has {} values, expected {}",
                    row + 1,
                    values.len(),
                    row + 1
                )));
            }
            let start = triangle(row, 0);
            table.scores[start..=start + row].copy_from_slice(&values);
            row += 1;
        }

        if row != table.alphabet.len() {
            return Err(AlignError::Parse(format!(
                "score table has {row} rows, expected {}",
                table.alphabet.len()
            )));
        }
        Ok(table)
    }
}

#[rustfmt::skip]
const BLOSUM62: [&[i32]; 24] = [
    &[4], // A
    &[-1, 5], // R
    &[-2, 0, 6], // N
    &[-2, -2, 1, 6], // D
    &[0, -3, -3, -3, 9], // C
    &[-1, 1, 0, 0, -3, 5], // Q
    &[-1, 0, 0, 2, -4, 2, 5], // E
    &[0, -2, 0, -1, -3, -2, -2, 6], // G
    &[-2, 0, 1, -1, -3, 0, 0, -2, 8], // H
    &[-1, -3, -3, -3, -1, -3, -3, -4, -3, 4], // I
    &[-1, -2, -3, -4, -1, -2, -3, -4, -3, 2, 4], // L
    &[-1, 2, 0, -1, -3, 1, 1, -2, -1, -3, -2, 5], // K
    &[-1, -1, -2, -3, -1, 0, -2, -3, -2, 1, 2, -1, 5], // M
    &[-2, -3, -3, -3, -2, -3, -3, -3, -1, 0, 0, -3, 0, 6], // F
    &[-1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4, 7], // P
    &[1, -1, 1, 0, -1, 0, 0, 0, -1, -2, -2, 0, -1, -2, -1, 4], // S
    &[0, -1, 0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1, 1, 5], // T
    &[-3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1, 1, -4, -3, -2, 11], // W
    &[-2, -2, -2, -3, -2, -1, -2, -3, 2, -1, -1, -2, -1, 3, -3, -2, -2, 2, 7], // Y
    &[0, -3, -3, -3, -1, -2, -2, -3, -3, 3, 1, -2, 1, -1, -2, -2, 0, -3, -1, 4], // V
    &[-2, -1, 3, 4, -3, 0, 1, -1, 0, -3, -4, 0, -3, -3, -2, 0, -1, -4, -3, -3, 4], // B
    &[-1, 0, 0, 1, -3, 3, 4, -2, 0, -3, -3, 1, -1, -3, -1, 0, -1, -3, -2, -2, 1, 4], // Z
    &[0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2, 0, 0, -2, -1, -1, -1, -1, -1], // X
    &[-4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, 1], // *
];
