//! Amino acid symbols and sequences.
//!
//! [`AminoAcid`] is the alphabet the aligner works on. Ordering and hashing
//! follow declaration order and carry no biological meaning.

use std::fmt;
use std::str::FromStr;

use crate::error::{AlignError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AminoAcid {
    Ala,
    Cys,
    Asp,
    Glu,
    Phe,
    Gly,
    His,
    Ile,
    Lys,
    Leu,
    Met,
    Asn,
    Pro,
    Gln,
    Arg,
    Ser,
    Thr,
    Val,
    Trp,
    Tyr,
    /// Selenocysteine.
    Sec,
    /// Pyrrolysine.
    Pyl,
    /// Asparagine or aspartate.
    Asx,
    /// Glutamine or glutamate.
    Glx,
    /// Leucine or isoleucine.
    Xle,
    /// Undetermined residue.
    Xaa,
    Gap,
    Term,
}

use AminoAcid::*;

/// (variant, full name, three-letter code, one-letter code)
const NAMES: [(AminoAcid, &str, &str, char); 28] = [
    (Ala, "alanine", "ala", 'A'),
    (Cys, "cysteine", "cys", 'C'),
    (Asp, "aspartate", "asp", 'D'),
    (Glu, "glutamate", "glu", 'E'),
    (Phe, "phenylalanine", "phe", 'F'),
    (Gly, "glycine", "gly", 'G'),
    (His, "histidine", "his", 'H'),
    (Ile, "isoleucine", "ile", 'I'),
    (Lys, "lysine", "lys", 'K'),
    (Leu, "leucine", "leu", 'L'),
    (Met, "methionine", "met", 'M'),
    (Asn, "asparagine", "asn", 'N'),
    (Pro, "proline", "pro", 'P'),
    (Gln, "glutamine", "gln", 'Q'),
    (Arg, "arginine", "arg", 'R'),
    (Ser, "serine", "ser", 'S'),
    (Thr, "threonine", "thr", 'T'),
    (Val, "valine", "val", 'V'),
    (Trp, "tryptophan", "trp", 'W'),
    (Tyr, "tyrosine", "tyr", 'Y'),
    (Sec, "selenocysteine", "sec", 'U'),
    (Pyl, "pyrrolysine", "pyl", 'O'),
    (Asx, "asparagine/aspartate", "asx", 'B'),
    (Glx, "glutamine/glutamate", "glx", 'Z'),
    (Xle, "leucine/isoleucine", "xle", 'J'),
    (Xaa, "undetermined", "xaa", 'X'),
    (Gap, "gap", "gap", '-'),
    (Term, "termination", "term", '*'),
];

impl AminoAcid {
    /// The twenty standard residues.
    pub const STANDARD: [AminoAcid; 20] = [
        Ala, Cys, Asp, Glu, Phe, Gly, His, Ile, Lys, Leu, Met, Asn, Pro, Gln, Arg, Ser, Thr, Val,
        Trp, Tyr,
    ];

    /// Look up a one-letter code, case-insensitive. `|` is accepted for termination.
    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_uppercase();
        if code == '|' {
            return Some(Term);
        }
        NAMES.iter().find(|n| n.3 == code).map(|n| n.0)
    }

    pub fn code(self) -> char {
        NAMES[self as usize].3
    }

    pub fn short_name(self) -> &'static str {
        NAMES[self as usize].2
    }

    pub fn long_name(self) -> &'static str {
        NAMES[self as usize].1
    }

    pub fn is_gap(self) -> bool {
        self == Gap
    }

    pub fn is_termination(self) -> bool {
        self == Term
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for AminoAcid {
    type Err = AlignError;

    /// Accepts one-letter codes, three-letter codes and full names.
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_code(c)
                .ok_or_else(|| AlignError::Parse(format!("unknown amino acid code '{c}'")));
        }
        let lower = s.to_ascii_lowercase();
        NAMES
            .iter()
            .find(|n| n.1 == lower || n.2 == lower)
            .map(|n| n.0)
            .ok_or_else(|| AlignError::Parse(format!("unknown amino acid name '{s}'")))
    }
}

/// An ordered list of amino acids with an optional description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence {
    residues: Vec<AminoAcid>,
    description: String,
}

impl Sequence {
    pub fn new(residues: Vec<AminoAcid>) -> Self {
        Self {
            residues,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn residues(&self) -> &[AminoAcid] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AminoAcid> {
        self.residues.iter()
    }

    /// Number of gap symbols.
    pub fn gap_count(&self) -> usize {
        self.residues.iter().filter(|aa| aa.is_gap()).count()
    }
}

impl std::ops::Index<usize> for Sequence {
    type Output = AminoAcid;

    fn index(&self, index: usize) -> &AminoAcid {
        &self.residues[index]
    }
}

impl From<Vec<AminoAcid>> for Sequence {
    fn from(residues: Vec<AminoAcid>) -> Self {
        Self::new(residues)
    }
}

impl FromIterator<AminoAcid> for Sequence {
    fn from_iter<I: IntoIterator<Item = AminoAcid>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a AminoAcid;
    type IntoIter = std::slice::Iter<'a, AminoAcid>;

    fn into_iter(self) -> Self::IntoIter {
        self.residues.iter()
    }
}

impl FromStr for Sequence {
    type Err = AlignError;

    /// Parses one-letter codes; whitespace is skipped.
    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                AminoAcid::from_code(c)
                    .ok_or_else(|| AlignError::Parse(format!("unknown amino acid code '{c}'")))
            })
            .collect()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.residues.iter().map(|aa| aa.code()).collect::<String>();
        write!(f, "{s}")
    }
}
