use thiserror::Error;

use crate::symbol::AminoAcid;

#[derive(Debug, Error)]
pub enum AlignError {
    /// Bad arguments: empty sequences, inconsistent gap penalties.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The scoring table has no entry for this symbol.
    #[error("no score defined for symbol {0}")]
    UnknownSymbol(AminoAcid),

    /// Malformed symbol names or score table text.
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, AlignError>;
