//! Error types for style-region extraction.
//!
//! Only genuine failures live here. Finding no style region is a normal
//! outcome and is reported as `Ok(None)` by the extraction entry points.

use thiserror::Error;

/// Errors raised while extracting a synthetic style-sheet document.
#[derive(Debug, Error)]
pub enum Error {
    /// The host grammar could not be loaded into the parser.
    #[error("failed to load host grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser returned no tree.
    #[error("host parser produced no syntax tree")]
    ParseCancelled,

    /// Masking changed the length of the document.
    #[error("masked document is {actual} bytes long, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
