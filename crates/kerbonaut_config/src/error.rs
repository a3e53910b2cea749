//! # Config Error Types
//!
//! Document-level failures. Field-level misses never show up here: they
//! resolve to defaults inside the scalar extractor.

use thiserror::Error;

/// Errors that reject a whole customization document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document could not be read from disk.
    #[error("failed to read config document: {0}")]
    Io(#[from] std::io::Error),

    /// The document does not start with an object.
    #[error("document root is not an object")]
    MissingRoot,

    /// A required array key is absent from its object.
    #[error("no '{0}' array found")]
    MissingArray(&'static str),

    /// A string literal runs to the end of the buffer.
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),

    /// An opening bracket never returns to depth zero.
    #[error("unmatched '{bracket}' at byte {offset}")]
    UnmatchedBracket {
        /// The opening character.
        bracket: char,
        /// Byte offset of the opening character.
        offset: usize,
    },

    /// An array element object never closes inside its array.
    #[error("unterminated element starting at byte {0}")]
    UnterminatedElement(usize),
}

/// Result type for document parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;
