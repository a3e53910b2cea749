//! # Kerbonaut Config
//!
//! Customization documents for crew cosmetics.
//!
//! ## Pipeline
//!
//! ```text
//! text -> Lexer -> TokenBuffer -> ObjectView/Elements -> DocumentParser -> ConfigRegistry
//! ```
//!
//! The format is a narrow JSON subset. Field lookups never fail: a missing or
//! malformed field is its documented default. Only structural damage (an
//! unclosed string, object or array) rejects a document, and a rejected
//! document leaves the registry holding the single built-in record.
//!
//! ## Example
//!
//! ```rust,ignore
//! use kerbonaut_config::{ConfigRegistry, DocumentParser};
//!
//! let mut registry = ConfigRegistry::new();
//! registry.load(Path::new("GameData/KerbonautRedux/KerbonautRedux.json"), &DocumentParser::default());
//!
//! if let Some(record) = registry.get("Jebediah Kerman") {
//!     for piece in record.effective_pieces() {
//!         // attach piece.mesh_name to piece.bone_name
//!     }
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod brackets;
pub mod document;
pub mod error;
pub mod lexer;
pub mod record;
pub mod registry;
pub mod scalar;
pub mod splitter;

pub use brackets::{match_bracket, matching_close};
pub use document::{parse_document, DocumentParser, CONFIGS_KEY, FALLBACK_NAME};
pub use error::{ConfigError, ConfigResult};
pub use lexer::{Lexer, Token, TokenBuffer, TokenKind};
pub use record::{
    BodyRegion, BodyTextures, CrewAttributes, CustomizationPiece, CustomizationRecord, HideFlags,
    RegionTextures,
};
pub use registry::{ConfigRegistry, ConfigSource};
pub use scalar::{ArrayView, ObjectView, Scalar};
pub use splitter::{Element, Elements};
