//! Document state management and text utilities.
//!
//! This module provides:
//! - `LineIndex` for byte offset <-> LSP position conversion
//! - `StyleRegion` for the byte span of an embedded style sheet
//! - `SourceDocument`, `SyntheticDocument` and `DocumentStore` for document lifecycle management

mod region;
mod state;
mod text;

pub use region::StyleRegion;
pub use state::{
    DocumentStore, HostLanguage, Scope, SourceDocument, SyntheticDocument, STYLE_SHEET_LANGUAGE_ID,
};
pub use text::LineIndex;
