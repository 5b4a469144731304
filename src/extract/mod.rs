//! Extraction of embedded style sheets from component sources.
//!
//! Extraction runs in three steps:
//! - `scanner` proposes candidate offsets with a cheap regex
//! - `locator` parses the host document and confirms each candidate
//! - `mask` blanks everything that is not style sheet
//!
//! The resulting synthetic document is handed to the style-sheet cache,
//! which returns its parsed form.

mod locator;
mod mask;
mod scanner;

use std::sync::Arc;

use tracing::trace;

use crate::cache::StyleSheetCache;
use crate::document::{
    Scope, SourceDocument, StyleRegion, SyntheticDocument, STYLE_SHEET_LANGUAGE_ID,
};
use crate::error::Result;

pub(crate) use locator::token_at_offset;
pub use locator::RegionLocator;
pub use mask::{mask, MaskedText};
pub use scanner::candidate_offsets;

/// A synthetic style-sheet document and its parsed form.
#[derive(Debug)]
pub struct Extraction<T> {
    pub document: SyntheticDocument,
    pub stylesheet: Arc<T>,
}

impl<T> Extraction<T> {
    /// The kept region containing `offset` (bounds inclusive).
    pub fn region_containing(&self, offset: usize) -> Option<StyleRegion> {
        self.document
            .regions
            .iter()
            .copied()
            .find(|r| r.start <= offset && offset <= r.end)
    }

    /// Whether `span` touches a blanked dynamic expression.
    pub fn overlaps_expression(&self, span: &std::ops::Range<usize>) -> bool {
        self.document
            .masked_expressions
            .iter()
            .any(|e| e.start < span.end.max(span.start + 1) && span.start < e.end)
    }
}

/// Extract every style region of `source`.
///
/// Returns `Ok(None)` when the document has no style region.
pub fn extract_document<T>(
    source: &SourceDocument,
    cache: &StyleSheetCache<T>,
) -> Result<Option<Extraction<T>>> {
    let mut candidates = candidate_offsets(&source.text).peekable();
    if candidates.peek().is_none() {
        return Ok(None);
    }

    let locator = RegionLocator::new(&source.text, source.host_language())?;
    let mut regions = locator.locate(candidates);
    regions.sort();
    regions.dedup();
    trace!(uri = %source.uri, regions = regions.len(), "located style regions");

    if regions.is_empty() {
        return Ok(None);
    }
    build(source, Scope::Document, regions, cache).map(Some)
}

/// Extract the style region strictly enclosing `offset`.
///
/// A cursor on a region's first or last boundary is outside it.
pub fn extract_at_offset<T>(
    source: &SourceDocument,
    offset: usize,
    cache: &StyleSheetCache<T>,
) -> Result<Option<Extraction<T>>> {
    if candidate_offsets(&source.text).next().is_none() {
        return Ok(None);
    }

    let locator = RegionLocator::new(&source.text, source.host_language())?;
    let Some(region) = locator
        .region_at(offset)
        .filter(|region| region.strictly_contains(offset))
    else {
        return Ok(None);
    };
    build(source, Scope::Region(region), vec![region], cache).map(Some)
}

fn build<T>(
    source: &SourceDocument,
    scope: Scope,
    regions: Vec<StyleRegion>,
    cache: &StyleSheetCache<T>,
) -> Result<Extraction<T>> {
    let MaskedText { text, expressions } = mask(&source.text, &regions)?;
    let document = SyntheticDocument {
        uri: source.uri.clone(),
        version: source.version,
        language_id: STYLE_SHEET_LANGUAGE_ID,
        scope,
        text,
        regions,
        masked_expressions: expressions,
    };
    let stylesheet = cache.get(&document);
    Ok(Extraction {
        document,
        stylesheet,
    })
}
