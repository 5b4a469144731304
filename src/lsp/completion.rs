//! Property-name completion inside style blocks.
//!
//! The context is read straight off the synthetic text: everything outside
//! the region is blank, so scanning backwards from the cursor only ever sees
//! CSS.

use tower_lsp::lsp_types::*;

use crate::document::LineIndex;
use crate::extract::Extraction;
use crate::properties::PROPERTIES;
use crate::stylesheet::StyleSheet;

/// What kind of completion context we detected.
#[derive(Debug, PartialEq, Eq)]
enum CompletionContext {
    /// Start of a declaration, after `{` or `;`. Holds the partial name typed so far.
    PropertyName { prefix: String },
    /// Anywhere else: selectors, values, at-rule preludes.
    Other,
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Detect the completion context by scanning backwards from the cursor.
fn detect_context(text: &str, offset: usize) -> CompletionContext {
    let before = &text[..offset];
    let name_len = before
        .bytes()
        .rev()
        .take_while(|&b| is_name_byte(b))
        .count();
    let prefix = &before[before.len() - name_len..];

    match before[..before.len() - name_len].trim_end().bytes().last() {
        Some(b'{') | Some(b';') => CompletionContext::PropertyName {
            prefix: prefix.to_string(),
        },
        _ => CompletionContext::Other,
    }
}

fn property_completions(prefix: &str) -> Vec<CompletionItem> {
    let prefix = prefix.to_ascii_lowercase();
    let mut items: Vec<CompletionItem> = PROPERTIES
        .values()
        .filter(|property| property.name.starts_with(&prefix))
        .map(|property| CompletionItem {
            label: property.name.to_string(),
            kind: Some(CompletionItemKind::PROPERTY),
            detail: Some(property.syntax.to_string()),
            documentation: Some(Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value: property.description.to_string(),
            })),
            insert_text: Some(format!("{}: ", property.name)),
            ..Default::default()
        })
        .collect();
    items.sort_by(|a, b| a.label.cmp(&b.label));
    items
}

/// Completions at `position` inside an extracted style sheet.
pub fn completion_at_position(
    extraction: &Extraction<StyleSheet>,
    line_index: &LineIndex,
    position: Position,
) -> Option<CompletionResponse> {
    let offset = line_index.position_to_offset(position)?;
    let text = &extraction.document.text;
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }

    let items = match detect_context(text, offset) {
        CompletionContext::PropertyName { prefix } => property_completions(&prefix),
        CompletionContext::Other => Vec::new(),
    };

    if items.is_empty() {
        None
    } else {
        Some(CompletionResponse::Array(items))
    }
}
