//! Diagnostics conversion from CSS syntax errors to LSP diagnostics.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity};
use tree_sitter::Node;

use crate::document::LineIndex;
use crate::extract::Extraction;
use crate::stylesheet::StyleSheet;

const SOURCE: &str = "styled-jsx";

/// Longest error text quoted verbatim in a message.
const MAX_SNIPPET: usize = 32;

/// Convert the syntax errors of an extracted style sheet to LSP diagnostics.
///
/// Errors touching a blanked `${...}` interpolation are dropped: the
/// interpolation is not CSS and its placeholder is expected not to parse.
pub fn to_diagnostics(extraction: &Extraction<StyleSheet>, line_index: &LineIndex) -> Vec<Diagnostic> {
    let Some(root) = extraction.stylesheet.root() else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    collect_errors(root, &mut errors);

    errors
        .into_iter()
        .filter(|node| !extraction.overlaps_expression(&node.byte_range()))
        .map(|node| Diagnostic {
            range: line_index.span_to_range(&node.byte_range()),
            severity: Some(DiagnosticSeverity::ERROR),
            code: None,
            code_description: None,
            source: Some(SOURCE.to_string()),
            message: error_message(node, &extraction.document.text),
            related_information: None,
            tags: None,
            data: None,
        })
        .collect()
}

/// Outermost error nodes and every missing node, in source order.
fn collect_errors<'t>(node: Node<'t>, errors: &mut Vec<Node<'t>>) {
    if node.is_error() || node.is_missing() {
        errors.push(node);
        return;
    }
    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, errors);
    }
}

fn error_message(node: Node, text: &str) -> String {
    if node.is_missing() {
        return format!("Missing `{}`", node.kind());
    }
    let snippet = text[node.byte_range()]
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");
    if snippet.is_empty() || snippet.len() > MAX_SNIPPET {
        "Invalid CSS syntax".to_string()
    } else {
        format!("Unexpected `{}`", snippet)
    }
}
