//! Document symbols and folding ranges for embedded style sheets.

use tower_lsp::lsp_types::{DocumentSymbol, FoldingRange, SymbolKind};
use tree_sitter::Node;

use crate::document::LineIndex;
use crate::extract::Extraction;
use crate::stylesheet::{normalize_whitespace, StyleSheet};

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Hierarchical symbols: rule sets, `@media`/`@supports` blocks and keyframes.
pub fn document_symbols(
    extraction: &Extraction<StyleSheet>,
    line_index: &LineIndex,
) -> Vec<DocumentSymbol> {
    let Some(root) = extraction.stylesheet.root() else {
        return Vec::new();
    };
    collect_symbols(root, &extraction.document.text, line_index)
}

fn collect_symbols(node: Node, text: &str, line_index: &LineIndex) -> Vec<DocumentSymbol> {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    let mut symbols = Vec::new();

    for child in children {
        let (name, selection, kind, body) = match child.kind() {
            "rule_set" => {
                let Some(selectors) = child_of_kind(child, "selectors") else {
                    continue;
                };
                let name = normalize_whitespace(&text[selectors.byte_range()]);
                (name, selectors, SymbolKind::CLASS, child_of_kind(child, "block"))
            }
            "media_statement" | "supports_statement" => {
                let block = child_of_kind(child, "block");
                let header_end = block.map_or(child.end_byte(), |b| b.start_byte());
                let name = normalize_whitespace(&text[child.start_byte()..header_end]);
                (name, child, SymbolKind::MODULE, block)
            }
            "keyframes_statement" => {
                let Some(name_node) = child_of_kind(child, "keyframes_name") else {
                    continue;
                };
                let name = format!("@keyframes {}", &text[name_node.byte_range()]);
                (name, name_node, SymbolKind::FUNCTION, None)
            }
            _ => continue,
        };

        if name.is_empty() {
            continue;
        }
        let nested = body
            .map(|b| collect_symbols(b, text, line_index))
            .unwrap_or_default();

        #[allow(deprecated)]
        symbols.push(DocumentSymbol {
            name,
            detail: None,
            kind,
            tags: None,
            deprecated: None,
            range: line_index.span_to_range(&child.byte_range()),
            selection_range: line_index.span_to_range(&selection.byte_range()),
            children: if nested.is_empty() { None } else { Some(nested) },
        });
    }

    symbols
}

/// A folding range for every brace block that spans several lines.
///
/// The range ends on the line before the closing brace so that it stays
/// visible when folded.
pub fn folding_ranges(
    extraction: &Extraction<StyleSheet>,
    line_index: &LineIndex,
) -> Vec<FoldingRange> {
    let Some(root) = extraction.stylesheet.root() else {
        return Vec::new();
    };
    let mut ranges = Vec::new();
    collect_folds(root, line_index, &mut ranges);
    ranges
}

fn collect_folds(node: Node, line_index: &LineIndex, ranges: &mut Vec<FoldingRange>) {
    if matches!(node.kind(), "block" | "keyframe_block_list") {
        let start_line = line_index.line_of(node.start_byte()) as u32;
        let end_line = line_index.line_of(node.end_byte().saturating_sub(1)) as u32;
        if end_line > start_line + 1 {
            ranges.push(FoldingRange {
                start_line,
                start_character: None,
                end_line: end_line - 1,
                end_character: None,
                kind: None,
                collapsed_text: None,
            });
        }
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_folds(child, line_index, ranges);
    }
}
