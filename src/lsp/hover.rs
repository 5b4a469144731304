//! Hover information for embedded style sheets.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};
use tree_sitter::Node;

use crate::document::LineIndex;
use crate::extract::{token_at_offset, Extraction};
use crate::properties::{get_property, PropertyDef};
use crate::stylesheet::{normalize_whitespace, StyleSheet};

/// Format property documentation as markdown.
fn format_property_docs(property: &PropertyDef) -> String {
    let mut doc = format!(
        "**{}**: `{}`\n\n{}",
        property.name, property.syntax, property.description
    );
    if let Some(example) = property.example {
        doc.push_str(&format!("\n\n*Example:* `{}`", example));
    }
    doc
}

fn css_block(code: &str) -> String {
    format!("```css\n{}\n```", code)
}

fn markdown_hover(value: String, node: Node, line_index: &LineIndex) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: Some(line_index.span_to_range(&node.byte_range())),
    }
}

/// Hover for the CSS construct under `position`.
///
/// Property names show their documentation when known, declarations show
/// themselves, selectors show the rule they introduce.
pub fn hover_at_position(
    extraction: &Extraction<StyleSheet>,
    line_index: &LineIndex,
    position: Position,
) -> Option<Hover> {
    let offset = line_index.position_to_offset(position)?;
    let root = extraction.stylesheet.root()?;
    let text = extraction.document.text.as_str();

    let mut node = Some(token_at_offset(root, offset));
    while let Some(current) = node {
        match current.kind() {
            "property_name" => {
                let name = &text[current.byte_range()];
                if let Some(property) = get_property(name) {
                    return Some(markdown_hover(
                        format_property_docs(property),
                        current,
                        line_index,
                    ));
                }
            }
            "declaration" => {
                let code = normalize_whitespace(&text[current.byte_range()]);
                return Some(markdown_hover(css_block(&code), current, line_index));
            }
            "selectors" => {
                let code = format!("{} {{ … }}", normalize_whitespace(&text[current.byte_range()]));
                return Some(markdown_hover(css_block(&code), current, line_index));
            }
            "keyframes_name" => {
                let code = format!("@keyframes {}", &text[current.byte_range()]);
                return Some(markdown_hover(css_block(&code), current, line_index));
            }
            "block" | "keyframe_block_list" | "stylesheet" => return None,
            _ => {}
        }
        node = current.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheLimits, StyleSheetCache};
    use crate::document::SourceDocument;
    use crate::extract::extract_at_offset;
    use tower_lsp::lsp_types::Url;

    fn hover_text(text: &str, needle: &str) -> Option<String> {
        let cache = StyleSheetCache::new(CacheLimits::default(), StyleSheet::parse);
        let uri = Url::parse("file:///component.jsx").unwrap();
        let source = SourceDocument::new(uri, 1, "javascriptreact", text);
        let offset = text.find(needle).unwrap() + 1;
        let position = source.line_index.offset_to_position(offset);
        let extraction = extract_at_offset(&source, offset, &cache).unwrap()?;
        let hover = hover_at_position(&extraction, &source.line_index, position)?;
        match hover.contents {
            HoverContents::Markup(markup) => Some(markup.value),
            _ => None,
        }
    }

    #[test]
    fn documents_known_properties() {
        let text = "const s = css`a { color: red; }`;";
        let value = hover_text(text, "color").unwrap();
        assert!(value.starts_with("**color**"));
        assert!(value.contains("foreground"));
    }

    #[test]
    fn shows_unknown_declarations() {
        let text = "const s = css`a { -webkit-foo:  1px; }`;";
        let value = hover_text(text, "-webkit-foo").unwrap();
        assert_eq!(value, "```css\n-webkit-foo: 1px;\n```");
    }

    #[test]
    fn shows_selectors() {
        let text = "const s = css`.card,\n  .panel { margin: 0; }`;";
        let value = hover_text(text, ".card").unwrap();
        assert_eq!(value, "```css\n.card, .panel { … }\n```");
    }

    #[test]
    fn nothing_in_whitespace() {
        let text = "const s = css`a {   color: red; }`;";
        assert!(hover_text(text, "{ ").is_none());
    }

    #[test]
    fn nothing_outside_style_sheets() {
        let text = "const s = css`a { color: red; }`;";
        assert!(hover_text(text, "const").is_none());
    }
}
