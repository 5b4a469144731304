//! Syntax-tree confirmation of style regions.
//!
//! The host document is parsed once with tree-sitter, which yields a
//! best-effort tree even for source that is mid-edit. Each candidate offset
//! is resolved to the leaf token covering it, and the token's ancestors are
//! tested against the two shapes styled-jsx recognises:
//!
//! ```text
//! css`a { color: red; }`                       tagged template
//! <style jsx>{`a { color: red; }`}</style>     marked style element
//! <style jsx global>{`...`}</style>
//! ```
//!
//! `<style global jsx>` is rejected even though the scanner proposes it.
//! Only `jsx` alone or `jsx` followed by `global` is accepted.

use tree_sitter::{Node, Parser, Tree};

use crate::document::{HostLanguage, StyleRegion};
use crate::error::{Error, Result};

/// A parsed host document that can confirm candidate offsets.
pub struct RegionLocator<'a> {
    text: &'a str,
    tree: Tree,
}

impl<'a> RegionLocator<'a> {
    /// Parse `text` with the grammar for `language`.
    pub fn new(text: &'a str, language: HostLanguage) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&language.grammar())?;
        let tree = parser.parse(text, None).ok_or(Error::ParseCancelled)?;
        Ok(Self { text, tree })
    }

    /// Confirm every candidate, dropping the ones not inside a style region.
    ///
    /// Output follows candidate order. Two candidates inside the same region
    /// yield the same span twice.
    pub fn locate(&self, candidates: impl IntoIterator<Item = usize>) -> Vec<StyleRegion> {
        candidates
            .into_iter()
            .filter_map(|offset| self.region_at(offset))
            .collect()
    }

    /// The style region enclosing `offset`, if any.
    pub fn region_at(&self, offset: usize) -> Option<StyleRegion> {
        let mut node = Some(token_at_offset(self.tree.root_node(), offset));
        while let Some(current) = node {
            if let Some(region) = self
                .tagged_template_region(current)
                .or_else(|| self.style_element_region(current))
            {
                return Some(region);
            }
            node = current.parent();
        }
        None
    }

    fn node_text(&self, node: Node) -> &'a str {
        &self.text[node.byte_range()]
    }

    /// `` css`...` ``: a call whose callee is exactly `css` and whose
    /// argument is a template literal.
    fn tagged_template_region(&self, node: Node) -> Option<StyleRegion> {
        if node.kind() != "call_expression" {
            return None;
        }
        let callee = node.child_by_field_name("function")?;
        if self.node_text(callee) != "css" {
            return None;
        }
        let template = node.child_by_field_name("arguments")?;
        template_contents(template)
    }

    /// `<style jsx>{`...`}</style>` and `<style jsx global>{`...`}</style>`.
    fn style_element_region(&self, node: Node) -> Option<StyleRegion> {
        if node.kind() != "jsx_element" {
            return None;
        }
        let open = node.child_by_field_name("open_tag")?;
        let close = node.child_by_field_name("close_tag")?;
        if !self.is_style_tag(open) || !self.is_style_tag(close) {
            return None;
        }
        if !self.has_styled_jsx_attributes(open) {
            return None;
        }
        let template = self.body_template(open)?;
        template_contents(template)
    }

    fn is_style_tag(&self, tag: Node) -> bool {
        tag.child_by_field_name("name")
            .is_some_and(|name| self.node_text(name) == "style")
    }

    fn has_styled_jsx_attributes(&self, open: Node) -> bool {
        let mut cursor = open.walk();
        let names: Vec<&str> = open
            .children_by_field_name("attribute", &mut cursor)
            .map(|attribute| self.attribute_name(attribute))
            .collect();
        matches!(names.as_slice(), ["jsx"] | ["jsx", "global"])
    }

    fn attribute_name(&self, attribute: Node) -> &'a str {
        let name = attribute.named_child(0).unwrap_or(attribute);
        self.node_text(name)
    }

    /// The template literal that opens the element body.
    ///
    /// The first non-blank node after the opening tag must be an expression
    /// container whose `{` is immediately followed by a template literal.
    /// Bodies like `{styles}` or `{`a` + b}` are not style sheets.
    fn body_template<'t>(&self, open: Node<'t>) -> Option<Node<'t>> {
        let mut next = open.next_sibling();
        while let Some(node) = next {
            if node.kind() == "jsx_text" && self.node_text(node).trim().is_empty() {
                next = node.next_sibling();
                continue;
            }
            break;
        }

        let container = next?;
        if container.kind() != "jsx_expression" {
            return None;
        }
        let brace = container.child(0)?;
        let template = brace.next_sibling()?;
        let closing = template.next_sibling()?;
        (brace.kind() == "{" && template.kind() == "template_string" && closing.kind() == "}")
            .then_some(template)
    }
}

/// The bytes between a template literal's backticks.
fn template_contents(template: Node) -> Option<StyleRegion> {
    if template.kind() != "template_string" {
        return None;
    }
    let start = template.start_byte() + 1;
    let end = template.end_byte().checked_sub(1)?;
    (start <= end).then(|| StyleRegion::new(start, end))
}

/// The smallest node whose byte range contains `offset`.
///
/// Descends from `root`, at each level picking the child that spans the
/// offset, until no child does.
pub(crate) fn token_at_offset(root: Node, offset: usize) -> Node {
    let mut node = root;
    let mut cursor = root.walk();
    loop {
        let child = node
            .children(&mut cursor)
            .find(|child| child.start_byte() <= offset && offset < child.end_byte());
        match child {
            Some(child) => node = child,
            None => return node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::scanner::candidate_offsets;

    fn locate(text: &str) -> Vec<StyleRegion> {
        locate_with(text, HostLanguage::JavaScript)
    }

    fn locate_with(text: &str, language: HostLanguage) -> Vec<StyleRegion> {
        let locator = RegionLocator::new(text, language).unwrap();
        locator.locate(candidate_offsets(text))
    }

    fn payloads(text: &str) -> Vec<&str> {
        locate(text)
            .into_iter()
            .map(|region| &text[region.as_range()])
            .collect()
    }

    fn component(body: &str) -> String {
        format!("export default () => <div>{body}</div>;\n")
    }

    #[test]
    fn accepts_jsx_style_element() {
        let text = component("<style jsx>{`a{color:red}`}</style>");
        assert_eq!(payloads(&text), vec!["a{color:red}"]);
    }

    #[test]
    fn accepts_jsx_global() {
        let text = component("<style jsx global>{`a{color:red}`}</style>");
        assert_eq!(payloads(&text), vec!["a{color:red}"]);
    }

    #[test]
    fn accepts_markers_with_values() {
        let text = component("<style jsx={true}>{`a{color:red}`}</style>");
        assert_eq!(payloads(&text), vec!["a{color:red}"]);
        let text = component("<style jsx={true} global>{`b{color:red}`}</style>");
        assert_eq!(payloads(&text), vec!["b{color:red}"]);
    }

    #[test]
    fn rejects_global_before_jsx() {
        let text = component("<style global jsx>{`a{color:red}`}</style>");
        assert!(locate(&text).is_empty());
    }

    #[test]
    fn rejects_unknown_attributes() {
        let text = component("<style jsx scoped>{`a{color:red}`}</style>");
        assert!(locate(&text).is_empty());
    }

    #[test]
    fn accepts_tagged_template() {
        let text = "const button = css`a{color:red}`;\n";
        let regions = locate(text);
        assert_eq!(regions, vec![StyleRegion::new(19, 31)]);
        assert_eq!(&text[19..31], "a{color:red}");
    }

    #[test]
    fn rejects_non_template_body() {
        let text = component("<style jsx>{styles}</style>");
        assert!(locate(&text).is_empty());
    }

    #[test]
    fn rejects_template_inside_larger_expression() {
        let text = component("<style jsx>{`a{}` + extra}</style>");
        assert!(locate(&text).is_empty());
    }

    #[test]
    fn rejects_other_tags() {
        let text = "const t = xcss`a{}`;\n";
        let locator = RegionLocator::new(text, HostLanguage::JavaScript).unwrap();
        assert_eq!(locator.region_at(15), None);
    }

    #[test]
    fn tolerates_whitespace_before_body() {
        let text = component("<style jsx>\n  {`\n  p { margin: 0; }\n`}\n</style>");
        assert_eq!(payloads(&text), vec!["\n  p { margin: 0; }\n"]);
    }

    #[test]
    fn drops_candidates_in_comments() {
        let text = "// css`a{}`\nconst x = 1;\n";
        assert_eq!(candidate_offsets(text).count(), 1);
        assert!(locate(text).is_empty());
    }

    #[test]
    fn keeps_source_order() {
        let text = component(
            "<style jsx>{`.a{}`}</style><style jsx global>{`.b{}`}</style>",
        ) + "const c = css`.c{}`;\n";
        assert_eq!(payloads(&text), vec![".a{}", ".b{}", ".c{}"]);
    }

    #[test]
    fn includes_interpolations_in_span() {
        let text = component("<style jsx>{`a{width:${x}px}`}</style>");
        assert_eq!(payloads(&text), vec!["a{width:${x}px}"]);
    }

    #[test]
    fn parses_typescript() {
        let text = "const Button = (p: Props) => <button><style jsx>{`b{}`}</style></button>;\n";
        let regions = locate_with(text, HostLanguage::Tsx);
        assert_eq!(regions.len(), 1);
        assert_eq!(&text[regions[0].as_range()], "b{}");
    }

    #[test]
    fn survives_broken_source_elsewhere() {
        let text = "function broken( {\nconst s = css`a{}`;\n";
        let locator = RegionLocator::new(text, HostLanguage::JavaScript).unwrap();
        let regions = locator.locate(candidate_offsets(text));
        assert!(regions.iter().all(|r| r.end <= text.len()));
    }

    #[test]
    fn locating_twice_is_stable() {
        let text = component("<style jsx>{`a{}`}</style>");
        assert_eq!(locate(&text), locate(&text));
    }

    #[test]
    fn cursor_inside_template_resolves() {
        let text = "const s = css`a{color:red}`;";
        let locator = RegionLocator::new(text, HostLanguage::JavaScript).unwrap();
        assert_eq!(locator.region_at(18), Some(StyleRegion::new(14, 26)));
        assert_eq!(locator.region_at(3), None);
    }

    #[test]
    fn token_at_offset_finds_leaf() {
        let text = "let a = b;";
        let mut parser = Parser::new();
        parser.set_language(&HostLanguage::JavaScript.grammar()).unwrap();
        let tree = parser.parse(text, None).unwrap();
        let token = token_at_offset(tree.root_node(), 8);
        assert_eq!(token.kind(), "identifier");
        assert_eq!(&text[token.byte_range()], "b");
    }
}
