//! Parsed form of a synthetic style-sheet document.
//!
//! The style sheet is parsed with tree-sitter-css. The parse is what the
//! cache stores; language features walk it together with the synthetic text.

use tree_sitter::{Node, Parser, Tree};
use tracing::warn;

use crate::document::SyntheticDocument;

/// A CSS syntax tree over a synthetic document's text.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    tree: Option<Tree>,
}

impl StyleSheet {
    /// Parse a synthetic document. This is the cache's parse function.
    pub fn parse(document: &SyntheticDocument) -> Self {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&tree_sitter_css::LANGUAGE.into()) {
            warn!("failed to load CSS grammar: {}", e);
            return Self { tree: None };
        }
        Self {
            tree: parser.parse(&document.text, None),
        }
    }

    pub fn root(&self) -> Option<Node<'_>> {
        self.tree.as_ref().map(Tree::root_node)
    }
}

/// Collapse runs of whitespace to single spaces.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
