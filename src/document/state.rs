//! Document state management for the styled-jsx LSP.

use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use super::region::StyleRegion;
use super::text::LineIndex;

/// Language id given to every synthetic style-sheet document.
pub const STYLE_SHEET_LANGUAGE_ID: &str = "css";

/// Grammar used to parse a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostLanguage {
    JavaScript,
    /// TypeScript with JSX. Plain TypeScript files parse fine with it too.
    Tsx,
}

impl HostLanguage {
    /// Pick a grammar from the client's language id, falling back to the file
    /// extension for ids we do not recognise.
    pub fn detect(language_id: &str, uri: &Url) -> Self {
        match language_id {
            "javascript" | "javascriptreact" => Self::JavaScript,
            "typescript" | "typescriptreact" => Self::Tsx,
            _ => Self::from_path(uri.path()),
        }
    }

    fn from_path(path: &str) -> Self {
        let extension = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        match extension {
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            _ => Self::Tsx,
        }
    }

    pub fn grammar(self) -> tree_sitter::Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// One observed revision of an open host document.
///
/// Edits never mutate a `SourceDocument`; they produce a new one with a new
/// version.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub uri: Url,
    /// Document version from the client.
    pub version: i32,
    pub language_id: String,
    pub text: Arc<str>,
    pub line_index: LineIndex,
}

impl SourceDocument {
    pub fn new(uri: Url, version: i32, language_id: impl Into<String>, text: &str) -> Self {
        let text: Arc<str> = Arc::from(text);
        Self {
            uri,
            version,
            language_id: language_id.into(),
            line_index: LineIndex::new(Arc::clone(&text)),
            text,
        }
    }

    /// The same document at a new version with new text.
    pub fn revise(&self, version: i32, text: &str) -> Self {
        Self::new(self.uri.clone(), version, self.language_id.clone(), text)
    }

    pub fn host_language(&self) -> HostLanguage {
        HostLanguage::detect(&self.language_id, &self.uri)
    }
}

/// Which part of a host document a synthetic document was masked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every style region in the document.
    Document,
    /// The single region under a cursor.
    Region(StyleRegion),
}

/// A style-sheet-only view of a host document.
///
/// `text` has exactly the byte length of the host text; every byte that is
/// not part of a style region is a space (or an untouched line terminator).
/// Offsets into it are therefore offsets into the host document as well.
#[derive(Debug, Clone)]
pub struct SyntheticDocument {
    pub uri: Url,
    pub version: i32,
    pub language_id: &'static str,
    pub scope: Scope,
    pub text: String,
    /// Regions that were kept, in source order.
    pub regions: Vec<StyleRegion>,
    /// Dynamic-expression ranges that were blanked inside the regions.
    pub masked_expressions: Vec<StyleRegion>,
}

/// Thread-safe storage for open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<SourceDocument>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Store a new revision of a document, replacing any previous one.
    pub fn open(&self, document: SourceDocument) -> Arc<SourceDocument> {
        let document = Arc::new(document);
        self.documents
            .insert(document.uri.clone(), Arc::clone(&document));
        document
    }

    /// Replace the text of an open document. Returns `None` if the document
    /// was never opened.
    pub fn change(&self, uri: &Url, version: i32, text: &str) -> Option<Arc<SourceDocument>> {
        let current = self.get(uri)?;
        Some(self.open(current.revise(version, text)))
    }

    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    pub fn get(&self, uri: &Url) -> Option<Arc<SourceDocument>> {
        self.documents.get(uri).map(|r| Arc::clone(&r))
    }
}
