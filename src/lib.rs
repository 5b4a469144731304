//! styled-jsx Language Server implementation.
//!
//! Finds `<style jsx>` elements and `` css`...` `` templates in JavaScript
//! and TypeScript components and serves CSS language features for them.

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};
use tracing::{debug, error, info};

use crate::session::SharedCache;

mod cache;
mod document;
mod error;
mod extract;
mod lsp;
pub(crate) mod properties;
mod scheduler;
mod session;
pub(crate) mod settings;
mod stylesheet;

pub use cache::{CacheLimits, StyleSheetCache};
pub use document::{
    DocumentStore, HostLanguage, LineIndex, Scope, SourceDocument, StyleRegion, SyntheticDocument,
};
pub use error::Error;
pub use extract::{
    candidate_offsets, extract_at_offset, extract_document, mask, Extraction, MaskedText,
    RegionLocator,
};
pub use lsp::{
    completion_at_position, document_symbols, folding_ranges, hover_at_position, to_diagnostics,
};
pub use scheduler::ValidationScheduler;
pub use session::Session;
pub use settings::{discover_settings, load_settings, parse_settings, Settings};
pub use stylesheet::StyleSheet;

pub struct Backend {
    client: Client,
    session: Session,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            session: Session::new(),
        }
    }

    /// Schedule validation of a new revision.
    fn on_document_change(&self, document: Arc<SourceDocument>) {
        if !self.session.settings().validation_enabled() {
            return;
        }

        let task = validate(
            self.client.clone(),
            Arc::clone(self.session.documents()),
            Arc::clone(self.session.cache()),
            document.uri.clone(),
        );
        self.session.schedule_validation(document.uri.clone(), task);
    }
}

/// Extract the latest revision of `uri` and publish its diagnostics.
///
/// A document without style regions gets an empty list, which clears
/// anything published for an earlier revision.
async fn validate(
    client: Client,
    documents: Arc<DocumentStore>,
    cache: SharedCache,
    uri: Url,
) {
    let Some(document) = documents.get(&uri) else {
        return;
    };
    let diagnostics = match extract_document(&document, &cache) {
        Ok(Some(extraction)) => lsp::to_diagnostics(&extraction, &document.line_index),
        Ok(None) => Vec::new(),
        Err(e) => {
            error!(%uri, "style extraction failed: {}", e);
            return;
        }
    };
    debug!(%uri, version = document.version, count = diagnostics.len(), "publishing diagnostics");
    client
        .publish_diagnostics(uri, diagnostics, Some(document.version))
        .await;
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        let settings = match workspace_root {
            Some(root) => {
                let (settings, settings_dir) = settings::discover_settings(&root);
                debug!("settings directory: {}", settings_dir.display());
                settings
            }
            None => Settings::default(),
        };
        self.session.configure(settings);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![";".to_string(), "{".to_string()]),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                document_symbol_provider: Some(OneOf::Left(true)),
                folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("styled-jsx language server initialized");
        self.client
            .log_message(MessageType::INFO, "styled-jsx language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.session.shutdown();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let document = self.session.documents().open(SourceDocument::new(
            doc.uri,
            doc.version,
            doc.language_id,
            &doc.text,
        ));
        self.on_document_change(document);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // We use FULL sync, so there's exactly one change with the full text
        let Some(change) = params.content_changes.into_iter().next() else {
            return;
        };
        let uri = params.text_document.uri;
        match self
            .session
            .documents()
            .change(&uri, params.text_document.version, &change.text)
        {
            Some(document) => self.on_document_change(document),
            None => debug!(%uri, "change for unopened document"),
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.session.close(&uri);
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some((document, extraction)) = self.session.region_at(uri, position) else {
            return Ok(None);
        };
        Ok(lsp::hover_at_position(
            &extraction,
            &document.line_index,
            position,
        ))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some((document, extraction)) = self.session.region_at(uri, position) else {
            return Ok(None);
        };
        Ok(lsp::completion_at_position(
            &extraction,
            &document.line_index,
            position,
        ))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let Some((document, extraction)) = self.session.whole_document(&params.text_document.uri) else {
            return Ok(None);
        };
        let symbols = lsp::document_symbols(&extraction, &document.line_index);
        Ok(Some(DocumentSymbolResponse::Nested(symbols)))
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        let Some((document, extraction)) = self.session.whole_document(&params.text_document.uri) else {
            return Ok(None);
        };
        Ok(Some(lsp::folding_ranges(&extraction, &document.line_index)))
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::new(Backend::new)
}
