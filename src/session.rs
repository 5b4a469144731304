//! Server state shared by every request.
//!
//! `Session` owns the open documents, the settings, the style-sheet cache
//! and the validation scheduler. It is created with the server and torn down
//! on shutdown; the LSP backend only adds the client connection on top.

use std::future::Future;
use std::sync::{Arc, OnceLock};

use tower_lsp::lsp_types::{Position, Url};
use tracing::{debug, error};

use crate::cache::StyleSheetCache;
use crate::document::{DocumentStore, SourceDocument};
use crate::extract::{extract_at_offset, extract_document, Extraction};
use crate::scheduler::ValidationScheduler;
use crate::settings::Settings;
use crate::stylesheet::StyleSheet;

pub(crate) type SharedCache = Arc<StyleSheetCache<StyleSheet>>;

#[derive(Debug, Default)]
pub struct Session {
    documents: Arc<DocumentStore>,
    settings: OnceLock<Settings>,
    cache: OnceLock<SharedCache>,
    scheduler: ValidationScheduler,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply workspace settings and start the cache sweeper.
    ///
    /// Settings are fixed once read: a second call keeps the first settings.
    pub fn configure(&self, settings: Settings) {
        let interval = settings.cleanup_interval();
        if self.settings.set(settings).is_err() {
            debug!("settings already applied");
        }
        self.cache().start_sweeper(interval);
    }

    pub fn settings(&self) -> &Settings {
        self.settings.get_or_init(Settings::default)
    }

    pub fn cache(&self) -> &SharedCache {
        self.cache.get_or_init(|| {
            Arc::new(StyleSheetCache::new(
                self.settings().cache_limits(),
                StyleSheet::parse,
            ))
        })
    }

    pub fn documents(&self) -> &Arc<DocumentStore> {
        &self.documents
    }

    pub fn scheduler(&self) -> &ValidationScheduler {
        &self.scheduler
    }

    /// Run `task` for `uri` once the validation delay has passed.
    pub fn schedule_validation<F>(&self, uri: Url, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.scheduler
            .schedule(uri, self.settings().validation_delay(), task);
    }

    /// Forget everything held for a closed document.
    pub fn close(&self, uri: &Url) {
        self.scheduler.cancel(uri);
        self.documents.close(uri);
        self.cache().remove(uri);
    }

    /// Release pending work and cached style sheets.
    pub fn shutdown(&self) {
        self.scheduler.cancel_all();
        self.cache().dispose();
    }

    /// Every style region of an open document.
    pub fn whole_document(
        &self,
        uri: &Url,
    ) -> Option<(Arc<SourceDocument>, Extraction<StyleSheet>)> {
        let document = self.documents.get(uri)?;
        match extract_document(&document, self.cache()) {
            Ok(extraction) => extraction.map(|e| (document, e)),
            Err(e) => {
                error!(%uri, "style extraction failed: {}", e);
                None
            }
        }
    }

    /// The style region strictly enclosing `position`.
    pub fn region_at(
        &self,
        uri: &Url,
        position: Position,
    ) -> Option<(Arc<SourceDocument>, Extraction<StyleSheet>)> {
        let document = self.documents.get(uri)?;
        let offset = document.line_index.position_to_offset(position)?;
        match extract_at_offset(&document, offset, self.cache()) {
            Ok(extraction) => extraction.map(|e| (document, e)),
            Err(e) => {
                error!(%uri, offset, "style extraction failed: {}", e);
                None
            }
        }
    }
}
