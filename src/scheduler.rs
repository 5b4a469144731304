//! Debounced revalidation.
//!
//! Every edit schedules a validation task after a fixed delay. Scheduling
//! again for the same document aborts the pending task, so at most one
//! validation per document is ever waiting.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tower_lsp::lsp_types::Url;

/// A scheduled task and the id of the `schedule` call that spawned it.
type Pending = (u64, JoinHandle<()>);

#[derive(Debug, Default)]
pub struct ValidationScheduler {
    pending: Arc<DashMap<Url, Pending>>,
    next_id: AtomicU64,
}

impl ValidationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`, replacing any pending task for `uri`.
    ///
    /// A task removes its own entry once it has run.
    pub fn schedule<F>(&self, uri: Url, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);
        let key = uri.clone();

        // The entry stays locked until the handle is stored, so a task that
        // finishes straight away cannot miss its own entry.
        let entry = self.pending.entry(uri);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
            pending.remove_if(&key, |_, (entry_id, _)| *entry_id == id);
        });
        match entry {
            Entry::Occupied(mut occupied) => {
                let (_, previous) = occupied.insert((id, handle));
                previous.abort();
            }
            Entry::Vacant(vacant) => {
                vacant.insert((id, handle));
            }
        }
    }

    /// Abort the pending task for `uri`, if any.
    pub fn cancel(&self, uri: &Url) {
        if let Some((_, (_, handle))) = self.pending.remove(uri) {
            handle.abort();
        }
    }

    pub fn cancel_all(&self) {
        self.pending.retain(|_, (_, handle)| {
            handle.abort();
            false
        });
    }

    /// Number of documents with a task waiting to run.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn uri(name: &str) -> Url {
        Url::parse(&format!("file:///{name}.jsx")).unwrap()
    }

    fn counting_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_after_delay() {
        let scheduler = ValidationScheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));
        scheduler.schedule(uri("a"), Duration::from_millis(200), counting_task(&runs));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending(), 1);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_tasks_leave_no_entry() {
        let scheduler = ValidationScheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));

        scheduler.schedule(uri("a"), Duration::ZERO, counting_task(&runs));
        scheduler.schedule(uri("b"), Duration::from_millis(50), counting_task(&runs));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn replaced_task_keeps_newer_entry() {
        let scheduler = ValidationScheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));

        scheduler.schedule(uri("a"), Duration::from_millis(50), counting_task(&runs));
        scheduler.schedule(uri("a"), Duration::from_millis(200), counting_task(&runs));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_pending_task() {
        let scheduler = ValidationScheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let delay = Duration::from_millis(200);

        scheduler.schedule(uri("a"), delay, counting_task(&runs));
        tokio::time::sleep(Duration::from_millis(100)).await;
        scheduler.schedule(uri("a"), delay, counting_task(&runs));
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn documents_are_independent() {
        let scheduler = ValidationScheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let delay = Duration::from_millis(50);

        scheduler.schedule(uri("a"), delay, counting_task(&runs));
        scheduler.schedule(uri("b"), delay, counting_task(&runs));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_run() {
        let scheduler = ValidationScheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let delay = Duration::from_millis(50);

        scheduler.schedule(uri("a"), delay, counting_task(&runs));
        scheduler.schedule(uri("b"), delay, counting_task(&runs));
        scheduler.cancel(&uri("a"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        scheduler.schedule(uri("c"), delay, counting_task(&runs));
        scheduler.cancel_all();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }
}
