//! Per-document debouncing of highlighting passes.
//!
//! Every trigger for a document cancels whatever is still waiting out its delay and schedules a
//! fresh job, so a burst of edits costs exactly one pass. Cancellation only reaches a job before
//! it starts; a pass that is already running finishes and publishes.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tower_lsp::lsp_types::Url;

struct Scheduled {
    cancel: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Scheduled {
    /// Stops the job if it is still sleeping. Dropping the sender has the same effect.
    fn cancel(self) {
        let _ = self.cancel.send(());
    }
}

#[derive(Default)]
pub struct Debouncer {
    pending: Mutex<HashMap<Url, Scheduled>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn schedule<F>(&self, uri: Url, delay: Duration, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (cancel, cancelled) = oneshot::channel();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => job.await,
                _ = cancelled => {}
            }
        });
        if let Some(previous) = self
            .pending
            .lock()
            .await
            .insert(uri, Scheduled { cancel, handle })
        {
            previous.cancel();
        }
    }

    pub async fn cancel(&self, uri: &Url) {
        if let Some(scheduled) = self.pending.lock().await.remove(uri) {
            scheduled.cancel();
        }
    }

    pub async fn cancel_all(&self) {
        for (_, scheduled) in self.pending.lock().await.drain() {
            scheduled.cancel();
        }
    }

    /// Documents whose latest job has not finished yet.
    pub async fn pending(&self) -> usize {
        self.pending
            .lock()
            .await
            .values()
            .filter(|scheduled| !scheduled.handle.is_finished())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn uri(name: &str) -> Url {
        Url::parse(&format!("file:///{name}.cs")).unwrap()
    }

    fn counting_job(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_runs_once() {
        let debouncer = Debouncer::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let delay = Duration::from_millis(100);

        for _ in 0..5 {
            debouncer.schedule(uri("a"), delay, counting_job(&runs)).await;
            tokio::time::sleep(Duration::from_millis(30)).await;
        }
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(debouncer.pending().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn documents_debounce_independently() {
        let debouncer = Debouncer::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let delay = Duration::from_millis(100);

        debouncer.schedule(uri("a"), delay, counting_job(&runs)).await;
        debouncer.schedule(uri("b"), delay, counting_job(&runs)).await;
        assert_eq!(debouncer.pending().await, 2);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_does_not_cancel_a_started_job() {
        let debouncer = Debouncer::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let delay = Duration::from_millis(100);

        let slow = {
            let runs = runs.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                runs.fetch_add(1, Ordering::SeqCst);
            }
        };
        debouncer.schedule(uri("a"), delay, slow).await;

        // The first job is past its delay and inside its own await
        tokio::time::sleep(Duration::from_millis(120)).await;
        debouncer.schedule(uri("a"), delay, counting_job(&runs)).await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_job() {
        let debouncer = Debouncer::new();
        let runs = Arc::new(AtomicUsize::new(0));

        debouncer
            .schedule(uri("a"), Duration::from_millis(100), counting_job(&runs))
            .await;
        debouncer.cancel(&uri("a")).await;
        debouncer.cancel_all().await;

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(debouncer.pending().await, 0);
    }
}
