use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Lifetime of one screen instance.
///
/// Cancelling a session stops the store bound to it and every background
/// task launched through it. Cheap to clone; all clones observe the same flag.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Default)]
struct SessionInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// End the session. Idempotent.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            tracing::debug!("Session cancelled");
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`Session::cancel`] has been called.
    pub async fn cancelled(&self) {
        // Register with Notify before checking the flag, otherwise a cancel()
        // between the check and the await would be lost.
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }

    /// Spawn `future` on `handle`, dropping it at its next await point after
    /// the session is cancelled.
    pub fn spawn<F>(&self, handle: &Handle, future: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let session = self.clone();
        handle.spawn(async move {
            tokio::select! {
                biased;
                _ = session.cancelled() => {}
                _ = future => {}
            }
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancelled_resolves_after_cancel() {
        let session = Session::new();
        let waiter = session.clone();
        let task = tokio::spawn(async move { waiter.cancelled().await });
        session.cancel();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("cancelled() should resolve")
            .expect("task");
        assert!(session.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_returns_immediately_when_already_cancelled() {
        let session = Session::new();
        session.cancel();
        tokio::time::timeout(Duration::from_millis(100), session.cancelled())
            .await
            .expect("already cancelled");
    }

    #[tokio::test]
    async fn spawned_work_stops_on_cancel() {
        let session = Session::new();
        let task = session.spawn(&Handle::current(), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        session.cancel();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("spawned work should stop")
            .expect("task");
    }
}
