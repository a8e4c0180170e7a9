use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::Notify;

/// Coordinates graceful shutdown of the REST server.
///
/// Shutdown starts on Ctrl-C, SIGTERM (Unix) or an explicit
/// [`ShutdownManager::signal_shutdown`].
pub struct ShutdownManager {
    shutdown: AtomicBool,
    notify: Notify,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            shutdown: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }

    pub async fn wait_for_shutdown(&self) -> std::io::Result<()> {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            tokio::select! {
                _ = signal::ctrl_c() => {},
                _ = sigterm.recv() => {},
                _ = notified => {},
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = signal::ctrl_c() => {},
                _ = notified => {},
            }
        }

        self.shutdown.store(true, Ordering::SeqCst);
        tracing::info!("Shutting down gracefully...");
        Ok(())
    }

    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn starts_running() {
        let manager = ShutdownManager::new();
        assert!(!manager.is_shutting_down());
    }

    #[tokio::test]
    async fn signal_releases_waiter() {
        let manager = Arc::new(ShutdownManager::new());
        let waiter = manager.clone();
        let task = tokio::spawn(async move { waiter.wait_for_shutdown().await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        manager.signal_shutdown();
        let result = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("waiter released")
            .expect("task");
        assert!(result.is_ok());
        assert!(manager.is_shutting_down());
    }

    #[tokio::test]
    async fn already_signalled_returns_immediately() {
        let manager = ShutdownManager::new();
        manager.signal_shutdown();
        tokio::time::timeout(Duration::from_millis(100), manager.wait_for_shutdown())
            .await
            .expect("no wait")
            .expect("no signal error");
    }
}
