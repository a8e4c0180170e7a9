//! Screen navigation as seen from view-models.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    CreateCounter,
    Examples,
    /// Pop the current screen.
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Navigator is not bound to a host")]
    Unbound,
}

#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, destination: Destination) -> Result<(), NavigationError>;
}

/// Navigator that forwards destinations to whoever holds the receiver.
///
/// Dropping the receiver unbinds it: later navigations fail with
/// [`NavigationError::Unbound`].
#[derive(Clone)]
pub struct ChannelNavigator {
    sender: mpsc::UnboundedSender<Destination>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Destination>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Navigator for ChannelNavigator {
    async fn navigate(&self, destination: Destination) -> Result<(), NavigationError> {
        tracing::debug!(?destination, "Navigating");
        self.sender
            .send(destination)
            .map_err(|_| NavigationError::Unbound)
    }
}
