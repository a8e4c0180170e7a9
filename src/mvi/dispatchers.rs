use tokio::runtime::Handle;

use super::store::StoreError;

/// Where a store runs its sequential handler and background work.
///
/// Everything a store does goes through the I/O handle, so `publish` never
/// runs handler code on the caller's thread.
#[derive(Clone, Debug)]
pub struct Dispatchers {
    io: Handle,
}

impl Dispatchers {
    pub fn new(io: Handle) -> Self {
        Self { io }
    }

    /// Use the runtime the caller is currently running on.
    pub fn from_current() -> Result<Self, StoreError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| StoreError::NoRuntime)
    }

    pub fn io(&self) -> &Handle {
        &self.io
    }
}
