use async_trait::async_trait;

use crate::models::Result;

/// Identity handed over by the host when the user is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    pub fid: u64,
    pub username: Option<String>,
}

/// The embedding frame host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FrameHost: Send + Sync {
    /// Authenticated context, if any. `Ok(None)` means guest mode.
    async fn context(&self) -> Result<Option<HostContext>>;

    /// Signal that the first render is done.
    fn ready(&self);

    /// Signal that the user asked to leave.
    fn close(&self);
}
