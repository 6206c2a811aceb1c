use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

use crate::{
    host::{FrameHost, HostContext},
    models::Result,
};

/// Host stand-in for terminal runs: the context comes from command-line flags.
#[derive(Debug, Default)]
pub struct StaticHost {
    context: Option<HostContext>,
    ready: AtomicBool,
    closed: AtomicBool,
}

impl StaticHost {
    pub fn new(fid: Option<u64>, username: Option<String>) -> Self {
        Self {
            context: fid.map(|fid| HostContext { fid, username }),
            ready: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    pub fn guest() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FrameHost for StaticHost {
    async fn context(&self) -> Result<Option<HostContext>> {
        Ok(self.context.clone())
    }

    fn ready(&self) {
        if !self.ready.swap(true, Ordering::SeqCst) {
            info!("Host signalled ready");
        }
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!("Host signalled close");
        }
    }
}
