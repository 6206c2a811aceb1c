pub mod client;
pub mod static_host;

pub use client::{FrameHost, HostContext};
pub use static_host::StaticHost;

#[cfg(test)]
pub use client::MockFrameHost;
