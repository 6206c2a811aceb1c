use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::config::SimulationSettings;

/// Simulated "connect" actions. None of them can fail once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connection {
    Wallet,
    IdentityResolution,
    TwitterSync,
    FarcasterLink,
}

impl Connection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connection::Wallet => "wallet",
            Connection::IdentityResolution => "identity resolution",
            Connection::TwitterSync => "Twitter sync",
            Connection::FarcasterLink => "Farcaster link",
        }
    }

    pub fn delay(&self, settings: &SimulationSettings) -> Duration {
        let ms = match self {
            Connection::Wallet => settings.wallet_delay_ms,
            Connection::IdentityResolution => settings.identity_delay_ms,
            Connection::TwitterSync => settings.twitter_sync_delay_ms,
            Connection::FarcasterLink => settings.farcaster_delay_ms,
        };
        Duration::from_millis(ms)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a connection action was a no-op.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionSkipped {
    #[error("{0} is already in progress")]
    InFlight(Connection),

    #[error("signed in through the host")]
    HostIdentity,

    #[error("{0} is already connected")]
    AlreadyConnected(Connection),

    #[error("no profile connected")]
    NoProfile,

    #[error("badge already claimed")]
    AlreadyClaimed,
}

/// Progress labels shown while the Farcaster link runs.
pub fn farcaster_step_label(step: u32) -> Option<&'static str> {
    match step {
        1 => Some("Fetching Warpcast context..."),
        2 => Some("Verifying FID and Username..."),
        3 => Some("Linking Based Impression..."),
        _ => None,
    }
}
