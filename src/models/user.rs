use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the profile's display name was resolved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdentityKind {
    #[default]
    None,
    Ens,
    Fname,
}

impl IdentityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityKind::None => "NONE",
            IdentityKind::Ens => "ENS",
            IdentityKind::Fname => "FNAME",
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who the session belongs to: a host-authenticated FID or an anonymous guest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Identity {
    Farcaster { fid: u64 },
    Guest,
}

impl Identity {
    pub fn fid(&self) -> Option<u64> {
        match self {
            Identity::Farcaster { fid } => Some(*fid),
            Identity::Guest => None,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Farcaster { fid } => write!(f, "fid {}", fid),
            Identity::Guest => f.write_str("guest"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub rank: u32,
    pub username: String,
    pub display_name: Option<String>,
    pub identity: IdentityKind,
    pub base_app_age_days: u32,
    pub twitter_age_days: u32,
    pub contribution_count: u32,
    pub balance: Decimal,
    pub wallet_connected: bool,
    pub twitter_connected: bool,
    pub farcaster_connected: bool,
}

impl UserProfile {
    /// Profile synthesized for a session that arrived with a host identity.
    pub fn from_host(fid: u64, handle: Option<&str>, rank: u32) -> Self {
        Self {
            rank,
            username: handle
                .map(str::to_string)
                .unwrap_or_else(|| format!("fid_{}", fid)),
            display_name: handle.map(str::to_string),
            identity: IdentityKind::Fname,
            base_app_age_days: 300,
            twitter_age_days: 800,
            contribution_count: 120,
            balance: Decimal::new(20, 1),
            wallet_connected: true,
            twitter_connected: true,
            farcaster_connected: true,
        }
    }

    /// Profile produced by the simulated wallet connection in guest mode.
    pub fn demo_wallet() -> Self {
        Self {
            rank: 42,
            username: "Vitalik_Enjoyer".to_string(),
            display_name: Some("Vitalik_Enjoyer".to_string()),
            identity: IdentityKind::None,
            base_app_age_days: 450,
            twitter_age_days: 1200,
            contribution_count: 85,
            balance: Decimal::new(250, 2),
            wallet_connected: true,
            twitter_connected: true,
            farcaster_connected: false,
        }
    }

    /// Name shown on badges and in generated content.
    pub fn effective_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    pub fn resolve_as_ens(&mut self) {
        self.display_name = Some(format!("{}.eth", self.username));
        self.identity = IdentityKind::Ens;
    }

    pub fn resolve_as_fname(&mut self) {
        self.display_name = Some(format!("@{}", self.username));
        self.identity = IdentityKind::Fname;
    }

    pub fn link_farcaster(&mut self) {
        self.farcaster_connected = true;
        self.identity = IdentityKind::Fname;
        self.display_name = Some(self.username.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_profile_without_handle_uses_fid() {
        let profile = UserProfile::from_host(1234, None, 7);
        assert_eq!(profile.username, "fid_1234");
        assert_eq!(profile.display_name, None);
        assert_eq!(profile.effective_name(), "fid_1234");
        assert_eq!(profile.identity, IdentityKind::Fname);
        assert!(profile.farcaster_connected);
    }

    #[test]
    fn test_identity_resolution_names() {
        let mut profile = UserProfile::demo_wallet();
        profile.resolve_as_ens();
        assert_eq!(profile.effective_name(), "Vitalik_Enjoyer.eth");
        assert_eq!(profile.identity, IdentityKind::Ens);

        profile.resolve_as_fname();
        assert_eq!(profile.effective_name(), "@Vitalik_Enjoyer");
        assert_eq!(profile.identity, IdentityKind::Fname);
    }

    #[test]
    fn test_demo_wallet_balance() {
        let profile = UserProfile::demo_wallet();
        assert_eq!(profile.balance.to_string(), "2.50");
        assert!(!profile.farcaster_connected);
    }
}
