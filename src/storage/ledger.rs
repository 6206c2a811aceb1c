use std::sync::Arc;
use tracing::{info, warn};

use super::KeyValueStore;
use crate::{
    config::StorageSettings,
    models::{ClaimRecord, ClaimState, Identity, Result},
};

/// Per-identity claim flag and history on top of a key/value store.
///
/// Keys are `{claimed_prefix}{fid}` / `{history_prefix}{fid}`, or the fixed
/// guest keys when there is no FID.
#[derive(Clone)]
pub struct ClaimLedger {
    store: Arc<dyn KeyValueStore>,
    keys: StorageSettings,
}

impl ClaimLedger {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageSettings) -> Self {
        Self { store, keys }
    }

    pub fn claimed_key(&self, identity: Identity) -> String {
        match identity {
            Identity::Farcaster { fid } => format!("{}{}", self.keys.claimed_key_prefix, fid),
            Identity::Guest => self.keys.guest_claimed_key.clone(),
        }
    }

    pub fn history_key(&self, identity: Identity) -> String {
        match identity {
            Identity::Farcaster { fid } => format!("{}{}", self.keys.history_key_prefix, fid),
            Identity::Guest => self.keys.guest_history_key.clone(),
        }
    }

    /// Any stored flag value counts as claimed. A corrupt history is logged
    /// and treated as empty.
    pub async fn load(&self, identity: Identity) -> Result<ClaimState> {
        let claimed = self.store.get(&self.claimed_key(identity)).await?.is_some();
        let history = match self.store.get(&self.history_key(identity)).await? {
            Some(raw) => serde_json::from_str::<Vec<ClaimRecord>>(&raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable claim history for {}: {}", identity, e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        Ok(ClaimState { claimed, history })
    }

    pub async fn save(&self, identity: Identity, state: &ClaimState) -> Result<()> {
        if state.claimed {
            self.store.set(&self.claimed_key(identity), "true").await?;
        }
        let history = serde_json::to_string(&state.history)?;
        self.store.set(&self.history_key(identity), &history).await?;

        info!("Persisted {} claim record(s) for {}", state.history.len(), identity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Utc;
    use rand::{rngs::StdRng, SeedableRng};

    fn ledger() -> (Arc<MemoryStore>, ClaimLedger) {
        let store = Arc::new(MemoryStore::new());
        let ledger = ClaimLedger::new(store.clone(), StorageSettings::default());
        (store, ledger)
    }

    #[test]
    fn test_key_scheme() {
        let (_, ledger) = ledger();
        let fid = Identity::Farcaster { fid: 99 };
        assert_eq!(ledger.claimed_key(fid), "claimed_fid_99");
        assert_eq!(ledger.history_key(fid), "history_fid_99");
        assert_eq!(ledger.claimed_key(Identity::Guest), "guest_claimed");
        assert_eq!(ledger.history_key(Identity::Guest), "guest_history");
    }

    #[tokio::test]
    async fn test_unknown_identity_loads_empty() {
        let (_, ledger) = ledger();
        let state = ledger.load(Identity::Farcaster { fid: 1 }).await.unwrap();
        assert_eq!(state, ClaimState::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let (store, ledger) = ledger();
        let identity = Identity::Farcaster { fid: 7 };
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = ClaimState::default();
        state.record(ClaimRecord::issue(4, Utc::now(), &mut rng));

        ledger.save(identity, &state).await.unwrap();
        assert_eq!(store.get("claimed_fid_7").await.unwrap().as_deref(), Some("true"));
        assert_eq!(ledger.load(identity).await.unwrap(), state);

        // identities do not bleed into each other
        let guest = ledger.load(Identity::Guest).await.unwrap();
        assert!(!guest.claimed);
    }

    #[tokio::test]
    async fn test_corrupt_history_is_dropped() {
        let (store, ledger) = ledger();
        store.set("guest_claimed", "true").await.unwrap();
        store.set("guest_history", "{not json").await.unwrap();

        let state = ledger.load(Identity::Guest).await.unwrap();
        assert!(state.claimed);
        assert!(state.history.is_empty());
    }
}
