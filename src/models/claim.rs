use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BadgeTier;

/// Receipt stored for every successful claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaimRecord {
    pub tier: BadgeTier,
    pub rank: u32,
    pub timestamp: DateTime<Utc>,
    pub id: Uuid,
}

impl ClaimRecord {
    /// The id is drawn from `rng` so seeded sessions produce stable receipts.
    pub fn issue<R: Rng + ?Sized>(rank: u32, timestamp: DateTime<Utc>, rng: &mut R) -> Self {
        Self {
            tier: BadgeTier::from_rank(rank),
            rank,
            timestamp,
            id: uuid::Builder::from_random_bytes(rng.gen()).into_uuid(),
        }
    }
}

/// Persisted claim status for one identity. History is most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimState {
    pub claimed: bool,
    pub history: Vec<ClaimRecord>,
}

impl ClaimState {
    pub fn record(&mut self, record: ClaimRecord) {
        self.history.insert(0, record);
        self.claimed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_issue_captures_tier_and_rank() {
        let mut rng = StdRng::seed_from_u64(7);
        let at = Utc.with_ymd_and_hms(2026, 1, 20, 12, 0, 0).unwrap();
        let record = ClaimRecord::issue(12, at, &mut rng);

        assert_eq!(record.tier, BadgeTier::Gold);
        assert_eq!(record.rank, 12);
        assert_eq!(record.timestamp, at);
        assert_eq!(record.id.get_version_num(), 4);
    }

    #[test]
    fn test_ids_are_fresh() {
        let mut rng = StdRng::seed_from_u64(7);
        let at = Utc::now();
        let a = ClaimRecord::issue(1, at, &mut rng);
        let b = ClaimRecord::issue(1, at, &mut rng);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_record_prepends() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = ClaimState::default();
        let first = ClaimRecord::issue(600, Utc::now(), &mut rng);
        let second = ClaimRecord::issue(3, Utc::now(), &mut rng);
        state.record(first.clone());
        state.record(second.clone());

        assert!(state.claimed);
        assert_eq!(state.history, vec![second, first]);
    }
}
