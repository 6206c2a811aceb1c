use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub base_app_points: f64,
    pub twitter_age_points: f64,
    pub contribution_points: f64,
    pub farcaster_bonus: f64,
    pub total_score: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum BadgeTier {
    Platinum, // 1-5
    Gold,     // 6-25
    Silver,   // 26-500
    Bronze,   // 501-1000
    None,
}

impl BadgeTier {
    pub fn from_rank(rank: u32) -> Self {
        match rank {
            1..=5 => BadgeTier::Platinum,
            6..=25 => BadgeTier::Gold,
            26..=500 => BadgeTier::Silver,
            501..=1000 => BadgeTier::Bronze,
            _ => BadgeTier::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeTier::Platinum => "PLATINUM",
            BadgeTier::Gold => "GOLD",
            BadgeTier::Silver => "SILVER",
            BadgeTier::Bronze => "BRONZE",
            BadgeTier::None => "NONE",
        }
    }

    pub fn has_badge(&self) -> bool {
        !matches!(self, BadgeTier::None)
    }
}

impl fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_bands() {
        assert_eq!(BadgeTier::from_rank(3), BadgeTier::Platinum);
        assert_eq!(BadgeTier::from_rank(25), BadgeTier::Gold);
        assert_eq!(BadgeTier::from_rank(500), BadgeTier::Silver);
        assert_eq!(BadgeTier::from_rank(1000), BadgeTier::Bronze);
        assert_eq!(BadgeTier::from_rank(1001), BadgeTier::None);
        assert_eq!(BadgeTier::from_rank(0), BadgeTier::None);
    }

    #[test]
    fn test_tier_band_edges() {
        let edges = [
            (1, BadgeTier::Platinum),
            (5, BadgeTier::Platinum),
            (6, BadgeTier::Gold),
            (26, BadgeTier::Silver),
            (501, BadgeTier::Bronze),
            (u32::MAX, BadgeTier::None),
        ];
        for (rank, tier) in edges {
            assert_eq!(BadgeTier::from_rank(rank), tier, "rank {}", rank);
        }
    }

    #[test]
    fn test_tier_serializes_uppercase() {
        let json = serde_json::to_string(&BadgeTier::Gold).unwrap();
        assert_eq!(json, "\"GOLD\"");
        assert!(!BadgeTier::None.has_badge());
    }
}
