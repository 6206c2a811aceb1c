use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub score: f64,
    pub last_change: Option<Trend>,
    pub previous_rank: Option<u32>,
}

impl LeaderboardEntry {
    pub fn new(rank: u32, username: String, score: f64) -> Self {
        Self {
            rank,
            username,
            score,
            last_change: None,
            previous_rank: None,
        }
    }

    /// Positions moved since the last re-rank; positive means climbed.
    pub fn rank_delta(&self) -> i64 {
        self.previous_rank
            .map(|prev| prev as i64 - self.rank as i64)
            .unwrap_or(0)
    }
}
