use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

use crate::{
    config::LeaderboardSettings,
    models::{LeaderboardEntry, Trend},
};

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Scores were perturbed and the board re-ranked.
    Updated { changed: Vec<String> },
    /// The freeze instant has passed; nothing changed.
    Frozen,
}

/// Simulated live ranking that stops for good at the freeze instant.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    freeze_at: DateTime<Utc>,
    frozen: bool,
    max_updates: usize,
    drift_bias: f64,
    drift_scale: f64,
}

impl Leaderboard {
    pub fn new(settings: &LeaderboardSettings, freeze_at: DateTime<Utc>) -> Self {
        let entries = (0..settings.size)
            .map(|i| {
                LeaderboardEntry::new(
                    i as u32 + 1,
                    format!("based_user_{}", i + 1),
                    settings.top_score - i as f64 * settings.score_step,
                )
            })
            .collect();

        Self {
            entries,
            freeze_at,
            frozen: false,
            max_updates: settings.max_updates_per_tick.max(1),
            drift_bias: settings.drift_bias,
            drift_scale: settings.drift_scale,
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn position_of(&self, username: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.username == username)
    }

    /// One simulation step. Once `now` reaches the freeze instant the board
    /// latches frozen and every later call is a no-op.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: DateTime<Utc>, rng: &mut R) -> TickOutcome {
        if self.frozen || now >= self.freeze_at {
            if !self.frozen {
                debug!("Leaderboard frozen at {}", now);
            }
            self.frozen = true;
            return TickOutcome::Frozen;
        }
        if self.entries.is_empty() {
            return TickOutcome::Updated { changed: Vec::new() };
        }

        let updates = rng.gen_range(1..=self.max_updates);
        let mut changed = Vec::with_capacity(updates);
        for _ in 0..updates {
            let idx = rng.gen_range(0..self.entries.len());
            let delta = (rng.gen::<f64>() - self.drift_bias) * self.drift_scale;
            let entry = &mut self.entries[idx];
            entry.score = (entry.score + delta).max(0.0);
            entry.last_change = Some(if delta > 0.0 { Trend::Up } else { Trend::Down });
            changed.push(entry.username.clone());
        }

        self.rerank();
        TickOutcome::Updated { changed }
    }

    pub fn clear_trends(&mut self) {
        for entry in &mut self.entries {
            entry.last_change = None;
        }
    }

    fn rerank(&mut self) {
        // Stable, so ties keep their current order.
        self.entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.previous_rank = Some(entry.rank);
            entry.rank = i as u32 + 1;
        }
    }
}
