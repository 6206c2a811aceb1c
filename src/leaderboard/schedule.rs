use chrono::{DateTime, Duration, Utc};

use crate::config::{LeaderboardSettings, MAX_TIMER_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleEvent {
    ClearTrends,
    Tick,
}

/// Timer bookkeeping for the leaderboard loop, driven by polling.
///
/// A late poll fires a single tick rather than catching up on missed ones.
#[derive(Debug, Clone)]
pub struct LeaderboardSchedule {
    interval: Duration,
    trend_ttl: Duration,
    next_tick: Option<DateTime<Utc>>,
    clear_at: Option<DateTime<Utc>>,
}

/// Clamped into `1..=MAX_TIMER_MS` milliseconds.
fn timer(ms: u64) -> Duration {
    Duration::milliseconds(ms.clamp(1, MAX_TIMER_MS) as i64)
}

impl LeaderboardSchedule {
    pub fn new(settings: &LeaderboardSettings) -> Self {
        Self {
            interval: timer(settings.tick_interval_ms),
            trend_ttl: timer(settings.trend_display_ms),
            next_tick: None,
            clear_at: None,
        }
    }

    /// Returns the due events, trend clearing first.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<ScheduleEvent> {
        let mut due = Vec::new();

        if self.clear_at.is_some_and(|at| now >= at) {
            self.clear_at = None;
            due.push(ScheduleEvent::ClearTrends);
        }

        match self.next_tick {
            None => self.next_tick = Some(now + self.interval),
            Some(at) if now >= at => {
                self.next_tick = Some(now + self.interval);
                self.clear_at = Some(now + self.trend_ttl);
                due.push(ScheduleEvent::Tick);
            }
            Some(_) => {}
        }

        due
    }
}
