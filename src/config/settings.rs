use chrono::{DateTime, TimeZone, Utc};
use config::{Config, ConfigError, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::scoring::ScoringWeights;

/// Upper bound for leaderboard timers: one day.
pub const MAX_TIMER_MS: u64 = 86_400_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub campaign: CampaignSettings,
    pub scoring: ScoringSettings,
    pub leaderboard: LeaderboardSettings,
    pub simulation: SimulationSettings,
    pub storage: StorageSettings,
    pub content: ContentSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

/// Fixed campaign boundaries plus the public app URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSettings {
    pub snapshot_start: DateTime<Utc>,
    pub snapshot_end: DateTime<Utc>,
    pub snapshot_freeze: DateTime<Utc>,
    pub claim_start: DateTime<Utc>,
    pub claim_end: DateTime<Utc>,
    pub app_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub weights: ScoringWeights,
    pub max_claim_rank: u32,
    pub min_claim_balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    pub size: usize,
    pub top_score: f64,
    pub score_step: f64,
    pub tick_interval_ms: u64,
    pub trend_display_ms: u64,
    pub max_updates_per_tick: usize,
    /// Subtracted from a uniform(0,1) sample; above 0.5 drifts scores down.
    pub drift_bias: f64,
    pub drift_scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub wallet_delay_ms: u64,
    pub identity_delay_ms: u64,
    pub twitter_sync_delay_ms: u64,
    pub farcaster_delay_ms: u64,
    pub farcaster_steps: u32,
    pub claim_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub url: String,
    pub max_connections: u32,
    pub claimed_key_prefix: String,
    pub history_key_prefix: String,
    pub guest_claimed_key: String,
    pub guest_history_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout_seconds: u64,
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            snapshot_start: utc(2025, 11, 1, 0, 1),
            snapshot_end: utc(2026, 1, 15, 23, 49),
            snapshot_freeze: utc(2026, 1, 16, 0, 1),
            claim_start: utc(2026, 1, 16, 0, 5),
            claim_end: utc(2026, 1, 31, 23, 59),
            app_url: "https://based-impression.vercel.app".to_string(),
        }
    }
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            size: 100,
            top_score: 1000.0,
            score_step: 9.5,
            tick_interval_ms: 4000,
            trend_display_ms: 1500,
            max_updates_per_tick: 2,
            drift_bias: 0.4,
            drift_scale: 15.0,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            wallet_delay_ms: 1000,
            identity_delay_ms: 1500,
            twitter_sync_delay_ms: 2000,
            farcaster_delay_ms: 1500,
            farcaster_steps: 3,
            claim_delay_ms: 2000,
        }
    }
}

impl SimulationSettings {
    /// No delays at all; used by tests and headless runs.
    pub fn instant() -> Self {
        Self {
            wallet_delay_ms: 0,
            identity_delay_ms: 0,
            twitter_sync_delay_ms: 0,
            farcaster_delay_ms: 0,
            farcaster_steps: 3,
            claim_delay_ms: 0,
        }
    }

    pub fn claim_delay(&self) -> Duration {
        Duration::from_millis(self.claim_delay_ms)
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://based_impression.db".to_string(),
            max_connections: 1,
            claimed_key_prefix: "claimed_fid_".to_string(),
            history_key_prefix: "history_fid_".to_string(),
            guest_claimed_key: "guest_claimed".to_string(),
            guest_history_key: "guest_history".to_string(),
        }
    }
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            timeout_seconds: 60,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Based Impression".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            campaign: CampaignSettings::default(),
            scoring: ScoringSettings {
                weights: ScoringWeights::default(),
                max_claim_rank: 1000,
                min_claim_balance: Decimal::ONE,
            },
            leaderboard: LeaderboardSettings::default(),
            simulation: SimulationSettings::default(),
            storage: StorageSettings::default(),
            content: ContentSettings::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("BASED_IMPRESSION").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("BASED_IMPRESSION").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scoring.weights.validate()?;

        let c = &self.campaign;
        let ordered = c.snapshot_start <= c.snapshot_end
            && c.snapshot_end <= c.snapshot_freeze
            && c.snapshot_freeze <= c.claim_start
            && c.claim_start <= c.claim_end;
        if !ordered {
            return Err(
                "Campaign boundaries must satisfy snapshot_start <= snapshot_end <= snapshot_freeze <= claim_start <= claim_end"
                    .to_string(),
            );
        }

        if self.leaderboard.size == 0 {
            return Err("Leaderboard size must be at least 1".to_string());
        }
        if self.leaderboard.max_updates_per_tick == 0 {
            return Err("Leaderboard must update at least one entry per tick".to_string());
        }
        if self.leaderboard.tick_interval_ms == 0 {
            return Err("Leaderboard tick interval must be positive".to_string());
        }
        if self.leaderboard.tick_interval_ms > MAX_TIMER_MS
            || self.leaderboard.trend_display_ms > MAX_TIMER_MS
        {
            return Err(format!(
                "Leaderboard timers must not exceed {} ms",
                MAX_TIMER_MS
            ));
        }

        if self.scoring.min_claim_balance < Decimal::ZERO {
            return Err("Minimum claim balance must be non-negative".to_string());
        }

        Ok(())
    }
}
