pub mod models;
pub mod config;
pub mod scoring;
pub mod claim;
pub mod leaderboard;
pub mod session;
pub mod host;
pub mod content;
pub mod storage;
pub mod utils;
pub mod tui;

pub use models::{
    BadgeTier, ClaimRecord, ClaimState, Identity, ImpressionError, Result, ScoreBreakdown,
    UserProfile,
};
pub use config::Settings;
pub use session::Session;

// Re-export commonly used types
pub use rust_decimal::Decimal;
