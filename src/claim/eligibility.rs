use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{config::Settings, models::UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Pending,
    Open,
    Expired,
}

/// Fixed instants bounding the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimWindow {
    pub freeze_at: DateTime<Utc>,
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
}

impl ClaimWindow {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            freeze_at: settings.campaign.snapshot_freeze,
            opens_at: settings.campaign.claim_start,
            closes_at: settings.campaign.claim_end,
        }
    }

    /// Both ends inclusive.
    pub fn state(&self, now: DateTime<Utc>) -> WindowState {
        if now < self.opens_at {
            WindowState::Pending
        } else if now > self.closes_at {
            WindowState::Expired
        } else {
            WindowState::Open
        }
    }

    pub fn is_frozen(&self, now: DateTime<Utc>) -> bool {
        now >= self.freeze_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityRules {
    pub max_rank: u32,
    pub min_balance: Decimal,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            max_rank: 1000,
            min_balance: Decimal::ONE,
        }
    }
}

impl EligibilityRules {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_rank: settings.scoring.max_claim_rank,
            min_balance: settings.scoring.min_claim_balance,
        }
    }

    pub fn admits(&self, profile: &UserProfile) -> bool {
        profile.rank <= self.max_rank
            && profile.balance >= self.min_balance
            && profile.farcaster_connected
    }
}

/// Why a claim was refused. Variants are listed in the order they are checked.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimRejection {
    #[error("Already claimed.")]
    AlreadyClaimed,

    #[error("A claim is already being submitted.")]
    InProgress,

    #[error("Claim window is not yet active.")]
    WindowNotOpen,

    #[error("The claim window has closed.")]
    WindowExpired,

    #[error("Ineligible.")]
    IneligibleProfile,
}

/// Evaluates every claim precondition, reporting the first that fails.
///
/// A missing profile counts as ineligible.
pub fn check_claim(
    has_claimed: bool,
    now: DateTime<Utc>,
    window: &ClaimWindow,
    rules: &EligibilityRules,
    profile: Option<&UserProfile>,
) -> Result<(), ClaimRejection> {
    if has_claimed {
        return Err(ClaimRejection::AlreadyClaimed);
    }

    match window.state(now) {
        WindowState::Pending => return Err(ClaimRejection::WindowNotOpen),
        WindowState::Expired => return Err(ClaimRejection::WindowExpired),
        WindowState::Open => {}
    }

    match profile {
        Some(profile) if rules.admits(profile) => Ok(()),
        _ => Err(ClaimRejection::IneligibleProfile),
    }
}
