use serde::{Deserialize, Serialize};

/// One capped, linearly scaled score component.
///
/// Points are `min(value / horizon * 100 * weight, cap)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ComponentWeight {
    pub horizon: f64,
    pub weight: f64,
    pub cap: f64,
}

impl ComponentWeight {
    pub const fn new(horizon: f64, weight: f64, cap: f64) -> Self {
        Self { horizon, weight, cap }
    }

    pub fn points(&self, value: u32) -> f64 {
        (value as f64 / self.horizon * 100.0 * self.weight).min(self.cap)
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        if !(self.horizon > 0.0) {
            return Err(format!("{} horizon must be positive, got {}", name, self.horizon));
        }
        if self.weight < 0.0 || self.cap < 0.0 {
            return Err(format!("{} weight and cap must be non-negative", name));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    pub base_app_age: ComponentWeight,
    pub twitter_age: ComponentWeight,
    pub contributions: ComponentWeight,
    pub farcaster_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_app_age: ComponentWeight::new(730.0, 0.20, 20.0),
            twitter_age: ComponentWeight::new(3650.0, 0.30, 30.0),
            contributions: ComponentWeight::new(500.0, 0.50, 50.0),
            farcaster_bonus: 5.0,
        }
    }
}

impl ScoringWeights {
    /// Highest total a profile can reach.
    pub fn max_total(&self) -> f64 {
        self.base_app_age.cap + self.twitter_age.cap + self.contributions.cap + self.farcaster_bonus
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base_app_age.validate("base_app_age")?;
        self.twitter_age.validate("twitter_age")?;
        self.contributions.validate("contributions")?;

        if self.farcaster_bonus < 0.0 {
            return Err("Farcaster bonus must be non-negative".to_string());
        }

        Ok(())
    }
}
