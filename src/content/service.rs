use std::sync::Arc;
use tracing::{debug, error};

use crate::{
    config::ContentSettings,
    content::{ContentGenerator, GeminiClient},
    models::BadgeTier,
};

pub const FALLBACK_GREETING: &str = "The most based contribution in the ecosystem. 🔵🏎️";
pub const EMPTY_GREETING: &str = "You are officially BASED. Keep casting on the blue chain! 🔵🎩";

/// Best-effort front for a [`ContentGenerator`]. Never fails: errors are
/// logged and replaced with static fallbacks.
#[derive(Clone, Default)]
pub struct ContentService {
    generator: Option<Arc<dyn ContentGenerator>>,
}

impl ContentService {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Fallback-only service.
    pub fn offline() -> Self {
        Self::default()
    }

    /// Gemini-backed when an API key is configured, offline otherwise.
    pub fn from_settings(settings: &ContentSettings) -> Self {
        let Some(key) = settings.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            debug!("No generative API key configured, using fallback content");
            return Self::offline();
        };

        match GeminiClient::new(settings, key) {
            Ok(client) => Self::new(Arc::new(client)),
            Err(e) => {
                error!("Failed to build generative client: {}", e);
                Self::offline()
            }
        }
    }

    pub fn is_online(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn congratulation(&self, name: &str, rank: u32, score: f64) -> String {
        let Some(generator) = &self.generator else {
            return FALLBACK_GREETING.to_string();
        };

        match generator.congratulation(name, rank, score).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_GREETING.to_string(),
            Err(e) => {
                error!("Congratulation text generation failed: {}", e);
                FALLBACK_GREETING.to_string()
            }
        }
    }

    /// `None` for tiers without a badge.
    pub async fn badge_image(&self, tier: BadgeTier, name: &str, rank: u32) -> Option<String> {
        if !tier.has_badge() {
            return None;
        }
        let generator = self.generator.as_ref()?;

        generator
            .badge_image(tier, name, rank)
            .await
            .unwrap_or_else(|e| {
                error!("Badge image generation failed: {}", e);
                None
            })
    }

    pub async fn app_logo(&self) -> Option<String> {
        let generator = self.generator.as_ref()?;

        generator.app_logo().await.unwrap_or_else(|e| {
            error!("Logo generation failed: {}", e);
            None
        })
    }
}
