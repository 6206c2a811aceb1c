use async_trait::async_trait;

use crate::models::{BadgeTier, Result};

/// Generative text/image backend. Images come back as `data:` URIs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn congratulation(&self, name: &str, rank: u32, score: f64) -> Result<String>;

    async fn badge_image(&self, tier: BadgeTier, name: &str, rank: u32) -> Result<Option<String>>;

    async fn app_logo(&self) -> Result<Option<String>>;
}

pub const LOGO_PROMPT: &str = "A professional, sleek, and futuristic app logo for \"BASED IMPRESSION\". \
The background features a high-performance blue Lamborghini supercar with glowing electric-blue accents. \
The car is positioned dynamically. Superimposed is the text \"BASED IMPRESSION\" in bold, metallic silver \
futuristic font with a subtle blue glow. Cinematic lighting, 8k resolution, minimalist but powerful logo composition.";

pub fn congratulation_prompt(name: &str, rank: u32, score: f64) -> String {
    format!(
        "You are a hype-man for the Base Ecosystem and Farcaster. A user named {} has a rank of {} and a score of {} \
         in the \"BASED IMPRESSION\" contribution event. Write a short, energetic, \"based\" message (max 20 words) \
         congratulating them. Mention $LAMBOLESS, Farcaster, and use emojis like 🔵 🏎️ 🎩.",
        name, rank, score
    )
}

fn tier_style(tier: BadgeTier) -> &'static str {
    match tier {
        BadgeTier::Platinum => {
            "platinum model with sparkling rainbow colors, pearlescent finish, and iridescent crystalline shards"
        }
        BadgeTier::Gold => "luxurious 24k gold model with deep polished shine and warm golden embers",
        BadgeTier::Silver => {
            "polished silver model with industrial metallic chrome finish and cool blue reflections"
        }
        BadgeTier::Bronze => {
            "bronze model with distinct purple neon glowing veins and weathered bronze textures"
        }
        BadgeTier::None => "modern tech style",
    }
}

pub fn badge_prompt(tier: BadgeTier, name: &str, rank: u32) -> String {
    format!(
        "A unique NFT badge for a user named '{}' (Rank #{}). \
         Central focus: A cool 'Warplet' character (a stylized, friendly digital creature) standing triumphantly \
         on top of a futuristic Lamborghini supercar. \
         Theme: {}. \
         Environment: A glowing blue holographic grid background with floating $LAMBOLESS coin particles. \
         A subtle, glowing purple Farcaster logo integrated into the character's outfit or the car's hood. \
         Cinematic 3D render, Octane render style, 8k, vibrant colors, extremely detailed.",
        name,
        rank,
        tier_style(tier)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_carry_inputs() {
        let text = congratulation_prompt("alice", 12, 55.0);
        assert!(text.contains("alice"));
        assert!(text.contains("rank of 12"));

        let badge = badge_prompt(BadgeTier::Gold, "alice", 12);
        assert!(badge.contains("Rank #12"));
        assert!(badge.contains("24k gold"));
    }
}
