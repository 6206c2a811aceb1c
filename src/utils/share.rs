use reqwest::Url;

use crate::models::BadgeTier;

const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";
const WARPCAST_COMPOSE: &str = "https://warpcast.com/~/compose";

/// Pre-filled compose links. They are only ever displayed, never opened.
#[derive(Debug, Clone)]
pub struct ShareLinks {
    app_url: String,
}

impl ShareLinks {
    pub fn new(app_url: impl Into<String>) -> Self {
        Self {
            app_url: app_url.into(),
        }
    }

    pub fn twitter_badge(&self, rank: u32, tier: BadgeTier) -> String {
        let text = format!(
            "I just checked my @base contribution on BASED IMPRESSION! 🔵\n\nRank: #{}\nTier: {} STATUS\n\n\
             Calculating my way to a $LAMBOLESS future with @baseapp @baseposting @jessepollak @brian_armstrong. 🏎️💨\n\n\
             Check yours here:",
            rank, tier
        );
        compose(TWITTER_INTENT, &[("text", text)])
    }

    pub fn warpcast_badge(&self, rank: u32, tier: BadgeTier) -> String {
        let text = format!(
            "I'm officially BASED! 🔵🎩\n\nJust checked my contribution on BASED IMPRESSION.\nRank: #{}\nTier: {} STATUS\n\n\
             Earning my $LAMBOLESS future on @base with @baseapp @baseposting @jessepollak @brian. 🏎️💨\n\n\
             Check yours: {}",
            rank, tier, self.app_url
        );
        compose(WARPCAST_COMPOSE, &[("text", text)])
    }

    pub fn warpcast_app(&self) -> String {
        let text = "🔵 Check your contribution score on BASED IMPRESSION! \n\n\
                    I'm earning my $LAMBOLESS future on @base with @baseapp. Join the movement! 🏎️💨"
            .to_string();
        compose(
            WARPCAST_COMPOSE,
            &[("text", text), ("embeds[]", self.app_url.clone())],
        )
    }
}

fn compose(base: &str, params: &[(&str, String)]) -> String {
    match Url::parse_with_params(base, params.iter().map(|(k, v)| (*k, v.as_str()))) {
        Ok(url) => url.to_string(),
        Err(_) => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_text(url: &str) -> String {
        let parsed = Url::parse(url).unwrap();
        parsed
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap()
    }

    #[test]
    fn test_twitter_link_embeds_rank_and_tier() {
        let links = ShareLinks::new("https://based-impression.vercel.app");
        let url = links.twitter_badge(12, BadgeTier::Gold);

        assert!(url.starts_with(TWITTER_INTENT));
        let text = query_text(&url);
        assert!(text.contains("Rank: #12"));
        assert!(text.contains("Tier: GOLD STATUS"));
    }

    #[test]
    fn test_warpcast_badge_link_mentions_app() {
        let links = ShareLinks::new("https://example.app");
        let text = query_text(&links.warpcast_badge(3, BadgeTier::Platinum));
        assert!(text.contains("Tier: PLATINUM STATUS"));
        assert!(text.ends_with("Check yours: https://example.app"));
    }

    #[test]
    fn test_app_link_carries_embed() {
        let links = ShareLinks::new("https://example.app");
        let parsed = Url::parse(&links.warpcast_app()).unwrap();
        let embed = parsed
            .query_pairs()
            .find(|(k, _)| k == "embeds[]")
            .map(|(_, v)| v.into_owned());
        assert_eq!(embed.as_deref(), Some("https://example.app"));
    }
}
