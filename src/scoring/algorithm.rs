use crate::{
    models::{ScoreBreakdown, UserProfile},
    scoring::ScoringWeights,
};

#[derive(Debug, Clone, Default)]
pub struct ScoringAlgorithm {
    weights: ScoringWeights,
}

impl ScoringAlgorithm {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn calculate_score(&self, profile: &UserProfile) -> ScoreBreakdown {
        let base_app_points = self.weights.base_app_age.points(profile.base_app_age_days);
        let twitter_age_points = self.weights.twitter_age.points(profile.twitter_age_days);
        let contribution_points = self.weights.contributions.points(profile.contribution_count);
        let farcaster_bonus = if profile.farcaster_connected {
            self.weights.farcaster_bonus
        } else {
            0.0
        };

        ScoreBreakdown {
            base_app_points,
            twitter_age_points,
            contribution_points,
            farcaster_bonus,
            total_score: base_app_points + twitter_age_points + contribution_points + farcaster_bonus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(base: u32, twitter: u32, contributions: u32, farcaster: bool) -> UserProfile {
        UserProfile {
            base_app_age_days: base,
            twitter_age_days: twitter,
            contribution_count: contributions,
            farcaster_connected: farcaster,
            ..UserProfile::demo_wallet()
        }
    }

    #[test]
    fn test_reference_profile() {
        let algo = ScoringAlgorithm::default();
        let score = algo.calculate_score(&profile(365, 1825, 250, true));

        assert!((score.base_app_points - 10.0).abs() < 1e-9);
        assert!((score.twitter_age_points - 15.0).abs() < 1e-9);
        assert!((score.contribution_points - 25.0).abs() < 1e-9);
        assert_eq!(score.farcaster_bonus, 5.0);
        assert!((score.total_score - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_metrics_zero_score() {
        let algo = ScoringAlgorithm::default();
        let score = algo.calculate_score(&profile(0, 0, 0, false));
        assert_eq!(score.total_score, 0.0);
    }

    #[test]
    fn test_components_are_capped() {
        let algo = ScoringAlgorithm::default();
        let score = algo.calculate_score(&profile(u32::MAX, u32::MAX, u32::MAX, true));

        assert_eq!(score.base_app_points, 20.0);
        assert_eq!(score.twitter_age_points, 30.0);
        assert_eq!(score.contribution_points, 50.0);
        assert_eq!(score.total_score, 105.0);
    }

    #[test]
    fn test_components_within_caps_for_many_profiles() {
        let algo = ScoringAlgorithm::default();
        for base in (0..2000).step_by(137) {
            for twitter in (0..8000).step_by(611) {
                for contributions in (0..1200).step_by(97) {
                    for farcaster in [false, true] {
                        let s = algo.calculate_score(&profile(base, twitter, contributions, farcaster));
                        assert!((0.0..=20.0).contains(&s.base_app_points));
                        assert!((0.0..=30.0).contains(&s.twitter_age_points));
                        assert!((0.0..=50.0).contains(&s.contribution_points));
                        let bonus = if farcaster { 5.0 } else { 0.0 };
                        let sum = s.base_app_points + s.twitter_age_points + s.contribution_points + bonus;
                        assert!((s.total_score - sum).abs() < 1e-9);
                    }
                }
            }
        }
    }

    #[test]
    fn test_custom_weights() {
        let mut weights = ScoringWeights::default();
        weights.farcaster_bonus = 0.0;
        let algo = ScoringAlgorithm::new(weights);
        let score = algo.calculate_score(&profile(0, 0, 0, true));
        assert_eq!(score.total_score, 0.0);
    }
}
