use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    claim::{check_claim, ClaimPhase, ClaimRejection, ClaimWindow, EligibilityRules, WindowState},
    config::Settings,
    host::HostContext,
    leaderboard::{Leaderboard, LeaderboardSchedule, ScheduleEvent, TickOutcome},
    models::{
        BadgeTier, ClaimRecord, ClaimState, ImpressionError, Identity, Result, ScoreBreakdown,
        UserProfile,
    },
    scoring::ScoringAlgorithm,
    session::{Connection, ConnectionSkipped},
    utils::Clock,
};

pub const CLAIM_SUCCESS_NOTICE: &str = "NFT Claimed!";

/// Inputs for one round of generated content.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest {
    pub name: String,
    pub rank: u32,
    pub total_score: f64,
    pub tier: BadgeTier,
}

/// All state for one user session. Every mutation goes through a method
/// here; time and randomness come only from the injected clock and RNG.
pub struct Session {
    settings: Arc<Settings>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    algorithm: ScoringAlgorithm,
    window: ClaimWindow,
    rules: EligibilityRules,

    identity: Identity,
    profile: Option<UserProfile>,
    score: Option<ScoreBreakdown>,
    claim: ClaimState,
    phase: ClaimPhase,
    in_flight: HashSet<Connection>,
    farcaster_step: u32,

    leaderboard: Leaderboard,
    schedule: LeaderboardSchedule,
    now: DateTime<Utc>,

    greeting: Option<String>,
    badge_image: Option<String>,
    app_logo: Option<String>,
    generating_image: bool,
    notice: Option<String>,
}

impl Session {
    /// A guest session with no profile yet.
    pub fn new(settings: Arc<Settings>, clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        let now = clock.now();
        let window = ClaimWindow::from_settings(&settings);

        Self {
            algorithm: ScoringAlgorithm::new(settings.scoring.weights.clone()),
            rules: EligibilityRules::from_settings(&settings),
            leaderboard: Leaderboard::new(&settings.leaderboard, window.freeze_at),
            schedule: LeaderboardSchedule::new(&settings.leaderboard),
            window,
            settings,
            clock,
            rng,
            identity: Identity::Guest,
            profile: None,
            score: None,
            claim: ClaimState::default(),
            phase: ClaimPhase::Idle,
            in_flight: HashSet::new(),
            farcaster_step: 0,
            now,
            greeting: None,
            badge_image: None,
            app_logo: None,
            generating_image: false,
            notice: None,
        }
    }

    /// Adopt the host's signed-in user, if there is one.
    pub fn attach_host(&mut self, context: Option<HostContext>) {
        let Some(context) = context else {
            info!("No host context, running as guest");
            return;
        };

        let rank = self.rng.gen_range(1..=500);
        self.identity = Identity::Farcaster { fid: context.fid };
        self.profile = Some(UserProfile::from_host(
            context.fid,
            context.username.as_deref(),
            rank,
        ));
        info!("Session attached to fid {} at rank {}", context.fid, rank);
    }

    pub fn restore_claims(&mut self, state: ClaimState) {
        if state.claimed {
            self.phase = ClaimPhase::Claimed;
        }
        self.claim = state;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn score(&self) -> Option<&ScoreBreakdown> {
        self.score.as_ref()
    }

    pub fn tier(&self) -> BadgeTier {
        self.profile
            .as_ref()
            .map(|p| BadgeTier::from_rank(p.rank))
            .unwrap_or(BadgeTier::None)
    }

    pub fn claim_state(&self) -> &ClaimState {
        &self.claim
    }

    pub fn has_claimed(&self) -> bool {
        self.claim.claimed
    }

    pub fn claim_phase(&self) -> ClaimPhase {
        self.phase
    }

    pub fn is_in_flight(&self, connection: Connection) -> bool {
        self.in_flight.contains(&connection)
    }

    pub fn farcaster_step(&self) -> u32 {
        self.farcaster_step
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn window(&self) -> &ClaimWindow {
        &self.window
    }

    /// Time as of the last [`Session::tick`].
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn window_state(&self) -> WindowState {
        self.window.state(self.now)
    }

    pub fn is_frozen(&self) -> bool {
        self.window.is_frozen(self.now)
    }

    pub fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    pub fn badge_image(&self) -> Option<&str> {
        self.badge_image.as_deref()
    }

    pub fn app_logo(&self) -> Option<&str> {
        self.app_logo.as_deref()
    }

    pub fn is_generating_image(&self) -> bool {
        self.generating_image
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Advance the session clock and run any due leaderboard work.
    /// Returns true when the leaderboard changed.
    pub fn tick(&mut self) -> bool {
        self.now = self.clock.now();
        let mut changed = false;

        for event in self.schedule.poll(self.now) {
            match event {
                ScheduleEvent::ClearTrends => {
                    self.leaderboard.clear_trends();
                    changed = true;
                }
                ScheduleEvent::Tick => {
                    if let TickOutcome::Updated { changed: moved } =
                        self.leaderboard.tick(self.now, &mut self.rng)
                    {
                        debug!("Leaderboard moved: {:?}", moved);
                        changed = true;
                    }
                }
            }
        }

        changed
    }

    pub fn connection_delay(&self, connection: Connection) -> Duration {
        connection.delay(&self.settings.simulation)
    }

    pub fn claim_delay(&self) -> Duration {
        self.settings.simulation.claim_delay()
    }

    /// Guard and mark a connection as in flight.
    pub fn begin_connection(&mut self, connection: Connection) -> std::result::Result<(), ConnectionSkipped> {
        if self.in_flight.contains(&connection) {
            return Err(ConnectionSkipped::InFlight(connection));
        }

        match connection {
            Connection::Wallet => {
                if self.identity.fid().is_some() {
                    return Err(ConnectionSkipped::HostIdentity);
                }
                if self.profile.is_some() {
                    return Err(ConnectionSkipped::AlreadyConnected(connection));
                }
            }
            Connection::IdentityResolution => {
                if self.profile.is_none() {
                    return Err(ConnectionSkipped::NoProfile);
                }
                if self.claim.claimed {
                    return Err(ConnectionSkipped::AlreadyClaimed);
                }
            }
            Connection::TwitterSync => {
                if self.profile.is_none() {
                    return Err(ConnectionSkipped::NoProfile);
                }
                if self.claim.claimed {
                    return Err(ConnectionSkipped::AlreadyClaimed);
                }
            }
            Connection::FarcasterLink => match &self.profile {
                None => return Err(ConnectionSkipped::NoProfile),
                Some(p) if p.farcaster_connected => {
                    return Err(ConnectionSkipped::AlreadyConnected(connection))
                }
                Some(_) => self.farcaster_step = 1,
            },
        }

        self.in_flight.insert(connection);
        debug!("Started {}", connection);
        Ok(())
    }

    pub fn set_farcaster_step(&mut self, step: u32) {
        if self.in_flight.contains(&Connection::FarcasterLink) {
            self.farcaster_step = step;
        }
    }

    /// Apply a finished connection. When a score is already showing it is
    /// recomputed and the returned request should refresh generated content.
    pub fn complete_connection(&mut self, connection: Connection) -> Option<ContentRequest> {
        if !self.in_flight.remove(&connection) {
            return None;
        }

        match connection {
            Connection::Wallet => {
                if self.profile.is_none() {
                    self.profile = Some(UserProfile::demo_wallet());
                }
            }
            Connection::IdentityResolution => {
                let ens = self.rng.gen_bool(0.5);
                if let Some(profile) = self.profile.as_mut() {
                    if ens {
                        profile.resolve_as_ens();
                    } else {
                        profile.resolve_as_fname();
                    }
                }
            }
            Connection::TwitterSync => {
                let age_gain = self.rng.gen_range(0..5);
                let contribution_gain = self.rng.gen_range(5..30);
                if let Some(profile) = self.profile.as_mut() {
                    profile.twitter_age_days = profile.twitter_age_days.saturating_add(age_gain);
                    profile.contribution_count =
                        profile.contribution_count.saturating_add(contribution_gain);
                }
            }
            Connection::FarcasterLink => {
                if let Some(profile) = self.profile.as_mut() {
                    profile.link_farcaster();
                }
                self.farcaster_step = 0;
            }
        }
        info!("Completed {}", connection);

        if self.score.is_some() {
            self.calculate_score()
        } else {
            None
        }
    }

    /// Recompute the score from the current profile. The score is fixed
    /// once the badge has been claimed.
    pub fn calculate_score(&mut self) -> Option<ContentRequest> {
        if self.claim.claimed {
            return None;
        }
        let profile = self.profile.as_ref()?;
        let score = self.algorithm.calculate_score(profile);
        let tier = BadgeTier::from_rank(profile.rank);
        let request = ContentRequest {
            name: profile.effective_name().to_string(),
            rank: profile.rank,
            total_score: score.total_score,
            tier,
        };

        self.score = Some(score);
        if tier.has_badge() {
            self.generating_image = true;
        }
        Some(request)
    }

    pub fn apply_greeting(&mut self, text: String) {
        self.greeting = Some(text);
    }

    /// Store a freshly generated badge. With `keep_previous`, a missing
    /// image leaves the old one in place.
    pub fn apply_badge_image(&mut self, image: Option<String>, keep_previous: bool) {
        if image.is_some() || !keep_previous {
            self.badge_image = image;
        }
        self.generating_image = false;
    }

    pub fn apply_app_logo(&mut self, logo: Option<String>) {
        self.app_logo = logo;
    }

    /// Request a new badge design for the current tier.
    pub fn begin_regenerate_design(&mut self) -> Option<ContentRequest> {
        if self.generating_image || self.claim.claimed {
            return None;
        }
        let profile = self.profile.as_ref()?;
        let tier = BadgeTier::from_rank(profile.rank);
        if !tier.has_badge() {
            return None;
        }

        let request = ContentRequest {
            name: profile.effective_name().to_string(),
            rank: profile.rank,
            total_score: self.score.map(|s| s.total_score).unwrap_or_default(),
            tier,
        };
        self.generating_image = true;
        Some(request)
    }

    /// Open the confirmation step, or say why the claim is refused.
    /// A refusal leaves the session untouched.
    pub fn initiate_claim(&mut self) -> std::result::Result<(), ClaimRejection> {
        let now = self.clock.now();

        if self.claim.claimed {
            return Err(ClaimRejection::AlreadyClaimed);
        }
        if self.phase == ClaimPhase::Submitting {
            return Err(ClaimRejection::InProgress);
        }
        check_claim(false, now, &self.window, &self.rules, self.profile.as_ref())?;

        self.phase
            .initiate()
            .map_err(|_| ClaimRejection::AlreadyClaimed)
    }

    pub fn cancel_claim(&mut self) -> Result<()> {
        self.phase.cancel()
    }

    /// Confirming re-runs the claim gate against the current time. A refusal
    /// closes the confirmation step.
    pub fn confirm_claim(&mut self) -> Result<()> {
        if self.phase == ClaimPhase::Confirming {
            let gate = check_claim(
                self.claim.claimed,
                self.clock.now(),
                &self.window,
                &self.rules,
                self.profile.as_ref(),
            );
            if let Err(rejection) = gate {
                self.phase.cancel()?;
                info!("Claim refused at confirmation: {}", rejection);
                return Err(rejection.into());
            }
        }
        self.phase.confirm()
    }

    /// Enter the terminal claimed state and issue the receipt.
    pub fn finish_claim(&mut self) -> Result<ClaimRecord> {
        let rank = self
            .profile
            .as_ref()
            .map(|p| p.rank)
            .ok_or(ImpressionError::InvalidTransition {
                action: "complete",
                phase: "no profile is connected",
            })?;
        self.phase.complete()?;

        let record = ClaimRecord::issue(rank, self.clock.now(), &mut self.rng);
        self.claim.record(record.clone());
        self.notice = Some(CLAIM_SUCCESS_NOTICE.to_string());
        info!("Claimed {} badge at rank {} ({})", record.tier, record.rank, record.id);

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationSettings;
    use crate::utils::ManualClock;
    use chrono::Duration as ChronoDuration;
    use rand::SeedableRng;

    fn settings() -> Arc<Settings> {
        let mut settings = Settings::default();
        settings.simulation = SimulationSettings::instant();
        Arc::new(settings)
    }

    fn session_at(at: DateTime<Utc>) -> (Arc<ManualClock>, Session) {
        let clock = Arc::new(ManualClock::new(at));
        let session = Session::new(settings(), clock.clone(), StdRng::seed_from_u64(1));
        (clock, session)
    }

    fn claim_open() -> DateTime<Utc> {
        Settings::default().campaign.claim_start + ChronoDuration::hours(1)
    }

    fn connect(session: &mut Session, connection: Connection) -> Option<ContentRequest> {
        session.begin_connection(connection).unwrap();
        session.complete_connection(connection)
    }

    fn eligible_guest(at: DateTime<Utc>) -> (Arc<ManualClock>, Session) {
        let (clock, mut session) = session_at(at);
        connect(&mut session, Connection::Wallet);
        connect(&mut session, Connection::FarcasterLink);
        (clock, session)
    }

    #[test]
    fn test_guest_session_starts_empty() {
        let (_, session) = session_at(claim_open());
        assert_eq!(session.identity(), Identity::Guest);
        assert!(session.profile().is_none());
        assert_eq!(session.tier(), BadgeTier::None);
        assert_eq!(session.claim_phase(), ClaimPhase::Idle);
    }

    #[test]
    fn test_host_context_builds_profile() {
        let (_, mut session) = session_at(claim_open());
        session.attach_host(Some(HostContext {
            fid: 77,
            username: Some("dwr".to_string()),
        }));

        let profile = session.profile().unwrap();
        assert!((1..=500).contains(&profile.rank));
        assert_eq!(profile.username, "dwr");
        assert_eq!(session.identity(), Identity::Farcaster { fid: 77 });
        assert_eq!(
            session.begin_connection(Connection::Wallet),
            Err(ConnectionSkipped::HostIdentity)
        );
    }

    #[test]
    fn test_wallet_connect_creates_demo_profile_once() {
        let (_, mut session) = session_at(claim_open());
        assert_eq!(connect(&mut session, Connection::Wallet), None);
        assert_eq!(session.profile().unwrap().username, "Vitalik_Enjoyer");
        assert_eq!(
            session.begin_connection(Connection::Wallet),
            Err(ConnectionSkipped::AlreadyConnected(Connection::Wallet))
        );
    }

    #[test]
    fn test_connections_need_a_profile() {
        let (_, mut session) = session_at(claim_open());
        for connection in [
            Connection::IdentityResolution,
            Connection::TwitterSync,
            Connection::FarcasterLink,
        ] {
            assert_eq!(
                session.begin_connection(connection),
                Err(ConnectionSkipped::NoProfile)
            );
        }
    }

    #[test]
    fn test_in_flight_guard() {
        let (_, mut session) = session_at(claim_open());
        session.begin_connection(Connection::Wallet).unwrap();
        assert!(session.is_in_flight(Connection::Wallet));
        assert_eq!(
            session.begin_connection(Connection::Wallet),
            Err(ConnectionSkipped::InFlight(Connection::Wallet))
        );
        session.complete_connection(Connection::Wallet);
        assert!(!session.is_in_flight(Connection::Wallet));
    }

    #[test]
    fn test_completion_without_begin_is_ignored() {
        let (_, mut session) = session_at(claim_open());
        assert_eq!(session.complete_connection(Connection::Wallet), None);
        assert!(session.profile().is_none());
    }

    #[test]
    fn test_identity_resolution_assigns_a_name() {
        let (_, mut session) = session_at(claim_open());
        connect(&mut session, Connection::Wallet);
        connect(&mut session, Connection::IdentityResolution);

        let profile = session.profile().unwrap();
        match profile.identity {
            crate::models::IdentityKind::Ens => {
                assert_eq!(profile.effective_name(), "Vitalik_Enjoyer.eth")
            }
            crate::models::IdentityKind::Fname => {
                assert_eq!(profile.effective_name(), "@Vitalik_Enjoyer")
            }
            crate::models::IdentityKind::None => panic!("identity not resolved"),
        }
    }

    #[test]
    fn test_twitter_sync_grows_metrics_and_rescores() {
        let (_, mut session) = session_at(claim_open());
        connect(&mut session, Connection::Wallet);
        session.calculate_score();
        let before = session.profile().unwrap().clone();
        let before_score = session.score().unwrap().total_score;

        let request = connect(&mut session, Connection::TwitterSync);
        let after = session.profile().unwrap();
        let age_gain = after.twitter_age_days - before.twitter_age_days;
        let contribution_gain = after.contribution_count - before.contribution_count;

        assert!(age_gain <= 4);
        assert!((5..=29).contains(&contribution_gain));
        assert!(request.is_some());
        assert!(session.score().unwrap().total_score > before_score);
    }

    #[test]
    fn test_farcaster_link_sets_fname_and_bonus() {
        let (_, mut session) = session_at(claim_open());
        connect(&mut session, Connection::Wallet);
        session.calculate_score();

        session.begin_connection(Connection::FarcasterLink).unwrap();
        assert_eq!(session.farcaster_step(), 1);
        session.set_farcaster_step(2);
        assert_eq!(session.farcaster_step(), 2);
        session.complete_connection(Connection::FarcasterLink);

        let profile = session.profile().unwrap();
        assert!(profile.farcaster_connected);
        assert_eq!(profile.display_name.as_deref(), Some("Vitalik_Enjoyer"));
        assert_eq!(session.farcaster_step(), 0);
        assert_eq!(session.score().unwrap().farcaster_bonus, 5.0);
        assert_eq!(
            session.begin_connection(Connection::FarcasterLink),
            Err(ConnectionSkipped::AlreadyConnected(Connection::FarcasterLink))
        );
    }

    #[test]
    fn test_score_request_carries_tier() {
        let (_, mut session) = session_at(claim_open());
        assert_eq!(session.calculate_score(), None);

        connect(&mut session, Connection::Wallet);
        let request = session.calculate_score().unwrap();
        assert_eq!(request.rank, 42);
        assert_eq!(request.tier, BadgeTier::Silver);
        assert_eq!(request.name, "Vitalik_Enjoyer");
        assert!(session.is_generating_image());

        session.apply_badge_image(Some("data:image/png;base64,AA".to_string()), false);
        assert!(!session.is_generating_image());
        assert!(session.badge_image().is_some());
    }

    #[test]
    fn test_regenerate_keeps_previous_image_on_failure() {
        let (_, mut session) = session_at(claim_open());
        connect(&mut session, Connection::Wallet);
        session.calculate_score();
        session.apply_badge_image(Some("first".to_string()), false);

        assert!(session.begin_regenerate_design().is_some());
        assert!(session.begin_regenerate_design().is_none());
        session.apply_badge_image(None, true);
        assert_eq!(session.badge_image(), Some("first"));
    }

    #[test]
    fn test_claim_before_window_is_rejected_without_change() {
        let early = Settings::default().campaign.claim_start - ChronoDuration::minutes(1);
        let (_, mut session) = eligible_guest(early);

        assert_eq!(session.initiate_claim(), Err(ClaimRejection::WindowNotOpen));
        assert_eq!(session.claim_phase(), ClaimPhase::Idle);
        assert!(!session.has_claimed());
        assert!(session.claim_state().history.is_empty());
    }

    #[test]
    fn test_claim_after_window_is_expired() {
        let late = Settings::default().campaign.claim_end + ChronoDuration::seconds(1);
        let (_, mut session) = eligible_guest(late);
        assert_eq!(session.initiate_claim(), Err(ClaimRejection::WindowExpired));
    }

    #[test]
    fn test_unlinked_profile_is_ineligible() {
        let (_, mut session) = session_at(claim_open());
        assert_eq!(session.initiate_claim(), Err(ClaimRejection::IneligibleProfile));
        connect(&mut session, Connection::Wallet);
        assert_eq!(session.initiate_claim(), Err(ClaimRejection::IneligibleProfile));
    }

    #[test]
    fn test_full_claim_lifecycle() {
        let (clock, mut session) = eligible_guest(claim_open());

        session.initiate_claim().unwrap();
        assert_eq!(session.claim_phase(), ClaimPhase::Confirming);
        session.confirm_claim().unwrap();
        assert_eq!(session.initiate_claim(), Err(ClaimRejection::InProgress));

        clock.advance(ChronoDuration::seconds(2));
        let record = session.finish_claim().unwrap();

        assert_eq!(record.rank, 42);
        assert_eq!(record.tier, BadgeTier::Silver);
        assert_eq!(record.timestamp, clock.now());
        assert!(session.has_claimed());
        assert_eq!(session.claim_state().history, vec![record]);
        assert_eq!(session.take_notice().as_deref(), Some(CLAIM_SUCCESS_NOTICE));

        assert_eq!(session.initiate_claim(), Err(ClaimRejection::AlreadyClaimed));
        assert!(session.finish_claim().is_err());
        assert_eq!(session.claim_state().history.len(), 1);
    }

    #[test]
    fn test_confirmation_left_open_past_window_is_refused() {
        let close = Settings::default().campaign.claim_end;
        let (clock, mut session) = eligible_guest(close - ChronoDuration::seconds(1));

        session.initiate_claim().unwrap();
        clock.advance(ChronoDuration::hours(1));

        let err = session.confirm_claim().unwrap_err();
        assert!(matches!(
            err,
            ImpressionError::ClaimRejected(ClaimRejection::WindowExpired)
        ));
        assert_eq!(session.claim_phase(), ClaimPhase::Idle);
        assert!(!session.has_claimed());
        assert!(session.claim_state().history.is_empty());
        assert!(session.finish_claim().is_err());
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let (_, mut session) = eligible_guest(claim_open());
        session.initiate_claim().unwrap();
        session.cancel_claim().unwrap();
        assert_eq!(session.claim_phase(), ClaimPhase::Idle);
        assert!(session.confirm_claim().is_err());
    }

    #[test]
    fn test_restored_claim_blocks_new_claims() {
        let (_, mut session) = eligible_guest(claim_open());
        session.restore_claims(ClaimState {
            claimed: true,
            history: Vec::new(),
        });
        assert_eq!(session.claim_phase(), ClaimPhase::Claimed);
        assert_eq!(session.initiate_claim(), Err(ClaimRejection::AlreadyClaimed));
        assert_eq!(
            session.begin_connection(Connection::TwitterSync),
            Err(ConnectionSkipped::AlreadyClaimed)
        );
    }

    #[test]
    fn test_claimed_profile_is_locked() {
        let (_, mut session) = eligible_guest(claim_open());
        session.calculate_score();
        session.apply_badge_image(Some("minted".to_string()), false);
        session.initiate_claim().unwrap();
        session.confirm_claim().unwrap();
        session.finish_claim().unwrap();

        let name_before = session.profile().unwrap().display_name.clone();
        let score_before = *session.score().unwrap();

        assert_eq!(
            session.begin_connection(Connection::IdentityResolution),
            Err(ConnectionSkipped::AlreadyClaimed)
        );
        assert!(!session.is_in_flight(Connection::IdentityResolution));
        assert_eq!(session.calculate_score(), None);
        assert_eq!(session.begin_regenerate_design(), None);
        assert!(!session.is_generating_image());

        assert_eq!(session.profile().unwrap().display_name, name_before);
        assert_eq!(*session.score().unwrap(), score_before);
        assert_eq!(session.badge_image(), Some("minted"));
    }

    #[test]
    fn test_leaderboard_ticks_until_freeze() {
        let freeze = Settings::default().campaign.snapshot_freeze;
        let (clock, mut session) = session_at(freeze - ChronoDuration::seconds(10));

        session.tick();
        clock.advance(ChronoDuration::seconds(4));
        assert!(session.tick());
        assert!(session.leaderboard().entries().iter().any(|e| e.last_change.is_some()));

        clock.advance(ChronoDuration::milliseconds(1500));
        assert!(session.tick());
        assert!(session.leaderboard().entries().iter().all(|e| e.last_change.is_none()));

        clock.set(freeze);
        session.tick();
        let frozen = session.leaderboard().entries().to_vec();
        for _ in 0..10 {
            clock.advance(ChronoDuration::seconds(4));
            session.tick();
        }
        assert!(session.is_frozen());
        assert_eq!(session.leaderboard().entries(), frozen.as_slice());
    }
}
