use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::{
    config::Settings,
    content::ContentService,
    host::FrameHost,
    models::{ClaimRecord, Result},
    session::{Connection, ConnectionSkipped, ContentRequest, Session},
    storage::ClaimLedger,
    utils::Clock,
};

impl Session {
    /// Build a session from whatever the host knows about the user and restore
    /// the stored claim state for that identity. Host and storage failures
    /// degrade to guest / unclaimed. Signalling ready is left to the caller,
    /// after its first render.
    pub async fn start(
        host: &dyn FrameHost,
        ledger: &ClaimLedger,
        settings: Arc<Settings>,
        clock: Arc<dyn Clock>,
        rng: StdRng,
    ) -> Session {
        let mut session = Session::new(settings, clock, rng);

        match host.context().await {
            Ok(context) => session.attach_host(context),
            Err(e) => warn!("Host context unavailable, continuing as guest: {}", e),
        }

        let identity = session.identity();
        match ledger.load(identity).await {
            Ok(state) => session.restore_claims(state),
            Err(e) => error!("Failed to load claim state for {}: {}", identity, e),
        }

        session
    }
}

/// Run one simulated connection end to end. The lock is released while the
/// simulated delay elapses.
pub async fn run_connection(
    session: &Mutex<Session>,
    connection: Connection,
) -> std::result::Result<Option<ContentRequest>, ConnectionSkipped> {
    let (delay, steps) = {
        let mut session = session.lock().await;
        session.begin_connection(connection)?;
        let steps = match connection {
            Connection::FarcasterLink => session.settings().simulation.farcaster_steps.max(1),
            _ => 1,
        };
        (session.connection_delay(connection), steps)
    };

    if steps > 1 {
        let per_step = delay / steps;
        for step in 1..=steps {
            session.lock().await.set_farcaster_step(step);
            sleep(per_step).await;
        }
    } else {
        sleep(delay).await;
    }

    Ok(session.lock().await.complete_connection(connection))
}

/// Confirm a pending claim, wait out the submission, then persist the result.
///
/// A storage failure is logged; the in-memory claim still stands.
pub async fn submit_claim(session: &Mutex<Session>, ledger: &ClaimLedger) -> Result<ClaimRecord> {
    let delay = {
        let mut session = session.lock().await;
        session.confirm_claim()?;
        session.claim_delay()
    };

    sleep(delay).await;

    let (record, identity, state) = {
        let mut session = session.lock().await;
        let record = session.finish_claim()?;
        (record, session.identity(), session.claim_state().clone())
    };

    if let Err(e) = ledger.save(identity, &state).await {
        error!("Failed to persist claim for {}: {}", identity, e);
    }

    Ok(record)
}

/// Fetch greeting text and badge image for a freshly computed score.
pub async fn refresh_content(
    session: &Mutex<Session>,
    content: &ContentService,
    request: ContentRequest,
) {
    let (greeting, image) = futures::join!(
        content.congratulation(&request.name, request.rank, request.total_score),
        content.badge_image(request.tier, &request.name, request.rank),
    );

    let mut session = session.lock().await;
    session.apply_greeting(greeting);
    session.apply_badge_image(image, false);
}

/// Ask for a new badge design, keeping the current one if generation fails.
/// Returns false when nothing was requested.
pub async fn regenerate_design(session: &Mutex<Session>, content: &ContentService) -> bool {
    let Some(request) = session.lock().await.begin_regenerate_design() else {
        return false;
    };

    info!("Regenerating {} badge for {}", request.tier, request.name);
    let image = content
        .badge_image(request.tier, &request.name, request.rank)
        .await;
    session.lock().await.apply_badge_image(image, true);
    true
}

pub async fn load_logo(session: &Mutex<Session>, content: &ContentService) {
    let logo = content.app_logo().await;
    session.lock().await.apply_app_logo(logo);
}
