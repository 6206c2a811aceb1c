use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rand::rngs::StdRng;
use std::{io, sync::Arc};
use tokio::sync::Mutex;

use based_impression::{
    claim::ClaimPhase,
    content::ContentService,
    host::{FrameHost, StaticHost},
    session::{self, Connection, Session},
    storage::ClaimLedger,
    tui::{ui, App, Event as TuiEvent, EventHandler},
    utils::Clock,
    Settings,
};

pub struct TuiOptions {
    pub fid: Option<u64>,
    pub username: Option<String>,
}

/// Everything a key handler may need to spawn work against.
#[derive(Clone)]
struct Shared {
    app: Arc<Mutex<App>>,
    session: Arc<Mutex<Session>>,
    content: Arc<ContentService>,
    ledger: Arc<ClaimLedger>,
    host: Arc<StaticHost>,
}

pub async fn run_tui(
    settings: Settings,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    ledger: ClaimLedger,
    options: TuiOptions,
) -> Result<()> {
    // Disable logging to prevent screen corruption
    disable_logging_output();

    let settings = Arc::new(settings);
    let host = Arc::new(StaticHost::new(options.fid, options.username));
    let content = Arc::new(ContentService::from_settings(&settings.content));
    let session = Session::start(host.as_ref(), &ledger, settings, clock, rng).await;

    let shared = Shared {
        app: Arc::new(Mutex::new(App::new())),
        session: Arc::new(Mutex::new(session)),
        content,
        ledger: Arc::new(ledger),
        host,
    };

    {
        let shared = shared.clone();
        tokio::spawn(async move {
            session::load_logo(&shared.session, &shared.content).await;
        });
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let events = EventHandler::new(250);
    let res = run_app(&mut terminal, &shared, events).await;

    // Always restore terminal state, even if there was an error
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Application error: {}", err);
        Err(err)
    } else {
        Ok(())
    }
}

fn disable_logging_output() {
    // Redirect tracing output to a null writer to prevent screen corruption
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let null_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::sink)
        .with_filter(tracing_subscriber::filter::LevelFilter::OFF);

    let _ = tracing_subscriber::registry()
        .with(null_layer)
        .try_init();
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    shared: &Shared,
    events: EventHandler,
) -> Result<()> {
    let mut signalled_ready = false;

    loop {
        if shared.app.lock().await.should_quit {
            return Ok(());
        }

        {
            let app = shared.app.lock().await;
            let session = shared.session.lock().await;
            terminal.draw(|f| ui::draw(f, &app, &session))?;
        }

        // The host learns we are ready only once something is on screen.
        if !signalled_ready {
            shared.host.ready();
            signalled_ready = true;
        }

        let event = match events.next() {
            Ok(event) => event,
            Err(e) => return Err(anyhow::anyhow!("Input error: {}", e)),
        };

        match event {
            TuiEvent::Key(key) => handle_key(shared, key).await,
            TuiEvent::Tick => {
                let notice = {
                    let mut session = shared.session.lock().await;
                    session.tick();
                    session.take_notice()
                };
                let mut app = shared.app.lock().await;
                app.expire_status();
                if let Some(notice) = notice {
                    app.set_status(notice);
                }
            }
            TuiEvent::Resize(_, _) => {
                // Terminal was resized, redraw will happen automatically
            }
        }
    }
}

async fn handle_key(shared: &Shared, key: KeyEvent) {
    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');

    match key.code {
        _ if ctrl_c => quit(shared).await,
        KeyCode::Char('q') => quit(shared).await,
        KeyCode::Tab => shared.app.lock().await.toggle_view(),
        KeyCode::Char('h') => shared.app.lock().await.toggle_share(),
        KeyCode::Char('w') => spawn_connection(shared, Connection::Wallet),
        KeyCode::Char('i') => spawn_connection(shared, Connection::IdentityResolution),
        KeyCode::Char('s') => spawn_connection(shared, Connection::TwitterSync),
        KeyCode::Char('f') => spawn_connection(shared, Connection::FarcasterLink),
        KeyCode::Char('c') => {
            let (request, claimed) = {
                let mut session = shared.session.lock().await;
                (session.calculate_score(), session.has_claimed())
            };
            match request {
                Some(request) => {
                    let shared = shared.clone();
                    tokio::spawn(async move {
                        session::refresh_content(&shared.session, &shared.content, request).await;
                    });
                }
                None if claimed => shared.app.lock().await.set_error("Badge already claimed."),
                None => shared.app.lock().await.set_error("Connect a wallet first."),
            }
        }
        KeyCode::Char('g') => {
            let shared = shared.clone();
            tokio::spawn(async move {
                session::regenerate_design(&shared.session, &shared.content).await;
            });
        }
        KeyCode::Enter => {
            let result = shared.session.lock().await.initiate_claim();
            if let Err(rejection) = result {
                shared.app.lock().await.set_error(rejection.to_string());
            }
        }
        KeyCode::Char('y') => {
            if shared.session.lock().await.claim_phase() != ClaimPhase::Confirming {
                return;
            }
            let shared = shared.clone();
            tokio::spawn(async move {
                if let Err(e) = session::submit_claim(&shared.session, &shared.ledger).await {
                    shared.app.lock().await.set_error(e.to_string());
                }
            });
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            let mut session = shared.session.lock().await;
            if session.claim_phase() == ClaimPhase::Confirming {
                let _ = session.cancel_claim();
            } else {
                drop(session);
                shared.app.lock().await.show_share = false;
            }
        }
        _ => {}
    }
}

fn spawn_connection(shared: &Shared, connection: Connection) {
    let shared = shared.clone();
    tokio::spawn(async move {
        match session::run_connection(&shared.session, connection).await {
            Ok(Some(request)) => {
                session::refresh_content(&shared.session, &shared.content, request).await;
            }
            Ok(None) => {}
            Err(skipped) => shared.app.lock().await.set_status(skipped.to_string()),
        }
    });
}

async fn quit(shared: &Shared) {
    shared.host.close();
    shared.app.lock().await.quit();
}
