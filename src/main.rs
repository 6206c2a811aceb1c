use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use based_impression::{
    claim::{check_claim, ClaimWindow, EligibilityRules, WindowState},
    config::Settings,
    leaderboard::{Leaderboard, TickOutcome},
    models::{BadgeTier, Identity, UserProfile},
    scoring::ScoringAlgorithm,
    storage::{ClaimLedger, KeyValueStore, MemoryStore, SqliteStore},
    utils::{Clock, OffsetClock, ShareLinks, SystemClock},
    Decimal,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod tui_main;

const MAX_TICKS: i64 = 100_000;

#[derive(Parser)]
#[clap(name = "based-impression")]
#[clap(about = "Score, rank and claim Based Impression badges", long_about = None)]
struct Cli {
    /// Settings file layered over the defaults
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Pretend the clock starts at this RFC 3339 instant
    #[clap(long, global = true)]
    at: Option<DateTime<Utc>>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a score breakdown from raw metrics
    Score {
        #[clap(long)]
        base_app_age_days: u32,

        #[clap(long)]
        twitter_age_days: u32,

        #[clap(long)]
        contributions: u32,

        /// Apply the Farcaster social bonus
        #[clap(long)]
        farcaster: bool,
    },

    /// Show the badge tier for a rank
    Tier {
        #[clap(short, long)]
        rank: u32,
    },

    /// Evaluate the claim gate for a hypothetical profile
    CheckClaim {
        #[clap(short, long)]
        rank: u32,

        #[clap(short, long)]
        balance: Decimal,

        #[clap(long)]
        farcaster: bool,

        /// Check stored claim state for this FID instead of the guest
        #[clap(long)]
        fid: Option<u64>,
    },

    /// Run the leaderboard simulation headless
    Leaderboard {
        #[clap(long, default_value = "10", value_parser = clap::value_parser!(u32).range(..=MAX_TICKS))]
        ticks: u32,

        #[clap(long)]
        seed: Option<u64>,

        #[clap(long, default_value = "10")]
        top: usize,
    },

    /// Print the stored claim history
    History {
        #[clap(long)]
        fid: Option<u64>,
    },

    /// Print share links for a rank
    Share {
        #[clap(short, long)]
        rank: u32,
    },

    /// Launch interactive TUI
    Tui {
        #[clap(long)]
        fid: Option<u64>,

        #[clap(long)]
        username: Option<String>,

        #[clap(long)]
        seed: Option<u64>,

        /// Keep claim state in memory only
        #[clap(long)]
        ephemeral: bool,
    },
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new().unwrap_or_else(|e| {
            eprintln!("Using default settings: {}", e);
            Settings::default()
        }),
    };

    if settings.content.api_key.is_none() {
        settings.content.api_key = std::env::var("API_KEY").ok();
    }

    settings.validate().map_err(anyhow::Error::msg)?;
    Ok(settings)
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Virtual instant of the `n`th headless tick, or `None` on overflow.
fn tick_time(start: DateTime<Utc>, interval_ms: u64, n: u32) -> Option<DateTime<Utc>> {
    let offset_ms = i64::try_from(interval_ms).ok()?.checked_mul(i64::from(n))?;
    start.checked_add_signed(Duration::try_milliseconds(offset_ms)?)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map(StdRng::seed_from_u64).unwrap_or_else(StdRng::from_entropy)
}

async fn open_ledger(settings: &Settings, ephemeral: bool) -> anyhow::Result<ClaimLedger> {
    let store: Arc<dyn KeyValueStore> = if ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SqliteStore::from_settings(&settings.storage).await?)
    };
    Ok(ClaimLedger::new(store, settings.storage.clone()))
}

fn identity(fid: Option<u64>) -> Identity {
    fid.map(|fid| Identity::Farcaster { fid })
        .unwrap_or(Identity::Guest)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_ref())?;

    let clock: Arc<dyn Clock> = match cli.at {
        Some(at) => Arc::new(OffsetClock::starting_at(at)),
        None => Arc::new(SystemClock),
    };

    if !matches!(cli.command, Commands::Tui { .. }) {
        init_logging(&settings);
    }

    match cli.command {
        Commands::Score {
            base_app_age_days,
            twitter_age_days,
            contributions,
            farcaster,
        } => {
            let profile = UserProfile {
                base_app_age_days,
                twitter_age_days,
                contribution_count: contributions,
                farcaster_connected: farcaster,
                ..UserProfile::demo_wallet()
            };
            let algorithm = ScoringAlgorithm::new(settings.scoring.weights.clone());
            let score = algorithm.calculate_score(&profile);

            println!("\n=== Based Impression Score ===");
            println!("Total Score: {:.1}/{:.0}", score.total_score, algorithm.weights().max_total());
            println!("\nBreakdown:");
            println!("  Base app age:   {:.1}", score.base_app_points);
            println!("  X account age:  {:.1}", score.twitter_age_points);
            println!("  Contributions:  {:.1}", score.contribution_points);
            println!("  Farcaster:      {:.1}", score.farcaster_bonus);
        }

        Commands::Tier { rank } => {
            let tier = BadgeTier::from_rank(rank);
            if tier.has_badge() {
                println!("Rank #{}: {} STATUS", rank, tier);
            } else {
                println!("Rank #{}: no badge", rank);
            }
        }

        Commands::CheckClaim {
            rank,
            balance,
            farcaster,
            fid,
        } => {
            let ledger = open_ledger(&settings, false).await?;
            let identity = identity(fid);
            let state = ledger.load(identity).await?;

            let profile = UserProfile {
                rank,
                balance,
                farcaster_connected: farcaster,
                ..UserProfile::demo_wallet()
            };
            let now = clock.now();
            let window = ClaimWindow::from_settings(&settings);
            let rules = EligibilityRules::from_settings(&settings);

            info!("Checking claim for {} at {}", identity, now);
            match check_claim(state.claimed, now, &window, &rules, Some(&profile)) {
                Ok(()) => println!("\n✅ Eligible to claim the {} badge", BadgeTier::from_rank(rank)),
                Err(rejection) => println!("\n❌ {}", rejection),
            }
        }

        Commands::Leaderboard { ticks, seed, top } => {
            let mut rng = make_rng(seed);
            let start = clock.now();
            let window = ClaimWindow::from_settings(&settings);
            let mut board = Leaderboard::new(&settings.leaderboard, window.freeze_at);
            let interval_ms = settings.leaderboard.tick_interval_ms;

            for i in 1..=ticks {
                let now = tick_time(start, interval_ms, i)
                    .ok_or_else(|| anyhow::anyhow!("Tick {} falls outside the representable time range", i))?;
                match board.tick(now, &mut rng) {
                    TickOutcome::Updated { changed } => info!("Tick {}: moved {:?}", i, changed),
                    TickOutcome::Frozen => {
                        info!("Tick {}: leaderboard frozen", i);
                        break;
                    }
                }
            }

            let status = if board.is_frozen() { "FROZEN" } else { "LIVE" };
            println!("\n=== Leaderboard ({}) ===", status);
            for entry in board.entries().iter().take(top) {
                let delta = entry.rank_delta();
                let movement = match delta {
                    d if d > 0 => format!("▲{}", d),
                    d if d < 0 => format!("▼{}", -d),
                    _ => String::new(),
                };
                println!("#{:<4} {:<20} {:>8.1} {}", entry.rank, entry.username, entry.score, movement);
            }
        }

        Commands::History { fid } => {
            let ledger = open_ledger(&settings, false).await?;
            let identity = identity(fid);
            let state = ledger.load(identity).await?;

            println!("\n=== Claim history for {} ===", identity);
            if state.history.is_empty() {
                println!("No claims recorded{}", if state.claimed { " (flag set)" } else { "" });
            }
            for record in &state.history {
                println!(
                    "{}  {:<8} #{:<5} {}",
                    record.timestamp.to_rfc3339(),
                    record.tier.as_str(),
                    record.rank,
                    record.id
                );
            }
        }

        Commands::Share { rank } => {
            let tier = BadgeTier::from_rank(rank);
            let links = ShareLinks::new(settings.campaign.app_url.clone());
            println!("X:        {}", links.twitter_badge(rank, tier));
            println!("Warpcast: {}", links.warpcast_badge(rank, tier));
            println!("App:      {}", links.warpcast_app());
        }

        Commands::Tui {
            fid,
            username,
            seed,
            ephemeral,
        } => {
            let ledger = match open_ledger(&settings, ephemeral).await {
                Ok(ledger) => ledger,
                Err(e) => {
                    error!("Falling back to in-memory claim state: {}", e);
                    open_ledger(&settings, true).await?
                }
            };
            let window = ClaimWindow::from_settings(&settings);
            if window.state(clock.now()) == WindowState::Expired {
                eprintln!("Note: the claim window has already closed.");
            }

            tui_main::run_tui(
                settings,
                clock,
                make_rng(seed),
                ledger,
                tui_main::TuiOptions { fid, username },
            )
            .await?;
        }
    }

    Ok(())
}
