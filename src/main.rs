use clap::{Parser, Subcommand};
use bounty_progress::{
    api::{EventRegistry, FixtureStore, ProfileSource, RestClient},
    config::Settings,
    models::ProfileProgress,
    progression::{format_level, format_percent, format_xp_progress, progress_bar, LevelCalculator, ProgressTracker},
    session::Session,
};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

mod tui_main;

const FIXTURE_SEED: u64 = 42;

#[derive(Parser)]
#[clap(name = "bounty-progress")]
#[clap(about = "XP and level progression for bounty hunters", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the level for a cumulative XP total
    Level {
        /// Total XP
        #[clap(long, allow_hyphen_values = true)]
        xp: i64,
    },

    /// Print XP requirements for each level
    Table {
        /// Last level to print
        #[clap(long, default_value = "30")]
        up_to: u32,
    },

    /// Fetch a user's profile and show their progress
    Profile {
        /// User ID
        #[clap(short, long)]
        user_id: String,

        /// Use generated fixture data instead of the API
        #[clap(long)]
        fixtures: bool,
    },

    /// List every visible profile with its level
    Leaderboard {
        #[clap(long)]
        fixtures: bool,
    },

    /// Register a user for a community event
    Register {
        #[clap(short, long)]
        event_id: String,

        #[clap(short, long)]
        user_id: String,

        #[clap(long)]
        fixtures: bool,
    },

    /// Launch interactive TUI
    Tui {
        #[clap(long)]
        fixtures: bool,
    },
}

fn init_logging(settings: &Settings, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));

    if quiet {
        // Keep log lines from tearing the TUI
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn build_sources(
    settings: &Settings,
    calculator: LevelCalculator,
    fixtures: bool,
) -> anyhow::Result<(Arc<dyn ProfileSource>, Arc<dyn EventRegistry>)> {
    if fixtures {
        info!("Using fixture data (seed {})", FIXTURE_SEED);
        let store = Arc::new(FixtureStore::seeded(FIXTURE_SEED).with_calculator(calculator));
        let profiles: Arc<dyn ProfileSource> = store.clone();
        let events: Arc<dyn EventRegistry> = store;
        return Ok((profiles, events));
    }

    let session = match &settings.session.access_token {
        Some(token) => Session::with_access_token(token.as_str()),
        None => Session::new(),
    };
    let client = Arc::new(RestClient::new(&settings.api, Arc::new(session))?);
    info!("Using bounty API at {}", client.base_url());

    let profiles: Arc<dyn ProfileSource> = client.clone();
    let events: Arc<dyn EventRegistry> = client;
    Ok((profiles, events))
}

fn print_progress(progress: &ProfileProgress) {
    let level = &progress.level;
    println!("\n=== {} ===", progress.profile.name());
    println!("User ID: {}", progress.profile.id);
    println!("Role: {}", progress.profile.role.as_str());
    println!("Total XP: {}", progress.profile.total_xp);
    println!("{}", format_level(level.level));
    println!("{} {} {}", format_xp_progress(level), progress_bar(level, 20), format_percent(level));
}

async fn register(events: &dyn EventRegistry, event_id: &str, user_id: &str) -> anyhow::Result<()> {
    match events.register_for_event(event_id, user_id).await {
        Ok(event) => {
            println!("\n✅ Registered {} for {}", user_id, event.title);
            println!("Slots left: {}/{}", event.remaining_slots(), event.capacity);
            Ok(())
        }
        Err(e) => {
            error!("Registration failed: {}", e);
            println!("\n❌ Could not register: {}", e);
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        eprintln!("Using default settings: {}", e);
        Settings::default()
    });

    init_logging(&settings, matches!(cli.command, Commands::Tui { .. }));

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    let calculator = LevelCalculator::new(settings.progression);

    match cli.command {
        Commands::Level { xp } => {
            let level = calculator.calculate_level_signed(xp)?;
            println!("{}", format_level(level.level));
            println!("{} {} {}", format_xp_progress(&level), progress_bar(&level, 20), format_percent(&level));
            println!(
                "{} XP to {}",
                level.xp_remaining(),
                format_level(level.level.saturating_add(1))
            );
        }

        Commands::Table { up_to } => {
            println!("{:>6} {:>10} {:>12}", "Level", "XP needed", "Total XP");
            for row in calculator.level_table(up_to)? {
                println!("{:>6} {:>10} {:>12}", row.level, row.xp_required, row.total_xp);
            }
        }

        Commands::Profile { user_id, fixtures } => {
            let (profiles, _) = build_sources(&settings, calculator, fixtures)?;
            let tracker = ProgressTracker::new(profiles, calculator);

            match tracker.profile_progress(&user_id).await {
                Ok(progress) => print_progress(&progress),
                Err(e) => {
                    error!("Failed to load progress for {}: {}", user_id, e);
                    return Err(e.into());
                }
            }
        }

        Commands::Leaderboard { fixtures } => {
            let (profiles, _) = build_sources(&settings, calculator, fixtures)?;
            let tracker = ProgressTracker::new(profiles, calculator);

            for (rank, row) in tracker.leaderboard().await?.iter().enumerate() {
                println!(
                    "{:>3}. {:<20} {:<10} {}",
                    rank + 1,
                    row.profile.name(),
                    format_level(row.level.level),
                    format_xp_progress(&row.level)
                );
            }
        }

        Commands::Register { event_id, user_id, fixtures } => {
            let (_, events) = build_sources(&settings, calculator, fixtures)?;
            register(events.as_ref(), &event_id, &user_id).await?;
        }

        Commands::Tui { fixtures } => {
            let (profiles, _) = build_sources(&settings, calculator, fixtures)?;
            tui_main::run_tui(ProgressTracker::new(profiles, calculator)).await?;
        }
    }

    Ok(())
}
