//! scavenger CLI - play scavenger hunts from the terminal.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scavenger_core::{HuntId, HuntPayload};
use scavenger_progress::{
    AnswerMatcher, AutoHint, AutoHinter, EntityMatcher, ExactMatcher, GuessOutcome, HuntSession,
    HuntTracker, PaceEstimator,
};
use scavenger_storage::{HuntStore, JsonPlaces, JsonStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "scavenger")]
#[command(about = "Play scavenger hunts from the terminal", long_about = None)]
struct Cli {
    /// Data directory (overrides SCAVENGER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a hunt from a JSON file
    Import {
        /// Hunt ID
        hunt_id: String,
        /// File holding `{ index, items: [...] }`
        file: PathBuf,
    },
    /// List stored hunts
    List,
    /// Show the current riddle and revealed hints
    Show {
        /// Hunt ID
        hunt_id: String,
    },
    /// Start a hunt
    Start {
        /// Hunt ID
        hunt_id: String,
    },
    /// Reveal the next hint
    Hint {
        /// Hunt ID
        hunt_id: String,
        /// Ask the places service for a photo or review instead
        #[arg(long)]
        auto: bool,
    },
    /// Guess the current destination
    Guess {
        /// Hunt ID
        hunt_id: String,
        /// Your guess
        guess: String,
        /// Ignore case and extra words
        #[arg(long)]
        fuzzy: bool,
    },
    /// Record your current position
    Locate {
        /// Hunt ID
        hunt_id: String,
        /// Latitude
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },
    /// Show progress and timing
    Status {
        /// Hunt ID
        hunt_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env().with_data_dir(cli.data_dir);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();
    for key in &config.defaulted {
        info!("{} not set, using default", key);
    }

    let store = Arc::new(JsonStore::new(&config.data_dir).await?);

    match cli.command {
        Commands::Import { hunt_id, file } => {
            let json = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let payload = HuntPayload::from_json(&json)?;
            validate_import(&payload)?;

            let id = HuntId::new(hunt_id);
            store.save_hunt(&id, &payload).await?;
            info!("Imported hunt {} from {}", id, file.display());
            println!("Imported hunt {} with {} destinations", id, payload.items.len());
        }
        Commands::List => {
            let ids = store.list_hunts().await?;
            println!("Hunts ({})", ids.len());
            for id in ids {
                if let Some(hunt) = store.load_hunt(&id).await? {
                    println!("  {} | {} | {} destinations",
                        id,
                        format_index(hunt.index, hunt.items.len()),
                        hunt.items.len(),
                    );
                }
            }
        }
        Commands::Show { hunt_id } => {
            let session = HuntSession::open(store, HuntId::new(hunt_id)).await?;
            let tracker = session.tracker();
            let tracker = tracker.lock().await;
            print_state(session.hunt_id(), &tracker);
        }
        Commands::Start { hunt_id } => {
            let session = HuntSession::open(store, HuntId::new(hunt_id)).await?;
            if !session.tracker().lock().await.has_not_started() {
                println!("Hunt {} is already under way.", session.hunt_id());
                return Ok(());
            }
            session.start().await?;
            session.save().await?;
            print_state(session.hunt_id(), &*session.tracker().lock().await);
        }
        Commands::Hint { hunt_id, auto } => {
            let session = HuntSession::open(store, HuntId::new(hunt_id)).await?;
            let tracker = session.tracker();
            if !on_stop(&*tracker.lock().await) {
                println!("There is no riddle to give hints for.");
                return Ok(());
            }

            if auto {
                let places = JsonPlaces::load(config.places_path()).await?;
                let hinter = AutoHinter::new(places);
                let mut rng = rand::thread_rng();
                match hinter.next_hint(&tracker, &mut rng).await? {
                    Some(AutoHint::Photo(photo)) => println!("Photo hint: {}", photo),
                    Some(AutoHint::Review(review)) => println!("Review hint: \"{}\"", review),
                    None => println!("No more hints available."),
                }
            } else {
                let mut t = tracker.lock().await;
                match t.next_hint()? {
                    Some(hint) => println!("Hint #{}: {}", t.next_hint_index(), hint),
                    None => println!("No more hints. Try `--auto` for a photo or review."),
                }
            }
            session.save().await?;
        }
        Commands::Guess { hunt_id, guess, fuzzy } => {
            let session = HuntSession::open(store, HuntId::new(hunt_id)).await?;
            if !on_stop(&*session.tracker().lock().await) {
                println!("There is nothing left to guess.");
                return Ok(());
            }

            let matcher: &dyn AnswerMatcher = if fuzzy { &EntityMatcher } else { &ExactMatcher };
            let outcome = session.submit_guess(matcher, &guess).await?;
            if outcome == GuessOutcome::Empty {
                return Ok(());
            }
            println!("{}", outcome.message());

            if outcome == GuessOutcome::Correct {
                {
                    let tracker = session.tracker();
                    let tracker = tracker.lock().await;
                    let found = tracker.current_destination()?;
                    println!("{}: {}", found.name(), found.description());
                }
                session.advance().await?;
                session.save().await?;
                print_state(session.hunt_id(), &*session.tracker().lock().await);
            }
        }
        Commands::Locate { hunt_id, lat, lng } => {
            let session = HuntSession::open(store, HuntId::new(hunt_id)).await?;
            session.tracker().lock().await.set_position(lat, lng);
            session.save().await?;
            println!("Position set to {:.5}, {:.5}", lat, lng);
        }
        Commands::Status { hunt_id } => {
            let session = HuntSession::open(store, HuntId::new(hunt_id)).await?;
            let tracker = session.tracker();
            let tracker = tracker.lock().await;

            println!("Hunt {}", session.hunt_id());
            println!("  Found: {}/{}", tracker.found_destinations().len(), tracker.len());
            println!("  Progress: {:.0}%", tracker.progress_percent());
            if let Ok(elapsed) = tracker.elapsed_since_start() {
                println!("  Elapsed: {}", format_duration(elapsed));
            }
            if let Some(left) = PaceEstimator.estimate_remaining(&tracker) {
                if !tracker.is_complete() {
                    println!("  Estimated time left: {}", format_duration(left));
                }
            }
            if let Some(pos) = tracker.position() {
                println!("  Last position: {:.5}, {:.5}", pos.lat, pos.lng);
            }
        }
    }

    Ok(())
}

/// Reject hunts no session could be opened on.
fn validate_import(payload: &HuntPayload) -> Result<()> {
    let (stops, index) = payload.clone().into_parts();
    HuntTracker::new(stops, index).context("invalid hunt")?;
    Ok(())
}

fn on_stop(tracker: &HuntTracker) -> bool {
    !tracker.has_not_started() && !tracker.is_complete()
}

fn print_state(hunt_id: &HuntId, tracker: &HuntTracker) {
    if tracker.has_not_started() {
        println!("Hunt {} has {} destinations.", hunt_id, tracker.len());
        println!("Run `scavenger start {}` to begin.", hunt_id);
        return;
    }

    if tracker.is_complete() {
        println!("Congrats! You've visited the following locations:");
        for dest in tracker.stops() {
            println!("  {}: {}", dest.name(), dest.description());
        }
        return;
    }

    for dest in tracker.found_destinations() {
        println!("  Found {} ({:.4}, {:.4})", dest.name(), dest.lat(), dest.lng());
    }
    if let Ok(dest) = tracker.current_destination() {
        if tracker.is_at_last_stop() {
            println!("Final destination!");
        }
        println!("Riddle: {}", dest.puzzle());
    }
    for (i, hint) in tracker.revealed_hints().iter().enumerate() {
        println!("Hint #{}: {}", i + 1, hint);
    }
}

fn format_index(index: i64, len: usize) -> String {
    match index {
        i if i < 0 => "NOT STARTED".to_string(),
        i if i as usize >= len => "COMPLETE".to_string(),
        i => format!("STOP {}/{}", i + 1, len),
    }
}

fn format_duration(d: chrono::Duration) -> String {
    let minutes = d.num_minutes();
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m {:02}s", minutes, d.num_seconds() % 60)
    }
}
