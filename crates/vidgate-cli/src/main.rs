//! vidgate - Command-line front end for the viewing engine
//!
//! This is the main entry point for vidgate. It wires together:
//! - Settings loading
//! - Store initialization
//! - The viewing service
//!
//! Every subcommand opens the store, runs one request against the service,
//! prints the response as JSON on stdout, and exits. There is no resident
//! state: the engine re-derives the day's summary from the ledger on every
//! invocation, so concurrent invocations agree.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vidgate_config::{Settings, load_settings};
use vidgate_core::{ViewingService, should_interrupt, video_duration_minutes};
use vidgate_store::{CatalogRow, SqliteStore, Store};
use vidgate_util::{VideoId, default_settings_path, now_utc};

/// vidgate - Viewing-time gating for a child's curated video player
#[derive(Parser, Debug)]
#[command(name = "vidgate")]
#[command(about = "Viewing-time gating for a child's curated video player", long_about = None)]
struct Args {
    /// Settings file path (default: ~/.config/vidgate/settings.toml)
    #[arg(short, long, default_value_os_t = default_settings_path())]
    settings: PathBuf,

    /// Data directory override (or set VIDGATE_DATA_DIR env var)
    #[arg(short, long, env = "VIDGATE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Fetch a grid of videos for display
    Grid {
        /// Number of videos to select (default: configured grid size)
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Record a playback outcome
    Log {
        /// Video that was played
        #[arg(long)]
        video_id: VideoId,

        /// Seconds actually watched
        #[arg(long)]
        duration: u32,

        /// The video ran to completion
        #[arg(long)]
        completed: bool,

        /// Supervised replay requested by the parent (does not count)
        #[arg(long)]
        manual_replay: bool,

        /// The post-limit bonus video (does not count)
        #[arg(long)]
        grace_use: bool,
    },

    /// Show today's limit status
    Status,

    /// Decide whether an in-progress video must be interrupted
    CheckInterrupt {
        /// Minutes remaining when playback started
        #[arg(long)]
        minutes_remaining: u32,

        /// The playing video's full length in seconds
        #[arg(long)]
        video_duration: u32,
    },

    /// Load catalog rows from a JSON file produced by ingestion
    Seed {
        /// Path to a JSON array of catalog rows
        file: PathBuf,
    },

    /// Mark a video unavailable across every source
    MarkUnavailable { video_id: VideoId },

    /// Add a video to the ban set
    Ban { video_id: VideoId },

    /// Remove a video from the ban set
    Unban { video_id: VideoId },

    /// Show recent watch events, newest first
    History {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

/// Catalog row as ingestion emits it.
#[derive(Debug, Deserialize)]
struct SeedRow {
    id: VideoId,
    source: String,
    title: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
    duration_seconds: u32,
    #[serde(default = "default_true")]
    available: bool,
}

fn default_true() -> bool {
    true
}

fn open_store(settings: &Settings, data_dir_override: Option<PathBuf>) -> Result<Arc<dyn Store>> {
    let data_dir = data_dir_override.unwrap_or_else(|| settings.service.data_dir.clone());

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    let db_path = data_dir.join("vidgate.db");
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open database {:?}", db_path))?;

    info!(db_path = %db_path.display(), "Store initialized");
    Ok(Arc::new(store))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args.settings)
        .with_context(|| format!("Failed to load settings from {:?}", args.settings))?;

    info!(
        settings_path = %args.settings.display(),
        daily_limit_minutes = settings.daily_limit_minutes,
        "Settings loaded"
    );

    let store = open_store(&settings, args.data_dir)?;
    let now = now_utc();

    match args.command {
        CliCommand::Grid { count } => {
            let service = ViewingService::new(settings, store);
            let response = service.fetch_videos(count, now)?;
            print_json(&response)
        }

        CliCommand::Log {
            video_id,
            duration,
            completed,
            manual_replay,
            grace_use,
        } => {
            let service = ViewingService::new(settings, store);
            let request = vidgate_api::WatchRequest {
                video_id,
                completed,
                duration_watched_seconds: duration,
                manual_replay,
                grace_use,
            };
            let response = service.log_watch(&request, now)?;
            print_json(&response)
        }

        CliCommand::Status => {
            let service = ViewingService::new(settings, store);
            let response = service.limit_status(now)?;
            print_json(&response)
        }

        CliCommand::CheckInterrupt {
            minutes_remaining,
            video_duration,
        } => {
            let interrupt =
                should_interrupt(minutes_remaining, video_duration_minutes(video_duration));
            print_json(&serde_json::json!({ "interrupt": interrupt }))
        }

        CliCommand::Seed { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read seed file {:?}", file))?;
            let rows: Vec<SeedRow> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse seed file {:?}", file))?;

            let count = rows.len();
            for row in rows {
                store.upsert_video(CatalogRow {
                    id: row.id,
                    source: row.source,
                    title: row.title,
                    thumbnail_url: row.thumbnail_url,
                    duration_seconds: row.duration_seconds,
                    available: row.available,
                })?;
            }

            info!(rows = count, file = %file.display(), "Catalog seeded");
            print_json(&serde_json::json!({ "seeded": count }))
        }

        CliCommand::MarkUnavailable { video_id } => {
            let service = ViewingService::new(settings, store);
            service.mark_unavailable(&video_id)?;
            print_json(&serde_json::json!({ "marked_unavailable": video_id }))
        }

        CliCommand::Ban { video_id } => {
            store.set_banned(&video_id, true)?;
            info!(video_id = %video_id, "Video banned");
            print_json(&serde_json::json!({ "banned": video_id }))
        }

        CliCommand::Unban { video_id } => {
            store.set_banned(&video_id, false)?;
            info!(video_id = %video_id, "Video unbanned");
            print_json(&serde_json::json!({ "unbanned": video_id }))
        }

        CliCommand::History { limit } => {
            let events = store.recent_events(limit)?;
            print_json(&events)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    run(args)
}
