//! CarpoolBuddy command line
//!
//! Runs the removal core against a JSON snapshot of one event and one of its
//! carpools and prints the outcome as JSON. Nothing is written back; the
//! caller commits the printed result to its own store.

use std::path::{Path, PathBuf};
use anyhow::{bail, Context};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::info;

use CarpoolBuddy::{
    config::Settings,
    models::{Carpool, Event, Participant},
    services::ServiceFactory,
    utils::{helpers::normalize_whitespace, logging},
};

#[derive(Parser)]
#[command(name = "carpoolbuddy", version, about = "Driver removal for event carpools")]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(long, global = true, default_value = "carpoolbuddy")]
    config: String,

    /// JSON file holding `{ "event": ..., "carpool": ... }`
    #[arg(long, short, global = true, default_value = "snapshot.json")]
    snapshot: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether ACTOR may remove the target driver
    Evaluate {
        #[arg(long)]
        actor: String,
        #[arg(long)]
        target: String,
    },
    /// Preview what removing the target would do
    Impact {
        #[arg(long)]
        target: String,
    },
    /// Remove the target and print the resulting carpool and notifications
    Remove {
        #[arg(long)]
        target: String,
        #[arg(long)]
        removed_by: String,
        #[arg(long)]
        reason: String,
    },
    /// Create a pending removal request
    Request {
        #[arg(long)]
        target: String,
        #[arg(long)]
        requested_by: String,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    event: Event,
    carpool: Carpool,
}

impl Snapshot {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("parsing snapshot {}", path.display()))?;

        if snapshot.carpool.event_id != snapshot.event.id {
            bail!(
                "carpool {} belongs to event {}, not {}",
                snapshot.carpool.id,
                snapshot.carpool.event_id,
                snapshot.event.id
            );
        }
        Ok(snapshot)
    }

    fn participant(&self, id: &str) -> anyhow::Result<&Participant> {
        self.carpool
            .find_participant(id)
            .with_context(|| format!("participant {} is not in carpool {}", id, self.carpool.id))
    }
}

fn non_empty_reason(reason: &str) -> anyhow::Result<String> {
    let reason = normalize_whitespace(reason);
    if reason.is_empty() {
        bail!("a reason for the removal is required");
    }
    Ok(reason)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_file(&cli.config)?;
    let services = ServiceFactory::new(&settings)?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    let snapshot = Snapshot::load(&cli.snapshot)?;
    info!(carpool_id = %snapshot.carpool.id, event_id = %snapshot.event.id, "Snapshot loaded");

    let removal = &services.removal_service;

    match cli.command {
        Command::Evaluate { actor, target } => {
            let target = snapshot.participant(&target)?;
            let authority = removal.evaluate_authority(
                &actor,
                &snapshot.carpool,
                &snapshot.event,
                target,
                Local::now().naive_local(),
            );
            print_json(&authority)
        }
        Command::Impact { target } => {
            let target = snapshot.participant(&target)?;
            let impact = removal.assess_impact(
                &snapshot.carpool,
                &snapshot.event,
                target,
                Local::now().naive_local(),
            );
            print_json(&impact)
        }
        Command::Remove { target, removed_by, reason } => {
            let reason = non_empty_reason(&reason)?;
            let result = removal.execute_removal(
                &snapshot.carpool,
                &snapshot.event,
                &target,
                &removed_by,
                &reason,
                Utc::now(),
            )?;
            print_json(&result)
        }
        Command::Request { target, requested_by, reason } => {
            let reason = non_empty_reason(&reason)?;
            snapshot.participant(&target)?;
            let request = removal.create_removal_request(
                &snapshot.carpool.id,
                &target,
                &requested_by,
                &reason,
                Utc::now(),
            );
            print_json(&request)
        }
    }
}
