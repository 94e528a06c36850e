//! CLI for auditlog
//!
//! Subcommands:
//! - `list`: show stored audit logs and their connection metadata
//! - `dump <name>`: decode a log and print one JSON line per message
//! - `verify <name>`: decode a log and report whether it is intact

use std::io::Write;
use std::process::ExitCode;

use auditlog::codec::{DecodeEvent, Decoder, DecoderLimits};
use auditlog::config::{Settings, load_config};
use auditlog::storage::{Entry, FileStorage, ReadableStorage};
use auditlog::utils::logging;
use chrono::DateTime;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "auditlog")]
enum Command {
    /// List stored audit logs
    List,
    /// Print every message of an audit log as JSON
    Dump {
        /// Name of the audit log
        name: String,
    },
    /// Check that an audit log decodes completely
    Verify {
        /// Name of the audit log
        name: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cmd = Command::parse();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&settings.log.level);

    let result = match cmd {
        Command::List => run_list(&settings),
        Command::Dump { name } => run_dump(&settings, &name).await,
        Command::Verify { name } => run_verify(&settings, &name).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn open_storage(settings: &Settings) -> Result<FileStorage, Box<dyn std::error::Error>> {
    Ok(FileStorage::open(&settings.storage.directory)?)
}

fn decoder(settings: &Settings) -> Decoder {
    Decoder::new().with_limits(DecoderLimits::from(&settings.codec))
}

fn run_list(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let storage = open_storage(settings)?;
    for entry in storage.list() {
        println!("{}", describe(&entry?));
    }
    Ok(())
}

fn describe(entry: &Entry) -> String {
    match &entry.metadata {
        Some(meta) => {
            let started = DateTime::from_timestamp(meta.start_time, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| meta.start_time.to_string());
            let user = meta.username.as_deref().unwrap_or("-");
            format!("{}\t{}\t{}\t{}", entry.name, started, meta.source_ip, user)
        }
        None => format!("{}\t-\t-\t-", entry.name),
    }
}

async fn run_dump(settings: &Settings, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let storage = open_storage(settings)?;
    let mut decoding = decoder(settings).decode(storage.open_reader(name)?);
    let mut stdout = std::io::stdout().lock();

    while let Some(item) = decoding.next().await {
        let message = item?;
        serde_json::to_writer(&mut stdout, &message)?;
        writeln!(stdout)?;
    }
    Ok(())
}

async fn run_verify(settings: &Settings, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let storage = open_storage(settings)?;
    let mut decoding = decoder(settings).decode(storage.open_reader(name)?);

    let mut records = 0u64;
    while let Some(event) = decoding.next_event().await {
        match event {
            DecodeEvent::Message(_) => records += 1,
            DecodeEvent::Error(e) => {
                return Err(format!("{name}: intact up to {records} records, then {e}").into());
            }
            DecodeEvent::Finished => info!(name, records, "audit log is intact"),
        }
    }
    println!("{name}: {records} records");
    Ok(())
}
