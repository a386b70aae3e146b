// ABOUTME: Demo data seeder for the vumpIT station
// ABOUTME: Writes the demo accounts, students with one measurement each, and classes to a data file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! Demo data seeder for vumpIT.
//!
//! Usage:
//! ```bash
//! # Seed the configured data file (VUMPIT_DATA_PATH, default vumpit_data.json)
//! cargo run --bin seed-demo-data
//!
//! # Seed a specific file, replacing what is there
//! cargo run --bin seed-demo-data -- --path /srv/vumpit/data.json --reset
//!
//! # Print the demo document instead of writing it
//! cargo run --bin seed-demo-data -- --print
//! ```

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use vumpit::config::{AppConfig, DataPath};
use vumpit::logging::LoggingConfig;
use vumpit::storage::DataStore;

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "vumpIT Demo Data Seeder",
    long_about = "Populate the station data file with the demo admin, coach and student accounts"
)]
struct SeedArgs {
    /// Data file to write (defaults to VUMPIT_DATA_PATH)
    #[arg(long)]
    path: Option<PathBuf>,

    /// Replace a data file that already holds records
    #[arg(long)]
    reset: bool,

    /// Print the demo document to stdout and exit
    #[arg(long)]
    print: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let mut logging = LoggingConfig::from_env();
    logging.level = if args.verbose { "debug" } else { "info" }.to_owned();
    logging.init()?;

    if args.print {
        println!("{}", DataStore::with_demo_data().export_json()?);
        return Ok(());
    }

    let path = match args.path {
        Some(path) => path,
        None => match AppConfig::from_env()?.data_path {
            DataPath::File(path) => path,
            DataPath::Memory => bail!("VUMPIT_DATA_PATH is :memory:, pass --path to seed a file"),
        },
    };

    let mut store = DataStore::open(&path)?;
    if !args.reset && (!store.users().is_empty() || !store.students().is_empty()) {
        bail!(
            "{} already holds {} accounts and {} students; pass --reset to replace them",
            path.display(),
            store.users().len(),
            store.students().len()
        );
    }
    store.seed_demo_data()?;

    info!(
        path = %path.display(),
        users = store.users().len(),
        students = store.students().len(),
        classes = store.classes().len(),
        "demo data written"
    );
    println!("Demo data written to {}", path.display());
    println!("   admin / admin123, coach / coach123, STU001 / student123");
    Ok(())
}
