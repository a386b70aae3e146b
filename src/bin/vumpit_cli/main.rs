// ABOUTME: vumpIT CLI - station console for logins, measurement runs and the directory
// ABOUTME: Parses commands with clap and dispatches to the command modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports
//!
//! Usage:
//! ```bash
//! # Check credentials and show the portal a user lands on
//! vumpit-cli login STU001 student123
//!
//! # Run a measurement, accepting every step automatically
//! vumpit-cli measure STU001 student123
//!
//! # Run a measurement step by step from the keyboard
//! vumpit-cli measure STU001 student123 --interactive
//!
//! # Show a profile with its training recommendation
//! vumpit-cli profile STU001
//!
//! # Search accounts
//! vumpit-cli users --query coach
//!
//! # Write the demo data set
//! vumpit-cli seed --force
//! ```

mod commands;
mod helpers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use vumpit::config::{AppConfig, DataPath};
use vumpit::logging::{LogFormat, LoggingConfig};
use vumpit::models::UserRole;

#[derive(Parser)]
#[command(
    name = "vumpit-cli",
    about = "vumpIT measurement station console",
    long_about = "Sign in, run the BMI and vertical jump wizard, and manage station accounts, students and classes."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data file override (`:memory:` for a throwaway store)
    #[arg(long, global = true)]
    data: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Check credentials and show the landing portal
    Login {
        /// Account or student id
        user_id: String,
        /// Password
        password: String,
    },

    /// Run the measurement wizard for a student or athlete
    Measure {
        /// Student id
        user_id: String,
        /// Password
        password: String,

        /// Drive each step from the keyboard instead of accepting automatically
        #[arg(long, short = 'i')]
        interactive: bool,

        /// Stop after BMI
        #[arg(long)]
        skip_jump: bool,

        /// Short timings for demos (3 samples, 1 s countdown)
        #[arg(long)]
        quick: bool,
    },

    /// Show a profile and its training recommendation as JSON
    Profile {
        /// Student id
        id: String,
    },

    /// List or search accounts
    Users {
        /// Substring over id, name, sport, role and college
        #[arg(long, short = 'q')]
        query: Option<String>,

        /// Only this role (admin or coach)
        #[arg(long)]
        role: Option<String>,
    },

    /// Show a coach's dashboard counts
    Coach {
        /// Coach id
        coach_id: String,
    },

    /// Write the demo accounts, students and classes to the data file
    Seed {
        /// Overwrite a data file that already holds records
        #[arg(long)]
        force: bool,
    },
}

fn parse_role(value: &str) -> Result<UserRole> {
    serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
        .with_context(|| format!("unknown role '{value}'"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    logging.format = LogFormat::Compact;
    logging.level = if cli.verbose { "debug" } else { "warn" }.to_owned();
    logging.init()?;

    let mut config = AppConfig::from_env()?;
    if let Some(data) = cli.data.as_deref() {
        config.data_path = DataPath::parse(data);
    }
    info!("{}", config.summary());

    match cli.command {
        Command::Login { user_id, password } => {
            let store = commands::open_store(&config.data_path)?;
            commands::directory::login(&store, &user_id, &password)?;
        }
        Command::Measure {
            user_id,
            password,
            interactive,
            skip_jump,
            quick,
        } => {
            let mut store = commands::open_store(&config.data_path)?;
            let options = commands::measure::MeasureOptions {
                interactive,
                skip_jump,
                quick,
            };
            commands::measure::run(&config, &mut store, &user_id, &password, &options).await?;
        }
        Command::Profile { id } => {
            let store = commands::open_store(&config.data_path)?;
            commands::directory::profile(&store, &id)?;
        }
        Command::Users { query, role } => {
            let store = commands::open_store(&config.data_path)?;
            let role = role.as_deref().map(parse_role).transpose()?;
            commands::directory::users(&store, query.as_deref(), role);
        }
        Command::Coach { coach_id } => {
            let store = commands::open_store(&config.data_path)?;
            commands::directory::coach(&store, &coach_id)?;
        }
        Command::Seed { force } => {
            commands::directory::seed(&config.data_path, force)?;
        }
    }

    Ok(())
}
