// ABOUTME: Command modules for vumpit-cli and the shared store loader
// ABOUTME: Directory commands (login, profile, users, coach, seed) and the measure command
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

pub mod directory;
pub mod measure;

use anyhow::Result;
use tracing::info;
use vumpit::config::DataPath;
use vumpit::storage::DataStore;

/// Open the configured store; a missing or empty data file gets the demo data
pub fn open_store(data_path: &DataPath) -> Result<DataStore> {
    match data_path {
        DataPath::Memory => Ok(DataStore::with_demo_data()),
        DataPath::File(path) => {
            let mut store = DataStore::open(path)?;
            if store.users().is_empty() && store.students().is_empty() {
                info!(path = %path.display(), "empty data file, loading demo data");
                store.seed_demo_data()?;
            }
            Ok(store)
        }
    }
}
