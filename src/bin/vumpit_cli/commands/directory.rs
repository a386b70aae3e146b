// ABOUTME: Directory commands for vumpit-cli
// ABOUTME: Login check, profile overview, account search, coach dashboard and demo seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use crate::helpers::display;
use anyhow::{bail, Result};
use vumpit::auth::authenticate;
use vumpit::config::DataPath;
use vumpit::models::UserRole;
use vumpit::storage::DataStore;

pub fn login(store: &DataStore, user_id: &str, password: &str) -> Result<()> {
    let session = authenticate(store, user_id, password)?;
    println!(
        "Signed in as {} ({}) -> {}",
        session.user.name, session.user.role, session.portal
    );
    Ok(())
}

pub fn profile(store: &DataStore, id: &str) -> Result<()> {
    let overview = store.athlete_overview(id)?;
    println!("{}", serde_json::to_string_pretty(&overview)?);
    Ok(())
}

pub fn users(store: &DataStore, query: Option<&str>, role: Option<UserRole>) {
    let mut found = query.map_or_else(|| store.users().iter().collect(), |q| store.search_users(q));
    if let Some(role) = role {
        found.retain(|user| user.role == role);
    }
    display::user_table(&found);
}

pub fn coach(store: &DataStore, coach_id: &str) -> Result<()> {
    let summary = store.coach_summary(coach_id)?;
    display::coach_summary(&summary);
    for class in store.classes_by_coach(coach_id) {
        let roster = store.class_roster(&class.id)?;
        println!("  {} {} ({} students)", class.id, class.name, roster.len());
    }
    Ok(())
}

pub fn seed(data_path: &DataPath, force: bool) -> Result<()> {
    let DataPath::File(path) = data_path else {
        bail!("seeding needs a data file; set VUMPIT_DATA_PATH or --data");
    };
    let mut store = DataStore::open(path)?;
    let has_records = !store.users().is_empty() || !store.students().is_empty();
    if has_records && !force {
        bail!(
            "{} already holds records; pass --force to replace them",
            path.display()
        );
    }
    store.seed_demo_data()?;
    println!(
        "Seeded {} accounts, {} students and {} classes into {}",
        store.users().len(),
        store.students().len(),
        store.classes().len(),
        path.display()
    );
    Ok(())
}
