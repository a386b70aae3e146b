// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Quiet logging, a deterministic sensor, demo stores and wizard drivers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `vumpit`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::collections::VecDeque;
use std::sync::Once;
use std::time::Duration;
use vumpit::auth::{authenticate, CurrentUser};
use vumpit::config::WizardConfig;
use vumpit::storage::demo::STUDENT_PASSWORD;
use vumpit::storage::{DataStore, ProfileStore};
use vumpit::wizard::{MeasurementWizard, WizardAction, WizardEvent, WizardSession};
use vumpit_providers::{SensorChannel, SensorSample, SensorSource};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG picks the level; quiet by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Milliseconds as a wizard clock offset
pub const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Sensor returning one fixed value per channel, with switchable connectivity
#[derive(Debug, Clone)]
pub struct FixedSensor {
    pub weight: f64,
    pub height: f64,
    pub standing_reach: f64,
    pub jump_peak: f64,
    pub connected: bool,
    /// Served before the fixed values; `None` entries read as a lost device
    pub overrides: VecDeque<Option<SensorSample>>,
    pub armed: Vec<SensorChannel>,
    pub polls: usize,
    pub probes: usize,
    pub releases: usize,
    current: Option<SensorChannel>,
}

impl FixedSensor {
    pub fn new(weight: f64, height: f64, standing_reach: f64, jump_peak: f64) -> Self {
        Self {
            weight,
            height,
            standing_reach,
            jump_peak,
            connected: true,
            overrides: VecDeque::new(),
            armed: Vec::new(),
            polls: 0,
            probes: 0,
            releases: 0,
            current: None,
        }
    }

    /// 70 kg, 175 cm, 220 cm reach, 270 cm peak: BMI 22.86, a 50 cm jump
    pub fn athlete() -> Self {
        Self::new(70.0, 175.0, 220.0, 270.0)
    }
}

impl SensorSource for FixedSensor {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn arm(&mut self, channel: SensorChannel) {
        self.armed.push(channel);
        self.current = Some(channel);
    }

    fn poll(&mut self) -> Option<SensorSample> {
        self.polls += 1;
        if !self.connected {
            return None;
        }
        if let Some(next) = self.overrides.pop_front() {
            return next;
        }
        Some(match self.current? {
            SensorChannel::Weight => SensorSample::weight(self.weight),
            SensorChannel::Height => SensorSample::position(self.height),
            SensorChannel::StandingReach => SensorSample::position(self.standing_reach),
            SensorChannel::Jump => SensorSample::position(self.jump_peak),
        })
    }

    fn probe(&mut self) -> bool {
        self.probes += 1;
        self.connected
    }

    fn release(&mut self) {
        self.releases += 1;
        self.current = None;
    }
}

/// Demo store with STU001 (male, one snapshot) and STU002 (female, one snapshot)
pub fn demo_store() -> DataStore {
    init_test_logging();
    DataStore::with_demo_data()
}

/// Signed-in demo student
pub fn sign_in(store: &DataStore, id: &str) -> CurrentUser {
    authenticate(store, id, STUDENT_PASSWORD).unwrap().user
}

/// Wizard over a demo store with a fixed clock date
pub fn wizard_with(
    sensor: FixedSensor,
    config: WizardConfig,
) -> MeasurementWizard<FixedSensor, DataStore> {
    MeasurementWizard::new(sensor, demo_store(), config)
        .with_fixed_date(chrono::NaiveDate::from_ymd_opt(2025, 11, 3).unwrap())
}

/// Three samples per reading, 100 ms polls, a 2 s countdown and a 1 s window
pub const fn short_config() -> WizardConfig {
    WizardConfig {
        samples_per_reading: 3,
        poll_interval: Duration::from_millis(100),
        connectivity_check_interval: Duration::from_millis(2_000),
        countdown_secs: 2,
        jump_window: Duration::from_millis(1_000),
    }
}

/// Drives a session with a moving clock
pub struct Driver<P: ProfileStore> {
    pub wizard: MeasurementWizard<FixedSensor, P>,
    pub session: WizardSession,
    pub now: Duration,
    pub events: Vec<WizardEvent>,
}

impl<P: ProfileStore> Driver<P> {
    pub fn new(wizard: MeasurementWizard<FixedSensor, P>) -> Self {
        init_test_logging();
        Self {
            wizard,
            session: WizardSession::new(),
            now: Duration::ZERO,
            events: Vec::new(),
        }
    }

    pub fn start(&mut self, user: &CurrentUser) -> Vec<WizardEvent> {
        let events = self
            .wizard
            .start(&mut self.session, Some(user), self.now)
            .unwrap();
        self.events.extend(events.clone());
        events
    }

    /// Apply an action that must be accepted
    pub fn act(&mut self, action: WizardAction) -> Vec<WizardEvent> {
        let events = self
            .wizard
            .handle(&mut self.session, action, self.now)
            .unwrap();
        self.events.extend(events.clone());
        events
    }

    /// Apply an action and return the raw result
    pub fn try_act(&mut self, action: WizardAction) -> vumpit::wizard::WizardResult {
        self.wizard.handle(&mut self.session, action, self.now)
    }

    /// Move the clock forward and fire due timers
    pub fn advance(&mut self, by: Duration) -> Vec<WizardEvent> {
        self.now += by;
        let events = self.wizard.tick(&mut self.session, self.now);
        self.events.extend(events.clone());
        events
    }

    /// With `short_config`: sign in to `BmiComputed`, leaving the clock at 600 ms
    pub fn run_to_bmi(&mut self, user: &CurrentUser) {
        self.start(user);
        self.advance(ms(300));
        self.act(WizardAction::Continue);
        self.act(WizardAction::Continue);
        self.advance(ms(300));
        self.act(WizardAction::Continue);
    }

    /// With `short_config`: `BmiComputed` to a fresh countdown, leaving the clock at 900 ms
    pub fn run_to_countdown(&mut self) {
        self.act(WizardAction::ProceedToJump);
        self.advance(ms(300));
        self.act(WizardAction::Continue);
        self.act(WizardAction::SkipVideo);
    }

    pub fn sensor(&mut self) -> &mut FixedSensor {
        self.wizard.source_mut()
    }
}
