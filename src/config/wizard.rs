// ABOUTME: Sampling and timer settings for the measurement wizard
// ABOUTME: Defaults mirror the Raspberry Pi station; validate() rejects unusable timings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use std::time::Duration;
use vumpit_core::constants::wizard_defaults;
use vumpit_core::errors::{AppError, AppResult};

/// Wizard timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardConfig {
    /// Valid samples averaged into one weight, height or reach reading
    pub samples_per_reading: usize,
    /// Delay between sensor polls while sampling
    pub poll_interval: Duration,
    /// Delay between connectivity probes once the wearable check passed
    pub connectivity_check_interval: Duration,
    /// Countdown before the jump window opens
    pub countdown_secs: u32,
    /// Peak-detection window
    pub jump_window: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            samples_per_reading: wizard_defaults::SAMPLES_PER_READING,
            poll_interval: Duration::from_millis(wizard_defaults::POLL_INTERVAL_MS),
            connectivity_check_interval: Duration::from_millis(
                wizard_defaults::CONNECTIVITY_CHECK_MS,
            ),
            countdown_secs: wizard_defaults::COUNTDOWN_SECS,
            jump_window: Duration::from_millis(wizard_defaults::JUMP_WINDOW_MS),
        }
    }
}

impl WizardConfig {
    /// Fast settings for tests and demos: 3 samples, 10 ms polls, 1 s countdown
    #[must_use]
    pub const fn quick() -> Self {
        Self {
            samples_per_reading: 3,
            poll_interval: Duration::from_millis(10),
            connectivity_check_interval: Duration::from_millis(500),
            countdown_secs: 1,
            jump_window: Duration::from_millis(100),
        }
    }

    /// Reject settings the wizard cannot run with
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error for zero sample counts, zero intervals,
    /// or a jump window shorter than one poll interval
    pub fn validate(&self) -> AppResult<()> {
        if self.samples_per_reading == 0 {
            return Err(AppError::config("sample count must be at least 1"));
        }
        if self.poll_interval.is_zero() || self.connectivity_check_interval.is_zero() {
            return Err(AppError::config("poll and connectivity intervals must be non-zero"));
        }
        if self.jump_window < self.poll_interval {
            return Err(AppError::config(
                "jump window must cover at least one poll interval",
            ));
        }
        Ok(())
    }
}
