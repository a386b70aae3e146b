// ABOUTME: Caller-owned state of one measurement run
// ABOUTME: Current step, the in-progress draft, sampling buffers and pending timers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use super::state::WizardState;
use super::timers::TimerQueue;
use chrono::NaiveDate;
use vumpit_core::models::{BmiRating, Gender, JumpMeasurement, JumpRating, MeasurementSnapshot};
use vumpit_providers::SensorChannel;

/// Values collected so far in the current run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasurementDraft {
    /// Averaged weight (kg)
    pub weight: Option<f64>,
    /// Averaged height (cm)
    pub height: Option<f64>,
    /// BMI, set together with `bmi_rating`
    pub bmi: Option<f64>,
    /// BMI category
    pub bmi_rating: Option<BmiRating>,
    /// Averaged standing reach (cm)
    pub standing_reach: Option<f64>,
    /// Peak reach of the latest trial (cm)
    pub jump_reach: Option<f64>,
    /// Vertical jump of the latest trial (cm)
    pub vertical_jump: Option<f64>,
    /// Rating of the latest trial
    pub jump_rating: Option<JumpRating>,
}

impl MeasurementDraft {
    pub(crate) fn set_reading(&mut self, channel: SensorChannel, value: Option<f64>) {
        match channel {
            SensorChannel::Weight => self.weight = value,
            SensorChannel::Height => self.height = value,
            SensorChannel::StandingReach => self.standing_reach = value,
            SensorChannel::Jump => self.jump_reach = value,
        }
    }

    pub(crate) fn clear_jump(&mut self) {
        self.jump_reach = None;
        self.vertical_jump = None;
        self.jump_rating = None;
    }

    /// Latest jump trial, when one completed
    #[must_use]
    pub fn jump(&self) -> Option<JumpMeasurement> {
        Some(JumpMeasurement {
            standing_reach: self.standing_reach?,
            jump_reach: self.jump_reach?,
            vertical_jump: self.vertical_jump?,
            jump_rating: self.jump_rating?,
        })
    }

    /// Snapshot of the run; `None` until every BMI field is set
    #[must_use]
    pub fn snapshot(&self, date: NaiveDate, include_jump: bool) -> Option<MeasurementSnapshot> {
        Some(MeasurementSnapshot {
            date,
            weight: self.weight?,
            height: self.height?,
            bmi: self.bmi?,
            bmi_rating: self.bmi_rating?,
            jump: if include_jump { self.jump() } else { None },
        })
    }
}

/// Accumulator for the step currently reading the sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sampling {
    pub channel: SensorChannel,
    pub sum: f64,
    pub count: usize,
    pub peak: Option<f64>,
}

impl Sampling {
    pub const fn new(channel: SensorChannel) -> Self {
        Self {
            channel,
            sum: 0.0,
            count: 0,
            peak: None,
        }
    }

    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.peak = Some(self.peak.map_or(value, |peak| peak.max(value)));
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Everything one run needs between calls; owned by the caller
#[derive(Debug, Clone)]
pub struct WizardSession {
    pub(crate) state: WizardState,
    pub(crate) athlete_id: Option<String>,
    pub(crate) gender: Gender,
    pub(crate) date: Option<NaiveDate>,
    pub(crate) draft: MeasurementDraft,
    pub(crate) sampling: Option<Sampling>,
    pub(crate) reading_ready: bool,
    pub(crate) blocked: bool,
    pub(crate) cancel_pending: bool,
    pub(crate) countdown_remaining: u32,
    pub(crate) trials: u32,
    pub(crate) discarded_samples: usize,
    pub(crate) timers: TimerQueue,
    pub(crate) last_committed: Option<MeasurementSnapshot>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    /// Idle session
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: WizardState::Idle,
            athlete_id: None,
            gender: Gender::Female,
            date: None,
            draft: MeasurementDraft::default(),
            sampling: None,
            reading_ready: false,
            blocked: false,
            cancel_pending: false,
            countdown_remaining: 0,
            trials: 0,
            discarded_samples: 0,
            timers: TimerQueue::new(),
            last_committed: None,
        }
    }

    /// Current step
    #[must_use]
    pub const fn state(&self) -> WizardState {
        self.state
    }

    /// Athlete being measured
    #[must_use]
    pub fn athlete_id(&self) -> Option<&str> {
        self.athlete_id.as_deref()
    }

    /// Date stamped when the run started
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Values collected so far
    #[must_use]
    pub const fn draft(&self) -> &MeasurementDraft {
        &self.draft
    }

    /// Whether the current sampling step has its reading
    #[must_use]
    pub const fn is_reading_ready(&self) -> bool {
        self.reading_ready
    }

    /// Valid samples collected in the current step
    #[must_use]
    pub fn samples_collected(&self) -> usize {
        self.sampling.map_or(0, |sampling| sampling.count)
    }

    /// Whether the run waits for the device to come back
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Whether a cancel confirmation is showing
    #[must_use]
    pub const fn is_cancel_pending(&self) -> bool {
        self.cancel_pending
    }

    /// Seconds left on the jump countdown
    #[must_use]
    pub const fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    /// Jump trials completed in this run
    #[must_use]
    pub const fn jump_trials(&self) -> u32 {
        self.trials
    }

    /// Samples dropped as unusable in this run
    #[must_use]
    pub const fn discarded_samples(&self) -> usize {
        self.discarded_samples
    }

    /// Timers still pending
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest pending timer
    #[must_use]
    pub fn next_timer_due(&self) -> Option<std::time::Duration> {
        self.timers.next_due()
    }

    /// Snapshot saved by the most recent committed run
    #[must_use]
    pub const fn last_committed(&self) -> Option<&MeasurementSnapshot> {
        self.last_committed.as_ref()
    }

    /// Drop everything from the current run; keeps the last committed snapshot
    pub(crate) fn reset(&mut self) {
        let last_committed = self.last_committed.take();
        *self = Self {
            last_committed,
            ..Self::new()
        };
    }
}
