// ABOUTME: Real-time driver for the measurement wizard on a tokio runtime
// ABOUTME: Ticks wizard timers on an interval and applies actions received over a channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Wizard Runtime
//!
//! [`WizardRunner`] owns a wizard and a session and runs one measurement to
//! completion. It needs no `Send` bounds, so the sensor and store may be
//! single-threaded; run it with `block_on` on a current-thread runtime and
//! produce actions from a future joined alongside it.

use crate::auth::CurrentUser;
use crate::storage::ProfileStore;
use crate::wizard::{
    MeasurementWizard, WizardAction, WizardError, WizardEvent, WizardSession, WizardState,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use vumpit_core::models::MeasurementSnapshot;
use vumpit_providers::SensorSource;

/// What the runner reports to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerMessage {
    /// An event from the wizard
    Event(WizardEvent),
    /// An action was refused
    Rejected {
        /// Action name
        action: &'static str,
        /// Why
        error: WizardError,
    },
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// `Committed`, or `Idle` after a cancel or abort
    pub final_state: WizardState,
    /// What was saved, for committed runs
    pub snapshot: Option<MeasurementSnapshot>,
    /// Wall time the run took
    pub elapsed: Duration,
}

impl RunOutcome {
    /// Whether the run saved a snapshot
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.snapshot.is_some()
    }
}

/// Action a hands-off operator takes after `event`
///
/// Accepts every reading, skips the video and finishes after the first jump.
/// Returns `None` for events that need no answer.
#[must_use]
pub fn autopilot(event: &WizardEvent, skip_jump: bool) -> Option<WizardAction> {
    match event {
        WizardEvent::ReadingReady { .. }
        | WizardEvent::StepEntered {
            state: WizardState::WearableCheck,
        } => Some(WizardAction::Continue),
        WizardEvent::BmiComputed { .. } => Some(if skip_jump {
            WizardAction::SkipJump
        } else {
            WizardAction::ProceedToJump
        }),
        WizardEvent::StepEntered {
            state: WizardState::JumpInstruction,
        } => Some(WizardAction::SkipVideo),
        WizardEvent::JumpComputed { .. } => Some(WizardAction::Finish),
        _ => None,
    }
}

/// Runs one measurement against real time
#[derive(Debug)]
pub struct WizardRunner<S, P> {
    wizard: MeasurementWizard<S, P>,
    session: WizardSession,
    clock: Instant,
    tick_every: Duration,
}

impl<S: SensorSource, P: ProfileStore> WizardRunner<S, P> {
    /// Runner ticking once per sensor poll interval
    pub fn new(wizard: MeasurementWizard<S, P>) -> Self {
        let tick_every = wizard.config().poll_interval.max(Duration::from_millis(1));
        Self {
            wizard,
            session: WizardSession::new(),
            clock: Instant::now(),
            tick_every,
        }
    }

    /// Session of the current or last run
    pub const fn session(&self) -> &WizardSession {
        &self.session
    }

    /// The wizard being driven
    pub const fn wizard(&self) -> &MeasurementWizard<S, P> {
        &self.wizard
    }

    /// Give back the wizard
    pub fn into_wizard(self) -> MeasurementWizard<S, P> {
        self.wizard
    }

    fn now(&self) -> Duration {
        self.clock.elapsed()
    }

    fn publish(outbox: &mpsc::UnboundedSender<RunnerMessage>, events: Vec<WizardEvent>) {
        for event in events {
            if outbox.send(RunnerMessage::Event(event)).is_err() {
                debug!("runner outbox closed, dropping events");
                return;
            }
        }
    }

    fn apply(
        &mut self,
        action: WizardAction,
        outbox: &mpsc::UnboundedSender<RunnerMessage>,
    ) {
        let name = action.name();
        let now = self.now();
        match self.wizard.handle(&mut self.session, action, now) {
            Ok(events) => Self::publish(outbox, events),
            Err(error) => {
                warn!(action = name, error = %error, "wizard action rejected");
                // Nobody may be listening; the session state is the record
                let _ = outbox.send(RunnerMessage::Rejected {
                    action: name,
                    error,
                });
            }
        }
    }

    /// Start a run for `user` and drive it until it commits or ends in `Idle`
    ///
    /// Closing the action channel cancels the run.
    ///
    /// # Errors
    ///
    /// Returns the wizard's error when the run cannot start
    pub async fn run(
        &mut self,
        user: &CurrentUser,
        mut actions: mpsc::Receiver<WizardAction>,
        outbox: mpsc::UnboundedSender<RunnerMessage>,
    ) -> Result<RunOutcome, WizardError> {
        let started_at = self.now();
        let events = self.wizard.start(&mut self.session, Some(user), started_at)?;
        Self::publish(&outbox, events);

        let mut ticker = tokio::time::interval(self.tick_every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while self.session.state().is_active() {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = self.now();
                    let events = self.wizard.tick(&mut self.session, now);
                    Self::publish(&outbox, events);
                }
                action = actions.recv() => {
                    if let Some(action) = action {
                        self.apply(action, &outbox);
                    } else {
                        info!("action channel closed, cancelling run");
                        self.apply(WizardAction::ConfirmCancel, &outbox);
                    }
                }
            }
        }

        let final_state = self.session.state();
        let snapshot = (final_state == WizardState::Committed)
            .then(|| self.session.last_committed().cloned())
            .flatten();
        let elapsed = self.now().saturating_sub(started_at);
        info!(
            final_state = %final_state,
            committed = snapshot.is_some(),
            elapsed_ms = elapsed.as_millis() as u64,
            "measurement run finished"
        );
        Ok(RunOutcome {
            final_state,
            snapshot,
            elapsed,
        })
    }
}
