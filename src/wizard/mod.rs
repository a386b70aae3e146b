// ABOUTME: Measurement wizard: states, actions, events, timers and the state machine
// ABOUTME: Guides one athlete through weight, height, BMI and the vertical jump test
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Measurement Wizard
//!
//! The wizard is a synchronous state machine over a caller-owned
//! [`WizardSession`]. Time is passed in explicitly, so tests can drive a run
//! to completion without sleeping; [`crate::runtime::WizardRunner`] feeds it
//! real time on a tokio runtime.

/// Events emitted to the UI and errors for rejected actions
pub mod events;
/// The state machine
pub mod machine;
/// Per-run session state and the measurement draft
pub mod session;
/// Wizard steps and user actions
pub mod state;
/// Cancellable one-shot and repeating timers
pub mod timers;

pub use events::{WizardError, WizardEvent, WizardResult};
pub use machine::MeasurementWizard;
pub use session::{MeasurementDraft, WizardSession};
pub use state::{WizardAction, WizardState};
pub use timers::{FiredTimer, TimerKind, TimerQueue, TimerToken};
