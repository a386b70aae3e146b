// ABOUTME: Wizard states and the user actions that move between them
// ABOUTME: Encodes which steps sample the sensor and which actions each step accepts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use crate::auth::CurrentUser;
use serde::Serialize;
use std::fmt;
use vumpit_providers::SensorChannel;

/// Steps of one measurement run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardState {
    /// No run in progress
    Idle,
    /// Averaging weight samples
    Weighing,
    /// Waiting for the athlete to put the wearable on
    WearableCheck,
    /// Averaging height samples
    MeasuringHeight,
    /// BMI shown; athlete chooses to jump or stop
    BmiComputed,
    /// Averaging standing reach samples
    StandingReach,
    /// Jump instructions and optional video
    JumpInstruction,
    /// Counting down to the jump window
    JumpCountdown,
    /// Tracking the peak position during the jump window
    JumpMeasuring,
    /// Jump result shown; athlete tries again or finishes
    JumpComputed,
    /// Snapshot persisted
    Committed,
}

impl WizardState {
    /// Snake-case label for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Weighing => "weighing",
            Self::WearableCheck => "wearable_check",
            Self::MeasuringHeight => "measuring_height",
            Self::BmiComputed => "bmi_computed",
            Self::StandingReach => "standing_reach",
            Self::JumpInstruction => "jump_instruction",
            Self::JumpCountdown => "jump_countdown",
            Self::JumpMeasuring => "jump_measuring",
            Self::JumpComputed => "jump_computed",
            Self::Committed => "committed",
        }
    }

    /// Whether a run is live (neither idle nor committed)
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle | Self::Committed)
    }

    /// Channel averaged in this step, for the three sampling steps
    #[must_use]
    pub const fn sampling_channel(self) -> Option<SensorChannel> {
        match self {
            Self::Weighing => Some(SensorChannel::Weight),
            Self::MeasuringHeight => Some(SensorChannel::Height),
            Self::StandingReach => Some(SensorChannel::StandingReach),
            _ => None,
        }
    }

    /// Steps where the periodic connectivity probe runs
    #[must_use]
    pub const fn is_monitored(self) -> bool {
        matches!(
            self,
            Self::MeasuringHeight
                | Self::BmiComputed
                | Self::StandingReach
                | Self::JumpInstruction
                | Self::JumpCountdown
                | Self::JumpMeasuring
                | Self::JumpComputed
        )
    }

    /// Countdown and jump window accept nothing but cancellation
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::JumpCountdown | Self::JumpMeasuring)
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User input to the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Begin a run for the signed-in athlete
    Start(CurrentUser),
    /// Throw away the current step's samples and sample again
    Restart,
    /// Accept the current step and move on
    Continue,
    /// Stop after BMI and save
    SkipJump,
    /// Go on to the jump test
    ProceedToJump,
    /// Show the jump instruction video
    PlayVideo,
    /// Skip the video and start the countdown
    SkipVideo,
    /// Jump again, replacing the last result
    AnotherTrial,
    /// Save the run
    Finish,
    /// Device reconnected; re-run the interrupted step
    Resume,
    /// Ask to abandon the run
    RequestCancel,
    /// Abandon the run
    ConfirmCancel,
    /// Keep going after all
    DismissCancel,
}

impl WizardAction {
    /// Label used in errors and logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start(_) => "start",
            Self::Restart => "restart",
            Self::Continue => "continue",
            Self::SkipJump => "skip_jump",
            Self::ProceedToJump => "proceed_to_jump",
            Self::PlayVideo => "play_video",
            Self::SkipVideo => "skip_video",
            Self::AnotherTrial => "another_trial",
            Self::Finish => "finish",
            Self::Resume => "resume",
            Self::RequestCancel => "request_cancel",
            Self::ConfirmCancel => "confirm_cancel",
            Self::DismissCancel => "dismiss_cancel",
        }
    }

    /// Cancellation actions are accepted in every state
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(
            self,
            Self::RequestCancel | Self::ConfirmCancel | Self::DismissCancel
        )
    }
}
