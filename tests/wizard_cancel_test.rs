// ABOUTME: Integration tests for cancelling runs and recovering from sensor disconnects
// ABOUTME: Checks that abandoned runs never touch the profile and that resume re-runs the step
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{ms, short_config, sign_in, wizard_with, Driver, FixedSensor};
use vumpit::storage::ProfileStore;
use vumpit::wizard::{WizardAction, WizardError, WizardEvent, WizardState};
use vumpit_providers::SensorChannel;

fn step(state: WizardState) -> WizardEvent {
    WizardEvent::StepEntered { state }
}

fn cancelled() -> Vec<WizardEvent> {
    vec![WizardEvent::Cancelled, step(WizardState::Idle)]
}

fn short_driver() -> Driver<vumpit::storage::DataStore> {
    Driver::new(wizard_with(FixedSensor::athlete(), short_config()))
}

#[test]
fn test_request_dismiss_then_confirm_leaves_profile_untouched() {
    let mut driver = short_driver();
    let user = sign_in(driver.wizard.store(), "STU001");
    let before = driver.wizard.store().get_profile("STU001").unwrap();
    driver.run_to_bmi(&user);

    assert_eq!(
        driver.act(WizardAction::RequestCancel),
        vec![WizardEvent::CancelRequested]
    );
    assert!(driver.session.is_cancel_pending());
    assert_eq!(
        driver.try_act(WizardAction::SkipJump).unwrap_err(),
        WizardError::ActionNotAllowed {
            action: "skip_jump",
            state: WizardState::BmiComputed
        }
    );
    // Asking twice changes nothing
    assert!(driver.act(WizardAction::RequestCancel).is_empty());

    assert_eq!(
        driver.act(WizardAction::DismissCancel),
        vec![WizardEvent::CancelDismissed]
    );
    assert!(!driver.session.is_cancel_pending());
    assert_eq!(driver.session.state(), WizardState::BmiComputed);

    driver.act(WizardAction::RequestCancel);
    assert_eq!(driver.act(WizardAction::ConfirmCancel), cancelled());
    assert_eq!(driver.session.state(), WizardState::Idle);
    assert_eq!(driver.session.pending_timers(), 0);
    assert_eq!(driver.session.draft().bmi, None);
    assert_eq!(driver.sensor().releases, 1);
    assert_eq!(driver.wizard.store().get_profile("STU001").unwrap(), before);
}

#[test]
fn test_sampling_continues_while_the_prompt_is_open() {
    let mut driver = short_driver();
    let user = sign_in(driver.wizard.store(), "STU001");
    driver.start(&user);
    driver.advance(ms(200));
    driver.act(WizardAction::RequestCancel);

    assert_eq!(
        driver.advance(ms(100)),
        vec![WizardEvent::ReadingReady {
            channel: SensorChannel::Weight,
            value: 70.0
        }]
    );
    driver.act(WizardAction::DismissCancel);
    assert_eq!(
        driver.act(WizardAction::Continue),
        vec![step(WizardState::WearableCheck)]
    );
}

#[test]
fn test_confirm_without_prompt_cancels_the_countdown() {
    let mut driver = short_driver();
    let user = sign_in(driver.wizard.store(), "STU001");
    driver.run_to_bmi(&user);
    driver.run_to_countdown();
    assert_eq!(driver.session.state(), WizardState::JumpCountdown);

    assert_eq!(driver.act(WizardAction::ConfirmCancel), cancelled());
    assert!(driver.advance(ms(5_000)).is_empty());
    assert_eq!(driver.session.countdown_remaining(), 0);
    assert_eq!(
        driver.wizard.store().get_profile("STU001").unwrap().unwrap().bmi_history.len(),
        1
    );
}

#[test]
fn test_cancellation_is_a_no_op_without_a_run() {
    let mut driver = short_driver();
    for action in [
        WizardAction::RequestCancel,
        WizardAction::ConfirmCancel,
        WizardAction::DismissCancel,
    ] {
        assert!(driver.act(action).is_empty());
    }
    assert!(!driver.session.is_cancel_pending());
    assert_eq!(driver.session.state(), WizardState::Idle);
    assert_eq!(driver.sensor().releases, 0);
}

#[test]
fn test_disconnect_while_sampling_blocks_until_resume() {
    let mut driver = short_driver();
    let user = sign_in(driver.wizard.store(), "STU001");
    driver.start(&user);
    driver.advance(ms(300));
    driver.act(WizardAction::Continue);
    driver.act(WizardAction::Continue);
    driver.advance(ms(100));
    assert_eq!(driver.session.samples_collected(), 1);

    driver.sensor().connected = false;
    assert_eq!(
        driver.advance(ms(100)),
        vec![WizardEvent::DeviceDisconnected {
            state: WizardState::MeasuringHeight
        }]
    );
    assert!(driver.session.is_blocked());
    assert_eq!(driver.session.pending_timers(), 0);
    assert_eq!(driver.session.samples_collected(), 0);
    assert_eq!(driver.session.draft().height, None);
    assert_eq!(driver.session.draft().weight, Some(70.0));

    assert_eq!(
        driver.try_act(WizardAction::Continue).unwrap_err(),
        WizardError::DeviceDisconnected {
            state: WizardState::MeasuringHeight
        }
    );
    // Nothing runs in the background while blocked
    let polls = driver.sensor().polls;
    assert!(driver.advance(ms(5_000)).is_empty());
    assert_eq!(driver.sensor().polls, polls);

    // Still unplugged
    assert_eq!(
        driver.act(WizardAction::Resume),
        vec![WizardEvent::DeviceDisconnected {
            state: WizardState::MeasuringHeight
        }]
    );
    assert!(driver.session.is_blocked());

    driver.sensor().connected = true;
    assert_eq!(
        driver.act(WizardAction::Resume),
        vec![
            WizardEvent::DeviceReconnected,
            step(WizardState::MeasuringHeight)
        ]
    );
    assert!(!driver.session.is_blocked());
    assert_eq!(
        driver.advance(ms(300)),
        vec![WizardEvent::ReadingReady {
            channel: SensorChannel::Height,
            value: 175.0
        }]
    );
}

#[test]
fn test_wearable_check_fails_when_the_sensor_is_missing() {
    let mut driver = short_driver();
    let user = sign_in(driver.wizard.store(), "STU001");
    driver.start(&user);
    driver.advance(ms(300));
    driver.act(WizardAction::Continue);
    assert_eq!(driver.session.state(), WizardState::WearableCheck);

    driver.sensor().connected = false;
    assert_eq!(
        driver.act(WizardAction::Continue),
        vec![WizardEvent::DeviceDisconnected {
            state: WizardState::WearableCheck
        }]
    );
    assert_eq!(driver.session.state(), WizardState::WearableCheck);

    driver.sensor().connected = true;
    assert_eq!(
        driver.act(WizardAction::Resume),
        vec![
            WizardEvent::DeviceReconnected,
            step(WizardState::MeasuringHeight)
        ]
    );
}

#[test]
fn test_connectivity_probe_catches_a_disconnect_between_steps() {
    let mut driver = short_driver();
    let user = sign_in(driver.wizard.store(), "STU001");
    driver.run_to_bmi(&user);
    let probes = driver.sensor().probes;

    driver.sensor().connected = false;
    assert_eq!(
        driver.advance(ms(2_000)),
        vec![WizardEvent::DeviceDisconnected {
            state: WizardState::BmiComputed
        }]
    );
    assert_eq!(driver.sensor().probes, probes + 1);
    assert!(driver.session.draft().bmi.is_some());
    assert_eq!(
        driver.try_act(WizardAction::SkipJump).unwrap_err(),
        WizardError::DeviceDisconnected {
            state: WizardState::BmiComputed
        }
    );

    driver.sensor().connected = true;
    assert_eq!(
        driver.act(WizardAction::Resume),
        vec![WizardEvent::DeviceReconnected]
    );
    assert_eq!(driver.session.pending_timers(), 1);

    let events = driver.act(WizardAction::SkipJump);
    assert!(matches!(events[0], WizardEvent::Committed { .. }));
}

#[test]
fn test_disconnect_in_the_jump_window_restarts_the_countdown() {
    let mut driver = short_driver();
    let user = sign_in(driver.wizard.store(), "STU001");
    driver.run_to_bmi(&user);
    driver.run_to_countdown();
    driver.advance(ms(2_000));
    assert_eq!(driver.session.state(), WizardState::JumpMeasuring);

    driver.sensor().connected = false;
    assert_eq!(
        driver.advance(ms(100)),
        vec![WizardEvent::DeviceDisconnected {
            state: WizardState::JumpMeasuring
        }]
    );
    assert_eq!(driver.session.draft().jump_reach, None);
    assert_eq!(driver.session.draft().standing_reach, Some(220.0));

    driver.sensor().connected = true;
    assert_eq!(
        driver.act(WizardAction::Resume),
        vec![
            WizardEvent::DeviceReconnected,
            step(WizardState::JumpCountdown),
            WizardEvent::CountdownTick { remaining: 2 }
        ]
    );
    driver.advance(ms(2_000));
    let events = driver.advance(ms(1_000));
    assert!(matches!(
        events[0],
        WizardEvent::JumpComputed { trial: 1, .. }
    ));
}

#[test]
fn test_cancel_while_blocked() {
    let mut driver = short_driver();
    let user = sign_in(driver.wizard.store(), "STU001");
    driver.start(&user);
    driver.sensor().connected = false;
    driver.advance(ms(100));
    assert!(driver.session.is_blocked());

    assert_eq!(
        driver.act(WizardAction::RequestCancel),
        vec![WizardEvent::CancelRequested]
    );
    // The prompt takes precedence over resuming
    assert!(matches!(
        driver.try_act(WizardAction::Resume),
        Err(WizardError::ActionNotAllowed {
            action: "resume",
            ..
        })
    ));
    assert_eq!(driver.act(WizardAction::ConfirmCancel), cancelled());
    assert!(!driver.session.is_blocked());
    assert_eq!(driver.session.athlete_id(), None);

    // A fresh run can start once the device is back
    driver.sensor().connected = true;
    assert_eq!(driver.start(&user), vec![step(WizardState::Weighing)]);
}
