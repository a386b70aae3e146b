// ABOUTME: Measure command: runs one wizard session against the configured sensor
// ABOUTME: Answers wizard events automatically or from keyboard input on stdin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use crate::helpers::display;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use vumpit::auth::authenticate;
use vumpit::config::{AppConfig, SensorConfig, SensorMode, WizardConfig};
use vumpit::models::UserRole;
use vumpit::runtime::{autopilot, RunnerMessage, WizardRunner};
use vumpit::storage::DataStore;
use vumpit::wizard::{MeasurementWizard, WizardAction, WizardEvent};
use vumpit_intelligence::RatingEngine;
use vumpit_providers::{SensorSource, SimulatedSensorSource};

/// Reconnect attempts before an unattended run gives up
const AUTO_RESUME_ATTEMPTS: u32 = 3;
const AUTO_RESUME_DELAY: Duration = Duration::from_secs(1);

pub struct MeasureOptions {
    pub interactive: bool,
    pub skip_jump: bool,
    pub quick: bool,
}

fn build_source(sensor: &SensorConfig, wizard: &WizardConfig) -> Result<Box<dyn SensorSource>> {
    match sensor.mode {
        SensorMode::Simulated => Ok(Box::new(
            sensor
                .seed
                .map_or_else(SimulatedSensorSource::new, SimulatedSensorSource::with_seed),
        )),
        SensorMode::Http => http_source(sensor, wizard),
    }
}

#[cfg(feature = "sensor-http")]
fn http_source(sensor: &SensorConfig, wizard: &WizardConfig) -> Result<Box<dyn SensorSource>> {
    use vumpit_providers::http_client::configure_sensor_client;
    use vumpit_providers::{HttpSensorConfig, PolledHttpSensorSource};

    if !configure_sensor_client(sensor.http_timeout) {
        warn!("sensor HTTP client already configured, keeping its timeout");
    }
    Ok(Box::new(PolledHttpSensorSource::new(HttpSensorConfig {
        endpoint: sensor.endpoint.clone(),
        poll_interval: wizard.poll_interval,
        stale_after: sensor.stale_after,
        ..HttpSensorConfig::default()
    })))
}

#[cfg(not(feature = "sensor-http"))]
fn http_source(_sensor: &SensorConfig, _wizard: &WizardConfig) -> Result<Box<dyn SensorSource>> {
    anyhow::bail!("this build has no HTTP sensor support; rebuild with the sensor-http feature")
}

fn parse_action(line: &str) -> Option<WizardAction> {
    let action = match line.trim().to_lowercase().as_str() {
        "c" | "continue" | "" => WizardAction::Continue,
        "r" | "restart" => WizardAction::Restart,
        "s" | "skip" => WizardAction::SkipJump,
        "j" | "jump" => WizardAction::ProceedToJump,
        "v" | "video" => WizardAction::PlayVideo,
        "n" | "next" => WizardAction::SkipVideo,
        "a" | "again" => WizardAction::AnotherTrial,
        "f" | "finish" => WizardAction::Finish,
        "resume" => WizardAction::Resume,
        "x" | "cancel" => WizardAction::RequestCancel,
        "y" | "yes" => WizardAction::ConfirmCancel,
        "no" => WizardAction::DismissCancel,
        _ => return None,
    };
    Some(action)
}

/// Keyboard lines from a dedicated thread; blocking stdin reads never hold up runtime shutdown
fn spawn_keyboard() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Answer events until the runner closes its outbox
async fn operate(
    mut inbox: mpsc::UnboundedReceiver<RunnerMessage>,
    actions: mpsc::Sender<WizardAction>,
    options: &MeasureOptions,
) {
    let mut keyboard = if options.interactive {
        spawn_keyboard()
    } else {
        mpsc::unbounded_channel().1
    };
    let mut resume_attempts = 0;

    loop {
        tokio::select! {
            message = inbox.recv() => {
                let Some(message) = message else { break };
                display::runner_message(&message);
                if options.interactive {
                    continue;
                }
                let reply = match &message {
                    RunnerMessage::Event(WizardEvent::DeviceDisconnected { .. }) => {
                        if resume_attempts < AUTO_RESUME_ATTEMPTS {
                            resume_attempts += 1;
                            tokio::time::sleep(AUTO_RESUME_DELAY).await;
                            Some(WizardAction::Resume)
                        } else {
                            warn!("sensor did not come back, cancelling the run");
                            Some(WizardAction::ConfirmCancel)
                        }
                    }
                    RunnerMessage::Event(event) => autopilot(event, options.skip_jump),
                    RunnerMessage::Rejected { .. } => None,
                };
                if let Some(action) = reply {
                    if actions.send(action).await.is_err() {
                        break;
                    }
                }
            }
            line = keyboard.recv(), if options.interactive => {
                let Some(line) = line else { break };
                match parse_action(&line) {
                    Some(action) => {
                        if actions.send(action).await.is_err() {
                            break;
                        }
                    }
                    None => display::key_help(),
                }
            }
        }
    }
}

pub async fn run(
    config: &AppConfig,
    store: &mut DataStore,
    user_id: &str,
    password: &str,
    options: &MeasureOptions,
) -> Result<()> {
    let login = authenticate(store, user_id, password)?;
    login.require_role(&[UserRole::Student, UserRole::Athlete])?;

    let timings = if options.quick {
        WizardConfig::quick()
    } else {
        config.wizard
    };
    let source = build_source(&config.sensor, &timings)?;
    info!(source = source.name(), athlete_id = %login.user.id, "starting measurement");

    let wizard = MeasurementWizard::new(source, &mut *store, timings)
        .with_engine(RatingEngine::new(config.thresholds));
    let mut runner = WizardRunner::new(wizard);

    let (action_tx, action_rx) = mpsc::channel(16);
    let (message_tx, message_rx) = mpsc::unbounded_channel();
    if options.interactive {
        display::key_help();
    }

    let (outcome, ()) = tokio::join!(
        runner.run(&login.user, action_rx, message_tx),
        operate(message_rx, action_tx, options),
    );
    let outcome = outcome?;
    display::run_outcome(&outcome);
    Ok(())
}
