// ABOUTME: Sensor source backed by a Raspberry Pi exposing readings over HTTP
// ABOUTME: A background tokio task polls the endpoint; poll() returns the freshest reading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Polled HTTP Sensor Source
//!
//! The Pi serves its latest reading as JSON, e.g.
//! `{"weight": 72.4, "height": 231.0}`. Position may also arrive as
//! `vertical_position` or `distance`.
//!
//! `arm` starts a background task on the current tokio runtime that fetches
//! the endpoint every poll interval and stores the result with its arrival
//! time. `poll` never blocks: it hands back the stored reading while it is
//! younger than the staleness limit and `None` otherwise, which the wizard
//! reads as a lost device.

use crate::circuit_breaker::{BreakerConfig, SensorBreaker};
use crate::http_client::sensor_client;
use crate::sensor::{SensorChannel, SensorError, SensorSample, SensorSource};
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vumpit_core::constants::{sensor_defaults, wizard_defaults};

/// Settings for one HTTP sensor endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSensorConfig {
    /// URL returning the latest reading
    pub endpoint: String,
    /// Delay between background fetches
    pub poll_interval: Duration,
    /// Age after which a stored reading counts as lost
    pub stale_after: Duration,
    /// Breaker thresholds
    pub breaker: BreakerConfig,
}

impl Default for HttpSensorConfig {
    fn default() -> Self {
        Self {
            endpoint: sensor_defaults::HTTP_ENDPOINT.to_owned(),
            poll_interval: Duration::from_millis(wizard_defaults::POLL_INTERVAL_MS),
            stale_after: Duration::from_millis(sensor_defaults::STALE_AFTER_MS),
            breaker: BreakerConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawReading {
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default, alias = "vertical_position", alias = "distance")]
    height: Option<f64>,
}

impl From<RawReading> for SensorSample {
    fn from(raw: RawReading) -> Self {
        Self {
            weight: raw.weight,
            vertical_position: raw.height,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct StoredReading {
    sample: SensorSample,
    received_at: Instant,
}

type SharedReading = Arc<Mutex<Option<StoredReading>>>;

/// Sensor source polling a Raspberry Pi endpoint in the background
#[derive(Debug)]
pub struct PolledHttpSensorSource {
    config: HttpSensorConfig,
    latest: SharedReading,
    breaker: Arc<SensorBreaker>,
    poller: Option<JoinHandle<()>>,
}

impl PolledHttpSensorSource {
    /// Source for an endpoint; nothing is fetched until `arm`
    #[must_use]
    pub fn new(config: HttpSensorConfig) -> Self {
        let breaker = Arc::new(SensorBreaker::new(&config.endpoint, config.breaker));
        Self {
            config,
            latest: Arc::new(Mutex::new(None)),
            breaker,
            poller: None,
        }
    }

    /// Endpoint being polled
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Whether the background task is alive
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn ensure_polling(&mut self) {
        if self.is_polling() {
            return;
        }
        let Ok(runtime) = Handle::try_current() else {
            warn!(
                endpoint = %self.config.endpoint,
                "no tokio runtime available, HTTP sensor cannot poll"
            );
            return;
        };
        self.breaker.reset();
        let task = runtime.spawn(poll_loop(
            self.config.clone(),
            Arc::clone(&self.latest),
            Arc::clone(&self.breaker),
        ));
        info!(endpoint = %self.config.endpoint, "HTTP sensor polling started");
        self.poller = Some(task);
    }

    fn fresh_reading(&self) -> Option<SensorSample> {
        let guard = self.latest.lock().ok()?;
        let stored = (*guard)?;
        (stored.received_at.elapsed() <= self.config.stale_after).then_some(stored.sample)
    }
}

impl SensorSource for PolledHttpSensorSource {
    fn name(&self) -> &'static str {
        "raspberry-pi-http"
    }

    fn arm(&mut self, channel: SensorChannel) {
        debug!(%channel, endpoint = %self.config.endpoint, "HTTP sensor armed");
        self.ensure_polling();
    }

    fn poll(&mut self) -> Option<SensorSample> {
        if !self.is_polling() {
            return None;
        }
        self.fresh_reading()
    }

    fn probe(&mut self) -> bool {
        self.ensure_polling();
        self.fresh_reading().is_some()
    }

    fn release(&mut self) {
        if let Some(task) = self.poller.take() {
            task.abort();
            info!(endpoint = %self.config.endpoint, "HTTP sensor polling stopped");
        }
        if let Ok(mut guard) = self.latest.lock() {
            *guard = None;
        }
    }
}

impl Drop for PolledHttpSensorSource {
    fn drop(&mut self) {
        if let Some(task) = self.poller.take() {
            task.abort();
        }
    }
}

async fn poll_loop(config: HttpSensorConfig, latest: SharedReading, breaker: Arc<SensorBreaker>) {
    let mut interval = tokio::time::interval(config.poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        if let Err(err) = breaker.guard() {
            debug!(error = %err, "skipping sensor fetch");
            continue;
        }
        let outcome = fetch_reading(&config.endpoint).await;
        breaker.observe(&outcome);
        match outcome {
            Ok(sample) => {
                if let Ok(mut guard) = latest.lock() {
                    *guard = Some(StoredReading {
                        sample,
                        received_at: Instant::now(),
                    });
                }
            }
            Err(err) => debug!(error = %err, "sensor fetch failed"),
        }
    }
}

/// Fetch one reading from a sensor endpoint
///
/// # Errors
///
/// Returns `SensorError::Unavailable` when the request fails, the device
/// answers with an error status, or the body is not a reading
pub async fn fetch_reading(endpoint: &str) -> Result<SensorSample, SensorError> {
    let unavailable = |reason: String| SensorError::Unavailable {
        source_name: endpoint.to_owned(),
        reason,
    };
    let response = sensor_client()
        .get(endpoint)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| unavailable(e.to_string()))?;
    let raw: RawReading = response
        .json()
        .await
        .map_err(|e| unavailable(format!("malformed reading: {e}")))?;
    Ok(raw.into())
}
