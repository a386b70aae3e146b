// ABOUTME: Circuit breaker guarding the Raspberry Pi sensor endpoint
// ABOUTME: Stops hammering an unreachable device and probes again after a cool-down
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::sensor::SensorError;

/// Breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Requests go through and failures are counted
    Closed,
    /// Requests are skipped until the cool-down elapses
    Open,
    /// One trial request is in flight
    HalfOpen,
}

impl BreakerState {
    const fn from_raw(value: u32) -> Self {
        match value {
            0 => Self::Closed,
            1 => Self::Open,
            _ => Self::HalfOpen,
        }
    }

    const fn raw(self) -> u32 {
        match self {
            Self::Closed => 0,
            Self::Open => 1,
            Self::HalfOpen => 2,
        }
    }
}

/// Thresholds for one sensor endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerConfig {
    /// Consecutive failed requests that open the breaker
    pub failure_threshold: u32,
    /// Wait before a trial request
    pub cool_down: Duration,
    /// Trial successes needed to close again
    pub success_threshold: u32,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self::local_device()
    }
}

impl BreakerConfig {
    /// Custom thresholds
    #[must_use]
    pub const fn new(failure_threshold: u32, cool_down: Duration, success_threshold: u32) -> Self {
        Self {
            failure_threshold,
            cool_down,
            success_threshold,
        }
    }

    /// Device on the same LAN polled every few hundred milliseconds
    #[must_use]
    pub const fn local_device() -> Self {
        Self::new(5, Duration::from_secs(2), 1)
    }

    /// Flaky Wi-Fi link; trips sooner and waits longer
    #[must_use]
    pub const fn flaky_link() -> Self {
        Self::new(3, Duration::from_secs(5), 2)
    }
}

/// Lock-free breaker shared between the polling task and its owner
#[derive(Debug)]
pub struct SensorBreaker {
    endpoint: String,
    state: AtomicU32,
    failures: AtomicU32,
    trial_successes: AtomicU32,
    opened_at_ms: AtomicU64,
    config: BreakerConfig,
    epoch: Instant,
}

impl SensorBreaker {
    /// Breaker for an endpoint
    #[must_use]
    pub fn new(endpoint: &str, config: BreakerConfig) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            state: AtomicU32::new(BreakerState::Closed.raw()),
            failures: AtomicU32::new(0),
            trial_successes: AtomicU32::new(0),
            opened_at_ms: AtomicU64::new(0),
            config,
            epoch: Instant::now(),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> BreakerState {
        BreakerState::from_raw(self.state.load(Ordering::SeqCst))
    }

    /// Consecutive failures seen while closed
    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }

    /// Check whether a request may be sent now
    ///
    /// # Errors
    ///
    /// Returns `SensorError::CircuitOpen` while the breaker is open or a
    /// trial request is already outstanding
    pub fn guard(&self) -> Result<(), SensorError> {
        let allowed = match self.state() {
            BreakerState::Closed => true,
            BreakerState::Open => self.try_half_open(),
            BreakerState::HalfOpen => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(SensorError::CircuitOpen {
                endpoint: self.endpoint.clone(),
                retry_after_secs: self.secs_until_trial(),
            })
        }
    }

    /// Feed a request outcome back; only connectivity failures count
    pub fn observe<T>(&self, outcome: &Result<T, SensorError>) {
        match outcome {
            Ok(_) => self.record_success(),
            Err(err) if err.is_connectivity_failure() => self.record_failure(),
            Err(_) => {}
        }
    }

    /// Record a successful request
    pub fn record_success(&self) {
        match self.state() {
            BreakerState::Closed => self.failures.store(0, Ordering::SeqCst),
            BreakerState::HalfOpen => {
                let successes = self.trial_successes.fetch_add(1, Ordering::SeqCst) + 1;
                if successes >= self.config.success_threshold {
                    self.close();
                    info!(endpoint = %self.endpoint, "sensor endpoint recovered");
                } else {
                    // back to Open; try_half_open lets the next trial through at once
                    self.state.store(BreakerState::Open.raw(), Ordering::SeqCst);
                }
            }
            BreakerState::Open => {}
        }
    }

    /// Record a failed request
    pub fn record_failure(&self) {
        match self.state() {
            BreakerState::Closed => {
                let failures = self.failures.fetch_add(1, Ordering::SeqCst) + 1;
                if failures >= self.config.failure_threshold {
                    self.open();
                    warn!(
                        endpoint = %self.endpoint,
                        failures,
                        cool_down_ms = self.config.cool_down.as_millis(),
                        "sensor endpoint unreachable, pausing requests"
                    );
                }
            }
            BreakerState::HalfOpen => {
                self.trial_successes.store(0, Ordering::SeqCst);
                self.open();
                warn!(endpoint = %self.endpoint, "sensor endpoint still unreachable");
            }
            BreakerState::Open => self.opened_at_ms.store(self.now_ms(), Ordering::SeqCst),
        }
    }

    /// Force the breaker closed, e.g. when a new measurement run starts
    pub fn reset(&self) {
        self.close();
    }

    fn open(&self) {
        self.state.store(BreakerState::Open.raw(), Ordering::SeqCst);
        self.opened_at_ms.store(self.now_ms(), Ordering::SeqCst);
    }

    fn close(&self) {
        self.state.store(BreakerState::Closed.raw(), Ordering::SeqCst);
        self.failures.store(0, Ordering::SeqCst);
        self.trial_successes.store(0, Ordering::SeqCst);
    }

    fn try_half_open(&self) -> bool {
        let since_open = self
            .now_ms()
            .saturating_sub(self.opened_at_ms.load(Ordering::SeqCst));
        let mid_trial = self.trial_successes.load(Ordering::SeqCst) > 0;
        if since_open < self.cool_down_ms() && !mid_trial {
            return false;
        }
        self.state
            .compare_exchange(
                BreakerState::Open.raw(),
                BreakerState::HalfOpen.raw(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
    }

    fn secs_until_trial(&self) -> u64 {
        let since_open = self
            .now_ms()
            .saturating_sub(self.opened_at_ms.load(Ordering::SeqCst));
        self.cool_down_ms().saturating_sub(since_open).div_ceil(1000)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cool_down_ms(&self) -> u64 {
        self.config.cool_down.as_millis() as u64
    }

    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}
