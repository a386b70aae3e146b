// ABOUTME: Seeded simulated sensor source for development and tests
// ABOUTME: Rolls plausible weight, height, reach and jump values per armed channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Simulated Sensor Source
//!
//! Stands in for the scale and the vertical position sensor when no Raspberry
//! Pi is attached. Each `arm` rolls one value for the channel inside its
//! plausible range and every poll repeats it, so averaging N samples gives the
//! rolled value back.
//!
//! Tests script exact poll results with [`SimulatedSensorSource::push_result`]
//! and force connectivity loss with [`SimulatedSensorSource::disconnect`].

use crate::sensor::{SensorChannel, SensorSample, SensorSource};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use tracing::debug;
use vumpit_core::constants::sensor_ranges;

/// Simulated scale and vertical position sensor
#[derive(Debug)]
pub struct SimulatedSensorSource {
    rng: ChaCha8Rng,
    armed: Option<SensorChannel>,
    current: Option<SensorSample>,
    standing_reach: Option<f64>,
    connected: bool,
    scripted: VecDeque<Option<SensorSample>>,
    polls: usize,
}

impl Default for SimulatedSensorSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSensorSource {
    /// Source seeded from OS entropy
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Reproducible source
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            armed: None,
            current: None,
            standing_reach: None,
            connected: true,
            scripted: VecDeque::new(),
            polls: 0,
        }
    }

    /// Queue an exact poll result; scripted results win over rolled values
    pub fn push_result(&mut self, result: Option<SensorSample>) {
        self.scripted.push_back(result);
    }

    /// Queue several scripted results in order
    #[must_use]
    pub fn with_script(mut self, results: impl IntoIterator<Item = Option<SensorSample>>) -> Self {
        self.scripted.extend(results);
        self
    }

    /// Simulate the device dropping off the network
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    /// Bring the device back
    pub fn reconnect(&mut self) {
        self.connected = true;
    }

    /// Whether the simulated device is reachable
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Channel most recently armed
    #[must_use]
    pub const fn armed_channel(&self) -> Option<SensorChannel> {
        self.armed
    }

    /// Number of polls answered so far
    #[must_use]
    pub const fn poll_count(&self) -> usize {
        self.polls
    }

    fn roll_whole(&mut self, range: (f64, f64)) -> f64 {
        self.rng.gen_range(range.0..range.1).round()
    }

    fn roll_sample(&mut self, channel: SensorChannel) -> SensorSample {
        match channel {
            SensorChannel::Weight => {
                let (low, high) = sensor_ranges::WEIGHT_KG;
                let kg = self.rng.gen_range(low..high);
                SensorSample::weight((kg * 10.0).round() / 10.0)
            }
            SensorChannel::Height => SensorSample::position(self.roll_whole(sensor_ranges::HEIGHT_CM)),
            SensorChannel::StandingReach => {
                let reach = self.roll_whole(sensor_ranges::STANDING_REACH_CM);
                self.standing_reach = Some(reach);
                SensorSample::position(reach)
            }
            SensorChannel::Jump => {
                let standing = match self.standing_reach {
                    Some(reach) => reach,
                    None => self.roll_whole(sensor_ranges::STANDING_REACH_CM),
                };
                let delta = self.roll_whole(sensor_ranges::JUMP_DELTA_CM);
                SensorSample::position(standing + delta)
            }
        }
    }
}

impl SensorSource for SimulatedSensorSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn arm(&mut self, channel: SensorChannel) {
        let sample = self.roll_sample(channel);
        debug!(%channel, ?sample, "simulated sensor armed");
        self.armed = Some(channel);
        self.current = Some(sample);
    }

    fn poll(&mut self) -> Option<SensorSample> {
        if !self.connected {
            return None;
        }
        self.polls += 1;
        match self.scripted.pop_front() {
            Some(result) => result,
            None => self.current,
        }
    }

    fn probe(&mut self) -> bool {
        self.connected
    }

    fn release(&mut self) {
        self.armed = None;
        self.current = None;
        self.standing_reach = None;
    }
}
