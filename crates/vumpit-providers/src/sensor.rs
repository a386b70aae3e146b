// ABOUTME: Sensor source contract consumed by the measurement wizard
// ABOUTME: SensorSample, SensorChannel, SensorError and the SensorSource trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Sensor Source Contract
//!
//! The wizard only ever sees this trait. `poll` is non-blocking: it returns
//! the last known reading, or `None` when the device cannot be reached, and
//! the wizard treats `None` as a connectivity failure.
//!
//! `arm` and `release` bracket the wizard's use of a source. Hardware-backed
//! sources start and stop their background polling there; the simulated
//! source uses `arm` to roll a fresh value for the step being measured.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Quantity a wizard step reads from the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorChannel {
    /// Body weight (kg) from the scale
    Weight,
    /// Standing height (cm) from the vertical position sensor
    Height,
    /// Standing reach (cm) from the vertical position sensor
    StandingReach,
    /// Peak reach (cm) while jumping
    Jump,
}

impl SensorChannel {
    /// Whether this channel reads the `weight` field
    #[must_use]
    pub const fn reads_weight(self) -> bool {
        matches!(self, Self::Weight)
    }

    /// Lowercase label for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Height => "height",
            Self::StandingReach => "standing_reach",
            Self::Jump => "jump",
        }
    }
}

impl fmt::Display for SensorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw reading; either field may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Weight (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Vertical position (cm) used for height, reach and jump
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_position: Option<f64>,
}

impl SensorSample {
    /// Sample carrying only a weight
    #[must_use]
    pub const fn weight(kg: f64) -> Self {
        Self {
            weight: Some(kg),
            vertical_position: None,
        }
    }

    /// Sample carrying only a vertical position
    #[must_use]
    pub const fn position(cm: f64) -> Self {
        Self {
            weight: None,
            vertical_position: Some(cm),
        }
    }

    /// Extract the value a channel needs
    ///
    /// # Errors
    ///
    /// Returns `SensorError::InvalidReading` when the field is missing,
    /// not finite, or not positive
    pub fn value_for(&self, channel: SensorChannel) -> Result<f64, SensorError> {
        let value = if channel.reads_weight() {
            self.weight
        } else {
            self.vertical_position
        };
        match value {
            Some(v) if v.is_finite() && v > 0.0 => Ok(v),
            Some(v) => Err(SensorError::InvalidReading {
                channel,
                detail: format!("unusable value {v}"),
            }),
            None => Err(SensorError::InvalidReading {
                channel,
                detail: "field missing from sample".to_owned(),
            }),
        }
    }
}

/// Errors raised by sensor sources
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SensorError {
    /// The device or endpoint could not be reached
    #[error("sensor {source_name} unavailable: {reason}")]
    Unavailable {
        /// Source that failed
        source_name: String,
        /// What went wrong
        reason: String,
    },

    /// A sample was present but unusable; it is dropped, never retried
    #[error("invalid {channel} reading: {detail}")]
    InvalidReading {
        /// Channel being read
        channel: SensorChannel,
        /// Why the sample was rejected
        detail: String,
    },

    /// Too many consecutive failures; requests are short-circuited
    #[error("circuit open for {endpoint}, retry in {retry_after_secs}s")]
    CircuitOpen {
        /// Endpoint behind the breaker
        endpoint: String,
        /// Seconds until a recovery attempt
        retry_after_secs: u64,
    },
}

impl SensorError {
    /// Whether this failure should count against the circuit breaker
    #[must_use]
    pub const fn is_connectivity_failure(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Anything that produces raw weight and vertical position readings
pub trait SensorSource {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// A wizard step that reads `channel` is about to start sampling
    fn arm(&mut self, _channel: SensorChannel) {}

    /// Last known reading, or `None` when the device is unreachable
    fn poll(&mut self) -> Option<SensorSample>;

    /// Connectivity probe used by the wearable check and periodic health checks
    fn probe(&mut self) -> bool {
        self.poll().is_some()
    }

    /// Stop any background work; must be idempotent
    fn release(&mut self) {}
}

impl<S: SensorSource + ?Sized> SensorSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn arm(&mut self, channel: SensorChannel) {
        (**self).arm(channel);
    }

    fn poll(&mut self) -> Option<SensorSample> {
        (**self).poll()
    }

    fn probe(&mut self) -> bool {
        (**self).probe()
    }

    fn release(&mut self) {
        (**self).release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_for_picks_channel_field() {
        let sample = SensorSample {
            weight: Some(72.5),
            vertical_position: Some(181.0),
        };
        assert_eq!(sample.value_for(SensorChannel::Weight), Ok(72.5));
        assert_eq!(sample.value_for(SensorChannel::Jump), Ok(181.0));
    }

    #[test]
    fn test_value_for_rejects_unusable_values() {
        assert!(SensorSample::weight(f64::NAN)
            .value_for(SensorChannel::Weight)
            .is_err());
        assert!(SensorSample::weight(-3.0)
            .value_for(SensorChannel::Weight)
            .is_err());
        assert!(SensorSample::weight(70.0)
            .value_for(SensorChannel::Height)
            .is_err());
    }
}
