// ABOUTME: Application constants for sensor ranges, wizard timings and storage keys
// ABOUTME: Single source for the numbers the wizard and simulated sensor agree on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! Constants organized by domain.

/// Simulated sensor ranges (half-open, lower bound inclusive)
pub mod sensor_ranges {
    /// Weight range in kilograms
    pub const WEIGHT_KG: (f64, f64) = (50.0, 80.0);
    /// Standing height range in centimeters
    pub const HEIGHT_CM: (f64, f64) = (160.0, 190.0);
    /// Standing reach range in centimeters
    pub const STANDING_REACH_CM: (f64, f64) = (200.0, 250.0);
    /// Vertical jump delta range in centimeters
    pub const JUMP_DELTA_CM: (f64, f64) = (30.0, 70.0);
}

/// Default wizard timings
pub mod wizard_defaults {
    /// Valid samples averaged into one weight/height/reach reading
    pub const SAMPLES_PER_READING: usize = 30;
    /// Sensor polling interval in milliseconds
    pub const POLL_INTERVAL_MS: u64 = 100;
    /// Periodic connectivity probe interval in milliseconds
    pub const CONNECTIVITY_CHECK_MS: u64 = 2_000;
    /// Jump countdown length in seconds
    pub const COUNTDOWN_SECS: u32 = 5;
    /// Peak-detection window after the countdown, in milliseconds
    pub const JUMP_WINDOW_MS: u64 = 3_000;
}

/// Sensor endpoint defaults
pub mod sensor_defaults {
    /// Raspberry Pi endpoint polled by the HTTP sensor source
    pub const HTTP_ENDPOINT: &str = "http://raspberrypi.local:5000/data";
    /// Age after which the last HTTP reading counts as lost
    pub const STALE_AFTER_MS: u64 = 3_000;
    /// Per-request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: u64 = 5;
}

/// Keys of the persisted JSON document
pub mod storage_keys {
    /// User accounts (admins and coaches)
    pub const USERS: &str = "vumpIT_users";
    /// Student and athlete profiles
    pub const STUDENTS: &str = "vumpIT_students";
    /// Coach classes
    pub const CLASSES: &str = "vumpIT_classes";
}

/// Display labels
pub mod labels {
    /// Sport assigned to admin accounts
    pub const ALL_SPORTS: &str = "All Sports";
    /// Prefix of auto-assigned class identifiers
    pub const CLASS_ID_PREFIX: &str = "CLS";
}

/// Service identification for structured logging
pub mod service_names {
    /// Application service name
    pub const VUMPIT: &str = "vumpit";
}
