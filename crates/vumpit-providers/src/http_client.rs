// ABOUTME: Shared reqwest client for talking to sensor hardware over HTTP
// ABOUTME: Initialized once from configuration; falls back to short LAN timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;
use vumpit_core::constants::sensor_defaults;

/// Connect timeout for devices on the local network
const CONNECT_TIMEOUT_MS: u64 = 1_500;

static REQUEST_TIMEOUT: OnceLock<Duration> = OnceLock::new();
static SENSOR_CLIENT: OnceLock<Client> = OnceLock::new();

/// Set the per-request timeout; returns `false` when the value is ignored
///
/// Only the first call counts, and only before the client is first used.
#[must_use = "a second configuration is ignored"]
pub fn configure_sensor_client(request_timeout: Duration) -> bool {
    if SENSOR_CLIENT.get().is_some() {
        debug!(?request_timeout, "sensor client already built, timeout ignored");
        return false;
    }
    if REQUEST_TIMEOUT.set(request_timeout).is_err() {
        debug!(
            ?request_timeout,
            kept = ?REQUEST_TIMEOUT.get(),
            "sensor client timeout already configured, new value ignored"
        );
        return false;
    }
    true
}

/// Client shared by every HTTP-backed sensor source
pub fn sensor_client() -> &'static Client {
    SENSOR_CLIENT.get_or_init(|| {
        let timeout = REQUEST_TIMEOUT
            .get()
            .copied()
            .unwrap_or(Duration::from_secs(sensor_defaults::HTTP_TIMEOUT_SECS));
        ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_millis(CONNECT_TIMEOUT_MS).min(timeout))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}
