// ABOUTME: Integration tests for the simulated and HTTP-polled sensor sources
// ABOUTME: Seeded simulation runs, boxed sources and a local HTTP device stand-in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::VecDeque;
use std::time::Duration;
use vumpit::config::WizardConfig;
use vumpit::runtime::autopilot;
use vumpit::wizard::{MeasurementWizard, WizardEvent, WizardSession, WizardState};
use vumpit_core::constants::sensor_ranges;
use vumpit_providers::{SensorChannel, SensorSample, SensorSource, SimulatedSensorSource};

/// Drive a wizard on a simulated clock, answering events like a hands-off operator
fn simulate_run<S: SensorSource>(source: S) -> (WizardSession, Vec<WizardEvent>) {
    let store = common::demo_store();
    let user = common::sign_in(&store, "STU001");
    let mut wizard = MeasurementWizard::new(source, store, WizardConfig::quick());
    let mut session = WizardSession::new();
    let mut now = Duration::ZERO;

    let mut log = Vec::new();
    let mut pending: VecDeque<_> = wizard.start(&mut session, Some(&user), now).unwrap().into();
    for _ in 0..1_000 {
        while let Some(event) = pending.pop_front() {
            if let Some(action) = autopilot(&event, false) {
                pending.extend(wizard.handle(&mut session, action, now).unwrap());
            }
            log.push(event);
        }
        if !session.state().is_active() {
            break;
        }
        now += Duration::from_millis(10);
        pending.extend(wizard.tick(&mut session, now));
    }
    (session, log)
}

#[test]
fn test_seeded_simulation_completes_a_run() {
    let (session, events) = simulate_run(SimulatedSensorSource::with_seed(7));
    assert_eq!(session.state(), WizardState::Committed);

    let snapshot = session.last_committed().unwrap();
    let (low, high) = sensor_ranges::WEIGHT_KG;
    assert!((low..=high).contains(&snapshot.weight));
    let (low, high) = sensor_ranges::HEIGHT_CM;
    assert!((low..=high).contains(&snapshot.height));

    let jump = snapshot.jump.unwrap();
    let (low, high) = sensor_ranges::JUMP_DELTA_CM;
    assert!((low..=high).contains(&jump.vertical_jump));
    assert!(events
        .iter()
        .any(|event| matches!(event, WizardEvent::JumpComputed { trial: 1, .. })));
}

#[test]
fn test_same_seed_gives_the_same_snapshot() {
    let (first, _) = simulate_run(SimulatedSensorSource::with_seed(99));
    let (second, _) = simulate_run(SimulatedSensorSource::with_seed(99));
    assert_eq!(first.last_committed(), second.last_committed());
}

#[test]
fn test_boxed_sources_forward_every_call() {
    let mut inner = SimulatedSensorSource::with_seed(3);
    inner.push_result(None);
    let mut boxed: Box<dyn SensorSource> = Box::new(inner);

    assert_eq!(boxed.name(), "simulated");
    boxed.arm(SensorChannel::Weight);
    assert_eq!(boxed.poll(), None);
    let sample = boxed.poll().unwrap();
    assert!(sample.value_for(SensorChannel::Weight).is_ok());
    assert!(boxed.probe());

    boxed.release();
    assert_eq!(boxed.poll(), None);

    let (session, _) = simulate_run(boxed);
    assert_eq!(session.state(), WizardState::Committed);
}

#[test]
fn test_disconnected_simulation_reports_nothing() {
    let mut source = SimulatedSensorSource::with_seed(5)
        .with_script([Some(SensorSample::position(231.0))]);
    source.arm(SensorChannel::Height);
    source.disconnect();
    assert!(!source.probe());
    assert_eq!(source.poll(), None);
    assert_eq!(source.poll_count(), 0);

    source.reconnect();
    assert_eq!(source.poll(), Some(SensorSample::position(231.0)));
    assert_eq!(source.armed_channel(), Some(SensorChannel::Height));
}

#[cfg(feature = "sensor-http")]
mod http {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use vumpit_providers::polled_http::fetch_reading;
    use vumpit_providers::{
        HttpSensorConfig, PolledHttpSensorSource, SensorChannel, SensorError, SensorSample,
        SensorSource,
    };

    /// Status line and body the stand-in device answers with
    type Reply = Arc<Mutex<(u16, String)>>;

    async fn spawn_device(status: u16, body: &str) -> (SocketAddr, Reply) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let reply: Reply = Arc::new(Mutex::new((status, body.to_owned())));
        let shared = Arc::clone(&reply);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let (status, body) = shared.lock().unwrap().clone();
                tokio::spawn(async move {
                    let mut request = [0_u8; 1024];
                    let _ = socket.read(&mut request).await;
                    let response = format!(
                        "HTTP/1.1 {status} Device\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        (addr, reply)
    }

    fn source_for(addr: SocketAddr, stale_after: Duration) -> PolledHttpSensorSource {
        PolledHttpSensorSource::new(HttpSensorConfig {
            endpoint: format!("http://{addr}/data"),
            poll_interval: Duration::from_millis(20),
            stale_after,
            ..HttpSensorConfig::default()
        })
    }

    async fn wait_for_reading(source: &mut PolledHttpSensorSource) -> Option<SensorSample> {
        for _ in 0..100 {
            if let Some(sample) = source.poll() {
                return Some(sample);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_fetch_reading_parses_the_device_body() {
        let (addr, _) = spawn_device(200, r#"{"weight":72.4,"height":231.0}"#).await;
        let sample = fetch_reading(&format!("http://{addr}/data")).await.unwrap();
        assert_eq!(sample.weight, Some(72.4));
        assert_eq!(sample.vertical_position, Some(231.0));
    }

    #[tokio::test]
    async fn test_fetch_reading_reports_device_errors() {
        let (addr, reply) = spawn_device(503, "{}").await;
        let endpoint = format!("http://{addr}/data");
        let err = fetch_reading(&endpoint).await.unwrap_err();
        assert!(err.is_connectivity_failure());
        assert!(matches!(err, SensorError::Unavailable { ref source_name, .. } if *source_name == endpoint));

        *reply.lock().unwrap() = (200, "weight=70".to_owned());
        let err = fetch_reading(&endpoint).await.unwrap_err();
        assert!(err.to_string().contains("malformed reading"));
    }

    #[tokio::test]
    async fn test_fetch_reading_from_an_unreachable_device() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let err = fetch_reading(&format!("http://{addr}/data"))
            .await
            .unwrap_err();
        assert!(matches!(err, SensorError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_polled_source_serves_the_latest_reading() {
        let (addr, _) = spawn_device(200, r#"{"weight":68.5,"distance":224.0}"#).await;
        let mut source = source_for(addr, Duration::from_secs(2));
        assert_eq!(source.endpoint(), format!("http://{addr}/data"));
        assert!(!source.is_polling());
        assert_eq!(source.poll(), None);

        source.arm(SensorChannel::Weight);
        assert!(source.is_polling());
        let sample = wait_for_reading(&mut source).await.unwrap();
        assert_eq!(sample.weight, Some(68.5));
        assert_eq!(sample.vertical_position, Some(224.0));
        assert!(source.probe());

        source.release();
        assert!(!source.is_polling());
        assert_eq!(source.poll(), None);
    }

    #[tokio::test]
    async fn test_stale_readings_count_as_a_lost_device() {
        let (addr, reply) = spawn_device(200, r#"{"weight":70.0}"#).await;
        let mut source = source_for(addr, Duration::from_millis(150));
        source.arm(SensorChannel::Weight);
        assert!(wait_for_reading(&mut source).await.is_some());

        *reply.lock().unwrap() = (500, "{}".to_owned());
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(source.poll(), None);
        assert!(!source.probe());
    }
}
