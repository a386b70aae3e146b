// ABOUTME: Deterministic timer queue driving the measurement wizard
// ABOUTME: One-shot and repeating timers keyed by cancellable tokens on a caller-supplied clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Timer Queue
//!
//! Time is a `Duration` offset chosen by the caller: the real-time runner
//! passes elapsed wall-clock time, tests pass whatever they like. Nothing
//! here sleeps.
//!
//! `pop_due` hands out one timer at a time, earliest first, ties broken by
//! scheduling order. A repeating timer is re-armed one period after the time
//! it was due, not after `now`, so advancing the clock by 3 s over a 100 ms
//! timer yields exactly 30 firings.

use serde::Serialize;
use std::time::Duration;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Read one sample from the sensor
    SamplePoll,
    /// Probe the sensor for connectivity
    ConnectivityCheck,
    /// One second of the jump countdown elapsed
    CountdownTick,
    /// The jump peak-detection window closed
    JumpWindowClose,
}

/// Handle for cancelling one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    /// Token it was scheduled under
    pub token: TimerToken,
    /// Kind
    pub kind: TimerKind,
    /// Time it was due (not the time it was popped)
    pub at: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    token: TimerToken,
    kind: TimerKind,
    due: Duration,
    every: Option<Duration>,
}

/// Pending timers for one wizard session
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    next_token: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    /// Empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: TimerKind, due: Duration, every: Option<Duration>) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.push(Scheduled {
            token,
            kind,
            due,
            every,
        });
        token
    }

    /// Fire once at `due`
    pub fn schedule_once(&mut self, kind: TimerKind, due: Duration) -> TimerToken {
        self.push(kind, due, None)
    }

    /// Fire at `first_due` and every `every` after that; zero periods are raised to 1 ms
    pub fn schedule_repeating(
        &mut self,
        kind: TimerKind,
        first_due: Duration,
        every: Duration,
    ) -> TimerToken {
        self.push(kind, first_due, Some(every.max(Duration::from_millis(1))))
    }

    /// Cancel one timer; false if it already fired or was cancelled
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.token != token);
        self.pending.len() != before
    }

    /// Cancel every timer of a kind
    pub fn cancel_kind(&mut self, kind: TimerKind) -> usize {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.kind != kind);
        before - self.pending.len()
    }

    /// Cancel everything; returns how many timers were pending
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    /// Earliest due time, if anything is pending
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|timer| timer.due).min()
    }

    /// Whether a timer of `kind` is pending
    #[must_use]
    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|timer| timer.kind == kind)
    }

    /// Number of pending timers
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the earliest timer due at or before `now`, re-arming repeating ones
    pub fn pop_due(&mut self, now: Duration) -> Option<FiredTimer> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(_, timer)| (timer.due, timer.token))
            .map(|(index, _)| index)?;

        let timer = self.pending[index];
        match timer.every {
            Some(every) => self.pending[index].due = timer.due + every,
            None => {
                self.pending.swap_remove(index);
            }
        }
        Some(FiredTimer {
            token: timer.token,
            kind: timer.kind,
            at: timer.due,
        })
    }
}
