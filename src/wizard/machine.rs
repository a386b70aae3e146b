// ABOUTME: MeasurementWizard state machine sequencing weight, height, reach and jump steps
// ABOUTME: Applies user actions and due timers to a WizardSession and commits finished runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Measurement Wizard
//!
//! `Idle → Weighing → WearableCheck → MeasuringHeight → BmiComputed →
//! StandingReach → JumpInstruction → JumpCountdown → JumpMeasuring →
//! JumpComputed → Committed`, with `SkipJump` committing straight from
//! `BmiComputed` and `AnotherTrial` looping back to the countdown.
//!
//! The wizard owns the sensor and the store but no state of its own; every
//! call takes the caller's [`WizardSession`] and the current time. Sensor
//! reads happen only inside [`MeasurementWizard::tick`], when a poll timer
//! comes due.
//!
//! Nothing is written to the store before `Finish` or `SkipJump`, so a
//! cancelled or aborted run leaves the profile exactly as it was.

use super::events::{WizardError, WizardEvent, WizardResult};
use super::session::{Sampling, WizardSession};
use super::state::{WizardAction, WizardState};
use super::timers::{FiredTimer, TimerKind};
use crate::auth::CurrentUser;
use crate::config::WizardConfig;
use crate::storage::ProfileStore;
use chrono::{Local, NaiveDate};
use std::time::Duration;
use tracing::{debug, info, warn};
use vumpit_core::models::JumpMeasurement;
use vumpit_intelligence::{compute_bmi, vertical_jump, RatingEngine};
use vumpit_providers::{SensorChannel, SensorSource};

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// Drives measurement runs against one sensor and one profile store
#[derive(Debug)]
pub struct MeasurementWizard<S, P> {
    source: S,
    store: P,
    engine: RatingEngine,
    config: WizardConfig,
    fixed_date: Option<NaiveDate>,
}

impl<S: SensorSource, P: ProfileStore> MeasurementWizard<S, P> {
    /// Wizard with the default rating thresholds
    pub fn new(source: S, store: P, config: WizardConfig) -> Self {
        Self {
            source,
            store,
            engine: RatingEngine::default(),
            config,
            fixed_date: None,
        }
    }

    /// Use custom rating thresholds
    #[must_use]
    pub fn with_engine(mut self, engine: RatingEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Stamp runs with `date` instead of today
    #[must_use]
    pub fn with_fixed_date(mut self, date: NaiveDate) -> Self {
        self.fixed_date = Some(date);
        self
    }

    /// Sensor source
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Sensor source, mutably
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Profile store
    pub const fn store(&self) -> &P {
        &self.store
    }

    /// Profile store, mutably
    pub fn store_mut(&mut self) -> &mut P {
        &mut self.store
    }

    /// Timings in use
    pub const fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Give back the sensor and the store
    pub fn into_parts(self) -> (S, P) {
        (self.source, self.store)
    }

    fn today(&self) -> NaiveDate {
        self.fixed_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Start a run for whoever is signed in
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when nobody is signed in, plus everything
    /// `handle` returns for `Start`
    pub fn start(
        &mut self,
        session: &mut WizardSession,
        user: Option<&CurrentUser>,
        now: Duration,
    ) -> WizardResult {
        let user = user.ok_or(WizardError::NotAuthenticated)?;
        self.handle(session, WizardAction::Start(user.clone()), now)
    }

    /// Apply one user action
    ///
    /// # Errors
    ///
    /// Rejected actions leave the session untouched, except
    /// `ProfileNotFound`, which aborts the run to `Idle`
    pub fn handle(
        &mut self,
        session: &mut WizardSession,
        action: WizardAction,
        now: Duration,
    ) -> WizardResult {
        let action = match action {
            WizardAction::Start(user) => return self.begin(session, user, now),
            other => other,
        };
        let state = session.state;
        debug!(state = %state, action = action.name(), "wizard action");

        if action.is_cancellation() {
            return Ok(self.cancel(session, &action));
        }
        let not_allowed = || WizardError::ActionNotAllowed {
            action: action.name(),
            state,
        };
        if session.cancel_pending {
            return Err(not_allowed());
        }
        if session.blocked {
            return match action {
                WizardAction::Resume => Ok(self.resume(session, now)),
                _ => Err(WizardError::DeviceDisconnected { state }),
            };
        }
        if state.is_locked() {
            return Err(not_allowed());
        }

        match (state, &action) {
            (_, WizardAction::Restart) if state.sampling_channel().is_some() => {
                Ok(self.enter_sampling(session, state, now))
            }
            (WizardState::Weighing, WizardAction::Continue) => {
                Self::require_reading(session)?;
                session.sampling = None;
                Ok(Self::enter(session, WizardState::WearableCheck))
            }
            (WizardState::WearableCheck, WizardAction::Continue) => {
                Ok(self.check_wearable(session, now))
            }
            (WizardState::MeasuringHeight, WizardAction::Continue) => {
                Self::require_reading(session)?;
                Ok(self.rate_bmi(session))
            }
            (WizardState::BmiComputed, WizardAction::SkipJump) => self.commit(session, false),
            (WizardState::BmiComputed, WizardAction::ProceedToJump) => {
                Ok(self.enter_sampling(session, WizardState::StandingReach, now))
            }
            (WizardState::StandingReach, WizardAction::Continue) => {
                Self::require_reading(session)?;
                session.sampling = None;
                Ok(Self::enter(session, WizardState::JumpInstruction))
            }
            (WizardState::JumpInstruction, WizardAction::PlayVideo) => {
                Ok(vec![WizardEvent::VideoRequested])
            }
            (WizardState::JumpInstruction, WizardAction::SkipVideo | WizardAction::Continue) => {
                Ok(self.begin_countdown(session, now))
            }
            (WizardState::JumpComputed, WizardAction::AnotherTrial) => {
                session.draft.clear_jump();
                Ok(self.begin_countdown(session, now))
            }
            (WizardState::JumpComputed, WizardAction::Finish) => self.commit(session, true),
            _ => Err(not_allowed()),
        }
    }

    /// Fire every timer due at or before `now`
    pub fn tick(&mut self, session: &mut WizardSession, now: Duration) -> Vec<WizardEvent> {
        let mut events = Vec::new();
        while let Some(fired) = session.timers.pop_due(now) {
            events.extend(self.fire(session, fired));
        }
        events
    }

    fn fire(&mut self, session: &mut WizardSession, fired: FiredTimer) -> Vec<WizardEvent> {
        match fired.kind {
            TimerKind::SamplePoll => self.on_sample_poll(session),
            TimerKind::ConnectivityCheck => {
                if self.source.probe() {
                    Vec::new()
                } else {
                    self.lose_device(session)
                }
            }
            TimerKind::CountdownTick => self.on_countdown_tick(session, fired.at),
            TimerKind::JumpWindowClose => self.close_jump_window(session),
        }
    }

    fn begin(
        &mut self,
        session: &mut WizardSession,
        user: CurrentUser,
        now: Duration,
    ) -> WizardResult {
        if session.state.is_active() {
            return Err(WizardError::SessionActive {
                state: session.state,
            });
        }
        if !user.role.is_measurable() {
            return Err(WizardError::NotAnAthlete { role: user.role });
        }
        let profile = self
            .store
            .get_profile(&user.id)?
            .ok_or(WizardError::ProfileNotFound {
                athlete_id: user.id,
            })?;

        session.reset();
        let date = self.today();
        info!(athlete_id = %profile.id, %date, "measurement started");
        session.athlete_id = Some(profile.id);
        session.gender = profile.gender;
        session.date = Some(date);
        Ok(self.enter_sampling(session, WizardState::Weighing, now))
    }

    fn enter(session: &mut WizardSession, state: WizardState) -> Vec<WizardEvent> {
        debug!(from = %session.state, to = %state, "wizard step");
        session.state = state;
        vec![WizardEvent::StepEntered { state }]
    }

    fn require_reading(session: &WizardSession) -> Result<(), WizardError> {
        if session.reading_ready {
            Ok(())
        } else {
            Err(WizardError::StepNotReady {
                state: session.state,
            })
        }
    }

    fn ensure_monitoring(&self, session: &mut WizardSession, now: Duration) {
        if session.state.is_monitored() && !session.timers.is_scheduled(TimerKind::ConnectivityCheck)
        {
            let every = self.config.connectivity_check_interval;
            session
                .timers
                .schedule_repeating(TimerKind::ConnectivityCheck, now + every, every);
        }
    }

    /// Enter (or re-enter) a sampling step with an empty buffer
    fn enter_sampling(
        &mut self,
        session: &mut WizardSession,
        state: WizardState,
        now: Duration,
    ) -> Vec<WizardEvent> {
        let events = Self::enter(session, state);
        let Some(channel) = state.sampling_channel() else {
            return events;
        };
        session.draft.set_reading(channel, None);
        session.reading_ready = false;
        session.sampling = Some(Sampling::new(channel));
        self.source.arm(channel);

        let every = self.config.poll_interval;
        session.timers.cancel_kind(TimerKind::SamplePoll);
        session
            .timers
            .schedule_repeating(TimerKind::SamplePoll, now + every, every);
        self.ensure_monitoring(session, now);
        events
    }

    fn check_wearable(&mut self, session: &mut WizardSession, now: Duration) -> Vec<WizardEvent> {
        if self.source.probe() {
            info!(source = self.source.name(), "wearable connected");
            self.enter_sampling(session, WizardState::MeasuringHeight, now)
        } else {
            self.lose_device(session)
        }
    }

    fn on_sample_poll(&mut self, session: &mut WizardSession) -> Vec<WizardEvent> {
        let Some(mut sampling) = session.sampling else {
            session.timers.cancel_kind(TimerKind::SamplePoll);
            return Vec::new();
        };
        let Some(sample) = self.source.poll() else {
            return self.lose_device(session);
        };
        match sample.value_for(sampling.channel) {
            Ok(value) => sampling.add(value),
            Err(err) => {
                session.discarded_samples += 1;
                debug!(error = %err, "sample discarded");
            }
        }
        session.sampling = Some(sampling);

        if sampling.channel == SensorChannel::Jump
            || sampling.count < self.config.samples_per_reading
        {
            return Vec::new();
        }
        let Some(value) = sampling.mean() else {
            return Vec::new();
        };
        session.timers.cancel_kind(TimerKind::SamplePoll);
        session.draft.set_reading(sampling.channel, Some(value));
        session.reading_ready = true;
        info!(
            step = %session.state,
            channel = %sampling.channel,
            samples = sampling.count,
            value,
            "reading ready"
        );
        vec![WizardEvent::ReadingReady {
            channel: sampling.channel,
            value,
        }]
    }

    fn rate_bmi(&self, session: &mut WizardSession) -> Vec<WizardEvent> {
        let (Some(weight), Some(height)) = (session.draft.weight, session.draft.height) else {
            return Vec::new();
        };
        let bmi = compute_bmi(weight, height);
        let rating = self.engine.classify_bmi(bmi);
        session.draft.bmi = Some(bmi);
        session.draft.bmi_rating = Some(rating);
        session.sampling = None;
        info!(bmi, rating = %rating, "bmi computed");

        let mut events = vec![WizardEvent::BmiComputed { bmi, rating }];
        events.extend(Self::enter(session, WizardState::BmiComputed));
        events
    }

    fn begin_countdown(&mut self, session: &mut WizardSession, now: Duration) -> Vec<WizardEvent> {
        for kind in [
            TimerKind::SamplePoll,
            TimerKind::CountdownTick,
            TimerKind::JumpWindowClose,
        ] {
            session.timers.cancel_kind(kind);
        }
        session.sampling = None;
        let mut events = Self::enter(session, WizardState::JumpCountdown);
        self.ensure_monitoring(session, now);

        session.countdown_remaining = self.config.countdown_secs;
        if session.countdown_remaining == 0 {
            events.extend(self.open_jump_window(session, now));
            return events;
        }
        session
            .timers
            .schedule_repeating(TimerKind::CountdownTick, now + COUNTDOWN_STEP, COUNTDOWN_STEP);
        events.push(WizardEvent::CountdownTick {
            remaining: session.countdown_remaining,
        });
        events
    }

    fn on_countdown_tick(&mut self, session: &mut WizardSession, at: Duration) -> Vec<WizardEvent> {
        session.countdown_remaining = session.countdown_remaining.saturating_sub(1);
        let remaining = session.countdown_remaining;
        let mut events = vec![WizardEvent::CountdownTick { remaining }];
        if remaining == 0 {
            session.timers.cancel_kind(TimerKind::CountdownTick);
            events.extend(self.open_jump_window(session, at));
        }
        events
    }

    fn open_jump_window(&mut self, session: &mut WizardSession, at: Duration) -> Vec<WizardEvent> {
        let events = Self::enter(session, WizardState::JumpMeasuring);
        self.source.arm(SensorChannel::Jump);
        session.sampling = Some(Sampling::new(SensorChannel::Jump));

        let every = self.config.poll_interval;
        session
            .timers
            .schedule_repeating(TimerKind::SamplePoll, at + every, every);
        session
            .timers
            .schedule_once(TimerKind::JumpWindowClose, at + self.config.jump_window);
        events
    }

    fn close_jump_window(&self, session: &mut WizardSession) -> Vec<WizardEvent> {
        session.timers.cancel_kind(TimerKind::SamplePoll);
        let sampling = session.sampling.take();
        let peak = sampling.and_then(|sampling| sampling.peak);

        let (Some(jump_reach), Some(standing_reach)) = (peak, session.draft.standing_reach)
        else {
            warn!(
                samples = sampling.map_or(0, |sampling| sampling.count),
                "no valid sample during the jump window"
            );
            session.draft.clear_jump();
            let mut events = vec![WizardEvent::JumpNotDetected];
            events.extend(Self::enter(session, WizardState::JumpInstruction));
            return events;
        };

        let vertical = vertical_jump(standing_reach, jump_reach);
        let rating = self.engine.classify_jump(vertical, session.gender);
        session.draft.jump_reach = Some(jump_reach);
        session.draft.vertical_jump = Some(vertical);
        session.draft.jump_rating = Some(rating);
        session.trials += 1;
        info!(
            trial = session.trials,
            jump_reach,
            vertical_jump = vertical,
            rating = %rating,
            "jump computed"
        );

        let mut events = vec![WizardEvent::JumpComputed {
            jump: JumpMeasurement {
                standing_reach,
                jump_reach,
                vertical_jump: vertical,
                jump_rating: rating,
            },
            trial: session.trials,
        }];
        events.extend(Self::enter(session, WizardState::JumpComputed));
        events
    }

    /// Stop all background work and block until the user resumes or cancels
    fn lose_device(&self, session: &mut WizardSession) -> Vec<WizardEvent> {
        let state = session.state;
        let cancelled = session.timers.cancel_all();
        if let Some(sampling) = session.sampling.take() {
            if sampling.channel == SensorChannel::Jump {
                session.draft.clear_jump();
            } else {
                session.draft.set_reading(sampling.channel, None);
            }
        }
        if state.sampling_channel().is_some() {
            session.reading_ready = false;
        }
        session.countdown_remaining = 0;
        session.blocked = true;
        warn!(
            step = %state,
            source = self.source.name(),
            timers_cancelled = cancelled,
            "sensor disconnected"
        );
        vec![WizardEvent::DeviceDisconnected { state }]
    }

    fn resume(&mut self, session: &mut WizardSession, now: Duration) -> Vec<WizardEvent> {
        let state = session.state;
        if !self.source.probe() {
            warn!(step = %state, "sensor still unreachable");
            return vec![WizardEvent::DeviceDisconnected { state }];
        }
        session.blocked = false;
        info!(step = %state, "sensor reconnected, re-running step");

        let mut events = vec![WizardEvent::DeviceReconnected];
        match state {
            WizardState::Weighing | WizardState::MeasuringHeight | WizardState::StandingReach => {
                events.extend(self.enter_sampling(session, state, now));
            }
            WizardState::WearableCheck => {
                events.extend(self.enter_sampling(session, WizardState::MeasuringHeight, now));
            }
            WizardState::JumpCountdown | WizardState::JumpMeasuring => {
                events.extend(self.begin_countdown(session, now));
            }
            _ => self.ensure_monitoring(session, now),
        }
        events
    }

    fn cancel(&mut self, session: &mut WizardSession, action: &WizardAction) -> Vec<WizardEvent> {
        if !session.state.is_active() {
            session.cancel_pending = false;
            return Vec::new();
        }
        match action {
            WizardAction::RequestCancel if !session.cancel_pending => {
                session.cancel_pending = true;
                vec![WizardEvent::CancelRequested]
            }
            WizardAction::DismissCancel if session.cancel_pending => {
                session.cancel_pending = false;
                vec![WizardEvent::CancelDismissed]
            }
            WizardAction::ConfirmCancel => {
                info!(
                    athlete_id = session.athlete_id().unwrap_or_default(),
                    step = %session.state,
                    "measurement cancelled"
                );
                self.abort(session);
                vec![
                    WizardEvent::Cancelled,
                    WizardEvent::StepEntered {
                        state: WizardState::Idle,
                    },
                ]
            }
            _ => Vec::new(),
        }
    }

    fn abort(&mut self, session: &mut WizardSession) {
        session.timers.cancel_all();
        self.source.release();
        session.reset();
    }

    fn commit(&mut self, session: &mut WizardSession, include_jump: bool) -> WizardResult {
        let state = session.state;
        let date = session.date.unwrap_or_else(|| self.today());
        let snapshot = session
            .draft
            .snapshot(date, include_jump)
            .ok_or(WizardError::StepNotReady { state })?;
        let athlete_id = session.athlete_id.clone().unwrap_or_default();

        let Some(mut profile) = self.store.get_profile(&athlete_id)? else {
            warn!(athlete_id = %athlete_id, "profile vanished before commit, aborting run");
            self.abort(session);
            return Err(WizardError::ProfileNotFound { athlete_id });
        };
        profile.record_snapshot(snapshot.clone());
        self.store.save_profile(profile)?;

        session.timers.cancel_all();
        self.source.release();
        session.sampling = None;
        session.last_committed = Some(snapshot.clone());
        info!(
            athlete_id = %athlete_id,
            %date,
            bmi = snapshot.bmi,
            with_jump = snapshot.has_jump(),
            "measurement committed"
        );

        let mut events = vec![WizardEvent::Committed { snapshot }];
        events.extend(Self::enter(session, WizardState::Committed));
        Ok(events)
    }
}
