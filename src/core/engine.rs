//! Reflex Engine: light sequence, jump-start detection, reaction timing
//!
//! State transitions:
//! - IDLE → READY: input, or an explicit round start
//! - READY → READY: light tick, five times, left to right
//! - READY → READY: one more tick with all five lit arms the random pause
//! - READY → WAITING: the random pause runs out (lights out)
//! - READY → FINISHED: input before lights out (jump start)
//! - WAITING → FINISHED: input after lights out (reaction recorded)
//! - FINISHED → READY: explicit round start only
//!
//! Timers only fire from `poll`. Every timer is tagged with the round that
//! armed it, and the engine drops firings whose round or handle it no longer
//! tracks. Lights out is stamped at the stimulus deadline, so a press that
//! is itself the first to see it still measures from the scheduled moment.

use std::time::Duration;
use chrono::Utc;
use tracing::{debug, info};

use crate::{LIGHT_INTERVAL_MS, STARTUP_DELAY_MS};
use crate::core::clock::{Clock, MonotonicClock};
use crate::core::random::{stimulus_delay, RandomSource, ThreadRandom};
use crate::core::scheduler::{FiredTimer, TimerHandle, TimerKind, TimerQueue};
use crate::core::throttle::ActionThrottle;
use crate::types::{
    duration_ms, EngineEvent, EngineOutput, GameState, LightBoard, Measurement, ReasonCode,
};

/// Reflex test state machine
#[derive(Debug)]
pub struct ReflexEngine<C: Clock = MonotonicClock, R: RandomSource = ThreadRandom> {
    clock: C,
    rng: R,
    /// Current state
    state: GameState,
    board: LightBoard,
    measurement: Measurement,
    throttle: ActionThrottle,
    timers: TimerQueue,
    /// Handles this round still owns
    startup_timer: Option<TimerHandle>,
    tick_timer: Option<TimerHandle>,
    stimulus_timer: Option<TimerHandle>,
    /// Bumped on every round start
    round: u64,
    last_reason: ReasonCode,
}

impl Default for ReflexEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReflexEngine {
    /// Engine on the real monotonic clock with thread-local randomness
    pub fn new() -> Self {
        Self::with_sources(MonotonicClock::new(), ThreadRandom)
    }
}

impl<C: Clock, R: RandomSource> ReflexEngine<C, R> {
    /// Engine with injected time and randomness
    pub fn with_sources(clock: C, rng: R) -> Self {
        Self {
            clock,
            rng,
            state: GameState::Idle,
            board: LightBoard::new(),
            measurement: Measurement::new(),
            throttle: ActionThrottle::default(),
            timers: TimerQueue::new(),
            startup_timer: None,
            tick_timer: None,
            stimulus_timer: None,
            round: 0,
            last_reason: ReasonCode::R001_STATE_IDLE,
        }
    }

    /// Replace the input throttle (tests and tuning)
    pub fn with_throttle(mut self, throttle: ActionThrottle) -> Self {
        self.throttle = throttle;
        self
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Raw click / key input
    pub fn press(&mut self) -> EngineOutput {
        let now = self.clock.now();
        let mut events = Vec::new();

        // Timers that came due before this input run first
        self.fire_due(now, &mut events);

        if !self.throttle.try_accept(now) {
            debug!(state = %self.state, "input throttled");
            return self.finish_step(ReasonCode::R004_INPUT_THROTTLED, events);
        }

        let reason = match self.state {
            GameState::Idle => self.begin_round(now, &mut events),
            GameState::Ready => self.jump_start(&mut events),
            GameState::Waiting => match self.measurement.start_time {
                Some(start) => self.record_reaction(now.saturating_sub(start), &mut events),
                None => self.jump_start(&mut events),
            },
            GameState::Countdown | GameState::Finished => ReasonCode::R004_INPUT_IGNORED,
        };
        self.finish_step(reason, events)
    }

    /// Explicit new-round request; valid from any state
    pub fn start_round(&mut self) -> EngineOutput {
        let now = self.clock.now();
        let mut events = Vec::new();
        self.throttle.record(now);
        let reason = self.begin_round(now, &mut events);
        self.finish_step(reason, events)
    }

    /// Fire every timer due at the current clock reading
    pub fn poll(&mut self) -> EngineOutput {
        let now = self.clock.now();
        let mut events = Vec::new();
        let reason = self.fire_due(now, &mut events).unwrap_or(match self.state {
            GameState::Idle => ReasonCode::R001_STATE_IDLE,
            _ => ReasonCode::R002_SEQUENCE_PENDING,
        });
        self.finish_step(reason, events)
    }

    /// Earliest pending timer deadline, on this engine's clock
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn begin_round(&mut self, now: Duration, events: &mut Vec<EngineEvent>) -> ReasonCode {
        // Superseded timers go before anything is reset
        self.cancel_timers();

        self.round += 1;
        self.board.clear();
        self.measurement = Measurement::new();
        self.transition(GameState::Ready, events);

        let deadline = now + Duration::from_millis(STARTUP_DELAY_MS);
        self.startup_timer = Some(self.timers.schedule_once(TimerKind::Startup, self.round, deadline));
        info!(round = self.round, "round started");
        ReasonCode::R001_ROUND_STARTED
    }

    fn jump_start(&mut self, events: &mut Vec<EngineEvent>) -> ReasonCode {
        self.cancel_timers();
        self.measurement.jump_start = true;
        self.measurement.reaction_time = None;
        self.board.clear();
        self.transition(GameState::Finished, events);
        info!(round = self.round, "jump start");
        ReasonCode::R003_JUMP_START
    }

    fn record_reaction(&mut self, reaction: Duration, events: &mut Vec<EngineEvent>) -> ReasonCode {
        self.cancel_timers();
        self.measurement.reaction_time = Some(reaction);
        self.transition(GameState::Finished, events);
        info!(round = self.round, reaction_ms = duration_ms(reaction), "reaction recorded");
        ReasonCode::R003_REACTION_RECORDED
    }

    /// Run due timers in deadline order; returns the reason of the last one that acted
    fn fire_due(&mut self, now: Duration, events: &mut Vec<EngineEvent>) -> Option<ReasonCode> {
        let mut reason = None;
        while let Some(fired) = self.timers.pop_due(now) {
            if let Some(r) = self.on_timer(fired, events) {
                reason = Some(r);
            }
        }
        reason
    }

    fn on_timer(&mut self, fired: FiredTimer, events: &mut Vec<EngineEvent>) -> Option<ReasonCode> {
        if fired.round != self.round || self.state != GameState::Ready {
            debug!(?fired, round = self.round, "stale timer dropped");
            self.timers.cancel(fired.handle);
            return None;
        }

        match fired.kind {
            TimerKind::Startup if self.startup_timer == Some(fired.handle) => {
                self.startup_timer = None;
                let period = Duration::from_millis(LIGHT_INTERVAL_MS);
                self.tick_timer = Some(self.timers.schedule_repeating(
                    TimerKind::LightTick,
                    self.round,
                    fired.deadline + period,
                    period,
                ));
                None
            }
            TimerKind::LightTick if self.tick_timer == Some(fired.handle) => {
                if let Some(index) = self.board.light_next() {
                    events.push(EngineEvent::LightOn { index });
                    return Some(ReasonCode::R002_LIGHT_ON);
                }

                // All five held for a full interval. Hand-off: the tick stops
                // exactly when the pause is armed
                if let Some(tick) = self.tick_timer.take() {
                    self.timers.cancel(tick);
                }
                let delay = stimulus_delay(&mut self.rng);
                self.stimulus_timer = Some(self.timers.schedule_once(
                    TimerKind::Stimulus,
                    self.round,
                    fired.deadline + delay,
                ));
                events.push(EngineEvent::StimulusArmed {
                    delay_ms: duration_ms(delay),
                });
                debug!(round = self.round, delay_ms = duration_ms(delay), "stimulus armed");
                Some(ReasonCode::R002_STIMULUS_ARMED)
            }
            TimerKind::Stimulus if self.stimulus_timer == Some(fired.handle) => {
                self.stimulus_timer = None;
                self.board.clear();
                self.measurement.start_time = Some(fired.deadline);
                events.push(EngineEvent::LightsOut);
                self.transition(GameState::Waiting, events);
                Some(ReasonCode::R002_LIGHTS_OUT)
            }
            _ => {
                debug!(?fired, "untracked timer dropped");
                self.timers.cancel(fired.handle);
                None
            }
        }
    }

    fn cancel_timers(&mut self) {
        for handle in [
            self.startup_timer.take(),
            self.tick_timer.take(),
            self.stimulus_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.timers.cancel(handle);
        }
    }

    fn transition(&mut self, to: GameState, events: &mut Vec<EngineEvent>) {
        if self.state != to {
            events.push(EngineEvent::StateChanged { from: self.state, to });
            self.state = to;
        }
    }

    fn finish_step(&mut self, reason: ReasonCode, events: Vec<EngineEvent>) -> EngineOutput {
        self.last_reason = reason;
        self.output(reason, events)
    }

    fn output(&self, reason: ReasonCode, events: Vec<EngineEvent>) -> EngineOutput {
        EngineOutput {
            timestamp: Utc::now(),
            round: self.round,
            state: self.state,
            lights: self.board.cells(),
            reason,
            reaction_ms: self.measurement.reaction_ms(),
            jump_start: self.measurement.jump_start,
            events,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get current state
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &LightBoard {
        &self.board
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    /// Number of armed timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Draw from the engine's random source (jump-start messages share it)
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Get current output without stepping
    pub fn current_output(&self) -> EngineOutput {
        self.output(self.last_reason, Vec::new())
    }
}

// =============================================================================
// TESTS
// =============================================================================
