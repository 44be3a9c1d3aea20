//! Focus-timer countdown.
//!
//! A wall-clock-based state machine with no internal thread: the caller is
//! responsible for calling `tick()` periodically (the CLI does so on each
//! invocation). The whole timer is serializable so it can be parked in the
//! key/value store between invocations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Countdown mode, each with its own duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Per-mode durations in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerDurations {
    pub focus_min: u64,
    pub short_break_min: u64,
    pub long_break_min: u64,
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self {
            focus_min: 25,
            short_break_min: 5,
            long_break_min: 15,
        }
    }
}

impl TimerDurations {
    /// Duration for a mode in milliseconds, saturating on absurd values.
    pub fn duration_ms(&self, mode: TimerMode) -> u64 {
        let minutes = match mode {
            TimerMode::Focus => self.focus_min,
            TimerMode::ShortBreak => self.short_break_min,
            TimerMode::LongBreak => self.long_break_min,
        };
        minutes.saturating_mul(60).saturating_mul(1000)
    }
}

/// Snapshot of the timer for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub state: TimerState,
    pub remaining_ms: u64,
    pub total_ms: u64,
    /// 0.0 .. 1.0 progress within the current countdown.
    pub progress: f64,
    pub at: DateTime<Utc>,
}

/// Countdown state machine operating on wall-clock deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    durations: TimerDurations,
    mode: TimerMode,
    state: TimerState,
    /// Remaining time in milliseconds for the current countdown.
    remaining_ms: u64,
    /// Timestamp (ms since epoch) of the last tick while running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl FocusTimer {
    pub fn new(durations: TimerDurations) -> Self {
        Self {
            durations,
            mode: TimerMode::Focus,
            state: TimerState::Idle,
            remaining_ms: durations.duration_ms(TimerMode::Focus),
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.durations.duration_ms(self.mode)
    }

    /// 0.0 .. 1.0 progress within the current countdown.
    pub fn progress(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / total as f64)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            state: self.state,
            remaining_ms: self.remaining_ms,
            total_ms: self.total_ms(),
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms());
            }
            TimerState::Completed => {
                self.remaining_ms = self.total_ms();
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms());
            }
            TimerState::Running => {}
        }
    }

    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.tick();
            if self.state == TimerState::Running {
                self.state = TimerState::Paused;
                self.last_tick_epoch_ms = None;
            }
        }
    }

    pub fn resume(&mut self) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
            self.last_tick_epoch_ms = Some(now_ms());
        }
    }

    /// Stop and refill the current mode's countdown.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining_ms = self.total_ms();
        self.last_tick_epoch_ms = None;
    }

    /// Switch mode; always resets the countdown.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.reset();
    }

    /// Flush elapsed wall time into the countdown. Returns the state after
    /// the tick so callers can react to completion.
    pub fn tick(&mut self) -> TimerState {
        self.tick_at(now_ms())
    }

    fn tick_at(&mut self, now: u64) -> TimerState {
        if self.state == TimerState::Running {
            let elapsed = self
                .last_tick_epoch_ms
                .map(|last| now.saturating_sub(last))
                .unwrap_or(0);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(now);

            if self.remaining_ms == 0 {
                self.state = TimerState::Completed;
                self.last_tick_epoch_ms = None;
            }
        }
        self.state
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> FocusTimer {
        FocusTimer::new(TimerDurations::default())
    }

    #[test]
    fn starts_idle_with_full_focus_countdown() {
        let t = timer();
        assert_eq!(t.state(), TimerState::Idle);
        assert_eq!(t.mode(), TimerMode::Focus);
        assert_eq!(t.remaining_ms(), 25 * 60 * 1000);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn tick_counts_down_wall_time() {
        let mut t = timer();
        t.start();
        let started_at = t.last_tick_epoch_ms.unwrap();

        let state = t.tick_at(started_at + 60_000);
        assert_eq!(state, TimerState::Running);
        assert_eq!(t.remaining_ms(), 24 * 60 * 1000);
    }

    #[test]
    fn countdown_reaching_zero_completes() {
        let mut t = timer();
        t.start();
        let started_at = t.last_tick_epoch_ms.unwrap();

        let state = t.tick_at(started_at + 26 * 60 * 1000);
        assert_eq!(state, TimerState::Completed);
        assert_eq!(t.remaining_ms(), 0);

        // Starting again refills the countdown.
        t.start();
        assert_eq!(t.state(), TimerState::Running);
        assert_eq!(t.remaining_ms(), 25 * 60 * 1000);
    }

    #[test]
    fn pause_freezes_remaining_time() {
        let mut t = timer();
        t.start();
        let started_at = t.last_tick_epoch_ms.unwrap();
        t.tick_at(started_at + 5_000);

        t.pause();
        assert_eq!(t.state(), TimerState::Paused);
        let frozen = t.remaining_ms();

        // Ticks while paused change nothing.
        t.tick_at(started_at + 60_000);
        assert_eq!(t.remaining_ms(), frozen);

        t.resume();
        assert_eq!(t.state(), TimerState::Running);
    }

    #[test]
    fn switch_mode_resets() {
        let mut t = timer();
        t.start();
        let started_at = t.last_tick_epoch_ms.unwrap();
        t.tick_at(started_at + 5_000);

        t.switch_mode(TimerMode::ShortBreak);
        assert_eq!(t.state(), TimerState::Idle);
        assert_eq!(t.remaining_ms(), 5 * 60 * 1000);
    }

    #[test]
    fn serde_round_trip() {
        let mut t = timer();
        t.start();
        let json = serde_json::to_string(&t).unwrap();
        let decoded: FocusTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.state(), TimerState::Running);
        assert_eq!(decoded.mode(), TimerMode::Focus);
    }
}
