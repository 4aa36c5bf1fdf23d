//! Timer engine: the focus/break state machine

use serde::Serialize;
use tracing::debug;

use super::timer_state::{format_mm_ss, DurationField, Field, FieldValue, Mode, TimerState};

/// A switch from one mode to the other, emitted when a countdown runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeTransition {
    pub from: Mode,
    pub to: Mode,
}

/// What a single tick did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The active countdown went down by one second
    Counted { mode: Mode, left: u32 },
    /// The active countdown was already at zero and the mode flipped
    Switched(ModeTransition),
}

/// Display values derived from the state at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    #[serde(flatten)]
    pub state: TimerState,
    pub mode: Mode,
    pub focus_max_time: String,
    pub focus_left_time: String,
    pub break_max_time: String,
    pub break_left_time: String,
    pub active_left_time: String,
    pub progress_percent: f64,
}

/// Owns the timer state; all mutation goes through the methods below
#[derive(Debug, Clone, Default)]
pub struct TimerEngine {
    state: TimerState,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self { state: TimerState::new() }
    }

    /// Create an engine with custom initial durations, clamped into bounds
    pub fn with_durations(focus_seconds: u32, break_seconds: u32) -> Self {
        Self {
            state: TimerState::with_durations(focus_seconds, break_seconds),
        }
    }

    /// Advance the active countdown by one second.
    ///
    /// When the active countdown is already at zero the engine switches mode
    /// instead of counting, and the returned transition is the signal for
    /// whatever alert the caller wants to fire.
    pub fn tick(&mut self) -> TickOutcome {
        let mode = self.state.mode();
        let left = match mode {
            Mode::Focus => &mut self.state.focus_left,
            Mode::Break => &mut self.state.break_left,
        };

        if *left == 0 {
            self.switch_mode();
            return TickOutcome::Switched(ModeTransition { from: mode, to: mode.other() });
        }

        *left -= 1;
        TickOutcome::Counted { mode, left: *left }
    }

    /// Flip the mode and refill both countdowns
    fn switch_mode(&mut self) {
        self.state.focus = !self.state.focus;
        self.state.focus_left = self.state.focus_max;
        self.state.break_left = self.state.break_max;
        debug!("Switched to {} mode", self.state.mode());
    }

    /// Adjust a mode's duration by `delta` seconds, clamped into the mode's
    /// bounds, and restart that mode's countdown at the new duration.
    ///
    /// Returns the new duration.
    pub fn change_max(&mut self, mode: Mode, delta: i64) -> u32 {
        let bounds = mode.bounds();
        let current = self.state.seconds(DurationField::max_of(mode)) as i64;
        let requested = current.saturating_add(delta);

        // Only the bound in the direction of travel applies
        let new_max = if delta < 0 {
            requested.max(bounds.floor as i64)
        } else {
            requested.min(bounds.roof as i64)
        };
        let new_max = new_max as u32;

        match mode {
            Mode::Focus => {
                self.state.focus_max = new_max;
                self.state.focus_left = new_max;
            }
            Mode::Break => {
                self.state.break_max = new_max;
                self.state.break_left = new_max;
            }
        }
        new_max
    }

    /// Toggle running. Returns the new running flag.
    pub fn play_pause(&mut self) -> bool {
        self.state.is_running = !self.state.is_running;
        if self.state.is_running {
            self.state.session_started = true;
        }
        self.state.is_running
    }

    /// Hard reset: stop, refill both countdowns and return to focus mode
    pub fn stop(&mut self) {
        self.state.is_running = false;
        self.state.session_started = false;
        self.state.focus_left = self.state.focus_max;
        self.state.break_left = self.state.break_max;
        self.state.focus = true;
    }

    /// Format a duration field as "MM:SS"
    pub fn get_time(&self, field: DurationField) -> String {
        format_mm_ss(self.state.seconds(field))
    }

    pub fn get(&self, field: Field) -> FieldValue {
        self.state.value(field)
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn active_mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn active_left(&self) -> u32 {
        self.state.seconds(DurationField::left_of(self.active_mode()))
    }

    pub fn active_max(&self) -> u32 {
        self.state.seconds(DurationField::max_of(self.active_mode()))
    }

    /// Fraction of the active countdown already elapsed, in [0, 1]
    pub fn progress(&self) -> f64 {
        let max = self.active_max();
        if max == 0 {
            return 1.0;
        }
        1.0 - self.active_left() as f64 / max as f64
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state.clone(),
            mode: self.active_mode(),
            focus_max_time: self.get_time(DurationField::FocusMax),
            focus_left_time: self.get_time(DurationField::FocusLeft),
            break_max_time: self.get_time(DurationField::BreakMax),
            break_left_time: self.get_time(DurationField::BreakLeft),
            active_left_time: format_mm_ss(self.active_left()),
            progress_percent: (self.progress() * 1000.0).round() / 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::timer_state::{BREAK_BOUNDS, FOCUS_BOUNDS};

    fn running_engine() -> TimerEngine {
        let mut engine = TimerEngine::new();
        engine.play_pause();
        engine
    }

    #[test]
    fn test_tick_counts_down_active_mode_only() {
        let mut engine = running_engine();
        assert_eq!(engine.tick(), TickOutcome::Counted { mode: Mode::Focus, left: 1499 });
        assert_eq!(engine.state().focus_left, 1499);
        assert_eq!(engine.state().break_left, 300);
    }

    #[test]
    fn test_focus_runs_out_then_switches_to_break() {
        let mut engine = running_engine();
        engine.change_max(Mode::Focus, -1200);
        let focus_left = engine.state().focus_left;
        assert_eq!(focus_left, 300);

        for _ in 0..focus_left {
            assert!(matches!(engine.tick(), TickOutcome::Counted { mode: Mode::Focus, .. }));
        }
        assert_eq!(engine.state().focus_left, 0);
        assert!(engine.state().focus);

        let outcome = engine.tick();
        assert_eq!(
            outcome,
            TickOutcome::Switched(ModeTransition { from: Mode::Focus, to: Mode::Break })
        );
        let state = engine.state();
        assert!(!state.focus);
        assert_eq!(state.focus_left, state.focus_max);
        assert_eq!(state.break_left, state.break_max);
    }

    #[test]
    fn test_break_runs_out_then_switches_to_focus() {
        let mut engine = running_engine();
        engine.change_max(Mode::Focus, -10_000);
        engine.change_max(Mode::Break, -10_000);
        for _ in 0..=300 {
            engine.tick();
        }
        assert_eq!(engine.active_mode(), Mode::Break);

        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(engine.state().break_left, 0);
        assert_eq!(
            engine.tick(),
            TickOutcome::Switched(ModeTransition { from: Mode::Break, to: Mode::Focus })
        );
        assert_eq!(engine.active_mode(), Mode::Focus);
        assert_eq!(engine.state().focus_left, 300);
    }

    #[test]
    fn test_inactive_countdown_is_untouched() {
        let mut engine = running_engine();
        engine.change_max(Mode::Focus, -1200);
        for _ in 0..=300 {
            engine.tick();
        }
        engine.tick();
        engine.tick();
        assert_eq!(engine.state().break_left, 298);
        assert_eq!(engine.state().focus_left, 300);
    }

    #[test]
    fn test_change_max_clamps_focus_at_floor() {
        let mut engine = TimerEngine::new();
        for _ in 0..5 {
            engine.change_max(Mode::Focus, -300);
        }
        assert_eq!(engine.state().focus_max, 300);
        assert_eq!(engine.get_time(DurationField::FocusMax), "05:00");
    }

    #[test]
    fn test_change_max_clamps_break_at_roof() {
        let mut engine = TimerEngine::new();
        for _ in 0..11 {
            engine.change_max(Mode::Break, 60);
        }
        assert_eq!(engine.state().break_max, 900);
        assert_eq!(engine.get_time(DurationField::BreakMax), "15:00");
    }

    #[test]
    fn test_change_max_focus_roof_renders_sixty_minutes() {
        let mut engine = TimerEngine::new();
        assert_eq!(engine.change_max(Mode::Focus, i64::MAX), 3600);
        assert_eq!(engine.get_time(DurationField::FocusMax), "60:00");
        assert_eq!(engine.change_max(Mode::Focus, i64::MIN), 300);
    }

    #[test]
    fn test_change_max_keeps_bounds_for_any_sequence() {
        let deltas = [-300, 900, 1, -7, 4000, -4000, 0, 299, -61, 60, 17];
        let mut engine = TimerEngine::new();
        for delta in deltas {
            engine.change_max(Mode::Focus, delta);
            engine.change_max(Mode::Break, delta);
            let state = engine.state();
            assert!(state.focus_max >= FOCUS_BOUNDS.floor && state.focus_max <= FOCUS_BOUNDS.roof);
            assert!(state.break_max >= BREAK_BOUNDS.floor && state.break_max <= BREAK_BOUNDS.roof);
            assert_eq!(state.focus_left, state.focus_max);
            assert_eq!(state.break_left, state.break_max);
        }
    }

    #[test]
    fn test_change_max_restarts_running_countdown() {
        let mut engine = running_engine();
        for _ in 0..10 {
            engine.tick();
        }
        engine.change_max(Mode::Focus, 300);
        assert_eq!(engine.state().focus_left, 1800);
        assert!(engine.is_running());
    }

    #[test]
    fn test_play_pause_session_started() {
        let mut engine = TimerEngine::new();
        assert!(engine.play_pause());
        assert!(engine.state().session_started);
        assert!(!engine.play_pause());
        assert!(engine.state().session_started);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_stop_resets_from_any_state() {
        let mut engine = running_engine();
        engine.change_max(Mode::Focus, -1200);
        for _ in 0..320 {
            engine.tick();
        }
        assert_eq!(engine.active_mode(), Mode::Break);

        engine.stop();
        let state = engine.state();
        assert!(!state.is_running);
        assert!(!state.session_started);
        assert!(state.focus);
        assert_eq!(state.focus_left, 300);
        assert_eq!(state.break_left, 300);
    }

    #[test]
    fn test_get_time_defaults() {
        let engine = TimerEngine::new();
        assert_eq!(engine.get_time(DurationField::FocusMax), "25:00");
        assert_eq!(engine.get_time(DurationField::BreakMax), "05:00");
    }

    #[test]
    fn test_get_raw_fields() {
        let engine = running_engine();
        assert_eq!(engine.get(Field::FocusLeft), FieldValue::Seconds(1500));
        assert_eq!(engine.get(Field::IsRunning), FieldValue::Flag(true));
        assert_eq!(engine.get(Field::Focus), FieldValue::Flag(true));
    }

    #[test]
    fn test_progress_follows_active_mode() {
        let mut engine = running_engine();
        assert_eq!(engine.progress(), 0.0);
        for _ in 0..750 {
            engine.tick();
        }
        assert!((engine.progress() - 0.5).abs() < f64::EPSILON);
        assert_eq!(engine.snapshot().progress_percent, 50.0);
        assert_eq!(engine.snapshot().active_left_time, "12:30");
    }
}
