//! Timer state record, modes and field names

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Default focus duration (25 minutes)
pub const DEFAULT_FOCUS_SECONDS: u32 = 25 * 60;
/// Default break duration (5 minutes)
pub const DEFAULT_BREAK_SECONDS: u32 = 5 * 60;

/// Inclusive bounds for a mode's configured duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub floor: u32,
    pub roof: u32,
}

impl Bounds {
    /// Clamp a (possibly negative) number of seconds into the bounds
    pub fn clamp(&self, seconds: i64) -> u32 {
        seconds.clamp(self.floor as i64, self.roof as i64) as u32
    }
}

/// Focus may be set between 5 and 60 minutes
pub const FOCUS_BOUNDS: Bounds = Bounds { floor: 5 * 60, roof: 60 * 60 };
/// Break may be set between 1 and 15 minutes
pub const BREAK_BOUNDS: Bounds = Bounds { floor: 60, roof: 15 * 60 };

/// The two alternating timer modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Focus,
    Break,
}

impl Mode {
    pub fn bounds(&self) -> Bounds {
        match self {
            Mode::Focus => FOCUS_BOUNDS,
            Mode::Break => BREAK_BOUNDS,
        }
    }

    /// Step used by the increase/decrease controls
    pub fn standard_step(&self) -> i64 {
        match self {
            Mode::Focus => 5 * 60,
            Mode::Break => 60,
        }
    }

    pub fn other(&self) -> Mode {
        match self {
            Mode::Focus => Mode::Break,
            Mode::Break => Mode::Focus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::Break => "break",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(Mode::Focus),
            "break" => Ok(Mode::Break),
            other => Err(TimerError::UnknownMode(other.to_string())),
        }
    }
}

/// Fields holding a number of seconds, the ones `get_time` can format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationField {
    FocusMax,
    FocusLeft,
    BreakMax,
    BreakLeft,
}

impl DurationField {
    pub fn max_of(mode: Mode) -> Self {
        match mode {
            Mode::Focus => DurationField::FocusMax,
            Mode::Break => DurationField::BreakMax,
        }
    }

    pub fn left_of(mode: Mode) -> Self {
        match mode {
            Mode::Focus => DurationField::FocusLeft,
            Mode::Break => DurationField::BreakLeft,
        }
    }
}

impl FromStr for DurationField {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field: Field = s.parse()?;
        DurationField::try_from(field)
    }
}

impl TryFrom<Field> for DurationField {
    type Error = TimerError;

    fn try_from(field: Field) -> Result<Self, Self::Error> {
        match field {
            Field::FocusMax => Ok(DurationField::FocusMax),
            Field::FocusLeft => Ok(DurationField::FocusLeft),
            Field::BreakMax => Ok(DurationField::BreakMax),
            Field::BreakLeft => Ok(DurationField::BreakLeft),
            other => Err(TimerError::NotADuration(other)),
        }
    }
}

impl From<DurationField> for Field {
    fn from(field: DurationField) -> Self {
        match field {
            DurationField::FocusMax => Field::FocusMax,
            DurationField::FocusLeft => Field::FocusLeft,
            DurationField::BreakMax => Field::BreakMax,
            DurationField::BreakLeft => Field::BreakLeft,
        }
    }
}

/// Every field of the timer state, addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FocusMax,
    FocusLeft,
    BreakMax,
    BreakLeft,
    IsRunning,
    Focus,
    SessionStarted,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FocusMax,
        Field::FocusLeft,
        Field::BreakMax,
        Field::BreakLeft,
        Field::IsRunning,
        Field::Focus,
        Field::SessionStarted,
    ];

    /// The camelCase name used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Field::FocusMax => "focusMax",
            Field::FocusLeft => "focusLeft",
            Field::BreakMax => "breakMax",
            Field::BreakLeft => "breakLeft",
            Field::IsRunning => "isRunning",
            Field::Focus => "focus",
            Field::SessionStarted => "sessionStarted",
        }
    }

    fn snake_name(&self) -> &'static str {
        match self {
            Field::FocusMax => "focus_max",
            Field::FocusLeft => "focus_left",
            Field::BreakMax => "break_max",
            Field::BreakLeft => "break_left",
            Field::IsRunning => "is_running",
            Field::Focus => "focus",
            Field::SessionStarted => "session_started",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s || field.snake_name() == s)
            .ok_or_else(|| TimerError::UnknownField(s.to_string()))
    }
}

/// Raw value of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Seconds(u32),
    Flag(bool),
}

/// The complete timer state record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub focus_max: u32,
    pub focus_left: u32,
    pub break_max: u32,
    pub break_left: u32,
    pub is_running: bool,
    pub focus: bool,
    pub session_started: bool,
}

impl TimerState {
    /// Create an idle state in focus mode with the default durations
    pub fn new() -> Self {
        Self::with_durations(DEFAULT_FOCUS_SECONDS, DEFAULT_BREAK_SECONDS)
    }

    /// Create an idle state with custom durations, clamped into bounds
    pub fn with_durations(focus_seconds: u32, break_seconds: u32) -> Self {
        let focus_max = FOCUS_BOUNDS.clamp(focus_seconds as i64);
        let break_max = BREAK_BOUNDS.clamp(break_seconds as i64);
        Self {
            focus_max,
            focus_left: focus_max,
            break_max,
            break_left: break_max,
            is_running: false,
            focus: true,
            session_started: false,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.focus { Mode::Focus } else { Mode::Break }
    }

    pub fn seconds(&self, field: DurationField) -> u32 {
        match field {
            DurationField::FocusMax => self.focus_max,
            DurationField::FocusLeft => self.focus_left,
            DurationField::BreakMax => self.break_max,
            DurationField::BreakLeft => self.break_left,
        }
    }

    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::FocusMax => FieldValue::Seconds(self.focus_max),
            Field::FocusLeft => FieldValue::Seconds(self.focus_left),
            Field::BreakMax => FieldValue::Seconds(self.break_max),
            Field::BreakLeft => FieldValue::Seconds(self.break_left),
            Field::IsRunning => FieldValue::Flag(self.is_running),
            Field::Focus => FieldValue::Flag(self.focus),
            Field::SessionStarted => FieldValue::Flag(self.session_started),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as zero-padded "MM:SS", minutes never roll into hours
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
