use super::duration::is_dotted_note;
use super::time_signature::TimeSignature;
use super::tuplet::tuplet_ratio;
use super::DOT_MULTIPLIER;

/// Default note duration before any marker: a quarter note.
pub const DEFAULT_DURATION: f64 = 0.25;

/// Slack allowed when comparing the accumulator to the measure capacity.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Tracks how much of the current measure has been consumed.
///
/// One instance lives for exactly one injection call. It is never shared
/// between calls; two threads injecting bars each build their own.
///
/// # Invariants
/// - `accumulator` goes back to zero at the body boundary, on every applied
///   time signature, and on every inserted bar
/// - `accumulator` does not move while inside a chord
/// - no bar is reported while inside a chord or a tuplet
/// - `limit` is always strictly positive
#[derive(Debug, Clone, PartialEq)]
pub struct RhythmState {
    current_duration: f64,
    accumulator: f64,
    limit: f64,
    in_chord: bool,
    in_tuplet: bool,
    tuplet_ratio: f64,
    tolerance: f64,
}

impl Default for RhythmState {
    fn default() -> Self {
        Self::new()
    }
}

impl RhythmState {
    /// Quarter-note durations in 4/4 with the standard tolerance.
    pub fn new() -> Self {
        Self::with_settings(TimeSignature::default(), DEFAULT_DURATION, DEFAULT_TOLERANCE)
    }

    /// Start from a custom time signature, note duration and tolerance.
    ///
    /// Values that would break the invariants fall back to the defaults.
    pub fn with_settings(time_signature: TimeSignature, duration: f64, tolerance: f64) -> Self {
        let limit = time_signature.capacity().unwrap_or(1.0);
        let current_duration = if duration > 0.0 && duration.is_finite() {
            duration
        } else {
            DEFAULT_DURATION
        };
        let tolerance = if tolerance >= 0.0 && tolerance.is_finite() {
            tolerance
        } else {
            DEFAULT_TOLERANCE
        };

        Self {
            current_duration,
            accumulator: 0.0,
            limit,
            in_chord: false,
            in_tuplet: false,
            tuplet_ratio: 1.0,
            tolerance,
        }
    }

    pub fn current_duration(&self) -> f64 {
        self.current_duration
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn in_chord(&self) -> bool {
        self.in_chord
    }

    pub fn in_tuplet(&self) -> bool {
        self.in_tuplet
    }

    pub fn tuplet_ratio(&self) -> f64 {
        self.tuplet_ratio
    }

    /// Apply a new time signature and start a fresh measure.
    ///
    /// Returns `false` and leaves the state untouched when the signature has
    /// a zero part.
    pub fn set_time_signature(&mut self, time_signature: TimeSignature) -> bool {
        match time_signature.capacity() {
            Some(limit) => {
                self.limit = limit;
                self.reset_accumulator();
                true
            }
            None => false,
        }
    }

    /// Replace the duration applied to subsequent notes.
    pub fn set_duration(&mut self, value: f64) {
        if value > 0.0 && value.is_finite() {
            self.current_duration = value;
        }
    }

    pub fn start_tuplet(&mut self, notes: u32) {
        self.tuplet_ratio = tuplet_ratio(notes);
        self.in_tuplet = true;
    }

    /// Leave the tuplet group. Safe to call without a matching start.
    pub fn end_tuplet(&mut self) {
        self.in_tuplet = false;
        self.tuplet_ratio = 1.0;
    }

    pub fn open_chord(&mut self) {
        self.in_chord = true;
    }

    pub fn close_chord(&mut self) {
        self.in_chord = false;
    }

    /// Advance the measure by one note or rest.
    ///
    /// Chord members sound together with the first, so they add nothing.
    pub fn add_note(&mut self, token: &str) {
        if self.in_chord {
            return;
        }

        let mut duration = self.current_duration;
        if is_dotted_note(token) {
            duration *= DOT_MULTIPLIER;
        }
        if self.in_tuplet {
            duration *= self.tuplet_ratio;
        }

        self.accumulator += duration;
    }

    /// Whether the measure is full. Starts the next measure when it is.
    pub fn should_insert_bar(&mut self) -> bool {
        if self.in_chord || self.in_tuplet {
            return false;
        }

        if self.accumulator >= self.limit - self.tolerance {
            self.accumulator = 0.0;
            return true;
        }
        false
    }

    /// Start a fresh measure and forget any open chord or tuplet.
    pub fn reset_accumulator(&mut self) {
        self.accumulator = 0.0;
        self.in_chord = false;
        self.in_tuplet = false;
        self.tuplet_ratio = 1.0;
    }
}
