//! # Rhythm Module
//!
//! Measure bookkeeping for bar injection.
//!
//! ## Sub-modules
//! - `duration` - Duration markers (`:4`, `:8.`) and the dotted-note rule
//! - `time_signature` - `\ts N D` directives and measure capacity
//! - `tuplet` - Tuplet scaling ratios
//! - `state` - [`RhythmState`], the per-call accumulator
//!
//! ## Units
//! Every duration is an `f64` fraction of a whole note: a quarter is `0.25`,
//! a 3/4 measure holds `0.75`. Comparisons against the measure capacity use a
//! small tolerance (`0.001` by default) to absorb floating-point drift.
//!
//! ## Example
//! ```rust
//! use alphabar::rhythm::{parse_duration, RhythmState, TimeSignature};
//!
//! let mut state = RhythmState::new();
//! state.set_time_signature(TimeSignature::new(3, 4));
//! state.set_duration(parse_duration(":4").unwrap());
//!
//! state.add_note("1.1");
//! state.add_note("2.1");
//! assert!(!state.should_insert_bar());
//! state.add_note("3.1");
//! assert!(state.should_insert_bar());
//! assert_eq!(state.accumulator(), 0.0);
//! ```

mod duration;
mod state;
mod time_signature;
mod tuplet;


pub use duration::{
    is_dotted_note, is_guitar_coordinate, leading_integer, parse_duration, DOT_MULTIPLIER,
};
pub use state::{RhythmState, DEFAULT_DURATION, DEFAULT_TOLERANCE};
pub use time_signature::{find_time_signature, TimeSignature, TIME_SIGNATURE_KEYWORD};
pub use tuplet::tuplet_ratio;
