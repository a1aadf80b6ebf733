//! # Bar Injector
//!
//! Walks AlphaTex source line by line and inserts a separator after every
//! token that fills the current measure.
//!
//! ## Regions
//! The source starts in the header. A line holding only `.` switches to the
//! body and starts a fresh measure.
//! - Header lines are scanned for `\ts N D` and emitted as they are.
//! - Body lines containing `\ts N D` change the signature and are emitted as
//!   they are.
//! - Other body lines are tokenized, fed through [`RhythmState`] and rebuilt
//!   with single spaces between tokens.
//!
//! ## Leniency
//! Nothing is rejected. Malformed durations, unbalanced chords and tuplets,
//! and unusable time signatures pass through untouched. Each is recorded as
//! a [`Diagnostic`] in the [`InjectionReport`] so callers can surface it.

use std::fmt;

use serde::Serialize;

use crate::config::BarConfig;
use crate::lexer::{Lexer, Token};
use crate::rhythm::{find_time_signature, RhythmState, TimeSignature};

/// Line that separates the header from the body
pub const BODY_MARKER: &str = ".";

/// Something odd in the source that was passed through anyway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    InvalidDuration,
    MissingTupletCount,
    UnexpectedTupletClose,
    UnclosedTuplet,
    NestedChord,
    UnexpectedChordClose,
    UnclosedChord,
    RejectedTimeSignature,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::InvalidDuration => "duration marker has no usable denominator",
            Self::MissingTupletCount => "tuplet keyword is not followed by a note count",
            Self::UnexpectedTupletClose => "'}' without an open tuplet",
            Self::UnclosedTuplet => "tuplet is never closed",
            Self::NestedChord => "'(' inside an open chord",
            Self::UnexpectedChordClose => "')' without an open chord",
            Self::UnclosedChord => "chord is never closed",
            Self::RejectedTimeSignature => "time signature has a zero part and was ignored",
        };
        f.write_str(message)
    }
}

/// A diagnostic anchored to a token
///
/// `line` is 1-based in the source. `column` is the 1-based token index
/// within the line (1 for whole-line diagnostics).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub kind: DiagnosticKind,
    pub token: String,
}

/// Summary of one injection pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectionReport {
    pub bars_inserted: usize,
    pub body_lines: usize,
    pub time_signature_changes: usize,
    /// Duration already in the last, unfinished measure (whole notes)
    pub trailing_fill: f64,
    pub diagnostics: Vec<Diagnostic>,
}

/// Injected text together with its report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Injection {
    pub output: String,
    pub report: InjectionReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Header,
    Body,
}

/// Line-by-line driver for one injection pass
///
/// Owns its [`RhythmState`]; build a new injector for every source text.
pub struct Injector<'c> {
    separator: &'c str,
    state: RhythmState,
    region: Region,
    line_number: usize,
    chord_opened_at: Option<(usize, usize)>,
    tuplet_opened_at: Option<(usize, usize)>,
    report: InjectionReport,
}

impl<'c> Injector<'c> {
    pub fn new(config: &'c BarConfig) -> Self {
        Self {
            separator: &config.separator,
            state: config.rhythm_state(),
            region: Region::Header,
            line_number: 0,
            chord_opened_at: None,
            tuplet_opened_at: None,
            report: InjectionReport::default(),
        }
    }

    pub fn state(&self) -> &RhythmState {
        &self.state
    }

    /// Process the next source line and return its output line.
    pub fn process_line(&mut self, line: &str) -> String {
        self.line_number += 1;
        let trimmed = line.trim();

        if trimmed == BODY_MARKER {
            self.region = Region::Body;
            self.state.reset_accumulator();
            return trimmed.to_string();
        }

        if self.region == Region::Body {
            self.report.body_lines += 1;
        }

        if let Some(ts) = find_time_signature(trimmed) {
            self.apply_time_signature(ts, trimmed);
            return trimmed.to_string();
        }

        match self.region {
            Region::Header => trimmed.to_string(),
            Region::Body => self.process_body_line(trimmed),
        }
    }

    /// Close the pass: report unbalanced groups and the unfinished measure.
    pub fn finish(mut self) -> InjectionReport {
        if self.state.in_chord() {
            if let Some((line, column)) = self.chord_opened_at {
                self.push_diagnostic(line, column, DiagnosticKind::UnclosedChord, "(");
            }
        }
        if self.state.in_tuplet() {
            if let Some((line, column)) = self.tuplet_opened_at {
                self.push_diagnostic(line, column, DiagnosticKind::UnclosedTuplet, "\\tuplet");
            }
        }
        self.report.trailing_fill = self.state.accumulator();
        self.report
    }

    fn apply_time_signature(&mut self, ts: TimeSignature, line: &str) {
        if self.state.set_time_signature(ts) {
            log::debug!("line {}: time signature {}", self.line_number, ts);
            self.report.time_signature_changes += 1;
        } else {
            self.push_diagnostic(
                self.line_number,
                1,
                DiagnosticKind::RejectedTimeSignature,
                line,
            );
        }
    }

    fn process_body_line(&mut self, line: &str) -> String {
        let separator = self.separator;
        let tokens = Lexer::new(line).with_separator(separator).tokenize();
        let mut emitted: Vec<&str> = Vec::with_capacity(tokens.len() + 1);
        // Set right after a separator is inserted; the one literal separator
        // that follows is the one we would have inserted and is dropped.
        let mut after_inserted_bar = false;

        for located in &tokens {
            log::trace!(
                "line {} token {}: {:?} {:?}",
                self.line_number,
                located.column,
                located.text,
                located.token
            );

            match located.token {
                Token::TupletKeyword { count } => {
                    match count {
                        Some(notes) => {
                            self.state.start_tuplet(notes);
                            self.tuplet_opened_at = Some((self.line_number, located.column));
                        }
                        None => self.diagnose(located.column, DiagnosticKind::MissingTupletCount, located.text),
                    }
                    emitted.push(located.text);
                    after_inserted_bar = false;
                    continue;
                }
                Token::Duration(value) => {
                    self.state.set_duration(value);
                    emitted.push(located.text);
                    after_inserted_bar = false;
                    continue;
                }
                Token::BarLine if after_inserted_bar => {
                    after_inserted_bar = false;
                    continue;
                }
                Token::InvalidDuration => {
                    self.diagnose(located.column, DiagnosticKind::InvalidDuration, located.text);
                }
                Token::OpenBrace => {}
                Token::CloseBrace => {
                    if !self.state.in_tuplet() {
                        self.diagnose(located.column, DiagnosticKind::UnexpectedTupletClose, located.text);
                    }
                    self.state.end_tuplet();
                }
                Token::OpenParen => {
                    if self.state.in_chord() {
                        self.diagnose(located.column, DiagnosticKind::NestedChord, located.text);
                    }
                    self.state.open_chord();
                    self.chord_opened_at = Some((self.line_number, located.column));
                }
                Token::CloseParen => {
                    if !self.state.in_chord() {
                        self.diagnose(located.column, DiagnosticKind::UnexpectedChordClose, located.text);
                    }
                    self.state.close_chord();
                }
                Token::Note => self.state.add_note(located.text),
                Token::TupletCount | Token::BarLine | Token::Opaque => {}
            }

            emitted.push(located.text);
            after_inserted_bar = false;

            if self.state.should_insert_bar() {
                log::debug!(
                    "line {}: bar after token {} ({:?})",
                    self.line_number,
                    located.column,
                    located.text
                );
                emitted.push(separator);
                after_inserted_bar = true;
                self.report.bars_inserted += 1;
            }
        }

        emitted.join(" ")
    }

    fn diagnose(&mut self, column: usize, kind: DiagnosticKind, token: &str) {
        self.push_diagnostic(self.line_number, column, kind, token);
    }

    fn push_diagnostic(&mut self, line: usize, column: usize, kind: DiagnosticKind, token: &str) {
        log::debug!("line {}, token {}: {} ({:?})", line, column, kind, token);
        self.report.diagnostics.push(Diagnostic {
            line,
            column,
            kind,
            token: token.to_string(),
        });
    }
}

/// Run one full injection pass over `source`.
pub fn inject(source: &str, config: &BarConfig) -> Injection {
    let mut injector = Injector::new(config);
    if source.is_empty() {
        return Injection {
            output: String::new(),
            report: injector.finish(),
        };
    }

    let output = source
        .split('\n')
        .map(|line| injector.process_line(line))
        .collect::<Vec<_>>()
        .join("\n");

    Injection {
        output,
        report: injector.finish(),
    }
}
