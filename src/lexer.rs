//! # Lexer
//!
//! Splits one body line of AlphaTex into words and classifies each word once.
//!
//! Structural characters `{ } ( )` always stand alone, even when written
//! against a note (`(0.1 2.2)` gives `(`, `0.1`, `2.2`, `)`). Everything else
//! is split on whitespace. Words are borrowed from the input line, so the
//! original text of every token is emitted back verbatim.
//!
//! Classification never fails: a word that fits no other kind is `Opaque`.

use crate::rhythm::{leading_integer, parse_duration};

/// Keyword that opens a tuplet, as in `\tuplet 3 { 1.1 2.1 3.1 }`.
pub const TUPLET_KEYWORD: &str = "\\tuplet";

/// Bar separator inserted by default.
pub const DEFAULT_SEPARATOR: &str = "|";

/// Characters that always form a token of their own.
pub const STRUCTURAL_CHARS: [char; 4] = ['{', '}', '(', ')'];

/// Token types for a body line
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `\tuplet`, with the note count read from the following word
    TupletKeyword { count: Option<u32> },
    /// Note-shaped word right after `\tuplet`
    TupletCount,
    /// `:4`, `:8.` (value in whole notes)
    Duration(f64),
    /// Starts with `:` but has no usable denominator (`:0`, `:x`)
    InvalidDuration,

    OpenBrace,  // {
    CloseBrace, // }
    OpenParen,  // (
    CloseParen, // )

    /// Note or rest: starts with a digit or `r`
    Note,
    /// A separator already present in the source
    BarLine,
    Opaque,
}

/// A token with its source text and position in the line
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedToken<'a> {
    pub token: Token,
    pub text: &'a str,
    /// 1-based index of the token within the line
    pub column: usize,
}

/// Split a line into words, giving each structural character its own word.
///
/// Empty words are dropped; order is preserved.
pub fn split_line(line: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for chunk in line.split_whitespace() {
        let mut start = 0;
        for (i, c) in chunk.char_indices() {
            if STRUCTURAL_CHARS.contains(&c) {
                if start < i {
                    words.push(&chunk[start..i]);
                }
                words.push(&chunk[i..i + c.len_utf8()]);
                start = i + c.len_utf8();
            }
        }
        if start < chunk.len() {
            words.push(&chunk[start..]);
        }
    }
    words
}

/// Note or rest: a leading digit or `r`.
pub fn is_note_or_rest(word: &str) -> bool {
    matches!(word.chars().next(), Some(c) if c.is_ascii_digit() || c == 'r')
}

/// Lexer for one body line
pub struct Lexer<'a> {
    words: Vec<&'a str>,
    separator: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            words: split_line(line),
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Recognize `separator` instead of `|` as an existing bar line.
    pub fn with_separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }

    pub fn tokenize(&self) -> Vec<LocatedToken<'a>> {
        self.words
            .iter()
            .enumerate()
            .map(|(i, &text)| {
                let prev = i.checked_sub(1).map(|p| self.words[p]);
                let next = self.words.get(i + 1).copied();
                LocatedToken {
                    token: self.classify(text, prev, next),
                    text,
                    column: i + 1,
                }
            })
            .collect()
    }

    fn classify(&self, word: &str, prev: Option<&str>, next: Option<&str>) -> Token {
        if word == TUPLET_KEYWORD {
            return Token::TupletKeyword {
                count: next.and_then(leading_integer),
            };
        }

        if word.starts_with(':') {
            return match parse_duration(word) {
                Some(value) => Token::Duration(value),
                None => Token::InvalidDuration,
            };
        }

        match word {
            "{" => return Token::OpenBrace,
            "}" => return Token::CloseBrace,
            "(" => return Token::OpenParen,
            ")" => return Token::CloseParen,
            _ => {}
        }

        if is_note_or_rest(word) {
            if prev == Some(TUPLET_KEYWORD) {
                return Token::TupletCount;
            }
            return Token::Note;
        }

        if word == self.separator {
            return Token::BarLine;
        }

        Token::Opaque
    }
}
