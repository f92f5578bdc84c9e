//! Error types for the parser combinator library.
//!
//! This engine never returns a bare `Result` from a parser — every
//! combinator returns a [`crate::result::ResultList`], which already
//! carries its own failure record — so `error.rs` owns only the
//! user-facing extraction boundary: converting an internal
//! [`crate::result::Failure`] into the 1-based, deduplicated-label
//! `ParseFailure` a caller sees, wrapped in [`ParseResults`].

use crate::grammar::Grammar;
use crate::result::ResultList;
use crate::tails::Tails;
use indexmap::IndexSet;
use std::fmt;

/// `Ok(X)` or `Err(ParseFailure)` — the result of extracting one
/// non-terminal's field from a parse.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseResults<X> {
    Ok(X),
    Err(ParseFailure),
}

impl<X> ParseResults<X> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ParseResults::Ok(_))
    }

    pub fn ok(self) -> Option<X> {
        match self {
            ParseResults::Ok(x) => Some(x),
            ParseResults::Err(_) => None,
        }
    }

    pub fn err(self) -> Option<ParseFailure> {
        match self {
            ParseResults::Ok(_) => None,
            ParseResults::Err(e) => Some(e),
        }
    }
}

/// A 1-based input position and the deduplicated labels expected there.
/// Position `1` means "just before the first prime element".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseFailure {
    pub position: usize,
    pub expected: Vec<String>,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expected.is_empty() {
            write!(f, "parse error at position {}", self.position)
        } else {
            write!(
                f,
                "parse error at position {}: expected {}",
                self.position,
                self.expected.join(" or ")
            )
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Converts one non-terminal's fully-evaluated `ResultList` into its
/// extracted `ParseResults` field. `grammar!`-generated `extract` impls
/// call this once per field.
pub fn extract_field<G: Grammar, R: Clone>(
    rl: &ResultList<Tails<G>, R>,
    total_len: usize,
) -> ParseResults<Vec<(G::Input, R)>> {
    if rl.has_successes() {
        let values = rl
            .successes()
            .into_iter()
            .map(|info| {
                let suffix = info
                    .remaining
                    .suffix()
                    .cloned()
                    .expect("a successful parse's continuation must be a live tail-table position");
                (suffix, info.value.clone())
            })
            .collect();
        ParseResults::Ok(values)
    } else {
        let failure = rl
            .failure()
            .expect("a ResultList always carries successes or a failure record");
        let position = total_len.saturating_sub(failure.position) + 1;
        let expected: IndexSet<String> = failure.expected.clone();
        ParseResults::Err(ParseFailure {
            position,
            expected: expected.into_iter().collect(),
        })
    }
}
