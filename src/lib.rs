//! A packrat parser-combinator engine for mutually recursive, ambiguous
//! grammars, inspired by Parsec and Haskell's parser combinators.
//!
//! Unlike a conventional single-result combinator library, every parser
//! here returns a [`result::ResultList`]: an ordered collection of
//! ambiguous successes paired with a furthest-failure record. A grammar
//! is a fixed bundle of mutually recursive non-terminals (built with the
//! [`grammar!`] macro); the engine memoizes each one per input position
//! (packrat-style) via a lazily constructed [`tails::Tails`] table, then
//! extracts every non-terminal's parses with [`entry::parse_prefix`] or
//! [`entry::parse_complete`].

#[macro_use]
mod macros;

pub mod combinators;
pub mod entry;
pub mod error;
pub mod grammar;
pub mod input;
pub mod memo;
pub mod parser;
pub mod peg;
pub mod result;
pub mod tails;
pub mod text;

pub use combinators::*;
pub use entry::{parse_complete, parse_prefix};
pub use error::{ParseFailure, ParseResults};
pub use grammar::Grammar;
pub use input::{Input, TokenSlice};
pub use memo::MemoCell;
pub use parser::{eof, fail, map2, map3, nt, pure, tuple2, tuple3, unexpected, Parser};
pub use peg::{longest, peg, terminal_peg, MeasuredPegParser, PegOutcome};
pub use result::{Failure, ResultInfo, ResultList};
pub use tails::{build as build_tails, reparse_head, TailNode, Tails};
pub use text::*;
