//! Top-level entry points: drive a full parse of an input against a
//! grammar bundle and extract the user-facing result bundle.

use crate::grammar::Grammar;
use crate::tails;

/// Parses `input` against every non-terminal in `parsers`, reporting
/// every valid parse whether or not it consumes the whole input.
pub fn parse_prefix<G: Grammar>(parsers: G::Parsers, input: G::Input) -> G::Results {
    let head = tails::build::<G>(parsers, input);
    let total_len = head.len();
    let node = head
        .node()
        .expect("a tail table built by tails::build always has at least one entry");
    G::extract(&node.memo, total_len)
}

/// Parses `input` against every non-terminal in `parsers`, keeping only
/// parses that consume the entire input: recomputes just the leading
/// tail-table position with every field required to reach end-of-input,
/// reusing every other position's memo unchanged.
pub fn parse_complete<G: Grammar>(parsers: G::Parsers, input: G::Input) -> G::Results {
    let head = tails::build::<G>(parsers.clone(), input);
    let total_len = head.len();
    let eof_parsers = G::require_eof(&parsers);
    let reparsed = tails::reparse_head::<G>(&head, eof_parsers);
    let node = reparsed
        .node()
        .expect("a tail table built by tails::build always has at least one entry");
    G::extract(&node.memo, total_len)
}
