//! The `Grammar` trait: in a host language without higher-kinded types, a
//! bundle's `map`/`fold`/`traverse` operations are hand-written per
//! concrete bundle rather than derived from a single generic abstraction.
//! Here, the two concrete operations the engine actually needs —
//! "turn a `Parsers` bundle into a memoized `Memo` bundle at one tail-table
//! position" and "turn a `Memo` bundle into a `Results` bundle" — are the
//! `build_memo` and `extract` methods below. The [`grammar!`] macro
//! (`src/macros.rs`) generates both, plus the supporting `Parsers`/`Memo`/
//! `Results` structs, from one record of named combinator expressions.

use crate::input::Input;
use crate::tails::TailNode;
use std::rc::Weak;

/// A fixed, named set of mutually recursive non-terminals sharing one
/// input type and one memoization scheme.
///
/// `Parsers` is a bundle of combinator expressions, built once and reused
/// for every parse. `Memo` is the memoized counterpart: one
/// [`crate::memo::MemoCell`] per field, populated lazily at each
/// tail-table position. `Results` is the extracted, user-facing bundle
/// produced by [`Grammar::extract`] at the end of a parse.
pub trait Grammar: Sized + 'static {
    type Input: Input;
    type Parsers: Clone;
    type Memo;
    type Results;

    /// Builds the memoized bundle for one tail-table position. `here` is
    /// a weak reference to the node under construction (via
    /// [`std::rc::Rc::new_cyclic`]): each field's thunk upgrades it on
    /// first demand to obtain the `Tails` it should parse against,
    /// allowing same-position non-terminal cross-references.
    fn build_memo(parsers: &Self::Parsers, here: Weak<TailNode<Self>>) -> Self::Memo;

    /// Converts a fully-memoized bundle at one position into the
    /// extracted, user-facing result bundle.
    fn extract(memo: &Self::Memo, total_len: usize) -> Self::Results;

    /// Returns a copy of `parsers` with every field required to reach
    /// end-of-input (`field <* eof`), used by `parse_complete`.
    fn require_eof(parsers: &Self::Parsers) -> Self::Parsers;
}
