//! Core `Parser` type and the Applicative/Monadic/choice combinator algebra.
//!
//! A one-struct-per-combinator encoding (`Map<P, F, ..>`, `And<L, R>`, ...),
//! monomorphized away at compile time, can't express this engine's
//! non-terminals: `grammar!` needs every field of a `Parsers` bundle to be
//! one concrete, nameable type even though fields reference each other
//! (mutual recursion), which rules out an anonymous per-combinator struct
//! type for each one. `Parser<G, R>` is instead a newtype over a shared,
//! type-erased closure — `Rc<dyn Fn(Tails<G>) -> ResultList<Tails<G>, R>>`
//! — so every combinator, however built, has the same concrete type. The
//! method-chaining surface (`map`, `and`, `skip`, `preceded_by`, `bind`,
//! `or`, ...) keeps the familiar Parsec-style names and intent throughout.

use crate::grammar::Grammar;
use crate::result::{ResultInfo, ResultList};
use crate::tails::Tails;
use std::rc::Rc;

type Eval<G, R> = dyn Fn(Tails<G>) -> ResultList<Tails<G>, R>;

/// A parser over grammar `G`'s input, producing values of type `R`.
///
/// Cheap to clone (`Rc` bump) so that a `Parsers` bundle's fields, and any
/// combinator built from them, can be shared freely without cloning the
/// underlying closure.
pub struct Parser<G: Grammar, R>(Rc<Eval<G, R>>);

impl<G: Grammar, R> Clone for Parser<G, R> {
    fn clone(&self) -> Self {
        Parser(self.0.clone())
    }
}

impl<G: Grammar, R> Parser<G, R> {
    pub fn new(f: impl Fn(Tails<G>) -> ResultList<Tails<G>, R> + 'static) -> Self {
        Parser(Rc::new(f))
    }

    /// Runs the parser against one tail-table position.
    pub fn eval(&self, tails: Tails<G>) -> ResultList<Tails<G>, R> {
        (self.0)(tails)
    }

    /// Applicative map: transforms every success value, leaving the
    /// failure record untouched.
    pub fn map<U: Clone + 'static>(self, f: impl Fn(R) -> U + 'static) -> Parser<G, U>
    where
        R: Clone,
    {
        Parser::new(move |tails| self.eval(tails).fmap(&f))
    }

    /// Applicative sequence: parse `self` then `other`, keeping both
    /// results as a pair.
    pub fn and<U: Clone + 'static>(self, other: Parser<G, U>) -> Parser<G, (R, U)>
    where
        R: Clone + 'static,
        U: Clone,
    {
        self.bind(move |r| {
            let r = r.clone();
            other.clone().map(move |u| (r.clone(), u))
        })
    }

    /// Parse `self` then `other`, keeping only `self`'s result.
    pub fn skip<U: Clone + 'static>(self, other: Parser<G, U>) -> Parser<G, R>
    where
        R: Clone + 'static,
    {
        self.and(other).map(|(r, _)| r)
    }

    /// Parse `other` then `self`, keeping only `self`'s result.
    pub fn preceded_by<U: Clone + 'static>(self, other: Parser<G, U>) -> Parser<G, R>
    where
        R: Clone + 'static,
    {
        other.and(self).map(|(_, r)| r)
    }

    /// Monadic bind: sequence `self`, then choose the next parser from its
    /// result value. Every success of `self` independently spawns
    /// `f(value)` against its own continuation; the merged results of all
    /// of them, plus `self`'s own failure record (if `self` had no
    /// successes), make up the returned list.
    pub fn bind<U: Clone + 'static>(
        self,
        f: impl Fn(R) -> Parser<G, U> + 'static,
    ) -> Parser<G, U>
    where
        R: Clone + 'static,
    {
        Parser::new(move |tails| {
            let left = self.eval(tails);
            let failure = left.failure().cloned();
            let continued = left
                .into_successes_vec()
                .into_iter()
                .map(|info| {
                    let next = f(info.value).eval(info.remaining);
                    shift_consumed(next, info.consumed)
                })
                .fold(ResultList::from_failure(failure.clone()), ResultList::merge);
            continued
        })
    }

    /// Unbiased choice: both alternatives always run; their
    /// successes concatenate (left before right) and their failures
    /// merge, keeping whichever got furthest.
    pub fn or(self, other: Parser<G, R>) -> Parser<G, R>
    where
        R: Clone,
    {
        Parser::new(move |tails: Tails<G>| self.eval(tails.clone()).merge(other.eval(tails)))
    }

    /// Biased choice: run `other` only if `self` produced no
    /// successes at all, short-circuiting instead of merging (used for
    /// deliberately non-ambiguous, first-match grammars like `if`/`i`).
    pub fn biased_or(self, other: Parser<G, R>) -> Parser<G, R>
    where
        R: Clone,
    {
        Parser::new(move |tails: Tails<G>| {
            let left = self.eval(tails.clone());
            if left.has_successes() {
                left
            } else {
                let left_failure = left.into_failure();
                let right = other.eval(tails);
                match left_failure {
                    Some(lf) => ResultList::from_failure(Some(lf)).merge(right),
                    None => right,
                }
            }
        })
    }

    /// `try`: on failure, discards any deeper failure position and
    /// labels so that an enclosing choice reports only what was expected
    /// right here, not wherever inside `self` things went wrong.
    pub fn try_(self) -> Parser<G, R> {
        Parser::new(move |tails: Tails<G>| {
            let pos = tails.len();
            self.eval(tails).rewind_failure(pos)
        })
    }

    /// `<?>`: on a label-eligible failure (no successes, failure
    /// position unchanged from entry), replaces the expected set with a
    /// single readable label.
    pub fn label(self, msg: impl Into<String>) -> Parser<G, R> {
        let msg = msg.into();
        Parser::new(move |tails: Tails<G>| {
            let pos = tails.len();
            self.eval(tails).relabel(pos, msg.clone())
        })
    }

    /// Negative lookahead: succeeds with `()`, consuming nothing, iff
    /// `self` has no successes here.
    pub fn not_followed_by(self) -> Parser<G, ()>
    where
        R: Clone,
    {
        Parser::new(move |tails: Tails<G>| {
            let pos = tails.len();
            if self.eval(tails.clone()).has_successes() {
                ResultList::fail(pos, "not-followed-by predicate to fail")
            } else {
                ResultList::single(ResultInfo::new(0, tails, ()))
            }
        })
    }

    /// Positive lookahead: on success, rewinds to the original position
    /// without consuming, keeping the produced value.
    pub fn look_ahead(self) -> Parser<G, R>
    where
        R: Clone,
    {
        Parser::new(move |tails: Tails<G>| {
            let here = tails.clone();
            let result = self.eval(tails);
            let failure = result.failure().cloned();
            result
                .successes()
                .into_iter()
                .map(|info| ResultList::single(ResultInfo::new(0, here.clone(), info.value.clone())))
                .fold(ResultList::from_failure(failure), ResultList::merge)
        })
    }

    /// `ambiguous`: exposes every distinct consumed-length class
    /// of success as its own value (grouped by length, in order), rather
    /// than flattening them. Callers that want to detect or report
    /// ambiguity use this instead of an ordinary bind over `self`.
    pub fn ambiguous(self) -> Parser<G, Vec<R>>
    where
        R: Clone + 'static,
    {
        Parser::new(move |tails: Tails<G>| {
            let result = self.eval(tails);
            let failure = result.failure().cloned();
            let groups = result
                .length_groups()
                .into_iter()
                .map(|(consumed, infos)| {
                    let remaining = infos[0].remaining.clone();
                    let values: Vec<R> = infos.into_iter().map(|i| i.value.clone()).collect();
                    ResultList::single(ResultInfo::new(consumed, remaining, values))
                })
                .fold(ResultList::from_failure(failure), ResultList::merge);
            groups
        })
    }
}

/// Advances `consumed` onto every success and failure-free propagation
/// inside `rl`, used by `bind` to account for the left-hand parser's own
/// consumption before its continuation ran.
fn shift_consumed<T, R>(rl: ResultList<T, R>, consumed: usize) -> ResultList<T, R>
where
    T: Clone,
    R: Clone,
{
    let failure = rl.failure().cloned();
    rl.into_successes_vec()
        .into_iter()
        .map(|info| {
            ResultList::single(ResultInfo::new(
                info.consumed + consumed,
                info.remaining,
                info.value,
            ))
        })
        .fold(ResultList::from_failure(failure), ResultList::merge)
}

/// Always succeeds with `value`, consuming nothing.
pub fn pure<G: Grammar, R: Clone + 'static>(value: R) -> Parser<G, R> {
    Parser::new(move |tails: Tails<G>| ResultList::single(ResultInfo::new(0, tails, value.clone())))
}

/// Always fails, consuming nothing, with no expected label.
pub fn empty<G: Grammar, R>() -> Parser<G, R> {
    Parser::new(|tails: Tails<G>| ResultList::empty_at(tails.len()))
}

/// Always fails, consuming nothing, labeled `msg`.
pub fn fail<G: Grammar, R>(msg: impl Into<String> + Clone + 'static) -> Parser<G, R> {
    Parser::new(move |tails: Tails<G>| ResultList::fail(tails.len(), msg.clone()))
}

/// Alias for [`fail`] under the more specific `unexpected` name.
pub fn unexpected<G: Grammar, R>(msg: impl Into<String> + Clone + 'static) -> Parser<G, R> {
    fail(msg)
}

/// Succeeds with `()` iff the tail table is exhausted here.
pub fn eof<G: Grammar>() -> Parser<G, ()> {
    Parser::new(|tails: Tails<G>| {
        if tails.is_empty() {
            ResultList::single(ResultInfo::new(0, tails, ()))
        } else {
            ResultList::fail(tails.len(), "end of input")
        }
    })
}

/// Non-terminal reference: looks up and forces the named
/// field's memo cell at the current tail-table position, returning a
/// labeled failure if the position has run off the end of the table.
pub fn nt<G: Grammar, R: Clone + 'static>(
    select: impl Fn(&G::Memo) -> &crate::memo::MemoCell<ResultList<Tails<G>, R>> + 'static,
) -> Parser<G, R> {
    Parser::new(move |tails: Tails<G>| match tails.node() {
        Some(node) => select(&node.memo).force(tails.len()),
        None => ResultList::fail(0, "non-terminal past end of tail table"),
    })
}

/// Applies a binary function to two parsers' results.
pub fn map2<G: Grammar, A: Clone + 'static, B: Clone + 'static, R: Clone + 'static>(
    p1: Parser<G, A>,
    p2: Parser<G, B>,
    f: impl Fn(A, B) -> R + 'static,
) -> Parser<G, R> {
    p1.and(p2).map(move |(a, b)| f(a, b))
}

/// Applies a ternary function to three parsers' results.
pub fn map3<
    G: Grammar,
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    R: Clone + 'static,
>(
    p1: Parser<G, A>,
    p2: Parser<G, B>,
    p3: Parser<G, C>,
    f: impl Fn(A, B, C) -> R + 'static,
) -> Parser<G, R> {
    p1.and(p2).and(p3).map(move |((a, b), c)| f(a, b, c))
}

/// Parses two parsers in sequence, returning both results as a tuple.
pub fn tuple2<G: Grammar, A: Clone + 'static, B: Clone + 'static>(
    p1: Parser<G, A>,
    p2: Parser<G, B>,
) -> Parser<G, (A, B)> {
    p1.and(p2)
}

/// Parses three parsers in sequence, returning all results as a tuple.
pub fn tuple3<G: Grammar, A: Clone + 'static, B: Clone + 'static, C: Clone + 'static>(
    p1: Parser<G, A>,
    p2: Parser<G, B>,
    p3: Parser<G, C>,
) -> Parser<G, (A, B, C)> {
    p1.and(p2).and(p3).map(|((a, b), c)| (a, b, c))
}
