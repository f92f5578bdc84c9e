//! PEG adapters: a bidirectional bridge between the context-free
//! `Parser<G, R>` value model and a measured, backtracking PEG parser —
//! for sub-grammars that read more naturally as greedy/longest-match
//! rules than as ambiguity-preserving ones.

use crate::grammar::Grammar;
use crate::input::Input;
use crate::parser::Parser;
use crate::result::{Failure, ResultInfo, ResultList};
use crate::tails::Tails;
use std::rc::Rc;

/// The outcome of one measured-PEG-parser invocation: either the single
/// longest/greedy match (with its own notion of "remaining input",
/// `Cont`), or a failure.
pub enum PegOutcome<Cont, R> {
    Parsed(usize, R, Cont),
    NoParse(Failure),
}

/// A backtracking PEG parser over input `In`, producing `R` and its own
/// continuation value of type `Cont` on success.
pub struct MeasuredPegParser<In, Cont, R>(Rc<dyn Fn(In) -> PegOutcome<Cont, R>>);

impl<In, Cont, R> Clone for MeasuredPegParser<In, Cont, R> {
    fn clone(&self) -> Self {
        MeasuredPegParser(self.0.clone())
    }
}

impl<In, Cont, R> MeasuredPegParser<In, Cont, R> {
    pub fn new(f: impl Fn(In) -> PegOutcome<Cont, R> + 'static) -> Self {
        MeasuredPegParser(Rc::new(f))
    }

    pub fn eval(&self, input: In) -> PegOutcome<Cont, R> {
        (self.0)(input)
    }
}

/// Wraps a context-free parser as a PEG parser over the tail-table list:
/// runs `p`, and on success keeps only the success with the maximum
/// `consumed_length` (ties broken by engine order, i.e. the last one
/// encountered in in-order traversal), discarding every shorter
/// alternative.
pub fn longest<G: Grammar, R: Clone + 'static>(
    p: Parser<G, R>,
) -> MeasuredPegParser<Tails<G>, Tails<G>, R> {
    MeasuredPegParser::new(move |tails: Tails<G>| {
        let result = p.eval(tails.clone());
        let failure = result.failure().cloned();
        let best = result
            .successes()
            .into_iter()
            .max_by_key(|info| info.consumed)
            .cloned();
        match best {
            Some(info) => PegOutcome::Parsed(info.consumed, info.value, info.remaining),
            None => PegOutcome::NoParse(failure.unwrap_or_else(|| Failure::new(tails.len()))),
        }
    })
}

/// Inverse of [`longest`]: turns a tail-table-driven PEG parser back into
/// an ordinary (now unambiguous) context-free parser.
pub fn peg<G: Grammar, R: Clone + 'static>(
    q: MeasuredPegParser<Tails<G>, Tails<G>, R>,
) -> Parser<G, R> {
    Parser::new(move |tails: Tails<G>| match q.eval(tails) {
        PegOutcome::Parsed(l, v, s) => ResultList::single(ResultInfo::new(l, s, v)),
        PegOutcome::NoParse(f) => ResultList::from_failure(Some(f)),
    })
}

/// Bridges a PEG parser that operates on the raw input sequence (rather
/// than the tail table) into a `Parser<G, R>`. The PEG parser's own
/// notion of "remaining input" is discarded — the continuation is always
/// recomputed by advancing the *outer* tail table by the reported
/// consumed length, so `Cont` need not relate to `G::Input` at all.
///
/// `q` is always invoked: at a live tail-table position it sees that
/// position's suffix, and past the end of the table (where there is no
/// suffix to hand it) it sees an empty input instead of being skipped.
pub fn terminal_peg<G: Grammar, Cont, R: Clone + 'static>(
    q: MeasuredPegParser<G::Input, Cont, R>,
) -> Parser<G, R> {
    Parser::new(move |tails: Tails<G>| {
        let fed = match tails.suffix() {
            Some(suffix) => suffix.clone(),
            None => G::Input::empty(),
        };
        match q.eval(fed) {
            PegOutcome::Parsed(l, v, _) => {
                ResultList::single(ResultInfo::new(l, tails.advance(l), v))
            }
            PegOutcome::NoParse(f) => ResultList::from_failure(Some(f)),
        }
    })
}
