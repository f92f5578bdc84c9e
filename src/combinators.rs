//! Basic parsing primitives and repetition/separator combinators,
//! generalized over any [`crate::grammar::Grammar`]'s input type rather
//! than hard-wired to `&str` (the type lives one level up, on
//! `G::Input`).
//!
//! `many`/`many1`/`fold_many0`/`fold_many1`/`sep_by`/`sep_by1` commit to
//! the first success at each step rather than exploring every ambiguous
//! continuation: a grammar that needs ambiguity *inside* a repetition
//! should spell it out with `nt`/`or` over a self-referential
//! non-terminal instead of these convenience combinators. A sub-parser
//! that can match while consuming nothing makes `many`/`many1` loop
//! forever, same hazard as in Parsec — not guarded against here, only
//! documented.

use crate::grammar::Grammar;
use crate::input::Input;
use crate::parser::Parser;
use crate::result::{ResultInfo, ResultList};
use crate::tails::Tails;

type Item<G> = <<G as Grammar>::Input as Input>::Item;

/// Consumes any single prime element.
pub fn any_token<G: Grammar>() -> Parser<G, Item<G>>
where
    Item<G>: Clone + 'static,
{
    satisfy(|_: &Item<G>| true)
}

/// Parses a prime element satisfying `predicate`.
pub fn satisfy<G: Grammar, F>(predicate: F) -> Parser<G, Item<G>>
where
    F: Fn(&Item<G>) -> bool + 'static,
    Item<G>: Clone + 'static,
{
    Parser::new(move |tails: Tails<G>| {
        let pos = tails.len();
        match tails.suffix().and_then(|s| s.uncons()) {
            Some((item, _)) if predicate(&item) => {
                ResultList::single(ResultInfo::new(1, tails.advance_one(), item))
            }
            Some((item, _)) => ResultList::fail(pos, format!("item satisfying predicate, found {:?}", item)),
            None => ResultList::fail(pos, "item satisfying predicate"),
        }
    })
}

/// Parses a prime element that does *not* satisfy `predicate` (the
/// negative counterpart to `satisfy`).
pub fn not_satisfy<G: Grammar, F>(predicate: F) -> Parser<G, Item<G>>
where
    F: Fn(&Item<G>) -> bool + 'static,
    Item<G>: Clone + 'static,
{
    satisfy(move |item| !predicate(item))
}

/// Parses one specific prime element.
pub fn token<G: Grammar>(expected: Item<G>) -> Parser<G, Item<G>>
where
    Item<G>: Clone + 'static,
{
    let label = format!("{:?}", expected);
    satisfy(move |item: &Item<G>| *item == expected).label(label)
}

/// Parses a specific literal sequence of prime elements as a prefix,
/// over any input type, built directly on [`Input::match_literal`].
pub fn literal<G: Grammar>(expected: Vec<Item<G>>) -> Parser<G, Vec<Item<G>>>
where
    Item<G>: Clone + 'static,
{
    Parser::new(move |tails: Tails<G>| {
        let pos = tails.len();
        match tails.suffix() {
            Some(s) if s.match_literal(&expected).is_some() => {
                let count = expected.len();
                ResultList::single(ResultInfo::new(count, tails.advance(count), expected.clone()))
            }
            _ => ResultList::fail(pos, format!("{:?}", expected)),
        }
    })
}

/// Consumes the longest possible prefix of prime elements satisfying
/// `pred`, possibly zero.
pub fn take_while<G: Grammar, F>(pred: F) -> Parser<G, Vec<Item<G>>>
where
    F: Fn(&Item<G>) -> bool + 'static,
    Item<G>: Clone + 'static,
{
    Parser::new(move |tails: Tails<G>| match tails.suffix() {
        Some(s) => {
            let (count, _) = s.take_while(&pred);
            let items = collect_prefix(s, count);
            ResultList::single(ResultInfo::new(count, tails.advance(count), items))
        }
        None => ResultList::single(ResultInfo::new(0, tails, Vec::new())),
    })
}

/// Like [`take_while`] but requires at least one matching element.
pub fn take_while1<G: Grammar, F>(pred: F) -> Parser<G, Vec<Item<G>>>
where
    F: Fn(&Item<G>) -> bool + 'static,
    Item<G>: Clone + 'static,
{
    let inner = take_while(pred);
    Parser::new(move |tails: Tails<G>| {
        let pos = tails.len();
        let result = inner.eval(tails);
        match result.successes().into_iter().next() {
            Some(info) if info.consumed > 0 => {
                ResultList::single(ResultInfo::new(info.consumed, info.remaining.clone(), info.value.clone()))
            }
            _ => ResultList::fail(pos, "at least one matching item"),
        }
    })
}

/// Threads a running state `S` across successive prime elements, stopping
/// (without consuming the failing element) the first time `step` returns
/// `None`. Generalizes the text-processing "scan" idiom (sliding a small
/// amount of lookback state, e.g. "stop after an unescaped quote") beyond
/// plain predicates.
pub fn scan<G: Grammar, S: Clone + 'static, F>(init: S, step: F) -> Parser<G, Vec<Item<G>>>
where
    F: Fn(S, &Item<G>) -> Option<S> + 'static,
    Item<G>: Clone + 'static,
{
    Parser::new(move |tails: Tails<G>| match tails.suffix() {
        Some(s) => {
            let mut state = init.clone();
            let mut items = Vec::new();
            let mut rest = s.clone();
            let mut count = 0;
            while let Some((item, tail)) = rest.uncons() {
                match step(state.clone(), &item) {
                    Some(next) => {
                        state = next;
                        items.push(item);
                        rest = tail;
                        count += 1;
                    }
                    None => break,
                }
            }
            ResultList::single(ResultInfo::new(count, tails.advance(count), items))
        }
        None => ResultList::single(ResultInfo::new(0, tails, Vec::new())),
    })
}

fn collect_prefix<I: Input>(mut s: I, count: usize) -> Vec<I::Item> {
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let (item, rest) = s.uncons().expect("take_while's own count overran the input");
        items.push(item);
        s = rest;
    }
    items
}

/// Parses between two delimiters, keeping only the middle result.
pub fn between<G: Grammar, T: Clone + 'static, U: Clone + 'static, V: Clone + 'static>(
    left: Parser<G, T>,
    parser: Parser<G, U>,
    right: Parser<G, V>,
) -> Parser<G, U> {
    parser.preceded_by(left).skip(right)
}

/// Tries each alternative in turn, folded left-to-right with unbiased
/// `or`: ambiguous successes across alternatives all survive.
pub fn choice<G: Grammar, R: Clone + 'static>(parsers: Vec<Parser<G, R>>) -> Parser<G, R> {
    let mut iter = parsers.into_iter();
    let first = iter
        .next()
        .expect("choice requires at least one alternative parser");
    iter.fold(first, |acc, p| acc.or(p))
}

fn run_fold<G: Grammar, R: Clone + 'static, A>(
    parser: &Parser<G, R>,
    mut acc: A,
    f: &impl Fn(A, R) -> A,
    start: Tails<G>,
) -> (A, usize, Tails<G>) {
    let mut cur = start;
    let mut consumed = 0;
    loop {
        let result = parser.eval(cur.clone());
        match result.successes().into_iter().next() {
            Some(info) if info.consumed > 0 => {
                acc = f(acc, info.value.clone());
                consumed += info.consumed;
                cur = info.remaining.clone();
            }
            _ => break,
        }
    }
    (acc, consumed, cur)
}

/// Folds over zero or more repetitions of `parser`.
pub fn fold_many0<G: Grammar, R: Clone + 'static, A: Clone + 'static, F>(
    parser: Parser<G, R>,
    init: A,
    f: F,
) -> Parser<G, A>
where
    F: Fn(A, R) -> A + 'static,
{
    Parser::new(move |tails: Tails<G>| {
        let (acc, consumed, rest) = run_fold(&parser, init.clone(), &f, tails);
        ResultList::single(ResultInfo::new(consumed, rest, acc))
    })
}

/// Folds over one or more repetitions of `parser`, failing if `parser`
/// never succeeds at all.
pub fn fold_many1<G: Grammar, R: Clone + 'static, A: Clone + 'static, F>(
    parser: Parser<G, R>,
    init: A,
    f: F,
) -> Parser<G, A>
where
    F: Fn(A, R) -> A + 'static,
{
    Parser::new(move |tails: Tails<G>| {
        let pos = tails.len();
        let (acc, consumed, rest) = run_fold(&parser, init.clone(), &f, tails);
        if consumed == 0 {
            ResultList::fail(pos, "at least one occurrence")
        } else {
            ResultList::single(ResultInfo::new(consumed, rest, acc))
        }
    })
}

/// Zero or more repetitions, collected into a `Vec`.
pub fn many<G: Grammar, R: Clone + 'static>(parser: Parser<G, R>) -> Parser<G, Vec<R>> {
    fold_many0(parser, Vec::new(), |mut acc, item| {
        acc.push(item);
        acc
    })
}

/// One or more repetitions, collected into a `Vec`.
pub fn many1<G: Grammar, R: Clone + 'static>(parser: Parser<G, R>) -> Parser<G, Vec<R>> {
    fold_many1(parser, Vec::new(), |mut acc, item| {
        acc.push(item);
        acc
    })
}

fn run_sep_by<G: Grammar, R: Clone + 'static, S: Clone + 'static>(
    parser: &Parser<G, R>,
    separator: &Parser<G, S>,
    mut acc: Vec<R>,
    start: Tails<G>,
) -> (Vec<R>, usize, Tails<G>) {
    let mut cur = start;
    let mut consumed = 0;
    loop {
        let sep_result = separator.eval(cur.clone());
        let Some(sep_info) = sep_result.successes().into_iter().next().cloned() else {
            break;
        };
        let elem_result = parser.eval(sep_info.remaining.clone());
        match elem_result.successes().into_iter().next() {
            Some(elem_info) => {
                acc.push(elem_info.value.clone());
                consumed += sep_info.consumed + elem_info.consumed;
                cur = elem_info.remaining.clone();
            }
            // A trailing separator with nothing after it doesn't count;
            // leave `cur` at the position before the dangling separator.
            None => break,
        }
    }
    (acc, consumed, cur)
}

/// Zero or more `parser` occurrences separated by `separator`.
pub fn sep_by<G: Grammar, R: Clone + 'static, S: Clone + 'static>(
    parser: Parser<G, R>,
    separator: Parser<G, S>,
) -> Parser<G, Vec<R>> {
    Parser::new(move |tails: Tails<G>| {
        let first = parser.eval(tails.clone());
        match first.successes().into_iter().next() {
            Some(info) => {
                let (values, rest_consumed, rest_tails) = run_sep_by(
                    &parser,
                    &separator,
                    vec![info.value.clone()],
                    info.remaining.clone(),
                );
                ResultList::single(ResultInfo::new(
                    info.consumed + rest_consumed,
                    rest_tails,
                    values,
                ))
            }
            None => ResultList::single(ResultInfo::new(0, tails, Vec::new())),
        }
    })
}

/// One or more `parser` occurrences separated by `separator`.
pub fn sep_by1<G: Grammar, R: Clone + 'static, S: Clone + 'static>(
    parser: Parser<G, R>,
    separator: Parser<G, S>,
) -> Parser<G, Vec<R>> {
    Parser::new(move |tails: Tails<G>| {
        let pos = tails.len();
        let first = parser.eval(tails.clone());
        match first.successes().into_iter().next() {
            Some(info) => {
                let (values, rest_consumed, rest_tails) = run_sep_by(
                    &parser,
                    &separator,
                    vec![info.value.clone()],
                    info.remaining.clone(),
                );
                ResultList::single(ResultInfo::new(
                    info.consumed + rest_consumed,
                    rest_tails,
                    values,
                ))
            }
            None => ResultList::fail(pos, "at least one item"),
        }
    })
}
