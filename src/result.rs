//! Result list algebra: the pair of "ordered successes" and "furthest
//! failure" that every parser invocation returns.
//!
//! A plain `Result<(T, I), ParseError<I>>` — a single success or a single
//! failure — can't represent ambiguity; `ResultList` carries many
//! ambiguous successes *and* a failure record at once, since a result
//! list always carries both components.

use indexmap::IndexSet;
use std::fmt;
use std::rc::Rc;

/// One successful parse outcome: how many prime elements were consumed,
/// the tail table to continue from, and the produced value.
///
/// `remaining` is generic here (rather than hard-wired to a tail table)
/// so that `result.rs` has no dependency on the grammar machinery in
/// `tails.rs`; `Parser` instantiates `T = Tails<G>`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultInfo<T, R> {
    pub consumed: usize,
    pub remaining: T,
    pub value: R,
}

impl<T, R> ResultInfo<T, R> {
    pub fn new(consumed: usize, remaining: T, value: R) -> Self {
        ResultInfo {
            consumed,
            remaining,
            value,
        }
    }

    pub fn map_value<U>(self, f: impl FnOnce(R) -> U) -> ResultInfo<T, U> {
        ResultInfo {
            consumed: self.consumed,
            remaining: self.remaining,
            value: f(self.value),
        }
    }
}

/// The furthest-failure record: the point of deepest progress reached by
/// any alternative that ultimately failed, and the labels describing what
/// was expected there.
///
/// `position` is measured as the length of the tail table at the failure
/// point: smaller means closer to end-of-input, i.e. further along.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub position: usize,
    pub expected: IndexSet<String>,
}

impl Failure {
    pub fn new(position: usize) -> Self {
        Failure {
            position,
            expected: IndexSet::new(),
        }
    }

    pub fn labeled(position: usize, label: impl Into<String>) -> Self {
        let mut expected = IndexSet::new();
        expected.insert(label.into());
        Failure { position, expected }
    }

    /// Combine two failures, keeping the one with the smaller (furthest)
    /// position; union the labels when both are at the same position.
    pub fn merge(mut self, other: Failure) -> Failure {
        use std::cmp::Ordering;
        match self.position.cmp(&other.position) {
            Ordering::Less => self,
            Ordering::Greater => other,
            Ordering::Equal => {
                self.expected.extend(other.expected);
                self
            }
        }
    }
}

/// The concatenation-tree representation of a non-empty success multiset:
/// merging two lists is an O(1) tree join; iteration flattens the tree to
/// an in-order sequence on demand. This is the engine's default (and
/// only stored) representation, since `merge` — not iteration — is the
/// hot operation in a packrat engine.
#[derive(Clone, Debug)]
enum Successes<T, R> {
    Empty,
    Leaf(Rc<ResultInfo<T, R>>),
    Concat(Rc<Successes<T, R>>, Rc<Successes<T, R>>),
}

impl<T, R> Successes<T, R> {
    fn concat(self, other: Successes<T, R>) -> Successes<T, R> {
        match (&self, &other) {
            (Successes::Empty, _) => other,
            (_, Successes::Empty) => self,
            _ => Successes::Concat(Rc::new(self), Rc::new(other)),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Successes::Empty)
    }

    fn for_each<'a>(node: &'a Successes<T, R>, out: &mut Vec<&'a ResultInfo<T, R>>) {
        match node {
            Successes::Empty => {}
            Successes::Leaf(info) => out.push(info),
            Successes::Concat(l, r) => {
                Successes::for_each(l, out);
                Successes::for_each(r, out);
            }
        }
    }
}

/// The disjoint-sum-carried-as-a-pair result of a parser invocation:
/// zero or more successes, grouped implicitly by insertion order, plus
/// an optional furthest-failure record. Both may be present or absent
/// independently.
#[derive(Clone, Debug)]
pub struct ResultList<T, R> {
    successes: Successes<T, R>,
    failure: Option<Failure>,
}

impl<T, R> ResultList<T, R> {
    /// One success of length 0, no failure record. The identity for
    /// applicative sequencing.
    pub fn pure(remaining: T, value: R) -> Self {
        ResultList {
            successes: Successes::Leaf(Rc::new(ResultInfo::new(0, remaining, value))),
            failure: None,
        }
    }

    /// No successes, an unlabeled failure at `position`.
    pub fn empty_at(position: usize) -> Self {
        ResultList {
            successes: Successes::Empty,
            failure: Some(Failure::new(position)),
        }
    }

    /// No successes, a failure at `position` labeled `msg`.
    pub fn fail(position: usize, msg: impl Into<String>) -> Self {
        ResultList {
            successes: Successes::Empty,
            failure: Some(Failure::labeled(position, msg)),
        }
    }

    /// A single success, no failure record.
    pub fn single(info: ResultInfo<T, R>) -> Self {
        ResultList {
            successes: Successes::Leaf(Rc::new(info)),
            failure: None,
        }
    }

    /// No successes and no failure: the identity for `merge` (used
    /// internally; rarely useful standalone since every real failure to
    /// produce a result should carry a position).
    pub fn nothing() -> Self {
        ResultList {
            successes: Successes::Empty,
            failure: None,
        }
    }

    /// No successes, carrying `failure` verbatim (or none at all). Used by
    /// `bind`/sequencing combinators that need to propagate a left-hand
    /// failure record through to a result list with a different `R`.
    pub fn from_failure(failure: Option<Failure>) -> Self {
        ResultList {
            successes: Successes::Empty,
            failure,
        }
    }

    pub fn has_successes(&self) -> bool {
        !self.successes.is_empty()
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    pub fn into_failure(self) -> Option<Failure> {
        self.failure
    }

    /// Flattens the success tree into an in-order `Vec`, preserving the
    /// order a choice combinator needs: the left alternative's successes
    /// must precede the right's.
    pub fn successes(&self) -> Vec<&ResultInfo<T, R>> {
        let mut out = Vec::new();
        Successes::for_each(&self.successes, &mut out);
        out
    }

    pub fn into_successes_vec(self) -> Vec<ResultInfo<T, R>>
    where
        T: Clone,
        R: Clone,
    {
        self.successes()
            .into_iter()
            .map(|info| info.clone())
            .collect()
    }

    /// Merges two result lists: successes concatenate (`a` before `b`);
    /// the failure record keeps whichever is furthest, unioning labels on
    /// a tie.
    pub fn merge(self, other: ResultList<T, R>) -> ResultList<T, R> {
        let successes = self.successes.concat(other.successes);
        let failure = match (self.failure, other.failure) {
            (Some(a), Some(b)) => Some(a.merge(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };
        ResultList { successes, failure }
    }

    /// Applies `f` to every success value; the failure record (if any)
    /// passes through unchanged.
    pub fn fmap<U>(self, mut f: impl FnMut(R) -> U) -> ResultList<T, U>
    where
        T: Clone,
    {
        let mapped = self
            .successes()
            .into_iter()
            .map(|info| {
                Successes::Leaf(Rc::new(ResultInfo::new(
                    info.consumed,
                    info.remaining.clone(),
                    f(info.value.clone()),
                )))
            })
            .fold(Successes::Empty, Successes::concat);
        ResultList {
            successes: mapped,
            failure: self.failure,
        }
    }

    /// Replaces the failure record's position with `pos` and clears its
    /// labels (used by `try_`): the caller is treating the failed parser
    /// as an opaque atom, so the deeper cause of failure shouldn't leak
    /// into an enclosing choice's diagnostics.
    pub fn rewind_failure(mut self, pos: usize) -> Self {
        self.failure = self.failure.map(|_| Failure::new(pos));
        self
    }

    /// If there are no successes and the failure is exactly at `pos`,
    /// replaces `expected` with `[msg]`; otherwise leaves the result
    /// unchanged. Backs the `<?>`/`label` combinator.
    pub fn relabel(mut self, pos: usize, msg: impl Into<String>) -> Self {
        if !self.has_successes() {
            if let Some(failure) = &mut self.failure {
                if failure.position == pos {
                    failure.expected = {
                        let mut set = IndexSet::new();
                        set.insert(msg.into());
                        set
                    };
                }
            }
        }
        self
    }

    /// Groups successes by `consumed` length, preserving insertion order
    /// within each group, materialized on demand rather than stored. Used
    /// by `ambiguous`.
    pub fn length_groups(&self) -> Vec<(usize, Vec<&ResultInfo<T, R>>)> {
        let mut groups: Vec<(usize, Vec<&ResultInfo<T, R>>)> = Vec::new();
        for info in self.successes() {
            match groups.iter_mut().find(|(len, _)| *len == info.consumed) {
                Some((_, values)) => values.push(info),
                None => groups.push((info.consumed, vec![info])),
            }
        }
        groups
    }
}

impl<T: fmt::Debug, R: fmt::Debug> fmt::Display for ResultList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} success(es), failure = {:?}",
            self.successes().len(),
            self.failure
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_preserves_left_before_right_order() {
        let a: ResultList<u32, char> = ResultList::single(ResultInfo::new(1, 0, 'a'));
        let b: ResultList<u32, char> = ResultList::single(ResultInfo::new(1, 0, 'b'));
        let merged = a.merge(b);
        let values: Vec<char> = merged.successes().into_iter().map(|i| i.value).collect();
        assert_eq!(values, vec!['a', 'b']);
    }

    #[test]
    fn merge_keeps_furthest_failure() {
        let a: ResultList<u32, ()> = ResultList::fail(5, "foo");
        let b: ResultList<u32, ()> = ResultList::fail(2, "bar");
        let merged = a.merge(b);
        assert_eq!(merged.failure().unwrap().position, 2);
        assert_eq!(
            merged.failure().unwrap().expected.iter().collect::<Vec<_>>(),
            vec!["bar"]
        );
    }

    #[test]
    fn merge_unions_labels_on_tie() {
        let a: ResultList<u32, ()> = ResultList::fail(5, "foo");
        let b: ResultList<u32, ()> = ResultList::fail(5, "bar");
        let merged = a.merge(b);
        assert_eq!(merged.failure().unwrap().position, 5);
        let labels: Vec<&str> = merged
            .failure()
            .unwrap()
            .expected
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(labels, vec!["foo", "bar"]);
    }

    #[test]
    fn relabel_only_applies_without_consumption() {
        let failed: ResultList<u32, ()> = ResultList::fail(3, "old");
        let relabeled = failed.relabel(3, "new");
        assert_eq!(
            relabeled.failure().unwrap().expected.iter().next().unwrap(),
            "new"
        );

        let failed_elsewhere: ResultList<u32, ()> = ResultList::fail(3, "old");
        let unchanged = failed_elsewhere.relabel(7, "new");
        assert_eq!(
            unchanged.failure().unwrap().expected.iter().next().unwrap(),
            "old"
        );
    }

    #[test]
    fn length_groups_groups_same_length_successes() {
        let rl: ResultList<u32, char> = ResultList::single(ResultInfo::new(1, 0, 'a'))
            .merge(ResultList::single(ResultInfo::new(1, 0, 'b')))
            .merge(ResultList::single(ResultInfo::new(3, 0, 'c')));
        let groups = rl.length_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 1);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, 3);
    }
}
