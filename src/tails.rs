//! The tail table: a lazily-populated, right-to-left-built chain of
//! `(suffix, memoized non-terminal bundle)` pairs, one per input position.
//!
//! Each node is built with [`Rc::new_cyclic`] so that its own memoized
//! bundle can hold parser thunks that, once forced, look back at the same
//! node — exactly the self-reference needed for same-position
//! non-terminal cross-references.

use crate::grammar::Grammar;
use std::rc::{Rc, Weak};

/// One entry of the tail table: the input suffix at this position, its
/// length, the memoized non-terminal bundle for this position, and a link
/// to the next (later) position's node.
pub struct TailNode<G: Grammar> {
    pub suffix: G::Input,
    pub len: usize,
    pub memo: G::Memo,
    pub next: Option<Rc<TailNode<G>>>,
}

/// A (possibly absent) position in the tail table.
///
/// Absence models running off the end of the table: it should not arise
/// for a table built by [`build`] and driven by well-behaved primitives
/// (every continuation lands on a real position, including the final
/// empty suffix), but combinators that walk past the last node
/// defensively see `None` rather than panicking.
#[derive(Clone)]
pub struct Tails<G: Grammar>(pub Option<Rc<TailNode<G>>>);

impl<G: Grammar> Tails<G> {
    pub fn node(&self) -> Option<&Rc<TailNode<G>>> {
        self.0.as_ref()
    }

    /// Length of the tail table at this position — `0` once exhausted.
    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |node| node.len)
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_ref().map_or(true, |node| node.suffix.is_empty())
    }

    pub fn suffix(&self) -> Option<&G::Input> {
        self.0.as_ref().map(|node| &node.suffix)
    }

    /// Advances by one prime element, following the chain. Returns the
    /// node for the next position, or `None` if already exhausted.
    pub fn advance_one(&self) -> Tails<G> {
        Tails(self.0.as_ref().and_then(|node| node.next.clone()))
    }

    /// Advances by `count` prime elements.
    pub fn advance(&self, count: usize) -> Tails<G> {
        let mut cur = self.clone();
        for _ in 0..count {
            cur = cur.advance_one();
        }
        cur
    }
}

use crate::input::Input;

/// Builds the full tail table for `input`, right-to-left: position `n`
/// (the empty suffix) is built first, then `n-1`, ..., down to `0`, each
/// node's memoized bundle evaluated lazily against that same node.
pub fn build<G: Grammar>(parsers: G::Parsers, input: G::Input) -> Tails<G> {
    let suffixes = input.tails();
    let total = suffixes.len();
    let mut next: Option<Rc<TailNode<G>>> = None;

    for (i, suffix) in suffixes.into_iter().enumerate().rev() {
        let len = total - 1 - i;
        let node = Rc::new_cyclic(|weak: &Weak<TailNode<G>>| {
            let memo = G::build_memo(&parsers, weak.clone());
            TailNode {
                suffix,
                len,
                memo,
                next: next.clone(),
            }
        });
        next = Some(node);
    }

    Tails(next)
}

/// Re-evaluates just the leading (position-0) bundle against a different
/// `Parsers` value, reusing every later position's memo unchanged. Used
/// by `parse_complete` to require end-of-input only at the top level
/// without rebuilding the whole table.
pub fn reparse_head<G: Grammar>(tails: &Tails<G>, parsers: G::Parsers) -> Tails<G> {
    let Some(old_head) = tails.node() else {
        return tails.clone();
    };
    let suffix = old_head.suffix.clone();
    let len = old_head.len;
    let next = old_head.next.clone();

    let new_head = Rc::new_cyclic(|weak: &Weak<TailNode<G>>| {
        let memo = G::build_memo(&parsers, weak.clone());
        TailNode {
            suffix,
            len,
            memo,
            next,
        }
    });

    Tails(Some(new_head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::memo::MemoCell;
    use crate::parser::Parser;
    use crate::result::ResultList;

    /// A trivial single-non-terminal grammar used purely to exercise the
    /// tail-table plumbing without pulling in the `grammar!` macro.
    struct Digit;

    #[derive(Clone)]
    struct DigitParsers {
        digit: Parser<Digit, char>,
    }

    struct DigitMemo {
        digit: MemoCell<ResultList<Tails<Digit>, char>>,
    }

    struct DigitResults {
        digit: crate::error::ParseResults<Vec<(&'static str, char)>>,
    }

    impl Grammar for Digit {
        type Input = &'static str;
        type Parsers = DigitParsers;
        type Memo = DigitMemo;
        type Results = DigitResults;

        fn build_memo(parsers: &Self::Parsers, here: Weak<TailNode<Self>>) -> Self::Memo {
            let p = parsers.digit.clone();
            DigitMemo {
                digit: MemoCell::new(move || {
                    let tails = Tails(here.upgrade());
                    p.eval(tails)
                }),
            }
        }

        fn extract(memo: &Self::Memo, total_len: usize) -> Self::Results {
            DigitResults {
                digit: crate::error::extract_field(&memo.digit.force(total_len), total_len),
            }
        }

        fn require_eof(parsers: &Self::Parsers) -> Self::Parsers {
            parsers.clone()
        }
    }

    #[test]
    fn build_produces_n_plus_one_nodes() {
        let parsers = DigitParsers {
            digit: crate::combinators::satisfy(|c: &char| c.is_ascii_digit()),
        };
        let tails = build::<Digit>(parsers, "12");
        assert_eq!(tails.len(), 2);
        assert_eq!(tails.advance(1).len(), 1);
        assert_eq!(tails.advance(2).len(), 0);
        assert!(tails.advance(2).is_empty());
    }

    #[test]
    fn same_position_fields_share_one_memo_cell() {
        let parsers = DigitParsers {
            digit: crate::combinators::satisfy(|c: &char| c.is_ascii_digit()),
        };
        let tails = build::<Digit>(parsers, "7");
        let node = tails.node().unwrap();
        let first = node.memo.digit.force(1);
        let second = node.memo.digit.force(1);
        assert_eq!(first.successes().len(), second.successes().len());
    }
}
