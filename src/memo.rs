//! Write-once memo cells.
//!
//! A packrat engine needs a cell that is either unevaluated, mid-evaluation,
//! or done, so that re-entering a cell that's still mid-evaluation can be
//! detected and handled instead of recursing forever. `MemoCell` is the
//! single-position, single-non-terminal version of that idea: one cell per
//! `(non-terminal, tail-table position)` pair.

use crate::result::ResultList;
use std::cell::RefCell;

enum State<R> {
    /// Not yet evaluated; holds the thunk to run on first demand.
    Pending(Box<dyn FnOnce() -> R>),
    /// Currently being evaluated — a reentrant `force` call while in this
    /// state means the grammar is left-recursive at this position.
    Running,
    /// Evaluated once; cached for every subsequent `force`.
    Done(R),
}

/// A single non-terminal's memoized result at a single tail-table
/// position. Forced at most once: the first `force` runs the thunk and
/// caches the result; every later `force` returns the cached value
/// without re-running anything.
pub struct MemoCell<R> {
    state: RefCell<State<R>>,
}

impl<R: Clone> MemoCell<R> {
    /// Builds a cell holding an unevaluated thunk.
    pub fn new(thunk: impl FnOnce() -> R + 'static) -> Self {
        MemoCell {
            state: RefCell::new(State::Pending(Box::new(thunk))),
        }
    }

    /// Forces the cell, running the thunk on first call and returning the
    /// cached value on every subsequent call. `on_reentry` is invoked (and
    /// its result returned) if `force` is called again from *within* the
    /// thunk's own evaluation — i.e. the non-terminal was reached again at
    /// the same position before finishing, which is exactly what a
    /// left-recursive reference looks like.
    pub fn force_or(&self, on_reentry: impl FnOnce() -> R) -> R {
        {
            let state = self.state.borrow();
            match &*state {
                State::Done(value) => return value.clone(),
                State::Running => return on_reentry(),
                State::Pending(_) => {}
            }
        }

        let thunk = match self.state.replace(State::Running) {
            State::Pending(thunk) => thunk,
            // Another borrow already observed Pending/Done/Running above
            // under the same single-threaded cell; nothing else can have
            // raced this replace.
            _ => unreachable!("memo cell state changed between check and replace"),
        };

        let value = thunk();
        *self.state.borrow_mut() = State::Done(value.clone());
        value
    }
}

/// Convenience specialization for the common case where the cached value
/// is itself a `ResultList` and reentry should surface as an ordinary
/// labeled parse failure rather than a panic or stack overflow,
/// specifically flagging left recursion.
impl<T: Clone, V: Clone> MemoCell<ResultList<T, V>> {
    pub fn force(&self, tail_table_len: usize) -> ResultList<T, V> {
        self.force_or(|| ResultList::fail(tail_table_len, "left-recursive non-terminal"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_runs_thunk_exactly_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        let calls = Rc::new(Cell::new(0));
        let calls2 = calls.clone();
        let cell: MemoCell<i32> = MemoCell::new(move || {
            calls2.set(calls2.get() + 1);
            42
        });

        assert_eq!(cell.force_or(|| -1), 42);
        assert_eq!(cell.force_or(|| -1), 42);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn reentrant_force_detects_left_recursion() {
        // A cell whose own thunk forces itself again before finishing,
        // the exact shape a left-recursive non-terminal reference takes.
        use std::rc::Rc;

        let cell = Rc::new_cyclic(|weak| {
            let weak = weak.clone();
            MemoCell::new(move || {
                let this = weak.upgrade().expect("cell still alive during its own thunk");
                this.force_or(|| -1) + 1
            })
        });

        assert_eq!(cell.force_or(|| -99), 0);
    }
}
