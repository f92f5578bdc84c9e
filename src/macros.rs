//! The `grammar!` macro: construction ergonomics for declaring a grammar
//! bundle without hand-writing its `Parsers`/`Memo`/`Results` structs.
//!
//! A host language with higher-kinded types could derive these bundle
//! types, and the glue between them, from one generic family definition.
//! Rust's `macro_rules!` has no identifier-concatenation without an extra
//! dependency (`paste`), so this macro takes the three bundle names
//! explicitly via `as (Parsers, Memo, Results)` rather than deriving them
//! from the grammar's name.
//!
//! Each field is one non-terminal: a result type and a
//! [`crate::parser::Parser`] expression that may reference sibling fields
//! via `nt(|memo: &GMemo| &memo.other_field)` for mutual recursion.

#[macro_export]
macro_rules! grammar {
    (
        $name:ident : $input_ty:ty {
            $( $field:ident : $ty:ty = $expr:expr ),+ $(,)?
        } as ( $parsers_name:ident, $memo_name:ident, $results_name:ident )
    ) => {
        struct $name;

        #[derive(Clone)]
        struct $parsers_name {
            $( $field: $crate::parser::Parser<$name, $ty> ),+
        }

        impl $parsers_name {
            fn new() -> Self {
                $parsers_name {
                    $( $field: $expr ),+
                }
            }
        }

        struct $memo_name {
            $( $field: $crate::memo::MemoCell<$crate::result::ResultList<$crate::tails::Tails<$name>, $ty>> ),+
        }

        #[derive(Clone, Debug, PartialEq)]
        struct $results_name {
            $( $field: $crate::error::ParseResults<Vec<($input_ty, $ty)>> ),+
        }

        impl $crate::grammar::Grammar for $name {
            type Input = $input_ty;
            type Parsers = $parsers_name;
            type Memo = $memo_name;
            type Results = $results_name;

            fn build_memo(
                parsers: &Self::Parsers,
                here: ::std::rc::Weak<$crate::tails::TailNode<Self>>,
            ) -> Self::Memo {
                $(
                    let $field = {
                        let p = parsers.$field.clone();
                        let here = here.clone();
                        $crate::memo::MemoCell::new(move || {
                            let tails = $crate::tails::Tails(here.upgrade());
                            p.eval(tails)
                        })
                    };
                )+
                $memo_name { $( $field ),+ }
            }

            fn extract(memo: &Self::Memo, total_len: usize) -> Self::Results {
                $results_name {
                    $(
                        $field: $crate::error::extract_field(&memo.$field.force(total_len), total_len)
                    ),+
                }
            }

            fn require_eof(parsers: &Self::Parsers) -> Self::Parsers {
                $parsers_name {
                    $( $field: parsers.$field.clone().skip($crate::parser::eof()) ),+
                }
            }
        }
    };
}
