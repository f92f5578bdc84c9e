//! Snapshot tests on the plain, stable `Debug` output of the user-facing
//! error types.

use ambiparse::{ParseFailure, ParseResults};

#[test]
fn parse_failure_debug_snapshot_with_labels() {
    let failure = ParseFailure {
        position: 3,
        expected: vec!["digit".to_string(), "sign".to_string()],
    };
    insta::assert_debug_snapshot!(failure, @r###"
    ParseFailure {
        position: 3,
        expected: [
            "digit",
            "sign",
        ],
    }
    "###);
}

#[test]
fn parse_failure_debug_snapshot_no_labels() {
    let failure = ParseFailure {
        position: 1,
        expected: vec![],
    };
    insta::assert_debug_snapshot!(failure, @r###"
    ParseFailure {
        position: 1,
        expected: [],
    }
    "###);
}

#[test]
fn parse_results_ok_debug_snapshot() {
    let results: ParseResults<i32> = ParseResults::Ok(42);
    insta::assert_debug_snapshot!(results, @r###"
    Ok(
        42,
    )
    "###);
}

#[test]
fn parse_results_err_debug_snapshot() {
    let results: ParseResults<i32> = ParseResults::Err(ParseFailure {
        position: 2,
        expected: vec!["greeting".to_string()],
    });
    insta::assert_debug_snapshot!(results, @r###"
    Err(
        ParseFailure {
            position: 2,
            expected: [
                "greeting",
            ],
        },
    )
    "###);
}
