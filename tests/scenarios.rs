//! End-to-end grammar scenarios exercising mutual recursion, ambiguity,
//! biased choice, failure reporting, and lookahead together.

use ambiparse::{self as ap, grammar, ParseResults};

mod arithmetic {
    use super::*;

    grammar! {
        Arith: &'static str {
            expr: i64 = ap::nt(|m: &ArithMemo| &m.term)
                .and(ap::many(
                    ap::nt(|m: &ArithMemo| &m.term).preceded_by(ap::char('+')),
                ))
                .map(|(first, rest): (i64, Vec<i64>)| first + rest.iter().sum::<i64>()),
            term: i64 = ap::many1(ap::digit()).map(|digits: Vec<char>| {
                digits.into_iter().collect::<String>().parse::<i64>().unwrap()
            }),
        } as (ArithParsers, ArithMemo, ArithResults)
    }

    #[test]
    fn sums_a_plus_separated_chain_of_digits() {
        let results = ap::parse_complete::<Arith>(ArithParsers::new(), "1+2+3");
        match results.expr {
            ParseResults::Ok(parses) => {
                assert_eq!(parses.len(), 1);
                assert_eq!(parses[0].1, 6);
                assert_eq!(parses[0].0, "");
            }
            ParseResults::Err(f) => panic!("expected a complete parse, got {f:?}"),
        }
    }
}

mod ambiguous_palindrome {
    use super::*;

    grammar! {
        Ambig: &'static str {
            s: usize = ap::char('a')
                .and(ap::nt(|m: &AmbigMemo| &m.s))
                .and(ap::char('a'))
                .map(|((_, inner), _)| inner + 2)
                .or(ap::char('a').map(|_| 1)),
        } as (AmbigParsers, AmbigMemo, AmbigResults)
    }

    #[test]
    fn prefix_parse_reports_every_ambiguous_length() {
        let results = ap::parse_prefix::<Ambig>(AmbigParsers::new(), "aaaaa");
        match results.s {
            ParseResults::Ok(parses) => {
                let mut lengths: Vec<usize> = parses.iter().map(|(suffix, _)| 5 - suffix.chars().count()).collect();
                lengths.sort_unstable();
                assert_eq!(lengths, vec![1, 3, 5]);
            }
            ParseResults::Err(f) => panic!("expected successes, got {f:?}"),
        }
    }

    #[test]
    fn complete_parse_keeps_only_the_full_length_match() {
        let results = ap::parse_complete::<Ambig>(AmbigParsers::new(), "aaaaa");
        match results.s {
            ParseResults::Ok(parses) => {
                assert_eq!(parses.len(), 1);
                assert_eq!(parses[0].1, 5);
            }
            ParseResults::Err(f) => panic!("expected one complete parse, got {f:?}"),
        }
    }
}

mod biased_if_keyword {
    use super::*;

    grammar! {
        IfKw: &'static str {
            s: String = ap::string("if").try_().biased_or(ap::string("i")),
        } as (IfKwParsers, IfKwMemo, IfKwResults)
    }

    #[test]
    fn matches_the_full_keyword_when_present() {
        let results = ap::parse_prefix::<IfKw>(IfKwParsers::new(), "if");
        match results.s {
            ParseResults::Ok(parses) => {
                assert_eq!(parses.len(), 1);
                assert_eq!(parses[0].1, "if");
            }
            ParseResults::Err(f) => panic!("expected a match, got {f:?}"),
        }
    }

    #[test]
    fn falls_back_to_the_single_letter_when_keyword_does_not_match() {
        let results = ap::parse_prefix::<IfKw>(IfKwParsers::new(), "ix");
        match results.s {
            ParseResults::Ok(parses) => {
                assert_eq!(parses.len(), 1);
                assert_eq!(parses[0].1, "i");
                assert_eq!(parses[0].0, "x");
            }
            ParseResults::Err(f) => panic!("expected a match, got {f:?}"),
        }
    }
}

mod labeled_failure {
    use super::*;

    grammar! {
        Greeting: &'static str {
            s: String = ap::string("foo").label("greeting"),
        } as (GreetingParsers, GreetingMemo, GreetingResults)
    }

    #[test]
    fn reports_the_custom_label_at_the_start_position() {
        let results = ap::parse_complete::<Greeting>(GreetingParsers::new(), "bar");
        match results.s {
            ParseResults::Err(f) => {
                assert_eq!(f.position, 1);
                assert_eq!(f.expected, vec!["greeting".to_string()]);
            }
            ParseResults::Ok(_) => panic!("expected a failure"),
        }
    }
}

mod lookahead_alpha_run {
    use super::*;

    grammar! {
        LookAheadAlpha: &'static str {
            s: String = ap::take_while(|c: &char| c.is_alphabetic())
                .map(|cs: Vec<char>| cs.into_iter().collect::<String>())
                .preceded_by(ap::char('a').look_ahead()),
        } as (LookAheadAlphaParsers, LookAheadAlphaMemo, LookAheadAlphaResults)
    }

    #[test]
    fn consumes_the_alpha_run_when_it_starts_with_a() {
        let results = ap::parse_complete::<LookAheadAlpha>(LookAheadAlphaParsers::new(), "abc");
        match results.s {
            ParseResults::Ok(parses) => {
                assert_eq!(parses.len(), 1);
                assert_eq!(parses[0].1, "abc");
            }
            ParseResults::Err(f) => panic!("expected a complete parse, got {f:?}"),
        }
    }

    #[test]
    fn fails_at_the_start_when_the_lookahead_does_not_match() {
        let results = ap::parse_complete::<LookAheadAlpha>(LookAheadAlphaParsers::new(), "1bc");
        match results.s {
            ParseResults::Err(f) => assert_eq!(f.position, 1),
            ParseResults::Ok(_) => panic!("expected a failure"),
        }
    }
}

mod mutual_recursion {
    use super::*;

    // a = 'x' b | eof
    // b = 'y' a
    grammar! {
        Mutual: &'static str {
            a: () = ap::char('x')
                .and(ap::nt(|m: &MutualMemo| &m.b))
                .map(|_| ())
                .or(ap::eof()),
            b: () = ap::char('y')
                .and(ap::nt(|m: &MutualMemo| &m.a))
                .map(|_| ()),
        } as (MutualParsers, MutualMemo, MutualResults)
    }

    #[test]
    fn an_even_number_of_xy_pairs_parses_completely() {
        let results = ap::parse_complete::<Mutual>(MutualParsers::new(), "xyxy");
        match results.a {
            ParseResults::Ok(parses) => assert_eq!(parses.len(), 1),
            ParseResults::Err(f) => panic!("expected a complete parse, got {f:?}"),
        }
    }

    #[test]
    fn a_dangling_unpaired_x_has_no_parse_at_all() {
        let results = ap::parse_prefix::<Mutual>(MutualParsers::new(), "xyx");
        match results.a {
            ParseResults::Ok(parses) => panic!("expected no successes, got {parses:?}"),
            ParseResults::Err(_) => {}
        }
    }
}
