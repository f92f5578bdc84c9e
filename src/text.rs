//! Text and string parsing utilities, built on the tail-table engine and
//! specialized to grammars whose input is `&'static str` (character
//! items).

use crate::combinators::*;
use crate::grammar::Grammar;
use crate::parser::Parser;

/// Parses a specific character.
pub fn char<G: Grammar<Input = &'static str>>(c: char) -> Parser<G, char> {
    token(c)
}

/// Parses a specific string as a literal prefix.
pub fn string<G: Grammar<Input = &'static str>>(s: &str) -> Parser<G, String> {
    let label = format!("string {:?}", s);
    literal::<G>(s.chars().collect())
        .map(|chars| chars.into_iter().collect())
        .label(label)
}

/// Parses any alphabetic character.
pub fn alpha<G: Grammar<Input = &'static str>>() -> Parser<G, char> {
    satisfy(|c: &char| c.is_alphabetic()).label("alphabetic character")
}

/// Parses any ASCII digit.
pub fn digit<G: Grammar<Input = &'static str>>() -> Parser<G, char> {
    satisfy(|c: &char| c.is_ascii_digit()).label("digit")
}

/// Parses any alphanumeric character.
pub fn alphanumeric<G: Grammar<Input = &'static str>>() -> Parser<G, char> {
    satisfy(|c: &char| c.is_alphanumeric()).label("alphanumeric character")
}

/// Parses any whitespace character.
pub fn space<G: Grammar<Input = &'static str>>() -> Parser<G, char> {
    satisfy(|c: &char| c.is_whitespace())
}

/// Parses zero or more whitespace characters.
pub fn spaces<G: Grammar<Input = &'static str>>() -> Parser<G, String> {
    many(space()).map(|chars| chars.into_iter().collect())
}

/// Parses one or more whitespace characters.
pub fn spaces1<G: Grammar<Input = &'static str>>() -> Parser<G, String> {
    many1(space()).map(|chars| chars.into_iter().collect())
}

/// Parses a newline character.
pub fn newline<G: Grammar<Input = &'static str>>() -> Parser<G, char> {
    char('\n')
}

/// Parses a tab character.
pub fn tab<G: Grammar<Input = &'static str>>() -> Parser<G, char> {
    char('\t')
}

/// Parses an unsigned integer.
pub fn unsigned<G: Grammar<Input = &'static str>>() -> Parser<G, u32> {
    many1(digit())
        .bind(|digits: Vec<char>| {
            let text: String = digits.into_iter().collect();
            match text.parse::<u32>() {
                Ok(n) => crate::parser::pure(n),
                Err(_) => crate::parser::fail("a valid unsigned integer"),
            }
        })
        .label("unsigned integer")
}

/// Parses a signed integer.
pub fn integer<G: Grammar<Input = &'static str>>() -> Parser<G, i32> {
    char('-')
        .map(Some)
        .or(crate::parser::pure(None))
        .and(unsigned())
        .map(|(sign, n)| match sign {
            Some(_) => -(n as i32),
            None => n as i32,
        })
}

/// Parses any character except `c`.
pub fn not_char<G: Grammar<Input = &'static str>>(c: char) -> Parser<G, char> {
    satisfy(move |ch: &char| *ch != c)
}

/// Parses any character from `chars`.
pub fn one_of<G: Grammar<Input = &'static str>>(chars: &str) -> Parser<G, char> {
    let chars = chars.to_string();
    satisfy(move |c: &char| chars.contains(*c))
}

/// Parses any character not in `chars`.
pub fn none_of<G: Grammar<Input = &'static str>>(chars: &str) -> Parser<G, char> {
    let chars = chars.to_string();
    satisfy(move |c: &char| !chars.contains(*c))
}
