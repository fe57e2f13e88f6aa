//! Lexical dictionary shared by the path parser and key normalization.
//!
//! Defines what counts as a bare identifier and how string-literal subscript
//! keys are parsed and canonically quoted. Everything here is pure and
//! stateless; the parser composes these building blocks into the path
//! grammar.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take_while, take_while_m_n},
    character::complete::{alpha1, char},
    combinator::{map, map_opt, opt, recognize, value},
    multi::fold_many0,
    sequence::{delimited, pair, preceded},
};

/// Recognizes a bare identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

/// Returns true if the whole string is a valid bare identifier, i.e. it can
/// be rendered with member syntax (`.key`) instead of subscript syntax
/// (`["key"]`).
pub fn is_identifier(s: &str) -> bool {
    matches!(identifier(s), Ok(("", _)))
}

/// Renders a string key in its canonical double-quoted, escaped form.
pub fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for ch in raw.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// --- String-literal parsers ---

fn unicode_escape(input: &str) -> IResult<&str, char> {
    map_opt(
        preceded(
            char('u'),
            take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
        ),
        |hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32),
    )
    .parse(input)
}

fn escape_sequence(input: &str) -> IResult<&str, char> {
    preceded(
        char('\\'),
        alt((
            value('"', char('"')),
            value('\\', char('\\')),
            value('/', char('/')),
            value('\n', char('n')),
            value('\t', char('t')),
            value('\r', char('r')),
            value('\u{8}', char('b')),
            value('\u{c}', char('f')),
            unicode_escape,
        )),
    )
    .parse(input)
}

enum Fragment<'a> {
    Literal(&'a str),
    Escaped(char),
}

/// Parses a double-quoted string literal with standard JSON escaping.
pub fn double_quoted(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        fold_many0(
            alt((
                map(is_not("\"\\"), Fragment::Literal),
                map(escape_sequence, Fragment::Escaped),
            )),
            String::new,
            |mut acc, frag| {
                match frag {
                    Fragment::Literal(s) => acc.push_str(s),
                    Fragment::Escaped(c) => acc.push(c),
                }
                acc
            },
        ),
        char('"'),
    )
    .parse(input)
}

/// Parses a single-quoted string literal. Accepted on input for convenience;
/// canonical output always uses the double-quoted form.
pub fn single_quoted(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('\''), opt(is_not("'")), char('\'')),
        |s: Option<&str>| s.unwrap_or("").to_string(),
    )
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("name"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("a1_b2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("with space"));
        assert!(!is_identifier("dash-ed"));
        assert!(!is_identifier("$"));
    }

    #[test]
    fn test_quote_plain_and_escaped() {
        assert_eq!(quote("title"), "\"title\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("line\nbreak"), "\"line\\nbreak\"");
    }

    #[test]
    fn test_double_quoted() {
        assert_eq!(double_quoted("\"abc\""), Ok(("", "abc".to_string())));
        assert_eq!(double_quoted("\"\""), Ok(("", String::new())));
        assert_eq!(
            double_quoted("\"a\\\"b\\\\c\""),
            Ok(("", "a\"b\\c".to_string()))
        );
        assert_eq!(double_quoted("\"\\u0041\""), Ok(("", "A".to_string())));
        assert!(double_quoted("\"unterminated").is_err());
    }

    #[test]
    fn test_single_quoted() {
        assert_eq!(single_quoted("'abc'"), Ok(("", "abc".to_string())));
        assert_eq!(single_quoted("''"), Ok(("", String::new())));
        assert!(single_quoted("'unterminated").is_err());
    }
}
