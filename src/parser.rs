//! A `nom`-based parser for JSONPath path expressions.

use crate::ast::{MemberTest, Path, PathComponent, Scope, SubscriptTest};
use crate::error::PathError;
use crate::grammar;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, u64 as nom_u64},
    combinator::map,
    multi::many0,
    sequence::{delimited, pair, preceded},
};

// --- Main Public Parser ---

pub fn parse_path(input: &str) -> Result<Path, PathError> {
    match path(input.trim()) {
        Ok(("", p)) => Ok(p),
        Ok((rem, _)) => Err(PathError::PathParse(
            input.to_string(),
            format!("Parser did not consume all input. Remainder: '{}'", rem),
        )),
        Err(e) => Err(PathError::PathParse(input.to_string(), e.to_string())),
    }
}

// --- Combinators ---

fn path(input: &str) -> IResult<&str, Path> {
    map(pair(root, many0(component)), |(root, mut rest)| {
        let mut components = vec![root];
        components.append(&mut rest);
        Path::from_components(components)
    })
    .parse(input)
}

fn root(input: &str) -> IResult<&str, PathComponent> {
    map(char('$'), |_| PathComponent::Root).parse(input)
}

// Descendant forms first: `..` must win over `.`, and `..[` over `..name`.
fn component(input: &str) -> IResult<&str, PathComponent> {
    alt((
        descendant_subscript,
        descendant_member,
        child_subscript,
        child_member,
    ))
    .parse(input)
}

// --- Member Parsers ---

fn member_test(input: &str) -> IResult<&str, MemberTest> {
    alt((
        map(grammar::identifier, |name| {
            MemberTest::Name(name.to_string())
        }),
        map(char('*'), |_| MemberTest::Wildcard),
    ))
    .parse(input)
}

fn child_member(input: &str) -> IResult<&str, PathComponent> {
    map(preceded(char('.'), member_test), |test| {
        PathComponent::Member {
            scope: Scope::Child,
            test,
        }
    })
    .parse(input)
}

fn descendant_member(input: &str) -> IResult<&str, PathComponent> {
    map(preceded(tag(".."), member_test), |test| {
        PathComponent::Member {
            scope: Scope::Descendant,
            test,
        }
    })
    .parse(input)
}

// --- Subscript Parsers ---

fn subscript_test(input: &str) -> IResult<&str, SubscriptTest> {
    alt((
        map(nom_u64, |i| SubscriptTest::Index(i as usize)),
        map(
            alt((grammar::double_quoted, grammar::single_quoted)),
            SubscriptTest::Key,
        ),
        map(char('*'), |_| SubscriptTest::Wildcard),
    ))
    .parse(input)
}

fn subscript(input: &str) -> IResult<&str, SubscriptTest> {
    delimited(char('['), ws(subscript_test), char(']')).parse(input)
}

fn child_subscript(input: &str) -> IResult<&str, PathComponent> {
    map(subscript, |test| PathComponent::Subscript {
        scope: Scope::Child,
        test,
    })
    .parse(input)
}

fn descendant_subscript(input: &str) -> IResult<&str, PathComponent> {
    map(preceded(tag(".."), subscript), |test| {
        PathComponent::Subscript {
            scope: Scope::Descendant,
            test,
        }
    })
    .parse(input)
}

/// A combinator that takes a parser `inner` and produces a parser that consumes surrounding whitespace.
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}
