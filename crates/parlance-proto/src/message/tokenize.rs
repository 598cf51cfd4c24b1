//! nom tokenizer for `[':' prefix SPACE] command SPACE* [params]`.

use nom::{
    branch::alt,
    bytes::complete::{take_while1, take_while_m_n},
    character::complete::{alpha1, char, space0},
    combinator::opt,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

use crate::MAX_PARAMS;

/// Parameter storage; a full line fits without spilling to the heap.
pub type Params<'a> = SmallVec<[&'a str; MAX_PARAMS]>;

fn prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// `1*letter / 3digit`. A numeric must be followed by a space or the end.
pub(crate) fn command(input: &str) -> IResult<&str, &str> {
    let numeric = take_while_m_n(3, 3, |c: char| c.is_ascii_digit());
    let (rest, cmd) = alt((alpha1, numeric))(input)?;
    match rest.chars().next() {
        None | Some(' ') => Ok((rest, cmd)),
        Some(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::AlphaNumeric,
        ))),
    }
}

/// Split the parameter section. Up to fourteen middle parameters are
/// space separated; a parameter introduced by `:`, or the fifteenth one,
/// runs to the end of the line. The flag reports whether the last
/// parameter came in as a `:` trailing.
pub(crate) fn params(mut rest: &str) -> (Params<'_>, bool) {
    let mut out = Params::new();
    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return (out, false);
        }
        if let Some(trailing) = rest.strip_prefix(':') {
            out.push(trailing);
            return (out, true);
        }
        if out.len() == MAX_PARAMS - 1 {
            out.push(rest);
            return (out, false);
        }
        let end = rest.find(' ').unwrap_or(rest.len());
        out.push(&rest[..end]);
        rest = &rest[end..];
    }
}

/// Raw pieces of one line.
#[derive(Debug)]
pub(crate) struct Tokens<'a> {
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: Params<'a>,
    pub trailing: bool,
}

pub(crate) fn line(input: &str) -> IResult<&str, Tokens<'_>> {
    let (input, _) = space0(input)?;
    let (input, prefix) = opt(prefix)(input)?;
    let (input, _) = space0(input)?;
    let (input, command) = command(input)?;
    let (params, trailing) = params(input);
    Ok((
        "",
        Tokens {
            prefix,
            command,
            params,
            trailing,
        },
    ))
}
