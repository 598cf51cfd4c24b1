//! Mode string parsing with per-character error isolation.

use crate::error::ModeError;
use crate::mask::normalize_user_mask;

use super::types::{ChannelMode, ModeKind, ModeOp, UserMode};
use super::ModeCarrier;

/// Parse a user mode string such as `+iw-s`.
///
/// A flag before any sign is rejected; user modes have no query form.
pub fn parse_user_modes(modestring: &str) -> Vec<Result<ModeCarrier<UserMode>, ModeError>> {
    let mut op = None;
    let mut out = Vec::new();
    for c in modestring.chars() {
        match c {
            '+' => op = Some(ModeOp::Add),
            '-' => op = Some(ModeOp::Remove),
            _ => out.push(match op {
                None => Err(ModeError::Unsigned(c)),
                Some(op) => match UserMode::from_char(c) {
                    Some(mode) if mode.is_legal(op) => Ok(ModeCarrier::new(mode, op, None)),
                    _ => Err(ModeError::Unknown(c)),
                },
            }),
        }
    }
    out
}

/// Parse a channel mode string and its arguments.
///
/// Arguments are consumed left to right by the flags that need them. Each
/// argument may itself hold several comma separated values. When they run
/// out, a list mode turns into a query and any other flag gets an empty
/// argument, which fails its grammar and is reported as that flag's error.
pub fn parse_channel_modes(
    modestring: &str,
    args: &[&str],
) -> Vec<Result<ModeCarrier<ChannelMode>, ModeError>> {
    let mut tokens = args
        .iter()
        .flat_map(|a| a.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|t| !t.is_empty())
        .peekable();

    let mut op = ModeOp::List;
    let mut out = Vec::new();
    for c in modestring.chars() {
        match c {
            '+' => {
                op = ModeOp::Add;
                continue;
            }
            '-' => {
                op = ModeOp::Remove;
                continue;
            }
            _ => {}
        }

        let Some(mode) = ChannelMode::from_char(c) else {
            out.push(Err(ModeError::Unknown(c)));
            continue;
        };
        let op = if mode.is_list() && tokens.peek().is_none() {
            ModeOp::List
        } else {
            op
        };
        if !mode.is_legal(op) {
            out.push(Err(ModeError::Unknown(c)));
            continue;
        }

        let carrier = match mode.param_grammar(op) {
            None => Ok(ModeCarrier::new(mode, op, None)),
            Some(grammar) => {
                let param = tokens.next().unwrap_or_default();
                if !grammar.is_match(param) {
                    Err(ModeError::BadParam {
                        mode: c,
                        param: param.to_owned(),
                    })
                } else if mode.is_list() {
                    Ok(ModeCarrier::new(mode, op, Some(normalize_user_mask(param))))
                } else {
                    Ok(ModeCarrier::new(mode, op, Some(param.to_owned())))
                }
            }
        };
        out.push(carrier);
    }
    out
}
