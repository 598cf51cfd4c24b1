//! Mode strings.
//!
//! [`parse_user_modes`] and [`parse_channel_modes`] turn `+o-v alice bob`
//! style input into an ordered list of [`ModeCarrier`]s. Each character
//! yields its own `Result`, so one bad flag is reported on its own while
//! the rest of the string still applies.

mod parse;
mod types;

pub use self::parse::{parse_channel_modes, parse_user_modes};
pub use self::types::{flag_string, ChannelMode, ModeKind, ModeOp, UserMode};

use std::fmt::Write as _;

/// One parsed mode change: which flag, which direction, which argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeCarrier<M> {
    mode: M,
    op: ModeOp,
    param: Option<String>,
}

impl<M: ModeKind> ModeCarrier<M> {
    /// Build a carrier.
    pub fn new(mode: M, op: ModeOp, param: Option<String>) -> Self {
        Self { mode, op, param }
    }

    /// The flag.
    pub fn mode(&self) -> M {
        self.mode
    }

    /// Add, remove or list.
    pub fn op(&self) -> ModeOp {
        self.op
    }

    /// The argument, for modes that take one.
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }
}

/// Render applied changes as a compact mode string plus arguments, e.g.
/// `("+mo-v", ["alice", "bob"])`. List queries are skipped.
pub fn render_changes<M: ModeKind>(changes: &[ModeCarrier<M>]) -> (String, Vec<String>) {
    let mut flags = String::new();
    let mut params = Vec::new();
    let mut current = None;
    for change in changes {
        let sign = match change.op {
            ModeOp::Add => '+',
            ModeOp::Remove => '-',
            ModeOp::List => continue,
        };
        if current != Some(sign) {
            flags.push(sign);
            current = Some(sign);
        }
        let _ = flags.write_char(change.mode.as_char());
        if let Some(param) = &change.param {
            params.push(param.clone());
        }
    }
    (flags, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_grouped_signs() {
        let changes = vec![
            ModeCarrier::new(ChannelMode::Moderated, ModeOp::Add, None),
            ModeCarrier::new(ChannelMode::Oper, ModeOp::Add, Some("alice".into())),
            ModeCarrier::new(ChannelMode::Voice, ModeOp::Remove, Some("bob".into())),
            ModeCarrier::new(ChannelMode::Ban, ModeOp::List, None),
        ];
        let (flags, params) = render_changes(&changes);
        assert_eq!(flags, "+mo-v");
        assert_eq!(params, ["alice", "bob"]);
    }
}
