//! Borrowed view of one inbound line.

use crate::error::LineError;
use crate::prefix::origin_name;

use super::tokenize::{self, Params};

/// One tokenized line, borrowing from the raw text.
///
/// ```
/// use parlance_proto::MessageRef;
///
/// let msg = MessageRef::parse(":bob PRIVMSG #rust :hello there\r\n").unwrap();
/// assert_eq!(msg.prefix, Some("bob"));
/// assert_eq!(msg.command, "PRIVMSG");
/// assert_eq!(msg.params.as_slice(), ["#rust", "hello there"]);
/// assert!(msg.trailing);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRef<'a> {
    /// The line without its line terminator.
    pub raw: &'a str,
    /// Origin, without the leading `:`.
    pub prefix: Option<&'a str>,
    /// Command word or numeric, as sent.
    pub command: &'a str,
    /// Middle parameters followed by the trailing one, if any.
    pub params: Params<'a>,
    /// Whether the last parameter was introduced by `:`.
    pub trailing: bool,
}

impl<'a> MessageRef<'a> {
    /// Tokenize one line. Trailing CR/LF are ignored.
    #[must_use = "parsing result should be handled"]
    pub fn parse(line: &'a str) -> Result<Self, LineError> {
        let raw = line.trim_end_matches(['\r', '\n']);
        if raw.trim_matches(' ').is_empty() {
            return Err(LineError::Empty);
        }

        match tokenize::line(raw) {
            Ok((_, tokens)) => Ok(Self {
                raw,
                prefix: tokens.prefix,
                command: tokens.command,
                params: tokens.params,
                trailing: tokens.trailing,
            }),
            Err(_) => Err(Self::classify_failure(raw)),
        }
    }

    fn classify_failure(raw: &str) -> LineError {
        let mut words = raw.split(' ').filter(|w| !w.is_empty());
        let mut first = words.next();
        if first.is_some_and(|w| w.starts_with(':')) {
            first = words.next();
        }
        match first {
            None => LineError::MissingCommand,
            Some(word) => LineError::InvalidCommand {
                hint: Some(word.to_owned()),
            },
        }
    }

    /// Parameter `idx`, if present.
    #[inline]
    pub fn param(&self, idx: usize) -> Option<&'a str> {
        self.params.get(idx).copied()
    }

    /// Number of parameters, trailing included.
    #[inline]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Name part of the prefix (`nick` of `nick!user@host`).
    pub fn origin(&self) -> Option<&'a str> {
        self.prefix.map(origin_name)
    }

    /// Whether the command is a three digit numeric.
    pub fn is_numeric(&self) -> bool {
        self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit())
    }
}
