//! Error types for line tokenizing, grammar checks and mode parsing.

use thiserror::Error;

use crate::grammar::Grammar;

/// A line that could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LineError {
    /// Nothing but whitespace. Servers ignore these silently.
    #[error("empty line")]
    Empty,

    /// The command token is neither letters nor a three digit numeric.
    #[error("invalid command token")]
    InvalidCommand {
        /// Best-effort command token, used in the 421 reply.
        hint: Option<String>,
    },

    /// A prefix marker with no command after it.
    #[error("missing command")]
    MissingCommand,
}

/// A parameter failed its grammar predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value:?} is not a valid {grammar}")]
pub struct GrammarError {
    /// The predicate that rejected the value.
    pub grammar: Grammar,
    /// The offending value.
    pub value: String,
}

/// A single mode character that could not be turned into a carrier.
///
/// Mode strings are parsed one character at a time and each character
/// fails on its own, so a bad flag never hides the good ones around it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModeError {
    /// The character is not a known mode, or not legal for this operation.
    #[error("unknown mode character '{0}'")]
    Unknown(char),

    /// A user mode character appeared before any `+` or `-`.
    #[error("mode '{0}' has no sign")]
    Unsigned(char),

    /// The mode's parameter was missing or failed its grammar.
    #[error("mode '{mode}' has a bad parameter {param:?}")]
    BadParam {
        /// The mode character.
        mode: char,
        /// The value it was given, empty when the parameter list ran out.
        param: String,
    },
}

impl ModeError {
    /// The mode character this error is about.
    pub fn mode_char(&self) -> char {
        match self {
            Self::Unknown(c) | Self::Unsigned(c) => *c,
            Self::BadParam { mode, .. } => *mode,
        }
    }
}
