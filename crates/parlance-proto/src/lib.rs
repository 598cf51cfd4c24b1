//! # parlance-proto
//!
//! Wire-level building blocks for the parlance IRC server.
//!
//! - [`MessageRef`]: a borrowed view of one inbound line, tokenized with nom
//! - [`Message`]: an owned outbound message with RFC 2812 serialization
//! - [`Response`]: numeric reply codes and their fixed-text templates
//! - [`Grammar`]: the validation predicates every command uses on its parameters
//! - [`mask`]: wildcard matching for nick, channel, host and server masks
//! - [`mode`]: user and channel mode string parsing
//!
//! ```rust
//! use parlance_proto::{Grammar, MessageRef};
//!
//! let line = MessageRef::parse("NICK alice").unwrap();
//! assert_eq!(line.command, "NICK");
//! assert!(Grammar::Nickname.is_match(line.params[0]));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod error;
pub mod grammar;
pub mod mask;
pub mod message;
pub mod mode;
pub mod prefix;
pub mod response;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use self::error::{GrammarError, LineError, ModeError};
pub use self::grammar::Grammar;
pub use self::message::{Message, MessageRef, Verb};
pub use self::mode::{ChannelMode, ModeCarrier, ModeOp, UserMode};
pub use self::prefix::Prefix;
pub use self::response::Response;

/// Longest line accepted on the wire, CRLF included.
pub const MAX_LINE_LENGTH: usize = 512;

/// Parameters a single line may carry.
pub const MAX_PARAMS: usize = 15;
