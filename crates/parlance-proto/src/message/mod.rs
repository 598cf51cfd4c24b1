//! Inbound and outbound IRC lines.
//!
//! [`MessageRef`] borrows from the raw line it was tokenized from and is
//! what the dispatcher validates. [`Message`] is owned, built by handlers,
//! and serialized with [`std::fmt::Display`] when it reaches a writer.

mod borrowed;
mod owned;
mod tokenize;

pub use self::borrowed::MessageRef;
pub use self::tokenize::Params;
pub use self::owned::{Message, Verb};
