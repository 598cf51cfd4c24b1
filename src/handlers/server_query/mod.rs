//! Server query handlers.
//!
//! Every query here takes an optional target server; a target that is not
//! this server is forwarded by mask instead of being answered.

mod disabled;
mod info;
mod links;
mod lusers;
mod motd;
mod stats;

pub use disabled::{SummonHandler, UsersHandler};
pub use info::{AdminHandler, InfoHandler, TimeHandler, VersionHandler};
pub use links::{LinksHandler, ServlistHandler};
pub use lusers::LusersHandler;
pub use motd::{MotdHandler, send_motd};
pub use stats::StatsHandler;

use parlance_proto::MessageRef;

use crate::error::ProtocolError;
use crate::handlers::core::Context;
use crate::handlers::helpers::server_target;

/// Target server of `QUERY [<target>]`.
fn target_param(ctx: &Context<'_>, msg: &MessageRef<'_>, idx: usize) -> Result<Option<String>, ProtocolError> {
    server_target(ctx, msg.param(idx))
}
