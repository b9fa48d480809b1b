use std::sync::Arc;

use log::debug;

use cordial_shared::Snowflake;

use crate::{
    cache::{Channel, Guild},
    handle::{
        dispatcher::{Handled, HandlerContext},
        event_cache::DeferKind,
    },
};

/// Unwraps a scope lookup, returning the wait reason from the handler.
macro_rules! scope {
    ($lookup:expr) => {
        match $lookup {
            Ok(scope) => scope,
            Err(handled) => return Ok(handled),
        }
    };
}

pub(crate) mod channel;
pub(crate) mod emote;
pub(crate) mod guild;
pub(crate) mod member;
pub(crate) mod message;
pub(crate) mod reaction;
pub(crate) mod role;

/// The cached guild a guild-scoped event applies to, or the reason it has to
/// wait: the scope is locked, or the guild has not been seen yet.
fn guild_scope(ctx: &HandlerContext<'_>, guild_id: Snowflake) -> Result<Arc<Guild>, Handled> {
    if ctx.state.guild_lock.is_locked(&guild_id) {
        return Err(Handled::Locked(guild_id));
    }
    ctx.state.cache.guild(&guild_id).ok_or_else(|| {
        debug!("Deferring event for uncached guild {}", guild_id);
        Handled::Deferred(DeferKind::Guild, guild_id)
    })
}

/// The cached channel a message-level event applies to. Guild channels are
/// subject to their guild's lock.
fn channel_scope(ctx: &HandlerContext<'_>, channel_id: Snowflake) -> Result<Channel, Handled> {
    let Some(channel) = ctx.state.cache.channel(&channel_id) else {
        debug!("Deferring event for uncached channel {}", channel_id);
        return Err(Handled::Deferred(DeferKind::Channel, channel_id));
    };
    if let Some(guild_id) = channel.guild_id() {
        if ctx.state.guild_lock.is_locked(&guild_id) {
            return Err(Handled::Locked(guild_id));
        }
    }
    Ok(channel)
}
