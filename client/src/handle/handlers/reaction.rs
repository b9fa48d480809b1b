use log::debug;
use serde::Deserialize;
use serde_json::Value;

use cordial_shared::{ReactionEmote, Snowflake};

use crate::{
    error::HandleError,
    events::Event,
    handle::{
        dispatcher::{decode, Handled, HandlerContext},
        event_cache::DeferKind,
        handlers::channel_scope,
    },
    reaction::{ChannelRef, MessageReaction},
};

#[derive(Deserialize)]
struct ReactionUpdate {
    user_id: Snowflake,
    channel_id: Snowflake,
    message_id: Snowflake,
    emoji: ReactionEmote,
}

pub(crate) fn message_reaction_add(
    ctx: &mut HandlerContext<'_>,
    payload: &Value,
) -> Result<Handled, HandleError> {
    handle_reaction(ctx, payload, true)
}

pub(crate) fn message_reaction_remove(
    ctx: &mut HandlerContext<'_>,
    payload: &Value,
) -> Result<Handled, HandleError> {
    handle_reaction(ctx, payload, false)
}

fn handle_reaction(
    ctx: &mut HandlerContext<'_>,
    payload: &Value,
    added: bool,
) -> Result<Handled, HandleError> {
    let update: ReactionUpdate = decode("reaction", payload)?;
    let channel = scope!(channel_scope(ctx, update.channel_id));

    let cache = &ctx.state.cache;
    let user_id = update.user_id;
    if cache.user(&user_id).is_none() && cache.fake_users().get(&user_id).is_none() {
        debug!("Deferring reaction by uncached user {}", user_id);
        return Ok(Handled::Deferred(DeferKind::User, user_id));
    }

    let reaction = MessageReaction::new(
        ChannelRef::of(&channel),
        update.emoji,
        update.message_id,
        user_id == ctx.state.self_id,
        None,
    );

    if added {
        ctx.publish(Event::MessageReactionAdd { reaction, user_id });
    } else {
        ctx.publish(Event::MessageReactionRemove { reaction, user_id });
    }
    Ok(Handled::Applied)
}
