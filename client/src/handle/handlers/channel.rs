use log::debug;
use serde_json::Value;

use cordial_shared::{
    ChannelSnapshot, ChannelType, DecodeError, Group, PrivateChannel, Snowflake, TextChannel,
    User, VoiceChannel,
};

use crate::{
    cache::Scope,
    error::HandleError,
    events::Event,
    handle::{
        dispatcher::{decode, Handled, HandlerContext},
        event_cache::DeferKind,
        handlers::guild_scope,
    },
};

pub(crate) fn channel_create(ctx: &mut HandlerContext<'_>, payload: &Value) -> Result<Handled, HandleError> {
    let snapshot: ChannelSnapshot = decode("channel", payload)?;
    let channel_id = snapshot.id;
    let state = ctx.state;
    let cache = &state.cache;

    match snapshot.kind {
        ChannelType::Text | ChannelType::Voice => {
            let guild_id = required_guild(&snapshot)?;
            let guild = scope!(guild_scope(ctx, guild_id));

            let writer = cache.scope_writer(Scope::Guild(guild_id));
            let _write = writer.lock();
            if snapshot.kind == ChannelType::Text {
                guild
                    .text_channels_map()
                    .put(channel_id, TextChannel::new(guild_id, &snapshot));
            } else {
                guild
                    .voice_channels_map()
                    .put(channel_id, VoiceChannel::new(guild_id, &snapshot));
            }
            cache.index_channel(channel_id, guild_id);
        }
        ChannelType::Private => {
            let Some(recipient) = snapshot.recipients.first() else {
                return Err(DecodeError::MissingField { field: "recipients" }.into());
            };

            let writer = cache.scope_writer(Scope::Global);
            let _write = writer.lock();
            let channel = PrivateChannel::new(channel_id, recipient.id);
            if cache.user(&recipient.id).is_some() {
                cache.fake_private_channels().remove(&channel_id);
                cache.private_channels().put(channel_id, channel);
            } else {
                // recipient shares no guild with us; keep both as placeholders
                cache
                    .fake_users()
                    .get_or_insert_with(recipient.id, || User::fake(recipient));
                cache.fake_private_channels().put(channel_id, channel);
            }
        }
        ChannelType::Group => {
            let writer = cache.scope_writer(Scope::Global);
            let _write = writer.lock();
            cache.groups().put(channel_id, Group::new(&snapshot));
        }
        ChannelType::Unknown(raw) => {
            debug!("Ignoring creation of channel {} with unknown type {}", channel_id, raw);
            return Ok(Handled::Applied);
        }
    }

    ctx.publish(Event::ChannelCreated {
        channel_id,
        kind: snapshot.kind,
        guild_id: snapshot.guild_id.filter(|_| snapshot.kind.is_guild()),
    });
    ctx.resolve(DeferKind::Channel, channel_id);
    // a private recipient is now cached, live or as a placeholder
    if snapshot.kind == ChannelType::Private {
        for recipient in &snapshot.recipients {
            ctx.resolve(DeferKind::User, recipient.id);
        }
    }
    Ok(Handled::Applied)
}

pub(crate) fn channel_delete(ctx: &mut HandlerContext<'_>, payload: &Value) -> Result<Handled, HandleError> {
    let snapshot: ChannelSnapshot = decode("channel", payload)?;
    let channel_id = snapshot.id;
    let state = ctx.state;
    let cache = &state.cache;

    let removed = match snapshot.kind {
        ChannelType::Text | ChannelType::Voice => {
            let guild_id = required_guild(&snapshot)?;
            let guild = scope!(guild_scope(ctx, guild_id));

            let writer = cache.scope_writer(Scope::Guild(guild_id));
            let _write = writer.lock();
            let removed = if snapshot.kind == ChannelType::Text {
                guild.text_channels_map().remove(&channel_id).is_some()
            } else {
                guild.voice_channels_map().remove(&channel_id).is_some()
            };
            cache.unindex_channel(&channel_id);
            removed
        }
        ChannelType::Private => {
            let writer = cache.scope_writer(Scope::Global);
            let _write = writer.lock();
            let live = cache.private_channels().remove(&channel_id).is_some();
            let fake = cache.fake_private_channels().remove(&channel_id).is_some();
            live || fake
        }
        ChannelType::Group => {
            let writer = cache.scope_writer(Scope::Global);
            let _write = writer.lock();
            cache.groups().remove(&channel_id).is_some()
        }
        ChannelType::Unknown(raw) => {
            debug!("Ignoring deletion of channel {} with unknown type {}", channel_id, raw);
            false
        }
    };

    if !removed {
        debug!("Deleted channel {} was not cached", channel_id);
        return Ok(Handled::Applied);
    }

    let discarded = state.event_cache.discard(DeferKind::Channel, channel_id);
    if discarded > 0 {
        debug!("Discarded {} deferred event(s) of deleted channel {}", discarded, channel_id);
    }

    ctx.publish(Event::ChannelDeleted {
        channel_id,
        kind: snapshot.kind,
        guild_id: snapshot.guild_id.filter(|_| snapshot.kind.is_guild()),
    });
    Ok(Handled::Applied)
}

fn required_guild(snapshot: &ChannelSnapshot) -> Result<Snowflake, HandleError> {
    snapshot
        .guild_id
        .ok_or_else(|| DecodeError::MissingField { field: "guild_id" }.into())
}
