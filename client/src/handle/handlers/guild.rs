use std::sync::Arc;

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use cordial_shared::{GuildSnapshot, Member, MemberSnapshot, Snowflake};

use crate::{
    cache::{update_member, Guild, Scope},
    error::HandleError,
    events::Event,
    handle::{
        dispatcher::{decode, Handled, HandlerContext},
        event_cache::DeferKind,
    },
};

/// Enough of a guild payload to tell an outage marker from a full snapshot.
#[derive(Deserialize)]
struct GuildStub {
    id: Snowflake,
    #[serde(default)]
    unavailable: bool,
}

#[derive(Deserialize)]
struct MembersChunk {
    guild_id: Snowflake,
    #[serde(default)]
    members: Vec<MemberSnapshot>,
}

pub(crate) fn guild_create(ctx: &mut HandlerContext<'_>, payload: &Value) -> Result<Handled, HandleError> {
    let stub: GuildStub = decode("guild", payload)?;
    if stub.unavailable {
        mark_unavailable(ctx, stub.id);
        return Ok(Handled::Applied);
    }

    let guild_id = stub.id;
    if ctx.state.guild_lock.is_locked(&guild_id) {
        return Ok(Handled::Locked(guild_id));
    }

    let snapshot: GuildSnapshot = decode("guild", payload)?;
    let state = ctx.state;
    let cache = &state.cache;
    let (guild, joined) = {
        let writer = cache.scope_writer(Scope::Guild(guild_id));
        let _write = writer.lock();

        for member in &snapshot.members {
            cache.upsert_user(&member.user);
        }

        match cache.guild(&guild_id) {
            Some(guild) => {
                guild.sync(&snapshot);
                cache.index_guild_channels(&guild);
                (guild, false)
            }
            None => {
                let guild = Arc::new(Guild::new(&snapshot));
                cache.insert_guild(guild.clone());
                (guild, true)
            }
        }
    };

    if joined {
        ctx.publish(Event::GuildJoined { guild_id });
    }

    let complete = !snapshot.large || snapshot.members.len() >= snapshot.member_count;
    if complete {
        ctx.publish(Event::GuildReady { guild_id });
    } else if state.config.enforce_bulk_load_lock {
        state.guild_lock.lock(guild_id);
    } else {
        debug!(
            "Guild {} loaded with {}/{} members, not locking",
            guild_id,
            snapshot.members.len(),
            snapshot.member_count
        );
    }

    ctx.resolve(DeferKind::Guild, guild_id);
    for channel_id in guild
        .text_channels_map()
        .ids()
        .into_iter()
        .chain(guild.voice_channels_map().ids())
    {
        ctx.resolve(DeferKind::Channel, channel_id);
    }
    for member in &snapshot.members {
        ctx.resolve(DeferKind::User, member.user.id);
    }

    Ok(Handled::Applied)
}

/// Member chunks are the bulk load itself, so they are applied even while
/// the guild is locked. The chunk that completes the member list unlocks it.
pub(crate) fn guild_members_chunk(
    ctx: &mut HandlerContext<'_>,
    payload: &Value,
) -> Result<Handled, HandleError> {
    let chunk: MembersChunk = decode("members chunk", payload)?;
    let state = ctx.state;
    let guild_id = chunk.guild_id;
    let cache = &state.cache;
    let Some(guild) = cache.guild(&guild_id) else {
        debug!("Deferring member chunk for uncached guild {}", guild_id);
        return Ok(Handled::Deferred(DeferKind::Guild, guild_id));
    };

    let (was_complete, is_complete) = {
        let writer = cache.scope_writer(Scope::Guild(guild_id));
        let _write = writer.lock();

        let expected = guild.member_count();
        let was_complete = guild.members_map().len() >= expected;
        for snapshot in &chunk.members {
            cache.upsert_user(&snapshot.user);
            let (member, created) = guild
                .members_map()
                .get_or_insert_with(snapshot.user.id, || Member::new(guild_id, snapshot));
            if !created {
                update_member(&mut member.write(), snapshot);
            }
        }
        (was_complete, guild.members_map().len() >= expected)
    };

    for snapshot in &chunk.members {
        ctx.resolve(DeferKind::User, snapshot.user.id);
    }

    if is_complete && !was_complete {
        debug!("Guild {} finished loading members", guild_id);
        ctx.unlock(guild_id);
        ctx.publish(Event::GuildReady { guild_id });
    }

    Ok(Handled::Applied)
}

/// An outage marks the guild unavailable. Anything else means the self
/// account left or the guild was deleted, and the whole scope is torn down
/// regardless of its lock.
pub(crate) fn guild_delete(ctx: &mut HandlerContext<'_>, payload: &Value) -> Result<Handled, HandleError> {
    let stub: GuildStub = decode("guild", payload)?;
    if stub.unavailable {
        mark_unavailable(ctx, stub.id);
        return Ok(Handled::Applied);
    }

    let guild_id = stub.id;
    let state = ctx.state;
    let removed = {
        let writer = state.cache.scope_writer(Scope::Guild(guild_id));
        let _write = writer.lock();
        state.cache.remove_guild(&guild_id)
    };

    state.guild_lock.unlock(&guild_id);
    let mut discarded = state.event_cache.discard(DeferKind::ScopeLock, guild_id);
    discarded += state.event_cache.discard(DeferKind::Guild, guild_id);

    let Some(guild) = removed else {
        debug!("Guild {} was not cached, nothing to tear down", guild_id);
        return Ok(Handled::Applied);
    };

    for channel_id in guild
        .text_channels_map()
        .ids()
        .into_iter()
        .chain(guild.voice_channels_map().ids())
    {
        discarded += state.event_cache.discard(DeferKind::Channel, channel_id);
    }
    if discarded > 0 {
        info!("Discarded {} deferred event(s) of removed guild {}", discarded, guild_id);
    }

    ctx.publish(Event::GuildLeft { guild_id });
    Ok(Handled::Applied)
}

fn mark_unavailable(ctx: &mut HandlerContext<'_>, guild_id: Snowflake) {
    match ctx.state.cache.guild(&guild_id) {
        Some(guild) => {
            if guild.is_available() {
                guild.set_available(false);
                ctx.publish(Event::GuildUnavailable { guild_id });
            }
        }
        None => debug!("Ignoring outage of uncached guild {}", guild_id),
    }
}
