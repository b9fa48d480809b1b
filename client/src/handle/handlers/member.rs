use log::debug;
use serde::Deserialize;
use serde_json::Value;

use cordial_shared::{Snowflake, UserSnapshot};

use crate::{
    cache::{reconcile_set, Scope},
    error::HandleError,
    events::Event,
    handle::{
        dispatcher::{decode, Handled, HandlerContext},
        event_cache::DeferKind,
        handlers::guild_scope,
    },
};

#[derive(Deserialize)]
struct MemberUpdate {
    guild_id: Snowflake,
    user: UserSnapshot,
    #[serde(default)]
    nick: Option<String>,
    #[serde(default)]
    roles: Vec<Snowflake>,
}

pub(crate) fn guild_member_update(
    ctx: &mut HandlerContext<'_>,
    payload: &Value,
) -> Result<Handled, HandleError> {
    let update: MemberUpdate = decode("member update", payload)?;
    let guild_id = update.guild_id;
    let user_id = update.user.id;
    let guild = scope!(guild_scope(ctx, guild_id));

    let Some(member) = guild.member(&user_id) else {
        debug!("Deferring update of uncached member {} in guild {}", user_id, guild_id);
        return Ok(Handled::Deferred(DeferKind::User, user_id));
    };

    let state = ctx.state;
    let (roles, old_nick) = {
        let writer = state.cache.scope_writer(Scope::Guild(guild_id));
        let _write = writer.lock();

        state.cache.upsert_user(&update.user);

        let mut member = member.write();
        let roles = reconcile_set(member.roles_mut(), update.roles.iter().copied());
        let old_nick = member.nickname().map(str::to_string);
        if old_nick != update.nick {
            member.set_nickname(update.nick.clone());
        }
        (roles, old_nick)
    };

    ctx.resolve(DeferKind::User, user_id);

    if !roles.removed.is_empty() {
        ctx.publish(Event::MemberRoleRemoved {
            guild_id,
            user_id,
            role_ids: roles.removed,
        });
    }
    if !roles.added.is_empty() {
        ctx.publish(Event::MemberRoleAdded {
            guild_id,
            user_id,
            role_ids: roles.added,
        });
    }
    if old_nick != update.nick {
        ctx.publish(Event::MemberNickChanged {
            guild_id,
            user_id,
            old_nick,
            new_nick: update.nick,
        });
    }

    Ok(Handled::Applied)
}
