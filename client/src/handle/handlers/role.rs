use log::debug;
use serde::Deserialize;
use serde_json::Value;

use cordial_shared::{Role, RoleSnapshot, Snowflake};

use crate::{
    cache::{update_role, Scope},
    error::HandleError,
    events::Event,
    handle::{
        dispatcher::{decode, Handled, HandlerContext},
        handlers::guild_scope,
    },
};

#[derive(Deserialize)]
struct RoleCreate {
    guild_id: Snowflake,
    role: RoleSnapshot,
}

#[derive(Deserialize)]
struct RoleDelete {
    guild_id: Snowflake,
    role_id: Snowflake,
}

pub(crate) fn guild_role_create(ctx: &mut HandlerContext<'_>, payload: &Value) -> Result<Handled, HandleError> {
    let create: RoleCreate = decode("role create", payload)?;
    let guild_id = create.guild_id;
    let role_id = create.role.id;
    let guild = scope!(guild_scope(ctx, guild_id));

    {
        let writer = ctx.state.cache.scope_writer(Scope::Guild(guild_id));
        let _write = writer.lock();
        let (role, created) = guild
            .roles_map()
            .get_or_insert_with(role_id, || Role::new(guild_id, &create.role));
        if !created {
            update_role(&mut role.write(), &create.role);
        }
    }

    ctx.publish(Event::RoleCreated { guild_id, role_id });
    Ok(Handled::Applied)
}

/// Removes the role and strips it from every member and emote that
/// referenced it.
pub(crate) fn guild_role_delete(ctx: &mut HandlerContext<'_>, payload: &Value) -> Result<Handled, HandleError> {
    let delete: RoleDelete = decode("role delete", payload)?;
    let guild_id = delete.guild_id;
    let guild = scope!(guild_scope(ctx, guild_id));

    let removed = {
        let writer = ctx.state.cache.scope_writer(Scope::Guild(guild_id));
        let _write = writer.lock();
        let removed = guild.roles_map().remove(&delete.role_id);
        if removed.is_some() {
            for member in guild.members() {
                member.write().roles_mut().remove(&delete.role_id);
            }
            for emote in guild.emotes() {
                emote.write().roles_mut().remove(&delete.role_id);
            }
        }
        removed
    };

    let Some(role) = removed else {
        debug!("Deleted role {} was not cached in guild {}", delete.role_id, guild_id);
        return Ok(Handled::Applied);
    };

    let role = role.read().clone();
    ctx.publish(Event::RoleDeleted { guild_id, role });
    Ok(Handled::Applied)
}
