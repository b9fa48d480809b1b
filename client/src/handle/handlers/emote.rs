use serde::Deserialize;
use serde_json::Value;

use cordial_shared::{Emote, EmoteSnapshot, Snowflake};

use crate::{
    cache::{reconcile_set, update_emote, Scope},
    error::HandleError,
    events::Event,
    handle::{
        dispatcher::{decode, Handled, HandlerContext},
        handlers::guild_scope,
    },
};

#[derive(Deserialize)]
struct EmotesUpdate {
    guild_id: Snowflake,
    #[serde(default)]
    emojis: Vec<EmoteSnapshot>,
}

/// The payload is the guild's complete emote list. Surviving emotes keep
/// their handle; their name and allowed roles are diffed in place.
pub(crate) fn guild_emojis_update(
    ctx: &mut HandlerContext<'_>,
    payload: &Value,
) -> Result<Handled, HandleError> {
    let update: EmotesUpdate = decode("emotes update", payload)?;
    let guild_id = update.guild_id;
    let guild = scope!(guild_scope(ctx, guild_id));

    let mut changes = Vec::new();
    let report = {
        let writer = ctx.state.cache.scope_writer(Scope::Guild(guild_id));
        let _write = writer.lock();

        guild.emotes_map().reconcile(
            &update.emojis,
            |snapshot| snapshot.id,
            |snapshot| {
                let mut emote = Emote::new(guild_id, snapshot.id);
                update_emote(&mut emote, snapshot);
                emote
            },
            |emote, snapshot| {
                let mut changed = false;
                if emote.name() != snapshot.name {
                    changes.push(Event::EmoteNameChanged {
                        guild_id,
                        emote_id: snapshot.id,
                        old_name: emote.name().to_string(),
                        new_name: snapshot.name.clone(),
                    });
                    emote.set_name(&snapshot.name);
                    changed = true;
                }
                if emote.is_managed() != snapshot.managed {
                    emote.set_managed(snapshot.managed);
                    changed = true;
                }
                let roles = reconcile_set(emote.roles_mut(), snapshot.roles.iter().copied());
                if !roles.is_empty() {
                    changes.push(Event::EmoteRolesChanged {
                        guild_id,
                        emote_id: snapshot.id,
                        added: roles.added,
                        removed: roles.removed,
                    });
                    changed = true;
                }
                changed
            },
        )
    };

    for event in changes {
        ctx.publish(event);
    }
    for (_, emote) in report.removed {
        let emote = emote.read().clone();
        ctx.publish(Event::EmoteRemoved { guild_id, emote });
    }
    for emote_id in report.added {
        ctx.publish(Event::EmoteAdded { guild_id, emote_id });
    }

    Ok(Handled::Applied)
}
