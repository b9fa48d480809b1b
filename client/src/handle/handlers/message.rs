use serde::Deserialize;
use serde_json::Value;

use cordial_shared::Snowflake;

use crate::{
    cache::Channel,
    error::HandleError,
    events::Event,
    handle::{
        dispatcher::{decode, Handled, HandlerContext},
        handlers::channel_scope,
    },
};

#[derive(Deserialize)]
struct MessageDelete {
    id: Snowflake,
    channel_id: Snowflake,
}

/// Publishes the channel-kind event first, then the generic one.
pub(crate) fn message_delete(ctx: &mut HandlerContext<'_>, payload: &Value) -> Result<Handled, HandleError> {
    let delete: MessageDelete = decode("message delete", payload)?;
    let channel_id = delete.channel_id;
    let message_id = delete.id;
    let channel = scope!(channel_scope(ctx, channel_id));

    let specific = match &channel {
        Channel::Text(text) => Event::GuildMessageDelete {
            guild_id: text.read().guild_id(),
            channel_id,
            message_id,
        },
        Channel::Private(_) => Event::PrivateMessageDelete {
            channel_id,
            message_id,
        },
        Channel::Group(_) => Event::GroupMessageDelete {
            channel_id,
            message_id,
        },
        Channel::Voice(_) => {
            return Err(HandleError::UnexpectedChannelType {
                channel_id,
                kind: channel.channel_type(),
                event: "MESSAGE_DELETE",
            })
        }
    };

    ctx.publish(specific);
    ctx.publish(Event::MessageDelete {
        channel_id,
        kind: channel.channel_type(),
        message_id,
    });
    Ok(Handled::Applied)
}
