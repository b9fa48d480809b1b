use cordial_shared::{Permission, Snowflake};

use crate::{
    cache::Channel,
    client::Client,
    error::RequestError,
    request::{ignore_body, routes, CompiledRequest, RestAction},
};

impl Client {
    /// Deletes a message by id in a cached text, private or group channel.
    /// In a guild channel the self member must be able to read messages;
    /// whether it may delete someone else's message is decided remotely.
    pub fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Result<RestAction<()>, RequestError> {
        let channel = self.state.cache.channel(&channel_id).ok_or_else(|| {
            RequestError::invalid_argument(format!("channel {} is not cached", channel_id))
        })?;

        match &channel {
            Channel::Text(text) => {
                let guild_id = text.read().guild_id();
                let guild = self.require_guild(&guild_id)?;
                self.state
                    .check_permission(&guild, Some(channel_id), Permission::MessageRead)?;
            }
            Channel::Private(_) | Channel::Group(_) => {}
            Channel::Voice(_) => {
                return Err(RequestError::invalid_argument(format!(
                    "channel {} is a voice channel and has no messages",
                    channel_id
                )))
            }
        }

        let route =
            routes::DELETE_MESSAGE.compile(&[&channel_id.to_string(), &message_id.to_string()])?;
        Ok(RestAction::new(
            self.state.clone(),
            CompiledRequest::new(route),
            ignore_body,
        ))
    }
}
