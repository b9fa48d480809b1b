use log::warn;
use serde_json::Value;

use cordial_shared::{ChannelType, DecodeError, Permission, PermissionError, Snowflake, User, UserSnapshot};

use crate::{
    cache::Handle,
    client::{Client, ClientState},
    error::RequestError,
    reaction::MessageReaction,
    request::{ignore_body, routes, CompiledRequest, RestAction},
};

/// Largest page the reaction-users endpoint serves.
const MAX_REACTION_USERS: u32 = 100;

impl Client {
    /// Users who reacted with `reaction`, at most `amount` of them
    /// (`None` uses the configured page size).
    ///
    /// Users the cache does not know come back as uncached placeholders, so
    /// the list is always complete.
    pub fn retrieve_reaction_users(
        &self,
        reaction: &MessageReaction,
        amount: Option<u32>,
    ) -> Result<RestAction<Vec<Handle<User>>>, RequestError> {
        let amount = amount.unwrap_or(self.state.config.reaction_page_size);
        if !(1..=MAX_REACTION_USERS).contains(&amount) {
            return Err(RequestError::invalid_argument(format!(
                "amount {} is out of range 1-{}",
                amount, MAX_REACTION_USERS
            )));
        }

        let route = routes::GET_REACTION_USERS.compile(&[
            &reaction.channel().id.to_string(),
            &reaction.message_id().to_string(),
            &reaction.reaction_code(),
            &amount.to_string(),
        ])?;

        Ok(RestAction::new(
            self.state.clone(),
            CompiledRequest::new(route),
            reaction_users,
        ))
    }

    /// Removes `user_id`'s reaction. Removing another user's reaction needs
    /// `MessageManage` and is only possible in guild text channels.
    pub fn remove_reaction(
        &self,
        reaction: &MessageReaction,
        user_id: Snowflake,
    ) -> Result<RestAction<()>, RequestError> {
        let channel = reaction.channel();
        if user_id != self.state.self_id {
            if channel.kind != ChannelType::Text {
                return Err(PermissionError::Refused {
                    reason: "cannot remove another user's reaction outside a guild text channel",
                }
                .into());
            }
            let guild_id = channel.guild_id.ok_or(RequestError::IllegalState {
                reason: "text channel reference carries no guild",
            })?;
            let guild = self.require_guild(&guild_id)?;
            self.state
                .check_permission(&guild, Some(channel.id), Permission::MessageManage)?;
        }

        let route = routes::REMOVE_REACTION.compile(&[
            &channel.id.to_string(),
            &reaction.message_id().to_string(),
            &reaction.reaction_code(),
            &user_id.to_string(),
        ])?;

        Ok(RestAction::new(
            self.state.clone(),
            CompiledRequest::new(route),
            ignore_body,
        ))
    }
}

/// Resolves each listed user against the cache: live entry, then cached
/// placeholder, then a fresh uncached placeholder. Malformed elements are
/// skipped.
fn reaction_users(state: &ClientState, body: Value) -> Result<Vec<Handle<User>>, RequestError> {
    let Value::Array(elements) = body else {
        return Err(DecodeError::MalformedPayload {
            what: "reaction users",
            reason: "expected an array".to_string(),
        }
        .into());
    };

    let mut users = Vec::with_capacity(elements.len());
    for element in elements {
        match serde_json::from_value::<UserSnapshot>(element) {
            Ok(snapshot) => users.push(state.cache.user_or_placeholder(&snapshot)),
            Err(err) => warn!("Skipping malformed reaction user: {}", err),
        }
    }
    Ok(users)
}
