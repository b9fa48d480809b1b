use log::warn;
use serde_json::{json, Value};

use cordial_shared::{DecodeError, Invite, Permission, PermissionError, Snowflake, Webhook};

use crate::{
    client::{Client, ClientState},
    error::RequestError,
    request::{ignore_body, routes, CompiledRequest, RestAction},
};

impl Client {
    /// Leaves a guild. The owner cannot leave without transferring ownership.
    pub fn leave_guild(&self, guild_id: Snowflake) -> Result<RestAction<()>, RequestError> {
        let guild = self.require_guild(&guild_id)?;
        if guild.owner_id() == self.state.self_id {
            return Err(RequestError::IllegalState {
                reason: "cannot leave a guild you own, transfer ownership first",
            });
        }

        let route = routes::LEAVE_GUILD.compile(&[&guild_id.to_string()])?;
        Ok(RestAction::new(
            self.state.clone(),
            CompiledRequest::new(route),
            ignore_body,
        ))
    }

    /// Deletes a guild the self account owns. Accounts with MFA enabled must
    /// provide their current code.
    pub fn delete_guild(
        &self,
        guild_id: Snowflake,
        mfa_code: Option<&str>,
    ) -> Result<RestAction<()>, RequestError> {
        let guild = self.require_guild(&guild_id)?;
        if guild.owner_id() != self.state.self_id {
            return Err(PermissionError::Refused {
                reason: "cannot delete a guild you do not own",
            }
            .into());
        }

        let route = routes::DELETE_GUILD.compile(&[&guild_id.to_string()])?;
        let request = if self.state.self_user.read().is_mfa_enabled() {
            let code = mfa_code
                .filter(|code| !code.trim().is_empty())
                .ok_or_else(|| RequestError::invalid_argument("an MFA code is required to delete a guild"))?;
            CompiledRequest::with_body(route, json!({ "code": code }))
        } else {
            CompiledRequest::new(route)
        };

        Ok(RestAction::new(self.state.clone(), request, ignore_body))
    }

    /// Webhooks of every channel in the guild. Requires `ManageWebhooks`.
    pub fn retrieve_webhooks(&self, guild_id: Snowflake) -> Result<RestAction<Vec<Webhook>>, RequestError> {
        let guild = self.require_guild(&guild_id)?;
        self.state
            .check_permission(&guild, None, Permission::ManageWebhooks)?;

        let route = routes::GET_WEBHOOKS.compile(&[&guild_id.to_string()])?;
        Ok(RestAction::new(
            self.state.clone(),
            CompiledRequest::new(route),
            webhooks,
        ))
    }

    /// Active invites of the guild. Requires `ManageServer`.
    pub fn retrieve_invites(&self, guild_id: Snowflake) -> Result<RestAction<Vec<Invite>>, RequestError> {
        let guild = self.require_guild(&guild_id)?;
        self.state
            .check_permission(&guild, None, Permission::ManageServer)?;

        let route = routes::GET_GUILD_INVITES.compile(&[&guild_id.to_string()])?;
        Ok(RestAction::new(
            self.state.clone(),
            CompiledRequest::new(route),
            invites,
        ))
    }
}

/// Malformed webhooks are logged and left out of the list.
fn webhooks(_: &ClientState, body: Value) -> Result<Vec<Webhook>, RequestError> {
    let Value::Array(elements) = body else {
        return Err(DecodeError::MalformedPayload {
            what: "webhooks",
            reason: "expected an array".to_string(),
        }
        .into());
    };

    Ok(elements
        .into_iter()
        .filter_map(|element| match serde_json::from_value::<Webhook>(element) {
            Ok(webhook) => Some(webhook),
            Err(err) => {
                warn!("Skipping malformed webhook: {}", err);
                None
            }
        })
        .collect())
}

fn invites(_: &ClientState, body: Value) -> Result<Vec<Invite>, RequestError> {
    serde_json::from_value(body).map_err(|err| DecodeError::payload("invites", err).into())
}
