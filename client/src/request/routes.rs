//! Endpoints used by the rest actions.

use crate::request::route::{Method, Route};

// Messages
pub const DELETE_MESSAGE: Route = Route::new(Method::Delete, "channels/{channel_id}/messages/{message_id}");

// Reactions
pub const GET_REACTION_USERS: Route = Route::new(
    Method::Get,
    "channels/{channel_id}/messages/{message_id}/reactions/{reaction_code}?limit={limit}",
);
pub const REMOVE_REACTION: Route = Route::new(
    Method::Delete,
    "channels/{channel_id}/messages/{message_id}/reactions/{reaction_code}/{user_id}",
);

// Guilds
pub const LEAVE_GUILD: Route = Route::new(Method::Delete, "users/@me/guilds/{guild_id}");
pub const DELETE_GUILD: Route = Route::new(Method::Post, "guilds/{guild_id}/delete");
pub const GET_WEBHOOKS: Route = Route::new(Method::Get, "guilds/{guild_id}/webhooks");
pub const GET_GUILD_INVITES: Route = Route::new(Method::Get, "guilds/{guild_id}/invites");
