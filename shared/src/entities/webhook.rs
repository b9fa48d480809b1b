use serde::Deserialize;

use crate::{Identifiable, Snowflake, UserSnapshot};

/// A guild webhook as returned by the webhooks listing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Webhook {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "avatar")]
    pub avatar_id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Creator of the webhook, absent without `MANAGE_WEBHOOKS`
    #[serde(default, rename = "user")]
    pub owner: Option<UserSnapshot>,
}

impl Identifiable for Webhook {
    fn id(&self) -> Snowflake {
        self.id
    }
}
