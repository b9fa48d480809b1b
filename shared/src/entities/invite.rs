use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{Snowflake, UserSnapshot};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InviteGuild {
    pub id: Snowflake,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InviteChannel {
    pub id: Snowflake,
    #[serde(default)]
    pub name: String,
}

/// An invite code with its metadata, as listed for a guild.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Invite {
    pub code: String,
    #[serde(default)]
    pub guild: Option<InviteGuild>,
    pub channel: InviteChannel,
    #[serde(default)]
    pub inviter: Option<UserSnapshot>,
    #[serde(default)]
    pub uses: u32,
    /// Zero means unlimited
    #[serde(default)]
    pub max_uses: u32,
    /// Seconds, zero means the invite never expires
    #[serde(default)]
    pub max_age: u32,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Invite {
    pub fn url(&self) -> String {
        format!("https://discord.gg/{}", self.code)
    }
}
