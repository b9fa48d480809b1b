use serde::Deserialize;

use crate::{Identifiable, Snowflake, UserSnapshot};

/// Channel kind tag as carried in the `type` field of channel payloads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "u8")]
pub enum ChannelType {
    Text,
    Private,
    Voice,
    Group,
    Unknown(u8),
}

impl From<u8> for ChannelType {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::Text,
            1 => Self::Private,
            2 => Self::Voice,
            3 => Self::Group,
            other => Self::Unknown(other),
        }
    }
}

impl ChannelType {
    pub fn is_guild(&self) -> bool {
        matches!(self, Self::Text | Self::Voice)
    }

    /// Whether messages (and therefore message deletes/reactions) can occur.
    pub fn is_message_channel(&self) -> bool {
        matches!(self, Self::Text | Self::Private | Self::Group)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChannelSnapshot {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub user_limit: u32,
    #[serde(default)]
    pub bitrate: u32,
    #[serde(default)]
    pub owner_id: Option<Snowflake>,
    #[serde(default)]
    pub recipients: Vec<UserSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextChannel {
    id: Snowflake,
    guild_id: Snowflake,
    name: String,
    position: i32,
    topic: Option<String>,
}

impl TextChannel {
    pub fn new(guild_id: Snowflake, snapshot: &ChannelSnapshot) -> Self {
        Self {
            id: snapshot.id,
            guild_id,
            name: snapshot.name.clone().unwrap_or_default(),
            position: snapshot.position,
            topic: snapshot.topic.clone(),
        }
    }

    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn as_mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

impl Identifiable for TextChannel {
    fn id(&self) -> Snowflake {
        self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceChannel {
    id: Snowflake,
    guild_id: Snowflake,
    name: String,
    position: i32,
    user_limit: u32,
    bitrate: u32,
}

impl VoiceChannel {
    pub fn new(guild_id: Snowflake, snapshot: &ChannelSnapshot) -> Self {
        Self {
            id: snapshot.id,
            guild_id,
            name: snapshot.name.clone().unwrap_or_default(),
            position: snapshot.position,
            user_limit: snapshot.user_limit,
            bitrate: snapshot.bitrate,
        }
    }

    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn user_limit(&self) -> u32 {
        self.user_limit
    }

    pub fn bitrate(&self) -> u32 {
        self.bitrate
    }
}

impl Identifiable for VoiceChannel {
    fn id(&self) -> Snowflake {
        self.id
    }
}

/// Direct-message channel with a single recipient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateChannel {
    id: Snowflake,
    recipient_id: Snowflake,
}

impl PrivateChannel {
    pub fn new(id: Snowflake, recipient_id: Snowflake) -> Self {
        Self { id, recipient_id }
    }

    pub fn recipient_id(&self) -> Snowflake {
        self.recipient_id
    }
}

impl Identifiable for PrivateChannel {
    fn id(&self) -> Snowflake {
        self.id
    }
}

/// Multi-user direct-message channel, only visible to client accounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    id: Snowflake,
    name: Option<String>,
    owner_id: Option<Snowflake>,
    recipient_ids: Vec<Snowflake>,
}

impl Group {
    pub fn new(snapshot: &ChannelSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name.clone(),
            owner_id: snapshot.owner_id,
            recipient_ids: snapshot.recipients.iter().map(|user| user.id).collect(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn owner_id(&self) -> Option<Snowflake> {
        self.owner_id
    }

    pub fn recipient_ids(&self) -> &[Snowflake] {
        &self.recipient_ids
    }
}

impl Identifiable for Group {
    fn id(&self) -> Snowflake {
        self.id
    }
}
