use serde::Deserialize;

use crate::{
    ChannelSnapshot, EmoteSnapshot, MemberSnapshot, RoleSnapshot, Snowflake, VerificationLevel,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum NotificationLevel {
    AllMessages,
    MentionsOnly,
    Unknown(u8),
}

impl From<u8> for NotificationLevel {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::AllMessages,
            1 => Self::MentionsOnly,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum MfaLevel {
    None,
    TwoFactorAuth,
    Unknown(u8),
}

impl From<u8> for MfaLevel {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::TwoFactorAuth,
            other => Self::Unknown(other),
        }
    }
}

/// Full guild payload as delivered by `GUILD_CREATE`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GuildSnapshot {
    pub id: Snowflake,
    #[serde(default)]
    pub name: String,
    pub owner_id: Snowflake,
    #[serde(default, rename = "icon")]
    pub icon_id: Option<String>,
    #[serde(default, rename = "splash")]
    pub splash_id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "VerificationLevel::none")]
    pub verification_level: VerificationLevel,
    #[serde(default = "notification_default", rename = "default_message_notifications")]
    pub notification_level: NotificationLevel,
    #[serde(default = "mfa_default")]
    pub mfa_level: MfaLevel,
    #[serde(default)]
    pub afk_timeout: u32,
    #[serde(default)]
    pub afk_channel_id: Option<Snowflake>,
    #[serde(default)]
    pub unavailable: bool,
    #[serde(default)]
    pub large: bool,
    #[serde(default)]
    pub member_count: usize,
    #[serde(default)]
    pub roles: Vec<RoleSnapshot>,
    #[serde(default)]
    pub channels: Vec<ChannelSnapshot>,
    #[serde(default)]
    pub members: Vec<MemberSnapshot>,
    #[serde(default)]
    pub emojis: Vec<EmoteSnapshot>,
}

fn notification_default() -> NotificationLevel {
    NotificationLevel::AllMessages
}

fn mfa_default() -> MfaLevel {
    MfaLevel::None
}

/// Scalar attributes of a guild, i.e. everything that is not an owned
/// child collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuildData {
    pub name: String,
    pub owner_id: Snowflake,
    pub icon_id: Option<String>,
    pub splash_id: Option<String>,
    pub region: Option<String>,
    pub verification_level: VerificationLevel,
    pub notification_level: NotificationLevel,
    pub mfa_level: MfaLevel,
    pub afk_timeout: u32,
    pub afk_channel_id: Option<Snowflake>,
    /// The default text channel, which shares the guild's id
    pub public_channel_id: Snowflake,
    pub available: bool,
    pub member_count: usize,
}

impl GuildData {
    pub fn new(snapshot: &GuildSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            owner_id: snapshot.owner_id,
            icon_id: snapshot.icon_id.clone(),
            splash_id: snapshot.splash_id.clone(),
            region: snapshot.region.clone(),
            verification_level: snapshot.verification_level,
            notification_level: snapshot.notification_level,
            mfa_level: snapshot.mfa_level,
            afk_timeout: snapshot.afk_timeout,
            afk_channel_id: snapshot.afk_channel_id,
            public_channel_id: snapshot.id,
            available: !snapshot.unavailable,
            member_count: snapshot.member_count,
        }
    }
}
