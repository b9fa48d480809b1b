//! # Cordial Shared
//! Identifier codec and entity data types shared by the cordial client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod entities;
mod error;
mod permission;
mod snowflake;
mod verification;

pub use entities::{
    channel::{
        ChannelSnapshot, ChannelType, Group, PrivateChannel, TextChannel, VoiceChannel,
    },
    emote::{Emote, EmoteSnapshot},
    guild::{GuildData, GuildSnapshot, MfaLevel, NotificationLevel},
    invite::{Invite, InviteChannel, InviteGuild},
    member::{Member, MemberSnapshot},
    reaction::ReactionEmote,
    role::{Role, RoleSnapshot},
    user::{User, UserSnapshot},
    webhook::Webhook,
};
pub use error::{DecodeError, IdentifierError, PermissionError};
pub use permission::Permission;
pub use snowflake::{
    creation_time_of, format_date_time, Identifiable, Snowflake, EPOCH_OFFSET_MS,
    TIMESTAMP_SHIFT,
};
pub use verification::{
    check_verification, AccountType, VerificationInput, VerificationLevel,
    HIGH_MEMBERSHIP_MINUTES, MEDIUM_ACCOUNT_MINUTES,
};
