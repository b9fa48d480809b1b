//! # Cordial Client
//! Mirrors remote chat-server state (guilds, channels, members, roles,
//! emotes) from a push event stream, and issues permission-checked requests
//! against the pull API through a pluggable transport.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use cordial_shared::{
        creation_time_of, format_date_time, AccountType, ChannelSnapshot, ChannelType,
        DecodeError, Emote, EmoteSnapshot, Group, GuildData, GuildSnapshot, Identifiable,
        IdentifierError, Invite, Member, MemberSnapshot, Permission, PermissionError,
        PrivateChannel, ReactionEmote, Role, RoleSnapshot, Snowflake, TextChannel, User,
        UserSnapshot, VerificationLevel, VoiceChannel, Webhook,
    };
}

mod actions;
mod cache;
mod client;
mod error;
mod events;
mod handle;
mod permission;
mod reaction;
mod request;

pub use cache::{
    new_handle, reconcile_set, Channel, EntityCache, EntityMap, Guild, GuildSyncReport, Handle,
    ReconcileReport, Scope, SetDiff,
};
pub use client::{Client, ClientConfig};
pub use error::{HandleError, RequestError};
pub use events::{Event, EventListener, Events};
pub use handle::{DeferKind, Dispatched, Envelope, EventCache, GuildLock};
pub use permission::{PermissionResolver, RolePermissions};
pub use reaction::{reaction_code, resolve_emote, ChannelRef, MessageReaction};
pub use request::{
    classify, routes, CompiledRequest, CompiledRoute, ErrorResponse, Method, PendingResult,
    RestAction, Route, Transport, TransportResponse,
};
