use std::{mem, vec::IntoIter};

use cordial_shared::{ChannelType, Emote, Role, Snowflake};

use crate::reaction::MessageReaction;

/// Domain notifications published after an inbound event has been applied
/// to the cache.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    // Guild lifecycle
    GuildJoined { guild_id: Snowflake },
    GuildReady { guild_id: Snowflake },
    GuildUnavailable { guild_id: Snowflake },
    GuildLeft { guild_id: Snowflake },

    // Channels
    ChannelCreated {
        channel_id: Snowflake,
        kind: ChannelType,
        guild_id: Option<Snowflake>,
    },
    ChannelDeleted {
        channel_id: Snowflake,
        kind: ChannelType,
        guild_id: Option<Snowflake>,
    },

    // Roles
    RoleCreated { guild_id: Snowflake, role_id: Snowflake },
    RoleDeleted { guild_id: Snowflake, role: Role },

    // Members
    MemberRoleAdded {
        guild_id: Snowflake,
        user_id: Snowflake,
        role_ids: Vec<Snowflake>,
    },
    MemberRoleRemoved {
        guild_id: Snowflake,
        user_id: Snowflake,
        role_ids: Vec<Snowflake>,
    },
    MemberNickChanged {
        guild_id: Snowflake,
        user_id: Snowflake,
        old_nick: Option<String>,
        new_nick: Option<String>,
    },

    // Emotes
    EmoteAdded { guild_id: Snowflake, emote_id: Snowflake },
    EmoteRemoved { guild_id: Snowflake, emote: Emote },
    EmoteNameChanged {
        guild_id: Snowflake,
        emote_id: Snowflake,
        old_name: String,
        new_name: String,
    },
    EmoteRolesChanged {
        guild_id: Snowflake,
        emote_id: Snowflake,
        added: Vec<Snowflake>,
        removed: Vec<Snowflake>,
    },

    // Messages. Kind-specific variants precede the generic `MessageDelete`.
    GuildMessageDelete {
        guild_id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
    },
    PrivateMessageDelete {
        channel_id: Snowflake,
        message_id: Snowflake,
    },
    GroupMessageDelete {
        channel_id: Snowflake,
        message_id: Snowflake,
    },
    MessageDelete {
        channel_id: Snowflake,
        kind: ChannelType,
        message_id: Snowflake,
    },

    // Reactions
    MessageReactionAdd {
        reaction: MessageReaction,
        user_id: Snowflake,
    },
    MessageReactionRemove {
        reaction: MessageReaction,
        user_id: Snowflake,
    },
}

impl Event {
    /// Guild scope this event belongs to, if any.
    pub fn guild_id(&self) -> Option<Snowflake> {
        match self {
            Self::GuildJoined { guild_id }
            | Self::GuildReady { guild_id }
            | Self::GuildUnavailable { guild_id }
            | Self::GuildLeft { guild_id }
            | Self::RoleCreated { guild_id, .. }
            | Self::RoleDeleted { guild_id, .. }
            | Self::MemberRoleAdded { guild_id, .. }
            | Self::MemberRoleRemoved { guild_id, .. }
            | Self::MemberNickChanged { guild_id, .. }
            | Self::EmoteAdded { guild_id, .. }
            | Self::EmoteRemoved { guild_id, .. }
            | Self::EmoteNameChanged { guild_id, .. }
            | Self::EmoteRolesChanged { guild_id, .. }
            | Self::GuildMessageDelete { guild_id, .. } => Some(*guild_id),
            Self::ChannelCreated { guild_id, .. } | Self::ChannelDeleted { guild_id, .. } => {
                *guild_id
            }
            Self::MessageReactionAdd { reaction, .. }
            | Self::MessageReactionRemove { reaction, .. } => reaction.channel().guild_id,
            Self::PrivateMessageDelete { .. }
            | Self::GroupMessageDelete { .. }
            | Self::MessageDelete { .. } => None,
        }
    }
}

/// Receives every published event, synchronously and in publication order.
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &Event);
}

/// Published events waiting to be read by the application.
pub struct Events {
    list: Vec<Event>,
}

impl Events {
    pub(crate) fn new() -> Self {
        Self { list: Vec::new() }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Takes every buffered event, oldest first.
    pub fn drain(&mut self) -> IntoIter<Event> {
        mem::take(&mut self.list).into_iter()
    }

    // Crate-public

    pub(crate) fn push(&mut self, event: Event) {
        self.list.push(event);
    }
}
