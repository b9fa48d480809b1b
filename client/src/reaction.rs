use std::fmt;

use cordial_shared::{ChannelType, Emote, ReactionEmote, Snowflake};

use crate::cache::{new_handle, Channel, EntityCache, Handle};

/// Weak reference to the channel a reaction lives in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelRef {
    pub id: Snowflake,
    pub kind: ChannelType,
    pub guild_id: Option<Snowflake>,
}

impl ChannelRef {
    pub fn of(channel: &Channel) -> Self {
        Self {
            id: channel.id(),
            kind: channel.channel_type(),
            guild_id: channel.guild_id(),
        }
    }
}

/// One emoji's reactions on one message.
#[derive(Clone, Debug)]
pub struct MessageReaction {
    channel: ChannelRef,
    emote: ReactionEmote,
    message_id: Snowflake,
    is_self: bool,
    count: Option<u32>,
}

impl MessageReaction {
    pub fn new(
        channel: ChannelRef,
        emote: ReactionEmote,
        message_id: Snowflake,
        is_self: bool,
        count: Option<u32>,
    ) -> Self {
        Self {
            channel,
            emote,
            message_id,
            is_self,
            count,
        }
    }

    pub fn channel(&self) -> &ChannelRef {
        &self.channel
    }

    pub fn emote(&self) -> &ReactionEmote {
        &self.emote
    }

    pub fn message_id(&self) -> Snowflake {
        self.message_id
    }

    /// Whether the self account is one of the reactors.
    pub fn is_self(&self) -> bool {
        self.is_self
    }

    /// Number of reactors, when known. Reactions built from gateway events
    /// carry no count.
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// Path segment identifying the emoji: `name:id` for custom emotes, the
    /// form-urlencoded name for unicode emoji.
    pub fn reaction_code(&self) -> String {
        reaction_code(&self.emote)
    }
}

impl PartialEq for MessageReaction {
    fn eq(&self, other: &Self) -> bool {
        self.emote == other.emote
            && self.is_self == other.is_self
            && self.message_id == other.message_id
    }
}

impl Eq for MessageReaction {}

impl fmt::Display for MessageReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MR:(M:({}) / {:?})", self.message_id, self.emote)
    }
}

pub fn reaction_code(emote: &ReactionEmote) -> String {
    match emote {
        ReactionEmote::Custom { id, name } => format!("{}:{}", name, id),
        ReactionEmote::Unicode { name } => url::form_urlencoded::byte_serialize(name.as_bytes()).collect(),
    }
}

/// Resolves the custom emote behind a reaction emote.
///
/// Unicode emoji have no emote and yield `None`. A custom emote that is no
/// longer cached resolves to an uncached placeholder carrying the id and
/// display name recorded on the reaction.
pub fn resolve_emote(cache: &EntityCache, emote: &ReactionEmote) -> Option<Handle<Emote>> {
    match emote {
        ReactionEmote::Custom { id, name } => Some(
            cache
                .emote(id)
                .unwrap_or_else(|| new_handle(Emote::fake(*id, name))),
        ),
        ReactionEmote::Unicode { .. } => None,
    }
}
