use std::{collections::HashMap, sync::Arc};

use log::debug;
use parking_lot::{Mutex, RwLock};

use cordial_shared::{
    ChannelType, Emote, Group, Identifiable, PrivateChannel, Snowflake, TextChannel, User,
    UserSnapshot, VoiceChannel,
};

use crate::cache::{
    entity_map::{new_handle, EntityMap, Handle},
    guild::Guild,
};

/// Write-ordering partition of the cache.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Users, private channels and groups
    Global,
    /// A guild and everything it owns
    Guild(Snowflake),
}

/// A cached channel of any kind.
#[derive(Clone)]
pub enum Channel {
    Text(Handle<TextChannel>),
    Voice(Handle<VoiceChannel>),
    Private(Handle<PrivateChannel>),
    Group(Handle<Group>),
}

impl Channel {
    pub fn id(&self) -> Snowflake {
        match self {
            Self::Text(channel) => channel.read().id(),
            Self::Voice(channel) => channel.read().id(),
            Self::Private(channel) => channel.read().id(),
            Self::Group(channel) => channel.read().id(),
        }
    }

    pub fn channel_type(&self) -> ChannelType {
        match self {
            Self::Text(_) => ChannelType::Text,
            Self::Voice(_) => ChannelType::Voice,
            Self::Private(_) => ChannelType::Private,
            Self::Group(_) => ChannelType::Group,
        }
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        match self {
            Self::Text(channel) => Some(channel.read().guild_id()),
            Self::Voice(channel) => Some(channel.read().guild_id()),
            Self::Private(_) | Self::Group(_) => None,
        }
    }
}

/// The in-memory mirror of remote state.
///
/// Guild scopes own their roles, channels, members and emotes. Users,
/// private channels and groups live in the global scope. Every map supports
/// concurrent readers; writes to one scope are ordered by holding that
/// scope's [`scope_writer`](Self::scope_writer) guard.
pub struct EntityCache {
    guilds: RwLock<HashMap<Snowflake, Arc<Guild>>>,
    users: EntityMap<User>,
    fake_users: EntityMap<User>,
    private_channels: EntityMap<PrivateChannel>,
    fake_private_channels: EntityMap<PrivateChannel>,
    groups: EntityMap<Group>,
    // guild channel id -> owning guild id
    channel_index: RwLock<HashMap<Snowflake, Snowflake>>,
    scope_writers: Mutex<HashMap<Scope, Arc<Mutex<()>>>>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self {
            guilds: RwLock::new(HashMap::new()),
            users: EntityMap::new(),
            fake_users: EntityMap::new(),
            private_channels: EntityMap::new(),
            fake_private_channels: EntityMap::new(),
            groups: EntityMap::new(),
            channel_index: RwLock::new(HashMap::new()),
            scope_writers: Mutex::new(HashMap::new()),
        }
    }

    /// The mutex that orders writers of `scope`. Created on first use, the
    /// same mutex is returned for the scope's whole lifetime.
    pub fn scope_writer(&self, scope: Scope) -> Arc<Mutex<()>> {
        self.scope_writers
            .lock()
            .entry(scope)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    // Guilds

    pub fn guild(&self, id: &Snowflake) -> Option<Arc<Guild>> {
        self.guilds.read().get(id).cloned()
    }

    pub fn has_guild(&self, id: &Snowflake) -> bool {
        self.guilds.read().contains_key(id)
    }

    pub fn guilds(&self) -> Vec<Arc<Guild>> {
        self.guilds.read().values().cloned().collect()
    }

    /// Adds a guild scope and indexes its channels. Replaces any scope that
    /// was cached under the same id.
    pub fn insert_guild(&self, guild: Arc<Guild>) -> Option<Arc<Guild>> {
        let id = guild.id();
        self.index_guild_channels(&guild);
        self.guilds.write().insert(id, guild)
    }

    /// Removes a guild scope and every index entry pointing into it.
    pub fn remove_guild(&self, id: &Snowflake) -> Option<Arc<Guild>> {
        let guild = self.guilds.write().remove(id)?;
        self.channel_index
            .write()
            .retain(|_, guild_id| guild_id != id);
        self.scope_writers.lock().remove(&Scope::Guild(*id));
        debug!("Removed guild scope {}", id);
        Some(guild)
    }

    pub fn index_guild_channels(&self, guild: &Guild) {
        let guild_id = guild.id();
        let mut index = self.channel_index.write();
        index.retain(|_, indexed| *indexed != guild_id);
        for id in guild.text_channels_map().ids() {
            index.insert(id, guild_id);
        }
        for id in guild.voice_channels_map().ids() {
            index.insert(id, guild_id);
        }
    }

    pub fn index_channel(&self, channel_id: Snowflake, guild_id: Snowflake) {
        self.channel_index.write().insert(channel_id, guild_id);
    }

    pub fn unindex_channel(&self, channel_id: &Snowflake) -> Option<Snowflake> {
        self.channel_index.write().remove(channel_id)
    }

    /// Owning guild of a guild channel.
    pub fn guild_of_channel(&self, channel_id: &Snowflake) -> Option<Arc<Guild>> {
        let guild_id = *self.channel_index.read().get(channel_id)?;
        self.guild(&guild_id)
    }

    // Channels

    pub fn text_channel(&self, id: &Snowflake) -> Option<Handle<TextChannel>> {
        self.guild_of_channel(id)?.text_channel(id)
    }

    pub fn voice_channel(&self, id: &Snowflake) -> Option<Handle<VoiceChannel>> {
        self.guild_of_channel(id)?.voice_channel(id)
    }

    pub fn private_channels(&self) -> &EntityMap<PrivateChannel> {
        &self.private_channels
    }

    pub fn fake_private_channels(&self) -> &EntityMap<PrivateChannel> {
        &self.fake_private_channels
    }

    pub fn groups(&self) -> &EntityMap<Group> {
        &self.groups
    }

    /// Resolves a channel id across every channel kind: guild text, guild
    /// voice, private, placeholder private, then group.
    pub fn channel(&self, id: &Snowflake) -> Option<Channel> {
        if let Some(guild) = self.guild_of_channel(id) {
            if let Some(channel) = guild.text_channel(id) {
                return Some(Channel::Text(channel));
            }
            if let Some(channel) = guild.voice_channel(id) {
                return Some(Channel::Voice(channel));
            }
        }
        if let Some(channel) = self.private_channels.get(id) {
            return Some(Channel::Private(channel));
        }
        if let Some(channel) = self.fake_private_channels.get(id) {
            return Some(Channel::Private(channel));
        }
        self.groups.get(id).map(Channel::Group)
    }

    // Users

    pub fn users(&self) -> &EntityMap<User> {
        &self.users
    }

    pub fn fake_users(&self) -> &EntityMap<User> {
        &self.fake_users
    }

    pub fn user(&self, id: &Snowflake) -> Option<Handle<User>> {
        self.users.get(id)
    }

    /// Caches a user seen in a shared scope, updating the live entry in place
    /// if one exists. A placeholder for the same id is retired.
    pub fn upsert_user(&self, snapshot: &UserSnapshot) -> Handle<User> {
        let (handle, created) = self.users.get_or_insert_with(snapshot.id, || User::new(snapshot));
        if !created {
            handle.write().update(snapshot);
        } else {
            self.fake_users.remove(&snapshot.id);
        }
        handle
    }

    /// Cached user, else cached placeholder, else a new placeholder built
    /// from `snapshot` that is not inserted into the cache.
    pub fn user_or_placeholder(&self, snapshot: &UserSnapshot) -> Handle<User> {
        self.users
            .get(&snapshot.id)
            .or_else(|| self.fake_users.get(&snapshot.id))
            .unwrap_or_else(|| new_handle(User::fake(snapshot)))
    }

    // Emotes

    /// Looks a custom emote up in every cached guild.
    pub fn emote(&self, id: &Snowflake) -> Option<Handle<Emote>> {
        self.guilds
            .read()
            .values()
            .find_map(|guild| guild.emote(id))
    }
}

impl Default for EntityCache {
    fn default() -> Self {
        Self::new()
    }
}
