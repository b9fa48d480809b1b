use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::runtime::Handle as RuntimeHandle;

use cordial_shared::{Permission, Snowflake, User, UserSnapshot};

use crate::{
    cache::{EntityCache, Guild, Handle},
    client::{ClientConfig, ClientState},
    error::RequestError,
    events::{EventListener, Events},
    handle::{DeferKind, Dispatched, Envelope},
    permission::PermissionResolver,
    request::{Requester, Transport},
};

/// A client that mirrors remote guild state from the inbound event stream
/// and issues permission-checked requests through a [`Transport`].
///
/// Cloning is cheap: clones share the same cache and request engine.
#[derive(Clone)]
pub struct Client {
    pub(crate) state: Arc<ClientState>,
}

impl Client {
    /// Create a new Client. Requests are executed on `runtime`.
    pub fn new(
        config: ClientConfig,
        self_user: UserSnapshot,
        transport: Arc<dyn Transport>,
        runtime: RuntimeHandle,
    ) -> Self {
        let requester = Requester::new(transport, runtime);
        Self {
            state: Arc::new(ClientState::new(config, &self_user, requester)),
        }
    }

    /// Create a new Client that executes requests on the runtime the caller
    /// is running on.
    pub fn from_current_runtime(
        config: ClientConfig,
        self_user: UserSnapshot,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, RequestError> {
        let requester = Requester::from_current_runtime(transport)?;
        Ok(Self {
            state: Arc::new(ClientState::new(config, &self_user, requester)),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.state.config
    }

    pub fn self_id(&self) -> Snowflake {
        self.state.self_id
    }

    /// The self account's live cache entry.
    pub fn self_user(&self) -> Handle<User> {
        self.state.self_user.clone()
    }

    pub fn cache(&self) -> &EntityCache {
        &self.state.cache
    }

    // Inbound

    /// Decodes one raw envelope from the event stream and applies it. A
    /// malformed envelope is logged and dropped; it never affects the next.
    pub fn dispatch(&self, bytes: &[u8]) -> Dispatched {
        self.state.dispatcher.dispatch_bytes(&self.state, bytes)
    }

    pub fn dispatch_envelope(&self, envelope: Envelope) -> Dispatched {
        self.state.dispatcher.dispatch(&self.state, envelope)
    }

    /// Whether envelopes with this type tag are understood.
    pub fn handles(&self, kind: &str) -> bool {
        self.state.dispatcher.handles(kind)
    }

    /// Locks a guild so its events queue instead of applying, e.g. while the
    /// application bulk-loads it. Returns false if it was already locked.
    pub fn lock_guild(&self, guild_id: Snowflake) -> bool {
        self.state.dispatcher.lock_guild(&self.state, guild_id)
    }

    /// Bulk-load completion signal: unlocks the guild and applies its queued
    /// events in arrival order. Returns false if it was not locked.
    pub fn unlock_guild(&self, guild_id: Snowflake) -> bool {
        self.state.dispatcher.unlock_guild(&self.state, guild_id)
    }

    pub fn is_guild_locked(&self, guild_id: &Snowflake) -> bool {
        self.state.guild_lock.is_locked(guild_id)
    }

    /// Number of envelopes waiting on `(kind, id)`.
    pub fn deferred_count(&self, kind: DeferKind, id: Snowflake) -> usize {
        self.state.event_cache.pending(kind, id)
    }

    /// Number of envelopes waiting on anything.
    pub fn deferred_total(&self) -> usize {
        self.state.event_cache.len()
    }

    // Events

    /// Takes every event buffered since the last call. Events are only
    /// buffered while no listener is registered.
    pub fn take_events(&self) -> Events {
        self.state.take_events()
    }

    /// Registers a listener. It is called synchronously from `dispatch` and
    /// must not dispatch or lock guilds itself. Once a listener is
    /// registered, events are no longer buffered for `take_events`.
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) {
        self.state.add_listener(listener);
    }

    // Permissions

    pub fn set_permission_resolver(&self, resolver: Arc<dyn PermissionResolver>) {
        self.state.set_permission_resolver(resolver);
    }

    /// Whether the self member holds `permission` in a cached guild.
    pub fn has_permission(
        &self,
        guild_id: &Snowflake,
        channel_id: Option<Snowflake>,
        permission: Permission,
    ) -> Result<bool, RequestError> {
        let guild = self.require_guild(guild_id)?;
        self.state.has_permission(&guild, channel_id, permission)
    }

    /// Whether the self account passes the guild's verification level at
    /// `now`. `None` if the guild is not cached.
    pub fn check_verification(&self, guild_id: &Snowflake, now: DateTime<Utc>) -> Option<bool> {
        let guild = self.state.cache.guild(guild_id)?;
        let self_user = self.state.self_user.read();
        Some(guild.check_verification(self.state.config.account_type, &self_user, now))
    }

    pub(crate) fn require_guild(
        &self,
        guild_id: &Snowflake,
    ) -> Result<Arc<Guild>, RequestError> {
        self.state.cache.guild(guild_id).ok_or(RequestError::IllegalState {
            reason: "guild is not cached",
        })
    }
}
