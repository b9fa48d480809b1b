use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use cordial_shared::{Member, Permission, PermissionError, Snowflake, User, UserSnapshot};

use crate::{
    cache::{EntityCache, Guild, Handle},
    client::ClientConfig,
    error::RequestError,
    events::{Event, EventListener, Events},
    handle::{Dispatcher, Envelope, EventCache, GuildLock},
    permission::{PermissionResolver, RolePermissions},
    request::Requester,
};

/// Everything a client shares between its inbound and outbound activities.
pub struct ClientState {
    pub(crate) config: ClientConfig,
    pub(crate) self_id: Snowflake,
    pub(crate) self_user: Handle<User>,
    pub(crate) cache: EntityCache,
    pub(crate) event_cache: EventCache<Envelope>,
    pub(crate) guild_lock: GuildLock,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) requester: Requester,
    events: Mutex<Events>,
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
    permissions: RwLock<Arc<dyn PermissionResolver>>,
}

impl ClientState {
    pub(crate) fn new(config: ClientConfig, self_user: &UserSnapshot, requester: Requester) -> Self {
        let cache = EntityCache::new();
        let self_handle = cache.upsert_user(self_user);
        Self {
            config,
            self_id: self_user.id,
            self_user: self_handle,
            cache,
            event_cache: EventCache::new(),
            guild_lock: GuildLock::new(),
            dispatcher: Dispatcher::new(),
            requester,
            events: Mutex::new(Events::new()),
            listeners: RwLock::new(Vec::new()),
            permissions: RwLock::new(Arc::new(RolePermissions)),
        }
    }

    /// Hands events to every listener, in order. With no listener
    /// registered they are buffered for `take_events` instead.
    pub(crate) fn publish(&self, events: Vec<Event>) {
        if events.is_empty() {
            return;
        }
        let listeners = self.listeners.read().clone();
        if listeners.is_empty() {
            let mut buffer = self.events.lock();
            for event in events {
                buffer.push(event);
            }
            return;
        }
        for event in events {
            for listener in &listeners {
                listener.on_event(&event);
            }
        }
    }

    pub(crate) fn take_events(&self) -> Events {
        std::mem::replace(&mut *self.events.lock(), Events::new())
    }

    pub(crate) fn add_listener(&self, listener: Arc<dyn EventListener>) {
        self.listeners.write().push(listener);
    }

    pub(crate) fn set_permission_resolver(&self, resolver: Arc<dyn PermissionResolver>) {
        *self.permissions.write() = resolver;
    }

    /// The self account's membership in `guild`.
    pub(crate) fn self_member(&self, guild: &Guild) -> Result<Handle<Member>, RequestError> {
        guild.member(&self.self_id).ok_or(RequestError::IllegalState {
            reason: "the self account is not a cached member of this guild",
        })
    }

    pub(crate) fn has_permission(
        &self,
        guild: &Guild,
        channel_id: Option<Snowflake>,
        permission: Permission,
    ) -> Result<bool, RequestError> {
        let member = self.self_member(guild)?;
        let resolver = self.permissions.read().clone();
        let member = member.read();
        Ok(resolver.has_permission(guild, &member, channel_id, permission))
    }

    /// Preflight: fails with [`PermissionError::Missing`] unless the self
    /// member holds `permission`.
    pub(crate) fn check_permission(
        &self,
        guild: &Guild,
        channel_id: Option<Snowflake>,
        permission: Permission,
    ) -> Result<(), RequestError> {
        if self.has_permission(guild, channel_id, permission)? {
            Ok(())
        } else {
            Err(PermissionError::Missing { permission }.into())
        }
    }
}
