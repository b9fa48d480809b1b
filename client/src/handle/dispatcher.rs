use std::collections::{HashMap, VecDeque};

use log::{debug, warn};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use cordial_shared::{DecodeError, Snowflake};

use crate::{
    client::ClientState,
    error::HandleError,
    events::Event,
    handle::{
        envelope::Envelope,
        event_cache::{DeferKey, DeferKind},
        handlers,
    },
};

/// What a handler did with its envelope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Handled {
    /// Cache mutated, events collected in the context
    Applied,
    /// The guild is locked; retry once it unlocks
    Locked(Snowflake),
    /// A referenced entity is not cached yet; retry once it is
    Deferred(DeferKind, Snowflake),
}

pub(crate) type Handler = fn(&mut HandlerContext<'_>, &Value) -> Result<Handled, HandleError>;

/// Scratch space handed to a handler. Collected side effects are applied by
/// the dispatcher after the handler returns, outside any cache lock.
pub(crate) struct HandlerContext<'a> {
    pub(crate) state: &'a ClientState,
    events: Vec<Event>,
    resolved: Vec<DeferKey>,
    unlocked: Vec<Snowflake>,
}

impl<'a> HandlerContext<'a> {
    fn new(state: &'a ClientState) -> Self {
        Self {
            state,
            events: Vec::new(),
            resolved: Vec::new(),
            unlocked: Vec::new(),
        }
    }

    pub(crate) fn publish(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Marks `(kind, id)` as now resolvable; anything deferred on it is
    /// replayed after this handler's events are published.
    pub(crate) fn resolve(&mut self, kind: DeferKind, id: Snowflake) {
        self.resolved.push((kind, id));
    }

    /// Requests the guild be unlocked once this handler finishes.
    pub(crate) fn unlock(&mut self, guild_id: Snowflake) {
        self.unlocked.push(guild_id);
    }
}

/// Outcome of dispatching one envelope from the stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// Applied to the cache (deferred events it unblocked were replayed too)
    Applied,
    /// Queued until a guild unlocks or a referenced entity appears
    Deferred,
    /// Unknown type tag
    Ignored,
    /// Malformed; logged and discarded
    Dropped,
}

/// Routes envelopes to their handler and runs the defer/replay state machine:
/// `Decode -> Lookup -> (Locked? Defer : Apply) -> Publish -> Replay`.
pub struct Dispatcher {
    handlers: HashMap<&'static str, Handler>,
    // inbound envelopes and lock transitions are applied one at a time
    sequencer: Mutex<()>,
}

impl Dispatcher {
    pub(crate) fn new() -> Self {
        let mut handlers: HashMap<&'static str, Handler> = HashMap::new();
        handlers.insert("GUILD_CREATE", handlers::guild::guild_create);
        handlers.insert("GUILD_DELETE", handlers::guild::guild_delete);
        handlers.insert("GUILD_MEMBERS_CHUNK", handlers::guild::guild_members_chunk);
        handlers.insert("GUILD_MEMBER_UPDATE", handlers::member::guild_member_update);
        handlers.insert("GUILD_ROLE_CREATE", handlers::role::guild_role_create);
        handlers.insert("GUILD_ROLE_DELETE", handlers::role::guild_role_delete);
        handlers.insert("GUILD_EMOJIS_UPDATE", handlers::emote::guild_emojis_update);
        handlers.insert("CHANNEL_CREATE", handlers::channel::channel_create);
        handlers.insert("CHANNEL_DELETE", handlers::channel::channel_delete);
        handlers.insert("MESSAGE_DELETE", handlers::message::message_delete);
        handlers.insert("MESSAGE_REACTION_ADD", handlers::reaction::message_reaction_add);
        handlers.insert("MESSAGE_REACTION_REMOVE", handlers::reaction::message_reaction_remove);

        Self {
            handlers,
            sequencer: Mutex::new(()),
        }
    }

    pub fn handles(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    pub(crate) fn dispatch_bytes(&self, state: &ClientState, bytes: &[u8]) -> Dispatched {
        match Envelope::decode(bytes) {
            Ok(envelope) => self.dispatch(state, envelope),
            Err(err) => {
                warn!("Dropping inbound envelope: {}", err);
                Dispatched::Dropped
            }
        }
    }

    pub(crate) fn dispatch(&self, state: &ClientState, envelope: Envelope) -> Dispatched {
        let _sequence = self.sequencer.lock();
        self.run(state, VecDeque::from([envelope]))
    }

    /// Locks a guild from outside the stream, e.g. when the application
    /// starts its own bulk load.
    pub(crate) fn lock_guild(&self, state: &ClientState, guild_id: Snowflake) -> bool {
        let _sequence = self.sequencer.lock();
        state.guild_lock.lock(guild_id)
    }

    /// Bulk-load completion signal: unlocks the guild and applies every
    /// envelope that queued behind the lock, in arrival order.
    pub(crate) fn unlock_guild(&self, state: &ClientState, guild_id: Snowflake) -> bool {
        let _sequence = self.sequencer.lock();
        if !state.guild_lock.unlock(&guild_id) {
            return false;
        }
        let queued = state.event_cache.resolve(DeferKind::ScopeLock, guild_id);
        self.run(state, VecDeque::from(queued));
        true
    }

    /// Processes `pending` front to back. Replays unblocked by an envelope
    /// are pushed to the front so they run before anything queued after it.
    /// Returns the outcome of the first envelope.
    fn run(&self, state: &ClientState, mut pending: VecDeque<Envelope>) -> Dispatched {
        let mut first = None;

        while let Some(envelope) = pending.pop_front() {
            let outcome = self.apply(state, envelope, &mut pending);
            first.get_or_insert(outcome);
        }

        first.unwrap_or(Dispatched::Applied)
    }

    fn apply(
        &self,
        state: &ClientState,
        envelope: Envelope,
        pending: &mut VecDeque<Envelope>,
    ) -> Dispatched {
        let Some(handler) = self.handlers.get(envelope.kind.as_str()) else {
            debug!("Ignoring unknown event type {}", envelope.kind);
            return Dispatched::Ignored;
        };

        let mut ctx = HandlerContext::new(state);
        match handler(&mut ctx, &envelope.payload) {
            Ok(Handled::Applied) => {
                let HandlerContext {
                    events,
                    resolved,
                    unlocked,
                    ..
                } = ctx;

                state.publish(events);

                let mut replay = Vec::new();
                for guild_id in unlocked {
                    if state.guild_lock.unlock(&guild_id) {
                        replay.extend(state.event_cache.resolve(DeferKind::ScopeLock, guild_id));
                    }
                }
                for (kind, id) in resolved {
                    replay.extend(state.event_cache.resolve(kind, id));
                }
                for envelope in replay.into_iter().rev() {
                    pending.push_front(envelope);
                }

                Dispatched::Applied
            }
            Ok(Handled::Locked(guild_id)) => {
                state
                    .event_cache
                    .cache(DeferKind::ScopeLock, guild_id, envelope);
                Dispatched::Deferred
            }
            Ok(Handled::Deferred(kind, id)) => {
                state.event_cache.cache(kind, id, envelope);
                Dispatched::Deferred
            }
            Err(err) => {
                warn!("Dropping {} event: {}", envelope.kind, err);
                Dispatched::Dropped
            }
        }
    }
}

/// Decodes a handler payload, naming the payload in the error.
pub(crate) fn decode<T: DeserializeOwned>(what: &'static str, payload: &Value) -> Result<T, HandleError> {
    T::deserialize(payload).map_err(|err| HandleError::Decode(DecodeError::payload(what, err)))
}
