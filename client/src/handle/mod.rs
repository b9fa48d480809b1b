mod dispatcher;
mod envelope;
mod event_cache;
mod guild_lock;
mod handlers;

pub use dispatcher::{Dispatched, Dispatcher};
pub use envelope::Envelope;
pub use event_cache::{DeferKind, EventCache};
pub use guild_lock::GuildLock;
