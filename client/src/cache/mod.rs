mod entity_cache;
mod entity_map;
mod guild;
mod set_diff;

pub use entity_cache::{Channel, EntityCache, Scope};
pub use entity_map::{new_handle, EntityMap, Handle, ReconcileReport};
pub use guild::{Guild, GuildSyncReport};
pub use set_diff::{reconcile_set, SetDiff};

pub(crate) use guild::{update_emote, update_member, update_role};
