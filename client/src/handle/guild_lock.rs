use std::collections::HashSet;

use log::info;
use parking_lot::Mutex;

use cordial_shared::Snowflake;

/// Per-guild ordering gate.
///
/// While a guild is locked (its initial bulk load is in flight) handlers for
/// that guild must not mutate the cache; the dispatcher queues their
/// envelopes and replays them in arrival order on unlock.
pub struct GuildLock {
    locked: Mutex<HashSet<Snowflake>>,
}

impl GuildLock {
    pub fn new() -> Self {
        Self {
            locked: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_locked(&self, guild_id: &Snowflake) -> bool {
        self.locked.lock().contains(guild_id)
    }

    /// Returns false if the guild was already locked.
    pub fn lock(&self, guild_id: Snowflake) -> bool {
        let inserted = self.locked.lock().insert(guild_id);
        if inserted {
            info!("Locked guild {} while it loads", guild_id);
        }
        inserted
    }

    /// Returns false if the guild was not locked.
    pub fn unlock(&self, guild_id: &Snowflake) -> bool {
        let removed = self.locked.lock().remove(guild_id);
        if removed {
            info!("Unlocked guild {}", guild_id);
        }
        removed
    }

    pub fn locked(&self) -> Vec<Snowflake> {
        self.locked.lock().iter().copied().collect()
    }
}

impl Default for GuildLock {
    fn default() -> Self {
        Self::new()
    }
}
