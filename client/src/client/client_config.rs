use std::default::Default;

use cordial_shared::AccountType;

/// Contains Config properties which will be used by the Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Bots skip the verification gate and are the default account kind.
    pub account_type: AccountType,
    /// Number of users requested when a reaction-users lookup does not name
    /// an amount. Must be within 1..=100.
    pub reaction_page_size: u32,
    /// Whether a large guild whose `GUILD_CREATE` lists fewer members than it
    /// has is locked until the member chunks complete. While locked, events
    /// for the guild are queued instead of applied.
    pub enforce_bulk_load_lock: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            account_type: AccountType::Bot,
            reaction_page_size: 100,
            enforce_bulk_load_lock: true,
        }
    }
}
