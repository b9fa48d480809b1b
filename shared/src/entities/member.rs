use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{Identifiable, Snowflake, UserSnapshot};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MemberSnapshot {
    pub user: UserSnapshot,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    pub joined_at: DateTime<Utc>,
}

/// A user's membership in one guild. Role references are weak: they are ids
/// resolved against the guild's role map on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    guild_id: Snowflake,
    user_id: Snowflake,
    nickname: Option<String>,
    roles: HashSet<Snowflake>,
    joined_at: DateTime<Utc>,
}

impl Member {
    pub fn new(guild_id: Snowflake, snapshot: &MemberSnapshot) -> Self {
        Self {
            guild_id,
            user_id: snapshot.user.id,
            nickname: snapshot.nick.clone(),
            roles: snapshot.roles.iter().copied().collect(),
            joined_at: snapshot.joined_at,
        }
    }

    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }

    pub fn user_id(&self) -> Snowflake {
        self.user_id
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn set_nickname(&mut self, nickname: Option<String>) {
        self.nickname = nickname;
    }

    pub fn roles(&self) -> &HashSet<Snowflake> {
        &self.roles
    }

    /// Mutable role set, reconciled in place by the cache.
    pub fn roles_mut(&mut self) -> &mut HashSet<Snowflake> {
        &mut self.roles
    }

    pub fn has_role(&self, role_id: &Snowflake) -> bool {
        self.roles.contains(role_id)
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}

impl Identifiable for Member {
    fn id(&self) -> Snowflake {
        self.user_id
    }
}
