use std::collections::HashSet;

use serde::Deserialize;

use crate::{Identifiable, Snowflake};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EmoteSnapshot {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

/// A custom guild emote. The allowed-role set holds weak role ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emote {
    id: Snowflake,
    guild_id: Option<Snowflake>,
    name: String,
    managed: bool,
    roles: HashSet<Snowflake>,
    fake: bool,
}

impl Emote {
    pub fn new(guild_id: Snowflake, id: Snowflake) -> Self {
        Self {
            id,
            guild_id: Some(guild_id),
            name: String::new(),
            managed: false,
            roles: HashSet::new(),
            fake: false,
        }
    }

    /// Placeholder for an emote that is referenced (e.g. by a reaction) but
    /// not present in any cached guild.
    pub fn fake(id: Snowflake, name: &str) -> Self {
        Self {
            id,
            guild_id: None,
            name: name.to_string(),
            managed: false,
            roles: HashSet::new(),
            fake: true,
        }
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.guild_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        if self.name != name {
            self.name = name.to_string();
        }
    }

    pub fn is_managed(&self) -> bool {
        self.managed
    }

    pub fn set_managed(&mut self, managed: bool) {
        self.managed = managed;
    }

    pub fn roles(&self) -> &HashSet<Snowflake> {
        &self.roles
    }

    pub fn roles_mut(&mut self) -> &mut HashSet<Snowflake> {
        &mut self.roles
    }

    pub fn is_fake(&self) -> bool {
        self.fake
    }

    /// `<:name:id>` mention form.
    pub fn as_mention(&self) -> String {
        format!("<:{}:{}>", self.name, self.id)
    }
}

impl Identifiable for Emote {
    fn id(&self) -> Snowflake {
        self.id
    }
}
