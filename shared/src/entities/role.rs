use serde::Deserialize;

use crate::{Identifiable, Permission, Snowflake};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RoleSnapshot {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub permissions: u64,
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub mentionable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    id: Snowflake,
    guild_id: Snowflake,
    name: String,
    position: i32,
    permissions: u64,
    color: u32,
    hoisted: bool,
    managed: bool,
    mentionable: bool,
}

impl Role {
    pub fn new(guild_id: Snowflake, snapshot: &RoleSnapshot) -> Self {
        let mut role = Self {
            id: snapshot.id,
            guild_id,
            name: String::new(),
            position: 0,
            permissions: 0,
            color: 0,
            hoisted: false,
            managed: false,
            mentionable: false,
        };
        role.update(snapshot);
        role
    }

    pub fn update(&mut self, snapshot: &RoleSnapshot) {
        self.name.clone_from(&snapshot.name);
        self.position = snapshot.position;
        self.permissions = snapshot.permissions;
        self.color = snapshot.color;
        self.hoisted = snapshot.hoist;
        self.managed = snapshot.managed;
        self.mentionable = snapshot.mentionable;
    }

    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn permissions_raw(&self) -> u64 {
        self.permissions
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        permission.is_set(self.permissions)
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn is_hoisted(&self) -> bool {
        self.hoisted
    }

    pub fn is_managed(&self) -> bool {
        self.managed
    }

    pub fn is_mentionable(&self) -> bool {
        self.mentionable
    }

    /// The public role shares its id with the guild.
    pub fn is_public_role(&self) -> bool {
        self.id == self.guild_id
    }
}

impl Identifiable for Role {
    fn id(&self) -> Snowflake {
        self.id
    }
}
