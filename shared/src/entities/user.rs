use serde::Deserialize;

use crate::{Identifiable, Snowflake};

/// Wire shape of a user object.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserSnapshot {
    pub id: Snowflake,
    #[serde(rename = "username")]
    pub name: String,
    #[serde(default)]
    pub discriminator: String,
    #[serde(default, rename = "avatar")]
    pub avatar_id: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub mfa_enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    id: Snowflake,
    name: String,
    discriminator: String,
    avatar_id: Option<String>,
    bot: bool,
    verified: bool,
    mfa_enabled: bool,
    fake: bool,
}

impl User {
    pub fn new(snapshot: &UserSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name.clone(),
            discriminator: snapshot.discriminator.clone(),
            avatar_id: snapshot.avatar_id.clone(),
            bot: snapshot.bot,
            verified: snapshot.verified,
            mfa_enabled: snapshot.mfa_enabled,
            fake: false,
        }
    }

    /// Placeholder for a user the cache has never seen in a shared scope.
    pub fn fake(snapshot: &UserSnapshot) -> Self {
        let mut user = Self::new(snapshot);
        user.fake = true;
        user
    }

    pub fn update(&mut self, snapshot: &UserSnapshot) {
        self.name.clone_from(&snapshot.name);
        self.discriminator.clone_from(&snapshot.discriminator);
        self.avatar_id.clone_from(&snapshot.avatar_id);
        self.bot = snapshot.bot;
        self.verified = snapshot.verified;
        self.mfa_enabled = snapshot.mfa_enabled;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    pub fn avatar_id(&self) -> Option<&str> {
        self.avatar_id.as_deref()
    }

    pub fn is_bot(&self) -> bool {
        self.bot
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn is_mfa_enabled(&self) -> bool {
        self.mfa_enabled
    }

    pub fn is_fake(&self) -> bool {
        self.fake
    }
}

impl Identifiable for User {
    fn id(&self) -> Snowflake {
        self.id
    }
}
