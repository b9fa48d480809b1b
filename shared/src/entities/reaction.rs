use serde::Deserialize;

use crate::Snowflake;

/// The emoji attached to a reaction: either a custom emote referenced by id,
/// or a bare unicode emoji.
///
/// Equality is (id-if-present, name). A custom emote is a weak reference:
/// resolving it against the cache may produce a placeholder if the emote has
/// since been deleted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "ReactionEmoteSnapshot")]
pub enum ReactionEmote {
    Custom { id: Snowflake, name: String },
    Unicode { name: String },
}

impl ReactionEmote {
    pub fn custom(id: Snowflake, name: &str) -> Self {
        Self::Custom {
            id,
            name: name.to_string(),
        }
    }

    pub fn unicode(name: &str) -> Self {
        Self::Unicode {
            name: name.to_string(),
        }
    }

    pub fn is_emote(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    pub fn id(&self) -> Option<Snowflake> {
        match self {
            Self::Custom { id, .. } => Some(*id),
            Self::Unicode { .. } => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Custom { name, .. } | Self::Unicode { name } => name,
        }
    }
}

#[derive(Deserialize)]
struct ReactionEmoteSnapshot {
    #[serde(default)]
    id: Option<Snowflake>,
    #[serde(default)]
    name: Option<String>,
}

impl From<ReactionEmoteSnapshot> for ReactionEmote {
    fn from(snapshot: ReactionEmoteSnapshot) -> Self {
        let name = snapshot.name.unwrap_or_default();
        match snapshot.id {
            Some(id) => Self::Custom { id, name },
            None => Self::Unicode { name },
        }
    }
}
