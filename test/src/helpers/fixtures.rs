//! JSON payload builders matching the wire shapes the handlers decode

use serde_json::{json, Value};

use cordial_client::Envelope;

/// Fixed join instant, far enough in the past to pass every verification level
pub const JOINED_AT: &str = "2016-01-01T00:00:00+00:00";

pub fn user(id: u64, name: &str) -> Value {
    json!({
        "id": id.to_string(),
        "username": name,
        "discriminator": "0001",
        "avatar": null,
    })
}

pub fn role(id: u64, name: &str, position: i32, permissions: u64) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "position": position,
        "permissions": permissions,
        "color": 0,
        "hoist": false,
        "managed": false,
        "mentionable": false,
    })
}

pub fn member(user_id: u64, roles: &[u64]) -> Value {
    json!({
        "user": user(user_id, &format!("user-{}", user_id)),
        "nick": null,
        "roles": ids(roles),
        "joined_at": JOINED_AT,
    })
}

pub fn text_channel(id: u64, guild_id: u64, name: &str, position: i32) -> Value {
    json!({
        "id": id.to_string(),
        "type": 0,
        "guild_id": guild_id.to_string(),
        "name": name,
        "position": position,
        "topic": null,
    })
}

pub fn voice_channel(id: u64, guild_id: u64, name: &str, position: i32) -> Value {
    json!({
        "id": id.to_string(),
        "type": 2,
        "guild_id": guild_id.to_string(),
        "name": name,
        "position": position,
        "user_limit": 0,
        "bitrate": 64000,
    })
}

pub fn private_channel(id: u64, recipient: Value) -> Value {
    json!({
        "id": id.to_string(),
        "type": 1,
        "recipients": [recipient],
    })
}

pub fn group(id: u64, owner_id: u64, recipients: Vec<Value>) -> Value {
    json!({
        "id": id.to_string(),
        "type": 3,
        "name": "group",
        "owner_id": owner_id.to_string(),
        "recipients": recipients,
    })
}

pub fn emote(id: u64, name: &str, roles: &[u64]) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "managed": false,
        "roles": ids(roles),
    })
}

pub fn custom_reaction(emote_id: u64, name: &str) -> Value {
    json!({ "id": emote_id.to_string(), "name": name })
}

pub fn unicode_reaction(name: &str) -> Value {
    json!({ "id": null, "name": name })
}

pub fn ids(ids: &[u64]) -> Vec<String> {
    ids.iter().map(u64::to_string).collect()
}

// Envelopes

pub fn envelope(kind: &str, payload: Value) -> Vec<u8> {
    Envelope::new(kind, payload).encode()
}

pub fn channel_create(channel: Value) -> Vec<u8> {
    envelope("CHANNEL_CREATE", channel)
}

pub fn channel_delete(channel: Value) -> Vec<u8> {
    envelope("CHANNEL_DELETE", channel)
}

pub fn guild_delete(guild_id: u64) -> Vec<u8> {
    envelope("GUILD_DELETE", json!({ "id": guild_id.to_string() }))
}

pub fn guild_outage(guild_id: u64) -> Vec<u8> {
    envelope(
        "GUILD_DELETE",
        json!({ "id": guild_id.to_string(), "unavailable": true }),
    )
}

pub fn members_chunk(guild_id: u64, members: Vec<Value>) -> Vec<u8> {
    envelope(
        "GUILD_MEMBERS_CHUNK",
        json!({ "guild_id": guild_id.to_string(), "members": members }),
    )
}

pub fn member_update(guild_id: u64, user_id: u64, roles: &[u64], nick: Option<&str>) -> Vec<u8> {
    envelope(
        "GUILD_MEMBER_UPDATE",
        json!({
            "guild_id": guild_id.to_string(),
            "user": user(user_id, &format!("user-{}", user_id)),
            "roles": ids(roles),
            "nick": nick,
        }),
    )
}

pub fn role_create(guild_id: u64, role: Value) -> Vec<u8> {
    envelope(
        "GUILD_ROLE_CREATE",
        json!({ "guild_id": guild_id.to_string(), "role": role }),
    )
}

pub fn role_delete(guild_id: u64, role_id: u64) -> Vec<u8> {
    envelope(
        "GUILD_ROLE_DELETE",
        json!({ "guild_id": guild_id.to_string(), "role_id": role_id.to_string() }),
    )
}

pub fn emojis_update(guild_id: u64, emojis: Vec<Value>) -> Vec<u8> {
    envelope(
        "GUILD_EMOJIS_UPDATE",
        json!({ "guild_id": guild_id.to_string(), "emojis": emojis }),
    )
}

pub fn message_delete(channel_id: u64, message_id: u64) -> Vec<u8> {
    envelope(
        "MESSAGE_DELETE",
        json!({ "id": message_id.to_string(), "channel_id": channel_id.to_string() }),
    )
}

pub fn reaction_add(channel_id: u64, message_id: u64, user_id: u64, emoji: Value) -> Vec<u8> {
    reaction("MESSAGE_REACTION_ADD", channel_id, message_id, user_id, emoji)
}

pub fn reaction_remove(channel_id: u64, message_id: u64, user_id: u64, emoji: Value) -> Vec<u8> {
    reaction("MESSAGE_REACTION_REMOVE", channel_id, message_id, user_id, emoji)
}

fn reaction(kind: &str, channel_id: u64, message_id: u64, user_id: u64, emoji: Value) -> Vec<u8> {
    envelope(
        kind,
        json!({
            "user_id": user_id.to_string(),
            "channel_id": channel_id.to_string(),
            "message_id": message_id.to_string(),
            "emoji": emoji,
        }),
    )
}
