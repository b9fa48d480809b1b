/// Tests for guild-scoped cache maintenance driven by inbound events

use std::sync::Arc;

use cordial_client::{
    shared::{ChannelType, Snowflake},
    Channel, Event,
};
use cordial_test::{assert_applied, assert_event_kinds, fixtures, GuildBuilder, TestClient, SELF_ID};

const GUILD: u64 = 100;
const TEXT: u64 = 110;
const VOICE: u64 = 120;
const R1: u64 = 131;
const R2: u64 = 132;
const E1: u64 = 141;
const E2: u64 = 142;
const E3: u64 = 143;
const USER: u64 = 7;

fn id(raw: u64) -> Snowflake {
    Snowflake::new(raw)
}

fn ids(raw: &[u64]) -> Vec<Snowflake> {
    raw.iter().copied().map(id).collect()
}

fn full_guild() -> GuildBuilder {
    GuildBuilder::new(GUILD, SELF_ID)
        .role(fixtures::role(R1, "one", 1, 0))
        .role(fixtures::role(R2, "two", 2, 0))
        .member(fixtures::member(SELF_ID, &[]))
        .member(fixtures::member(USER, &[R1]))
        .channel(fixtures::text_channel(TEXT, GUILD, "general", 0))
        .channel(fixtures::voice_channel(VOICE, GUILD, "lounge", 0))
        .emote(fixtures::emote(E1, "one", &[R1]))
        .emote(fixtures::emote(E2, "two", &[]))
}

fn joined_client() -> TestClient {
    let client = TestClient::new();
    assert_applied!(client.dispatch(&full_guild().create()));
    client.take_events();
    client
}

#[test]
fn guild_create_builds_the_scope() {
    let client = TestClient::new();
    client.dispatch(&full_guild().create());

    let cache = client.client.cache();
    let guild = cache.guild(&id(GUILD)).unwrap();
    assert_eq!(guild.owner_id(), id(SELF_ID));
    assert_eq!(guild.roles().len(), 3);
    assert_eq!(guild.members().len(), 2);
    assert_eq!(guild.emotes().len(), 2);
    assert!(cache.user(&id(USER)).is_some());
    assert!(matches!(cache.channel(&id(TEXT)), Some(Channel::Text(_))));
    assert!(matches!(cache.channel(&id(VOICE)), Some(Channel::Voice(_))));
    assert!(Arc::ptr_eq(&cache.guild_of_channel(&id(TEXT)).unwrap(), &guild));

    assert_event_kinds!(
        client.take_events(),
        [Event::GuildJoined { .. }, Event::GuildReady { .. }]
    );
}

/// A repeated GUILD_CREATE keeps the handles of surviving entries
#[test]
fn guild_create_again_reconciles_in_place() {
    let client = joined_client();
    let guild = client.client.cache().guild(&id(GUILD)).unwrap();
    let member = guild.member(&id(USER)).unwrap();

    client.dispatch(
        &GuildBuilder::new(GUILD, SELF_ID)
            .role(fixtures::role(R1, "one", 1, 0))
            .member(fixtures::member(SELF_ID, &[]))
            .member(fixtures::member(USER, &[R1]))
            .channel(fixtures::text_channel(TEXT, GUILD, "renamed", 0))
            .create(),
    );

    let again = client.client.cache().guild(&id(GUILD)).unwrap();
    assert!(Arc::ptr_eq(&guild, &again));
    assert!(Arc::ptr_eq(&member, &again.member(&id(USER)).unwrap()));
    assert!(again.role(&id(R2)).is_none());
    assert!(client.client.cache().channel(&id(VOICE)).is_none());
    assert_eq!(again.text_channel(&id(TEXT)).unwrap().read().name(), "renamed");
    assert_event_kinds!(client.take_events(), [Event::GuildReady { .. }]);
}

#[test]
fn outage_marks_guild_unavailable() {
    let client = joined_client();

    assert_applied!(client.dispatch(&fixtures::guild_outage(GUILD)));
    let guild = client.client.cache().guild(&id(GUILD)).unwrap();
    assert!(!guild.is_available());
    assert_eq!(
        client.take_events(),
        vec![Event::GuildUnavailable { guild_id: id(GUILD) }]
    );

    // a repeated outage is not reported twice
    client.dispatch(&fixtures::guild_outage(GUILD));
    assert!(client.take_events().is_empty());

    // outages of guilds we never saw are ignored
    assert_applied!(client.dispatch(&fixtures::guild_outage(GUILD + 1)));
    assert!(client.client.cache().guild(&id(GUILD + 1)).is_none());
}

/// Leaving a guild drops its scope and everything it owned
#[test]
fn guild_delete_tears_down_scope() {
    let client = joined_client();

    assert_applied!(client.dispatch(&fixtures::guild_delete(GUILD)));

    let cache = client.client.cache();
    assert!(cache.guild(&id(GUILD)).is_none());
    assert!(cache.channel(&id(TEXT)).is_none());
    assert!(cache.channel(&id(VOICE)).is_none());
    assert!(cache.guild_of_channel(&id(TEXT)).is_none());
    assert!(cache.emote(&id(E1)).is_none());
    assert_eq!(
        client.take_events(),
        vec![Event::GuildLeft { guild_id: id(GUILD) }]
    );

    // events for the torn down channels now wait for a channel that may never come
    client.dispatch(&fixtures::message_delete(TEXT, 1));
    assert!(client.take_events().is_empty());
}

#[test]
fn channel_create_and_delete() {
    let client = joined_client();

    assert_applied!(client.dispatch(&fixtures::channel_create(fixtures::text_channel(
        TEXT + 1,
        GUILD,
        "news",
        1
    ))));
    assert!(matches!(
        client.client.cache().channel(&id(TEXT + 1)),
        Some(Channel::Text(_))
    ));

    assert_applied!(client.dispatch(&fixtures::channel_delete(fixtures::voice_channel(
        VOICE, GUILD, "lounge", 0
    ))));
    assert!(client.client.cache().channel(&id(VOICE)).is_none());

    assert_eq!(
        client.take_events(),
        vec![
            Event::ChannelCreated {
                channel_id: id(TEXT + 1),
                kind: ChannelType::Text,
                guild_id: Some(id(GUILD)),
            },
            Event::ChannelDeleted {
                channel_id: id(VOICE),
                kind: ChannelType::Voice,
                guild_id: Some(id(GUILD)),
            },
        ]
    );
}

#[test]
fn public_channel_shares_the_guild_id() {
    let client = joined_client();
    let guild = client.client.cache().guild(&id(GUILD)).unwrap();
    assert_eq!(guild.data().public_channel_id, id(GUILD));
    assert!(guild.public_channel().is_none());

    assert_applied!(client.dispatch(&fixtures::channel_create(fixtures::text_channel(
        GUILD, GUILD, "general", 0
    ))));
    let public = guild.public_channel().unwrap();
    assert!(Arc::ptr_eq(&public, &guild.text_channel(&id(GUILD)).unwrap()));

    assert_applied!(client.dispatch(&fixtures::channel_delete(fixtures::text_channel(
        GUILD, GUILD, "general", 0
    ))));
    assert!(guild.public_channel().is_none());
}

/// A private channel with someone who shares no guild keeps placeholders
#[test]
fn private_channel_with_unknown_user_uses_placeholders() {
    let client = TestClient::new();
    client.dispatch(&fixtures::channel_create(fixtures::private_channel(
        200,
        fixtures::user(USER, "stranger"),
    )));

    let cache = client.client.cache();
    assert!(cache.user(&id(USER)).is_none());
    assert!(cache.fake_users().get(&id(USER)).unwrap().read().is_fake());
    assert!(cache.fake_private_channels().contains(&id(200)));
    assert!(!cache.private_channels().contains(&id(200)));
    assert!(matches!(cache.channel(&id(200)), Some(Channel::Private(_))));
}

#[test]
fn private_channel_with_known_user_is_live() {
    let client = joined_client();
    client.dispatch(&fixtures::channel_create(fixtures::private_channel(
        200,
        fixtures::user(USER, "user-7"),
    )));

    let cache = client.client.cache();
    assert!(cache.private_channels().contains(&id(200)));
    assert!(cache.fake_users().get(&id(USER)).is_none());

    client.dispatch(&fixtures::channel_delete(fixtures::private_channel(
        200,
        fixtures::user(USER, "user-7"),
    )));
    assert!(cache.channel(&id(200)).is_none());
}

/// Role changes are published as set differences, removals first
#[test]
fn member_update_publishes_role_diff_and_nick() {
    let client = joined_client();

    client.dispatch(&fixtures::member_update(GUILD, USER, &[R2], Some("nick")));

    let guild = client.client.cache().guild(&id(GUILD)).unwrap();
    let member = guild.member(&id(USER)).unwrap();
    assert!(member.read().has_role(&id(R2)));
    assert!(!member.read().has_role(&id(R1)));
    assert_eq!(member.read().nickname(), Some("nick"));

    assert_eq!(
        client.take_events(),
        vec![
            Event::MemberRoleRemoved {
                guild_id: id(GUILD),
                user_id: id(USER),
                role_ids: ids(&[R1]),
            },
            Event::MemberRoleAdded {
                guild_id: id(GUILD),
                user_id: id(USER),
                role_ids: ids(&[R2]),
            },
            Event::MemberNickChanged {
                guild_id: id(GUILD),
                user_id: id(USER),
                old_nick: None,
                new_nick: Some("nick".to_string()),
            },
        ]
    );

    // same state again publishes nothing
    client.dispatch(&fixtures::member_update(GUILD, USER, &[R2], Some("nick")));
    assert!(client.take_events().is_empty());
}

#[test]
fn role_delete_strips_references() {
    let client = joined_client();

    assert_applied!(client.dispatch(&fixtures::role_delete(GUILD, R1)));

    let guild = client.client.cache().guild(&id(GUILD)).unwrap();
    assert!(guild.role(&id(R1)).is_none());
    assert!(!guild.member(&id(USER)).unwrap().read().has_role(&id(R1)));
    assert!(guild.emote(&id(E1)).unwrap().read().roles().is_empty());

    let events = client.take_events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::RoleDeleted { guild_id, role } => {
            assert_eq!(*guild_id, id(GUILD));
            assert_eq!(role.name(), "one");
        }
        other => panic!("unexpected event {:?}", other),
    }

    // deleting it again is a no-op
    client.dispatch(&fixtures::role_delete(GUILD, R1));
    assert!(client.take_events().is_empty());
}

#[test]
fn role_create_updates_existing_role_in_place() {
    let client = joined_client();
    let guild = client.client.cache().guild(&id(GUILD)).unwrap();
    let role = guild.role(&id(R1)).unwrap();

    client.dispatch(&fixtures::role_create(GUILD, fixtures::role(R1, "renamed", 4, 0)));

    assert!(Arc::ptr_eq(&role, &guild.role(&id(R1)).unwrap()));
    assert_eq!(role.read().name(), "renamed");
}

/// The emote list is a full replacement with a nested role diff
#[test]
fn emote_update_reconciles_list() {
    let client = joined_client();
    let guild = client.client.cache().guild(&id(GUILD)).unwrap();
    let e1 = guild.emote(&id(E1)).unwrap();

    client.dispatch(&fixtures::emojis_update(
        GUILD,
        vec![fixtures::emote(E1, "one", &[R2]), fixtures::emote(E3, "three", &[R1])],
    ));

    assert!(Arc::ptr_eq(&e1, &guild.emote(&id(E1)).unwrap()));
    assert_eq!(e1.read().roles().iter().copied().collect::<Vec<_>>(), ids(&[R2]));
    assert!(guild.emote(&id(E2)).is_none());
    assert!(guild.emote(&id(E3)).unwrap().read().roles().contains(&id(R1)));

    let events = client.take_events();
    assert_event_kinds!(
        events,
        [
            Event::EmoteRolesChanged { .. },
            Event::EmoteRemoved { .. },
            Event::EmoteAdded { .. },
        ]
    );
    assert_eq!(
        events[0],
        Event::EmoteRolesChanged {
            guild_id: id(GUILD),
            emote_id: id(E1),
            added: ids(&[R2]),
            removed: ids(&[R1]),
        }
    );
    assert_eq!(
        events[2],
        Event::EmoteAdded {
            guild_id: id(GUILD),
            emote_id: id(E3),
        }
    );
}

#[test]
fn emote_rename_is_published() {
    let client = joined_client();
    client.dispatch(&fixtures::emojis_update(
        GUILD,
        vec![fixtures::emote(E1, "uno", &[R1]), fixtures::emote(E2, "two", &[])],
    ));
    assert_eq!(
        client.take_events(),
        vec![Event::EmoteNameChanged {
            guild_id: id(GUILD),
            emote_id: id(E1),
            old_name: "one".to_string(),
            new_name: "uno".to_string(),
        }]
    );
}
