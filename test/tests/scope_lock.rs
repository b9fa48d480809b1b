/// Tests for the per-guild bulk-load lock. While a guild is locked its
/// events queue without touching the cache, and unlocking applies them in
/// arrival order.

use cordial_client::{shared::Snowflake, ClientConfig, DeferKind, Dispatched, Event};
use cordial_test::{
    assert_applied, assert_deferred, assert_event_kinds, fixtures, GuildBuilder, TestClient,
    SELF_ID,
};

const GUILD: u64 = 100;
const TEXT: u64 = 110;
const USER_A: u64 = 7;
const USER_B: u64 = 8;

fn id(raw: u64) -> Snowflake {
    Snowflake::new(raw)
}

fn large_guild() -> GuildBuilder {
    GuildBuilder::new(GUILD, SELF_ID)
        .large(3)
        .member(fixtures::member(SELF_ID, &[]))
        .channel(fixtures::text_channel(TEXT, GUILD, "general", 0))
}

/// A large guild with members still to come is locked on creation
#[test]
fn incomplete_large_guild_is_locked() {
    let client = TestClient::new();
    assert_applied!(client.dispatch(&large_guild().create()));

    assert!(client.client.is_guild_locked(&id(GUILD)));
    assert_event_kinds!(client.take_events(), [Event::GuildJoined { .. }]);
}

/// Queued events apply in arrival order once the last member chunk arrives
#[test]
fn queued_events_replay_in_order_on_completion() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .is_test(true)
        .try_init()
        .ok();

    let client = TestClient::new();
    client.dispatch(&large_guild().create());
    client.take_events();

    assert_deferred!(client.dispatch(&fixtures::role_create(GUILD, fixtures::role(1, "first", 1, 0))));
    assert_deferred!(client.dispatch(&fixtures::message_delete(TEXT, 5)));
    assert_deferred!(client.dispatch(&fixtures::role_create(GUILD, fixtures::role(2, "second", 2, 0))));
    assert_eq!(client.client.deferred_count(DeferKind::ScopeLock, id(GUILD)), 3);

    let guild = client.client.cache().guild(&id(GUILD)).unwrap();
    assert!(guild.role(&id(1)).is_none());
    assert!(client.take_events().is_empty());

    assert_applied!(client.dispatch(&fixtures::members_chunk(GUILD, vec![fixtures::member(USER_A, &[])])));
    assert!(client.client.is_guild_locked(&id(GUILD)));
    assert!(client.take_events().is_empty());

    assert_applied!(client.dispatch(&fixtures::members_chunk(GUILD, vec![fixtures::member(USER_B, &[])])));
    assert!(!client.client.is_guild_locked(&id(GUILD)));
    assert_eq!(client.client.deferred_total(), 0);

    let events = client.take_events();
    assert_event_kinds!(
        events,
        [
            Event::GuildReady { .. },
            Event::RoleCreated { .. },
            Event::GuildMessageDelete { .. },
            Event::MessageDelete { .. },
            Event::RoleCreated { .. },
        ]
    );
    assert_eq!(
        events[1],
        Event::RoleCreated {
            guild_id: id(GUILD),
            role_id: id(1)
        }
    );
    assert_eq!(
        events[4],
        Event::RoleCreated {
            guild_id: id(GUILD),
            role_id: id(2)
        }
    );
}

/// Member chunks are the bulk load itself and are not held back by the lock
#[test]
fn member_chunks_apply_while_locked() {
    let client = TestClient::new();
    client.dispatch(&large_guild().create());

    client.dispatch(&fixtures::members_chunk(GUILD, vec![fixtures::member(USER_A, &[])]));
    let guild = client.client.cache().guild(&id(GUILD)).unwrap();
    assert!(guild.is_member(&id(USER_A)));
    assert!(client.client.is_guild_locked(&id(GUILD)));
}

#[test]
fn lock_can_be_disabled() {
    let client = TestClient::with_config(ClientConfig {
        enforce_bulk_load_lock: false,
        ..ClientConfig::default()
    });
    client.dispatch(&large_guild().create());

    assert!(!client.client.is_guild_locked(&id(GUILD)));
    assert_applied!(client.dispatch(&fixtures::message_delete(TEXT, 1)));
}

/// The application can hold a guild's events itself and release them
#[test]
fn manual_lock_and_unlock() {
    let client = TestClient::new();
    client.dispatch(
        &GuildBuilder::new(GUILD, SELF_ID)
            .channel(fixtures::text_channel(TEXT, GUILD, "general", 0))
            .create(),
    );
    client.take_events();

    assert!(client.client.lock_guild(id(GUILD)));
    assert!(!client.client.lock_guild(id(GUILD)));

    for message_id in 1..=5 {
        assert_deferred!(client.dispatch(&fixtures::message_delete(TEXT, message_id)));
    }
    assert!(client.take_events().is_empty());

    assert!(client.client.unlock_guild(id(GUILD)));
    assert!(!client.client.unlock_guild(id(GUILD)));

    let deleted: Vec<Snowflake> = client
        .take_events()
        .into_iter()
        .filter_map(|event| match event {
            Event::MessageDelete { message_id, .. } => Some(message_id),
            _ => None,
        })
        .collect();
    assert_eq!(deleted, (1..=5).map(id).collect::<Vec<_>>());
}

/// A GUILD_CREATE for a locked guild queues behind the lock as well
#[test]
fn guild_create_queues_while_locked() {
    let client = TestClient::new();
    client.dispatch(&GuildBuilder::new(GUILD, SELF_ID).name("before").create());
    assert!(client.client.lock_guild(id(GUILD)));

    let outcome = client.dispatch(&GuildBuilder::new(GUILD, SELF_ID).name("after").create());
    assert_eq!(outcome, Dispatched::Deferred);
    let guild = client.client.cache().guild(&id(GUILD)).unwrap();
    assert_eq!(guild.name(), "before");

    client.client.unlock_guild(id(GUILD));
    assert_eq!(guild.name(), "after");
}

/// Deleting a locked guild tears it down and drops its queue
#[test]
fn guild_delete_ignores_lock() {
    let client = TestClient::new();
    client.dispatch(&large_guild().create());
    client.dispatch(&fixtures::message_delete(TEXT, 1));
    assert_eq!(client.client.deferred_count(DeferKind::ScopeLock, id(GUILD)), 1);
    client.take_events();

    assert_applied!(client.dispatch(&fixtures::guild_delete(GUILD)));

    assert!(!client.client.is_guild_locked(&id(GUILD)));
    assert_eq!(client.client.deferred_total(), 0);
    assert!(client.client.cache().guild(&id(GUILD)).is_none());
    assert_event_kinds!(client.take_events(), [Event::GuildLeft { .. }]);
}
