/// Dispatch and request completion running on several threads at once
/// against one client

use std::sync::Arc;
use std::thread;

use serde_json::json;

use cordial_client::{
    shared::{ChannelType, ReactionEmote, Snowflake},
    ChannelRef, Event, MessageReaction,
};
use cordial_test::{fixtures, GuildBuilder, TestClient, SELF_ID};

const GUILD_A: u64 = 100;
const GUILD_B: u64 = 200;
const TEXT_A: u64 = 110;
const TEXT_B: u64 = 210;
const STRANGER: u64 = 9;
const MESSAGE: u64 = 50;
const ROUNDS: u64 = 200;

fn id(raw: u64) -> Snowflake {
    Snowflake::new(raw)
}

fn setup() -> TestClient {
    let client = TestClient::new();
    for (guild, text) in [(GUILD_A, TEXT_A), (GUILD_B, TEXT_B)] {
        client.dispatch(
            &GuildBuilder::new(guild, SELF_ID)
                .member(fixtures::member(SELF_ID, &[]))
                .channel(fixtures::text_channel(text, guild, "general", 0))
                .create(),
        );
    }
    client.take_events();
    client
}

fn reaction() -> MessageReaction {
    let channel = ChannelRef {
        id: id(TEXT_A),
        kind: ChannelType::Text,
        guild_id: Some(id(GUILD_A)),
    };
    MessageReaction::new(channel, ReactionEmote::unicode("👍"), id(MESSAGE), false, Some(2))
}

/// Role ids created in `guild`, in the order their events were heard
fn created_roles(events: &[Event], guild: u64) -> Vec<u64> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::RoleCreated { guild_id, role_id } if *guild_id == id(guild) => {
                Some(u64::from(*role_id))
            }
            _ => None,
        })
        .collect()
}

fn is_ascending(ids: &[u64]) -> bool {
    ids.windows(2).all(|pair| pair[0] < pair[1])
}

#[test]
fn dispatch_into_two_guilds_while_requests_complete() {
    let client = setup();

    for _ in 0..ROUNDS {
        client.transport.push_success(json!([
            fixtures::user(SELF_ID, "self"),
            fixtures::user(STRANGER, "stranger"),
        ]));
    }
    let pending: Vec<_> = (0..ROUNDS)
        .map(|_| {
            client
                .client
                .retrieve_reaction_users(&reaction(), None)
                .unwrap()
                .queue()
        })
        .collect();

    // two writers share guild A, one has guild B to itself
    let sources = [(GUILD_A, 1_000u64), (GUILD_A, 3_000), (GUILD_B, 2_000)];
    let workers: Vec<_> = sources
        .iter()
        .map(|&(guild, base)| {
            let client = client.client.clone();
            thread::spawn(move || {
                for offset in 0..ROUNDS {
                    let role = fixtures::role(base + offset, "r", 1, 0);
                    client.dispatch(&fixtures::role_create(guild, role));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let cache = client.client.cache();
    let self_user = cache.user(&id(SELF_ID)).unwrap();
    for result in pending {
        let users = client.block_on(result).unwrap();
        assert_eq!(users.len(), 2);
        assert!(Arc::ptr_eq(&users[0], &self_user));
        // every request resolves to the one placeholder
        let placeholder = cache.fake_users().get(&id(STRANGER)).unwrap();
        assert!(Arc::ptr_eq(&users[1], &placeholder));
    }
    assert_eq!(client.transport.call_count(), ROUNDS as usize);

    // the public role plus every created role
    let guild_a = cache.guild(&id(GUILD_A)).unwrap();
    let guild_b = cache.guild(&id(GUILD_B)).unwrap();
    assert_eq!(guild_a.roles_map().len(), 1 + 2 * ROUNDS as usize);
    assert_eq!(guild_b.roles_map().len(), 1 + ROUNDS as usize);

    let events = client.take_events();
    let in_a = created_roles(&events, GUILD_A);
    let in_b = created_roles(&events, GUILD_B);
    assert_eq!(in_a.len(), 2 * ROUNDS as usize);
    assert_eq!(in_b.len(), ROUNDS as usize);

    // each writer's events stay in the order it dispatched them
    let (first, second): (Vec<u64>, Vec<u64>) = in_a.iter().partition(|role| **role < 3_000);
    assert!(first.iter().all(|role| (1_000..1_000 + ROUNDS).contains(role)));
    assert!(is_ascending(&first));
    assert!(is_ascending(&second));
    assert!(in_b.iter().all(|role| (2_000..2_000 + ROUNDS).contains(role)));
    assert!(is_ascending(&in_b));
}

#[test]
fn message_deletes_keep_per_channel_order() {
    let client = setup();

    let workers: Vec<_> = [GUILD_A, GUILD_B]
        .into_iter()
        .map(|guild| {
            let client = client.client.clone();
            thread::spawn(move || {
                for message in 0..ROUNDS {
                    let channel = if guild == GUILD_A { TEXT_A } else { TEXT_B };
                    client.dispatch(&fixtures::message_delete(channel, 10_000 + message));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let events = client.take_events();
    for channel in [TEXT_A, TEXT_B] {
        let deleted: Vec<u64> = events
            .iter()
            .filter_map(|event| match event {
                Event::MessageDelete { channel_id, message_id, .. } if *channel_id == id(channel) => {
                    Some(u64::from(*message_id))
                }
                _ => None,
            })
            .collect();
        assert_eq!(deleted.len(), ROUNDS as usize);
        assert!(is_ascending(&deleted), "channel {} events reordered", channel);
    }
}
