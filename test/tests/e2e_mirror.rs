/// Server and clients wired through the in-memory transport: each client's
/// mirror must match what the sync rules let it see

use attrib_client::{Client, ClientConfig, ClientEvent};
use attrib_server::{Server, ServerConfig};
use attrib_shared::{Document, HolderId, Value};
use attrib_test::{catalog, LocalTransport, Profile, Stamina, PROFILE, STAMINA};

struct World {
    server: Server,
    transport: LocalTransport,
}

impl World {
    fn new() -> Self {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init()
            .ok();

        let transport = LocalTransport::new();
        let server = Server::new(ServerConfig::default(), catalog(), transport.clone());
        Self { server, transport }
    }

    /// A connected client for `holder`, whose session has started
    fn join(&mut self, holder: HolderId) -> Client {
        let client = Client::new(ClientConfig::default(), catalog());
        self.transport.connect(holder, client.incoming());
        self.server.on_session_start(&holder, &Document::new()).unwrap();
        self.server.send_all_to_self(&holder);
        client
    }
}

#[test]
fn own_mirror_sees_private_fields() {
    let mut world = World::new();
    let alice = HolderId::from_u128(1);
    let mut alice_client = world.join(alice);

    world.server.set(&alice, STAMINA, "regenCooldown", 12).unwrap();
    alice_client.process_incoming();

    assert_eq!(
        alice_client.get_component::<Stamina>(&alice, STAMINA),
        world.server.get_component::<Stamina>(&alice, STAMINA)
    );
    assert_eq!(
        alice_client.get(&alice, STAMINA, "regencooldown"),
        Some(Value::Integer(12))
    );
}

#[test]
fn tracker_mirror_sees_public_fields_only() {
    let mut world = World::new();
    let alice = HolderId::from_u128(1);
    let bob = HolderId::from_u128(2);
    let _alice_client = world.join(alice);
    let mut bob_client = world.join(bob);
    bob_client.process_incoming();

    world
        .server
        .modify::<Profile, _>(&alice, PROFILE, |profile| {
            profile.nickname = "kit".to_string();
            profile.titles = vec!["warden".to_string()];
            profile.reach = 4.5;
            profile.muted = true;
        });
    world.server.tracker_scope_mut(&bob).include(&alice);

    let events = bob_client.process_incoming();
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|event| matches!(event, ClientEvent::Inserted { holder, .. } if *holder == alice)));

    let mirrored = bob_client.get_component::<Profile>(&alice, PROFILE).unwrap();
    assert_eq!(mirrored.nickname, "kit");
    assert_eq!(mirrored.titles, vec!["warden".to_string()]);
    assert_eq!(mirrored.reach, 0.0);
    assert!(!mirrored.muted);

    world.server.set(&alice, STAMINA, "current", 10).unwrap();
    world.server.set(&alice, STAMINA, "regenCooldown", 3).unwrap();
    bob_client.process_incoming();
    assert_eq!(bob_client.get(&alice, STAMINA, "current"), Some(Value::Integer(10)));
    assert_eq!(bob_client.get(&alice, STAMINA, "regencooldown"), Some(Value::Integer(0)));
}

#[test]
fn updates_keep_local_only_fields() {
    let mut world = World::new();
    let alice = HolderId::from_u128(1);
    let mut alice_client = world.join(alice);
    alice_client.process_incoming();

    alice_client.modify::<Profile, _>(&alice, PROFILE, |profile| {
        profile.local_note = "met at the gate".to_string();
    });
    world.server.set(&alice, PROFILE, "nickname", "kit").unwrap();
    alice_client.process_incoming();

    let mirrored = alice_client.get_component::<Profile>(&alice, PROFILE).unwrap();
    assert_eq!(mirrored.nickname, "kit");
    assert_eq!(mirrored.local_note, "met at the gate");
}

#[test]
fn stop_tracking_and_removal_clear_mirrors() {
    let mut world = World::new();
    let alice = HolderId::from_u128(1);
    let bob = HolderId::from_u128(2);
    let mut alice_client = world.join(alice);
    let mut bob_client = world.join(bob);
    world.server.tracker_scope_mut(&bob).include(&alice);
    alice_client.process_incoming();
    bob_client.process_incoming();
    assert_eq!(bob_client.component_ids(&alice).len(), 2);

    world.server.remove_component(&alice, PROFILE);
    alice_client.process_incoming();
    bob_client.process_incoming();
    assert_eq!(alice_client.component_ids(&alice), vec![STAMINA.to_string()]);
    assert_eq!(bob_client.component_ids(&alice), vec![STAMINA.to_string()]);

    world.server.tracker_scope_mut(&bob).exclude(&alice);
    let events = bob_client.process_incoming();
    assert_eq!(
        events,
        vec![ClientEvent::Removed {
            holder: alice,
            component_id: STAMINA.to_string()
        }]
    );
    assert!(!bob_client.holders().contains(&alice));
}

#[test]
fn persistence_survives_a_new_session() {
    let mut world = World::new();
    let alice = HolderId::from_u128(1);
    let _client = world.join(alice);
    world.server.set(&alice, STAMINA, "current", 33).unwrap();
    world.server.set(&alice, STAMINA, "regenCooldown", 8).unwrap();
    world.server.set(&alice, PROFILE, "joinedAt", 1_700_000_000i64).unwrap();

    let saved = world.server.on_save(&alice);
    world.server.on_session_end(&alice);
    world.transport.disconnect(&alice);
    assert!(!world.server.has_holder(&alice));

    world.server.on_session_start(&alice, &saved).unwrap();
    assert_eq!(
        world.server.get_component::<Stamina>(&alice, STAMINA),
        Some(Stamina {
            current: 33,
            max: 100,
            regen_cooldown: 0,
        })
    );
    assert_eq!(
        world.server.get(&alice, PROFILE, "joinedAt"),
        Some(Value::Long(1_700_000_000))
    );
}

#[test]
fn clone_carries_state_to_the_new_holder() {
    let mut world = World::new();
    let alice = HolderId::from_u128(1);
    let respawned = HolderId::from_u128(3);
    let _client = world.join(alice);
    world.server.set(&alice, STAMINA, "regenCooldown", 5).unwrap();

    world.server.on_clone(&alice, &respawned).unwrap();
    world.server.on_session_end(&alice);

    assert_eq!(
        world.server.get(&respawned, STAMINA, "regenCooldown"),
        Some(Value::Integer(5))
    );
}

#[test]
fn session_end_clears_the_holder_from_tracker_mirrors() {
    let mut world = World::new();
    let alice = HolderId::from_u128(1);
    let bob = HolderId::from_u128(2);
    let _alice_client = world.join(alice);
    let mut bob_client = world.join(bob);
    world.server.tracker_scope_mut(&bob).include(&alice);
    bob_client.process_incoming();
    assert!(bob_client.holders().contains(&alice));

    world.server.on_session_end(&alice);
    world.transport.disconnect(&alice);
    world.server.on_stop_tracking(&bob, &alice);

    let events = bob_client.process_incoming();
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|event| matches!(event, ClientEvent::Removed { holder, .. } if *holder == alice)));
    assert!(!bob_client.holders().contains(&alice));
    assert!(bob_client.holders().contains(&bob));
}

#[test]
fn oversized_strings_are_never_sent_cut_short() {
    let mut world = World::new();
    let alice = HolderId::from_u128(1);
    let bob = HolderId::from_u128(2);
    let mut alice_client = world.join(alice);
    let mut bob_client = world.join(bob);
    world.server.tracker_scope_mut(&bob).include(&alice);
    world.server.set(&alice, PROFILE, "nickname", "kit").unwrap();
    alice_client.process_incoming();
    bob_client.process_incoming();

    let long = "x".repeat(40_000);
    assert_eq!(world.server.set(&alice, PROFILE, "nickname", long.as_str()), Ok(true));
    assert_eq!(
        world.server.get(&alice, PROFILE, "nickname"),
        Some(Value::String(long))
    );
    assert!(alice_client.process_incoming().is_empty());
    assert!(bob_client.process_incoming().is_empty());
    for client in [&alice_client, &bob_client] {
        assert_eq!(
            client.get(&alice, PROFILE, "nickname"),
            Some(Value::String("kit".to_string()))
        );
    }

    world.server.set(&alice, PROFILE, "nickname", "kai").unwrap();
    alice_client.process_incoming();
    bob_client.process_incoming();
    for client in [&alice_client, &bob_client] {
        assert_eq!(
            client.get(&alice, PROFILE, "nickname"),
            Some(Value::String("kai".to_string()))
        );
    }
}
