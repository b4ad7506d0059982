/// Property tests over the sample profile component, which covers every
/// value kind

use proptest::prelude::*;

use attrib_client::{Client, ClientConfig};
use attrib_shared::{
    AddOrUpdate, Catalog, ComponentMessage, Document, HolderId, Instance, Replicate, Visibility,
};
use attrib_test::{catalog, Profile, PROFILE, SERVER_ID};

fn profile_strategy() -> impl Strategy<Value = Profile> {
    (
        "[a-zA-Z0-9 ]{0,16}",
        prop::collection::vec("[a-z]{1,8}", 0..4),
        any::<i64>(),
        -1.0e6f32..1.0e6f32,
        -1.0e9f64..1.0e9f64,
        any::<bool>(),
        "[a-z]{0,8}",
    )
        .prop_map(|(nickname, titles, joined_at, scale, reach, muted, local_note)| Profile {
            nickname,
            titles,
            joined_at,
            scale,
            reach,
            muted,
            local_note,
        })
}

fn instance_of(catalog: &Catalog, profile: &Profile) -> Box<dyn Replicate> {
    let mut component = catalog.instantiate(PROFILE).unwrap();
    *component
        .as_any_mut()
        .downcast_mut::<Instance<Profile>>()
        .unwrap()
        .state_mut() = profile.clone();
    component
}

fn state_of(component: &dyn Replicate) -> Profile {
    component
        .as_any()
        .downcast_ref::<Instance<Profile>>()
        .unwrap()
        .state()
        .clone()
}

proptest! {
    #[test]
    fn document_round_trip(profile in profile_strategy()) {
        let catalog = catalog();
        let mut document = Document::new();
        instance_of(&catalog, &profile).encode(&mut document, false);

        let mut fresh = catalog.instantiate(PROFILE).unwrap();
        fresh.decode(&document, false);

        let decoded = state_of(fresh.as_ref());
        // not described by any descriptor
        prop_assert_eq!(decoded, Profile { local_note: String::new(), ..profile });
    }

    #[test]
    fn persist_only_drops_transient_fields(profile in profile_strategy()) {
        let catalog = catalog();
        let component = instance_of(&catalog, &profile);
        let mut document = Document::new();
        component.encode(&mut document, true);

        let node = document.compound(PROFILE).unwrap();
        for info in component.descriptors() {
            prop_assert_eq!(node.contains(info.id()), info.is_persistent());
        }

        let mut fresh = catalog.instantiate(PROFILE).unwrap();
        fresh.decode(&document, true);
        let decoded = state_of(fresh.as_ref());
        prop_assert_eq!(&decoded.nickname, &profile.nickname);
        prop_assert_eq!(decoded.joined_at, profile.joined_at);
        prop_assert_eq!(decoded.scale, 0.0);
        prop_assert_eq!(decoded.reach, 0.0);
    }

    #[test]
    fn public_only_messages_carry_no_private_descriptor(profile in profile_strategy()) {
        let catalog = catalog();
        let component = instance_of(&catalog, &profile);
        let payload = ComponentMessage::from(AddOrUpdate::new(
            HolderId::from_u128(1),
            component.as_ref(),
            Visibility::PublicOnly,
        ))
        .encode()
        .unwrap();

        let ComponentMessage::AddOrUpdate(message) = ComponentMessage::decode(&catalog, &payload).unwrap() else {
            panic!("expected AddOrUpdate");
        };
        prop_assert!(!message.fields.is_empty());
        for id in &message.fields {
            prop_assert!(component.descriptor(id).unwrap().is_public());
            prop_assert_eq!(message.component.get(id), component.get(id));
        }
    }

    #[test]
    fn applying_an_update_twice_equals_once(
        first in profile_strategy(),
        second in profile_strategy(),
        public_only in any::<bool>(),
    ) {
        let catalog = catalog();
        let holder = HolderId::from_u128(1);
        let visibility = if public_only { Visibility::PublicOnly } else { Visibility::All };
        let initial = ComponentMessage::from(AddOrUpdate::new(
            holder,
            instance_of(&catalog, &first).as_ref(),
            Visibility::All,
        ))
        .encode()
        .unwrap();
        let update = ComponentMessage::from(AddOrUpdate::new(
            holder,
            instance_of(&catalog, &second).as_ref(),
            visibility,
        ))
        .encode()
        .unwrap();

        let mut client = Client::new(ClientConfig::default(), catalog.clone());
        client.receive(SERVER_ID, initial);
        client.receive(SERVER_ID, update.clone());
        client.process_incoming();
        let once = client.get_component::<Profile>(&holder, PROFILE);

        client.receive(SERVER_ID, update);
        client.process_incoming();
        prop_assert_eq!(client.get_component::<Profile>(&holder, PROFILE), once);
    }

    #[test]
    fn missing_subtree_leaves_state_alone(
        profile in profile_strategy(),
        other_keys in prop::collection::vec("[a-z]{1,6}", 0..4),
    ) {
        let catalog = catalog();
        let mut document = Document::new();
        for key in other_keys.iter().filter(|key| key.as_str() != PROFILE) {
            document.compound_mut(key).put("value", 1);
        }

        let mut component = instance_of(&catalog, &profile);
        component.decode(&document, false);
        component.decode(&document, true);
        prop_assert_eq!(state_of(component.as_ref()), profile);
    }
}
