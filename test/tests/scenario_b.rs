/// A peer that starts tracking a holder with two auto-apply components gets
/// exactly two public-only updates, and exactly two removes when it stops

use std::collections::BTreeSet;

use attrib_server::{Server, ServerConfig};
use attrib_shared::{Document, HolderId};
use attrib_test::{catalog, RecordingSender, Sent, PROFILE, STAMINA};

#[test]
fn scenario_b_start_then_stop_tracking() {
    let catalog = catalog();
    let sender = RecordingSender::new();
    let mut server = Server::new(ServerConfig::default(), catalog.clone(), sender.clone());
    let holder = HolderId::from_u128(0x1);
    let peer = HolderId::from_u128(0x2);
    server.on_session_start(&holder, &Document::new()).unwrap();
    sender.take_raw();

    server.tracker_scope_mut(&peer).include(&holder);
    let added = sender.take(&catalog);
    assert_eq!(added.len(), 2);
    for sent in &added {
        let Sent::AddOrUpdate { to, holder: about, fields, component_id } = sent else {
            panic!("expected AddOrUpdate, got {:?}", sent);
        };
        assert_eq!(*to, peer);
        assert_eq!(*about, holder);
        let descriptors = catalog.lookup(component_id).unwrap();
        for (id, _) in fields {
            assert!(descriptors.descriptor(id).unwrap().is_public());
        }
    }

    server.tracker_scope_mut(&peer).exclude(&holder);
    let removed = sender.take(&catalog);
    assert_eq!(removed.len(), 2);
    assert!(removed.iter().all(|sent| sent.is_remove() && *sent.to() == peer));

    let added_ids: BTreeSet<_> = added.iter().map(|sent| sent.component_id().to_string()).collect();
    let removed_ids: BTreeSet<_> = removed.iter().map(|sent| sent.component_id().to_string()).collect();
    assert_eq!(added_ids, removed_ids);
    assert_eq!(
        added_ids,
        BTreeSet::from([PROFILE.to_string(), STAMINA.to_string()])
    );
}
