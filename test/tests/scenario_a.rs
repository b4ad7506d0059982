/// Persisted stamina is restored on session start, and a single field write
/// reaches trackers filtered and the holder itself in full

use attrib_server::{Server, ServerConfig};
use attrib_shared::{Document, HolderId, Value};
use attrib_test::{catalog, RecordingSender, Sent, Stamina, STAMINA};

fn persisted() -> Document {
    let mut document = Document::new();
    let stamina = document.compound_mut("attrib").compound_mut(STAMINA);
    stamina.put("current", 50);
    stamina.put("max", 100);
    document
}

#[test]
fn scenario_a_stamina_write() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();

    let catalog = catalog();
    let sender = RecordingSender::new();
    let mut server = Server::new(ServerConfig::default(), catalog.clone(), sender.clone());
    let holder = HolderId::from_u128(0xA);
    let tracker = HolderId::from_u128(0xB);

    server.on_session_start(&holder, &persisted()).unwrap();
    assert_eq!(
        server.get_component::<Stamina>(&holder, STAMINA),
        Some(Stamina {
            current: 50,
            max: 100,
            regen_cooldown: 0,
        })
    );

    server.on_start_tracking(&tracker, &holder);
    sender.take_raw();

    server.set(&holder, STAMINA, "current", 30).unwrap();

    let sent: Vec<_> = sender
        .take(&catalog)
        .into_iter()
        .filter(|sent| sent.component_id() == STAMINA)
        .collect();
    assert_eq!(
        sent,
        vec![
            Sent::AddOrUpdate {
                to: tracker,
                holder,
                component_id: STAMINA.to_string(),
                fields: vec![
                    ("current".to_string(), Value::Integer(30)),
                    ("max".to_string(), Value::Integer(100)),
                ],
            },
            Sent::AddOrUpdate {
                to: holder,
                holder,
                component_id: STAMINA.to_string(),
                fields: vec![
                    ("current".to_string(), Value::Integer(30)),
                    ("max".to_string(), Value::Integer(100)),
                    ("regencooldown".to_string(), Value::Integer(0)),
                ],
            },
        ]
    );
}
