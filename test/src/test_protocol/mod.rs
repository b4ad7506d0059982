/// Sample components shared by the end-to-end tests

use std::sync::Arc;

use attrib_shared::{Catalog, ComponentSchema, Descriptor};

pub const STAMINA: &str = "stamina";
pub const PROFILE: &str = "profile";

/// `current` and `max` are public and persistent, `regenCooldown` is private
/// and transient
#[derive(Clone, Debug, PartialEq)]
pub struct Stamina {
    pub current: i32,
    pub max: i32,
    pub regen_cooldown: i32,
}

impl Default for Stamina {
    fn default() -> Self {
        Self {
            current: 100,
            max: 100,
            regen_cooldown: 0,
        }
    }
}

/// Covers every value kind
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub nickname: String,
    pub titles: Vec<String>,
    pub joined_at: i64,
    pub scale: f32,
    pub reach: f64,
    pub muted: bool,
    pub local_note: String,
}

pub fn stamina_schema() -> ComponentSchema<Stamina> {
    ComponentSchema::builder(STAMINA, Stamina::default)
        .descriptor(
            Descriptor::new("current", |s: &Stamina| s.current, |s: &mut Stamina, v| s.current = v)
                .public()
                .persistent(),
        )
        .descriptor(
            Descriptor::new("max", |s: &Stamina| s.max, |s: &mut Stamina, v| s.max = v)
                .public()
                .persistent(),
        )
        .descriptor(Descriptor::new(
            "regenCooldown",
            |s: &Stamina| s.regen_cooldown,
            |s: &mut Stamina, v| s.regen_cooldown = v,
        ))
        .build()
        .unwrap()
}

pub fn profile_schema() -> ComponentSchema<Profile> {
    ComponentSchema::builder(PROFILE, Profile::default)
        .descriptor(
            Descriptor::new(
                "nickname",
                |p: &Profile| p.nickname.clone(),
                |p: &mut Profile, v| p.nickname = v,
            )
            .public()
            .persistent()
            .abbrev("nick"),
        )
        .descriptor(
            Descriptor::new(
                "titles",
                |p: &Profile| p.titles.clone(),
                |p: &mut Profile, v| p.titles = v,
            )
            .public()
            .persistent(),
        )
        .descriptor(
            Descriptor::new("joinedAt", |p: &Profile| p.joined_at, |p: &mut Profile, v| {
                p.joined_at = v
            })
            .persistent(),
        )
        .descriptor(Descriptor::new("scale", |p: &Profile| p.scale, |p: &mut Profile, v| p.scale = v).public())
        .descriptor(Descriptor::new("reach", |p: &Profile| p.reach, |p: &mut Profile, v| p.reach = v))
        .descriptor(Descriptor::new("muted", |p: &Profile| p.muted, |p: &mut Profile, v| p.muted = v).persistent())
        .build()
        .unwrap()
}

/// A fresh catalog holding both sample components
pub fn catalog() -> Arc<Catalog> {
    let catalog = Catalog::new();
    catalog.register(stamina_schema()).unwrap();
    catalog.register(profile_schema()).unwrap();
    Arc::new(catalog)
}
