use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};

use crate::world::component::value::{Value, ValueKind};

/// One node of a `Document`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Tag {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    String(String),
    List(Vec<String>),
    Compound(Document),
}

impl Tag {
    /// Converts a leaf to a `Value` of the requested kind. Compounds and leaves
    /// of another kind yield `None`.
    pub fn to_value(&self, kind: ValueKind) -> Option<Value> {
        match (kind, self) {
            (ValueKind::Integer, Tag::Int(value)) => Some(Value::Integer(*value)),
            (ValueKind::Long, Tag::Long(value)) => Some(Value::Long(*value)),
            (ValueKind::Float, Tag::Float(value)) => Some(Value::Float(*value)),
            (ValueKind::Double, Tag::Double(value)) => Some(Value::Double(*value)),
            (ValueKind::Boolean, Tag::Bool(value)) => Some(Value::Boolean(*value)),
            (ValueKind::String, Tag::String(value)) => Some(Value::String(value.clone())),
            (ValueKind::ListString, Tag::List(value)) => Some(Value::ListString(value.clone())),
            _ => None,
        }
    }
}

impl From<Value> for Tag {
    fn from(value: Value) -> Self {
        match value {
            Value::Integer(value) => Tag::Int(value),
            Value::Long(value) => Tag::Long(value),
            Value::Float(value) => Tag::Float(value),
            Value::Double(value) => Tag::Double(value),
            Value::Boolean(value) => Tag::Bool(value),
            Value::String(value) => Tag::String(value),
            Value::ListString(value) => Tag::List(value),
        }
    }
}

/// Named tree of typed leaves, used both as the persistence format and as the
/// staging area when merging decoded state. Keys iterate in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    entries: BTreeMap<String, Tag>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, Tag> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Tag> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    pub fn put<T: Into<Tag>>(&mut self, key: &str, tag: T) -> Option<Tag> {
        self.entries.insert(key.to_string(), tag.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.entries.remove(key)
    }

    /// Reads a leaf as a `Value` of `kind`
    pub fn get_value(&self, key: &str, kind: ValueKind) -> Option<Value> {
        self.entries.get(key).and_then(|tag| tag.to_value(kind))
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.entries.get(key) {
            Some(Tag::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(Tag::Long(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(Tag::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Tag::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        match self.entries.get(key) {
            Some(Tag::List(value)) => Some(value.as_slice()),
            _ => None,
        }
    }

    pub fn compound(&self, key: &str) -> Option<&Document> {
        match self.entries.get(key) {
            Some(Tag::Compound(document)) => Some(document),
            _ => None,
        }
    }

    /// Returns the child document under `key`, creating it (or replacing a
    /// non-compound leaf) if needed
    pub fn compound_mut(&mut self, key: &str) -> &mut Document {
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Tag::Compound(Document::new()));
        if !matches!(slot, Tag::Compound(_)) {
            *slot = Tag::Compound(Document::new());
        }
        match slot {
            Tag::Compound(document) => document,
            _ => unreachable!("slot was just made a compound"),
        }
    }
}

impl From<Document> for Tag {
    fn from(document: Document) -> Self {
        Tag::Compound(document)
    }
}

impl From<i32> for Tag {
    fn from(value: i32) -> Self {
        Tag::Int(value)
    }
}

impl From<i64> for Tag {
    fn from(value: i64) -> Self {
        Tag::Long(value)
    }
}

impl From<bool> for Tag {
    fn from(value: bool) -> Self {
        Tag::Bool(value)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::String(value.to_string())
    }
}
