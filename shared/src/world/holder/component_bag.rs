use std::collections::{btree_map, BTreeMap};

use crate::world::{component::replicate::Replicate, document::Document};

/// Every component attached to one holder, at most one instance per id
#[derive(Default)]
pub struct ComponentBag {
    components: BTreeMap<String, Box<dyn Replicate>>,
}

impl ComponentBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the instance under its own id. Returns the replaced one.
    pub fn insert(&mut self, component: Box<dyn Replicate>) -> Option<Box<dyn Replicate>> {
        self.components.insert(component.id().to_string(), component)
    }

    pub fn remove(&mut self, component_id: &str) -> Option<Box<dyn Replicate>> {
        self.components.remove(component_id)
    }

    pub fn get(&self, component_id: &str) -> Option<&dyn Replicate> {
        self.components.get(component_id).map(|component| &**component)
    }

    pub fn get_mut(&mut self, component_id: &str) -> Option<&mut (dyn Replicate + 'static)> {
        self.components
            .get_mut(component_id)
            .map(|component| &mut **component)
    }

    pub fn contains(&self, component_id: &str) -> bool {
        self.components.contains_key(component_id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.components.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Replicate> {
        self.components.values().map(|component| &**component)
    }

    /// A deep copy of every instance
    pub fn copy(&self) -> ComponentBag {
        Self {
            components: self
                .components
                .iter()
                .map(|(id, component)| (id.clone(), component.copy()))
                .collect(),
        }
    }

    /// Writes every component under its own sub-tree of `document`
    pub fn encode(&self, document: &mut Document, persist_only: bool) {
        for component in self.components.values() {
            component.encode(document, persist_only);
        }
    }

    /// Reads every component's sub-tree out of `document`. Components with
    /// no sub-tree keep their current state.
    pub fn decode(&mut self, document: &Document, persist_only: bool) {
        for component in self.components.values_mut() {
            component.decode(document, persist_only);
        }
    }
}

impl<'a> IntoIterator for &'a ComponentBag {
    type Item = (&'a String, &'a Box<dyn Replicate>);
    type IntoIter = btree_map::Iter<'a, String, Box<dyn Replicate>>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
