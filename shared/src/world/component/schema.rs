use std::collections::HashSet;

use crate::world::{
    component::{
        descriptor::{normalize_id, Descriptor},
        error::ComponentError,
    },
    document::Document,
};

type Factory<C> = Box<dyn Fn() -> C + Send + Sync>;

/// The fixed, ordered field list of one component type, plus a factory for
/// fresh state. Immutable once built.
pub struct ComponentSchema<C> {
    id: String,
    descriptors: Vec<Descriptor<C>>,
    auto_apply: bool,
    factory: Factory<C>,
}

impl<C: 'static> ComponentSchema<C> {
    pub fn builder<F: Fn() -> C + Send + Sync + 'static>(
        id: &str,
        factory: F,
    ) -> ComponentSchemaBuilder<C> {
        ComponentSchemaBuilder {
            id: id.to_string(),
            descriptors: Vec::new(),
            auto_apply: true,
            factory: Box::new(factory),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn descriptors(&self) -> &[Descriptor<C>] {
        &self.descriptors
    }

    pub fn descriptor(&self, descriptor_id: &str) -> Option<&Descriptor<C>> {
        let descriptor_id = normalize_id(descriptor_id);
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.id() == descriptor_id)
    }

    /// Whether the component is attached to every holder on session start
    pub fn auto_apply(&self) -> bool {
        self.auto_apply
    }

    /// Fresh, independently owned state
    pub fn create(&self) -> C {
        (self.factory)()
    }

    /// Writes `state` into the sub-tree keyed by this component's id,
    /// skipping non-persistent fields when `persist_only` is set
    pub fn encode(&self, state: &C, document: &mut Document, persist_only: bool) {
        let node = document.compound_mut(&self.id);
        for descriptor in &self.descriptors {
            if persist_only && !descriptor.is_persistent() {
                continue;
            }
            descriptor.write_to(node, state);
        }
    }

    /// Reads this component's sub-tree into `state`. A missing sub-tree
    /// leaves `state` as is.
    pub fn decode(&self, state: &mut C, document: &Document, persist_only: bool) {
        let Some(node) = document.compound(&self.id) else {
            return;
        };
        for descriptor in &self.descriptors {
            if persist_only && !descriptor.is_persistent() {
                continue;
            }
            descriptor.read_from(node, state);
        }
    }
}

pub struct ComponentSchemaBuilder<C> {
    id: String,
    descriptors: Vec<Descriptor<C>>,
    auto_apply: bool,
    factory: Factory<C>,
}

impl<C: 'static> ComponentSchemaBuilder<C> {
    pub fn descriptor(mut self, descriptor: Descriptor<C>) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn auto_apply(mut self, auto_apply: bool) -> Self {
        self.auto_apply = auto_apply;
        self
    }

    pub fn build(self) -> Result<ComponentSchema<C>, ComponentError> {
        if self.id.is_empty() {
            return Err(ComponentError::EmptyId);
        }
        let mut seen = HashSet::new();
        for descriptor in &self.descriptors {
            if !seen.insert(descriptor.id()) {
                return Err(ComponentError::DuplicateDescriptor {
                    component_id: self.id.clone(),
                    descriptor_id: descriptor.id().to_string(),
                });
            }
        }
        Ok(ComponentSchema {
            id: self.id,
            descriptors: self.descriptors,
            auto_apply: self.auto_apply,
            factory: self.factory,
        })
    }
}
