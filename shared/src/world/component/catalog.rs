use std::sync::Arc;

use log::debug;

use crate::{
    registry::{Registry, RegistryError},
    world::component::{
        error::CatalogError,
        replicate::{Instance, Replicate},
        schema::ComponentSchema,
    },
};

/// One prototype per component id. Filled once during startup, then locked;
/// the decoder resolves incoming component ids here.
pub struct Catalog {
    prototypes: Registry<String, Arc<dyn Replicate>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            prototypes: Registry::new(),
        }
    }

    pub fn register<C: Clone + Send + Sync + 'static>(
        &self,
        schema: ComponentSchema<C>,
    ) -> Result<(), CatalogError> {
        let component_id = schema.id().to_string();
        let prototype: Arc<dyn Replicate> = Arc::new(Instance::new(Arc::new(schema)));
        self.prototypes
            .register(component_id.clone(), prototype)
            .map_err(|error| match error {
                RegistryError::AlreadyRegistered { .. } => CatalogError::Duplicate {
                    component_id: component_id.clone(),
                },
                RegistryError::Locked => CatalogError::Locked,
            })?;
        debug!("Registered component '{}'", component_id);
        Ok(())
    }

    pub fn lookup(&self, component_id: &str) -> Option<Arc<dyn Replicate>> {
        self.prototypes.get(&component_id.to_string())
    }

    pub fn contains(&self, component_id: &str) -> bool {
        self.prototypes.contains(&component_id.to_string())
    }

    /// A fresh instance of the named component
    pub fn instantiate(&self, component_id: &str) -> Option<Box<dyn Replicate>> {
        self.lookup(component_id).map(|prototype| prototype.create())
    }

    /// Prototypes attached to every holder on session start, sorted by id
    pub fn auto_apply(&self) -> Vec<Arc<dyn Replicate>> {
        let mut prototypes: Vec<_> = self
            .prototypes
            .values()
            .into_iter()
            .filter(|prototype| prototype.auto_apply())
            .collect();
        prototypes.sort_by(|a, b| a.id().cmp(b.id()));
        prototypes
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids = self.prototypes.keys();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Ends the registration phase
    pub fn lock(&self) {
        self.prototypes.lock();
    }

    pub fn is_locked(&self) -> bool {
        self.prototypes.is_locked()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
