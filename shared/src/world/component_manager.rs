use std::sync::Arc;

use log::trace;

use crate::{
    types::HolderId,
    world::{
        component::{
            catalog::Catalog,
            descriptor::normalize_id,
            error::ComponentError,
            replicate::{Instance, Replicate},
            value::Value,
        },
        holder::HolderRegistry,
    },
};

/// Notice that one holder's component changed. The side that made the change
/// decides where it goes next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentModified {
    pub holder: HolderId,
    pub component_id: String,
    /// The single field that changed, `None` when any may have
    pub descriptor_id: Option<String>,
}

impl ComponentModified {
    pub fn new(holder: HolderId, component_id: &str, descriptor_id: Option<String>) -> Self {
        Self {
            holder,
            component_id: component_id.to_string(),
            descriptor_id,
        }
    }
}

/// Entry point for reading and writing holder components. One per side,
/// handed to whoever needs it.
///
/// A missing holder or component is never an error here: reads return `None`
/// and writes do nothing.
#[derive(Clone)]
pub struct ComponentManager {
    catalog: Arc<Catalog>,
    holders: Arc<HolderRegistry>,
}

impl ComponentManager {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_holders(catalog, Arc::new(HolderRegistry::new()))
    }

    pub fn with_holders(catalog: Arc<Catalog>, holders: Arc<HolderRegistry>) -> Self {
        Self { catalog, holders }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn holders(&self) -> &Arc<HolderRegistry> {
        &self.holders
    }

    /// A copy of the typed state of one component
    pub fn get_component<C: Clone + Send + Sync + 'static>(
        &self,
        holder: &HolderId,
        component_id: &str,
    ) -> Option<C> {
        self.with_component(holder, component_id, |component| {
            component
                .as_any()
                .downcast_ref::<Instance<C>>()
                .map(|instance| instance.state().clone())
        })
        .flatten()
    }

    pub fn with_component<R, F: FnOnce(&dyn Replicate) -> R>(
        &self,
        holder: &HolderId,
        component_id: &str,
        f: F,
    ) -> Option<R> {
        self.holders
            .with_bag(holder, |bag| bag.get(component_id).map(f))
            .flatten()
    }

    pub fn get(&self, holder: &HolderId, component_id: &str, descriptor_id: &str) -> Option<Value> {
        self.with_component(holder, component_id, |component| {
            component.get(descriptor_id)
        })
        .flatten()
    }

    /// Like `get`, with `fallback` standing in for anything missing
    pub fn get_or<V: Into<Value>>(
        &self,
        holder: &HolderId,
        component_id: &str,
        descriptor_id: &str,
        fallback: V,
    ) -> Value {
        self.get(holder, component_id, descriptor_id)
            .unwrap_or_else(|| fallback.into())
    }

    /// Mutates the typed state of one component in place
    pub fn modify<C: Clone + Send + Sync + 'static, F: FnOnce(&mut C)>(
        &self,
        holder: &HolderId,
        component_id: &str,
        f: F,
    ) -> Option<ComponentModified> {
        let modified = self
            .holders
            .with_bag_mut(holder, |bag| {
                let instance = bag
                    .get_mut(component_id)?
                    .as_any_mut()
                    .downcast_mut::<Instance<C>>()?;
                f(instance.state_mut());
                Some(())
            })
            .flatten();
        if modified.is_none() {
            trace!("modify: holder {} has no '{}'", holder, component_id);
        }
        modified.map(|_| ComponentModified::new(*holder, component_id, None))
    }

    /// Sets one field through its descriptor
    pub fn set<V: Into<Value>>(
        &self,
        holder: &HolderId,
        component_id: &str,
        descriptor_id: &str,
        value: V,
    ) -> Result<Option<ComponentModified>, ComponentError> {
        let value = value.into();
        let result = self.holders.with_bag_mut(holder, |bag| {
            bag.get_mut(component_id)
                .map(|component| component.set(descriptor_id, value))
        });
        match result.flatten() {
            Some(Ok(())) => Ok(Some(ComponentModified::new(
                *holder,
                component_id,
                Some(normalize_id(descriptor_id).into_owned()),
            ))),
            Some(Err(error)) => Err(error),
            None => {
                trace!("set: holder {} has no '{}'", holder, component_id);
                Ok(None)
            }
        }
    }

    /// Deep copies of every component the holder has, ordered by id
    pub fn get_all(&self, holder: &HolderId) -> Vec<Box<dyn Replicate>> {
        self.holders
            .with_bag(holder, |bag| bag.iter().map(|component| component.copy()).collect())
            .unwrap_or_default()
    }

    pub fn component_ids(&self, holder: &HolderId) -> Vec<String> {
        self.holders
            .with_bag(holder, |bag| bag.ids())
            .unwrap_or_default()
    }

    pub fn has_component(&self, holder: &HolderId, component_id: &str) -> bool {
        self.holders
            .with_bag(holder, |bag| bag.contains(component_id))
            .unwrap_or(false)
    }

    /// Attaches (or replaces) a component on a live holder
    pub fn insert_component(
        &self,
        holder: &HolderId,
        component: Box<dyn Replicate>,
    ) -> Option<ComponentModified> {
        let component_id = component.id().to_string();
        self.holders
            .with_bag_mut(holder, |bag| {
                bag.insert(component);
            })
            .map(|_| ComponentModified::new(*holder, &component_id, None))
    }

    /// Detaches a component. `false` when there was nothing to remove.
    pub fn remove_component(&self, holder: &HolderId, component_id: &str) -> bool {
        self.holders
            .with_bag_mut(holder, |bag| bag.remove(component_id).is_some())
            .unwrap_or(false)
    }
}
