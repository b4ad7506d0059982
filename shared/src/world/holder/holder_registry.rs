use crate::{
    registry::{Registry, RegistryError},
    types::HolderId,
    world::holder::component_bag::ComponentBag,
};

/// Live component bags, one per holder with an active session
#[derive(Default)]
pub struct HolderRegistry {
    bags: Registry<HolderId, ComponentBag>,
}

impl HolderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh bag for `holder`, filled by `init` before any other
    /// thread can see it
    pub fn register_with_init<F: FnOnce(&mut ComponentBag)>(
        &self,
        holder: HolderId,
        init: F,
    ) -> Result<(), RegistryError> {
        self.bags.register_with_init(holder, ComponentBag::new(), init)
    }

    /// Like `register_with_init`, but an existing bag is replaced instead of
    /// refused. Returns the replaced bag.
    pub fn replace_with_init<F: FnOnce(&mut ComponentBag)>(
        &self,
        holder: HolderId,
        init: F,
    ) -> Result<Option<ComponentBag>, RegistryError> {
        self.bags.insert_with_init(holder, ComponentBag::new(), init)
    }

    pub fn remove(&self, holder: &HolderId) -> Option<ComponentBag> {
        self.bags.remove(holder)
    }

    pub fn contains(&self, holder: &HolderId) -> bool {
        self.bags.contains(holder)
    }

    pub fn with_bag<R, F: FnOnce(&ComponentBag) -> R>(&self, holder: &HolderId, f: F) -> Option<R> {
        self.bags.with(holder, f)
    }

    pub fn with_bag_mut<R, F: FnOnce(&mut ComponentBag) -> R>(
        &self,
        holder: &HolderId,
        f: F,
    ) -> Option<R> {
        self.bags.with_mut(holder, f)
    }

    /// Runs `f` against the bag of `holder`, creating an empty one first when
    /// the holder has none
    pub fn with_bag_or_insert<R, F: FnOnce(&mut ComponentBag) -> R>(
        &self,
        holder: HolderId,
        f: F,
    ) -> Result<R, RegistryError> {
        self.bags.with_mut_or_insert(holder, ComponentBag::new, f)
    }

    /// A deep copy of the bag of `holder`
    pub fn get(&self, holder: &HolderId) -> Option<ComponentBag> {
        self.bags.with(holder, ComponentBag::copy)
    }

    pub fn holders(&self) -> Vec<HolderId> {
        let mut holders = self.bags.keys();
        holders.sort();
        holders
    }

    pub fn len(&self) -> usize {
        self.bags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bags.is_empty()
    }
}
