mod component_bag;
mod holder_registry;

pub use component_bag::ComponentBag;
pub use holder_registry::HolderRegistry;
