pub mod component;
pub mod component_manager;
pub mod document;
pub mod holder;
