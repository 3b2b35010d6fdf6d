//! Class registration and lookup by name.

mod class_registry;

pub use class_registry::{ClassRegistry, ClassRegistryArc};
