//! Server module
//!
//! `ServerBuilder` wires the store and configuration into a `ServerHost`,
//! registers the entity descriptors and exposes everything over REST.

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use host::ServerHost;
