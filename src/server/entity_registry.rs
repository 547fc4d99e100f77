//! Entity registry collecting the route builders of each entity type

use axum::Router;
use indexmap::IndexMap;

/// Trait that describes how to build routes for an entity
///
/// Routes are relative to the API prefix, e.g. `/contracts` and
/// `/contracts/{id}`.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "contract")
    fn entity_type(&self) -> &str;

    /// The path segment of the collection (e.g., "exposure-files")
    fn plural(&self) -> &str;

    fn build_routes(&self) -> Router;
}

/// Registry for all entities served by the application
///
/// Registration order is kept so route building is deterministic.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: IndexMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity descriptor
    ///
    /// Registering the same entity type twice replaces the first descriptor.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge the routes of every registered entity
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }

    /// Collection path segments in registration order
    pub fn plurals(&self) -> Vec<&str> {
        self.descriptors.values().map(|d| d.plural()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDescriptor {
        entity_type: &'static str,
        plural: &'static str,
    }

    impl EntityDescriptor for MockDescriptor {
        fn entity_type(&self) -> &str {
            self.entity_type
        }

        fn plural(&self) -> &str {
            self.plural
        }

        fn build_routes(&self) -> Router {
            Router::new()
        }
    }

    fn mock(entity_type: &'static str, plural: &'static str) -> Box<MockDescriptor> {
        Box::new(MockDescriptor {
            entity_type,
            plural,
        })
    }

    #[test]
    fn test_new_registry_is_empty() {
        assert!(EntityRegistry::new().entity_types().is_empty());
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut registry = EntityRegistry::new();
        registry.register(mock("exposure_file", "exposure-files"));
        registry.register(mock("contract", "contracts"));

        assert_eq!(registry.entity_types(), vec!["exposure_file", "contract"]);
        assert_eq!(registry.plurals(), vec!["exposure-files", "contracts"]);
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(mock("contract", "contracts"));
        registry.register(mock("contract", "treaties"));

        assert_eq!(registry.plurals(), vec!["treaties"]);
    }

    #[test]
    fn test_build_routes_with_entities() {
        let mut registry = EntityRegistry::new();
        registry.register(mock("contract", "contracts"));
        let _router = registry.build_routes();
    }
}
