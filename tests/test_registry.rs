//! Integration tests for the service registry.

extern crate kitbind;

use kitbind::runner::ds::descriptor::TraitsInstance;
use kitbind::runner::ds::error::LocatorError;
use kitbind::runner::ds::types::{ServiceType, TraitsType, Type};
use kitbind::runner::ds::value::{ComponentInstance, Value};
use kitbind::runner::plugin::{ComponentRegistration, ServiceLocator, ServiceRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct RunnerTraits {
    name: &'static str,
}

fn runner() -> ServiceType {
    ServiceType::new("IRunner")
}

fn registry() -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    registry.register_service(runner(), TraitsType::new("RunnerTraits")).unwrap();
    registry
}

/// Register a lazily activated runner and return its activation counter.
fn register_lazy(registry: &mut ServiceRegistry, id: &str) -> Arc<AtomicUsize> {
    let activations = Arc::new(AtomicUsize::new(0));
    let counter = activations.clone();
    let type_name = id.to_string();
    registry
        .register_component(
            ComponentRegistration::factory(runner(), move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(ComponentInstance::new(&type_name, ()))
            })
            .with_id(id),
        )
        .unwrap();
    activations
}

// ============================================================================
// Lazy activation tests
// ============================================================================

mod activation_tests {
    use super::*;

    #[test]
    fn test_factory_runs_on_first_resolution_only() {
        let mut registry = registry();
        let activations = register_lazy(&mut registry, "runner.nunit");
        assert_eq!(activations.load(Ordering::SeqCst), 0);

        let first = registry.resolve(&runner()).unwrap();
        let second = registry.resolve_by_component_id("runner.nunit").unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(activations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handles_do_not_activate_components() {
        let mut registry = registry();
        let activations = register_lazy(&mut registry, "runner.nunit");

        let handle = registry.resolve_handle(&runner()).unwrap();
        assert_eq!(activations.load(Ordering::SeqCst), 0);

        let component = handle.get_component().unwrap();
        assert_eq!(activations.load(Ordering::SeqCst), 1);
        assert!(component.implements(&runner()));
    }

    #[test]
    fn test_concurrent_resolution_yields_one_instance() {
        let mut registry = registry();
        register_lazy(&mut registry, "runner.nunit");
        let registry = Arc::new(registry);

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.resolve(&runner()).unwrap())
            })
            .collect();
        let instances: Vec<ComponentInstance> = workers.into_iter().map(|w| w.join().unwrap()).collect();
        assert!(instances.iter().all(|i| i.ptr_eq(&instances[0])));
    }

    #[test]
    fn test_failed_activation_is_reported() {
        let mut registry = registry();
        registry
            .register_component(
                ComponentRegistration::factory(runner(), || Err("missing native library".into())).with_id("runner.broken"),
            )
            .unwrap();

        match registry.resolve_by_component_id("runner.broken") {
            Err(LocatorError::Activation { component_id, message }) => {
                assert_eq!(component_id, "runner.broken");
                assert_eq!(message, "missing native library");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

// ============================================================================
// Lookup tests
// ============================================================================

mod lookup_tests {
    use super::*;

    #[test]
    fn test_resolve_requires_exactly_one_component() {
        let mut registry = registry();
        assert!(matches!(
            registry.resolve(&runner()),
            Err(LocatorError::ServiceNotFound(_))
        ));

        register_lazy(&mut registry, "runner.a");
        register_lazy(&mut registry, "runner.b");
        match registry.resolve_handle(&runner()) {
            Err(e @ LocatorError::AmbiguousService { .. }) => {
                assert!(e.to_string().contains("IRunner"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_resolve_all_keeps_registration_order() {
        let mut registry = registry();
        for id in &["runner.c", "runner.a", "runner.b"] {
            register_lazy(&mut registry, id);
        }

        let names: Vec<String> = registry
            .resolve_all(&runner())
            .unwrap()
            .iter()
            .map(|c| c.type_name().to_string())
            .collect();
        assert_eq!(names, vec!["runner.c", "runner.a", "runner.b"]);

        let ids: Vec<String> = registry
            .resolve_all_handles(&runner())
            .unwrap()
            .iter()
            .map(|h| h.id().to_string())
            .collect();
        assert_eq!(ids, names);
    }

    #[test]
    fn test_services_lists_component_ids() {
        let mut registry = registry();
        registry
            .register_service(ServiceType::new("IFormatter"), TraitsType::new("FormatterTraits"))
            .unwrap();
        register_lazy(&mut registry, "runner.a");

        let services = registry.services();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].service, ServiceType::new("IFormatter"));
        assert!(services[0].component_ids.is_empty());
        assert_eq!(services[1].component_ids, vec!["runner.a"]);
        assert_eq!(registry.component_count(), 1);
    }
}

// ============================================================================
// Handles and traits tests
// ============================================================================

mod handle_tests {
    use super::*;

    #[test]
    fn test_handle_exposes_traits() {
        let mut registry = registry();
        registry
            .register_component(
                ComponentRegistration::instance(runner(), ComponentInstance::new("NUnitRunner", ()))
                    .with_id("runner.nunit")
                    .with_traits(TraitsInstance::new(
                        TraitsType::new("RunnerTraits"),
                        RunnerTraits { name: "NUnit" },
                    )),
            )
            .unwrap();

        let handle = registry.resolve_handle_by_component_id("runner.nunit").unwrap();
        let traits = handle.get_traits().unwrap();
        assert_eq!(traits.downcast_ref::<RunnerTraits>(), Some(&RunnerTraits { name: "NUnit" }));

        let value = Value::Handle(handle);
        assert!(value.is_instance_of(&Type::handle("IRunner", "RunnerTraits")));
        assert!(value.is_instance_of(&Type::UntypedHandle));
        assert!(!value.is_instance_of(&Type::handle("IRunner", "OtherTraits")));
        assert!(!value.is_instance_of(&Type::service("IRunner")));
    }

    #[test]
    fn test_handles_to_same_component_are_equal() {
        let mut registry = registry();
        register_lazy(&mut registry, "runner.nunit");

        let by_service = registry.resolve_handle(&runner()).unwrap();
        let by_id = registry.resolve_handle_by_component_id("runner.nunit").unwrap();
        assert_eq!(by_service, by_id);
    }
}
