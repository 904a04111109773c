//! Core types for registering components.

use std::error::Error;
use std::sync::Arc;

use crate::runner::ds::descriptor::{ComponentFactory, TraitsInstance};
use crate::runner::ds::types::ServiceType;
use crate::runner::ds::value::ComponentInstance;

/// How a registration produces its component instance.
pub enum ComponentSource {
    /// Already constructed.
    Instance(ComponentInstance),
    /// Constructed on first use.
    Factory(ComponentFactory),
}

/// Component registration definition.
/// Describes one implementation of a service before it enters the registry.
pub struct ComponentRegistration {
    /// Service the component is registered under.
    pub service: ServiceType,

    /// Unique id. A random one is generated when absent.
    pub component_id: Option<String>,

    pub source: ComponentSource,

    /// Static metadata exposed through component handles.
    pub traits: Option<TraitsInstance>,
}

impl ComponentRegistration {
    /// Register an existing instance.
    pub fn instance(service: ServiceType, instance: ComponentInstance) -> Self {
        ComponentRegistration {
            service,
            component_id: None,
            source: ComponentSource::Instance(instance),
            traits: None,
        }
    }

    /// Register a component activated lazily by `factory`.
    pub fn factory<F>(service: ServiceType, factory: F) -> Self
    where
        F: Fn() -> Result<ComponentInstance, Box<dyn Error + Send + Sync>> + Send + Sync + 'static,
    {
        ComponentRegistration {
            service,
            component_id: None,
            source: ComponentSource::Factory(Arc::new(factory)),
            traits: None,
        }
    }

    /// Set the component id.
    pub fn with_id(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }

    /// Attach traits.
    pub fn with_traits(mut self, traits: TraitsInstance) -> Self {
        self.traits = Some(traits);
        self
    }
}

/// Metadata about a registered service.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub service: ServiceType,
    pub component_ids: Vec<String>,
}
