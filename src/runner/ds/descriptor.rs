//! Descriptors identifying services and their registered components.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::runner::ds::error::LocatorError;
use crate::runner::ds::types::{ServiceType, TraitsType};
use crate::runner::ds::value::ComponentInstance;

/// Creates the instance of a component on first use.
pub type ComponentFactory =
    Arc<dyn Fn() -> Result<ComponentInstance, Box<dyn Error + Send + Sync>> + Send + Sync>;

/// Identifies a service contract and its paired traits type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    service_type: ServiceType,
    traits_type: TraitsType,
}

impl ServiceDescriptor {
    pub fn new(service_type: ServiceType, traits_type: TraitsType) -> Self {
        ServiceDescriptor {
            service_type,
            traits_type,
        }
    }

    pub fn resolve_service_type(&self) -> &ServiceType {
        &self.service_type
    }

    pub fn resolve_traits_type(&self) -> &TraitsType {
        &self.traits_type
    }
}

/// Static metadata attached to a component registration.
#[derive(Clone)]
pub struct TraitsInstance {
    traits_type: TraitsType,
    object: Arc<dyn Any + Send + Sync>,
}

impl TraitsInstance {
    pub fn new<T: Any + Send + Sync>(traits_type: TraitsType, traits: T) -> Self {
        TraitsInstance {
            traits_type,
            object: Arc::new(traits),
        }
    }

    pub fn traits_type(&self) -> &TraitsType {
        &self.traits_type
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }
}

impl fmt::Debug for TraitsInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TraitsInstance({})", self.traits_type)
    }
}

/// One concrete registration of a service.
pub struct ComponentDescriptor {
    component_id: String,
    service: Arc<ServiceDescriptor>,
    factory: ComponentFactory,
    traits: Option<TraitsInstance>,
    instance: OnceLock<ComponentInstance>,
}

impl ComponentDescriptor {
    pub fn new<F>(component_id: impl Into<String>, service: Arc<ServiceDescriptor>, factory: F) -> Self
    where
        F: Fn() -> Result<ComponentInstance, Box<dyn Error + Send + Sync>> + Send + Sync + 'static,
    {
        Self::from_factory(component_id, service, Arc::new(factory))
    }

    pub fn from_factory(
        component_id: impl Into<String>,
        service: Arc<ServiceDescriptor>,
        factory: ComponentFactory,
    ) -> Self {
        ComponentDescriptor {
            component_id: component_id.into(),
            service,
            factory,
            traits: None,
            instance: OnceLock::new(),
        }
    }

    /// Descriptor for an already constructed instance.
    pub fn with_instance(
        component_id: impl Into<String>,
        service: Arc<ServiceDescriptor>,
        instance: ComponentInstance,
    ) -> Self {
        let instance = instance.ensure_implements(service.resolve_service_type());
        let stored = instance.clone();
        let descriptor = ComponentDescriptor::new(component_id, service, move || Ok(stored.clone()));
        let _ = descriptor.instance.set(instance);
        descriptor
    }

    pub fn set_traits(&mut self, traits: TraitsInstance) {
        self.traits = Some(traits);
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn service(&self) -> &Arc<ServiceDescriptor> {
        &self.service
    }

    /// Get the component instance, activating it on first call. Later calls
    /// return the same instance.
    pub fn resolve_component(&self) -> Result<ComponentInstance, LocatorError> {
        if let Some(instance) = self.instance.get() {
            return Ok(instance.clone());
        }
        let created = (self.factory)()
            .map_err(|e| LocatorError::Activation {
                component_id: self.component_id.clone(),
                message: e.to_string(),
            })?
            .ensure_implements(self.service.resolve_service_type());
        tracing::debug!(component = %self.component_id, "activated component");
        // A concurrent activation may have won; keep whichever was stored first.
        Ok(self.instance.get_or_init(|| created).clone())
    }

    pub fn resolve_traits(&self) -> Option<&TraitsInstance> {
        self.traits.as_ref()
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("component_id", &self.component_id)
            .field("service", &self.service)
            .field("activated", &self.instance.get().is_some())
            .finish()
    }
}
