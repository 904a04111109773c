//! In-memory service registry.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::locator::ServiceLocator;
use super::types::{ComponentRegistration, ComponentSource, ServiceInfo};
use crate::runner::ds::descriptor::{ComponentDescriptor, ServiceDescriptor};
use crate::runner::ds::error::LocatorError;
use crate::runner::ds::handle::ComponentHandle;
use crate::runner::ds::types::{ServiceType, TraitsType};
use crate::runner::ds::value::ComponentInstance;

/// Registry for services and the components implementing them.
///
/// Components are enumerated in registration order. Once built the registry is
/// only read, so it can be shared between threads behind an `Arc`.
pub struct ServiceRegistry {
    /// All registered services.
    services: HashMap<ServiceType, Arc<ServiceDescriptor>>,

    /// Components in registration order.
    components: Vec<Arc<ComponentDescriptor>>,

    /// Component id -> index into `components`.
    by_id: HashMap<String, usize>,
}

impl ServiceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ServiceRegistry {
            services: HashMap::new(),
            components: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Register a service contract and its traits type.
    pub fn register_service(
        &mut self,
        service_type: ServiceType,
        traits_type: TraitsType,
    ) -> Result<Arc<ServiceDescriptor>, LocatorError> {
        if self.services.contains_key(&service_type) {
            return Err(LocatorError::DuplicateService(service_type));
        }
        tracing::debug!(service = %service_type, traits = %traits_type, "registered service");
        let descriptor = Arc::new(ServiceDescriptor::new(service_type.clone(), traits_type));
        self.services.insert(service_type, descriptor.clone());
        Ok(descriptor)
    }

    /// Register a component of an already registered service.
    pub fn register_component(
        &mut self,
        registration: ComponentRegistration,
    ) -> Result<Arc<ComponentDescriptor>, LocatorError> {
        let service = self
            .services
            .get(&registration.service)
            .cloned()
            .ok_or_else(|| LocatorError::UnknownService(registration.service.clone()))?;

        let component_id = registration
            .component_id
            .unwrap_or_else(|| Uuid::new_v4().to_hyphenated().to_string());
        if self.by_id.contains_key(&component_id) {
            return Err(LocatorError::DuplicateComponentId(component_id));
        }

        let mut descriptor = match registration.source {
            ComponentSource::Instance(instance) => {
                ComponentDescriptor::with_instance(component_id.clone(), service, instance)
            }
            ComponentSource::Factory(factory) => {
                ComponentDescriptor::from_factory(component_id.clone(), service, factory)
            }
        };
        if let Some(traits) = registration.traits {
            descriptor.set_traits(traits);
        }

        tracing::debug!(component = %component_id, service = %registration.service, "registered component");
        let descriptor = Arc::new(descriptor);
        self.by_id.insert(component_id, self.components.len());
        self.components.push(descriptor.clone());
        Ok(descriptor)
    }

    pub fn service_descriptor(&self, service: &ServiceType) -> Option<&Arc<ServiceDescriptor>> {
        self.services.get(service)
    }

    pub fn component_descriptor(&self, component_id: &str) -> Option<&Arc<ComponentDescriptor>> {
        self.by_id.get(component_id).map(|&i| &self.components[i])
    }

    /// Components of `service` in registration order.
    fn components_of<'a>(
        &'a self,
        service: &ServiceType,
    ) -> impl Iterator<Item = &'a Arc<ComponentDescriptor>> + 'a {
        let service = service.clone();
        self.components
            .iter()
            .filter(move |c| c.service().resolve_service_type() == &service)
    }

    /// The only component of `service`, or an error when there is none or
    /// more than one.
    fn single_component(&self, service: &ServiceType) -> Result<&Arc<ComponentDescriptor>, LocatorError> {
        let mut matches = self.components_of(service);
        match (matches.next(), matches.next()) {
            (Some(only), None) => Ok(only),
            (None, _) => Err(LocatorError::ServiceNotFound(service.clone())),
            (Some(_), Some(_)) => Err(LocatorError::AmbiguousService {
                service: service.clone(),
                count: self.components_of(service).count(),
            }),
        }
    }

    fn component_by_id(&self, component_id: &str) -> Result<&Arc<ComponentDescriptor>, LocatorError> {
        self.component_descriptor(component_id)
            .ok_or_else(|| LocatorError::ComponentNotFound(component_id.to_string()))
    }

    /// Get list of all registered services with their component ids.
    pub fn services(&self) -> Vec<ServiceInfo> {
        let mut infos: Vec<ServiceInfo> = self
            .services
            .keys()
            .map(|service| ServiceInfo {
                service: service.clone(),
                component_ids: self
                    .components_of(service)
                    .map(|c| c.component_id().to_string())
                    .collect(),
            })
            .collect();
        infos.sort_by(|a, b| a.service.cmp(&b.service));
        infos
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceLocator for ServiceRegistry {
    fn has_service(&self, service: &ServiceType) -> bool {
        self.components_of(service).next().is_some()
    }

    fn resolve(&self, service: &ServiceType) -> Result<ComponentInstance, LocatorError> {
        self.single_component(service)?.resolve_component()
    }

    fn resolve_all(&self, service: &ServiceType) -> Result<Vec<ComponentInstance>, LocatorError> {
        self.components_of(service).map(|c| c.resolve_component()).collect()
    }

    fn resolve_handle(&self, service: &ServiceType) -> Result<ComponentHandle, LocatorError> {
        self.single_component(service)
            .map(|c| ComponentHandle::new(c.clone()))
    }

    fn resolve_all_handles(&self, service: &ServiceType) -> Result<Vec<ComponentHandle>, LocatorError> {
        Ok(self
            .components_of(service)
            .map(|c| ComponentHandle::new(c.clone()))
            .collect())
    }

    fn resolve_by_component_id(&self, component_id: &str) -> Result<ComponentInstance, LocatorError> {
        self.component_by_id(component_id)?.resolve_component()
    }

    fn resolve_handle_by_component_id(&self, component_id: &str) -> Result<ComponentHandle, LocatorError> {
        self.component_by_id(component_id)
            .map(|c| ComponentHandle::new(c.clone()))
    }
}
