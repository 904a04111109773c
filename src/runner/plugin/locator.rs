//! Collaborator contracts consumed by the dependency resolver.
//!
//! The resolver never owns a registry. It only reads from a [`ServiceLocator`]
//! and a [`ResourceLocator`] supplied by the embedding system, so both must be
//! safe for concurrent reads if the resolver is shared between threads.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::runner::ds::error::LocatorError;
use crate::runner::ds::handle::ComponentHandle;
use crate::runner::ds::types::ServiceType;
use crate::runner::ds::value::ComponentInstance;

/// Read-only lookup of registered components.
pub trait ServiceLocator {
    /// Is at least one component registered for `service`?
    fn has_service(&self, service: &ServiceType) -> bool;

    /// The single component implementing `service`.
    fn resolve(&self, service: &ServiceType) -> Result<ComponentInstance, LocatorError>;

    /// Every component implementing `service`, in registration order.
    fn resolve_all(&self, service: &ServiceType) -> Result<Vec<ComponentInstance>, LocatorError>;

    /// A handle to the single component implementing `service`.
    fn resolve_handle(&self, service: &ServiceType) -> Result<ComponentHandle, LocatorError>;

    /// Handles to every component implementing `service`, in registration order.
    fn resolve_all_handles(&self, service: &ServiceType) -> Result<Vec<ComponentHandle>, LocatorError>;

    fn resolve_by_component_id(&self, component_id: &str) -> Result<ComponentInstance, LocatorError>;

    fn resolve_handle_by_component_id(&self, component_id: &str) -> Result<ComponentHandle, LocatorError>;
}

/// Maps relative resource names to absolute paths. No existence guarantee.
pub trait ResourceLocator {
    fn get_full_path(&self, relative_name: &str) -> PathBuf;
}

impl<T: ServiceLocator + ?Sized> ServiceLocator for &T {
    fn has_service(&self, service: &ServiceType) -> bool {
        (**self).has_service(service)
    }

    fn resolve(&self, service: &ServiceType) -> Result<ComponentInstance, LocatorError> {
        (**self).resolve(service)
    }

    fn resolve_all(&self, service: &ServiceType) -> Result<Vec<ComponentInstance>, LocatorError> {
        (**self).resolve_all(service)
    }

    fn resolve_handle(&self, service: &ServiceType) -> Result<ComponentHandle, LocatorError> {
        (**self).resolve_handle(service)
    }

    fn resolve_all_handles(&self, service: &ServiceType) -> Result<Vec<ComponentHandle>, LocatorError> {
        (**self).resolve_all_handles(service)
    }

    fn resolve_by_component_id(&self, component_id: &str) -> Result<ComponentInstance, LocatorError> {
        (**self).resolve_by_component_id(component_id)
    }

    fn resolve_handle_by_component_id(&self, component_id: &str) -> Result<ComponentHandle, LocatorError> {
        (**self).resolve_handle_by_component_id(component_id)
    }
}

impl<T: ServiceLocator + ?Sized> ServiceLocator for Arc<T> {
    fn has_service(&self, service: &ServiceType) -> bool {
        (**self).has_service(service)
    }

    fn resolve(&self, service: &ServiceType) -> Result<ComponentInstance, LocatorError> {
        (**self).resolve(service)
    }

    fn resolve_all(&self, service: &ServiceType) -> Result<Vec<ComponentInstance>, LocatorError> {
        (**self).resolve_all(service)
    }

    fn resolve_handle(&self, service: &ServiceType) -> Result<ComponentHandle, LocatorError> {
        (**self).resolve_handle(service)
    }

    fn resolve_all_handles(&self, service: &ServiceType) -> Result<Vec<ComponentHandle>, LocatorError> {
        (**self).resolve_all_handles(service)
    }

    fn resolve_by_component_id(&self, component_id: &str) -> Result<ComponentInstance, LocatorError> {
        (**self).resolve_by_component_id(component_id)
    }

    fn resolve_handle_by_component_id(&self, component_id: &str) -> Result<ComponentHandle, LocatorError> {
        (**self).resolve_handle_by_component_id(component_id)
    }
}

impl<T: ResourceLocator + ?Sized> ResourceLocator for &T {
    fn get_full_path(&self, relative_name: &str) -> PathBuf {
        (**self).get_full_path(relative_name)
    }
}

impl<T: ResourceLocator + ?Sized> ResourceLocator for Arc<T> {
    fn get_full_path(&self, relative_name: &str) -> PathBuf {
        (**self).get_full_path(relative_name)
    }
}

/// Resolves resource names against a base directory, typically the directory
/// a plugin was installed into. Absolute names are returned unchanged.
#[derive(Debug, Clone)]
pub struct DirectoryResourceLocator {
    base_directory: PathBuf,
}

impl DirectoryResourceLocator {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        DirectoryResourceLocator {
            base_directory: base_directory.into(),
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}

impl ResourceLocator for DirectoryResourceLocator {
    fn get_full_path(&self, relative_name: &str) -> PathBuf {
        let path = Path::new(relative_name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_directory.join(path)
        }
    }
}
