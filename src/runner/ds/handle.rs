//! Component handles: late-bound access to a component and its traits.

use std::fmt;
use std::sync::Arc;

use crate::runner::ds::descriptor::{ComponentDescriptor, TraitsInstance};
use crate::runner::ds::error::LocatorError;
use crate::runner::ds::types::{ServiceType, TraitsType, Type};
use crate::runner::ds::value::ComponentInstance;

/// A capability wrapper binding a resolved component to its descriptor.
///
/// The component is only activated when [`get_component`](Self::get_component)
/// is called, so holding a handle is cheap even for components that are never
/// used.
#[derive(Clone)]
pub struct ComponentHandle {
    descriptor: Arc<ComponentDescriptor>,
}

impl ComponentHandle {
    pub fn new(descriptor: Arc<ComponentDescriptor>) -> Self {
        ComponentHandle { descriptor }
    }

    pub fn descriptor(&self) -> &Arc<ComponentDescriptor> {
        &self.descriptor
    }

    pub fn id(&self) -> &str {
        self.descriptor.component_id()
    }

    pub fn service_type(&self) -> &ServiceType {
        self.descriptor.service().resolve_service_type()
    }

    pub fn traits_type(&self) -> &TraitsType {
        self.descriptor.service().resolve_traits_type()
    }

    pub fn get_component(&self) -> Result<ComponentInstance, LocatorError> {
        self.descriptor.resolve_component()
    }

    pub fn get_traits(&self) -> Option<&TraitsInstance> {
        self.descriptor.resolve_traits()
    }

    /// Whether this handle can stand in for a value of type `ty`. Every handle
    /// is an untyped handle; it is a `ComponentHandle<S, T>` only when its
    /// service is `S` and that service's traits are `T`.
    pub fn is_instance_of(&self, ty: &Type) -> bool {
        match ty {
            Type::UntypedHandle => true,
            Type::Handle(service, traits) => {
                self.service_type() == service && self.traits_type() == traits
            }
            _ => false,
        }
    }
}

impl PartialEq for ComponentHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.descriptor, &other.descriptor)
    }
}

impl fmt::Debug for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ComponentHandle<{}, {}>({})",
            self.service_type(),
            self.traits_type(),
            self.id()
        )
    }
}
