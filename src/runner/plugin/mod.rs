//! Service location and dependency resolution.
//!
//! Components are registered in a [`ServiceRegistry`] under the service they
//! implement. When an activator constructs a component it asks an
//! [`ObjectDependencyResolver`] for each declared parameter:
//!
//! ```text
//! configuration value        resolution
//! -------------------        ----------
//! (absent)                   located through the ServiceLocator
//! ${component.id}            fetched by id, checked against the parameter type
//! a;b;c                      split and resolved element by element (arrays)
//! literal                    enum name, resource path, or converter table
//! ```
//!
//! ## Example
//!
//! ```
//! use kitbind::runner::ds::types::{ServiceType, TraitsType, Type};
//! use kitbind::runner::ds::value::{ComponentInstance, Value};
//! use kitbind::runner::plugin::{
//!     ComponentRegistration, DefaultObjectDependencyResolver, DirectoryResourceLocator,
//!     ObjectDependencyResolver, ServiceRegistry,
//! };
//!
//! let mut registry = ServiceRegistry::new();
//! registry
//!     .register_service(ServiceType::new("IFormatter"), TraitsType::new("FormatterTraits"))
//!     .unwrap();
//! registry
//!     .register_component(
//!         ComponentRegistration::instance(
//!             ServiceType::new("IFormatter"),
//!             ComponentInstance::new("XmlFormatter", ()),
//!         )
//!         .with_id("formatter.xml"),
//!     )
//!     .unwrap();
//!
//! let resolver = DefaultObjectDependencyResolver::new(&registry, DirectoryResourceLocator::new("."));
//!
//! let formatter = resolver
//!     .resolve_dependency("formatter", &Type::service("IFormatter"), None)
//!     .unwrap();
//! assert!(formatter.is_satisfied());
//!
//! let retries = resolver
//!     .resolve_dependency("retries", &Type::I32, Some("3"))
//!     .unwrap();
//! assert_eq!(retries.into_value(), Some(Value::I32(3)));
//! ```

pub mod default_resolver;
pub mod locator;
pub mod registry;
pub mod resolver;
pub mod types;

pub use default_resolver::DefaultObjectDependencyResolver;
pub use locator::{DirectoryResourceLocator, ResourceLocator, ServiceLocator};
pub use registry::ServiceRegistry;
pub use resolver::{DependencyResult, ObjectDependencyResolver};
pub use types::{ComponentRegistration, ComponentSource, ServiceInfo};
