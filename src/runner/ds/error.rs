use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::runner::ds::types::{ServiceType, Type};

/// Failure of a single dependency resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The call itself was malformed.
    #[error("Argument '{0}' must not be absent.")]
    InvalidArgument(&'static str),

    /// The configuration supplied for the dependency cannot be honoured.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A locator lookup failed. Passed through unchanged.
    #[error(transparent)]
    Locator(#[from] LocatorError),
}

impl ResolveError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, ResolveError::Configuration(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ResolveError::InvalidArgument(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Could not detect service type from non-generic component handle.")]
    UntypedHandle,

    #[error("Could not inject component with id '{component_id}' into a dependency of type '{requested}' because it is of the wrong type even though the component was explicitly specified using the '${{component.id}}' property value syntax.")]
    ComponentTypeMismatch {
        component_id: String,
        requested: Type,
    },

    #[error("Could not inject component '{component_id}' into a dependency of type '{requested}' because it is of the wrong type.")]
    ServiceTypeMismatch {
        component_id: String,
        requested: Type,
    },

    #[error("Could not parse '{literal}' as a value of enum type '{enum_name}'.")]
    InvalidEnumLiteral { literal: String, enum_name: String },

    #[error("Could not convert '{literal}' to a value of type '{requested}': {reason}")]
    InvalidLiteral {
        literal: String,
        requested: Type,
        reason: String,
    },

    #[error("Could not convert '{literal}' to a value of type '{requested}' because the type is not supported.")]
    UnsupportedType { literal: String, requested: Type },

    #[error("The converter for type '{requested}' produced a value of the wrong type.")]
    ConverterTypeMismatch { requested: Type },

    #[error("Could not load {kind} resource '{name}'.")]
    Resource {
        kind: &'static str,
        name: String,
        #[source]
        source: ResourceError,
    },

    #[error("Malformed configuration value '{value}'.")]
    Grammar {
        value: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Failure reported by a service locator.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("There are no components registered that implement service '{0}'.")]
    ServiceNotFound(ServiceType),

    #[error("There are {count} components registered that implement service '{service}' but exactly one was expected.")]
    AmbiguousService { service: ServiceType, count: usize },

    #[error("There is no component registered with id '{0}'.")]
    ComponentNotFound(String),

    #[error("A component with id '{0}' has already been registered.")]
    DuplicateComponentId(String),

    #[error("Service '{0}' has already been registered.")]
    DuplicateService(ServiceType),

    #[error("Service '{0}' has not been registered.")]
    UnknownService(ServiceType),

    #[error("Component '{component_id}' could not be activated: {message}")]
    Activation {
        component_id: String,
        message: String,
    },
}

/// Failure loading resource data from disk.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("could not read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' does not contain a recognized image format", .path.display())]
    UnrecognizedImage { path: PathBuf },

    #[error("'{}' is not a valid icon file: {reason}", .path.display())]
    InvalidIcon { path: PathBuf, reason: &'static str },
}
