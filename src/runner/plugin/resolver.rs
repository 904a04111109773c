//! Dependency resolver trait used by component activation.
//!
//! An activator enumerates the declared parameters of a component it is about
//! to construct and asks an [`ObjectDependencyResolver`] for each one. The
//! activator decides what an unsatisfied dependency means (abort, or leave an
//! optional property unset); errors always abort.

use crate::runner::ds::error::ResolveError;
use crate::runner::ds::types::Type;
use crate::runner::ds::value::Value;

/// Outcome of resolving one dependency.
#[derive(Debug, Clone, PartialEq)]
pub enum DependencyResult {
    /// The value is an instance of the requested parameter type.
    Satisfied(Value),
    /// No configuration value was given and nothing suitable is registered.
    Unsatisfied,
}

impl DependencyResult {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, DependencyResult::Satisfied(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            DependencyResult::Satisfied(v) => Some(v),
            DependencyResult::Unsatisfied => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            DependencyResult::Satisfied(v) => Some(v),
            DependencyResult::Unsatisfied => None,
        }
    }
}

/// Resolves the value of a single component dependency.
pub trait ObjectDependencyResolver {
    /// Resolve the dependency called `parameter_name` of type
    /// `parameter_type`.
    ///
    /// `configuration_argument` is the raw configuration string for the
    /// parameter, or `None` when the configuration does not mention it.
    fn resolve_dependency(
        &self,
        parameter_name: &str,
        parameter_type: &Type,
        configuration_argument: Option<&str>,
    ) -> Result<DependencyResult, ResolveError>;
}
