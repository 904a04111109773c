//! The default dependency resolver.
//!
//! A dependency is resolved in one of three ways:
//!
//! * no configuration value: the dependency is located through the
//!   [`ServiceLocator`] (a single component, a handle, or every component of a
//!   service for array types),
//! * a `${component.id}` reference: the named component is fetched by id and
//!   must be an instance of the parameter type,
//! * any other literal: the literal is parsed into a value of the parameter
//!   type (arrays split on `;`, enums by variant name, resources through the
//!   [`ResourceLocator`], everything else through the [`ConverterTable`]).

use crate::parser::{ConfigParser, ConfigValue};
use crate::runner::ds::error::{ConfigurationError, ResolveError, ResourceError};
use crate::runner::ds::operations::type_conversion::ConverterTable;
use crate::runner::ds::resource::{DirectoryRef, FileRef, IconData, ImageData};
use crate::runner::ds::types::{EnumType, ServiceType, TraitsType, Type};
use crate::runner::ds::value::{EnumValue, Value};
use crate::runner::plugin::locator::{ResourceLocator, ServiceLocator};
use crate::runner::plugin::resolver::{DependencyResult, ObjectDependencyResolver};

/// What a single value of the dependency looks like.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Target<'t> {
    Plain(&'t Type),
    HandleOf(&'t ServiceType, &'t TraitsType),
    UntypedHandle,
}

impl<'t> Target<'t> {
    fn of(ty: &'t Type) -> Self {
        match ty {
            Type::Handle(service, traits) => Target::HandleOf(service, traits),
            Type::UntypedHandle => Target::UntypedHandle,
            other => Target::Plain(other),
        }
    }

    fn is_handle(&self) -> bool {
        !matches!(self, Target::Plain(_))
    }
}

/// Dependency type split into single value vs. collection, computed once per
/// call.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DependencyShape<'t> {
    Scalar(Target<'t>),
    /// Element type and its target.
    Collection(&'t Type, Target<'t>),
}

impl<'t> DependencyShape<'t> {
    fn of(ty: &'t Type) -> Self {
        match ty.element_type() {
            Some(element) => DependencyShape::Collection(element, Target::of(element)),
            None => DependencyShape::Scalar(Target::of(ty)),
        }
    }
}

/// Resolves dependencies against a service locator and a resource locator.
///
/// The resolver keeps no state between calls, so it is `Send + Sync` whenever
/// its locators are and may be shared by concurrent activations.
pub struct DefaultObjectDependencyResolver<S, R> {
    service_locator: S,
    resource_locator: R,
    converters: ConverterTable,
}

impl<S: ServiceLocator, R: ResourceLocator> DefaultObjectDependencyResolver<S, R> {
    /// Create a resolver using the default converter table.
    pub fn new(service_locator: S, resource_locator: R) -> Self {
        DefaultObjectDependencyResolver {
            service_locator,
            resource_locator,
            converters: ConverterTable::default(),
        }
    }

    /// Replace the converter table used for plain literals.
    pub fn with_converters(mut self, converters: ConverterTable) -> Self {
        self.converters = converters;
        self
    }

    pub fn service_locator(&self) -> &S {
        &self.service_locator
    }

    pub fn resource_locator(&self) -> &R {
        &self.resource_locator
    }

    pub fn converters(&self) -> &ConverterTable {
        &self.converters
    }

    /// Resolve a dependency that has no configuration value.
    fn resolve_located(&self, ty: &Type) -> Result<DependencyResult, ResolveError> {
        let locator = &self.service_locator;
        match DependencyShape::of(ty) {
            DependencyShape::Scalar(Target::UntypedHandle)
            | DependencyShape::Collection(_, Target::UntypedHandle) => {
                Err(ConfigurationError::UntypedHandle.into())
            }

            DependencyShape::Collection(element, Target::HandleOf(service, _)) => {
                if !locator.has_service(service) {
                    tracing::trace!(service = %service, "no components registered");
                    return Ok(DependencyResult::Unsatisfied);
                }
                let items = locator
                    .resolve_all_handles(service)?
                    .into_iter()
                    .map(|handle| checked_handle(Value::Handle(handle), element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DependencyResult::Satisfied(Value::Array {
                    element_type: element.clone(),
                    items,
                }))
            }

            DependencyShape::Collection(element, Target::Plain(_)) => {
                let service = match element.as_service() {
                    Some(service) if locator.has_service(service) => service,
                    _ => {
                        tracing::trace!(element = %element, "element type is not a registered service");
                        return Ok(DependencyResult::Unsatisfied);
                    }
                };
                let items = locator
                    .resolve_all(service)?
                    .into_iter()
                    .map(Value::Component)
                    .collect();
                Ok(DependencyResult::Satisfied(Value::Array {
                    element_type: element.clone(),
                    items,
                }))
            }

            DependencyShape::Scalar(Target::HandleOf(service, _)) => {
                if !locator.has_service(service) {
                    tracing::trace!(service = %service, "no components registered");
                    return Ok(DependencyResult::Unsatisfied);
                }
                let handle = Value::Handle(locator.resolve_handle(service)?);
                checked_handle(handle, ty).map(DependencyResult::Satisfied)
            }

            DependencyShape::Scalar(Target::Plain(_)) => match ty.as_service() {
                Some(service) if locator.has_service(service) => {
                    let component = locator.resolve(service)?;
                    Ok(DependencyResult::Satisfied(Value::Component(component)))
                }
                _ => {
                    tracing::trace!(ty = %ty, "type is not a registered service");
                    Ok(DependencyResult::Unsatisfied)
                }
            },
        }
    }

    /// Resolve a configuration value, either a reference or a literal. Array
    /// elements come back through here one token at a time.
    fn resolve_configured(&self, ty: &Type, raw: &str) -> Result<Value, ResolveError> {
        match ConfigParser::parse_config_value(raw) {
            ConfigValue::Reference(component_id) => self.resolve_reference(ty, &component_id),
            ConfigValue::Literal(literal) => self.convert_literal(ty, &literal),
        }
    }

    fn resolve_reference(&self, ty: &Type, component_id: &str) -> Result<Value, ResolveError> {
        tracing::trace!(component = component_id, ty = %ty, "resolving explicit component reference");
        let value = if Target::of(ty).is_handle() {
            Value::Handle(self.service_locator.resolve_handle_by_component_id(component_id)?)
        } else {
            Value::Component(self.service_locator.resolve_by_component_id(component_id)?)
        };

        if !value.is_instance_of(ty) {
            return Err(ConfigurationError::ComponentTypeMismatch {
                component_id: component_id.to_string(),
                requested: ty.clone(),
            }
            .into());
        }
        Ok(value)
    }

    fn convert_literal(&self, ty: &Type, literal: &str) -> Result<Value, ResolveError> {
        match ty {
            Type::Array(element) => {
                let tokens = ConfigParser::split_list(literal).map_err(|e| ConfigurationError::Grammar {
                    value: literal.to_string(),
                    source: Box::new(e),
                })?;
                tracing::trace!(count = tokens.len(), element = %element, "resolving array literal");
                let items = tokens
                    .iter()
                    .map(|token| self.resolve_configured(element, token))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array {
                    element_type: (**element).clone(),
                    items,
                })
            }
            Type::UntypedHandle => Err(ConfigurationError::UntypedHandle.into()),
            Type::Enum(enum_type) => Ok(parse_enum(enum_type, literal)?),
            Type::Image => {
                let path = self.resource_locator.get_full_path(literal);
                ImageData::load(&path)
                    .map(Value::Image)
                    .map_err(|source| resource_error("image", literal, source))
            }
            Type::Icon => {
                let path = self.resource_locator.get_full_path(literal);
                IconData::load(&path)
                    .map(Value::Icon)
                    .map_err(|source| resource_error("icon", literal, source))
            }
            Type::File => Ok(Value::File(FileRef::new(self.resource_locator.get_full_path(literal)))),
            Type::Directory => Ok(Value::Directory(DirectoryRef::new(
                self.resource_locator.get_full_path(literal),
            ))),
            _ => self.convert_with_table(ty, literal),
        }
    }

    fn convert_with_table(&self, ty: &Type, literal: &str) -> Result<Value, ResolveError> {
        let error = match self.converters.convert(ty, literal) {
            Some(Ok(value)) if value.is_instance_of(ty) => return Ok(value),
            Some(Ok(_)) => ConfigurationError::ConverterTypeMismatch { requested: ty.clone() },
            Some(Err(reason)) => ConfigurationError::InvalidLiteral {
                literal: literal.to_string(),
                requested: ty.clone(),
                reason,
            },
            None => ConfigurationError::UnsupportedType {
                literal: literal.to_string(),
                requested: ty.clone(),
            },
        };
        Err(error.into())
    }
}

impl<S: ServiceLocator, R: ResourceLocator> ObjectDependencyResolver for DefaultObjectDependencyResolver<S, R> {
    fn resolve_dependency(
        &self,
        parameter_name: &str,
        parameter_type: &Type,
        configuration_argument: Option<&str>,
    ) -> Result<DependencyResult, ResolveError> {
        if parameter_name.trim().is_empty() {
            return Err(ResolveError::InvalidArgument("parameter_name"));
        }

        let _span = tracing::debug_span!("resolve_dependency", parameter = parameter_name, ty = %parameter_type)
            .entered();
        let result = match configuration_argument {
            None => self.resolve_located(parameter_type),
            Some(raw) => self
                .resolve_configured(parameter_type, raw)
                .map(DependencyResult::Satisfied),
        };

        match &result {
            Ok(resolved) => tracing::debug!(satisfied = resolved.is_satisfied(), "dependency resolved"),
            Err(e) => tracing::debug!(error = %e, "dependency resolution failed"),
        }
        result
    }
}

/// Make sure a located handle matches the requested handle type.
fn checked_handle(value: Value, ty: &Type) -> Result<Value, ResolveError> {
    if value.is_instance_of(ty) {
        return Ok(value);
    }
    let component_id = value.as_handle().map(|h| h.id().to_string()).unwrap_or_default();
    Err(ConfigurationError::ServiceTypeMismatch {
        component_id,
        requested: ty.clone(),
    }
    .into())
}

/// Case-insensitive variant name, or the decimal ordinal of a declared variant.
fn parse_enum(enum_type: &EnumType, literal: &str) -> Result<Value, ConfigurationError> {
    let text = literal.trim();
    let found = enum_type.find_variant(text).or_else(|| {
        text.parse::<usize>()
            .ok()
            .and_then(|ordinal| enum_type.variants().get(ordinal).map(|v| (ordinal, v.as_str())))
    });

    match found {
        Some((ordinal, variant)) => Ok(Value::Enum(EnumValue {
            enum_name: enum_type.name().to_string(),
            variant: variant.to_string(),
            ordinal,
        })),
        None => Err(ConfigurationError::InvalidEnumLiteral {
            literal: literal.to_string(),
            enum_name: enum_type.name().to_string(),
        }),
    }
}

fn resource_error(kind: &'static str, name: &str, source: ResourceError) -> ResolveError {
    ConfigurationError::Resource {
        kind,
        name: name.to_string(),
        source,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_of_scalars() {
        assert_eq!(DependencyShape::of(&Type::I32), DependencyShape::Scalar(Target::Plain(&Type::I32)));
        assert_eq!(
            DependencyShape::of(&Type::UntypedHandle),
            DependencyShape::Scalar(Target::UntypedHandle)
        );
        let handle = Type::handle("IRunner", "RunnerTraits");
        assert_eq!(
            DependencyShape::of(&handle),
            DependencyShape::Scalar(Target::HandleOf(
                &ServiceType::new("IRunner"),
                &TraitsType::new("RunnerTraits")
            ))
        );
    }

    #[test]
    fn test_shape_of_arrays() {
        let ty = Type::array_of(Type::service("IRunner"));
        let element = Type::service("IRunner");
        assert_eq!(
            DependencyShape::of(&ty),
            DependencyShape::Collection(&element, Target::Plain(&element))
        );

        let ty = Type::array_of(Type::UntypedHandle);
        assert_eq!(
            DependencyShape::of(&ty),
            DependencyShape::Collection(&Type::UntypedHandle, Target::UntypedHandle)
        );
    }

    #[test]
    fn test_parse_enum_by_ordinal() {
        let answer = EnumType::new("Answer").variant("Yes").variant("No");
        assert_eq!(
            parse_enum(&answer, " 1 ").unwrap(),
            Value::Enum(EnumValue {
                enum_name: "Answer".to_string(),
                variant: "No".to_string(),
                ordinal: 1,
            })
        );
        assert!(matches!(
            parse_enum(&answer, "2"),
            Err(ConfigurationError::InvalidEnumLiteral { .. })
        ));
    }

    #[test]
    fn test_parse_enum_prefers_names() {
        let odd = EnumType::new("Odd").variant("Zero").variant("0");
        match parse_enum(&odd, "0").unwrap() {
            Value::Enum(v) => assert_eq!(v.ordinal, 1),
            other => panic!("unexpected {:?}", other),
        }
    }
}
