//! Runtime type descriptors for dependency parameters.
//!
//! Components declare the static type of each constructor/property parameter
//! as a [`Type`]. The resolver branches on it instead of inspecting type
//! metadata through reflection.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A contract type that one or more components may implement.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceType(Arc<str>);

impl ServiceType {
    pub fn new(name: impl AsRef<str>) -> Self {
        ServiceType(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ServiceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceType({})", self.0)
    }
}

/// The companion type describing a service's static metadata.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraitsType(Arc<str>);

impl TraitsType {
    pub fn new(name: impl AsRef<str>) -> Self {
        TraitsType(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for TraitsType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TraitsType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "TraitsType({})", self.0)
    }
}

/// An enumeration with named variants. The ordinal of a variant is its
/// position in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumType {
    name: String,
    variants: Vec<String>,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        EnumType {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    /// Add a variant.
    pub fn variant(mut self, name: impl Into<String>) -> Self {
        self.variants.push(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Look up a variant by name, ignoring case. Returns the ordinal and the
    /// declared spelling.
    pub fn find_variant(&self, name: &str) -> Option<(usize, &str)> {
        let wanted = name.to_lowercase();
        self.variants
            .iter()
            .enumerate()
            .find(|(_, v)| v.to_lowercase() == wanted)
            .map(|(i, v)| (i, v.as_str()))
    }
}

/// The static type of a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    String,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Enum(EnumType),
    /// Image loaded from a resource.
    Image,
    /// Icon loaded from a resource.
    Icon,
    /// Reference to a file resolved through the resource locator.
    File,
    /// Reference to a directory resolved through the resource locator.
    Directory,
    /// A service contract, satisfied by a registered component instance.
    Service(ServiceType),
    /// `ComponentHandle<Service, Traits>`.
    Handle(ServiceType, TraitsType),
    /// The non-generic `ComponentHandle`. Carries no service type.
    UntypedHandle,
    /// A value type defined by the embedding system, converted from
    /// configuration strings through the converter table.
    Named(String),
    Array(Box<Type>),
}

impl Type {
    pub fn array_of(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    pub fn service(name: impl AsRef<str>) -> Self {
        Type::Service(ServiceType::new(name))
    }

    pub fn handle(service: impl AsRef<str>, traits: impl AsRef<str>) -> Self {
        Type::Handle(ServiceType::new(service), TraitsType::new(traits))
    }

    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this is either form of component handle.
    pub fn is_component_handle(&self) -> bool {
        matches!(self, Type::Handle(..) | Type::UntypedHandle)
    }

    /// The service a locator would be asked about when this type is requested
    /// without a configuration value. `None` for types that can never be
    /// registered as services.
    pub fn as_service(&self) -> Option<&ServiceType> {
        match self {
            Type::Service(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Type::String => f.write_str("string"),
            Type::Bool => f.write_str("bool"),
            Type::Char => f.write_str("char"),
            Type::I8 => f.write_str("i8"),
            Type::I16 => f.write_str("i16"),
            Type::I32 => f.write_str("i32"),
            Type::I64 => f.write_str("i64"),
            Type::U8 => f.write_str("u8"),
            Type::U16 => f.write_str("u16"),
            Type::U32 => f.write_str("u32"),
            Type::U64 => f.write_str("u64"),
            Type::F32 => f.write_str("f32"),
            Type::F64 => f.write_str("f64"),
            Type::Enum(e) => f.write_str(e.name()),
            Type::Image => f.write_str("image"),
            Type::Icon => f.write_str("icon"),
            Type::File => f.write_str("file"),
            Type::Directory => f.write_str("directory"),
            Type::Service(s) => write!(f, "{}", s),
            Type::Handle(s, t) => write!(f, "ComponentHandle<{}, {}>", s, t),
            Type::UntypedHandle => f.write_str("ComponentHandle"),
            Type::Named(n) => f.write_str(n),
            Type::Array(e) => write!(f, "{}[]", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested_arrays() {
        let t = Type::array_of(Type::array_of(Type::handle("IRunner", "RunnerTraits")));
        assert_eq!(t.to_string(), "ComponentHandle<IRunner, RunnerTraits>[][]");
    }

    #[test]
    fn test_enum_lookup_ignores_case() {
        let e = EnumType::new("YesNo").variant("Yes").variant("No");
        assert_eq!(e.find_variant("nO"), Some((1, "No")));
        assert_eq!(e.find_variant("maybe"), None);
    }

    #[test]
    fn test_only_services_are_locatable() {
        assert!(Type::service("IRunner").as_service().is_some());
        assert!(Type::handle("IRunner", "T").as_service().is_none());
        assert!(Type::I32.as_service().is_none());
    }
}
