use std::any::Any;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::runner::ds::handle::ComponentHandle;
use crate::runner::ds::resource::{DirectoryRef, FileRef, IconData, ImageData};
use crate::runner::ds::types::{ServiceType, Type};

/// A component instance produced by a service locator.
///
/// Equality is identity: two instances are equal only if they share the same
/// underlying object.
#[derive(Clone)]
pub struct ComponentInstance {
    type_name: Arc<str>,
    services: Arc<[ServiceType]>,
    object: Arc<dyn Any + Send + Sync>,
}

impl ComponentInstance {
    /// Wrap an object that implements no services.
    pub fn new<T: Any + Send + Sync>(type_name: impl AsRef<str>, object: T) -> Self {
        ComponentInstance {
            type_name: Arc::from(type_name.as_ref()),
            services: Arc::from(Vec::new()),
            object: Arc::new(object),
        }
    }

    /// Declare the services this instance implements.
    pub fn implementing<I>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = ServiceType>,
    {
        self.services = services.into_iter().collect::<Vec<_>>().into();
        self
    }

    /// Add `service` to the implemented services unless already present.
    pub(crate) fn ensure_implements(self, service: &ServiceType) -> Self {
        if self.implements(service) {
            return self;
        }
        let services: Vec<_> = self.services.iter().cloned().chain(Some(service.clone())).collect();
        self.implementing(services)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn services(&self) -> &[ServiceType] {
        &self.services
    }

    pub fn implements(&self, service: &ServiceType) -> bool {
        self.services.iter().any(|s| s == service)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl PartialEq for ComponentInstance {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentInstance({})", self.type_name)
    }
}

/// A value of an embedder-defined [`Type::Named`] type.
#[derive(Clone)]
pub struct CustomValue {
    type_name: Arc<str>,
    object: Arc<dyn Any + Send + Sync>,
}

impl CustomValue {
    pub fn new<T: Any + Send + Sync>(type_name: impl AsRef<str>, object: T) -> Self {
        CustomValue {
            type_name: Arc::from(type_name.as_ref()),
            object: Arc::new(object),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CustomValue({})", self.type_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub enum_name: String,
    pub variant: String,
    pub ordinal: usize,
}

/// A resolved dependency value.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Enum(EnumValue),
    Image(ImageData),
    Icon(IconData),
    File(FileRef),
    Directory(DirectoryRef),
    Component(ComponentInstance),
    Handle(ComponentHandle),
    Custom(CustomValue),
    Array { element_type: Type, items: Vec<Value> },
}

impl Value {
    /// Whether this value may be bound to a dependency of type `ty`.
    pub fn is_instance_of(&self, ty: &Type) -> bool {
        match (self, ty) {
            (Value::String(_), Type::String)
            | (Value::Bool(_), Type::Bool)
            | (Value::Char(_), Type::Char)
            | (Value::I8(_), Type::I8)
            | (Value::I16(_), Type::I16)
            | (Value::I32(_), Type::I32)
            | (Value::I64(_), Type::I64)
            | (Value::U8(_), Type::U8)
            | (Value::U16(_), Type::U16)
            | (Value::U32(_), Type::U32)
            | (Value::U64(_), Type::U64)
            | (Value::F32(_), Type::F32)
            | (Value::F64(_), Type::F64)
            | (Value::Image(_), Type::Image)
            | (Value::Icon(_), Type::Icon)
            | (Value::File(_), Type::File)
            | (Value::Directory(_), Type::Directory) => true,
            (Value::Enum(v), Type::Enum(e)) => {
                v.enum_name == e.name() && e.variants().get(v.ordinal) == Some(&v.variant)
            }
            (Value::Component(c), Type::Service(s)) => c.implements(s),
            (Value::Component(c), Type::Named(n)) => c.type_name() == n,
            (Value::Custom(c), Type::Named(n)) => c.type_name() == n,
            (Value::Handle(h), _) => h.is_instance_of(ty),
            (Value::Array { element_type, .. }, Type::Array(wanted)) => {
                element_type == wanted.as_ref()
                    || (**wanted == Type::UntypedHandle && element_type.is_component_handle())
            }
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Array { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&ComponentInstance> {
        match self {
            Value::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<&ComponentHandle> {
        match self {
            Value::Handle(h) => Some(h),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            // Bitwise so that a NaN read twice from configuration compares equal.
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Image(a), Value::Image(b)) => a == b,
            (Value::Icon(a), Value::Icon(b)) => a == b,
            (Value::File(a), Value::File(b)) => a == b,
            (Value::Directory(a), Value::Directory(b)) => a == b,
            (Value::Component(a), Value::Component(b)) => a == b,
            (Value::Handle(a), Value::Handle(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => a == b,
            (
                Value::Array {
                    element_type: ta,
                    items: a,
                },
                Value::Array {
                    element_type: tb,
                    items: b,
                },
            ) => ta == tb && a == b,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "'{}'", c),
            Value::I8(n) => write!(f, "{}", n),
            Value::I16(n) => write!(f, "{}", n),
            Value::I32(n) => write!(f, "{}", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::U8(n) => write!(f, "{}", n),
            Value::U16(n) => write!(f, "{}", n),
            Value::U32(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::F32(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::Enum(e) => write!(f, "{}::{}", e.enum_name, e.variant),
            Value::Image(i) => write!(f, "image({})", i.path().display()),
            Value::Icon(i) => write!(f, "icon({})", i.path().display()),
            Value::File(r) => write!(f, "file({})", r),
            Value::Directory(r) => write!(f, "directory({})", r),
            Value::Component(c) => write!(f, "component({})", c.type_name()),
            Value::Handle(h) => write!(f, "handle({})", h.id()),
            Value::Custom(c) => write!(f, "{}(..)", c.type_name()),
            Value::Array { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}
