//! String-to-value conversion for literal configuration values.
//!
//! The resolver handles enums, resources and arrays itself. Every other type
//! is converted through a [`ConverterTable`], which the embedding system may
//! extend with its own [`Type::Named`] types.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::runner::ds::types::Type;
use crate::runner::ds::value::Value;

/// Converts one literal to a value. The error is a human readable reason.
pub type ConvertFn = dyn Fn(&str) -> Result<Value, String> + Send + Sync;

lazy_static! {
    static ref DEFAULT_CONVERTERS: ConverterTable = ConverterTable::with_defaults();
}

/// Table of literal converters keyed by the requested type.
#[derive(Clone)]
pub struct ConverterTable {
    converters: HashMap<Type, Arc<ConvertFn>>,
}

impl ConverterTable {
    /// A table with no converters at all, not even for strings.
    pub fn empty() -> Self {
        ConverterTable {
            converters: HashMap::new(),
        }
    }

    /// The default set: strings, booleans, chars, and every integer and float
    /// width.
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        table.register(Type::String, |s| Ok(Value::String(s.to_string())));
        table.register(Type::Bool, parse_bool);
        table.register(Type::Char, parse_char);
        table.register(Type::I8, |s| parse_number(s).map(Value::I8));
        table.register(Type::I16, |s| parse_number(s).map(Value::I16));
        table.register(Type::I32, |s| parse_number(s).map(Value::I32));
        table.register(Type::I64, |s| parse_number(s).map(Value::I64));
        table.register(Type::U8, |s| parse_number(s).map(Value::U8));
        table.register(Type::U16, |s| parse_number(s).map(Value::U16));
        table.register(Type::U32, |s| parse_number(s).map(Value::U32));
        table.register(Type::U64, |s| parse_number(s).map(Value::U64));
        table.register(Type::F32, |s| parse_number(s).map(Value::F32));
        table.register(Type::F64, |s| parse_number(s).map(Value::F64));
        table
    }

    /// Register or replace the converter for `ty`.
    pub fn register<F>(&mut self, ty: Type, convert: F) -> &mut Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.converters.insert(ty, Arc::new(convert));
        self
    }

    pub fn remove(&mut self, ty: &Type) -> bool {
        self.converters.remove(ty).is_some()
    }

    pub fn supports(&self, ty: &Type) -> bool {
        self.converters.contains_key(ty)
    }

    /// Convert `literal` to `ty`. Returns `None` when no converter is
    /// registered for the type.
    pub fn convert(&self, ty: &Type, literal: &str) -> Option<Result<Value, String>> {
        self.converters.get(ty).map(|f| f(literal))
    }
}

impl Default for ConverterTable {
    fn default() -> Self {
        DEFAULT_CONVERTERS.clone()
    }
}

impl fmt::Debug for ConverterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<String> = self.converters.keys().map(|t| t.to_string()).collect();
        types.sort();
        f.debug_struct("ConverterTable").field("types", &types).finish()
    }
}

fn parse_number<T>(literal: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    literal.trim().parse::<T>().map_err(|e| e.to_string())
}

fn parse_bool(literal: &str) -> Result<Value, String> {
    let trimmed = literal.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(Value::Bool(true))
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(Value::Bool(false))
    } else {
        Err("expected 'true' or 'false'".to_string())
    }
}

fn parse_char(literal: &str) -> Result<Value, String> {
    let mut chars = literal.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Char(c)),
        _ => Err("expected exactly one character".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(ty: Type, literal: &str) -> Result<Value, String> {
        ConverterTable::default().convert(&ty, literal).unwrap()
    }

    #[test]
    fn test_integer_conversion() {
        assert_eq!(convert(Type::I32, "42"), Ok(Value::I32(42)));
        assert_eq!(convert(Type::I64, " -7 "), Ok(Value::I64(-7)));
        assert!(convert(Type::U8, "256").is_err());
        assert!(convert(Type::I32, "4x").is_err());
    }

    #[test]
    fn test_float_conversion_is_culture_invariant() {
        assert_eq!(convert(Type::F64, "1.5"), Ok(Value::F64(1.5)));
        assert!(convert(Type::F64, "1,5").is_err());
    }

    #[test]
    fn test_bool_conversion_ignores_case() {
        assert_eq!(convert(Type::Bool, "TRUE"), Ok(Value::Bool(true)));
        assert_eq!(convert(Type::Bool, "False"), Ok(Value::Bool(false)));
        assert!(convert(Type::Bool, "yes").is_err());
    }

    #[test]
    fn test_string_passes_through_unchanged() {
        assert_eq!(convert(Type::String, "  a b "), Ok(Value::String("  a b ".to_string())));
    }

    #[test]
    fn test_char_conversion() {
        assert_eq!(convert(Type::Char, "é"), Ok(Value::Char('é')));
        assert!(convert(Type::Char, "ab").is_err());
        assert!(convert(Type::Char, "").is_err());
    }

    #[test]
    fn test_custom_converter() {
        let mut table = ConverterTable::empty();
        table.register(Type::Named("Percent".to_string()), |s| {
            s.trim_end_matches('%')
                .parse::<u8>()
                .map(Value::U8)
                .map_err(|e| e.to_string())
        });
        assert!(!table.supports(&Type::String));
        assert_eq!(
            table.convert(&Type::Named("Percent".to_string()), "40%"),
            Some(Ok(Value::U8(40)))
        );
        assert!(table.convert(&Type::String, "x").is_none());
    }
}
