use std::fmt;

use thiserror::Error;

use super::api::Rule;

/// A raw configuration value after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// `${component.id}`: pins the exact component to inject.
    Reference(String),
    /// Anything else, converted according to the parameter type.
    Literal(String),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Reference(id) => write!(f, "${{{}}}", id),
            ConfigValue::Literal(s) => f.write_str(s),
        }
    }
}

/// A type expression that could not be parsed.
#[derive(Debug, Error)]
#[error("Invalid type expression '{source_text}'.")]
pub struct TypeExprError {
    source_text: String,
    #[source]
    cause: pest::error::Error<Rule>,
}

impl TypeExprError {
    pub(crate) fn new(source_text: &str, cause: pest::error::Error<Rule>) -> Self {
        TypeExprError {
            source_text: source_text.to_string(),
            cause,
        }
    }

    /// The position of the failure, as `(line, column)`.
    pub fn line_col(&self) -> (usize, usize) {
        match self.cause.line_col {
            pest::error::LineColLocation::Pos(pos) => pos,
            pest::error::LineColLocation::Span(start, _) => start,
        }
    }
}
