//! Grammar for configuration values and type expressions.

mod api;
pub mod ast;

pub use api::{ConfigParser, Rule};
pub use ast::{ConfigValue, TypeExprError};
