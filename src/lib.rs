//! # kitbind - dependency resolution for component runtimes
//!
//! Resolves the constructor and property dependencies of plugin components:
//! - Service location of single components, handles, and whole collections
//! - Explicit `${component.id}` references with type checking
//! - Literal configuration values for primitives, enums, arrays and resources
//! - An extensible converter table for embedder-defined types
//!
//! ## Quick Start
//!
//! ### Parsing configuration values
//!
//! ```
//! use kitbind::parser::{ConfigParser, ConfigValue};
//!
//! assert_eq!(
//!     ConfigParser::parse_config_value("${runner.nunit}"),
//!     ConfigValue::Reference("runner.nunit".to_string())
//! );
//! assert_eq!(
//!     ConfigParser::split_list("abc;def;ghi").unwrap(),
//!     vec!["abc", "def", "ghi"]
//! );
//! ```
//!
//! ### Resolving dependencies
//!
//! ```
//! use kitbind::parser::ConfigParser;
//! use kitbind::runner::ds::value::Value;
//! use kitbind::runner::plugin::{
//!     DefaultObjectDependencyResolver, DirectoryResourceLocator, ObjectDependencyResolver,
//!     ServiceRegistry,
//! };
//!
//! let registry = ServiceRegistry::new();
//! let resolver = DefaultObjectDependencyResolver::new(&registry, DirectoryResourceLocator::new("."));
//!
//! let ty = ConfigParser::parse_type("string[]").unwrap();
//! let result = resolver.resolve_dependency("names", &ty, Some("abc;def")).unwrap();
//! let items = result.value().and_then(Value::as_items).unwrap();
//! assert_eq!(items, &[Value::String("abc".into()), Value::String("def".into())][..]);
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - PEG grammar for configuration values and type expressions
//! - **[`runner`]** - Resolution runtime
//!   - **[`runner::ds`]** - Data structures (types, values, descriptors, resources)
//!   - **[`runner::plugin`]** - Locators, the service registry and the resolver

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
