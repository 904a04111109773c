//! Runtime side of dependency resolution: the data model and the plugin layer
//! that locates and activates components.

pub mod ds;
pub mod plugin;
