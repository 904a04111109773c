//! Data structures shared by the resolver and its collaborators.

pub mod descriptor;
pub mod error;
pub mod handle;
pub mod operations;
pub mod resource;
pub mod types;
pub mod value;
