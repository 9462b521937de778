//! Configuration module
//!
//! YAML-backed configuration with compiled defaults: backend endpoint,
//! layout separation constants, hidden namespaces.

pub mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::load;
pub use schema::{BackendConfig, Config, LayoutConfig};
