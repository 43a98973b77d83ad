//! Configuration loading and validation.
mod apply;
mod loader;
pub mod types;


pub use apply::resolve_config;
pub use loader::{load_config, load_graphite_config};
pub use types::{ConfigFile, GraphiteConfig, PositiveU64};
