pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_or_empty, LoadedConfig};
pub use run::run_app;
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{resolve_initial_filter, wire_dependencies, StorageBackend, WiringError};
