pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_with_defaults, resolve_config_path};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{build_session, WizardSession};
