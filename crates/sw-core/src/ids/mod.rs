//! ID type wrappers for type safety.

pub mod step_id;

pub use step_id::StepId;
