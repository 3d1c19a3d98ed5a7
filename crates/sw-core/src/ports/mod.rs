//! Port interfaces for the wizard engine
//!
//! Ports define the contract between the controller and the outside world.
//! Implementations live in the infrastructure layer, so the controller stays
//! testable without a storage backend.

mod clock;
pub mod draft;

pub use clock::ClockPort;
pub use draft::{DraftRepositoryPort, DraftSinkPort};

#[cfg(test)]
pub use draft::MockDraftSink;
