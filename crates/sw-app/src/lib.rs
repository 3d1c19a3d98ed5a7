//! Stepwise application layer
//!
//! Use cases around the wizard controller and the input adapters that
//! drive it.

pub mod input;
pub mod usecases;
