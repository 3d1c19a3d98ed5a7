//! Stepwise host: configuration, logging and dependency wiring around the
//! wizard engine, plus a line-based shell for driving it from a terminal.

pub mod bootstrap;
pub mod shell;
