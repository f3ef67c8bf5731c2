//! CLI command implementations

pub mod train;
