//! Command-line interface: train both tables, then play against them

pub mod commands;
pub mod output;
