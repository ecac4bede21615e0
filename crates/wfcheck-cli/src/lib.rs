//! CLI library components for the wind-farm configuration checker.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;
