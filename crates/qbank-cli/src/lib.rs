//! Command-line shell for the question bank.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
pub mod summary;
