//! Command implementations for deployer-cli

pub mod check;
pub mod completions;

pub use check::run_check;
pub use completions::run_completions;
