//! CLI command implementations.

pub mod assign;
pub mod list;
pub mod process;
pub mod remove;
pub mod rename;
pub mod review;
