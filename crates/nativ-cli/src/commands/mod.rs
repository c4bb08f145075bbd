//! CLI command implementations.

pub mod common;
pub mod compile;
pub mod rules;
pub mod verify;
pub mod version;
