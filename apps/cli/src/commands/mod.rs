//! Command implementations for the Navigator CLI.

pub mod assistant;
pub mod auto;
pub mod interactive;
pub mod output;
pub mod plan;
