//! Agent orchestrator for the Goal Navigator.
//!
//! This crate is a minimal single-level delegation framework, not a scheduler:
//!
//! - a [`Capability`] is a named, described, asynchronous handler;
//! - an [`Agent`] runs its primary task, or else its first capability, or else
//!   echoes its instructions with the message;
//! - the [`Runner`] executes an agent once and returns an [`ExecutionResult`].
//!
//! One run performs one handler call. There is no fan-out and no state shared
//! between runs.

pub mod agent;
pub mod capability;
pub mod error;
pub mod runner;

pub use agent::{Agent, ExecutionRoute};
pub use capability::{Capability, CapabilityHandler, FnHandler, handler_fn};
pub use error::{OrchestrationError, Result};
pub use runner::{ExecutionResult, ProducedMessage, Runner};
