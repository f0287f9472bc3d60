//! Prebuilt planner agents.
//!
//! - `autonomous_planner`: renders plans for every record of a data file
//! - `planner_agent`: runs a caller-supplied collector (interactive prompts)
//! - `manager_agent`: delegates to a planner through the `build_plan` capability

use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use navigator_orchestrator::{Agent, CapabilityHandler, OrchestrationError};

use crate::error::CoreError;
use crate::input::load_entries;
use crate::pipeline::PlanPipeline;

/// Name of the autonomous planner agent.
pub const AUTONOMOUS_PLANNER: &str = "autonomous_planner";

/// Name of the interactive planner agent.
pub const PLANNER_AGENT: &str = "planner_agent";

/// Name of the manager agent.
pub const MANAGER_AGENT: &str = "manager_agent";

/// Capability through which the manager reaches the planner.
pub const BUILD_PLAN_CAPABILITY: &str = "build_plan";

/// Builds the agent that renders plans from a data file.
///
/// The file is read on every run. A missing file produces the message
/// `Data file {path} not found.` rather than an error; unreadable or invalid
/// files fail the run.
pub fn autonomous_planner(pipeline: PlanPipeline, data_file: impl Into<PathBuf>) -> Agent {
    let pipeline = Arc::new(pipeline);
    let data_file = Arc::new(data_file.into());

    Agent::new(AUTONOMOUS_PLANNER, "Generate a learning plan from file data.").with_task_fn(
        move |_message| {
            let pipeline = Arc::clone(&pipeline);
            let data_file = Arc::clone(&data_file);
            async move {
                match load_entries(data_file.as_path()).await {
                    Ok(entries) => Ok(pipeline.build_document(&entries).await),
                    Err(err @ CoreError::DataFileNotFound(_)) => {
                        warn!(path = %data_file.display(), "Student data file missing");
                        Ok(err.to_string())
                    }
                    Err(err) => Err(OrchestrationError::from(err)),
                }
            }
        },
    )
}

/// Builds the agent that collects student data with `task` and renders a plan.
pub fn planner_agent(task: Arc<dyn CapabilityHandler>) -> Agent {
    Agent::new(PLANNER_AGENT, "Collect student MAP data and create a learning plan.")
        .with_primary_task(task)
}

/// Builds the manager agent, which delegates to `planner`.
pub fn manager_agent(planner: &Agent) -> Agent {
    Agent::new(
        MANAGER_AGENT,
        "You are the NWEA Goal Navigator. Use the tools to build a learning plan.",
    )
    .with_capability(planner.as_capability(
        BUILD_PLAN_CAPABILITY,
        "Generate NWEA learning plan from user input",
    ))
}
