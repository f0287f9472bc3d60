//! Autonomous planning command.
//!
//! Runs the autonomous planner agent over the student data file.

use std::path::PathBuf;

use navigator_core::{NavigatorConfig, PlanPipeline, autonomous_planner};
use navigator_orchestrator::Runner;

/// Execute the auto command.
pub async fn execute(config: &NavigatorConfig, data: Option<PathBuf>) -> anyhow::Result<()> {
    let data_file = data.unwrap_or_else(|| config.data_file());
    let pipeline = PlanPipeline::from_config(config, false)?;

    let agent = autonomous_planner(pipeline, data_file);
    let result = Runner::run(&agent, "auto").await?;

    for message in &result.produced_messages {
        println!("{}", message.content);
    }

    Ok(())
}
