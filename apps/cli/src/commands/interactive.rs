//! Interactive planning command.
//!
//! The manager agent delegates to the planner agent, whose primary task asks
//! for the student's data and renders the plan.

use colored::Colorize;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::{Arc, Mutex};

use navigator_core::{NavigatorConfig, PlanPipeline, manager_agent, planner_agent};
use navigator_orchestrator::{CapabilityHandler, OrchestrationError, Runner, handler_fn};

use super::output::emit;
use crate::prompt::{
    Collected, DATA_NOT_CONFIRMED, LinePrompter, Prompter, TerminalPrompter, collect_student,
};

/// Message the manager agent is started with.
const START_MESSAGE: &str = "Let's create a learning plan.";

type SharedPrompter = Arc<Mutex<Box<dyn Prompter>>>;

/// Execute the interactive command.
pub async fn execute(
    config: &NavigatorConfig,
    snippets: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    println!("{}", "Welcome to the NWEA Goal Navigator".bold().cyan());
    println!();

    let pipeline = PlanPipeline::from_config(config, snippets)?;
    let prompter: Box<dyn Prompter> = if std::io::stdin().is_terminal() {
        Box::new(TerminalPrompter)
    } else {
        Box::new(LinePrompter::new(std::io::BufReader::new(std::io::stdin()), std::io::stdout()))
    };

    let planner = planner_agent(collect_and_render(pipeline, Arc::new(Mutex::new(prompter))));
    let manager = manager_agent(&planner);

    let result = Runner::run(&manager, START_MESSAGE).await?;

    let text: Vec<&str> = result.produced_messages.iter().map(|m| m.content.as_str()).collect();
    emit(&text.join("\n"), output)
}

/// Builds the planner's primary task.
///
/// Prompts run on a blocking thread; enrichment runs on the runtime.
fn collect_and_render(pipeline: PlanPipeline, prompter: SharedPrompter) -> Arc<dyn CapabilityHandler> {
    let pipeline = Arc::new(pipeline);

    handler_fn(move |_message| {
        let pipeline = Arc::clone(&pipeline);
        let prompter = Arc::clone(&prompter);
        async move {
            let collected = tokio::task::spawn_blocking(move || {
                let mut prompter = prompter
                    .lock()
                    .map_err(|_| anyhow::anyhow!("Prompter is unavailable"))?;
                collect_student(&mut **prompter)
            })
            .await
            .map_err(|e| OrchestrationError::TaskFailed(format!("Prompt task failed: {}", e)))?
            .map_err(|e| OrchestrationError::TaskFailed(format!("{:#}", e)))?;

            match collected {
                Collected::Declined => Ok::<_, OrchestrationError>(DATA_NOT_CONFIRMED.to_string()),
                Collected::Confirmed { student, standard } => {
                    Ok(pipeline.build_plan(&student, standard).await.into_string())
                }
            }
        }
    })
}
