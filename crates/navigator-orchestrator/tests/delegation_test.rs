//! Integration tests for agent composition through capabilities.
//!
//! Covers the manager -> planner wrapping used by the CLI, nested wrapping,
//! and error propagation through every layer up to the runner.

use navigator_orchestrator::{Agent, Capability, ExecutionRoute, OrchestrationError, Runner};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn planner() -> Agent {
    Agent::new("planner_agent", "Collect student MAP data and create a learning plan.")
        .with_task_fn(|message| async move { Ok(format!("PLAN <{}>", message)) })
}

#[tokio::test]
async fn test_manager_delegates_to_wrapped_planner() {
    let manager = Agent::new(
        "manager_agent",
        "You are the NWEA Goal Navigator. Use the tools to build a learning plan.",
    )
    .with_capability(
        planner().as_capability("build_plan", "Generate NWEA learning plan from user input"),
    );

    assert_eq!(manager.route(), ExecutionRoute::Capability("build_plan".to_string()));

    let result = Runner::run(&manager, "Let's create a learning plan.").await.unwrap();

    assert_eq!(result.produced_messages.len(), 1);
    assert_eq!(result.final_output(), Some("PLAN <Let's create a learning plan.>"));
}

#[tokio::test]
async fn test_three_level_wrapping() {
    let middle = Agent::new("middle", "unused")
        .with_capability(planner().as_capability("build_plan", "planner"));
    let top = Agent::new("top", "unused").with_capability(middle.as_capability("middle_tool", "middle"));

    let result = Runner::run(&top, "deep").await.unwrap();

    assert_eq!(result.final_output(), Some("PLAN <deep>"));
}

#[tokio::test]
async fn test_capabilities_after_first_are_unreachable() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let second = Capability::from_fn("second", "never selected", move |message| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(message)
        }
    });

    let manager = Agent::new("manager", "unused")
        .with_capability(planner().as_capability("build_plan", "planner"))
        .with_capability(second);

    for _ in 0..3 {
        Runner::run(&manager, "x").await.unwrap();
    }

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_primary_task_ignores_capabilities() {
    let agent = Agent::new("autonomous_planner", "Generate a learning plan from file data.")
        .with_capability(planner().as_capability("build_plan", "planner"))
        .with_task_fn(|_message| async { Ok("from file".to_string()) });

    let result = Runner::run(&agent, "auto").await.unwrap();

    assert_eq!(result.final_output(), Some("from file"));
}

#[tokio::test]
async fn test_wrapped_failure_reaches_runner_caller() {
    let failing = Agent::new("collector", "unused").with_task_fn(|_message| async {
        Err(OrchestrationError::CapabilityFailed {
            capability: "build_plan".to_string(),
            reason: "input stream closed".to_string(),
        })
    });
    let manager =
        Agent::new("manager", "unused").with_capability(failing.as_capability("build_plan", "collector"));

    let err = Runner::run(&manager, "go").await.unwrap_err();

    assert_eq!(err.to_string(), "Capability 'build_plan' failed: input stream closed");
}

#[tokio::test]
async fn test_runs_are_independent() {
    let agent = planner();

    let first = Runner::run(&agent, "one").await.unwrap();
    let second = Runner::run(&agent, "two").await.unwrap();

    assert_eq!(first.final_output(), Some("PLAN <one>"));
    assert_eq!(second.final_output(), Some("PLAN <two>"));
}
