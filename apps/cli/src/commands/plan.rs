//! Plan command implementation.
//!
//! Renders a plan for every record of a student data file.

use anyhow::Context;
use std::path::{Path, PathBuf};

use navigator_core::{NavigatorConfig, PlanPipeline, load_entries};

use super::output::emit;

/// Execute the plan command.
pub async fn execute(
    config: &NavigatorConfig,
    data: Option<PathBuf>,
    snippets: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let data_file = data.unwrap_or_else(|| config.data_file());

    let entries = load_entries(&data_file)
        .await
        .with_context(|| format!("Failed to load student data from {}", data_file.display()))?;

    let pipeline = PlanPipeline::from_config(config, snippets)?;
    let text = pipeline.build_document(&entries).await;

    emit(&text, output)
}
