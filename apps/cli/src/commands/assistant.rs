//! Hosted assistant command.
//!
//! Sends each student record to the hosted goal-setting assistant and prints
//! its replies.

use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

use navigator_core::{NavigatorConfig, load_entries, numbered_section};
use navigator_models::AssistantClient;

/// Execute the assistant command.
pub async fn execute(config: &NavigatorConfig, data: Option<PathBuf>) -> anyhow::Result<()> {
    let data_file = data.unwrap_or_else(|| config.data_file());

    let entries = load_entries(&data_file)
        .await
        .with_context(|| format!("Failed to load student data from {}", data_file.display()))?;

    let client = AssistantClient::new(config.assistant.clone())
        .context("Hosted assistant is not configured")?;
    info!(model = %client.model(), records = entries.len(), "Requesting plans from assistant");

    for (idx, entry) in entries.iter().enumerate() {
        let record = serde_json::to_value(entry)?;
        let reply = client
            .draft_plan(&record)
            .await
            .with_context(|| format!("Assistant request failed for {}", entry.name))?;
        println!("{}", numbered_section(idx + 1, &reply));
    }

    Ok(())
}
