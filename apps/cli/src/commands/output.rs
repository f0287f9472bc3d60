//! Plan output helpers.

use anyhow::Context;
use colored::Colorize;
use std::path::Path;

/// Prints `text` to stdout, or writes it to `output` when given.
pub fn emit(text: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = output else {
        println!("{}", text);
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write plan to {}", path.display()))?;

    println!("{}", format!("✓ Plan written to {}", path.display()).green().bold());
    Ok(())
}
