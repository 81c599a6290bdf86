use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use lumen_core::{AppConfig, HeadlessPage, PageSpec, Script};

/// Replay a script and print one JSON object per effect, then the final state
pub async fn run(config: &AppConfig, page: PageSpec, script_path: &Path) -> Result<()> {
    let script = Script::load(script_path)
        .with_context(|| format!("loading script {}", script_path.display()))?;

    let mut headless = HeadlessPage::new(
        config,
        page,
        script.viewport.columns,
        script.viewport.rows,
    )?;
    let batches = headless.replay(&script);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (step, effects) in batches.iter().enumerate() {
        for effect in effects {
            writeln!(out, "{}", json!({ "step": step, "effect": effect }))?;
        }
    }
    writeln!(out, "{}", json!({ "projection": headless.projection() }))?;

    info!(
        "Replayed {} steps, {} effects",
        script.steps.len(),
        headless.log().len()
    );
    Ok(())
}
