use std::path::Path;

use anyhow::Result;

use lumen_core::AppConfig;

pub async fn run(config: &AppConfig, path: &Path, write: bool) -> Result<()> {
    if write {
        if path.exists() {
            println!("Config file already exists: {}", path.display());
            println!("Remove it first to write fresh defaults.");
            return Ok(());
        }
        AppConfig::default().save_to(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
