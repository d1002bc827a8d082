use std::path::Path;

use anyhow::Result;

use ringpager_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, write: bool) -> Result<()> {
    if write {
        config.save_to(path)?;
        tracing::info!("Wrote configuration to {}", path.display());
        println!("Saved configuration to {}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
