//! The `config` command: show or create the configuration file

use std::path::Path;

use anyhow::{bail, Result};

use super::output::Output;
use crate::storage::Config;

pub fn run(config: &Config, source: Option<&Path>, init: bool, output: &Output) -> Result<()> {
    if init {
        return init_global(output);
    }

    let source_text = source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in defaults)".to_string());

    if output.is_json() {
        output.data(&serde_json::json!({
            "source": source.map(|p| p.display().to_string()),
            "config": config,
        }));
    } else {
        println!("# Source: {}", source_text);
        print!("{}", config.to_toml()?);
    }

    Ok(())
}

fn init_global(output: &Output) -> Result<()> {
    if let Some(path) = Config::global_config_path().filter(|p| p.exists()) {
        bail!("Config already exists at {}", path.display());
    }

    let path = Config::default().save_global()?;
    output.verbose_ctx("config", &format!("Wrote defaults to {}", path.display()));
    output.success(&format!("Created config at {}", path.display()));
    Ok(())
}
