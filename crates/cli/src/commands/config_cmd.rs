//! `orgassist config` — Show the effective configuration.

use crate::app::{CliResult, load_config};
use orgassist_config::AppConfig;

pub async fn show() -> CliResult {
    let mut shown = load_config()?;
    println!("# {}", AppConfig::config_dir().join("config.toml").display());

    if shown.provider.api_key.is_some() {
        shown.provider.api_key = Some("[REDACTED]".into());
    }
    let toml_str = toml::to_string_pretty(&shown)?;
    println!("{toml_str}");
    Ok(())
}
