mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./temposync.toml",
        "~/.config/temposync/config.toml",
        "/etc/temposync/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if let Some(ref path) = config.tools.ffmpeg_path {
        if !path.exists() {
            tracing::warn!("Configured ffmpeg path does not exist: {:?}", path);
        }
    }

    let sync = &config.sync;
    if sync.output_suffix.is_empty() {
        anyhow::bail!("sync.output_suffix cannot be empty");
    }
    if sync.tempo_suffix.is_empty() {
        anyhow::bail!("sync.tempo_suffix cannot be empty");
    }

    for (key, value) in [
        ("sync.manifest_name", &sync.manifest_name),
        ("sync.concat_stem", &sync.concat_stem),
        ("sync.tempo_suffix", &sync.tempo_suffix),
    ] {
        if value.is_empty() || value.contains(['/', '\\']) {
            anyhow::bail!("{} must be a plain file name, got {:?}", key, value);
        }
    }

    if config.ffmpeg.loglevel.is_empty() {
        anyhow::bail!("ffmpeg.loglevel cannot be empty");
    }

    Ok(())
}
