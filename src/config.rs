use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub storage: Storage,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "failed to parse config TOML")
    }
}

/// Where persisted track metadata lives.
#[derive(Debug, Deserialize)]
pub struct Storage {
    pub in_memory: bool,
    #[serde(default)]
    pub path: Option<PathBuf>,
}
