//! TOML-backed generator settings.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dungeon_core::GeneratorConfig;
use serde::{Deserialize, Serialize};

pub const CONFIG_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default = "current_format_version")]
    pub format_version: u32,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

fn current_format_version() -> u32 {
    CONFIG_FORMAT_VERSION
}

impl ConfigFile {
    pub fn new(generator: GeneratorConfig) -> Self {
        Self { format_version: CONFIG_FORMAT_VERSION, generator }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let file: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        if file.format_version != CONFIG_FORMAT_VERSION {
            anyhow::bail!(
                "Unsupported config format_version {} in {}",
                file.format_version,
                path.display()
            );
        }
        Ok(file)
    }

    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        let text = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&tmp_path, text)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to move config into {}", path.display()))?;
        Ok(())
    }
}
