//! Configuration file (vuepack.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use vuepack_assembler::TransformOptions;
use vuepack_build::BuildConfig;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub transform: TransformOptions,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_src")]
    pub src: String,
    #[serde(default = "default_out")]
    pub out: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Write components.json with every registration
    #[serde(default)]
    pub manifest: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            src: default_src(),
            out: default_out(),
            extension: default_extension(),
            manifest: false,
        }
    }
}

fn default_src() -> String {
    "src".to_string()
}
fn default_out() -> String {
    "build".to_string()
}
fn default_extension() -> String {
    "vue".to_string()
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub src: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub auto_link_css: bool,
    pub manifest: bool,
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

impl ConfigFile {
    /// Merge file settings with command line overrides.
    pub fn into_build_config(self, overrides: Overrides) -> BuildConfig {
        let mut options = self.transform;
        options.auto_link_css |= overrides.auto_link_css;

        BuildConfig {
            src_dir: overrides.src.unwrap_or_else(|| PathBuf::from(&self.build.src)),
            out_dir: overrides.out.unwrap_or_else(|| PathBuf::from(&self.build.out)),
            extension: self.build.extension.trim_start_matches('.').to_string(),
            manifest: self.build.manifest || overrides.manifest,
            options,
        }
    }
}
