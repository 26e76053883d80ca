//! One-shot pack command.

use std::path::Path;

use anyhow::{Context, Result};
use vuepack_build::Packer;

use crate::config::{load_config, Overrides};

/// Run the build command.
pub async fn run(config_path: &Path, overrides: Overrides) -> Result<()> {
    let config = load_config(config_path)?.into_build_config(overrides);

    tracing::info!(
        "Packing {} -> {}",
        config.src_dir.display(),
        config.out_dir.display()
    );

    let packer = Packer::new(config);
    let result = tokio::task::spawn_blocking(move || packer.build())
        .await
        .context("Build task failed")??;

    tracing::info!(
        "Packed {} components ({} scripts, {} stylesheets) in {}ms",
        result.components,
        result.scripts,
        result.stylesheets,
        result.duration_ms
    );
    tracing::info!("Output: {}", result.out_dir.display());

    if !result.is_success() {
        anyhow::bail!("{} component(s) failed to pack", result.failures.len());
    }

    Ok(())
}
