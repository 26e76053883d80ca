//! Watch command: repack documents as they change.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use vuepack_build::{FileWatcher, Packer, WatchEvent};

use crate::config::{load_config, Overrides};

/// Run the watch command.
pub async fn run(config_path: &Path, overrides: Overrides) -> Result<()> {
    let config = load_config(config_path)?.into_build_config(overrides);
    let packer = Arc::new(Packer::new(config));

    full_build(&packer).await?;

    let src_dir = packer.config().src_dir.clone();
    let (_watcher, mut rx) = FileWatcher::new(&[src_dir.clone()], &packer.config().extension)
        .context("Failed to start file watcher")?;

    tracing::info!("Watching {} for changes", src_dir.display());

    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                handle_event(&packer, event).await;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping watcher");
                break;
            }
        }
    }

    Ok(())
}

async fn full_build(packer: &Arc<Packer>) -> Result<()> {
    let packer = Arc::clone(packer);
    let result = tokio::task::spawn_blocking(move || packer.build())
        .await
        .context("Build task failed")??;

    tracing::info!(
        "Packed {} components in {}ms",
        result.components,
        result.duration_ms
    );
    if !result.is_success() {
        tracing::warn!("{} component(s) failed to pack", result.failures.len());
    }

    Ok(())
}

async fn handle_event(packer: &Arc<Packer>, event: WatchEvent) {
    // The manifest covers every component, so it needs a full pass
    if packer.config().manifest {
        if let Err(e) = full_build(packer).await {
            tracing::error!("Rebuild failed: {:#}", e);
        }
        if let WatchEvent::Removed(path) = &event {
            remove(packer, path).await;
        }
        return;
    }

    match event {
        WatchEvent::Changed(path) => {
            let worker = Arc::clone(packer);
            let target = path.clone();
            match tokio::task::spawn_blocking(move || worker.build_file(&target)).await {
                Ok(Ok(Some(report))) => {
                    tracing::info!(
                        "Repacked {} ({} files)",
                        path.display(),
                        report.outputs.len()
                    );
                    for artifact in report.removed {
                        tracing::info!("Removed stale {}", artifact.display());
                    }
                }
                Ok(Ok(None)) => {}
                Ok(Err(e)) => tracing::error!("Failed to pack {}: {}", path.display(), e),
                Err(e) => tracing::error!("Pack task failed: {}", e),
            }
        }
        WatchEvent::Removed(path) => remove(packer, &path).await,
    }
}

async fn remove(packer: &Arc<Packer>, path: &Path) {
    match packer.remove_outputs(path) {
        Ok(removed) => {
            for artifact in removed {
                tracing::info!("Removed {}", artifact.display());
            }
        }
        Err(e) => tracing::error!("Failed to clean outputs of {}: {}", path.display(), e),
    }
}
