//! Output emission.

use std::fs;
use std::path::{Path, PathBuf};

use vuepack_assembler::AssembledOutput;

use crate::builder::BuildError;

/// A file to be written to the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Plan the artifacts for one assembled document.
///
/// `<base>.js` and `<base>.css` are placed under `out_dir/relative_dir`.
/// Empty texts produce no file.
pub fn plan_outputs(
    out_dir: &Path,
    relative_dir: &Path,
    base_name: &str,
    output: &AssembledOutput,
) -> Vec<OutputFile> {
    let dir = out_dir.join(relative_dir);
    let mut files = Vec::new();

    if !output.script.is_empty() {
        files.push(OutputFile {
            path: dir.join(format!("{}.js", base_name)),
            contents: output.script.clone(),
        });
    }

    if !output.style.is_empty() {
        files.push(OutputFile {
            path: dir.join(format!("{}.css", base_name)),
            contents: output.style.clone(),
        });
    }

    files
}

/// Artifacts of one document that the new output no longer produces.
///
/// A repack after a section was dropped must delete these.
pub fn stale_outputs(
    out_dir: &Path,
    relative_dir: &Path,
    base_name: &str,
    output: &AssembledOutput,
) -> Vec<PathBuf> {
    let dir = out_dir.join(relative_dir);
    let mut stale = Vec::new();

    if output.script.is_empty() {
        stale.push(dir.join(format!("{}.js", base_name)));
    }
    if output.style.is_empty() {
        stale.push(dir.join(format!("{}.css", base_name)));
    }

    stale
}

/// Delete the given files where they exist. Returns the removed paths.
pub fn remove_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, BuildError> {
    let mut removed = Vec::new();

    for path in paths {
        if path.exists() {
            fs::remove_file(path)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))?;
            tracing::debug!("Removed {}", path.display());
            removed.push(path.clone());
        }
    }

    Ok(removed)
}

/// Write planned files, creating parent directories as needed.
pub fn write_outputs(files: &[OutputFile]) -> Result<(), BuildError> {
    for file in files {
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", parent.display(), e)))?;
        }

        fs::write(&file.path, &file.contents)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", file.path.display(), e)))?;

        tracing::debug!("Wrote {}", file.path.display());
    }

    Ok(())
}
