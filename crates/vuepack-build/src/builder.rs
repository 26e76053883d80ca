//! Component pack builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use vuepack_assembler::{
    Assembler, ComponentRegistry, ComponentRuntime, Registration, TransformOptions,
};
use vuepack_sfc::{extract, ExtractedSections, IdentityError};

use crate::emit::{plan_outputs, remove_files, stale_outputs, write_outputs};
use crate::source::{SourceDocument, SourceEntry};

/// File name of the registration manifest.
pub const MANIFEST_FILE: &str = "components.json";

/// Configuration for a pack run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory searched for component documents
    pub src_dir: PathBuf,

    /// Output directory; the source tree layout is mirrored under it
    pub out_dir: PathBuf,

    /// Extension of component documents (without the dot)
    pub extension: String,

    /// Write a registration manifest next to the artifacts
    pub manifest: bool,

    /// Options passed to the assembler
    pub options: TransformOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("src"),
            out_dir: PathBuf::from("build"),
            extension: "vue".to_string(),
            manifest: false,
            options: TransformOptions::default(),
        }
    }
}

/// Result of a pack run.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of documents that produced a script
    pub components: usize,

    /// Number of script files written
    pub scripts: usize,

    /// Number of stylesheet files written
    pub stylesheets: usize,

    /// Documents that failed; other documents were still packed
    pub failures: Vec<FileFailure>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub out_dir: PathBuf,
}

impl BuildResult {
    /// Whether every document was packed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A document that could not be packed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: BuildError,
}

/// What packing a single document produced.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Source document
    pub source: PathBuf,

    /// Files written
    pub outputs: Vec<PathBuf>,

    /// Stale artifacts deleted because their section is gone
    pub removed: Vec<PathBuf>,

    /// Whether a script artifact was written
    pub wrote_script: bool,

    /// Whether a stylesheet artifact was written
    pub wrote_style: bool,

    /// Registration descriptor, when a script was produced
    pub registration: Option<Registration>,
}

/// Errors that can occur during a pack run.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Source directory not found: {0}")]
    SourceDirNotFound(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Unsupported representation (expected UTF-8 text): {0}")]
    UnsupportedRepresentation(String),

    #[error("Failed to read input: {0}")]
    ReadError(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Failed to write manifest: {0}")]
    ManifestError(String),
}

/// Packs component documents into scripts and stylesheets.
pub struct Packer {
    config: BuildConfig,
    assembler: Assembler,
}

impl Packer {
    /// Create a new packer.
    pub fn new(config: BuildConfig) -> Self {
        let assembler = Assembler::new(config.options.clone());
        Self { config, assembler }
    }

    /// Configuration this packer runs with.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Pack every document under the source directory.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let sources = self.discover()?;

        fs::create_dir_all(&self.config.out_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!(
            "Found {} component documents in {} (runtime: {})",
            sources.len(),
            self.config.src_dir.display(),
            self.assembler.runtime().name()
        );

        // Documents are independent; pack them in parallel
        let results: Vec<(PathBuf, Result<Option<FileReport>, BuildError>)> = sources
            .par_iter()
            .map(|path| (path.clone(), self.build_file(path)))
            .collect();

        let mut registry = ComponentRegistry::new();
        let mut components = 0;
        let mut scripts = 0;
        let mut stylesheets = 0;
        let mut failures = Vec::new();

        for (path, result) in results {
            match result {
                Ok(Some(report)) => {
                    scripts += usize::from(report.wrote_script);
                    stylesheets += usize::from(report.wrote_style);

                    if let Some(registration) = report.registration {
                        components += 1;
                        if let Err(e) = registry.register(registration) {
                            tracing::warn!("{}", e);
                        }
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::error!("Failed to pack {}: {}", path.display(), error);
                    failures.push(FileFailure { path, error });
                }
            }
        }

        if self.config.manifest {
            let manifest_path = self.write_manifest(&registry)?;
            tracing::info!("Wrote manifest {}", manifest_path.display());
        }

        Ok(BuildResult {
            components,
            scripts,
            stylesheets,
            failures,
            duration_ms: start.elapsed().as_millis() as u64,
            out_dir: self.config.out_dir.clone(),
        })
    }

    /// Find all component documents under the source directory, sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>, BuildError> {
        if !self.config.src_dir.exists() {
            return Err(BuildError::SourceDirNotFound(
                self.config.src_dir.display().to_string(),
            ));
        }

        let sources = WalkDir::new(&self.config.src_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|path| self.is_component(path))
            .collect();

        Ok(sources)
    }

    /// Check if a path has the component document extension.
    pub fn is_component(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == self.config.extension)
    }

    /// Pack a single document.
    ///
    /// Returns `Ok(None)` when the path is a directory or lies outside the
    /// source directory.
    pub fn build_file(&self, path: &Path) -> Result<Option<FileReport>, BuildError> {
        let Some(relative_dir) = self.relative_dir(path) else {
            tracing::warn!(
                "{} is not under {}, skipping",
                path.display(),
                self.config.src_dir.display()
            );
            return Ok(None);
        };

        let entry = SourceEntry::read(path)?;
        let Some(document) = SourceDocument::from_entry(entry)? else {
            tracing::debug!("Skipping directory {}", path.display());
            return Ok(None);
        };

        let sections = extract(&document.text);
        self.check_style_lang(&sections, path);

        let output = self.assembler.assemble(
            &sections,
            &document.identity,
            &relative_dir.to_string_lossy(),
        );

        if output.script.is_empty() {
            tracing::debug!("{} has no script section, no script emitted", path.display());
        }

        let files = plan_outputs(
            &self.config.out_dir,
            &relative_dir,
            &document.identity.raw_name,
            &output,
        );
        write_outputs(&files)?;

        let removed = remove_files(&stale_outputs(
            &self.config.out_dir,
            &relative_dir,
            &document.identity.raw_name,
            &output,
        ))?;

        Ok(Some(FileReport {
            source: path.to_path_buf(),
            removed,
            wrote_script: !output.script.is_empty(),
            wrote_style: !output.style.is_empty(),
            outputs: files.into_iter().map(|f| f.path).collect(),
            registration: output.registration,
        }))
    }

    /// Delete the artifacts previously packed from `path`.
    ///
    /// Returns the files that were removed. A path outside the source
    /// directory removes nothing.
    pub fn remove_outputs(&self, path: &Path) -> Result<Vec<PathBuf>, BuildError> {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            return Ok(Vec::new());
        };

        let Some(relative_dir) = self.relative_dir(path) else {
            tracing::warn!(
                "{} is not under {}, no outputs removed",
                path.display(),
                self.config.src_dir.display()
            );
            return Ok(Vec::new());
        };

        let dir = self.config.out_dir.join(relative_dir);
        remove_files(&[
            dir.join(format!("{}.js", stem)),
            dir.join(format!("{}.css", stem)),
        ])
    }

    /// Write the registration manifest.
    pub fn write_manifest(&self, registry: &ComponentRegistry) -> Result<PathBuf, BuildError> {
        let json = registry
            .to_manifest()
            .map_err(|e| BuildError::ManifestError(e.to_string()))?;

        let path = self.config.out_dir.join(MANIFEST_FILE);
        fs::write(&path, json).map_err(|e| BuildError::ManifestError(e.to_string()))?;

        Ok(path)
    }

    /// Directory of `path` relative to the source directory, or `None` when
    /// the path cannot be placed under it.
    fn relative_dir(&self, path: &Path) -> Option<PathBuf> {
        let parent = path.parent()?;

        if let Ok(relative) = parent.strip_prefix(&self.config.src_dir) {
            return Some(relative.to_path_buf());
        }

        // Watch events carry absolute paths while src_dir may be relative.
        // The parent may already be gone when a whole directory was deleted.
        let src = fs::canonicalize(&self.config.src_dir).ok()?;
        if let Ok(relative) = parent.strip_prefix(&src) {
            return Some(relative.to_path_buf());
        }

        let parent = fs::canonicalize(parent).ok()?;
        parent.strip_prefix(&src).ok().map(Path::to_path_buf)
    }

    /// Warn when a style section declares a language nothing will preprocess.
    fn check_style_lang(&self, sections: &ExtractedSections, path: &Path) {
        if let Some(lang) = &sections.style_lang {
            let expected = &self.assembler.options().style_lang;
            if !lang.eq_ignore_ascii_case(expected) {
                tracing::warn!(
                    "{} declares <style lang=\"{}\"> but styles are emitted as {}",
                    path.display(),
                    lang,
                    expected
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const HELLO: &str = "<template><div>{{msg}}</div></template><script>export default { data(){return {msg:'hi'}} }</script><style>div{color:red}</style>";

    fn packer(root: &Path, options: TransformOptions, manifest: bool) -> Packer {
        Packer::new(BuildConfig {
            src_dir: root.join("src"),
            out_dir: root.join("build"),
            manifest,
            options,
            ..Default::default()
        })
    }

    #[test]
    fn packs_component_into_script_and_style() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Hello.vue"), HELLO).unwrap();

        let result = packer(temp.path(), TransformOptions::default(), false)
            .build()
            .unwrap();

        assert_eq!(result.components, 1);
        assert_eq!(result.scripts, 1);
        assert_eq!(result.stylesheets, 1);
        assert!(result.is_success());

        let js = fs::read_to_string(temp.path().join("build/Hello.js")).unwrap();
        assert!(js.contains("var Hello = Vue.extend({ data(){return {msg:'hi'}} });"));
        assert!(js.contains("Vue.component('hello', Hello);"));

        let css = fs::read_to_string(temp.path().join("build/Hello.css")).unwrap();
        assert_eq!(css, "div{color:red}");
    }

    #[test]
    fn mirrors_source_tree_layout() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("src/forms/inputs");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            nested.join("TextField.vue"),
            "<script>export default {}</script>",
        )
        .unwrap();

        packer(temp.path(), TransformOptions::default(), false)
            .build()
            .unwrap();

        assert!(temp.path().join("build/forms/inputs/TextField.js").exists());
        assert!(!temp.path().join("build/forms/inputs/TextField.css").exists());
    }

    #[test]
    fn template_only_document_emits_nothing() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Static.vue"), "<template><p>x</p></template>").unwrap();

        let result = packer(temp.path(), TransformOptions::default(), false)
            .build()
            .unwrap();

        assert_eq!(result.components, 0);
        assert_eq!(result.scripts, 0);
        assert!(!temp.path().join("build/Static.js").exists());
        assert!(!temp.path().join("build/Static.css").exists());
    }

    #[test]
    fn failing_document_does_not_stop_the_run() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Good.vue"), "<script>export default {}</script>").unwrap();
        fs::write(src.join("Bad.vue"), [0xffu8, 0xfe, 0xfd]).unwrap();

        let result = packer(temp.path(), TransformOptions::default(), false)
            .build()
            .unwrap();

        assert_eq!(result.components, 1);
        assert_eq!(result.failures.len(), 1);
        assert!(result.failures[0].path.ends_with("Bad.vue"));
        assert!(matches!(
            result.failures[0].error,
            BuildError::UnsupportedRepresentation(_)
        ));
        assert!(temp.path().join("build/Good.js").exists());
    }

    #[test]
    fn ignores_other_extensions() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("notes.md"), "<script>export default {}</script>").unwrap();

        let p = packer(temp.path(), TransformOptions::default(), false);

        assert!(p.discover().unwrap().is_empty());
    }

    #[test]
    fn missing_source_dir_is_an_error() {
        let temp = tempdir().unwrap();

        let result = packer(temp.path(), TransformOptions::default(), false).build();

        assert!(matches!(result, Err(BuildError::SourceDirNotFound(_))));
    }

    #[test]
    fn writes_manifest() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src/widgets");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Hello.vue"), HELLO).unwrap();

        packer(temp.path(), TransformOptions::default(), true)
            .build()
            .unwrap();

        let manifest = fs::read_to_string(temp.path().join("build").join(MANIFEST_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        let entry = &value["components"][0];

        assert_eq!(entry["tag_name"], "hello");
        assert_eq!(entry["source_dir"], "widgets");
        assert_eq!(entry["style_file"], "Hello.css");
    }

    #[test]
    fn auto_link_css_reaches_the_script() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Hello.vue"), HELLO).unwrap();

        let options = TransformOptions {
            auto_link_css: true,
            ..Default::default()
        };
        packer(temp.path(), options, false).build().unwrap();

        let js = fs::read_to_string(temp.path().join("build/Hello.js")).unwrap();
        assert!(js.contains("\"Hello.css\""));
    }

    #[test]
    fn removes_outputs_of_deleted_document() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Hello.vue"), HELLO).unwrap();

        let p = packer(temp.path(), TransformOptions::default(), false);
        p.build().unwrap();

        let removed = p.remove_outputs(&src.join("Hello.vue")).unwrap();

        assert_eq!(removed.len(), 2);
        assert!(!temp.path().join("build/Hello.js").exists());
        assert!(!temp.path().join("build/Hello.css").exists());
    }

    #[test]
    fn removing_a_path_outside_src_keeps_other_outputs() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Hello.vue"), HELLO).unwrap();

        let p = packer(temp.path(), TransformOptions::default(), false);
        p.build().unwrap();

        let removed = p
            .remove_outputs(&temp.path().join("gone/forms/Hello.vue"))
            .unwrap();

        assert!(removed.is_empty());
        assert!(temp.path().join("build/Hello.js").exists());
        assert!(temp.path().join("build/Hello.css").exists());
    }

    #[test]
    fn removes_outputs_after_directory_was_deleted() {
        let temp = tempdir().unwrap();
        let forms = temp.path().join("src/forms");
        fs::create_dir_all(&forms).unwrap();
        fs::write(forms.join("Hello.vue"), HELLO).unwrap();
        fs::write(temp.path().join("src/Hello.vue"), HELLO).unwrap();

        let p = packer(temp.path(), TransformOptions::default(), false);
        p.build().unwrap();
        fs::remove_dir_all(&forms).unwrap();

        let removed = p.remove_outputs(&forms.join("Hello.vue")).unwrap();

        assert_eq!(removed.len(), 2);
        assert!(!temp.path().join("build/forms/Hello.js").exists());
        assert!(temp.path().join("build/Hello.js").exists());
    }

    #[test]
    fn building_a_path_outside_src_writes_nothing() {
        let temp = tempdir().unwrap();
        let elsewhere = temp.path().join("elsewhere");
        fs::create_dir_all(&elsewhere).unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(elsewhere.join("Stray.vue"), HELLO).unwrap();

        let p = packer(temp.path(), TransformOptions::default(), false);
        let report = p.build_file(&elsewhere.join("Stray.vue")).unwrap();

        assert!(report.is_none());
        assert!(!temp.path().join("build/Stray.js").exists());
    }

    #[test]
    fn repack_deletes_artifacts_of_dropped_sections() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        let document = src.join("Hello.vue");
        fs::write(&document, HELLO).unwrap();

        let p = packer(temp.path(), TransformOptions::default(), false);
        p.build().unwrap();

        fs::write(&document, "<template><p/></template>").unwrap();
        let report = p.build_file(&document).unwrap().unwrap();

        assert!(report.outputs.is_empty());
        assert_eq!(report.removed.len(), 2);
        assert!(report.registration.is_none());
        assert!(!temp.path().join("build/Hello.js").exists());
        assert!(!temp.path().join("build/Hello.css").exists());
    }

    #[test]
    fn repack_keeps_script_when_only_style_is_dropped() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        let document = src.join("Hello.vue");
        fs::write(&document, HELLO).unwrap();

        let p = packer(temp.path(), TransformOptions::default(), false);
        p.build().unwrap();

        fs::write(&document, "<script>export default {}</script>").unwrap();
        let report = p.build_file(&document).unwrap().unwrap();

        assert_eq!(report.removed, vec![temp.path().join("build/Hello.css")]);
        assert!(temp.path().join("build/Hello.js").exists());
        assert!(!temp.path().join("build/Hello.css").exists());
    }
}
