//! Build harness for vuepack.
//!
//! Walks a source tree for component documents, packs each one into a script
//! and an optional stylesheet, and writes the artifacts next to each other in
//! the output tree.

pub mod builder;
pub mod emit;
pub mod source;
pub mod watcher;

pub use builder::{BuildConfig, BuildError, BuildResult, FileFailure, FileReport, Packer};
pub use emit::{plan_outputs, remove_files, stale_outputs, write_outputs, OutputFile};
pub use source::{EntryContents, SourceDocument, SourceEntry};
pub use watcher::{FileWatcher, WatchEvent};
