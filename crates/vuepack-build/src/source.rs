//! Input adapter: turns file system entries into component documents.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use vuepack_sfc::ComponentIdentity;

use crate::builder::BuildError;

/// What a source path held when it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContents {
    /// Fully buffered file contents
    Buffered(Vec<u8>),

    /// The path is a directory
    Directory,

    /// The path no longer exists
    Missing,
}

/// A file system entry handed to the pipeline.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    pub path: PathBuf,
    pub contents: EntryContents,
}

impl SourceEntry {
    /// Read an entry from disk.
    pub fn read(path: &Path) -> Result<Self, BuildError> {
        let contents = match fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => EntryContents::Missing,
            Err(e) => {
                return Err(BuildError::ReadError(format!("{}: {}", path.display(), e)));
            }
            Ok(meta) if meta.is_dir() => EntryContents::Directory,
            Ok(_) => match fs::read(path) {
                Ok(bytes) => EntryContents::Buffered(bytes),
                Err(e) if e.kind() == ErrorKind::NotFound => EntryContents::Missing,
                Err(e) => {
                    return Err(BuildError::ReadError(format!("{}: {}", path.display(), e)));
                }
            },
        };

        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }
}

/// A textual component document ready for extraction.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Source file path
    pub path: PathBuf,

    /// Document text
    pub text: String,

    /// Names derived from the file name
    pub identity: ComponentIdentity,
}

impl SourceDocument {
    /// Validate an entry as a component document.
    ///
    /// Directories are skipped (`Ok(None)`). Missing entries and contents
    /// that are not UTF-8 text are errors for this file only.
    pub fn from_entry(entry: SourceEntry) -> Result<Option<Self>, BuildError> {
        let bytes = match entry.contents {
            EntryContents::Directory => return Ok(None),
            EntryContents::Missing => {
                return Err(BuildError::MissingInput(entry.path.display().to_string()));
            }
            EntryContents::Buffered(bytes) => bytes,
        };

        let text = String::from_utf8(bytes).map_err(|_| {
            BuildError::UnsupportedRepresentation(entry.path.display().to_string())
        })?;

        let identity = ComponentIdentity::from_path(&entry.path)?;

        Ok(Some(Self {
            path: entry.path,
            text,
            identity,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_text_document() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("FooBar.vue");
        fs::write(&path, "<script>export default {}</script>").unwrap();

        let entry = SourceEntry::read(&path).unwrap();
        let doc = SourceDocument::from_entry(entry).unwrap().unwrap();

        assert_eq!(doc.identity.raw_name, "FooBar");
        assert_eq!(doc.identity.tag_name, "foo-bar");
        assert!(doc.text.contains("export default"));
    }

    #[test]
    fn skips_directories() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested.vue");
        fs::create_dir_all(&dir).unwrap();

        let entry = SourceEntry::read(&dir).unwrap();

        assert_eq!(entry.contents, EntryContents::Directory);
        assert!(SourceDocument::from_entry(entry).unwrap().is_none());
    }

    #[test]
    fn missing_input_is_an_error() {
        let temp = tempdir().unwrap();
        let entry = SourceEntry::read(&temp.path().join("Gone.vue")).unwrap();

        let result = SourceDocument::from_entry(entry);

        assert!(matches!(result, Err(BuildError::MissingInput(_))));
    }

    #[test]
    fn binary_contents_are_rejected() {
        let entry = SourceEntry {
            path: PathBuf::from("Blob.vue"),
            contents: EntryContents::Buffered(vec![0xff, 0xfe, 0x00, 0x3c]),
        };

        let result = SourceDocument::from_entry(entry);

        assert!(matches!(
            result,
            Err(BuildError::UnsupportedRepresentation(_))
        ));
    }
}
