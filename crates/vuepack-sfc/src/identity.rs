//! Component identity derived from a document's file name.

use std::path::Path;

/// Names a component is known by once packed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentIdentity {
    /// File base name, used as the script variable and global name
    pub raw_name: String,

    /// Kebab-cased registration key (e.g. `FooBar` -> `foo-bar`)
    pub tag_name: String,
}

impl ComponentIdentity {
    /// Create an identity from a raw component name.
    pub fn new(raw_name: impl Into<String>) -> Self {
        let raw_name = raw_name.into();
        let tag_name = tag_name(&raw_name);
        Self { raw_name, tag_name }
    }

    /// Derive an identity from a document path (`src/FooBar.vue` -> `FooBar`).
    pub fn from_path(path: &Path) -> Result<Self, IdentityError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| IdentityError::InvalidFileName(path.display().to_string()))?;

        Ok(Self::new(stem))
    }
}

/// Derive the registration tag name from a raw component name.
///
/// Every ASCII uppercase letter is prefixed with a hyphen, the result is
/// lowercased and a single leading hyphen is dropped.
pub fn tag_name(raw_name: &str) -> String {
    let mut tag = String::with_capacity(raw_name.len() + 4);

    for c in raw_name.chars() {
        if c.is_ascii_uppercase() {
            tag.push('-');
            tag.push(c.to_ascii_lowercase());
        } else {
            tag.extend(c.to_lowercase());
        }
    }

    match tag.strip_prefix('-') {
        Some(stripped) => stripped.to_string(),
        None => tag,
    }
}

/// Errors that can occur when deriving a component identity.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Cannot derive a component name from path: {0}")]
    InvalidFileName(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn derives_tag_names() {
        assert_eq!(tag_name("FooBar"), "foo-bar");
        assert_eq!(tag_name("foo"), "foo");
        assert_eq!(tag_name("ABTest"), "a-b-test");
        assert_eq!(tag_name("userCard"), "user-card");
    }

    #[test]
    fn tag_name_is_stable() {
        for raw in ["FooBar", "foo", "ABTest", "myWidget2"] {
            let once = tag_name(raw);
            assert_eq!(tag_name(&once), once);
            assert_eq!(tag_name(raw), once);
        }
    }

    #[test]
    fn identity_from_path() {
        let identity = ComponentIdentity::from_path(&PathBuf::from("src/forms/UserCard.vue")).unwrap();

        assert_eq!(identity.raw_name, "UserCard");
        assert_eq!(identity.tag_name, "user-card");
    }

    #[test]
    fn rejects_path_without_stem() {
        let result = ComponentIdentity::from_path(&PathBuf::from("/"));

        assert!(matches!(result, Err(IdentityError::InvalidFileName(_))));
    }
}
