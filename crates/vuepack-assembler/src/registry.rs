//! Registry of packed components.
//!
//! Collects the [`Registration`] descriptors produced by the assembler so the
//! caller decides how registration is realized, e.g. by writing a manifest.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::assembler::Registration;

/// Registrations keyed by tag name.
#[derive(Debug, Default, Clone)]
pub struct ComponentRegistry {
    components: BTreeMap<String, Registration>,
}

/// Manifest file layout.
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    components: Vec<&'a Registration>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration.
    ///
    /// A registration for an existing tag replaces it and returns
    /// [`RegistryError::DuplicateTag`] so the caller can report the clash.
    pub fn register(&mut self, registration: Registration) -> Result<(), RegistryError> {
        let incoming = describe(&registration);

        match self
            .components
            .insert(registration.tag_name.clone(), registration)
        {
            Some(existing) => Err(RegistryError::DuplicateTag {
                tag: existing.tag_name.clone(),
                existing: describe(&existing),
                incoming,
            }),
            None => Ok(()),
        }
    }

    /// Look up a registration by tag name.
    pub fn get(&self, tag_name: &str) -> Option<&Registration> {
        self.components.get(tag_name)
    }

    /// Check if a tag is registered.
    pub fn contains(&self, tag_name: &str) -> bool {
        self.components.contains_key(tag_name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Registrations ordered by tag name.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.components.values()
    }

    /// Serialize the registry as a JSON manifest.
    pub fn to_manifest(&self) -> Result<String, RegistryError> {
        let manifest = Manifest {
            components: self.components.values().collect(),
        };

        serde_json::to_string_pretty(&manifest).map_err(|e| RegistryError::Manifest(e.to_string()))
    }
}

fn describe(registration: &Registration) -> String {
    if registration.source_dir.is_empty() {
        registration.script_file.clone()
    } else {
        format!("{}/{}", registration.source_dir, registration.script_file)
    }
}

/// Errors that can occur with the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Component tag '{tag}' registered by both {existing} and {incoming}")]
    DuplicateTag {
        tag: String,
        existing: String,
        incoming: String,
    },

    #[error("Failed to serialize manifest: {0}")]
    Manifest(String),
}
