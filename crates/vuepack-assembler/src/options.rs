//! Transform options.

use serde::{Deserialize, Serialize};

/// Options that shape the assembled script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Inject a loader for the sibling `<Name>.css` when the component has styles
    pub auto_link_css: bool,

    /// Expected style language. Reserved for style preprocessing; the
    /// assembler does not read it.
    pub style_lang: String,

    /// How component registration is realized
    pub registration: RegistrationMode,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            auto_link_css: false,
            style_lang: "css".to_string(),
            registration: RegistrationMode::Inline,
        }
    }
}

/// How a packed component gets registered with the runtime library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationMode {
    /// The script registers itself under its tag name when loaded
    #[default]
    Inline,

    /// The script only exposes its global; registration is left to whoever
    /// consumes the returned [`Registration`](crate::Registration) descriptors
    Manifest,
}
