//! Content assembler for single-file components.
//!
//! Turns the extracted sections of a component document into a plain script
//! that registers the component with the runtime library on load, plus the
//! component's stylesheet text.

pub mod assembler;
pub mod autolink;
pub mod options;
pub mod registry;
pub mod runtime;
pub mod script;
pub mod template;

pub use assembler::{assemble, normalize_separators, AssembledOutput, Assembler, Registration};
pub use autolink::autolink_snippet;
pub use options::{RegistrationMode, TransformOptions};
pub use registry::{ComponentRegistry, RegistryError};
pub use runtime::{ComponentRuntime, VueRuntime};
pub use script::{rewrite_default_export, strip_imports};
pub use template::escape_template;
