//! Assembles extracted sections into the packed script and stylesheet.

use serde::Serialize;
use vuepack_sfc::{ComponentIdentity, ExtractedSections};

use crate::autolink::autolink_snippet;
use crate::options::{RegistrationMode, TransformOptions};
use crate::runtime::{ComponentRuntime, VueRuntime};
use crate::script::{rewrite_default_export, strip_imports};
use crate::template::escape_template;

/// Final texts produced for one component document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledOutput {
    /// Packed script; empty when the document has no script section
    pub script: String,

    /// Stylesheet text (the trimmed style section)
    pub style: String,

    /// Registration descriptor; `None` when no script was produced
    pub registration: Option<Registration>,
}

/// Describes how a packed component registers with the runtime library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Global variable the script exposes (the raw component name)
    pub global_name: String,

    /// Registration key in the runtime's component registry
    pub tag_name: String,

    /// Directory of the source document, with `/` separators
    pub source_dir: String,

    /// Script artifact file name
    pub script_file: String,

    /// Stylesheet artifact file name, when the component has styles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_file: Option<String>,
}

/// Assembles packed scripts for a given runtime library.
#[derive(Debug, Clone)]
pub struct Assembler<R = VueRuntime> {
    runtime: R,
    options: TransformOptions,
}

impl Assembler<VueRuntime> {
    /// Create an assembler targeting the Vue global build.
    pub fn new(options: TransformOptions) -> Self {
        Self::with_runtime(VueRuntime::new(), options)
    }
}

impl<R: ComponentRuntime> Assembler<R> {
    /// Create an assembler targeting a custom runtime library.
    pub fn with_runtime(runtime: R, options: TransformOptions) -> Self {
        Self { runtime, options }
    }

    /// Options this assembler was created with.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Runtime library this assembler targets.
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Assemble the packed script and stylesheet for one document.
    ///
    /// `file_dir` is the directory of the source document. Never fails:
    /// a script that does not follow the `export default` convention yields
    /// best-effort output.
    pub fn assemble(
        &self,
        sections: &ExtractedSections,
        identity: &ComponentIdentity,
        file_dir: &str,
    ) -> AssembledOutput {
        if !sections.has_script() {
            return AssembledOutput {
                script: String::new(),
                style: sections.style.clone(),
                registration: None,
            };
        }

        let name = &identity.raw_name;
        let library = self.runtime.library();
        let has_style = !sections.style.is_empty();

        let mut script = format!("(function(global, {}){{\n  ", library);

        if self.options.auto_link_css && has_style {
            script.push_str(&autolink_snippet(name));
        }

        script.push_str(&self.rewrite_script(&sections.script, name, &sections.template));

        script.push_str(&format!("\n\nglobal.{name} = {name};\n\n"));

        if self.options.registration == RegistrationMode::Inline {
            script.push_str(&self.runtime.register_call(&identity.tag_name, name));
            script.push_str("\n\n");
        }

        script.push_str(&format!(
            "\n}}({}, {}));",
            self.runtime.global_context(),
            library
        ));

        let registration = Registration {
            global_name: name.clone(),
            tag_name: identity.tag_name.clone(),
            source_dir: normalize_separators(file_dir),
            script_file: format!("{}.js", name),
            style_file: has_style.then(|| format!("{}.css", name)),
        };

        AssembledOutput {
            script,
            style: sections.style.clone(),
            registration: Some(registration),
        }
    }

    /// Turn the module-style script into a factory call and attach the template.
    fn rewrite_script(&self, script: &str, name: &str, template: &str) -> String {
        let stripped = strip_imports(script);
        let mut rewritten = rewrite_default_export(&stripped, name, &self.runtime.factory());

        rewritten.push_str(");\n");
        rewritten.push_str(&format!(
            "{}.options.template = {};",
            name,
            escape_template(template)
        ));

        rewritten
    }
}

/// Assemble a document for the Vue global build.
pub fn assemble(
    sections: &ExtractedSections,
    identity: &ComponentIdentity,
    file_dir: &str,
    options: &TransformOptions,
) -> AssembledOutput {
    Assembler::new(options.clone()).assemble(sections, identity, file_dir)
}

/// Normalize path separators to `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
