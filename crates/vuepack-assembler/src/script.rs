//! Line-anchored rewrites of the script section.
//!
//! These are textual rewrites, not a parse. Scripts that do not follow the
//! single-line `export default` convention produce best-effort output.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: import Name from './name.vue';
    Regex::new(r"(?m)^\s*import\s+(\S+)\s+from\s+([^;\n]+)[\s;]+?$")
        .expect("Invalid import regex")
});

static EXPORT_DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*export\s+default\s*").expect("Invalid export default regex")
});

/// Remove `import X from '...'` lines.
pub fn strip_imports(script: &str) -> String {
    IMPORT_RE.replace_all(script, "").into_owned()
}

/// Replace the first `export default` with `var <name> = <factory>(`.
///
/// The opened call is left unclosed; the caller appends `);`.
pub fn rewrite_default_export(script: &str, raw_name: &str, factory: &str) -> String {
    let replacement = format!("var {} = {}(", raw_name, factory);
    EXPORT_DEFAULT_RE
        .replacen(script, 1, NoExpand(&replacement))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_import_lines() {
        let script = "import Child from './Child.vue';\nimport Other from \"./Other\"\n\nexport default {}\n";

        assert_eq!(strip_imports(script), "\n\nexport default {}\n");
    }

    #[test]
    fn keeps_lines_that_only_look_like_imports() {
        let script = "// import Foo from './foo';\nvar s = \"import A from 'b';\";\nimport { a, b } from 'c';\nvar t = 1;\n";

        assert_eq!(strip_imports(script), script);
    }

    #[test]
    fn keeps_relative_order_of_remaining_lines() {
        let script = "var a = 1;\nimport B from './B.vue';\nvar c = 3;\nimport D from './D.vue';\nvar e = 5;\n";
        let stripped = strip_imports(script);

        let remaining: Vec<&str> = stripped.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(remaining, vec!["var a = 1;", "var c = 3;", "var e = 5;"]);
    }

    #[test]
    fn rewrites_export_default() {
        let script = "export default { name: 'x' }";

        assert_eq!(
            rewrite_default_export(script, "Hello", "Vue.extend"),
            "var Hello = Vue.extend({ name: 'x' }"
        );
    }

    #[test]
    fn rewrites_only_the_first_export() {
        let script = "export default {a: 1}\nexport default {b: 2}";
        let rewritten = rewrite_default_export(script, "X", "Vue.extend");

        assert_eq!(rewritten, "var X = Vue.extend({a: 1}\nexport default {b: 2}");
    }

    #[test]
    fn export_match_is_case_insensitive_and_indented() {
        let rewritten = rewrite_default_export("  Export  Default{}", "X", "Vue.extend");

        assert_eq!(rewritten, "var X = Vue.extend({}");
    }

    #[test]
    fn leaves_script_without_export_untouched() {
        let script = "var x = {};";

        assert_eq!(rewrite_default_export(script, "X", "Vue.extend"), script);
    }

    #[test]
    fn replacement_is_literal() {
        let rewritten = rewrite_default_export("export default {}", "$0", "Vue.extend");

        assert_eq!(rewritten, "var $0 = Vue.extend({}");
    }
}
