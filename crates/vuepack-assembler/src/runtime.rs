//! Runtime component library policy.

/// Call forms of the component library the packed scripts target.
pub trait ComponentRuntime: Send + Sync {
    /// Runtime identifier (e.g. "vue")
    fn name(&self) -> &'static str;

    /// Identifier the library is bound to inside the wrapper function
    fn library(&self) -> &str;

    /// Expression for the global execution context passed to the wrapper
    fn global_context(&self) -> &str;

    /// Component definition factory, called with the component options.
    fn factory(&self) -> String {
        format!("{}.extend", self.library())
    }

    /// Statement registering `variable` under `tag_name`.
    fn register_call(&self, tag_name: &str, variable: &str) -> String {
        format!("{}.component('{}', {});", self.library(), tag_name, variable)
    }
}

/// Vue 2 global build (`Vue.extend` / `Vue.component`).
#[derive(Debug, Default, Clone, Copy)]
pub struct VueRuntime;

impl VueRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl ComponentRuntime for VueRuntime {
    fn name(&self) -> &'static str {
        "vue"
    }

    fn library(&self) -> &str {
        "Vue"
    }

    fn global_context(&self) -> &str {
        "window"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vue_call_forms() {
        let runtime = VueRuntime::new();

        assert_eq!(runtime.name(), "vue");
        assert_eq!(runtime.factory(), "Vue.extend");
        assert_eq!(
            runtime.register_call("foo-bar", "FooBar"),
            "Vue.component('foo-bar', FooBar);"
        );
    }
}
