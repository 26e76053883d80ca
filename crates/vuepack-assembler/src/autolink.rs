//! Runtime stylesheet loader injected into packed scripts.

/// Substituted with the component's raw name.
const FILENAME_PLACEHOLDER: &str = "__VUEPACK_FILENAME__";

/// Locates the executing script (falling back to the last `<script>` on the
/// page) and links the stylesheet that sits next to it.
const AUTOLINK_TEMPLATE: &str = r#"
  (function(){
    function currentScriptBase() {
      var src, scripts;

      if (document.currentScript) {
        src = document.currentScript.src;
      } else {
        scripts = document.getElementsByTagName('script');
        src = scripts[scripts.length - 1].src;
      }

      return src.substring(0, src.lastIndexOf("/"));
    }

    var styleLink = document.createElement('link');
    styleLink.rel = "stylesheet";
    styleLink.href = currentScriptBase() + "/" + "__VUEPACK_FILENAME__.css";
    document.head.appendChild(styleLink);
  }());
"#;

/// Stylesheet loader snippet for the component named `raw_name`.
pub fn autolink_snippet(raw_name: &str) -> String {
    AUTOLINK_TEMPLATE.replace(FILENAME_PLACEHOLDER, raw_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_filename() {
        let snippet = autolink_snippet("Hello");

        assert!(snippet.contains("\"Hello.css\""));
        assert!(!snippet.contains(FILENAME_PLACEHOLDER));
    }

    #[test]
    fn falls_back_to_last_script_tag() {
        let snippet = autolink_snippet("Hello");

        assert!(snippet.contains("document.currentScript"));
        assert!(snippet.contains("getElementsByTagName('script')"));
        assert!(snippet.contains("document.head.appendChild(styleLink)"));
    }
}
