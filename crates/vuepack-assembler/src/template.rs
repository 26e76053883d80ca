//! Template string escaping.

/// Escape template markup as a single-quoted script string literal.
///
/// Single quotes are backslash-escaped and every line break (`\n` or `\r\n`)
/// becomes a backslash followed by `\n`, so the literal spans several source
/// lines while staying one string.
pub fn escape_template(template: &str) -> String {
    let escaped = template
        .replace('\'', "\\'")
        .replace("\r\n", "\n")
        .replace('\n', "\\\n");

    format!("'{}'", escaped)
}
