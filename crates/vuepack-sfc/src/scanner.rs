//! Lenient scanner for the top-level elements of a component document.
//!
//! This is not a full HTML parser. It only finds element boundaries at the
//! top level of the document and never fails: unclosed elements run to the end
//! of input and stray closing tags are skipped.

/// Elements whose content is raw text, ending at the first matching close tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Elements that never have content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// A top-level element found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    /// Tag name, lowercased
    pub name: String,

    /// Attributes in source order
    pub attributes: Vec<Attribute<'a>>,

    /// Raw source between the opening and the matching closing tag
    pub content: &'a str,
}

impl<'a> Element<'a> {
    /// Look up an attribute value by name (case-insensitive).
    ///
    /// Boolean attributes without a value return `Some("")`.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.unwrap_or(""))
    }
}

/// An attribute on an opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name, lowercased
    pub name: String,

    /// Attribute value with quotes removed, if one was given
    pub value: Option<&'a str>,
}

/// A parsed opening tag.
#[derive(Debug)]
struct OpenTag<'a> {
    name: String,
    attributes: Vec<Attribute<'a>>,
    /// Byte offset just past the closing `>`
    end: usize,
    self_closing: bool,
}

/// Collect the top-level elements of `source` in document order.
pub fn top_level_elements(source: &str) -> Vec<Element<'_>> {
    let mut elements = Vec::new();
    let mut pos = 0;

    while let Some(offset) = source[pos..].find('<') {
        let start = pos + offset;
        let rest = &source[start..];

        if rest.starts_with("<!--") {
            pos = skip_comment(source, start);
            continue;
        }

        // Stray closing tags, doctypes and processing instructions
        if rest.starts_with("</") || rest.starts_with("<!") || rest.starts_with("<?") {
            pos = skip_past_gt(source, start + 1);
            continue;
        }

        let Some(tag) = parse_open_tag(source, start) else {
            pos = start + 1;
            continue;
        };

        let (content, next) = element_body(source, &tag);
        elements.push(Element {
            name: tag.name,
            attributes: tag.attributes,
            content,
        });
        pos = next;
    }

    elements
}

/// Find the content of an element and the offset where scanning resumes.
fn element_body<'a>(source: &'a str, tag: &OpenTag<'_>) -> (&'a str, usize) {
    if tag.self_closing || is_void(&tag.name) {
        return ("", tag.end);
    }

    let close = if is_raw_text(&tag.name) {
        find_raw_text_close(source, tag.end, &tag.name)
    } else {
        find_matching_close(source, tag.end, &tag.name)
    };

    match close {
        Some((close_start, after)) => (&source[tag.end..close_start], after),
        None => (&source[tag.end..], source.len()),
    }
}

/// Parse an opening tag starting at `start` (which points at `<`).
///
/// Returns `None` when the `<` does not begin a tag, e.g. `a < b` in text.
fn parse_open_tag(source: &str, start: usize) -> Option<OpenTag<'_>> {
    let bytes = source.as_bytes();
    let name_start = start + 1;

    if !bytes.get(name_start)?.is_ascii_alphabetic() {
        return None;
    }

    let name = read_name(source, name_start);
    let mut pos = name_start + name.len();
    let mut attributes = Vec::new();

    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        match bytes.get(pos) {
            None => {
                return Some(OpenTag {
                    name: name.to_ascii_lowercase(),
                    attributes,
                    end: bytes.len(),
                    self_closing: false,
                });
            }
            Some(b'>') => {
                return Some(OpenTag {
                    name: name.to_ascii_lowercase(),
                    attributes,
                    end: pos + 1,
                    self_closing: false,
                });
            }
            Some(b'/') if bytes.get(pos + 1) == Some(&b'>') => {
                return Some(OpenTag {
                    name: name.to_ascii_lowercase(),
                    attributes,
                    end: pos + 2,
                    self_closing: true,
                });
            }
            Some(b'/') => {
                pos += 1;
                continue;
            }
            Some(_) => {}
        }

        let attr_start = pos;
        while pos < bytes.len()
            && !matches!(bytes[pos], b'=' | b'>' | b'/')
            && !bytes[pos].is_ascii_whitespace()
        {
            pos += 1;
        }
        let attr_name = &source[attr_start..pos];

        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let mut value = None;
        if bytes.get(pos) == Some(&b'=') {
            pos += 1;
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }

            match bytes.get(pos) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let value_start = pos + 1;
                    let value_end = source[value_start..]
                        .find(quote as char)
                        .map(|i| value_start + i)
                        .unwrap_or(bytes.len());
                    value = Some(&source[value_start..value_end]);
                    pos = (value_end + 1).min(bytes.len());
                }
                _ => {
                    let value_start = pos;
                    while pos < bytes.len()
                        && bytes[pos] != b'>'
                        && !bytes[pos].is_ascii_whitespace()
                    {
                        pos += 1;
                    }
                    value = Some(&source[value_start..pos]);
                }
            }
        }

        if !attr_name.is_empty() {
            attributes.push(Attribute {
                name: attr_name.to_ascii_lowercase(),
                value,
            });
        }
    }
}

/// Find the close tag of a non-raw element, counting nested same-name tags.
///
/// Returns `(close_tag_start, offset_after_close_tag)`.
fn find_matching_close(source: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let mut depth = 1;
    let mut pos = from;

    while let Some(offset) = source[pos..].find('<') {
        let at = pos + offset;
        let rest = &source[at..];

        if rest.starts_with("<!--") {
            pos = skip_comment(source, at);
            continue;
        }

        if rest.starts_with("</") {
            let close_name = read_name(source, at + 2);
            let after = skip_past_gt(source, at + 2);
            if close_name.eq_ignore_ascii_case(name) {
                depth -= 1;
                if depth == 0 {
                    return Some((at, after));
                }
            }
            pos = after;
            continue;
        }

        match parse_open_tag(source, at) {
            Some(tag) if tag.self_closing || is_void(&tag.name) => pos = tag.end,
            Some(tag) if is_raw_text(&tag.name) => {
                pos = find_raw_text_close(source, tag.end, &tag.name)
                    .map(|(_, after)| after)
                    .unwrap_or(source.len());
            }
            Some(tag) => {
                if tag.name == name {
                    depth += 1;
                }
                pos = tag.end;
            }
            None => pos = at + 1,
        }
    }

    None
}

/// Find the first case-insensitive `</name` that closes a raw-text element.
fn find_raw_text_close(source: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let mut pos = from;

    while let Some(offset) = source[pos..].find("</") {
        let at = pos + offset;
        let name_start = at + 2;
        let name_end = name_start + name.len();

        let name_matches = source
            .get(name_start..name_end)
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name));
        let terminated = source
            .as_bytes()
            .get(name_end)
            .map_or(true, |b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/');

        if name_matches && terminated {
            return Some((at, skip_past_gt(source, name_end)));
        }
        pos = at + 2;
    }

    None
}

/// Read a tag name starting at `from`.
fn read_name(source: &str, from: usize) -> &str {
    let bytes = source.as_bytes();
    let mut end = from;
    while end < bytes.len()
        && !matches!(bytes[end], b'/' | b'>')
        && !bytes[end].is_ascii_whitespace()
    {
        end += 1;
    }
    &source[from..end]
}

fn skip_comment(source: &str, start: usize) -> usize {
    source[start + 4..]
        .find("-->")
        .map(|i| start + 4 + i + 3)
        .unwrap_or(source.len())
}

fn skip_past_gt(source: &str, from: usize) -> usize {
    source[from..]
        .find('>')
        .map(|i| from + i + 1)
        .unwrap_or(source.len())
}

fn is_raw_text(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}
