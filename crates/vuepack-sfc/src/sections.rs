//! Section extraction.

use crate::scanner::top_level_elements;

/// Kind of a recognized top-level section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Script,
    Template,
    Style,
}

impl SectionKind {
    /// Recognize a section from a tag name (case-insensitive).
    pub fn from_tag(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("script") {
            Some(Self::Script)
        } else if name.eq_ignore_ascii_case("template") {
            Some(Self::Template)
        } else if name.eq_ignore_ascii_case("style") {
            Some(Self::Style)
        } else {
            None
        }
    }
}

/// The raw sections of a component document.
///
/// Absent sections are empty strings. When a section kind appears more than
/// once, the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSections {
    /// Script text, verbatim
    pub script: String,

    /// Template inner markup, as written
    pub template: String,

    /// Style text with outer whitespace trimmed
    pub style: String,

    /// `lang` attribute of the style section, if declared
    pub style_lang: Option<String>,
}

impl ExtractedSections {
    /// Whether the document produces a script artifact.
    pub fn has_script(&self) -> bool {
        !self.script.is_empty()
    }
}

/// Extract the script, template and style sections of a document.
///
/// Only top-level elements are considered. Never fails: malformed markup
/// yields whatever sections could be found.
pub fn extract(document: &str) -> ExtractedSections {
    let mut sections = ExtractedSections::default();

    for element in top_level_elements(document) {
        match SectionKind::from_tag(&element.name) {
            Some(SectionKind::Script) => {
                sections.script = element.content.to_string();
            }
            Some(SectionKind::Template) => {
                sections.template = element.content.to_string();
            }
            Some(SectionKind::Style) => {
                sections.style = element.content.trim().to_string();
                sections.style_lang = element.attribute("lang").map(str::to_string);
            }
            None => {}
        }
    }

    sections
}
