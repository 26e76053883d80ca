//! Single-file component section extraction.
//!
//! This crate splits a component document (`*.vue`) into its `script`,
//! `template` and `style` sections and derives the component's identity from
//! its file name.

pub mod identity;
pub mod scanner;
pub mod sections;

pub use identity::{tag_name, ComponentIdentity, IdentityError};
pub use scanner::{top_level_elements, Attribute, Element};
pub use sections::{extract, ExtractedSections, SectionKind};
