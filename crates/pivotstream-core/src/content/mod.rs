//! Token model and the external content services that produce it.

use alloc::{string::String, vec::Vec};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod sample;
pub mod scripted;

/// One display/timing unit produced by the parse service.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    pub core: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefix: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub suffix: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub orp_index: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_pause_mult"))]
    pub pause_mult: f32,
}

impl Token {
    pub fn new(core: impl Into<String>, orp_index: usize, pause_mult: f32) -> Self {
        Self {
            core: core.into(),
            prefix: String::new(),
            suffix: String::new(),
            orp_index,
            pause_mult,
        }
    }

    pub fn with_decoration(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }
}

#[cfg(feature = "serde")]
fn default_pause_mult() -> f32 {
    1.0
}

/// Named structural position (chapter, section, page) in the token sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    /// Nesting depth, used for display indentation only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: u16,
    pub start_index: usize,
}

impl Anchor {
    pub fn new(title: impl Into<String>, level: u16, start_index: usize) -> Self {
        Self {
            title: title.into(),
            level,
            start_index,
        }
    }
}

/// Which kind of structure the loaded content exposes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnchorMode {
    None,
    Chapters,
    Pages { count: u32 },
}

/// Response of the parse service.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedText {
    pub tokens: Vec<Token>,
    pub chapters: Vec<Anchor>,
}

/// Response of an import service.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportedDocument {
    pub text: String,
    pub chapters: Vec<Anchor>,
    /// Page count for page-oriented input without chapter structure.
    pub pages: Option<u32>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImportKind {
    Epub,
    Pdf,
}

impl ImportKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Epub => "EPUB",
            Self::Pdf => "PDF",
        }
    }
}

/// Collaborator that turns raw text and documents into tokens.
///
/// Calls may fail at any time; the engine reports failures as status text and
/// leaves its state untouched.
pub trait ContentService {
    type Error: fmt::Display;

    fn parse(&mut self, text: &str) -> Result<ParsedText, Self::Error>;

    fn import(&mut self, kind: ImportKind, payload: &[u8]) -> Result<ImportedDocument, Self::Error>;
}

/// Failure reported by engine load operations after status text was set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadError {
    EmptyInput,
    ParseFailed,
    ImportFailed,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("no content to parse"),
            Self::ParseFailed => f.write_str("parse service failed"),
            Self::ImportFailed => f.write_str("import service failed"),
        }
    }
}
