use std::{fmt, fs, io, path::Path};

use pivotstream_core::content::{
    Anchor, ImportKind, ImportedDocument, ParsedText, Token, scripted::ScriptedContent,
};
use serde::Deserialize;

/// Recorded collaborator output replayed through the engine.
///
/// `tokens` and `chapters` are the parse response; `pages` or a non-empty
/// `chapters` list makes the runner go through the import path.
#[derive(Debug, Deserialize)]
pub(super) struct ReplayDocument {
    pub(super) text: String,
    #[serde(default)]
    pub(super) tokens: Vec<Token>,
    #[serde(default)]
    pub(super) chapters: Vec<Anchor>,
    #[serde(default)]
    pub(super) pages: Option<u32>,
    #[serde(default)]
    pub(super) kind: ReplayKind,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(super) enum ReplayKind {
    #[default]
    Text,
    Epub,
    Pdf,
}

#[derive(Debug)]
pub(super) enum ReplayError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read replay: {err}"),
            Self::Json(err) => write!(f, "malformed replay: {err}"),
        }
    }
}

impl ReplayDocument {
    pub(super) fn load(path: &Path) -> Result<Self, ReplayError> {
        let raw = fs::read_to_string(path).map_err(ReplayError::Io)?;
        serde_json::from_str(&raw).map_err(ReplayError::Json)
    }

    /// Import kind to replay, if the document came from a file import.
    pub(super) fn import_kind(&self) -> Option<ImportKind> {
        match self.kind {
            ReplayKind::Epub => Some(ImportKind::Epub),
            ReplayKind::Pdf => Some(ImportKind::Pdf),
            ReplayKind::Text if self.pages.is_some() => Some(ImportKind::Pdf),
            ReplayKind::Text if !self.chapters.is_empty() => Some(ImportKind::Epub),
            ReplayKind::Text => None,
        }
    }

    pub(super) fn into_content(self) -> (ScriptedContent, String) {
        let parsed = ParsedText {
            tokens: self.tokens,
            chapters: Vec::new(),
        };
        let content = ScriptedContent::new()
            .with_parse(parsed)
            .with_import(ImportedDocument {
                text: self.text.clone(),
                chapters: self.chapters,
                pages: self.pages,
            });
        (content, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_replay_skips_import() {
        let doc: ReplayDocument = serde_json::from_str(
            r#"{"text":"Hello world","tokens":[{"core":"Hello","orp_index":1}]}"#,
        )
        .unwrap();
        assert_eq!(doc.import_kind(), None);
        assert_eq!(doc.tokens[0].pause_mult, 1.0);
    }

    #[test]
    fn pages_imply_pdf_import() {
        let doc: ReplayDocument =
            serde_json::from_str(r#"{"text":"a b","pages":4}"#).unwrap();
        assert_eq!(doc.import_kind(), Some(ImportKind::Pdf));
    }

    #[test]
    fn chapters_imply_epub_import() {
        let doc: ReplayDocument = serde_json::from_str(
            r#"{"text":"a b","chapters":[{"title":"One","start_index":0}]}"#,
        )
        .unwrap();
        assert_eq!(doc.import_kind(), Some(ImportKind::Epub));
    }
}
