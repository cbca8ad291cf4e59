use alloc::{string::String, vec::Vec};
use core::fmt;

use super::{ContentService, ImportKind, ImportedDocument, ParsedText};

/// Content service answering from canned responses.
///
/// Useful for bring-up and for replaying recorded collaborator output.
#[derive(Clone, Debug, Default)]
pub struct ScriptedContent {
    parsed: Option<ParsedText>,
    imported: Option<ImportedDocument>,
    import_error: Option<&'static str>,
    parse_requests: Vec<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScriptedError(pub &'static str);

impl fmt::Display for ScriptedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl ScriptedContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parse(mut self, parsed: ParsedText) -> Self {
        self.parsed = Some(parsed);
        self
    }

    pub fn with_import(mut self, document: ImportedDocument) -> Self {
        self.imported = Some(document);
        self.import_error = None;
        self
    }

    pub fn with_import_error(mut self, message: &'static str) -> Self {
        self.import_error = Some(message);
        self
    }

    pub fn set_parse(&mut self, parsed: Option<ParsedText>) {
        self.parsed = parsed;
    }

    /// Texts received by `parse`, oldest first.
    pub fn parse_requests(&self) -> &[String] {
        &self.parse_requests
    }
}

impl ContentService for ScriptedContent {
    type Error = ScriptedError;

    fn parse(&mut self, text: &str) -> Result<ParsedText, Self::Error> {
        self.parse_requests.push(String::from(text));
        self.parsed.clone().ok_or(ScriptedError("Parse failed"))
    }

    fn import(
        &mut self,
        kind: ImportKind,
        _payload: &[u8],
    ) -> Result<ImportedDocument, Self::Error> {
        if let Some(message) = self.import_error {
            return Err(ScriptedError(message));
        }
        self.imported.clone().ok_or(match kind {
            ImportKind::Epub => ScriptedError("EPUB import failed"),
            ImportKind::Pdf => ScriptedError("PDF import failed"),
        })
    }
}
