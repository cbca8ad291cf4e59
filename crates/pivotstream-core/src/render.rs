//! Pivot projection of tokens and the frame view model.

use alloc::string::String;

use crate::{
    app::MetaMode,
    content::{AnchorMode, Token},
    state::PlaybackState,
};

/// Three contiguous display zones around the pivot.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PivotView {
    pub left: String,
    pub pivot: String,
    pub right: String,
}

impl PivotView {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.pivot.is_empty() && self.right.is_empty()
    }
}

/// Split a token around its ORP.
///
/// `orp_index` counts chars of `core` and is clamped into range, so malformed
/// tokens still render. `None` yields the idle (blank) display.
pub fn render(token: Option<&Token>) -> PivotView {
    let Some(token) = token else {
        return PivotView::default();
    };

    let core = token.core.as_str();
    let char_count = core.chars().count();
    let index = token.orp_index.min(char_count.saturating_sub(1));

    let (pivot_start, pivot_end) = match core.char_indices().nth(index) {
        Some((start, ch)) => (start, start + ch.len_utf8()),
        None => (core.len(), core.len()),
    };

    let mut left = String::with_capacity(token.prefix.len() + pivot_start);
    left.push_str(&token.prefix);
    left.push_str(&core[..pivot_start]);

    let mut right = String::with_capacity(core.len() - pivot_end + token.suffix.len());
    right.push_str(&core[pivot_end..]);
    right.push_str(&token.suffix);

    PivotView {
        left,
        pivot: String::from(&core[pivot_start..pivot_end]),
        right,
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnchorView<'a> {
    pub label: &'a str,
    pub level: u16,
    pub active: bool,
}

/// Anchor side panel as seen by the display.
pub struct AnchorPanel<'a> {
    pub mode: AnchorMode,
    pub heading: &'a str,
    pub anchors: &'a [AnchorView<'a>],
}

/// App-level view model consumed by a display backend.
pub struct Frame<'a> {
    pub word: &'a PivotView,
    pub wpm: u16,
    pub state: PlaybackState,
    pub meta_mode: MetaMode,
    pub meta: &'a str,
    pub status: &'a str,
    pub position: usize,
    pub total: usize,
    pub ramp_armed: bool,
    pub anchors: AnchorPanel<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(view: &PivotView) -> String {
        let mut out = view.left.clone();
        out.push_str(&view.pivot);
        out.push_str(&view.right);
        out
    }

    #[test]
    fn none_renders_blank() {
        assert!(render(None).is_empty());
    }

    #[test]
    fn splits_around_orp() {
        let token = Token::new("Hello", 1, 1.0);
        let view = render(Some(&token));
        assert_eq!(view.left, "H");
        assert_eq!(view.pivot, "e");
        assert_eq!(view.right, "llo");
    }

    #[test]
    fn decoration_stays_outside_pivot() {
        let token = Token::new("ignore", 2, 1.5).with_decoration("\"", ",\"");
        let view = render(Some(&token));
        assert_eq!(view.left, "\"ig");
        assert_eq!(view.pivot, "n");
        assert_eq!(view.right, "ore,\"");
        assert_eq!(joined(&view), "\"ignore,\"");
    }

    #[test]
    fn out_of_range_orp_clamps_to_last_char() {
        let token = Token::new("cat", 9, 1.0);
        let view = render(Some(&token));
        assert_eq!(view.pivot, "t");
        assert_eq!(view.right, "");
    }

    #[test]
    fn empty_core_keeps_decoration() {
        let token = Token::new("", 3, 1.0).with_decoration("(", ")");
        let view = render(Some(&token));
        assert_eq!(view.left, "(");
        assert_eq!(view.pivot, "");
        assert_eq!(view.right, ")");
    }

    #[test]
    fn pivot_is_one_char_for_multibyte_words() {
        let words = ["señor", "naïve", "日本語", "a", "Übergrößenträger"];
        for word in words {
            for orp in 0..8 {
                let token = Token::new(word, orp, 1.0).with_decoration("¿", "?!");
                let view = render(Some(&token));
                assert_eq!(view.pivot.chars().count(), 1, "word={word} orp={orp}");
                assert_eq!(joined(&view), alloc::format!("¿{word}?!"));

                let expected = word.chars().nth(orp.min(word.chars().count() - 1));
                assert_eq!(view.pivot.chars().next(), expected);
            }
        }
    }
}
