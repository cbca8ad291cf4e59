use alloc::vec::Vec;
use core::ops::Range;

/// Run of the raw mirror text.
///
/// Whitespace runs and non-whitespace runs alternate. A non-whitespace run
/// counts as a word when it holds at least one alphanumeric char, which keeps
/// word indices aligned with the parse service's token order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    pub span: Range<usize>,
    pub is_word: bool,
    pub word_index: Option<usize>,
}

impl Segment {
    pub fn text<'a>(&self, raw: &'a str) -> &'a str {
        &raw[self.span.clone()]
    }
}

pub fn segment_text(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut next_word = 0usize;
    let mut chars = raw.char_indices().peekable();

    while let Some((start, first)) = chars.next() {
        let whitespace = first.is_whitespace();
        let mut has_core = !whitespace && first.is_alphanumeric();
        let mut end = start + first.len_utf8();

        while let Some(&(idx, ch)) = chars.peek() {
            if ch.is_whitespace() != whitespace {
                break;
            }
            has_core |= ch.is_alphanumeric();
            end = idx + ch.len_utf8();
            chars.next();
        }

        let is_word = !whitespace && has_core;
        let word_index = is_word.then(|| {
            let index = next_word;
            next_word += 1;
            index
        });
        segments.push(Segment {
            span: start..end,
            is_word,
            word_index,
        });
    }

    segments
}
