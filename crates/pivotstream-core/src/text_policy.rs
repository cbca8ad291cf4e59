//! Shared text shaping and truncation policies for labels and status lines.

use alloc::{borrow::Cow, format, string::String};
use core::fmt::{self, Write};

use crate::app::MetaMode;

pub const ANCHOR_LABEL_MAX_CHARS: usize = 52;
const ELLIPSIS: &str = "...";

/// Cap an anchor title for the side panel.
///
/// Titles over `max_chars` are cut to leave room for `...`, right trimmed and
/// suffixed. Empty titles fall back to `Chapter {number}`.
pub fn cap_anchor_label(title: &str, number: usize, max_chars: usize) -> Cow<'_, str> {
    if title.is_empty() {
        return Cow::Owned(format!("Chapter {number}"));
    }
    if title.chars().count() <= max_chars {
        return Cow::Borrowed(title);
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let cut = title
        .char_indices()
        .nth(keep)
        .map_or(title.len(), |(idx, _)| idx);
    let mut out = String::from(title[..cut].trim_end());
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

/// Progress text shown beside the pivot.
pub fn write_meta<W: Write>(
    out: &mut W,
    mode: MetaMode,
    cursor: usize,
    total: usize,
    words_per_page: usize,
) -> fmt::Result {
    let shown = if total == 0 {
        0
    } else {
        cursor.saturating_add(1).min(total)
    };

    match mode {
        MetaMode::Words => write!(out, "{shown} / {total}"),
        MetaMode::Percent if total == 0 => out.write_str("0% / 0 pages"),
        MetaMode::Percent => {
            let per_page = words_per_page.max(1);
            let percent = (shown * 100 + total / 2) / total;
            let pages = total.div_ceil(per_page).max(1);
            let page = shown.div_ceil(per_page).clamp(1, pages);
            write!(out, "{percent}% / {page} / {pages} pages")
        }
    }
}

/// Replace `out` with `args`, truncating on a char boundary when full.
pub fn set_bounded<const N: usize>(out: &mut heapless::String<N>, args: fmt::Arguments<'_>) {
    out.clear();
    let _ = BoundedWriter { out }.write_fmt(args);
}

struct BoundedWriter<'a, const N: usize> {
    out: &'a mut heapless::String<N>,
}

impl<const N: usize> Write for BoundedWriter<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.out.push(ch).is_err() {
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}
