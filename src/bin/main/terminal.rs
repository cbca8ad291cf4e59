use std::io::{self, Write};

use log::debug;
use pivotstream_core::{mirror::MirrorSurface, render::Frame};

/// Mirror surface that keeps the reflected words in memory; the highlighted
/// word is echoed alongside each printed frame.
#[derive(Debug, Default)]
pub(super) struct TerminalSurface {
    words: Vec<String>,
    highlighted: Option<usize>,
    editable: bool,
}

impl TerminalSurface {
    pub(super) fn highlighted_word(&self) -> Option<&str> {
        self.highlighted
            .and_then(|index| self.words.get(index))
            .map(String::as_str)
    }
}

impl MirrorSurface for TerminalSurface {
    type Handle = usize;

    fn clear(&mut self) {
        self.words.clear();
        self.highlighted = None;
    }

    fn push_text(&mut self, _text: &str) {}

    fn push_word(&mut self, word_index: usize, text: &str) -> Self::Handle {
        self.words.push(text.to_owned());
        word_index
    }

    fn highlight(&mut self, handle: Self::Handle) {
        self.highlighted = Some(handle);
    }

    fn clear_highlight(&mut self, handle: Self::Handle) {
        if self.highlighted == Some(handle) {
            self.highlighted = None;
        }
    }

    fn set_editable(&mut self, editable: bool) {
        if self.editable != editable {
            debug!("mirror: editable={}", editable);
        }
        self.editable = editable;
    }
}

pub(super) fn print_frame(frame: &Frame<'_>, mirror_word: Option<&str>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write!(
        out,
        "\r\x1b[2K{:>16}[{}]{:<16} {:>3} wpm  {:<18} {:?}",
        frame.word.left,
        frame.word.pivot,
        frame.word.right,
        frame.wpm,
        frame.meta,
        frame.state
    )?;
    if frame.ramp_armed {
        out.write_all(b"  ramp")?;
    }
    if let Some(word) = mirror_word {
        write!(out, "  <{word}>")?;
    }
    if let Some(active) = frame.anchors.anchors.iter().find(|anchor| anchor.active) {
        write!(out, "  @ {}", active.label)?;
    }
    out.flush()
}

pub(super) fn print_status(status: &str, heading: &str) {
    println!();
    println!("{status} ({heading})");
}
