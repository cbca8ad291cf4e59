//! Editable mirror of the source text with word-level highlight tracking.

use alloc::{string::String, vec::Vec};

use log::debug;

use crate::timer::TimerSlot;

mod segment;

pub use segment::{Segment, segment_text};

/// Display capability the mirror draws into.
///
/// Word elements are addressed through opaque handles returned by
/// [`MirrorSurface::push_word`]; the mirror never inspects them.
pub trait MirrorSurface {
    type Handle: Copy;

    /// Drop every element of the previous reflection.
    fn clear(&mut self);

    /// Append non-word text verbatim, line breaks included.
    fn push_text(&mut self, text: &str);

    /// Append an addressable word element.
    fn push_word(&mut self, word_index: usize, text: &str) -> Self::Handle;

    fn highlight(&mut self, handle: Self::Handle);

    fn clear_highlight(&mut self, handle: Self::Handle);

    /// Bring the element into view without an abrupt jump.
    fn reveal(&mut self, _handle: Self::Handle) {}

    fn set_editable(&mut self, editable: bool);
}

pub struct Mirror<S: MirrorSurface> {
    surface: S,
    raw: String,
    segments: Vec<Segment>,
    /// Word index -> surface handle.
    handles: Vec<S::Handle>,
    active: Option<usize>,
    resegment: TimerSlot,
    debounce_ms: u32,
    editable: bool,
}

impl<S: MirrorSurface> Mirror<S> {
    pub fn new(mut surface: S, debounce_ms: u32) -> Self {
        surface.clear();
        surface.set_editable(true);
        Self {
            surface,
            raw: String::new(),
            segments: Vec::new(),
            handles: Vec::new(),
            active: None,
            resegment: TimerSlot::new(),
            debounce_ms,
            editable: true,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn word_count(&self) -> usize {
        self.handles.len()
    }

    pub fn active_word(&self) -> Option<usize> {
        self.active
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_resegment_pending(&self) -> bool {
        self.resegment.is_armed()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.resegment.due_ms()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Record an edit and schedule re-segmentation.
    ///
    /// A newer edit replaces a pending one; only the last text is segmented.
    pub fn edit(&mut self, text: &str, now_ms: u64) {
        self.raw.clear();
        self.raw.push_str(text);
        self.clear_highlight();
        self.resegment.arm_once(now_ms, self.debounce_ms);
    }

    /// Replace the text and rebuild right away.
    pub fn set_text(&mut self, text: &str) {
        self.raw.clear();
        self.raw.push_str(text);
        self.rebuild();
    }

    /// Run a due re-segmentation. Returns whether the reflection was rebuilt.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.resegment.poll(now_ms).is_none() {
            return false;
        }
        self.rebuild_segments();
        true
    }

    /// Re-segment the current text immediately, dropping any pending edit task.
    pub fn rebuild(&mut self) {
        self.resegment.cancel();
        self.rebuild_segments();
    }

    fn rebuild_segments(&mut self) {
        self.segments = segment_text(&self.raw);
        self.active = None;
        self.handles.clear();
        self.surface.clear();

        for segment in &self.segments {
            let text = segment.text(&self.raw);
            match segment.word_index {
                Some(word_index) => {
                    let handle = self.surface.push_word(word_index, text);
                    self.handles.push(handle);
                }
                None => self.surface.push_text(text),
            }
        }
        debug!(
            "mirror: rebuilt segments={} words={}",
            self.segments.len(),
            self.handles.len()
        );
    }

    /// Move the highlight to `word_index`. Returns whether a word was found.
    pub fn highlight(&mut self, word_index: usize) -> bool {
        if self.active == Some(word_index) {
            return true;
        }
        self.clear_highlight();

        let Some(&handle) = self.handles.get(word_index) else {
            return false;
        };
        self.surface.highlight(handle);
        self.surface.reveal(handle);
        self.active = Some(word_index);
        true
    }

    pub fn clear_highlight(&mut self) {
        if let Some(previous) = self.active.take()
            && let Some(&handle) = self.handles.get(previous)
        {
            self.surface.clear_highlight(handle);
        }
    }

    pub fn set_editable(&mut self, editable: bool) {
        if self.editable != editable {
            self.editable = editable;
            self.surface.set_editable(editable);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Surface recording every call for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub rendered: String,
        pub words: Vec<String>,
        pub highlighted: Option<usize>,
        pub highlight_calls: usize,
        pub revealed: Vec<usize>,
        pub editable: bool,
        pub clears: usize,
    }

    impl MirrorSurface for RecordingSurface {
        type Handle = usize;

        fn clear(&mut self) {
            self.rendered.clear();
            self.words.clear();
            self.highlighted = None;
            self.clears += 1;
        }

        fn push_text(&mut self, text: &str) {
            self.rendered.push_str(text);
        }

        fn push_word(&mut self, word_index: usize, text: &str) -> Self::Handle {
            self.rendered.push_str(text);
            self.words.push(String::from(text));
            word_index
        }

        fn highlight(&mut self, handle: Self::Handle) {
            assert!(self.highlighted.is_none(), "two words highlighted");
            self.highlighted = Some(handle);
            self.highlight_calls += 1;
        }

        fn clear_highlight(&mut self, handle: Self::Handle) {
            assert_eq!(self.highlighted, Some(handle));
            self.highlighted = None;
        }

        fn reveal(&mut self, handle: Self::Handle) {
            self.revealed.push(handle);
        }

        fn set_editable(&mut self, editable: bool) {
            self.editable = editable;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{testing::RecordingSurface, *};

    #[test]
    fn rebuild_reflects_text_verbatim() {
        let mut mirror = Mirror::new(RecordingSurface::default(), 150);
        mirror.set_text("One two,\nthree -- four");

        let surface = mirror.surface();
        assert_eq!(surface.rendered, "One two,\nthree -- four");
        assert_eq!(surface.words, ["One", "two,", "three", "four"]);
        assert_eq!(mirror.word_count(), 4);
    }

    #[test]
    fn highlight_moves_between_words() {
        let mut mirror = Mirror::new(RecordingSurface::default(), 150);
        mirror.set_text("alpha beta gamma");

        assert!(mirror.highlight(0));
        assert!(mirror.highlight(2));
        assert_eq!(mirror.surface().highlighted, Some(2));
        assert_eq!(mirror.surface().revealed, [0, 2]);

        assert!(!mirror.highlight(9));
        assert_eq!(mirror.surface().highlighted, None);
        assert_eq!(mirror.active_word(), None);
    }

    #[test]
    fn edits_debounce_with_last_write_winning() {
        let mut mirror = Mirror::new(RecordingSurface::default(), 150);
        mirror.set_text("old words");
        mirror.highlight(1);

        mirror.edit("first draft", 1_000);
        assert_eq!(mirror.surface().highlighted, None);
        mirror.edit("second draft here", 1_100);

        assert!(!mirror.poll(1_200));
        assert!(mirror.poll(1_250));
        assert_eq!(mirror.surface().words, ["second", "draft", "here"]);
        assert!(!mirror.poll(5_000));
    }

    #[test]
    fn immediate_rebuild_cancels_pending_edit() {
        let mut mirror = Mirror::new(RecordingSurface::default(), 150);
        mirror.edit("pending text", 0);
        mirror.rebuild();
        assert!(!mirror.is_resegment_pending());
        assert!(!mirror.poll(1_000));
        assert_eq!(mirror.surface().words, ["pending", "text"]);
    }

    #[test]
    fn editability_forwards_changes_only() {
        let mut mirror = Mirror::new(RecordingSurface::default(), 150);
        assert!(mirror.surface().editable);
        mirror.set_editable(false);
        assert!(!mirror.surface().editable);
        assert!(!mirror.is_editable());
    }
}
