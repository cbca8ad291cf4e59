/// Built-in text loaded by the "sample" action.
pub const SAMPLE_TEXT: &str = "\"Focus is the art of knowing what to ignore,\" wrote a thinker. \
RSVP reading keeps your gaze anchored while words flow through a fixed window. \
Punctuation slows the pace. Long words take a breath. \
Try adjusting the speed and jumping ahead or back by ten words.";
