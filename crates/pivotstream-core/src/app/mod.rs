//! Playback engine: pacing chain, ramp, navigation, and mirror sync.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use log::{debug, info, warn};

use crate::{
    content::{
        Anchor, AnchorMode, ContentService, ImportKind, LoadError, ParsedText, Token,
        sample::SAMPLE_TEXT,
    },
    input::{Command, InputProvider, StabilizeSource},
    mirror::{Mirror, MirrorSurface},
    pacing::token_delay_ms,
    ramp::{AnchorRampPolicy, RampConfig, RampController, RampTick},
    render::{AnchorPanel, AnchorView, Frame, PivotView, render},
    settings::PersistedSettings,
    state::{PlaybackEvent, PlaybackState},
    text_policy::{ANCHOR_LABEL_MAX_CHARS, cap_anchor_label, set_bounded, write_meta},
    timer::TimerSlot,
};

const STATUS_BYTES: usize = 96;
const META_BYTES: usize = 48;
const HEADING_BYTES: usize = 32;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Progress display mode beside the pivot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MetaMode {
    #[default]
    Words,
    Percent,
}

impl MetaMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Words => Self::Percent,
            Self::Percent => Self::Words,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    pub wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
    pub ramp: RampConfig,
    pub anchor_ramp_policy: AnchorRampPolicy,
    pub reparse_debounce_ms: u32,
    pub words_per_page: usize,
    /// Word step for the back/forward commands.
    pub jump_words: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            wpm: 300,
            min_wpm: 100,
            max_wpm: 800,
            ramp: RampConfig::default(),
            anchor_ramp_policy: AnchorRampPolicy::Preserve,
            reparse_debounce_ms: 150,
            words_per_page: 300,
            jump_words: 10,
        }
    }
}

/// Owns every piece of mutable playback state.
///
/// Hosts call [`PlaybackEngine::tick`] from a single-threaded loop and route
/// user actions through the public operations; nothing else mutates the
/// cursor, speed, or timers.
pub struct PlaybackEngine<CS, MS, IN>
where
    CS: ContentService,
    MS: MirrorSurface,
    IN: InputProvider,
{
    content: CS,
    mirror: Mirror<MS>,
    input: IN,
    config: EngineConfig,
    tokens: Vec<Token>,
    anchors: Vec<Anchor>,
    anchor_labels: Vec<String>,
    anchor_mode: AnchorMode,
    active_anchor: Option<usize>,
    /// `0..=tokens.len()`; `tokens.len()` once finished.
    cursor: usize,
    wpm: u16,
    state: PlaybackState,
    chain: TimerSlot,
    ramp: RampController,
    word: PivotView,
    meta_mode: MetaMode,
    status: heapless::String<STATUS_BYTES>,
    pending_redraw: bool,
    words_since_drain: u32,
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");
include!("navigation.rs");
include!("loading.rs");
