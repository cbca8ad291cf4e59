//! Input abstraction layer.

pub mod mock;

/// Logical actions consumed by the playback engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Pause while playing, play otherwise.
    TogglePlay,
    Play,
    Pause,
    Resume,
    Restart,
    /// Jump back by the configured word step.
    Back,
    /// Jump forward by the configured word step.
    Forward,
    ToggleMeta,
    /// Lock the current speed and stop the ramp.
    Stabilize(StabilizeSource),
    JumpToAnchor(usize),
    LoadSample,
}

/// Where a stabilize request came from; each has its own status line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StabilizeSource {
    /// On-screen control or its `s` shortcut.
    Control,
    /// The Ctrl+K hotkey.
    Hotkey,
}

impl Command {
    /// Keyboard shortcut mapping. Letters are case-insensitive.
    pub fn from_key(key: char, ctrl: bool) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        if ctrl {
            return (key == 'k').then_some(Self::Stabilize(StabilizeSource::Hotkey));
        }

        match key {
            ' ' => Some(Self::TogglePlay),
            'r' => Some(Self::Restart),
            'j' => Some(Self::Back),
            'l' => Some(Self::Forward),
            'c' => Some(Self::ToggleMeta),
            's' => Some(Self::Stabilize(StabilizeSource::Control)),
            _ => None,
        }
    }
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<Command>, Self::Error>;
}
