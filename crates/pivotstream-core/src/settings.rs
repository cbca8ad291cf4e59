//! Persisted user settings abstraction.

use crate::app::MetaMode;

/// User-tunable settings that should survive a restart.
///
/// Ramp state is not persisted; each loaded text starts with the ramp enabled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PersistedSettings {
    pub wpm: u16,
    pub meta_mode: MetaMode,
}

impl PersistedSettings {
    pub const fn new(wpm: u16, meta_mode: MetaMode) -> Self {
        Self { wpm, meta_mode }
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}
