use std::{fmt, fs, io, path::PathBuf};

use log::warn;
use pivotstream_core::{
    app::MetaMode,
    settings::{PersistedSettings, SettingsStore},
};
use serde::{Deserialize, Serialize};

use super::SETTINGS_SAVE_DEBOUNCE_MS;

pub(super) struct SettingsSyncState {
    last_saved: PersistedSettings,
    pending: Option<(PersistedSettings, u64)>,
}

impl SettingsSyncState {
    pub(super) fn new(initial: PersistedSettings) -> Self {
        Self {
            last_saved: initial,
            pending: None,
        }
    }

    pub(super) fn track_current(&mut self, current: PersistedSettings, now_ms: u64) {
        if current == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, changed_at_ms)) => {
                if *pending != current {
                    *pending = current;
                    *changed_at_ms = now_ms;
                }
            }
            None => {
                self.pending = Some((current, now_ms));
            }
        }
    }

    pub(super) fn flush_if_due<S: SettingsStore>(&mut self, store: Option<&mut S>, now_ms: u64) {
        let Some((candidate, changed_at_ms)) = self.pending else {
            return;
        };

        if now_ms.saturating_sub(changed_at_ms) < SETTINGS_SAVE_DEBOUNCE_MS {
            return;
        }
        self.flush(store, candidate, now_ms);
    }

    /// Write any pending change regardless of the debounce.
    pub(super) fn flush_now<S: SettingsStore>(&mut self, store: Option<&mut S>, now_ms: u64) {
        if let Some((candidate, _)) = self.pending {
            self.flush(store, candidate, now_ms);
        }
    }

    fn flush<S: SettingsStore>(
        &mut self,
        store: Option<&mut S>,
        candidate: PersistedSettings,
        now_ms: u64,
    ) {
        match store {
            Some(store) => {
                if store.save(&candidate).is_ok() {
                    self.last_saved = candidate;
                    self.pending = None;
                } else {
                    warn!("settings: save failed wpm={}", candidate.wpm);
                    self.pending = Some((candidate, now_ms));
                }
            }
            None => {
                self.last_saved = candidate;
                self.pending = None;
            }
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct StoredSettings {
    wpm: u16,
    #[serde(default)]
    percent_meta: bool,
}

impl From<PersistedSettings> for StoredSettings {
    fn from(settings: PersistedSettings) -> Self {
        Self {
            wpm: settings.wpm,
            percent_meta: settings.meta_mode == MetaMode::Percent,
        }
    }
}

impl From<StoredSettings> for PersistedSettings {
    fn from(stored: StoredSettings) -> Self {
        let meta_mode = if stored.percent_meta {
            MetaMode::Percent
        } else {
            MetaMode::Words
        };
        PersistedSettings::new(stored.wpm, meta_mode)
    }
}

/// Settings kept as a small JSON file.
pub(super) struct JsonSettingsStore {
    path: PathBuf,
}

#[derive(Debug)]
pub(super) enum JsonStoreError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for JsonStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "settings io: {err}"),
            Self::Json(err) => write!(f, "settings format: {err}"),
        }
    }
}

impl JsonSettingsStore {
    pub(super) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsStore for JsonSettingsStore {
    type Error = JsonStoreError;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(JsonStoreError::Io(err)),
        };
        let stored: StoredSettings = serde_json::from_str(&raw).map_err(JsonStoreError::Json)?;
        Ok(Some(stored.into()))
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        let raw = serde_json::to_string_pretty(&StoredSettings::from(*settings))
            .map_err(JsonStoreError::Json)?;
        fs::write(&self.path, raw).map_err(JsonStoreError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        saved: Vec<PersistedSettings>,
    }

    impl SettingsStore for MemoryStore {
        type Error = ();

        fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
            Ok(self.saved.last().copied())
        }

        fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
            self.saved.push(*settings);
            Ok(())
        }
    }

    #[test]
    fn changes_flush_after_debounce() {
        let initial = PersistedSettings::new(300, MetaMode::Words);
        let mut sync = SettingsSyncState::new(initial);
        let mut store = MemoryStore::default();

        sync.track_current(PersistedSettings::new(320, MetaMode::Words), 100);
        sync.flush_if_due(Some(&mut store), 100 + SETTINGS_SAVE_DEBOUNCE_MS - 1);
        assert!(store.saved.is_empty());

        sync.flush_if_due(Some(&mut store), 100 + SETTINGS_SAVE_DEBOUNCE_MS);
        assert_eq!(store.saved, [PersistedSettings::new(320, MetaMode::Words)]);
    }

    #[test]
    fn reverting_drops_pending_change() {
        let initial = PersistedSettings::new(300, MetaMode::Words);
        let mut sync = SettingsSyncState::new(initial);
        let mut store = MemoryStore::default();

        sync.track_current(PersistedSettings::new(300, MetaMode::Percent), 0);
        sync.track_current(initial, 10);
        sync.flush_now(Some(&mut store), 5_000);
        assert!(store.saved.is_empty());
    }

    #[test]
    fn stored_shape_maps_meta_mode() {
        let stored: StoredSettings =
            serde_json::from_str(r#"{"wpm":420,"percent_meta":true}"#).unwrap();
        assert_eq!(
            PersistedSettings::from(stored),
            PersistedSettings::new(420, MetaMode::Percent)
        );
    }
}
