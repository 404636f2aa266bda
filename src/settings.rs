//! Slider settings
//!
//! Persisted as one JSON value in the key-value store (LocalStorage on web).

use serde::{Deserialize, Serialize};

use crate::platform::storage::{KeyValueStore, StorageError};

/// Range of the scale slider (percent)
pub const SCALE_RANGE: (i32, i32) = (0, 200);
/// Range of the vertical offset slider (world units)
pub const VPOS_RANGE: (i32, i32) = (-1000, 1000);

/// Elk scene settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredSettings")]
pub struct Settings {
    /// Zoom in percent
    pub scale: i32,
    /// Vertical offset of the horizon
    pub vpos: i32,
    /// Audio peak-to-peak amplitude needed to trigger the elk
    pub sensitivity: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 100,
            vpos: 0,
            sensitivity: 75,
        }
    }
}

/// Stored shape, read with wide integers so one out-of-range field
/// does not discard the others
#[derive(Deserialize)]
#[serde(default)]
struct StoredSettings {
    scale: i64,
    vpos: i64,
    sensitivity: i64,
}

impl Default for StoredSettings {
    fn default() -> Self {
        let defaults = Settings::default();
        Self {
            scale: defaults.scale.into(),
            vpos: defaults.vpos.into(),
            sensitivity: defaults.sensitivity.into(),
        }
    }
}

impl From<StoredSettings> for Settings {
    fn from(stored: StoredSettings) -> Self {
        let clamp = |v: i64, (lo, hi): (i32, i32)| v.clamp(lo.into(), hi.into()) as i32;
        Self {
            scale: clamp(stored.scale, SCALE_RANGE),
            vpos: clamp(stored.vpos, VPOS_RANGE),
            sensitivity: stored.sensitivity.clamp(0, u8::MAX.into()) as u8,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "elktrack_settings";

    pub fn set_scale(&mut self, scale: i32) {
        self.scale = scale.clamp(SCALE_RANGE.0, SCALE_RANGE.1);
    }

    pub fn set_vpos(&mut self, vpos: i32) {
        self.vpos = vpos.clamp(VPOS_RANGE.0, VPOS_RANGE.1);
    }

    pub fn set_sensitivity(&mut self, sensitivity: u8) {
        self.sensitivity = sensitivity;
    }

    /// Load settings, falling back to defaults on a missing or corrupt entry.
    /// Out-of-range values are clamped into their slider ranges.
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Settings unavailable: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        let result = serde_json::to_string(self)
            .map_err(StorageError::from)
            .and_then(|json| store.set(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
