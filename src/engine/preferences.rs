//! User preferences that survive restarts: speed level, orbit visibility, focused body.
//!
//! The `Universe` only snapshots and applies `Preferences`; reading and writing them is the
//! job of a `PreferenceStore`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::EngineResult;

pub const MAX_SPEED_LEVEL: u8 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// 0 (stopped) ..= 9 (full speed).
    pub speed_level: u8,
    pub show_orbits: bool,
    pub focused_body: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            speed_level: MAX_SPEED_LEVEL,
            show_orbits: false,
            focused_body: None,
        }
    }
}

/// `level / 9`, with levels above 9 treated as 9.
pub fn speed_level_to_multiplier(level: u8) -> f64 {
    f64::from(level.min(MAX_SPEED_LEVEL)) / f64::from(MAX_SPEED_LEVEL)
}

/// Nearest level for a multiplier in `[0, 1]`.
pub fn multiplier_to_speed_level(multiplier: f64) -> u8 {
    (multiplier.clamp(0.0, 1.0) * f64::from(MAX_SPEED_LEVEL)).round() as u8
}

pub trait PreferenceStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> EngineResult<Option<Preferences>>;
    fn save(&mut self, prefs: &Preferences) -> EngineResult<()>;
}

/// Preferences as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub const DEFAULT_FILE: &'static str = "orrery_prefs.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILE)
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> EngineResult<Option<Preferences>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let prefs = serde_json::from_str(&json)?;
        log::info!("Preferences loaded from {}", self.path.display());
        Ok(Some(prefs))
    }

    fn save(&mut self, prefs: &Preferences) -> EngineResult<()> {
        std::fs::write(&self.path, serde_json::to_string_pretty(prefs)?)?;
        log::debug!("Preferences saved to {}", self.path.display());
        Ok(())
    }
}

/// Saves only when the preferences differ from the last save.
#[derive(Debug)]
pub struct PreferenceSync<S: PreferenceStore> {
    store: S,
    last_saved: Option<Preferences>,
}

impl<S: PreferenceStore> PreferenceSync<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            last_saved: None,
        }
    }

    /// Load and remember what was on disk, so an unchanged session writes nothing.
    pub fn load(&mut self) -> EngineResult<Option<Preferences>> {
        let prefs = self.store.load()?;
        self.last_saved = prefs.clone();
        Ok(prefs)
    }

    /// Returns whether a save happened.
    pub fn save_if_changed(&mut self, prefs: &Preferences) -> EngineResult<bool> {
        if self.last_saved.as_ref() == Some(prefs) {
            return Ok(false);
        }
        self.store.save(prefs)?;
        self.last_saved = Some(prefs.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct MemoryStore {
        saved: Option<Preferences>,
        saves: usize,
    }

    impl PreferenceStore for MemoryStore {
        fn load(&self) -> EngineResult<Option<Preferences>> {
            Ok(self.saved.clone())
        }

        fn save(&mut self, prefs: &Preferences) -> EngineResult<()> {
            self.saved = Some(prefs.clone());
            self.saves += 1;
            Ok(())
        }
    }

    #[test]
    fn speed_levels_map_to_ninths() {
        assert_eq!(speed_level_to_multiplier(0), 0.0);
        assert_eq!(speed_level_to_multiplier(9), 1.0);
        assert!((speed_level_to_multiplier(3) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(speed_level_to_multiplier(42), 1.0);

        for level in 0..=9 {
            assert_eq!(multiplier_to_speed_level(speed_level_to_multiplier(level)), level);
        }
        assert_eq!(multiplier_to_speed_level(0.5), 5);
        assert_eq!(multiplier_to_speed_level(-1.0), 0);
    }

    #[test]
    fn json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("orrery-prefs-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let mut store = JsonFileStore::new(&path);

        assert_eq!(store.load().unwrap(), None);

        let prefs = Preferences {
            speed_level: 4,
            show_orbits: true,
            focused_body: Some("Saturn".into()),
        };
        store.save(&prefs).unwrap();
        let loaded = store.load().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, Some(prefs));
    }

    #[test]
    fn missing_fields_default() {
        let prefs: Preferences = serde_json::from_str(r#"{ "show_orbits": true }"#).unwrap();
        assert_eq!(prefs.speed_level, 9);
        assert!(prefs.show_orbits);
        assert_eq!(prefs.focused_body, None);
    }

    #[test]
    fn sync_skips_unchanged_saves() {
        let mut sync = PreferenceSync::new(MemoryStore::default());
        assert_eq!(sync.load().unwrap(), None);

        let prefs = Preferences::default();
        assert!(sync.save_if_changed(&prefs).unwrap());
        assert!(!sync.save_if_changed(&prefs).unwrap());

        let changed = Preferences {
            show_orbits: true,
            ..prefs
        };
        assert!(sync.save_if_changed(&changed).unwrap());
        assert_eq!(sync.store.saves, 2);
    }
}
