//! Persisted client state: two independent key-value blobs, each read and
//! written as a whole on state change. The session blob mirrors what the
//! client keeps for one session; the durable blob survives restarts.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::constants::FREQUENCY_DAILY;
use crate::models::ItemView;

/// Session-scoped state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub is_store_ready: bool,
    pub selected_item: Option<ItemView>,
}

/// Durable preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalPrefs {
    pub theme_name: Option<String>,
    pub play_sounds: bool,
    pub frequency: String,
    pub daily_toggles: Vec<String>,
}

impl Default for LocalPrefs {
    fn default() -> Self {
        Self {
            theme_name: None,
            play_sounds: true,
            frequency: FREQUENCY_DAILY.to_string(),
            daily_toggles: Vec::new(),
        }
    }
}

impl LocalPrefs {
    pub fn toggle_play_sounds(&mut self) {
        self.play_sounds = !self.play_sounds;
    }

    /// Flip an item's daily-toggle membership. Returns whether the item was
    /// active before the flip, which decides the click/unclick log entry.
    pub fn toggle_daily(&mut self, item_id: &str) -> bool {
        if let Some(pos) = self.daily_toggles.iter().position(|id| id == item_id) {
            self.daily_toggles.remove(pos);
            true
        } else {
            self.daily_toggles.push(item_id.to_string());
            false
        }
    }
}

/// Load a whole blob. A missing or corrupt file degrades to defaults rather
/// than failing.
pub fn load<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Write a whole blob.
pub fn save<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let raw = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_local_prefs_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut prefs = LocalPrefs::default();
        prefs.theme_name = Some("business".to_string());
        prefs.toggle_play_sounds();
        prefs.toggle_daily("item-1");
        save(&path, &prefs).unwrap();

        let loaded: LocalPrefs = load(&path);
        assert_eq!(loaded.theme_name.as_deref(), Some("business"));
        assert!(!loaded.play_sounds);
        assert_eq!(loaded.daily_toggles, vec!["item-1".to_string()]);
        assert_eq!(loaded.frequency, FREQUENCY_DAILY);
    }

    #[test]
    fn test_missing_and_corrupt_files_load_defaults() {
        let dir = tempdir().unwrap();

        let missing: LocalPrefs = load(&dir.path().join("nope.json"));
        assert!(missing.play_sounds);

        let corrupt_path = dir.path().join("corrupt.json");
        fs::write(&corrupt_path, "{not json").unwrap();
        let corrupt: SessionState = load(&corrupt_path);
        assert!(!corrupt.is_store_ready);
        assert!(corrupt.selected_item.is_none());
    }

    #[test]
    fn test_toggle_daily_flips_membership() {
        let mut prefs = LocalPrefs::default();

        assert!(!prefs.toggle_daily("item-1"));
        assert_eq!(prefs.daily_toggles.len(), 1);

        // Second flip reports it was active and removes it.
        assert!(prefs.toggle_daily("item-1"));
        assert!(prefs.daily_toggles.is_empty());
    }

    #[test]
    fn test_session_state_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let state = SessionState {
            is_store_ready: true,
            selected_item: None,
        };
        save(&path, &state).unwrap();

        let loaded: SessionState = load(&path);
        assert!(loaded.is_store_ready);
    }
}
