//! Check-state persistence.
//!
//! Tracks the last evaluation timestamp, the release the user chose to skip,
//! and the configured alert kind. The file-backed store persists to
//! `<config dir>/lookout/check-state.json`.

use crate::error::{LookoutError, Result};
use crate::version::VersionIdentifier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

/// Which choices an update alert offers the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Update is the only choice; the user cannot defer or skip.
    Force,
    /// Update or defer until the next launch (default).
    #[default]
    Option,
    /// Update, defer, or skip this version entirely.
    Skip,
    /// Never present; the embedder observes the decision silently.
    None,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Force => write!(f, "force"),
            Self::Option => write!(f, "option"),
            Self::Skip => write!(f, "skip"),
            Self::None => write!(f, "none"),
        }
    }
}

/// How often a fresh catalog lookup should happen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckFrequency {
    /// Every evaluation opportunity (default).
    #[default]
    Immediately,
    /// At most once every 24 hours.
    Daily,
    /// At most once every 7 days.
    Weekly,
}

impl CheckFrequency {
    fn minimum_hours(self) -> i64 {
        match self {
            Self::Immediately => 0,
            Self::Daily => 24,
            Self::Weekly => 24 * 7,
        }
    }
}

/// Persisted update-check state.
///
/// Created empty on first run, read at the start of every evaluation cycle,
/// written at most once per cycle. Mutation goes through a [`PreferenceStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckState {
    /// When the last evaluation was performed.
    pub last_checked_at: Option<DateTime<Utc>>,
    /// Release version the user chose to skip. Version-specific: a release
    /// newer than the skipped one prompts again.
    pub skipped_version: Option<VersionIdentifier>,
    /// Which choices the alert offers. Configured by the embedder, carried
    /// with the rest of the state.
    pub alert_kind: AlertKind,
}

impl CheckState {
    /// Record that an evaluation was performed at the current time.
    pub fn mark_checked(&mut self) {
        self.last_checked_at = Some(Utc::now());
    }

    /// Record that the user skipped the given release.
    pub fn record_skip(&mut self, version: VersionIdentifier) {
        self.skipped_version = Some(version);
    }

    /// Returns `true` if a fresh catalog lookup is due under the given
    /// frequency. Always `true` when no check has been recorded yet.
    pub fn check_due(&self, frequency: CheckFrequency) -> bool {
        let last = match self.last_checked_at {
            Some(t) => t,
            None => return true,
        };

        let elapsed_hours = Utc::now().signed_duration_since(last).num_hours();
        elapsed_hours >= frequency.minimum_hours()
    }
}

/// Durable home for [`CheckState`].
///
/// Synchronous from the core's viewpoint; async wrapping is the caller's
/// concern.
pub trait PreferenceStore {
    /// Load the persisted state, or the default state on first run.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Store`] when the backing substrate fails.
    fn load(&self) -> Result<CheckState>;

    /// Persist the given state.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Store`] or [`LookoutError::Io`] when the
    /// write fails.
    fn save(&self, state: &CheckState) -> Result<()>;
}

/// JSON-file-backed preference store.
///
/// A missing or unparseable file loads as the default state; a stale schema
/// never blocks an evaluation cycle.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the platform default location
    /// (`<config dir>/lookout/check-state.json`).
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Store`] when the platform config directory
    /// cannot be determined.
    pub fn new() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| LookoutError::Store("cannot determine config directory".to_owned()))?;
        Ok(Self::at(dir.join("lookout").join("check-state.json")))
    }

    /// Store backed by an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> Result<CheckState> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(_) => return Ok(CheckState::default()),
        };

        Ok(serde_json::from_slice(&bytes).unwrap_or_default())
    }

    fn save(&self, state: &CheckState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LookoutError::Store(format!(
                    "cannot create state directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| LookoutError::Store(format!("cannot serialize check state: {e}")))?;

        std::fs::write(&self.path, json).map_err(|e| {
            LookoutError::Store(format!(
                "cannot write check state to {}: {e}",
                self.path.display()
            ))
        })?;

        Ok(())
    }
}

/// In-memory preference store for tests and embedders with their own
/// persistence substrate.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<CheckState>,
}

impl MemoryStore {
    /// Store starting from the given state.
    pub fn with_state(state: CheckState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<CheckState> {
        self.state
            .lock()
            .map(|s| s.clone())
            .map_err(|_| LookoutError::Store("memory store poisoned".to_owned()))
    }

    fn save(&self, state: &CheckState) -> Result<()> {
        *self
            .state
            .lock()
            .map_err(|_| LookoutError::Store("memory store poisoned".to_owned()))? = state.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn default_state_is_empty() {
        let state = CheckState::default();
        assert!(state.last_checked_at.is_none());
        assert!(state.skipped_version.is_none());
        assert_eq!(state.alert_kind, AlertKind::Option);
    }

    #[test]
    fn alert_kind_display() {
        assert_eq!(AlertKind::Force.to_string(), "force");
        assert_eq!(AlertKind::Option.to_string(), "option");
        assert_eq!(AlertKind::Skip.to_string(), "skip");
        assert_eq!(AlertKind::None.to_string(), "none");
    }

    #[test]
    fn mark_checked_sets_timestamp() {
        let mut state = CheckState::default();
        state.mark_checked();
        assert!(state.last_checked_at.is_some());
    }

    #[test]
    fn check_due_when_never_checked() {
        let state = CheckState::default();
        assert!(state.check_due(CheckFrequency::Weekly));
    }

    #[test]
    fn check_not_due_right_after_check() {
        let mut state = CheckState::default();
        state.mark_checked();
        assert!(!state.check_due(CheckFrequency::Daily));
        assert!(!state.check_due(CheckFrequency::Weekly));
    }

    #[test]
    fn immediately_is_always_due() {
        let mut state = CheckState::default();
        state.mark_checked();
        assert!(state.check_due(CheckFrequency::Immediately));
    }

    #[test]
    fn daily_due_after_a_day() {
        let state = CheckState {
            last_checked_at: Some(Utc::now() - chrono::Duration::hours(25)),
            ..Default::default()
        };
        assert!(state.check_due(CheckFrequency::Daily));
        assert!(!state.check_due(CheckFrequency::Weekly));
    }

    #[test]
    fn state_serialization_round_trip() {
        let state = CheckState {
            last_checked_at: Some(Utc::now()),
            skipped_version: Some(VersionIdentifier::parse("2.1.0").unwrap()),
            alert_kind: AlertKind::Skip,
        };

        let json = serde_json::to_string(&state).unwrap();
        let restored: CheckState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn state_deserialize_from_partial_json() {
        // Missing fields use defaults, so older state files keep loading.
        let state: CheckState = serde_json::from_str(r#"{"skipped_version":"1.4"}"#).unwrap();
        assert_eq!(
            state.skipped_version,
            Some(VersionIdentifier::parse("1.4").unwrap())
        );
        assert_eq!(state.alert_kind, AlertKind::Option);
        assert!(state.last_checked_at.is_none());
    }

    #[test]
    fn file_store_load_returns_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at(dir.path().join("check-state.json"));
        assert_eq!(store.load().unwrap(), CheckState::default());
    }

    #[test]
    fn file_store_round_trips_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at(dir.path().join("nested").join("check-state.json"));

        let mut state = CheckState::default();
        state.mark_checked();
        state.record_skip(VersionIdentifier::parse("3.0.1").unwrap());
        store.save(&state).unwrap();

        let restored = store.load().unwrap();
        assert_eq!(restored, state);
        assert_eq!(
            restored.skipped_version,
            Some(VersionIdentifier::parse("3.0.1").unwrap())
        );
    }

    #[test]
    fn file_store_tolerates_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check-state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::at(path);
        assert_eq!(store.load().unwrap(), CheckState::default());
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::default();
        let mut state = store.load().unwrap();
        state.record_skip(VersionIdentifier::parse("1.2").unwrap());
        store.save(&state).unwrap();

        assert_eq!(
            store.load().unwrap().skipped_version,
            Some(VersionIdentifier::parse("1.2").unwrap())
        );
    }
}
