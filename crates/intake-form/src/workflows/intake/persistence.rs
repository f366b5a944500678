use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::domain::{clamp_step, FormState};
use super::store::SnapshotSink;

/// Fixed slot name the form snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "formState";

/// Durable key-value slot holding serialized snapshots.
pub trait SnapshotSlot: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError>;
    fn save(&self, key: &str, payload: &str) -> Result<(), SnapshotError>;
    fn clear(&self, key: &str) -> Result<(), SnapshotError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot key {0:?} is not a safe slot name")]
    InvalidKey(String),
    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("snapshot slot unavailable: {0}")]
    Unavailable(String),
}

/// Reject keys that could escape the slot directory.
pub fn validate_key(key: &str) -> Result<(), SnapshotError> {
    if key.is_empty()
        || key.contains('/')
        || key.contains('\\')
        || key.contains("..")
        || key.chars().any(char::is_control)
    {
        return Err(SnapshotError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Stores each slot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSnapshotSlot {
    base_path: PathBuf,
}

impl FileSnapshotSlot {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, SnapshotError> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{key}.json")))
    }
}

impl SnapshotSlot for FileSnapshotSlot {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), SnapshotError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.base_path)?;
        let staging = self.base_path.join(format!("{key}.json.tmp"));
        fs::write(&staging, payload)?;
        if let Err(err) = fs::rename(&staging, &path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), SnapshotError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySnapshotSlot {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySnapshotSlot {
    pub fn payload(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .ok()
            .and_then(|slots| slots.get(key).cloned())
    }
}

impl SnapshotSlot for MemorySnapshotSlot {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| SnapshotError::Unavailable("slot mutex poisoned".to_string()))?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), SnapshotError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| SnapshotError::Unavailable("slot mutex poisoned".to_string()))?;
        slots.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), SnapshotError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| SnapshotError::Unavailable("slot mutex poisoned".to_string()))?;
        slots.remove(key);
        Ok(())
    }
}

/// Writes the whole form to a slot after every store mutation.
pub struct Autosave<S> {
    slot: S,
    key: String,
}

impl<S: SnapshotSlot> Autosave<S> {
    pub fn new(slot: S) -> Self {
        Self::with_key(slot, SNAPSHOT_KEY)
    }

    pub fn with_key(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn save(&self, state: &FormState) -> Result<(), SnapshotError> {
        let payload = serde_json::to_string(state)?;
        self.slot.save(&self.key, &payload)
    }

    /// Previously saved form, or `None` when nothing usable is stored.
    pub fn restore(&self) -> Option<FormState> {
        let payload = match self.slot.load(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %self.key, error = %err, "snapshot slot unreadable; starting fresh");
                return None;
            }
        };

        match serde_json::from_str::<FormState>(&payload) {
            Ok(mut state) => {
                state.step = clamp_step(state.step);
                debug!(key = %self.key, step = state.step, "restored form snapshot");
                Some(state)
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "snapshot shape mismatch; starting fresh");
                None
            }
        }
    }

    pub fn clear(&self) -> Result<(), SnapshotError> {
        self.slot.clear(&self.key)
    }
}

impl<S: SnapshotSlot> SnapshotSink for Autosave<S> {
    fn persist(&self, state: &FormState) {
        if let Err(err) = self.save(state) {
            warn!(key = %self.key, error = %err, "autosave failed; continuing");
        }
    }
}
