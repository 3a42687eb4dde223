//! Scalar save/restore of participant energy levels.
//!
//! A snapshot is only the held amount per named participant. Restoring goes
//! through `Energy::set_energy` and never through the transfer protocol.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::energy::EnergyAmount;

/// Saved energy levels, serialised as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    /// One entry per participant, in grid order.
    #[serde(default)]
    pub entries: Vec<SnapshotEntry>,
}

/// Held amount of one named participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotEntry {
    pub name: String,
    pub energy: EnergyAmount,
}

/// Snapshot persistence and restore failures.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("cannot access snapshot \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot encode snapshot: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("snapshot names unknown participant \"{0}\"")]
    UnknownParticipant(String),
}

impl Snapshot {
    /// Parses a snapshot from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] if the TOML is invalid.
    pub fn from_toml_str(s: &str) -> Result<Self, SnapshotError> {
        Ok(toml::from_str(s)?)
    }

    /// Encodes the snapshot as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Encode`] if serialisation fails.
    pub fn to_toml_string(&self) -> Result<String, SnapshotError> {
        Ok(toml::to_string(self)?)
    }

    /// Reads a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Writes the snapshot to a file, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the saved amount for `name`.
    pub fn energy_of(&self, name: &str) -> Option<EnergyAmount> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.energy)
    }
}
