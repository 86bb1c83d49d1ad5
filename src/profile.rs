//! Persisted player counters
//!
//! Exactly two scalars survive across sessions: the best score and the
//! number of games played. Stored as JSON next to the executable's
//! working directory; a missing or corrupt file falls back to defaults.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The two persisted counters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Profile {
    pub high_score: u32,
    pub games_played: u32,
}

impl Profile {
    /// Default file name
    pub const FILE_NAME: &'static str = "ring_descent_profile.json";

    /// Load from `path`, falling back to a fresh profile if the file is
    /// missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(profile) => {
                    log::info!("loaded profile from {}", path.display());
                    profile
                }
                Err(e) => {
                    log::warn!("profile at {} is corrupt ({e}), starting fresh", path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no profile found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("could not read profile: {e}");
                Self::default()
            }
        }
    }

    /// Write to `path` as JSON.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("profile saved to {}", path.display());
        Ok(())
    }
}
