use std::fs;
use std::path::{Path, PathBuf};

use reelcut_core::{RawTimelineSnapshot, TimelineSnapshot};
use tempfile::TempDir;

/// On-disk session file in a throwaway directory, standing in for the
/// editor's persistence layer.
pub struct SessionStore {
    dir: TempDir,
    last_saved: Option<blake3::Hash>,
    pub writes: usize,
}

impl SessionStore {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            last_saved: None,
            writes: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    /// Writes the snapshot unless its fingerprint matches the last write.
    /// Returns whether the file was written.
    pub fn autosave(
        &mut self,
        snap: &TimelineSnapshot,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        let fingerprint = snap.fingerprint()?;
        if self.last_saved == Some(fingerprint) {
            tracing::debug!("Autosave skipped: snapshot unchanged");
            return Ok(false);
        }
        fs::write(self.path(), snap.to_json()?)?;
        self.last_saved = Some(fingerprint);
        self.writes += 1;
        Ok(true)
    }

    /// Overwrites the session file with arbitrary text, e.g. a partial write.
    pub fn write_raw(&mut self, text: &str) -> std::io::Result<()> {
        self.last_saved = None;
        fs::write(self.path(), text)
    }

    pub fn load(&self) -> Result<RawTimelineSnapshot, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(self.path())?;
        Ok(RawTimelineSnapshot::from_json(&text)?)
    }
}
