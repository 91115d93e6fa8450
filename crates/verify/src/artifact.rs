//! Screenshot artifact handling
//!
//! Flows write PNGs into one artifact directory. After a flow runs, each
//! capture is decoded to confirm it is a readable image and recorded with
//! its dimensions and content hash, so the run report can vouch for the
//! artifacts it points at.

use std::path::{Path, PathBuf};
use image::GenericImageView;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{VerifyError, VerifyResult};

/// A verified screenshot on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotRecord {
    pub name: String,
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub sha256: String,
}

/// The artifact directory for a run.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> VerifyResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a screenshot step with this name writes to.
    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.png", name))
    }

    /// Decode and hash a captured screenshot.
    pub fn record(&self, name: &str) -> VerifyResult<ScreenshotRecord> {
        let path = self.screenshot_path(name);
        if !path.exists() {
            return Err(VerifyError::ScreenshotMissing(
                path.to_string_lossy().to_string(),
            ));
        }

        let data = std::fs::read(&path)?;
        let img = image::load_from_memory(&data)?;
        let (width, height) = img.dimensions();

        let mut hasher = Sha256::new();
        hasher.update(&data);
        let sha256 = hex::encode(hasher.finalize());

        debug!("Screenshot '{}': {}x{} ({} bytes)", name, width, height, data.len());

        Ok(ScreenshotRecord {
            name: name.to_string(),
            path: path.to_string_lossy().to_string(),
            width,
            height,
            sha256,
        })
    }

    /// List captured screenshot names.
    pub fn list(&self) -> VerifyResult<Vec<String>> {
        let mut names = Vec::new();

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map(|e| e == "png").unwrap_or(false) {
                if let Some(name) = path.file_stem() {
                    names.push(name.to_string_lossy().to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Remove screenshots left over from earlier runs.
    pub fn clean(&self) -> VerifyResult<()> {
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "png").unwrap_or(false) {
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn store() -> (tempfile::TempDir, ArtifactStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().join("shots")).unwrap();
        (tmp, store)
    }

    fn write_png(store: &ArtifactStore, name: &str) {
        RgbaImage::new(4, 2)
            .save(store.screenshot_path(name))
            .unwrap();
    }

    #[test]
    fn record_reports_dimensions_and_hash() {
        let (_tmp, store) = store();
        write_png(&store, "enrollment-page");

        let record = store.record("enrollment-page").unwrap();
        assert_eq!(record.name, "enrollment-page");
        assert_eq!((record.width, record.height), (4, 2));
        assert_eq!(record.sha256.len(), 64);
    }

    #[test]
    fn record_fails_for_missing_capture() {
        let (_tmp, store) = store();
        let err = store.record("verification").unwrap_err();
        assert!(matches!(err, VerifyError::ScreenshotMissing(_)));
    }

    #[test]
    fn list_and_clean_cover_only_pngs() {
        let (_tmp, store) = store();
        write_png(&store, "verification");
        write_png(&store, "error");
        std::fs::write(store.dir().join("run-report.json"), "{}").unwrap();

        assert_eq!(store.list().unwrap(), vec!["error", "verification"]);

        store.clean().unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(store.dir().join("run-report.json").exists());
    }
}
