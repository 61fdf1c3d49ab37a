//! Project descriptor (`droidbuild.json`)
//!
//! The persisted build configuration for one project. Written once by the
//! scaffolder, read once per build, never mutated afterwards. Hand-editable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the persisted descriptor, relative to the project root.
pub const DESCRIPTOR_FILE: &str = "droidbuild.json";

/// Persisted build configuration for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Android SDK root.
    pub android_sdk_path: PathBuf,
    /// Java `-source`/`-target` version, e.g. "1.8".
    pub java_target: String,
    /// Android API level, e.g. "35".
    pub sdk_target: String,
    /// build-tools directory version under the SDK root, e.g. "35.0.0".
    pub sdk_ver: String,
}

impl ProjectDescriptor {
    /// Build a descriptor for the given targets, deriving the build-tools
    /// version as `<sdk_target>.0.0`.
    pub fn new(android_sdk_path: PathBuf, java_target: String, sdk_target: String) -> Self {
        let sdk_ver = format!("{sdk_target}.0.0");
        Self {
            android_sdk_path,
            java_target,
            sdk_target,
            sdk_ver,
        }
    }

    /// Path of the descriptor file inside a project directory.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(DESCRIPTOR_FILE)
    }

    /// Whether a project descriptor is present in `dir`.
    pub fn exists_in(dir: &Path) -> bool {
        Self::path_in(dir).exists()
    }

    /// Load the descriptor from a project directory.
    ///
    /// An absent file is [`Error::ProjectNotFound`].
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);
        if !path.exists() {
            return Err(Error::ProjectNotFound(dir.to_path_buf()));
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the descriptor into a project directory.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::path_in(dir), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_build_tools_version() {
        let descriptor = ProjectDescriptor::new(
            PathBuf::from("/opt/android-sdk"),
            "1.8".to_string(),
            "35".to_string(),
        );
        assert_eq!(descriptor.sdk_ver, "35.0.0");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = ProjectDescriptor::new(
            PathBuf::from("/opt/android-sdk"),
            "17".to_string(),
            "34".to_string(),
        );
        descriptor.save(dir.path()).unwrap();

        let loaded = ProjectDescriptor::load(dir.path()).unwrap();
        assert_eq!(loaded, descriptor);
    }

    #[test]
    fn test_missing_descriptor_is_project_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectDescriptor::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(_)));
    }

    #[test]
    fn test_descriptor_keys_are_stable() {
        let descriptor = ProjectDescriptor::new(
            PathBuf::from("/opt/android-sdk"),
            "1.8".to_string(),
            "35".to_string(),
        );
        let json = serde_json::to_string(&descriptor).unwrap();
        for key in ["android_sdk_path", "java_target", "sdk_target", "sdk_ver"] {
            assert!(json.contains(key), "missing key {key} in {json}");
        }
    }
}
