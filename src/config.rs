//! Harness configuration describing where fixtures live and how the asset input is sourced.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name searched for in the working directory by [`HarnessConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "asset-debug.config.json";

/// Discoverable harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Directory, relative to the working directory, holding the sample asset tree.
    pub fixture_dir: String,
    /// Environment variable the CI platform uses to pass the asset input.
    pub input_env: String,
    /// Name of the step output receiving the resolved asset list.
    pub output_name: String,
    /// Create the sample tree when the fixture directory does not exist yet.
    pub seed_fixtures: bool,
    /// Print a full recursive listing next to the one-level resolution.
    pub recursive_listing: bool,
    /// Colour the console prefix.
    pub color: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            fixture_dir: "test-assets".into(),
            input_env: "INPUT_ASSET_FILES".into(),
            output_name: "asset_files".into(),
            seed_fixtures: true,
            recursive_listing: true,
            color: true,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from `dir`, falling back to defaults when the file is absent or
    /// cannot be parsed.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file, if it exists and parses.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Read configuration from a file the user named explicitly. Unlike [`Self::discover`],
    /// a missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Absolute location of the fixture tree.
    pub fn fixture_dir_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.fixture_dir)
    }

    /// Pick the asset input: an explicit value wins, then the configured environment variable,
    /// then the fixture directory. Empty values count as unset.
    pub fn select_asset_input(
        &self,
        explicit: Option<&Path>,
        lookup_env: impl Fn(&str) -> Option<OsString>,
        base_dir: &Path,
    ) -> PathBuf {
        if let Some(value) = explicit.filter(|value| !value.as_os_str().is_empty()) {
            return value.to_path_buf();
        }
        if let Some(value) = lookup_env(&self.input_env).filter(|value| !value.is_empty()) {
            return PathBuf::from(value);
        }
        self.fixture_dir_path(base_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(HarnessConfig::discover(dir.path()), HarnessConfig::default());

        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "not json").unwrap();
        assert_eq!(HarnessConfig::discover(dir.path()), HarnessConfig::default());
    }

    #[test]
    fn discover_merges_partial_files_with_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{"fixture_dir": "samples", "color": false}"#,
        )
        .unwrap();

        let config = HarnessConfig::discover(dir.path());
        assert_eq!(config.fixture_dir, "samples");
        assert!(!config.color);
        assert_eq!(config.input_env, "INPUT_ASSET_FILES");
    }

    #[test]
    fn explicit_load_reports_missing_files() {
        let dir = tempdir().unwrap();
        let err = HarnessConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn asset_input_prefers_explicit_then_env_then_fixtures() {
        let config = HarnessConfig::default();
        let base = Path::new("/work");
        let env = |name: &str| (name == "INPUT_ASSET_FILES").then(|| OsString::from("dist"));

        assert_eq!(
            config.select_asset_input(Some(Path::new("out")), env, base),
            PathBuf::from("out")
        );
        assert_eq!(
            config.select_asset_input(Some(Path::new("")), env, base),
            PathBuf::from("dist")
        );
        assert_eq!(
            config.select_asset_input(None, |_| Some(OsString::new()), base),
            base.join("test-assets")
        );
    }

    #[cfg(unix)]
    #[test]
    fn fixture_fallback_keeps_non_utf8_paths_intact() {
        use std::os::unix::ffi::OsStrExt;

        let config = HarnessConfig::default();
        let base = Path::new(std::ffi::OsStr::from_bytes(b"/work/\xffraw"));

        let input = config.select_asset_input(None, |_| None, base);
        assert_eq!(input, base.join("test-assets"));
        assert!(input.to_str().is_none());
    }
}
