//! Settings file loading
//!
//! ```toml
//! [search]
//! default_radius_km = 5.0
//! candidate_limit = 50
//!
//! [telemetry]
//! log_level = "debug"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use souk_proximity::{DEFAULT_CANDIDATE_LIMIT, DEFAULT_RADIUS_KM};
use souk_telemetry::TelemetryConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Files looked up in the working directory, first match wins
const CANDIDATES: [&str; 2] = [".souk.toml", "souk.toml"];

/// Settings loading errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The file exists but could not be read
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Settings`]
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },
}

/// Search defaults applied when a command omits them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Radius used when `--radius` is not given
    pub default_radius_km: f64,
    /// Candidate cap used when `--limit` is not given
    pub candidate_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_km: DEFAULT_RADIUS_KM,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

/// Contents of a `souk.toml` file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Search defaults
    pub search: SearchSettings,
    /// Logging setup
    pub telemetry: TelemetryConfig,
    /// File the settings came from, `None` for built-in defaults
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Load from `path`, else from the first settings file in the working
    /// directory, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path.map(Path::to_path_buf).or_else(|| find_settings_file(Path::new("."))) {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    /// Parse one settings file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut settings: Self = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.path = Some(path.to_path_buf());
        Ok(settings)
    }
}

/// First settings file present in `dir`
pub fn find_settings_file(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use souk_telemetry::LogFormat;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.path.is_none());
        assert_eq!(settings.search.default_radius_km, DEFAULT_RADIUS_KM);
        assert_eq!(settings.search.candidate_limit, DEFAULT_CANDIDATE_LIMIT);
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("souk.toml");
        std::fs::write(
            &path,
            "[search]\ndefault_radius_km = 5.0\n\n[telemetry]\nformat = \"json\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.path.as_deref(), Some(path.as_path()));
        assert_eq!(settings.search.default_radius_km, 5.0);
        assert_eq!(settings.search.candidate_limit, DEFAULT_CANDIDATE_LIMIT);
        assert_eq!(settings.telemetry.format, LogFormat::Json);
        assert_eq!(settings.telemetry.log_level, "info");
    }

    #[test]
    fn test_hidden_file_wins() {
        let dir = TempDir::new().unwrap();
        assert!(find_settings_file(dir.path()).is_none());

        std::fs::write(dir.path().join("souk.toml"), "").unwrap();
        assert_eq!(find_settings_file(dir.path()), Some(dir.path().join("souk.toml")));

        std::fs::write(dir.path().join(".souk.toml"), "").unwrap();
        assert_eq!(find_settings_file(dir.path()), Some(dir.path().join(".souk.toml")));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("souk.toml");
        std::fs::write(&path, "[search]\ncandidate_limit = \"many\"\n").unwrap();

        let err = Settings::from_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("souk.toml"));
    }
}
