//! Engine settings resolution.
//!
//! The engine is configured by a JSON parameter document. It is resolved
//! with a fixed precedence: an explicit `--config-file` INI, inline JSON in
//! `$G2_ENGINE_CONFIGURATION_JSON`, then the default installed INI
//! locations. An explicit file that is missing is an error, not a
//! fallthrough.

mod ini;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Env var holding an inline engine configuration JSON object.
pub const SETTINGS_ENV_VAR: &str = "G2_ENGINE_CONFIGURATION_JSON";

/// Where the resolved engine settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    Explicit(PathBuf),
    Environment,
    Default(PathBuf),
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSource::Explicit(path) => write!(f, "{} (--config-file)", path.display()),
            SettingsSource::Environment => write!(f, "${SETTINGS_ENV_VAR}"),
            SettingsSource::Default(path) => write!(f, "{} (default)", path.display()),
        }
    }
}

/// Engine configuration as the JSON parameter document the SDK consumes.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub json: String,
    pub source: SettingsSource,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("settings line {line}: {reason}")]
    MalformedIni { line: usize, reason: String },

    #[error("${SETTINGS_ENV_VAR} is not a JSON object: {reason}")]
    MalformedEnvJson { reason: String },

    #[error("no engine settings found; pass --config-file or set ${SETTINGS_ENV_VAR}")]
    NotFound,
}

/// Default INI locations probed, in order, when nothing explicit is given.
pub fn default_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/etc/opt/g2/G2Module.ini"),
        PathBuf::from("/opt/g2/etc/G2Module.ini"),
    ]
}

/// Resolve the engine settings document.
pub fn resolve(
    explicit: Option<&Path>,
    env_json: Option<&str>,
    candidates: &[PathBuf],
) -> Result<EngineSettings, SettingsError> {
    if let Some(path) = explicit {
        let json = load_ini(path)?;
        return Ok(EngineSettings {
            json,
            source: SettingsSource::Explicit(path.to_path_buf()),
        });
    }

    if let Some(raw) = env_json.filter(|s| !s.trim().is_empty()) {
        let value: Value =
            serde_json::from_str(raw).map_err(|err| SettingsError::MalformedEnvJson {
                reason: err.to_string(),
            })?;
        if !value.is_object() {
            return Err(SettingsError::MalformedEnvJson {
                reason: "expected a JSON object".to_string(),
            });
        }
        return Ok(EngineSettings {
            json: value.to_string(),
            source: SettingsSource::Environment,
        });
    }

    for path in candidates {
        if path.is_file() {
            let json = load_ini(path)?;
            return Ok(EngineSettings {
                json,
                source: SettingsSource::Default(path.to_path_buf()),
            });
        }
    }

    Err(SettingsError::NotFound)
}

fn load_ini(path: &Path) -> Result<String, SettingsError> {
    let text = fs::read_to_string(path).map_err(|err| SettingsError::Unreadable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    Ok(ini::ini_to_json(&text)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ini_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn explicit_file_wins_over_environment() {
        let file = ini_file("[PIPELINE]\nSUPPORTPATH=/data\n");
        let settings = resolve(
            Some(file.path()),
            Some(r#"{"PIPELINE": {"SUPPORTPATH": "/env"}}"#),
            &[],
        )
        .unwrap();
        assert!(matches!(settings.source, SettingsSource::Explicit(_)));
        assert!(settings.json.contains("/data"));
    }

    #[test]
    fn missing_explicit_file_is_an_error_not_a_fallthrough() {
        let err = resolve(
            Some(Path::new("/no/such/G2Module.ini")),
            Some(r#"{"PIPELINE": {}}"#),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::Unreadable { .. }));
    }

    #[test]
    fn environment_json_wins_over_defaults() {
        let file = ini_file("[SQL]\nCONNECTION=c\n");
        let settings = resolve(
            None,
            Some(r#"{"SQL": {"CONNECTION": "from-env"}}"#),
            &[file.path().to_path_buf()],
        )
        .unwrap();
        assert_eq!(settings.source, SettingsSource::Environment);
        assert!(settings.json.contains("from-env"));
    }

    #[test]
    fn malformed_environment_json_is_rejected() {
        let err = resolve(None, Some("not json"), &[]).unwrap_err();
        assert!(matches!(err, SettingsError::MalformedEnvJson { .. }));
        let err = resolve(None, Some("[1, 2]"), &[]).unwrap_err();
        assert!(matches!(err, SettingsError::MalformedEnvJson { .. }));
    }

    #[test]
    fn first_existing_default_candidate_is_used() {
        let file = ini_file("[SQL]\nCONNECTION=sqlite\n");
        let candidates = vec![
            PathBuf::from("/no/such/file.ini"),
            file.path().to_path_buf(),
        ];
        let settings = resolve(None, None, &candidates).unwrap();
        assert!(matches!(settings.source, SettingsSource::Default(_)));
        assert!(settings.json.contains("sqlite"));
    }

    #[test]
    fn nothing_found_reports_not_found() {
        let err = resolve(None, None, &[PathBuf::from("/absent.ini")]).unwrap_err();
        assert!(matches!(err, SettingsError::NotFound));
    }

    #[test]
    fn empty_env_value_falls_through() {
        let err = resolve(None, Some("   "), &[]).unwrap_err();
        assert!(matches!(err, SettingsError::NotFound));
    }
}
