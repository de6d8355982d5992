use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::exclude::RESERVED_DIR;
use crate::naming::AcronymSet;

/// Environment variable holding comma-separated acronym overrides.
pub const ACRONYM_ENV: &str = "ACRONYM_LIST";

/// Optional `.detemplate/config.json` at the repository root.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Replaces the built-in acronym set when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acronyms: Option<Vec<String>>,

    /// Extra glob patterns excluded from every phase.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Effective settings for one run: built-in defaults, then the config file,
/// then the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub acronyms: AcronymSet,
    pub exclude: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            acronyms: AcronymSet::default(),
            exclude: Vec::new(),
        }
    }
}

impl Settings {
    pub fn resolve(root: &Path, acronym_env: Option<&str>) -> Result<Settings> {
        let file = load_config(root)?;
        let mut settings = Settings::default();

        if let Some(acronyms) = file.acronyms {
            settings.acronyms = AcronymSet::new(acronyms);
        }
        settings.exclude = file.exclude;

        if let Some(raw) = acronym_env {
            let from_env = AcronymSet::parse_list(raw);
            if !from_env.is_empty() {
                settings.acronyms = from_env;
            }
        }

        Ok(settings)
    }
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(RESERVED_DIR).join("config.json")
}

/// Load the config file; a missing file yields the empty config.
pub fn load_config(root: &Path) -> Result<ConfigFile> {
    let path = config_path(root);

    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: ConfigFile = serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

    for pattern in &config.exclude {
        if pattern.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "exclude",
                Some(pattern.clone()),
                "Exclude patterns cannot be empty",
            ));
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(root: &Path, body: &str) {
        fs::create_dir_all(root.join(RESERVED_DIR)).unwrap();
        fs::write(config_path(root), body).unwrap();
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::resolve(dir.path(), None).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.acronyms.contains("api"));
    }

    #[test]
    fn config_file_replaces_acronyms_and_adds_excludes() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), r#"{"acronyms": ["GPU"], "exclude": ["*.lock"]}"#);

        let settings = Settings::resolve(dir.path(), None).unwrap();
        assert!(settings.acronyms.contains("gpu"));
        assert!(!settings.acronyms.contains("api"));
        assert_eq!(settings.exclude, vec!["*.lock"]);
    }

    #[test]
    fn environment_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), r#"{"acronyms": ["gpu"]}"#);

        let settings = Settings::resolve(dir.path(), Some("cli,sdk")).unwrap();
        assert!(settings.acronyms.contains("cli"));
        assert!(settings.acronyms.contains("sdk"));
        assert!(!settings.acronyms.contains("gpu"));
    }

    #[test]
    fn blank_environment_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::resolve(dir.path(), Some(" , ")).unwrap();
        assert_eq!(settings.acronyms, AcronymSet::default());
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "{ not json");

        let err = Settings::resolve(dir.path(), None).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn empty_exclude_pattern_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), r#"{"exclude": [""]}"#);

        let err = load_config(dir.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }
}
