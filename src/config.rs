//! Runtime settings for the CLI and the server.
//!
//! Values come from an optional `dictform.yaml` file and are then overridden by
//! environment variables (a `.env` file is honoured by the binaries):
//!
//! | variable               | setting            |
//! |------------------------|--------------------|
//! | `DICTFORM_DICTIONARIES`| `dictionaries_dir` |
//! | `DICTFORM_RECORDS`     | `records_dir`      |
//! | `DICTFORM_RESOURCES`   | `resources_dir`    |
//! | `DICTFORM_CULTURE`     | `culture`          |
//! | `DICTFORM_APP_PATH`    | `app_path`         |
//! | `HOST` / `PORT`        | `host` / `port`    |
//! | `DATABASE_URL`         | `database_url`     |

use crate::error::{Error, Result};
use crate::service::DatabaseType;
use crate::translate::{self, Translator};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "dictform.yaml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub dictionaries_dir: PathBuf,
    pub records_dir: PathBuf,
    pub resources_dir: PathBuf,
    pub culture: String,
    /// Replaces `{app.path}` in upload folders
    pub app_path: String,
    pub host: String,
    pub port: u16,
    /// Only used to pick the dialect of generated scripts
    pub database_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dictionaries_dir: PathBuf::from("dictionaries"),
            records_dir: PathBuf::from("data"),
            resources_dir: PathBuf::from("resources"),
            culture: "en-us".to_string(),
            app_path: String::new(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: None,
        }
    }
}

impl Settings {
    /// Read `path` when it exists, then apply the environment
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut settings = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            tracing::debug!(path = %path.display(), "loading settings");
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Override settings from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DICTFORM_DICTIONARIES") {
            self.dictionaries_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("DICTFORM_RECORDS") {
            self.records_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("DICTFORM_RESOURCES") {
            self.resources_dir = PathBuf::from(dir);
        }
        if let Some(culture) = lookup("DICTFORM_CULTURE") {
            self.culture = culture;
        }
        if let Some(app_path) = lookup("DICTFORM_APP_PATH") {
            self.app_path = app_path;
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .parse()
                .map_err(|_| Error::Other(format!("Invalid PORT value '{}'", port)))?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = Some(url);
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Dialect for generated scripts, PostgreSQL unless the URL says otherwise
    pub fn database_type(&self) -> DatabaseType {
        self.database_url
            .as_deref()
            .map(DatabaseType::from_url)
            .unwrap_or_default()
    }

    pub fn resource_file(&self) -> PathBuf {
        self.resources_dir.join(format!("strings.{}.yaml", self.culture))
    }

    /// Install the translator for the configured culture. Missing resource
    /// files leave texts untranslated.
    pub fn install_translator(&self) -> Result<()> {
        let path = self.resource_file();
        if path.exists() {
            translate::install(Translator::from_file(&self.culture, &path)?);
            tracing::info!(culture = %self.culture, "translations installed");
        } else {
            tracing::debug!(path = %path.display(), "no resource file, using built-in texts");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_file() {
        let mut settings: Settings = serde_yaml::from_str("{}").unwrap();
        settings.apply_overrides(|_| None).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_file_values_then_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "culture: pt-br\nport: 9000\napp_path: /srv/app\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut settings: Settings = serde_yaml::from_str(&content).unwrap();
        let env: HashMap<&str, &str> = [("PORT", "9100"), ("DATABASE_URL", "mysql://db/app")].into();
        settings
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.culture, "pt-br");
        assert_eq!(settings.app_path, "/srv/app");
        assert_eq!(settings.port, 9100);
        assert_eq!(settings.dictionaries_dir, PathBuf::from("dictionaries"));
        assert_eq!(settings.database_type(), DatabaseType::MySQL);
        assert_eq!(settings.resource_file(), PathBuf::from("resources/strings.pt-br.yaml"));
    }

    #[test]
    fn test_invalid_port() {
        let mut settings = Settings::default();
        assert!(settings.apply_overrides(|_| Some("not-a-port".to_string())).is_err());
    }
}
