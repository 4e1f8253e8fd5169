//! Server configuration
//!
//! An optional TOML file; every key has a default.
//!
//! ```toml
//! [git]
//! executable = "git"
//! timeout_secs = 10
//! version_timeout_secs = 5
//!
//! [transcript]
//! base_url = "https://www.youtube.com"
//! timeout_secs = 30
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use multitool_commit::GitCli;
use multitool_transcript::{TranscriptSource, YouTubeSource};
use serde::Deserialize;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub git: GitConfig,
    pub transcript: TranscriptConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    pub executable: String,
    pub timeout_secs: u64,
    pub version_timeout_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: "git".to_string(),
            timeout_secs: 10,
            version_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranscriptConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            base_url: multitool_transcript::youtube::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Load from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn git_cli(&self) -> GitCli {
        GitCli::new(self.git.executable.clone()).with_timeouts(
            Duration::from_secs(self.git.timeout_secs),
            Duration::from_secs(self.git.version_timeout_secs),
        )
    }

    pub fn transcript_source(&self) -> Arc<dyn TranscriptSource> {
        Arc::new(
            YouTubeSource::new(Duration::from_secs(self.transcript.timeout_secs))
                .with_base_url(self.transcript.base_url.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let config = ServerConfig::load(None).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.git.executable, "git");
        assert_eq!(config.transcript.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ServerConfig::from_toml_str(
            r#"
            [git]
            timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.git.timeout_secs, 3);
        assert_eq!(config.git.version_timeout_secs, 5);
        assert_eq!(config.transcript, TranscriptConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ServerConfig::from_toml_str("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ServerConfig::from_toml_str("[git]\nbinary = \"git\"\n").unwrap_err();
        assert!(matches!(err, Error::TomlParse(_)));

        let err = ServerConfig::from_toml_str("[cache]\nsize = 1\n").unwrap_err();
        assert!(matches!(err, Error::TomlParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("multitool.toml");
        std::fs::write(
            &path,
            "[git]\nexecutable = \"/usr/local/bin/git\"\n\n[transcript]\nbase_url = \"http://127.0.0.1:9/\"\n",
        )
        .unwrap();

        let config = ServerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.git_cli().executable(), "/usr/local/bin/git");
        assert_eq!(config.transcript.base_url, "http://127.0.0.1:9/");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = ServerConfig::load(Some(&temp.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
