//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `--config <FILE>`, or `.users-report.toml` in the working directory
//! 4. `~/.config/users-report/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
}

/// Where the user list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub url: String,
    /// Request timeout. `None` leaves the client without one.
    pub timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Where the report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::DEFAULT_OUTPUT_PATH),
        }
    }
}

/// A config file as written on disk. Only keys present in the file apply,
/// so a file can set a value back to its built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    source: SourceFile,
    output: OutputFile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SourceFile {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OutputFile {
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// `explicit` replaces the working-directory config file and must exist.
    pub fn load(explicit: Option<&Path>, work_dir: &Path, env: &Env) -> Result<Self, ConfigError> {
        Self::load_layers(Self::global_config_path().as_deref(), explicit, work_dir, env)
    }

    fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
        work_dir: &Path,
        env: &Env,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = global {
            if global_path.exists() {
                let global = Self::load_file(global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: explicit or working-directory config
        match explicit {
            Some(path) => config.merge(Self::load_file(path)?),
            None => {
                let local_path = work_dir.join(constants::CONFIG_FILENAME);
                if local_path.exists() {
                    let local = Self::load_file(&local_path)?;
                    config.merge(local);
                }
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        debug!(?config, "configuration resolved");
        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge a file layer into this config; every key the file sets wins.
    fn merge(&mut self, file: ConfigFile) {
        if let Some(url) = file.source.url {
            self.source.url = url;
        }
        if let Some(secs) = file.source.timeout_secs {
            self.source.timeout_secs = Some(secs);
        }
        if let Some(path) = file.output.path {
            self.output.path = path;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(url) = env.non_empty(constants::ENV_URL) {
            self.source.url = url;
        }
        if let Some(path) = env.non_empty(constants::ENV_OUTPUT) {
            self.output.path = PathBuf::from(path);
        }
        if let Some(val) = env.non_empty(constants::ENV_TIMEOUT) {
            match val.parse::<u64>() {
                Ok(secs) => self.source.timeout_secs = Some(secs),
                Err(_) => warn!("ignoring invalid {} value: {val}", constants::ENV_TIMEOUT),
            }
        }
    }

    /// Apply CLI flag overrides, the highest-priority layer.
    pub fn apply_overrides(&mut self, url: Option<String>, output: Option<PathBuf>) {
        if let Some(url) = url {
            self.source.url = url;
        }
        if let Some(path) = output {
            self.output.path = path;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_env() -> Env {
        Env::mock(Vec::<(&str, &str)>::new())
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.source.url, "https://jsonplaceholder.typicode.com/users");
        assert_eq!(config.source.timeout_secs, None);
        assert_eq!(config.output.path, PathBuf::from("users_report.csv"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[source]
url = "http://localhost:8080/users"
timeout_secs = 10

[output]
path = "out/report.csv"
"#;
        let mut config = Config::default();
        config.merge(toml::from_str(toml_str).unwrap());
        assert_eq!(config.source.url, "http://localhost:8080/users");
        assert_eq!(config.source.timeout_secs, Some(10));
        assert_eq!(config.output.path, PathBuf::from("out/report.csv"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let mut config = Config::default();
        config.merge(toml::from_str("[output]\npath = \"r.csv\"\n").unwrap());
        assert_eq!(config.source, SourceConfig::default());
        assert_eq!(config.output.path, PathBuf::from("r.csv"));
    }

    #[test]
    fn merge_keeps_base_when_file_is_empty() {
        let mut base = Config::default();
        base.source.url = "http://a/users".to_string();
        base.source.timeout_secs = Some(3);

        base.merge(ConfigFile::default());
        assert_eq!(base.source.url, "http://a/users");
        assert_eq!(base.source.timeout_secs, Some(3));
    }

    #[test]
    fn local_file_can_restore_default_url_over_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(&global, "[source]\nurl = \"http://global/users\"\n").unwrap();
        std::fs::write(
            dir.path().join(".users-report.toml"),
            "[source]\nurl = \"https://jsonplaceholder.typicode.com/users\"\n\n[output]\npath = \"users_report.csv\"\n",
        )
        .unwrap();

        let config = Config::load_layers(Some(&global), None, dir.path(), &no_env()).unwrap();
        assert_eq!(config.source.url, "https://jsonplaceholder.typicode.com/users");
        assert_eq!(config.output.path, PathBuf::from("users_report.csv"));
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();

        let err = Config::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("parse"), "got: {err}");
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load_layers(None, Some(&missing), dir.path(), &no_env()).unwrap_err();
        assert!(err.to_string().contains("read"), "got: {err}");
    }

    #[test]
    fn load_without_any_config_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_layers(None, None, dir.path(), &no_env()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn local_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(
            &global,
            "[source]\nurl = \"http://global/users\"\ntimeout_secs = 7\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(".users-report.toml"),
            "[source]\nurl = \"http://local/users\"\n",
        )
        .unwrap();

        let config = Config::load_layers(Some(&global), None, dir.path(), &no_env()).unwrap();
        assert_eq!(config.source.url, "http://local/users");
        assert_eq!(config.source.timeout_secs, Some(7));
    }

    #[test]
    fn explicit_file_replaces_local_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".users-report.toml"),
            "[output]\npath = \"local.csv\"\n",
        )
        .unwrap();
        let explicit = dir.path().join("custom.toml");
        std::fs::write(&explicit, "[source]\nurl = \"http://custom/users\"\n").unwrap();

        let config = Config::load_layers(None, Some(&explicit), dir.path(), &no_env()).unwrap();
        assert_eq!(config.source.url, "http://custom/users");
        assert_eq!(config.output.path, PathBuf::from("users_report.csv"));
    }

    #[test]
    fn env_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".users-report.toml"),
            "[source]\nurl = \"http://local/users\"\n",
        )
        .unwrap();
        let env = Env::mock([
            ("USERS_REPORT_URL", "http://env/users"),
            ("USERS_REPORT_OUTPUT", "env.csv"),
            ("USERS_REPORT_TIMEOUT", "12"),
        ]);

        let config = Config::load_layers(None, None, dir.path(), &env).unwrap();
        assert_eq!(config.source.url, "http://env/users");
        assert_eq!(config.output.path, PathBuf::from("env.csv"));
        assert_eq!(config.source.timeout_secs, Some(12));
    }

    #[test]
    fn invalid_timeout_env_is_ignored() {
        let env = Env::mock([("USERS_REPORT_TIMEOUT", "soon")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.source.timeout_secs, None);
    }

    #[test]
    fn cli_overrides_win() {
        let env = Env::mock([("USERS_REPORT_URL", "http://env/users")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        config.apply_overrides(Some("http://cli/users".into()), Some(PathBuf::from("cli.csv")));
        assert_eq!(config.source.url, "http://cli/users");
        assert_eq!(config.output.path, PathBuf::from("cli.csv"));
    }

    #[test]
    fn global_config_path_returns_some() {
        if let Some(p) = Config::global_config_path() {
            assert!(p.to_str().unwrap().contains("users-report"));
        }
    }
}
