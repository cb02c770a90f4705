//! Configuration file
//!
//! `formcodec.json`; every key is optional:
//!
//! ```json
//! {
//!   "schema_dir": "./schemas",
//!   "host": "127.0.0.1",
//!   "port": 8080,
//!   "id_prefix": null,
//!   "form_method": "post",
//!   "form_enctype": "multipart/form-data",
//!   "cors_origins": []
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::render::FormAttributes;

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of `*.json` schemas served as forms
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix for element ids of rendered controls
    #[serde(default)]
    pub id_prefix: Option<String>,

    /// `get` or `post`; `serve` accepts only `post`
    #[serde(default = "default_form_method")]
    pub form_method: String,

    #[serde(default = "default_form_enctype")]
    pub form_enctype: String,

    /// Empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("./schemas")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_form_method() -> String {
    "post".to_string()
}

fn default_form_enctype() -> String {
    "multipart/form-data".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            host: default_host(),
            port: default_port(),
            id_prefix: None,
            form_method: default_form_method(),
            form_enctype: default_form_enctype(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.form_method != "get" && self.form_method != "post" {
            return Err(CliError::config_error(format!(
                "Invalid form_method: '{}'. Expected 'get' or 'post'.",
                self.form_method
            )));
        }

        if self.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        if self.form_enctype.trim().is_empty() {
            return Err(CliError::config_error("form_enctype must not be empty"));
        }

        Ok(())
    }

    /// Attributes of served `<form>` elements posting to `action`
    pub fn form_attributes(&self, action: Option<String>) -> FormAttributes {
        FormAttributes {
            method: self.form_method.clone(),
            action,
            enctype: Some(self.form_enctype.clone()),
            ..FormAttributes::default()
        }
    }

    /// Checks the settings only the form host depends on.
    ///
    /// Hosted forms submit to `POST /forms/:name`; a `get` form would send
    /// its fields as a query string the host never reads.
    pub fn validate_for_serve(&self) -> CliResult<()> {
        if self.form_method != "post" {
            return Err(CliError::config_error(format!(
                "Invalid form_method for serve: '{}'. Hosted forms must use 'post'.",
                self.form_method
            )));
        }
        Ok(())
    }

    pub fn server_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::errors::CliErrorCode;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, value: serde_json::Value) -> PathBuf {
        let path = dir.path().join("formcodec.json");
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, json!({}));

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.schema_dir, PathBuf::from("./schemas"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.form_method, "post");
    }

    #[test]
    fn test_overrides() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            json!({ "port": 9000, "form_method": "get", "id_prefix": "f-" }),
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.id_prefix.as_deref(), Some("f-"));
        assert_eq!(config.server_config().socket_addr(), "127.0.0.1:9000");
        assert_eq!(config.form_attributes(None).method, "get");
    }

    #[test]
    fn test_invalid_method_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, json!({ "form_method": "put" }));

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
    }

    #[test]
    fn test_get_method_rejected_for_serve() {
        let get = Config {
            form_method: "get".to_string(),
            ..Config::default()
        };
        let err = get.validate_for_serve().unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
        assert!(err.message().contains("'get'"));

        assert!(Config::default().validate_for_serve().is_ok());
    }

    #[test]
    fn test_missing_file_rejected() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
    }
}
