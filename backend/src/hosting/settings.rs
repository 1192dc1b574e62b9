use std::{env, fs, io, net::SocketAddr, path::{Path, PathBuf}};
use serde::Deserialize;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.json";

/// Points at an alternative settings file.
pub const SETTINGS_PATH_VAR: &str = "TASKBOARD_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot parse settings file {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("invalid listen address {0}")]
    Address(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    pub database_path: String,
    /// Built single-page client, served for any non-API path when set.
    pub static_dir: Option<String>,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub cors_permissive: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tcp_socket_binding: "127.0.0.1".to_string(),
            tcp_socket_port: 3000,
            database_path: "tasks.redb".to_string(),
            static_dir: None,
            log_filter: "info".to_string(),
            cors_permissive: false,
        }
    }
}

impl Settings {
    /// Reads `$TASKBOARD_SETTINGS`, or `settings.json` in the working directory.
    /// A missing file means defaults.
    pub fn load() -> Result<Settings, SettingsError> {
        let path = env::var_os(SETTINGS_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME));
        Self::load_from(path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(source) => return Err(SettingsError::Read { path: path.to_path_buf(), source }),
        };
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse { path: path.to_path_buf(), source })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        let address = format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port);
        address.parse().map_err(|_| SettingsError::Address(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tcp_socket_port": 8080, "static_dir": "dist" }}"#).unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.tcp_socket_port, 8080);
        assert_eq!(settings.static_dir.as_deref(), Some("dist"));
        assert_eq!(settings.database_path, "tasks.redb");
        assert_eq!(settings.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(Settings::load_from(file.path()), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn bad_binding_is_reported() {
        let settings = Settings { tcp_socket_binding: "not an ip".into(), ..Default::default() };
        assert!(matches!(settings.socket_addr(), Err(SettingsError::Address(_))));
    }
}
