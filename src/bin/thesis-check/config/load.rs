use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::env::apply_env;
use super::error::ConfigError;
use super::types::AppConfig;

const DEFAULT_CONFIG_FILE: &str = "thesis-check.toml";

/// A merged configuration and the files it was read from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub file: Option<PathBuf>,
    pub dotenv: Option<PathBuf>,
}

impl LoadedConfig {
    /// Reports the sources once the logger is running.
    pub fn log_sources(&self) {
        match &self.file {
            Some(path) => log::debug!("configuration file: {}", path.display()),
            None => log::debug!("no configuration file, using defaults"),
        }
        if let Some(path) = &self.dotenv {
            log::debug!("loaded environment from {}", path.display());
        }
    }
}

/// Defaults, then the TOML file, then `.env` and the process environment.
///
/// An explicit `path` must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let (mut config, file) = match path {
        Some(path) => (read_config(path)?, Some(path.to_path_buf())),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            match read_optional(default)? {
                Some(config) => (config, Some(default.to_path_buf())),
                None => (AppConfig::default(), None),
            }
        }
    };
    let dotenv = load_dotenv()?;
    apply_env(&mut config, |name| std::env::var(name).ok())?;
    Ok(LoadedConfig {
        config,
        file,
        dotenv,
    })
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

fn read_optional(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    match read_config(path) {
        Ok(config) => Ok(Some(config)),
        Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Loads `.env` without overriding variables that are already set.
fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn explicit_file_is_read() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "[endpoint]\nbase_url = \"http://10.0.0.2:1234/v1\"").expect("write");
        let config = read_config(file.path()).expect("config");
        assert_eq!(config.endpoint.base_url, "http://10.0.0.2:1234/v1");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = read_config(Path::new("/definitely/not/here.toml")).expect_err("missing");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn missing_default_file_is_fine() {
        assert!(read_optional(Path::new("/definitely/not/here.toml"))
            .expect("optional")
            .is_none());
    }

    #[test]
    fn broken_toml_is_reported() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "[debate\nmax_rounds = ").expect("write");
        assert!(matches!(read_config(file.path()), Err(ConfigError::Toml(_))));
    }
}
