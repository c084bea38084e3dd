use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for config file operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    NoHomeDir,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not serialize config.toml: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// `~/.config/gtd/config.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".config").join("gtd").join("config.toml"))
}

/// Load the config at `path`. On first run the directory is created and a
/// default config pointing at `~/gtd.json` is written there.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = toml::from_str(&text)?;
        tracing::debug!(path = %path.display(), gtdfile = %config.gtdfile, "loaded config");
        return Ok(config);
    }

    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    let config = Config::with_home(&home);
    write_config(path, &config)?;
    tracing::info!(path = %path.display(), "wrote default config");
    Ok(config)
}

/// Serialize `config` to `path`, creating its directory if needed.
pub fn write_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_private_dir(dir).map_err(|e| ConfigError::WriteError {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    let text = toml::to_string(config)?;
    fs::write(path, text).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_load_existing_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"gtdfile = "/data/gtd.json"
memodir = "/data/memo"
filtercmd = "fzf"
editor = "nvim"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config,
            Config {
                gtdfile: "/data/gtd.json".into(),
                memodir: "/data/memo".into(),
                filtercmd: "fzf".into(),
                editor: "nvim".into(),
            }
        );
        assert_eq!(config.store_path(), PathBuf::from("/data/gtd.json"));
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "editor = \"nano\"\noutputdir = \"/legacy\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.editor, "nano");
        assert!(config.gtdfile.is_empty());
        assert!(config.memodir.is_empty());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "editor = [").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_write_config_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/config.toml");
        let config = Config::with_home(Path::new("/home/someone"));

        write_config(&path, &config).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.editor, "vi");
        assert_eq!(back.gtdfile, "/home/someone/gtd.json");
    }
}
