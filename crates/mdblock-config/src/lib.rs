use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_TAB_SIZE: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

fn default_tab_size() -> usize {
    DEFAULT_TAB_SIZE
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Columns a tab counts for when measuring indentation.
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Renumber ordered lists touched by a move.
    #[serde(default = "default_true")]
    pub renumber_ordered_lists: bool,

    /// Directory that relative document paths are looked up in when they do
    /// not exist in the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            renumber_ordered_lists: true,
            notes_path: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if config.tab_size == 0 {
            config.tab_size = DEFAULT_TAB_SIZE;
        }
        // Expand shell variables and tilde in the loaded notes path
        config.notes_path = config
            .notes_path
            .map(|p| Self::expand_path(&p).unwrap_or(p));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mdblock");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Where to read a document named on the command line: as given when it
    /// exists or is absolute, otherwise under `notes_path`.
    pub fn resolve_document_path(&self, file: &Path) -> PathBuf {
        if file.is_absolute() || file.exists() {
            return file.to_path_buf();
        }
        match &self.notes_path {
            Some(root) => root.join(file),
            None => file.to_path_buf(),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/mdblock/config.toml"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tab_size, 4);
        assert!(config.renumber_ordered_lists);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("renumber_ordered_lists = false").unwrap();
        assert_eq!(config.tab_size, 4);
        assert!(!config.renumber_ordered_lists);
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("MDBLOCK_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$MDBLOCK_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("MDBLOCK_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        assert_eq!(Config::expand_path(&path), Some(path));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "tab_size = \"wide\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_zero_tab_size_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "tab_size = 0").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.tab_size, 4);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            tab_size: 2,
            renumber_ordered_lists: false,
            notes_path: Some(PathBuf::from("/tmp/test-notes")),
        };

        test_config.save_to_path(&config_file).unwrap();

        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_notes_path_tilde_is_expanded_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = \"~/test/notes\"").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        let notes = config.notes_path.unwrap();
        assert!(!notes.to_string_lossy().starts_with('~'));
        assert!(notes.to_string_lossy().ends_with("test/notes"));
    }

    #[test]
    fn test_resolve_document_path() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            notes_path: Some(temp_dir.path().to_path_buf()),
            ..Config::default()
        };

        let missing = Path::new("no-such-file-here.md");
        assert_eq!(
            config.resolve_document_path(missing),
            temp_dir.path().join("no-such-file-here.md")
        );

        let absolute = temp_dir.path().join("x.md");
        assert_eq!(config.resolve_document_path(&absolute), absolute);
        assert_eq!(
            Config::default().resolve_document_path(missing),
            missing.to_path_buf()
        );
    }
}
