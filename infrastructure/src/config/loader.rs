//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["studybuddy.toml", ".studybuddy.toml"];

/// Prefix of environment overrides, e.g. `STUDYBUDDY_GENERATION__ATTEMPTS_PER_MODEL`
const ENV_PREFIX: &str = "STUDYBUDDY_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `STUDYBUDDY_*` (nested keys joined with `__`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./studybuddy.toml` or `./.studybuddy.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/study-buddy/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
    }

    /// Merge the given files over the defaults, then the environment.
    ///
    /// Missing global/project files are skipped; a missing explicit file
    /// is an error.
    pub fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/study-buddy/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("study-buddy").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./studybuddy.toml or ./.studybuddy.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.generation.attempts_per_model, 2);
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("study-buddy"));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = TempDir::new().unwrap();
        let global = write(
            &dir,
            "global.toml",
            "[generation]\nattempts_per_model = 5\nrate_limit_delay_ms = 10\n",
        );
        let project = write(&dir, "project.toml", "[generation]\nattempts_per_model = 3\n");
        let explicit = write(&dir, "explicit.toml", "[output]\ncolor = false\n");

        let config =
            ConfigLoader::load_from(Some(&global), Some(&project), Some(&explicit)).unwrap();
        assert_eq!(config.generation.attempts_per_model, 3);
        assert_eq!(config.generation.rate_limit_delay_ms, 10);
        assert!(!config.output.color);
        // Untouched sections keep their defaults
        assert_eq!(config.providers.pollinations.timeout_secs, 30);
    }

    #[test]
    fn test_missing_optional_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let config = ConfigLoader::load_from(Some(&missing), Some(&missing), None).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ConfigLoader::load_from(None, None, Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = TempDir::new().unwrap();
        let bad = write(&dir, "bad.toml", "[generation]\nattempts_per_model = \"many\"\n");
        let err = ConfigLoader::load_from(None, None, Some(&bad)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
