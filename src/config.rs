use crate::error::{ReflexError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for reflex.
///
/// Names the production and development branches the workflows operate on,
/// plus an optional committer identity for the temporary clone.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_production_branch")]
    pub production_branch: String,

    #[serde(default = "default_development_branches")]
    pub development_branches: Vec<String>,

    #[serde(default)]
    pub identity: Option<IdentityConfig>,
}

/// Committer identity for merge commits and annotated tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IdentityConfig {
    pub name: String,
    pub email: String,
}

/// Returns the default production branch.
fn default_production_branch() -> String {
    "main".to_string()
}

/// Returns the default list of development branches.
fn default_development_branches() -> Vec<String> {
    vec!["develop".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            production_branch: default_production_branch(),
            development_branches: default_development_branches(),
            identity: None,
        }
    }
}

impl Config {
    /// Apply command line / environment overrides on top of file values.
    ///
    /// An empty `development_branches` list keeps the configured branches.
    pub fn with_overrides(
        mut self,
        production_branch: Option<String>,
        development_branches: Vec<String>,
    ) -> Self {
        if let Some(production) = production_branch {
            self.production_branch = production;
        }
        if !development_branches.is_empty() {
            self.development_branches = development_branches;
        }
        self
    }

    /// Branch new releases are opened from: the first development branch.
    pub fn primary_development_branch(&self) -> Result<&str> {
        self.development_branches
            .first()
            .map(String::as_str)
            .ok_or_else(|| ReflexError::config("at least one development branch is required"))
    }

    /// Reject branch layouts the workflows cannot operate on.
    pub fn validate(&self) -> Result<()> {
        if self.production_branch.trim().is_empty() {
            return Err(ReflexError::config("production branch name is empty"));
        }
        if self.development_branches.is_empty() {
            return Err(ReflexError::config(
                "at least one development branch is required",
            ));
        }
        for branch in &self.development_branches {
            if branch.trim().is_empty() {
                return Err(ReflexError::config("development branch name is empty"));
            }
            if *branch == self.production_branch {
                return Err(ReflexError::config(format!(
                    "'{}' cannot be both the production and a development branch",
                    branch
                )));
            }
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `reflex.toml` in current directory
/// 3. `.reflex.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(ReflexError::Config)` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if Path::new("./reflex.toml").exists() {
        read_config_file(Path::new("./reflex.toml"))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".reflex.toml");
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ReflexError::config(format!("cannot read '{}': {}", path.display(), e))
    })
}

/// Parse configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ReflexError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.production_branch, "main");
        assert_eq!(config.development_branches, vec!["develop"]);
        assert_eq!(config.identity, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config_fills_defaults() {
        let config = parse_config("production_branch = \"master\"\n").unwrap();
        assert_eq!(config.production_branch, "master");
        assert_eq!(config.development_branches, vec!["develop"]);
    }

    #[test]
    fn test_parse_identity() {
        let config = parse_config(
            r#"
[identity]
name = "Release Bot"
email = "release@example.com"
"#,
        )
        .unwrap();
        assert_eq!(
            config.identity,
            Some(IdentityConfig {
                name: "Release Bot".to_string(),
                email: "release@example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config("development_branches = \"develop\"");
        assert!(matches!(result, Err(ReflexError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(
            Some("master".to_string()),
            vec!["develop".to_string(), "develop-2".to_string()],
        );
        assert_eq!(config.production_branch, "master");
        assert_eq!(config.development_branches, vec!["develop", "develop-2"]);
        assert_eq!(config.primary_development_branch().unwrap(), "develop");
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let config = Config::default().with_overrides(None, Vec::new());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_rejects_bad_layouts() {
        let no_dev = Config {
            development_branches: Vec::new(),
            ..Config::default()
        };
        assert!(no_dev.validate().is_err());
        assert!(no_dev.primary_development_branch().is_err());

        let overlapping = Config::default().with_overrides(None, vec!["main".to_string()]);
        assert!(overlapping.validate().is_err());

        let blank = Config::default().with_overrides(Some(" ".to_string()), Vec::new());
        assert!(blank.validate().is_err());
    }
}
