//! Configuration management for gitflow-graph.
//!
//! Values are collected from four sources and merged with precedence
//! CLI > environment (`GITFLOW_GRAPH_*`) > config file > defaults. Every value
//! remembers its source through [`ParsedProperty`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitflow_graph::Config;
//!
//! let config = Config::default()
//!     .merge(Config::load_from_file().unwrap())
//!     .merge(Config::load_from_env());
//! let settings = config.into_settings().unwrap();
//! println!("develop branch: {}", settings.develop_branch);
//! ```

use crate::{
    error::ConfigError,
    message::{DEFAULT_COMPONENTS, DEFAULT_TYPES},
    models::{GenerateArgs, SharedArgs},
    parsed_property::ParsedProperty,
    workflow::GenerateSettings,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

const ENV_PREFIX: &str = "GITFLOW_GRAPH_";
const APP_DIR: &str = "gitflow-graph";

/// Shape of `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    pub develop_branch: Option<String>,
    pub master_branch: Option<String>,
    pub commit_types: Option<Vec<String>>,
    pub commit_components: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub releases: Option<u32>,
    pub features_per_release: Option<u32>,
    pub max_commits: Option<u32>,
    pub hotfix_probability: Option<f64>,
    pub min_words: Option<usize>,
    pub max_words: Option<usize>,
}

/// Settings assembled from CLI arguments, environment variables, config file and defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Integration branch features are forked from and merged into.
    pub develop_branch: Option<ParsedProperty<String>>,
    /// Production branch releases and hotfixes are merged into.
    pub master_branch: Option<ParsedProperty<String>>,
    pub commit_types: Option<ParsedProperty<Vec<String>>>,
    /// An empty list drops the scope from generated messages.
    pub commit_components: Option<ParsedProperty<Vec<String>>>,
    pub seed: Option<ParsedProperty<u64>>,
    pub releases: Option<ParsedProperty<u32>>,
    pub features_per_release: Option<ParsedProperty<u32>>,
    pub max_commits: Option<ParsedProperty<u32>>,
    pub hotfix_probability: Option<ParsedProperty<f64>>,
    pub min_words: Option<ParsedProperty<usize>>,
    pub max_words: Option<ParsedProperty<usize>>,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = GenerateSettings::default();
        Self {
            develop_branch: Some(ParsedProperty::Default(defaults.develop_branch)),
            master_branch: Some(ParsedProperty::Default(defaults.master_branch)),
            commit_types: Some(ParsedProperty::Default(to_strings(DEFAULT_TYPES))),
            commit_components: Some(ParsedProperty::Default(to_strings(DEFAULT_COMPONENTS))),
            seed: None,
            releases: Some(ParsedProperty::Default(defaults.releases)),
            features_per_release: Some(ParsedProperty::Default(defaults.features_per_release)),
            max_commits: Some(ParsedProperty::Default(defaults.max_commits)),
            hotfix_probability: Some(ParsedProperty::Default(defaults.hotfix_probability)),
            min_words: Some(ParsedProperty::Default(defaults.min_words)),
            max_words: Some(ParsedProperty::Default(defaults.max_words)),
        }
    }
}

impl Config {
    /// A config with no value from any source.
    pub fn empty() -> Self {
        Self {
            develop_branch: None,
            master_branch: None,
            commit_types: None,
            commit_components: None,
            seed: None,
            releases: None,
            features_per_release: None,
            max_commits: None,
            hotfix_probability: None,
            min_words: None,
            max_words: None,
        }
    }

    /// Load configuration from the XDG config directory.
    ///
    /// A missing file yields an empty config.
    pub fn load_from_file() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file found");
            return Ok(Self::empty());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from an explicit TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "Loaded config file");

        let src = || path.to_path_buf();
        Ok(Self {
            develop_branch: file
                .develop_branch
                .map(|v| ParsedProperty::File(v, src())),
            master_branch: file
                .master_branch
                .map(|v| ParsedProperty::File(v, src())),
            commit_types: file
                .commit_types
                .map(|v| ParsedProperty::File(v, src())),
            commit_components: file
                .commit_components
                .map(|v| ParsedProperty::File(v, src())),
            seed: file.seed.map(|v| ParsedProperty::File(v, src())),
            releases: file.releases.map(|v| ParsedProperty::File(v, src())),
            features_per_release: file
                .features_per_release
                .map(|v| ParsedProperty::File(v, src())),
            max_commits: file
                .max_commits
                .map(|v| ParsedProperty::File(v, src())),
            hotfix_probability: file
                .hotfix_probability
                .map(|v| ParsedProperty::File(v, src())),
            min_words: file.min_words.map(|v| ParsedProperty::File(v, src())),
            max_words: file.max_words.map(|v| ParsedProperty::File(v, src())),
        })
    }

    /// Load configuration from `GITFLOW_GRAPH_*` environment variables.
    ///
    /// Values that fail to parse are skipped with a warning.
    pub fn load_from_env() -> Self {
        Self {
            develop_branch: env_string("DEVELOP_BRANCH"),
            master_branch: env_string("MASTER_BRANCH"),
            commit_types: env_list("COMMIT_TYPES"),
            commit_components: env_list("COMMIT_COMPONENTS"),
            seed: env_parsed("SEED"),
            releases: env_parsed("RELEASES"),
            features_per_release: env_parsed("FEATURES_PER_RELEASE"),
            max_commits: env_parsed("MAX_COMMITS"),
            hotfix_probability: env_parsed("HOTFIX_PROBABILITY"),
            min_words: env_parsed("MIN_WORDS"),
            max_words: env_parsed("MAX_WORDS"),
        }
    }

    /// `$XDG_CONFIG_HOME/gitflow-graph/config.toml`, falling back to `~/.config`.
    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = match std::env::var("XDG_CONFIG_HOME") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()
                .ok_or(ConfigError::NoHomeDirectory)?
                .join(".config"),
        };
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Merge two configurations, values in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            develop_branch: other.develop_branch.or(self.develop_branch),
            master_branch: other.master_branch.or(self.master_branch),
            commit_types: other.commit_types.or(self.commit_types),
            commit_components: other.commit_components.or(self.commit_components),
            seed: other.seed.or(self.seed),
            releases: other.releases.or(self.releases),
            features_per_release: other.features_per_release.or(self.features_per_release),
            max_commits: other.max_commits.or(self.max_commits),
            hotfix_probability: other.hotfix_probability.or(self.hotfix_probability),
            min_words: other.min_words.or(self.min_words),
            max_words: other.max_words.or(self.max_words),
        }
    }

    /// Defaults, then file, then environment, then `cli`.
    pub fn resolve(cli: Self) -> Result<Self, ConfigError> {
        let config = Self::default()
            .merge(Self::load_from_file()?)
            .merge(Self::load_from_env())
            .merge(cli);
        debug!(
            develop_branch = %source_of(&config.develop_branch),
            master_branch = %source_of(&config.master_branch),
            seed = %source_of(&config.seed),
            releases = %source_of(&config.releases),
            "Resolved configuration"
        );
        Ok(config)
    }

    /// Write a commented sample config unless one already exists.
    ///
    /// Returns the path and whether the file was written.
    pub fn create_sample_config() -> Result<(PathBuf, bool), ConfigError> {
        let config_path = Self::get_config_path()?;
        if config_path.exists() {
            return Ok((config_path, false));
        }

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::DirectoryCreationError {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        fs::write(&config_path, SAMPLE_CONFIG).map_err(|e| ConfigError::FileReadError {
            path: config_path.clone(),
            message: format!("could not write sample config: {e}"),
        })?;
        Ok((config_path, true))
    }

    /// Values given as flags common to all commands.
    pub fn from_shared_args(shared: &SharedArgs) -> Self {
        fn cli<T>(value: Option<T>, flag: &str) -> Option<ParsedProperty<T>> {
            value.map(|v| ParsedProperty::Cli(v, flag.to_string()))
        }

        Self {
            develop_branch: cli(shared.develop_branch.clone(), "--develop-branch"),
            master_branch: cli(shared.master_branch.clone(), "--master-branch"),
            commit_types: cli(
                shared.commit_types.as_deref().map(parse_list),
                "--commit-types",
            ),
            commit_components: cli(
                shared.commit_components.as_deref().map(parse_list),
                "--commit-components",
            ),
            seed: cli(shared.seed, "--seed"),
            min_words: cli(shared.min_words, "--min-words"),
            max_words: cli(shared.max_words, "--max-words"),
            ..Self::empty()
        }
    }

    /// Values given as flags to `generate`.
    pub fn from_generate_args(args: &GenerateArgs) -> Self {
        let cli = |flag: &str| flag.to_string();
        Self {
            releases: args
                .releases
                .map(|v| ParsedProperty::Cli(v, cli("--releases"))),
            features_per_release: args
                .features_per_release
                .map(|v| ParsedProperty::Cli(v, cli("--features"))),
            max_commits: args
                .max_commits
                .map(|v| ParsedProperty::Cli(v, cli("--max-commits"))),
            hotfix_probability: args
                .hotfix_probability
                .map(|v| ParsedProperty::Cli(v, cli("--hotfix-probability"))),
            ..Self::from_shared_args(&args.shared)
        }
    }

    /// Flatten into validated [`GenerateSettings`]; unset values take defaults.
    pub fn into_settings(self) -> Result<GenerateSettings, ConfigError> {
        let defaults = GenerateSettings::default();
        let settings = GenerateSettings {
            develop_branch: value_or(self.develop_branch, defaults.develop_branch),
            master_branch: value_or(self.master_branch, defaults.master_branch),
            commit_types: value_or(self.commit_types, defaults.commit_types),
            commit_components: value_or(self.commit_components, defaults.commit_components),
            min_words: value_or(self.min_words, defaults.min_words),
            max_words: value_or(self.max_words, defaults.max_words),
            seed: self.seed.map(ParsedProperty::into_value),
            releases: value_or(self.releases, defaults.releases),
            features_per_release: value_or(self.features_per_release, defaults.features_per_release),
            max_commits: value_or(self.max_commits, defaults.max_commits),
            hotfix_probability: value_or(self.hotfix_probability, defaults.hotfix_probability),
            epoch: defaults.epoch,
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where a resolved value came from, or `unset`.
fn source_of<T>(property: &Option<ParsedProperty<T>>) -> String {
    property
        .as_ref()
        .map_or_else(|| "unset".to_string(), ParsedProperty::describe_source)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn value_or<T>(property: Option<ParsedProperty<T>>, default: T) -> T {
    property.map_or(default, ParsedProperty::into_value)
}

fn env_var(name: &str) -> Option<(String, String)> {
    let key = format!("{ENV_PREFIX}{name}");
    std::env::var(&key).ok().map(|value| (key, value))
}

fn env_string(name: &str) -> Option<ParsedProperty<String>> {
    env_var(name).map(|(key, value)| ParsedProperty::Env(value, key))
}

fn env_list(name: &str) -> Option<ParsedProperty<Vec<String>>> {
    env_var(name).map(|(key, value)| ParsedProperty::Env(parse_list(&value), key))
}

fn env_parsed<T: FromStr>(name: &str) -> Option<ParsedProperty<T>> {
    let (key, value) = env_var(name)?;
    match value.trim().parse() {
        Ok(parsed) => Some(ParsedProperty::Env(parsed, key)),
        Err(_) => {
            warn!(variable = %key, value = %value, "Ignoring unparsable environment value");
            None
        }
    }
}

const SAMPLE_CONFIG: &str = r#"# gitflow-graph configuration file
# Location: $XDG_CONFIG_HOME/gitflow-graph/config.toml (defaults to ~/.config)
# Every setting can be overridden with a GITFLOW_GRAPH_* environment variable
# or a command line flag.

# Long-lived branches
develop_branch = "develop"
master_branch = "master"

# Conventional commit types and scopes used for generated messages.
# An empty commit_components list produces "type: subject" messages.
commit_types = ["build", "ci", "chore", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test"]
commit_components = ["ui", "service", "data", "model", "controller"]

# Words per generated subject
min_words = 3
max_words = 6

# History shape for `gitflow-graph generate`
releases = 2
features_per_release = 3
max_commits = 3
hotfix_probability = 0.25

# Fixed seed for reproducible output (random when unset)
# seed = 42
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::file_serial;
    use std::env;
    use tempfile::TempDir;

    const ALL_ENV_VARS: &[&str] = &[
        "DEVELOP_BRANCH",
        "MASTER_BRANCH",
        "COMMIT_TYPES",
        "COMMIT_COMPONENTS",
        "SEED",
        "RELEASES",
        "FEATURES_PER_RELEASE",
        "MAX_COMMITS",
        "HOTFIX_PROBABILITY",
        "MIN_WORDS",
        "MAX_WORDS",
    ];

    fn clear_env() {
        for name in ALL_ENV_VARS {
            unsafe {
                env::remove_var(format!("{ENV_PREFIX}{name}"));
            }
        }
    }

    /// Run `f` with XDG_CONFIG_HOME pointed at `dir`, restoring it afterwards.
    fn with_xdg<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
        let original = env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            env::set_var("XDG_CONFIG_HOME", dir);
        }
        let result = f();
        match original {
            Some(val) => unsafe {
                env::set_var("XDG_CONFIG_HOME", val);
            },
            None => unsafe {
                env::remove_var("XDG_CONFIG_HOME");
            },
        }
        result
    }

    /// # Config Default Values
    ///
    /// Tests that the default configuration contains expected values.
    ///
    /// ## Test Scenario
    /// - Creates a default Config instance
    ///
    /// ## Expected Outcome
    /// - Every field except the seed has a Default-sourced value
    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(
            config.develop_branch,
            Some(ParsedProperty::Default("develop".to_string()))
        );
        assert_eq!(
            config.master_branch,
            Some(ParsedProperty::Default("master".to_string()))
        );
        assert_eq!(config.seed, None);
        assert_eq!(config.releases, Some(ParsedProperty::Default(2)));
        assert_eq!(config.features_per_release, Some(ParsedProperty::Default(3)));
        assert_eq!(config.max_commits, Some(ParsedProperty::Default(3)));
        assert_eq!(config.hotfix_probability, Some(ParsedProperty::Default(0.25)));
        assert_eq!(config.min_words, Some(ParsedProperty::Default(3)));
        assert_eq!(config.max_words, Some(ParsedProperty::Default(6)));
        assert!(config.commit_types.unwrap().contains(&"feat".to_string()));
    }

    /// # Load Config from Environment Variables
    ///
    /// Tests loading configuration when GITFLOW_GRAPH_* variables are set.
    ///
    /// ## Test Scenario
    /// - Sets branch, list and numeric variables
    /// - Loads configuration from environment
    ///
    /// ## Expected Outcome
    /// - Values are parsed and tagged with their variable name
    /// - An empty COMMIT_COMPONENTS yields an empty list
    #[test]
    #[file_serial(env_tests)]
    fn test_load_from_env_variables() {
        clear_env();
        unsafe {
            env::set_var("GITFLOW_GRAPH_DEVELOP_BRANCH", "dev");
            env::set_var("GITFLOW_GRAPH_COMMIT_TYPES", "feat, fix ,,docs");
            env::set_var("GITFLOW_GRAPH_COMMIT_COMPONENTS", "");
            env::set_var("GITFLOW_GRAPH_SEED", "42");
            env::set_var("GITFLOW_GRAPH_RELEASES", "5");
            env::set_var("GITFLOW_GRAPH_HOTFIX_PROBABILITY", "0.5");
        }

        let config = Config::load_from_env();
        clear_env();

        assert_eq!(
            config.develop_branch,
            Some(ParsedProperty::Env(
                "dev".to_string(),
                "GITFLOW_GRAPH_DEVELOP_BRANCH".to_string()
            ))
        );
        assert_eq!(
            config.commit_types.as_deref(),
            Some(&vec!["feat".to_string(), "fix".to_string(), "docs".to_string()])
        );
        assert_eq!(config.commit_components.as_deref(), Some(&Vec::new()));
        assert_eq!(config.seed.as_deref(), Some(&42));
        assert_eq!(config.releases.as_deref(), Some(&5));
        assert_eq!(config.hotfix_probability.as_deref(), Some(&0.5));
        assert_eq!(config.master_branch, None);
        assert_eq!(config.max_words, None);
    }

    #[test]
    #[file_serial(env_tests)]
    fn test_load_from_env_no_variables() {
        clear_env();
        assert_eq!(Config::load_from_env(), Config::empty());
    }

    /// # Invalid Numeric Environment Values
    ///
    /// ## Test Scenario
    /// - Sets non-numeric SEED and RELEASES
    ///
    /// ## Expected Outcome
    /// - The invalid values are skipped, not reported as errors
    #[test]
    #[file_serial(env_tests)]
    fn test_load_from_env_invalid_numeric_values() {
        clear_env();
        unsafe {
            env::set_var("GITFLOW_GRAPH_SEED", "not-a-number");
            env::set_var("GITFLOW_GRAPH_RELEASES", "-1");
            env::set_var("GITFLOW_GRAPH_MAX_COMMITS", "4");
        }

        let config = Config::load_from_env();
        clear_env();

        assert_eq!(config.seed, None);
        assert_eq!(config.releases, None);
        assert_eq!(config.max_commits.as_deref(), Some(&4));
    }

    /// # Config Merge Precedence
    ///
    /// Tests that merged values come from the later config when present.
    ///
    /// ## Test Scenario
    /// - Merges defaults, a file-sourced config and a CLI-sourced config
    ///
    /// ## Expected Outcome
    /// - CLI beats file, file beats defaults, gaps fall through
    #[test]
    fn test_config_merge_precedence() {
        let file = Config {
            develop_branch: Some(ParsedProperty::File(
                "dev".to_string(),
                PathBuf::from("config.toml"),
            )),
            releases: Some(ParsedProperty::File(4, PathBuf::from("config.toml"))),
            ..Config::empty()
        };
        let cli = Config {
            releases: Some(ParsedProperty::Cli(9, "--releases".to_string())),
            ..Config::empty()
        };

        let merged = Config::default().merge(file).merge(cli);

        assert_eq!(merged.develop_branch.as_ref().unwrap().source_name(), "file");
        assert_eq!(
            merged.releases,
            Some(ParsedProperty::Cli(9, "--releases".to_string()))
        );
        assert_eq!(merged.master_branch.as_ref().unwrap().source_name(), "default");
        assert_eq!(merged.seed, None);
    }

    #[test]
    fn test_config_merge_empty_configs() {
        assert_eq!(Config::empty().merge(Config::empty()), Config::empty());
        assert_eq!(Config::default().merge(Config::empty()), Config::default());
    }

    /// # Load Config from TOML File
    ///
    /// Tests loading configuration from a config file in XDG_CONFIG_HOME.
    ///
    /// ## Test Scenario
    /// - Writes a TOML file into a temporary XDG directory
    /// - Loads configuration from file
    ///
    /// ## Expected Outcome
    /// - Values are parsed and tagged with the file path
    #[test]
    #[file_serial(env_tests)]
    fn test_load_from_file_valid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let app_dir = temp_dir.path().join(APP_DIR);
        fs::create_dir_all(&app_dir).unwrap();
        let config_path = app_dir.join("config.toml");
        fs::write(
            &config_path,
            r#"
develop_branch = "integration"
commit_types = ["feat", "fix"]
commit_components = []
seed = 7
max_commits = 5
hotfix_probability = 1.0
"#,
        )
        .unwrap();

        let config = with_xdg(temp_dir.path(), Config::load_from_file).unwrap();

        assert_eq!(
            config.develop_branch,
            Some(ParsedProperty::File(
                "integration".to_string(),
                config_path.clone()
            ))
        );
        assert_eq!(
            config.commit_types.as_deref(),
            Some(&vec!["feat".to_string(), "fix".to_string()])
        );
        assert_eq!(config.commit_components.as_deref(), Some(&Vec::new()));
        assert_eq!(config.seed, Some(ParsedProperty::File(7, config_path)));
        assert_eq!(config.max_commits.as_deref(), Some(&5));
        assert_eq!(config.hotfix_probability.as_deref(), Some(&1.0));
        assert_eq!(config.releases, None);
    }

    #[test]
    #[file_serial(env_tests)]
    fn test_load_from_file_missing_file_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config = with_xdg(temp_dir.path(), Config::load_from_file).unwrap();
        assert_eq!(config, Config::empty());
    }

    /// # Invalid TOML
    ///
    /// ## Test Scenario
    /// - Writes a file with a type mismatch and one with an unknown key
    ///
    /// ## Expected Outcome
    /// - Both fail with ConfigError::ParseError naming the file
    #[test]
    fn test_load_from_path_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        for content in ["releases = \"many\"", "organization = \"acme\""] {
            fs::write(&path, content).unwrap();
            match Config::load_from_path(&path) {
                Err(ConfigError::ParseError { path: p, .. }) => assert_eq!(p, path),
                other => panic!("expected parse error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::FileReadError { .. })));
    }

    #[test]
    #[file_serial(env_tests)]
    fn test_get_config_path_uses_xdg_config_home() {
        let temp_dir = TempDir::new().unwrap();
        let path = with_xdg(temp_dir.path(), Config::get_config_path).unwrap();
        assert_eq!(path, temp_dir.path().join(APP_DIR).join("config.toml"));
    }

    /// # Sample Config Creation
    ///
    /// ## Test Scenario
    /// - Creates the sample config in an empty XDG directory
    /// - Loads it back through load_from_file
    ///
    /// ## Expected Outcome
    /// - The file is written and its values equal the built-in defaults
    #[test]
    #[file_serial(env_tests)]
    fn test_create_sample_config_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let (path, created) = with_xdg(temp_dir.path(), Config::create_sample_config).unwrap();

        assert!(created);
        assert!(path.exists());

        let loaded = Config::load_from_path(&path).unwrap().into_settings().unwrap();
        assert_eq!(loaded, GenerateSettings::default());
    }

    #[test]
    #[file_serial(env_tests)]
    fn test_create_sample_config_does_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let app_dir = temp_dir.path().join(APP_DIR);
        fs::create_dir_all(&app_dir).unwrap();
        fs::write(app_dir.join("config.toml"), "seed = 1\n").unwrap();

        let (path, created) = with_xdg(temp_dir.path(), Config::create_sample_config).unwrap();

        assert!(!created);
        assert_eq!(fs::read_to_string(path).unwrap(), "seed = 1\n");
    }

    /// # Config From CLI Arguments
    ///
    /// ## Test Scenario
    /// - Builds GenerateArgs with a few flags set
    ///
    /// ## Expected Outcome
    /// - Only the given flags produce Cli-sourced values
    /// - Comma-separated lists are split
    #[test]
    fn test_from_generate_args() {
        let args = GenerateArgs {
            shared: SharedArgs {
                commit_components: Some(String::new()),
                commit_types: Some("feat,fix".to_string()),
                seed: Some(11),
                ..SharedArgs::default()
            },
            releases: Some(1),
            hotfix_probability: Some(0.0),
            ..GenerateArgs::default()
        };

        let config = Config::from_generate_args(&args);

        assert_eq!(
            config.seed,
            Some(ParsedProperty::Cli(11, "--seed".to_string()))
        );
        assert_eq!(config.commit_components.as_deref(), Some(&Vec::new()));
        assert_eq!(config.commit_types.as_ref().unwrap().len(), 2);
        assert_eq!(config.releases.as_deref(), Some(&1));
        assert_eq!(config.develop_branch, None);
        assert_eq!(config.max_commits, None);
    }

    /// # Settings Conversion
    ///
    /// ## Test Scenario
    /// - Converts defaults merged with overrides into GenerateSettings
    /// - Converts configs holding invalid values
    ///
    /// ## Expected Outcome
    /// - Valid configs map field by field
    /// - Invalid ranges return ConfigError::InvalidValue
    #[test]
    fn test_into_settings() {
        let config = Config::default().merge(Config {
            seed: Some(ParsedProperty::Default(3)),
            master_branch: Some(ParsedProperty::Default("main".to_string())),
            ..Config::empty()
        });
        let settings = config.into_settings().unwrap();
        assert_eq!(settings.seed, Some(3));
        assert_eq!(settings.master_branch, "main");
        assert_eq!(settings.releases, 2);

        let invalid = [
            Config {
                min_words: Some(ParsedProperty::Default(8)),
                ..Config::default()
            },
            Config {
                hotfix_probability: Some(ParsedProperty::Default(-0.1)),
                ..Config::default()
            },
            Config {
                max_commits: Some(ParsedProperty::Default(0)),
                ..Config::default()
            },
        ];
        for config in invalid {
            assert!(matches!(
                config.into_settings(),
                Err(ConfigError::InvalidValue { .. })
            ));
        }
    }

    #[test]
    fn test_empty_config_uses_default_settings() {
        assert_eq!(
            Config::empty().into_settings().unwrap(),
            GenerateSettings::default()
        );
    }

    #[test]
    fn test_source_of_describes_origin() {
        let seed = Some(ParsedProperty::Env(
            5u64,
            "GITFLOW_GRAPH_SEED".to_string(),
        ));
        assert_eq!(source_of(&seed), "env (GITFLOW_GRAPH_SEED)");
        assert_eq!(source_of::<u64>(&None), "unset");
        assert_eq!(source_of(&Config::default().releases), "default");
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("a, b ,c"), vec!["a", "b", "c"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ").is_empty());
    }
}
