use std::{fmt::Display, ops::Deref, path::PathBuf};

/// A configuration value together with where it came from.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ParsedProperty<T> {
    /// Value from a command line flag (parsed_value, flag as written)
    Cli(T, String),
    /// Value from an environment variable (parsed_value, variable name)
    Env(T, String),
    /// Value from the configuration file (parsed_value, file path)
    File(T, PathBuf),
    /// Built-in default
    Default(T),
}

impl<T> ParsedProperty<T> {
    /// Get the parsed value
    pub fn value(&self) -> &T {
        match self {
            ParsedProperty::Cli(value, _)
            | ParsedProperty::Env(value, _)
            | ParsedProperty::File(value, _)
            | ParsedProperty::Default(value) => value,
        }
    }

    /// Consume the property and return the parsed value
    pub fn into_value(self) -> T {
        match self {
            ParsedProperty::Cli(value, _)
            | ParsedProperty::Env(value, _)
            | ParsedProperty::File(value, _)
            | ParsedProperty::Default(value) => value,
        }
    }

    /// Get the source name as a string
    pub fn source_name(&self) -> &'static str {
        match self {
            ParsedProperty::Cli(_, _) => "cli",
            ParsedProperty::Env(_, _) => "env",
            ParsedProperty::File(_, _) => "file",
            ParsedProperty::Default(_) => "default",
        }
    }

    /// Human-readable origin, e.g. `env (GITFLOW_GRAPH_SEED)`
    pub fn describe_source(&self) -> String {
        match self {
            ParsedProperty::Cli(_, flag) => format!("cli ({flag})"),
            ParsedProperty::Env(_, var) => format!("env ({var})"),
            ParsedProperty::File(_, path) => format!("file ({})", path.display()),
            ParsedProperty::Default(_) => "default".to_string(),
        }
    }
}

impl<T> Deref for ParsedProperty<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value()
    }
}

impl<T: Display> Display for ParsedProperty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value().fmt(f)
    }
}

impl<T> From<T> for ParsedProperty<T> {
    fn from(value: T) -> Self {
        ParsedProperty::Default(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # ParsedProperty Value Access
    ///
    /// Tests accessing the parsed value from every source variant.
    ///
    /// ## Test Scenario
    /// - Creates ParsedProperty instances from different sources
    /// - Tests value access via value(), Deref and into_value()
    ///
    /// ## Expected Outcome
    /// - All accessors return the same parsed value
    #[test]
    fn test_parsed_property_value_access() {
        let props = [
            ParsedProperty::Cli("develop".to_string(), "--develop-branch".to_string()),
            ParsedProperty::Env(
                "develop".to_string(),
                "GITFLOW_GRAPH_DEVELOP_BRANCH".to_string(),
            ),
            ParsedProperty::File("develop".to_string(), PathBuf::from("config.toml")),
            ParsedProperty::Default("develop".to_string()),
        ];

        for prop in props {
            assert_eq!(prop.value(), "develop");
            assert_eq!(&*prop, "develop");
            assert_eq!(prop.to_string(), "develop");
            assert_eq!(prop.into_value(), "develop");
        }
    }

    /// # ParsedProperty Source Tracking
    ///
    /// Tests source names and descriptions.
    ///
    /// ## Test Scenario
    /// - Creates one property per source
    ///
    /// ## Expected Outcome
    /// - source_name() and describe_source() identify each origin
    #[test]
    fn test_parsed_property_source_tracking() {
        let cli = ParsedProperty::Cli(7u64, "--seed".to_string());
        let env = ParsedProperty::Env(7u64, "GITFLOW_GRAPH_SEED".to_string());
        let file = ParsedProperty::File(7u64, PathBuf::from("/etc/gitflow-graph/config.toml"));
        let default: ParsedProperty<u64> = 7u64.into();

        assert_eq!(cli.source_name(), "cli");
        assert_eq!(env.source_name(), "env");
        assert_eq!(file.source_name(), "file");
        assert_eq!(default.source_name(), "default");

        assert_eq!(cli.describe_source(), "cli (--seed)");
        assert_eq!(env.describe_source(), "env (GITFLOW_GRAPH_SEED)");
        assert_eq!(
            file.describe_source(),
            "file (/etc/gitflow-graph/config.toml)"
        );
        assert_eq!(default.describe_source(), "default");
    }
}
