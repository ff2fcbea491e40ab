use crate::{config::Config, error::ConfigError, export::OutputFormat};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Arguments shared by every command that produces commit messages
#[derive(ClapArgs, Clone, Default, Debug)]
pub struct SharedArgs {
    // Branch Configuration
    /// Name of the integration branch [default: develop]
    #[arg(long, help_heading = "Branch Configuration")]
    pub develop_branch: Option<String>,

    /// Name of the production branch [default: master]
    #[arg(long, help_heading = "Branch Configuration")]
    pub master_branch: Option<String>,

    // Message Generation
    /// Comma-separated conventional commit types (e.g. "feat,fix,docs")
    #[arg(long, help_heading = "Message Generation")]
    pub commit_types: Option<String>,

    /// Comma-separated commit scopes; pass "" to omit scopes
    #[arg(long, help_heading = "Message Generation")]
    pub commit_components: Option<String>,

    /// Minimum words per generated subject [default: 3]
    #[arg(long, help_heading = "Message Generation")]
    pub min_words: Option<usize>,

    /// Maximum words per generated subject [default: 6]
    #[arg(long, help_heading = "Message Generation")]
    pub max_words: Option<usize>,

    /// Seed for reproducible output (random when omitted)
    #[arg(short, long, help_heading = "Message Generation")]
    pub seed: Option<u64>,
}

/// Arguments for the `generate` command
#[derive(ClapArgs, Clone, Debug, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub shared: SharedArgs,

    /// Number of release rounds [default: 2]
    #[arg(short, long, help_heading = "History Shape")]
    pub releases: Option<u32>,

    /// Feature branches per release [default: 3]
    #[arg(short, long = "features", help_heading = "History Shape")]
    pub features_per_release: Option<u32>,

    /// Maximum commits per feature branch [default: 3]
    #[arg(long, help_heading = "History Shape")]
    pub max_commits: Option<u32>,

    /// Chance of a hotfix after each release, 0.0 to 1.0 [default: 0.25]
    #[arg(long, help_heading = "History Shape")]
    pub hotfix_probability: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help_heading = "Output")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long, help_heading = "Output")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `messages` command
#[derive(ClapArgs, Clone, Debug)]
pub struct MessagesArgs {
    #[command(flatten)]
    pub shared: SharedArgs,

    /// Number of messages to print
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,
}

/// Logging flags. They are read before clap runs, see
/// [`crate::logging::parse_early_log_config`]; declaring them here keeps
/// clap from rejecting them and documents them in `--help`.
#[derive(ClapArgs, Clone, Debug, Default)]
pub struct LogArgs {
    /// Enable logging at this level (trace, debug, info, warn, error)
    #[arg(long, global = true, help_heading = "Logging")]
    pub log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, help_heading = "Logging")]
    pub log_file: Option<PathBuf>,

    /// Log format (text or json)
    #[arg(long, global = true, help_heading = "Logging")]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate a synthetic gitflow history
    #[command(
        visible_alias = "g",
        long_about = "Generate a synthetic gitflow history.\n\n\
            Each release round opens feature branches from develop, merges them back,\n\
            then cuts a release branch that is merged into master (tagged v<version>)\n\
            and back into develop. Hotfixes follow releases at random.",
        after_help = "EXAMPLES:\n    \
            # Reproducible history as a text log\n    \
            gitflow-graph generate --seed 42\n\n    \
            # Larger history as JSON, written to a file\n    \
            gitflow-graph generate -r 5 -f 4 --format json -o history.json"
    )]
    Generate(GenerateArgs),

    /// Print sample conventional commit messages
    #[command(
        visible_alias = "m",
        after_help = "EXAMPLES:\n    \
            gitflow-graph messages -n 5 --seed 7\n    \
            gitflow-graph messages --commit-types feat,fix --commit-components \"\""
    )]
    Messages(MessagesArgs),
}

impl Commands {
    /// Configuration built from this command's flags only.
    pub fn cli_config(&self) -> Config {
        match self {
            Commands::Generate(args) => Config::from_generate_args(args),
            Commands::Messages(args) => Config::from_shared_args(&args.shared),
        }
    }

    /// Flags layered over environment, config file and defaults.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        Config::resolve(self.cli_config())
    }
}

#[derive(Parser, Clone, Debug)]
#[command(
    author,
    version,
    about = "Generate synthetic gitflow commit histories",
    long_about = "Generate synthetic gitflow commit histories.\n\n\
        Builds an in-memory commit graph by driving feature, release and hotfix\n\
        branches through their merge cascades, with conventional commit messages.\n\n\
        Configuration can be provided via CLI arguments, environment variables\n\
        (GITFLOW_GRAPH_*) or a config file (~/.config/gitflow-graph/config.toml).",
    after_help = "EXAMPLES:\n    \
        gitflow-graph generate --seed 42\n    \
        gitflow-graph messages -n 5\n    \
        gitflow-graph --create-config"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Create a sample configuration file at ~/.config/gitflow-graph/config.toml
    #[arg(long)]
    pub create_config: bool,

    #[command(flatten)]
    pub log: LogArgs,
}
