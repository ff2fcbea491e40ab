//! Unified error handling for the gitflow-graph library.
//!
//! This module provides the error hierarchy using `thiserror` so callers can
//! match on the failure they care about instead of parsing messages.
//!
//! ## Error Categories
//!
//! - [`GraphError`]: Errors raised by a commit graph (unknown branches, bad names, duplicate tags)
//! - [`FlowError`]: Errors from a [`crate::flow::BranchFlow`] lifecycle
//! - [`ProviderError`]: Errors from message or tag providers
//! - [`ConfigError`]: Errors from configuration loading and validation
//!
//! ## Example
//!
//! ```rust
//! use gitflow_graph::error::{GitflowError, GraphError};
//!
//! fn example() -> Result<(), GitflowError> {
//!     // Errors are automatically converted via From trait
//!     Err(GraphError::UnknownBranch { branch: "develop".to_string() })?;
//!     Ok(())
//! }
//!
//! assert!(example().is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the gitflow-graph library.
#[derive(Error, Debug)]
pub enum GitflowError {
    /// An error raised by the commit graph.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// An error raised while driving a branch flow.
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    /// An error occurred while loading or validating configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A generic error for cases not covered by specific error types.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Errors that a commit graph can raise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The referenced branch does not exist in the graph.
    #[error("Unknown branch '{branch}'")]
    UnknownBranch {
        /// Name of the missing branch.
        branch: String,
    },

    /// The branch name is not a valid git reference.
    #[error("Invalid branch name '{name}': {reason}")]
    InvalidBranchName {
        /// The rejected name.
        name: String,
        /// Which rule the name broke.
        reason: String,
    },

    /// The branch has no commit to merge or tag.
    #[error("Branch '{branch}' has no commits")]
    EmptyBranch {
        /// Name of the empty branch.
        branch: String,
    },

    /// A branch was merged into itself.
    #[error("Cannot merge branch '{branch}' into itself")]
    SelfMerge {
        /// Name of the branch.
        branch: String,
    },

    /// A tag with this name is already attached somewhere in the graph.
    #[error("Tag '{tag}' already exists")]
    TagExists {
        /// The duplicate tag name.
        tag: String,
    },

    /// A graph-level tag was requested before any commit exists.
    #[error("Cannot tag '{tag}': graph has no commits")]
    EmptyGraph {
        /// The tag that could not be placed.
        tag: String,
    },
}

/// Errors raised by message and tag providers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The message provider could not produce a commit message.
    #[error("Message provider failed: {message}")]
    Message {
        /// Description of the failure.
        message: String,
    },

    /// The tag provider could not produce a tag.
    #[error("Tag provider failed: {message}")]
    Tag {
        /// Description of the failure.
        message: String,
    },
}

/// Errors raised by [`crate::flow::BranchFlow`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// An operation was invoked after `finish`.
    #[error("Branch flow '{branch}' is already finished")]
    AlreadyFinished {
        /// Name of the finished flow.
        branch: String,
    },

    /// A provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The graph rejected an operation.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file at {path}: {message}")]
    FileReadError {
        /// Path to the config file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config file at {path}: {message}")]
    ParseError {
        /// Path to the config file.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// An invalid value was provided for a configuration field.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Name of the field with invalid value.
        field: String,
        /// Description of why the value is invalid.
        message: String,
    },

    /// The home directory could not be determined.
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    /// Failed to create config directory.
    #[error("Failed to create config directory at {path}: {message}")]
    DirectoryCreationError {
        /// Path where directory creation failed.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

/// Type alias for Results using GitflowError.
///
/// Note: This is not re-exported from the crate root to avoid shadowing `anyhow::Result`.
pub type GitflowResult<T> = std::result::Result<T, GitflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// # Graph Error Display
    ///
    /// Tests that graph errors display correctly formatted messages.
    ///
    /// ## Test Scenario
    /// - Creates various GraphError variants
    /// - Tests their Display implementation
    ///
    /// ## Expected Outcome
    /// - Each error variant names the offending branch or tag
    #[test]
    fn test_graph_error_display() {
        let unknown = GraphError::UnknownBranch {
            branch: "feature/x".to_string(),
        };
        assert_eq!(unknown.to_string(), "Unknown branch 'feature/x'");

        let invalid = GraphError::InvalidBranchName {
            name: "bad name".to_string(),
            reason: "contains whitespace".to_string(),
        };
        assert!(invalid.to_string().contains("bad name"));
        assert!(invalid.to_string().contains("whitespace"));

        let exists = GraphError::TagExists {
            tag: "v1.0".to_string(),
        };
        assert!(exists.to_string().contains("v1.0"));

        let self_merge = GraphError::SelfMerge {
            branch: "develop".to_string(),
        };
        assert!(self_merge.to_string().contains("into itself"));
    }

    /// # Flow Error Transparency
    ///
    /// Tests that wrapped graph and provider errors keep their own message.
    ///
    /// ## Test Scenario
    /// - Wraps a GraphError and a ProviderError in FlowError
    ///
    /// ## Expected Outcome
    /// - Display output equals the inner error's Display output
    #[test]
    fn test_flow_error_transparent() {
        let inner = GraphError::EmptyBranch {
            branch: "develop".to_string(),
        };
        let flow: FlowError = inner.clone().into();
        assert_eq!(flow.to_string(), inner.to_string());

        let provider = ProviderError::Tag {
            message: "no version".to_string(),
        };
        let flow: FlowError = provider.clone().into();
        assert_eq!(flow.to_string(), provider.to_string());

        let finished = FlowError::AlreadyFinished {
            branch: "feature/x".to_string(),
        };
        assert!(finished.to_string().contains("already finished"));
    }

    /// # Error Conversion
    ///
    /// Tests that errors convert correctly through the From trait.
    ///
    /// ## Test Scenario
    /// - Creates specific error types
    /// - Converts them to GitflowError
    ///
    /// ## Expected Outcome
    /// - All error types convert seamlessly to GitflowError
    #[test]
    fn test_error_conversion() {
        let graph_error = GraphError::UnknownBranch {
            branch: "x".to_string(),
        };
        let err: GitflowError = graph_error.into();
        assert!(matches!(err, GitflowError::Graph(_)));

        let flow_error = FlowError::AlreadyFinished {
            branch: "x".to_string(),
        };
        let err: GitflowError = flow_error.into();
        assert!(matches!(err, GitflowError::Flow(_)));

        let config_error = ConfigError::InvalidValue {
            field: "max_words".to_string(),
            message: "must be positive".to_string(),
        };
        let err: GitflowError = config_error.into();
        assert!(matches!(err, GitflowError::Config(_)));
    }
}
