//! Commit graph abstraction.
//!
//! [`Graph`] is the seam between branch flows and whatever stores the commits.
//! [`CommitGraph`] is the in-memory implementation used by the generator and
//! the CLI; tests substitute recording implementations.

mod memory;
mod refname;

pub use memory::{BranchState, Commit, CommitGraph, Tag};
pub use refname::validate_branch_name;

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A graph shared between several branch flows on one thread.
pub type SharedGraph<G> = Rc<RefCell<G>>;

/// Wrap a graph so it can be handed to several flows.
pub fn shared<G: Graph>(graph: G) -> SharedGraph<G> {
    Rc::new(RefCell::new(graph))
}

/// Lightweight reference to a branch living in a graph.
///
/// Handles compare by branch name, so two lookups of the same branch are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchHandle {
    name: String,
}

impl BranchHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for BranchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Options used when creating or looking up a branch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchOptions {
    /// Branch name.
    pub name: String,
    /// Branch to fork from. When absent the branch forks from HEAD.
    pub from: Option<String>,
}

impl BranchOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: None,
        }
    }

    /// Fork the new branch from `parent` instead of HEAD.
    #[must_use]
    pub fn from_branch(mut self, parent: impl Into<String>) -> Self {
        self.from = Some(parent.into());
        self
    }
}

impl From<&str> for BranchOptions {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for BranchOptions {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Structured tag description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOptions {
    /// Tag name.
    pub name: String,
    /// Annotation message for annotated tags.
    pub message: Option<String>,
}

impl TagOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A tag as handed to the graph-level tag operation: a bare label or full options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSpec {
    Label(String),
    Options(TagOptions),
}

impl TagSpec {
    pub fn name(&self) -> &str {
        match self {
            TagSpec::Label(name) => name,
            TagSpec::Options(options) => &options.name,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            TagSpec::Label(_) => None,
            TagSpec::Options(options) => options.message.as_deref(),
        }
    }
}

impl From<&str> for TagSpec {
    fn from(label: &str) -> Self {
        TagSpec::Label(label.to_string())
    }
}

impl From<String> for TagSpec {
    fn from(label: String) -> Self {
        TagSpec::Label(label)
    }
}

impl From<TagOptions> for TagSpec {
    fn from(options: TagOptions) -> Self {
        TagSpec::Options(options)
    }
}

/// Operations a commit graph must support for branch flows to drive it.
///
/// Commit-producing operations return the hash of the new commit.
pub trait Graph {
    /// Create the branch, or return the existing branch with that name.
    fn branch(&mut self, options: BranchOptions) -> Result<BranchHandle, GraphError>;

    /// Append a commit to `branch`.
    fn commit(&mut self, branch: &BranchHandle, message: &str) -> Result<String, GraphError>;

    /// Merge the branch named `from` into `into`.
    fn merge(
        &mut self,
        into: &BranchHandle,
        from: &str,
        subject: Option<&str>,
    ) -> Result<String, GraphError>;

    /// Tag the tip of `branch`.
    fn tag_branch(&mut self, branch: &BranchHandle, label: &str) -> Result<(), GraphError>;

    /// Tag the HEAD commit of the graph.
    fn tag(&mut self, tag: TagSpec) -> Result<(), GraphError>;

    /// Hash of the commit `branch` points at, `None` while it has none.
    fn tip(&self, branch: &BranchHandle) -> Result<Option<String>, GraphError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_options_from_str() {
        let options: BranchOptions = "feature/x".into();
        assert_eq!(options.name, "feature/x");
        assert_eq!(options.from, None);

        let options = BranchOptions::new("hotfix/1.0.1").from_branch("master");
        assert_eq!(options.from.as_deref(), Some("master"));
    }

    #[test]
    fn test_tag_spec_accessors() {
        let label = TagSpec::from("v1.0");
        assert_eq!(label.name(), "v1.0");
        assert_eq!(label.message(), None);

        let options = TagSpec::from(TagOptions::new("v2.0").with_message("Release 2.0"));
        assert_eq!(options.name(), "v2.0");
        assert_eq!(options.message(), Some("Release 2.0"));
    }

    #[test]
    fn test_branch_handle_equality_by_name() {
        assert_eq!(BranchHandle::new("develop"), BranchHandle::new("develop"));
        assert_ne!(BranchHandle::new("develop"), BranchHandle::new("master"));
        assert_eq!(BranchHandle::new("master").to_string(), "master");
    }
}
