//! Branch flows: one development branch and its integration cascade.
//!
//! A [`BranchFlow`] wraps a branch in a shared [`Graph`]. Commits, tags and
//! merges from other branches are appended while the flow is open. Calling
//! [`BranchFlow::finish`] merges the branch into each of its merge targets in
//! order, tags the first target when the tag provider yields a tag, and closes
//! the flow.
//!
//! ## Example
//!
//! ```rust
//! use gitflow_graph::flow::BranchFlow;
//! use gitflow_graph::graph::{self, CommitGraph, Graph};
//! use gitflow_graph::message::{ConventionalMessages, fixed_tag};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = graph::shared(CommitGraph::new());
//! let master = graph.borrow_mut().branch("master".into())?;
//! graph.borrow_mut().commit(&master, "chore: initial commit")?;
//!
//! let mut release = BranchFlow::new(
//!     graph.clone(),
//!     "release/1.0",
//!     vec!["master".to_string(), "develop".to_string()],
//!     Box::new(ConventionalMessages::with_seed(7)),
//!     Some(fixed_tag("v1.0")),
//! )?;
//! release.commit(Some("bump version"))?.commit(None)?;
//! let last = release.finish()?;
//!
//! assert_eq!(last.name(), "develop");
//! assert_eq!(graph.borrow().find_tag("v1.0").unwrap().branch, "master");
//! # Ok(())
//! # }
//! ```

use crate::error::FlowError;
use crate::graph::{BranchHandle, BranchOptions, Graph, SharedGraph};
use crate::message::{MessageProvider, TagProvider};
use std::fmt;
use tracing::{debug, info};

/// Lifecycle of a [`BranchFlow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Accepting commits, tags and merges.
    Created,
    /// `finish` ran; the flow rejects further operations.
    Finished,
}

/// One logical development branch and the branches it eventually merges into.
pub struct BranchFlow<G: Graph> {
    name: String,
    graph: SharedGraph<G>,
    branch: BranchHandle,
    merge_targets: Vec<String>,
    message_provider: Box<dyn MessageProvider>,
    tag_provider: Option<Box<dyn TagProvider>>,
    state: FlowState,
}

impl<G: Graph> fmt::Debug for BranchFlow<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BranchFlow")
            .field("name", &self.name)
            .field("merge_targets", &self.merge_targets)
            .field("has_tag_provider", &self.tag_provider.is_some())
            .field("state", &self.state)
            .finish()
    }
}

impl<G: Graph> BranchFlow<G> {
    /// Create or look up the branch in `graph` and open a flow on it.
    ///
    /// `merge_targets` is the ordered list of branches this branch is merged
    /// into by [`finish`](Self::finish). It may be empty.
    pub fn new(
        graph: SharedGraph<G>,
        options: impl Into<BranchOptions>,
        merge_targets: Vec<String>,
        message_provider: Box<dyn MessageProvider>,
        tag_provider: Option<Box<dyn TagProvider>>,
    ) -> Result<Self, FlowError> {
        let options = options.into();
        let name = options.name.clone();
        let branch = graph.borrow_mut().branch(options)?;
        debug!(branch = %name, targets = ?merge_targets, "Opened branch flow");

        Ok(Self {
            name,
            graph,
            branch,
            merge_targets,
            message_provider,
            tag_provider,
            state: FlowState::Created,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn branch(&self) -> &BranchHandle {
        &self.branch
    }

    pub fn merge_targets(&self) -> &[String] {
        &self.merge_targets
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == FlowState::Finished
    }

    fn ensure_open(&self) -> Result<(), FlowError> {
        match self.state {
            FlowState::Created => Ok(()),
            FlowState::Finished => Err(FlowError::AlreadyFinished {
                branch: self.name.clone(),
            }),
        }
    }

    /// Tag the current tip of this branch.
    pub fn tag(&mut self, tag_name: &str) -> Result<&mut Self, FlowError> {
        self.ensure_open()?;
        self.graph.borrow_mut().tag_branch(&self.branch, tag_name)?;
        Ok(self)
    }

    /// Append a commit whose message comes from the message provider.
    pub fn commit(&mut self, subject: Option<&str>) -> Result<&mut Self, FlowError> {
        self.ensure_open()?;
        let message = self.message_provider.message(subject)?;
        self.graph.borrow_mut().commit(&self.branch, &message)?;
        Ok(self)
    }

    /// Merge `branch_name` into this branch.
    pub fn merge(
        &mut self,
        branch_name: &str,
        subject: Option<&str>,
    ) -> Result<&mut Self, FlowError> {
        self.ensure_open()?;
        self.graph
            .borrow_mut()
            .merge(&self.branch, branch_name, subject)?;
        Ok(self)
    }

    /// Merge this branch into each merge target in order and close the flow.
    ///
    /// The tag provider runs once, before the first merge. Its tag, if any, is
    /// applied at graph level right after the merge into the first target.
    /// Returns the last branch merged into, or this branch when there are no
    /// targets.
    pub fn finish(&mut self) -> Result<BranchHandle, FlowError> {
        self.ensure_open()?;
        self.state = FlowState::Finished;

        let tag = match self.tag_provider.as_mut() {
            Some(provider) => provider.tag()?,
            None => None,
        };

        let mut current = self.branch.clone();
        for (i, target_name) in self.merge_targets.iter().enumerate() {
            let mut graph = self.graph.borrow_mut();
            let target = graph.branch(BranchOptions::new(target_name.as_str()))?;
            graph.merge(&target, current.name(), None)?;
            current = target;

            if let (0, Some(tag)) = (i, &tag) {
                graph.tag(tag.clone())?;
            }
        }

        info!(
            branch = %self.name,
            merges = self.merge_targets.len(),
            tag = tag.as_ref().map(|t| t.name()),
            last = %current,
            "Finished branch flow"
        );
        Ok(current)
    }
}
