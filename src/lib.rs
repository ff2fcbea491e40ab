//! # gitflow-graph
//!
//! Builds synthetic gitflow commit histories in memory.
//!
//! - [`graph`]: the [`Graph`] seam and the in-memory [`CommitGraph`]
//! - [`flow`]: [`BranchFlow`], a short-lived branch with its merge cascade
//! - [`message`]: commit message and tag providers
//! - [`workflow`]: feature/release/hotfix presets and [`generate_history`]
//! - [`export`]: text log and JSON dumps
//! - [`config`], [`logging`], [`models`]: the command line application
//!
//! ## Quick Start
//!
//! ```rust
//! use gitflow_graph::{BranchFlow, CommitGraph, TagOptions, graph, message};
//!
//! let shared = graph::shared(CommitGraph::new());
//! let mut develop = BranchFlow::new(
//!     shared.clone(),
//!     "develop",
//!     Vec::new(),
//!     Box::new(message::ConventionalMessages::with_seed(1)),
//!     None,
//! )?;
//! develop.commit(Some("initial layout"))?;
//!
//! let mut release = BranchFlow::new(
//!     shared.clone(),
//!     "release/1.0",
//!     vec!["master".to_string(), "develop".to_string()],
//!     Box::new(message::ConventionalMessages::with_seed(2)),
//!     Some(message::fixed_tag(TagOptions::new("v1.0"))),
//! )?;
//! release.commit(Some("bump version"))?;
//! let last = release.finish()?;
//!
//! assert_eq!(last.name(), "develop");
//! assert_eq!(shared.borrow().find_tag("v1.0").unwrap().branch, "master");
//! # Ok::<(), gitflow_graph::error::FlowError>(())
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod flow;
pub mod graph;
pub mod logging;
pub mod message;
pub mod models;
pub mod parsed_property;
pub mod workflow;

pub use config::Config;
pub use error::{GitflowError, GitflowResult};
pub use flow::{BranchFlow, FlowState};
pub use graph::{BranchHandle, BranchOptions, CommitGraph, Graph, SharedGraph, TagOptions, TagSpec};
pub use models::Args;
pub use workflow::{GenerateSettings, Gitflow, generate_history};

/// Core result type used at the application boundary
pub type Result<T> = anyhow::Result<T>;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
