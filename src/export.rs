//! Text and JSON dumps of a [`CommitGraph`].
//!
//! These are data exports for feeding a renderer or eyeballing a history in a
//! terminal. No lane layout is computed.

use crate::graph::{BranchState, Commit, CommitGraph};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Output format for exported graphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable commit log, newest first.
    #[default]
    Text,
    /// Pretty-printed JSON snapshot.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Serializable view of a whole graph.
#[derive(Debug, Serialize)]
pub struct GraphSnapshot<'a> {
    /// Synthetic timestamp of the HEAD commit.
    pub head_timestamp: Option<DateTime<Utc>>,
    pub head: Option<&'a str>,
    pub branches: &'a [BranchState],
    /// Tag name to commit hash.
    pub tags: BTreeMap<&'a str, &'a str>,
    pub commits: &'a [Commit],
}

impl<'a> GraphSnapshot<'a> {
    pub fn new(graph: &'a CommitGraph) -> Self {
        let tags = graph
            .commits()
            .iter()
            .flat_map(|commit| {
                commit
                    .tags
                    .iter()
                    .map(move |tag| (tag.name.as_str(), commit.hash.as_str()))
            })
            .collect();

        Self {
            head_timestamp: graph.head().map(|commit| commit.timestamp),
            head: graph.head().map(|commit| commit.hash.as_str()),
            branches: graph.branches(),
            tags,
            commits: graph.commits(),
        }
    }
}

/// Write the graph as pretty-printed JSON.
pub fn write_json<W: Write>(graph: &CommitGraph, writer: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &GraphSnapshot::new(graph))?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)
}

/// One log line: marker, short hash, branch, message and tags.
pub fn format_commit(commit: &Commit) -> String {
    let marker = if commit.is_merge() { 'M' } else { '*' };
    let mut line = format!(
        "{} {} [{}] {}",
        marker,
        commit.short_hash(),
        commit.branch,
        commit.message
    );
    if !commit.tags.is_empty() {
        let names: Vec<&str> = commit.tags.iter().map(|t| t.name.as_str()).collect();
        line.push_str(&format!(" (tag: {})", names.join(", ")));
    }
    line
}

/// Write the commit log, newest commit first.
pub fn render_log<W: Write>(graph: &CommitGraph, writer: &mut W) -> io::Result<()> {
    for commit in graph.commits().iter().rev() {
        writeln!(writer, "{}", format_commit(commit))?;
    }
    Ok(())
}

/// Write `graph` in the requested format.
pub fn write_graph<W: Write>(
    graph: &CommitGraph,
    format: OutputFormat,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_log(graph, writer),
        OutputFormat::Json => write_json(graph, writer).map_err(io::Error::from),
    }
}
