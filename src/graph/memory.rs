use super::{BranchHandle, BranchOptions, Graph, TagSpec, validate_branch_name};
use crate::error::GraphError;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Length of abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 7;

/// A tag attached to a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A single commit in a [`CommitGraph`].
#[derive(Debug, Clone, Serialize)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    /// Branch the commit was written on.
    pub branch: String,
    /// Parent hashes; the first parent is the previous tip of `branch`.
    pub parents: Vec<String>,
    /// Position in write order, starting at zero.
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl Commit {
    pub fn short_hash(&self) -> &str {
        &self.hash[..SHORT_HASH_LEN.min(self.hash.len())]
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Branch bookkeeping: where it forked and its latest own commit.
#[derive(Debug, Clone, Serialize)]
pub struct BranchState {
    pub name: String,
    /// Commit the branch was forked from, if any.
    pub start: Option<String>,
    /// Latest commit written on this branch.
    pub tip: Option<String>,
}

impl BranchState {
    /// The commit the branch currently points at.
    pub fn effective_tip(&self) -> Option<&str> {
        self.tip.as_deref().or(self.start.as_deref())
    }
}

/// In-memory, append-only commit graph.
///
/// Branches fork from HEAD (the last commit written anywhere) unless told
/// otherwise, and merges always produce a merge commit.
#[derive(Debug, Clone)]
pub struct CommitGraph {
    commits: Vec<Commit>,
    by_hash: HashMap<String, usize>,
    branches: Vec<BranchState>,
    by_name: HashMap<String, usize>,
    tag_names: HashSet<String>,
    head: Option<usize>,
    epoch: DateTime<Utc>,
}

impl Default for CommitGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitGraph {
    /// Create an empty graph whose commit timestamps start at the Unix epoch.
    pub fn new() -> Self {
        Self::with_epoch(DateTime::<Utc>::default())
    }

    /// Create an empty graph whose first commit is stamped `epoch`.
    ///
    /// Every later commit is stamped one minute after the previous one, which
    /// keeps generated histories reproducible.
    pub fn with_epoch(epoch: DateTime<Utc>) -> Self {
        Self {
            commits: Vec::new(),
            by_hash: HashMap::new(),
            branches: Vec::new(),
            by_name: HashMap::new(),
            tag_names: HashSet::new(),
            head: None,
            epoch,
        }
    }

    /// All commits in write order.
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// All branches in creation order.
    pub fn branches(&self) -> &[BranchState] {
        &self.branches
    }

    pub fn find_commit(&self, hash: &str) -> Option<&Commit> {
        self.by_hash.get(hash).map(|&idx| &self.commits[idx])
    }

    pub fn find_branch(&self, name: &str) -> Option<&BranchState> {
        self.by_name.get(name).map(|&idx| &self.branches[idx])
    }

    /// The last commit written anywhere in the graph.
    pub fn head(&self) -> Option<&Commit> {
        self.head.map(|idx| &self.commits[idx])
    }

    /// The commit a branch currently points at.
    pub fn branch_tip(&self, name: &str) -> Option<&Commit> {
        self.find_branch(name)
            .and_then(BranchState::effective_tip)
            .and_then(|hash| self.find_commit(hash))
    }

    /// Find the commit carrying a tag.
    pub fn find_tag(&self, tag: &str) -> Option<&Commit> {
        self.commits
            .iter()
            .find(|commit| commit.tags.iter().any(|t| t.name == tag))
    }

    /// First-parent history of a branch, newest first.
    pub fn first_parent_log(&self, name: &str) -> Vec<&Commit> {
        let mut log = Vec::new();
        let mut cursor = self.branch_tip(name);
        while let Some(commit) = cursor {
            log.push(commit);
            cursor = commit
                .parents
                .first()
                .and_then(|parent| self.find_commit(parent));
        }
        log
    }

    /// Whether `ancestor` is reachable from `descendant` through any parent.
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        let mut stack = vec![descendant];
        let mut seen = HashSet::new();
        while let Some(hash) = stack.pop() {
            if hash == ancestor {
                return true;
            }
            if !seen.insert(hash) {
                continue;
            }
            if let Some(commit) = self.find_commit(hash) {
                stack.extend(commit.parents.iter().map(String::as_str));
            }
        }
        false
    }

    fn branch_index(&self, name: &str) -> Result<usize, GraphError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownBranch {
                branch: name.to_string(),
            })
    }

    fn write_commit(&mut self, branch_idx: usize, message: &str, parents: Vec<String>) -> String {
        let sequence = self.commits.len() as u64;
        let branch = self.branches[branch_idx].name.clone();

        let mut hasher = Sha256::new();
        hasher.update(branch.as_bytes());
        hasher.update([0u8]);
        hasher.update(message.as_bytes());
        for parent in &parents {
            hasher.update([0u8]);
            hasher.update(parent.as_bytes());
        }
        hasher.update(sequence.to_be_bytes());
        let hash = format!("{:x}", hasher.finalize());

        let timestamp = self.epoch + Duration::minutes(sequence as i64);
        self.commits.push(Commit {
            hash: hash.clone(),
            message: message.to_string(),
            branch,
            parents,
            sequence,
            timestamp,
            tags: Vec::new(),
        });
        let idx = self.commits.len() - 1;
        self.by_hash.insert(hash.clone(), idx);
        self.branches[branch_idx].tip = Some(hash.clone());
        self.head = Some(idx);
        hash
    }

    fn attach_tag(
        &mut self,
        hash: &str,
        name: &str,
        message: Option<&str>,
    ) -> Result<(), GraphError> {
        if self.tag_names.contains(name) {
            return Err(GraphError::TagExists {
                tag: name.to_string(),
            });
        }
        let Some(&idx) = self.by_hash.get(hash) else {
            return Err(GraphError::EmptyGraph {
                tag: name.to_string(),
            });
        };
        self.tag_names.insert(name.to_string());
        self.commits[idx].tags.push(Tag {
            name: name.to_string(),
            message: message.map(str::to_string),
        });
        Ok(())
    }
}

impl Graph for CommitGraph {
    fn branch(&mut self, options: BranchOptions) -> Result<BranchHandle, GraphError> {
        if self.by_name.contains_key(&options.name) {
            return Ok(BranchHandle::new(options.name));
        }
        validate_branch_name(&options.name)?;

        let start = match &options.from {
            Some(parent) => {
                let idx = self.branch_index(parent)?;
                self.branches[idx].effective_tip().map(str::to_string)
            }
            None => self.head().map(|commit| commit.hash.clone()),
        };

        debug!(branch = %options.name, from = ?options.from, start = ?start, "Created branch");
        self.by_name.insert(options.name.clone(), self.branches.len());
        self.branches.push(BranchState {
            name: options.name.clone(),
            start,
            tip: None,
        });
        Ok(BranchHandle::new(options.name))
    }

    fn commit(&mut self, branch: &BranchHandle, message: &str) -> Result<String, GraphError> {
        let idx = self.branch_index(branch.name())?;
        let parents = self.branches[idx]
            .effective_tip()
            .map(str::to_string)
            .into_iter()
            .collect();
        let hash = self.write_commit(idx, message, parents);
        debug!(branch = %branch, hash = %&hash[..SHORT_HASH_LEN], message, "Committed");
        Ok(hash)
    }

    fn merge(
        &mut self,
        into: &BranchHandle,
        from: &str,
        subject: Option<&str>,
    ) -> Result<String, GraphError> {
        if into.name() == from {
            return Err(GraphError::SelfMerge {
                branch: from.to_string(),
            });
        }
        let into_idx = self.branch_index(into.name())?;
        let from_idx = self.branch_index(from)?;
        let from_tip = self.branches[from_idx]
            .effective_tip()
            .map(str::to_string)
            .ok_or_else(|| GraphError::EmptyBranch {
                branch: from.to_string(),
            })?;

        let mut parents: Vec<String> = self.branches[into_idx]
            .effective_tip()
            .map(str::to_string)
            .into_iter()
            .collect();
        if parents.first() != Some(&from_tip) {
            parents.push(from_tip);
        }

        let message = match subject {
            Some(subject) => subject.to_string(),
            None => format!("Merge branch '{}' into {}", from, into.name()),
        };
        let hash = self.write_commit(into_idx, &message, parents);
        debug!(into = %into, from, hash = %&hash[..SHORT_HASH_LEN], "Merged");
        Ok(hash)
    }

    fn tag_branch(&mut self, branch: &BranchHandle, label: &str) -> Result<(), GraphError> {
        let idx = self.branch_index(branch.name())?;
        let tip = self.branches[idx]
            .effective_tip()
            .map(str::to_string)
            .ok_or_else(|| GraphError::EmptyBranch {
                branch: branch.name().to_string(),
            })?;
        self.attach_tag(&tip, label, None)?;
        debug!(branch = %branch, tag = label, "Tagged branch tip");
        Ok(())
    }

    fn tag(&mut self, tag: TagSpec) -> Result<(), GraphError> {
        let head = self
            .head()
            .map(|commit| commit.hash.clone())
            .ok_or_else(|| GraphError::EmptyGraph {
                tag: tag.name().to_string(),
            })?;
        self.attach_tag(&head, tag.name(), tag.message())?;
        debug!(tag = tag.name(), "Tagged HEAD");
        Ok(())
    }

    fn tip(&self, branch: &BranchHandle) -> Result<Option<String>, GraphError> {
        let idx = self.branch_index(branch.name())?;
        Ok(self.branches[idx].effective_tip().map(str::to_string))
    }
}
