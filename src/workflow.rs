//! Gitflow presets and synthetic history generation.
//!
//! [`Gitflow`] keeps the two long-lived branches (`master` and `develop` by
//! default) and opens feature, release and hotfix flows with the merge targets
//! and tags the gitflow convention prescribes. [`generate_history`] drives it
//! with a seeded random number generator to produce a complete, reproducible
//! history.

use crate::error::{ConfigError, FlowError, GitflowResult, ProviderError};
use crate::flow::BranchFlow;
use crate::graph::{self, BranchHandle, BranchOptions, CommitGraph, Graph, SharedGraph, TagOptions};
use crate::message::{ConventionalMessages, LoremIpsum, MessageProvider, fixed_tag};
use crate::message::{DEFAULT_COMPONENTS, DEFAULT_TYPES};
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Words used to name generated feature branches.
const FEATURE_TOPICS: &[&str] = &[
    "login", "search", "checkout", "profile", "billing", "export", "import", "dashboard",
    "settings", "cache", "audit", "upload", "sharing", "reports", "alerts",
];

/// 2024-01-01T00:00:00Z, the first commit time of generated histories.
const DEFAULT_EPOCH_SECS: i64 = 1_704_067_200;

/// Plain, validated settings for [`generate_history`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSettings {
    pub develop_branch: String,
    pub master_branch: String,
    pub commit_types: Vec<String>,
    pub commit_components: Vec<String>,
    pub min_words: usize,
    pub max_words: usize,
    /// Seed for reproducible output; `None` draws from the OS.
    pub seed: Option<u64>,
    pub releases: u32,
    pub features_per_release: u32,
    /// Upper bound of commits per feature branch (at least one is written).
    pub max_commits: u32,
    /// Chance of a hotfix following each release, in `0.0..=1.0`.
    pub hotfix_probability: f64,
    pub epoch: DateTime<Utc>,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            develop_branch: "develop".to_string(),
            master_branch: "master".to_string(),
            commit_types: DEFAULT_TYPES.iter().map(|s| s.to_string()).collect(),
            commit_components: DEFAULT_COMPONENTS.iter().map(|s| s.to_string()).collect(),
            min_words: 3,
            max_words: 6,
            seed: None,
            releases: 2,
            features_per_release: 3,
            max_commits: 3,
            hotfix_probability: 0.25,
            epoch: DateTime::from_timestamp(DEFAULT_EPOCH_SECS, 0).unwrap_or_default(),
        }
    }
}

impl GenerateSettings {
    /// Check the numeric ranges and branch names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, message: String| ConfigError::InvalidValue {
            field: field.to_string(),
            message,
        };

        if self.commit_types.is_empty() {
            return Err(invalid(
                "commit_types",
                "at least one commit type is required".to_string(),
            ));
        }
        if self.min_words == 0 || self.min_words > self.max_words {
            return Err(invalid(
                "min_words",
                format!(
                    "must be between 1 and max_words ({}), got {}",
                    self.max_words, self.min_words
                ),
            ));
        }
        if self.max_commits == 0 {
            return Err(invalid("max_commits", "must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.hotfix_probability) {
            return Err(invalid(
                "hotfix_probability",
                format!("must be within 0.0..=1.0, got {}", self.hotfix_probability),
            ));
        }
        if self.develop_branch == self.master_branch {
            return Err(invalid(
                "develop_branch",
                format!("must differ from master_branch '{}'", self.master_branch),
            ));
        }
        for (field, name) in [
            ("develop_branch", &self.develop_branch),
            ("master_branch", &self.master_branch),
        ] {
            graph::validate_branch_name(name).map_err(|e| invalid(field, e.to_string()))?;
        }
        Ok(())
    }

    /// Conventional message generator for these settings, seeded with `seed`.
    pub fn message_provider(&self, seed: u64) -> Result<ConventionalMessages, ProviderError> {
        let lorem = LoremIpsum::new(self.min_words, self.max_words)?;
        ConventionalMessages::new(
            self.commit_types.clone(),
            self.commit_components.clone(),
            lorem,
            StdRng::seed_from_u64(seed),
        )
    }
}

/// The two long-lived gitflow branches plus a factory for short-lived flows.
pub struct Gitflow<G: Graph> {
    graph: SharedGraph<G>,
    develop: BranchHandle,
    master: BranchHandle,
    messages: Rc<RefCell<dyn MessageProvider>>,
    active: Option<String>,
}

impl<G: Graph> Gitflow<G> {
    /// Create `master` with an initial commit and fork `develop` from it.
    ///
    /// Both branches are looked up rather than recreated when they already
    /// exist. The initial commit is written only while master points at no
    /// commit, so initializing an existing history adds nothing.
    pub fn init(
        graph: SharedGraph<G>,
        develop: &str,
        master: &str,
        messages: impl MessageProvider + 'static,
    ) -> Result<Self, FlowError> {
        let messages: Rc<RefCell<dyn MessageProvider>> = Rc::new(RefCell::new(messages));
        let (develop, master) = {
            let mut g = graph.borrow_mut();
            let master = g.branch(BranchOptions::new(master))?;
            if g.tip(&master)?.is_none() {
                g.commit(&master, "Initial commit")?;
            }
            let develop = g.branch(BranchOptions::new(develop).from_branch(master.name()))?;
            (develop, master)
        };
        info!(develop = %develop, master = %master, "Initialized gitflow");

        Ok(Self {
            graph,
            develop,
            master,
            messages,
            active: None,
        })
    }

    pub fn graph(&self) -> &SharedGraph<G> {
        &self.graph
    }

    pub fn develop(&self) -> &BranchHandle {
        &self.develop
    }

    pub fn master(&self) -> &BranchHandle {
        &self.master
    }

    /// Name of the flow opened last and not yet finished through [`Gitflow::finish`].
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Open a flow on a long-lived branch itself, with no merge targets.
    pub fn long_lived(&self, branch: &BranchHandle) -> Result<BranchFlow<G>, FlowError> {
        BranchFlow::new(
            self.graph.clone(),
            branch.name(),
            Vec::new(),
            self.message_provider(),
            None,
        )
    }

    /// `feature/<name>` forked from develop, merged back into develop.
    pub fn feature(&mut self, name: &str) -> Result<BranchFlow<G>, FlowError> {
        self.open(
            BranchOptions::new(format!("feature/{name}")).from_branch(self.develop.name()),
            vec![self.develop.name().to_string()],
            None,
        )
    }

    /// `release/<version>` forked from develop, merged into master (tagged
    /// `v<version>`) and then back into develop.
    pub fn release(&mut self, version: &str) -> Result<BranchFlow<G>, FlowError> {
        let tag = TagOptions::new(format!("v{version}")).with_message(format!("Release {version}"));
        self.open(
            BranchOptions::new(format!("release/{version}")).from_branch(self.develop.name()),
            vec![
                self.master.name().to_string(),
                self.develop.name().to_string(),
            ],
            Some(tag),
        )
    }

    /// `hotfix/<version>` forked from master, merged into master (tagged
    /// `v<version>`) and then into develop.
    pub fn hotfix(&mut self, version: &str) -> Result<BranchFlow<G>, FlowError> {
        let tag = TagOptions::new(format!("v{version}")).with_message(format!("Hotfix {version}"));
        self.open(
            BranchOptions::new(format!("hotfix/{version}")).from_branch(self.master.name()),
            vec![
                self.master.name().to_string(),
                self.develop.name().to_string(),
            ],
            Some(tag),
        )
    }

    /// Finish `flow` and clear it as the active flow.
    pub fn finish(&mut self, flow: &mut BranchFlow<G>) -> Result<BranchHandle, FlowError> {
        let result = flow.finish();
        if self.active.as_deref() == Some(flow.name()) {
            self.active = None;
        }
        result
    }

    fn open(
        &mut self,
        options: BranchOptions,
        merge_targets: Vec<String>,
        tag: Option<TagOptions>,
    ) -> Result<BranchFlow<G>, FlowError> {
        let flow = BranchFlow::new(
            self.graph.clone(),
            options,
            merge_targets,
            self.message_provider(),
            tag.map(fixed_tag),
        )?;
        self.active = Some(flow.name().to_string());
        Ok(flow)
    }

    fn message_provider(&self) -> Box<dyn MessageProvider> {
        let messages = Rc::clone(&self.messages);
        Box::new(move |subject: Option<&str>| -> Result<String, ProviderError> {
            messages.borrow_mut().message(subject)
        })
    }
}

/// Build a complete synthetic gitflow history.
///
/// Each release round opens `features_per_release` feature branches with
/// 1..=`max_commits` commits each, then a release branch with a version bump.
/// A hotfix follows a release with probability `hotfix_probability`.
pub fn generate_history(settings: &GenerateSettings) -> GitflowResult<CommitGraph> {
    settings.validate()?;

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let messages = settings
        .message_provider(rng.r#gen())
        .map_err(FlowError::from)?;

    let shared = graph::shared(CommitGraph::with_epoch(settings.epoch));
    let mut gitflow = Gitflow::init(
        shared.clone(),
        &settings.develop_branch,
        &settings.master_branch,
        messages,
    )?;

    let mut feature_count = 0u32;
    for round in 0..settings.releases {
        for _ in 0..settings.features_per_release {
            feature_count += 1;
            let topic = FEATURE_TOPICS.choose(&mut rng).copied().unwrap_or("work");
            let mut flow = gitflow.feature(&format!("{topic}-{feature_count}"))?;
            for _ in 0..rng.gen_range(1..=settings.max_commits) {
                flow.commit(None)?;
            }
            gitflow.finish(&mut flow)?;
        }

        let version = format!("1.{round}.0");
        let mut release = gitflow.release(&version)?;
        release.commit(Some(&format!("bump version to {version}")))?;
        gitflow.finish(&mut release)?;

        if rng.gen_bool(settings.hotfix_probability) {
            let version = format!("1.{round}.1");
            let mut hotfix = gitflow.hotfix(&version)?;
            hotfix.commit(None)?;
            hotfix.commit(Some(&format!("bump version to {version}")))?;
            gitflow.finish(&mut hotfix)?;
        }
        debug!(round, features = feature_count, "Generated release round");
    }
    drop(gitflow);

    let graph = Rc::try_unwrap(shared)
        .map(RefCell::into_inner)
        .map_err(|_| anyhow::anyhow!("commit graph is still shared after generation"))?;
    info!(
        commits = graph.commits().len(),
        branches = graph.branches().len(),
        "Generated history"
    );
    Ok(graph)
}
