//! Commit message and tag providers.
//!
//! Branch flows never build commit messages themselves. They ask a
//! [`MessageProvider`] for one, optionally passing a subject, and ask a
//! [`TagProvider`] for the release tag when they finish. Closures of the right
//! shape implement both traits, so ad-hoc providers need no boilerplate:
//!
//! ```rust
//! use gitflow_graph::error::ProviderError;
//! use gitflow_graph::message::MessageProvider;
//!
//! let mut provider = |subject: Option<&str>| -> Result<String, ProviderError> {
//!     Ok(format!("docs: {}", subject.unwrap_or("update readme")))
//! };
//! assert_eq!(provider.message(None).unwrap(), "docs: update readme");
//! ```

pub mod lorem;

pub use lorem::LoremIpsum;

use crate::error::ProviderError;
use crate::graph::TagSpec;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Conventional commit types used when none are configured.
pub const DEFAULT_TYPES: &[&str] = &[
    "build", "ci", "chore", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

/// Conventional commit scopes used when none are configured.
pub const DEFAULT_COMPONENTS: &[&str] = &["ui", "service", "data", "model", "controller"];

/// Produces the final commit message for an optional subject.
pub trait MessageProvider {
    fn message(&mut self, subject: Option<&str>) -> Result<String, ProviderError>;
}

impl<F> MessageProvider for F
where
    F: FnMut(Option<&str>) -> Result<String, ProviderError>,
{
    fn message(&mut self, subject: Option<&str>) -> Result<String, ProviderError> {
        self(subject)
    }
}

/// Produces zero or one tag when a branch flow finishes.
pub trait TagProvider {
    fn tag(&mut self) -> Result<Option<TagSpec>, ProviderError>;
}

impl<F> TagProvider for F
where
    F: FnMut() -> Result<Option<TagSpec>, ProviderError>,
{
    fn tag(&mut self) -> Result<Option<TagSpec>, ProviderError> {
        self()
    }
}

/// A tag provider that always yields `tag`.
pub fn fixed_tag(tag: impl Into<TagSpec>) -> Box<dyn TagProvider> {
    let tag = tag.into();
    Box::new(move || -> Result<Option<TagSpec>, ProviderError> { Ok(Some(tag.clone())) })
}

/// Conventional-commit message generator: `type(component): subject`.
///
/// Missing subjects are filled with a lorem ipsum sentence stripped of its
/// final punctuation. With an empty component list the scope is omitted and
/// messages read `type: subject`.
#[derive(Debug, Clone)]
pub struct ConventionalMessages {
    types: Vec<String>,
    components: Vec<String>,
    lorem: LoremIpsum,
    rng: StdRng,
}

impl ConventionalMessages {
    /// Build a generator from explicit lists.
    ///
    /// Fails when `types` is empty since every message needs a type.
    pub fn new(
        types: Vec<String>,
        components: Vec<String>,
        lorem: LoremIpsum,
        rng: StdRng,
    ) -> Result<Self, ProviderError> {
        if types.is_empty() {
            return Err(ProviderError::Message {
                message: "at least one commit type is required".to_string(),
            });
        }
        Ok(Self {
            types,
            components,
            lorem,
            rng,
        })
    }

    /// Default types and components with a reproducible random sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            types: DEFAULT_TYPES.iter().map(|s| s.to_string()).collect(),
            components: DEFAULT_COMPONENTS.iter().map(|s| s.to_string()).collect(),
            lorem: LoremIpsum::default(),
            rng,
        }
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// A random subject without trailing punctuation.
    pub fn generate_subject(&mut self) -> String {
        self.lorem
            .sentence(&mut self.rng)
            .trim_end_matches(['.', '!', '?'])
            .to_string()
    }
}

impl MessageProvider for ConventionalMessages {
    fn message(&mut self, subject: Option<&str>) -> Result<String, ProviderError> {
        let subject = match subject.filter(|s| !s.is_empty()) {
            Some(subject) => subject.to_string(),
            None => self.generate_subject(),
        };

        let commit_type = self
            .types
            .choose(&mut self.rng)
            .ok_or_else(|| ProviderError::Message {
                message: "no commit types configured".to_string(),
            })?;

        match self.components.choose(&mut self.rng) {
            Some(component) => Ok(format!("{commit_type}({component}): {subject}")),
            None => Ok(format!("{commit_type}: {subject}")),
        }
    }
}
