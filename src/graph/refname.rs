use crate::error::GraphError;
use regex::Regex;
use std::sync::OnceLock;

// Characters git refuses anywhere in a ref name
static FORBIDDEN_CHARS_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_forbidden_chars_regex() -> &'static Regex {
    FORBIDDEN_CHARS_REGEX.get_or_init(|| {
        Regex::new(r"[\s~^:?*\[\\\x00-\x1f\x7f]")
            .expect("Failed to compile forbidden characters regex")
    })
}

/// Check a branch name against git's ref naming rules.
pub fn validate_branch_name(name: &str) -> Result<(), GraphError> {
    let reject = |reason: &str| {
        Err(GraphError::InvalidBranchName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return reject("name is empty");
    }
    if get_forbidden_chars_regex().is_match(name) {
        return reject("contains whitespace, control or special characters");
    }
    if name.contains("..") {
        return reject("contains '..'");
    }
    if name.contains("@{") {
        return reject("contains '@{'");
    }
    if name.starts_with('-') {
        return reject("starts with '-'");
    }
    if name.starts_with('/') || name.ends_with('/') || name.contains("//") {
        return reject("has an empty path component");
    }
    if name.ends_with('.') || name.ends_with(".lock") {
        return reject("ends with '.' or '.lock'");
    }
    if name.split('/').any(|component| component.starts_with('.')) {
        return reject("a path component starts with '.'");
    }

    Ok(())
}
