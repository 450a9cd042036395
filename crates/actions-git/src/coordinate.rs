//! Repository coordinate

use std::fmt;

use crate::{Error, Result};

/// The `{owner, repo, branch}` triple a session targets.
///
/// All three fields are non-empty; a coordinate that fails this check is
/// never constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoCoordinate {
    owner: String,
    repo: String,
    branch: String,
}

impl RepoCoordinate {
    /// Build a coordinate, rejecting empty or whitespace-only fields.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Result<Self> {
        let owner = non_empty("owner", owner.into())?;
        let repo = non_empty("repo", repo.into())?;
        let branch = non_empty("branch", branch.into())?;
        Ok(Self {
            owner,
            repo,
            branch,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }
}

impl fmt::Display for RepoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_keeps_fields() {
        let coord = RepoCoordinate::new("acme", "widgets", "main").unwrap();
        assert_eq!(coord.owner(), "acme");
        assert_eq!(coord.repo(), "widgets");
        assert_eq!(coord.branch(), "main");
        assert_eq!(coord.to_string(), "acme/widgets@main");
    }

    #[test]
    fn test_new_trims_whitespace() {
        let coord = RepoCoordinate::new(" acme ", "widgets\n", "feature/x").unwrap();
        assert_eq!(coord.owner(), "acme");
        assert_eq!(coord.repo(), "widgets");
        assert_eq!(coord.branch(), "feature/x");
    }

    #[rstest]
    #[case("", "widgets", "main", "owner")]
    #[case("acme", "  ", "main", "repo")]
    #[case("acme", "widgets", "", "branch")]
    fn test_partial_coordinate_rejected(
        #[case] owner: &str,
        #[case] repo: &str,
        #[case] branch: &str,
        #[case] expected: &str,
    ) {
        match RepoCoordinate::new(owner, repo, branch) {
            Err(Error::EmptyField { field }) => assert_eq!(field, expected),
            other => panic!("expected EmptyField({expected}), got {other:?}"),
        }
    }
}
