//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing repositories, their weekly commit activity, owner profiles and
//! saved collections.
//!
//! The serialized field names follow the GitHub REST payloads so that fetched
//! data can be persisted and reloaded without any translation layer.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound on the number of repositories in the active list.
pub const MAX_REPOSITORIES: usize = 30;

/// A GitHub repository addressed by owner and name.
///
/// Two repositories are the same when their `owner/name` keys match exactly
/// (case-sensitive, as typed by the user).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repo {
    /// The user or organization owning the repository
    pub owner: String,
    /// The repository name
    #[serde(rename = "repo")]
    pub name: String,
}

impl Repo {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// The `owner/name` key used to address this repository everywhere.
    pub fn key(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One week of commit activity for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeeklyPoint {
    /// Start of the week as Unix epoch seconds
    #[serde(rename = "week")]
    pub week_start: i64,
    /// Number of commits made during the week
    #[serde(rename = "total")]
    pub total_commits: u64,
    /// Per-day commit counts, Sunday first
    #[serde(default)]
    pub days: Vec<u64>,
}

impl WeeklyPoint {
    pub fn new(week_start: i64, total_commits: u64) -> Self {
        Self {
            week_start,
            total_commits,
            days: Vec::new(),
        }
    }
}

/// The trailing year of weekly commit activity for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoCommitSeries {
    #[serde(flatten)]
    pub repo: Repo,
    pub weeks: Vec<WeeklyPoint>,
}

impl RepoCommitSeries {
    pub fn new(repo: Repo, weeks: Vec<WeeklyPoint>) -> Self {
        Self { repo, weeks }
    }
}

/// Public profile information for a repository owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
}

impl UserProfile {
    /// A profile carrying nothing but the username.
    pub fn bare(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: None,
            avatar_url: None,
            profile_url: None,
        }
    }

    /// The display name when the owner has one, the username otherwise.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Commit counts of every loaded repository for a single week.
///
/// Repositories without data for the week are absent from `commits`; use
/// [`UnifiedWeeklyRow::commits_for`] to read them as zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnifiedWeeklyRow {
    pub week_start: i64,
    pub commits: BTreeMap<String, u64>,
}

impl UnifiedWeeklyRow {
    pub fn commits_for(&self, repo_key: &str) -> u64 {
        self.commits.get(repo_key).copied().unwrap_or(0)
    }

    /// Sum of commits across every repository present in the row.
    pub fn total(&self) -> u64 {
        self.commits.values().sum()
    }
}

/// A user-named snapshot of a repository list and its last fetched data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCollection {
    pub name: String,
    pub repos: Vec<Repo>,
    #[serde(rename = "data")]
    pub series: Vec<RepoCommitSeries>,
}

/// Owners of the given repositories, each listed once, in first-seen order.
pub fn distinct_owners(repos: &[Repo]) -> Vec<String> {
    let mut seen = HashSet::new();
    repos
        .iter()
        .filter(|repo| seen.insert(repo.owner.as_str()))
        .map(|repo| repo.owner.clone())
        .collect()
}
