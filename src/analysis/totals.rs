use std::collections::BTreeMap;

use crate::types::{Repo, RepoCommitSeries};

/// A repository together with its commit total over the fetched year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTotal {
    pub repo: Repo,
    pub total: u64,
}

pub fn repo_total(series: &RepoCommitSeries) -> u64 {
    series.weeks.iter().map(|w| w.total_commits).sum()
}

/// Per-repository totals keyed by `owner/name`.
pub fn repo_totals(series: &[RepoCommitSeries]) -> BTreeMap<String, u64> {
    series
        .iter()
        .map(|s| (s.repo.key(), repo_total(s)))
        .collect()
}

pub fn overall_total(totals: &BTreeMap<String, u64>) -> u64 {
    totals.values().sum()
}

/// Cards for every active repository, highest total first.
///
/// Repositories whose series is missing show zero. The sort is stable, so
/// equal totals keep the order in which repositories were added.
pub fn rank_repositories(repos: &[Repo], series: &[RepoCommitSeries]) -> Vec<RepoTotal> {
    let totals = repo_totals(series);
    let mut ranked: Vec<RepoTotal> = repos
        .iter()
        .map(|repo| RepoTotal {
            total: totals.get(&repo.key()).copied().unwrap_or(0),
            repo: repo.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked
}
