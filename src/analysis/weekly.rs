use std::collections::{BTreeMap, HashMap};

use crate::types::{Repo, RepoCommitSeries, UnifiedWeeklyRow};

/// Number of repositories shown on a weekly card before the detail view.
pub const WEEK_PREVIEW_LIMIT: usize = 3;

/// Reshape per-repository series into one row per week, newest first.
///
/// A row only carries the repositories that reported data for that week. When
/// the same (week, repository) pair shows up more than once, the later series
/// in `series` wins.
pub fn unified_weekly_rows(series: &[RepoCommitSeries]) -> Vec<UnifiedWeeklyRow> {
    let mut by_week: HashMap<i64, BTreeMap<String, u64>> = HashMap::new();

    for entry in series {
        let key = entry.repo.key();
        for point in &entry.weeks {
            by_week
                .entry(point.week_start)
                .or_default()
                .insert(key.clone(), point.total_commits);
        }
    }

    let mut rows: Vec<UnifiedWeeklyRow> = by_week
        .into_iter()
        .map(|(week_start, commits)| UnifiedWeeklyRow { week_start, commits })
        .collect();
    rows.sort_by(|a, b| b.week_start.cmp(&a.week_start));
    rows
}

/// Active repositories ordered by their commits in `row`, busiest first.
///
/// Repositories missing from the row count as zero; ties keep the order of
/// `repos`.
pub fn rank_week(row: &UnifiedWeeklyRow, repos: &[Repo]) -> Vec<(Repo, u64)> {
    let mut ranked: Vec<(Repo, u64)> = repos
        .iter()
        .map(|repo| (repo.clone(), row.commits_for(&repo.key())))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Whether a week has more active repositories than its card can show.
pub fn needs_detail_view(repos: &[Repo]) -> bool {
    repos.len() > WEEK_PREVIEW_LIMIT
}
