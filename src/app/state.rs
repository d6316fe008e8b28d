use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::analysis::{self, ProfileDirectory, RepoTotal};
use crate::collections::CollectionStore;
use crate::types::{distinct_owners, Repo, RepoCommitSeries, UnifiedWeeklyRow, UserProfile};
use crate::utils::{parse_github_urls, plan_addition};

/// Repository cards shown before "Show More".
pub const REPO_PAGE_SIZE: usize = 6;
/// Weekly cards shown initially and added per "Show More Weeks".
pub const WEEK_PAGE_SIZE: usize = 6;
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Something the user did, or a fetch batch finishing.
#[derive(Debug, Clone)]
pub enum Action {
    AddRepositories,
    RemoveRepository(String),
    BatchCompleted(BatchOutcome),
    BatchFailed { generation: u64, message: String },
    SaveCollection,
    LoadCollection(String),
    DeleteCollection(String),
    ToggleShowAllRepos,
    ShowMoreWeeks,
    OpenWeek(i64),
    CloseWeek,
    DismissNotification,
}

/// Network work requested by [`AppState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchBatch {
    pub generation: u64,
    /// Repositories whose commit activity to fetch; empty keeps current series
    pub repos: Vec<Repo>,
    pub usernames: Vec<String>,
}

/// Results of a [`FetchBatch`].
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub generation: u64,
    /// `None` when the batch did not ask for commit activity
    pub series: Option<Vec<RepoCommitSeries>>,
    pub profiles: Vec<UserProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: Instant,
}

/// Session state for the comparison window.
///
/// All changes go through [`AppState::apply`]; the text inputs are edited in
/// place by the UI.
#[derive(Debug)]
pub struct AppState {
    pub input_urls: String,
    pub save_name: String,
    pub repos: Vec<Repo>,
    pub series: Vec<RepoCommitSeries>,
    pub profiles: ProfileDirectory,
    pub collections: CollectionStore,
    pub error_message: Option<String>,
    pub notification: Option<Notification>,
    pub is_loading: bool,
    pub show_all_repos: bool,
    pub displayed_weeks: usize,
    pub selected_week: Option<i64>,
    pub use_log_scale: bool,
    generation: u64,
}

impl AppState {
    pub fn new(collections: CollectionStore) -> Self {
        Self {
            input_urls: String::new(),
            save_name: String::new(),
            repos: Vec::new(),
            series: Vec::new(),
            profiles: ProfileDirectory::new(),
            collections,
            error_message: None,
            notification: None,
            is_loading: false,
            show_all_repos: false,
            displayed_weeks: WEEK_PAGE_SIZE,
            selected_week: None,
            use_log_scale: false,
            generation: 0,
        }
    }

    /// Apply an action, returning the fetch it requires, if any.
    pub fn apply(&mut self, action: Action) -> Option<FetchBatch> {
        match action {
            Action::AddRepositories => self.add_repositories(),
            Action::RemoveRepository(key) => {
                self.repos.retain(|r| r.key() != key);
                self.series.retain(|s| s.repo.key() != key);
                if self.repos.is_empty() {
                    self.is_loading = false;
                }
                None
            }
            Action::BatchCompleted(outcome) => {
                self.finish_batch(outcome);
                None
            }
            Action::BatchFailed {
                generation,
                message,
            } => {
                if generation == self.generation {
                    self.is_loading = false;
                    self.error_message = Some(message);
                }
                None
            }
            Action::SaveCollection => {
                self.save_collection();
                None
            }
            Action::LoadCollection(name) => self.load_collection(&name),
            Action::DeleteCollection(name) => {
                self.delete_collection(&name);
                None
            }
            Action::ToggleShowAllRepos => {
                self.show_all_repos = !self.show_all_repos;
                None
            }
            Action::ShowMoreWeeks => {
                self.displayed_weeks += WEEK_PAGE_SIZE;
                None
            }
            Action::OpenWeek(week) => {
                self.selected_week = Some(week);
                None
            }
            Action::CloseWeek => {
                self.selected_week = None;
                None
            }
            Action::DismissNotification => {
                self.notification = None;
                None
            }
        }
    }

    fn add_repositories(&mut self) -> Option<FetchBatch> {
        let added = parse_github_urls(&self.input_urls)
            .and_then(|candidates| plan_addition(&self.repos, candidates));

        match added {
            Ok(added) => {
                info!("adding {} repositories", added.len());
                self.error_message = None;
                self.repos.extend(added);
                self.input_urls.clear();
                Some(self.next_batch(self.repos.clone()))
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                None
            }
        }
    }

    fn next_batch(&mut self, repos: Vec<Repo>) -> FetchBatch {
        self.generation += 1;
        self.is_loading = true;
        if !repos.is_empty() {
            // Fresh commit data replaces the weekly cards
            self.displayed_weeks = WEEK_PAGE_SIZE;
            self.selected_week = None;
        }
        FetchBatch {
            generation: self.generation,
            usernames: distinct_owners(&self.repos),
            repos,
        }
    }

    fn finish_batch(&mut self, outcome: BatchOutcome) {
        if outcome.generation != self.generation {
            debug!(
                "discarding results of batch {} (current is {})",
                outcome.generation, self.generation
            );
            return;
        }
        if let Some(series) = outcome.series {
            // Keep only repositories still in the active list
            self.series = series
                .into_iter()
                .filter(|s| self.repos.contains(&s.repo))
                .collect();
        }
        self.profiles.store_all(outcome.profiles);
        self.is_loading = false;
    }

    fn save_collection(&mut self) {
        let name = self.save_name.trim().to_string();
        match self.collections.save(&name, &self.repos, &self.series) {
            Ok(()) => {
                self.save_name.clear();
                self.error_message = None;
                self.notify(NotificationKind::Success, format!("Data saved as \"{name}\""));
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    fn load_collection(&mut self, name: &str) -> Option<FetchBatch> {
        let record = self.collections.load(name)?.clone();
        info!("loading collection {:?} ({} repositories)", name, record.repos.len());
        self.repos = record.repos;
        self.series = record.series;
        self.error_message = None;
        self.show_all_repos = false;
        self.displayed_weeks = WEEK_PAGE_SIZE;
        self.selected_week = None;
        if self.repos.is_empty() {
            // Nothing to fetch, but any in-flight batch is now stale
            self.generation += 1;
            self.is_loading = false;
            return None;
        }
        Some(self.next_batch(Vec::new()))
    }

    fn delete_collection(&mut self, name: &str) {
        match self.collections.delete(name) {
            Ok(_) => self.notify(
                NotificationKind::Error,
                format!("Collection \"{name}\" has been deleted"),
            ),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    fn notify(&mut self, kind: NotificationKind, message: String) {
        self.notification = Some(Notification {
            kind,
            message,
            raised_at: Instant::now(),
        });
    }

    /// Drop the notification once it has been visible for [`NOTIFICATION_TTL`].
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| now.duration_since(n.raised_at) >= NOTIFICATION_TTL)
        {
            self.notification = None;
        }
    }

    /// Unified weekly rows for the loaded series.
    pub fn rows(&self) -> Vec<UnifiedWeeklyRow> {
        analysis::unified_weekly_rows(&self.series)
    }

    pub fn ranked_repositories(&self) -> Vec<RepoTotal> {
        analysis::rank_repositories(&self.repos, &self.series)
    }

    /// Cards to display given the "Show More" toggle.
    pub fn visible_repositories(&self) -> Vec<RepoTotal> {
        let mut ranked = self.ranked_repositories();
        if !self.show_all_repos {
            ranked.truncate(REPO_PAGE_SIZE);
        }
        ranked
    }

    pub fn overall_total(&self) -> u64 {
        analysis::overall_total(&analysis::repo_totals(&self.series))
    }

    pub fn selected_row(&self) -> Option<UnifiedWeeklyRow> {
        let week = self.selected_week?;
        self.rows().into_iter().find(|row| row.week_start == week)
    }
}
