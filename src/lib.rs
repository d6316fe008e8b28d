//! # GitHub Commit Comparison Library
//!
//! `gitcompare` compares the weekly commit activity of up to thirty GitHub
//! repositories side by side. It fetches weekly commit statistics and owner
//! profiles from the GitHub REST API, merges them into one week-by-week table,
//! ranks repositories by total commits, and keeps named collections on disk.
//!
//! ## Features
//!
//! - Parse `https://github.com/{owner}/{repo}` URLs, one per line
//! - Fetch commit activity and owner profiles concurrently
//! - Unified weekly table, newest week first
//! - Per-repository and overall commit totals
//! - Save, load and delete named collections
//! - Line chart with an optional logarithmic scale
//!
//! ## Example
//!
//! ```no_run
//! use gitcompare::{AppState, CollectionStore, Config, GitHubClient};
//! use gitcompare::app::AppWrapper;
//!
//! let config = Config::from_env();
//! let client = GitHubClient::new(&config).unwrap();
//! let state = AppState::new(CollectionStore::load_all(config.data_file.clone()));
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let app = AppWrapper::new(state, client, runtime.handle().clone());
//!
//! eframe::run_native(
//!     "GitHub Commit Comparison",
//!     eframe::NativeOptions::default(),
//!     Box::new(|_cc| Ok(Box::new(app) as Box<dyn eframe::App>)),
//! ).unwrap();
//! ```

pub mod analysis;
pub mod app;
pub mod collections;
pub mod config;
pub mod error;
pub mod github;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::AppState;
pub use collections::CollectionStore;
pub use config::Config;
pub use github::GitHubClient;
pub use types::{Repo, RepoCommitSeries, SavedCollection, UnifiedWeeklyRow, UserProfile};
