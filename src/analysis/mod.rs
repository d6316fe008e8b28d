mod cache;
pub mod totals;
pub mod weekly;


pub use cache::ProfileDirectory;
pub use totals::{overall_total, rank_repositories, repo_total, repo_totals, RepoTotal};
pub use weekly::{needs_detail_view, rank_week, unified_weekly_rows, WEEK_PREVIEW_LIMIT};
