pub mod url;
pub mod week;

pub use url::{parse_github_urls, plan_addition};
pub use week::WeekLabel;
