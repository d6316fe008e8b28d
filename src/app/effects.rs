use tracing::{error, info};

use super::state::{Action, BatchOutcome, FetchBatch};
use crate::github::GitHubClient;

/// Run a fetch batch to completion and describe the result as an [`Action`].
///
/// Commit activity and profiles are fetched concurrently; each settles on its
/// own and the batch reports once both have.
pub async fn execute(client: &GitHubClient, batch: FetchBatch) -> Action {
    let FetchBatch {
        generation,
        repos,
        usernames,
    } = batch;
    info!(
        "batch {}: {} repositories, {} owners",
        generation,
        repos.len(),
        usernames.len()
    );

    let commits = async {
        if repos.is_empty() {
            Ok(None)
        } else {
            client.fetch_commit_activity(&repos).await.map(Some)
        }
    };
    let (series, profiles) = tokio::join!(commits, client.fetch_user_profiles(&usernames));

    match (series, profiles) {
        (Ok(series), Ok(profiles)) => Action::BatchCompleted(BatchOutcome {
            generation,
            series,
            profiles,
        }),
        (Err(e), _) | (_, Err(e)) => {
            error!("batch {} failed: {}", generation, e);
            Action::BatchFailed {
                generation,
                message: e.to_string(),
            }
        }
    }
}
