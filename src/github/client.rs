use anyhow::{anyhow, Context, Result};
use futures::future::join_all;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ClientError;
use crate::types::{Repo, RepoCommitSeries, UserProfile, WeeklyPoint};

pub const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("gitcompare/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct ProfileResponse {
    name: Option<String>,
    avatar_url: Option<String>,
    html_url: Option<String>,
}

/// GitHub REST client.
///
/// Batch calls fan out one request per item, all in flight at once. A failed
/// item is logged and left out of the result; only a missing token fails the
/// batch, and that is checked before any request goes out.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.github_token.clone(),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn token(&self) -> Result<&str, ClientError> {
        self.token.as_deref().ok_or(ClientError::MissingToken)
    }

    fn get(&self, path: &str, token: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Weekly commit activity for each repository that answered.
    pub async fn fetch_commit_activity(
        &self,
        repos: &[Repo],
    ) -> Result<Vec<RepoCommitSeries>, ClientError> {
        let token = self.token()?;
        let results = join_all(repos.iter().map(|repo| async move {
            match self.commit_activity(repo, token).await {
                Ok(series) => Some(series),
                Err(e) => {
                    warn!("dropping commit activity for {}: {:#}", repo, e);
                    None
                }
            }
        }))
        .await;

        let series: Vec<RepoCommitSeries> = results.into_iter().flatten().collect();
        info!(
            "fetched commit activity for {}/{} repositories",
            series.len(),
            repos.len()
        );
        Ok(series)
    }

    async fn commit_activity(&self, repo: &Repo, token: &str) -> Result<RepoCommitSeries> {
        let path = format!("/repos/{}/{}/stats/commit_activity", repo.owner, repo.name);
        let resp = self
            .get(&path, token)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?;

        let status = resp.status();
        if status == StatusCode::ACCEPTED {
            debug!("statistics for {} are still being computed", repo);
            return Err(anyhow!("GitHub is still computing statistics (202)"));
        }
        if !status.is_success() {
            return Err(anyhow!("GET {} returned {}", path, status));
        }

        let weeks: Vec<WeeklyPoint> = resp
            .json()
            .await
            .with_context(|| format!("failed to parse {path} JSON"))?;
        Ok(RepoCommitSeries::new(repo.clone(), weeks))
    }

    /// Profiles for each username that answered.
    ///
    /// Callers pass each owner once; see [`crate::types::distinct_owners`].
    pub async fn fetch_user_profiles(
        &self,
        usernames: &[String],
    ) -> Result<Vec<UserProfile>, ClientError> {
        let token = self.token()?;
        let results = join_all(usernames.iter().map(|username| async move {
            match self.user_profile(username, token).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!("dropping profile for {}: {:#}", username, e);
                    None
                }
            }
        }))
        .await;

        Ok(results.into_iter().flatten().collect())
    }

    async fn user_profile(&self, username: &str, token: &str) -> Result<UserProfile> {
        let path = format!("/users/{username}");
        let resp = self
            .get(&path, token)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?;

        if !resp.status().is_success() {
            return Err(anyhow!("GET {} returned {}", path, resp.status()));
        }

        let body: ProfileResponse = resp
            .json()
            .await
            .with_context(|| format!("failed to parse {path} JSON"))?;
        Ok(UserProfile {
            username: username.to_string(),
            display_name: body.name,
            avatar_url: body.avatar_url,
            profile_url: body.html_url,
        })
    }
}
