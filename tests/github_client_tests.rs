use gitcompare::github::API_VERSION;
use gitcompare::{Config, GitHubClient, Repo};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    let config = Config {
        github_token: Some("test-token".to_string()),
        api_base_url: server.uri(),
        ..Config::default()
    };
    GitHubClient::new(&config).unwrap()
}

fn weeks_body() -> serde_json::Value {
    json!([
        { "days": [0, 1, 2, 0, 0, 0, 0], "total": 3, "week": 1000 },
        { "days": [0, 0, 5, 0, 0, 0, 0], "total": 5, "week": 2000 }
    ])
}

#[tokio::test]
async fn test_commit_activity_sends_auth_and_version_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/foo/bar/stats/commit_activity"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("X-GitHub-Api-Version", API_VERSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(weeks_body()))
        .expect(1)
        .mount(&server)
        .await;

    let series = client_for(&server)
        .fetch_commit_activity(&[Repo::new("foo", "bar")])
        .await
        .unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].repo, Repo::new("foo", "bar"));
    let weeks: Vec<(i64, u64)> = series[0]
        .weeks
        .iter()
        .map(|w| (w.week_start, w.total_commits))
        .collect();
    assert_eq!(weeks, vec![(1000, 3), (2000, 5)]);
}

#[tokio::test]
async fn test_failed_repositories_are_left_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/foo/ok/stats/commit_activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weeks_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/foo/broken/stats/commit_activity"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/foo/computing/stats/commit_activity"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/foo/garbled/stats/commit_activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "nope" })))
        .mount(&server)
        .await;

    let repos = vec![
        Repo::new("foo", "broken"),
        Repo::new("foo", "ok"),
        Repo::new("foo", "computing"),
        Repo::new("foo", "garbled"),
    ];
    let series = client_for(&server).fetch_commit_activity(&repos).await.unwrap();

    let keys: Vec<String> = series.iter().map(|s| s.repo.key()).collect();
    assert_eq!(keys, vec!["foo/ok".to_string()]);
}

#[tokio::test]
async fn test_empty_history_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/foo/new/stats/commit_activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let series = client_for(&server)
        .fetch_commit_activity(&[Repo::new("foo", "new")])
        .await
        .unwrap();

    assert_eq!(series.len(), 1);
    assert!(series[0].weeks.is_empty());
}

#[tokio::test]
async fn test_user_profiles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "foo",
            "name": "Foo Bar",
            "avatar_url": "https://avatars.example/foo.png",
            "html_url": "https://github.com/foo"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/anon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "anon" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let usernames = vec!["foo".to_string(), "anon".to_string(), "ghost".to_string()];
    let profiles = client_for(&server).fetch_user_profiles(&usernames).await.unwrap();

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].username, "foo");
    assert_eq!(profiles[0].display_name.as_deref(), Some("Foo Bar"));
    assert_eq!(
        profiles[0].profile_url.as_deref(),
        Some("https://github.com/foo")
    );
    assert_eq!(profiles[1].username, "anon");
    assert_eq!(profiles[1].display_name, None);
    assert_eq!(profiles[1].label(), "anon");
}

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        github_token: None,
        api_base_url: server.uri(),
        ..Config::default()
    };
    let client = GitHubClient::new(&config).unwrap();
    assert!(!client.has_token());

    let err = client
        .fetch_commit_activity(&[Repo::new("foo", "bar")])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("GITHUB_TOKEN"));
    assert!(client
        .fetch_user_profiles(&["foo".to_string()])
        .await
        .is_err());
}
