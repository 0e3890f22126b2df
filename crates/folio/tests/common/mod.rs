//! Shared helpers for folio integration tests.

#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use folio::RepositoryRecord;

pub fn repo(name: &str) -> RepositoryRecord {
    RepositoryRecord::new(name, format!("https://github.com/alice/{name}"))
}

/// Serializes records the way the API returns them.
pub fn repos_json(records: &[RepositoryRecord]) -> String {
    serde_json::to_string(records).unwrap()
}

/// Answers `GET /users/{user}/repos` with `response`.
pub async fn mount_repos(server: &MockServer, user: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{user}/repos")))
        .respond_with(response)
        .mount(server)
        .await;
}

/// A server listing `records` for `user`.
pub async fn repos_server(user: &str, records: &[RepositoryRecord]) -> MockServer {
    let server = MockServer::start().await;
    let body = repos_json(records);
    mount_repos(
        &server,
        user,
        ResponseTemplate::new(200).set_body_raw(body, "application/json"),
    )
    .await;
    server
}
