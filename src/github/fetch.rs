// src/github/fetch.rs
// =============================================================================
// This module fetches a single JSON file from a GitHub repository.
//
// Strategy:
// - Split "owner/repo" (or a github.com URL) into owner and repo
// - Call the contents API: GET /repos/{owner}/{repo}/contents/{path}
// - Ask for the raw media type so the body is the file itself, not a
//   base64 envelope
// - Send the token as a bearer credential when we have one
//
// Why the API instead of raw.githubusercontent.com?
// - Authenticated API calls get a much higher rate limit
// - It also works for private repositories when the token allows it
// =============================================================================

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::ContentSource;
use crate::errors::GenerationError;

const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";

// GitHub rejects requests without a User-Agent
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Builds the HTTP client used for every cycle
//
// One client is created at startup and reused (connection pooling)
pub fn build_client() -> Result<Client, GenerationError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

// Fetches the configured file and decodes it as JSON
//
// Returns: the decoded JSON value
// Errors:
//   Transport - network problem, timeout
//   Status    - non-2xx answer (bad token, missing file, rate limited)
//   Decode    - body is not JSON
#[tracing::instrument(skip_all, fields(owner = %source.owner, repo = %source.repo, path = %source.path))]
pub async fn fetch_json_file(client: &Client, source: &ContentSource) -> Result<Value, GenerationError> {
    let url = contents_url(source)?;

    let mut request = client.get(url.clone()).header(ACCEPT, RAW_MEDIA_TYPE);
    if let Some(token) = &source.token {
        request = request.header(AUTHORIZATION, format!("Bearer {}", token));
    } else {
        tracing::debug!("no token configured, fetching anonymously");
    }

    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(GenerationError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await?;
    tracing::debug!(bytes = body.len(), "fetched contributors file");

    Ok(serde_json::from_str(&body)?)
}

// Builds {api_base}/repos/{owner}/{repo}/contents/{path}
//
// Segments are pushed one by one so they get percent-encoded properly and
// an API base with or without a trailing slash both work.
fn contents_url(source: &ContentSource) -> Result<Url, GenerationError> {
    let mut url = source.api_base.clone();
    url.path_segments_mut()
        .map_err(|_| {
            GenerationError::InvalidSource(format!("API base cannot have a path: {}", source.api_base))
        })?
        .pop_if_empty()
        .extend(["repos", source.owner.as_str(), source.repo.as_str(), "contents"])
        .extend(source.path.split('/'));
    Ok(url)
}

// Parses a repository reference into (owner, repo)
//
// Supported formats:
//   - owner/repo
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo
//
// Example:
//   "https://github.com/blitz-js/blitz" -> ("blitz-js", "blitz")
pub fn parse_repository(reference: &str) -> Result<(String, String), GenerationError> {
    let trimmed = reference
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    let path = if let Some(rest) = trimmed.strip_prefix("github.com/") {
        rest
    } else if trimmed.contains("://")
        || trimmed.split('/').next().is_some_and(|host| host.contains('.'))
    {
        return Err(GenerationError::InvalidSource(format!(
            "not a GitHub repository: {}",
            reference
        )));
    } else {
        trimmed
    };

    let parts: Vec<&str> = path.trim_end_matches('/').split('/').collect();

    // owner/repo, nothing more, nothing empty
    if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(GenerationError::InvalidSource(format!(
            "expected owner/repo, got: {}",
            reference
        )));
    }

    let owner = parts[0].to_string();
    let repo = parts[1].trim_end_matches(".git").to_string();

    if repo.is_empty() {
        return Err(GenerationError::InvalidSource(format!(
            "expected owner/repo, got: {}",
            reference
        )));
    }

    Ok((owner, repo))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[tracing::instrument] do?
//    - Opens a span every time the function runs
//    - Log lines emitted inside carry owner/repo/path automatically
//    - skip_all stops it from trying to log the client itself
//
// 2. Why read text() and then serde_json::from_str?
//    - response.json() would mix "bad JSON" into the reqwest error
//    - Decoding ourselves keeps Transport and Decode failures apart
//
// 3. What is concat!(env!(...))?
//    - env! reads a variable at compile time; Cargo sets CARGO_PKG_NAME
//    - concat! glues string literals into one &'static str
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer, token: Option<&str>) -> ContentSource {
        ContentSource::new(
            "blitz-js/blitz",
            ".all-contributorsrc",
            &server.uri(),
            token.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_owner_repo() {
        let (owner, repo) = parse_repository("blitz-js/blitz").unwrap();
        assert_eq!(owner, "blitz-js");
        assert_eq!(repo, "blitz");
    }

    #[test]
    fn test_parse_github_url() {
        let (owner, repo) = parse_repository("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "rust");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let (owner, repo) = parse_repository("https://github.com/user/repo.git").unwrap();
        assert_eq!(owner, "user");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_invalid_references() {
        assert!(parse_repository("https://gitlab.com/user/repo").is_err());
        assert!(parse_repository("just-a-name").is_err());
        assert!(parse_repository("a/b/c").is_err());
        assert!(parse_repository("/repo").is_err());
    }

    #[test]
    fn test_contents_url() {
        let source = ContentSource::new(
            "blitz-js/blitz",
            "docs/contributors.json",
            "https://api.github.com",
            None,
        )
        .unwrap();
        assert_eq!(
            contents_url(&source).unwrap().as_str(),
            "https://api.github.com/repos/blitz-js/blitz/contents/docs/contributors.json"
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_token_and_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/blitz-js/blitz/contents/.all-contributorsrc"))
            .and(header("authorization", "Bearer secret"))
            .and(header("accept", RAW_MEDIA_TYPE))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contributors": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let value = fetch_json_file(&client, &source_for(&server, Some("secret")))
            .await
            .unwrap();
        assert_eq!(value, json!({ "contributors": [] }));
    }

    #[tokio::test]
    async fn test_fetch_anonymous_has_no_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let value = fetch_json_file(&client, &source_for(&server, None)).await.unwrap();
        assert_eq!(value, json!({}));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
        assert!(requests[0].headers.get("user-agent").is_some());
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let result = fetch_json_file(&client, &source_for(&server, None)).await;
        match result {
            Err(GenerationError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let result = fetch_json_file(&client, &source_for(&server, None)).await;
        assert!(matches!(result, Err(GenerationError::Decode(_))));
    }
}
