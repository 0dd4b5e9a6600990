// src/config.rs
// =============================================================================
// Where the contributors file comes from.
//
// Defaults point at the Blitz.js all-contributors file; every part can be
// overridden from the command line, and the token can also come from the
// GITHUB_AUTH_TOKEN environment variable (clap reads it for us).
// =============================================================================

use url::Url;

use crate::errors::GenerationError;
use crate::github::parse_repository;

pub const DEFAULT_REPOSITORY: &str = "blitz-js/blitz";
pub const DEFAULT_PATH: &str = ".all-contributorsrc";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Everything the fetcher needs to locate one file
#[derive(Debug, Clone)]
pub struct ContentSource {
    pub owner: String,
    pub repo: String,
    /// Path of the file inside the repository, e.g. ".all-contributorsrc"
    pub path: String,
    pub api_base: Url,
    /// Optional bearer token; without one requests are anonymous
    pub token: Option<String>,
}

impl ContentSource {
    // Builds a source from raw CLI values
    //
    // repository may be "owner/repo" or a github.com URL
    pub fn new(
        repository: &str,
        path: &str,
        api_base: &str,
        token: Option<String>,
    ) -> Result<Self, GenerationError> {
        let (owner, repo) = parse_repository(repository)?;

        let api_base = Url::parse(api_base)
            .map_err(|e| GenerationError::InvalidSource(format!("API base {}: {}", api_base, e)))?;

        let path = path.trim_matches('/');
        if path.is_empty() {
            return Err(GenerationError::InvalidSource("file path is empty".to_string()));
        }

        Ok(Self {
            owner,
            repo,
            path: path.to_string(),
            api_base,
            // An exported-but-empty variable means "no token"
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }
}
