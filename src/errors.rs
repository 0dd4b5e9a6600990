// src/errors.rs
// =============================================================================
// Failure taxonomy for one regeneration cycle.
//
// Every variant aborts the cycle. Nothing here is recovered locally: the
// caller (one-shot `sample` or the `watch` loop) decides what to do, and in
// watch mode the previously generated payload simply stays current.
//
// Rust concepts:
// - thiserror: derive std::error::Error + Display from attributes
// - #[from]: lets the ? operator convert a source error automatically
// =============================================================================

use thiserror::Error;

use crate::sampler::SampleError;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Network, TLS or timeout failure talking to the API
    #[error("request to GitHub failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status (bad token, missing file,
    /// rate limit, ...)
    #[error("GitHub returned HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body or the `contributors` value could not be decoded
    #[error("could not decode contributors file: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("contributors file has no `contributors` field")]
    MissingContributors,

    #[error(transparent)]
    Sample(#[from] SampleError),

    /// Bad repository string or API base URL
    #[error("invalid content source: {0}")]
    InvalidSource(String),
}
