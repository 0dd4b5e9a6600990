// src/github/mod.rs
// =============================================================================
// This module handles fetching files from GitHub repositories.
//
// Currently implements:
// - Parsing "owner/repo" references and github.com URLs
// - Fetching one file through the contents API and decoding it as JSON
// - Optional bearer-token authentication
// =============================================================================

mod fetch;

// Re-export the public functions from fetch.rs
pub use fetch::{build_client, fetch_json_file, parse_repository};
