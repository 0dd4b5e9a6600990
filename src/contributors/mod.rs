// src/contributors/mod.rs
// =============================================================================
// Contributor data: the record type and extraction from a decoded
// all-contributors file.
// =============================================================================

mod record;

pub use record::{extract_contributors, ContributorRecord};
