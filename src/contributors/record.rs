// src/contributors/record.rs
// =============================================================================
// Contributor records as they appear in an all-contributors file, and the
// code that pulls the `contributors` list out of the decoded JSON.
//
// A typical .all-contributorsrc looks like:
//
//   {
//     "projectName": "blitz",
//     "contributors": [
//       { "login": "flybayer", "name": "Brandon Bayer",
//         "avatar_url": "https://avatars...", "profile": "https://...",
//         "contributions": ["code", "doc"] },
//       ...
//     ]
//   }
//
// Everything except `contributors` is ignored.
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GenerationError;

/// One contributor entry, kept exactly as the file describes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRecord {
    /// GitHub username
    pub login: String,
    /// Display name, null or missing for some entries
    #[serde(default)]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Contribution kinds ("code", "doc", "bug", ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributions: Vec<String>,
}

impl ContributorRecord {
    /// Name to show next to the avatar, falling back to the login
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

// Takes the decoded file and returns its `contributors` list
//
// Errors:
//   MissingContributors - no `contributors` key (or the file isn't an object)
//   Decode              - the key exists but isn't a list of records
//
// An empty list is returned as-is; the sampler rejects it later.
pub fn extract_contributors(mut file: Value) -> Result<Vec<ContributorRecord>, GenerationError> {
    let contributors = file
        .as_object_mut()
        .and_then(|fields| fields.remove("contributors"))
        .ok_or(GenerationError::MissingContributors)?;

    Ok(serde_json::from_value(contributors)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_contributors() {
        let file = json!({
            "projectName": "blitz",
            "contributors": [
                {
                    "login": "flybayer",
                    "name": "Brandon Bayer",
                    "avatar_url": "https://avatars.example/flybayer.png",
                    "profile": "https://example.com",
                    "contributions": ["code", "doc"]
                },
                {
                    "login": "ghost",
                    "name": null,
                    "avatar_url": "https://avatars.example/ghost.png"
                }
            ]
        });

        let records = extract_contributors(file).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].login, "flybayer");
        assert_eq!(records[0].contributions, vec!["code", "doc"]);
        assert_eq!(records[1].name, None);
        assert_eq!(records[1].display_name(), "ghost");
    }

    #[test]
    fn test_missing_field_is_an_error_not_an_empty_list() {
        let file = json!({ "projectName": "blitz" });
        let result = extract_contributors(file);
        assert!(matches!(result, Err(GenerationError::MissingContributors)));
    }

    #[test]
    fn test_non_object_file() {
        let result = extract_contributors(json!([1, 2, 3]));
        assert!(matches!(result, Err(GenerationError::MissingContributors)));
    }

    #[test]
    fn test_wrong_shape_is_a_decode_error() {
        let file = json!({ "contributors": "everyone" });
        let result = extract_contributors(file);
        assert!(matches!(result, Err(GenerationError::Decode(_))));
    }

    #[test]
    fn test_record_without_avatar_is_rejected() {
        let file = json!({ "contributors": [{ "login": "someone" }] });
        let result = extract_contributors(file);
        assert!(matches!(result, Err(GenerationError::Decode(_))));
    }

    #[test]
    fn test_empty_list_passes_through() {
        let file = json!({ "contributors": [] });
        assert!(extract_contributors(file).unwrap().is_empty());
    }

    #[test]
    fn test_serializes_with_original_field_names() {
        let record = ContributorRecord {
            login: "a".to_string(),
            name: None,
            avatar_url: "https://x/a.png".to_string(),
            profile: None,
            contributions: Vec::new(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({ "login": "a", "name": null, "avatar_url": "https://x/a.png" })
        );
    }
}
