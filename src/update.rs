//! Update checking
//!
//! Fetches the published version descriptor and compares it against the
//! compiled-in version. Fetch and parse problems are reported and swallowed;
//! only an unusable HTTP client is a hard failure.

use std::process::ExitCode;

use serde::Deserialize;
use thiserror::Error;

/// Remote version descriptor: integer version plus newline-delimited
/// changelog.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionDescriptor {
    pub ver: u32,
    #[serde(default)]
    pub changes: String,
}

impl VersionDescriptor {
    /// Changelog entries, one per line.
    pub fn changelog_lines(&self) -> impl Iterator<Item = &str> {
        self.changes.lines()
    }
}

/// Update check failures.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("could not construct an HTTP client: {0}")]
    ClientUnavailable(reqwest::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed version descriptor: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Compares the published version against the local one.
pub struct UpdateChecker {
    url: String,
    local_version: u32,
}

impl UpdateChecker {
    pub fn new(url: impl Into<String>, local_version: u32) -> Self {
        Self {
            url: url.into(),
            local_version,
        }
    }

    /// Strictly-greater integer comparison. No multi-field version
    /// semantics; equal means up to date.
    pub fn is_newer(&self, remote: &VersionDescriptor) -> bool {
        remote.ver > self.local_version
    }

    /// Fetch and parse the remote descriptor.
    pub async fn fetch(&self) -> Result<VersionDescriptor, UpdateError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(UpdateError::ClientUnavailable)?;
        let body = client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Entry point for the `checkupdate` subcommand.
pub async fn run_check(checker: &UpdateChecker, download_url: &str) -> ExitCode {
    let remote = match checker.fetch().await {
        Ok(remote) => remote,
        Err(err @ UpdateError::ClientUnavailable(_)) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            println!("Could not check updates: {err}");
            return ExitCode::SUCCESS;
        }
    };

    if checker.is_newer(&remote) {
        println!("There is a new update available.");
        println!("Changes:");
        for line in remote.changelog_lines() {
            println!("  {line}");
        }
        println!("Get droidbuild from GitHub: {download_url}");
    } else {
        println!("No updates available.");
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strictly_greater_version_is_an_update() {
        let checker = UpdateChecker::new("http://localhost/latest-version", 1);
        let remote: VersionDescriptor =
            serde_json::from_str(r#"{ "ver": 2, "changes": "a\nb" }"#).unwrap();

        assert!(checker.is_newer(&remote));
        let lines: Vec<_> = remote.changelog_lines().collect();
        assert_eq!(lines, ["a", "b"]);
    }

    #[test]
    fn test_equal_version_is_not_an_update() {
        let checker = UpdateChecker::new("http://localhost/latest-version", 1);
        let remote: VersionDescriptor =
            serde_json::from_str(r#"{ "ver": 1, "changes": "" }"#).unwrap();

        assert!(!checker.is_newer(&remote));
        assert_eq!(remote.changelog_lines().count(), 0);
    }

    #[test]
    fn test_missing_changes_field_defaults_to_empty() {
        let remote: VersionDescriptor = serde_json::from_str(r#"{ "ver": 3 }"#).unwrap();
        assert_eq!(remote.ver, 3);
        assert!(remote.changes.is_empty());
    }

    #[test]
    fn test_garbage_descriptor_is_a_parse_error() {
        let parsed: Result<VersionDescriptor, _> = serde_json::from_str("not json");
        assert!(parsed.is_err());
    }
}
