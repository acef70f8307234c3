//! Fetch error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while populating or reading the artifact cache.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error(
        "no version with id {version} found. Maybe delete {} and try again?",
        manifest.display()
    )]
    VersionNotFound { version: String, manifest: PathBuf },

    #[error("version {version} has no {kind} download")]
    MissingDownload { version: String, kind: &'static str },

    #[error("invalid version id: {0:?}")]
    InvalidVersionId(String),

    #[error("HTTP GET {url} failed: {reason}")]
    Http { url: String, reason: String },

    #[error("invalid JSON from {source_name}: {source}")]
    Json {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("external tool failed: {cmd} (exit code: {code:?})\nstderr: {stderr}")]
    ExternalToolFailure {
        cmd: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("mappings line {line}: {message}")]
    MappingParse { line: usize, message: String },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(source_name: impl std::fmt::Display, source: serde_json::Error) -> Self {
        FetchError::Json {
            source_name: source_name.to_string(),
            source,
        }
    }
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_not_found_hints_at_manifest() {
        let err = FetchError::VersionNotFound {
            version: "1.99".into(),
            manifest: PathBuf::from("downloads/version_manifest.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("1.99"));
        assert!(msg.contains("delete downloads/version_manifest.json"));
    }

    #[test]
    fn test_tool_failure_includes_stderr() {
        let err = FetchError::ExternalToolFailure {
            cmd: "git pull".into(),
            code: Some(128),
            stderr: "fatal: not a git repository".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("git pull"));
        assert!(msg.contains("128"));
        assert!(msg.contains("not a git repository"));
    }
}
