//! Git helpers for the tool checkouts
//!
//! Clones and pulls go through [`ToolCmd`], so exit codes are checked and
//! git's stderr ends up in the error.

use super::cmd::ToolCmd;
use crate::core::error::{FetchError, Result};
use crate::core::output;
use std::path::Path;

/// Only https://, http://, ssh://, git@ and file:// remotes are accepted.
///
/// Remote URLs come from the user's own config, so local `file://` remotes
/// are trusted.
fn validate_git_url(url: &str) -> Result<()> {
    let ok = ["https://", "http://", "ssh://", "git@", "file://"]
        .iter()
        .any(|scheme| url.starts_with(scheme));
    if ok {
        Ok(())
    } else {
        Err(FetchError::ExternalToolFailure {
            cmd: format!("git clone {}", url),
            code: None,
            stderr: "unsupported git URL scheme; use https://, http://, ssh://, git@ or file://"
                .to_string(),
        })
    }
}

fn path_arg(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| FetchError::io(path, std::io::Error::other("path is not valid UTF-8")))
}

/// Clone `url` into exactly `dest`, which must not exist yet.
pub fn git_clone(url: &str, dest: &Path) -> Result<()> {
    validate_git_url(url)?;

    output::detail(&format!("git clone {}", url));
    let _guard = output::ProgressGuard::new(output::spinner(&format!("cloning {}", url)));

    ToolCmd::new("git")
        .args(["clone", "--quiet", url, path_arg(dest)?])
        .run()?;
    Ok(())
}

/// Fast-forward the checkout at `repo` from its remote.
///
/// No existence check is made; a missing checkout fails.
pub fn git_pull(repo: &Path) -> Result<()> {
    output::detail(&format!("git pull in {}", repo.display()));
    ToolCmd::new("git").args(["pull", "--quiet"]).dir(repo).run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_git_url_accepted() {
        assert!(validate_git_url("https://github.com/pokechu22/Burger").is_ok());
        assert!(validate_git_url("http://example.com/repo.git").is_ok());
        assert!(validate_git_url("git@github.com:user/repo.git").is_ok());
        assert!(validate_git_url("ssh://git@github.com/user/repo.git").is_ok());
        assert!(validate_git_url("file:///srv/git/repo.git").is_ok());
    }

    #[test]
    fn test_validate_git_url_rejected() {
        assert!(validate_git_url("ftp://example.com/repo.git").is_err());
        assert!(validate_git_url("/local/path/to/repo").is_err());
        assert!(validate_git_url("--upload-pack=evil").is_err());
    }

    #[test]
    fn test_clone_rejects_bad_scheme_before_running_git() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = git_clone("ftp://example.com/x.git", &dir.path().join("x")).unwrap_err();
        assert!(err.to_string().contains("unsupported git URL scheme"));
        assert!(!dir.path().join("x").exists());
    }

    #[test]
    fn test_pull_missing_checkout_fails() {
        let err = git_pull(Path::new("/nonexistent/Burger")).unwrap_err();
        assert!(matches!(err, FetchError::ExternalToolFailure { .. }));
    }
}
