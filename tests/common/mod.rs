//! Common test utilities for cache integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use mc_artifacts::{ArtifactCache, Config, output};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A fresh cache root whose manifest and yarn URLs point at `base`.
pub fn cache_for(base: &str) -> (TempDir, ArtifactCache) {
    let dir = TempDir::new().unwrap();
    let cache = ArtifactCache::new(config_for(dir.path(), base)).unwrap();
    (dir, cache)
}

pub fn config_for(root: &Path, base: &str) -> Config {
    output::set_quiet(true);
    let mut config = Config::new(root);
    config.version_manifest_url = format!("{}/mc/game/version_manifest_v2.json", base);
    config.yarn_versions_url = format!("{}/v2/versions/yarn", base);
    config
}

/// Names of the regular files directly under `dir`, sorted.
pub fn cached_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run git in `dir` with a throwaway identity, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
        .args(["-c", "init.defaultBranch=main", "-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A local repository with one commit containing `README`.
pub fn origin_repo(parent: &Path, name: &str) -> (std::path::PathBuf, String) {
    let repo = parent.join(name);
    std::fs::create_dir_all(&repo).unwrap();
    git(&repo, &["init", "--quiet"]);
    std::fs::write(repo.join("README"), name).unwrap();
    git(&repo, &["add", "README"]);
    git(&repo, &["commit", "--quiet", "-m", "initial"]);
    let url = format!("file://{}", repo.display());
    (repo, url)
}
