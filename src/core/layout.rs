//! Cache file naming
//!
//! Every cached artifact lives directly under the cache root at a path
//! derived from its kind and version id. This module is the only place that
//! knows the naming convention.

use super::error::{FetchError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

const LOCKS_DIR: &str = ".locks";

/// A game version identifier that is safe to embed in a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionId(String);

impl VersionId {
    /// Rejects ids that are empty or could escape the cache root.
    pub fn parse(id: &str) -> Result<Self> {
        let bad = id.is_empty()
            || id == "."
            || id == ".."
            || id.contains(['/', '\\', '\0']);
        if bad {
            return Err(FetchError::InvalidVersionId(id.to_string()));
        }
        Ok(VersionId(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One cacheable thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    VersionManifest,
    YarnVersions,
    VersionData(VersionId),
    ClientJar(VersionId),
    ServerJar(VersionId),
    Mappings(VersionId),
    Burger,
    GeneratorMod,
}

impl Artifact {
    /// Name of the file (or checkout directory) under the cache root
    pub fn file_name(&self) -> String {
        match self {
            Artifact::VersionManifest => "version_manifest.json".to_string(),
            Artifact::YarnVersions => "yarn_versions.json".to_string(),
            Artifact::VersionData(id) => format!("{}.json", id),
            Artifact::ClientJar(id) => format!("client-{}.jar", id),
            Artifact::ServerJar(id) => format!("server-{}.jar", id),
            Artifact::Mappings(id) => format!("mappings-{}.txt", id),
            Artifact::Burger => "Burger".to_string(),
            Artifact::GeneratorMod => "minecraft-data-generator-server".to_string(),
        }
    }

    /// Short human label
    pub fn label(&self) -> &'static str {
        match self {
            Artifact::VersionManifest => "version manifest",
            Artifact::YarnVersions => "yarn versions",
            Artifact::VersionData(_) => "version data",
            Artifact::ClientJar(_) => "client jar",
            Artifact::ServerJar(_) => "server jar",
            Artifact::Mappings(_) => "client mappings",
            Artifact::Burger => "Burger",
            Artifact::GeneratorMod => "data generator",
        }
    }

    /// The artifacts cached per version, in dependency order
    pub fn per_version(id: &VersionId) -> [Artifact; 4] {
        [
            Artifact::VersionData(id.clone()),
            Artifact::ClientJar(id.clone()),
            Artifact::ServerJar(id.clone()),
            Artifact::Mappings(id.clone()),
        ]
    }
}

/// Resolves artifacts to paths under one cache root.
#[derive(Debug, Clone)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, artifact: &Artifact) -> PathBuf {
        self.root.join(artifact.file_name())
    }

    /// Lock file guarding population of `artifact`
    pub fn lock_path(&self, artifact: &Artifact) -> PathBuf {
        self.root
            .join(LOCKS_DIR)
            .join(format!("{}.lock", artifact.file_name()))
    }
}
