//! The artifact cache
//!
//! Every fetcher follows the same shape: resolve the artifact's path, return
//! it if it is already on disk, otherwise take the artifact's lock, check
//! again, fetch, and write the result atomically. Higher-level fetchers lean
//! on lower-level ones (a jar needs version data, version data needs the
//! manifest), so one call may populate several files.

use crate::core::config::Config;
use crate::core::error::{FetchError, Result};
use crate::core::layout::{Artifact, CacheLayout, VersionId};
use crate::core::lock::acquire_cache_lock;
use crate::core::output;
use crate::helpers::cmd::ToolCmd;
use crate::helpers::http::HttpClient;
use crate::helpers::{fs_utils, git};
use crate::manifest::{self, Download, Downloads, VersionManifest, VersionMetadata, YarnVersion};
use crate::mappings::MappingParser;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// What [`ArtifactCache::status`] knows about one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStatus {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub present: bool,
    /// File size in bytes; `None` for directories and missing files
    pub size: Option<u64>,
}

/// Fetches build artifacts on demand and keeps them under one cache root.
#[derive(Debug, Clone)]
pub struct ArtifactCache {
    config: Config,
    layout: CacheLayout,
    http: HttpClient,
}

impl ArtifactCache {
    /// Create the cache, making sure the cache root exists.
    pub fn new(config: Config) -> Result<Self> {
        if !config.cache_root.exists() {
            output::detail(&format!(
                "creating cache directory {}",
                config.cache_root.display()
            ));
        }
        fs_utils::ensure_dir(&config.cache_root)?;

        Ok(Self {
            layout: CacheLayout::new(config.cache_root.clone()),
            http: HttpClient::new(config.http_timeout),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    /// Where `artifact` lives (or would live) in this cache
    pub fn path(&self, artifact: &Artifact) -> PathBuf {
        self.layout.path(artifact)
    }

    // ------------------------------------------------------------------
    // Tool repositories
    // ------------------------------------------------------------------

    /// Clone Burger and install its Python dependencies, unless already cloned.
    pub fn get_burger(&self) -> Result<PathBuf> {
        self.acquire_repo(
            &Artifact::Burger,
            &self.config.burger_repo_url,
            ToolCmd::from_argv(&self.config.burger_install),
        )
    }

    /// Clone the data generator server mod, unless already cloned.
    pub fn get_generator_mod(&self) -> Result<PathBuf> {
        self.acquire_repo(&Artifact::GeneratorMod, &self.config.generator_repo_url, None)
    }

    fn acquire_repo(
        &self,
        artifact: &Artifact,
        url: &str,
        install: Option<ToolCmd>,
    ) -> Result<PathBuf> {
        let dest = self.layout.path(artifact);
        if dest.exists() {
            return Ok(dest);
        }

        let _lock = acquire_cache_lock(&self.layout.lock_path(artifact))?;
        if dest.exists() {
            return Ok(dest);
        }

        output::action(&format!("Downloading {}...", artifact.label()));

        // `dest` only ever holds a checkout whose clone and install both finished.
        let staging = self
            .layout
            .root()
            .join(format!(".{}.partial", artifact.file_name()));
        if staging.exists() {
            output::warning(&format!("removing leftover {}", staging.display()));
            remove_dir_if_exists(&staging)?;
        }

        let staged = git::git_clone(url, &staging).and_then(|()| match install {
            Some(cmd) => {
                output::action("Installing dependencies...");
                cmd.dir(&staging).run().map(|_| ())
            }
            None => Ok(()),
        });
        if let Err(e) = staged {
            if let Err(cleanup) = remove_dir_if_exists(&staging) {
                output::warning(&cleanup.to_string());
            }
            return Err(e);
        }

        std::fs::rename(&staging, &dest).map_err(|e| FetchError::io(&dest, e))?;
        output::detail(&format!("cloned into {}", dest.display()));
        Ok(dest)
    }

    // ------------------------------------------------------------------
    // Manifest and version data
    // ------------------------------------------------------------------

    /// The global version manifest, fetched once and then read from disk.
    pub fn get_version_manifest(&self) -> Result<VersionManifest> {
        self.cached_json(&Artifact::VersionManifest, || {
            output::action("Downloading version manifest...");
            Ok(self.config.version_manifest_url.clone())
        })
    }

    /// Metadata for one version. A cached copy is returned without revalidation.
    pub fn get_version_data(&self, version_id: &str) -> Result<VersionMetadata> {
        let id = VersionId::parse(version_id)?;
        self.cached_json(&Artifact::VersionData(id.clone()), || {
            let manifest = self.get_version_manifest()?;
            output::action(&format!("Getting data for {}...", id));
            manifest
                .find(id.as_str())
                .map(|entry| entry.url.clone())
                .ok_or_else(|| FetchError::VersionNotFound {
                    version: id.to_string(),
                    manifest: self.layout.path(&Artifact::VersionManifest),
                })
        })
    }

    // ------------------------------------------------------------------
    // Jars and mappings
    // ------------------------------------------------------------------

    /// Download the client jar for `version_id` if missing; returns its path.
    pub fn get_client_jar(&self, version_id: &str) -> Result<PathBuf> {
        let id = VersionId::parse(version_id)?;
        self.fetch_binary(&id, &Artifact::ClientJar(id.clone()), "client", |d| {
            d.client.as_ref()
        })
    }

    /// Download the server jar for `version_id` if missing; returns its path.
    pub fn get_server_jar(&self, version_id: &str) -> Result<PathBuf> {
        let id = VersionId::parse(version_id)?;
        self.fetch_binary(&id, &Artifact::ServerJar(id.clone()), "server", |d| {
            d.server.as_ref()
        })
    }

    fn fetch_binary(
        &self,
        id: &VersionId,
        artifact: &Artifact,
        kind: &'static str,
        pick: impl FnOnce(&Downloads) -> Option<&Download>,
    ) -> Result<PathBuf> {
        self.populate(artifact, |path| {
            let url = self.download_url(id, kind, pick)?;
            output::action(&format!("Downloading {} jar...", kind));
            fs_utils::write_atomic(path, |file| {
                self.http
                    .get_to_writer(&url, &artifact.file_name(), file)
                    .map(|_| ())
            })
        })
    }

    /// Raw client mapping text for `version_id`, fetched once and cached verbatim.
    pub fn get_mappings_text(&self, version_id: &str) -> Result<String> {
        let id = VersionId::parse(version_id)?;
        let artifact = Artifact::Mappings(id.clone());
        let path = self.populate(&artifact, |path| {
            let url = self.download_url(&id, "client_mappings", |d| {
                d.client_mappings.as_ref()
            })?;
            output::action("Downloading client mappings...");
            let text = self.http.get_text(&url, &artifact.file_name())?;
            fs_utils::write_bytes(path, text.as_bytes())
        })?;
        fs_utils::read_text(&path)
    }

    /// Client mappings for `version_id`, parsed by `parser` on every call.
    pub fn get_mappings_for_version<P: MappingParser>(
        &self,
        version_id: &str,
        parser: &P,
    ) -> Result<P::Output> {
        let text = self.get_mappings_text(version_id)?;
        parser.parse(&text)
    }

    /// URL of the `kind` download in the version data for `id`.
    fn download_url(
        &self,
        id: &VersionId,
        kind: &'static str,
        pick: impl FnOnce(&Downloads) -> Option<&Download>,
    ) -> Result<String> {
        let meta = self.get_version_data(id.as_str())?;
        pick(&meta.downloads)
            .map(|d| d.url.clone())
            .ok_or_else(|| FetchError::MissingDownload {
                version: id.to_string(),
                kind,
            })
    }

    // ------------------------------------------------------------------
    // Yarn
    // ------------------------------------------------------------------

    /// The whole yarn version index, fetched once and then read from disk.
    pub fn get_yarn_versions(&self) -> Result<Vec<YarnVersion>> {
        self.cached_json(&Artifact::YarnVersions, || {
            output::action("Downloading yarn versions...");
            Ok(self.config.yarn_versions_url.clone())
        })
    }

    /// First yarn record for `version_id`. `None` is a normal outcome.
    pub fn get_yarn_data(&self, version_id: &str) -> Result<Option<YarnVersion>> {
        let versions = self.get_yarn_versions()?;
        Ok(manifest::find_yarn(&versions, version_id))
    }

    // ------------------------------------------------------------------
    // Invalidation and status
    // ------------------------------------------------------------------

    /// Drop the cached manifest and yarn index, then pull both tool checkouts.
    ///
    /// Per-version data, jars and mappings are kept. The checkouts must
    /// already exist; a missing one fails as an external tool failure.
    pub fn clear_version_cache(&self) -> Result<()> {
        output::action("Clearing version cache...");
        for artifact in [Artifact::VersionManifest, Artifact::YarnVersions] {
            let path = self.layout.path(&artifact);
            if fs_utils::remove_if_exists(&path)? {
                output::detail(&format!("removed {}", path.display()));
            }
        }

        // Both checkouts are pulled even if the first fails.
        let burger = git::git_pull(&self.layout.path(&Artifact::Burger));
        let generator = git::git_pull(&self.layout.path(&Artifact::GeneratorMod));
        burger.and(generator)
    }

    /// Which artifacts relevant to `version_id` are currently on disk.
    pub fn status(&self, version_id: &str) -> Result<Vec<ArtifactStatus>> {
        let id = VersionId::parse(version_id)?;
        let artifacts = [Artifact::VersionManifest, Artifact::YarnVersions]
            .into_iter()
            .chain(Artifact::per_version(&id))
            .chain([Artifact::Burger, Artifact::GeneratorMod]);

        Ok(artifacts
            .map(|artifact| {
                let path = self.layout.path(&artifact);
                let meta = std::fs::metadata(&path).ok();
                ArtifactStatus {
                    present: meta.is_some(),
                    size: meta.filter(|m| m.is_file()).map(|m| m.len()),
                    artifact,
                    path,
                }
            })
            .collect())
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    /// Ensure `artifact` is on disk, running `fetch` under its lock if not.
    fn populate(
        &self,
        artifact: &Artifact,
        fetch: impl FnOnce(&Path) -> Result<()>,
    ) -> Result<PathBuf> {
        let path = self.layout.path(artifact);
        if path.exists() {
            return Ok(path);
        }

        let _lock = acquire_cache_lock(&self.layout.lock_path(artifact))?;
        if path.exists() {
            output::skip(&format!("{} populated by another process", artifact.file_name()));
            return Ok(path);
        }

        fetch(&path)?;
        Ok(path)
    }

    /// Fetch-or-load a JSON artifact. The body is validated as `T` before it
    /// is cached, then stored byte for byte.
    fn cached_json<T: DeserializeOwned>(
        &self,
        artifact: &Artifact,
        url: impl FnOnce() -> Result<String>,
    ) -> Result<T> {
        let path = self.populate(artifact, |path| {
            let url = url()?;
            let body = self.http.get_bytes(&url, &artifact.file_name())?;
            serde_json::from_slice::<T>(&body).map_err(|e| FetchError::json(&url, e))?;
            fs_utils::write_bytes(path, &body)
        })?;
        fs_utils::read_json(&path)
    }
}

fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FetchError::io(dir, e)),
    }
}
