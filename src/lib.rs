//! Cache-backed fetcher for the artifacts a protocol code generator needs
//!
//! Given a game version id, the cache resolves metadata from the remote
//! version manifest, downloads whatever is not on disk yet, and keeps it under
//! one cache root so repeated runs stay off the network.
//!
//! # Example
//!
//! ```no_run
//! use mc_artifacts::{ArtifactCache, Config, ProguardParser};
//!
//! # fn main() -> Result<(), mc_artifacts::FetchError> {
//! let cache = ArtifactCache::new(Config::new("downloads"))?;
//! let jar = cache.get_client_jar("1.20.1")?;
//! let mappings = cache.get_mappings_for_version("1.20.1", &ProguardParser)?;
//! println!("{} ({} classes)", jar.display(), mappings.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Cache layout
//!
//! | File                         | Contents                          |
//! |------------------------------|-----------------------------------|
//! | `version_manifest.json`      | version manifest                  |
//! | `yarn_versions.json`         | yarn version index                |
//! | `{id}.json`                  | per-version metadata              |
//! | `client-{id}.jar`            | client jar                        |
//! | `server-{id}.jar`            | server jar                        |
//! | `mappings-{id}.txt`          | client obfuscation mappings       |
//! | `Burger/`                    | Burger checkout                   |
//! | `minecraft-data-generator-server/` | data generator checkout     |
//!
//! Only [`ArtifactCache::clear_version_cache`] removes anything, and only the
//! manifest and yarn index.

mod cache;
pub mod core;
pub mod helpers;
pub mod manifest;
pub mod mappings;

pub use cache::{ArtifactCache, ArtifactStatus};
pub use crate::core::config::Config;
pub use crate::core::error::FetchError;
pub use crate::core::layout::{Artifact, CacheLayout, VersionId};
pub use crate::core::output;
pub use manifest::{VersionManifest, VersionMetadata, YarnVersion};
pub use mappings::{MappingParser, ProguardMappings, ProguardParser};
