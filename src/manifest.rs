//! Wire types for the version manifest, version metadata and yarn index
//!
//! Only the fields the fetchers need are required; everything else is
//! optional so older or newer documents still load.

use serde::{Deserialize, Serialize};

/// Top-level index of all known game versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<LatestVersions>,
    pub versions: Vec<ManifestVersion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

/// One entry of [`VersionManifest::versions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestVersion {
    pub id: String,
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "releaseTime", default, skip_serializing_if = "Option::is_none")]
    pub release_time: Option<String>,
}

impl VersionManifest {
    /// First entry whose id equals `id`
    pub fn find(&self, id: &str) -> Option<&ManifestVersion> {
        self.versions.iter().find(|v| v.id == id)
    }
}

/// Per-version metadata document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub downloads: Downloads,
    /// Everything else in the document (libraries, assetIndex, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Downloads {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Download>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<Download>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_mappings: Option<Download>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_mappings: Option<Download>,
}

/// A download descriptor. `sha1` and `size` are carried, not verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Download {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// One record of the yarn version index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YarnVersion {
    #[serde(rename = "gameVersion")]
    pub game_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maven: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub stable: bool,
}

/// First yarn record for `game_version`, in index order.
pub fn find_yarn(versions: &[YarnVersion], game_version: &str) -> Option<YarnVersion> {
    versions
        .iter()
        .find(|v| v.game_version == game_version)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_minimal() {
        let manifest: VersionManifest = serde_json::from_str(
            r#"{"versions":[{"id":"1.20","url":"https://x/1.20.json"}]}"#,
        )
        .unwrap();
        assert!(manifest.latest.is_none());
        assert_eq!(manifest.find("1.20").unwrap().url, "https://x/1.20.json");
        assert!(manifest.find("1.19").is_none());
    }

    #[test]
    fn test_manifest_full_entry() {
        let manifest: VersionManifest = serde_json::from_str(
            r#"{
                "latest": {"release": "1.20.1", "snapshot": "23w31a"},
                "versions": [{
                    "id": "23w31a",
                    "type": "snapshot",
                    "url": "https://piston-meta.mojang.com/v1/packages/abc/23w31a.json",
                    "time": "2023-08-01T11:03:38+00:00",
                    "releaseTime": "2023-08-01T10:58:02+00:00",
                    "sha1": "abc",
                    "complianceLevel": 1
                }]
            }"#,
        )
        .unwrap();
        let v = &manifest.versions[0];
        assert_eq!(v.kind.as_deref(), Some("snapshot"));
        assert_eq!(manifest.latest.unwrap().snapshot, "23w31a");
    }

    #[test]
    fn test_metadata_keeps_unknown_fields() {
        let meta: VersionMetadata = serde_json::from_str(
            r#"{
                "id": "1.20",
                "downloads": {
                    "client": {"url": "https://x/client.jar", "sha1": "aa", "size": 3},
                    "client_mappings": {"url": "https://x/client.txt"}
                },
                "mainClass": "net.minecraft.client.main.Main"
            }"#,
        )
        .unwrap();
        assert_eq!(meta.downloads.client.as_ref().unwrap().size, Some(3));
        assert!(meta.downloads.server.is_none());
        assert_eq!(
            meta.extra.get("mainClass").and_then(|v| v.as_str()),
            Some("net.minecraft.client.main.Main")
        );
    }

    #[test]
    fn test_find_yarn_first_match() {
        let versions: Vec<YarnVersion> = serde_json::from_str(
            r#"[
                {"gameVersion":"1.20","separator":"+build.","build":2,"version":"1.20+build.2","stable":true},
                {"gameVersion":"1.20","separator":"+build.","build":1,"version":"1.20+build.1","stable":true}
            ]"#,
        )
        .unwrap();
        assert_eq!(find_yarn(&versions, "1.20").unwrap().build, Some(2));
        assert!(find_yarn(&versions, "1.19").is_none());
    }
}
