//! Test fixtures - manifest, metadata and index documents.

#![allow(dead_code)]

use serde_json::{Value, json};

/// Version manifest listing `ids`, each resolving to `{base}/{id}.json`.
pub fn manifest(base: &str, ids: &[&str]) -> Value {
    let versions: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "id": id, "url": format!("{}/meta/{}.json", base, id) }))
        .collect();
    json!({
        "latest": { "release": ids.first().copied().unwrap_or(""), "snapshot": "" },
        "versions": versions,
    })
}

/// Version metadata with client, server and client mapping downloads.
pub fn version_data(base: &str, id: &str) -> Value {
    json!({
        "id": id,
        "downloads": {
            "client": { "url": format!("{}/objects/client-{}.jar", base, id), "size": 10 },
            "server": { "url": format!("{}/objects/server-{}.jar", base, id) },
            "client_mappings": { "url": format!("{}/objects/client-{}.txt", base, id) },
        },
        "mainClass": "net.minecraft.client.main.Main",
    })
}

/// Version metadata with only a client download (old versions have no server jar).
pub fn client_only_data(base: &str, id: &str) -> Value {
    json!({
        "id": id,
        "downloads": {
            "client": { "url": format!("{}/objects/client-{}.jar", base, id) },
        },
    })
}

pub fn yarn_versions() -> Value {
    json!([
        {
            "gameVersion": "1.20",
            "separator": "+build.",
            "build": 1,
            "maven": "net.fabricmc:yarn:1.20+build.1",
            "version": "1.20+build.1",
            "stable": true
        },
        {
            "gameVersion": "23w31a",
            "separator": "+build.",
            "build": 3,
            "maven": "net.fabricmc:yarn:23w31a+build.3",
            "version": "23w31a+build.3",
            "stable": false
        }
    ])
}

pub const MAPPINGS: &str = "\
# {\"id\":\"sourceFile\",\"fileName\":\"Util.java\"}
net.minecraft.Util -> ad:
    int MAX_LENGTH -> a
    12:14:java.lang.String getName(int):56:58 -> b
net.minecraft.client.Minecraft -> enn:
    enn instance -> F
";
