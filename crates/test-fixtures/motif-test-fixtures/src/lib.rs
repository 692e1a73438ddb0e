use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    /// Animation text files.
    animations: HashMap<String, String>,
    /// Stored-animation JSON documents.
    stored: HashMap<String, String>,
    /// Expected canonical text, keyed like `animations`.
    #[serde(default)]
    canonical: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

fn sorted_keys(map: &HashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

pub mod animations {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.animations)
    }

    pub fn text(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.animations, "animation", name)?;
        read_to_string(rel)
    }

    /// Expected canonical rendering of animation `name`, if one is recorded.
    pub fn canonical(name: &str) -> Result<Option<String>> {
        match MANIFEST.canonical.get(name) {
            Some(rel) => read_to_string(rel).map(|s| Some(s.trim_end().to_string())),
            None => Ok(None),
        }
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.animations, "animation", name)?;
        Ok(resolve_path(rel))
    }
}

pub mod stored {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.stored)
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.stored, "stored animation", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.stored, "stored animation", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.stored, "stored animation", name)?;
        Ok(resolve_path(rel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_resolves() {
        for name in animations::keys() {
            assert!(animations::path(&name).unwrap().exists(), "{name}");
            animations::text(&name).unwrap();
        }
        for name in stored::keys() {
            let value: serde_json::Value = stored::load(&name).unwrap();
            assert!(value.get("shapes").is_some(), "{name}");
        }
    }

    #[test]
    fn unknown_names_error() {
        assert!(animations::text("does-not-exist").is_err());
        assert!(stored::json("does-not-exist").is_err());
    }
}
