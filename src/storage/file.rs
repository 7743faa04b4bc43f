//! File-Backed Durable Tier
//!
//! Persists each cache entry as one JSON file in an XDG-compliant cache
//! directory (`~/.cache/marketcache/` on Linux). Cache keys contain `:` and
//! arbitrary query text, so key bytes hostile to filenames are escaped as
//! `%XX` hex; the escaping is deterministic and reversible so `keys()` can
//! report the original keys.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::debug;

use super::DurableTier;

// == File Tier ==
/// Durable tier storing one file per record under a cache directory.
#[derive(Debug, Clone)]
pub struct FileTier {
    /// Directory where record files live
    dir: PathBuf,
}

impl FileTier {
    /// Creates a tier rooted at the platform cache directory.
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn new() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", "marketcache")?;
        Some(Self {
            dir: dirs.cache_dir().to_path_buf(),
        })
    }

    /// Creates a tier rooted at a custom directory (tests, mostly).
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", escape_key(key)))
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }
}

impl DurableTier for FileTier {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&self, key: &str, value: &str) -> std::io::Result<()> {
        self.ensure_dir()?;
        fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) {
        if let Err(err) = fs::remove_file(self.path_for(key)) {
            if err.kind() != std::io::ErrorKind::NotFound {
                debug!(key, %err, "failed to remove durable record");
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| {
                let name = entry.ok()?.file_name().into_string().ok()?;
                let stem = name.strip_suffix(".json")?;
                unescape_key(stem)
            })
            .collect()
    }
}

// == Key Escaping ==
/// Escapes a key into a safe file stem: alphanumerics, `.`, `_` and `-`
/// pass through, everything else becomes `%XX` per byte.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

/// Reverses [`escape_key`]. Returns `None` for file names this tier did not
/// produce (stray files in the cache directory).
fn unescape_key(stem: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(stem.len());
    let mut chars = stem.bytes();
    while let Some(b) = chars.next() {
        if b == b'%' {
            let hi = chars.next()?;
            let lo = chars.next()?;
            let hex = [hi, lo];
            let hex = std::str::from_utf8(&hex).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
        } else {
            bytes.push(b);
        }
    }
    String::from_utf8(bytes).ok()
}
