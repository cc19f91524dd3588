//! `.strings` resource parsing
//!
//! Only entries of the form `"key" = "value";` are understood. Everything
//! else in the file (comments, blank lines, stray text) is ignored.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, error};

/// Key to localized string lookup built from one resource file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationMap {
    entries: HashMap<String, String>,
}

impl TranslationMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every `"key" = "value";` entry in `content`.
    ///
    /// Entries are applied in document order, so when a key appears more
    /// than once the last occurrence wins. Several entries may share a line.
    pub fn parse(content: &str) -> Self {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r#""([^"]+)"\s*=\s*"([^"]*)"\s*;"#).expect("well-formed regex")
        });

        let mut entries = HashMap::new();
        for captures in re.captures_iter(content) {
            entries.insert(captures[1].to_string(), captures[2].to_string());
        }
        Self { entries }
    }

    /// Look up a localized string
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Check whether a key is present (even with an empty value)
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read and parse a `.strings` file
pub fn read_translations<P: AsRef<Path>>(path: P) -> Result<TranslationMap> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let map = TranslationMap::parse(&content);
    debug!(path = %path.display(), entries = map.len(), "parsed translation file");
    Ok(map)
}

/// Like [`read_translations`], but logs a failure and yields an empty map.
pub fn load_translations<P: AsRef<Path>>(path: P) -> TranslationMap {
    let path = path.as_ref();
    read_translations(path).unwrap_or_else(|err| {
        error!(path = %path.display(), %err, "failed to parse translation file");
        TranslationMap::new()
    })
}
