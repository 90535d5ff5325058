//! Synset → question category map.
//!
//! The map is an XML document listing, for each category, the synsets whose
//! hyponyms belong to it:
//!
//! ```xml
//! <map wn-version="3.0">
//!   <category name="LOCATION_CITY">
//!     <target offset="8524735" pos="n" words="city,metropolis"/>
//!   </category>
//! </map>
//! ```
//!
//! Targets with an empty offset are skipped. When an offset appears twice the
//! later category wins.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::SynsetId;
use super::error::{CategoryMapError, CategoryMapResult};

#[derive(Debug, Deserialize)]
struct MapDocument {
    #[serde(rename = "@wn-version", default)]
    version: Option<String>,
    #[serde(rename = "category", default)]
    categories: Vec<CategoryElement>,
}

#[derive(Debug, Deserialize)]
struct CategoryElement {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "target", default)]
    targets: Vec<TargetElement>,
}

#[derive(Debug, Deserialize)]
struct TargetElement {
    #[serde(rename = "@offset", default)]
    offset: String,
}

/// Read-only mapping from synset id to category label.
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    version: Option<String>,
    entries: HashMap<SynsetId, String>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a category map file.
    pub fn load(path: &Path) -> CategoryMapResult<Self> {
        let xml = std::fs::read_to_string(path).map_err(|e| CategoryMapError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let map = Self::from_xml_str(&xml)?;
        tracing::info!(
            path = %path.display(),
            entries = map.len(),
            version = map.version.as_deref().unwrap_or("unknown"),
            "loaded category map"
        );
        Ok(map)
    }

    /// Parse a category map document.
    pub fn from_xml_str(xml: &str) -> CategoryMapResult<Self> {
        let doc: MapDocument =
            quick_xml::de::from_str(xml).map_err(|e| CategoryMapError::Malformed {
                message: e.to_string(),
            })?;

        let mut map = Self {
            version: doc.version,
            entries: HashMap::new(),
        };
        for category in doc.categories {
            for target in &category.targets {
                let offset = target.offset.trim();
                if offset.is_empty() {
                    continue;
                }
                let id: u64 = offset.parse().map_err(|_| CategoryMapError::InvalidOffset {
                    category: category.name.clone(),
                    offset: offset.to_string(),
                })?;
                map.insert(SynsetId(id), category.name.clone());
            }
        }
        Ok(map)
    }

    pub fn insert(&mut self, id: SynsetId, label: impl Into<String>) {
        self.entries.insert(id, label.into());
    }

    pub fn get(&self, id: SynsetId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(u64, L)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (u64, L)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, label) in iter {
            map.insert(SynsetId(id), label);
        }
        map
    }
}
