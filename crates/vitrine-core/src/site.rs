//! Site catalog: navigation entries, page text and thumbnails.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::item::DisplayItem;
use crate::{Error, Result};

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub label: String,
    pub path: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPage {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteCatalog {
    /// Home page heading
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub navigation: Vec<NavigationItem>,
    #[serde(default)]
    pub thumbnails: Vec<DisplayItem>,
    #[serde(default)]
    pub action: ActionPage,
    /// Directory relative thumbnail sources are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

impl SiteCatalog {
    /// The catalog shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog file; relative sources resolve against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))?;
        let mut catalog = Self::from_toml_str(&content)?;
        if let Some(parent) = path.parent() {
            catalog.base_dir = parent.to_path_buf();
        }
        debug!(
            "Loaded catalog {}: {} pages, {} thumbnails",
            path.display(),
            catalog.navigation.len(),
            catalog.thumbnails.len()
        );
        Ok(catalog)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Self =
            toml::from_str(content).map_err(|e| Error::Catalog(e.to_string()))?;
        if catalog.navigation.is_empty() {
            return Err(Error::Catalog("catalog has no navigation entries".to_string()));
        }
        Ok(catalog)
    }

    /// Whether `item` is the page currently shown
    pub fn is_active(item: &NavigationItem, current_path: &str) -> bool {
        item.path == current_path
    }

    pub fn page_index(&self, path: &str) -> Option<usize> {
        self.navigation.iter().position(|item| item.path == path)
    }

    /// Filesystem location of a thumbnail's source. URLs and absolute
    /// paths are returned unchanged.
    pub fn resolve_source(&self, item: &DisplayItem) -> PathBuf {
        let source = Path::new(item.source());
        if source.is_absolute() || item.source().contains("://") {
            source.to_path_buf()
        } else {
            self.base_dir.join(source)
        }
    }
}
