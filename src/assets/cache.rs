use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::Context;

use crate::assets::svg::{ImportedPath, SvgImportOptions, import_svg_file};
use crate::config::EngineConfig;
use crate::foundation::error::VecanimResult;

#[derive(Clone, Debug)]
struct CacheEntry {
    mtime: SystemTime,
    paths: Arc<Vec<ImportedPath>>,
}

/// Imported SVG paths keyed by canonical file path and modification time.
///
/// A path holds at most one entry; inserting a different modification time replaces it.
#[derive(Clone, Debug)]
pub struct SvgCache {
    config: EngineConfig,
    options: SvgImportOptions,
    entries: HashMap<PathBuf, CacheEntry>,
}

impl SvgCache {
    /// Empty cache importing with `config` and `options`.
    pub fn new(config: EngineConfig, options: SvgImportOptions) -> Self {
        Self {
            config,
            options,
            entries: HashMap::new(),
        }
    }

    /// Cached import for exactly this `(path, mtime)`.
    pub fn get(&self, path: &Path, mtime: SystemTime) -> Option<Arc<Vec<ImportedPath>>> {
        let entry = self.entries.get(path).filter(|e| e.mtime == mtime)?;
        tracing::trace!(path = %path.display(), "svg cache hit");
        Some(entry.paths.clone())
    }

    /// Store an import, replacing any entry for the same path.
    pub fn insert(
        &mut self,
        path: PathBuf,
        mtime: SystemTime,
        paths: Vec<ImportedPath>,
    ) -> Arc<Vec<ImportedPath>> {
        let paths = Arc::new(paths);
        let previous = self.entries.insert(
            path,
            CacheEntry {
                mtime,
                paths: paths.clone(),
            },
        );
        if previous.is_some_and(|p| p.mtime != mtime) {
            tracing::trace!("svg cache entry replaced by newer file");
        }
        paths
    }

    /// Import `path` unless an entry for its current modification time exists.
    pub fn get_or_import(
        &mut self,
        path: impl AsRef<Path>,
    ) -> VecanimResult<Arc<Vec<ImportedPath>>> {
        let path = path.as_ref();
        let canonical = path
            .canonicalize()
            .with_context(|| format!("resolve svg path '{}'", path.display()))?;
        let mtime = std::fs::metadata(&canonical)
            .and_then(|m| m.modified())
            .with_context(|| format!("stat svg file '{}'", canonical.display()))?;
        if let Some(hit) = self.get(&canonical, mtime) {
            return Ok(hit);
        }
        tracing::trace!(path = %canonical.display(), "svg cache miss");
        let paths = import_svg_file(&canonical, &self.config, self.options)?;
        Ok(self.insert(canonical, mtime, paths))
    }

    /// Drop the entry for `path`; returns whether one existed.
    pub fn evict(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
