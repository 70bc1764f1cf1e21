use crate::error::{LayoutError, LayoutResult};
use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Ordered supply of image references handed out at most once each.
///
/// The cursor is atomic, so several generators may draw from one pool
/// without receiving the same reference twice.
#[derive(Debug, Default)]
pub struct ImagePool {
    paths: Vec<String>,
    cursor: AtomicUsize,
}

impl ImagePool {
    pub fn from_paths(paths: Vec<String>) -> Self {
        Self {
            paths,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Image files directly inside `dir`, sorted by name.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        info!("image pool: {} images in {}", paths.len(), dir.display());
        Ok(Self::from_paths(
            paths
                .into_iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        ))
    }

    /// One path per line; blank lines and `#` comments are skipped.
    pub fn from_list_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let paths: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        info!("image pool: {} images listed in {}", paths.len(), path.display());
        Ok(Self::from_paths(paths))
    }

    /// Directory scan or list file, depending on what `path` is.
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_list_file(path)
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.paths
            .len()
            .saturating_sub(self.cursor.load(Ordering::Acquire))
    }

    pub fn next_image(&self) -> LayoutResult<String> {
        self.take(1).map(|mut batch| batch.remove(0))
    }

    /// The next `count` unused references, or `PoolDepleted` without
    /// consuming anything when fewer remain.
    pub fn take(&self, count: usize) -> LayoutResult<Vec<String>> {
        let total = self.paths.len();
        let start = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cursor| {
                (cursor + count <= total).then_some(cursor + count)
            })
            .map_err(|cursor| LayoutError::PoolDepleted {
                requested: count,
                remaining: total.saturating_sub(cursor),
            })?;
        Ok(self.paths[start..start + count].to_vec())
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
