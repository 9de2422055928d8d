use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode::{decode_image, rasterize_svg},
    foundation::error::{StampError, StampResult},
};

/// Resolves symbolic image identifiers to decoded rasters.
///
/// Returning `None` means "no image": callers treat it as an unavailable resource rather than
/// an error. Implementations must hand out images that are never mutated afterwards.
pub trait ImageSource {
    fn load_image(&mut self, id: &str) -> Option<Arc<image::DynamicImage>>;
}

/// Filesystem-backed source resolving ids as paths relative to `root`.
///
/// Files ending in `.svg` are rasterized at their intrinsic size; everything else goes through
/// the `image` decoders. Decoded images are cached per normalized id.
#[derive(Debug)]
pub struct FsImageSource {
    root: PathBuf,
    cache: HashMap<String, Arc<image::DynamicImage>>,
}

impl FsImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_uncached(&self, norm_path: &str) -> StampResult<image::DynamicImage> {
        let bytes = read_rel_bytes(&self.root, norm_path)?;
        if norm_path.to_ascii_lowercase().ends_with(".svg") {
            rasterize_svg(&bytes)
        } else {
            decode_image(&bytes)
        }
    }
}

impl ImageSource for FsImageSource {
    fn load_image(&mut self, id: &str) -> Option<Arc<image::DynamicImage>> {
        let norm_path = match normalize_rel_path(id) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(id, %err, "rejecting image id");
                return None;
            }
        };
        if let Some(img) = self.cache.get(&norm_path) {
            return Some(img.clone());
        }
        match self.load_uncached(&norm_path) {
            Ok(img) => {
                let img = Arc::new(img);
                self.cache.insert(norm_path, img.clone());
                Some(img)
            }
            Err(err) => {
                tracing::warn!(id, %err, "image unavailable");
                None
            }
        }
    }
}

/// In-memory id → image table.
#[derive(Debug, Default)]
pub struct MemoryImageSource {
    images: HashMap<String, Arc<image::DynamicImage>>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, image: image::DynamicImage) {
        self.images.insert(id.into(), Arc::new(image));
    }

    pub fn with(mut self, id: impl Into<String>, image: image::DynamicImage) -> Self {
        self.insert(id, image);
        self
    }
}

impl ImageSource for MemoryImageSource {
    fn load_image(&mut self, id: &str) -> Option<Arc<image::DynamicImage>> {
        self.images.get(id).cloned()
    }
}

/// Normalize and validate resource-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> StampResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(StampError::validation("resource paths must be relative"));
    }
    if s.is_empty() {
        return Err(StampError::validation("resource path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(StampError::validation(
                "resource paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(StampError::validation(
            "resource path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

pub(crate) fn read_rel_bytes(root: &Path, norm_path: &str) -> StampResult<Vec<u8>> {
    let path = root.join(Path::new(norm_path));
    std::fs::read(&path)
        .with_context(|| format!("read resource bytes from '{}'", path.display()))
        .map_err(StampError::from)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
