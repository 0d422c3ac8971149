/// Texture loading and per-session caching
use image::RgbaImage;
use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Opaque handle to a texture owned by the rendering collaborator.
///
/// Handle 0 is the "no texture" sentinel: it is what a missing or
/// undecodable texture resolves to, and binding it means flat color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    pub const NONE: TextureHandle = TextureHandle(0);

    pub fn is_none(self) -> bool {
        self == TextureHandle::NONE
    }
}

/// Upload seam implemented by the external renderer.
///
/// `upload` receives a decoded RGBA image and is expected to create the
/// texture with linear min/mag filtering and edge-clamped wrap, returning
/// a nonzero handle. `release` gives a previously issued handle back.
pub trait TextureUpload {
    fn upload(&mut self, image: &RgbaImage) -> TextureHandle;
    fn release(&mut self, handle: TextureHandle);
}

/// Headless uploader issuing sequential handles without touching a GPU.
///
/// Used by tests and by the inspect binary, where decoding is still
/// exercised but nothing is rendered.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: u32,
    pub uploads: usize,
    pub released: usize,
}

impl HandleAllocator {
    pub fn new() -> Self {
        HandleAllocator::default()
    }
}

impl TextureUpload for HandleAllocator {
    fn upload(&mut self, _image: &RgbaImage) -> TextureHandle {
        self.next += 1;
        self.uploads += 1;
        TextureHandle(self.next)
    }

    fn release(&mut self, _handle: TextureHandle) {
        self.released += 1;
    }
}

/// Path-keyed texture cache scoped to one loading session.
///
/// Each distinct path is decoded and uploaded at most once; entries live
/// until `release_all`. The cache owns the uploader for the session so
/// that independently loaded models get independent caches.
pub struct TextureCache<U: TextureUpload> {
    uploader: U,
    entries: HashMap<PathBuf, TextureHandle>,
}

impl<U: TextureUpload> TextureCache<U> {
    pub fn new(uploader: U) -> Self {
        Self {
            uploader,
            entries: HashMap::new(),
        }
    }

    /// Resolve a texture path to a handle.
    ///
    /// A path that was resolved before in this session returns the cached
    /// handle. A missing or undecodable file is not fatal: it logs a
    /// warning and resolves to [`TextureHandle::NONE`], since most assets
    /// render acceptably with flat color.
    pub fn resolve(&mut self, path: &Path) -> TextureHandle {
        let key = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        if let Some(&handle) = self.entries.get(&key) {
            return handle;
        }

        if !path.exists() {
            warn!("texture file not found: {}", path.display());
            return TextureHandle::NONE;
        }

        let decoded = match image::open(path) {
            Ok(decoded) => decoded.to_rgba8(),
            Err(e) => {
                warn!("failed to decode texture {}: {}", path.display(), e);
                return TextureHandle::NONE;
            }
        };

        let handle = self.uploader.upload(&decoded);
        self.entries.insert(key, handle);
        info!(
            "loaded texture: {} ({}x{}, handle {})",
            path.display(),
            decoded.width(),
            decoded.height(),
            handle.0
        );

        handle
    }

    /// Release every handle issued during this session.
    pub fn release_all(&mut self) {
        for (_, handle) in self.entries.drain() {
            self.uploader.release(handle);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn uploader(&self) -> &U {
        &self.uploader
    }
}
