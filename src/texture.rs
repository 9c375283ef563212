//! Textures and the texture cache.
//!
//! A [`Texture`] is a backend handle plus its intrinsic size. Sprites hold
//! textures through `Rc` so one image can be shared by many sprites; the
//! [`TextureCache`] keys them by path so each file is decoded once.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::geometry::Vector2i;
use crate::render::{RenderBackend, TextureId};

/// A decoded image as tightly packed RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// Decode PNG data into RGBA8.
///
/// Palette, low bit depth and 16-bit images are normalised to 8-bit;
/// grayscale and RGB are expanded with an opaque alpha.
///
/// # Errors
///
/// Returns an error if the data is not a PNG the decoder understands.
pub fn decode_png<R: Read>(source: R) -> Result<DecodedImage> {
    let mut decoder = png::Decoder::new(source);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, u8::MAX]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(Error::UnsupportedPixelFormat(
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };

    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        rgba,
    })
}

/// Decode a PNG file into RGBA8.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn decode_png_file<P: AsRef<Path>>(path: P) -> Result<DecodedImage> {
    let file = File::open(path)?;
    decode_png(BufReader::new(file))
}

/// A texture living in a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    id: TextureId,
    size: Vector2i,
    path: Option<PathBuf>,
}

impl Texture {
    /// Wrap an existing backend texture.
    #[must_use]
    pub fn new(id: TextureId, size: Vector2i, path: Option<PathBuf>) -> Self {
        Self { id, size, path }
    }

    /// Upload a decoded image to `backend`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the texture.
    pub fn upload<B: RenderBackend + ?Sized>(
        backend: &mut B,
        image: &DecodedImage,
        path: Option<PathBuf>,
    ) -> Result<Self> {
        let id = backend.create_texture(image.width, image.height, &image.rgba)?;
        let size = backend.texture_size(id)?;
        Ok(Self { id, size, path })
    }

    /// Backend handle.
    #[must_use]
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Intrinsic size in pixels.
    #[must_use]
    pub fn size(&self) -> Vector2i {
        self.size
    }

    /// File the texture was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Loads PNG files into a backend once and hands out shared handles.
#[derive(Debug, Default)]
pub struct TextureCache {
    root: Option<PathBuf>,
    textures: HashMap<PathBuf, Rc<Texture>>,
}

impl TextureCache {
    /// Create an empty cache resolving paths against the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache resolving relative paths against `root`.
    #[must_use]
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: Some(root.into()),
            textures: HashMap::new(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Return the texture for `path`, decoding and uploading it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or the
    /// backend rejects it. Nothing is cached on failure.
    pub fn load<B, P>(&mut self, backend: &mut B, path: P) -> Result<Rc<Texture>>
    where
        B: RenderBackend + ?Sized,
        P: AsRef<Path>,
    {
        let path = self.resolve(path.as_ref());
        if let Some(texture) = self.textures.get(&path) {
            return Ok(Rc::clone(texture));
        }

        let image = decode_png_file(&path)?;
        let texture = Rc::new(Texture::upload(backend, &image, Some(path.clone()))?);
        log::debug!(
            "loaded texture {} ({}x{}) as {:?}",
            path.display(),
            image.width,
            image.height,
            texture.id()
        );
        self.textures.insert(path, Rc::clone(&texture));
        Ok(texture)
    }

    /// The cached texture for `path`, without loading.
    #[must_use]
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<Rc<Texture>> {
        self.textures.get(&self.resolve(path.as_ref())).cloned()
    }

    /// Whether `path` is cached.
    #[must_use]
    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        self.textures.contains_key(&self.resolve(path.as_ref()))
    }

    /// Drop `path` from the cache and destroy its backend texture.
    ///
    /// Sprites still holding the `Rc` keep a handle that the backend no
    /// longer recognises; drawing them reports an invalid texture.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to destroy the texture.
    pub fn unload<B, P>(&mut self, backend: &mut B, path: P) -> Result<bool>
    where
        B: RenderBackend + ?Sized,
        P: AsRef<Path>,
    {
        match self.textures.remove(&self.resolve(path.as_ref())) {
            Some(texture) => {
                backend.destroy_texture(texture.id())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Destroy every cached texture. Stops at the first backend failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to destroy a texture.
    pub fn clear<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) -> Result<()> {
        for (path, texture) in self.textures.drain() {
            log::trace!("destroying texture {}", path.display());
            backend.destroy_texture(texture.id())?;
        }
        Ok(())
    }

    /// Number of cached textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
