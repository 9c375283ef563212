//! The drawing-surface boundary.
//!
//! A [`RenderBackend`] is an immediate-mode 2D surface: it holds a current
//! draw colour, draws points, lines and rectangles with it, and owns
//! textures addressed by [`TextureId`]. Every call reports success or a
//! descriptive [`Error`](crate::Error) instead of a global last-error string.

use bitflags::bitflags;

use crate::color::Colour;
use crate::error::Result;
use crate::geometry::{Rect2, Vector2, Vector2i};

/// Opaque handle to a texture owned by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub(crate) u32);

impl TextureId {
    /// Wrap a raw backend handle.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw backend handle.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

bitflags! {
    /// Mirroring applied when a texture is drawn.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flip: u8 {
        /// Mirror left-to-right.
        const HORIZONTAL = 1 << 0;
        /// Mirror top-to-bottom.
        const VERTICAL = 1 << 1;
    }
}

/// An immediate-mode drawing surface.
///
/// Calls execute in program order; later calls may depend on state set by
/// earlier ones (the draw colour, a texture's colour modulation).
pub trait RenderBackend {
    /// Size of the output in pixels.
    fn output_size(&self) -> Result<Vector2i>;

    /// Set the colour used by subsequent geometry draws and [`clear`](Self::clear).
    fn set_draw_colour(&mut self, colour: Colour) -> Result<()>;

    /// Fill the whole output with the draw colour.
    fn clear(&mut self) -> Result<()>;

    /// Draw a single point.
    fn draw_point(&mut self, point: Vector2) -> Result<()>;

    /// Draw several points. Stops at the first failure.
    fn draw_points(&mut self, points: &[Vector2]) -> Result<()> {
        points.iter().try_for_each(|p| self.draw_point(*p))
    }

    /// Draw a line including both endpoints.
    fn draw_line(&mut self, from: Vector2, to: Vector2) -> Result<()>;

    /// Draw the outline of a rectangle.
    fn draw_rect(&mut self, rect: Rect2) -> Result<()>;

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect2) -> Result<()>;

    /// Create a texture from tightly packed RGBA8 pixels.
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureId>;

    /// Release a texture. The handle is invalid afterwards.
    fn destroy_texture(&mut self, texture: TextureId) -> Result<()>;

    /// Intrinsic pixel size of a texture.
    fn texture_size(&self, texture: TextureId) -> Result<Vector2i>;

    /// Set the colour and alpha multiplied into a texture's pixels when drawn.
    fn set_texture_colour_mod(&mut self, texture: TextureId, colour: Colour) -> Result<()>;

    /// Draw `src` of a texture (whole texture if `None`) into `dst`
    /// (whole output if `None`).
    fn render_texture(
        &mut self,
        texture: TextureId,
        src: Option<Rect2>,
        dst: Option<Rect2>,
    ) -> Result<()>;

    /// Like [`render_texture`](Self::render_texture), rotated by `angle`
    /// degrees clockwise around `center` (relative to the top-left of
    /// `dst`; the middle of `dst` if `None`) and mirrored by `flip`.
    fn render_texture_rotated(
        &mut self,
        texture: TextureId,
        src: Option<Rect2>,
        dst: Option<Rect2>,
        angle: f64,
        center: Option<Vector2>,
        flip: Flip,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_id_raw() {
        let id = TextureId::from_raw(42);
        assert_eq!(id.raw(), 42);
    }

    #[test]
    fn test_flip_default_is_empty() {
        assert!(Flip::default().is_empty());
        let both = Flip::HORIZONTAL | Flip::VERTICAL;
        assert!(both.contains(Flip::VERTICAL));
    }
}
