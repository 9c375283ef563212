//! Composite drawing on top of a [`RenderBackend`].
//!
//! Every composite draw is a sequence of backend calls. The sequence stops
//! at the first failing call and that error is returned; the calls already
//! made are not undone. The one exception is a tinted texture draw, which
//! always attempts to restore the texture's colour modulation so a failure
//! never leaves a tint behind on a shared texture.

use crate::color::Colour;
use crate::error::Result;
use crate::geometry::{Circle2, Rect2, Vector2, Vector2i};
use crate::sprite::Sprite;
use crate::texture::Texture;

use super::backend::{Flip, RenderBackend, TextureId};
use super::raster::{self, Span};

/// Whether shapes are stroked or filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// Only the boundary.
    #[default]
    Outline,
    /// Boundary and interior.
    Filled,
}

/// Where and how a texture is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextureDraw {
    /// Source region of the texture; the whole texture if `None`.
    pub src: Option<Rect2>,
    /// Destination on the output; the whole output if `None`.
    pub dst: Option<Rect2>,
    /// Clockwise rotation in degrees.
    pub angle: f64,
    /// Rotation pivot relative to the top-left of `dst`.
    pub center: Option<Vector2>,
    /// Mirroring.
    pub flip: Flip,
}

fn warn_on_err<T>(what: &str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        log::warn!("{what} failed: {err}");
    }
    result
}

/// Draws shapes, textures and sprites through a backend.
#[derive(Debug)]
pub struct Renderer<B: RenderBackend> {
    backend: B,
}

impl<B: RenderBackend> Renderer<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The wrapped backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Unwrap the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Output size in pixels.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    pub fn output_size(&self) -> Result<Vector2i> {
        self.backend.output_size()
    }

    /// Fill the output with `colour`.
    ///
    /// # Errors
    ///
    /// Returns the first backend error.
    pub fn clear(&mut self, colour: Colour) -> Result<()> {
        let result = self
            .backend
            .set_draw_colour(colour)
            .and_then(|()| self.backend.clear());
        warn_on_err("clear", result)
    }

    /// Draw a single point.
    ///
    /// # Errors
    ///
    /// Returns the first backend error.
    pub fn draw_point(&mut self, point: Vector2, colour: Colour) -> Result<()> {
        let result = self
            .backend
            .set_draw_colour(colour)
            .and_then(|()| self.backend.draw_point(point));
        warn_on_err("draw_point", result)
    }

    /// Draw a line including both endpoints.
    ///
    /// # Errors
    ///
    /// Returns the first backend error.
    pub fn draw_line(&mut self, from: Vector2, to: Vector2, colour: Colour) -> Result<()> {
        let result = self
            .backend
            .set_draw_colour(colour)
            .and_then(|()| self.backend.draw_line(from, to));
        warn_on_err("draw_line", result)
    }

    /// Draw a rectangle.
    ///
    /// # Errors
    ///
    /// Returns the first backend error.
    pub fn draw_rect(&mut self, rect: Rect2, colour: Colour, mode: DrawMode) -> Result<()> {
        let result = self.backend.set_draw_colour(colour).and_then(|()| match mode {
            DrawMode::Outline => self.backend.draw_rect(rect),
            DrawMode::Filled => self.backend.fill_rect(rect),
        });
        warn_on_err("draw_rect", result)
    }

    /// Draw a triangle.
    ///
    /// # Errors
    ///
    /// Returns the first backend error.
    pub fn draw_triangle(
        &mut self,
        a: Vector2,
        b: Vector2,
        c: Vector2,
        colour: Colour,
        mode: DrawMode,
    ) -> Result<()> {
        let result = self.backend.set_draw_colour(colour).and_then(|()| match mode {
            DrawMode::Outline => [(a, b), (b, c), (c, a)]
                .into_iter()
                .try_for_each(|(from, to)| self.backend.draw_line(from, to)),
            DrawMode::Filled => {
                raster::triangle_filled(a, b, c, |span| draw_span(&mut self.backend, span))
            }
        });
        warn_on_err("draw_triangle", result)
    }

    /// Draw a circle. The radius is rounded to whole pixels and the center
    /// to the nearest pixel.
    ///
    /// # Errors
    ///
    /// Returns the first backend error; later points or spans are skipped.
    pub fn draw_circle(&mut self, circle: Circle2, colour: Colour, mode: DrawMode) -> Result<()> {
        let radius = circle.radius.round() as i32;
        let result = self.backend.set_draw_colour(colour).and_then(|()| match mode {
            DrawMode::Outline => raster::circle_outline(circle.center, radius, |p| {
                self.backend.draw_point(Vector2::from(p))
            }),
            DrawMode::Filled => raster::circle_filled(circle.center, radius, |span| {
                draw_span(&mut self.backend, span)
            }),
        });
        warn_on_err("draw_circle", result)
    }

    /// Draw an axis-aligned ellipse with half-axes `radii`.
    ///
    /// # Errors
    ///
    /// Returns the first backend error; later points or spans are skipped.
    pub fn draw_ellipse(
        &mut self,
        center: Vector2,
        radii: Vector2,
        colour: Colour,
        mode: DrawMode,
    ) -> Result<()> {
        let rx = radii.x.round() as i32;
        let ry = radii.y.round() as i32;
        let result = self.backend.set_draw_colour(colour).and_then(|()| match mode {
            DrawMode::Outline => raster::ellipse_outline(center, rx, ry, |p| {
                self.backend.draw_point(Vector2::from(p))
            }),
            DrawMode::Filled => raster::ellipse_filled(center, rx, ry, |span| {
                draw_span(&mut self.backend, span)
            }),
        });
        warn_on_err("draw_ellipse", result)
    }

    /// Draw a texture without tint.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    pub fn draw_texture(&mut self, texture: &Texture, draw: TextureDraw) -> Result<()> {
        let result = render(&mut self.backend, texture.id(), draw);
        warn_on_err("draw_texture", result)
    }

    /// Draw a texture with `tint` multiplied into its pixels.
    ///
    /// The modulation is reset to [`Colour::NO_TINT`] afterwards even when
    /// setting it or drawing failed; the first error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first failure among setting the tint, drawing and
    /// resetting the tint.
    pub fn draw_texture_tinted(
        &mut self,
        texture: &Texture,
        tint: Colour,
        draw: TextureDraw,
    ) -> Result<()> {
        let id = texture.id();
        let drawn = self
            .backend
            .set_texture_colour_mod(id, tint)
            .and_then(|()| render(&mut self.backend, id, draw));
        let reset = self.backend.set_texture_colour_mod(id, Colour::NO_TINT);
        warn_on_err("draw_texture_tinted", drawn.and(reset))
    }

    /// Draw a sprite at its cached screen placement.
    ///
    /// Hidden sprites and sprites with nothing to draw are skipped without
    /// error.
    ///
    /// # Errors
    ///
    /// Propagates the backend error.
    pub fn draw_sprite(&mut self, sprite: &Sprite) -> Result<()> {
        if !sprite.is_visible() {
            return Ok(());
        }
        let Some(texture) = sprite.texture().filter(|_| sprite.has_placement()) else {
            log::trace!("sprite at {:?} has nothing to draw", sprite.position());
            return Ok(());
        };

        let draw = TextureDraw {
            src: Some(sprite.region()),
            dst: Some(sprite.screen_placement()),
            angle: sprite.angle(),
            center: Some(sprite.rotation_anchor()),
            flip: sprite.flip(),
        };
        match sprite.tint() {
            Some(tint) => self.draw_texture_tinted(texture, tint, draw),
            None => self.draw_texture(texture, draw),
        }
    }
}

fn draw_span<B: RenderBackend>(backend: &mut B, span: Span) -> Result<()> {
    let y = span.y as f32;
    backend.draw_line(
        Vector2::new(span.x_from as f32, y),
        Vector2::new(span.x_to as f32, y),
    )
}

#[allow(clippy::float_cmp)]
fn render<B: RenderBackend>(backend: &mut B, id: TextureId, draw: TextureDraw) -> Result<()> {
    if draw.angle == 0.0 && draw.flip.is_empty() {
        backend.render_texture(id, draw.src, draw.dst)
    } else {
        backend.render_texture_rotated(id, draw.src, draw.dst, draw.angle, draw.center, draw.flip)
    }
}
