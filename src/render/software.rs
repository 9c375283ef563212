//! Pure-Rust render backend drawing into a [`Framebuffer`].
//!
//! Geometry is snapped to whole pixels (coordinates are rounded), colours
//! with alpha below one are blended with the "over" operator, and textures
//! are sampled nearest-neighbour.

use std::collections::HashMap;

use crate::color::Colour;
use crate::error::{Error, Result};
use crate::framebuffer::{Framebuffer, Pixel};
use crate::geometry::{Rect2, Vector2, Vector2i};

use super::backend::{Flip, RenderBackend, TextureId};

#[derive(Debug)]
struct SoftTexture {
    pixels: Framebuffer,
    colour_mod: Colour,
}

/// A [`RenderBackend`] that rasterizes on the CPU.
///
/// # Example
///
/// ```
/// use penguin_gfx::prelude::*;
///
/// let mut backend = SoftwareBackend::new(64, 64).unwrap();
/// backend.set_draw_colour(Colour::RED).unwrap();
/// backend.fill_rect(Rect2::from_xywh(8.0, 8.0, 4.0, 4.0)).unwrap();
/// assert_eq!(backend.framebuffer().get_pixel(9, 9), Some([255, 0, 0, 255]));
/// ```
#[derive(Debug)]
pub struct SoftwareBackend {
    framebuffer: Framebuffer,
    draw_colour: Colour,
    textures: HashMap<TextureId, SoftTexture>,
    next_texture: u32,
}

impl SoftwareBackend {
    /// Create a backend with a transparent `width` x `height` output.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            framebuffer: Framebuffer::new(width, height)?,
            draw_colour: Colour::WHITE,
            textures: HashMap::new(),
            next_texture: 1,
        })
    }

    /// The output pixels.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Consume the backend, keeping only the output pixels.
    #[must_use]
    pub fn into_framebuffer(self) -> Framebuffer {
        self.framebuffer
    }

    /// The current draw colour.
    #[must_use]
    pub fn draw_colour(&self) -> Colour {
        self.draw_colour
    }

    /// Number of live textures.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Current colour modulation of a texture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTexture`] for an unknown handle.
    pub fn texture_colour_mod(&self, texture: TextureId) -> Result<Colour> {
        self.textures
            .get(&texture)
            .map(|t| t.colour_mod)
            .ok_or(Error::InvalidTexture(texture.0))
    }

    fn pixel(&self) -> Pixel {
        self.draw_colour.to_rgba8()
    }

    /// Pixel bounds `(left, top, right, bottom)` of a rect, right/bottom exclusive.
    fn pixel_bounds(rect: Rect2) -> (i64, i64, i64, i64) {
        (
            rect.position.x.round() as i64,
            rect.position.y.round() as i64,
            rect.right().round() as i64,
            rect.bottom().round() as i64,
        )
    }

    /// Clamp a column or row just outside `[0, limit)`, keeping off-screen
    /// values off-screen.
    fn clip(v: i64, limit: u32) -> i32 {
        v.clamp(-1, i64::from(limit)) as i32
    }

    /// Clip the segment to the framebuffer with Liang-Barsky. `None` when it
    /// misses the buffer entirely.
    fn clip_line(&self, from: Vector2i, to: Vector2i) -> Option<(Vector2i, Vector2i)> {
        let (w, h) = (self.framebuffer.width(), self.framebuffer.height());
        let on_screen = |p: Vector2i| p.x >= 0 && p.y >= 0 && (p.x as u32) < w && (p.y as u32) < h;
        if on_screen(from) && on_screen(to) {
            return Some((from, to));
        }

        let (x0, y0) = (f64::from(from.x), f64::from(from.y));
        let (dx, dy) = (f64::from(to.x) - x0, f64::from(to.y) - y0);
        let (max_x, max_y) = (f64::from(w) - 1.0, f64::from(h) - 1.0);
        let (mut t0, mut t1) = (0.0f64, 1.0f64);

        for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }

        let at = |t: f64| Vector2i::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
        Some((at(t0), at(t1)))
    }
}

/// Texel index at fraction `t` of the source run `start..start + len`.
///
/// The index stays within the texels the run touches, so sub-pixel runs
/// still map to one texel. `None` when that texel lies outside `0..limit`.
fn texel_index(start: f32, len: f32, t: f32, limit: u32) -> Option<u32> {
    let first = start.floor();
    let last = (start + len).ceil() - 1.0;
    let index = (start + t * len).floor().max(first).min(last);
    (index >= 0.0 && index < limit as f32).then_some(index as u32)
}

fn modulate(texel: Pixel, colour_mod: Colour) -> Pixel {
    if colour_mod == Colour::NO_TINT {
        return texel;
    }
    let scale = |v: u8, m: f32| (f32::from(v) * m).round() as u8;
    [
        scale(texel[0], colour_mod.r()),
        scale(texel[1], colour_mod.g()),
        scale(texel[2], colour_mod.b()),
        scale(texel[3], colour_mod.a()),
    ]
}

impl RenderBackend for SoftwareBackend {
    fn output_size(&self) -> Result<Vector2i> {
        Ok(Vector2i::new(
            self.framebuffer.width() as i32,
            self.framebuffer.height() as i32,
        ))
    }

    fn set_draw_colour(&mut self, colour: Colour) -> Result<()> {
        self.draw_colour = colour;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let pixel = self.pixel();
        self.framebuffer.clear(pixel);
        Ok(())
    }

    fn draw_point(&mut self, point: Vector2) -> Result<()> {
        let p = point.round();
        let pixel = self.pixel();
        self.framebuffer.fill_span(p.y, p.x, p.x, pixel, true);
        Ok(())
    }

    /// Bresenham's line algorithm between the rounded endpoints, clipped to
    /// the framebuffer first.
    fn draw_line(&mut self, from: Vector2, to: Vector2) -> Result<()> {
        let pixel = self.pixel();
        let (start, end) = (from.round(), to.round());

        if start.y == end.y {
            self.framebuffer.fill_span(start.y, start.x, end.x, pixel, true);
            return Ok(());
        }

        let Some((start, end)) = self.clip_line(start, end) else {
            return Ok(());
        };

        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        let sx = if start.x < end.x { 1 } else { -1 };
        let sy = if start.y < end.y { 1 } else { -1 };
        let mut err = dx + dy;

        let (mut x, mut y) = (start.x, start.y);

        loop {
            self.framebuffer.fill_span(y, x, x, pixel, true);

            if x == end.x && y == end.y {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }

        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect2) -> Result<()> {
        let (left, top, right, bottom) = Self::pixel_bounds(rect);
        if right <= left || bottom <= top {
            return Ok(());
        }
        let pixel = self.pixel();
        let (w, h) = (self.framebuffer.width(), self.framebuffer.height());
        let fb = &mut self.framebuffer;

        let (x0, x1) = (Self::clip(left, w), Self::clip(right - 1, w));
        fb.fill_span(Self::clip(top, h), x0, x1, pixel, true);
        if bottom - 1 > top {
            fb.fill_span(Self::clip(bottom - 1, h), x0, x1, pixel, true);
        }
        for y in (top + 1).max(0)..(bottom - 1).min(i64::from(h)) {
            fb.fill_span(y as i32, x0, x0, pixel, true);
            if right - 1 > left {
                fb.fill_span(y as i32, x1, x1, pixel, true);
            }
        }

        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect2) -> Result<()> {
        let (w, h) = (self.framebuffer.width(), self.framebuffer.height());
        let (left, top, right, bottom) = Self::pixel_bounds(rect);
        let (left, top) = (left.max(0), top.max(0));
        let (right, bottom) = (right.min(i64::from(w)), bottom.min(i64::from(h)));
        if right <= left || bottom <= top {
            return Ok(());
        }
        let pixel = self.pixel();
        self.framebuffer.fill_rect(
            left as i32,
            top as i32,
            (right - left) as u32,
            (bottom - top) as u32,
            pixel,
            true,
        );
        Ok(())
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureId> {
        let pixels = Framebuffer::from_rgba8(width, height, rgba)?;
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(
            id,
            SoftTexture {
                pixels,
                colour_mod: Colour::NO_TINT,
            },
        );
        Ok(id)
    }

    fn destroy_texture(&mut self, texture: TextureId) -> Result<()> {
        self.textures
            .remove(&texture)
            .map(|_| ())
            .ok_or(Error::InvalidTexture(texture.0))
    }

    fn texture_size(&self, texture: TextureId) -> Result<Vector2i> {
        self.textures
            .get(&texture)
            .map(|t| Vector2i::new(t.pixels.width() as i32, t.pixels.height() as i32))
            .ok_or(Error::InvalidTexture(texture.0))
    }

    fn set_texture_colour_mod(&mut self, texture: TextureId, colour: Colour) -> Result<()> {
        let tex = self
            .textures
            .get_mut(&texture)
            .ok_or(Error::InvalidTexture(texture.0))?;
        tex.colour_mod = colour;
        Ok(())
    }

    fn render_texture(
        &mut self,
        texture: TextureId,
        src: Option<Rect2>,
        dst: Option<Rect2>,
    ) -> Result<()> {
        self.render_texture_rotated(texture, src, dst, 0.0, None, Flip::empty())
    }

    /// Inverse-maps every output pixel in the rotated bounding box back into
    /// the source rectangle and samples the nearest texel.
    fn render_texture_rotated(
        &mut self,
        texture: TextureId,
        src: Option<Rect2>,
        dst: Option<Rect2>,
        angle: f64,
        center: Option<Vector2>,
        flip: Flip,
    ) -> Result<()> {
        let tex = self
            .textures
            .get(&texture)
            .ok_or(Error::InvalidTexture(texture.0))?;

        let full = Rect2::from_xywh(
            0.0,
            0.0,
            tex.pixels.width() as f32,
            tex.pixels.height() as f32,
        );
        // Parts of `src` outside the texture sample as transparent
        let src = src.unwrap_or(full);
        if src.intersection(&full).is_none() {
            return Ok(());
        }
        let (tex_w, tex_h) = (tex.pixels.width(), tex.pixels.height());

        let output = Rect2::from_xywh(
            0.0,
            0.0,
            self.framebuffer.width() as f32,
            self.framebuffer.height() as f32,
        );
        let dst = dst.unwrap_or(output);
        if dst.size.x <= 0.0 || dst.size.y <= 0.0 {
            return Ok(());
        }

        let angle = angle as f32;
        let pivot = dst.position + center.unwrap_or(dst.size / 2.0);
        let corners = [
            dst.position,
            Vector2::new(dst.right(), dst.position.y),
            Vector2::new(dst.position.x, dst.bottom()),
            Vector2::new(dst.right(), dst.bottom()),
        ]
        .map(|c| (c - pivot).rotated(angle) + pivot);

        let min_x = corners.iter().map(|c| c.x).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|c| c.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);

        let x0 = (min_x.floor() as i32).max(0);
        let y0 = (min_y.floor() as i32).max(0);
        let x1 = (max_x.ceil() as i32).min(self.framebuffer.width() as i32);
        let y1 = (max_y.ceil() as i32).min(self.framebuffer.height() as i32);

        for py in y0..y1 {
            for px in x0..x1 {
                let sample = Vector2::new(px as f32 + 0.5, py as f32 + 0.5);
                let local = (sample - pivot).rotated(-angle) + pivot;
                if !dst.contains(local) {
                    continue;
                }

                let mut u = (local.x - dst.position.x) / dst.size.x;
                let mut v = (local.y - dst.position.y) / dst.size.y;
                if flip.contains(Flip::HORIZONTAL) {
                    u = 1.0 - u;
                }
                if flip.contains(Flip::VERTICAL) {
                    v = 1.0 - v;
                }

                let (Some(sx), Some(sy)) = (
                    texel_index(src.position.x, src.size.x, u, tex_w),
                    texel_index(src.position.y, src.size.y, v, tex_h),
                ) else {
                    continue;
                };

                let Some(texel) = tex.pixels.get_pixel(sx, sy) else {
                    continue;
                };
                let texel = modulate(texel, tex.colour_mod);
                if texel[3] == 255 {
                    self.framebuffer.set_pixel(px as u32, py as u32, texel);
                } else if texel[3] > 0 {
                    self.framebuffer.blend_pixel(px as u32, py as u32, texel);
                }
            }
        }

        Ok(())
    }
}
