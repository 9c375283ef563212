//! Sprite placement.
//!
//! A sprite draws a region of a shared texture at a logical `position`.
//! The `anchor` is a fraction of the scaled region (`(0, 0)` top-left,
//! `(0.5, 0.5)` middle, `(1, 1)` bottom-right) that lands exactly on
//! `position`, and is also the pivot for rotation.
//!
//! The destination rectangle is cached in the sprite and recomputed by every
//! setter that changes one of its inputs, so it never goes stale.

use std::rc::Rc;

use crate::color::Colour;
use crate::geometry::{Rect2, Vector2, Vector2i};
use crate::render::Flip;
use crate::texture::Texture;

/// Compute the on-screen destination rectangle of a sprite.
///
/// Returns `(Rect2::ZERO, false)` when there is no texture or the region
/// has no area; that is a "nothing to draw" state, not an error. Otherwise
/// the region size is scaled component-wise and the rectangle is moved so
/// the anchor point sits on `position`.
///
/// Negative scale is not a mirror: it yields a negative-size rectangle
/// with `ok == true`, which backends treat as empty. Use [`Flip`] to
/// mirror a sprite.
///
/// # Example
///
/// ```
/// use penguin_gfx::geometry::{Rect2, Vector2};
/// use penguin_gfx::sprite::update_screen_placement;
///
/// let (rect, ok) = update_screen_placement(
///     Rect2::from_xywh(0.0, 0.0, 100.0, 50.0),
///     Vector2::new(200.0, 300.0),
///     Vector2::new(2.0, 1.0),
///     Vector2::new(0.5, 0.5),
///     true,
/// );
/// assert!(ok);
/// assert_eq!(rect, Rect2::from_xywh(100.0, 275.0, 200.0, 50.0));
/// ```
#[must_use]
pub fn update_screen_placement(
    region: Rect2,
    position: Vector2,
    scale: Vector2,
    anchor_fraction: Vector2,
    has_texture: bool,
) -> (Rect2, bool) {
    if !has_texture {
        return (Rect2::ZERO, false);
    }

    let base_size = region.size;
    if base_size.x <= 0.0 || base_size.y <= 0.0 {
        return (Rect2::ZERO, false);
    }

    let scaled_size = base_size * scale;
    let anchor_offset = anchor_fraction * scaled_size;
    (Rect2::new(position - anchor_offset, scaled_size), true)
}

/// Pixel offset of the anchor from the top-left of `screen_placement`.
#[must_use]
pub fn compute_rotation_anchor(screen_placement: Rect2, anchor_fraction: Vector2) -> Vector2 {
    anchor_fraction * screen_placement.size
}

/// A textured quad with position, scale, anchor, rotation and tint.
#[derive(Debug, Clone)]
pub struct Sprite {
    texture: Option<Rc<Texture>>,
    texture_size: Vector2i,
    region: Rect2,
    position: Vector2,
    scale: Vector2,
    anchor: Vector2,
    angle: f64,
    tint: Option<Colour>,
    flip: Flip,
    visible: bool,
    screen_placement: Rect2,
    placement_ok: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

impl Sprite {
    /// Create a sprite without a texture. It draws nothing until one is set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            texture: None,
            texture_size: Vector2i::ZERO,
            region: Rect2::ZERO,
            position: Vector2::ZERO,
            scale: Vector2::ONE,
            anchor: Vector2::ZERO,
            angle: 0.0,
            tint: None,
            flip: Flip::empty(),
            visible: true,
            screen_placement: Rect2::ZERO,
            placement_ok: false,
        }
    }

    /// Create a sprite showing the whole of `texture`.
    #[must_use]
    pub fn with_texture(texture: Rc<Texture>) -> Self {
        let mut sprite = Self::new();
        sprite.set_texture(Some(texture));
        sprite
    }

    fn refresh(&mut self) {
        let (rect, ok) = update_screen_placement(
            self.region,
            self.position,
            self.scale,
            self.anchor,
            self.texture.is_some(),
        );
        self.screen_placement = rect;
        self.placement_ok = ok;
    }

    /// The texture, if any.
    #[must_use]
    pub fn texture(&self) -> Option<&Rc<Texture>> {
        self.texture.as_ref()
    }

    /// Replace the texture. The region is reset to cover the whole new
    /// texture (or nothing when cleared).
    pub fn set_texture(&mut self, texture: Option<Rc<Texture>>) {
        self.texture_size = texture.as_ref().map_or(Vector2i::ZERO, |t| t.size());
        self.region = Rect2::new(Vector2::ZERO, Vector2::from(self.texture_size));
        self.texture = texture;
        self.refresh();
    }

    /// Intrinsic size of the bound texture, zero without one.
    #[must_use]
    pub fn texture_size(&self) -> Vector2i {
        self.texture_size
    }

    /// Region of the texture that is drawn.
    #[must_use]
    pub fn region(&self) -> Rect2 {
        self.region
    }

    /// Select the region of the texture to draw, in texture pixels.
    pub fn set_region(&mut self, region: Rect2) {
        self.region = region;
        self.refresh();
    }

    /// Logical position of the anchor point.
    #[must_use]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// Move the anchor point to `position`.
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
        self.refresh();
    }

    /// Move by `delta`.
    pub fn translate(&mut self, delta: Vector2) {
        self.set_position(self.position + delta);
    }

    /// Scale applied to the region size.
    #[must_use]
    pub fn scale(&self) -> Vector2 {
        self.scale
    }

    /// Set the scale applied to the region size.
    ///
    /// Keep both components positive; mirror with [`Sprite::set_flip`].
    /// A negative component leaves a placement backends draw as empty.
    pub fn set_scale(&mut self, scale: Vector2) {
        self.scale = scale;
        self.refresh();
    }

    /// Anchor as a fraction of the scaled region.
    #[must_use]
    pub fn anchor(&self) -> Vector2 {
        self.anchor
    }

    /// Set the anchor; each component is clamped to `[0, 1]`.
    pub fn set_anchor(&mut self, anchor: Vector2) {
        self.anchor = Vector2::new(anchor.x.clamp(0.0, 1.0), anchor.y.clamp(0.0, 1.0));
        self.refresh();
    }

    /// Rotation in degrees, clockwise around the anchor.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Set the rotation in degrees.
    pub fn set_angle(&mut self, degrees: f64) {
        self.angle = degrees;
    }

    /// Add `degrees` to the rotation, wrapping into `[0, 360)`.
    pub fn rotate(&mut self, degrees: f64) {
        self.angle = (self.angle + degrees).rem_euclid(360.0);
    }

    /// Colour multiplied into the texture when drawn.
    #[must_use]
    pub fn tint(&self) -> Option<Colour> {
        self.tint
    }

    /// Set or clear the tint.
    pub fn set_tint(&mut self, tint: Option<Colour>) {
        self.tint = tint;
    }

    /// Mirroring applied when drawn.
    #[must_use]
    pub fn flip(&self) -> Flip {
        self.flip
    }

    /// Set the mirroring.
    pub fn set_flip(&mut self, flip: Flip) {
        self.flip = flip;
    }

    /// Whether the renderer draws this sprite.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the sprite.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Cached destination rectangle. Zero when there is nothing to draw.
    #[must_use]
    pub fn screen_placement(&self) -> Rect2 {
        self.screen_placement
    }

    /// Whether the current placement describes something drawable.
    #[must_use]
    pub fn has_placement(&self) -> bool {
        self.placement_ok
    }

    /// Rotation pivot in pixels from the top-left of the destination.
    #[must_use]
    pub fn rotation_anchor(&self) -> Vector2 {
        compute_rotation_anchor(self.screen_placement, self.anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextureId;

    fn texture(w: i32, h: i32) -> Rc<Texture> {
        Rc::new(Texture::new(TextureId::from_raw(1), Vector2i::new(w, h), None))
    }

    #[test]
    fn test_placement_without_texture() {
        let (rect, ok) = update_screen_placement(
            Rect2::from_xywh(0.0, 0.0, 10.0, 10.0),
            Vector2::new(5.0, 5.0),
            Vector2::ONE,
            Vector2::ZERO,
            false,
        );
        assert!(!ok);
        assert_eq!(rect, Rect2::ZERO);
    }

    #[test]
    fn test_placement_negative_region() {
        let (rect, ok) = update_screen_placement(
            Rect2::from_xywh(0.0, 0.0, -4.0, 10.0),
            Vector2::new(5.0, 5.0),
            Vector2::ONE,
            Vector2::ZERO,
            true,
        );
        assert!(!ok);
        assert_eq!(rect, Rect2::ZERO);
    }

    #[test]
    fn test_placement_top_left_anchor_keeps_position() {
        let (rect, ok) = update_screen_placement(
            Rect2::from_xywh(3.0, 3.0, 16.0, 8.0),
            Vector2::new(40.0, 50.0),
            Vector2::new(0.5, 2.0),
            Vector2::ZERO,
            true,
        );
        assert!(ok);
        assert_eq!(rect, Rect2::from_xywh(40.0, 50.0, 8.0, 16.0));
    }

    #[test]
    fn test_placement_negative_scale_is_not_normalised() {
        let (rect, ok) = update_screen_placement(
            Rect2::from_xywh(0.0, 0.0, 10.0, 4.0),
            Vector2::new(20.0, 20.0),
            Vector2::new(-2.0, 1.0),
            Vector2::ZERO,
            true,
        );
        assert!(ok);
        assert_eq!(rect, Rect2::from_xywh(20.0, 20.0, -20.0, 4.0));
    }

    #[test]
    fn test_rotation_anchor() {
        let rect = Rect2::from_xywh(100.0, 275.0, 200.0, 50.0);
        let pivot = compute_rotation_anchor(rect, Vector2::new(0.5, 0.5));
        assert_eq!(pivot, Vector2::new(100.0, 25.0));
    }

    #[test]
    fn test_sprite_without_texture_has_no_placement() {
        let mut sprite = Sprite::new();
        sprite.set_position(Vector2::new(10.0, 10.0));
        assert!(!sprite.has_placement());
        assert_eq!(sprite.screen_placement(), Rect2::ZERO);
        assert_eq!(sprite.position(), Vector2::new(10.0, 10.0));
    }

    #[test]
    fn test_sprite_full_texture_region() {
        let sprite = Sprite::with_texture(texture(32, 16));
        assert_eq!(sprite.texture_size(), Vector2i::new(32, 16));
        assert_eq!(sprite.region(), Rect2::from_xywh(0.0, 0.0, 32.0, 16.0));
        assert!(sprite.has_placement());
        assert_eq!(sprite.screen_placement(), Rect2::from_xywh(0.0, 0.0, 32.0, 16.0));
    }

    #[test]
    fn test_every_setter_refreshes_placement() {
        let mut sprite = Sprite::with_texture(texture(32, 16));

        sprite.set_position(Vector2::new(100.0, 100.0));
        assert_eq!(sprite.screen_placement().position, Vector2::new(100.0, 100.0));

        sprite.set_anchor(Vector2::new(0.5, 1.0));
        assert_eq!(sprite.screen_placement().position, Vector2::new(84.0, 84.0));

        sprite.set_scale(Vector2::new(2.0, 2.0));
        assert_eq!(sprite.screen_placement(), Rect2::from_xywh(68.0, 68.0, 64.0, 32.0));

        sprite.set_region(Rect2::from_xywh(0.0, 0.0, 8.0, 8.0));
        assert_eq!(sprite.screen_placement(), Rect2::from_xywh(92.0, 84.0, 16.0, 16.0));

        sprite.translate(Vector2::new(-10.0, 0.0));
        assert_eq!(sprite.screen_placement().position, Vector2::new(82.0, 84.0));
    }

    #[test]
    fn test_empty_region_collapses_and_recovers() {
        let mut sprite = Sprite::with_texture(texture(10, 10));
        sprite.set_position(Vector2::new(7.0, 7.0));
        sprite.set_scale(Vector2::new(3.0, 3.0));

        sprite.set_region(Rect2::from_xywh(0.0, 0.0, 0.0, 5.0));
        assert!(!sprite.has_placement());
        assert_eq!(sprite.screen_placement(), Rect2::ZERO);
        assert_eq!(sprite.position(), Vector2::new(7.0, 7.0));
        assert_eq!(sprite.scale(), Vector2::new(3.0, 3.0));

        sprite.set_region(Rect2::from_xywh(0.0, 0.0, 5.0, 5.0));
        assert!(sprite.has_placement());
        assert_eq!(sprite.screen_placement(), Rect2::from_xywh(7.0, 7.0, 15.0, 15.0));
    }

    #[test]
    fn test_clearing_texture() {
        let mut sprite = Sprite::with_texture(texture(10, 10));
        sprite.set_texture(None);
        assert!(sprite.texture().is_none());
        assert_eq!(sprite.texture_size(), Vector2i::ZERO);
        assert!(!sprite.has_placement());
    }

    #[test]
    fn test_anchor_is_clamped() {
        let mut sprite = Sprite::new();
        sprite.set_anchor(Vector2::new(-1.0, 4.0));
        assert_eq!(sprite.anchor(), Vector2::new(0.0, 1.0));
    }

    #[test]
    fn test_rotate_wraps() {
        let mut sprite = Sprite::new();
        sprite.rotate(350.0);
        sprite.rotate(20.0);
        assert!((sprite.angle() - 10.0).abs() < 1e-9);
        sprite.rotate(-20.0);
        assert!((sprite.angle() - 350.0).abs() < 1e-9);
    }
}
