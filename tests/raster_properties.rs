//! Property tests for the midpoint rasterizer.
//!
//! Run: cargo test --test raster_properties

#![allow(clippy::unwrap_used, missing_docs)]

use std::collections::HashSet;

use penguin_gfx::geometry::{Vector2, Vector2i};
use penguin_gfx::render::raster::{
    rasterize_circle_filled, rasterize_circle_outline, rasterize_ellipse_filled,
    rasterize_ellipse_outline, rasterize_triangle_filled, MAX_ELLIPSE_RADIUS,
};
use penguin_gfx::render::Span;
use proptest::prelude::*;

fn covered(spans: &[Span], point: Vector2i) -> bool {
    spans.iter().any(|s| s.contains(point))
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn radius_three_hits_axes_and_stays_near_circle() {
    let points = rasterize_circle_outline(Vector2::ZERO, 3);
    for axis in [(3, 0), (-3, 0), (0, 3), (0, -3)] {
        assert!(points.contains(&Vector2i::from(axis)), "missing {axis:?}");
    }
    for p in &points {
        let d2 = p.x * p.x + p.y * p.y;
        assert!((d2 - 9).abs() <= 1, "{p:?} has x^2+y^2 = {d2}");
    }
}

#[test]
fn radius_zero_is_single_pixel() {
    let center = Vector2::new(-4.0, 7.0);
    let points: HashSet<_> = rasterize_circle_outline(center, 0).into_iter().collect();
    assert_eq!(points, HashSet::from([Vector2i::new(-4, 7)]));

    let spans = rasterize_circle_filled(center, 0);
    assert_eq!(spans, vec![Span::new(7, -4, -4)]);
    assert_eq!(spans[0].len(), 1);
}

#[test]
fn triangle_covers_its_vertices() {
    let (a, b, c) = (Vector2::new(2.0, 1.0), Vector2::new(12.0, 5.0), Vector2::new(4.0, 11.0));
    let spans = rasterize_triangle_filled(a, b, c);
    for v in [a, b, c] {
        assert!(covered(&spans, v.round()), "vertex {v:?} not covered");
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every outline point has all eight octant mirrors in the output.
    #[test]
    fn prop_outline_eightfold_symmetry(
        cx in -500i32..500,
        cy in -500i32..500,
        radius in 1i32..200,
    ) {
        let center = Vector2::new(cx as f32, cy as f32);
        let points: HashSet<Vector2i> = rasterize_circle_outline(center, radius).into_iter().collect();

        for p in &points {
            let (dx, dy) = (p.x - cx, p.y - cy);
            for (mx, my) in [(dx, dy), (-dx, dy), (dx, -dy), (-dx, -dy), (dy, dx), (-dy, dx), (dy, -dx), (-dy, -dx)] {
                prop_assert!(points.contains(&Vector2i::new(cx + mx, cy + my)),
                    "({}, {}) has no mirror ({}, {})", dx, dy, mx, my);
            }
        }
    }

    /// The filled circle covers every outline pixel.
    #[test]
    fn prop_circle_filled_contains_outline(
        x in -100.0f32..100.0,
        y in -100.0f32..100.0,
        radius in 0i32..120,
    ) {
        let center = Vector2::new(x, y);
        let spans = rasterize_circle_filled(center, radius);
        for p in rasterize_circle_outline(center, radius) {
            prop_assert!(covered(&spans, p), "{:?} outside the fill", p);
        }
    }

    /// Outline pixels stay within one pixel of the true circle.
    #[test]
    fn prop_outline_near_radius(radius in 1i32..300) {
        for p in rasterize_circle_outline(Vector2::ZERO, radius) {
            let d = f64::from(p.x).hypot(f64::from(p.y));
            prop_assert!((d - f64::from(radius)).abs() <= 1.0, "{:?} at distance {}", p, d);
        }
    }

    /// A negative radius behaves like zero.
    #[test]
    fn prop_negative_radius_is_a_point(radius in -1000i32..0) {
        let points = rasterize_circle_outline(Vector2::ZERO, radius);
        prop_assert_eq!(points, vec![Vector2i::ZERO]);
    }

    /// Same input, same sequence.
    #[test]
    fn prop_deterministic(x in -50.0f32..50.0, y in -50.0f32..50.0, rx in 0i32..60, ry in 0i32..60) {
        let center = Vector2::new(x, y);
        prop_assert_eq!(rasterize_ellipse_outline(center, rx, ry), rasterize_ellipse_outline(center, rx, ry));
        prop_assert_eq!(rasterize_ellipse_filled(center, rx, ry), rasterize_ellipse_filled(center, rx, ry));
    }

    /// The filled ellipse covers every outline pixel.
    #[test]
    fn prop_ellipse_filled_contains_outline(
        cx in -100i32..100,
        cy in -100i32..100,
        rx in 0i32..80,
        ry in 0i32..80,
    ) {
        let center = Vector2::new(cx as f32, cy as f32);
        let spans = rasterize_ellipse_filled(center, rx, ry);
        for p in rasterize_ellipse_outline(center, rx, ry) {
            prop_assert!(covered(&spans, p), "{:?} outside the fill", p);
        }
    }

    /// Ellipse outline pixels never leave the bounding box.
    #[test]
    fn prop_ellipse_within_bounds(rx in 0i32..100, ry in 0i32..100) {
        for p in rasterize_ellipse_outline(Vector2::ZERO, rx, ry) {
            prop_assert!(p.x.abs() <= rx && p.y.abs() <= ry, "{:?} outside {}x{}", p, rx, ry);
        }
    }
}

// ============================================================================
// Far centers and huge radii
// ============================================================================

/// Inclusive range `base - reach..=base + reach`, saturated to `i32`.
fn saturated_range(base: i32, reach: i32) -> (i32, i32) {
    let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    (
        clamp(i64::from(base) - i64::from(reach)),
        clamp(i64::from(base) + i64::from(reach)),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_far_circle_stays_in_saturated_bounds(
        cx in -1.0e12f32..1.0e12,
        cy in -1.0e12f32..1.0e12,
        radius in 0i32..2000,
    ) {
        let center = Vector2::new(cx, cy);
        let c = center.round();
        let (x_lo, x_hi) = saturated_range(c.x, radius);
        let (y_lo, y_hi) = saturated_range(c.y, radius);

        for p in rasterize_circle_outline(center, radius) {
            prop_assert!((x_lo..=x_hi).contains(&p.x) && (y_lo..=y_hi).contains(&p.y));
        }
        for s in rasterize_circle_filled(center, radius) {
            prop_assert!(x_lo <= s.x_from && s.x_to <= x_hi);
            prop_assert!((y_lo..=y_hi).contains(&s.y));
        }
    }

    #[test]
    fn prop_huge_ellipse_is_clamped_and_bounded(
        cx in -1.0e12f32..1.0e12,
        cy in -1.0e12f32..1.0e12,
        rx in 0i32..=i32::MAX,
        ry in 0i32..=i32::MAX,
    ) {
        let center = Vector2::new(cx, cy);
        let c = center.round();
        let (x_lo, x_hi) = saturated_range(c.x, rx.min(MAX_ELLIPSE_RADIUS));
        let (y_lo, y_hi) = saturated_range(c.y, ry.min(MAX_ELLIPSE_RADIUS));

        for s in rasterize_ellipse_filled(center, rx, ry) {
            prop_assert!(x_lo <= s.x_from && s.x_to <= x_hi, "{s:?}");
            prop_assert!((y_lo..=y_hi).contains(&s.y), "{s:?}");
        }
    }
}
