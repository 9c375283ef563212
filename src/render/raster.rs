//! Midpoint rasterization of circles, ellipses and triangles.
//!
//! Every shape is walked with integer decision terms only; no trigonometry
//! and no allocation happens per pixel. The walkers hand each point or
//! [`Span`] to a callback as soon as it is produced. A callback error stops
//! the walk immediately and is returned unchanged, so a draw that fails
//! half-way never touches the remaining pixels.
//!
//! Output order follows the decision-term recurrence. It is deterministic
//! for fixed input but not sorted on either axis, and points on the
//! symmetry axes may be emitted more than once.
//!
//! The `rasterize_*` functions collect the same output into a `Vec` for
//! callers that want a sequence rather than a visitor.
//!
//! # References
//!
//! - Bresenham, J. E. (1977). "A linear algorithm for incremental digital
//!   display of circular arcs." *Communications of the ACM*, 20(2).
//! - Van Aken, J. R. (1984). "An Efficient Ellipse-Drawing Algorithm."
//!   *IEEE Computer Graphics and Applications*, 4(9).

use std::convert::Infallible;

use crate::geometry::{Vector2, Vector2i};

/// A horizontal run of pixels on row `y`, covering `x_from..=x_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Row.
    pub y: i32,
    /// First column (inclusive).
    pub x_from: i32,
    /// Last column (inclusive).
    pub x_to: i32,
}

impl Span {
    /// Create a span, ordering the endpoints so `x_from <= x_to`.
    #[must_use]
    pub fn new(y: i32, x0: i32, x1: i32) -> Self {
        Self {
            y,
            x_from: x0.min(x1),
            x_to: x0.max(x1),
        }
    }

    /// Number of pixels covered, saturating at `u32::MAX`.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.x_to.abs_diff(self.x_from).saturating_add(1)
    }

    /// Always `false`: a span covers at least its `x_from` pixel. Present
    /// so `len` reads like a collection length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a pixel lies on this span.
    #[must_use]
    pub fn contains(&self, point: Vector2i) -> bool {
        point.y == self.y && point.x >= self.x_from && point.x <= self.x_to
    }
}

/// Largest ellipse half-axis the walkers accept; larger radii are clamped.
///
/// Keeps every decision term of the two-region walk inside `i64`.
pub const MAX_ELLIPSE_RADIUS: i32 = 1 << 14;

/// `base + delta` saturated to the `i32` range.
fn offset_axis(base: i32, delta: i64) -> i32 {
    (i64::from(base) + delta).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn offset(c: Vector2i, dx: i64, dy: i64) -> Vector2i {
    Vector2i::new(offset_axis(c.x, dx), offset_axis(c.y, dy))
}

/// Row `c.y + dy` spanning `c.x - half..=c.x + half`.
fn span(c: Vector2i, dy: i64, half: i64) -> Span {
    Span::new(offset_axis(c.y, dy), offset_axis(c.x, -half), offset_axis(c.x, half))
}

/// Walk the outline of a circle.
///
/// `center` is rounded to the nearest pixel. A negative radius is treated
/// as zero, and a zero radius yields the single point `center`.
///
/// # Errors
///
/// Returns the first error produced by `plot`.
pub fn circle_outline<E, F>(center: Vector2, radius: i32, mut plot: F) -> Result<(), E>
where
    F: FnMut(Vector2i) -> Result<(), E>,
{
    let c = center.round();
    let radius = radius.max(0);
    if radius == 0 {
        return plot(c);
    }

    let mut x = i64::from(radius);
    let mut y = 0i64;
    let mut err = 1 - x;

    while x >= y {
        for (dx, dy) in [(x, y), (-x, y), (x, -y), (-x, -y), (y, x), (-y, x), (y, -x), (-y, -x)] {
            plot(offset(c, dx, dy))?;
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }

    Ok(())
}

/// Walk the interior of a circle as horizontal spans.
///
/// Each midpoint step yields four spans: the rows `±y` spanning `±x` and
/// the rows `±x` spanning `±y`. A zero radius yields one single-pixel span.
///
/// # Errors
///
/// Returns the first error produced by `fill`.
pub fn circle_filled<E, F>(center: Vector2, radius: i32, mut fill: F) -> Result<(), E>
where
    F: FnMut(Span) -> Result<(), E>,
{
    let c = center.round();
    let radius = radius.max(0);
    if radius == 0 {
        return fill(Span::new(c.y, c.x, c.x));
    }

    let mut x = i64::from(radius);
    let mut y = 0i64;
    let mut err = 1 - x;

    while x >= y {
        fill(span(c, y, x))?;
        fill(span(c, -y, x))?;
        fill(span(c, x, y))?;
        fill(span(c, -x, y))?;

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }

    Ok(())
}

/// Walk the two-region midpoint ellipse, calling `step(x, y)` for each
/// first-quadrant offset.
///
/// Region 1 steps `x` while the slope magnitude is below one, region 2
/// steps `y` down to zero. Decision terms are scaled by 4 so the classic
/// `1/4` and `(x + 1/2)^2` terms stay integral.
fn ellipse_quadrant<E, F>(radius_x: i64, radius_y: i64, mut step: F) -> Result<(), E>
where
    F: FnMut(i64, i64) -> Result<(), E>,
{
    let rx2 = radius_x * radius_x;
    let ry2 = radius_y * radius_y;

    let mut x = 0;
    let mut y = radius_y;
    let mut px = 0;
    let mut py = 2 * rx2 * y;

    // Region 1
    let mut p = 4 * ry2 - 4 * rx2 * radius_y + rx2;
    while px < py {
        step(x, y)?;
        x += 1;
        px += 2 * ry2;
        if p < 0 {
            p += 4 * (ry2 + px);
        } else {
            y -= 1;
            py -= 2 * rx2;
            p += 4 * (ry2 + px - py);
        }
    }

    // Region 2
    let mut p = ry2 * (2 * x + 1) * (2 * x + 1) + 4 * rx2 * (y - 1) * (y - 1) - 4 * rx2 * ry2;
    let mut reached = x;
    while y >= 0 {
        step(x, y)?;
        reached = x;
        y -= 1;
        py -= 2 * rx2;
        if p > 0 {
            p += 4 * (rx2 - py);
        } else {
            x += 1;
            px += 2 * ry2;
            p += 4 * (rx2 - py + px);
        }
    }

    // Very flat ellipses leave region 1 on the axis row short of the tip
    for x in reached + 1..=radius_x {
        step(x, 0)?;
    }

    Ok(())
}

/// Walk the outline of an axis-aligned ellipse.
///
/// Negative radii are treated as zero and radii above
/// [`MAX_ELLIPSE_RADIUS`] are clamped to it. A zero radius on one axis
/// degenerates to a line along the other axis; both zero yields the point
/// `center`.
///
/// # Errors
///
/// Returns the first error produced by `plot`.
pub fn ellipse_outline<E, F>(
    center: Vector2,
    radius_x: i32,
    radius_y: i32,
    mut plot: F,
) -> Result<(), E>
where
    F: FnMut(Vector2i) -> Result<(), E>,
{
    let c = center.round();
    let (rx, ry) = (
        radius_x.clamp(0, MAX_ELLIPSE_RADIUS),
        radius_y.clamp(0, MAX_ELLIPSE_RADIUS),
    );

    if rx == 0 {
        for dy in -i64::from(ry)..=i64::from(ry) {
            plot(offset(c, 0, dy))?;
        }
        return Ok(());
    }
    if ry == 0 {
        for dx in -i64::from(rx)..=i64::from(rx) {
            plot(offset(c, dx, 0))?;
        }
        return Ok(());
    }

    ellipse_quadrant(i64::from(rx), i64::from(ry), |x, y| {
        plot(offset(c, x, y))?;
        plot(offset(c, -x, y))?;
        plot(offset(c, x, -y))?;
        plot(offset(c, -x, -y))
    })
}

/// Walk the interior of an axis-aligned ellipse as horizontal spans.
///
/// Each step of the outline walk yields the full run between the mirrored
/// points on rows `c.y + y` and `c.y - y`. Degenerate radii behave as in
/// [`ellipse_outline`].
///
/// # Errors
///
/// Returns the first error produced by `fill`.
pub fn ellipse_filled<E, F>(
    center: Vector2,
    radius_x: i32,
    radius_y: i32,
    mut fill: F,
) -> Result<(), E>
where
    F: FnMut(Span) -> Result<(), E>,
{
    let c = center.round();
    let (rx, ry) = (
        radius_x.clamp(0, MAX_ELLIPSE_RADIUS),
        radius_y.clamp(0, MAX_ELLIPSE_RADIUS),
    );

    if rx == 0 {
        for dy in -i64::from(ry)..=i64::from(ry) {
            fill(span(c, dy, 0))?;
        }
        return Ok(());
    }
    if ry == 0 {
        return fill(span(c, 0, i64::from(rx)));
    }

    ellipse_quadrant(i64::from(rx), i64::from(ry), |x, y| {
        fill(span(c, y, x))?;
        fill(span(c, -y, x))
    })
}

/// Column where the edge `a -> b` crosses row `y`.
fn edge_x(a: Vector2i, b: Vector2i, y: i32) -> i32 {
    if a.y == b.y {
        return a.x;
    }
    let dx = i64::from(b.x) - i64::from(a.x);
    let t = dx * (i64::from(y) - i64::from(a.y)) / (i64::from(b.y) - i64::from(a.y));
    offset_axis(a.x, t)
}

/// Walk the interior of a triangle as one span per row.
///
/// Vertices are rounded to the nearest pixel. Collinear or coincident
/// vertices still produce the covering spans of the degenerate shape.
///
/// # Errors
///
/// Returns the first error produced by `fill`.
pub fn triangle_filled<E, F>(a: Vector2, b: Vector2, c: Vector2, mut fill: F) -> Result<(), E>
where
    F: FnMut(Span) -> Result<(), E>,
{
    let mut v = [a.round(), b.round(), c.round()];
    v.sort_by_key(|p| p.y);
    let [top, mid, bottom] = v;

    if top.y == bottom.y {
        let lo = top.x.min(mid.x).min(bottom.x);
        let hi = top.x.max(mid.x).max(bottom.x);
        return fill(Span::new(top.y, lo, hi));
    }

    for y in top.y..=bottom.y {
        let long = edge_x(top, bottom, y);
        let short = if y < mid.y {
            edge_x(top, mid, y)
        } else {
            edge_x(mid, bottom, y)
        };
        fill(Span::new(y, long, short))?;
    }

    Ok(())
}

fn unwrap_infallible(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Collect the outline of a circle. See [`circle_outline`].
#[must_use]
pub fn rasterize_circle_outline(center: Vector2, radius: i32) -> Vec<Vector2i> {
    let mut points = Vec::new();
    unwrap_infallible(circle_outline(center, radius, |p| {
        points.push(p);
        Ok(())
    }));
    points
}

/// Collect the spans of a filled circle. See [`circle_filled`].
#[must_use]
pub fn rasterize_circle_filled(center: Vector2, radius: i32) -> Vec<Span> {
    let mut spans = Vec::new();
    unwrap_infallible(circle_filled(center, radius, |s| {
        spans.push(s);
        Ok(())
    }));
    spans
}

/// Collect the outline of an ellipse. See [`ellipse_outline`].
#[must_use]
pub fn rasterize_ellipse_outline(center: Vector2, radius_x: i32, radius_y: i32) -> Vec<Vector2i> {
    let mut points = Vec::new();
    unwrap_infallible(ellipse_outline(center, radius_x, radius_y, |p| {
        points.push(p);
        Ok(())
    }));
    points
}

/// Collect the spans of a filled ellipse. See [`ellipse_filled`].
#[must_use]
pub fn rasterize_ellipse_filled(center: Vector2, radius_x: i32, radius_y: i32) -> Vec<Span> {
    let mut spans = Vec::new();
    unwrap_infallible(ellipse_filled(center, radius_x, radius_y, |s| {
        spans.push(s);
        Ok(())
    }));
    spans
}

/// Collect the spans of a filled triangle. See [`triangle_filled`].
#[must_use]
pub fn rasterize_triangle_filled(a: Vector2, b: Vector2, c: Vector2) -> Vec<Span> {
    let mut spans = Vec::new();
    unwrap_infallible(triangle_filled(a, b, c, |s| {
        spans.push(s);
        Ok(())
    }));
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn origin() -> Vector2 {
        Vector2::ZERO
    }

    #[test]
    fn test_circle_radius_three_axis_points() {
        let points: HashSet<_> = rasterize_circle_outline(origin(), 3).into_iter().collect();

        for p in [(3, 0), (-3, 0), (0, 3), (0, -3)] {
            assert!(points.contains(&Vector2i::from(p)), "missing {p:?}");
        }
        for p in &points {
            let d = p.x * p.x + p.y * p.y;
            assert!((d - 9).abs() <= 1, "{p:?} is too far from the circle");
        }
    }

    #[test]
    fn test_circle_zero_radius() {
        let c = Vector2::new(4.0, -2.0);
        assert_eq!(rasterize_circle_outline(c, 0), vec![Vector2i::new(4, -2)]);
        assert_eq!(rasterize_circle_filled(c, 0), vec![Span::new(-2, 4, 4)]);
    }

    #[test]
    fn test_negative_radius_clamps_to_point() {
        let c = Vector2::new(1.0, 1.0);
        assert_eq!(rasterize_circle_outline(c, -5), vec![Vector2i::new(1, 1)]);
        assert_eq!(rasterize_circle_filled(c, -5).len(), 1);
    }

    #[test]
    fn test_center_is_rounded() {
        let points = rasterize_circle_outline(Vector2::new(9.6, 10.4), 0);
        assert_eq!(points, vec![Vector2i::new(10, 10)]);
    }

    #[test]
    fn test_circle_deterministic() {
        let c = Vector2::new(12.3, -7.7);
        assert_eq!(rasterize_circle_outline(c, 17), rasterize_circle_outline(c, 17));
        assert_eq!(rasterize_circle_filled(c, 17), rasterize_circle_filled(c, 17));
    }

    #[test]
    fn test_circle_filled_covers_center_row() {
        let spans = rasterize_circle_filled(Vector2::new(10.0, 10.0), 5);
        assert!(spans.contains(&Span::new(10, 5, 15)));
        assert!(spans.iter().all(|s| s.y >= 5 && s.y <= 15));
    }

    #[test]
    fn test_fill_aborts_on_first_error() {
        let mut calls = 0;
        let result = circle_filled(origin(), 10, |_| {
            calls += 1;
            if calls == 3 {
                Err("backend failed")
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err("backend failed"));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_outline_aborts_on_first_error() {
        let mut calls = 0;
        let result: Result<(), ()> = ellipse_outline(origin(), 10, 4, |_| {
            calls += 1;
            Err(())
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_ellipse_extremes() {
        let points: HashSet<_> =
            rasterize_ellipse_outline(origin(), 8, 3).into_iter().collect();
        for p in [(8, 0), (-8, 0), (0, 3), (0, -3)] {
            assert!(points.contains(&Vector2i::from(p)), "missing {p:?}");
        }
        assert!(points.iter().all(|p| p.x.abs() <= 8 && p.y.abs() <= 3));
    }

    #[test]
    fn test_ellipse_equal_radii_close_to_circle() {
        for p in rasterize_ellipse_outline(origin(), 10, 10) {
            let d = f64::from(p.x * p.x + p.y * p.y).sqrt();
            assert!((d - 10.0).abs() <= 1.0, "{p:?} strays from radius 10");
        }
    }

    #[test]
    fn test_far_center_saturates() {
        let points = rasterize_circle_outline(Vector2::new(3.0e9, 0.0), 5);
        assert!(points.iter().all(|p| p.x >= i32::MAX - 5));
        assert!(points.contains(&Vector2i::new(i32::MAX, 5)));

        let spans = rasterize_circle_filled(Vector2::new(-3.0e9, -3.0e9), 2);
        assert!(spans.iter().all(|s| s.y <= i32::MIN + 2 && s.x_from == i32::MIN));
    }

    #[test]
    fn test_huge_radius_walk_can_stop() {
        let mut seen = 0;
        let result = circle_outline(Vector2::ZERO, i32::MAX, |_| {
            seen += 1;
            if seen == 16 {
                Err("enough")
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err("enough"));
    }

    #[test]
    fn test_ellipse_radius_is_capped() {
        let mut widest = 0;
        ellipse_filled::<(), _>(Vector2::ZERO, i32::MAX, i32::MAX, |s| {
            widest = widest.max(s.x_to);
            Ok(())
        })
        .unwrap();
        assert_eq!(widest, MAX_ELLIPSE_RADIUS);
    }

    #[test]
    fn test_span_len_saturates() {
        assert_eq!(Span::new(0, i32::MIN, i32::MAX).len(), u32::MAX);
    }

    #[test]
    fn test_flat_ellipse_reaches_tips() {
        let points = rasterize_ellipse_outline(Vector2::ZERO, 80, 1);
        assert!(points.contains(&Vector2i::new(80, 0)));
        assert!(points.contains(&Vector2i::new(-80, 0)));
        assert!(points.iter().all(|p| p.x.abs() <= 80 && p.y.abs() <= 1));

        let spans = rasterize_ellipse_filled(Vector2::ZERO, 80, 1);
        assert!(spans.contains(&Span::new(0, -80, 80)));
    }

    #[test]
    fn test_ellipse_degenerate_radii() {
        let vertical = rasterize_ellipse_outline(origin(), 0, 2);
        assert_eq!(vertical.len(), 5);
        assert!(vertical.iter().all(|p| p.x == 0));

        let horizontal = rasterize_ellipse_outline(origin(), 3, 0);
        assert_eq!(horizontal.len(), 7);
        assert!(horizontal.iter().all(|p| p.y == 0));

        assert_eq!(rasterize_ellipse_outline(origin(), 0, 0), vec![Vector2i::ZERO]);
        assert_eq!(rasterize_ellipse_filled(origin(), 3, 0), vec![Span::new(0, -3, 3)]);
        assert_eq!(rasterize_ellipse_filled(origin(), 0, 1).len(), 3);
    }

    #[test]
    fn test_ellipse_filled_widest_row() {
        let spans = rasterize_ellipse_filled(Vector2::new(20.0, 20.0), 6, 2);
        assert!(spans.contains(&Span::new(20, 14, 26)));
        assert!(spans.iter().all(|s| (s.y - 20).abs() <= 2));
    }

    #[test]
    fn test_triangle_rows() {
        let spans = rasterize_triangle_filled(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(0.0, 10.0),
        );
        assert_eq!(spans.len(), 11);
        assert_eq!(spans[0], Span::new(0, 0, 0));
        assert_eq!(spans[10], Span::new(10, 0, 10));
        assert_eq!(spans[5], Span::new(5, 0, 5));
    }

    #[test]
    fn test_triangle_flat() {
        let spans = rasterize_triangle_filled(
            Vector2::new(5.0, 3.0),
            Vector2::new(-2.0, 3.0),
            Vector2::new(1.0, 3.0),
        );
        assert_eq!(spans, vec![Span::new(3, -2, 5)]);
    }

    #[test]
    fn test_span_helpers() {
        let s = Span::new(4, 9, 2);
        assert_eq!(s.x_from, 2);
        assert_eq!(s.x_to, 9);
        assert_eq!(s.len(), 8);
        assert!(!s.is_empty());
        assert!(s.contains(Vector2i::new(2, 4)));
        assert!(!s.contains(Vector2i::new(10, 4)));
        assert!(!s.contains(Vector2i::new(5, 5)));
    }
}
