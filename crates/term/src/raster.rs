//! Line rasterizer for the dot framebuffer.

use crate::core::{Point2, Polyhedron, VERTEX_COUNT};
use crate::fb::DotBuffer;

/// Draw a segment between two dots, both ends inclusive.
///
/// Integer error-accumulator stepping, so the path from `a` to `b` visits the
/// same dots whichever axis dominates. Dots off the surface are skipped
/// individually; the rest of the segment is still drawn.
///
/// Stepping runs in `i64`, so any pair of `i32` endpoints is accepted.
/// Segments reaching far beyond the surface are first cut down to the
/// surface plus a one-dot margin, which keeps the walk proportional to the
/// surface size.
pub fn draw_line(fb: &mut DotBuffer, a: (i32, i32), b: (i32, i32)) {
    let w = fb.dot_width() as i64;
    let h = fb.dot_height() as i64;
    let (x0, y0) = (a.0 as i64, a.1 as i64);
    let (x1, y1) = (b.0 as i64, b.1 as i64);

    // Entirely past one edge.
    if (x0 < 0 && x1 < 0) || (x0 >= w && x1 >= w) || (y0 < 0 && y1 < 0) || (y0 >= h && y1 >= h) {
        return;
    }

    let reach = 2 * w.max(h);
    let far = |x: i64, y: i64| x < -reach || x > w + reach || y < -reach || y > h + reach;
    if far(x0, y0) || far(x1, y1) {
        if let Some((p, q)) = clip((x0, y0), (x1, y1), w, h) {
            step_line(fb, p, q);
        }
        return;
    }
    step_line(fb, (x0, y0), (x1, y1));
}

fn step_line(fb: &mut DotBuffer, (mut x0, mut y0): (i64, i64), (x1, y1): (i64, i64)) {
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        // Callers keep coordinates within a few surfaces of the origin.
        fb.set(x0 as i32, y0 as i32);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Liang-Barsky clip of a segment to `[-1, w] x [-1, h]`.
fn clip(a: (i64, i64), b: (i64, i64), w: i64, h: i64) -> Option<((i64, i64), (i64, i64))> {
    let (x0, y0) = (a.0 as f64, a.1 as f64);
    let dx = b.0 as f64 - x0;
    let dy = b.1 as f64 - y0;
    let (xmin, xmax) = (-1.0, w as f64);
    let (ymin, ymax) = (-1.0, h as f64);

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, x0 - xmin),
        (dx, xmax - x0),
        (-dy, y0 - ymin),
        (dy, ymax - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| ((x0 + t * dx).round() as i64, (y0 + t * dy).round() as i64);
    Some((at(t0), at(t1)))
}

/// Draw every edge of `mesh` between its projected vertices.
pub fn draw_wireframe(fb: &mut DotBuffer, mesh: &Polyhedron, points: &[Point2; VERTEX_COUNT]) {
    for &(a, b) in mesh.edges.iter() {
        draw_line(fb, to_dot(points[a]), to_dot(points[b]));
    }
}

/// Truncate toward zero; saturates far off-screen coordinates.
#[inline]
fn to_dot(p: Point2) -> (i32, i32) {
    (p.x as i32, p.y as i32)
}
