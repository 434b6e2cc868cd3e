/// Scanline triangle fill with a depth-tinted intensity and priority test
use crate::error::RenderError;
use crate::framebuffer::PixelBuffer;
use crate::projection::ProjectedVertex;

/// Model-space depth units per intensity step.
pub const DEPTH_SCALE: f32 = 4.0;

/// Counters from a single triangle fill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Scanlines that produced a non-empty span.
    pub rows: usize,
    pub pixels_written: usize,
}

impl RasterStats {
    pub fn merge(&mut self, other: RasterStats) {
        self.rows += other.rows;
        self.pixels_written += other.pixels_written;
    }
}

/// Where a scanline crosses one triangle edge
#[derive(Debug, Clone, Copy, PartialEq)]
struct Crossing {
    x: i64,
    z: f32,
}

/// Map a carried depth to fill intensity: nearer is brighter, range `[1, 255]`.
pub fn depth_intensity(z: f32) -> u8 {
    let value = (z * DEPTH_SCALE).clamp(0.0, 254.0);
    round_half_up(255.0 - value) as u8
}

/// Fill one triangle into `buffer`.
///
/// Each scanline takes the leftmost and rightmost edge crossings as a
/// half-open span `[min_x, max_x)`, clamped to the buffer width. Rows the
/// buffer does not have are never visited. A fragment only lands when its
/// intensity is strictly above the stored priority, so the merge of several
/// triangles does not depend on their order.
pub fn rasterize_triangle(
    buffer: &mut PixelBuffer,
    vertices: [ProjectedVertex; 3],
) -> Result<RasterStats, RenderError> {
    if !vertices.iter().all(ProjectedVertex::is_finite) {
        return Err(RenderError::NonFinite);
    }

    let [v0, v1, v2] = vertices;
    let edges = [(v0, v1), (v1, v2), (v2, v0)];

    let min_y = v0.y.min(v1.y).min(v2.y).floor() as i64;
    let max_y = v0.y.max(v1.y).max(v2.y).floor() as i64;

    let width = buffer.width() as i64;
    let first_row = min_y.max(0);
    let last_row = max_y.min(buffer.height() as i64 - 1);

    let mut stats = RasterStats::default();

    for y in first_row..=last_row {
        let scan_y = y as f32;

        let mut start: Option<Crossing> = None;
        let mut stop: Option<Crossing> = None;
        for (a, b) in &edges {
            let Some(crossing) = edge_crossing(a, b, scan_y) else {
                continue;
            };
            if start.map_or(true, |s| crossing.x < s.x) {
                start = Some(crossing);
            }
            if stop.map_or(true, |s| crossing.x > s.x) {
                stop = Some(crossing);
            }
        }

        let (Some(mut start), Some(mut stop)) = (start, stop) else {
            continue;
        };

        start.x = start.x.max(0);
        stop.x = stop.x.min(width);
        if start.x >= stop.x {
            continue;
        }

        stats.rows += 1;
        for x in start.x..stop.x {
            let intensity = depth_intensity(interpolate_z(start, stop, x));
            if buffer.plot_depth(x as usize, y as usize, intensity) {
                stats.pixels_written += 1;
            }
        }
    }

    Ok(stats)
}

/// Crossing of edge `a`-`b` with the horizontal line at `y`.
///
/// Horizontal edges and edges whose y-span excludes `y` yield nothing. When
/// the edge is vertical its depth is taken from `a` without interpolating.
fn edge_crossing(a: &ProjectedVertex, b: &ProjectedVertex, y: f32) -> Option<Crossing> {
    if a.y == b.y {
        return None;
    }
    if y < a.y.min(b.y) || y > a.y.max(b.y) {
        return None;
    }

    let x = round_half_up(((a.x - b.x) * y - (a.x * b.y - a.y * b.x)) / (a.y - b.y));
    let z = if a.x == b.x {
        a.z
    } else {
        b.z + (a.z - b.z) / (a.x - b.x) * (x - b.x)
    };

    Some(Crossing { x: x as i64, z })
}

/// Linear depth across a span by screen x
fn interpolate_z(start: Crossing, stop: Crossing, x: i64) -> f32 {
    if start.x == stop.x {
        return start.z;
    }
    start.z + (stop.z - start.z) / (stop.x - start.x) as f32 * (x - start.x) as f32
}

#[inline]
fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Rgba;

    fn pv(x: f32, y: f32, z: f32) -> ProjectedVertex {
        ProjectedVertex::new(x, y, z)
    }

    fn written(buffer: &PixelBuffer) -> usize {
        buffer.depth_plane().iter().filter(|&&d| d > 0).count()
    }

    #[test]
    fn test_depth_intensity_range() {
        assert_eq!(depth_intensity(0.0), 255);
        assert_eq!(depth_intensity(-30.0), 255);
        assert_eq!(depth_intensity(10.0), 215);
        assert_eq!(depth_intensity(63.5), 1);
        assert_eq!(depth_intensity(1000.0), 1);
    }

    #[test]
    fn test_right_triangle_coverage() {
        let mut buffer = PixelBuffer::new(16, 16, Rgba::BACKGROUND);
        let triangle = [pv(0.0, 0.0, 0.0), pv(8.0, 0.0, 0.0), pv(0.0, 8.0, 0.0)];
        let stats = rasterize_triangle(&mut buffer, triangle).unwrap();

        // Row y covers [0, 8 - y)
        for y in 0..16 {
            for x in 0..16 {
                let inside = y < 8 && x < 8 - y;
                let expected = if inside { 255 } else { 0 };
                assert_eq!(buffer.depth(x, y), Some(expected), "pixel ({}, {})", x, y);
            }
        }
        assert_eq!(stats.rows, 8);
        assert_eq!(stats.pixels_written, 36);
        assert_eq!(buffer.pixel(0, 0), Some(Rgba::new(255, 50, 50, 255)));
    }

    #[test]
    fn test_depth_is_interpolated_across_span() {
        let mut buffer = PixelBuffer::new(32, 4, Rgba::BACKGROUND);
        // Left edge at z = 0, right edge at z = 20
        rasterize_triangle(
            &mut buffer,
            [pv(0.0, 0.0, 0.0), pv(20.0, 0.0, 20.0), pv(0.0, 40.0, 0.0)],
        )
        .unwrap();

        let left = buffer.depth(0, 0).unwrap();
        let middle = buffer.depth(10, 0).unwrap();
        let right = buffer.depth(19, 0).unwrap();
        assert_eq!(left, 255);
        assert!(left > middle && middle > right);
        assert_eq!(middle, depth_intensity(10.0));
    }

    #[test]
    fn test_nearer_triangle_wins_in_either_order() {
        let near = [pv(2.0, 2.0, 10.0), pv(30.0, 4.0, 10.0), pv(8.0, 28.0, 10.0)];
        let far = [pv(0.0, 0.0, 30.0), pv(28.0, 1.0, 30.0), pv(14.0, 30.0, 30.0)];

        let mut a_then_b = PixelBuffer::new(32, 32, Rgba::BACKGROUND);
        rasterize_triangle(&mut a_then_b, near).unwrap();
        rasterize_triangle(&mut a_then_b, far).unwrap();

        let mut b_then_a = PixelBuffer::new(32, 32, Rgba::BACKGROUND);
        rasterize_triangle(&mut b_then_a, far).unwrap();
        rasterize_triangle(&mut b_then_a, near).unwrap();

        assert_eq!(a_then_b, b_then_a);
        assert_eq!(a_then_b.depth(10, 10), Some(depth_intensity(10.0)));
    }

    #[test]
    fn test_equal_priority_keeps_first_writer() {
        let mut buffer = PixelBuffer::new(16, 16, Rgba::BACKGROUND);
        let triangle = [pv(0.0, 0.0, 5.0), pv(12.0, 0.0, 5.0), pv(0.0, 12.0, 5.0)];
        let first = rasterize_triangle(&mut buffer, triangle).unwrap();
        let second = rasterize_triangle(&mut buffer, triangle).unwrap();
        assert!(first.pixels_written > 0);
        assert_eq!(second.pixels_written, 0);
    }

    #[test]
    fn test_span_is_clamped_to_viewport() {
        let mut buffer = PixelBuffer::new(10, 10, Rgba::BACKGROUND);
        let stats = rasterize_triangle(
            &mut buffer,
            [pv(-100.0, -5.0, 1.0), pv(200.0, 4.0, 1.0), pv(-50.0, 30.0, 1.0)],
        )
        .unwrap();

        assert!(stats.pixels_written <= 10 * 10);
        assert_eq!(written(&buffer), stats.pixels_written);
        assert_eq!(buffer.as_bytes().len(), 10 * 10 * 4);
        assert!(buffer.depth(0, 5).unwrap() > 0);
        assert!(buffer.depth(9, 3).unwrap() > 0);
    }

    #[test]
    fn test_offscreen_triangle_writes_nothing() {
        let mut buffer = PixelBuffer::new(10, 10, Rgba::BACKGROUND);
        let stats = rasterize_triangle(
            &mut buffer,
            [pv(20.0, 0.0, 0.0), pv(30.0, 0.0, 0.0), pv(25.0, 8.0, 0.0)],
        )
        .unwrap();
        assert_eq!(stats, RasterStats::default());

        let below = rasterize_triangle(
            &mut buffer,
            [pv(0.0, 20.0, 0.0), pv(8.0, 30.0, 0.0), pv(2.0, 40.0, 0.0)],
        )
        .unwrap();
        assert_eq!(below.rows, 0);
        assert_eq!(written(&buffer), 0);
    }

    #[test]
    fn test_vertical_edge_uses_endpoint_depth() {
        let a = pv(5.0, 0.0, 7.0);
        let b = pv(5.0, 10.0, 3.0);
        let crossing = edge_crossing(&a, &b, 4.0).unwrap();
        assert_eq!(crossing.x, 5);
        assert_eq!(crossing.z, 7.0);

        let mut buffer = PixelBuffer::new(20, 20, Rgba::BACKGROUND);
        let stats = rasterize_triangle(&mut buffer, [a, b, pv(15.0, 10.0, 2.0)]).unwrap();
        assert!(stats.pixels_written > 0);
        // Row 4 spans [5, 9) starting from the vertical edge's depth
        assert_eq!(buffer.depth(5, 4), Some(depth_intensity(7.0)));
        assert_eq!(buffer.depth(9, 4), Some(0));
    }

    #[test]
    fn test_horizontal_edge_has_no_crossing() {
        let a = pv(0.0, 3.0, 1.0);
        let b = pv(9.0, 3.0, 1.0);
        assert_eq!(edge_crossing(&a, &b, 3.0), None);
    }

    #[test]
    fn test_crossing_outside_edge_span() {
        let a = pv(0.0, 0.0, 0.0);
        let b = pv(10.0, 10.0, 0.0);
        assert_eq!(edge_crossing(&a, &b, 11.0), None);
        assert_eq!(edge_crossing(&a, &b, -1.0), None);
        assert_eq!(edge_crossing(&a, &b, 5.0).map(|c| c.x), Some(5));
    }

    #[test]
    fn test_degenerate_triangles_are_safe() {
        let mut buffer = PixelBuffer::new(8, 8, Rgba::BACKGROUND);
        let point = pv(3.0, 3.0, 0.0);
        assert!(rasterize_triangle(&mut buffer, [point, point, point]).is_ok());

        let line = [pv(0.0, 0.0, 0.0), pv(4.0, 4.0, 0.0), pv(7.0, 7.0, 0.0)];
        assert!(rasterize_triangle(&mut buffer, line).is_ok());

        assert_eq!(
            rasterize_triangle(&mut buffer, [pv(f32::NAN, 0.0, 0.0), point, point]),
            Err(RenderError::NonFinite)
        );
    }
}
