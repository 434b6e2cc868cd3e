/// Per-frame composition of a mesh into a fresh pixel buffer
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::framebuffer::{PixelBuffer, Rgba};
use crate::geometry::Mesh;
use crate::projection::{ProjectedVertex, Projector};
use crate::raster::{rasterize_triangle, RasterStats};

/// How faces are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Filled,
    Wireframe,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Filled => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Filled,
        }
    }
}

/// What happened while composing one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub faces: usize,
    pub triangles_drawn: usize,
    pub triangles_skipped: usize,
    pub raster: RasterStats,
}

/// Turns a mesh into a pixel buffer, one frame at a time
#[derive(Debug, Clone)]
pub struct Compositor {
    projector: Projector,
    background: Rgba,
    wire_color: Rgba,
}

impl Compositor {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            projector: config.projector(),
            background: config.background,
            wire_color: config.wire_color,
        }
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn render(&self, mesh: &Mesh, mode: RenderMode) -> PixelBuffer {
        self.render_with_report(mesh, mode).0
    }

    /// Render a frame and report skipped triangles.
    ///
    /// A triangle is skipped when one of its vertices cannot be projected or
    /// when the rasterizer rejects it; the rest of the frame is still drawn.
    pub fn render_with_report(
        &self,
        mesh: &Mesh,
        mode: RenderMode,
    ) -> (PixelBuffer, FrameReport) {
        let mut buffer = PixelBuffer::new(
            self.projector.width as usize,
            self.projector.height as usize,
            self.background,
        );
        let projected = self.projector.project_all(&mesh.vertices);

        let mut report = FrameReport {
            faces: mesh.faces.len(),
            ..FrameReport::default()
        };

        for face in &mesh.faces {
            for triangle in face.triangles() {
                let vertices = match gather(&projected, triangle) {
                    Ok(vertices) => vertices,
                    Err(e) => {
                        log::trace!("skipping triangle {:?}: {}", triangle, e);
                        report.triangles_skipped += 1;
                        continue;
                    }
                };

                match mode {
                    RenderMode::Filled => match rasterize_triangle(&mut buffer, vertices) {
                        Ok(stats) => {
                            report.raster.merge(stats);
                            report.triangles_drawn += 1;
                        }
                        Err(e) => {
                            log::trace!("skipping triangle {:?}: {}", triangle, e);
                            report.triangles_skipped += 1;
                        }
                    },
                    RenderMode::Wireframe => {
                        self.stroke_triangle(&mut buffer, vertices);
                        report.triangles_drawn += 1;
                    }
                }
            }
        }

        (buffer, report)
    }

    fn stroke_triangle(&self, buffer: &mut PixelBuffer, [a, b, c]: [ProjectedVertex; 3]) {
        for (from, to) in [(a, b), (b, c), (c, a)] {
            buffer.draw_segment((from.x, from.y), (to.x, to.y), self.wire_color);
        }
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

fn gather(
    projected: &[Result<ProjectedVertex, RenderError>],
    [i0, i1, i2]: [usize; 3],
) -> Result<[ProjectedVertex; 3], RenderError> {
    let vertex = |index: usize| {
        projected
            .get(index)
            .copied()
            .unwrap_or(Err(RenderError::DanglingIndex { index }))
    };
    Ok([vertex(i0)?, vertex(i1)?, vertex(i2)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face;

    fn quad(z: f32) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(-10.0, -10.0, z);
        mesh.add_vertex(10.0, -10.0, z);
        mesh.add_vertex(10.0, 10.0, z);
        mesh.add_vertex(-10.0, 10.0, z);
        mesh.add_face(Face::new(0, 1, 2, 3));
        mesh
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(RenderMode::default(), RenderMode::Filled);
        assert_eq!(RenderMode::Filled.toggled(), RenderMode::Wireframe);
        assert_eq!(RenderMode::Wireframe.toggled(), RenderMode::Filled);
    }

    #[test]
    fn test_empty_mesh_is_background() {
        let compositor = Compositor::default();
        let (buffer, report) = compositor.render_with_report(&Mesh::new(), RenderMode::Filled);
        assert_eq!(buffer, PixelBuffer::new(320, 200, Rgba::BACKGROUND));
        assert_eq!(report, FrameReport::default());
    }

    #[test]
    fn test_filled_quad_draws_both_halves() {
        let compositor = Compositor::default();
        let (buffer, report) = compositor.render_with_report(&quad(0.0), RenderMode::Filled);
        assert_eq!(report.faces, 1);
        assert_eq!(report.triangles_drawn, 2);
        assert_eq!(report.triangles_skipped, 0);

        // Quad spans 80x80 pixels around the viewport bias (106.7, 66.7)
        assert_eq!(buffer.pixel(100, 60), Some(Rgba::new(255, 50, 50, 255)));
        assert_eq!(buffer.pixel(120, 80), Some(Rgba::new(255, 50, 50, 255)));
        assert_eq!(buffer.pixel(10, 10), Some(Rgba::BACKGROUND));
        assert!(report.raster.pixels_written > 1500);
    }

    #[test]
    fn test_wireframe_leaves_depth_untouched() {
        let compositor = Compositor::default();
        let buffer = compositor.render(&quad(0.0), RenderMode::Wireframe);
        assert!(buffer.depth_plane().iter().all(|&d| d == 0));

        let green = buffer
            .as_bytes()
            .chunks_exact(4)
            .filter(|p| *p == Rgba::GREEN.0)
            .count();
        assert!(green > 0);
        // Interior pixels away from the diagonal stay background
        assert_eq!(buffer.pixel(120, 60), Some(Rgba::BACKGROUND));
    }

    #[test]
    fn test_degenerate_vertex_skips_only_its_triangles() {
        let mut mesh = quad(0.0);
        // Second face shares nothing with the first and sits on the camera plane
        let base = mesh.vertices.len();
        mesh.add_vertex(0.0, 0.0, -50.0);
        mesh.add_vertex(1.0, 0.0, 0.0);
        mesh.add_vertex(1.0, 1.0, 0.0);
        mesh.add_vertex(0.0, 1.0, 0.0);
        mesh.add_face(Face::new(base, base + 1, base + 2, base + 3));

        let (buffer, report) = Compositor::default().render_with_report(&mesh, RenderMode::Filled);
        assert_eq!(report.triangles_drawn, 2);
        assert_eq!(report.triangles_skipped, 2);
        assert_eq!(buffer.pixel(100, 60), Some(Rgba::new(255, 50, 50, 255)));
    }

    #[test]
    fn test_nearer_face_wins_regardless_of_face_order() {
        let mut near_first = quad(5.0);
        let far = quad(30.0);
        let offset = near_first.vertices.len();
        near_first.vertices.extend(far.vertices.iter().copied());
        near_first.add_face(Face::new(offset, offset + 1, offset + 2, offset + 3));

        let mut far_first = near_first.clone();
        far_first.faces.reverse();

        let compositor = Compositor::default();
        assert_eq!(
            compositor.render(&near_first, RenderMode::Filled),
            compositor.render(&far_first, RenderMode::Filled)
        );
    }

    #[test]
    fn test_missing_vertex_skips_face_without_panicking() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_face(Face::new(0, 0, 0, 5));

        let (buffer, report) = Compositor::default().render_with_report(&mesh, RenderMode::Filled);
        assert_eq!(report.triangles_skipped, 2);
        assert_eq!(report.triangles_drawn, 0);
        assert!(buffer.depth_plane().iter().all(|&d| d == 0));

        let (_, wire) = Compositor::default().render_with_report(&mesh, RenderMode::Wireframe);
        assert_eq!(wire.triangles_skipped, 2);
    }
}
