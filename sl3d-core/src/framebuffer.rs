/// RGBA pixel buffer with a separate depth-priority plane
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// The viewer background.
    pub const BACKGROUND: Rgba = Rgba([50, 50, 50, 255]);
    /// CSS `green`, used for wireframe strokes.
    pub const GREEN: Rgba = Rgba([0, 128, 0, 255]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }

    /// Rec. 601 luma in `[0, 1]`
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r() as f32 + 0.587 * self.g() as f32 + 0.114 * self.b() as f32) / 255.0
    }
}

/// Row-major RGBA pixels with origin at the top left.
///
/// `depth` holds one priority byte per pixel. Zero means nothing has been
/// drawn; a fragment replaces the pixel only with a strictly higher priority.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    background: Rgba,
    color: Vec<u8>,
    depth: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, background: Rgba) -> Self {
        let size = width * height;
        let mut color = Vec::with_capacity(size * 4);
        for _ in 0..size {
            color.extend_from_slice(&background.0);
        }

        Self {
            width,
            height,
            background,
            color,
            depth: vec![0; size],
        }
    }

    pub fn clear(&mut self) {
        for pixel in self.color.chunks_exact_mut(4) {
            pixel.copy_from_slice(&self.background.0);
        }
        self.depth.fill(0);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Raw RGBA bytes, ready for an `ImageData` or texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.color
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.color
    }

    pub fn depth_plane(&self) -> &[u8] {
        &self.depth
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        self.index(x, y).map(|i| {
            let o = i * 4;
            Rgba([
                self.color[o],
                self.color[o + 1],
                self.color[o + 2],
                self.color[o + 3],
            ])
        })
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<u8> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Depth-tested write of a fill fragment.
    ///
    /// The red channel takes the intensity, green/blue/alpha keep the
    /// background. Returns whether the pixel changed.
    #[inline]
    pub fn plot_depth(&mut self, x: usize, y: usize, intensity: u8) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if intensity <= self.depth[i] {
            return false;
        }

        self.depth[i] = intensity;
        let o = i * 4;
        self.color[o] = intensity;
        self.color[o + 1] = self.background.g();
        self.color[o + 2] = self.background.b();
        self.color[o + 3] = 255;
        true
    }

    /// Unconditional write, ignoring and leaving the depth plane alone.
    #[inline]
    pub fn plot(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(i) = self.index(x as usize, y as usize) {
            self.color[i * 4..i * 4 + 4].copy_from_slice(&color.0);
        }
    }

    /// Bresenham line between two pixel centres, clipped per pixel.
    pub fn draw_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba) {
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
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
    }

    /// Draw a segment given in screen-space floats.
    ///
    /// The segment is first clipped to a one-pixel margin around the buffer
    /// so far-off endpoints do not cost a walk across empty space.
    pub fn draw_segment(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba) {
        let bounds = (
            -1.0,
            -1.0,
            self.width as f32 + 1.0,
            self.height as f32 + 1.0,
        );
        if let Some(((x0, y0), (x1, y1))) = clip_segment(from, to, bounds) {
            self.draw_line(
                x0.round() as i64,
                y0.round() as i64,
                x1.round() as i64,
                y1.round() as i64,
                color,
            );
        }
    }
}

/// Liang-Barsky clip of a segment against `(min_x, min_y, max_x, max_y)`.
fn clip_segment(
    from: (f32, f32),
    to: (f32, f32),
    (min_x, min_y, max_x, max_y): (f32, f32, f32, f32),
) -> Option<((f32, f32), (f32, f32))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-dx, from.0 - min_x),
        (dx, max_x - from.0),
        (-dy, from.1 - min_y),
        (dy, max_y - from.1),
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

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}
