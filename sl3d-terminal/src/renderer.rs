/// Presents a pixel buffer as coloured ASCII cells
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use sl3d_core::{PixelBuffer, Rgba};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Glyph used for stroked (wireframe) pixels
const STROKE_CHAR: char = '#';

/// Downsamples pixel buffers onto a terminal character grid
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Nearest-neighbour sample of `frame` into the character grid
    pub fn present(&mut self, frame: &PixelBuffer) {
        self.clear();
        if frame.width() == 0 || frame.height() == 0 {
            return;
        }

        let background = frame.background();
        for row in 0..self.height {
            let py = row * frame.height() / self.height;
            for col in 0..self.width {
                let px = col * frame.width() / self.width;
                let (Some(pixel), Some(depth)) = (frame.pixel(px, py), frame.depth(px, py)) else {
                    continue;
                };

                let idx = row * self.width + col;
                let (c, color) = classify(pixel, depth, background);
                self.char_buffer[idx] = c;
                self.color_buffer[idx] = color;
            }
        }
    }

    /// Character at a grid cell, mostly for inspection
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col < self.width && row < self.height {
            Some(self.char_buffer[row * self.width + col])
        } else {
            None
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a glyph and colour for one sampled pixel.
///
/// Filled fragments carry their priority in the depth plane; any other
/// non-background pixel is a stroke.
fn classify(pixel: Rgba, depth: u8, background: Rgba) -> (char, Color) {
    if depth > 0 {
        let index = 1 + depth as usize * (LUMINOSITY_RAMP.len() - 2) / 255;
        let c = LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)];

        // Color based on character intensity
        let color = match c {
            '.' | ':' => Color::DarkGrey,
            '-' | '=' => Color::Grey,
            '+' | '*' => Color::White,
            _ => Color::Cyan,
        };
        return (c, color);
    }

    if pixel != background {
        let color = Color::Rgb {
            r: pixel.r(),
            g: pixel.g(),
            b: pixel.b(),
        };
        return (STROKE_CHAR, color);
    }

    (' ', Color::Reset)
}
