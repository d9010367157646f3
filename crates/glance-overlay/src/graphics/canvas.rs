// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CPU-side frame pixels.
//!
//! Every visible pixel of the overlay is composed on the CPU: the canvas is
//! cleared to the background color at the start of a frame, glyph coverage
//! is alpha-blended into it, and the finished buffer is uploaded to the
//! swapchain texture in one copy. Coordinates are y-down, origin top-left.

/// Background clear color (sky blue), sRGB bytes.
pub const BACKGROUND: [u8; 4] = [135, 206, 235, 255];
/// Text color, sRGB bytes.
pub const TEXT_COLOR: [u8; 4] = [0, 0, 0, 255];

/// An owned RGBA8 pixel buffer sized to the client area.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Creates a canvas filled with `color`.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        for texel in pixels.chunks_exact_mut(4) {
            texel.copy_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Alpha-blends an 8-bit coverage bitmap into the canvas at
    /// (`left`, `top`), clipped to the canvas bounds. `coverage` is
    /// `glyph_width * glyph_height` bytes, row-major.
    pub fn blend_coverage(
        &mut self,
        left: i32,
        top: i32,
        glyph_width: usize,
        glyph_height: usize,
        coverage: &[u8],
        color: [u8; 4],
    ) {
        if coverage.len() < glyph_width * glyph_height {
            log::debug!(
                "coverage bitmap shorter than {glyph_width}x{glyph_height}, skipping glyph"
            );
            return;
        }

        for row in 0..glyph_height {
            let y = top + row as i32;
            if y < 0 || y >= self.height as i32 {
                continue;
            }
            for col in 0..glyph_width {
                let x = left + col as i32;
                if x < 0 || x >= self.width as i32 {
                    continue;
                }
                let alpha = coverage[row * glyph_width + col] as u32;
                if alpha == 0 {
                    continue;
                }
                let idx = (y as usize * self.width as usize + x as usize) * 4;
                let texel = &mut self.pixels[idx..idx + 4];
                for c in 0..3 {
                    let src = color[c] as u32;
                    let dst = texel[c] as u32;
                    texel[c] = ((src * alpha + dst * (255 - alpha)) / 255) as u8;
                }
                texel[3] = 255;
            }
        }
    }

    /// Consumes the canvas and returns the texel bytes in upload order,
    /// swapping the red and blue channels when the surface format is BGRA.
    pub fn into_texel_bytes(mut self, swap_rb: bool) -> Vec<u8> {
        if swap_rb {
            for texel in self.pixels.chunks_exact_mut(4) {
                texel.swap(0, 2);
            }
        }
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texel(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * canvas.width() as usize + x as usize) * 4;
        canvas.pixels()[idx..idx + 4].try_into().unwrap()
    }

    #[test]
    fn test_filled_canvas_is_uniform() {
        let canvas = Canvas::filled(4, 3, BACKGROUND);
        assert_eq!(canvas.pixels().len(), 4 * 3 * 4);
        for x in 0..4 {
            for y in 0..3 {
                assert_eq!(texel(&canvas, x, y), BACKGROUND);
            }
        }
    }

    #[test]
    fn test_full_coverage_replaces_background() {
        let mut canvas = Canvas::filled(4, 4, BACKGROUND);
        canvas.blend_coverage(1, 1, 2, 2, &[255; 4], TEXT_COLOR);

        assert_eq!(texel(&canvas, 1, 1), TEXT_COLOR);
        assert_eq!(texel(&canvas, 2, 2), TEXT_COLOR);
        // Outside the glyph box the background is untouched.
        assert_eq!(texel(&canvas, 0, 0), BACKGROUND);
        assert_eq!(texel(&canvas, 3, 3), BACKGROUND);
    }

    #[test]
    fn test_zero_coverage_leaves_background() {
        let mut canvas = Canvas::filled(2, 2, BACKGROUND);
        canvas.blend_coverage(0, 0, 2, 2, &[0; 4], TEXT_COLOR);
        assert_eq!(texel(&canvas, 0, 0), BACKGROUND);
        assert_eq!(texel(&canvas, 1, 1), BACKGROUND);
    }

    #[test]
    fn test_partial_coverage_blends() {
        let mut canvas = Canvas::filled(1, 1, [100, 100, 100, 255]);
        canvas.blend_coverage(0, 0, 1, 1, &[128], [200, 200, 200, 255]);
        let [r, g, b, a] = texel(&canvas, 0, 0);
        // (200*128 + 100*127) / 255 = 150
        assert_eq!([r, g, b], [150, 150, 150]);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_blend_clips_at_canvas_edges() {
        let mut canvas = Canvas::filled(2, 2, BACKGROUND);
        // Glyph hangs off every edge; only the overlapping texel changes.
        canvas.blend_coverage(-1, -1, 4, 4, &[255; 16], TEXT_COLOR);
        for x in 0..2 {
            for y in 0..2 {
                assert_eq!(texel(&canvas, x, y), TEXT_COLOR);
            }
        }

        let mut canvas = Canvas::filled(2, 2, BACKGROUND);
        canvas.blend_coverage(5, 5, 2, 2, &[255; 4], TEXT_COLOR);
        assert_eq!(texel(&canvas, 0, 0), BACKGROUND);
        assert_eq!(texel(&canvas, 1, 1), BACKGROUND);
    }

    #[test]
    fn test_short_coverage_buffer_is_ignored() {
        let mut canvas = Canvas::filled(2, 2, BACKGROUND);
        canvas.blend_coverage(0, 0, 2, 2, &[255; 2], TEXT_COLOR);
        assert_eq!(texel(&canvas, 0, 0), BACKGROUND);
    }

    #[test]
    fn test_texel_bytes_swap_red_blue() {
        let canvas = Canvas::filled(1, 1, [10, 20, 30, 255]);
        assert_eq!(canvas.clone().into_texel_bytes(false), vec![10, 20, 30, 255]);
        assert_eq!(canvas.into_texel_bytes(true), vec![30, 20, 10, 255]);
    }
}
