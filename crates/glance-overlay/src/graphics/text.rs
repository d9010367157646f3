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

//! Text composition: four fixed slots drawn into their regions.
//!
//! Glyphs are laid out with fontdue and their coverage bitmaps are
//! alpha-blended into the frame canvas. The timer slot uses the bold face
//! and trailing (right) alignment; the three metric slots use the regular
//! face and leading alignment. Slots are independent: one slot failing to
//! draw never aborts the others.

use fontdue::layout::{
    CoordinateSystem, HorizontalAlign, Layout, LayoutSettings, TextStyle as LayoutText,
};
use fontdue::{Font, FontSettings};
use glance_core::layout::{Region, RegionSet, METRICS_FONT_SIZE, TIMER_FONT_SIZE};
use glance_core::{DeviceError, DrawInfo};

use super::canvas::{Canvas, TEXT_COLOR};

#[cfg(target_os = "windows")]
const REGULAR_FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
#[cfg(target_os = "windows")]
const BOLD_FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\segoeuib.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

#[cfg(target_os = "macos")]
const REGULAR_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
];
#[cfg(target_os = "macos")]
const BOLD_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
];

#[cfg(all(unix, not(target_os = "macos")))]
const REGULAR_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];
#[cfg(all(unix, not(target_os = "macos")))]
const BOLD_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
];

const REGULAR: usize = 0;
const BOLD: usize = 1;

/// Immutable per-slot text configuration, fixed at construction.
#[derive(Clone, Copy)]
struct TextStyle {
    font_index: usize,
    size_px: f32,
    align: HorizontalAlign,
}

/// Draws the four text fields into their fixed regions.
pub struct TextCompositor {
    fonts: Vec<Font>,
    layout: Layout,
    timer: TextStyle,
    cpu: TextStyle,
    memory: TextStyle,
    network: TextStyle,
    color: [u8; 4],
}

impl TextCompositor {
    /// Loads the font faces and fixes the per-slot styles.
    ///
    /// The bold face falls back to the regular face with a warning; no
    /// usable regular face at all is a `DeviceError`.
    pub fn new() -> Result<Self, DeviceError> {
        let regular = load_first_font(REGULAR_FONT_PATHS).ok_or_else(|| {
            DeviceError::CreationFailed("no usable system font found".to_string())
        })?;
        let bold = match load_first_font(BOLD_FONT_PATHS) {
            Some(font) => font,
            None => {
                log::warn!("No bold system font found, timer falls back to the regular face");
                regular.clone()
            }
        };

        Ok(Self {
            fonts: vec![regular, bold],
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            timer: TextStyle {
                font_index: BOLD,
                size_px: TIMER_FONT_SIZE,
                align: HorizontalAlign::Right,
            },
            cpu: TextStyle {
                font_index: REGULAR,
                size_px: METRICS_FONT_SIZE,
                align: HorizontalAlign::Left,
            },
            memory: TextStyle {
                font_index: REGULAR,
                size_px: METRICS_FONT_SIZE,
                align: HorizontalAlign::Left,
            },
            network: TextStyle {
                font_index: REGULAR,
                size_px: METRICS_FONT_SIZE,
                align: HorizontalAlign::Left,
            },
            color: TEXT_COLOR,
        })
    }

    /// Draws all four fields of `info` into their regions on `canvas`.
    /// Assumes a frame has been begun; drawing is side-effect-only.
    pub fn draw(&mut self, canvas: &mut Canvas, info: &DrawInfo, regions: &RegionSet) {
        self.draw_slot(canvas, &info.time_string, &regions.timer, self.timer);
        self.draw_slot(canvas, &info.cpu_usage, &regions.cpu, self.cpu);
        self.draw_slot(canvas, &info.memory_usage, &regions.memory, self.memory);
        self.draw_slot(canvas, &info.network_usage, &regions.network, self.network);
    }

    fn draw_slot(&mut self, canvas: &mut Canvas, text: &str, region: &Region, style: TextStyle) {
        if text.is_empty() {
            return;
        }

        self.layout.reset(&LayoutSettings {
            x: region.left,
            y: region.top,
            max_width: Some(region.width()),
            max_height: Some(region.height()),
            horizontal_align: style.align,
            ..LayoutSettings::default()
        });
        self.layout.append(
            &self.fonts,
            &LayoutText::new(text, style.size_px, style.font_index),
        );

        for glyph in self.layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (_, coverage) = self.fonts[glyph.font_index].rasterize_config(glyph.key);
            canvas.blend_coverage(
                glyph.x as i32,
                glyph.y as i32,
                glyph.width,
                glyph.height,
                &coverage,
                self.color,
            );
        }
    }
}

fn load_first_font(paths: &[&str]) -> Option<Font> {
    for path in paths {
        match std::fs::read(path) {
            Ok(data) => match Font::from_bytes(data, FontSettings::default()) {
                Ok(font) => {
                    log::debug!("Loaded font from {path}");
                    return Some(font);
                }
                Err(err) => log::warn!("Failed to parse font {path}: {err}"),
            },
            Err(_) => continue,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::canvas::BACKGROUND;
    use glance_core::RawMetrics;

    // Compositor tests need a real font file; skip silently on hosts
    // without one rather than fail.
    fn compositor() -> Option<TextCompositor> {
        TextCompositor::new().ok()
    }

    fn ink_in(canvas: &Canvas, left: u32, top: u32, right: u32, bottom: u32) -> usize {
        let mut count = 0;
        for y in top..bottom {
            for x in left..right {
                let idx = (y as usize * canvas.width() as usize + x as usize) * 4;
                let texel: [u8; 4] = canvas.pixels()[idx..idx + 4].try_into().unwrap();
                if texel != BACKGROUND {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_timer_is_right_aligned() {
        let Some(mut compositor) = compositor() else {
            return;
        };
        let mut canvas = Canvas::filled(800, 600, BACKGROUND);
        let regions = RegionSet::for_client_size(800, 600);
        let info = DrawInfo {
            time_string: "12:34:56".to_string(),
            cpu_usage: String::new(),
            memory_usage: String::new(),
            network_usage: String::new(),
        };

        compositor.draw(&mut canvas, &info, &regions);

        // Trailing alignment: ink hugs the right half, the left quarter of
        // the timer region stays clean.
        assert!(ink_in(&canvas, 400, 0, 800, 150) > 0);
        assert_eq!(ink_in(&canvas, 0, 0, 200, 150), 0);
    }

    #[test]
    fn test_metric_rows_are_left_anchored_in_column() {
        let Some(mut compositor) = compositor() else {
            return;
        };
        let mut canvas = Canvas::filled(800, 600, BACKGROUND);
        let regions = RegionSet::for_client_size(800, 600);
        let info = DrawInfo::compose(
            String::new(),
            &RawMetrics {
                cpu_percent: 37.4,
                memory_bytes: 2_400_000_000,
                network_bytes_per_sec: 150_000,
            },
        );

        compositor.draw(&mut canvas, &info, &regions);

        let col_left = regions.cpu.left as u32;
        let rows_top = regions.cpu.top as u32;
        let rows_bottom = regions.network.bottom as u32;
        // Ink starts at the column's left edge...
        assert!(ink_in(&canvas, col_left, rows_top, col_left + 120, rows_bottom) > 0);
        // ...and nothing is drawn left of the column.
        assert_eq!(ink_in(&canvas, 0, rows_top, col_left, rows_bottom), 0);
    }

    #[test]
    fn test_empty_strings_draw_nothing() {
        let Some(mut compositor) = compositor() else {
            return;
        };
        let mut canvas = Canvas::filled(200, 200, BACKGROUND);
        let regions = RegionSet::for_client_size(200, 200);
        let info = DrawInfo {
            time_string: String::new(),
            cpu_usage: String::new(),
            memory_usage: String::new(),
            network_usage: String::new(),
        };

        compositor.draw(&mut canvas, &info, &regions);
        assert_eq!(ink_in(&canvas, 0, 0, 200, 200), 0);
    }

    #[test]
    fn test_glyphs_are_clipped_to_canvas() {
        let Some(mut compositor) = compositor() else {
            return;
        };
        // A canvas far smaller than the timer text; drawing must not panic.
        let mut canvas = Canvas::filled(40, 20, BACKGROUND);
        let regions = RegionSet::for_client_size(40, 20);
        let info = DrawInfo {
            time_string: "12:34:56".to_string(),
            cpu_usage: "CPU: 100.0%".to_string(),
            memory_usage: "mem:   1.0GB".to_string(),
            network_usage: "net:   1.0Gbps".to_string(),
        };

        compositor.draw(&mut canvas, &info, &regions);
    }
}
