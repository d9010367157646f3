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

//! Client-area region layout for the four text slots.
//!
//! Regions are fixed rectangles in client-area-relative coordinates,
//! recomputed only when the window is resized. The timer slot spans the
//! full client area; the three metric slots stack in a fixed-width column
//! anchored to the right edge, below the timer's visual baseline.

/// Font size of the clock slot, in pixels.
pub const TIMER_FONT_SIZE: f32 = 96.0;
/// Font size of the three metric slots, in pixels.
pub const METRICS_FONT_SIZE: f32 = 24.0;
/// Width of the metric column. Independent of the client width.
pub const METRIC_COLUMN_WIDTH: f32 = 280.0;

// Vertical spacing factors relative to the font sizes above.
const TIMER_BASELINE_FACTOR: f32 = 1.3;
const METRIC_ROW_FACTOR: f32 = 1.2;

/// An axis-aligned rectangle in client-area coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Region {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// The rectangles assigned to the four text slots for one client size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSet {
    pub timer: Region,
    pub cpu: Region,
    pub memory: Region,
    pub network: Region,
}

impl RegionSet {
    /// Computes the slot rectangles for a client area of `width` x `height`
    /// pixels.
    pub fn for_client_size(width: u32, height: u32) -> Self {
        let w = width as f32;
        let h = height as f32;

        let column_left = w - METRIC_COLUMN_WIDTH;
        let column_right = column_left + METRIC_COLUMN_WIDTH;
        let row_height = METRICS_FONT_SIZE * METRIC_ROW_FACTOR;
        let base = TIMER_FONT_SIZE * TIMER_BASELINE_FACTOR;

        Self {
            timer: Region::new(0.0, 0.0, w, h),
            cpu: Region::new(column_left, base, column_right, base + row_height),
            memory: Region::new(
                column_left,
                base + row_height,
                column_right,
                base + row_height * 2.0,
            ),
            network: Region::new(
                column_left,
                base + row_height * 2.0,
                column_right,
                base + row_height * 3.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_timer_spans_full_client_area() {
        let regions = RegionSet::for_client_size(800, 600);
        assert_relative_eq!(regions.timer.left, 0.0);
        assert_relative_eq!(regions.timer.top, 0.0);
        assert_relative_eq!(regions.timer.right, 800.0);
        assert_relative_eq!(regions.timer.bottom, 600.0);
    }

    #[test]
    fn test_metric_column_is_right_anchored() {
        let regions = RegionSet::for_client_size(800, 600);
        assert_relative_eq!(regions.cpu.left, 800.0 - METRIC_COLUMN_WIDTH);
        assert_relative_eq!(regions.cpu.right, 800.0);
        assert_relative_eq!(regions.cpu.width(), METRIC_COLUMN_WIDTH);
    }

    #[test]
    fn test_metric_rows_stack_below_timer_baseline() {
        let regions = RegionSet::for_client_size(800, 600);
        let base = TIMER_FONT_SIZE * 1.3;
        let row = METRICS_FONT_SIZE * 1.2;

        assert_relative_eq!(regions.cpu.top, base);
        assert_relative_eq!(regions.memory.top, regions.cpu.bottom);
        assert_relative_eq!(regions.network.top, regions.memory.bottom);
        // Heights are differences of accumulated f32 sums, so compare with
        // a sub-pixel tolerance rather than ULP equality.
        assert_relative_eq!(regions.cpu.height(), row, epsilon = 1e-3);
        assert_relative_eq!(regions.memory.height(), row, epsilon = 1e-3);
        assert_relative_eq!(regions.network.height(), row, epsilon = 1e-3);
    }

    #[test]
    fn test_resize_recomputes_anchoring() {
        // Window resized from 800x600 to 1024x768 mid-session: the timer
        // region spans the new client rectangle and the metric column stays
        // right-anchored at the new width.
        let before = RegionSet::for_client_size(800, 600);
        let after = RegionSet::for_client_size(1024, 768);

        assert_relative_eq!(after.timer.right, 1024.0);
        assert_relative_eq!(after.timer.bottom, 768.0);
        assert_relative_eq!(after.cpu.left, 1024.0 - METRIC_COLUMN_WIDTH);
        assert_relative_eq!(after.cpu.width(), before.cpu.width());
        // Vertical placement is independent of the client size.
        assert_relative_eq!(after.cpu.top, before.cpu.top);
    }
}
