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

//! The frame orchestrator: one sample-and-render cycle per redraw signal.
//!
//! All orchestration runs serially on the event-loop thread. A resize runs
//! its unbind-reconfigure-rebind protocol to completion before any later
//! draw; there is no queuing or catch-up of missed ticks.

use std::sync::Arc;

use glance_core::{DeviceError, DrawInfo, MetricsSource, RegionSet};
use winit::window::Window;

use crate::graphics::surface::DisplaySurface;
use crate::graphics::text::TextCompositor;

/// Shows the blocking device-failure notification. Called at most once per
/// fault episode; the overlay stays alive but inert afterwards.
pub fn notify_device_fault(err: &DeviceError) {
    log::error!("Device fault: {err}");
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("glance")
        .set_description(err.to_string())
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

/// Ties the sampler, compositor, surface and region layout together.
pub struct FrameOrchestrator {
    surface: DisplaySurface,
    compositor: TextCompositor,
    sampler: Box<dyn MetricsSource>,
    regions: RegionSet,
    fault_reported: bool,
}

impl FrameOrchestrator {
    /// Builds the presentation surface and text compositor for a freshly
    /// created window.
    pub fn new(
        window: Arc<Window>,
        client_size: (u32, u32),
        sampler: Box<dyn MetricsSource>,
    ) -> Result<Self, DeviceError> {
        let surface = DisplaySurface::new(window, client_size)?;
        let compositor = TextCompositor::new()?;

        Ok(Self {
            surface,
            compositor,
            sampler,
            regions: RegionSet::for_client_size(client_size.0.max(1), client_size.1.max(1)),
            fault_reported: false,
        })
    }

    /// One full cycle: sample metrics, compose the frame strings, begin a
    /// frame, draw the four slots, present. A no-op while no target is
    /// bound.
    pub fn on_redraw_requested(&mut self) {
        let metrics = self.sampler.sample();
        let info = DrawInfo::compose(current_time_string(), &metrics);

        let Some(mut frame) = self.surface.begin_frame() else {
            if !self.surface.is_bound() {
                log::debug!("Redraw skipped: no bound target");
            }
            return;
        };
        self.compositor
            .draw(frame.canvas_mut(), &info, &self.regions);
        self.surface.end_frame(frame);
    }

    /// Runs the two-phase surface resize to completion, then recomputes the
    /// slot regions. A zero-sized client area means the window was
    /// minimized: the target is released and drawing stays a no-op until a
    /// restore delivers a real size. On any other failure the surface is
    /// left unbound and the user is notified once; a later successful
    /// resize re-arms the notification.
    pub fn on_resized(&mut self, width: u32, height: u32) {
        if is_minimized_extent(width, height) {
            log::warn!("Ignoring resize to {width}x{height}; releasing render target");
            self.surface.unbind();
            return;
        }

        match self.surface.resize((width, height)) {
            Ok(()) => {
                self.regions = RegionSet::for_client_size(width, height);
                self.fault_reported = false;
            }
            Err(err) => {
                log::warn!("Resize to {width}x{height} failed: {err}");
                if !self.fault_reported {
                    self.fault_reported = true;
                    notify_device_fault(&err);
                }
            }
        }
    }
}

/// A zero-dimension client area, delivered when the window is minimized.
fn is_minimized_extent(width: u32, height: u32) -> bool {
    width == 0 || height == 0
}

/// Local wall-clock time truncated to seconds.
fn current_time_string() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_client_extent_is_treated_as_minimized() {
        // Minimization delivers a 0x0 (or zero-width/height) resize; that
        // must never be classified as a device fault.
        assert!(is_minimized_extent(0, 0));
        assert!(is_minimized_extent(0, 600));
        assert!(is_minimized_extent(800, 0));
        assert!(!is_minimized_extent(800, 600));
        assert!(!is_minimized_extent(1, 1));
    }

    #[test]
    fn test_time_string_shape() {
        let s = current_time_string();
        assert_eq!(s.len(), 8);
        let bytes = s.as_bytes();
        assert_eq!(bytes[2], b':');
        assert_eq!(bytes[5], b':');
    }
}
