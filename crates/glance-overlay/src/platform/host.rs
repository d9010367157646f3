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

//! The winit windowing host.
//!
//! Owns the event loop and the overlay window; forwards redraw, resize and
//! created signals to the orchestrator. A one-second tick drives the
//! refresh: each tick requests a redraw, and winit coalesces redraw
//! requests so the core runs at most one sample-and-render cycle per
//! signal.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId, WindowLevel};

use crate::platform::sampler::MetricsSampler;
use crate::render::{notify_device_fault, FrameOrchestrator};

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const INITIAL_WIDTH: u32 = 800;
const INITIAL_HEIGHT: u32 = 600;
const SCREEN_MARGIN: u32 = 20;

struct OverlayHost {
    window: Option<Arc<Window>>,
    orchestrator: Option<FrameOrchestrator>,
    next_tick: Instant,
    startup_error: Option<String>,
}

impl ApplicationHandler for OverlayHost {
    /// Creates the overlay window and initializes the core systems.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Avoid re-initializing if the app is resumed multiple times.
        }

        log::info!("Application resumed. Creating overlay window...");

        let mut attributes = Window::default_attributes()
            .with_title("glance")
            .with_inner_size(PhysicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT))
            .with_decorations(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_visible(true);

        // Anchor near the top-right corner of the primary monitor.
        if let Some(monitor) = event_loop.primary_monitor() {
            let screen = monitor.size();
            let origin = monitor.position();
            let x = origin.x + screen.width.saturating_sub(INITIAL_WIDTH + SCREEN_MARGIN) as i32;
            let y = origin.y + SCREEN_MARGIN as i32;
            attributes = attributes.with_position(PhysicalPosition::new(x, y));
        }

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Window creation failed: {err}");
                self.startup_error = Some(format!("window creation failed: {err}"));
                event_loop.exit();
                return;
            }
        };
        log::info!("Overlay window created (id: {:?}).", window.id());

        // A sampler that cannot initialize is fatal: the overlay cannot run
        // without metrics.
        let sampler = match MetricsSampler::new() {
            Ok(sampler) => sampler,
            Err(err) => {
                log::error!("{err}");
                self.startup_error = Some(err.to_string());
                event_loop.exit();
                return;
            }
        };

        let client = window.inner_size();
        match FrameOrchestrator::new(
            window.clone(),
            (client.width, client.height),
            Box::new(sampler),
        ) {
            Ok(orchestrator) => self.orchestrator = Some(orchestrator),
            Err(err) => {
                // Degrade to a non-functional but non-crashing state: the
                // window stays up, frames and resizes are no-ops.
                notify_device_fault(&err);
            }
        }

        self.window = Some(window);
        self.next_tick = Instant::now() + TICK_INTERVAL;
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.id() != id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutdown requested, exiting event loop...");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                log::info!("Window resized to: {}x{}", size.width, size.height);
                if let Some(orchestrator) = self.orchestrator.as_mut() {
                    orchestrator.on_resized(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(orchestrator) = self.orchestrator.as_mut() {
                    orchestrator.on_redraw_requested();
                }
            }
            _ => {}
        }
    }

    /// Advances the one-second tick. Each elapsed tick requests exactly one
    /// redraw; missed ticks are not replayed.
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            let now = Instant::now();
            self.next_tick += TICK_INTERVAL;
            if self.next_tick < now {
                self.next_tick = now + TICK_INTERVAL;
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

/// Runs the overlay until the window is closed.
pub fn run() -> Result<()> {
    let event_loop = EventLoop::new()?;

    let mut host = OverlayHost {
        window: None,
        orchestrator: None,
        next_tick: Instant::now() + TICK_INTERVAL,
        startup_error: None,
    };
    event_loop.run_app(&mut host)?;

    if let Some(message) = host.startup_error {
        anyhow::bail!(message);
    }
    Ok(())
}
