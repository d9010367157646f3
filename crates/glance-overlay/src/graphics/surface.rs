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

//! The double-buffered presentation surface.
//!
//! `DisplaySurface` owns the wgpu instance, surface, device and queue, plus
//! the surface configuration that describes the swapchain. Drawing only
//! ever happens against a bound target; while a resize is in flight (or
//! after a device fault) no target is bound and frame operations are
//! no-ops. The resize protocol is explicitly two-phase: [`DisplaySurface::unbind`]
//! releases the target and returns an [`UnboundSurface`] guard, the only
//! type that exposes `rebind`, so the unbind-before-reconfigure ordering is
//! enforced by construction.

use std::sync::Arc;

use glance_core::DeviceError;
use winit::window::Window;

use super::canvas::{Canvas, BACKGROUND};

/// Pixel formats the CPU compositor can upload into directly.
const SUPPORTED_FORMATS: [wgpu::TextureFormat; 4] = [
    wgpu::TextureFormat::Bgra8Unorm,
    wgpu::TextureFormat::Rgba8Unorm,
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

/// State describing the currently bound render target.
#[derive(Debug, Clone, Copy)]
struct BoundTarget {
    width: u32,
    height: u32,
}

/// One frame in flight: the acquired swapchain texture paired with the CPU
/// canvas that text is composed into.
pub struct Frame {
    texture: wgpu::SurfaceTexture,
    canvas: Canvas,
}

impl Frame {
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }
}

/// Owns the presentation target and guarantees drawing only occurs against
/// a validly bound target.
pub struct DisplaySurface {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    swap_rb: bool,
    target: Option<BoundTarget>,
}

impl DisplaySurface {
    /// Acquires a graphics device and configures a double-buffered, vsynced
    /// swapchain for `window` at `initial_size`, then binds the target.
    pub fn new(window: Arc<Window>, initial_size: (u32, u32)) -> Result<Self, DeviceError> {
        log::info!(
            "Initializing display surface at {}x{}",
            initial_size.0,
            initial_size.1
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .map_err(|e| DeviceError::CreationFailed(format!("surface creation: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| DeviceError::CreationFailed(format!("no compatible adapter: {e}")))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Selected graphics adapter: \"{}\" (backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("glance display device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| DeviceError::CreationFailed(format!("device request: {e}")))?;

        device.on_uncaptured_error(Box::new(|e| {
            log::error!("WGPU uncaptured error: {e:?}");
        }));

        let caps = surface.get_capabilities(&adapter);
        if !caps.usages.contains(wgpu::TextureUsages::COPY_DST) {
            return Err(DeviceError::UnsupportedSurface(
                "surface does not accept texel uploads (COPY_DST)".to_string(),
            ));
        }
        let format = SUPPORTED_FORMATS
            .iter()
            .copied()
            .find(|f| caps.formats.contains(f))
            .ok_or_else(|| {
                DeviceError::UnsupportedSurface(format!(
                    "no 8-bit RGBA/BGRA surface format available (offered: {:?})",
                    caps.formats
                ))
            })?;
        let swap_rb = matches!(
            format,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
        );
        log::debug!("Surface format: {format:?} (swap_rb: {swap_rb})");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_DST,
            format,
            width: initial_size.0.max(1),
            height: initial_size.1.max(1),
            // Frame-rate-locked presentation: wait for vertical sync.
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let target = BoundTarget {
            width: config.width,
            height: config.height,
        };
        log::info!("Display surface bound at {}x{}", target.width, target.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            swap_rb,
            target: Some(target),
        })
    }

    /// Whether a render target is currently bound.
    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    /// Begins a frame against the bound target: acquires the next swapchain
    /// texture and pairs it with a canvas cleared to the background color.
    ///
    /// Returns `None` when no target is bound. A lost or outdated surface
    /// releases the target so the next resize can rebuild cleanly; a
    /// timeout keeps the target and just skips this frame.
    pub fn begin_frame(&mut self) -> Option<Frame> {
        let target = self.target?;

        match self.surface.get_current_texture() {
            Ok(texture) => Some(Frame {
                texture,
                canvas: Canvas::filled(target.width, target.height, BACKGROUND),
            }),
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Frame acquisition timed out, skipping frame");
                None
            }
            Err(err) => {
                log::warn!("Frame acquisition failed ({err}), releasing render target");
                self.target = None;
                None
            }
        }
    }

    /// Ends the frame: uploads the canvas to the swapchain texture, flushes
    /// the queue, and presents with vsync. The frame is abandoned without
    /// presenting if the target was released mid-frame or the canvas no
    /// longer matches the swapchain extent.
    pub fn end_frame(&mut self, frame: Frame) {
        let Some(target) = self.target else {
            log::debug!("Frame abandoned: no bound target");
            return;
        };

        let Frame { texture, canvas } = frame;
        if canvas.width() != target.width || canvas.height() != target.height {
            log::warn!(
                "Frame abandoned: canvas {}x{} does not match target {}x{}",
                canvas.width(),
                canvas.height(),
                target.width,
                target.height
            );
            return;
        }

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &canvas.into_texel_bytes(self.swap_rb),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(target.width * 4),
                rows_per_image: Some(target.height),
            },
            wgpu::Extent3d {
                width: target.width,
                height: target.height,
                depth_or_array_layers: 1,
            },
        );
        // An empty submit flushes the pending texel upload before present.
        self.queue.submit(std::iter::empty());
        texture.present();
    }

    /// Releases the bound target. The returned guard is the only way to
    /// bind a new one, which forces the unbind-reconfigure-rebind order.
    pub fn unbind(&mut self) -> UnboundSurface<'_> {
        self.target = None;
        UnboundSurface { inner: self }
    }

    /// Resizes the swapchain: unbinds the target, reconfigures the buffers
    /// at `new_size` preserving format and buffer count, and rebinds.
    ///
    /// On failure the surface is left without a bound target; drawing stays
    /// a no-op until a later resize succeeds.
    pub fn resize(&mut self, new_size: (u32, u32)) -> Result<(), DeviceError> {
        self.unbind().rebind(new_size)
    }
}

/// A surface whose target has been released. Dropping it without calling
/// [`rebind`](UnboundSurface::rebind) leaves the surface unbound, which is
/// the degraded-but-safe state.
pub struct UnboundSurface<'a> {
    inner: &'a mut DisplaySurface,
}

impl UnboundSurface<'_> {
    /// Reconfigures the swapchain buffers at `new_size` and binds a fresh
    /// target to them.
    pub fn rebind(self, new_size: (u32, u32)) -> Result<(), DeviceError> {
        let (width, height) = new_size;
        validate_extent(width, height)?;

        let surface = self.inner;
        surface.config.width = width;
        surface.config.height = height;
        surface.surface.configure(&surface.device, &surface.config);
        surface.target = Some(BoundTarget { width, height });
        log::info!("Display surface rebound at {width}x{height}");
        Ok(())
    }
}

/// Rejects extents the swapchain cannot be configured with.
fn validate_extent(width: u32, height: u32) -> Result<(), DeviceError> {
    if width == 0 || height == 0 {
        return Err(DeviceError::ResizeFailed(format!(
            "zero-sized client area ({width}x{height})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_extent_is_a_resize_failure() {
        assert!(validate_extent(800, 600).is_ok());
        assert!(matches!(
            validate_extent(0, 600),
            Err(DeviceError::ResizeFailed(_))
        ));
        assert!(matches!(
            validate_extent(800, 0),
            Err(DeviceError::ResizeFailed(_))
        ));
        assert!(matches!(
            validate_extent(0, 0),
            Err(DeviceError::ResizeFailed(_))
        ));
    }
}
