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

//! Error types shared across the workspace.
//!
//! Two failure domains exist. Sampler initialization failure is fatal: the
//! overlay cannot run without a metrics source. Device failures degrade the
//! surface to a non-rendering but non-crashing state; recovery only happens
//! opportunistically on a later resize. Transient counter read failures are
//! not errors at all — the sampler absorbs them silently.

use std::fmt;

/// Failure to set up the system-metrics source at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamplerError {
    /// The counter source could not be opened or registered. Fatal.
    InitializationFailed(String),
}

impl fmt::Display for SamplerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplerError::InitializationFailed(msg) => {
                write!(f, "Failed to initialize the metrics sampler: {msg}")
            }
        }
    }
}

impl std::error::Error for SamplerError {}

/// Failure in the presentation surface or its underlying device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// Device, surface, or target creation failed at startup.
    CreationFailed(String),
    /// The surface exists but cannot be used the way the overlay needs
    /// (e.g. no compatible pixel format or texture usage).
    UnsupportedSurface(String),
    /// Reconfiguring the surface at a new size failed; the surface is left
    /// without a bound target.
    ResizeFailed(String),
    /// The bound target was lost mid-session (device lost, surface
    /// outdated, out of memory).
    TargetLost(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::CreationFailed(msg) => {
                write!(f, "Failed to create the presentation surface: {msg}")
            }
            DeviceError::UnsupportedSurface(msg) => {
                write!(f, "The presentation surface is unsupported: {msg}")
            }
            DeviceError::ResizeFailed(msg) => {
                write!(f, "Failed to resize the presentation surface: {msg}")
            }
            DeviceError::TargetLost(msg) => {
                write!(f, "The render target was lost: {msg}")
            }
        }
    }
}

impl std::error::Error for DeviceError {}
