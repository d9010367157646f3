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

//! Core contracts for the glance overlay.
//!
//! This crate holds everything the overlay binary needs that does not touch
//! a graphics API or the operating system: the per-frame display strings
//! ([`DrawInfo`]), raw counter snapshots ([`RawMetrics`]) and the sampling
//! contract ([`MetricsSource`]), the unit-scaled formatters, the client-area
//! region layout, and the error enums shared across the workspace.

pub mod draw_info;
pub mod error;
pub mod format;
pub mod layout;
pub mod metrics;

pub use draw_info::DrawInfo;
pub use error::{DeviceError, SamplerError};
pub use layout::{Region, RegionSet};
pub use metrics::{MetricsSource, RawMetrics};
