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

//! Pre-formatted display text for exactly one frame.

use crate::format;
use crate::metrics::RawMetrics;

/// The four display strings drawn into one frame.
///
/// Built fresh every sampling cycle and dropped when the frame finishes
/// drawing; it has no identity beyond its frame and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawInfo {
    pub time_string: String,
    pub cpu_usage: String,
    pub memory_usage: String,
    pub network_usage: String,
}

impl DrawInfo {
    /// Composes the frame's strings from the wall-clock string and one raw
    /// metrics snapshot.
    pub fn compose(time_string: String, metrics: &RawMetrics) -> Self {
        Self {
            time_string,
            cpu_usage: format::format_processor_time(metrics.cpu_percent),
            memory_usage: format::format_memory(metrics.memory_bytes),
            network_usage: format::format_network(metrics.network_bytes_per_sec),
        }
    }
}
