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

//! Raw metric snapshots and the sampling contract.

use std::fmt::Debug;

/// One snapshot of system load, taken once per render cycle.
///
/// Every field is always populated. A sampler that cannot read a counter
/// substitutes zero for that field rather than returning a partial struct
/// or an error — degraded reads are silent by design.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawMetrics {
    /// Aggregate processor utilization across all processors, 0.0 to 100.0.
    pub cpu_percent: f64,
    /// Committed memory in bytes.
    pub memory_bytes: i64,
    /// Receive throughput summed across all network interfaces, bytes/sec.
    pub network_bytes_per_sec: i64,
}

/// Contract for the periodic system-metrics sampler.
///
/// `sample` is infallible by contract: implementations absorb transient
/// counter read failures internally (with logging) and fall back to
/// zero-valued fields. Counter sources are acquired exactly once when the
/// implementation is constructed; sampling never re-registers them.
pub trait MetricsSource: Debug {
    /// Collects one data point. Never blocks beyond the underlying counter
    /// query and never propagates an error to the caller.
    fn sample(&mut self) -> RawMetrics;
}
