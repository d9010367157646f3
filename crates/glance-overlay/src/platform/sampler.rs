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

//! sysinfo-based implementation of the [`MetricsSource`] contract.

use std::time::Instant;

use glance_core::{MetricsSource, RawMetrics, SamplerError};
use sysinfo::{Networks, System};

/// Samples system load through the `sysinfo` crate.
///
/// Counter sources are acquired once here and held for the process
/// lifetime; `sample` only refreshes them. Network throughput is derived
/// from per-interface receive byte deltas over the elapsed wall time, with
/// the interface list re-read on every refresh — interfaces may come and
/// go between calls.
#[derive(Debug)]
pub struct MetricsSampler {
    system: System,
    networks: Networks,
    last_sample: Instant,
}

impl MetricsSampler {
    /// Opens the counter sources and takes a priming refresh so the first
    /// real sample has a CPU and network baseline.
    pub fn new() -> Result<Self, SamplerError> {
        let mut system = System::new_all();
        system.refresh_all();
        if system.cpus().is_empty() {
            return Err(SamplerError::InitializationFailed(
                "no processors reported by the system".to_string(),
            ));
        }

        let networks = Networks::new_with_refreshed_list();
        if networks.list().is_empty() {
            log::warn!("No network interfaces reported; throughput will read zero");
        }

        log::info!(
            "Metrics sampler initialized ({} processors, {} network interfaces)",
            system.cpus().len(),
            networks.list().len()
        );

        Ok(Self {
            system,
            networks,
            last_sample: Instant::now(),
        })
    }
}

impl MetricsSource for MetricsSampler {
    fn sample(&mut self) -> RawMetrics {
        let elapsed = self.last_sample.elapsed().as_secs_f64();
        self.last_sample = Instant::now();

        self.system.refresh_cpu_usage();
        let cpu_percent = f64::from(self.system.global_cpu_usage());

        self.system.refresh_memory();
        let memory_bytes = memory_bytes_or_zero(self.system.used_memory());

        // Re-read the interface list every refresh; the sum spans every
        // interface returned, virtual or not.
        self.networks.refresh(true);
        let received: u64 = self
            .networks
            .iter()
            .map(|(_, data)| data.received())
            .sum();
        let network_bytes_per_sec = receive_rate(received, elapsed);

        RawMetrics {
            cpu_percent,
            memory_bytes,
            network_bytes_per_sec,
        }
    }
}

/// Clamps a used-memory reading into the signed range; out-of-range values
/// degrade to zero like any other unavailable counter.
fn memory_bytes_or_zero(used: u64) -> i64 {
    i64::try_from(used).unwrap_or_else(|_| {
        log::warn!("Committed memory out of range, substituting zero");
        0
    })
}

/// Receive throughput from a byte delta and the elapsed wall time. A
/// zero-length window has no meaningful rate and degrades to zero.
fn receive_rate(received_bytes: u64, elapsed_secs: f64) -> i64 {
    if elapsed_secs > 0.0 {
        (received_bytes as f64 / elapsed_secs) as i64
    } else {
        log::debug!("Zero elapsed time between samples, substituting zero throughput");
        0
    }
}
