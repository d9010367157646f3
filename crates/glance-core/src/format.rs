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

//! Unit-scaled formatting of raw counter values into display strings.
//!
//! Each function selects a unit by magnitude threshold and renders the
//! numeric value with one decimal, right-aligned in a five-character field.
//! Zero always renders in the smallest unit.

const KB: i64 = 1024;
const MB: i64 = KB * 1024;
const GB: i64 = MB * 1024;

// Network thresholds use a base unit of 128 bytes = 1 kilobit
// (bits = bytes * 8 folded into the divisor).
const KBPS: i64 = 128;
const MBPS: i64 = KBPS * 1024;
const GBPS: i64 = MBPS * 1024;

/// Renders aggregate processor utilization, e.g. `"CPU:  37.4%"`.
pub fn format_processor_time(percent: f64) -> String {
    format!("CPU: {percent:>5.1}%")
}

/// Renders a committed-memory byte count, e.g. `"mem:   2.2GB"`.
///
/// GB at or above 1024^3 bytes, MB at or above 1024^2, KB below that.
pub fn format_memory(bytes: i64) -> String {
    if bytes >= GB {
        format!("mem: {:>5.1}GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("mem: {:>5.1}MB", bytes as f64 / MB as f64)
    } else {
        format!("mem: {:>5.1}KB", bytes as f64 / KB as f64)
    }
}

/// Renders receive throughput, e.g. `"net:   1.1Mbps"`.
///
/// Gbps at or above 128 * 1024^2 bytes/sec, Mbps at or above 128 * 1024,
/// Kbps below that.
pub fn format_network(bytes_per_sec: i64) -> String {
    if bytes_per_sec >= GBPS {
        format!("net: {:>5.1}Gbps", bytes_per_sec as f64 / GBPS as f64)
    } else if bytes_per_sec >= MBPS {
        format!("net: {:>5.1}Mbps", bytes_per_sec as f64 / MBPS as f64)
    } else {
        format!("net: {:>5.1}Kbps", bytes_per_sec as f64 / KBPS as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processor_time_field_width() {
        assert_eq!(format_processor_time(0.0), "CPU:   0.0%");
        assert_eq!(format_processor_time(100.0), "CPU: 100.0%");
        assert_eq!(format_processor_time(37.4), "CPU:  37.4%");
        assert_eq!(format_processor_time(5.25), "CPU:   5.2%");
    }

    #[test]
    fn test_memory_unit_thresholds() {
        // Just below and at each threshold. One byte under 1 MB still
        // renders in KB (1048575 / 1024 rounds to 1024.0).
        assert_eq!(format_memory(MB - 1), "mem: 1024.0KB");
        assert!(format_memory(MB).ends_with("MB"));
        assert!(format_memory(GB - 1).ends_with("MB"));
        assert!(format_memory(GB).ends_with("GB"));
        assert_eq!(format_memory(GB), "mem:   1.0GB");
    }

    #[test]
    fn test_memory_zero_renders_smallest_unit() {
        assert_eq!(format_memory(0), "mem:   0.0KB");
    }

    #[test]
    fn test_memory_scenario_value() {
        // 2_400_000_000 / 1024^3 = 2.235... -> 2.2GB
        assert_eq!(format_memory(2_400_000_000), "mem:   2.2GB");
    }

    #[test]
    fn test_network_unit_thresholds() {
        assert!(format_network(MBPS - 1).ends_with("Kbps"));
        assert!(format_network(MBPS).ends_with("Mbps"));
        assert!(format_network(GBPS - 1).ends_with("Mbps"));
        assert!(format_network(GBPS).ends_with("Gbps"));
        assert_eq!(format_network(GBPS), "net:   1.0Gbps");
    }

    #[test]
    fn test_network_zero_renders_smallest_unit() {
        assert_eq!(format_network(0), "net:   0.0Kbps");
    }

    #[test]
    fn test_network_scenario_value() {
        // 150_000 bytes/sec with 1 Kb = 128 bytes: 150_000 / 131_072 = 1.14...
        assert_eq!(format_network(150_000), "net:   1.1Mbps");
    }

    #[test]
    fn test_network_scaling_is_128_bytes_per_kilobit() {
        // 128 bytes/sec is exactly one kilobit per second.
        assert_eq!(format_network(128), "net:   1.0Kbps");
        assert_eq!(format_network(64), "net:   0.5Kbps");
    }

    #[test]
    fn test_numeric_field_is_five_characters() {
        for s in [
            format_processor_time(37.4),
            format_memory(2_400_000_000),
            format_network(150_000),
            format_memory(0),
            format_network(0),
        ] {
            // "xxx: " prefix is 5 chars, numeric field is the next 5.
            let field = &s[5..10];
            assert_eq!(field.len(), 5, "field {field:?} in {s:?}");
            assert!(field.contains('.'), "field {field:?} in {s:?}");
        }
    }
}
