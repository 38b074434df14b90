// Copyright 2025 the Vigil contributors
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

//! Value types produced by the sampling pipeline.

use serde::{Deserialize, Serialize};

/// The raw measurement of one completed sampling window.
///
/// Produced once per window by the sampler and consumed immediately by the
/// aggregator; it is not retained anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Number of frames delivered during the window.
    pub frame_count: u32,
    /// Actual wall time covered by the window, in milliseconds. Always
    /// positive, and may be much larger than the configured window length
    /// when the host paused tick delivery (e.g. while hidden).
    pub elapsed_ms: f64,
    /// Monotonic timestamp of the window's end, in milliseconds.
    pub timestamp_ms: f64,
}

/// A normalized performance snapshot derived from one sampling window.
///
/// Immutable value; a bounded, caller-owned sequence of these forms the
/// metrics history used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Frames per second over the window, rounded to the nearest integer.
    pub fps: u32,
    /// Live memory usage in megabytes, or 0 when the host exposes none.
    pub memory_usage_mb: u64,
    /// Number of visual effects active when the window closed, or 0 when
    /// the host cannot count them.
    pub active_effect_count: u32,
    /// Estimated processor load in percent, clamped to `[0, 100]`.
    ///
    /// This is a frame-timing-derived proxy (average frame time versus the
    /// 60 Hz frame budget), not a true utilization measurement.
    pub estimated_cpu_load_pct: f64,
    /// Estimated per-frame render time in milliseconds (the window's
    /// average frame time).
    pub estimated_render_ms: f64,
}
