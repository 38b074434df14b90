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

//! Converts raw sampling windows into normalized metrics snapshots.

use vigil_core::{LoadProbe, MetricsSnapshot, RawSample};

/// Ideal per-frame budget at 60 Hz, in milliseconds.
pub const IDEAL_FRAME_MS: f64 = 1000.0 / 60.0;

/// Derives a [`MetricsSnapshot`] from one completed sampling window.
///
/// Pure per call: all inputs are the window measurement plus live readings
/// from the [`LoadProbe`]. Frame rate is computed from the actual elapsed
/// time of the window, so a host that paused tick delivery for several
/// seconds produces an honest (low) figure instead of an inflated one.
///
/// The processor-load figure is a heuristic derived purely from frame
/// timing: how far the window's average frame time overshoots the 60 Hz
/// budget, clamped to `[0, 100]`. It is not a utilization measurement.
pub fn aggregate(sample: &RawSample, load: &dyn LoadProbe) -> MetricsSnapshot {
    let fps = if sample.elapsed_ms > 0.0 {
        (sample.frame_count as f64 * 1000.0 / sample.elapsed_ms).round() as u32
    } else {
        0
    };

    // Guard the empty window: no frames means no meaningful frame time, so
    // the load estimate pins to zero rather than dividing by zero.
    let (avg_frame_ms, cpu_load_pct) = if sample.frame_count == 0 {
        (sample.elapsed_ms, 0.0)
    } else {
        let avg = sample.elapsed_ms / sample.frame_count as f64;
        let overshoot_pct = ((avg - IDEAL_FRAME_MS) / IDEAL_FRAME_MS * 100.0).clamp(0.0, 100.0);
        (avg, overshoot_pct)
    };

    MetricsSnapshot {
        fps,
        memory_usage_mb: load.memory_usage_mb().unwrap_or(0),
        active_effect_count: load.active_effect_count().unwrap_or(0),
        estimated_cpu_load_pct: cpu_load_pct,
        estimated_render_ms: avg_frame_ms,
    }
}
