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

//! Summarizes snapshot histories into human-readable performance reports.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use vigil_core::MetricsSnapshot;

/// Qualitative rating of a monitored stretch, derived from average fps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceRating {
    /// Average fps at or above 55.
    Excellent,
    /// Average fps in `[45, 55)`.
    Good,
    /// Everything below.
    Poor,
}

impl PerformanceRating {
    /// Classifies an average fps figure.
    pub fn from_average_fps(average_fps: f64) -> Self {
        if average_fps >= 55.0 {
            PerformanceRating::Excellent
        } else if average_fps >= 45.0 {
            PerformanceRating::Good
        } else {
            PerformanceRating::Poor
        }
    }
}

impl Display for PerformanceRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PerformanceRating::Excellent => "excellent",
            PerformanceRating::Good => "good",
            PerformanceRating::Poor => "poor",
        };
        write!(f, "{label}")
    }
}

/// Aggregate statistics over a sequence of snapshots.
///
/// A structured record; rendering is left to the caller, with [`to_json`]
/// and [`log`] as ready-made outputs.
///
/// [`to_json`]: PerformanceReport::to_json
/// [`log`]: PerformanceReport::log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Arithmetic mean fps over the whole sequence.
    pub average_fps: f64,
    /// Arithmetic mean memory usage in megabytes.
    pub average_memory_mb: f64,
    /// Highest simultaneous effect count seen.
    pub max_effect_count: u32,
    /// Qualitative rating derived from [`average_fps`](Self::average_fps).
    pub rating: PerformanceRating,
}

impl PerformanceReport {
    /// Serializes the report as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Emits the report through the logging facade.
    pub fn log(&self) {
        log::info!(
            "Performance report: {:.1} fps avg, {:.1} MB avg, {} effects peak, rating {}",
            self.average_fps,
            self.average_memory_mb,
            self.max_effect_count,
            self.rating
        );
    }
}

/// Summarizes a snapshot history.
///
/// Returns `None` for an empty history without performing any computation.
pub fn summarize<'a, I>(history: I) -> Option<PerformanceReport>
where
    I: IntoIterator<Item = &'a MetricsSnapshot>,
{
    let mut count = 0u64;
    let mut fps_sum = 0.0;
    let mut memory_sum = 0.0;
    let mut max_effect_count = 0u32;

    for snapshot in history {
        count += 1;
        fps_sum += snapshot.fps as f64;
        memory_sum += snapshot.memory_usage_mb as f64;
        max_effect_count = max_effect_count.max(snapshot.active_effect_count);
    }

    if count == 0 {
        return None;
    }

    let average_fps = fps_sum / count as f64;
    Some(PerformanceReport {
        average_fps,
        average_memory_mb: memory_sum / count as f64,
        max_effect_count,
        rating: PerformanceRating::from_average_fps(average_fps),
    })
}
