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

//! # Vigil Telemetry
//!
//! The monitoring service: samples frame delivery through a host-driven tick,
//! aggregates completed windows into [`vigil_core::MetricsSnapshot`]s, fans them out to
//! observers, derives recommended effect settings from host capabilities, and
//! summarizes snapshot histories into performance reports.
//!
//! The abstract contracts live in `vigil-core`; concrete host adapters
//! (clocks, probes, drivers) live in `vigil-infra`.

#![warn(missing_docs)]

pub mod aggregator;
pub mod history;
pub mod recommend;
pub mod report;
pub mod sampler;

pub use aggregator::{aggregate, IDEAL_FRAME_MS};
pub use history::MetricsHistory;
pub use recommend::{can_sustain_rich_effects, recommend};
pub use report::{summarize, PerformanceRating, PerformanceReport};
pub use sampler::{Sampler, SamplerConfig, Subscription, DEFAULT_WINDOW_LENGTH_MS};
