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

//! # Vigil Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! that define the monitoring subsystem's architecture.
//!
//! This crate defines the "common language" of the workspace: the value types
//! flowing through the sampling pipeline, and the abstract seams
//! ([`ClockSource`], [`CapabilityProbe`], [`LoadProbe`]) that decouple the
//! monitoring service in `vigil-telemetry` from the concrete host adapters in
//! `vigil-infra`.

#![warn(missing_docs)]

pub mod error;
pub mod probe;
pub mod sample;
pub mod settings;
pub mod time;

pub use error::{MonitorError, MonitorResult};
pub use probe::{CapabilityProbe, CapabilityProfile, LoadProbe, NullProbe};
pub use sample::{MetricsSnapshot, RawSample};
pub use settings::{AnimationPace, RecommendedSettings};
pub use time::{ClockSource, MonitorState};
