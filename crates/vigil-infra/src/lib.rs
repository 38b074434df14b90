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

//! # Vigil Infra
//!
//! Concrete implementations of the monitoring subsystem's external
//! dependencies: a monotonic clock over `std::time::Instant`, a
//! sysinfo/wgpu-backed host probe, an effect registry for live effect
//! counting, and a fixed-cadence driver that ticks a sampler when no
//! display refresh callback is available.

#![warn(missing_docs)]

pub mod clock;
pub mod driver;
pub mod effects;
pub mod probe;

pub use clock::MonotonicClock;
pub use driver::{profile_for, SamplingDriver, DEFAULT_TICK_INTERVAL};
pub use effects::{EffectGuard, EffectRegistry};
pub use probe::SystemProbe;
