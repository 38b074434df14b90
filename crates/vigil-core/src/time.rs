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

//! Time abstractions for the sampling loop.
//!
//! The sampler never reads wall-clock time directly. It is handed a
//! [`ClockSource`] so that tests can drive it with a simulated clock and
//! hosts can supply whatever monotonic source they have (a frame callback
//! timestamp, `Instant`, a fixed-cadence timer thread).

/// A monotonic time source, in milliseconds.
///
/// Implementations must be monotonic within one sampler's lifetime: a later
/// call never returns a smaller value than an earlier one. The absolute
/// origin is arbitrary.
pub trait ClockSource: Send + Sync {
    /// Returns the current monotonic timestamp in milliseconds.
    fn now_ms(&self) -> f64;
}

/// Lifecycle state of a sampler instance.
///
/// Owned exclusively by the sampler; one instance owns exactly one active
/// sampling loop at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorState {
    /// Created but never started.
    #[default]
    Idle,
    /// Actively counting frames and emitting snapshots.
    Running,
    /// Stopped; ticks are ignored until the next `start()`.
    Stopped,
}
