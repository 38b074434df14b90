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

//! Host-environment probing contracts.
//!
//! The core never queries global environment state directly. Hosts implement
//! [`CapabilityProbe`] (one-shot environment questions) and [`LoadProbe`]
//! (live readings folded into each snapshot), and every query is
//! independently optional: an absent capability degrades to a conservative
//! default rather than failing.

use serde::{Deserialize, Serialize};

/// Memory ceiling below which a host is not considered effects-capable:
/// 1 GB, matching the decimal gigabyte the ceiling is reported against.
pub const DEFAULT_MEMORY_THRESHOLD_BYTES: u64 = 1_000_000_000;

/// Read-only, side-effect-free queries against the hosting environment.
///
/// Each method has a conservative default so a host only overrides what it
/// can actually answer.
pub trait CapabilityProbe: Send + Sync {
    /// Whether the host-level accessibility preference asks for reduced
    /// motion. Absence of the preference means `false`.
    fn reduced_motion_requested(&self) -> bool {
        false
    }

    /// Whether an accelerated rendering context can be created. A host that
    /// cannot even ask reports `false`.
    fn has_graphics_acceleration(&self) -> bool {
        false
    }

    /// The host's memory ceiling in bytes, or `None` when the host does not
    /// expose one.
    fn memory_limit_bytes(&self) -> Option<u64> {
        None
    }

    /// Host-reported logical processor count; `0` when unknown.
    fn logical_processor_count(&self) -> usize {
        0
    }

    /// Whether the hosting surface is currently visible. Hosts without a
    /// visibility concept report `true`.
    fn is_visible(&self) -> bool {
        true
    }
}

/// Live readings taken while a sampling window closes.
///
/// Returning `None` means the capability is absent; the aggregator folds
/// that into `0` in the snapshot.
pub trait LoadProbe: Send + Sync {
    /// Current memory usage of the host in megabytes.
    fn memory_usage_mb(&self) -> Option<u64> {
        None
    }

    /// Number of visual effects currently active.
    fn active_effect_count(&self) -> Option<u32> {
        None
    }
}

/// A snapshot of what the host environment can sustain.
///
/// Computed on demand from a [`CapabilityProbe`]; the core does not cache
/// it, though callers may.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    /// The host asks for reduced motion.
    pub reduced_motion_requested: bool,
    /// An accelerated rendering context is available.
    pub has_graphics_acceleration: bool,
    /// No memory ceiling is exposed, or the ceiling exceeds the threshold.
    pub has_sufficient_memory: bool,
    /// Logical processor count; `0` when unknown.
    pub logical_processor_count: usize,
}

impl CapabilityProfile {
    /// Builds a profile from a probe using [`DEFAULT_MEMORY_THRESHOLD_BYTES`].
    pub fn from_probe(probe: &dyn CapabilityProbe) -> Self {
        Self::from_probe_with_threshold(probe, DEFAULT_MEMORY_THRESHOLD_BYTES)
    }

    /// Builds a profile from a probe with an explicit memory threshold.
    ///
    /// A host without a known ceiling counts as having sufficient memory;
    /// only an exposed ceiling at or below the threshold disqualifies it.
    pub fn from_probe_with_threshold(
        probe: &dyn CapabilityProbe,
        memory_threshold_bytes: u64,
    ) -> Self {
        let has_sufficient_memory = probe
            .memory_limit_bytes()
            .is_none_or(|limit| limit > memory_threshold_bytes);
        Self {
            reduced_motion_requested: probe.reduced_motion_requested(),
            has_graphics_acceleration: probe.has_graphics_acceleration(),
            has_sufficient_memory,
            logical_processor_count: probe.logical_processor_count(),
        }
    }
}

/// A probe for hosts that can answer nothing.
///
/// Every capability query returns its conservative default and every live
/// reading is absent. Useful for headless environments and as a test donor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProbe;

impl CapabilityProbe for NullProbe {}

impl LoadProbe for NullProbe {}
