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

//! Live accounting of in-flight visual effects.
//!
//! The host wraps each running effect in an [`EffectGuard`]; the RAII drop
//! keeps the count honest even when an effect ends early or its owner
//! panics, so the sampler's `active_effect_count` reading never drifts.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use vigil_core::LoadProbe;

/// Shared counter of currently active visual effects.
///
/// Cheap to clone; all clones share one counter. Usable directly as the
/// [`LoadProbe`] of a sampler on hosts that have nothing else to report.
#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    active: Arc<AtomicU32>,
}

impl EffectRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one effect as running until the returned guard drops.
    pub fn begin_effect(&self) -> EffectGuard {
        self.active.fetch_add(1, Ordering::Relaxed);
        EffectGuard {
            active: self.active.clone(),
        }
    }

    /// Number of effects currently running.
    pub fn active_count(&self) -> u32 {
        self.active.load(Ordering::Relaxed)
    }
}

impl LoadProbe for EffectRegistry {
    fn active_effect_count(&self) -> Option<u32> {
        Some(self.active_count())
    }
}

/// RAII marker for one running effect.
#[derive(Debug)]
pub struct EffectGuard {
    active: Arc<AtomicU32>,
}

impl Drop for EffectGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::Relaxed);
    }
}
