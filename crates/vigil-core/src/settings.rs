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

//! Recommended operating configuration for the host's effect layer.

use serde::{Deserialize, Serialize};

/// How quickly animations should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPace {
    /// Shortened durations, for hosts that should minimize effect work.
    Fast,
    /// Full-length durations.
    Normal,
}

/// How much visual effect work the host can sustain.
///
/// Derived deterministically from a [`CapabilityProfile`](crate::CapabilityProfile)
/// by the recommendation engine; two presets exist, rich and reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedSettings {
    /// Particle/effect density per emitter.
    pub effect_density: u32,
    /// Animation playback pace.
    pub animation_pace: AnimationPace,
    /// Whether blur effects are worthwhile.
    pub enable_blur: bool,
    /// Whether drop shadows are worthwhile.
    pub enable_shadows: bool,
    /// Whether animated gradients are worthwhile.
    pub enable_gradients: bool,
    /// Upper bound on simultaneously running effects.
    pub max_concurrent_effects: u32,
}

impl RecommendedSettings {
    /// The preset for hosts that can sustain rich effects.
    pub fn rich() -> Self {
        Self {
            effect_density: 20,
            animation_pace: AnimationPace::Normal,
            enable_blur: true,
            enable_shadows: true,
            enable_gradients: true,
            max_concurrent_effects: 50,
        }
    }

    /// The conservative preset for constrained hosts.
    pub fn reduced() -> Self {
        Self {
            effect_density: 10,
            animation_pace: AnimationPace::Fast,
            enable_blur: false,
            enable_shadows: false,
            enable_gradients: false,
            max_concurrent_effects: 25,
        }
    }
}
