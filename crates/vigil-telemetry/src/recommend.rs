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

//! Derives a recommended operating configuration from host capabilities.
//!
//! Both functions are pure and total: a given [`CapabilityProfile`] always
//! maps to the same result, with no history dependence and no error path.

use vigil_core::{CapabilityProfile, RecommendedSettings};

/// Minimum logical processor count for the rich-effects preset.
const RICH_EFFECTS_MIN_CORES: usize = 4;

/// Whether the host can sustain rich visual effects.
///
/// Requires all of: no reduced-motion preference, graphics acceleration,
/// sufficient memory, and at least four logical processors. A reduced-motion
/// request vetoes everything else.
pub fn can_sustain_rich_effects(profile: &CapabilityProfile) -> bool {
    !profile.reduced_motion_requested
        && profile.has_graphics_acceleration
        && profile.has_sufficient_memory
        && profile.logical_processor_count >= RICH_EFFECTS_MIN_CORES
}

/// Maps a capability profile to one of the two settings presets.
pub fn recommend(profile: &CapabilityProfile) -> RecommendedSettings {
    if can_sustain_rich_effects(profile) {
        RecommendedSettings::rich()
    } else {
        RecommendedSettings::reduced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capable_profile() -> CapabilityProfile {
        CapabilityProfile {
            reduced_motion_requested: false,
            has_graphics_acceleration: true,
            has_sufficient_memory: true,
            logical_processor_count: 8,
        }
    }

    #[test]
    fn capable_host_gets_the_rich_preset() {
        let settings = recommend(&capable_profile());
        assert_eq!(settings, RecommendedSettings::rich());
        assert_eq!(settings.effect_density, 20);
        assert_eq!(settings.max_concurrent_effects, 50);
    }

    #[test]
    fn reduced_motion_vetoes_everything_else() {
        let mut profile = capable_profile();
        profile.reduced_motion_requested = true;
        assert!(!can_sustain_rich_effects(&profile));

        let settings = recommend(&profile);
        assert_eq!(settings, RecommendedSettings::reduced());
        assert_eq!(settings.effect_density, 10);
        assert_eq!(settings.max_concurrent_effects, 25);
    }

    #[test]
    fn each_missing_capability_downgrades() {
        let mut no_gpu = capable_profile();
        no_gpu.has_graphics_acceleration = false;
        assert!(!can_sustain_rich_effects(&no_gpu));

        let mut low_memory = capable_profile();
        low_memory.has_sufficient_memory = false;
        assert!(!can_sustain_rich_effects(&low_memory));

        let mut few_cores = capable_profile();
        few_cores.logical_processor_count = 3;
        assert!(!can_sustain_rich_effects(&few_cores));

        let mut unknown_cores = capable_profile();
        unknown_cores.logical_processor_count = 0;
        assert!(!can_sustain_rich_effects(&unknown_cores));
    }

    #[test]
    fn four_cores_is_the_boundary() {
        let mut profile = capable_profile();
        profile.logical_processor_count = 4;
        assert!(can_sustain_rich_effects(&profile));
    }

    #[test]
    fn recommendation_is_deterministic() {
        let profile = capable_profile();
        assert_eq!(recommend(&profile), recommend(&profile));

        let mut constrained = capable_profile();
        constrained.has_graphics_acceleration = false;
        assert_eq!(recommend(&constrained), recommend(&constrained));
    }
}
