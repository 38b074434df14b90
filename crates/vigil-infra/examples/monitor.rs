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

//! Monitors this process for a few seconds and prints a performance report.
//!
//! Run with `RUST_LOG=info cargo run --example monitor -p vigil-infra`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use vigil_core::CapabilityProfile;
use vigil_infra::{EffectRegistry, MonotonicClock, SystemProbe};
use vigil_telemetry::{recommend, summarize, Sampler, SamplerConfig};

fn main() -> Result<()> {
    env_logger::init();

    let effects = EffectRegistry::new();
    let probe = Arc::new(SystemProbe::new().with_effects(effects.clone()));

    let profile = CapabilityProfile::from_probe(probe.as_ref());
    let settings = recommend(&profile);
    log::info!("Capability profile: {profile:?}");
    println!("Recommended settings:\n{}", serde_json::to_string_pretty(&settings)?);

    // Hold a few effects open so the snapshots have something to count.
    let _running_effects: Vec<_> = (0..4).map(|_| effects.begin_effect()).collect();

    let sampler = Arc::new(Sampler::with_config(
        Arc::new(MonotonicClock::new()),
        probe,
        SamplerConfig {
            window_length_ms: 500.0,
        },
    )?);
    let snapshots = vigil_infra::profile_for(
        sampler,
        Duration::from_secs(3),
        vigil_infra::DEFAULT_TICK_INTERVAL,
    );

    match summarize(&snapshots) {
        Some(report) => {
            report.log();
            println!("Report:\n{}", serde_json::to_string_pretty(&report)?);
        }
        None => println!("No complete sampling window elapsed."),
    }
    Ok(())
}
