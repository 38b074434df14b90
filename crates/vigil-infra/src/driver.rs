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

//! Fixed-cadence tick delivery for hosts without a display refresh callback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use vigil_core::MetricsSnapshot;
use vigil_telemetry::Sampler;

/// Default tick cadence, approximating a 60 Hz display.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_micros(16_667);

/// Background thread that ticks a sampler at a fixed cadence.
///
/// One driver drives one sampler. Shutdown is cooperative: the thread
/// checks its stop flag once per tick, so it exits within one interval.
/// Dropping the driver shuts it down as well.
#[derive(Debug)]
pub struct SamplingDriver {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SamplingDriver {
    /// Spawns a driver at [`DEFAULT_TICK_INTERVAL`].
    pub fn spawn(sampler: Arc<Sampler>) -> Self {
        Self::spawn_with_interval(sampler, DEFAULT_TICK_INTERVAL)
    }

    /// Spawns a driver with an explicit tick interval.
    pub fn spawn_with_interval(sampler: Arc<Sampler>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let handle = thread::spawn(move || {
            log::debug!("[SamplingDriver] Tick thread started ({interval:?} cadence)");
            while !flag.load(Ordering::Relaxed) {
                sampler.tick();
                thread::sleep(interval);
            }
            log::debug!("[SamplingDriver] Tick thread exiting");
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stops the tick thread and waits for it to exit.
    pub fn shutdown(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("[SamplingDriver] Tick thread panicked");
            }
        }
    }
}

impl Drop for SamplingDriver {
    fn drop(&mut self) {
        self.halt();
    }
}

/// Runs a sampler under a fixed-cadence driver for a fixed duration and
/// returns every snapshot emitted.
///
/// Convenience for timed capture sessions (e.g. profiling an effects-heavy
/// scene for ten seconds and rating the result). The sampler is started
/// before and stopped after; a window still open when the duration ends is
/// discarded.
pub fn profile_for(
    sampler: Arc<Sampler>,
    duration: Duration,
    interval: Duration,
) -> Vec<MetricsSnapshot> {
    let receiver = sampler.subscribe_channel();
    sampler.start();
    let driver = SamplingDriver::spawn_with_interval(sampler.clone(), interval);
    thread::sleep(duration);
    driver.shutdown();
    sampler.stop();
    receiver.drain().collect()
}
