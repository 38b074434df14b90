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

//! sysinfo- and wgpu-backed implementation of the probe traits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

use sysinfo::{ProcessesToUpdate, System};
use vigil_core::{CapabilityProbe, LoadProbe};

use crate::effects::EffectRegistry;

/// A host probe that uses the `sysinfo` crate for memory and processor
/// queries and a one-shot `wgpu` adapter request for graphics acceleration.
///
/// Reduced motion and visibility have no portable desktop query, so they
/// are host-supplied toggles with the conservative defaults (not requested,
/// visible). An attached [`EffectRegistry`] supplies the live effect count.
pub struct SystemProbe {
    system: Mutex<System>,
    reduced_motion: AtomicBool,
    visible: AtomicBool,
    graphics: OnceLock<bool>,
    effects: Option<EffectRegistry>,
}

impl SystemProbe {
    /// Creates a probe with refreshed system data and no effect registry.
    pub fn new() -> Self {
        let mut system = System::new_all();
        system.refresh_all();
        Self {
            system: Mutex::new(system),
            reduced_motion: AtomicBool::new(false),
            visible: AtomicBool::new(true),
            graphics: OnceLock::new(),
            effects: None,
        }
    }

    /// Attaches the registry that supplies the live effect count.
    pub fn with_effects(mut self, effects: EffectRegistry) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Sets the host's reduced-motion preference.
    pub fn with_reduced_motion(self, requested: bool) -> Self {
        self.reduced_motion.store(requested, Ordering::Relaxed);
        self
    }

    /// Updates the host's visibility state (e.g. window minimized).
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
    }

    /// Asks wgpu for any adapter; a CPU/software adapter does not count as
    /// acceleration. Evaluated once, then cached: adapter enumeration is
    /// expensive and the answer does not change within a process lifetime.
    fn detect_graphics_acceleration() -> bool {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        match pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
        {
            Ok(adapter) => {
                let info = adapter.get_info();
                let accelerated = info.device_type != wgpu::DeviceType::Cpu;
                log::info!(
                    "[SystemProbe] Graphics adapter \"{}\" ({:?}), accelerated: {}",
                    info.name,
                    info.backend,
                    accelerated
                );
                accelerated
            }
            Err(e) => {
                log::warn!("[SystemProbe] No graphics adapter available: {e}");
                false
            }
        }
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityProbe for SystemProbe {
    fn reduced_motion_requested(&self) -> bool {
        self.reduced_motion.load(Ordering::Relaxed)
    }

    fn has_graphics_acceleration(&self) -> bool {
        *self.graphics.get_or_init(Self::detect_graphics_acceleration)
    }

    fn memory_limit_bytes(&self) -> Option<u64> {
        let system = self.system.lock().ok()?;
        let total = system.total_memory();
        (total > 0).then_some(total)
    }

    fn logical_processor_count(&self) -> usize {
        if let Ok(system) = self.system.lock() {
            system.cpus().len()
        } else {
            0
        }
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }
}

impl LoadProbe for SystemProbe {
    fn memory_usage_mb(&self) -> Option<u64> {
        let pid = sysinfo::get_current_pid().ok()?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        system
            .process(pid)
            .map(|process| process.memory() / (1024 * 1024))
    }

    fn active_effect_count(&self) -> Option<u32> {
        self.effects.as_ref().map(EffectRegistry::active_count)
    }
}
