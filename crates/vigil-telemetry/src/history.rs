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

//! A bounded, caller-owned sequence of snapshots.

use std::collections::VecDeque;

use vigil_core::{MetricsSnapshot, MonitorError, MonitorResult};

use crate::report::{summarize, PerformanceReport};

/// Fixed-capacity snapshot ring: pushing beyond capacity evicts the oldest
/// entry, so reports always cover the most recent stretch of sampling.
#[derive(Debug, Clone)]
pub struct MetricsHistory {
    capacity: usize,
    entries: VecDeque<MetricsSnapshot>,
}

impl MetricsHistory {
    /// Creates a history retaining at most `capacity` snapshots.
    ///
    /// Returns [`MonitorError::InvalidArgument`] for a zero capacity.
    pub fn new(capacity: usize) -> MonitorResult<Self> {
        if capacity == 0 {
            return Err(MonitorError::InvalidArgument(
                "history capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        })
    }

    /// Appends a snapshot, evicting the oldest when full.
    pub fn push(&mut self, snapshot: MetricsSnapshot) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshots are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained snapshots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recently pushed snapshot, if any.
    pub fn latest(&self) -> Option<&MetricsSnapshot> {
        self.entries.back()
    }

    /// Iterates retained snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &MetricsSnapshot> {
        self.entries.iter()
    }

    /// Drops all retained snapshots, keeping the capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Summarizes the retained window; `None` when empty.
    pub fn report(&self) -> Option<PerformanceReport> {
        summarize(self.iter())
    }
}
