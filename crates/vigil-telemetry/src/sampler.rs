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

//! The sampling loop: frame counting, window emission, and snapshot fan-out.
//!
//! A [`Sampler`] owns one sampling loop. The host notifies it once per
//! display refresh (or on a fixed cadence) by calling [`Sampler::tick`];
//! whenever a full window has elapsed, the window is aggregated into a
//! [`MetricsSnapshot`] and delivered synchronously to every registered
//! observer, in registration order.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Weak};

use vigil_core::{ClockSource, LoadProbe, MetricsSnapshot, MonitorError, MonitorResult,
    MonitorState, RawSample};

use crate::aggregator::aggregate;

/// Default sampling window length, in milliseconds.
pub const DEFAULT_WINDOW_LENGTH_MS: f64 = 1000.0;

type Observer = Arc<dyn Fn(&MetricsSnapshot) + Send + Sync>;

/// Configuration for a [`Sampler`].
#[derive(Debug, Clone, Copy)]
pub struct SamplerConfig {
    /// Minimum elapsed time before a window closes, in milliseconds.
    pub window_length_ms: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            window_length_ms: DEFAULT_WINDOW_LENGTH_MS,
        }
    }
}

impl SamplerConfig {
    /// Checks the configuration for caller misuse.
    pub fn validate(&self) -> MonitorResult<()> {
        if !self.window_length_ms.is_finite() || self.window_length_ms <= 0.0 {
            return Err(MonitorError::InvalidArgument(format!(
                "window length must be a positive, finite number of milliseconds (got {})",
                self.window_length_ms
            )));
        }
        Ok(())
    }
}

/// Window accumulation owned exclusively by one sampler.
#[derive(Debug)]
struct WindowState {
    state: MonitorState,
    frame_count: u32,
    window_start_ms: f64,
}

/// Registered snapshot consumers.
#[derive(Default)]
struct Registry {
    next_token: u64,
    observers: Vec<(u64, Observer)>,
    channels: Vec<flume::Sender<MetricsSnapshot>>,
}

/// Handle returned by [`Sampler::subscribe`].
///
/// Cancelling removes exactly the observer it was issued for; tokens are
/// stable, so duplicate registrations of the same closure stay independent.
/// Dropping the handle without calling [`Subscription::cancel`] leaves the
/// observer registered for the sampler's lifetime.
pub struct Subscription {
    token: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Unregisters the observer this handle was issued for.
    pub fn cancel(self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut guard = registry.lock().unwrap();
            guard.observers.retain(|(token, _)| *token != self.token);
        }
    }
}

/// Samples rendering performance over time.
///
/// Internally synchronized: `start`, `stop`, and `subscribe` are safe to
/// call from outside the tick callback. Multiple independent samplers share
/// no mutable state; each owns its own frame counter and window clock.
pub struct Sampler {
    clock: Arc<dyn ClockSource>,
    load: Arc<dyn LoadProbe>,
    window_length_ms: f64,
    window: Mutex<WindowState>,
    registry: Arc<Mutex<Registry>>,
}

impl Sampler {
    /// Creates a sampler with the default one-second window.
    pub fn new(clock: Arc<dyn ClockSource>, load: Arc<dyn LoadProbe>) -> Self {
        // The default configuration is always valid.
        Self::with_config(clock, load, SamplerConfig::default())
            .expect("default sampler configuration is valid")
    }

    /// Creates a sampler with an explicit configuration.
    ///
    /// Returns [`MonitorError::InvalidArgument`] for a non-positive or
    /// non-finite window length.
    pub fn with_config(
        clock: Arc<dyn ClockSource>,
        load: Arc<dyn LoadProbe>,
        config: SamplerConfig,
    ) -> MonitorResult<Self> {
        config.validate()?;
        Ok(Self {
            clock,
            load,
            window_length_ms: config.window_length_ms,
            window: Mutex::new(WindowState {
                state: MonitorState::Idle,
                frame_count: 0,
                window_start_ms: 0.0,
            }),
            registry: Arc::new(Mutex::new(Registry::default())),
        })
    }

    /// Begins a fresh sampling loop.
    ///
    /// Idempotent: calling `start` while already running is a no-op.
    /// Otherwise the frame counter resets and a new window opens at the
    /// current clock reading.
    pub fn start(&self) {
        let mut window = self.window.lock().unwrap();
        if window.state == MonitorState::Running {
            log::trace!("[Sampler] start() while running; ignoring");
            return;
        }
        window.state = MonitorState::Running;
        window.frame_count = 0;
        window.window_start_ms = self.clock.now_ms();
        log::info!(
            "[Sampler] Started ({} ms window)",
            self.window_length_ms
        );
    }

    /// Stops the sampling loop. Idempotent.
    ///
    /// An in-progress window is discarded without emitting a snapshot, and
    /// any tick already in flight delivers nothing.
    pub fn stop(&self) {
        let mut window = self.window.lock().unwrap();
        if window.state == MonitorState::Stopped {
            return;
        }
        window.state = MonitorState::Stopped;
        window.frame_count = 0;
        log::info!("[Sampler] Stopped");
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> MonitorState {
        self.window.lock().unwrap().state
    }

    /// Registers an observer for every snapshot this sampler emits while
    /// running. Observers are invoked synchronously within the tick, in
    /// registration order, and must be lightweight: a slow observer delays
    /// the next tick.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&MetricsSnapshot) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock().unwrap();
        let token = registry.next_token;
        registry.next_token += 1;
        registry.observers.push((token, Arc::new(observer)));
        Subscription {
            token,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Returns a channel receiving every snapshot this sampler emits.
    ///
    /// For consumers that poll on their own schedule instead of running
    /// inline with the tick. A dropped receiver is pruned on the next
    /// emission.
    pub fn subscribe_channel(&self) -> flume::Receiver<MetricsSnapshot> {
        let (sender, receiver) = flume::unbounded();
        self.registry.lock().unwrap().channels.push(sender);
        receiver
    }

    /// One host tick: a frame was (or would have been) presented.
    ///
    /// Ignored unless running. When the accumulated window reaches the
    /// configured length, it is aggregated and fanned out; frame rate comes
    /// from the window's actual elapsed time, so a long host pause produces
    /// one honest window instead of an inflated figure.
    pub fn tick(&self) {
        let snapshot = {
            let mut window = self.window.lock().unwrap();
            if window.state != MonitorState::Running {
                return;
            }
            window.frame_count += 1;
            let now = self.clock.now_ms();
            let elapsed = now - window.window_start_ms;
            if elapsed < self.window_length_ms {
                return;
            }
            let sample = RawSample {
                frame_count: window.frame_count,
                elapsed_ms: elapsed,
                timestamp_ms: now,
            };
            window.frame_count = 0;
            window.window_start_ms = now;
            log::trace!(
                "[Sampler] Window closed: {} frames over {:.1} ms",
                sample.frame_count,
                sample.elapsed_ms
            );
            aggregate(&sample, self.load.as_ref())
        };
        self.deliver(&snapshot);
    }

    /// Fans a snapshot out to all registered consumers.
    ///
    /// The observer list is copied out of the registry lock first, so an
    /// observer may re-entrantly subscribe, cancel, or stop the sampler
    /// without deadlocking. A panicking observer is isolated and logged;
    /// delivery continues with the remaining observers.
    fn deliver(&self, snapshot: &MetricsSnapshot) {
        let observers: Vec<Observer> = {
            let registry = self.registry.lock().unwrap();
            registry
                .observers
                .iter()
                .map(|(_, observer)| observer.clone())
                .collect()
        };
        for observer in observers {
            if catch_unwind(AssertUnwindSafe(|| observer(snapshot))).is_err() {
                log::warn!("[Sampler] Observer panicked while handling a snapshot; skipping it");
            }
        }

        let mut registry = self.registry.lock().unwrap();
        registry
            .channels
            .retain(|sender| sender.send(*snapshot).is_ok());
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("window_length_ms", &self.window_length_ms)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic clock the tests advance by hand.
    struct TestClock {
        ms: Mutex<f64>,
    }

    impl TestClock {
        fn new() -> Arc<Self> {
            Arc::new(Self { ms: Mutex::new(0.0) })
        }

        fn advance(&self, delta_ms: f64) {
            *self.ms.lock().unwrap() += delta_ms;
        }
    }

    impl ClockSource for TestClock {
        fn now_ms(&self) -> f64 {
            *self.ms.lock().unwrap()
        }
    }

    fn sampler_with_clock(clock: Arc<TestClock>) -> Sampler {
        Sampler::new(clock, Arc::new(vigil_core::NullProbe))
    }

    fn collecting_observer(
        sampler: &Sampler,
    ) -> (Arc<Mutex<Vec<MetricsSnapshot>>>, Subscription) {
        let collected = Arc::new(Mutex::new(Vec::new()));
        let sink = collected.clone();
        let subscription = sampler.subscribe(move |snapshot| {
            sink.lock().unwrap().push(*snapshot);
        });
        (collected, subscription)
    }

    /// Drives `frames` ticks with `step_ms` of clock time between them.
    fn drive(sampler: &Sampler, clock: &TestClock, frames: u32, step_ms: f64) {
        for _ in 0..frames {
            clock.advance(step_ms);
            sampler.tick();
        }
    }

    #[test]
    fn start_is_idempotent() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());
        assert_eq!(sampler.state(), MonitorState::Idle);
        sampler.start();
        sampler.start();
        assert_eq!(sampler.state(), MonitorState::Running);
    }

    #[test]
    fn ticks_before_start_are_ignored() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());
        let (collected, _subscription) = collecting_observer(&sampler);
        drive(&sampler, &clock, 120, 16.0);
        assert!(collected.lock().unwrap().is_empty());
    }

    #[test]
    fn a_full_window_emits_one_snapshot() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());
        let (collected, _subscription) = collecting_observer(&sampler);

        sampler.start();
        // 50 frames at an exactly representable 20 ms step close the
        // 1000 ms window on the 50th tick.
        drive(&sampler, &clock, 50, 20.0);

        let snapshots = collected.lock().unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].fps, 50);
        // 20 ms frames overshoot the 16.67 ms budget by 20%.
        assert!((snapshots[0].estimated_cpu_load_pct - 20.0).abs() < 1e-6);
    }

    #[test]
    fn partial_windows_never_escape() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());
        let (collected, _subscription) = collecting_observer(&sampler);

        sampler.start();
        drive(&sampler, &clock, 30, 16.0); // 480 ms accumulated
        assert!(collected.lock().unwrap().is_empty());
    }

    #[test]
    fn consecutive_windows_reset_the_counter() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());
        let (collected, _subscription) = collecting_observer(&sampler);

        sampler.start();
        drive(&sampler, &clock, 100, 20.0);

        let snapshots = collected.lock().unwrap();
        assert_eq!(snapshots.len(), 2);
        // Both windows saw 50 frames; the counter did not carry over.
        assert_eq!(snapshots[0].fps, 50);
        assert_eq!(snapshots[1].fps, 50);
    }

    #[test]
    fn long_pause_produces_one_honest_window() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());
        let (collected, _subscription) = collecting_observer(&sampler);

        sampler.start();
        drive(&sampler, &clock, 30, 16.0); // 480 ms of normal delivery
        clock.advance(4520.0); // host hidden for ~4.5 s, no ticks
        sampler.tick(); // delivery resumes

        let snapshots = collected.lock().unwrap();
        assert_eq!(snapshots.len(), 1);
        // 31 frames over 5000 ms: honest 6 fps, not a resumed-tick spike.
        assert_eq!(snapshots[0].fps, 6);
    }

    #[test]
    fn stop_discards_the_open_window() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());
        let (collected, _subscription) = collecting_observer(&sampler);

        sampler.start();
        drive(&sampler, &clock, 50, 16.0); // 800 ms accumulated
        sampler.stop();
        assert_eq!(sampler.state(), MonitorState::Stopped);

        // A tick that was already pending when stop() ran delivers nothing,
        // even though more than a window of clock time has now passed.
        clock.advance(1000.0);
        sampler.tick();
        assert!(collected.lock().unwrap().is_empty());
    }

    #[test]
    fn stop_then_start_opens_a_fresh_window() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());
        let (collected, _subscription) = collecting_observer(&sampler);

        sampler.start();
        drive(&sampler, &clock, 50, 16.0);
        sampler.stop();
        clock.advance(10_000.0); // idle time must not leak into the next window

        sampler.start();
        drive(&sampler, &clock, 50, 20.0);

        let snapshots = collected.lock().unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].fps, 50);
    }

    #[test]
    fn observers_receive_in_registration_order() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());

        let order = Arc::new(Mutex::new(Vec::new()));
        let first = order.clone();
        let _a = sampler.subscribe(move |_| first.lock().unwrap().push("first"));
        let second = order.clone();
        let _b = sampler.subscribe(move |_| second.lock().unwrap().push("second"));

        sampler.start();
        drive(&sampler, &clock, 50, 20.0);

        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn cancelled_subscription_stops_delivery_for_that_observer_only() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());

        let (kept, _kept_subscription) = collecting_observer(&sampler);
        let (cancelled, cancelled_subscription) = collecting_observer(&sampler);

        sampler.start();
        drive(&sampler, &clock, 50, 20.0);
        cancelled_subscription.cancel();
        drive(&sampler, &clock, 50, 20.0);

        assert_eq!(kept.lock().unwrap().len(), 2);
        assert_eq!(cancelled.lock().unwrap().len(), 1);
    }

    #[test]
    fn panicking_observer_does_not_starve_later_observers() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());

        let _bomb = sampler.subscribe(|_| panic!("observer failure"));
        let (collected, _subscription) = collecting_observer(&sampler);

        // Keep the test log free of the expected panic backtrace.
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));
        sampler.start();
        drive(&sampler, &clock, 100, 20.0);
        std::panic::set_hook(previous_hook);

        // Both windows reached the healthy observer, so the failure neither
        // blocked delivery nor corrupted the following window.
        assert_eq!(collected.lock().unwrap().len(), 2);
    }

    #[test]
    fn channel_subscribers_receive_snapshots() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());
        let receiver = sampler.subscribe_channel();

        sampler.start();
        drive(&sampler, &clock, 100, 20.0);

        let received: Vec<_> = receiver.drain().collect();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].fps, 50);
    }

    #[test]
    fn dropped_channel_receiver_is_pruned() {
        let clock = TestClock::new();
        let sampler = sampler_with_clock(clock.clone());
        let receiver = sampler.subscribe_channel();
        drop(receiver);

        sampler.start();
        // Must not panic or error; the dead sender is silently removed.
        drive(&sampler, &clock, 50, 20.0);
    }

    #[test]
    fn re_entrant_stop_from_an_observer_does_not_deadlock() {
        let clock = TestClock::new();
        let sampler = Arc::new(sampler_with_clock(clock.clone()));

        let inner = sampler.clone();
        let _subscription = sampler.subscribe(move |_| inner.stop());

        sampler.start();
        drive(&sampler, &clock, 50, 20.0);
        assert_eq!(sampler.state(), MonitorState::Stopped);
    }

    #[test]
    fn invalid_window_length_is_rejected() {
        let clock = TestClock::new();
        let load: Arc<dyn LoadProbe> = Arc::new(vigil_core::NullProbe);

        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = Sampler::with_config(
                clock.clone(),
                load.clone(),
                SamplerConfig {
                    window_length_ms: bad,
                },
            );
            assert!(matches!(
                result,
                Err(MonitorError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn independent_samplers_share_no_state() {
        let clock = TestClock::new();
        let first = sampler_with_clock(clock.clone());
        let second = sampler_with_clock(clock.clone());
        let (collected_first, _s1) = collecting_observer(&first);
        let (collected_second, _s2) = collecting_observer(&second);

        first.start();
        second.start();
        // Only the first sampler receives ticks.
        drive(&first, &clock, 50, 20.0);

        assert_eq!(collected_first.lock().unwrap().len(), 1);
        assert_eq!(collected_first.lock().unwrap()[0].fps, 50);
        // The second sampler owns its own counter and window; nothing leaked.
        assert!(collected_second.lock().unwrap().is_empty());
        assert_eq!(second.state(), MonitorState::Running);
    }
}
