//! Desktop simulation rig (requires the `std` feature).
//!
//! Stand-ins for the board peripherals that let the whole controller run as
//! an ordinary process: wall-clock time, thread sleeps, stdout status lines,
//! a synthetic poti waveform, and a scripted button bank. Used by the
//! `desktop_sim` binary.

use std::convert::Infallible;
use std::time::Instant;

use crate::config::PwmConfig;
use crate::traits::{AnalogInput, Clock, Delay, InputBank, IrqMask, MotorDriver, StatusSink};

/// Wall-clock time source backed by [`Instant`].
#[derive(Debug)]
pub struct StdClock {
    start: Instant,
}

impl StdClock {
    /// Creates a clock whose epoch is "now".
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Blocking delay backed by [`std::thread::sleep`].
#[derive(Debug, Default)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}

/// Status sink that prints each line to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Interrupt gate for a process with no asynchronous edge path.
///
/// The desktop rig dispatches edge events inline from its own loop, so
/// there is nothing to actually suppress; both operations are no-ops.
#[derive(Debug, Default)]
pub struct NullIrq;

impl IrqMask for NullIrq {
    fn mask(&mut self) {}

    fn unmask(&mut self) {}
}

/// Synthetic poti: a triangle wave bouncing across the raw range.
///
/// Each read moves one step; the wave reverses at the configured bounds, so
/// calibration observes both extremes and the control loop sees a smoothly
/// sweeping input.
#[derive(Debug)]
pub struct TriangleWave {
    value: i32,
    step: i32,
    low: i32,
    high: i32,
}

impl TriangleWave {
    /// Creates a wave over `low..=high`, starting at `low` and rising by
    /// `step` per read.
    pub fn new(low: u16, high: u16, step: u16) -> Self {
        Self {
            value: low as i32,
            step: step as i32,
            low: low as i32,
            high: high as i32,
        }
    }
}

impl AnalogInput for TriangleWave {
    fn read_raw(&mut self) -> u16 {
        let current = self.value;
        self.value += self.step;
        if self.value >= self.high {
            self.value = self.high;
            self.step = -self.step;
        } else if self.value <= self.low {
            self.value = self.low;
            self.step = -self.step;
        }
        current as u16
    }
}

/// Scripted button bank: a fixed timeline of bank snapshots.
///
/// Each `snapshot()` call consumes one timeline entry; after the timeline
/// ends, the last value repeats forever. The dispatch glue compares
/// consecutive snapshots and forwards changes to the edge detector, the way
/// a pin-change interrupt would.
#[derive(Debug)]
pub struct ButtonScript {
    timeline: Vec<u8>,
    position: usize,
}

impl ButtonScript {
    /// Creates a script from a snapshot timeline.
    ///
    /// An empty timeline behaves like a bank stuck at all-low.
    pub fn new(timeline: Vec<u8>) -> Self {
        Self {
            timeline,
            position: 0,
        }
    }
}

impl InputBank for ButtonScript {
    fn snapshot(&mut self) -> u8 {
        let value = self
            .timeline
            .get(self.position)
            .or_else(|| self.timeline.last())
            .copied()
            .unwrap_or(0);
        if self.position < self.timeline.len() {
            self.position += 1;
        }
        value
    }
}

/// Simulated motor driver that narrates drive changes to stdout.
///
/// Mirrors a hardware backend's shape: the PWM carrier is configured at
/// construction, runtime writes go to the stored output/compare state.
/// Only changes are printed, so a steady state stays quiet.
#[derive(Debug)]
pub struct SimMotor {
    outputs: (bool, bool),
    compare: u16,
    top: u16,
}

impl SimMotor {
    /// Creates a simulated motor with the given carrier configuration.
    pub fn new(pwm: PwmConfig) -> Self {
        println!(
            "[motor] pwm configured: top={}, prescaler={}, non-inverting",
            pwm.top, pwm.prescaler
        );
        Self {
            outputs: (false, false),
            compare: 0,
            top: pwm.top,
        }
    }

    /// Current direction-output levels.
    #[inline]
    pub fn outputs(&self) -> (bool, bool) {
        self.outputs
    }

    /// Current compare value.
    #[inline]
    pub fn compare(&self) -> u16 {
        self.compare
    }
}

impl MotorDriver for SimMotor {
    type Error = Infallible;

    fn set_direction_outputs(&mut self, in_a: bool, in_b: bool) -> Result<(), Infallible> {
        if self.outputs != (in_a, in_b) {
            println!("[motor] direction outputs -> ({}, {})", in_a as u8, in_b as u8);
        }
        self.outputs = (in_a, in_b);
        Ok(())
    }

    fn set_compare(&mut self, compare: u16) -> Result<(), Infallible> {
        if self.compare != compare {
            let duty = compare as f32 / self.top as f32 * 100.0;
            println!("[motor] compare -> {compare} ({duty:.1}% duty)");
        }
        self.compare = compare;
        Ok(())
    }
}
