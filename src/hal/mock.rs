//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware traits, enabling
//! development and testing on desktop without a board attached.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockDriver`] | [`MotorDriver`] | Records direction-output and compare writes |
//! | [`MockBank`] | [`InputBank`] | Directly settable bank value |
//! | [`MockAdc`] | [`AnalogInput`] | Queued sample values |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockIrq`] | [`IrqMask`] | Tracks mask state and call counts |
//! | [`MockSink`] | [`StatusSink`] | Captures emitted lines |
//!
//! # Example
//!
//! ```rust
//! use rs_motorctl::{ControllerConfig, MotorController, MotorFlags, MotorState};
//! use rs_motorctl::calibration::CalibrationRange;
//! use rs_motorctl::hal::{MockAdc, MockDriver, MockSink};
//!
//! let flags = MotorFlags::new();
//! flags.switch.writer().toggle(); // motor on
//!
//! let mut adc = MockAdc::new();
//! adc.queue_sample(100);
//!
//! let range = CalibrationRange { lower: 100, upper: 900 };
//! let mut controller = MotorController::new(
//!     MockDriver::new(),
//!     adc,
//!     MockSink::new(),
//!     &flags,
//!     range,
//!     &ControllerConfig::default(),
//! );
//!
//! let report = controller.step().unwrap();
//! assert_eq!(report.state, Ok(MotorState::Forward));
//! assert_eq!(controller.driver().compare, Some(5000));
//! ```
//!
//! [`MotorDriver`]: crate::traits::MotorDriver
//! [`InputBank`]: crate::traits::InputBank
//! [`AnalogInput`]: crate::traits::AnalogInput
//! [`Clock`]: crate::traits::Clock
//! [`IrqMask`]: crate::traits::IrqMask
//! [`StatusSink`]: crate::traits::StatusSink

use core::cell::Cell;

use crate::traits::{AnalogInput, Clock, Delay, InputBank, IrqMask, MotorDriver, StatusSink};

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock motor driver for testing.
///
/// Records every direction-output and compare write for verification. Use
/// the public fields to inspect state after test operations.
///
/// # Example
///
/// ```rust
/// use rs_motorctl::hal::MockDriver;
/// use rs_motorctl::traits::MotorDriver;
///
/// let mut driver = MockDriver::new();
/// driver.set_direction_outputs(true, false).unwrap();
/// driver.set_compare(5000).unwrap();
///
/// assert_eq!(driver.outputs, (true, false));
/// assert_eq!(driver.compare, Some(5000));
/// assert_eq!(driver.compare_writes, [5000]);
/// ```
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Current direction-output levels `(in_a, in_b)`.
    pub outputs: (bool, bool),
    /// Last compare value written, `None` if never written.
    pub compare: Option<u16>,
    /// Every direction-output write, in order.
    pub output_writes: Vec<(bool, bool)>,
    /// Every compare write, in order.
    pub compare_writes: Vec<u16>,
}

impl MockDriver {
    /// Creates a new mock driver with both outputs low.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MotorDriver for MockDriver {
    type Error = ();

    fn set_direction_outputs(&mut self, in_a: bool, in_b: bool) -> Result<(), ()> {
        self.outputs = (in_a, in_b);
        self.output_writes.push((in_a, in_b));
        Ok(())
    }

    fn set_compare(&mut self, compare: u16) -> Result<(), ()> {
        self.compare = Some(compare);
        self.compare_writes.push(compare);
        Ok(())
    }
}

/// Mock digital input bank.
///
/// The bank value is set directly by the test and returned verbatim by
/// every snapshot.
#[derive(Debug, Default)]
pub struct MockBank {
    /// Current bank value returned by `snapshot()`.
    pub value: u8,
}

impl MockBank {
    /// Creates a bank with all bits low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bank value.
    pub fn set(&mut self, value: u8) {
        self.value = value;
    }
}

impl InputBank for MockBank {
    fn snapshot(&mut self) -> u8 {
        self.value
    }
}

/// Mock analog input for testing.
///
/// Queued samples are returned in FIFO order; once the queue drains, every
/// further read returns the configurable idle value.
///
/// # Example
///
/// ```rust
/// use rs_motorctl::hal::MockAdc;
/// use rs_motorctl::traits::AnalogInput;
///
/// let mut adc = MockAdc::new().with_idle(512);
/// adc.queue_samples(&[100, 900]);
///
/// assert_eq!(adc.read_raw(), 100);
/// assert_eq!(adc.read_raw(), 900);
/// assert_eq!(adc.read_raw(), 512); // queue empty
/// ```
#[derive(Debug, Default)]
pub struct MockAdc {
    samples: Vec<u16>,
    idle: u16,
    /// Number of reads performed.
    pub read_count: usize,
}

impl MockAdc {
    /// Creates a mock ADC with an empty queue and idle value 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value returned once the queue is drained.
    pub fn with_idle(mut self, idle: u16) -> Self {
        self.idle = idle;
        self
    }

    /// Queue one sample.
    pub fn queue_sample(&mut self, sample: u16) {
        self.samples.push(sample);
    }

    /// Queue multiple samples, returned in the given order.
    pub fn queue_samples(&mut self, samples: &[u16]) {
        self.samples.extend_from_slice(samples);
    }
}

impl AnalogInput for MockAdc {
    fn read_raw(&mut self) -> u16 {
        self.read_count += 1;
        if self.samples.is_empty() {
            self.idle
        } else {
            self.samples.remove(0)
        }
    }
}

/// Mock clock for testing.
///
/// Time only moves when the test says so: either explicitly via
/// [`set`](Self::set)/[`advance`](Self::advance), or implicitly through
/// [`with_auto_advance`](Self::with_auto_advance), which bumps the clock on
/// every read so fixed-duration busy loops terminate under test.
///
/// # Example
///
/// ```rust
/// use rs_motorctl::hal::MockClock;
/// use rs_motorctl::traits::Clock;
///
/// let clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 500);
///
/// let ticking = MockClock::new().with_auto_advance(10);
/// assert_eq!(ticking.now_ms(), 0);
/// assert_eq!(ticking.now_ms(), 10);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    now: Cell<u64>,
    auto_advance: Cell<u64>,
}

impl MockClock {
    /// Creates a mock clock starting at 0 ms with auto-advance disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `step` on every `now_ms()` call.
    pub fn with_auto_advance(self, step: u64) -> Self {
        self.auto_advance.set(step);
        self
    }

    /// Set the current time in milliseconds.
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.auto_advance.get());
        now
    }
}

/// Mock delay that records requested durations without waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Every requested delay, in order.
    pub delays: Vec<u32>,
}

impl MockDelay {
    /// Creates a new mock delay.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
    }
}

/// Mock interrupt gate for testing.
///
/// Tracks the current mask state and how often each side was called, so
/// tests can assert a critical section was entered and left exactly once.
#[derive(Debug, Default)]
pub struct MockIrq {
    /// Whether the edge path is currently masked.
    pub masked: bool,
    /// Number of `mask()` calls.
    pub mask_count: usize,
    /// Number of `unmask()` calls.
    pub unmask_count: usize,
}

impl MockIrq {
    /// Creates a new mock gate, unmasked.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IrqMask for MockIrq {
    fn mask(&mut self) {
        self.masked = true;
        self.mask_count += 1;
    }

    fn unmask(&mut self) {
        self.masked = false;
        self.unmask_count += 1;
    }
}

// ============================================================================
// Status Mock
// ============================================================================

/// Mock status sink that captures every emitted line.
///
/// # Example
///
/// ```rust
/// use rs_motorctl::hal::MockSink;
/// use rs_motorctl::traits::StatusSink;
///
/// let mut sink = MockSink::new();
/// sink.write_line("Motor switch: 1");
///
/// assert_eq!(sink.lines, ["Motor switch: 1"]);
/// assert!(sink.contains("switch"));
/// ```
#[derive(Debug, Default)]
pub struct MockSink {
    /// Captured lines, in emission order.
    pub lines: Vec<String>,
}

impl MockSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl StatusSink for MockSink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.into());
    }
}

// ============================================================================
// Tests
// ============================================================================
