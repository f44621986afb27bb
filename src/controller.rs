//! Foreground control loop tying sensor, flags, and motor drive together.
//!
//! This module provides [`MotorController`], the component that runs the
//! periodic poti-to-PWM loop.
//!
//! # Overview
//!
//! Each iteration the controller:
//! - reads one raw poti sample and rescales it into the duty domain
//!   using the one-time [`CalibrationRange`]
//! - reports raw and calibrated values over the status channel
//! - reads the shared switch/direction flags (single atomic byte reads)
//! - drives the direction outputs and the PWM compare register, or coasts
//!
//! The motor state is re-derived from the flags every iteration with no
//! memory of the previous state, so a button press takes effect within one
//! loop period rather than at the interrupt itself.
//!
//! # Example
//!
//! ```rust
//! use rs_motorctl::{
//!     calibrate, ControllerConfig, MotorController, MotorFlags, MotorState,
//!     hal::{MockAdc, MockClock, MockDriver, MockIrq, MockSink},
//! };
//!
//! let flags = MotorFlags::new();
//! let config = ControllerConfig::default();
//!
//! // One-time calibration with the edge path masked
//! let mut adc = MockAdc::new().with_idle(500);
//! adc.queue_samples(&[100, 900]);
//! let clock = MockClock::new().with_auto_advance(1);
//! let mut irq = MockIrq::new();
//! let range = calibrate(&mut adc, &clock, &mut irq, 5);
//!
//! let mut controller =
//!     MotorController::new(MockDriver::new(), adc, MockSink::new(), &flags, range, &config);
//!
//! // Switch flag is still clear, so the first step coasts the motor
//! let report = controller.step().unwrap();
//! assert_eq!(report.state, Ok(MotorState::Off));
//! ```

use core::fmt::Write;

use heapless::String;

use crate::calibration::CalibrationRange;
use crate::config::ControllerConfig;
use crate::flags::{FlagReader, MotorFlags};
use crate::scale::map_range;
use crate::traits::{AnalogInput, Delay, Direction, InvalidDirection, MotorDriver, StatusSink};

/// Motor drive state, re-derived from the flag pair each iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MotorState {
    /// Motor disabled; both direction outputs at the same level.
    Off,
    /// Driving forward.
    Forward,
    /// Driving in reverse.
    Reverse,
}

impl MotorState {
    /// Derive the drive state from the raw flag bytes.
    ///
    /// Pure and idempotent: the same flag values always produce the same
    /// state, with no dependence on what was derived before. The error arm
    /// surfaces a direction flag outside `{0, 1}` - unreachable through the
    /// toggle-only mutation path, but kept explicit rather than silently
    /// folded into a legal state.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_motorctl::{InvalidDirection, MotorState};
    ///
    /// assert_eq!(MotorState::derive(0, 0), Ok(MotorState::Off));
    /// assert_eq!(MotorState::derive(1, 0), Ok(MotorState::Forward));
    /// assert_eq!(MotorState::derive(1, 1), Ok(MotorState::Reverse));
    /// assert_eq!(MotorState::derive(1, 7), Err(InvalidDirection(7)));
    /// ```
    pub const fn derive(switch_raw: u8, direction_raw: u8) -> Result<Self, InvalidDirection> {
        if switch_raw != 1 {
            return Ok(MotorState::Off);
        }
        match Direction::try_from_raw(direction_raw) {
            Ok(Direction::Forward) => Ok(MotorState::Forward),
            Ok(Direction::Reverse) => Ok(MotorState::Reverse),
            Err(err) => Err(err),
        }
    }

    /// The direction being driven, if the motor is on.
    #[inline]
    pub const fn direction(&self) -> Option<Direction> {
        match self {
            MotorState::Off => None,
            MotorState::Forward => Some(Direction::Forward),
            MotorState::Reverse => Some(Direction::Reverse),
        }
    }
}

/// Outcome of one control-loop iteration.
///
/// `state` carries the defensive error when the direction flag held an
/// illegal value; the iteration itself still completes (reported, not
/// escalated).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepReport {
    /// Raw poti sample read this iteration.
    pub raw: u16,
    /// Sample rescaled into the duty domain. May leave the domain for
    /// samples outside the calibrated range; the compare register write
    /// truncates to 16 bits exactly as the hardware does.
    pub calibrated: i32,
    /// Drive state derived from the flags this iteration.
    pub state: Result<MotorState, InvalidDirection>,
}

/// The periodic control loop.
///
/// Owns the reader half of both shared flags, the immutable calibration
/// range, and the hardware handles. Runs forever after setup; each
/// iteration is a [`step`](Self::step).
///
/// # Type Parameters
///
/// - `D`: motor driver ([`MotorDriver`])
/// - `A`: analog input ([`AnalogInput`])
/// - `S`: status output ([`StatusSink`])
pub struct MotorController<'a, D, A, S>
where
    D: MotorDriver,
    A: AnalogInput,
    S: StatusSink,
{
    driver: D,
    adc: A,
    sink: S,
    switch: FlagReader<'a>,
    direction: FlagReader<'a>,
    range: CalibrationRange,
    duty_min: u16,
    duty_max: u16,
    period_ms: u32,
}

impl<'a, D, A, S> MotorController<'a, D, A, S>
where
    D: MotorDriver,
    A: AnalogInput,
    S: StatusSink,
{
    /// Create a controller over the shared flags and a finished calibration.
    ///
    /// Takes the reader half of both flags; per the ownership contract the
    /// control loop is the only reader for the rest of the process lifetime.
    pub fn new(
        driver: D,
        adc: A,
        sink: S,
        flags: &'a MotorFlags,
        range: CalibrationRange,
        config: &ControllerConfig,
    ) -> Self {
        Self {
            driver,
            adc,
            sink,
            switch: flags.switch.reader(),
            direction: flags.direction.reader(),
            range,
            duty_min: config.duty_min,
            duty_max: config.duty_max,
            period_ms: config.period_ms,
        }
    }

    /// Report the current flag values over the status channel.
    ///
    /// The startup banner; also usable as a diagnostic at any point.
    pub fn announce(&mut self) {
        let mut line: String<64> = String::new();
        let _ = write!(
            line,
            "Motor switch: {}, motor direction: {}",
            self.switch.raw(),
            self.direction.raw()
        );
        self.sink.write_line(&line);
    }

    /// Run one control-loop iteration.
    ///
    /// Sample, rescale, report, then drive according to the flags:
    ///
    /// - motor off: both direction outputs low, no compare write
    /// - motor on: exactly one direction output high, then the calibrated
    ///   value goes into the compare register
    /// - illegal direction flag: advisory status line, direction outputs
    ///   untouched; the compare write still happens, matching the drive
    ///   stage ordering of the reference behavior
    ///
    /// Only driver errors propagate; every other collaborator is
    /// fire-and-forget.
    pub fn step(&mut self) -> Result<StepReport, D::Error> {
        let raw = self.adc.read_raw();
        let calibrated = map_range(
            raw,
            self.range.lower,
            self.range.upper,
            self.duty_min,
            self.duty_max,
        );

        let mut line: String<64> = String::new();
        let _ = write!(line, "Poti value: {raw}, calibrated value: {calibrated}");
        self.sink.write_line(&line);

        let state = MotorState::derive(self.switch.raw(), self.direction.raw());
        match state {
            Ok(motor_state) => {
                if let Some(dir) = motor_state.direction() {
                    let (in_a, in_b) = dir.outputs();
                    self.driver.set_direction_outputs(in_a, in_b)?;
                    self.driver.set_compare(calibrated as u16)?;
                } else {
                    self.driver.coast()?;
                    self.sink.write_line("Motor switched off");
                }
            }
            Err(InvalidDirection(raw_flag)) => {
                let mut line: String<40> = String::new();
                let _ = write!(line, "Unknown motor direction: {raw_flag}");
                self.sink.write_line(&line);
                self.driver.set_compare(calibrated as u16)?;
            }
        }

        Ok(StepReport {
            raw,
            calibrated,
            state,
        })
    }

    /// Run the control loop forever, one [`step`](Self::step) per period.
    ///
    /// Never returns in normal operation; a driver error propagates out.
    pub fn run<T: Delay>(&mut self, delay: &mut T) -> Result<(), D::Error> {
        loop {
            self.step()?;
            delay.delay_ms(self.period_ms);
        }
    }

    /// The calibration range in use.
    pub fn range(&self) -> CalibrationRange {
        self.range
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Get a reference to the status sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the analog input.
    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}
