//! Hardware abstraction traits for motor drive, digital inputs, and analog input.
//!
//! This module defines the hardware interfaces that allow rs-motorctl to
//! work across different platforms (AVR-class boards, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`MotorDriver`] | Half-H direction outputs plus PWM compare register |
//! | [`InputBank`] | Snapshot of the digital input bank the buttons live on |
//! | [`AnalogInput`] | Raw samples from the poti channel |
//! | [`Clock`] | Monotonic time source for `no_std` environments |
//! | [`Delay`] | Blocking delay between control-loop iterations |
//! | [`IrqMask`] | Global gate for the edge-notification path |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For a desktop simulation rig, use the
//! implementations from `hal::sim` (requires the `std` feature).
//!
//! # Example
//!
//! ```rust
//! use rs_motorctl::traits::{Direction, MotorDriver};
//! use rs_motorctl::hal::MockDriver;
//!
//! let mut driver = MockDriver::new();
//! let (in_a, in_b) = Direction::Forward.outputs();
//! driver.set_direction_outputs(in_a, in_b).unwrap();
//! driver.set_compare(5000).unwrap();
//!
//! assert_eq!(driver.outputs, (true, false));
//! assert_eq!(driver.compare, Some(5000));
//! ```

use core::fmt;

/// Direction of motor rotation.
///
/// Decoded from the single-byte direction flag toggled by the direction
/// button: `0` is forward, `1` is reverse. Controls which of the two
/// half-H driver inputs is pulled high.
///
/// # Default
///
/// Defaults to [`Forward`](Self::Forward), matching the flag's power-on value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Rotating forward (flag value 0).
    #[default]
    Forward,
    /// Rotating in reverse (flag value 1).
    Reverse,
}

impl Direction {
    /// Returns the direction as a lowercase string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_motorctl::Direction;
    ///
    /// assert_eq!(Direction::Forward.as_str(), "forward");
    /// assert_eq!(Direction::Reverse.as_str(), "reverse");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }

    /// Decode a direction from the raw flag byte.
    ///
    /// The toggle-only mutation path keeps the flag in `{0, 1}`, so the
    /// error arm is unreachable in correct operation. It exists so that an
    /// illegal value is an explicit, testable condition instead of a
    /// silently mis-driven motor.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_motorctl::{Direction, InvalidDirection};
    ///
    /// assert_eq!(Direction::try_from_raw(0), Ok(Direction::Forward));
    /// assert_eq!(Direction::try_from_raw(1), Ok(Direction::Reverse));
    /// assert_eq!(Direction::try_from_raw(5), Err(InvalidDirection(5)));
    /// ```
    pub const fn try_from_raw(raw: u8) -> Result<Self, InvalidDirection> {
        match raw {
            0 => Ok(Direction::Forward),
            1 => Ok(Direction::Reverse),
            other => Err(InvalidDirection(other)),
        }
    }

    /// The half-H input pair `(in_a, in_b)` that drives this direction.
    ///
    /// Exactly one of the two outputs is high; the pair `(low, low)` is the
    /// coast state and is never produced here.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_motorctl::Direction;
    ///
    /// assert_eq!(Direction::Forward.outputs(), (true, false));
    /// assert_eq!(Direction::Reverse.outputs(), (false, true));
    /// ```
    #[inline]
    pub const fn outputs(&self) -> (bool, bool) {
        match self {
            Direction::Forward => (true, false),
            Direction::Reverse => (false, true),
        }
    }
}

/// The direction flag held a value outside `{0, 1}`.
///
/// Logically unreachable: the only writer toggles bit 0. The control loop
/// reports this condition over the status channel and leaves the direction
/// outputs untouched rather than acting on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvalidDirection(pub u8);

impl fmt::Display for InvalidDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown motor direction: {}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidDirection {}

/// Motor driver trait - two discrete direction outputs plus one PWM compare register.
///
/// Implement this trait for your motor driver hardware. The two direction
/// outputs feed the half-H driver inputs; the compare register sets the
/// PWM duty cycle against the carrier configured at construction time.
///
/// # Implementation Notes
///
/// - Concrete implementations configure their PWM carrier once in `new()`
///   (top value, prescaler, non-inverting mode); see [`PwmConfig`].
/// - `set_compare` is a fire-and-forget register write. Values beyond the
///   counter's top are accepted and truncate in hardware.
/// - Setting both direction outputs to the same level removes net drive
///   from the motor (coast).
///
/// [`PwmConfig`]: crate::config::PwmConfig
pub trait MotorDriver {
    /// Error type for driver operations.
    type Error;

    /// Drive the two half-H inputs to the given levels.
    fn set_direction_outputs(&mut self, in_a: bool, in_b: bool) -> Result<(), Self::Error>;

    /// Write the PWM compare register to set the duty cycle.
    fn set_compare(&mut self, compare: u16) -> Result<(), Self::Error>;

    /// Convenience method to remove drive from the motor.
    ///
    /// Pulls both direction outputs low; the compare register is left as is.
    fn coast(&mut self) -> Result<(), Self::Error> {
        self.set_direction_outputs(false, false)
    }
}

/// Digital input bank trait.
///
/// Abstracts the 8-bit input port the two push-buttons are wired to.
/// The edge-dispatch layer reads one snapshot per pin-change event and
/// hands it to [`EdgeDetector::on_pin_change`].
///
/// [`EdgeDetector::on_pin_change`]: crate::EdgeDetector::on_pin_change
pub trait InputBank {
    /// Returns the current snapshot of the input bank.
    fn snapshot(&mut self) -> u8;
}

/// Analog input trait for the poti channel.
///
/// One conversion per call, busy-polled to completion. The channel is
/// selected when the concrete implementation is constructed.
pub trait AnalogInput {
    /// Maximum representable raw value (10-bit converter by default).
    const FULL_SCALE: u16 = 1023;

    /// Read one raw sample. The conversion always completes.
    fn read_raw(&mut self) -> u16;
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds, used to bound the calibration
/// window. On desktop this can wrap `std::time::Instant`; on embedded,
/// a hardware timer.
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

/// Blocking delay trait.
///
/// Paces the control loop between iterations. "Blocking" means busy-wait
/// or sleep; interrupts stay enabled while waiting.
pub trait Delay {
    /// Delay for the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Global interrupt gate for the asynchronous edge-notification path.
///
/// Masking suppresses edge dispatch; it does not drop the underlying
/// hardware events on platforms that latch them. Use [`IrqGuard`] rather
/// than calling `mask`/`unmask` directly so release is tied to scope exit.
pub trait IrqMask {
    /// Suppress edge-event dispatch.
    fn mask(&mut self);

    /// Re-enable edge-event dispatch.
    fn unmask(&mut self);
}

/// Scope guard over an [`IrqMask`].
///
/// Masks on construction, unmasks on drop, so a critical section cannot
/// leak past its scope even on early return. The calibration procedure
/// holds one of these for its entire sampling window.
///
/// # Example
///
/// ```rust
/// use rs_motorctl::traits::IrqGuard;
/// use rs_motorctl::hal::MockIrq;
///
/// let mut irq = MockIrq::new();
/// {
///     let _guard = IrqGuard::new(&mut irq);
///     // edge dispatch is masked here
/// }
/// assert!(!irq.masked);
/// ```
pub struct IrqGuard<'a, I: IrqMask> {
    irq: &'a mut I,
}

impl<'a, I: IrqMask> IrqGuard<'a, I> {
    /// Mask the edge path and return the guard keeping it masked.
    pub fn new(irq: &'a mut I) -> Self {
        irq.mask();
        Self { irq }
    }
}

impl<I: IrqMask> Drop for IrqGuard<'_, I> {
    fn drop(&mut self) {
        self.irq.unmask();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Direction Tests
    // =========================================================================

    #[test]
    fn direction_default() {
        assert_eq!(Direction::default(), Direction::Forward);
    }

    #[test]
    fn direction_as_str() {
        assert_eq!(Direction::Forward.as_str(), "forward");
        assert_eq!(Direction::Reverse.as_str(), "reverse");
    }

    #[test]
    fn direction_try_from_raw_valid() {
        assert_eq!(Direction::try_from_raw(0), Ok(Direction::Forward));
        assert_eq!(Direction::try_from_raw(1), Ok(Direction::Reverse));
    }

    #[test]
    fn direction_try_from_raw_invalid() {
        for raw in 2..=u8::MAX {
            assert_eq!(Direction::try_from_raw(raw), Err(InvalidDirection(raw)));
        }
    }

    #[test]
    fn direction_outputs_exactly_one_high() {
        let (fa, fb) = Direction::Forward.outputs();
        let (ra, rb) = Direction::Reverse.outputs();
        assert!(fa && !fb);
        assert!(!ra && rb);
    }

    #[test]
    fn invalid_direction_display() {
        let err = InvalidDirection(5);
        assert_eq!(format!("{err}"), "unknown motor direction: 5");
    }

    // =========================================================================
    // MotorDriver Default Methods Tests
    // =========================================================================

    struct TestDriver {
        outputs: (bool, bool),
        compare: u16,
    }

    impl MotorDriver for TestDriver {
        type Error = ();

        fn set_direction_outputs(&mut self, in_a: bool, in_b: bool) -> Result<(), ()> {
            self.outputs = (in_a, in_b);
            Ok(())
        }

        fn set_compare(&mut self, compare: u16) -> Result<(), ()> {
            self.compare = compare;
            Ok(())
        }
    }

    #[test]
    fn motor_driver_coast_default_impl() {
        let mut driver = TestDriver {
            outputs: (true, false),
            compare: 7000,
        };

        driver.coast().unwrap();

        // Both outputs low, compare register untouched
        assert_eq!(driver.outputs, (false, false));
        assert_eq!(driver.compare, 7000);
    }

    // =========================================================================
    // IrqGuard Tests
    // =========================================================================

    struct TestIrq {
        masked: bool,
        transitions: u32,
    }

    impl IrqMask for TestIrq {
        fn mask(&mut self) {
            self.masked = true;
            self.transitions += 1;
        }

        fn unmask(&mut self) {
            self.masked = false;
            self.transitions += 1;
        }
    }

    #[test]
    fn irq_guard_masks_for_scope() {
        let mut irq = TestIrq {
            masked: false,
            transitions: 0,
        };

        {
            let _guard = IrqGuard::new(&mut irq);
        }

        assert!(!irq.masked);
        assert_eq!(irq.transitions, 2); // one mask, one unmask
    }

    #[test]
    fn irq_guard_releases_on_early_exit() {
        fn bail_early(irq: &mut TestIrq) -> Option<()> {
            let _guard = IrqGuard::new(irq);
            None?;
            Some(())
        }

        let mut irq = TestIrq {
            masked: false,
            transitions: 0,
        };
        assert!(bail_early(&mut irq).is_none());
        assert!(!irq.masked);
    }
}
