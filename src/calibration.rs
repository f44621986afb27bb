//! One-time analog calibration of the poti's operating range.
//!
//! Before the control loop starts, the sensor is sampled continuously for a
//! fixed window while the operator sweeps the poti across its travel. The
//! observed minimum and maximum become the source range for every subsequent
//! rescaling step.
//!
//! The whole window runs with the edge path masked (see [`IrqGuard`]): the
//! button interrupts are unrelated to the pin being calibrated, and keeping
//! them out guarantees the window is not skewed by handler execution time
//! and that no flag toggle lands mid-calibration.

use crate::traits::{AnalogInput, Clock, IrqGuard, IrqMask};

/// Observed sensor range, produced once by [`calibrate`] and immutable after.
///
/// `lower == upper` is a valid, degenerate result (the signal never varied);
/// the range mapper handles it by pinning the output to the destination
/// floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationRange {
    /// Minimum raw value observed during the window.
    pub lower: u16,
    /// Maximum raw value observed during the window.
    pub upper: u16,
}

impl CalibrationRange {
    /// Width of the observed range.
    #[inline]
    pub const fn span(&self) -> u16 {
        self.upper.saturating_sub(self.lower)
    }

    /// True when the signal never varied during calibration.
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        self.lower == self.upper
    }
}

/// Sample the analog input continuously for `duration_ms`, tracking the
/// running minimum and maximum raw value.
///
/// The edge-notification path is masked for the entire window through an
/// [`IrqGuard`], so unmasking is guaranteed on return. Bounds start at the
/// extremes (`lower` at full scale, `upper` at zero) so the first sample
/// updates both; at least one sample is always taken. Calibration cannot
/// fail - a flat signal just produces a degenerate range.
///
/// # Example
///
/// ```rust
/// use rs_motorctl::calibrate;
/// use rs_motorctl::hal::{MockAdc, MockClock, MockIrq};
///
/// let mut adc = MockAdc::new().with_idle(400);
/// adc.queue_samples(&[400, 120, 830, 555]);
/// let clock = MockClock::new().with_auto_advance(1);
/// let mut irq = MockIrq::new();
///
/// let range = calibrate(&mut adc, &clock, &mut irq, 10);
/// assert_eq!(range.lower, 120);
/// assert_eq!(range.upper, 830);
/// assert!(!irq.masked);
/// ```
pub fn calibrate<A, C, I>(adc: &mut A, clock: &C, irq: &mut I, duration_ms: u32) -> CalibrationRange
where
    A: AnalogInput,
    C: Clock,
    I: IrqMask,
{
    let _guard = IrqGuard::new(irq);

    let deadline = clock.now_ms().saturating_add(duration_ms as u64);
    let mut lower = A::FULL_SCALE;
    let mut upper = 0u16;

    loop {
        let sample = adc.read_raw();
        if sample < lower {
            lower = sample;
        }
        if sample > upper {
            upper = sample;
        }
        if clock.now_ms() >= deadline {
            break;
        }
    }

    CalibrationRange { lower, upper }
}
