//! Controller configuration with board-wiring defaults.
//!
//! Defaults describe the reference wiring: buttons on bits 4 and 5 of the
//! input bank, a 10-bit poti on channel 0, and a 16-bit PWM timer running
//! phase-correct at prescaler 8 with top 39999 (~20 ms carrier period).
//!
//! # Example
//!
//! ```rust
//! use rs_motorctl::ControllerConfig;
//!
//! // Use defaults
//! let config = ControllerConfig::default();
//! assert_eq!(config.duty_min, 5000);
//!
//! // Or customize
//! let config = ControllerConfig::default()
//!     .with_period_ms(200)
//!     .with_duty_range(0, 39999);
//! ```

/// One-time PWM carrier configuration.
///
/// Consumed by concrete [`MotorDriver`] implementations at construction:
/// counter top value, prescaler, non-inverting compare mode. The compare
/// register written at runtime is meaningful within `0..=top`; larger
/// values truncate in hardware.
///
/// [`MotorDriver`]: crate::traits::MotorDriver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PwmConfig {
    /// Counter top value (cycle length).
    pub top: u16,
    /// Clock prescaler for the counter.
    pub prescaler: u16,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            top: 39999,
            prescaler: 8,
        }
    }
}

/// Complete controller configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerConfig {
    /// Input-bank bit of the motor switch button.
    pub switch_mask: u8,
    /// Input-bank bit of the direction button.
    pub direction_mask: u8,
    /// Duty-cycle domain floor (compare value at the calibrated minimum).
    pub duty_min: u16,
    /// Duty-cycle domain ceiling (compare value at the calibrated maximum).
    pub duty_max: u16,
    /// Control-loop period in milliseconds.
    pub period_ms: u32,
    /// Length of the one-time calibration window in milliseconds.
    pub calibration_ms: u32,
    /// Analog channel the poti is wired to.
    pub adc_channel: u8,
    /// PWM carrier configuration.
    pub pwm: PwmConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            switch_mask: 1 << 4,
            direction_mask: 1 << 5,
            duty_min: 5000,
            duty_max: 29999,
            period_ms: 1000,
            calibration_ms: 10_000,
            adc_channel: 0,
            pwm: PwmConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Set the switch button's bank bit.
    pub fn with_switch_mask(mut self, mask: u8) -> Self {
        self.switch_mask = mask;
        self
    }

    /// Set the direction button's bank bit.
    pub fn with_direction_mask(mut self, mask: u8) -> Self {
        self.direction_mask = mask;
        self
    }

    /// Set the duty-cycle domain the calibrated range maps into.
    pub fn with_duty_range(mut self, duty_min: u16, duty_max: u16) -> Self {
        self.duty_min = duty_min;
        self.duty_max = duty_max;
        self
    }

    /// Set the control-loop period.
    pub fn with_period_ms(mut self, period_ms: u32) -> Self {
        self.period_ms = period_ms;
        self
    }

    /// Set the calibration window length.
    pub fn with_calibration_ms(mut self, calibration_ms: u32) -> Self {
        self.calibration_ms = calibration_ms;
        self
    }

    /// Set the poti's analog channel.
    pub fn with_adc_channel(mut self, adc_channel: u8) -> Self {
        self.adc_channel = adc_channel;
        self
    }

    /// Set the PWM carrier configuration.
    pub fn with_pwm(mut self, pwm: PwmConfig) -> Self {
        self.pwm = pwm;
        self
    }
}
