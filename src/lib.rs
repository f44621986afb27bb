//! # rs-motorctl
//!
//! A poti-driven DC motor speed and direction controller with push-button
//! toggles and PWM output.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the motor driver, button bank,
//!   analog input, status output, and interrupt gating
//! - **Edge-driven toggles**: A pin-change handler flips the shared
//!   switch/direction flags; the control loop picks them up within one period
//! - **One-time calibration**: The poti's real travel is measured inside an
//!   interrupt-masked window and becomes the mapping source range
//! - **Single-writer/single-reader flags**: Atomic byte cells with the
//!   ownership contract split into writer and reader handles
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware and status-output abstractions
//! - `flags` - Shared toggle state crossing the interrupt boundary
//! - `edge` - Changed-bit detection over the button bank
//! - `calibration` - Interrupt-masked min/max sampling window
//! - `scale` - Pure linear rescaling into the duty domain
//! - `controller` - The periodic control loop
//! - `hal` - Concrete implementations (mock for testing, sim for desktop)
//!
//! ## Example
//!
//! ```rust
//! use rs_motorctl::{
//!     calibrate, ControllerConfig, EdgeDetector, MotorController, MotorFlags, MotorState,
//!     hal::{MockAdc, MockClock, MockDriver, MockIrq, MockSink},
//! };
//!
//! let flags = MotorFlags::new();
//! let config = ControllerConfig::default();
//!
//! // Calibrate the poti while the edge path is masked
//! let mut adc = MockAdc::new().with_idle(500);
//! adc.queue_samples(&[100, 900]);
//! let clock = MockClock::new().with_auto_advance(1);
//! let mut irq = MockIrq::new();
//! let range = calibrate(&mut adc, &clock, &mut irq, 5);
//!
//! // Edge side: one detector owns the flag writers
//! let mut detector = EdgeDetector::new(&flags, &config, MockSink::new());
//!
//! // Foreground side: the controller owns the flag readers
//! let mut controller =
//!     MotorController::new(MockDriver::new(), adc, MockSink::new(), &flags, range, &config);
//!
//! // Switch button goes high; next iteration drives forward
//! detector.on_pin_change(0b0001_0000);
//! let report = controller.step().unwrap();
//! assert_eq!(report.state, Ok(MotorState::Forward));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// One-time analog calibration of the poti's operating range.
pub mod calibration;
/// Controller configuration with board-wiring defaults.
pub mod config;
/// The periodic control loop driving the motor from sensor and flags.
pub mod controller;
/// Edge detection over the button input bank.
pub mod edge;
/// Shared toggle state crossing the interrupt/control-loop boundary.
pub mod flags;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Pure linear rescaling from the calibrated range to the duty domain.
pub mod scale;
/// Core traits for hardware abstraction and status output.
pub mod traits;

// Re-exports for convenience
pub use calibration::{calibrate, CalibrationRange};
pub use config::{ControllerConfig, PwmConfig};
pub use controller::{MotorController, MotorState, StepReport};
pub use edge::EdgeDetector;
pub use flags::{FlagReader, FlagWriter, MotorFlags, ToggleFlag};
pub use scale::map_range;
pub use traits::{
    // Hardware
    AnalogInput,
    Clock,
    Delay,
    Direction,
    InputBank,
    InvalidDirection,
    IrqGuard,
    IrqMask,
    MotorDriver,
    // Status
    StatusSink,
};
