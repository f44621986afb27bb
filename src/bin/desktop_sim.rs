//! Desktop simulation of the motor controller.
//!
//! Runs the full firmware sequence as an ordinary process: status banner,
//! PWM carrier setup, interrupt-masked poti calibration, then a bounded
//! control loop with scripted button presses dispatched between iterations
//! the way a pin-change interrupt would deliver them.
//!
//! Run with:
//!
//! ```text
//! cargo run --bin desktop_sim
//! ```

use anyhow::Result;

use rs_motorctl::hal::{ButtonScript, ConsoleSink, NullIrq, SimMotor, StdClock, StdDelay, TriangleWave};
use rs_motorctl::traits::{Delay, InputBank};
use rs_motorctl::{calibrate, ControllerConfig, EdgeDetector, MotorController, MotorFlags};

/// Control-loop iterations before the demo exits.
const ITERATIONS: u32 = 30;

fn main() -> Result<()> {
    let config = ControllerConfig::default()
        .with_period_ms(200)
        .with_calibration_ms(500);

    let flags = MotorFlags::new();

    // Button timeline, one entry per loop iteration: switch on early,
    // direction flips mid-run, everything released near the end.
    let switch = config.switch_mask;
    let direction = config.direction_mask;
    let mut timeline = vec![0u8; ITERATIONS as usize];
    for (i, entry) in timeline.iter_mut().enumerate() {
        *entry = match i {
            0..=2 => 0,
            3..=14 => switch,
            15..=24 => switch | direction,
            _ => 0,
        };
    }
    let mut bank = ButtonScript::new(timeline);

    // Edge side owns the flag writers, foreground side the readers.
    let mut detector = EdgeDetector::new(&flags, &config, ConsoleSink);

    let driver = SimMotor::new(config.pwm);
    let mut adc = TriangleWave::new(80, 950, 7);
    let clock = StdClock::new();
    let mut irq = NullIrq;
    let mut delay = StdDelay;

    println!(
        "[sim] calibrating poti on channel {} for {} ms, edge path masked",
        config.adc_channel, config.calibration_ms
    );
    let range = calibrate(&mut adc, &clock, &mut irq, config.calibration_ms);
    println!("[sim] calibrated range: {}..={}", range.lower, range.upper);

    let mut controller = MotorController::new(driver, adc, ConsoleSink, &flags, range, &config);
    controller.announce();

    let mut last_snapshot = bank.snapshot();
    for _ in 0..ITERATIONS {
        // Pin-change dispatch: forward the snapshot only when a bit moved
        let snapshot = bank.snapshot();
        if snapshot != last_snapshot {
            detector.on_pin_change(snapshot);
            last_snapshot = snapshot;
        }

        controller.step()?;
        delay.delay_ms(config.period_ms);
    }

    println!("[sim] done");
    Ok(())
}
