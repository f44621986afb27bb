//! Integration tests for the control loop

use rs_motorctl::{
    calibrate, CalibrationRange, ControllerConfig, EdgeDetector, InvalidDirection,
    MotorController, MotorFlags, MotorState,
    hal::{MockAdc, MockClock, MockDriver, MockIrq, MockSink},
};

const SWITCH: u8 = 1 << 4;
const DIRECTION: u8 = 1 << 5;

fn controller<'a>(
    flags: &'a MotorFlags,
    range: CalibrationRange,
    samples: &[u16],
) -> MotorController<'a, MockDriver, MockAdc, MockSink> {
    let mut adc = MockAdc::new().with_idle(range.lower);
    adc.queue_samples(samples);
    MotorController::new(
        MockDriver::new(),
        adc,
        MockSink::new(),
        flags,
        range,
        &ControllerConfig::default(),
    )
}

#[test]
fn motor_off_coasts_and_skips_pwm_write() {
    let flags = MotorFlags::new();
    let range = CalibrationRange { lower: 100, upper: 900 };
    let mut ctl = controller(&flags, range, &[500]);

    let report = ctl.step().unwrap();

    assert_eq!(report.state, Ok(MotorState::Off));
    assert_eq!(ctl.driver().outputs, (false, false));
    assert!(ctl.driver().compare_writes.is_empty());
    assert!(ctl.sink().contains("Motor switched off"));
}

#[test]
fn forward_at_calibrated_minimum_drives_duty_floor() {
    let flags = MotorFlags::new();
    flags.switch.writer().toggle(); // switch on, direction stays forward

    let range = CalibrationRange { lower: 100, upper: 900 };
    let mut ctl = controller(&flags, range, &[100]);

    let report = ctl.step().unwrap();

    assert_eq!(report.state, Ok(MotorState::Forward));
    assert_eq!(report.calibrated, 5000);
    assert_eq!(ctl.driver().outputs, (true, false));
    assert_eq!(ctl.driver().compare_writes, [5000]);
}

#[test]
fn reverse_at_calibrated_maximum_drives_duty_ceiling() {
    let flags = MotorFlags::new();
    flags.switch.writer().toggle();
    flags.direction.writer().toggle(); // reverse

    let range = CalibrationRange { lower: 100, upper: 900 };
    let mut ctl = controller(&flags, range, &[900]);

    let report = ctl.step().unwrap();

    assert_eq!(report.state, Ok(MotorState::Reverse));
    assert_eq!(report.calibrated, 29999);
    assert_eq!(ctl.driver().outputs, (false, true));
    assert_eq!(ctl.driver().compare_writes, [29999]);
}

#[test]
fn drive_decision_is_idempotent_across_iterations() {
    let flags = MotorFlags::new();
    flags.switch.writer().toggle();

    let range = CalibrationRange { lower: 0, upper: 1000 };
    let mut ctl = controller(&flags, range, &[500, 500]);

    let first = ctl.step().unwrap();
    let second = ctl.step().unwrap();

    assert_eq!(first, second);
    assert_eq!(ctl.driver().output_writes, [(true, false), (true, false)]);
    assert_eq!(ctl.driver().compare_writes.len(), 2);
    assert_eq!(ctl.driver().compare_writes[0], ctl.driver().compare_writes[1]);
}

#[test]
fn status_line_reports_raw_and_calibrated_values() {
    let flags = MotorFlags::new();
    let range = CalibrationRange { lower: 0, upper: 1000 };
    let mut ctl = controller(&flags, range, &[250]);

    ctl.step().unwrap();

    assert!(ctl.sink().contains("Poti value: 250"));
    assert!(ctl.sink().contains("calibrated value: 11249"));
}

#[test]
fn announce_reports_both_flags() {
    let flags = MotorFlags::new();
    flags.switch.writer().toggle();

    let range = CalibrationRange { lower: 0, upper: 1000 };
    let mut ctl = controller(&flags, range, &[]);

    ctl.announce();

    assert!(ctl.sink().contains("Motor switch: 1, motor direction: 0"));
}

#[test]
fn edge_events_are_observed_by_the_next_iteration() {
    let flags = MotorFlags::new();
    let config = ControllerConfig::default();
    let mut detector = EdgeDetector::new(&flags, &config, MockSink::new());

    let range = CalibrationRange { lower: 100, upper: 900 };
    let mut ctl = controller(&flags, range, &[500, 500, 500]);

    // Iteration 1: nothing pressed yet
    assert_eq!(ctl.step().unwrap().state, Ok(MotorState::Off));

    // Switch pressed between iterations
    detector.on_pin_change(SWITCH);
    assert_eq!(ctl.step().unwrap().state, Ok(MotorState::Forward));

    // Direction pressed as well
    detector.on_pin_change(SWITCH | DIRECTION);
    assert_eq!(ctl.step().unwrap().state, Ok(MotorState::Reverse));
}

#[test]
fn full_sequence_from_calibration_to_drive() {
    let flags = MotorFlags::new();
    let config = ControllerConfig::default();

    // Calibrate over a scripted sweep
    let mut adc = MockAdc::new().with_idle(400);
    adc.queue_samples(&[400, 120, 830, 700, 200]);
    let clock = MockClock::new().with_auto_advance(1);
    let mut irq = MockIrq::new();
    let range = calibrate(&mut adc, &clock, &mut irq, 10);

    assert_eq!(range, CalibrationRange { lower: 120, upper: 830 });
    assert!(!irq.masked);

    // Button press arrives after calibration
    let mut detector = EdgeDetector::new(&flags, &config, MockSink::new());
    detector.on_pin_change(SWITCH);

    // The same ADC feeds the control loop; queue the next sample
    adc.queue_sample(830);
    let mut ctl = MotorController::new(MockDriver::new(), adc, MockSink::new(), &flags, range, &config);

    let report = ctl.step().unwrap();
    assert_eq!(report.state, Ok(MotorState::Forward));
    assert_eq!(report.calibrated, 29999);
    assert_eq!(ctl.driver().compare, Some(29999));
}

#[test]
fn driver_error_propagates_out_of_run() {
    use rs_motorctl::traits::{Delay, MotorDriver};

    struct FailingDriver {
        steps_until_failure: u32,
    }

    impl MotorDriver for FailingDriver {
        type Error = &'static str;

        fn set_direction_outputs(&mut self, _in_a: bool, _in_b: bool) -> Result<(), Self::Error> {
            if self.steps_until_failure == 0 {
                return Err("output stage fault");
            }
            self.steps_until_failure -= 1;
            Ok(())
        }

        fn set_compare(&mut self, _compare: u16) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct CountingDelay {
        calls: u32,
    }

    impl Delay for CountingDelay {
        fn delay_ms(&mut self, _ms: u32) {
            self.calls += 1;
        }
    }

    let flags = MotorFlags::new();
    flags.switch.writer().toggle();

    let range = CalibrationRange { lower: 0, upper: 1000 };
    let adc = MockAdc::new().with_idle(500);
    let driver = FailingDriver { steps_until_failure: 3 };
    let mut ctl = MotorController::new(
        driver,
        adc,
        MockSink::new(),
        &flags,
        range,
        &ControllerConfig::default(),
    );

    let mut delay = CountingDelay { calls: 0 };
    let err = ctl.run(&mut delay).unwrap_err();

    assert_eq!(err, "output stage fault");
    assert_eq!(delay.calls, 3); // three good iterations before the fault
}

#[test]
fn invalid_direction_is_reported_not_escalated() {
    let flags = MotorFlags::new();
    flags.switch.writer().toggle();
    flags.direction.writer().set_raw(5);

    let range = CalibrationRange { lower: 0, upper: 1000 };
    let mut ctl = controller(&flags, range, &[500]);

    let report = ctl.step().unwrap(); // step itself succeeds

    assert_eq!(report.state, Err(InvalidDirection(5)));
    assert!(ctl.sink().contains("Unknown motor direction: 5"));
}
