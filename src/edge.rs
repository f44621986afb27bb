//! Edge detection over the button input bank.
//!
//! One [`EdgeDetector`] instance lives in the asynchronous edge path: the
//! dispatch layer (a pin-change interrupt on real hardware) reads the input
//! bank and calls [`on_pin_change`] once per hardware-level event. The
//! detector XORs the snapshot against its stored history to find the changed
//! bits, then toggles the shared flag behind each button whose bit moved.
//!
//! The handler must stay short and must not block or take locks the control
//! loop also holds: all it does is two atomic flag toggles and the status
//! lines. Status output is a blocking write on the reference transport - a
//! known latency risk, accepted.
//!
//! [`on_pin_change`]: EdgeDetector::on_pin_change

use core::fmt::Write;

use heapless::String;

use crate::config::ControllerConfig;
use crate::flags::{FlagWriter, MotorFlags};
use crate::traits::StatusSink;

/// Detects button edges on the input bank and toggles the shared flags.
///
/// Owns the input history byte exclusively: it is read and overwritten only
/// here, on each invocation, and never shared with the control loop.
///
/// # Example
///
/// ```rust
/// use rs_motorctl::{ControllerConfig, EdgeDetector, MotorFlags};
/// use rs_motorctl::hal::MockSink;
///
/// let flags = MotorFlags::new();
/// let config = ControllerConfig::default();
/// let mut detector = EdgeDetector::new(&flags, &config, MockSink::new());
///
/// // Switch button goes high (bit 4 on the default wiring)
/// detector.on_pin_change(0b0001_0000);
/// assert!(flags.switch.reader().is_set());
///
/// // ...and back low again: that edge toggles the flag off
/// detector.on_pin_change(0b0000_0000);
/// assert!(!flags.switch.reader().is_set());
/// ```
pub struct EdgeDetector<'a, S: StatusSink> {
    history: u8,
    switch_mask: u8,
    direction_mask: u8,
    switch: FlagWriter<'a>,
    direction: FlagWriter<'a>,
    sink: S,
}

impl<'a, S: StatusSink> EdgeDetector<'a, S> {
    /// Create a detector over the shared flags, with history cleared.
    ///
    /// Takes the writer half of both flags; per the ownership contract the
    /// detector is the only writer for the rest of the process lifetime.
    pub fn new(flags: &'a MotorFlags, config: &ControllerConfig, sink: S) -> Self {
        Self {
            history: 0,
            switch_mask: config.switch_mask,
            direction_mask: config.direction_mask,
            switch: flags.switch.writer(),
            direction: flags.direction.writer(),
            sink,
        }
    }

    /// Handle one pin-change event with the given bank snapshot.
    ///
    /// Computes the changed-bit mask against the stored history, replaces
    /// the history, and toggles each flag whose button bit changed. A bit
    /// that did not move is a no-op, not an error. The two flags toggle
    /// independently; a single event can toggle both.
    pub fn on_pin_change(&mut self, snapshot: u8) {
        let changed = snapshot ^ self.history;
        self.history = snapshot;

        if changed & self.switch_mask != 0 {
            let value = self.switch.toggle();
            self.report("Motor switch", value);
        }

        if changed & self.direction_mask != 0 {
            let value = self.direction.toggle();
            self.report("Motor direction", value);
        }
    }

    /// The last snapshot seen, i.e. the stored input history.
    pub fn history(&self) -> u8 {
        self.history
    }

    /// Get a reference to the status sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn report(&mut self, label: &str, value: u8) {
        let mut line: String<32> = String::new();
        let _ = write!(line, "{label}: {value}");
        self.sink.write_line(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockSink;

    const SWITCH: u8 = 1 << 4;
    const DIRECTION: u8 = 1 << 5;

    fn detector(flags: &MotorFlags) -> EdgeDetector<'_, MockSink> {
        EdgeDetector::new(flags, &ControllerConfig::default(), MockSink::new())
    }

    #[test]
    fn switch_bit_edge_toggles_switch_only() {
        let flags = MotorFlags::new();
        let mut det = detector(&flags);

        det.on_pin_change(SWITCH);

        assert_eq!(flags.switch.reader().raw(), 1);
        assert_eq!(flags.direction.reader().raw(), 0);
        assert_eq!(det.sink().lines, ["Motor switch: 1"]);
    }

    #[test]
    fn falling_edge_toggles_too() {
        let flags = MotorFlags::new();
        let mut det = detector(&flags);

        det.on_pin_change(SWITCH);
        det.on_pin_change(0);

        assert_eq!(flags.switch.reader().raw(), 0);
        assert_eq!(det.sink().lines, ["Motor switch: 1", "Motor switch: 0"]);
    }

    #[test]
    fn direction_bit_edge_toggles_direction_only() {
        let flags = MotorFlags::new();
        let mut det = detector(&flags);

        det.on_pin_change(DIRECTION);

        assert_eq!(flags.switch.reader().raw(), 0);
        assert_eq!(flags.direction.reader().raw(), 1);
        assert_eq!(det.sink().lines, ["Motor direction: 1"]);
    }

    #[test]
    fn both_bits_in_one_event_toggle_both_flags() {
        let flags = MotorFlags::new();
        let mut det = detector(&flags);

        det.on_pin_change(SWITCH | DIRECTION);

        assert_eq!(flags.switch.reader().raw(), 1);
        assert_eq!(flags.direction.reader().raw(), 1);
        assert_eq!(det.sink().lines.len(), 2);
    }

    #[test]
    fn unrelated_bits_are_ignored() {
        let flags = MotorFlags::new();
        let mut det = detector(&flags);

        det.on_pin_change(0b1000_0011);

        assert_eq!(flags.switch.reader().raw(), 0);
        assert_eq!(flags.direction.reader().raw(), 0);
        assert!(det.sink().lines.is_empty());
    }

    #[test]
    fn unchanged_snapshot_is_a_noop() {
        let flags = MotorFlags::new();
        let mut det = detector(&flags);

        det.on_pin_change(SWITCH);
        det.on_pin_change(SWITCH);

        assert_eq!(flags.switch.reader().raw(), 1);
        assert_eq!(det.sink().lines.len(), 1);
    }

    #[test]
    fn history_is_replaced_on_every_invocation() {
        let flags = MotorFlags::new();
        let mut det = detector(&flags);

        assert_eq!(det.history(), 0);
        det.on_pin_change(0b1100_0001);
        assert_eq!(det.history(), 0b1100_0001);
        det.on_pin_change(0b0000_0010);
        assert_eq!(det.history(), 0b0000_0010);
    }

    #[test]
    fn toggle_rule_holds_for_all_history_snapshot_pairs() {
        // Exhaustive over the whole 8-bit bank: the switch flag flips
        // exactly when the switch bit differs between history and snapshot,
        // and the direction flag is untouched by the switch bit.
        for history in 0..=u8::MAX {
            for snapshot in 0..=u8::MAX {
                let flags = MotorFlags::new();
                let mut det = detector(&flags);

                det.on_pin_change(history);
                let switch_before = flags.switch.reader().raw();
                let direction_before = flags.direction.reader().raw();

                det.on_pin_change(snapshot);

                let switch_flipped = flags.switch.reader().raw() != switch_before;
                let direction_flipped = flags.direction.reader().raw() != direction_before;

                assert_eq!(switch_flipped, (history ^ snapshot) & SWITCH != 0);
                assert_eq!(direction_flipped, (history ^ snapshot) & DIRECTION != 0);
            }
        }
    }

    #[test]
    fn custom_masks_are_respected() {
        let flags = MotorFlags::new();
        let config = ControllerConfig::default()
            .with_switch_mask(1 << 0)
            .with_direction_mask(1 << 1);
        let mut det = EdgeDetector::new(&flags, &config, MockSink::new());

        det.on_pin_change(0b0000_0001);
        assert_eq!(flags.switch.reader().raw(), 1);

        det.on_pin_change(0b0000_0011);
        assert_eq!(flags.direction.reader().raw(), 1);
    }
}
