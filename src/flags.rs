//! Shared toggle state crossing the interrupt/control-loop boundary.
//!
//! The switch and direction flags are the only mutable state shared between
//! the asynchronous edge path and the foreground control loop. Each flag is
//! a single atomic byte with a strict ownership contract:
//!
//! - exactly one writer context (the edge detector, interrupt side)
//! - exactly one reader context (the control loop, foreground side)
//! - no third participant, ever
//!
//! The contract is encoded in the split handles: [`FlagWriter`] exposes only
//! mutation, [`FlagReader`] only observation. Neither is `Clone`, so handing
//! one to a component moves the capability there. Operations use `Relaxed`
//! ordering: the target is a single core where byte access is inherently
//! atomic, and no other memory is published through these flags.
//!
//! The writer side never blocks and takes no lock, which keeps it safe to
//! call from an interrupt handler.
//!
//! # Example
//!
//! ```rust
//! use rs_motorctl::MotorFlags;
//!
//! static FLAGS: MotorFlags = MotorFlags::new();
//!
//! let mut writer = FLAGS.switch.writer();   // lives in the edge detector
//! let reader = FLAGS.switch.reader();       // lives in the control loop
//!
//! assert!(!reader.is_set());
//! writer.toggle();
//! assert!(reader.is_set());
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// A single-byte flag toggled by XOR of bit 0.
///
/// Backed by an [`AtomicU8`] rather than a boolean so the full raw byte is
/// observable: the control loop decodes it and can report an illegal value
/// instead of silently folding it into `true`/`false`.
///
/// `const`-constructible so a pair can live in a `static` shared between an
/// interrupt handler and the main loop.
#[derive(Debug)]
pub struct ToggleFlag(AtomicU8);

impl ToggleFlag {
    /// Create a flag holding the given initial value.
    pub const fn new(initial: u8) -> Self {
        Self(AtomicU8::new(initial))
    }

    /// Hand out the writer half. One writer context only.
    pub fn writer(&self) -> FlagWriter<'_> {
        FlagWriter { cell: self }
    }

    /// Hand out the reader half. One reader context only.
    pub fn reader(&self) -> FlagReader<'_> {
        FlagReader { cell: self }
    }

    /// Split into the writer/reader pair in one call.
    pub fn split(&self) -> (FlagWriter<'_>, FlagReader<'_>) {
        (self.writer(), self.reader())
    }
}

impl Default for ToggleFlag {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Mutating half of a [`ToggleFlag`].
///
/// Owned by the edge detector; the only mutation in normal operation is
/// [`toggle`](Self::toggle), which flips bit 0 and keeps the value in
/// `{0, 1}`.
#[derive(Debug)]
pub struct FlagWriter<'a> {
    cell: &'a ToggleFlag,
}

impl FlagWriter<'_> {
    /// Invert bit 0 of the flag and return the new value.
    ///
    /// Lock-free and non-blocking; safe from interrupt context.
    pub fn toggle(&mut self) -> u8 {
        self.cell.0.fetch_xor(1, Ordering::Relaxed) ^ 1
    }

    /// Overwrite the raw byte.
    ///
    /// Exists to exercise the defensive illegal-value branch in tests;
    /// production code has no call site for it.
    pub fn set_raw(&mut self, raw: u8) {
        self.cell.0.store(raw, Ordering::Relaxed);
    }
}

/// Observing half of a [`ToggleFlag`].
///
/// Owned by the control loop. A read is a single atomic byte load; no
/// synchronization with the writer beyond that is required or taken.
#[derive(Debug)]
pub struct FlagReader<'a> {
    cell: &'a ToggleFlag,
}

impl FlagReader<'_> {
    /// Read the raw flag byte.
    pub fn raw(&self) -> u8 {
        self.cell.0.load(Ordering::Relaxed)
    }

    /// True when the flag holds exactly `1`.
    ///
    /// Matches the control loop's enable check: any other value, legal or
    /// not, reads as "not set".
    pub fn is_set(&self) -> bool {
        self.raw() == 1
    }
}

/// The process-wide flag pair: motor switch and motor direction.
///
/// Both start at `0` (motor disabled, direction forward) and live for the
/// whole process; nothing ever destroys or re-creates them.
#[derive(Debug, Default)]
pub struct MotorFlags {
    /// "Motor enabled" flag, toggled by the switch button.
    pub switch: ToggleFlag,
    /// "Forward/reverse" flag, toggled by the direction button.
    pub direction: ToggleFlag,
}

impl MotorFlags {
    /// Create the pair with both flags cleared.
    pub const fn new() -> Self {
        Self {
            switch: ToggleFlag::new(0),
            direction: ToggleFlag::new(0),
        }
    }
}
