//! Status output trait for the line-oriented serial channel.

/// Append-only, line-oriented status channel.
///
/// The only guarantee is ordering of writes; there is no framing beyond the
/// line terminator the implementation appends. Writes may block (the
/// reference transport is a blocking serial write), which is an accepted
/// latency risk when called from the edge path.
///
/// # Example
///
/// ```rust
/// use rs_motorctl::traits::StatusSink;
/// use rs_motorctl::hal::MockSink;
///
/// let mut sink = MockSink::new();
/// sink.write_line("Motor switched off");
/// assert_eq!(sink.lines, ["Motor switched off"]);
/// ```
pub trait StatusSink {
    /// Append one line to the status channel.
    fn write_line(&mut self, line: &str);
}
