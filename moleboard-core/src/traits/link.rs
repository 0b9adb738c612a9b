//! Serial link trait

/// Byte transport to the game controller.
///
/// Reads are zero-wait polls: the render loop must never block on the
/// transport, so an empty link returns 0 immediately.
pub trait SerialLink {
    /// Read whatever is pending into `buf`, returning the byte count.
    /// Returns 0 when nothing is available.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Best-effort write of the whole buffer. Transmit failures are the
    /// implementation's to log; the loop carries on regardless.
    fn write(&mut self, bytes: &[u8]);
}
