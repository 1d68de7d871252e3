//! Register write sink trait.
//!
//! Register sequences are produced once and replayed into whatever accepts
//! them. The `RegisterSink` trait is that seam:
//! 1. **Model:** Applies the writes to the addressed stage.
//! 2. **Test utility:** Forwards to its model, scoped to one pipe and stage.
//! 3. **Recorder:** Captures the writes as a replayable register script.

use crate::common::Result;

/// Anything that accepts register pokes and wide memory writes.
pub trait RegisterSink {
    /// Writes one 32-bit register at a raw register address.
    ///
    /// # Errors
    ///
    /// Returns an error when the address does not decode to a register of a
    /// present stage.
    fn out_word(&mut self, addr: u32, value: u32) -> Result<()>;

    /// Writes one 128-bit memory line at a raw memory address; `data0` holds
    /// bits `[63:0]` and `data1` bits `[127:64]`.
    ///
    /// # Errors
    ///
    /// Returns an error when the address does not decode to a memory line of
    /// a present stage.
    fn indirect_write(&mut self, addr: u64, data0: u64, data1: u64) -> Result<()>;
}

impl<T: RegisterSink + ?Sized> RegisterSink for &mut T {
    fn out_word(&mut self, addr: u32, value: u32) -> Result<()> {
        (**self).out_word(addr, value)
    }

    fn indirect_write(&mut self, addr: u64, data0: u64, data1: u64) -> Result<()> {
        (**self).indirect_write(addr, data0, data1)
    }
}
