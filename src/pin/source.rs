//! Where PINs come from.

use zeroize::Zeroizing;

use crate::errors::Result;

/// A supplier of PIN input.
///
/// The CLI reads from the terminal without echo; tests script the
/// answers.
pub trait PinSource {
    /// Read attempt number `attempt` (1-based) of `max_attempts` against
    /// an existing PIN.
    fn read_pin(&mut self, attempt: u32, max_attempts: u32) -> Result<Zeroizing<String>>;

    /// Read a new PIN to store.
    fn read_new_pin(&mut self) -> Result<Zeroizing<String>>;

    /// Called after a wrong attempt that still leaves `remaining` tries.
    fn wrong_pin(&mut self, remaining: u32) {
        let _ = remaining;
    }
}
