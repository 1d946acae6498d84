//! Terminal PIN input.
//!
//! PINs are read without echo via `dialoguer`.  For scripting, the
//! `SEC_PIN` and `SEC_NEW_PIN` environment variables take precedence
//! over the prompt.

use dialoguer::Password;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::errors::{Result, SecError};
use crate::pin::PinSource;

/// Environment variable holding the current PIN.
pub const PIN_ENV: &str = "SEC_PIN";

/// Environment variable holding the new PIN for `set-pin` / `change-pin`.
pub const NEW_PIN_ENV: &str = "SEC_NEW_PIN";

/// Reads PINs from the environment or an interactive hidden prompt.
pub struct TerminalPinSource;

impl PinSource for TerminalPinSource {
    fn read_pin(&mut self, attempt: u32, max_attempts: u32) -> Result<Zeroizing<String>> {
        if let Some(pin) = env_pin(PIN_ENV) {
            return Ok(pin);
        }

        let prompt = match attempt {
            1 => "Enter PIN".to_string(),
            n => format!("Enter PIN (attempt {n}/{max_attempts})"),
        };
        hidden(&prompt)
    }

    fn read_new_pin(&mut self) -> Result<Zeroizing<String>> {
        if let Some(pin) = env_pin(NEW_PIN_ENV) {
            return Ok(pin);
        }

        let first = hidden("Enter new PIN")?;
        let second = hidden("Confirm new PIN")?;
        confirmed(first, &second)
    }

    fn wrong_pin(&mut self, remaining: u32) {
        output::warning(&format!("Incorrect PIN. {remaining} attempt(s) left."));
    }
}

fn hidden(prompt: &str) -> Result<Zeroizing<String>> {
    let pin = Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?;
    Ok(Zeroizing::new(pin))
}

/// `first`, if the confirmation matches it.
fn confirmed(first: Zeroizing<String>, second: &str) -> Result<Zeroizing<String>> {
    if bool::from(first.as_bytes().ct_eq(second.as_bytes())) {
        Ok(first)
    } else {
        Err(SecError::PinMismatch)
    }
}

/// Non-empty value of `var`, if set.
fn env_pin(var: &str) -> Option<Zeroizing<String>> {
    std::env::var(var)
        .ok()
        .filter(|pin| !pin.is_empty())
        .map(Zeroizing::new)
}
