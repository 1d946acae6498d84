//! PIN module — optional PIN gating with bounded retry.
//!
//! This module provides:
//! - The retry state machine (`attempts`)
//! - `PinGuard` and its `Authorization` proof (`guard`)
//! - The `PinSource` input abstraction (`source`)

pub mod attempts;
pub mod guard;
pub mod source;

pub use attempts::AttemptState;
pub use guard::{Authorization, PinGuard};
pub use source::PinSource;
