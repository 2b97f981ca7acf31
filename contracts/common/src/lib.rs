//! Shared primitives for the validator-pool contract suite.
//!
//! This crate provides:
//! - [`ErrorClass`]: the error taxonomy every pool contract reports against.
//! - [`quarantine`]: the generic two-phase timer behind time-locked role changes.
//! - [`bits`]: strict bit-packed message bodies.
//! - [`fraction`]: 2^24 fixed-point fee and rate helpers.
//!
//! Contract-specific error enums pick their codes from the ranges documented
//! on [`ErrorClass`] so the class of any code is recoverable off-chain.

#![cfg_attr(not(feature = "std"), no_std)]

use soroban_sdk::contracttype;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod bits;
pub mod fraction;
pub mod quarantine;

pub use bits::{BitReader, BitWriter, BitsError};
pub use quarantine::{Quarantine, QuarantineError, UNSET};

// ── Shared error taxonomy ────────────────────────────────────────────────────

/// Error classes shared by every pool contract.
///
/// # Code ranges
/// | Range   | Class                                          |
/// |---------|------------------------------------------------|
/// | 1 – 9   | Lifecycle / initialisation                     |
/// | 10 – 19 | Authorization: wrong sender for the role       |
/// | 20 – 29 | Quarantine: right role, timer not matured      |
/// | 30 – 39 | Malformed input: trailing data, out of range   |
/// | 40 – 49 | State: forbidden in the current halt state     |
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorClass {
    Lifecycle = 1,
    Authorization = 2,
    Quarantine = 3,
    MalformedInput = 4,
    State = 5,
}

impl ErrorClass {
    /// Classifies a raw contract error code by range.
    pub fn of_code(code: u32) -> Option<Self> {
        match code {
            1..=9 => Some(Self::Lifecycle),
            10..=19 => Some(Self::Authorization),
            20..=29 => Some(Self::Quarantine),
            30..=39 => Some(Self::MalformedInput),
            40..=49 => Some(Self::State),
            _ => None,
        }
    }
}
