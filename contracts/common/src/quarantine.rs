//! Two-phase quarantine timer shared by every time-locked privilege change.
//!
//! A timer is a `(requires_proposal, delay)` pair. The value persisted next to
//! the guarded privilege is a single `u64` stamp whose meaning depends on the
//! flavour:
//!
//! - **Proposed** timers (governor succession): the stamp is the announced
//!   maturity time chosen by the current holder. It must exceed
//!   `now + delay`, and the change may be committed once `now > stamp`.
//! - **Armed** timers (sudoer activation): the stamp is the moment the
//!   privilege was assigned. No explicit proposal exists; the privilege is
//!   usable once `now > stamp + delay`.
//!
//! Both flavours treat the boundary strictly: a timer is never matured at the
//! exact threshold second.

/// Sentinel stamp meaning "no pending change".
///
/// Chosen as the largest 48-bit value so it survives a `uint48` wire field.
pub const UNSET: u64 = 0xFFFF_FFFF_FFFF;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuarantineError {
    /// The requested maturity does not exceed `now + delay`.
    TooSoon,
    /// The stamp has not been passed yet.
    NotMatured,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quarantine {
    pub requires_proposal: bool,
    pub delay: u64,
}

impl Quarantine {
    /// Timer whose stamp is an announced maturity time.
    pub const fn proposed(delay: u64) -> Self {
        Self {
            requires_proposal: true,
            delay,
        }
    }

    /// Timer whose stamp is the assignment time; maturity is implicit.
    pub const fn armed(delay: u64) -> Self {
        Self {
            requires_proposal: false,
            delay,
        }
    }

    /// Validates an announced maturity time and returns the stamp to persist.
    ///
    /// Armed timers have no proposal step and always yield `now`.
    pub fn propose(&self, now: u64, requested_after: u64) -> Result<u64, QuarantineError> {
        if !self.requires_proposal {
            return Ok(now);
        }
        match now.checked_add(self.delay) {
            Some(minimum) if requested_after > minimum => Ok(requested_after),
            _ => Err(QuarantineError::TooSoon),
        }
    }

    /// Stamp to persist when the guarded privilege is assigned right now.
    pub fn arm(&self, now: u64) -> u64 {
        if self.requires_proposal {
            UNSET
        } else {
            now
        }
    }

    /// Last second at which the timer is still in quarantine.
    pub fn threshold(&self, stamp: u64) -> u64 {
        if self.requires_proposal {
            stamp
        } else {
            stamp.saturating_add(self.delay)
        }
    }

    pub fn is_matured(&self, now: u64, stamp: u64) -> bool {
        if self.requires_proposal && stamp == UNSET {
            return false;
        }
        now > self.threshold(stamp)
    }

    pub fn ensure_matured(&self, now: u64, stamp: u64) -> Result<(), QuarantineError> {
        if self.is_matured(now, stamp) {
            Ok(())
        } else {
            Err(QuarantineError::NotMatured)
        }
    }

    /// Stamp to persist after a proposed change has been committed.
    pub fn reset(&self) -> u64 {
        UNSET
    }
}
