//! # Coupon State Machine
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌────────────┐   apply("New")    ┌────────────┐                      │
//! │   │ NotApplied │ ────────────────► │  Applied   │ ◄──┐ apply(any code) │
//! │   └────────────┘                   └────────────┘ ───┘ (no change)     │
//! │     │      ▲                                                            │
//! │     └──────┘ apply(other) → Invalid                                    │
//! │                                                                         │
//! │   The only way back to NotApplied is a new session.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::{COUPON_CODE, COUPON_DISCOUNT_PERCENT};

/// Whether the session's coupon has been redeemed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponState {
    #[default]
    NotApplied,
    Applied,
}

/// Result of a coupon attempt, reported back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponOutcome {
    /// The code matched and the discount is now active.
    Applied,
    /// The code matched but the coupon was already active.
    AlreadyApplied,
    /// The code did not match.
    Invalid,
}

impl CouponState {
    /// Attempts to redeem `code`.
    ///
    /// Once applied, every further attempt leaves the state alone. A matching
    /// code reports [`CouponOutcome::AlreadyApplied`]; anything else is
    /// [`CouponOutcome::Invalid`].
    pub fn apply(&mut self, code: &str) -> CouponOutcome {
        let matches = code == COUPON_CODE;
        match (*self, matches) {
            (CouponState::NotApplied, true) => {
                *self = CouponState::Applied;
                CouponOutcome::Applied
            }
            (CouponState::Applied, true) => CouponOutcome::AlreadyApplied,
            (_, false) => CouponOutcome::Invalid,
        }
    }

    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, CouponState::Applied)
    }

    /// Extra discount contributed by the coupon, in percent.
    #[inline]
    pub fn additional_discount_percent(&self) -> u32 {
        if self.is_applied() {
            COUPON_DISCOUNT_PERCENT
        } else {
            0
        }
    }
}

impl CouponOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CouponOutcome::Applied)
    }
}

impl fmt::Display for CouponOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouponOutcome::Applied => write!(
                f,
                "Coupon applied: additional {}% off",
                COUPON_DISCOUNT_PERCENT
            ),
            CouponOutcome::AlreadyApplied => write!(f, "Coupon already applied"),
            CouponOutcome::Invalid => write!(f, "Invalid coupon code"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
