// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod peer_review;
mod penalty;
mod period;
mod reviewing_unit;
mod submission_rule;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use peer_review::{MarkingState, PeerReview, ResultRecord, validate_peer_review};
pub use penalty::{CollectionStatus, PenaltyResult, PeriodCharge, evaluate};
pub use period::{MAX_PERIOD_HOURS, Period};
pub use reviewing_unit::{ReviewingUnit, shares_members};
pub use submission_rule::{RuleVariant, SubmissionRule, SubmissionRuleConfig};
