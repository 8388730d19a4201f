// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Late-submission and peer review engines.
//!
//! The engines here orchestrate domain rules against the storage seams in
//! `store`. They hold no state of their own.

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

mod peer_review;
mod store;
mod submission_rules;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use peer_review::{PairingDecision, PeerReviewEngine};
pub use store::{PeerReviewStore, SubmissionRuleStore};
pub use submission_rules::{
    configure_submission_rule, evaluate_submission, update_submission_rule,
};
