// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage seams the engines are written against.
//!
//! Implementations own transactional behavior. The engines only decide
//! what to write; a store must guarantee that each method either fully
//! commits or leaves no trace.

use gradeflow_domain::{
    DomainError, PeerReview, ResultRecord, ReviewingUnit, SubmissionRule,
};
use time::OffsetDateTime;

/// Storage for peer reviews and their results.
pub trait PeerReviewStore {
    /// The store's error type. Domain failures convert into it.
    type Error: From<DomainError>;

    /// Finds the peer review linking `reviewer_id` to a result on the
    /// reviewee's current submission.
    ///
    /// Returns `Ok(None)` if no such review exists or the reviewee has no
    /// current submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_peer_review(
        &mut self,
        reviewer_id: i64,
        reviewee: &ReviewingUnit,
    ) -> Result<Option<PeerReview>, Self::Error>;

    /// Atomically creates an incomplete result on the reviewee's current
    /// submission and a peer review linking the reviewer to it.
    ///
    /// Implementations must re-validate the pairing against their own
    /// authoritative rosters and reject a second review by the same reviewer
    /// of the same submission before committing.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or either write fails. In that
    /// case neither record is persisted.
    fn create_result_and_peer_review(
        &mut self,
        reviewer: &ReviewingUnit,
        reviewee: &ReviewingUnit,
    ) -> Result<(ResultRecord, PeerReview), Self::Error>;
}

/// Storage for the submission rule attached to each assignment.
pub trait SubmissionRuleStore {
    /// The store's error type. Domain failures convert into it.
    type Error: From<DomainError>;

    /// Loads the rule currently attached to an assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not exist or the lookup fails.
    fn load_submission_rule(&mut self, assignment_id: i64) -> Result<SubmissionRule, Self::Error>;

    /// Replaces the assignment's rule, destroying the old rule and all of its
    /// periods in the same transaction that attaches the new one.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not exist or a write fails.
    fn replace_submission_rule(
        &mut self,
        assignment_id: i64,
        rule: &SubmissionRule,
    ) -> Result<(), Self::Error>;

    /// Loads the assignment's due date.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not exist or the lookup fails.
    fn due_date(&mut self, assignment_id: i64) -> Result<OffsetDateTime, Self::Error>;
}
