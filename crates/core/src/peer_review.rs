// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Peer review pairing.
//!
//! ## Pairing rules
//!
//! A reviewer may be assigned a reviewee only if:
//! - they are different groupings
//! - they share no student
//! - no peer review already links the reviewer to the reviewee's submission
//!
//! The check is directional: once A reviews B, A may not review B again,
//! but B may still review A.
//!
//! A rejected pairing is a normal outcome (`Ok(None)`), not an error.

use crate::store::PeerReviewStore;
use gradeflow_domain::{DomainError, PeerReview, ReviewingUnit, shares_members};
use tracing::{debug, info};

/// Outcome of checking whether a reviewer may review a reviewee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingDecision {
    /// The pairing may be created.
    Assignable,
    /// Reviewer and reviewee are the same grouping.
    SameGrouping,
    /// Reviewer and reviewee have at least one student in common.
    SharedStudents,
    /// The reviewer already reviews the reviewee's submission.
    AlreadyReviewed,
}

impl PairingDecision {
    /// Converts this decision to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Assignable => "Assignable",
            Self::SameGrouping => "SameGrouping",
            Self::SharedStudents => "SharedStudents",
            Self::AlreadyReviewed => "AlreadyReviewed",
        }
    }
}

/// Decides and materializes peer review pairings against a store.
pub struct PeerReviewEngine<'s, S: PeerReviewStore> {
    store: &'s mut S,
}

impl<'s, S: PeerReviewStore> PeerReviewEngine<'s, S> {
    /// Creates an engine backed by `store`.
    pub const fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    /// Returns the peer review between the reviewer and the reviewee, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lookup fails.
    pub fn peer_review_for(
        &mut self,
        reviewer: &ReviewingUnit,
        reviewee: &ReviewingUnit,
    ) -> Result<Option<PeerReview>, S::Error> {
        self.store.find_peer_review(reviewer.id(), reviewee)
    }

    /// Returns whether the reviewer already reviews the reviewee's submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lookup fails.
    pub fn review_exists_between(
        &mut self,
        reviewer: &ReviewingUnit,
        reviewee: &ReviewingUnit,
    ) -> Result<bool, S::Error> {
        Ok(self.peer_review_for(reviewer, reviewee)?.is_some())
    }

    /// Checks every pairing rule and reports the first one that fails.
    ///
    /// The roster checks run before the store is consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lookup fails.
    pub fn assess(
        &mut self,
        reviewer: &ReviewingUnit,
        reviewee: &ReviewingUnit,
    ) -> Result<PairingDecision, S::Error> {
        if reviewer.id() == reviewee.id() {
            return Ok(PairingDecision::SameGrouping);
        }
        if shares_members(reviewer, reviewee) {
            return Ok(PairingDecision::SharedStudents);
        }
        if self.review_exists_between(reviewer, reviewee)? {
            return Ok(PairingDecision::AlreadyReviewed);
        }
        Ok(PairingDecision::Assignable)
    }

    /// Returns whether the reviewer may be assigned the reviewee.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lookup fails.
    pub fn able_to_assign(
        &mut self,
        reviewer: &ReviewingUnit,
        reviewee: &ReviewingUnit,
    ) -> Result<bool, S::Error> {
        Ok(self.assess(reviewer, reviewee)? == PairingDecision::Assignable)
    }

    /// Creates a peer review between the reviewer and the reviewee.
    ///
    /// The result and the peer review are written in one transaction by the
    /// store.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(review))` if the pairing was created
    /// * `Ok(None)` if the pairing is not allowed; nothing is written
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The reviewee has no current submission (`InvalidReference`)
    /// - The store rejects the pairing on re-validation
    /// - A store write fails
    pub fn create_peer_review_between(
        &mut self,
        reviewer: &ReviewingUnit,
        reviewee: &ReviewingUnit,
    ) -> Result<Option<PeerReview>, S::Error> {
        let (_, review) = self.try_pair(reviewer, reviewee)?;
        Ok(review)
    }

    /// Assesses the pairing once and creates it when it is assignable.
    ///
    /// Returns the decision the outcome was based on alongside the created
    /// review, which is `Some` exactly when the decision is `Assignable`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_peer_review_between`].
    pub fn try_pair(
        &mut self,
        reviewer: &ReviewingUnit,
        reviewee: &ReviewingUnit,
    ) -> Result<(PairingDecision, Option<PeerReview>), S::Error> {
        let decision: PairingDecision = self.assess(reviewer, reviewee)?;
        if decision != PairingDecision::Assignable {
            debug!(
                reviewer_id = reviewer.id(),
                reviewee_id = reviewee.id(),
                decision = decision.as_str(),
                "Peer review not assignable"
            );
            return Ok((decision, None));
        }

        if reviewee.current_submission_id().is_none() {
            return Err(DomainError::InvalidReference {
                entity: "submission",
                id: reviewee.id(),
            }
            .into());
        }

        let (result, review) = self.store.create_result_and_peer_review(reviewer, reviewee)?;

        info!(
            peer_review_id = review.peer_review_id,
            result_id = result.result_id,
            reviewer_id = reviewer.id(),
            reviewee_id = reviewee.id(),
            "Created peer review"
        );

        Ok((decision, Some(review)))
    }
}
