// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{PeerReviewStore, SubmissionRuleStore};
use gradeflow_domain::{
    DomainError, MarkingState, PeerReview, ResultRecord, ReviewingUnit, SubmissionRule,
    validate_peer_review,
};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use time::macros::datetime;

pub const DUE: OffsetDateTime = datetime!(2026-03-02 17:00 UTC);

#[derive(Debug, PartialEq, Eq)]
pub enum TestStoreError {
    Domain(DomainError),
    NotFound(i64),
    WriteFailed,
}

impl From<DomainError> for TestStoreError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

/// In-memory store. Writes are staged and only committed when every step
/// succeeds, mirroring a database transaction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub results: Vec<ResultRecord>,
    pub peer_reviews: Vec<PeerReview>,
    pub rules: BTreeMap<i64, SubmissionRule>,
    pub due_dates: BTreeMap<i64, OffsetDateTime>,
    pub fail_peer_review_insert: bool,
    pub lookups: usize,
}

impl MemoryStore {
    pub fn with_assignment(assignment_id: i64) -> Self {
        let mut store = Self::default();
        store.rules.insert(assignment_id, SubmissionRule::no_late());
        store.due_dates.insert(assignment_id, DUE);
        store
    }

    fn review_on(&self, reviewer_id: i64, submission_id: i64) -> Option<PeerReview> {
        self.peer_reviews
            .iter()
            .find(|review| {
                review.reviewer_id == reviewer_id
                    && self.results.iter().any(|result| {
                        result.result_id == review.result_id
                            && result.submission_id == submission_id
                    })
            })
            .cloned()
    }
}

impl PeerReviewStore for MemoryStore {
    type Error = TestStoreError;

    fn find_peer_review(
        &mut self,
        reviewer_id: i64,
        reviewee: &ReviewingUnit,
    ) -> Result<Option<PeerReview>, Self::Error> {
        self.lookups += 1;
        Ok(reviewee
            .current_submission_id()
            .and_then(|submission_id| self.review_on(reviewer_id, submission_id)))
    }

    fn create_result_and_peer_review(
        &mut self,
        reviewer: &ReviewingUnit,
        reviewee: &ReviewingUnit,
    ) -> Result<(ResultRecord, PeerReview), Self::Error> {
        let submission_id = reviewee
            .current_submission_id()
            .ok_or(TestStoreError::NotFound(reviewee.id()))?;

        let result = ResultRecord {
            result_id: i64::try_from(self.results.len()).unwrap() + 1,
            submission_id,
            marking_state: MarkingState::Incomplete,
        };
        validate_peer_review(reviewer, reviewee, result.result_id)?;
        if self.review_on(reviewer.id(), submission_id).is_some() {
            return Err(TestStoreError::Domain(DomainError::DuplicatePeerReview {
                reviewer_id: reviewer.id(),
                reviewee_id: reviewee.id(),
            }));
        }
        if self.fail_peer_review_insert {
            return Err(TestStoreError::WriteFailed);
        }

        let review = PeerReview {
            peer_review_id: i64::try_from(self.peer_reviews.len()).unwrap() + 1,
            reviewer_id: reviewer.id(),
            result_id: result.result_id,
        };

        self.results.push(result.clone());
        self.peer_reviews.push(review.clone());
        Ok((result, review))
    }
}

impl SubmissionRuleStore for MemoryStore {
    type Error = TestStoreError;

    fn load_submission_rule(&mut self, assignment_id: i64) -> Result<SubmissionRule, Self::Error> {
        self.rules
            .get(&assignment_id)
            .cloned()
            .ok_or(TestStoreError::NotFound(assignment_id))
    }

    fn replace_submission_rule(
        &mut self,
        assignment_id: i64,
        rule: &SubmissionRule,
    ) -> Result<(), Self::Error> {
        let slot = self
            .rules
            .get_mut(&assignment_id)
            .ok_or(TestStoreError::NotFound(assignment_id))?;
        *slot = rule.clone();
        Ok(())
    }

    fn due_date(&mut self, assignment_id: i64) -> Result<OffsetDateTime, Self::Error> {
        self.due_dates
            .get(&assignment_id)
            .copied()
            .ok_or(TestStoreError::NotFound(assignment_id))
    }
}

pub fn unit(id: i64, members: &[i64], submission_id: Option<i64>) -> ReviewingUnit {
    ReviewingUnit::new(id, members.iter().copied(), submission_id)
}
