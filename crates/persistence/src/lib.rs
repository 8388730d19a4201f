// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for gradeflow.
//!
//! This crate stores assignments, their late-submission rules, groupings,
//! submissions, results and peer reviews in `SQLite` through Diesel, and
//! implements the store traits the `gradeflow` engines are written against.
//!
//! ## Transactions
//!
//! Every write that touches more than one row runs inside a single Diesel
//! transaction:
//!
//! - assignment creation together with its initial rule
//! - rule replacement (old rule and periods out, new ones in)
//! - result + peer review creation
//! - peer review destruction together with its result
//!
//! Any error rolls the whole write back.
//!
//! ## Re-validation
//!
//! Peer review inserts reload both rosters inside the transaction and run
//! them through `validate_peer_review`, so an overlapping pair is rejected
//! even when a caller skips the pairing engine. The same transaction rejects
//! a second review by one reviewer of the same submission, and results are
//! always created on the reviewee's stored current submission.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases created by
//! [`Persistence::new_in_memory`].

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use diesel::prelude::*;
use gradeflow::{PeerReviewStore, SubmissionRuleStore};
use gradeflow_domain::{
    DomainError, PeerReview, ResultRecord, ReviewingUnit, SubmissionRule, SubmissionRuleConfig,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::AssignmentData;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives its own sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite` persistence adapter.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call gets an isolated shared-cache database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:gradeflow_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates an assignment with the rule described by `config`.
    ///
    /// The rule is built before anything is written. Assignment and rule are
    /// committed together.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the rule configuration is invalid (`DomainViolation`)
    /// - the short identifier is taken (`DuplicateAssignment`)
    /// - a database operation fails
    pub fn create_assignment(
        &mut self,
        short_identifier: &str,
        due_date: OffsetDateTime,
        config: &SubmissionRuleConfig,
    ) -> Result<i64, PersistenceError> {
        let rule: SubmissionRule = SubmissionRule::from_config(config)?;

        let assignment_id = self.conn.transaction(|conn| {
            let assignment_id = mutations::assignments::insert_assignment(
                conn,
                short_identifier,
                due_date,
            )?;
            mutations::assignments::replace_submission_rule(conn, assignment_id, &rule)?;
            Ok::<_, PersistenceError>(assignment_id)
        })?;

        info!(
            assignment_id,
            short_identifier,
            rule_type = rule.variant().as_str(),
            "Created assignment"
        );
        Ok(assignment_id)
    }

    /// Loads an assignment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the assignment does not exist.
    pub fn load_assignment(
        &mut self,
        assignment_id: i64,
    ) -> Result<AssignmentData, PersistenceError> {
        queries::assignments::load_assignment(&mut self.conn, assignment_id)
    }

    /// Looks up an assignment ID by short identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no assignment has this identifier.
    pub fn lookup_assignment_id(
        &mut self,
        short_identifier: &str,
    ) -> Result<i64, PersistenceError> {
        queries::assignments::lookup_assignment_id(&mut self.conn, short_identifier)
    }

    /// Creates a grouping on an assignment with the given students.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not exist or a write fails.
    pub fn create_grouping(
        &mut self,
        assignment_id: i64,
        group_name: &str,
        student_ids: &[i64],
    ) -> Result<i64, PersistenceError> {
        let grouping_id = self.conn.transaction(|conn| {
            mutations::groupings::insert_grouping(conn, assignment_id, group_name, student_ids)
        })?;
        info!(grouping_id, assignment_id, group_name, "Created grouping");
        Ok(grouping_id)
    }

    /// Records a submission and makes it the grouping's current one.
    ///
    /// # Errors
    ///
    /// Returns an error if the grouping does not exist or a write fails.
    pub fn record_submission(
        &mut self,
        grouping_id: i64,
        submitted_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        let submission_id = self.conn.transaction(|conn| {
            mutations::groupings::insert_submission(conn, grouping_id, submitted_at)
        })?;
        info!(grouping_id, submission_id, "Recorded submission");
        Ok(submission_id)
    }

    /// Deletes a grouping along with everything that cascades from it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the grouping does not exist.
    pub fn delete_grouping(&mut self, grouping_id: i64) -> Result<(), PersistenceError> {
        mutations::groupings::delete_grouping(&mut self.conn, grouping_id)
    }

    /// Loads a reviewing unit snapshot for a grouping.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the grouping does not exist.
    pub fn load_reviewing_unit(
        &mut self,
        grouping_id: i64,
    ) -> Result<ReviewingUnit, PersistenceError> {
        queries::groupings::load_reviewing_unit(&mut self.conn, grouping_id)
    }

    /// Creates an `Incomplete` result on a submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the submission does not exist.
    pub fn create_result(&mut self, submission_id: i64) -> Result<ResultRecord, PersistenceError> {
        mutations::peer_reviews::insert_result(&mut self.conn, submission_id)
    }

    /// Loads a result, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_result(
        &mut self,
        result_id: i64,
    ) -> Result<Option<ResultRecord>, PersistenceError> {
        queries::peer_reviews::find_result(&mut self.conn, result_id)
    }

    /// Inserts a peer review directly, without going through the pairing engine.
    ///
    /// The insert is still re-validated against the stored rosters.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation` if the references are dangling, the units
    /// share a student, or the reviewer already reviews that submission.
    pub fn insert_peer_review(
        &mut self,
        reviewer_id: i64,
        result_id: i64,
    ) -> Result<PeerReview, PersistenceError> {
        self.conn.transaction(|conn| {
            mutations::peer_reviews::insert_peer_review(conn, reviewer_id, result_id)
        })
    }

    /// Loads a peer review.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the review does not exist.
    pub fn load_peer_review(
        &mut self,
        peer_review_id: i64,
    ) -> Result<PeerReview, PersistenceError> {
        queries::peer_reviews::load_peer_review(&mut self.conn, peer_review_id)
    }

    /// Returns the grouping being reviewed by a peer review.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the review does not exist.
    pub fn reviewee_of(&mut self, peer_review_id: i64) -> Result<ReviewingUnit, PersistenceError> {
        self.conn.transaction(|conn| {
            let grouping_id = queries::peer_reviews::reviewee_grouping_id(conn, peer_review_id)?;
            queries::groupings::load_reviewing_unit(conn, grouping_id)
        })
    }

    /// Lists the reviews held by a reviewer.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn peer_reviews_by_reviewer(
        &mut self,
        reviewer_id: i64,
    ) -> Result<Vec<PeerReview>, PersistenceError> {
        queries::peer_reviews::list_peer_reviews_by_reviewer(&mut self.conn, reviewer_id)
    }

    /// Removes a peer review and its result together.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the review does not exist.
    pub fn destroy_peer_review(&mut self, peer_review_id: i64) -> Result<(), PersistenceError> {
        let review = self.conn.transaction(|conn| {
            mutations::peer_reviews::delete_peer_review(conn, peer_review_id)
        })?;
        info!(
            peer_review_id,
            reviewer_id = review.reviewer_id,
            result_id = review.result_id,
            "Destroyed peer review"
        );
        Ok(())
    }

    /// Counts stored results.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_results(&mut self) -> Result<i64, PersistenceError> {
        queries::peer_reviews::count_results(&mut self.conn)
    }

    /// Counts stored peer reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_peer_reviews(&mut self) -> Result<i64, PersistenceError> {
        queries::peer_reviews::count_peer_reviews(&mut self.conn)
    }

    /// Counts stored periods across all rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_periods(&mut self) -> Result<i64, PersistenceError> {
        queries::assignments::count_periods(&mut self.conn)
    }
}

impl PeerReviewStore for Persistence {
    type Error = PersistenceError;

    fn find_peer_review(
        &mut self,
        reviewer_id: i64,
        reviewee: &ReviewingUnit,
    ) -> Result<Option<PeerReview>, Self::Error> {
        let Some(submission_id) = reviewee.current_submission_id() else {
            return Ok(None);
        };
        queries::peer_reviews::find_peer_review(&mut self.conn, reviewer_id, submission_id)
    }

    fn create_result_and_peer_review(
        &mut self,
        reviewer: &ReviewingUnit,
        reviewee: &ReviewingUnit,
    ) -> Result<(ResultRecord, PeerReview), Self::Error> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            // A resubmission may have landed since the caller took its snapshot
            let stored = queries::groupings::load_reviewing_unit(conn, reviewee.id())?;
            let Some(submission_id) = stored.current_submission_id() else {
                return Err(DomainError::InvalidReference {
                    entity: "submission",
                    id: reviewee.id(),
                }
                .into());
            };

            let result = mutations::peer_reviews::insert_result(conn, submission_id)?;
            let review =
                mutations::peer_reviews::insert_peer_review(conn, reviewer.id(), result.result_id)?;
            Ok((result, review))
        })
    }
}

impl SubmissionRuleStore for Persistence {
    type Error = PersistenceError;

    fn load_submission_rule(&mut self, assignment_id: i64) -> Result<SubmissionRule, Self::Error> {
        queries::assignments::load_submission_rule(&mut self.conn, assignment_id)
    }

    fn replace_submission_rule(
        &mut self,
        assignment_id: i64,
        rule: &SubmissionRule,
    ) -> Result<(), Self::Error> {
        self.conn.transaction(|conn| {
            mutations::assignments::replace_submission_rule(conn, assignment_id, rule)
        })?;
        Ok(())
    }

    fn due_date(&mut self, assignment_id: i64) -> Result<OffsetDateTime, Self::Error> {
        Ok(queries::assignments::load_assignment(&mut self.conn, assignment_id)?.due_date)
    }
}
