// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gradeflow_domain::{PeerReview, ResultRecord};

use crate::data_models::{PeerReviewRow, ResultRow};
use crate::diesel_schema::{peer_reviews, results, submissions};
use crate::error::PersistenceError;

/// Finds the review `reviewer_id` holds on a result for `submission_id`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_peer_review(
    conn: &mut SqliteConnection,
    reviewer_id: i64,
    submission_id: i64,
) -> Result<Option<PeerReview>, PersistenceError> {
    let row: Option<PeerReviewRow> = peer_reviews::table
        .inner_join(results::table)
        .filter(peer_reviews::reviewer_id.eq(reviewer_id))
        .filter(results::submission_id.eq(submission_id))
        .select(PeerReviewRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(PeerReview::from))
}

/// Loads a peer review by ID.
///
/// # Errors
///
/// Returns `NotFound` if the review does not exist.
pub fn load_peer_review(
    conn: &mut SqliteConnection,
    peer_review_id: i64,
) -> Result<PeerReview, PersistenceError> {
    let result = peer_reviews::table
        .find(peer_review_id)
        .select(PeerReviewRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(row.into()),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Peer review {peer_review_id}"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Lists every review held by a reviewer, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_peer_reviews_by_reviewer(
    conn: &mut SqliteConnection,
    reviewer_id: i64,
) -> Result<Vec<PeerReview>, PersistenceError> {
    let rows: Vec<PeerReviewRow> = peer_reviews::table
        .filter(peer_reviews::reviewer_id.eq(reviewer_id))
        .order(peer_reviews::peer_review_id.asc())
        .select(PeerReviewRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(PeerReview::from).collect())
}

/// Loads a result by ID, if it exists.
///
/// # Errors
///
/// Returns an error if the query fails or the marking state is unknown.
pub fn find_result(
    conn: &mut SqliteConnection,
    result_id: i64,
) -> Result<Option<ResultRecord>, PersistenceError> {
    let row: Option<ResultRow> = results::table
        .find(result_id)
        .select(ResultRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ResultRecord::try_from).transpose()?)
}

/// Returns the grouping whose submission a result grades, if the result exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn grouping_id_for_result(
    conn: &mut SqliteConnection,
    result_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    Ok(results::table
        .inner_join(submissions::table)
        .filter(results::result_id.eq(result_id))
        .select(submissions::grouping_id)
        .first::<i64>(conn)
        .optional()?)
}

/// Returns the grouping reviewed by a peer review.
///
/// # Errors
///
/// Returns `NotFound` if the review does not exist.
pub fn reviewee_grouping_id(
    conn: &mut SqliteConnection,
    peer_review_id: i64,
) -> Result<i64, PersistenceError> {
    peer_reviews::table
        .inner_join(results::table.inner_join(submissions::table))
        .filter(peer_reviews::peer_review_id.eq(peer_review_id))
        .select(submissions::grouping_id)
        .first::<i64>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Peer review {peer_review_id}")))
}

/// Counts stored results.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_results(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(results::table.count().get_result(conn)?)
}

/// Counts stored peer reviews.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_peer_reviews(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(peer_reviews::table.count().get_result(conn)?)
}
