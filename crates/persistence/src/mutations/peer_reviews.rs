// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gradeflow_domain::{
    DomainError, MarkingState, PeerReview, ResultRecord, ReviewingUnit, validate_peer_review,
};
use tracing::{debug, warn};

use crate::backend::last_insert_rowid;
use crate::diesel_schema::{peer_reviews, results};
use crate::error::PersistenceError;
use crate::queries::groupings::{grouping_exists, load_reviewing_unit};
use crate::queries::peer_reviews::{
    find_peer_review, find_result, grouping_id_for_result, load_peer_review,
};

/// Inserts an `Incomplete` result on a submission.
///
/// # Errors
///
/// Returns an error if the submission does not exist or the insert fails.
pub fn insert_result(
    conn: &mut SqliteConnection,
    submission_id: i64,
) -> Result<ResultRecord, PersistenceError> {
    let marking_state = MarkingState::Incomplete;

    diesel::insert_into(results::table)
        .values((
            results::submission_id.eq(submission_id),
            results::marking_state.eq(marking_state.as_str()),
        ))
        .execute(conn)?;
    let result_id: i64 = last_insert_rowid(conn)?;

    debug!(result_id, submission_id, "Inserted result");
    Ok(ResultRecord {
        result_id,
        submission_id,
        marking_state,
    })
}

/// Inserts a peer review after re-validating it against the stored rosters.
///
/// Both units are reloaded on this connection, so the check sees the same
/// data the insert commits against, whatever snapshot the caller held.
///
/// # Errors
///
/// Returns `DomainViolation` wrapping:
/// - `InvalidReference` if the reviewer or result does not exist
/// - `ConflictOfInterest` if the reviewer and reviewee share a student
/// - `DuplicatePeerReview` if the reviewer already reviews the submission
///   the result grades
pub fn insert_peer_review(
    conn: &mut SqliteConnection,
    reviewer_id: i64,
    result_id: i64,
) -> Result<PeerReview, PersistenceError> {
    let Some(reviewee_id) = grouping_id_for_result(conn, result_id)? else {
        return Err(DomainError::InvalidReference {
            entity: "result",
            id: result_id,
        }
        .into());
    };
    if !grouping_exists(conn, reviewer_id)? {
        return Err(DomainError::InvalidReference {
            entity: "reviewer",
            id: reviewer_id,
        }
        .into());
    }

    let reviewer: ReviewingUnit = load_reviewing_unit(conn, reviewer_id)?;
    let reviewee: ReviewingUnit = load_reviewing_unit(conn, reviewee_id)?;

    if let Err(err) = validate_peer_review(&reviewer, &reviewee, result_id) {
        warn!(reviewer_id, reviewee_id, result_id, error = %err, "Rejected peer review insert");
        return Err(err.into());
    }

    let Some(result) = find_result(conn, result_id)? else {
        return Err(DomainError::InvalidReference {
            entity: "result",
            id: result_id,
        }
        .into());
    };
    if find_peer_review(conn, reviewer_id, result.submission_id)?.is_some() {
        warn!(
            reviewer_id,
            reviewee_id,
            submission_id = result.submission_id,
            "Rejected duplicate peer review insert"
        );
        return Err(DomainError::DuplicatePeerReview {
            reviewer_id,
            reviewee_id,
        }
        .into());
    }

    diesel::insert_into(peer_reviews::table)
        .values((
            peer_reviews::reviewer_id.eq(reviewer_id),
            peer_reviews::result_id.eq(result_id),
        ))
        .execute(conn)?;
    let peer_review_id: i64 = last_insert_rowid(conn)?;

    debug!(peer_review_id, reviewer_id, reviewee_id, result_id, "Inserted peer review");
    Ok(PeerReview {
        peer_review_id,
        reviewer_id,
        result_id,
    })
}

/// Deletes a peer review together with its result.
///
/// # Errors
///
/// Returns `NotFound` if the review does not exist.
pub fn delete_peer_review(
    conn: &mut SqliteConnection,
    peer_review_id: i64,
) -> Result<PeerReview, PersistenceError> {
    let review: PeerReview = load_peer_review(conn, peer_review_id)?;

    // The review row goes with its result through ON DELETE CASCADE
    diesel::delete(results::table.find(review.result_id)).execute(conn)?;

    debug!(
        peer_review_id,
        result_id = review.result_id,
        "Deleted peer review and result"
    );
    Ok(review)
}
