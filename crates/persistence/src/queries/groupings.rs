// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gradeflow_domain::ReviewingUnit;

use crate::diesel_schema::{groupings, memberships, submissions};
use crate::error::PersistenceError;

/// Returns whether a grouping with this ID exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn grouping_exists(
    conn: &mut SqliteConnection,
    grouping_id: i64,
) -> Result<bool, PersistenceError> {
    Ok(groupings::table
        .find(grouping_id)
        .select(groupings::grouping_id)
        .first::<i64>(conn)
        .optional()?
        .is_some())
}

/// Builds a reviewing unit snapshot from the stored roster and the
/// grouping's current submission.
///
/// # Errors
///
/// Returns `NotFound` if the grouping does not exist.
pub fn load_reviewing_unit(
    conn: &mut SqliteConnection,
    grouping_id: i64,
) -> Result<ReviewingUnit, PersistenceError> {
    if !grouping_exists(conn, grouping_id)? {
        return Err(PersistenceError::NotFound(format!("Grouping {grouping_id}")));
    }

    let members: Vec<i64> = memberships::table
        .filter(memberships::grouping_id.eq(grouping_id))
        .select(memberships::student_id)
        .load(conn)?;

    let current_submission_id: Option<i64> = submissions::table
        .filter(submissions::grouping_id.eq(grouping_id))
        .filter(submissions::is_current.eq(1))
        .order(submissions::submission_id.desc())
        .select(submissions::submission_id)
        .first(conn)
        .optional()?;

    Ok(ReviewingUnit::new(
        grouping_id,
        members,
        current_submission_id,
    ))
}
