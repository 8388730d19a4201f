// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::backend::last_insert_rowid;
use crate::diesel_schema::{groupings, memberships, submissions};
use crate::error::PersistenceError;

/// Inserts a grouping with its student roster and returns the grouping ID.
///
/// Repeated student IDs are stored once.
///
/// # Errors
///
/// Returns an error if the assignment does not exist or the insert fails.
pub fn insert_grouping(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    group_name: &str,
    student_ids: &[i64],
) -> Result<i64, PersistenceError> {
    diesel::insert_into(groupings::table)
        .values((
            groupings::assignment_id.eq(assignment_id),
            groupings::group_name.eq(group_name),
        ))
        .execute(conn)?;
    let grouping_id: i64 = last_insert_rowid(conn)?;

    let roster: BTreeSet<i64> = student_ids.iter().copied().collect();
    let rows: Vec<_> = roster
        .iter()
        .map(|student_id| {
            (
                memberships::grouping_id.eq(grouping_id),
                memberships::student_id.eq(*student_id),
            )
        })
        .collect();

    if !rows.is_empty() {
        diesel::insert_into(memberships::table)
            .values(rows)
            .execute(conn)?;
    }

    debug!(
        grouping_id,
        assignment_id,
        group_name,
        members = roster.len(),
        "Inserted grouping"
    );
    Ok(grouping_id)
}

/// Records a new submission for a grouping and makes it the current one.
///
/// # Errors
///
/// Returns an error if the grouping does not exist or a write fails.
pub fn insert_submission(
    conn: &mut SqliteConnection,
    grouping_id: i64,
    submitted_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let submitted_at_text: String = submitted_at.format(&Rfc3339)?;

    diesel::update(
        submissions::table
            .filter(submissions::grouping_id.eq(grouping_id))
            .filter(submissions::is_current.eq(1)),
    )
    .set(submissions::is_current.eq(0))
    .execute(conn)?;

    diesel::insert_into(submissions::table)
        .values((
            submissions::grouping_id.eq(grouping_id),
            submissions::submitted_at.eq(&submitted_at_text),
            submissions::is_current.eq(1),
        ))
        .execute(conn)?;
    let submission_id: i64 = last_insert_rowid(conn)?;

    debug!(grouping_id, submission_id, "Inserted current submission");
    Ok(submission_id)
}

/// Deletes a grouping. Its roster, submissions, their results and any
/// reviews it holds are removed by cascade.
///
/// # Errors
///
/// Returns `NotFound` if the grouping does not exist.
pub fn delete_grouping(
    conn: &mut SqliteConnection,
    grouping_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(groupings::table.find(grouping_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Grouping {grouping_id}")));
    }
    debug!(grouping_id, "Deleted grouping");
    Ok(())
}
