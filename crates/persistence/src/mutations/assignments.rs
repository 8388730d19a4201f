// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use gradeflow_domain::SubmissionRule;
use num_traits::ToPrimitive;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::backend::last_insert_rowid;
use crate::data_models::NewPeriod;
use crate::diesel_schema::{assignments, periods, submission_rules};
use crate::error::PersistenceError;

/// Inserts an assignment and returns its ID.
///
/// # Errors
///
/// Returns `DuplicateAssignment` if the short identifier is taken.
pub fn insert_assignment(
    conn: &mut SqliteConnection,
    short_identifier: &str,
    due_date: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let due_date_text: String = due_date.format(&Rfc3339)?;

    let inserted = diesel::insert_into(assignments::table)
        .values((
            assignments::short_identifier.eq(short_identifier),
            assignments::due_date.eq(&due_date_text),
        ))
        .execute(conn);

    match inserted {
        Ok(_) => {}
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(PersistenceError::DuplicateAssignment(
                short_identifier.to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    }

    let assignment_id: i64 = last_insert_rowid(conn)?;
    debug!(assignment_id, short_identifier, "Inserted assignment");
    Ok(assignment_id)
}

/// Replaces the rule attached to an assignment.
///
/// The previous rule row is deleted first; its periods go with it through
/// `ON DELETE CASCADE`. Must run inside a transaction.
///
/// # Errors
///
/// Returns `NotFound` if the assignment does not exist.
pub fn replace_submission_rule(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    rule: &SubmissionRule,
) -> Result<i64, PersistenceError> {
    let exists: Option<i64> = assignments::table
        .find(assignment_id)
        .select(assignments::assignment_id)
        .first(conn)
        .optional()?;
    if exists.is_none() {
        return Err(PersistenceError::NotFound(format!(
            "Assignment {assignment_id}"
        )));
    }

    let removed: usize = diesel::delete(
        submission_rules::table.filter(submission_rules::assignment_id.eq(assignment_id)),
    )
    .execute(conn)?;

    diesel::insert_into(submission_rules::table)
        .values((
            submission_rules::assignment_id.eq(assignment_id),
            submission_rules::rule_type.eq(rule.variant().as_str()),
        ))
        .execute(conn)?;
    let submission_rule_id: i64 = last_insert_rowid(conn)?;

    let new_periods: Vec<NewPeriod> = rule
        .periods()
        .iter()
        .enumerate()
        .map(|(index, period)| -> Result<NewPeriod, PersistenceError> {
            let position: i32 = (index + 1).to_i32().ok_or_else(|| {
                PersistenceError::SerializationError(format!(
                    "Period position {index} out of range"
                ))
            })?;
            Ok(NewPeriod {
                submission_rule_id,
                position,
                hours_after_due: period.hours_after_due(),
                deduction: period.deduction(),
                interval_hours: period.interval_hours(),
            })
        })
        .collect::<Result<_, _>>()?;

    if !new_periods.is_empty() {
        diesel::insert_into(periods::table)
            .values(&new_periods)
            .execute(conn)?;
    }

    debug!(
        assignment_id,
        submission_rule_id,
        replaced = removed > 0,
        periods = new_periods.len(),
        rule_type = rule.variant().as_str(),
        "Stored submission rule"
    );

    Ok(submission_rule_id)
}
