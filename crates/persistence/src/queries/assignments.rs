// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gradeflow_domain::{Period, RuleVariant, SubmissionRule};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::data_models::{AssignmentData, PeriodRow};
use crate::diesel_schema::{assignments, periods, submission_rules};
use crate::error::PersistenceError;

/// Loads an assignment by ID.
///
/// # Errors
///
/// Returns `NotFound` if the assignment does not exist, or an error if the
/// stored due date cannot be parsed.
pub fn load_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
) -> Result<AssignmentData, PersistenceError> {
    let result = assignments::table
        .find(assignment_id)
        .select((assignments::short_identifier, assignments::due_date))
        .first::<(String, String)>(conn);

    match result {
        Ok((short_identifier, due_date)) => Ok(AssignmentData {
            assignment_id,
            short_identifier,
            due_date: OffsetDateTime::parse(&due_date, &Rfc3339)?,
        }),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Assignment {assignment_id}"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Looks up an assignment ID by its short identifier.
///
/// # Errors
///
/// Returns `NotFound` if no assignment has this identifier.
pub fn lookup_assignment_id(
    conn: &mut SqliteConnection,
    short_identifier: &str,
) -> Result<i64, PersistenceError> {
    assignments::table
        .filter(assignments::short_identifier.eq(short_identifier))
        .select(assignments::assignment_id)
        .first::<i64>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Assignment '{short_identifier}'")))
}

/// Loads the submission rule attached to an assignment, periods in order.
///
/// The rule is rebuilt through the domain constructors, so a row that no
/// longer satisfies the rule invariants surfaces as `DomainViolation`.
///
/// # Errors
///
/// Returns `NotFound` if the assignment has no rule.
pub fn load_submission_rule(
    conn: &mut SqliteConnection,
    assignment_id: i64,
) -> Result<SubmissionRule, PersistenceError> {
    let (rule_id, rule_type) = submission_rules::table
        .filter(submission_rules::assignment_id.eq(assignment_id))
        .select((
            submission_rules::submission_rule_id,
            submission_rules::rule_type,
        ))
        .first::<(i64, String)>(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Submission rule for assignment {assignment_id}"))
        })?;

    let variant: RuleVariant = rule_type.parse()?;

    let rows: Vec<PeriodRow> = periods::table
        .filter(periods::submission_rule_id.eq(rule_id))
        .order(periods::position.asc())
        .select(PeriodRow::as_select())
        .load(conn)?;

    let periods: Vec<Period> = rows
        .iter()
        .map(PeriodRow::to_period)
        .collect::<Result<_, _>>()?;

    Ok(SubmissionRule::new(variant, periods)?)
}

/// Counts every stored period across all rules.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_periods(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(periods::table.count().get_result(conn)?)
}
