// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use gradeflow_domain::{DomainError, MarkingState, PeerReview, Period, ResultRecord};
use serde::Serialize;
use time::OffsetDateTime;

use crate::diesel_schema::{peer_reviews, periods, results};

/// A stored period, in rule order.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = periods)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PeriodRow {
    pub position: i32,
    pub hours_after_due: f64,
    pub deduction: f64,
    pub interval_hours: Option<f64>,
}

impl PeriodRow {
    /// Rebuilds the domain period, re-running its validation.
    pub fn to_period(&self) -> Result<Period, DomainError> {
        Period::new(
            self.hours_after_due,
            Some(self.deduction),
            self.interval_hours,
        )
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = periods)]
pub struct NewPeriod {
    pub submission_rule_id: i64,
    pub position: i32,
    pub hours_after_due: f64,
    pub deduction: f64,
    pub interval_hours: Option<f64>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = results)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ResultRow {
    pub result_id: i64,
    pub submission_id: i64,
    pub marking_state: String,
}

impl TryFrom<ResultRow> for ResultRecord {
    type Error = DomainError;

    fn try_from(row: ResultRow) -> Result<Self, Self::Error> {
        Ok(Self {
            result_id: row.result_id,
            submission_id: row.submission_id,
            marking_state: row.marking_state.parse::<MarkingState>()?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = peer_reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PeerReviewRow {
    pub peer_review_id: i64,
    pub reviewer_id: i64,
    pub result_id: i64,
}

impl From<PeerReviewRow> for PeerReview {
    fn from(row: PeerReviewRow) -> Self {
        Self {
            peer_review_id: row.peer_review_id,
            reviewer_id: row.reviewer_id,
            result_id: row.result_id,
        }
    }
}

/// Serializable summary of a stored assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentData {
    pub assignment_id: i64,
    pub short_identifier: String,
    #[serde(with = "time::serde::rfc3339")]
    pub due_date: OffsetDateTime,
}
