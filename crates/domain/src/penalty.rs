// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Late-submission penalty evaluation.
//!
//! Evaluation is a pure, deterministic function of the due date, the
//! submission instant and the rule. It never fails: every configuration
//! problem is rejected when the rule is built.
//!
//! ## Semantics by variant
//!
//! - On or before the due date: on time, no deduction (all variants)
//! - No periods: behaves as `NoLate`
//! - `NoLate`: late work is flagged, never penalized
//! - `GracePeriod`: late work inside the window is accepted without penalty;
//!   past the window it is not collected. Collection time is the window end.
//! - `PenaltyPeriod`: the deduction of the last period whose offset has
//!   elapsed applies. Periods do not repeat.
//! - `PenaltyDecayPeriod`: every elapsed period charges its deduction once per
//!   full interval spent inside it. Charges accumulate across periods.
//!
//! Capping the total deduction at the available marks is left to the caller.

use crate::period::Period;
use crate::submission_rule::{RuleVariant, SubmissionRule};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Where a submission stands relative to its collection deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionStatus {
    /// Submitted on or before the due date.
    OnTime,
    /// Submitted after the due date but still collected for grading.
    Late,
    /// Submitted after the grace window closed; not collected for grading.
    PastCollection,
}

/// A single deduction entry explaining how the total was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodCharge {
    /// Position of the period in the rule (1-based).
    pub period_index: usize,
    /// Offset of the period from the due date, in hours.
    pub hours_after_due: f64,
    /// Number of times the period's deduction was charged.
    pub intervals: u32,
    /// Total deduction contributed by this period.
    pub deduction: f64,
}

/// Outcome of evaluating a submission against a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyResult {
    /// Whether the submission arrived after the due date.
    pub is_late: bool,
    /// Total deduction to apply.
    pub deduction: f64,
    /// Instant at which the submission is collected for grading.
    #[serde(with = "time::serde::rfc3339")]
    pub collection_time: OffsetDateTime,
    /// Collection status of the submission.
    pub status: CollectionStatus,
    /// Per-period breakdown of the deduction.
    pub breakdown: Vec<PeriodCharge>,
}

impl PenaltyResult {
    const fn on_time(due_date: OffsetDateTime) -> Self {
        Self {
            is_late: false,
            deduction: 0.0,
            collection_time: due_date,
            status: CollectionStatus::OnTime,
            breakdown: Vec::new(),
        }
    }

    const fn flagged(due_date: OffsetDateTime) -> Self {
        Self {
            is_late: true,
            deduction: 0.0,
            collection_time: due_date,
            status: CollectionStatus::Late,
            breakdown: Vec::new(),
        }
    }

    /// Returns whether the submission counts for grading.
    #[must_use]
    pub const fn is_collected(&self) -> bool {
        !matches!(self.status, CollectionStatus::PastCollection)
    }
}

impl SubmissionRule {
    /// Evaluates a submission made at `submitted_at` against this rule.
    #[must_use]
    pub fn evaluate(
        &self,
        due_date: OffsetDateTime,
        submitted_at: OffsetDateTime,
    ) -> PenaltyResult {
        evaluate(due_date, submitted_at, self)
    }
}

/// Evaluates a submission against a rule.
///
/// # Arguments
///
/// * `due_date` - The assignment due date
/// * `submitted_at` - The instant the submission was made
/// * `rule` - The rule attached to the assignment
///
/// # Returns
///
/// A `PenaltyResult` with lateness, deduction, collection time and breakdown.
#[must_use]
pub fn evaluate(
    due_date: OffsetDateTime,
    submitted_at: OffsetDateTime,
    rule: &SubmissionRule,
) -> PenaltyResult {
    if submitted_at <= due_date {
        return PenaltyResult::on_time(due_date);
    }

    let periods: &[Period] = rule.periods();
    if periods.is_empty() {
        return PenaltyResult::flagged(due_date);
    }

    let elapsed_hours: f64 = (submitted_at - due_date).as_seconds_f64() / SECONDS_PER_HOUR;

    match rule.variant() {
        RuleVariant::NoLate => PenaltyResult::flagged(due_date),
        RuleVariant::GracePeriod => evaluate_grace(due_date, submitted_at, periods),
        RuleVariant::PenaltyPeriod => evaluate_penalty(submitted_at, elapsed_hours, periods),
        RuleVariant::PenaltyDecayPeriod => evaluate_decay(submitted_at, elapsed_hours, periods),
    }
}

fn evaluate_grace(
    due_date: OffsetDateTime,
    submitted_at: OffsetDateTime,
    periods: &[Period],
) -> PenaltyResult {
    let window_hours: f64 = periods.last().map_or(0.0, Period::hours_after_due);
    let window_end: OffsetDateTime = due_date.saturating_add(Duration::saturating_seconds_f64(
        window_hours * SECONDS_PER_HOUR,
    ));

    let status: CollectionStatus = if submitted_at <= window_end {
        CollectionStatus::Late
    } else {
        CollectionStatus::PastCollection
    };

    PenaltyResult {
        is_late: true,
        deduction: 0.0,
        collection_time: window_end,
        status,
        breakdown: Vec::new(),
    }
}

fn evaluate_penalty(
    submitted_at: OffsetDateTime,
    elapsed_hours: f64,
    periods: &[Period],
) -> PenaltyResult {
    let applied: Option<(usize, &Period)> = periods
        .iter()
        .enumerate()
        .take_while(|(_, period)| elapsed_hours >= period.hours_after_due())
        .last();

    let breakdown: Vec<PeriodCharge> = applied
        .map(|(idx, period)| PeriodCharge {
            period_index: idx + 1,
            hours_after_due: period.hours_after_due(),
            intervals: 1,
            deduction: period.deduction(),
        })
        .into_iter()
        .collect();

    PenaltyResult {
        is_late: true,
        deduction: breakdown.iter().map(|charge| charge.deduction).sum(),
        collection_time: submitted_at,
        status: CollectionStatus::Late,
        breakdown,
    }
}

fn evaluate_decay(
    submitted_at: OffsetDateTime,
    elapsed_hours: f64,
    periods: &[Period],
) -> PenaltyResult {
    let mut breakdown: Vec<PeriodCharge> = Vec::new();

    for (idx, period) in periods.iter().enumerate() {
        if elapsed_hours < period.hours_after_due() {
            break;
        }
        let Some(interval) = period.interval_hours() else {
            continue;
        };

        // A period runs until the next one starts
        let period_end: f64 = periods
            .get(idx + 1)
            .map_or(elapsed_hours, |next| next.hours_after_due().min(elapsed_hours));
        let hours_in_period: f64 = period_end - period.hours_after_due();

        let intervals: u32 = (hours_in_period / interval)
            .floor()
            .to_u32()
            .unwrap_or(u32::MAX);
        if intervals == 0 {
            continue;
        }

        breakdown.push(PeriodCharge {
            period_index: idx + 1,
            hours_after_due: period.hours_after_due(),
            intervals,
            deduction: period.deduction() * f64::from(intervals),
        });
    }

    PenaltyResult {
        is_late: true,
        deduction: breakdown.iter().map(|charge| charge.deduction).sum(),
        collection_time: submitted_at,
        status: CollectionStatus::Late,
        breakdown,
    }
}
