// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::SubmissionRuleStore;
use gradeflow_domain::{PenaltyResult, SubmissionRule, SubmissionRuleConfig};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Builds a rule from request parameters and attaches it to an assignment.
///
/// Any previous rule and its periods are destroyed in the same transaction.
///
/// # Arguments
///
/// * `store` - The rule store
/// * `assignment_id` - The assignment to configure
/// * `config` - The flat rule parameters
///
/// # Returns
///
/// The rule now attached to the assignment.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid (nothing is written)
/// - The assignment does not exist
/// - The replacement fails
pub fn configure_submission_rule<S: SubmissionRuleStore>(
    store: &mut S,
    assignment_id: i64,
    config: &SubmissionRuleConfig,
) -> Result<SubmissionRule, S::Error> {
    let rule: SubmissionRule = SubmissionRule::from_config(config)?;
    store.replace_submission_rule(assignment_id, &rule)?;

    info!(
        assignment_id,
        rule_type = rule.variant().as_str(),
        periods = rule.periods().len(),
        "Configured submission rule"
    );

    Ok(rule)
}

/// Applies an assignment update's rule parameters.
///
/// When `config` is `None` the existing rule is kept untouched.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the store fails.
pub fn update_submission_rule<S: SubmissionRuleStore>(
    store: &mut S,
    assignment_id: i64,
    config: Option<&SubmissionRuleConfig>,
) -> Result<SubmissionRule, S::Error> {
    match config {
        Some(config) => configure_submission_rule(store, assignment_id, config),
        None => {
            debug!(assignment_id, "No rule type supplied; keeping existing rule");
            store.load_submission_rule(assignment_id)
        }
    }
}

/// Evaluates a submission against the assignment's rule and due date.
///
/// # Errors
///
/// Returns an error if the assignment or its rule cannot be loaded.
pub fn evaluate_submission<S: SubmissionRuleStore>(
    store: &mut S,
    assignment_id: i64,
    submitted_at: OffsetDateTime,
) -> Result<PenaltyResult, S::Error> {
    let due_date: OffsetDateTime = store.due_date(assignment_id)?;
    let rule: SubmissionRule = store.load_submission_rule(assignment_id)?;
    let result: PenaltyResult = rule.evaluate(due_date, submitted_at);

    debug!(
        assignment_id,
        is_late = result.is_late,
        deduction = result.deduction,
        status = ?result.status,
        "Evaluated submission"
    );

    Ok(result)
}
