// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommand handlers. Each returns the JSON document printed on stdout.

use std::path::Path;

use gradeflow::{PairingDecision, PeerReviewEngine, configure_submission_rule, evaluate_submission};
use gradeflow_domain::{PeerReview, SubmissionRule, SubmissionRuleConfig};
use gradeflow_persistence::Persistence;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::Command;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct CreatedOutput {
    id: i64,
}

#[derive(Debug, Serialize)]
struct PairOutput {
    decision: &'static str,
    peer_review: Option<PeerReview>,
}

/// Parses an RFC 3339 timestamp argument.
///
/// # Errors
///
/// Returns `CliError::Timestamp` if the value is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, CliError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|source| CliError::Timestamp {
        value: value.to_string(),
        source,
    })
}

/// Reads a JSON rule configuration from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_rule_config(path: &Path) -> Result<SubmissionRuleConfig, CliError> {
    let text: String = std::fs::read_to_string(path).map_err(|source| CliError::ReadRuleFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseRuleFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Evaluates a submission against a rule file.
///
/// # Errors
///
/// Returns an error if the rule file is unreadable or describes an invalid rule.
pub fn evaluate(
    rule_path: &Path,
    due: OffsetDateTime,
    submitted: OffsetDateTime,
) -> Result<String, CliError> {
    let config: SubmissionRuleConfig = load_rule_config(rule_path)?;
    let rule: SubmissionRule = SubmissionRule::from_config(&config)?;
    let result = rule.evaluate(due, submitted);
    Ok(serde_json::to_string_pretty(&result)?)
}

/// Runs a database-backed subcommand.
///
/// # Errors
///
/// Returns an error if the command's inputs are invalid or a database
/// operation fails.
pub fn run(persistence: &mut Persistence, command: Command) -> Result<String, CliError> {
    match command {
        Command::Evaluate {
            rule,
            due,
            submitted,
        } => evaluate(&rule, due, submitted),
        Command::AddAssignment {
            identifier,
            due,
            rule,
        } => {
            let config: SubmissionRuleConfig = match rule {
                Some(path) => load_rule_config(&path)?,
                None => SubmissionRuleConfig::default(),
            };
            let id = persistence.create_assignment(&identifier, due, &config)?;
            Ok(serde_json::to_string_pretty(&CreatedOutput { id })?)
        }
        Command::SetRule { assignment, rule } => {
            let config: SubmissionRuleConfig = load_rule_config(&rule)?;
            let rule = configure_submission_rule(persistence, assignment, &config)?;
            Ok(serde_json::to_string_pretty(&rule)?)
        }
        Command::AddGrouping {
            assignment,
            name,
            students,
        } => {
            let id = persistence.create_grouping(assignment, &name, &students)?;
            Ok(serde_json::to_string_pretty(&CreatedOutput { id })?)
        }
        Command::Submit { grouping, at } => {
            let submitted_at = at.unwrap_or_else(OffsetDateTime::now_utc);
            let id = persistence.record_submission(grouping, submitted_at)?;
            Ok(serde_json::to_string_pretty(&CreatedOutput { id })?)
        }
        Command::Late {
            assignment,
            submitted,
        } => {
            let result = evaluate_submission(persistence, assignment, submitted)?;
            Ok(serde_json::to_string_pretty(&result)?)
        }
        Command::Pair { reviewer, reviewee } => pair(persistence, reviewer, reviewee),
        Command::Unpair { peer_review } => {
            persistence.destroy_peer_review(peer_review)?;
            Ok(serde_json::to_string_pretty(&CreatedOutput { id: peer_review })?)
        }
    }
}

fn pair(
    persistence: &mut Persistence,
    reviewer_id: i64,
    reviewee_id: i64,
) -> Result<String, CliError> {
    let reviewer = persistence.load_reviewing_unit(reviewer_id)?;
    let reviewee = persistence.load_reviewing_unit(reviewee_id)?;

    let mut engine = PeerReviewEngine::new(persistence);
    let (decision, peer_review): (PairingDecision, _) = engine.try_pair(&reviewer, &reviewee)?;

    info!(
        reviewer_id,
        reviewee_id,
        decision = decision.as_str(),
        created = peer_review.is_some(),
        "Pairing processed"
    );

    Ok(serde_json::to_string_pretty(&PairOutput {
        decision: decision.as_str(),
        peer_review,
    })?)
}
