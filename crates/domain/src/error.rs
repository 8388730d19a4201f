// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A submission rule or one of its periods is misconfigured.
    InvalidRuleConfig {
        /// Description of what is wrong with the configuration.
        reason: String,
    },
    /// The submission rule type string is not recognized.
    UnknownRuleVariant(String),
    /// The reviewer and reviewee share at least one student.
    ConflictOfInterest {
        /// The reviewing unit.
        reviewer_id: i64,
        /// The unit under review.
        reviewee_id: i64,
    },
    /// The reviewer already reviews the reviewee's current submission.
    DuplicatePeerReview {
        /// The reviewing unit.
        reviewer_id: i64,
        /// The unit under review.
        reviewee_id: i64,
    },
    /// A referenced entity is missing or its identifier is invalid.
    InvalidReference {
        /// The kind of entity that was referenced.
        entity: &'static str,
        /// The offending identifier.
        id: i64,
    },
    /// The marking state string is not recognized.
    InvalidMarkingState(String),
}

impl DomainError {
    pub(crate) fn invalid_rule_config(reason: impl Into<String>) -> Self {
        Self::InvalidRuleConfig {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRuleConfig { reason } => {
                write!(f, "Invalid submission rule configuration: {reason}")
            }
            Self::UnknownRuleVariant(variant) => {
                write!(f, "Unknown submission rule type '{variant}'")
            }
            Self::ConflictOfInterest {
                reviewer_id,
                reviewee_id,
            } => {
                write!(
                    f,
                    "Grouping {reviewer_id} cannot review grouping {reviewee_id}: a student cannot be both reviewer and reviewee"
                )
            }
            Self::DuplicatePeerReview {
                reviewer_id,
                reviewee_id,
            } => {
                write!(
                    f,
                    "Grouping {reviewer_id} already reviews the current submission of grouping {reviewee_id}"
                )
            }
            Self::InvalidReference { entity, id } => {
                write!(f, "Invalid {entity} reference: {id}")
            }
            Self::InvalidMarkingState(state) => write!(f, "Invalid marking state: {state}"),
        }
    }
}

impl std::error::Error for DomainError {}
