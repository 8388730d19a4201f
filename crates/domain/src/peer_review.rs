// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::reviewing_unit::{ReviewingUnit, shares_members};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Marking progress of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MarkingState {
    /// Marking has not finished. New peer review results start here.
    #[default]
    Incomplete,
    /// Marking has finished.
    Complete,
}

impl FromStr for MarkingState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incomplete" => Ok(Self::Incomplete),
            "complete" => Ok(Self::Complete),
            _ => Err(DomainError::InvalidMarkingState(s.to_string())),
        }
    }
}

impl std::fmt::Display for MarkingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MarkingState {
    /// Converts this state to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::Complete => "complete",
        }
    }
}

/// The grading record a peer review is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The result's canonical ID.
    pub result_id: i64,
    /// The reviewee submission being graded.
    pub submission_id: i64,
    /// Marking progress.
    pub marking_state: MarkingState,
}

/// A persisted link from a reviewer grouping to a result on a reviewee's submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerReview {
    /// The peer review's canonical ID.
    pub peer_review_id: i64,
    /// The reviewing grouping.
    pub reviewer_id: i64,
    /// The result being filled in by the reviewer.
    pub result_id: i64,
}

/// Validates a peer review before it is stored.
///
/// # Arguments
///
/// * `reviewer` - The reviewing unit
/// * `reviewee` - The unit owning the result's submission
/// * `result_id` - The result the review is attached to
///
/// # Errors
///
/// Returns an error if:
/// - The reviewer or result ID is not positive (`InvalidReference`)
/// - The units are the same grouping or share a student (`ConflictOfInterest`)
pub fn validate_peer_review(
    reviewer: &ReviewingUnit,
    reviewee: &ReviewingUnit,
    result_id: i64,
) -> Result<(), DomainError> {
    if reviewer.id() <= 0 {
        return Err(DomainError::InvalidReference {
            entity: "reviewer",
            id: reviewer.id(),
        });
    }
    if result_id <= 0 {
        return Err(DomainError::InvalidReference {
            entity: "result",
            id: result_id,
        });
    }
    if reviewer.id() == reviewee.id() || shares_members(reviewer, reviewee) {
        return Err(DomainError::ConflictOfInterest {
            reviewer_id: reviewer.id(),
            reviewee_id: reviewee.id(),
        });
    }
    Ok(())
}
