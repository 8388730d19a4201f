// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A collaborating group of students that can review or be reviewed.
///
/// This is a snapshot of a grouping: its canonical ID, the IDs of its
/// member students and the submission currently used for grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewingUnit {
    id: i64,
    member_student_ids: BTreeSet<i64>,
    current_submission_id: Option<i64>,
}

impl ReviewingUnit {
    /// Creates a new reviewing unit snapshot.
    ///
    /// # Arguments
    ///
    /// * `id` - The grouping ID
    /// * `member_student_ids` - IDs of the students in the grouping
    /// * `current_submission_id` - The submission used for grading, if any
    #[must_use]
    pub fn new(
        id: i64,
        member_student_ids: impl IntoIterator<Item = i64>,
        current_submission_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            member_student_ids: member_student_ids.into_iter().collect(),
            current_submission_id,
        }
    }

    /// The grouping ID.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// IDs of the member students.
    #[must_use]
    pub const fn member_student_ids(&self) -> &BTreeSet<i64> {
        &self.member_student_ids
    }

    /// The submission currently used for grading, if any.
    #[must_use]
    pub const fn current_submission_id(&self) -> Option<i64> {
        self.current_submission_id
    }

    /// Returns whether this unit has at least one student in common with `other`.
    #[must_use]
    pub fn shares_members_with(&self, other: &Self) -> bool {
        shares_members(self, other)
    }
}

/// Returns whether two units have at least one student in common.
///
/// This is the single conflict-of-interest predicate used both before a
/// pairing is attempted and when a peer review is persisted.
#[must_use]
pub fn shares_members(a: &ReviewingUnit, b: &ReviewingUnit) -> bool {
    !a.member_student_ids.is_disjoint(&b.member_student_ids)
}
