// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]

mod initialization_tests;

use crate::Persistence;
use gradeflow_domain::{RuleVariant, SubmissionRuleConfig};
use time::OffsetDateTime;
use time::macros::datetime;

pub const DUE: OffsetDateTime = datetime!(2026-03-02 17:00 UTC);

pub fn penalty_config() -> SubmissionRuleConfig {
    SubmissionRuleConfig {
        rule_type: RuleVariant::PenaltyPeriod,
        hours: Some(1.0),
        deduction: Some(10.0),
        interval: None,
    }
}

/// Three groupings on one assignment, each with a current submission.
///
/// `alpha` and `gamma` share student 11; `beta` shares nobody.
pub struct Roster {
    pub persistence: Persistence,
    pub alpha: i64,
    pub beta: i64,
    pub gamma: i64,
}

pub fn create_roster() -> Roster {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let assignment_id = persistence
        .create_assignment("a1", DUE, &SubmissionRuleConfig::default())
        .unwrap();

    let alpha = persistence
        .create_grouping(assignment_id, "alpha", &[10, 11])
        .unwrap();
    let beta = persistence
        .create_grouping(assignment_id, "beta", &[20, 21])
        .unwrap();
    let gamma = persistence
        .create_grouping(assignment_id, "gamma", &[11, 30])
        .unwrap();

    for grouping_id in [alpha, beta, gamma] {
        persistence.record_submission(grouping_id, DUE).unwrap();
    }

    Roster {
        persistence,
        alpha,
        beta,
        gamma,
    }
}
