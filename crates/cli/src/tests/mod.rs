// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use std::path::PathBuf;

/// Writes `contents` to a per-process temporary file and returns its path.
pub fn write_rule_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "gradeflow_cli_{}_{name}.json",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

pub const PENALTY_RULE: &str = r#"{
    "submission_rule_type": "PenaltyPeriod",
    "submission_rule_hours": 1,
    "submission_rule_deduction": 10
}"#;
