// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::error::PersistenceError;
use crate::tests::{DUE, penalty_config};
use gradeflow_domain::SubmissionRuleConfig;
use std::path::PathBuf;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.create_assignment("a1", DUE, &SubmissionRuleConfig::default())
        .unwrap();

    assert!(db1.lookup_assignment_id("a1").is_ok());
    assert!(matches!(
        db2.lookup_assignment_id("a1"),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_file_database_survives_reopen() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "gradeflow_reopen_{}.sqlite3",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let assignment_id = {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .create_assignment("a1", DUE, &penalty_config())
            .unwrap()
    };

    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let assignment = reopened.load_assignment(assignment_id).unwrap();
    assert_eq!(assignment.short_identifier, "a1");
    assert_eq!(assignment.due_date, DUE);
    assert_eq!(reopened.count_periods().unwrap(), 1);
    drop(reopened);

    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
