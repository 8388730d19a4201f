// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, MarkingState, ReviewingUnit, shares_members, validate_peer_review};

#[test]
fn test_units_with_common_student_share_members() {
    let a: ReviewingUnit = ReviewingUnit::new(1, [10, 11], Some(100));
    let b: ReviewingUnit = ReviewingUnit::new(2, [11, 12], Some(200));

    assert!(shares_members(&a, &b));
    assert!(b.shares_members_with(&a));
}

#[test]
fn test_disjoint_units_do_not_share_members() {
    let a: ReviewingUnit = ReviewingUnit::new(1, [10, 11], Some(100));
    let b: ReviewingUnit = ReviewingUnit::new(2, [12, 13], Some(200));

    assert!(!shares_members(&a, &b));
}

#[test]
fn test_empty_units_do_not_share_members() {
    let a: ReviewingUnit = ReviewingUnit::new(1, Vec::<i64>::new(), None);
    let b: ReviewingUnit = ReviewingUnit::new(2, [12], None);

    assert!(!shares_members(&a, &a));
    assert!(!shares_members(&a, &b));
}

#[test]
fn test_member_ids_are_deduplicated() {
    let unit: ReviewingUnit = ReviewingUnit::new(1, [5, 5, 3], None);
    assert_eq!(unit.member_student_ids().len(), 2);
}

#[test]
fn test_validate_peer_review_accepts_disjoint_units() {
    let reviewer: ReviewingUnit = ReviewingUnit::new(1, [10], Some(100));
    let reviewee: ReviewingUnit = ReviewingUnit::new(2, [20], Some(200));

    assert_eq!(validate_peer_review(&reviewer, &reviewee, 5), Ok(()));
}

#[test]
fn test_validate_peer_review_rejects_shared_student() {
    let reviewer: ReviewingUnit = ReviewingUnit::new(1, [10, 20], Some(100));
    let reviewee: ReviewingUnit = ReviewingUnit::new(2, [20], Some(200));

    let result = validate_peer_review(&reviewer, &reviewee, 5);
    assert_eq!(
        result,
        Err(DomainError::ConflictOfInterest {
            reviewer_id: 1,
            reviewee_id: 2,
        })
    );
}

#[test]
fn test_validate_peer_review_rejects_self_review_of_empty_unit() {
    let unit: ReviewingUnit = ReviewingUnit::new(4, Vec::<i64>::new(), Some(100));

    let result = validate_peer_review(&unit, &unit, 5);
    assert!(matches!(result, Err(DomainError::ConflictOfInterest { .. })));
}

#[test]
fn test_validate_peer_review_rejects_non_positive_ids() {
    let reviewer: ReviewingUnit = ReviewingUnit::new(0, [10], None);
    let reviewee: ReviewingUnit = ReviewingUnit::new(2, [20], Some(200));
    assert_eq!(
        validate_peer_review(&reviewer, &reviewee, 5),
        Err(DomainError::InvalidReference {
            entity: "reviewer",
            id: 0,
        })
    );

    let reviewer: ReviewingUnit = ReviewingUnit::new(1, [10], None);
    assert_eq!(
        validate_peer_review(&reviewer, &reviewee, -3),
        Err(DomainError::InvalidReference {
            entity: "result",
            id: -3,
        })
    );
}

#[test]
fn test_marking_state_round_trips_through_storage_string() {
    assert_eq!("incomplete".parse::<MarkingState>(), Ok(MarkingState::Incomplete));
    assert_eq!(MarkingState::Complete.as_str(), "complete");
    assert!(matches!(
        "released".parse::<MarkingState>(),
        Err(DomainError::InvalidMarkingState(_))
    ));
}
