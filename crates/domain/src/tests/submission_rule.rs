// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Period, RuleVariant, SubmissionRule, SubmissionRuleConfig};

fn config(
    rule_type: RuleVariant,
    hours: Option<f64>,
    deduction: Option<f64>,
    interval: Option<f64>,
) -> SubmissionRuleConfig {
    SubmissionRuleConfig {
        rule_type,
        hours,
        deduction,
        interval,
    }
}

#[test]
fn test_rule_variant_parses_short_and_class_names() {
    assert_eq!("GracePeriod".parse::<RuleVariant>(), Ok(RuleVariant::GracePeriod));
    assert_eq!(
        "PenaltyDecayPeriodSubmissionRule".parse::<RuleVariant>(),
        Ok(RuleVariant::PenaltyDecayPeriod)
    );
    assert_eq!("NoLate".parse::<RuleVariant>(), Ok(RuleVariant::NoLate));
}

#[test]
fn test_rule_variant_rejects_unknown_name() {
    let result = "Lenient".parse::<RuleVariant>();
    assert_eq!(
        result,
        Err(DomainError::UnknownRuleVariant(String::from("Lenient")))
    );
}

#[test]
fn test_config_without_rule_type_defaults_to_no_late() {
    let config = SubmissionRuleConfig::from_params(None, Some(4.0), None, None).unwrap();
    assert_eq!(config.rule_type, RuleVariant::NoLate);

    let rule = SubmissionRule::from_config(&config).unwrap();
    assert_eq!(rule, SubmissionRule::no_late());
    assert!(rule.periods().is_empty());
}

#[test]
fn test_config_from_params_rejects_unknown_rule_type() {
    let result = SubmissionRuleConfig::from_params(Some("Whenever"), None, None, None);
    assert!(matches!(result, Err(DomainError::UnknownRuleVariant(_))));
}

#[test]
fn test_config_deserializes_request_parameter_names() {
    let json = r#"{
        "submission_rule_type": "PenaltyDecayPeriod",
        "submission_rule_hours": 2,
        "submission_rule_deduction": 5,
        "submission_rule_interval": 1
    }"#;
    let config: SubmissionRuleConfig = serde_json::from_str(json).unwrap();
    assert_eq!(
        config,
        SubmissionRuleConfig {
            rule_type: RuleVariant::PenaltyDecayPeriod,
            hours: Some(2.0),
            deduction: Some(5.0),
            interval: Some(1.0),
        }
    );
}

#[test]
fn test_config_deserialization_defaults_rule_type() {
    let config: SubmissionRuleConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.rule_type, RuleVariant::NoLate);
}

#[test]
fn test_config_deserialization_rejects_unknown_rule_type() {
    let result: Result<SubmissionRuleConfig, _> =
        serde_json::from_str(r#"{"submission_rule_type": "Lenient"}"#);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Unknown submission rule type 'Lenient'"));
}

#[test]
fn test_grace_config_builds_single_period() {
    let rule = SubmissionRule::from_config(&config(
        RuleVariant::GracePeriod,
        Some(24.0),
        Some(10.0),
        None,
    ))
    .unwrap();

    assert_eq!(rule.variant(), RuleVariant::GracePeriod);
    assert_eq!(rule.periods().len(), 1);
    assert_eq!(rule.periods()[0].hours_after_due(), 24.0);
    // Grace rules do not track a deduction
    assert_eq!(rule.periods()[0].deduction(), 0.0);
}

#[test]
fn test_penalty_config_defaults_missing_deduction_to_zero() {
    let rule = SubmissionRule::from_config(&config(
        RuleVariant::PenaltyPeriod,
        Some(3.0),
        None,
        None,
    ))
    .unwrap();

    assert_eq!(rule.periods()[0].deduction(), 0.0);
    assert_eq!(rule.periods()[0].interval_hours(), None);
}

#[test]
fn test_config_missing_hours_is_invalid() {
    for variant in [
        RuleVariant::GracePeriod,
        RuleVariant::PenaltyPeriod,
        RuleVariant::PenaltyDecayPeriod,
    ] {
        let result = SubmissionRule::from_config(&config(variant, None, Some(5.0), Some(1.0)));
        assert!(
            matches!(result, Err(DomainError::InvalidRuleConfig { .. })),
            "{variant} without hours should be rejected"
        );
    }
}

#[test]
fn test_decay_config_missing_interval_is_invalid() {
    let result = SubmissionRule::from_config(&config(
        RuleVariant::PenaltyDecayPeriod,
        Some(1.0),
        Some(5.0),
        None,
    ));
    assert!(matches!(result, Err(DomainError::InvalidRuleConfig { .. })));
}

#[test]
fn test_period_rejects_invalid_numbers() {
    assert!(Period::new(-1.0, None, None).is_err());
    assert!(Period::new(f64::NAN, None, None).is_err());
    assert!(Period::new(1.0, Some(-5.0), None).is_err());
    assert!(Period::new(1.0, Some(f64::INFINITY), None).is_err());
    assert!(Period::new(1.0, Some(5.0), Some(0.0)).is_err());
    assert!(Period::new(1.0e9, None, None).is_err());
}

#[test]
fn test_period_accepts_zero_offset() {
    let period = Period::new(0.0, Some(5.0), Some(2.0)).unwrap();
    assert_eq!(period.hours_after_due(), 0.0);
    assert_eq!(period.deduction(), 5.0);
    assert_eq!(period.interval_hours(), Some(2.0));
}

#[test]
fn test_rule_rejects_non_increasing_offsets() {
    let periods = vec![
        Period::new(3.0, Some(10.0), None).unwrap(),
        Period::new(3.0, Some(25.0), None).unwrap(),
    ];
    let result = SubmissionRule::new(RuleVariant::PenaltyPeriod, periods);
    assert!(matches!(result, Err(DomainError::InvalidRuleConfig { .. })));

    let periods = vec![
        Period::new(5.0, Some(10.0), None).unwrap(),
        Period::new(1.0, Some(25.0), None).unwrap(),
    ];
    let result = SubmissionRule::new(RuleVariant::PenaltyPeriod, periods);
    assert!(matches!(result, Err(DomainError::InvalidRuleConfig { .. })));
}

#[test]
fn test_no_late_rule_rejects_periods() {
    let periods = vec![Period::grace(1.0).unwrap()];
    let result = SubmissionRule::new(RuleVariant::NoLate, periods);
    assert!(matches!(result, Err(DomainError::InvalidRuleConfig { .. })));
}

#[test]
fn test_decay_rule_requires_interval_on_every_period() {
    let periods = vec![
        Period::new(1.0, Some(5.0), Some(1.0)).unwrap(),
        Period::new(4.0, Some(10.0), None).unwrap(),
    ];
    let result = SubmissionRule::new(RuleVariant::PenaltyDecayPeriod, periods);
    assert!(matches!(result, Err(DomainError::InvalidRuleConfig { .. })));
}

#[test]
fn test_rule_deserialization_runs_validation() {
    let json = r#"{
        "variant": "PenaltyPeriod",
        "periods": [
            {"hours_after_due": 3, "deduction": 25},
            {"hours_after_due": 1, "deduction": 10}
        ]
    }"#;
    let result: Result<SubmissionRule, _> = serde_json::from_str(json);
    assert!(result.is_err());

    let json = r#"{
        "variant": "PenaltyPeriod",
        "periods": [
            {"hours_after_due": 1, "deduction": 10},
            {"hours_after_due": 3, "deduction": 25}
        ]
    }"#;
    let rule: SubmissionRule = serde_json::from_str(json).unwrap();
    assert_eq!(rule.periods().len(), 2);
    assert_eq!(rule.window_hours(), Some(3.0));
}
