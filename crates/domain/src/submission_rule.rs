// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Late-submission rules.
//!
//! A rule is one of four variants, each owning an ordered list of periods.
//! Rules are built either directly from periods or from the flat request
//! parameters an assignment is created with (`SubmissionRuleConfig`).
//!
//! ## Invariants
//!
//! - `hours_after_due` strictly increases across a rule's periods
//! - `NoLate` rules carry no periods
//! - every `PenaltyDecayPeriod` period has a repeat interval
//!
//! Violations are reported when the rule is built, never at evaluation time.

use crate::error::DomainError;
use crate::period::Period;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of late-submission policy attached to an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum RuleVariant {
    /// Late submissions are flagged but never penalized.
    #[default]
    NoLate,
    /// Late submissions are accepted without penalty until a window closes.
    GracePeriod,
    /// Each elapsed period replaces the previous deduction.
    PenaltyPeriod,
    /// Each elapsed period charges its deduction once per interval.
    PenaltyDecayPeriod,
}

impl FromStr for RuleVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NoLate" | "NoLateSubmissionRule" => Ok(Self::NoLate),
            "GracePeriod" | "GracePeriodSubmissionRule" => Ok(Self::GracePeriod),
            "PenaltyPeriod" | "PenaltyPeriodSubmissionRule" => Ok(Self::PenaltyPeriod),
            "PenaltyDecayPeriod" | "PenaltyDecayPeriodSubmissionRule" => {
                Ok(Self::PenaltyDecayPeriod)
            }
            _ => Err(DomainError::UnknownRuleVariant(s.to_string())),
        }
    }
}

impl TryFrom<String> for RuleVariant {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RuleVariant> for String {
    fn from(variant: RuleVariant) -> Self {
        variant.as_str().to_string()
    }
}

impl std::fmt::Display for RuleVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl RuleVariant {
    /// Converts this variant to its canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoLate => "NoLate",
            Self::GracePeriod => "GracePeriod",
            Self::PenaltyPeriod => "PenaltyPeriod",
            Self::PenaltyDecayPeriod => "PenaltyDecayPeriod",
        }
    }
}

/// A late-submission rule: a variant plus its ordered periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SubmissionRuleFields")]
pub struct SubmissionRule {
    variant: RuleVariant,
    periods: Vec<Period>,
}

#[derive(Deserialize)]
struct SubmissionRuleFields {
    #[serde(default)]
    variant: RuleVariant,
    #[serde(default)]
    periods: Vec<Period>,
}

impl TryFrom<SubmissionRuleFields> for SubmissionRule {
    type Error = DomainError;

    fn try_from(fields: SubmissionRuleFields) -> Result<Self, Self::Error> {
        Self::new(fields.variant, fields.periods)
    }
}

impl Default for SubmissionRule {
    fn default() -> Self {
        Self::no_late()
    }
}

impl SubmissionRule {
    /// Creates a validated rule from a variant and its periods.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRuleConfig` if:
    /// - a `NoLate` rule is given periods
    /// - period offsets do not strictly increase
    /// - a `PenaltyDecayPeriod` period has no interval
    pub fn new(variant: RuleVariant, periods: Vec<Period>) -> Result<Self, DomainError> {
        if variant == RuleVariant::NoLate && !periods.is_empty() {
            return Err(DomainError::invalid_rule_config(
                "a NoLate rule cannot have periods",
            ));
        }

        for pair in periods.windows(2) {
            if pair[1].hours_after_due() <= pair[0].hours_after_due() {
                return Err(DomainError::invalid_rule_config(format!(
                    "period offsets must strictly increase ({} is not after {})",
                    pair[1].hours_after_due(),
                    pair[0].hours_after_due()
                )));
            }
        }

        if variant == RuleVariant::PenaltyDecayPeriod
            && periods.iter().any(|p| p.interval_hours().is_none())
        {
            return Err(DomainError::invalid_rule_config(
                "every PenaltyDecayPeriod period needs an interval",
            ));
        }

        Ok(Self { variant, periods })
    }

    /// The rule used when an assignment does not specify one.
    #[must_use]
    pub const fn no_late() -> Self {
        Self {
            variant: RuleVariant::NoLate,
            periods: Vec::new(),
        }
    }

    /// Builds a rule from flat request parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or invalid.
    pub fn from_config(config: &SubmissionRuleConfig) -> Result<Self, DomainError> {
        let variant: RuleVariant = config.rule_type;
        let period: Period = match variant {
            RuleVariant::NoLate => return Ok(Self::no_late()),
            RuleVariant::GracePeriod => Period::grace(config.required_hours()?)?,
            RuleVariant::PenaltyPeriod => {
                Period::new(config.required_hours()?, config.deduction, None)?
            }
            RuleVariant::PenaltyDecayPeriod => {
                let interval: f64 = config.interval.ok_or_else(|| {
                    DomainError::invalid_rule_config(
                        "PenaltyDecayPeriod requires submission_rule_interval",
                    )
                })?;
                Period::new(config.required_hours()?, config.deduction, Some(interval))?
            }
        };

        Self::new(variant, vec![period])
    }

    /// The rule variant.
    #[must_use]
    pub const fn variant(&self) -> RuleVariant {
        self.variant
    }

    /// The rule's periods, in ascending offset order.
    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Offset of the last period, if any. For grace rules this closes the window.
    #[must_use]
    pub fn window_hours(&self) -> Option<f64> {
        self.periods.last().map(Period::hours_after_due)
    }
}

/// Flat submission rule parameters as supplied on assignment create/update.
///
/// `rule_type` defaults to `NoLate` when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRuleConfig {
    /// The rule variant.
    #[serde(default, rename = "submission_rule_type")]
    pub rule_type: RuleVariant,
    /// Hours after the due date for the single configured period.
    #[serde(default, rename = "submission_rule_hours")]
    pub hours: Option<f64>,
    /// Deduction for penalty variants.
    #[serde(default, rename = "submission_rule_deduction")]
    pub deduction: Option<f64>,
    /// Repeat interval in hours for the decay variant.
    #[serde(default, rename = "submission_rule_interval")]
    pub interval: Option<f64>,
}

impl SubmissionRuleConfig {
    /// Builds a config from raw request parameters.
    ///
    /// A missing rule type selects `NoLate`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownRuleVariant` if the rule type is not recognized.
    pub fn from_params(
        rule_type: Option<&str>,
        hours: Option<f64>,
        deduction: Option<f64>,
        interval: Option<f64>,
    ) -> Result<Self, DomainError> {
        let rule_type: RuleVariant = rule_type.map_or(Ok(RuleVariant::NoLate), str::parse)?;
        Ok(Self {
            rule_type,
            hours,
            deduction,
            interval,
        })
    }

    fn required_hours(&self) -> Result<f64, DomainError> {
        self.hours.ok_or_else(|| {
            DomainError::invalid_rule_config(format!(
                "{} requires submission_rule_hours",
                self.rule_type
            ))
        })
    }
}
