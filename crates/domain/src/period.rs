// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Upper bound on any hour value a period may carry (one hundred years).
pub const MAX_PERIOD_HOURS: f64 = 24.0 * 365.0 * 100.0;

/// One escalation step of a submission rule.
///
/// A period starts `hours_after_due` hours after the due date. Penalty
/// variants charge `deduction` once the period has started; decay variants
/// charge it again every `interval_hours` while the period lasts.
///
/// Periods are validated on construction and immutable afterward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PeriodFields")]
pub struct Period {
    hours_after_due: f64,
    deduction: f64,
    interval_hours: Option<f64>,
}

#[derive(Deserialize)]
struct PeriodFields {
    hours_after_due: f64,
    #[serde(default)]
    deduction: Option<f64>,
    #[serde(default)]
    interval_hours: Option<f64>,
}

impl TryFrom<PeriodFields> for Period {
    type Error = DomainError;

    fn try_from(fields: PeriodFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.hours_after_due,
            fields.deduction,
            fields.interval_hours,
        )
    }
}

impl Period {
    /// Creates a validated period.
    ///
    /// A missing deduction is stored as zero.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRuleConfig` if:
    /// - any value is not finite
    /// - `hours_after_due` or `deduction` is negative
    /// - `interval_hours` is present but not strictly positive
    /// - an hour value exceeds `MAX_PERIOD_HOURS`
    pub fn new(
        hours_after_due: f64,
        deduction: Option<f64>,
        interval_hours: Option<f64>,
    ) -> Result<Self, DomainError> {
        check_hours("hours", hours_after_due)?;
        if hours_after_due < 0.0 {
            return Err(DomainError::invalid_rule_config(format!(
                "hours must not be negative (got {hours_after_due})"
            )));
        }

        let deduction: f64 = deduction.unwrap_or(0.0);
        if !deduction.is_finite() || deduction < 0.0 {
            return Err(DomainError::invalid_rule_config(format!(
                "deduction must be a non-negative number (got {deduction})"
            )));
        }

        if let Some(interval) = interval_hours {
            check_hours("interval", interval)?;
            if interval <= 0.0 {
                return Err(DomainError::invalid_rule_config(format!(
                    "interval must be greater than zero (got {interval})"
                )));
            }
        }

        Ok(Self {
            hours_after_due,
            deduction,
            interval_hours,
        })
    }

    /// Creates a grace window period that ends `hours_after_due` hours past the due date.
    ///
    /// # Errors
    ///
    /// Returns an error if the hour value is invalid.
    pub fn grace(hours_after_due: f64) -> Result<Self, DomainError> {
        Self::new(hours_after_due, None, None)
    }

    /// Hours after the due date at which this period begins.
    #[must_use]
    pub const fn hours_after_due(&self) -> f64 {
        self.hours_after_due
    }

    /// Deduction charged by this period (zero when unset).
    #[must_use]
    pub const fn deduction(&self) -> f64 {
        self.deduction
    }

    /// Repeat interval in hours, if the period decays.
    #[must_use]
    pub const fn interval_hours(&self) -> Option<f64> {
        self.interval_hours
    }
}

fn check_hours(field: &str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::invalid_rule_config(format!(
            "{field} must be a finite number"
        )));
    }
    if value > MAX_PERIOD_HOURS {
        return Err(DomainError::invalid_rule_config(format!(
            "{field} must not exceed {MAX_PERIOD_HOURS} (got {value})"
        )));
    }
    Ok(())
}
