//! Registration fee relaxation calculator.
//!
//! State councils grant percentage relaxations on the registration fee for
//! applicant criteria (gender, category, disability, occupation, age). A
//! combination rule covering exactly the selected criteria overrides the
//! individual policies; otherwise the enabled policies' percentages add up.
//! All amounts are whole rupees.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Upper bound for any relaxation or GST percentage.
pub const MAX_PERCENT: u32 = 100;

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

/// A council's relaxation for one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelaxationPolicy {
    pub criterion_id: String,
    pub is_enabled: bool,
    pub relaxation_percent: u32,
    /// The relaxed fee never drops below this amount.
    pub min_final_amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationMethod {
    /// Sum of the member criteria's enabled policy percentages.
    Sum,
    /// The rule's own combined percentage.
    Custom,
}

/// Relaxation for applicants meeting an exact set of criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationRule {
    pub id: String,
    pub criteria_ids: Vec<String>,
    pub application_method: ApplicationMethod,
    pub combined_percent: u32,
    pub min_final_amount: u64,
}

impl CombinationRule {
    fn matches(&self, selected: &BTreeSet<&str>) -> bool {
        let own: BTreeSet<&str> = self.criteria_ids.iter().map(String::as_str).collect();
        !own.is_empty() && own == *selected
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstSetting {
    pub applicable: bool,
    pub percentage: u32,
}

/// Fee bounds for one registration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    pub default_amount: u64,
    pub min_amount: u64,
    pub max_amount: u64,
    pub gst: GstSetting,
}

impl FeeSchedule {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.min_amount > self.max_amount {
            return Err(CoreError::Validation(format!(
                "Minimum fee {} exceeds maximum fee {}",
                self.min_amount, self.max_amount
            )));
        }
        if !(self.min_amount..=self.max_amount).contains(&self.default_amount) {
            return Err(CoreError::Validation(format!(
                "Default fee {} must lie between {} and {}",
                self.default_amount, self.min_amount, self.max_amount
            )));
        }
        validate_percent("GST percentage", self.gst.percentage)
    }
}

pub fn validate_percent(label: &str, percent: u32) -> Result<(), CoreError> {
    if percent > MAX_PERCENT {
        return Err(CoreError::Validation(format!(
            "{label} must be between 0 and {MAX_PERCENT}, got {percent}"
        )));
    }
    Ok(())
}

pub fn validate_policy(policy: &RelaxationPolicy) -> Result<(), CoreError> {
    validate_percent("Relaxation percentage", policy.relaxation_percent)
}

/// A combination rule needs at least two criteria and must not duplicate
/// the criteria set of an existing rule.
pub fn validate_combination_rule(
    rule: &CombinationRule,
    existing: &[CombinationRule],
) -> Result<(), CoreError> {
    let set: BTreeSet<&str> = rule.criteria_ids.iter().map(String::as_str).collect();
    if set.len() < 2 {
        return Err(CoreError::Validation(
            "A combination rule needs at least two distinct criteria".into(),
        ));
    }
    validate_percent("Combined percentage", rule.combined_percent)?;
    if existing.iter().any(|other| other.id != rule.id && other.matches(&set)) {
        return Err(CoreError::Conflict(
            "A combination rule for these criteria already exists".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub base_fee: u64,
    pub applied_criteria: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_rule: Option<String>,
    pub applied_percent: u32,
    pub discount_amount: u64,
    pub fee_after_discount: u64,
    pub gst_applicable: bool,
    pub cgst_amount: u64,
    pub sgst_amount: u64,
    pub total_tax_amount: u64,
    pub total_payable_amount: u64,
    pub calculation_details: Vec<String>,
}

fn enabled_policy<'p>(policies: &'p [RelaxationPolicy], id: &str) -> Option<&'p RelaxationPolicy> {
    policies
        .iter()
        .find(|p| p.is_enabled && p.criterion_id == id)
}

/// `value * percent / divisor`, rounded half up. Callers keep `percent`
/// within `0..=MAX_PERCENT` and `divisor >= 100`, so the result never
/// exceeds `value`.
fn percent_of(value: u64, percent: u32, divisor: u64) -> Result<u64, CoreError> {
    let scaled = (u128::from(value) * u128::from(percent) + u128::from(divisor / 2))
        / u128::from(divisor);
    u64::try_from(scaled).map_err(|_| {
        CoreError::Internal(format!("{percent}% of {value} does not fit a fee amount"))
    })
}

/// Work out the payable fee for an applicant's selected relaxation criteria.
///
/// Percentages outside `0..=100` on GST, an applied policy or the matched
/// rule are rejected with `Validation`, as is a total that overflows.
pub fn calculate_fee(
    base_fee: u64,
    selected_criteria: &[&str],
    policies: &[RelaxationPolicy],
    rules: &[CombinationRule],
    gst: GstSetting,
) -> Result<FeeBreakdown, CoreError> {
    validate_percent("GST percentage", gst.percentage)?;
    let selected: BTreeSet<&str> = selected_criteria.iter().copied().collect();
    for policy in selected.iter().filter_map(|&id| enabled_policy(policies, id)) {
        validate_policy(policy)?;
    }
    let enabled = |id: &str| enabled_policy(policies, id);
    let mut details = Vec::new();

    let matched_rule = rules.iter().find(|rule| rule.matches(&selected));
    let (applied_criteria, raw_percent, floor): (Vec<String>, u32, u64) = match matched_rule {
        Some(rule) => {
            validate_percent("Combined percentage", rule.combined_percent)?;
            let percent: u32 = match rule.application_method {
                ApplicationMethod::Custom => rule.combined_percent,
                ApplicationMethod::Sum => selected
                    .iter()
                    .filter_map(|&id| enabled(id))
                    .map(|p| p.relaxation_percent)
                    .sum(),
            };
            details.push(format!("Combination rule {} applied: {percent}%", rule.id));
            (
                selected.iter().map(|s| s.to_string()).collect(),
                percent,
                rule.min_final_amount,
            )
        }
        None => {
            let applied: Vec<&RelaxationPolicy> =
                selected.iter().filter_map(|&id| enabled(id)).collect();
            for policy in &applied {
                details.push(format!(
                    "{}: {}%",
                    policy.criterion_id, policy.relaxation_percent
                ));
            }
            (
                applied.iter().map(|p| p.criterion_id.clone()).collect(),
                applied.iter().map(|p| p.relaxation_percent).sum(),
                applied.iter().map(|p| p.min_final_amount).max().unwrap_or(0),
            )
        }
    };

    let applied_percent = raw_percent.min(MAX_PERCENT);
    if applied_percent < raw_percent {
        details.push(format!("Relaxation capped at {MAX_PERCENT}%"));
    }

    let mut fee_after_discount = base_fee - percent_of(base_fee, applied_percent, 100)?;
    let floor = floor.min(base_fee);
    if fee_after_discount < floor {
        details.push(format!("Minimum payable amount of {floor} applied"));
        fee_after_discount = floor;
    }
    let discount_amount = base_fee - fee_after_discount;

    let (cgst_amount, sgst_amount) = if gst.applicable {
        let half = percent_of(fee_after_discount, gst.percentage, 200)?;
        details.push(format!(
            "GST {}% split equally between CGST and SGST",
            gst.percentage
        ));
        (half, half)
    } else {
        (0, 0)
    };
    let total_tax_amount = cgst_amount + sgst_amount;
    let total_payable_amount = fee_after_discount
        .checked_add(total_tax_amount)
        .ok_or_else(|| {
            CoreError::Validation(format!("Fee of {base_fee} with GST exceeds the payable range"))
        })?;

    Ok(FeeBreakdown {
        base_fee,
        applied_criteria,
        applied_rule: matched_rule.map(|r| r.id.clone()),
        applied_percent,
        discount_amount,
        fee_after_discount,
        gst_applicable: gst.applicable,
        cgst_amount,
        sgst_amount,
        total_tax_amount,
        total_payable_amount,
        calculation_details: details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn policy(id: &str, percent: u32, enabled: bool) -> RelaxationPolicy {
        RelaxationPolicy {
            criterion_id: id.into(),
            is_enabled: enabled,
            relaxation_percent: percent,
            min_final_amount: 0,
        }
    }

    fn policies() -> Vec<RelaxationPolicy> {
        vec![
            policy("female", 25, true),
            policy("pwd", 50, true),
            policy("ex_serviceman", 30, false),
        ]
    }

    const GST_18: GstSetting = GstSetting {
        applicable: true,
        percentage: 18,
    };

    #[test]
    fn no_criteria_pays_base_fee_plus_gst() {
        let fee = calculate_fee(5000, &[], &policies(), &[], GST_18).unwrap();
        assert_eq!(fee.applied_percent, 0);
        assert_eq!(fee.fee_after_discount, 5000);
        assert_eq!(fee.cgst_amount, 450);
        assert_eq!(fee.sgst_amount, 450);
        assert_eq!(fee.total_payable_amount, 5900);
    }

    #[test]
    fn enabled_policies_add_up_and_disabled_ones_are_ignored() {
        let fee = calculate_fee(
            5000,
            &["female", "ex_serviceman"],
            &policies(),
            &[],
            GstSetting::default(),
        )
        .unwrap();
        assert_eq!(fee.applied_percent, 25);
        assert_eq!(fee.applied_criteria, vec!["female".to_string()]);
        assert_eq!(fee.discount_amount, 1250);
        assert_eq!(fee.total_payable_amount, 3750);
        assert_eq!(fee.total_tax_amount, 0);
    }

    #[test]
    fn exact_combination_rule_wins() {
        let rules = vec![CombinationRule {
            id: "combo-1".into(),
            criteria_ids: vec!["pwd".into(), "female".into()],
            application_method: ApplicationMethod::Custom,
            combined_percent: 60,
            min_final_amount: 0,
        }];
        let fee = calculate_fee(5000, &["female", "pwd"], &policies(), &rules, GstSetting::default())
            .unwrap();
        assert_eq!(fee.applied_rule.as_deref(), Some("combo-1"));
        assert_eq!(fee.applied_percent, 60);
        assert_eq!(fee.fee_after_discount, 2000);

        // A subset does not match the rule.
        let fee =
            calculate_fee(5000, &["pwd"], &policies(), &rules, GstSetting::default()).unwrap();
        assert_eq!(fee.applied_rule, None);
        assert_eq!(fee.applied_percent, 50);
    }

    #[test]
    fn percent_is_capped_and_floor_is_honored() {
        let mut ps = policies();
        ps.push(RelaxationPolicy {
            min_final_amount: 500,
            ..policy("senior", 60, true)
        });
        let fee =
            calculate_fee(5000, &["pwd", "senior"], &ps, &[], GstSetting::default()).unwrap();
        assert_eq!(fee.applied_percent, 100);
        assert_eq!(fee.fee_after_discount, 500);
        assert_eq!(fee.discount_amount, 4500);
    }

    #[test]
    fn rounding_is_half_up() {
        let fee = calculate_fee(999, &["female"], &policies(), &[], GST_18).unwrap();
        // 999 * 25% = 249.75 -> 250
        assert_eq!(fee.discount_amount, 250);
        assert_eq!(fee.fee_after_discount, 749);
        // 749 * 9% = 67.41 -> 67
        assert_eq!(fee.cgst_amount, 67);
    }

    #[test]
    fn out_of_range_percentages_are_rejected() {
        let gst = GstSetting {
            applicable: true,
            percentage: 150,
        };
        assert_matches!(
            calculate_fee(5000, &[], &policies(), &[], gst),
            Err(CoreError::Validation(_))
        );

        let ps = vec![policy("female", 250, true)];
        assert_matches!(
            calculate_fee(5000, &["female"], &ps, &[], GstSetting::default()),
            Err(CoreError::Validation(_))
        );
        // A disabled policy is not applied, so its percentage is not checked.
        let ps = vec![policy("female", 250, false)];
        assert!(calculate_fee(5000, &["female"], &ps, &[], GstSetting::default()).is_ok());
    }

    #[test]
    fn huge_base_fee_does_not_overflow() {
        let full_gst = GstSetting {
            applicable: true,
            percentage: 100,
        };
        let base = u64::MAX / 50;
        let fee = calculate_fee(base, &["female"], &policies(), &[], full_gst).unwrap();
        assert_eq!(fee.discount_amount, base / 4);
        assert_eq!(fee.cgst_amount, fee.sgst_amount);
        assert_eq!(
            fee.total_payable_amount,
            fee.fee_after_discount + fee.total_tax_amount
        );

        assert_matches!(
            calculate_fee(u64::MAX, &[], &policies(), &[], full_gst),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn schedule_and_rule_validation() {
        let schedule = FeeSchedule {
            default_amount: 5000,
            min_amount: 1000,
            max_amount: 10000,
            gst: GST_18,
        };
        assert!(schedule.validate().is_ok());
        assert!(FeeSchedule {
            default_amount: 500,
            ..schedule
        }
        .validate()
        .is_err());
        assert!(validate_policy(&policy("x", 101, true)).is_err());

        let existing = vec![CombinationRule {
            id: "a".into(),
            criteria_ids: vec!["female".into(), "pwd".into()],
            application_method: ApplicationMethod::Sum,
            combined_percent: 0,
            min_final_amount: 0,
        }];
        let duplicate = CombinationRule {
            id: "b".into(),
            criteria_ids: vec!["pwd".into(), "female".into()],
            ..existing[0].clone()
        };
        assert_matches!(
            validate_combination_rule(&duplicate, &existing),
            Err(CoreError::Conflict(_))
        );
        let single = CombinationRule {
            id: "c".into(),
            criteria_ids: vec!["pwd".into()],
            ..existing[0].clone()
        };
        assert_matches!(
            validate_combination_rule(&single, &existing),
            Err(CoreError::Validation(_))
        );
    }
}
