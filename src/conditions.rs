// ABOUTME: Static lookup of per-condition dietary guidance and common medication classes
// ABOUTME: Plain keyed table consulted by prompt building and the conditions endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Condition Guidance Table
//!
//! A fixed associative map from health-condition name to dietary focus and the
//! medication classes commonly prescribed for it. The medication lists exist
//! so the coach prompts can flag likely food-drug interactions; they are
//! informational, never prescriptive.

use serde::Serialize;

/// Guidance associated with one health condition
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConditionGuidance {
    /// Condition name as selected in the questionnaire
    pub condition: &'static str,
    /// Dietary focus for meal planning
    pub dietary_focus: &'static str,
    /// Medication classes commonly used for this condition
    pub common_medications: &'static [&'static str],
}

/// The full guidance table, keyed by the questionnaire's condition names
pub const CONDITION_GUIDANCE: &[ConditionGuidance] = &[
    ConditionGuidance {
        condition: "Diabetes Type 1",
        dietary_focus: "consistent carbohydrate counting and low-glycemic choices",
        common_medications: &["insulin"],
    },
    ConditionGuidance {
        condition: "Diabetes Type 2",
        dietary_focus: "low-glycemic, high-fiber meals with controlled portions",
        common_medications: &["metformin", "sulfonylureas", "GLP-1 agonists"],
    },
    ConditionGuidance {
        condition: "Hypertension",
        dietary_focus: "low-sodium (DASH-style) eating with potassium-rich foods",
        common_medications: &["ACE inhibitors", "beta blockers", "diuretics"],
    },
    ConditionGuidance {
        condition: "Heart Disease",
        dietary_focus: "heart-healthy fats, lean protein, limited saturated fat",
        common_medications: &["statins", "antiplatelets", "beta blockers"],
    },
    ConditionGuidance {
        condition: "High Cholesterol",
        dietary_focus: "soluble fiber, plant sterols, reduced saturated fat",
        common_medications: &["statins", "ezetimibe"],
    },
    ConditionGuidance {
        condition: "Kidney Disease",
        dietary_focus: "controlled protein, phosphorus, and potassium intake",
        common_medications: &["phosphate binders", "ACE inhibitors"],
    },
    ConditionGuidance {
        condition: "Celiac Disease",
        dietary_focus: "strict gluten avoidance including hidden sources",
        common_medications: &[],
    },
    ConditionGuidance {
        condition: "IBS/IBD",
        dietary_focus: "low-FODMAP trial and trigger-food tracking",
        common_medications: &["antispasmodics", "aminosalicylates"],
    },
    ConditionGuidance {
        condition: "PCOS",
        dietary_focus: "low-glycemic meals and anti-inflammatory foods",
        common_medications: &["metformin", "oral contraceptives"],
    },
    ConditionGuidance {
        condition: "Thyroid Disorder",
        dietary_focus: "adequate iodine and selenium; separate levothyroxine from calcium and iron",
        common_medications: &["levothyroxine"],
    },
    ConditionGuidance {
        condition: "Obesity",
        dietary_focus: "sustainable caloric deficit with high-satiety foods",
        common_medications: &["GLP-1 agonists", "orlistat"],
    },
];

/// Look up guidance for a condition by its questionnaire name
#[must_use]
pub fn condition_guidance(condition: &str) -> Option<&'static ConditionGuidance> {
    CONDITION_GUIDANCE.iter().find(|g| g.condition == condition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_conditions_resolve() {
        let guidance = condition_guidance("Hypertension").unwrap();
        assert!(guidance.dietary_focus.contains("low-sodium"));
        assert!(guidance.common_medications.contains(&"diuretics"));
    }

    #[test]
    fn unknown_condition_yields_none() {
        assert!(condition_guidance("Scurvy").is_none());
        assert!(condition_guidance("None").is_none());
    }
}
