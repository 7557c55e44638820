// ABOUTME: Declarative schema validation for the health-profile wizard form
// ABOUTME: Per-step subset schemas gate navigation; full schema gates final submission
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Form Validation Layer
//!
//! The health-profile wizard submits string-typed form fields (numbers arrive
//! as text, empty string means "skipped"). Each of the four wizard steps owns
//! a subset of the full schema: advancing a step validates only that subset,
//! final submission re-validates everything.
//!
//! Validation produces a field-keyed error map. A step either fully validates
//! (empty map) or blocks; there are no partial-success semantics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field-keyed validation errors, empty when the payload is valid
pub type ValidationErrors = BTreeMap<String, String>;

/// Raw wizard form payload as submitted by the client
///
/// Every scalar field is a string; numeric fields are validated by parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthProfileForm {
    /// First name (step 1, required)
    pub first_name: String,
    /// Last name (step 1, required)
    pub last_name: String,
    /// Age in years as text (step 1)
    pub age: String,
    /// Gender (step 1, free-form, optional)
    pub gender: String,
    /// Height in cm as text (step 1)
    pub height: String,
    /// Weight in kg as text (step 1)
    pub weight: String,
    /// Activity level key (step 1, optional)
    pub activity_level: String,
    /// Selected health conditions (step 2)
    pub health_conditions: Vec<String>,
    /// Current medications free text (step 2)
    pub medications: String,
    /// Dietary preferences (step 3)
    pub dietary_preferences: Vec<String>,
    /// Allergies (step 3)
    pub allergies: Vec<String>,
    /// Disliked foods free text (step 3)
    pub disliked_foods: String,
    /// Goals (step 4)
    pub goals: Vec<String>,
    /// Target weight in kg as text (step 4)
    pub target_weight: String,
    /// Goal timeline key (step 4, optional)
    pub timeline: String,
    /// Additional notes free text (step 4)
    pub additional_notes: String,
}

/// A single declarative field constraint
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Trimmed text, required, bounded length
    RequiredText { label: &'static str, max: usize },
    /// Optional numeric text within an inclusive range; empty passes
    NumericRange {
        message: &'static str,
        min: f64,
        max: f64,
    },
    /// Optional free text with a length cap
    MaxChars { message: &'static str, max: usize },
    /// Multi-select with an item cap
    MaxItems { message: &'static str, max: usize },
    /// Accepted as-is (free-form selects)
    Unconstrained,
}

/// One field of the schema with its constraint
struct FieldRule {
    field: &'static str,
    rule: Rule,
}

/// Full health-profile schema, one entry per form field
const FULL_SCHEMA: &[FieldRule] = &[
    FieldRule {
        field: "first_name",
        rule: Rule::RequiredText {
            label: "First name",
            max: 50,
        },
    },
    FieldRule {
        field: "last_name",
        rule: Rule::RequiredText {
            label: "Last name",
            max: 50,
        },
    },
    FieldRule {
        field: "age",
        rule: Rule::NumericRange {
            message: "Age must be between 1 and 120",
            min: 1.0,
            max: 120.0,
        },
    },
    FieldRule {
        field: "gender",
        rule: Rule::Unconstrained,
    },
    FieldRule {
        field: "height",
        rule: Rule::NumericRange {
            message: "Height must be between 50 and 300 cm",
            min: 50.0,
            max: 300.0,
        },
    },
    FieldRule {
        field: "weight",
        rule: Rule::NumericRange {
            message: "Weight must be between 20 and 500 kg",
            min: 20.0,
            max: 500.0,
        },
    },
    FieldRule {
        field: "activity_level",
        rule: Rule::Unconstrained,
    },
    FieldRule {
        field: "health_conditions",
        rule: Rule::MaxItems {
            message: "Too many conditions selected",
            max: 12,
        },
    },
    FieldRule {
        field: "medications",
        rule: Rule::MaxChars {
            message: "Medications text must be less than 1000 characters",
            max: 1000,
        },
    },
    FieldRule {
        field: "dietary_preferences",
        rule: Rule::MaxItems {
            message: "Too many preferences selected",
            max: 13,
        },
    },
    FieldRule {
        field: "allergies",
        rule: Rule::MaxItems {
            message: "Too many allergies selected",
            max: 10,
        },
    },
    FieldRule {
        field: "disliked_foods",
        rule: Rule::MaxChars {
            message: "Disliked foods text must be less than 500 characters",
            max: 500,
        },
    },
    FieldRule {
        field: "goals",
        rule: Rule::MaxItems {
            message: "Too many goals selected",
            max: 10,
        },
    },
    FieldRule {
        field: "target_weight",
        rule: Rule::NumericRange {
            message: "Target weight must be between 20 and 500 kg",
            min: 20.0,
            max: 500.0,
        },
    },
    FieldRule {
        field: "timeline",
        rule: Rule::Unconstrained,
    },
    FieldRule {
        field: "additional_notes",
        rule: Rule::MaxChars {
            message: "Additional notes must be less than 2000 characters",
            max: 2000,
        },
    },
];

/// Fields owned by wizard step 1 (basics)
const STEP1_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "age",
    "gender",
    "height",
    "weight",
    "activity_level",
];

/// Fields owned by wizard step 2 (health conditions)
const STEP2_FIELDS: &[&str] = &["health_conditions", "medications"];

/// Fields owned by wizard step 3 (dietary preferences)
const STEP3_FIELDS: &[&str] = &["dietary_preferences", "allergies", "disliked_foods"];

/// Fields owned by wizard step 4 (goals)
const STEP4_FIELDS: &[&str] = &["goals", "target_weight", "timeline", "additional_notes"];

impl HealthProfileForm {
    fn text(&self, field: &str) -> Option<&str> {
        match field {
            "first_name" => Some(&self.first_name),
            "last_name" => Some(&self.last_name),
            "age" => Some(&self.age),
            "gender" => Some(&self.gender),
            "height" => Some(&self.height),
            "weight" => Some(&self.weight),
            "activity_level" => Some(&self.activity_level),
            "medications" => Some(&self.medications),
            "disliked_foods" => Some(&self.disliked_foods),
            "target_weight" => Some(&self.target_weight),
            "timeline" => Some(&self.timeline),
            "additional_notes" => Some(&self.additional_notes),
            _ => None,
        }
    }

    fn list(&self, field: &str) -> Option<&[String]> {
        match field {
            "health_conditions" => Some(&self.health_conditions),
            "dietary_preferences" => Some(&self.dietary_preferences),
            "allergies" => Some(&self.allergies),
            "goals" => Some(&self.goals),
            _ => None,
        }
    }
}

fn check_field(form: &HealthProfileForm, rule: &FieldRule) -> Option<String> {
    match rule.rule {
        Rule::RequiredText { label, max } => {
            let value = form.text(rule.field)?.trim();
            if value.is_empty() {
                Some(format!("{label} is required"))
            } else if value.chars().count() > max {
                Some(format!("{label} must be less than {max} characters"))
            } else {
                None
            }
        }
        Rule::NumericRange { message, min, max } => {
            let value = form.text(rule.field)?.trim();
            if value.is_empty() {
                return None;
            }
            match value.parse::<f64>() {
                Ok(n) if (min..=max).contains(&n) => None,
                _ => Some(message.to_owned()),
            }
        }
        Rule::MaxChars { message, max } => {
            let value = form.text(rule.field)?.trim();
            (value.chars().count() > max).then(|| message.to_owned())
        }
        Rule::MaxItems { message, max } => {
            let items = form.list(rule.field)?;
            (items.len() > max).then(|| message.to_owned())
        }
        Rule::Unconstrained => None,
    }
}

fn validate_fields(form: &HealthProfileForm, fields: Option<&[&str]>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for rule in FULL_SCHEMA {
        if let Some(subset) = fields {
            if !subset.contains(&rule.field) {
                continue;
            }
        }
        if let Some(message) = check_field(form, rule) {
            errors.insert(rule.field.to_owned(), message);
        }
    }
    errors
}

/// Validate the full schema (final submission gate)
#[must_use]
pub fn validate_full(form: &HealthProfileForm) -> ValidationErrors {
    validate_fields(form, None)
}

/// Validate one wizard step's subset schema (navigation gate)
///
/// Returns `None` for an out-of-range step number.
#[must_use]
pub fn validate_step(step: u8, form: &HealthProfileForm) -> Option<ValidationErrors> {
    let fields = match step {
        1 => STEP1_FIELDS,
        2 => STEP2_FIELDS,
        3 => STEP3_FIELDS,
        4 => STEP4_FIELDS,
        _ => return None,
    };
    Some(validate_fields(form, Some(fields)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> HealthProfileForm {
        HealthProfileForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            age: "30".into(),
            gender: "female".into(),
            height: "170".into(),
            weight: "65".into(),
            activity_level: "moderate".into(),
            ..HealthProfileForm::default()
        }
    }

    #[test]
    fn step1_age_121_fails_with_exactly_one_error_on_age() {
        let mut form = valid_form();
        form.age = "121".into();
        let errors = validate_step(1, &form).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("age").map(String::as_str),
            Some("Age must be between 1 and 120")
        );
    }

    #[test]
    fn step1_age_120_passes() {
        let mut form = valid_form();
        form.age = "120".into();
        assert!(validate_step(1, &form).unwrap().is_empty());
    }

    #[test]
    fn empty_numeric_fields_are_accepted() {
        let mut form = valid_form();
        form.age = String::new();
        form.height = String::new();
        form.weight = String::new();
        assert!(validate_step(1, &form).unwrap().is_empty());
    }

    #[test]
    fn non_numeric_age_is_rejected() {
        let mut form = valid_form();
        form.age = "thirty".into();
        let errors = validate_step(1, &form).unwrap();
        assert!(errors.contains_key("age"));
    }

    #[test]
    fn required_names_block_step1() {
        let mut form = valid_form();
        form.first_name = "   ".into();
        let errors = validate_step(1, &form).unwrap();
        assert_eq!(
            errors.get("first_name").map(String::as_str),
            Some("First name is required")
        );
    }

    #[test]
    fn step_errors_do_not_leak_across_steps() {
        // Broken step-1 field must not block step 2
        let mut form = valid_form();
        form.age = "999".into();
        assert!(validate_step(2, &form).unwrap().is_empty());
    }

    #[test]
    fn list_caps_are_enforced() {
        let mut form = valid_form();
        form.allergies = (0..11).map(|i| format!("allergen-{i}")).collect();
        let errors = validate_step(3, &form).unwrap();
        assert_eq!(
            errors.get("allergies").map(String::as_str),
            Some("Too many allergies selected")
        );
    }

    #[test]
    fn free_text_caps_are_enforced() {
        let mut form = valid_form();
        form.medications = "x".repeat(1001);
        let errors = validate_step(2, &form).unwrap();
        assert!(errors.contains_key("medications"));
        form.medications = "x".repeat(1000);
        assert!(validate_step(2, &form).unwrap().is_empty());
    }

    #[test]
    fn full_schema_collects_errors_from_every_step() {
        let mut form = valid_form();
        form.age = "0".into();
        form.medications = "x".repeat(1001);
        form.target_weight = "10".into();
        let errors = validate_full(&form);
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("age"));
        assert!(errors.contains_key("medications"));
        assert!(errors.contains_key("target_weight"));
    }

    #[test]
    fn out_of_range_step_is_rejected() {
        assert!(validate_step(0, &valid_form()).is_none());
        assert!(validate_step(5, &valid_form()).is_none());
    }
}
