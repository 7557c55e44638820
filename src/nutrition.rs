// ABOUTME: Nutrition calculations: Harris-Benedict BMR, calorie targets, and macro splits
// ABOUTME: Pure functions over health-profile inputs; missing inputs yield None, never errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! Nutrition Calculator Module
//!
//! Implements the calorie and macronutrient arithmetic behind the dashboard:
//! Harris-Benedict (revised) basal metabolic rate, a five-level activity
//! multiplier table, and a fixed 25/45/30 protein/carb/fat calorie split.
//!
//! All functions are pure and stateless. When a required profile input is
//! missing the calculators return `None` so callers can render a placeholder;
//! incomplete data is an expected state, not an error.
//!
//! # Reference
//!
//! Harris, J.A., & Benedict, F.G. (1918), as revised by Roza & Shizgal (1984).

use crate::models::HealthProfile;
use serde::{Deserialize, Serialize};

/// Fraction of daily calories assigned to protein
const PROTEIN_CALORIE_SHARE: f64 = 0.25;
/// Fraction of daily calories assigned to carbohydrates
const CARBS_CALORIE_SHARE: f64 = 0.45;
/// Fraction of daily calories assigned to fat
const FAT_CALORIE_SHARE: f64 = 0.30;

/// Calories per gram of protein and carbohydrate
const KCAL_PER_G_PROTEIN_CARB: f64 = 4.0;
/// Calories per gram of fat
const KCAL_PER_G_FAT: f64 = 9.0;

/// Activity level for the TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Very,
    /// Hard daily training or a physical job
    Extra,
}

impl ActivityLevel {
    /// Parse the stored activity-level key; unknown or missing values
    /// default to sedentary
    #[must_use]
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some("light") => Self::Light,
            Some("moderate") => Self::Moderate,
            Some("very") => Self::Very,
            Some("extra") => Self::Extra,
            _ => Self::Sedentary,
        }
    }

    /// TDEE multiplier applied to BMR
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Very => 1.725,
            Self::Extra => 1.9,
        }
    }
}

/// Daily macronutrient gram targets derived from a calorie budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Protein grams (25% of calories at 4 kcal/g)
    pub protein_g: i64,
    /// Carbohydrate grams (45% of calories at 4 kcal/g)
    pub carbs_g: i64,
    /// Fat grams (30% of calories at 9 kcal/g)
    pub fat_g: i64,
}

/// Complete computed nutrition targets for a profile
///
/// Fields are `None` when the profile lacks the inputs to compute them.
/// Custom overrides on the profile take precedence over computed values.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Body mass index, one decimal
    pub bmi: Option<f64>,
    /// Daily calorie target
    pub daily_calories: Option<i64>,
    /// Daily macro gram targets
    pub macros: Option<MacroTargets>,
}

/// Harris-Benedict revised BMR in kcal/day
///
/// Distinct constant sets for male vs. non-male subjects; the product only
/// distinguishes the "male" gender value.
#[must_use]
pub fn harris_benedict_bmr(weight_kg: f64, height_cm: f64, age: i64, male: bool) -> f64 {
    let age = age as f64;
    if male {
        88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age
    } else {
        447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age
    }
}

/// Daily calorie target: round(BMR x activity multiplier)
///
/// Returns `None` when height, weight, age, or gender is missing.
#[must_use]
pub fn daily_calorie_target(profile: &HealthProfile) -> Option<i64> {
    let height = profile.height?;
    let weight = profile.weight?;
    let age = profile.age?;
    let gender = profile.gender.as_deref()?;

    let bmr = harris_benedict_bmr(weight, height, age, gender == "male");
    let multiplier = ActivityLevel::from_key(profile.activity_level.as_deref()).multiplier();
    Some((bmr * multiplier).round() as i64)
}

/// Macro gram targets for a daily calorie budget, each rounded
#[must_use]
pub fn macro_targets(daily_calories: i64) -> MacroTargets {
    let calories = daily_calories as f64;
    MacroTargets {
        protein_g: (calories * PROTEIN_CALORIE_SHARE / KCAL_PER_G_PROTEIN_CARB).round() as i64,
        carbs_g: (calories * CARBS_CALORIE_SHARE / KCAL_PER_G_PROTEIN_CARB).round() as i64,
        fat_g: (calories * FAT_CALORIE_SHARE / KCAL_PER_G_FAT).round() as i64,
    }
}

/// Body mass index rounded to one decimal, or `None` without height/weight
#[must_use]
pub fn bmi(profile: &HealthProfile) -> Option<f64> {
    let height_m = profile.height? / 100.0;
    let weight = profile.weight?;
    if height_m <= 0.0 {
        return None;
    }
    Some((weight / (height_m * height_m) * 10.0).round() / 10.0)
}

/// Compute all nutrition targets for a profile, honoring custom overrides
#[must_use]
pub fn targets_for(profile: &HealthProfile) -> NutritionTargets {
    let daily_calories = profile.custom_calories.or_else(|| daily_calorie_target(profile));

    let macros = daily_calories.map(|calories| {
        let computed = macro_targets(calories);
        MacroTargets {
            protein_g: profile.custom_protein.unwrap_or(computed.protein_g),
            carbs_g: profile.custom_carbs.unwrap_or(computed.carbs_g),
            fat_g: profile.custom_fat.unwrap_or(computed.fat_g),
        }
    });

    NutritionTargets {
        bmi: bmi(profile),
        daily_calories,
        macros,
    }
}

/// Weight-based calorie estimate used by the tracking reminder job
///
/// Cheap approximation (22 kcal per kg, scaled by activity) applied when a
/// user has no custom calorie target; the reminder email only needs a
/// ballpark figure. Callers must have an activity level on file; an
/// unrecognized one maps to the moderate multiplier, not sedentary as in
/// the target calculation.
#[must_use]
pub fn weight_based_calorie_estimate(weight_kg: f64, activity_level: &str) -> i64 {
    let multiplier = match activity_level {
        "sedentary" => 1.2,
        "light" => 1.375,
        "very" => 1.725,
        "extra" => 1.9,
        _ => 1.55,
    };
    (weight_kg * 22.0 * multiplier).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn profile(
        age: Option<i64>,
        gender: Option<&str>,
        height: Option<f64>,
        weight: Option<f64>,
        activity: Option<&str>,
    ) -> HealthProfile {
        HealthProfile {
            age,
            gender: gender.map(str::to_owned),
            height,
            weight,
            activity_level: activity.map(str::to_owned),
            ..HealthProfile::new(Uuid::new_v4())
        }
    }

    #[test]
    fn male_bmr_matches_revised_equation() {
        let bmr = harris_benedict_bmr(70.0, 175.0, 30, true);
        let expected = 88.362 + 13.397 * 70.0 + 4.799 * 175.0 - 5.677 * 30.0;
        assert!((bmr - expected).abs() < 0.01);
        assert!((bmr - 1695.7).abs() < 0.1);
    }

    #[test]
    fn non_male_bmr_uses_second_constant_set() {
        let bmr = harris_benedict_bmr(60.0, 165.0, 25, false);
        let expected = 447.593 + 9.247 * 60.0 + 3.098 * 165.0 - 4.330 * 25.0;
        assert!((bmr - expected).abs() < 0.01);
    }

    #[test]
    fn reference_male_profile_yields_2628_calories() {
        // BMR 1695.667 kcal, times the 1.55 moderate multiplier, rounded.
        let p = profile(Some(30), Some("male"), Some(175.0), Some(70.0), Some("moderate"));
        assert_eq!(daily_calorie_target(&p), Some(2628));
    }

    #[test]
    fn unknown_activity_level_defaults_to_sedentary() {
        let base = profile(Some(30), Some("male"), Some(175.0), Some(70.0), None);
        let explicit = profile(
            Some(30),
            Some("male"),
            Some(175.0),
            Some(70.0),
            Some("sedentary"),
        );
        let bogus = profile(
            Some(30),
            Some("male"),
            Some(175.0),
            Some(70.0),
            Some("athletic"),
        );
        assert_eq!(daily_calorie_target(&base), daily_calorie_target(&explicit));
        assert_eq!(daily_calorie_target(&bogus), daily_calorie_target(&explicit));
    }

    #[test]
    fn missing_required_input_yields_none() {
        assert!(daily_calorie_target(&profile(None, Some("male"), Some(175.0), Some(70.0), None)).is_none());
        assert!(daily_calorie_target(&profile(Some(30), None, Some(175.0), Some(70.0), None)).is_none());
        assert!(daily_calorie_target(&profile(Some(30), Some("male"), None, Some(70.0), None)).is_none());
        assert!(daily_calorie_target(&profile(Some(30), Some("male"), Some(175.0), None, None)).is_none());
    }

    #[test]
    fn macro_grams_sum_back_to_the_calorie_budget() {
        for calories in [1200_i64, 2000, 2628, 3500] {
            let macros = macro_targets(calories);
            let reconstructed = macros.protein_g as f64 * 4.0
                + macros.carbs_g as f64 * 4.0
                + macros.fat_g as f64 * 9.0;
            // Each gram count is rounded, so allow up to half a gram of each
            let tolerance = 0.5 * 4.0 + 0.5 * 4.0 + 0.5 * 9.0;
            assert!(
                (reconstructed - calories as f64).abs() <= tolerance,
                "calories={calories} reconstructed={reconstructed}"
            );
        }
    }

    #[test]
    fn custom_overrides_take_precedence() {
        let mut p = profile(Some(30), Some("male"), Some(175.0), Some(70.0), Some("moderate"));
        p.custom_calories = Some(1800);
        p.custom_protein = Some(150);
        let targets = targets_for(&p);
        assert_eq!(targets.daily_calories, Some(1800));
        let macros = targets.macros.unwrap();
        assert_eq!(macros.protein_g, 150);
        // Non-overridden macros still derive from the custom calorie budget
        assert_eq!(macros.carbs_g, macro_targets(1800).carbs_g);
    }

    #[test]
    fn bmi_rounds_to_one_decimal() {
        let p = profile(None, None, Some(175.0), Some(70.0), None);
        assert_eq!(bmi(&p), Some(22.9));
        assert!(bmi(&profile(None, None, None, Some(70.0), None)).is_none());
    }

    #[test]
    fn weight_based_estimate_matches_reminder_job_arithmetic() {
        // 70kg moderate: 70 * 22 * 1.55 = 2387
        assert_eq!(weight_based_calorie_estimate(70.0, "moderate"), 2387);
        // Unrecognized level falls back to moderate, not sedentary
        assert_eq!(
            weight_based_calorie_estimate(70.0, "athletic"),
            weight_based_calorie_estimate(70.0, "moderate")
        );
        assert_eq!(weight_based_calorie_estimate(70.0, "sedentary"), 1848);
    }
}
