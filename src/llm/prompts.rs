// ABOUTME: Prompt builders wiring health-profile data into nutritionist chat requests
// ABOUTME: Covers meal-plan generation, nutrition tips, and free-form coach messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # Nutritionist Prompts
//!
//! Stateless prompt-string builders. Each coaching operation renders the
//! user's [`HealthProfile`] into a user prompt with "Not specified"
//! placeholders for missing fields, paired with a fixed nutritionist system
//! prompt enriched by per-condition guidance from the static lookup table.

use crate::conditions::condition_guidance;
use crate::models::HealthProfile;

/// The kind of coaching content requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Detailed one-day meal plan
    MealPlan,
    /// Five personalized nutrition tips
    NutritionTips,
    /// Free-form coaching conversation
    Coach,
}

/// Base nutritionist system prompt shared by every coaching operation
const SYSTEM_PROMPT: &str = "You are a professional nutritionist AI assistant. \
Based on the user's health profile, generate personalized nutrition recommendations.\n\n\
When generating meal plans, consider:\n\
- Their health conditions and medical needs\n\
- Dietary preferences and restrictions\n\
- Allergies (CRITICAL: Never include allergens)\n\
- Activity level and caloric needs\n\
- Goals (weight loss, muscle gain, etc.)\n\n\
Always provide practical, actionable advice with specific foods and portions.";

/// Build the system prompt, appending guidance for the user's conditions
#[must_use]
pub fn system_prompt(profile: &HealthProfile) -> String {
    let mut prompt = SYSTEM_PROMPT.to_owned();

    let guidance: Vec<String> = profile
        .health_conditions
        .iter()
        .filter_map(|name| condition_guidance(name))
        .map(|g| {
            if g.common_medications.is_empty() {
                format!("- {}: emphasize {}", g.condition, g.dietary_focus)
            } else {
                format!(
                    "- {}: emphasize {}; user may take {} (watch for food interactions)",
                    g.condition,
                    g.dietary_focus,
                    g.common_medications.join(", ")
                )
            }
        })
        .collect();

    if !guidance.is_empty() {
        prompt.push_str("\n\nCondition-specific guidance:\n");
        prompt.push_str(&guidance.join("\n"));
    }

    prompt
}

fn or_unspecified(value: Option<String>) -> String {
    value.unwrap_or_else(|| "Not specified".to_owned())
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_owned()
    } else {
        items.join(", ")
    }
}

/// User prompt for a detailed one-day meal plan
#[must_use]
pub fn meal_plan_prompt(profile: &HealthProfile) -> String {
    format!(
        "Generate a detailed 1-day meal plan for this person:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Height: {height}\n\
         - Weight: {weight}\n\
         - Activity Level: {activity}\n\
         - Health Conditions: {conditions}\n\
         - Dietary Preferences: {preferences}\n\
         - Allergies: {allergies}\n\
         - Goals: {goals}\n\
         - Target Weight: {target}\n\n\
         Provide:\n\
         1. Breakfast, Lunch, Dinner, and 2 Snacks\n\
         2. Estimated calories and macros for each meal\n\
         3. Specific portion sizes\n\
         4. Preparation tips\n\n\
         Format the response in a clear, organized way.",
        age = or_unspecified(profile.age.map(|a| a.to_string())),
        gender = or_unspecified(profile.gender.clone()),
        height = or_unspecified(profile.height.map(|h| format!("{h} cm"))),
        weight = or_unspecified(profile.weight.map(|w| format!("{w} kg"))),
        activity = or_unspecified(profile.activity_level.clone()),
        conditions = list_or_none(&profile.health_conditions),
        preferences = list_or_none(&profile.dietary_preferences),
        allergies = list_or_none(&profile.allergies),
        goals = if profile.goals.is_empty() {
            "General wellness".to_owned()
        } else {
            profile.goals.join(", ")
        },
        target = or_unspecified(profile.target_weight.map(|t| format!("{t} kg"))),
    )
}

/// User prompt for five personalized nutrition tips
#[must_use]
pub fn nutrition_tips_prompt(profile: &HealthProfile) -> String {
    format!(
        "Provide 5 personalized nutrition tips for this person:\n\
         - Health Conditions: {conditions}\n\
         - Goals: {goals}\n\
         - Dietary Preferences: {preferences}\n\n\
         Make tips specific, actionable, and backed by nutrition science.",
        conditions = list_or_none(&profile.health_conditions),
        goals = if profile.goals.is_empty() {
            "General wellness".to_owned()
        } else {
            profile.goals.join(", ")
        },
        preferences = list_or_none(&profile.dietary_preferences),
    )
}

/// User prompt for a free-form coach message
///
/// An empty message falls back to a general advice request so the "daily
/// check-in" button needs no composed text.
#[must_use]
pub fn coach_prompt(message: &str) -> String {
    if message.trim().is_empty() {
        "Give me general nutrition advice for today.".to_owned()
    } else {
        message.to_owned()
    }
}

/// Build the user prompt for a prompt kind
#[must_use]
pub fn user_prompt(kind: PromptKind, profile: &HealthProfile, message: &str) -> String {
    match kind {
        PromptKind::MealPlan => meal_plan_prompt(profile),
        PromptKind::NutritionTips => nutrition_tips_prompt(profile),
        PromptKind::Coach => coach_prompt(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn meal_plan_prompt_renders_placeholders_for_missing_fields() {
        let profile = HealthProfile::new(Uuid::new_v4());
        let prompt = meal_plan_prompt(&profile);
        assert!(prompt.contains("Age: Not specified"));
        assert!(prompt.contains("Health Conditions: None"));
        assert!(prompt.contains("Goals: General wellness"));
    }

    #[test]
    fn meal_plan_prompt_renders_units() {
        let mut profile = HealthProfile::new(Uuid::new_v4());
        profile.height = Some(175.0);
        profile.weight = Some(70.0);
        let prompt = meal_plan_prompt(&profile);
        assert!(prompt.contains("Height: 175 cm"));
        assert!(prompt.contains("Weight: 70 kg"));
    }

    #[test]
    fn system_prompt_includes_condition_guidance() {
        let mut profile = HealthProfile::new(Uuid::new_v4());
        profile.health_conditions = vec!["Hypertension".into(), "Made Up Condition".into()];
        let prompt = system_prompt(&profile);
        assert!(prompt.contains("low-sodium"));
        assert!(!prompt.contains("Made Up Condition:"));
    }

    #[test]
    fn empty_coach_message_falls_back_to_general_advice() {
        assert_eq!(coach_prompt("  "), "Give me general nutrition advice for today.");
        assert_eq!(coach_prompt("What should I eat?"), "What should I eat?");
    }
}
