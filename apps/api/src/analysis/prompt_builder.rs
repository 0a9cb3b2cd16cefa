//! Prompt builders: pure functions mapping profile data onto the templates
//! in `prompts.rs`.
//!
//! Null-safety is the whole point of this module: every absent optional field
//! renders as the single placeholder "Not specified", absent RIASEC scores
//! default to zero, and no built prompt ever contains a literal `null` token.
//! No I/O, no clock, no randomness.

use crate::analysis::prompts::{
    CAREER_PROMPT_TEMPLATE, CHAT_PROMPT_TEMPLATE, LEARNING_PATH_PROMPT_TEMPLATE,
    RIASEC_PROMPT_TEMPLATE,
};
use crate::models::profile::{RiasecAxis, StudentProfile};

/// The one placeholder every absent optional field resolves to.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Builds the career recommendation prompt from a profile.
pub fn career_recommendation_prompt(profile: &StudentProfile) -> String {
    CAREER_PROMPT_TEMPLATE
        .replace("{education_level}", opt_str(&profile.education_level))
        .replace("{institution}", opt_str(&profile.institution))
        .replace("{cgpa}", &format_cgpa(profile.cgpa))
        .replace("{percentage}", &format_percentage(profile.percentage))
        .replace("{riasec_scores}", &format_riasec_scores(profile))
        .replace("{dominant_axes}", &format_dominant_axes(profile))
        .replace("{interests}", &join_or_placeholder(&profile.interests))
        .replace(
            "{preferred_locations}",
            &join_or_placeholder(&profile.preferred_locations),
        )
        .replace("{work_preference}", opt_str(&profile.work_preference))
        .replace("{expected_salary}", opt_str(&profile.expected_salary))
        .replace("{age}", &opt_display(profile.age))
        .replace("{career_goal}", opt_str(&profile.career_goal))
}

/// Builds the RIASEC scoring prompt from free-text assessment responses.
pub fn riasec_prompt(responses: &[String]) -> String {
    let numbered = responses
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}", i + 1, r.trim()))
        .collect::<Vec<_>>()
        .join("\n");
    RIASEC_PROMPT_TEMPLATE.replace("{responses}", &numbered)
}

/// Builds the learning-path prompt from a profile.
pub fn learning_path_prompt(profile: &StudentProfile) -> String {
    LEARNING_PATH_PROMPT_TEMPLATE
        .replace("{career_goal}", opt_str(&profile.career_goal))
        .replace("{education_level}", opt_str(&profile.education_level))
        .replace("{interests}", &join_or_placeholder(&profile.interests))
}

/// Builds the chat prompt around a student message.
pub fn chat_prompt(message: &str) -> String {
    CHAT_PROMPT_TEMPLATE.replace("{message}", message.trim())
}

// ────────────────────────────────────────────────────────────────────────────
// Field formatting helpers
// ────────────────────────────────────────────────────────────────────────────

fn opt_str(field: &Option<String>) -> &str {
    match field.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => NOT_SPECIFIED,
    }
}

fn opt_display<T: std::fmt::Display>(field: Option<T>) -> String {
    field
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn format_cgpa(cgpa: Option<f32>) -> String {
    match cgpa {
        Some(v) => format!("{v}/10"),
        None => NOT_SPECIFIED.to_string(),
    }
}

fn format_percentage(percentage: Option<f32>) -> String {
    match percentage {
        Some(v) if v.fract() == 0.0 => format!("{}%", v as i64),
        Some(v) => format!("{v}%"),
        None => NOT_SPECIFIED.to_string(),
    }
}

/// Renders the six axis scores in declaration order. Axes absent from the
/// incoming JSON already read as zero via serde defaults.
fn format_riasec_scores(profile: &StudentProfile) -> String {
    match &profile.riasec {
        Some(scores) => RiasecAxis::ALL
            .iter()
            .map(|axis| format!("{}: {}", axis.label(), scores.score(*axis)))
            .collect::<Vec<_>>()
            .join(", "),
        None => NOT_SPECIFIED.to_string(),
    }
}

fn format_dominant_axes(profile: &StudentProfile) -> String {
    match &profile.riasec {
        Some(scores) => scores
            .dominant_axes()
            .iter()
            .map(|a| a.label())
            .collect::<Vec<_>>()
            .join(", "),
        None => NOT_SPECIFIED.to_string(),
    }
}

fn join_or_placeholder(items: &[String]) -> String {
    let kept: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if kept.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        kept.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::RiasecScores;

    fn assert_no_null_artifacts(prompt: &str) {
        assert!(!prompt.contains("null"), "prompt leaked a null token");
        assert!(!prompt.contains("{"), "prompt has an unfilled placeholder or stray brace");
    }

    #[test]
    fn test_empty_profile_produces_total_prompt() {
        let prompt = career_recommendation_prompt(&StudentProfile::default());
        // The career template legitimately contains JSON braces in its schema
        // block, so only assert the null-token property here.
        assert!(!prompt.contains("null"));
        assert!(!prompt.contains("{education_level}"));
        assert!(prompt.contains("Education level: Not specified"));
        assert!(prompt.contains("CGPA: Not specified"));
        assert!(prompt.contains("Percentage: Not specified"));
        assert!(prompt.contains("Interest domains: Not specified"));
    }

    #[test]
    fn test_percentage_without_cgpa_scenario() {
        // cgpa absent, percentage 78, all-zero RIASEC.
        let profile = StudentProfile {
            percentage: Some(78.0),
            riasec: Some(RiasecScores::default()),
            ..StudentProfile::default()
        };
        let prompt = career_recommendation_prompt(&profile);
        assert!(prompt.contains("Percentage: 78%"));
        assert!(prompt.contains("CGPA: Not specified"));
        // All-zero vector: dominant axes are the first three declared.
        assert!(prompt.contains("Dominant personality axes: Realistic, Investigative, Artistic"));
        assert!(prompt.contains("Realistic: 0"));
    }

    #[test]
    fn test_cgpa_renders_on_ten_point_scale() {
        let profile = StudentProfile {
            cgpa: Some(8.2),
            ..StudentProfile::default()
        };
        let prompt = career_recommendation_prompt(&profile);
        assert!(prompt.contains("CGPA: 8.2/10"));
    }

    #[test]
    fn test_fractional_percentage_keeps_decimals() {
        assert_eq!(format_percentage(Some(72.5)), "72.5%");
        assert_eq!(format_percentage(Some(78.0)), "78%");
    }

    #[test]
    fn test_populated_profile_substitutes_every_field() {
        let profile = StudentProfile {
            student_id: Some("s-1".to_string()),
            education_level: Some("Undergraduate".to_string()),
            institution: Some("NIT Trichy".to_string()),
            cgpa: Some(7.9),
            percentage: None,
            riasec: Some(RiasecScores {
                investigative: 80,
                artistic: 65,
                ..RiasecScores::default()
            }),
            interests: vec!["Data Science".to_string(), "Finance".to_string()],
            preferred_locations: vec!["Bangalore".to_string()],
            work_preference: Some("Hybrid".to_string()),
            expected_salary: Some("8 LPA".to_string()),
            age: Some(20),
            career_goal: Some("Become a data analyst".to_string()),
        };
        let prompt = career_recommendation_prompt(&profile);
        assert!(prompt.contains("Institution: NIT Trichy"));
        assert!(prompt.contains("Interest domains: Data Science, Finance"));
        assert!(prompt.contains("Age: 20"));
        assert!(!prompt.contains("null"));
    }

    #[test]
    fn test_blank_strings_count_as_absent() {
        let profile = StudentProfile {
            education_level: Some("   ".to_string()),
            interests: vec!["".to_string(), "  ".to_string()],
            ..StudentProfile::default()
        };
        let prompt = career_recommendation_prompt(&profile);
        assert!(prompt.contains("Education level: Not specified"));
        assert!(prompt.contains("Interest domains: Not specified"));
    }

    #[test]
    fn test_riasec_prompt_numbers_responses() {
        let responses = vec![
            "I enjoy building things with my hands".to_string(),
            "I like analyzing datasets".to_string(),
        ];
        let prompt = riasec_prompt(&responses);
        assert!(prompt.contains("1. I enjoy building things with my hands"));
        assert!(prompt.contains("2. I like analyzing datasets"));
    }

    #[test]
    fn test_learning_path_prompt_is_null_safe() {
        let prompt = learning_path_prompt(&StudentProfile::default());
        assert_no_null_artifacts(&prompt);
        assert!(prompt.contains("Career goal: Not specified"));
    }

    #[test]
    fn test_chat_prompt_embeds_trimmed_message() {
        let prompt = chat_prompt("  How do I get into product management?  ");
        assert!(prompt.contains("Student question: How do I get into product management?"));
    }
}
