//! Fallback catalog: deterministic substitute results served whenever the
//! AI path cannot complete. Pure data: no I/O, no randomness, no clock.
//! Every result is tagged `source: fallback`.

use crate::models::analysis::{
    AnalysisPayload, AnalysisResult, CareerGuidance, CareerRecommendation, RiasecAnalysis,
};
use crate::models::profile::RiasecScores;

/// Fixed career guidance used when recommendation generation degrades.
pub fn career_guidance() -> AnalysisResult {
    let recommendations = vec![
        CareerRecommendation {
            title: "Software Developer".to_string(),
            description: "Broad demand across industries with strong entry paths \
                          for self-taught and formally trained students alike."
                .to_string(),
            match_confidence: 0.70,
            salary_range: "INR 4-12 LPA".to_string(),
            growth_outlook: "High".to_string(),
        },
        CareerRecommendation {
            title: "Data Analyst".to_string(),
            description: "Analytical role bridging business and engineering; a \
                          common first step toward data science."
                .to_string(),
            match_confidence: 0.65,
            salary_range: "INR 3.5-9 LPA".to_string(),
            growth_outlook: "High".to_string(),
        },
        CareerRecommendation {
            title: "Digital Marketing Specialist".to_string(),
            description: "Creative-analytical hybrid career with low entry \
                          barriers and portfolio-driven hiring."
                .to_string(),
            match_confidence: 0.55,
            salary_range: "INR 3-7 LPA".to_string(),
            growth_outlook: "Moderate".to_string(),
        },
        CareerRecommendation {
            title: "Financial Analyst".to_string(),
            description: "Structured career ladder for students comfortable with \
                          quantitative reasoning and reporting."
                .to_string(),
            match_confidence: 0.50,
            salary_range: "INR 4-10 LPA".to_string(),
            growth_outlook: "Moderate".to_string(),
        },
    ];

    AnalysisResult::fallback(AnalysisPayload::Guidance(CareerGuidance {
        recommendations,
        skills_gap: vec![
            "Communication".to_string(),
            "Problem solving".to_string(),
            "Basic programming".to_string(),
            "Data literacy".to_string(),
        ],
        industry_insight: "Hiring demand remains strongest for roles that combine domain \
                           knowledge with digital skills. Entry-level candidates who can show \
                           portfolio projects are consistently preferred over credential-only \
                           applicants."
            .to_string(),
        action_plan: vec![
            "Identify two career areas that match your interests and research their day-to-day work".to_string(),
            "Pick one foundational skill and complete a structured online course in it".to_string(),
            "Build one small portfolio project and publish it".to_string(),
            "Talk to two professionals working in your target field".to_string(),
        ],
    }))
}

/// Fixed RIASEC analysis: a balanced-leaning vector with a canned summary.
pub fn riasec_analysis() -> AnalysisResult {
    let scores = RiasecScores {
        realistic: 50,
        investigative: 60,
        artistic: 45,
        social: 55,
        enterprising: 50,
        conventional: 40,
    };
    let dominant_axes = scores.dominant_axes();

    AnalysisResult::fallback(AnalysisPayload::Riasec(RiasecAnalysis {
        scores,
        dominant_axes,
        summary: "Your responses suggest a balanced profile with a mild analytical and \
                  people-oriented lean. Treat this as a starting point and retake the \
                  assessment later for a sharper reading."
            .to_string(),
        suggested_careers: vec![
            "Business Analyst".to_string(),
            "Teacher / Trainer".to_string(),
            "Operations Coordinator".to_string(),
        ],
    }))
}

/// Fixed learning-path text.
pub fn learning_path() -> AnalysisResult {
    AnalysisResult::fallback(AnalysisPayload::Text(
        "Start with fundamentals in your chosen field: spend the first two months on one \
         structured beginner course and take notes in your own words. Months three and four, \
         apply what you learned in a small project you can show to others. Months five and six, \
         study the tools professionals in the field actually use and join one community around \
         them. Review your progress every month and adjust the plan rather than abandoning it."
            .to_string(),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Chat keyword catalog
// ────────────────────────────────────────────────────────────────────────────

const SKILL_REPLY: &str =
    "Focus on building one marketable skill at a time rather than sampling many. Pick a skill \
     with visible demand in job postings for your target role, follow one structured course to \
     completion, and then build a small project that proves it. Employers weigh demonstrated \
     skills far more heavily than listed ones.";

const CAREER_REPLY: &str =
    "Choosing a career works best as a match between your interests, your strengths, and real \
     market demand. Start by listing the activities you lose track of time doing, then look up \
     three careers built around them and compare their entry requirements and growth prospects.";

const COLLEGE_REPLY: &str =
    "When comparing colleges and degree programs, weigh placement records, faculty in your area \
     of interest, and total cost over brand name alone. A focused program with strong industry \
     ties usually beats a famous name with a generic curriculum.";

const EXAM_REPLY: &str =
    "For exam preparation, consistency beats intensity: a fixed daily study block with one \
     mock test per week outperforms last-minute marathons. Track which question categories cost \
     you the most marks and spend extra time there rather than re-reading what you already know.";

const DEFAULT_REPLY: &str =
    "I can help you think through careers, courses, skills, and study plans. Tell me a bit about \
     your current education level and what you enjoy doing, and I can suggest a direction to \
     explore.";

/// Ordered keyword categories for degraded chat. First matching category wins;
/// the order is part of the contract: "skill"/"learn" is checked before
/// "career" so a message mentioning both gets the skill reply.
const CHAT_CATEGORIES: &[(&[&str], &str)] = &[
    (&["skill", "learn"], SKILL_REPLY),
    (&["career", "job"], CAREER_REPLY),
    (&["college", "university", "degree"], COLLEGE_REPLY),
    (&["exam", "test", "study"], EXAM_REPLY),
];

/// Keyword-matched canned chat reply. Case-insensitive substring match over
/// the categories above, generic default when nothing matches.
pub fn chat_reply(message: &str) -> AnalysisResult {
    let lowered = message.to_lowercase();
    let reply = CHAT_CATEGORIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY);

    AnalysisResult::fallback(AnalysisPayload::Text(reply.to_string()))
}
