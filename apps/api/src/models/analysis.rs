//! Analysis result models: the uniform return type of every analysis
//! operation, tagged with its provenance (`ai` or `fallback`).

use serde::{Deserialize, Serialize};

use crate::models::profile::{RiasecAxis, RiasecScores};

/// Where an analysis result came from. Carried on every result so callers and
/// tests can distinguish genuine model output from degraded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Ai,
    Fallback,
}

/// A single recommended career with its matching annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub title: String,
    pub description: String,
    /// Matching confidence in [0, 1].
    pub match_confidence: f32,
    pub salary_range: String,
    pub growth_outlook: String,
}

/// Full career guidance for a profile: recommendations plus the surrounding
/// skills-gap, insight, and action-plan context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerGuidance {
    pub recommendations: Vec<CareerRecommendation>,
    pub skills_gap: Vec<String>,
    pub industry_insight: String,
    pub action_plan: Vec<String>,
}

/// RIASEC personality analysis. `dominant_axes` is always derived locally from
/// `scores` (see `RiasecScores::dominant_axes`), never trusted from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiasecAnalysis {
    pub scores: RiasecScores,
    pub dominant_axes: [RiasecAxis; 3],
    pub summary: String,
    pub suggested_careers: Vec<String>,
}

/// The payload of an analysis, tagged by operation shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AnalysisPayload {
    Guidance(CareerGuidance),
    Riasec(RiasecAnalysis),
    /// Free-text result for the lighter chat and learning-path operations.
    Text(String),
}

/// The total return type of CareerAnalysisService. Every operation resolves
/// to one of these, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub source: ResultSource,
    #[serde(flatten)]
    pub payload: AnalysisPayload,
}

impl AnalysisResult {
    pub fn ai(payload: AnalysisPayload) -> Self {
        Self {
            source: ResultSource::Ai,
            payload,
        }
    }

    pub fn fallback(payload: AnalysisPayload) -> Self {
        Self {
            source: ResultSource::Fallback,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ResultSource::Fallback).unwrap(),
            r#""fallback""#
        );
        assert_eq!(serde_json::to_string(&ResultSource::Ai).unwrap(), r#""ai""#);
    }

    #[test]
    fn test_analysis_result_round_trips_text_payload() {
        let result = AnalysisResult::ai(AnalysisPayload::Text("Learn SQL first.".to_string()));
        let json = serde_json::to_string(&result).unwrap();
        let recovered: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, result);
    }

    #[test]
    fn test_career_guidance_requires_all_fields() {
        // A guidance object missing `action_plan` must fail deserialization;
        // partially-populated results are never allowed through.
        let bad = r#"{
            "recommendations": [],
            "skills_gap": [],
            "industry_insight": "Tech hiring is steady."
        }"#;
        assert!(serde_json::from_str::<CareerGuidance>(bad).is_err());
    }
}
