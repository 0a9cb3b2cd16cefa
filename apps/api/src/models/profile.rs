//! Student profile and RIASEC score models.
//!
//! Every profile field is optional; the analysis core must degrade gracefully
//! on missing data, never reject it. Profiles arrive from the HTTP layer per
//! request and are never mutated or persisted by this core.

use serde::{Deserialize, Serialize};

/// The six RIASEC personality axes, in declaration order.
///
/// Declaration order is load-bearing: dominant-axis ties are broken by this
/// order, never by map iteration, so the derivation is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiasecAxis {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl RiasecAxis {
    pub const ALL: [RiasecAxis; 6] = [
        RiasecAxis::Realistic,
        RiasecAxis::Investigative,
        RiasecAxis::Artistic,
        RiasecAxis::Social,
        RiasecAxis::Enterprising,
        RiasecAxis::Conventional,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiasecAxis::Realistic => "Realistic",
            RiasecAxis::Investigative => "Investigative",
            RiasecAxis::Artistic => "Artistic",
            RiasecAxis::Social => "Social",
            RiasecAxis::Enterprising => "Enterprising",
            RiasecAxis::Conventional => "Conventional",
        }
    }
}

/// Six non-negative axis scores, conventionally 0–100.
/// Axes absent from the incoming JSON default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "lowercase")]
pub struct RiasecScores {
    pub realistic: u32,
    pub investigative: u32,
    pub artistic: u32,
    pub social: u32,
    pub enterprising: u32,
    pub conventional: u32,
}

impl RiasecScores {
    pub fn score(&self, axis: RiasecAxis) -> u32 {
        match axis {
            RiasecAxis::Realistic => self.realistic,
            RiasecAxis::Investigative => self.investigative,
            RiasecAxis::Artistic => self.artistic,
            RiasecAxis::Social => self.social,
            RiasecAxis::Enterprising => self.enterprising,
            RiasecAxis::Conventional => self.conventional,
        }
    }

    /// Top-3 axes by score. Ties break by axis declaration order (stable sort
    /// over `RiasecAxis::ALL`), so the result is identical across runs.
    pub fn dominant_axes(&self) -> [RiasecAxis; 3] {
        let mut axes = RiasecAxis::ALL;
        axes.sort_by(|a, b| self.score(*b).cmp(&self.score(*a)));
        [axes[0], axes[1], axes[2]]
    }
}

/// A student profile as supplied by the HTTP controller layer.
///
/// All fields optional; `#[serde(default)]` lets callers send any subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentProfile {
    pub student_id: Option<String>,
    pub education_level: Option<String>,
    pub institution: Option<String>,
    /// Academic performance, 10-point scale. Mutually preferred over `percentage`.
    pub cgpa: Option<f32>,
    /// Academic performance, 0–100. Used only when `cgpa` is absent.
    pub percentage: Option<f32>,
    pub riasec: Option<RiasecScores>,
    pub interests: Vec<String>,
    pub preferred_locations: Vec<String>,
    pub work_preference: Option<String>,
    pub expected_salary: Option<String>,
    pub age: Option<u8>,
    pub career_goal: Option<String>,
}
