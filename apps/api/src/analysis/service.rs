//! Career analysis orchestration.
//!
//! Flow per request: cache lookup → prompt build → gateway call → extraction →
//! cache populate → return `source: ai`; any failure along the way degrades to
//! the fallback catalog and returns `source: fallback`.
//!
//! The public contract is total: no operation here ever returns an error to
//! its caller. Degraded content quality is the only visible symptom of an
//! AI-side failure; the details go to the logs.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::cache::{Fingerprint, Operation, RecommendationCache};
use crate::analysis::extractor::{extract_payload, extract_text};
use crate::analysis::{fallback, prompt_builder};
use crate::errors::AnalysisError;
use crate::gemini::ModelGateway;
use crate::models::analysis::{AnalysisPayload, AnalysisResult, RiasecAnalysis};
use crate::models::profile::{RiasecScores, StudentProfile};

/// Shape the model is asked to return for RIASEC scoring. `dominant_axes` is
/// deliberately absent; it is derived locally so the ordering stays
/// deterministic regardless of what the model emits.
#[derive(Debug, Deserialize)]
struct RiasecModelPayload {
    scores: RiasecScores,
    summary: String,
    suggested_careers: Vec<String>,
}

/// The orchestrator. Owns the gateway seam and the recommendation cache;
/// stateless otherwise and safe to share behind an `Arc`.
pub struct CareerAnalysisService {
    gateway: Arc<dyn ModelGateway>,
    cache: RecommendationCache,
}

impl CareerAnalysisService {
    pub fn new(gateway: Arc<dyn ModelGateway>, cache_ttl: Duration, cache_capacity: usize) -> Self {
        Self {
            gateway,
            cache: RecommendationCache::new(cache_ttl, cache_capacity),
        }
    }

    /// Full career guidance for a profile.
    pub async fn recommend_careers(&self, profile: &StudentProfile) -> AnalysisResult {
        let key = Fingerprint::of_profile(Operation::CareerRecommendation, profile);
        self.cache
            .get_or_compute(key, || async move {
                let attempt = async {
                    let prompt = prompt_builder::career_recommendation_prompt(profile);
                    let raw = self.gateway.complete(&prompt).await?;
                    let guidance = extract_payload(&raw)?;
                    Ok(AnalysisResult::ai(AnalysisPayload::Guidance(guidance)))
                };
                resolve(Operation::CareerRecommendation, attempt, fallback::career_guidance).await
            })
            .await
    }

    /// Scores a RIASEC assessment from free-text responses.
    ///
    /// A fresh submission supersedes everything previously cached for the
    /// student, so their entries are invalidated before computing.
    pub async fn analyze_riasec(
        &self,
        student_id: Option<&str>,
        responses: &[String],
    ) -> AnalysisResult {
        if let Some(id) = student_id {
            self.cache.invalidate_student(id);
        }

        if responses.iter().all(|r| r.trim().is_empty()) {
            warn!("riasec analysis requested with no responses, serving fallback");
            return fallback::riasec_analysis();
        }

        let key = Fingerprint::of_responses(Operation::Riasec, student_id, responses);
        self.cache
            .get_or_compute(key, || async move {
                let attempt = async {
                    let prompt = prompt_builder::riasec_prompt(responses);
                    let raw = self.gateway.complete(&prompt).await?;
                    let parsed: RiasecModelPayload = extract_payload(&raw)?;
                    let dominant_axes = parsed.scores.dominant_axes();
                    Ok(AnalysisResult::ai(AnalysisPayload::Riasec(RiasecAnalysis {
                        scores: parsed.scores,
                        dominant_axes,
                        summary: parsed.summary,
                        suggested_careers: parsed.suggested_careers,
                    })))
                };
                resolve(Operation::Riasec, attempt, fallback::riasec_analysis).await
            })
            .await
    }

    /// Free-text learning path toward the profile's career goal.
    pub async fn learning_path(&self, profile: &StudentProfile) -> AnalysisResult {
        let key = Fingerprint::of_profile(Operation::LearningPath, profile);
        self.cache
            .get_or_compute(key, || async move {
                let attempt = async {
                    let prompt = prompt_builder::learning_path_prompt(profile);
                    let raw = self.gateway.complete(&prompt).await?;
                    let text = extract_text(&raw)?;
                    Ok(AnalysisResult::ai(AnalysisPayload::Text(text)))
                };
                resolve(Operation::LearningPath, attempt, fallback::learning_path).await
            })
            .await
    }

    /// One-shot counseling chat reply. Degrades to the keyword-matched canned
    /// reply for the message, not the generic default.
    pub async fn chat(&self, message: &str) -> AnalysisResult {
        if message.trim().is_empty() {
            return fallback::chat_reply(message);
        }

        let key = Fingerprint::of_text(Operation::Chat, message);
        self.cache
            .get_or_compute(key, || async move {
                let attempt = async {
                    let prompt = prompt_builder::chat_prompt(message);
                    let raw = self.gateway.complete(&prompt).await?;
                    let text = extract_text(&raw)?;
                    Ok(AnalysisResult::ai(AnalysisPayload::Text(text)))
                };
                resolve(Operation::Chat, attempt, || fallback::chat_reply(message)).await
            })
            .await
    }
}

/// Collapses the AI path's outcome into a total result: success passes
/// through, every error degrades to the supplied fallback entry.
async fn resolve(
    op: Operation,
    attempt: impl Future<Output = Result<AnalysisResult, AnalysisError>>,
    degraded: impl FnOnce() -> AnalysisResult,
) -> AnalysisResult {
    match attempt.await {
        Ok(result) => {
            info!("{} analysis completed from AI", op.tag());
            result
        }
        Err(err) => {
            log_degradation(op, &err);
            degraded()
        }
    }
}

/// Degradation log, distinct per error kind: a permanent request error smells
/// like a configuration bug rather than transient unavailability.
fn log_degradation(op: Operation, err: &AnalysisError) {
    match err {
        AnalysisError::PermanentRequest { status, message } => warn!(
            "{} degraded to fallback: upstream rejected the request (status {status}): {message}; \
             check gateway configuration",
            op.tag()
        ),
        AnalysisError::GatewayUnavailable(reason) => warn!(
            "{} degraded to fallback: gateway unavailable: {reason}",
            op.tag()
        ),
        AnalysisError::MalformedResponse(detail) => {
            warn!("{} degraded to fallback: {detail}", op.tag())
        }
    }
}
