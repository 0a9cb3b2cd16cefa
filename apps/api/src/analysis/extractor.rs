//! Response extraction: turns a raw Gemini envelope into a typed payload.
//!
//! Two stages: (1) pull the candidate text out of the envelope's fixed path,
//! (2) strip markdown code fences if present, then parse as JSON into the
//! target shape. The model is not guaranteed to emit clean JSON; fencing is
//! the most common deviation and is tolerated here rather than fought in the
//! prompt. Any missing field fails the whole extraction and callers fall back
//! cleanly instead of returning partially-populated results.

use serde::de::DeserializeOwned;

use crate::errors::AnalysisError;
use crate::gemini::RawModelResponse;

/// Stage 1 only: the plain generated text, for free-text operations.
pub fn extract_text(raw: &RawModelResponse) -> Result<String, AnalysisError> {
    let text = raw.text().ok_or_else(|| {
        AnalysisError::MalformedResponse(
            "response envelope contained no candidate text".to_string(),
        )
    })?;
    let text = text.trim();
    if text.is_empty() {
        return Err(AnalysisError::MalformedResponse(
            "candidate text was empty".to_string(),
        ));
    }
    Ok(text.to_string())
}

/// Both stages: candidate text, fence-stripped, parsed into `T`.
///
/// The error message carries the serde context only, never the payload body,
/// so prompts and model output do not leak into logs wholesale.
pub fn extract_payload<T: DeserializeOwned>(raw: &RawModelResponse) -> Result<T, AnalysisError> {
    let text = extract_text(raw)?;
    let json = strip_code_fences(&text);
    serde_json::from_str(json).map_err(|e| {
        AnalysisError::MalformedResponse(format!("candidate text did not match expected shape: {e}"))
    })
}

/// Strips ```json ... ``` or ``` ... ``` fences from model output.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
