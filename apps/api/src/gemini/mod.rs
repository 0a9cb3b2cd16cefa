//! Gemini gateway: the single point of entry for all generative-AI calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Gemini API directly.
//! All model interactions MUST go through this module, and all of its
//! failures surface as typed `AnalysisError` variants, never a bare
//! reqwest/serde error.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::AnalysisError;

/// Backoff base for the first retry sleep; doubles per attempt.
const BACKOFF_BASE: Duration = Duration::from_secs(1);
/// Cap on any single backoff sleep so cumulative latency stays boundable.
const BACKOFF_CEILING: Duration = Duration::from_secs(8);

// ────────────────────────────────────────────────────────────────────────────
// Wire types: Gemini generateContent envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(rename = "safetySettings")]
    safety_settings: &'static [SafetySetting],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

/// Fixed safety thresholds sent with every request.
const SAFETY_SETTINGS: &[SafetySetting] = &[
    SafetySetting {
        category: "HARM_CATEGORY_HARASSMENT",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_HATE_SPEECH",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_DANGEROUS_CONTENT",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
];

/// Typed response envelope. Every level is optional-tolerant so a truncated
/// or empty envelope reads as "no text" rather than a deserialization panic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawModelResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl RawModelResponse {
    /// The generated text at the fixed envelope path
    /// `candidates[0].content.parts[0].text`, if present.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }

    /// Builds an envelope around plain text. Used by tests and gateway doubles.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![CandidatePart {
                        text: Some(text.into()),
                    }],
                }),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Gateway trait + client
// ────────────────────────────────────────────────────────────────────────────

/// The gateway seam. CareerAnalysisService holds an `Arc<dyn ModelGateway>`
/// so tests inject scripted doubles without touching the network.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<RawModelResponse, AnalysisError>;
}

/// Reqwest-backed Gemini client with bounded retry and exponential backoff.
pub struct GeminiClient {
    client: reqwest::Client,
    /// Full generateContent URL including the API key. `None` when no key is
    /// configured; every call then reports unavailable without touching the
    /// network. Never logged.
    endpoint: Option<String>,
    generation_config: GenerationConfig,
    max_retries: u32,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        let endpoint = config.gemini_api_key.as_ref().map(|key| {
            format!(
                "{}/v1beta/models/{}:generateContent?key={}",
                config.gemini_base_url.trim_end_matches('/'),
                config.gemini_model,
                key
            )
        });

        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            generation_config: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
                top_k: config.top_k,
                top_p: config.top_p,
            },
            max_retries: config.max_retries,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    /// Issues one generateContent call with bounded retry.
    ///
    /// Transient failures (connect error, timeout, 429, 5xx) are retried up
    /// to `max_retries` total attempts with exponential backoff (1s, 2s, ...,
    /// capped per sleep). A definitive client error returns immediately as
    /// `PermanentRequest`; retrying an invalid request only delays fallback.
    async fn complete(&self, prompt: &str) -> Result<RawModelResponse, AnalysisError> {
        let Some(url) = self.endpoint.as_deref() else {
            return Err(AnalysisError::GatewayUnavailable(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        };

        let request_body = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: self.generation_config.clone(),
            safety_settings: SAFETY_SETTINGS,
        };

        let mut last_error: Option<String> = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "Gemini call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(url).json(&request_body).send().await {
                Ok(r) => r,
                Err(e) => {
                    // Connection refused / timeout: transient.
                    last_error = Some(format!("transport error: {e}"));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                warn!("Gemini API returned {status}");
                last_error = Some(format!("upstream returned {status}"));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(AnalysisError::PermanentRequest {
                    status: status.as_u16(),
                    message,
                });
            }

            let raw: RawModelResponse = response.json().await.map_err(|e| {
                AnalysisError::MalformedResponse(format!("response envelope did not decode: {e}"))
            })?;

            debug!("Gemini call succeeded on attempt {}", attempt + 1);
            return Ok(raw);
        }

        Err(AnalysisError::GatewayUnavailable(format!(
            "all {} attempts failed (last: {})",
            self.max_retries,
            last_error.unwrap_or_else(|| "no attempt recorded".to_string())
        )))
    }
}

/// Backoff before retry number `attempt` (1-based): 1s, 2s, 4s, ... capped.
fn backoff_delay(attempt: u32) -> Duration {
    let delay = BACKOFF_BASE * (1u32 << (attempt - 1).min(16));
    delay.min(BACKOFF_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn test_config(api_key: Option<&str>) -> Config {
        Config {
            gemini_api_key: api_key.map(str::to_string),
            ..Config::for_tests()
        }
    }

    /// Local double for the upstream endpoint: counts hits and replies with a
    /// fixed status line, closing the connection after each request.
    async fn spawn_scripted_upstream(response: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut sock, _)) = listener.accept().await else {
                    break;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                // Drain the full request (headers + content-length body)
                // before replying, so the client never sees a truncated
                // exchange.
                let mut request = Vec::new();
                let mut chunk = [0u8; 4096];
                while let Ok(n) = sock.read(&mut chunk).await {
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                    if request_complete(&request) {
                        break;
                    }
                }
                let _ = sock.write_all(response.as_bytes()).await;
                let _ = sock.shutdown().await;
            }
        });

        (base_url, hits)
    }

    /// True once `raw` holds complete headers plus the advertised body.
    fn request_complete(raw: &[u8]) -> bool {
        let Some(split) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&raw[..split]).to_lowercase();
        let body_len = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= split + 4 + body_len
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
        assert_eq!(backoff_delay(4), Duration::from_secs(8));
        // Capped from here on.
        assert_eq!(backoff_delay(10), Duration::from_secs(8));
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_reports_unavailable_without_network() {
        let client = GeminiClient::new(&test_config(None));
        assert!(!client.is_configured());

        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, AnalysisError::GatewayUnavailable(_)));
    }

    #[test]
    fn test_request_body_matches_wire_contract() {
        let body = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: "prompt here" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 2048,
                top_k: 40,
                top_p: 0.95,
            },
            safety_settings: SAFETY_SETTINGS,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt here");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            json["safetySettings"][0]["threshold"],
            "BLOCK_MEDIUM_AND_ABOVE"
        );
    }

    #[tokio::test]
    async fn test_persistent_transient_failure_uses_exactly_three_attempts() {
        let (base_url, hits) = spawn_scripted_upstream(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let config = Config {
            gemini_base_url: base_url,
            request_timeout_secs: 5,
            ..test_config(Some("test-key"))
        };
        let client = GeminiClient::new(&config);

        let started = std::time::Instant::now();
        let err = client.complete("prompt").await.unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, AnalysisError::GatewayUnavailable(_)));
        assert_eq!(hits.load(Ordering::SeqCst), 3, "expected exactly 3 attempts");
        // Backoff between attempts is 1s + 2s; total latency stays well under
        // the per-call ceiling.
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_client_error_is_permanent_and_not_retried() {
        let body = r#"{"error":{"message":"API key not valid"}}"#;
        let (base_url, hits) = spawn_scripted_upstream(
            "HTTP/1.1 400 Bad Request\r\ncontent-type: application/json\r\ncontent-length: 41\r\nconnection: close\r\n\r\n{\"error\":{\"message\":\"API key not valid\"}}",
        )
        .await;
        assert_eq!(body.len(), 41);

        let config = Config {
            gemini_base_url: base_url,
            request_timeout_secs: 5,
            ..test_config(Some("test-key"))
        };
        let client = GeminiClient::new(&config);

        let err = client.complete("prompt").await.unwrap_err();
        match err {
            AnalysisError::PermanentRequest { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected PermanentRequest, got {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1, "client errors burn no retries");
    }

    #[tokio::test]
    async fn test_successful_response_decodes_envelope() {
        let payload = r#"{"candidates":[{"content":{"parts":[{"text":"hello"}]}}]}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            payload.len(),
            payload
        );
        // Leak so the scripted upstream can hold a 'static response.
        let response: &'static str = Box::leak(response.into_boxed_str());
        let (base_url, hits) = spawn_scripted_upstream(response).await;

        let config = Config {
            gemini_base_url: base_url,
            request_timeout_secs: 5,
            ..test_config(Some("test-key"))
        };
        let client = GeminiClient::new(&config);

        let raw = client.complete("prompt").await.unwrap();
        assert_eq!(raw.text(), Some("hello"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_envelope_text_reads_fixed_path() {
        let raw: RawModelResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"generated"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(raw.text(), Some("generated"));
    }

    #[test]
    fn test_envelope_tolerates_empty_and_truncated_shapes() {
        let empty: RawModelResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), None);

        let no_parts: RawModelResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert_eq!(no_parts.text(), None);

        let null_content: RawModelResponse =
            serde_json::from_str(r#"{"candidates":[{"content":null}]}"#).unwrap();
        assert_eq!(null_content.text(), None);
    }
}
