//! HTTP embedding client
//!
//! Speaks the text-embeddings-inference REST shape: POST `{endpoint}/embed`
//! with `{"inputs": [...]}` returns one vector per input. Sync HTTP via ureq —
//! no async runtime needed. One client per model endpoint; the same type
//! serves as both the text and the code service, pointed at different
//! servers.

use crate::embed::{CodeEmbeddingService, TextEmbeddingService};
use crate::error::{AnalysisError, Result};
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [String],
    truncate: bool,
}

pub struct HttpEmbeddingClient {
    endpoint: String,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // We handle status codes ourselves
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl HttpEmbeddingClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: make_agent(timeout),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/embed", self.endpoint.trim_end_matches('/'));
        let body = EmbedRequest {
            inputs: texts,
            truncate: true,
        };

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| AnalysisError::Service(format!("{url}: {e}")))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            return Err(AnalysisError::Service(format!(
                "{url} returned {status}: {error_text}"
            )));
        }

        let vectors: Vec<Vec<f32>> = response
            .into_body()
            .read_json()
            .map_err(|e| AnalysisError::Service(format!("{url}: bad response body: {e}")))?;

        if vectors.len() != texts.len() {
            return Err(AnalysisError::Service(format!(
                "{url} returned {} vectors for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }
        Ok(vectors)
    }
}

impl TextEmbeddingService for HttpEmbeddingClient {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.request(texts)
    }
}

impl CodeEmbeddingService for HttpEmbeddingClient {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.request(texts)
    }
}
