use crate::error::{FinancialReportError, Result};
use crate::llm::types::*;
use futures::StreamExt;
use log::debug;
use reqwest::Client;

const API_BASE_ENV: &str = "OLLAMA_API_BASE";
const MODEL_ENV: &str = "OLLAMA_MODEL";

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Reads the server address and model name from `OLLAMA_API_BASE` and
    /// `OLLAMA_MODEL`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_BASE_ENV)
            .map_err(|_| FinancialReportError::MissingConfig(API_BASE_ENV))?;
        let model = std::env::var(MODEL_ENV)
            .map_err(|_| FinancialReportError::MissingConfig(MODEL_ENV))?;
        Ok(Self::new(base_url, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a chat request and collects the streamed reply into one string.
    ///
    /// Ollama streams newline-delimited JSON objects; chunks that fail to
    /// parse are skipped, matching the server's occasional keep-alive noise.
    pub async fn chat(
        &self,
        system_prompt: &str,
        mut messages: Vec<ChatMessage>,
    ) -> Result<String> {
        messages.insert(0, ChatMessage::system(system_prompt));

        let payload = ChatRequest {
            model: self.model.clone(),
            messages,
            stream: true,
        };

        let url = format!("{}/api/chat", self.base_url);
        debug!("POST {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    FinancialReportError::LlmUnavailable(format!(
                        "{} (is Ollama running at {}?)",
                        e, self.base_url
                    ))
                } else {
                    FinancialReportError::HttpError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FinancialReportError::LlmApiError {
                status: status.as_u16(),
                body,
            });
        }

        let mut full_response = String::new();
        let mut buffer = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk?;
            buffer.extend_from_slice(&bytes);

            while let Some(newline) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                if let Some(done) = append_chunk(&line, &mut full_response) {
                    if done {
                        return Ok(full_response);
                    }
                }
            }
        }

        if !buffer.is_empty() {
            append_chunk(&buffer, &mut full_response);
        }

        Ok(full_response)
    }
}

/// Parses one streamed line, appending any message content. Returns the
/// chunk's `done` flag, or `None` when the line is not valid JSON.
fn append_chunk(line: &[u8], full_response: &mut String) -> Option<bool> {
    let chunk: ChatChunk = serde_json::from_slice(line).ok()?;
    if let Some(message) = &chunk.message {
        full_response.push_str(&message.content);
    }
    Some(chunk.done)
}
