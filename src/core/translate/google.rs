//! Google Cloud Translation (v2, basic) backend.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::Translator;

pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

const API_KEY_HEADER: &str = "X-Goog-Api-Key";

pub struct GoogleTranslator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a [String],
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GoogleTranslator {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Translator for GoogleTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>> {
        let request = TranslateRequest {
            q: texts,
            source,
            target,
            format: "text",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("translation request failed")?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("failed to read translation response")?;

        if !status.is_success() {
            bail!("translation request failed with status {}: {}", status, error_message(&body));
        }
        parse_response(&body)
    }
}

/// Extract translated texts, in request order, from a v2 response body.
fn parse_response(body: &str) -> Result<Vec<String>> {
    let response: TranslateResponse =
        serde_json::from_str(body).context("unexpected translation response")?;
    Ok(response
        .data
        .translations
        .into_iter()
        .map(|t| t.translated_text)
        .collect())
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) => response.error.message,
        Err(_) => body.trim().to_string(),
    }
}
