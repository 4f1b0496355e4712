//! Hosted text-generation client used by the filter fallback.

use super::http::AsyncHttpClient;
use super::types::ProviderError;
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

/// Default hosted model endpoint.
pub const DEFAULT_TEXT_GENERATION_URL: &str =
    "https://api-inference.huggingface.co/models/google/flan-t5-base";

/// Default whole-request timeout for generation calls.
pub const DEFAULT_TEXT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Default generation budget.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 80;

/// Boxed future returned by [`TextGenerator::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>>;

/// Generates free text from a prompt.
///
/// Object-safe so an optional generator can be held as `Arc<dyn TextGenerator>`.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}

#[derive(Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: String,
}

/// Inference services answer either with a list of generations or with a
/// single object.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    List(Vec<Generation>),
    Single(Generation),
}

impl GenerationResponse {
    fn into_text(self) -> String {
        match self {
            GenerationResponse::List(list) => list
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .unwrap_or_default(),
            GenerationResponse::Single(g) => g.generated_text,
        }
    }
}

/// Text-generation provider authenticated with a bearer credential.
pub struct TextGenerationProvider<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
    api_key: String,
    timeout: Duration,
    max_new_tokens: u32,
}

impl<C: AsyncHttpClient> TextGenerationProvider<C> {
    /// Creates a provider against the default model endpoint.
    pub fn new(http_client: C, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: DEFAULT_TEXT_GENERATION_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TEXT_GENERATION_TIMEOUT,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = json!({
            "inputs": prompt,
            "parameters": { "max_new_tokens": self.max_new_tokens },
        })
        .to_string();
        let authorization = format!("Bearer {}", self.api_key);
        let headers = [
            ("Authorization", authorization.as_str()),
            ("Content-Type", "application/json"),
        ];

        let bytes = self
            .http_client
            .post_with_headers(&self.endpoint, body, &headers, self.timeout)
            .await?;

        let response: GenerationResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::InvalidResponse(format!("generation JSON: {}", e)))?;
        let text = response.into_text();
        debug!(chars = text.len(), "Text generation completed");
        Ok(text)
    }
}

impl<C: AsyncHttpClient> TextGenerator for TextGenerationProvider<C> {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.generate_text(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    #[tokio::test]
    async fn test_list_response() {
        let mock = MockAsyncHttpClient::always(Ok(
            br#"[{"generated_text": "{\"attribute\": \"height\"}"}]"#.to_vec(),
        ));
        let provider = TextGenerationProvider::new(mock, "secret");

        let text = provider.generate("prompt").await.unwrap();
        assert_eq!(text, r#"{"attribute": "height"}"#);
    }

    #[tokio::test]
    async fn test_object_response() {
        let mock = MockAsyncHttpClient::always(Ok(br#"{"generated_text": "hello"}"#.to_vec()));
        let provider = TextGenerationProvider::new(mock, "secret");

        assert_eq!(provider.generate("prompt").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_empty_list_yields_empty_text() {
        let mock = MockAsyncHttpClient::always(Ok(b"[]".to_vec()));
        let provider = TextGenerationProvider::new(mock, "secret");

        assert_eq!(provider.generate("prompt").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_sends_bearer_and_budget() {
        let mock = MockAsyncHttpClient::always(Ok(b"[]".to_vec()));
        let provider = TextGenerationProvider::new(mock.clone(), "secret")
            .with_endpoint("http://model.test")
            .with_max_new_tokens(16);

        provider.generate("find tall buildings").await.unwrap();

        let requests = mock.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.url, "http://model.test");
        assert!(request
            .headers
            .contains(&("Authorization".to_string(), "Bearer secret".to_string())));

        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["inputs"], "find tall buildings");
        assert_eq!(body["parameters"]["max_new_tokens"], 16);
    }

    #[tokio::test]
    async fn test_error_propagates() {
        let mock = MockAsyncHttpClient::always(Err(ProviderError::HttpStatus {
            status: 401,
            url: DEFAULT_TEXT_GENERATION_URL.to_string(),
        }));
        let provider = TextGenerationProvider::new(mock, "bad");

        assert!(provider.generate("prompt").await.is_err());
    }
}
