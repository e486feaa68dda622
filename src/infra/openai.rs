use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::completion::{CompletionRequest, CompletionResponse};
use crate::error::{AppError, AppResult};
use crate::services::CompletionService;

pub const MISSING_API_KEY: &str =
    "OpenAI API key not set. Please set the OPENAI_API_KEY environment variable.";

/// Chat Completions client. Built once at startup and shared across requests.
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiClient {
    pub fn new(base_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration(MISSING_API_KEY.to_string()))
    }

    fn completions_endpoint(base_url: &str) -> String {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: &CompletionRequest) -> AppResult<CompletionResponse> {
        let api_key = self.api_key()?;
        let request_body = ChatCompletionRequest::new(&self.model, request);

        debug!(model = %self.model, prompt_len = request.prompt.len(), "calling chat completions");

        let response = self
            .http
            .post(Self::completions_endpoint(&self.base_url))
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::Provider(format!("failed to call OpenAI: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Provider(format!(
                "OpenAI responded with {status}: {body}"
            )));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|err| {
            AppError::Provider(format!("failed to parse OpenAI response: {err}"))
        })?;

        let text = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::Provider("OpenAI returned no message content".to_string())
            })?;

        debug!(response_len = text.len(), "received completion");
        Ok(CompletionResponse { text })
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(model: &'a str, request: &'a CompletionRequest) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            response_format: request.json_object.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer, api_key: Option<&str>) -> OpenAiClient {
        OpenAiClient::new(
            format!("{}/v1", server.uri()),
            api_key.map(str::to_string),
            "gpt-4o".to_string(),
        )
    }

    #[tokio::test]
    async fn sends_json_object_request_and_returns_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "messages": [{ "role": "user", "content": "hello" }],
                "response_format": { "type": "json_object" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "{\"summary\":\"s\",\"type\":\"bug\"}" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("sk-test"));
        let response = client
            .complete(&CompletionRequest::json("hello".to_string()))
            .await
            .expect("completion should succeed");

        assert_eq!(response.text, "{\"summary\":\"s\",\"type\":\"bug\"}");
    }

    #[tokio::test]
    async fn maps_error_status_to_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("sk-test"));
        let err = client
            .complete(&CompletionRequest::json("hello".to_string()))
            .await
            .unwrap_err();

        match err {
            AppError::Provider(message) => {
                assert!(message.contains("429"));
                assert!(message.contains("rate limited"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejects_response_without_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("sk-test"));
        let err = client
            .complete(&CompletionRequest::json("hello".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Provider(_)));
    }

    #[tokio::test]
    async fn refuses_to_call_without_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        assert!(!client.is_configured());

        let err = client
            .complete(&CompletionRequest::json("hello".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MISSING_API_KEY);
    }

    #[test]
    fn omits_response_format_for_plain_requests() {
        let request = CompletionRequest {
            prompt: "hi".to_string(),
            json_object: false,
        };
        let body = serde_json::to_value(ChatCompletionRequest::new("gpt-4o", &request)).unwrap();
        assert!(body.get("response_format").is_none());
    }
}
