use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::domain::completion::CompletionRequest;
use crate::domain::ticket::{ClassificationResult, TicketType};
use crate::error::{AppError, AppResult};
use crate::infra::openai::MISSING_API_KEY;
use crate::services::CompletionService;

const SUMMARY_KEY: &str = "summary";
const TYPE_KEY: &str = "type";

/// Turns raw ticket text into a validated classification.
#[derive(Clone)]
pub struct TicketClassifier {
    completion: Arc<dyn CompletionService>,
}

impl TicketClassifier {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub async fn classify(&self, ticket_text: &str) -> AppResult<ClassificationResult> {
        if !self.completion.is_configured() {
            return Err(AppError::Configuration(MISSING_API_KEY.to_string()));
        }

        let request = CompletionRequest::json(build_prompt(ticket_text));
        let response = self.completion.complete(&request).await?;
        let result = parse_classification(&response.text)?;

        info!(ticket_type = result.ticket_type.as_str(), "ticket classified");
        Ok(result)
    }
}

/// The ticket text is interpolated verbatim.
pub fn build_prompt(ticket_text: &str) -> String {
    format!(
        r#"Summarize the following support ticket and classify it.
Ticket: {ticket_text}

Respond in JSON with exactly these keys:
{{
    "summary": "...",
    "type": "bug" | "feature" | "billing"
}}"#
    )
}

pub fn parse_classification(raw: &str) -> AppResult<ClassificationResult> {
    let value: Value = serde_json::from_str(raw).map_err(|err| AppError::Parse {
        raw: raw.to_string(),
        reason: err.to_string(),
    })?;

    match value {
        Value::Object(object) => validate_shape(object),
        other => Err(AppError::validation(
            "<root>",
            format!("expected a JSON object, got {}", json_kind(&other)),
        )),
    }
}

fn validate_shape(object: Map<String, Value>) -> AppResult<ClassificationResult> {
    if let Some(extra) = object
        .keys()
        .find(|key| key.as_str() != SUMMARY_KEY && key.as_str() != TYPE_KEY)
    {
        return Err(AppError::validation(extra, "unexpected key"));
    }

    let summary = match object.get(SUMMARY_KEY) {
        Some(Value::String(summary)) => summary.clone(),
        Some(other) => {
            return Err(AppError::validation(
                SUMMARY_KEY,
                format!("expected a string, got {}", json_kind(other)),
            ));
        }
        None => return Err(AppError::validation(SUMMARY_KEY, "missing")),
    };

    let ticket_type = match object.get(TYPE_KEY) {
        Some(Value::String(raw_type)) => TicketType::from_str(raw_type).ok_or_else(|| {
            AppError::validation(
                TYPE_KEY,
                format!("'{raw_type}' is not one of bug, feature, billing"),
            )
        })?,
        Some(other) => {
            return Err(AppError::validation(
                TYPE_KEY,
                format!("expected a string, got {}", json_kind(other)),
            ));
        }
        None => return Err(AppError::validation(TYPE_KEY, "missing")),
    };

    debug!(summary_len = summary.len(), "completion matched classification shape");
    Ok(ClassificationResult {
        summary,
        ticket_type,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
