use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TicketInput {
    pub ticket_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    Bug,
    Feature,
    Billing,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Bug => "bug",
            TicketType::Feature => "feature",
            TicketType::Billing => "billing",
        }
    }

    /// Exact match only: the completion is instructed to emit these literals.
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "bug" => Some(TicketType::Bug),
            "feature" => Some(TicketType::Feature),
            "billing" => Some(TicketType::Billing),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub summary: String,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
}
