#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Ask the provider to constrain its output to a single JSON object.
    pub json_object: bool,
}

impl CompletionRequest {
    pub fn json(prompt: String) -> Self {
        Self {
            prompt,
            json_object: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub text: String,
}
