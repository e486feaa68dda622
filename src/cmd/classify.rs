use tokio::io::{self, AsyncReadExt};

use crate::api::{ErrorResponse, classification_failure};
use crate::context::AppContext;
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct ClassifyCommandArgs {
    pub ticket_text: Option<String>,
}

/// Classifies one ticket and prints the JSON body the HTTP endpoint would
/// return. Returns `false` when the body is an error.
pub async fn run(ctx: &AppContext, args: ClassifyCommandArgs) -> AppResult<bool> {
    let ticket_text = match args.ticket_text {
        Some(text) => text,
        None => read_stdin().await?,
    };

    let (body, ok) = match ctx.classifier.classify(&ticket_text).await {
        Ok(result) => (serde_json::to_string_pretty(&result), true),
        Err(err) => {
            let (_, error) = classification_failure(&err);
            (serde_json::to_string_pretty(&ErrorResponse { error }), false)
        }
    };

    let body = body.map_err(std::io::Error::from)?;
    println!("{body}");
    Ok(ok)
}

async fn read_stdin() -> AppResult<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).await?;
    Ok(input.trim_end().to_string())
}
