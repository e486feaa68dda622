use crate::config::AppConfig;
use crate::error::AppResult;

pub fn run() -> AppResult<()> {
    let cfg = AppConfig::load()?;

    println!("OpenAI API key: {}", mask_secret(&cfg.openai_api_key));
    println!("OpenAI model: {}", cfg.openai_model);
    println!("OpenAI base URL: {}", cfg.openai_base_url);
    println!("Bind address: {}", cfg.bind_addr);

    Ok(())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
