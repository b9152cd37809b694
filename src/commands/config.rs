//! Configuration commands for managing OfficeHub settings.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value
//! - `config set`: Set one value and save

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{Config, validate_config_key};
use crate::error::{OfficeError, Result};

const SECRET_KEYS: &[&str] = &["auth.token"];

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let session = config.session();

    let json_output = json!({
        "api": {
            "url": config.api_url(),
            "timeout": config.api.timeout,
        },
        "auth": {
            "token_configured": config.auth_token().is_some(),
        },
        "session": session,
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text_output.push_str(&format!("{}:\n", "api".cyan()));
    text_output.push_str(&format!("  url: {}\n", config.api_url()));
    text_output.push_str(&format!("  timeout: {}s\n", config.api.timeout));
    text_output.push('\n');

    text_output.push_str(&format!("{}:\n", "auth".cyan()));
    let token_status = match config.auth_token() {
        Some(token) => mask_sensitive_value(&token).green().to_string(),
        None => "not configured".dimmed().to_string(),
    };
    text_output.push_str(&format!("  token: {token_status}\n"));
    text_output.push('\n');

    match &session {
        Some(session) => {
            text_output.push_str(&format!("{}:\n", "session".cyan()));
            text_output.push_str(&format!("  user_id: {}\n", session.user_id));
            if let Some(name) = &session.name {
                text_output.push_str(&format!("  name: {name}\n"));
            }
            text_output.push_str(&format!("  role: {}\n", session.role));
        }
        None => {
            text_output.push_str(&format!(
                "{}: {}\n",
                "session".cyan(),
                "not configured".dimmed()
            ));
        }
    }

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let mut config = Config::load()?;
    config.set_value(key, value)?;
    config.save()?;

    let secret = SECRET_KEYS.contains(&key);
    let json_output = if secret {
        json!({
            "action": "config_set",
            "key": key,
            "success": true,
        })
    } else {
        json!({
            "action": "config_set",
            "key": key,
            "value": config.get_value(key)?,
            "success": true,
        })
    };

    let text_output = if secret {
        format!("Set {}", key.cyan())
    } else {
        format!("Set {} to {}", key.cyan(), value.trim())
    };

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let config = Config::load()?;
    let value = config
        .get_value(key)?
        .ok_or_else(|| OfficeError::Config(format!("{key} not set")))?;

    let (json_output, text_output) = if SECRET_KEYS.contains(&key) {
        let masked = mask_sensitive_value(&value);
        let json = json!({
            "key": key,
            "value": masked,
            "configured": true,
            "masked": true,
        });
        let text = format!("{masked} (masked - showing first 2 and last 2 characters)");
        (json, text)
    } else {
        let json = json!({
            "key": key,
            "value": value,
            "configured": true,
        });
        (json, value)
    };

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}
