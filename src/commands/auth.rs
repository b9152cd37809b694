//! Account commands: registration and password reset.

use owo_colors::OwoColorize;
use secrecy::SecretString;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;
use crate::remote::{ApiClient, AuthClient};
use crate::session::Role;

fn auth_client() -> Result<AuthClient> {
    let config = Config::load()?;
    Ok(AuthClient::new(ApiClient::from_config(&config)?))
}

/// Register a new account
pub async fn cmd_register(
    role: Role,
    name: &str,
    email: &str,
    password: SecretString,
    output: OutputOptions,
) -> Result<()> {
    auth_client()?
        .register(role, name, email, &password)
        .await?;

    CommandOutput::new(json!({
        "action": "registered",
        "role": role,
        "name": name,
        "email": email,
    }))
    .with_text(format!(
        "{} {} account for {}",
        "Registered".green(),
        role,
        email.cyan()
    ))
    .print(output)
}

/// Request a password reset email
pub async fn cmd_forgot_password(role: Role, email: &str, output: OutputOptions) -> Result<()> {
    auth_client()?.forgot_password(role, email).await?;

    CommandOutput::new(json!({
        "action": "password_reset_requested",
        "role": role,
        "email": email,
    }))
    .with_text(format!(
        "Password reset link sent to {}",
        email.cyan()
    ))
    .print(output)
}
