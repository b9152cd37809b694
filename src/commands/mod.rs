mod auth;
mod config;
mod resource;

pub use auth::{cmd_forgot_password, cmd_register};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use resource::ResourceCommand;

use serde_json::Value;

use crate::cli::OutputOptions;
use crate::error::Result;

/// Result of a command, printed as JSON or as text depending on the output
/// options. Commands without a text rendering fall back to pretty JSON.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
