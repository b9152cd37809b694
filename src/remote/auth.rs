//! Account endpoints of the service: registration and password reset.
//!
//! These sit beside the resource collections rather than inside them. Login
//! and session issuance are not handled here; the session the rest of the
//! crate works with comes from configuration.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::session::Role;

use super::ApiClient;

const REGISTER_FAILED: &str = "Registration failed";
const RESET_FAILED: &str = "Failed to send reset email.";

#[derive(Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordBody<'a> {
    email: &'a str,
}

/// Client for the per-role account endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Register a new account: POST `/{role}/register`.
    pub async fn register(
        &self,
        role: Role,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<()> {
        let url = self.api.endpoint(&[role.as_str(), "register"])?;
        let body = RegisterBody {
            name,
            email,
            password: password.expose_secret(),
        };

        self.api
            .send_json(Method::POST, url, &body, Some(REGISTER_FAILED))
            .await?;

        info!(%role, "registered account");
        Ok(())
    }

    /// Ask the service to email a password reset link:
    /// POST `/{role}/forgot-password`.
    pub async fn forgot_password(&self, role: Role, email: &str) -> Result<()> {
        let url = self.api.endpoint(&[role.as_str(), "forgot-password"])?;
        let body = ForgotPasswordBody { email };

        self.api
            .send_json(Method::POST, url, &body, Some(RESET_FAILED))
            .await?;

        info!(%role, "requested password reset");
        Ok(())
    }
}
