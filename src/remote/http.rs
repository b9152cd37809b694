//! HTTP implementation of the resource client.
//!
//! # Security Note - Logging
//!
//! The bearer token is kept in a `SecretString` and the `Authorization` header
//! value is marked sensitive, so reqwest's own debug logging prints it as
//! `Sensitive` rather than the token.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{OfficeError, Result};
use crate::model::Resource;

use super::ResourceClient;
use super::error::{check_status, transport_error};

/// Upper bound on the connect phase, whatever the request timeout is.
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection to the service origin, shared by every resource accessor.
///
/// Cloning is cheap: the underlying reqwest client is reference-counted.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<Arc<SecretString>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the given origin with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .build()
            .map_err(OfficeError::Network)?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Create a client from configuration, including the bearer token if one
    /// is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(&config.api_url(), config.timeout())?;
        Ok(match config.auth_token() {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Arc::new(SecretString::from(token.into())));
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Typed accessor for one resource collection.
    pub fn resource<R: Resource>(&self) -> HttpResource<R> {
        HttpResource {
            api: self.clone(),
            _marker: PhantomData,
        }
    }

    /// Build the URL for a path under the origin. Each segment is
    /// percent-encoded on its own, so ids cannot escape their segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                OfficeError::InvalidUrl(
                    self.base_url.to_string(),
                    "URL cannot be used as a base".to_string(),
                )
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    /// Send a request without a body.
    pub async fn send(&self, method: Method, url: Url, fallback: Option<&str>) -> Result<Response> {
        let builder = self.client.request(method.clone(), url.clone());
        self.dispatch(method, url, builder, fallback).await
    }

    /// Send a request with a JSON body.
    pub async fn send_json<B>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        fallback: Option<&str>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        let builder = self.client.request(method.clone(), url.clone()).json(body);
        self.dispatch(method, url, builder, fallback).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: Url,
        builder: RequestBuilder,
        fallback: Option<&str>,
    ) -> Result<Response> {
        let builder = self.authorize(builder)?;

        debug!(%method, %url, "sending request");
        let response = builder.send().await.map_err(transport_error)?;
        debug!(%method, %url, status = response.status().as_u16(), "received response");

        check_status(response, fallback).await
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let Some(token) = &self.token else {
            return Ok(builder);
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| {
                OfficeError::Auth("token contains characters not allowed in a header".to_string())
            })?;
        value.set_sensitive(true);

        Ok(builder.header(header::AUTHORIZATION, value))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url =
        Url::parse(raw.trim()).map_err(|e| OfficeError::InvalidUrl(raw.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(OfficeError::InvalidUrl(
            raw.to_string(),
            "scheme must be http or https".to_string(),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(OfficeError::InvalidUrl(
            raw.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }

    Ok(url)
}

/// HTTP accessor for the collection of `R` at `R::PATH`.
pub struct HttpResource<R> {
    api: ApiClient,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for HttpResource<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R> fmt::Debug for HttpResource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResource").field("api", &self.api).finish()
    }
}

impl<R: Resource> ResourceClient<R> for HttpResource<R> {
    async fn list(&self) -> Result<Vec<R>> {
        let url = self.api.endpoint(&[R::PATH])?;
        let response = self.api.send(Method::GET, url, None).await?;
        response.json::<Vec<R>>().await.map_err(transport_error)
    }

    async fn create(&self, payload: &R::Draft) -> Result<()> {
        let url = self.api.endpoint(&[R::PATH])?;
        self.api.send_json(Method::POST, url, payload, None).await?;
        Ok(())
    }

    async fn update(&self, id: &str, payload: &R::Draft) -> Result<()> {
        let url = self.api.endpoint(&[R::PATH, id])?;
        self.api.send_json(Method::PUT, url, payload, None).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let url = self.api.endpoint(&[R::PATH, id])?;
        self.api.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}
