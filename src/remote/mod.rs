//! Remote access to the office-management REST service.
//!
//! Each resource kind is a collection at a fixed path under the API origin,
//! supporting list, create, update and delete. Calls are attempted exactly
//! once; the service is the authority on validation.

pub mod auth;
pub mod error;
pub mod http;

use std::future::Future;

use crate::error::Result;
use crate::model::Resource;

pub use auth::AuthClient;
pub use http::{ApiClient, HttpResource};

/// Typed accessor for one resource collection.
pub trait ResourceClient<R: Resource>: Send + Sync {
    /// Fetch the full collection
    fn list(&self) -> impl Future<Output = Result<Vec<R>>> + Send;

    /// Create a record from a partial payload
    fn create(&self, payload: &R::Draft) -> impl Future<Output = Result<()>> + Send;

    /// Replace the fields given in `payload` on the record `id`
    fn update(&self, id: &str, payload: &R::Draft) -> impl Future<Output = Result<()>> + Send;

    /// Delete the record `id`
    fn remove(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}

impl<R: Resource, C: ResourceClient<R>> ResourceClient<R> for std::sync::Arc<C> {
    fn list(&self) -> impl Future<Output = Result<Vec<R>>> + Send {
        (**self).list()
    }

    fn create(&self, payload: &R::Draft) -> impl Future<Output = Result<()>> + Send {
        (**self).create(payload)
    }

    fn update(&self, id: &str, payload: &R::Draft) -> impl Future<Output = Result<()>> + Send {
        (**self).update(id, payload)
    }

    fn remove(&self, id: &str) -> impl Future<Output = Result<()>> + Send {
        (**self).remove(id)
    }
}
