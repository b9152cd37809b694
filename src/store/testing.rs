//! Scripted in-memory client for store and command tests.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::{OfficeError, Result};
use crate::model::Resource;
use crate::remote::ResourceClient;

/// Replays queued list results and records every call as a short string:
/// `list`, `create`, `update <id>`, `remove <id>`.
pub struct ScriptedClient<R> {
    lists: Mutex<VecDeque<Result<Vec<R>>>>,
    mutation_error: Mutex<Option<OfficeError>>,
    calls: Mutex<Vec<String>>,
}

impl<R> Default for ScriptedClient<R> {
    fn default() -> Self {
        Self {
            lists: Mutex::new(VecDeque::new()),
            mutation_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<R> ScriptedClient<R> {
    pub fn with_lists(lists: Vec<Result<Vec<R>>>) -> Self {
        Self {
            lists: Mutex::new(lists.into()),
            ..Default::default()
        }
    }

    /// Fail the next mutation with `err`.
    pub fn failing_mutations(self, err: OfficeError) -> Self {
        *self.mutation_error.lock() = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn mutation_result(&self) -> Result<()> {
        match self.mutation_error.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<R: Resource> ResourceClient<R> for ScriptedClient<R> {
    async fn list(&self) -> Result<Vec<R>> {
        self.calls.lock().push("list".to_string());
        self.lists.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create(&self, _payload: &R::Draft) -> Result<()> {
        self.calls.lock().push("create".to_string());
        self.mutation_result()
    }

    async fn update(&self, id: &str, _payload: &R::Draft) -> Result<()> {
        self.calls.lock().push(format!("update {id}"));
        self.mutation_result()
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.calls.lock().push(format!("remove {id}"));
        self.mutation_result()
    }
}

pub fn server_error(status: u16, message: &str) -> OfficeError {
    OfficeError::Server {
        status,
        message: message.to_string(),
    }
}
