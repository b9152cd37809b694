//! List, stats and mutation commands, shared by every resource kind.

use owo_colors::OwoColorize;
use serde_json::{Value, json};

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::display::{TableRow, format_stats, render_list};
use crate::error::{OfficeError, Result};
use crate::filter::{Summarize, filtered_view, stats};
use crate::remote::ResourceClient;
use crate::session::Session;
use crate::store::{CollectionStore, Mutation};

/// One command invocation against a resource collection.
///
/// Owns the collection store for the duration of the command. When a session
/// is given, every printed list is narrowed to the records it owns.
pub struct ResourceCommand<R: Summarize, C> {
    store: CollectionStore<R, C>,
    scope: Option<Session>,
    output: OutputOptions,
}

impl<R, C> ResourceCommand<R, C>
where
    R: Summarize + TableRow,
    C: ResourceClient<R>,
{
    pub fn new(client: C, scope: Option<Session>, output: OutputOptions) -> Self {
        Self {
            store: CollectionStore::new(client),
            scope,
            output,
        }
    }

    pub fn store(&self) -> &CollectionStore<R, C> {
        &self.store
    }

    /// Print the filtered view of the collection.
    pub async fn list(&self, filter: &R::Filter) -> Result<()> {
        self.load().await?;
        let view = filtered_view(&self.visible(), filter);

        CommandOutput::new(serde_json::to_value(&view)?)
            .with_text(render_list(&view))
            .print(self.output)
    }

    /// Print statistics of the filtered view. `extra` adds kind-specific
    /// figures computed over the same view.
    pub async fn stats<F>(&self, filter: &R::Filter, extra: F) -> Result<()>
    where
        F: FnOnce(&[R]) -> Vec<(&'static str, Value)>,
    {
        self.load().await?;
        let view = filtered_view(&self.visible(), filter);

        let mut value = serde_json::to_value(stats(&view))?;
        if let Value::Object(map) = &mut value {
            for (key, figure) in extra(&view) {
                map.insert(key.to_string(), figure);
            }
        }

        let title = format!("Statistics for {} {}", view.len(), R::LABEL);
        let text = format_stats(&title, &value);
        CommandOutput::new(value).with_text(text).print(self.output)
    }

    pub async fn create(&self, draft: R::Draft) -> Result<()> {
        self.apply(Mutation::Create(draft), None).await
    }

    pub async fn update(&self, id: &str, draft: R::Draft) -> Result<()> {
        self.apply(Mutation::Update(id.to_string(), draft), Some(id)).await
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        self.apply(Mutation::Remove(id.to_string()), Some(id)).await
    }

    async fn apply(&self, mutation: Mutation<R>, id: Option<&str>) -> Result<()> {
        let action = match &mutation {
            Mutation::Create(_) => "created",
            Mutation::Update(..) => "updated",
            Mutation::Remove(_) => "removed",
        };

        self.store.mutate(mutation).await;

        let state = self.store.snapshot();
        if let Some(message) = state.action_error {
            return Err(OfficeError::Other(message));
        }
        if let Some(message) = state.error {
            return Err(OfficeError::Other(format!(
                "{} {action}, but reloading failed: {message}",
                R::LABEL
            )));
        }

        let items = self.visible();
        let json = json!({
            "action": action,
            "resource": R::PATH,
            "id": id,
            "items": items,
        });

        let target = match id {
            Some(id) => format!("{} {}", R::PATH, id.cyan()),
            None => R::PATH.to_string(),
        };
        let text = format!("{} {target}\n\n{}", capitalize(action).green(), render_list(&items));

        CommandOutput::new(json).with_text(text).print(self.output)
    }

    async fn load(&self) -> Result<()> {
        self.store.refresh().await;
        match self.store.error() {
            Some(message) => Err(OfficeError::Other(message)),
            None => Ok(()),
        }
    }

    fn visible(&self) -> Vec<R> {
        let items = self.store.items();
        match &self.scope {
            Some(session) => session.scope_owned(&items),
            None => items,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{LeaveFilter, Selection};
    use crate::model::{Leave, LeaveDraft, LeaveStatus, LeaveType};
    use crate::session::Role;
    use crate::store::testing::{ScriptedClient, server_error};

    fn leave(id: &str, employee_id: &str, status: LeaveStatus) -> Leave {
        Leave {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            employee_name: format!("Employee {employee_id}"),
            leave_type: LeaveType::Personal,
            start_date: "2024-03-01".to_string(),
            end_date: "2024-03-02".to_string(),
            reason: "Moving house".to_string(),
            status,
            applied_at: "2024-02-20".to_string(),
        }
    }

    fn json_output() -> OutputOptions {
        OutputOptions { json: true }
    }

    #[tokio::test]
    async fn test_list_fails_when_refresh_fails() {
        let client = ScriptedClient::<Leave>::with_lists(vec![Err(server_error(500, "Database down"))]);
        let command = ResourceCommand::new(client, None, json_output());

        let err = command.list(&LeaveFilter::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Database down");
    }

    #[tokio::test]
    async fn test_list_applies_scope() {
        let client = ScriptedClient::with_lists(vec![Ok(vec![
            leave("1", "2", LeaveStatus::Pending),
            leave("2", "3", LeaveStatus::Approved),
        ])]);
        let session = Session::new("2", Role::Employee);
        let command = ResourceCommand::new(client, Some(session), json_output());

        command.list(&LeaveFilter::default()).await.unwrap();
        let ids: Vec<_> = command.visible().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[tokio::test]
    async fn test_admin_scope_keeps_own_records() {
        let client = ScriptedClient::with_lists(vec![Ok(vec![
            leave("1", "1", LeaveStatus::Pending),
            leave("2", "3", LeaveStatus::Approved),
        ])]);
        let session = Session::new("1", Role::Admin);
        let command = ResourceCommand::new(client, Some(session), json_output());

        command.list(&LeaveFilter::default()).await.unwrap();
        let ids: Vec<_> = command.visible().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[tokio::test]
    async fn test_stats_adds_extra_figures() {
        let client = ScriptedClient::with_lists(vec![Ok(vec![
            leave("1", "2", LeaveStatus::Approved),
            leave("2", "3", LeaveStatus::Approved),
        ])]);
        let command = ResourceCommand::new(client, None, json_output());
        let filter = LeaveFilter {
            status: Selection::Only(LeaveStatus::Approved),
            ..Default::default()
        };

        let mut seen = 0;
        command
            .stats(&filter, |view| {
                seen = view.len();
                vec![]
            })
            .await
            .unwrap();
        assert_eq!(seen, 2);
    }

    #[tokio::test]
    async fn test_rejected_mutation_is_an_error() {
        let client = ScriptedClient::<Leave>::default()
            .failing_mutations(server_error(422, "End date precedes start date"));
        let command = ResourceCommand::new(client, None, json_output());

        let err = command.create(LeaveDraft::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "End date precedes start date");
        assert_eq!(command.store().client().calls(), vec!["create"]);
    }

    #[tokio::test]
    async fn test_accepted_mutation_refetches() {
        let client = ScriptedClient::with_lists(vec![Ok(vec![leave("1", "2", LeaveStatus::Rejected)])]);
        let command = ResourceCommand::new(client, None, json_output());

        command.remove("9").await.unwrap();
        assert_eq!(command.store().client().calls(), vec!["remove 9", "list"]);
        assert_eq!(command.store().items().len(), 1);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("created"), "Created");
        assert_eq!(capitalize(""), "");
    }
}
