use serde::{Deserialize, Serialize};

use super::Resource;

crate::wire_enum! {
    #[derive(Default)]
    pub enum TaskPriority("task priority") {
        Low => "low",
        #[default]
        Medium => "medium",
        High => "high",
    }
}

crate::wire_enum! {
    #[derive(Default)]
    pub enum TaskStatus("task status") {
        #[default]
        Pending => "pending",
        InProgress => "in-progress",
        Completed => "completed",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub assigned_by: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Resource for Task {
    const PATH: &'static str = "tasks";
    const LABEL: &'static str = "tasks";

    type Draft = TaskDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> Option<&str> {
        Some(&self.assigned_to)
    }
}
