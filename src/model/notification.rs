use serde::{Deserialize, Serialize};

use super::Resource;

crate::wire_enum! {
    #[derive(Default)]
    pub enum NotificationType("notification type") {
        #[default]
        Info => "info",
        Success => "success",
        Warning => "warning",
        Error => "error",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub is_read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<NotificationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

impl Resource for Notification {
    const PATH: &'static str = "notifications";
    const LABEL: &'static str = "notifications";

    type Draft = NotificationDraft;

    fn id(&self) -> &str {
        &self.id
    }
}
