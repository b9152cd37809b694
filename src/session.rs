//! The signed-in user, passed explicitly to whatever renders by role.

use serde::{Deserialize, Serialize};

use crate::model::Resource;

crate::wire_enum! {
    /// Account role. Admins see every record; employees see their own.
    #[derive(Default)]
    pub enum Role("role") {
        Admin => "admin",
        #[default]
        Employee => "employee",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            name: None,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether a record belongs to this user. Records without an owner
    /// belong to everyone.
    pub fn owns<R: Resource>(&self, item: &R) -> bool {
        match item.owner_id() {
            Some(owner) => owner == self.user_id,
            None => true,
        }
    }

    /// Whether a record shows up in this user's default view: admins see
    /// everything, employees their own records.
    pub fn can_see<R: Resource>(&self, item: &R) -> bool {
        self.is_admin() || self.owns(item)
    }

    /// Narrow a list to this user's default view.
    pub fn scope<R: Resource>(&self, items: &[R]) -> Vec<R> {
        items.iter().filter(|item| self.can_see(*item)).cloned().collect()
    }

    /// Narrow a list to the records this user owns, whatever the role.
    pub fn scope_owned<R: Resource>(&self, items: &[R]) -> Vec<R> {
        items.iter().filter(|item| self.owns(*item)).cloned().collect()
    }
}
