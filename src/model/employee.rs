use serde::{Deserialize, Serialize};

use super::Resource;

crate::wire_enum! {
    /// Employment status
    #[derive(Default)]
    pub enum EmployeeStatus("employee status") {
        #[default]
        Active => "active",
        Inactive => "inactive",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub salary: f64,
    pub join_date: String,
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

impl Resource for Employee {
    const PATH: &'static str = "employees";
    const LABEL: &'static str = "employees";

    type Draft = EmployeeDraft;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_service_json() {
        let json = r#"{
            "id": "1",
            "name": "John Doe",
            "email": "john.doe@company.com",
            "department": "Engineering",
            "position": "Software Developer",
            "salary": 75000,
            "joinDate": "2023-01-15",
            "status": "active"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.join_date, "2023-01-15");
        assert_eq!(employee.salary, 75000.0);
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(employee.avatar, None);
    }

    #[test]
    fn test_draft_omits_unset_fields() {
        let draft = EmployeeDraft {
            name: Some("Emily Davis".to_string()),
            join_date: Some("2023-03-05".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Emily Davis", "joinDate": "2023-03-05"})
        );
    }
}
