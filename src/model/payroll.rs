use serde::{Deserialize, Serialize};

use super::Resource;

crate::wire_enum! {
    #[derive(Default)]
    pub enum PayrollStatus("payroll status") {
        #[default]
        Pending => "pending",
        Processed => "processed",
        Paid => "paid",
    }
}

/// One pay-period entry for an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub basic_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_salary: f64,
    pub pay_period: String,
    pub status: PayrollStatus,
}

impl Payroll {
    /// Net salary implied by the components. The service is not required to
    /// agree with it; `net_salary` is what it reported.
    pub fn expected_net(&self) -> f64 {
        self.basic_salary + self.allowances - self.deductions
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowances: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deductions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PayrollStatus>,
}

impl PayrollDraft {
    /// Fill `net_salary` from the salary components when all three are set
    /// and no explicit net was given.
    pub fn with_computed_net(mut self) -> Self {
        if self.net_salary.is_none()
            && let (Some(basic), Some(allowances), Some(deductions)) =
                (self.basic_salary, self.allowances, self.deductions)
        {
            self.net_salary = Some(basic + allowances - deductions);
        }
        self
    }
}

impl Resource for Payroll {
    const PATH: &'static str = "payroll";
    const LABEL: &'static str = "payroll records";

    type Draft = PayrollDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> Option<&str> {
        Some(&self.employee_id)
    }
}
