use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a sold roofing job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SCHEDULED" => Some(Self::Scheduled),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Generated identifier, e.g. `PROJ_0001`.
    pub id: String,
    /// Lead this project was sold from, when tracked.
    pub lead_id: Option<String>,
    pub customer_name: String,
    pub project_address: Option<String>,
    pub status: ProjectStatus,
    pub date_sold: Option<NaiveDate>,
    pub sale_amount: Decimal,
    pub deposit_amount: Option<Decimal>,
    pub deposit_date: Option<NaiveDate>,
    pub scheduled_start: Option<NaiveDate>,
    pub scheduled_complete: Option<NaiveDate>,
    pub project_manager: Option<String>,
    pub notes: Option<String>,
}

/// For creating new projects (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub lead_id: Option<String>,
    pub customer_name: String,
    pub project_address: Option<String>,
    pub status: ProjectStatus,
    pub date_sold: Option<NaiveDate>,
    pub sale_amount: Decimal,
    pub deposit_amount: Option<Decimal>,
    pub deposit_date: Option<NaiveDate>,
    pub scheduled_start: Option<NaiveDate>,
    pub scheduled_complete: Option<NaiveDate>,
    pub project_manager: Option<String>,
    pub notes: Option<String>,
}

impl NewProject {
    pub fn into_project(self, id: String) -> Project {
        Project {
            id,
            lead_id: self.lead_id,
            customer_name: self.customer_name,
            project_address: self.project_address,
            status: self.status,
            date_sold: self.date_sold,
            sale_amount: self.sale_amount,
            deposit_amount: self.deposit_amount,
            deposit_date: self.deposit_date,
            scheduled_start: self.scheduled_start,
            scheduled_complete: self.scheduled_complete,
            project_manager: self.project_manager,
            notes: self.notes,
        }
    }
}
