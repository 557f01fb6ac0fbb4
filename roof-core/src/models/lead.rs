use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pipeline stage of a sales lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Contacted,
    Quoted,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Contacted => "CONTACTED",
            Self::Quoted => "QUOTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(Self::New),
            "CONTACTED" => Some(Self::Contacted),
            "QUOTED" => Some(Self::Quoted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// Generated identifier, e.g. `LEAD_0001`.
    pub id: String,
    pub customer_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub lead_source: Option<String>,
    pub status: LeadStatus,
    pub roof_type: Option<String>,
    /// Pitch rise per 12, when the canvasser measured it.
    pub roof_pitch: Option<u32>,
    /// Rough roofing-square count from the initial walkthrough.
    pub squares_est: Option<Decimal>,
    pub notes: Option<String>,
}

/// For creating new leads (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLead {
    pub customer_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub lead_source: Option<String>,
    pub status: LeadStatus,
    pub roof_type: Option<String>,
    pub roof_pitch: Option<u32>,
    pub squares_est: Option<Decimal>,
    pub notes: Option<String>,
}

impl NewLead {
    pub fn into_lead(self, id: String) -> Lead {
        Lead {
            id,
            customer_name: self.customer_name,
            address: self.address,
            city: self.city,
            state: self.state,
            zip: self.zip,
            phone: self.phone,
            email: self.email,
            lead_source: self.lead_source,
            status: self.status,
            roof_type: self.roof_type,
            roof_pitch: self.roof_pitch,
            squares_est: self.squares_est,
            notes: self.notes,
        }
    }
}
