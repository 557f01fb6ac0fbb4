use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer decision state of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    Pending,
    Accepted,
    Declined,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "ACCEPTED" => Some(Self::Accepted),
            "DECLINED" => Some(Self::Declined),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Generated identifier, e.g. `QUOTE_0001`.
    pub id: String,
    pub lead_id: Option<String>,
    pub customer_name: String,
    pub valid_until: Option<NaiveDate>,
    pub status: QuoteStatus,
    pub roof_area_sf: Option<Decimal>,
    pub roof_area_squares: Option<Decimal>,
    pub material_type: Option<String>,
    pub material_grade: Option<String>,
    pub labor_rate_per_sq: Option<Decimal>,
    pub material_cost: Option<Decimal>,
    pub labor_cost: Option<Decimal>,
    pub disposal_cost: Option<Decimal>,
    pub total_quote: Decimal,
    pub profit_margin_percent: Option<Decimal>,
    pub deposit_required: Option<Decimal>,
    pub notes: Option<String>,
}

/// For creating new quotes (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub lead_id: Option<String>,
    pub customer_name: String,
    pub valid_until: Option<NaiveDate>,
    pub status: QuoteStatus,
    pub roof_area_sf: Option<Decimal>,
    pub roof_area_squares: Option<Decimal>,
    pub material_type: Option<String>,
    pub material_grade: Option<String>,
    pub labor_rate_per_sq: Option<Decimal>,
    pub material_cost: Option<Decimal>,
    pub labor_cost: Option<Decimal>,
    pub disposal_cost: Option<Decimal>,
    pub total_quote: Decimal,
    pub profit_margin_percent: Option<Decimal>,
    pub deposit_required: Option<Decimal>,
    pub notes: Option<String>,
}

impl NewQuote {
    pub fn into_quote(self, id: String) -> Quote {
        Quote {
            id,
            lead_id: self.lead_id,
            customer_name: self.customer_name,
            valid_until: self.valid_until,
            status: self.status,
            roof_area_sf: self.roof_area_sf,
            roof_area_squares: self.roof_area_squares,
            material_type: self.material_type,
            material_grade: self.material_grade,
            labor_rate_per_sq: self.labor_rate_per_sq,
            material_cost: self.material_cost,
            labor_cost: self.labor_cost,
            disposal_cost: self.disposal_cost,
            total_quote: self.total_quote,
            profit_margin_percent: self.profit_margin_percent,
            deposit_required: self.deposit_required,
            notes: self.notes,
        }
    }
}
