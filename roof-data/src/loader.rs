//! CSV import for the business record flat files.
//!
//! The files are header-keyed and keep the original export's column names
//! (`Lead_ID`, `Customer_Name`, `Squares_Est`, ...). Each record type has a
//! strict parser that fails on the first bad row and a lenient variant that
//! logs and skips bad rows, which is what the loader binary uses so one
//! mangled line never sinks a whole import.

use std::io::Read;

use chrono::NaiveDate;
use roof_core::{
    Lead, LeadStatus, MaterialProduct, Project, ProjectStatus, Quote, QuoteStatus,
    RepositoryError, RoofingRepository,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when importing record CSV files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvImportError {
    #[error("CSV parse error: {0}")]
    Parse(String),

    #[error("Row {row}: unknown status '{status}'")]
    InvalidStatus { status: String, row: u64 },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for CsvImportError {
    fn from(err: csv::Error) -> Self {
        CsvImportError::Parse(err.to_string())
    }
}

/// 1-based file line of the `index`-th data record (line 1 is the header).
fn data_row(index: usize) -> u64 {
    index as u64 + 2
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// A single row from a leads CSV export.
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct LeadRecord {
    #[serde(rename = "Lead_ID")]
    id: String,
    #[serde(rename = "Customer_Name")]
    customer_name: String,
    #[serde(rename = "Address")]
    address: Option<String>,
    #[serde(rename = "City")]
    city: Option<String>,
    #[serde(rename = "State")]
    state: Option<String>,
    #[serde(rename = "Zip")]
    zip: Option<String>,
    #[serde(rename = "Phone")]
    phone: Option<String>,
    #[serde(rename = "Email")]
    email: Option<String>,
    #[serde(rename = "Lead_Source")]
    lead_source: Option<String>,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Roof_Type")]
    roof_type: Option<String>,
    #[serde(rename = "Roof_Pitch")]
    roof_pitch: Option<u32>,
    #[serde(rename = "Squares_Est")]
    squares_est: Option<Decimal>,
    #[serde(rename = "Notes")]
    notes: Option<String>,
}

fn lead_from_record(record: LeadRecord, row: u64) -> Result<Lead, CsvImportError> {
    let status = LeadStatus::parse(&record.status).ok_or(CsvImportError::InvalidStatus {
        status: record.status.clone(),
        row,
    })?;

    Ok(Lead {
        id: record.id,
        customer_name: record.customer_name,
        address: record.address,
        city: record.city,
        state: record.state,
        zip: record.zip,
        phone: record.phone,
        email: record.email,
        lead_source: record.lead_source,
        status,
        roof_type: record.roof_type,
        roof_pitch: record.roof_pitch,
        squares_est: record.squares_est,
        notes: record.notes,
    })
}

/// A single row from a projects CSV export.
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct ProjectRecord {
    #[serde(rename = "Project_ID")]
    id: String,
    #[serde(rename = "Lead_ID")]
    lead_id: Option<String>,
    #[serde(rename = "Customer_Name")]
    customer_name: String,
    #[serde(rename = "Project_Address")]
    project_address: Option<String>,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Date_Sold")]
    date_sold: Option<NaiveDate>,
    #[serde(rename = "Sale_Amount")]
    sale_amount: Decimal,
    #[serde(rename = "Deposit_Amount")]
    deposit_amount: Option<Decimal>,
    #[serde(rename = "Deposit_Date")]
    deposit_date: Option<NaiveDate>,
    #[serde(rename = "Scheduled_Start")]
    scheduled_start: Option<NaiveDate>,
    #[serde(rename = "Scheduled_Complete")]
    scheduled_complete: Option<NaiveDate>,
    #[serde(rename = "Project_Manager")]
    project_manager: Option<String>,
    #[serde(rename = "Notes")]
    notes: Option<String>,
}

fn project_from_record(record: ProjectRecord, row: u64) -> Result<Project, CsvImportError> {
    let status = ProjectStatus::parse(&record.status).ok_or(CsvImportError::InvalidStatus {
        status: record.status.clone(),
        row,
    })?;

    Ok(Project {
        id: record.id,
        lead_id: record.lead_id,
        customer_name: record.customer_name,
        project_address: record.project_address,
        status,
        date_sold: record.date_sold,
        sale_amount: record.sale_amount,
        deposit_amount: record.deposit_amount,
        deposit_date: record.deposit_date,
        scheduled_start: record.scheduled_start,
        scheduled_complete: record.scheduled_complete,
        project_manager: record.project_manager,
        notes: record.notes,
    })
}

/// A single row from a quotes CSV export.
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct QuoteRecord {
    #[serde(rename = "Quote_ID")]
    id: String,
    #[serde(rename = "Lead_ID")]
    lead_id: Option<String>,
    #[serde(rename = "Customer_Name")]
    customer_name: String,
    #[serde(rename = "Valid_Until")]
    valid_until: Option<NaiveDate>,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Roof_Area_SF")]
    roof_area_sf: Option<Decimal>,
    #[serde(rename = "Roof_Area_Squares")]
    roof_area_squares: Option<Decimal>,
    #[serde(rename = "Material_Type")]
    material_type: Option<String>,
    #[serde(rename = "Material_Grade")]
    material_grade: Option<String>,
    #[serde(rename = "Labor_Rate_Per_Sq")]
    labor_rate_per_sq: Option<Decimal>,
    #[serde(rename = "Material_Cost")]
    material_cost: Option<Decimal>,
    #[serde(rename = "Labor_Cost")]
    labor_cost: Option<Decimal>,
    #[serde(rename = "Disposal_Cost")]
    disposal_cost: Option<Decimal>,
    #[serde(rename = "Total_Quote")]
    total_quote: Decimal,
    #[serde(rename = "Profit_Margin_Percent")]
    profit_margin_percent: Option<Decimal>,
    #[serde(rename = "Deposit_Required")]
    deposit_required: Option<Decimal>,
    #[serde(rename = "Notes")]
    notes: Option<String>,
}

fn quote_from_record(record: QuoteRecord, row: u64) -> Result<Quote, CsvImportError> {
    let status = QuoteStatus::parse(&record.status).ok_or(CsvImportError::InvalidStatus {
        status: record.status.clone(),
        row,
    })?;

    Ok(Quote {
        id: record.id,
        lead_id: record.lead_id,
        customer_name: record.customer_name,
        valid_until: record.valid_until,
        status,
        roof_area_sf: record.roof_area_sf,
        roof_area_squares: record.roof_area_squares,
        material_type: record.material_type,
        material_grade: record.material_grade,
        labor_rate_per_sq: record.labor_rate_per_sq,
        material_cost: record.material_cost,
        labor_cost: record.labor_cost,
        disposal_cost: record.disposal_cost,
        total_quote: record.total_quote,
        profit_margin_percent: record.profit_margin_percent,
        deposit_required: record.deposit_required,
        notes: record.notes,
    })
}

/// A single row from a material price list CSV.
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct MaterialRecord {
    #[serde(rename = "Material_ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Price_Per_Square")]
    price_per_square: Decimal,
}

fn material_from_record(record: MaterialRecord) -> MaterialProduct {
    MaterialProduct {
        id: record.id,
        name: record.name,
        price_per_square: record.price_per_square,
    }
}

/// Parser and loader for the four record CSV file kinds.
///
/// Parsing and loading are split so a caller can validate a file without a
/// database connection. Loading goes through the id-preserving `insert_*`
/// repository methods, so re-importing a file with the same ids replaces
/// those records instead of duplicating them.
pub struct CsvImport;

impl CsvImport {
    pub fn parse_leads<R: Read>(reader: R) -> Result<Vec<Lead>, CsvImportError> {
        let mut csv_reader = csv_reader(reader);
        let mut leads = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: LeadRecord = result?;
            leads.push(lead_from_record(record, data_row(index))?);
        }

        Ok(leads)
    }

    /// Like [`parse_leads`](Self::parse_leads), but skips rows that fail to
    /// parse, logging each at `warn`.
    pub fn parse_leads_lenient<R: Read>(reader: R) -> Vec<Lead> {
        let mut csv_reader = csv_reader(reader);
        let mut leads = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row = data_row(index);
            let parsed = result
                .map_err(CsvImportError::from)
                .and_then(|record: LeadRecord| lead_from_record(record, row));
            match parsed {
                Ok(lead) => leads.push(lead),
                Err(error) => tracing::warn!(row, %error, "skipping malformed lead row"),
            }
        }

        leads
    }

    pub fn parse_projects<R: Read>(reader: R) -> Result<Vec<Project>, CsvImportError> {
        let mut csv_reader = csv_reader(reader);
        let mut projects = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: ProjectRecord = result?;
            projects.push(project_from_record(record, data_row(index))?);
        }

        Ok(projects)
    }

    pub fn parse_projects_lenient<R: Read>(reader: R) -> Vec<Project> {
        let mut csv_reader = csv_reader(reader);
        let mut projects = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row = data_row(index);
            let parsed = result
                .map_err(CsvImportError::from)
                .and_then(|record: ProjectRecord| project_from_record(record, row));
            match parsed {
                Ok(project) => projects.push(project),
                Err(error) => tracing::warn!(row, %error, "skipping malformed project row"),
            }
        }

        projects
    }

    pub fn parse_quotes<R: Read>(reader: R) -> Result<Vec<Quote>, CsvImportError> {
        let mut csv_reader = csv_reader(reader);
        let mut quotes = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: QuoteRecord = result?;
            quotes.push(quote_from_record(record, data_row(index))?);
        }

        Ok(quotes)
    }

    pub fn parse_quotes_lenient<R: Read>(reader: R) -> Vec<Quote> {
        let mut csv_reader = csv_reader(reader);
        let mut quotes = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row = data_row(index);
            let parsed = result
                .map_err(CsvImportError::from)
                .and_then(|record: QuoteRecord| quote_from_record(record, row));
            match parsed {
                Ok(quote) => quotes.push(quote),
                Err(error) => tracing::warn!(row, %error, "skipping malformed quote row"),
            }
        }

        quotes
    }

    pub fn parse_materials<R: Read>(reader: R) -> Result<Vec<MaterialProduct>, CsvImportError> {
        let mut csv_reader = csv_reader(reader);
        let mut materials = Vec::new();

        for result in csv_reader.deserialize() {
            let record: MaterialRecord = result?;
            materials.push(material_from_record(record));
        }

        Ok(materials)
    }

    pub fn parse_materials_lenient<R: Read>(reader: R) -> Vec<MaterialProduct> {
        let mut csv_reader = csv_reader(reader);
        let mut materials = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            match result {
                Ok(record) => materials.push(material_from_record(record)),
                Err(error) => {
                    let row = data_row(index);
                    tracing::warn!(row, %error, "skipping malformed material row");
                }
            }
        }

        materials
    }

    pub async fn load_leads<R: RoofingRepository + ?Sized>(
        repo: &R,
        leads: &[Lead],
    ) -> Result<usize, CsvImportError> {
        for lead in leads {
            repo.insert_lead(lead).await?;
        }
        Ok(leads.len())
    }

    pub async fn load_projects<R: RoofingRepository + ?Sized>(
        repo: &R,
        projects: &[Project],
    ) -> Result<usize, CsvImportError> {
        for project in projects {
            repo.insert_project(project).await?;
        }
        Ok(projects.len())
    }

    pub async fn load_quotes<R: RoofingRepository + ?Sized>(
        repo: &R,
        quotes: &[Quote],
    ) -> Result<usize, CsvImportError> {
        for quote in quotes {
            repo.insert_quote(quote).await?;
        }
        Ok(quotes.len())
    }

    pub async fn load_materials<R: RoofingRepository + ?Sized>(
        repo: &R,
        materials: &[MaterialProduct],
    ) -> Result<usize, CsvImportError> {
        for material in materials {
            repo.upsert_material(material).await?;
        }
        Ok(materials.len())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const LEADS_CSV: &str = "\
Lead_ID,Customer_Name,Address,City,State,Zip,Phone,Email,Lead_Source,Status,Roof_Type,Roof_Pitch,Squares_Est,Notes
LEAD_0001,Maria Gonzalez,4417 Maple Dr,Tulsa,OK,74105,918-555-0142,maria@example.com,Door knock,NEW,Asphalt shingle,6,24.5,
LEAD_0002,Tom Wheeler,12 Elm St,Tulsa,OK,74103,,tom@example.com,Referral,CONTACTED,,,,Call after 5pm
";

    const QUOTES_CSV: &str = "\
Quote_ID,Lead_ID,Customer_Name,Valid_Until,Status,Roof_Area_SF,Roof_Area_Squares,Material_Type,Material_Grade,Labor_Rate_Per_Sq,Material_Cost,Labor_Cost,Disposal_Cost,Total_Quote,Profit_Margin_Percent,Deposit_Required,Notes
QUOTE_0001,LEAD_0001,Maria Gonzalez,2025-06-30,PENDING,2635.2,26.352,Architectural,Standard,150.00,6324.48,3952.80,750.00,22755.22,28,5000.00,
";

    const PROJECTS_CSV: &str = "\
Project_ID,Lead_ID,Customer_Name,Project_Address,Status,Date_Sold,Sale_Amount,Deposit_Amount,Deposit_Date,Scheduled_Start,Scheduled_Complete,Project_Manager,Notes
PROJ_0001,LEAD_0001,Maria Gonzalez,\"4417 Maple Dr, Tulsa OK\",SCHEDULED,2025-04-02,21500.00,5000.00,2025-04-09,2025-05-01,,D. Reyes,
";

    const MATERIALS_CSV: &str = "\
Material_ID,Name,Price_Per_Square
SHNG-3TAB,3-Tab Shingle,185
SHNG-ARCH,Architectural Shingle,240
UL-SYN,Synthetic Underlayment,28
";

    #[test]
    fn parse_leads_reads_all_rows() {
        let leads = CsvImport::parse_leads(LEADS_CSV.as_bytes()).expect("Should parse leads");

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].id, "LEAD_0001");
        assert_eq!(leads[0].status, LeadStatus::New);
        assert_eq!(leads[0].roof_pitch, Some(6));
        assert_eq!(leads[0].squares_est, Some(dec!(24.5)));
        assert_eq!(leads[0].notes, None);
    }

    #[test]
    fn parse_leads_empty_fields_become_none() {
        let leads = CsvImport::parse_leads(LEADS_CSV.as_bytes()).expect("Should parse leads");

        assert_eq!(leads[1].phone, None);
        assert_eq!(leads[1].roof_type, None);
        assert_eq!(leads[1].roof_pitch, None);
        assert_eq!(leads[1].squares_est, None);
        assert_eq!(leads[1].notes.as_deref(), Some("Call after 5pm"));
    }

    #[test]
    fn parse_leads_unknown_status_names_row() {
        let csv = "\
Lead_ID,Customer_Name,Address,City,State,Zip,Phone,Email,Lead_Source,Status,Roof_Type,Roof_Pitch,Squares_Est,Notes
LEAD_0001,Maria Gonzalez,,,,,,,,LOST,,,,
";

        let result = CsvImport::parse_leads(csv.as_bytes());

        assert_eq!(
            result,
            Err(CsvImportError::InvalidStatus {
                status: "LOST".to_string(),
                row: 2,
            })
        );
    }

    #[test]
    fn parse_leads_missing_column_is_parse_error() {
        let csv = "Lead_ID,Customer_Name\nLEAD_0001,Maria Gonzalez";

        let result = CsvImport::parse_leads(csv.as_bytes());

        let Err(CsvImportError::Parse(msg)) = result else {
            panic!("expected Parse error, got {result:?}");
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn parse_leads_lenient_skips_bad_rows() {
        let csv = "\
Lead_ID,Customer_Name,Address,City,State,Zip,Phone,Email,Lead_Source,Status,Roof_Type,Roof_Pitch,Squares_Est,Notes
LEAD_0001,Maria Gonzalez,,,,,,,,NEW,,,,
LEAD_0002,Bad Pitch,,,,,,,,NEW,,steep,,
LEAD_0003,Bad Status,,,,,,,,LOST,,,,
LEAD_0004,Tom Wheeler,,,,,,,,QUOTED,,,,
";

        let leads = CsvImport::parse_leads_lenient(csv.as_bytes());

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].id, "LEAD_0001");
        assert_eq!(leads[1].id, "LEAD_0004");
    }

    #[test]
    fn parse_quotes_reads_amounts_and_dates() {
        let quotes = CsvImport::parse_quotes(QUOTES_CSV.as_bytes()).expect("Should parse quotes");

        assert_eq!(quotes.len(), 1);
        let quote = &quotes[0];
        assert_eq!(quote.id, "QUOTE_0001");
        assert_eq!(quote.status, QuoteStatus::Pending);
        assert_eq!(quote.total_quote, dec!(22755.22));
        assert_eq!(quote.roof_area_squares, Some(dec!(26.352)));
        assert_eq!(
            quote.valid_until,
            chrono::NaiveDate::from_ymd_opt(2025, 6, 30)
        );
    }

    #[test]
    fn parse_projects_handles_quoted_commas() {
        let projects =
            CsvImport::parse_projects(PROJECTS_CSV.as_bytes()).expect("Should parse projects");

        assert_eq!(projects.len(), 1);
        let project = &projects[0];
        assert_eq!(project.status, ProjectStatus::Scheduled);
        assert_eq!(
            project.project_address.as_deref(),
            Some("4417 Maple Dr, Tulsa OK")
        );
        assert_eq!(project.sale_amount, dec!(21500.00));
        assert_eq!(project.scheduled_complete, None);
    }

    #[test]
    fn parse_materials_reads_price_list() {
        let materials =
            CsvImport::parse_materials(MATERIALS_CSV.as_bytes()).expect("Should parse materials");

        assert_eq!(materials.len(), 3);
        assert_eq!(materials[1].id, "SHNG-ARCH");
        assert_eq!(materials[1].price_per_square, dec!(240));
    }

    #[test]
    fn parse_materials_lenient_skips_bad_price() {
        let csv = "\
Material_ID,Name,Price_Per_Square
SHNG-3TAB,3-Tab Shingle,185
SHNG-BAD,Broken Row,cheap
";

        let materials = CsvImport::parse_materials_lenient(csv.as_bytes());

        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].id, "SHNG-3TAB");
    }

    #[test]
    fn parse_empty_file_yields_no_records() {
        let csv = "Material_ID,Name,Price_Per_Square\n";

        let materials =
            CsvImport::parse_materials(csv.as_bytes()).expect("Should parse empty file");

        assert!(materials.is_empty());
    }
}
