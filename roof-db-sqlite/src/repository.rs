use async_trait::async_trait;
use roof_core::{
    Lead, LeadStatus, MaterialProduct, NewLead, NewProject, NewQuote, Project, ProjectStatus,
    Quote, QuoteStatus, RecordPrefix, RepositoryError, RoofingRepository, next_record_id,
};
use sqlx::{FromRow, sqlite::SqlitePool};

use crate::columns::{
    parse_decimal, parse_optional_date, parse_optional_decimal, parse_pitch,
};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Scan the ids in `table` and allocate the next `{PREFIX}_{NNNN}` id.
    async fn next_id(
        &self,
        table: &str,
        prefix: RecordPrefix,
    ) -> Result<String, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as(&format!("SELECT id FROM {}", table))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(next_record_id(prefix, rows.iter().map(|(id,)| id.as_str())))
    }
}

fn parse_status<T>(parse: impl Fn(&str) -> Option<T>, raw: &str) -> Result<T, RepositoryError> {
    parse(raw).ok_or_else(|| RepositoryError::Database(format!("Invalid status code: {}", raw)))
}

#[derive(FromRow)]
struct LeadRow {
    id: String,
    customer_name: String,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    lead_source: Option<String>,
    status: String,
    roof_type: Option<String>,
    roof_pitch: Option<i64>,
    squares_est: Option<String>,
    notes: Option<String>,
}

impl TryFrom<LeadRow> for Lead {
    type Error = RepositoryError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        Ok(Lead {
            id: row.id,
            customer_name: row.customer_name,
            address: row.address,
            city: row.city,
            state: row.state,
            zip: row.zip,
            phone: row.phone,
            email: row.email,
            lead_source: row.lead_source,
            status: parse_status(LeadStatus::parse, &row.status)?,
            roof_type: row.roof_type,
            roof_pitch: parse_pitch(row.roof_pitch)?,
            squares_est: parse_optional_decimal(&row.squares_est)?,
            notes: row.notes,
        })
    }
}

#[derive(FromRow)]
struct ProjectRow {
    id: String,
    lead_id: Option<String>,
    customer_name: String,
    project_address: Option<String>,
    status: String,
    date_sold: Option<String>,
    sale_amount: String,
    deposit_amount: Option<String>,
    deposit_date: Option<String>,
    scheduled_start: Option<String>,
    scheduled_complete: Option<String>,
    project_manager: Option<String>,
    notes: Option<String>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Project {
            id: row.id,
            lead_id: row.lead_id,
            customer_name: row.customer_name,
            project_address: row.project_address,
            status: parse_status(ProjectStatus::parse, &row.status)?,
            date_sold: parse_optional_date(&row.date_sold)?,
            sale_amount: parse_decimal(&row.sale_amount)?,
            deposit_amount: parse_optional_decimal(&row.deposit_amount)?,
            deposit_date: parse_optional_date(&row.deposit_date)?,
            scheduled_start: parse_optional_date(&row.scheduled_start)?,
            scheduled_complete: parse_optional_date(&row.scheduled_complete)?,
            project_manager: row.project_manager,
            notes: row.notes,
        })
    }
}

#[derive(FromRow)]
struct QuoteRow {
    id: String,
    lead_id: Option<String>,
    customer_name: String,
    valid_until: Option<String>,
    status: String,
    roof_area_sf: Option<String>,
    roof_area_squares: Option<String>,
    material_type: Option<String>,
    material_grade: Option<String>,
    labor_rate_per_sq: Option<String>,
    material_cost: Option<String>,
    labor_cost: Option<String>,
    disposal_cost: Option<String>,
    total_quote: String,
    profit_margin_percent: Option<String>,
    deposit_required: Option<String>,
    notes: Option<String>,
}

impl TryFrom<QuoteRow> for Quote {
    type Error = RepositoryError;

    fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
        Ok(Quote {
            id: row.id,
            lead_id: row.lead_id,
            customer_name: row.customer_name,
            valid_until: parse_optional_date(&row.valid_until)?,
            status: parse_status(QuoteStatus::parse, &row.status)?,
            roof_area_sf: parse_optional_decimal(&row.roof_area_sf)?,
            roof_area_squares: parse_optional_decimal(&row.roof_area_squares)?,
            material_type: row.material_type,
            material_grade: row.material_grade,
            labor_rate_per_sq: parse_optional_decimal(&row.labor_rate_per_sq)?,
            material_cost: parse_optional_decimal(&row.material_cost)?,
            labor_cost: parse_optional_decimal(&row.labor_cost)?,
            disposal_cost: parse_optional_decimal(&row.disposal_cost)?,
            total_quote: parse_decimal(&row.total_quote)?,
            profit_margin_percent: parse_optional_decimal(&row.profit_margin_percent)?,
            deposit_required: parse_optional_decimal(&row.deposit_required)?,
            notes: row.notes,
        })
    }
}

#[derive(FromRow)]
struct MaterialRow {
    id: String,
    name: String,
    price_per_square: String,
}

impl TryFrom<MaterialRow> for MaterialProduct {
    type Error = RepositoryError;

    fn try_from(row: MaterialRow) -> Result<Self, Self::Error> {
        Ok(MaterialProduct {
            id: row.id,
            name: row.name,
            price_per_square: parse_decimal(&row.price_per_square)?,
        })
    }
}

const LEAD_COLUMNS: &str = "id, customer_name, address, city, state, zip, phone, email,
     lead_source, status, roof_type, roof_pitch, squares_est, notes";

const PROJECT_COLUMNS: &str = "id, lead_id, customer_name, project_address, status,
     date_sold, sale_amount, deposit_amount, deposit_date,
     scheduled_start, scheduled_complete, project_manager, notes";

const QUOTE_COLUMNS: &str = "id, lead_id, customer_name, valid_until, status,
     roof_area_sf, roof_area_squares, material_type, material_grade,
     labor_rate_per_sq, material_cost, labor_cost, disposal_cost,
     total_quote, profit_margin_percent, deposit_required, notes";

#[async_trait]
impl RoofingRepository for SqliteRepository {
    async fn create_lead(&self, lead: NewLead) -> Result<Lead, RepositoryError> {
        let id = self.next_id("leads", RecordPrefix::Lead).await?;
        let lead = lead.into_lead(id);
        self.insert_lead(&lead).await?;
        Ok(lead)
    }

    async fn insert_lead(&self, lead: &Lead) -> Result<(), RepositoryError> {
        sqlx::query(&format!(
            "INSERT OR REPLACE INTO leads ({})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            LEAD_COLUMNS
        ))
        .bind(&lead.id)
        .bind(&lead.customer_name)
        .bind(&lead.address)
        .bind(&lead.city)
        .bind(&lead.state)
        .bind(&lead.zip)
        .bind(&lead.phone)
        .bind(&lead.email)
        .bind(&lead.lead_source)
        .bind(lead.status.as_str())
        .bind(&lead.roof_type)
        .bind(lead.roof_pitch.map(i64::from))
        .bind(lead.squares_est.map(|d| d.to_string()))
        .bind(&lead.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_lead(&self, id: &str) -> Result<Lead, RepositoryError> {
        let row: LeadRow =
            sqlx::query_as(&format!("SELECT {} FROM leads WHERE id = ?", LEAD_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?
                .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn update_lead(&self, lead: &Lead) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE leads SET
                customer_name = ?, address = ?, city = ?, state = ?, zip = ?,
                phone = ?, email = ?, lead_source = ?, status = ?, roof_type = ?,
                roof_pitch = ?, squares_est = ?, notes = ?
             WHERE id = ?",
        )
        .bind(&lead.customer_name)
        .bind(&lead.address)
        .bind(&lead.city)
        .bind(&lead.state)
        .bind(&lead.zip)
        .bind(&lead.phone)
        .bind(&lead.email)
        .bind(&lead.lead_source)
        .bind(lead.status.as_str())
        .bind(&lead.roof_type)
        .bind(lead.roof_pitch.map(i64::from))
        .bind(lead.squares_est.map(|d| d.to_string()))
        .bind(&lead.notes)
        .bind(&lead.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_lead(&self, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_leads(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>, RepositoryError> {
        let rows: Vec<LeadRow> = match status {
            Some(status) => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM leads WHERE status = ? ORDER BY id",
                    LEAD_COLUMNS
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!("SELECT {} FROM leads ORDER BY id", LEAD_COLUMNS))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn create_project(&self, project: NewProject) -> Result<Project, RepositoryError> {
        let id = self.next_id("projects", RecordPrefix::Project).await?;
        let project = project.into_project(id);
        self.insert_project(&project).await?;
        Ok(project)
    }

    async fn insert_project(&self, project: &Project) -> Result<(), RepositoryError> {
        sqlx::query(&format!(
            "INSERT OR REPLACE INTO projects ({})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            PROJECT_COLUMNS
        ))
        .bind(&project.id)
        .bind(&project.lead_id)
        .bind(&project.customer_name)
        .bind(&project.project_address)
        .bind(project.status.as_str())
        .bind(project.date_sold.map(|d| d.to_string()))
        .bind(project.sale_amount.to_string())
        .bind(project.deposit_amount.map(|d| d.to_string()))
        .bind(project.deposit_date.map(|d| d.to_string()))
        .bind(project.scheduled_start.map(|d| d.to_string()))
        .bind(project.scheduled_complete.map(|d| d.to_string()))
        .bind(&project.project_manager)
        .bind(&project.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_project(&self, id: &str) -> Result<Project, RepositoryError> {
        let row: ProjectRow = sqlx::query_as(&format!(
            "SELECT {} FROM projects WHERE id = ?",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn update_project(&self, project: &Project) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE projects SET
                lead_id = ?, customer_name = ?, project_address = ?, status = ?,
                date_sold = ?, sale_amount = ?, deposit_amount = ?, deposit_date = ?,
                scheduled_start = ?, scheduled_complete = ?, project_manager = ?, notes = ?
             WHERE id = ?",
        )
        .bind(&project.lead_id)
        .bind(&project.customer_name)
        .bind(&project.project_address)
        .bind(project.status.as_str())
        .bind(project.date_sold.map(|d| d.to_string()))
        .bind(project.sale_amount.to_string())
        .bind(project.deposit_amount.map(|d| d.to_string()))
        .bind(project.deposit_date.map(|d| d.to_string()))
        .bind(project.scheduled_start.map(|d| d.to_string()))
        .bind(project.scheduled_complete.map(|d| d.to_string()))
        .bind(&project.project_manager)
        .bind(&project.notes)
        .bind(&project.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, RepositoryError> {
        let rows: Vec<ProjectRow> = match status {
            Some(status) => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM projects WHERE status = ? ORDER BY id",
                    PROJECT_COLUMNS
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM projects ORDER BY id",
                    PROJECT_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn create_quote(&self, quote: NewQuote) -> Result<Quote, RepositoryError> {
        let id = self.next_id("quotes", RecordPrefix::Quote).await?;
        let quote = quote.into_quote(id);
        self.insert_quote(&quote).await?;
        Ok(quote)
    }

    async fn insert_quote(&self, quote: &Quote) -> Result<(), RepositoryError> {
        sqlx::query(&format!(
            "INSERT OR REPLACE INTO quotes ({})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            QUOTE_COLUMNS
        ))
        .bind(&quote.id)
        .bind(&quote.lead_id)
        .bind(&quote.customer_name)
        .bind(quote.valid_until.map(|d| d.to_string()))
        .bind(quote.status.as_str())
        .bind(quote.roof_area_sf.map(|d| d.to_string()))
        .bind(quote.roof_area_squares.map(|d| d.to_string()))
        .bind(&quote.material_type)
        .bind(&quote.material_grade)
        .bind(quote.labor_rate_per_sq.map(|d| d.to_string()))
        .bind(quote.material_cost.map(|d| d.to_string()))
        .bind(quote.labor_cost.map(|d| d.to_string()))
        .bind(quote.disposal_cost.map(|d| d.to_string()))
        .bind(quote.total_quote.to_string())
        .bind(quote.profit_margin_percent.map(|d| d.to_string()))
        .bind(quote.deposit_required.map(|d| d.to_string()))
        .bind(&quote.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_quote(&self, id: &str) -> Result<Quote, RepositoryError> {
        let row: QuoteRow =
            sqlx::query_as(&format!("SELECT {} FROM quotes WHERE id = ?", QUOTE_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?
                .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn update_quote(&self, quote: &Quote) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE quotes SET
                lead_id = ?, customer_name = ?, valid_until = ?, status = ?,
                roof_area_sf = ?, roof_area_squares = ?, material_type = ?,
                material_grade = ?, labor_rate_per_sq = ?, material_cost = ?,
                labor_cost = ?, disposal_cost = ?, total_quote = ?,
                profit_margin_percent = ?, deposit_required = ?, notes = ?
             WHERE id = ?",
        )
        .bind(&quote.lead_id)
        .bind(&quote.customer_name)
        .bind(quote.valid_until.map(|d| d.to_string()))
        .bind(quote.status.as_str())
        .bind(quote.roof_area_sf.map(|d| d.to_string()))
        .bind(quote.roof_area_squares.map(|d| d.to_string()))
        .bind(&quote.material_type)
        .bind(&quote.material_grade)
        .bind(quote.labor_rate_per_sq.map(|d| d.to_string()))
        .bind(quote.material_cost.map(|d| d.to_string()))
        .bind(quote.labor_cost.map(|d| d.to_string()))
        .bind(quote.disposal_cost.map(|d| d.to_string()))
        .bind(quote.total_quote.to_string())
        .bind(quote.profit_margin_percent.map(|d| d.to_string()))
        .bind(quote.deposit_required.map(|d| d.to_string()))
        .bind(&quote.notes)
        .bind(&quote.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_quote(&self, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_quotes(
        &self,
        status: Option<QuoteStatus>,
    ) -> Result<Vec<Quote>, RepositoryError> {
        let rows: Vec<QuoteRow> = match status {
            Some(status) => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM quotes WHERE status = ? ORDER BY id",
                    QUOTE_COLUMNS
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!("SELECT {} FROM quotes ORDER BY id", QUOTE_COLUMNS))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn upsert_material(&self, material: &MaterialProduct) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT OR REPLACE INTO materials (id, name, price_per_square) VALUES (?, ?, ?)",
        )
        .bind(&material.id)
        .bind(&material.name)
        .bind(material.price_per_square.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_material(&self, id: &str) -> Result<MaterialProduct, RepositoryError> {
        let row: MaterialRow =
            sqlx::query_as("SELECT id, name, price_per_square FROM materials WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?
                .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn list_materials(&self) -> Result<Vec<MaterialProduct>, RepositoryError> {
        let rows: Vec<MaterialRow> =
            sqlx::query_as("SELECT id, name, price_per_square FROM materials ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }
}
