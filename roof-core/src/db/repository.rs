use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Lead, LeadStatus, MaterialProduct, NewLead, NewProject, NewQuote, Project, ProjectStatus,
    Quote, QuoteStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Keyed-record store for the roofing business data: leads, projects,
/// quotes, and the material price list.
///
/// `create_*` methods allocate the next `{PREFIX}_{NNNN}` identifier;
/// `insert_*` methods preserve the id on the record, replacing any existing
/// record with that id (used by the flat-file importer to stay idempotent).
#[async_trait]
pub trait RoofingRepository: Send + Sync {
    // Leads
    async fn create_lead(&self, lead: NewLead) -> Result<Lead, RepositoryError>;
    async fn insert_lead(&self, lead: &Lead) -> Result<(), RepositoryError>;
    async fn get_lead(&self, id: &str) -> Result<Lead, RepositoryError>;
    async fn update_lead(&self, lead: &Lead) -> Result<(), RepositoryError>;
    async fn delete_lead(&self, id: &str) -> Result<(), RepositoryError>;
    async fn list_leads(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>, RepositoryError>;

    // Projects
    async fn create_project(&self, project: NewProject) -> Result<Project, RepositoryError>;
    async fn insert_project(&self, project: &Project) -> Result<(), RepositoryError>;
    async fn get_project(&self, id: &str) -> Result<Project, RepositoryError>;
    async fn update_project(&self, project: &Project) -> Result<(), RepositoryError>;
    async fn delete_project(&self, id: &str) -> Result<(), RepositoryError>;
    async fn list_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, RepositoryError>;

    // Quotes
    async fn create_quote(&self, quote: NewQuote) -> Result<Quote, RepositoryError>;
    async fn insert_quote(&self, quote: &Quote) -> Result<(), RepositoryError>;
    async fn get_quote(&self, id: &str) -> Result<Quote, RepositoryError>;
    async fn update_quote(&self, quote: &Quote) -> Result<(), RepositoryError>;
    async fn delete_quote(&self, id: &str) -> Result<(), RepositoryError>;
    async fn list_quotes(
        &self,
        status: Option<QuoteStatus>,
    ) -> Result<Vec<Quote>, RepositoryError>;

    // Material catalog
    async fn upsert_material(&self, material: &MaterialProduct) -> Result<(), RepositoryError>;
    async fn get_material(&self, id: &str) -> Result<MaterialProduct, RepositoryError>;
    async fn list_materials(&self) -> Result<Vec<MaterialProduct>, RepositoryError>;
}
