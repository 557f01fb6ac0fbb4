pub mod calculations;
pub mod catalog;
pub mod db;
pub mod models;
pub mod reporting;

pub use catalog::{MaterialCatalog, MaterialPrice};
pub use db::repository::{RepositoryError, RoofingRepository};
pub use models::*;
