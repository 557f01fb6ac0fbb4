pub mod loader;

pub use loader::{CsvImport, CsvImportError};
