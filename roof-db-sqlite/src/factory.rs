use async_trait::async_trait;

use roof_core::db::repository::{RepositoryError, RoofingRepository};
use roof_core::db::{DbConfig, RepositoryFactory};

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`roof_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use roof_core::db::RepositoryRegistry;
/// use roof_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and run
    /// pending migrations.
    ///
    /// Accepted connection-string values are anything sqlx's SQLite driver
    /// understands: a URL like `sqlite:roofing.db?mode=rwc`, or
    /// `sqlite::memory:` for an ephemeral database (useful for tests).
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn RoofingRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string).await?;
        repo.run_migrations().await?;
        Ok(Box::new(repo))
    }
}

#[cfg(test)]
mod tests {
    use roof_core::db::{DbConfig, RepositoryFactory};

    use super::SqliteRepositoryFactory;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteRepositoryFactory.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn creates_in_memory_repository() {
        let config = DbConfig {
            backend: "sqlite".to_string(),
            connection_string: "sqlite::memory:".to_string(),
        };

        let result = SqliteRepositoryFactory.create(&config).await;
        assert!(
            result.is_ok(),
            "failed to create in-memory repository: {:#?}",
            result.err()
        );
    }

    #[tokio::test]
    async fn bad_connection_string_surfaces_connection_error() {
        let config = DbConfig {
            backend: "sqlite".to_string(),
            connection_string: "sqlite:/nonexistent-dir/nope.db".to_string(),
        };

        let result = SqliteRepositoryFactory.create(&config).await;
        assert!(result.is_err());
    }
}
