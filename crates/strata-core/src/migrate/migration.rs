/// A single reversible schema migration.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Identifier, unique within the owning module (e.g. "0002_add_account_index").
    pub id: String,
    /// SQL executed when migrating forward.
    pub up: String,
    /// SQL executed when reverting.
    pub down: String,
}

impl Migration {
    pub fn new(id: impl Into<String>, up: impl Into<String>, down: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            up: up.into(),
            down: down.into(),
        }
    }
}

/// Everything a module hands over for reconciliation: its ordered migration
/// history plus the baseline statements that build its current schema from
/// scratch.
///
/// The baseline must always describe the schema that results from applying
/// every migration in the catalog. Fresh databases are built from the
/// baseline alone; existing databases receive individual migrations.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    migrations: Vec<Migration>,
    baseline: Vec<String>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a migration. Order of addition is order of application.
    pub fn with_migration(mut self, migration: Migration) -> Self {
        self.migrations.push(migration);
        self
    }

    /// Append a baseline statement, executed when bootstrapping from scratch.
    pub fn with_baseline(mut self, statement: impl Into<String>) -> Self {
        self.baseline.push(statement.into());
        self
    }

    /// Migrations in application order.
    pub fn migrations(&self) -> &[Migration] {
        &self.migrations
    }

    /// Baseline statements in execution order.
    pub fn baseline(&self) -> &[String] {
        &self.baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_new() {
        let m = Migration::new("0001_initial", "CREATE TABLE t (id INT)", "DROP TABLE t");
        assert_eq!(m.id, "0001_initial");
        assert_eq!(m.up, "CREATE TABLE t (id INT)");
        assert_eq!(m.down, "DROP TABLE t");
    }

    #[test]
    fn test_catalog_builder_preserves_order() {
        let catalog = Catalog::new()
            .with_baseline("CREATE TABLE a (id INT, flag BOOL)")
            .with_migration(Migration::new("0001", "CREATE TABLE a (id INT)", "DROP TABLE a"))
            .with_migration(Migration::new(
                "0002",
                "ALTER TABLE a ADD COLUMN flag BOOL",
                "ALTER TABLE a DROP COLUMN flag",
            ));

        assert_eq!(catalog.migrations().len(), 2);
        assert_eq!(catalog.migrations()[0].id, "0001");
        assert_eq!(catalog.migrations()[1].id, "0002");
        assert_eq!(catalog.baseline().len(), 1);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.migrations().is_empty());
        assert!(catalog.baseline().is_empty());
    }
}
