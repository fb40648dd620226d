use super::migration::Catalog;

/// Ordered collection of module catalogs awaiting reconciliation.
///
/// Registration order is reconciliation order, and therefore also the
/// reverse of rollback order. Registering an owner twice replaces its
/// catalog without changing its position.
#[derive(Debug, Clone, Default)]
pub struct CatalogRegistry {
    entries: Vec<(String, Catalog)>,
}

impl CatalogRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a module's catalog under its owner name.
    pub fn register(&mut self, owner: impl Into<String>, catalog: Catalog) {
        let owner = owner.into();
        match self.entries.iter_mut().find(|(o, _)| *o == owner) {
            Some(entry) => entry.1 = catalog,
            None => self.entries.push((owner, catalog)),
        }
    }

    /// Iterate catalogs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Catalog)> {
        self.entries
            .iter()
            .map(|(owner, catalog)| (owner.as_str(), catalog))
    }

    /// Registered owners in registration order.
    pub fn owners(&self) -> Vec<&str> {
        self.entries.iter().map(|(owner, _)| owner.as_str()).collect()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::migration::Migration;
    use super::*;

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = CatalogRegistry::new();
        registry.register("accounts", Catalog::new());
        registry.register("billing", Catalog::new());
        registry.register("audit", Catalog::new());

        assert_eq!(registry.owners(), vec!["accounts", "billing", "audit"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_duplicate_owner_replaces_in_place() {
        let mut registry = CatalogRegistry::new();
        registry.register("accounts", Catalog::new());
        registry.register("billing", Catalog::new());
        registry.register(
            "accounts",
            Catalog::new().with_migration(Migration::new("0001", "up", "down")),
        );

        assert_eq!(registry.owners(), vec!["accounts", "billing"]);

        let (owner, catalog) = registry.iter().next().unwrap();
        assert_eq!(owner, "accounts");
        assert_eq!(catalog.migrations().len(), 1);
    }

    #[test]
    fn test_empty_registry() {
        let registry = CatalogRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.owners().is_empty());
    }
}
