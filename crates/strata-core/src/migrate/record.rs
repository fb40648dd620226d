use chrono::{DateTime, Utc};

/// One entry of the durable migration log.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationRecord {
    /// Module the entry belongs to.
    pub owner: String,

    /// Identifier of the applied migration, or `None` for a bootstrap marker.
    pub migration_id: Option<String>,

    /// When the entry was written.
    pub timestamp: DateTime<Utc>,
}

impl MigrationRecord {
    /// Entry for an individually applied migration.
    pub fn applied(owner: impl Into<String>, migration_id: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            migration_id: Some(migration_id.into()),
            timestamp: Utc::now(),
        }
    }

    /// Marker entry recording that a module was bootstrapped from its baseline.
    pub fn marker(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            migration_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Whether this entry is a bootstrap marker rather than an applied migration.
    pub fn is_marker(&self) -> bool {
        self.migration_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applied_record() {
        let record = MigrationRecord::applied("accounts", "0001_initial");
        assert_eq!(record.owner, "accounts");
        assert_eq!(record.migration_id.as_deref(), Some("0001_initial"));
        assert!(!record.is_marker());
    }

    #[test]
    fn test_marker_record() {
        let record = MigrationRecord::marker("accounts");
        assert_eq!(record.owner, "accounts");
        assert!(record.migration_id.is_none());
        assert!(record.is_marker());
    }
}
