//! Record status shared by Company and Customer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ServiceError, ServiceResult};

/// Business status. Independent of the soft-delete lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityStatus {
    Active,
    #[default]
    Pending,
    Inactive,
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Active => "ACTIVE",
            EntityStatus::Pending => "PENDING",
            EntityStatus::Inactive => "INACTIVE",
        }
    }

    /// Parse an optional `status` query value; empty means no filter
    pub fn from_query(raw: Option<&str>) -> ServiceResult<Option<Self>> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(EntityStatus::Active),
            "PENDING" => Ok(EntityStatus::Pending),
            "INACTIVE" => Ok(EntityStatus::Inactive),
            other => Err(ServiceError::InvalidParam {
                name: "status".to_string(),
                message: format!("unknown status '{}'", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&EntityStatus::Inactive).unwrap(), "\"INACTIVE\"");
        let parsed: EntityStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(parsed, EntityStatus::Active);
        assert_eq!(EntityStatus::default(), EntityStatus::Pending);
    }

    #[test]
    fn test_from_query() {
        assert_eq!(EntityStatus::from_query(None).unwrap(), None);
        assert_eq!(EntityStatus::from_query(Some("")).unwrap(), None);
        assert_eq!(
            EntityStatus::from_query(Some("PENDING")).unwrap(),
            Some(EntityStatus::Pending)
        );
        assert!(matches!(
            EntityStatus::from_query(Some("archived")),
            Err(ServiceError::InvalidParam { .. })
        ));
    }
}
