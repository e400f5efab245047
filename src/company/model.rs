//! # Company Model
//!
//! Companies live in the key-value store keyed by `id`. The `deletedAt`
//! attribute is only written while the item is soft-deleted, so active items
//! never carry it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::{Lifecycle, SoftDeletable};
use crate::status::EntityStatus;
use crate::validation::{rules, Validate, ValidationResult};

/// Stored company item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub identification: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default)]
    pub status: EntityStatus,

    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,

    #[serde(rename = "deletedAt", default, skip_serializing_if = "Lifecycle::is_active")]
    pub lifecycle: Lifecycle,
}

impl Company {
    /// Build a new active company from a validated create request
    pub fn from_create(input: CreateCompany, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identification: input.identification,
            name: input.name,
            alias: input.alias,
            address: input.address,
            status: input.status.unwrap_or_default(),
            create_date: now,
            update_date: now,
            lifecycle: Lifecycle::Active,
        }
    }

    /// Apply a validated patch. Absent fields keep their value.
    pub fn apply(&mut self, patch: UpdateCompany, now: DateTime<Utc>) {
        if let Some(identification) = patch.identification {
            self.identification = identification;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(alias) = patch.alias {
            self.alias = Some(alias);
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.update_date = now;
    }
}

impl SoftDeletable for Company {
    const ENTITY: &'static str = "Company";

    fn id(&self) -> Uuid {
        self.id
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.update_date = now;
    }
}

/// Create request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompany {
    #[serde(default)]
    pub identification: String,

    #[serde(default)]
    pub name: String,

    pub alias: Option<String>,
    pub address: Option<String>,
    pub status: Option<EntityStatus>,
}

impl Validate for CreateCompany {
    fn validate(&self) -> ValidationResult<()> {
        rules::identification(&self.identification)?;
        rules::required("name", &self.name)?;
        Ok(())
    }
}

/// Partial update body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompany {
    pub identification: Option<String>,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub address: Option<String>,
    pub status: Option<EntityStatus>,
}

impl Validate for UpdateCompany {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(identification) = &self.identification {
            rules::identification(identification)?;
        }
        if let Some(name) = &self.name {
            rules::required("name", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(identification: &str, name: &str) -> CreateCompany {
        CreateCompany {
            identification: identification.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation_order() {
        let err = create("", "").validate().unwrap_err();
        assert_eq!(err.field, "identification");

        let err = create("ACME-01", " ").validate().unwrap_err();
        assert_eq!(err.field, "name");

        assert!(create("ACME-01", "Acme").validate().is_ok());
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let company = Company::from_create(create("ACME-01", "Acme"), Utc::now());
        assert_eq!(company.status, EntityStatus::Pending);
        assert!(company.lifecycle.is_active());
    }

    #[test]
    fn test_active_item_has_no_deleted_at() {
        let mut company = Company::from_create(create("ACME-01", "Acme"), Utc::now());
        let item = serde_json::to_value(&company).unwrap();
        assert!(item.get("deletedAt").is_none());
        assert_eq!(item["createDate"], json!(company.create_date));

        company.lifecycle.soft_delete(Utc::now());
        let item = serde_json::to_value(&company).unwrap();
        assert!(item["deletedAt"].is_string());

        let back: Company = serde_json::from_value(item).unwrap();
        assert!(back.lifecycle.is_deleted());
    }

    #[test]
    fn test_patch_validates_only_present_fields() {
        assert!(UpdateCompany::default().validate().is_ok());

        let blank_name = UpdateCompany {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(blank_name.validate().unwrap_err().field, "name");

        let patch: UpdateCompany = serde_json::from_value(json!({ "name": null })).unwrap();
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let mut company = Company::from_create(create("ACME-01", "Acme"), Utc::now());
        company.apply(
            UpdateCompany {
                alias: Some("ACME".into()),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(company.name, "Acme");
        assert_eq!(company.alias.as_deref(), Some("ACME"));
    }
}
