//! # Customer Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::{Lifecycle, SoftDeletable};
use crate::status::EntityStatus;
use crate::store::Row;
use crate::validation::{rules, Validate, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Customer row. `deletedAt` is always present on the wire, `null` while
/// the customer is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub identification: String,
    pub name: String,
    pub lastname: String,
    pub date_born: NaiveDate,
    pub gender: Gender,
    pub status: EntityStatus,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,

    #[serde(rename = "deletedAt", default)]
    pub lifecycle: Lifecycle,
}

impl Customer {
    pub fn from_create(input: CreateCustomer, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identification: input.identification,
            name: input.name,
            lastname: input.lastname,
            date_born: input.date_born,
            gender: input.gender,
            status: input.status.unwrap_or_default(),
            create_date: now,
            update_date: now,
            lifecycle: Lifecycle::Active,
        }
    }

    /// Apply a validated patch. Absent fields keep their value.
    pub fn apply(&mut self, patch: UpdateCustomer, now: DateTime<Utc>) {
        if let Some(identification) = patch.identification {
            self.identification = identification;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(lastname) = patch.lastname {
            self.lastname = lastname;
        }
        if let Some(date_born) = patch.date_born {
            self.date_born = date_born;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.update_date = now;
    }
}

impl Row for Customer {
    const TABLE: &'static str = "customers";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.create_date
    }

    fn unique_columns(&self) -> Vec<(&'static str, String)> {
        vec![("identification", self.identification.clone())]
    }
}

impl SoftDeletable for Customer {
    const ENTITY: &'static str = "Customer";

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
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    #[serde(default)]
    pub identification: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub lastname: String,

    pub date_born: NaiveDate,
    pub gender: Gender,
    pub status: Option<EntityStatus>,
}

impl Validate for CreateCustomer {
    fn validate(&self) -> ValidationResult<()> {
        rules::identification(&self.identification)?;
        rules::required("name", &self.name)?;
        rules::required("lastname", &self.lastname)?;
        Ok(())
    }
}

/// Partial update body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    pub identification: Option<String>,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub date_born: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub status: Option<EntityStatus>,
}

impl Validate for UpdateCustomer {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(identification) = &self.identification {
            rules::identification(identification)?;
        }
        if let Some(name) = &self.name {
            rules::required("name", name)?;
        }
        if let Some(lastname) = &self.lastname {
            rules::required("lastname", lastname)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> serde_json::Value {
        json!({
            "identification": "1712345678",
            "name": "Ana",
            "lastname": "Torres",
            "dateBorn": "1990-04-12",
            "gender": "FEMALE"
        })
    }

    #[test]
    fn test_create_body_parses_and_defaults_status() {
        let input: CreateCustomer = serde_json::from_value(body()).unwrap();
        assert!(input.validate().is_ok());

        let customer = Customer::from_create(input, Utc::now());
        assert_eq!(customer.status, EntityStatus::Pending);
        assert_eq!(customer.date_born, NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());
    }

    #[test]
    fn test_validation_stops_at_first_failure() {
        let mut raw = body();
        raw["identification"] = json!("");
        raw["name"] = json!("");
        let input: CreateCustomer = serde_json::from_value(raw).unwrap();
        assert_eq!(input.validate().unwrap_err().field, "identification");

        let mut raw = body();
        raw["lastname"] = json!("  ");
        let input: CreateCustomer = serde_json::from_value(raw).unwrap();
        assert_eq!(input.validate().unwrap_err().field, "lastname");
    }

    #[test]
    fn test_deleted_at_is_null_when_active() {
        let input: CreateCustomer = serde_json::from_value(body()).unwrap();
        let customer = Customer::from_create(input, Utc::now());
        let row = serde_json::to_value(&customer).unwrap();
        assert_eq!(row["deletedAt"], serde_json::Value::Null);
        assert_eq!(row["dateBorn"], "1990-04-12");
        assert_eq!(row["gender"], "FEMALE");
    }

    #[test]
    fn test_patch_lastname_checked_when_present() {
        let patch = UpdateCustomer {
            lastname: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(patch.validate().unwrap_err().field, "lastname");
    }
}
