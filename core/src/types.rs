//! Domain DTOs for the employee API.
//!
//! # Design
//! These types mirror the service's employee bean and record metadata but
//! are defined independently of the mock-server crate. Integration tests
//! catch any schema drift between the two.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Credentials posted to `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// An employee record as exchanged with the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub retired: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_timestamp: Option<String>,
    /// Set by the service on records that have not been persisted yet.
    #[serde(rename = "_newRecord", default, skip_serializing_if = "is_false")]
    pub new_record: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Per-field metadata delivered alongside an employee detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMeta {
    pub name: String,
    pub property: String,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_type: Option<String>,
    /// Option value to display text, for select-style controls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
}

/// Response of `/employee/get/{id}`: the record plus its column metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeDetail {
    #[serde(default)]
    pub meta: Vec<ColumnMeta>,
    pub data: Employee,
}

impl EmployeeDetail {
    /// Metadata for the field bound to `property`, if the service sent any.
    pub fn column(&self, property: &str) -> Option<&ColumnMeta> {
        self.meta.iter().find(|meta| meta.property == property)
    }
}
