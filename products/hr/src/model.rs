use entity::employee;
use serde::{Deserialize, Serialize};

/// A validated employee record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: Option<i64>,
    pub name: String,
    pub salary: i32,
    pub department: String,
}

impl Employee {
    pub fn new(name: impl Into<String>, salary: i32, department: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            salary,
            department: department.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<employee::Model> for Employee {
    fn from(model: employee::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            salary: model.salary,
            department: model.department,
        }
    }
}

/// Request body for create and update. Every field is optional so that
/// missing keys surface as violations rather than parse failures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EmployeePayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub department: Option<String>,
}
