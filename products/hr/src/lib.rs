//! HR vertical slice: the employee resource.
//!
//! [`EmployeeService`] holds one handler per REST operation. It validates
//! request payloads with [`validation`], talks to an injected
//! [`EmployeeStore`], and reports failures as [`platform_api::ApiError`].

pub mod model;
pub mod service;
pub mod store;
pub mod validation;

pub use model::{Employee, EmployeePayload};
pub use service::EmployeeService;
pub use store::{EmployeeStore, SeaOrmEmployeeStore, StoreError, StoreResult};
pub use validation::Mode;

/// Resource name used in not-found messages and violation lookups.
pub const RESOURCE: &str = "employee";
