use std::sync::Arc;

use platform_api::{ApiError, ApiResult};
use tracing::{debug, info, instrument};

use crate::{
    Employee, EmployeePayload, EmployeeStore, RESOURCE,
    validation::{Mode, validate},
};

/// One handler per employee endpoint. Stateless apart from the store handle.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    #[instrument(name = "employees.list", skip_all)]
    pub async fn list(&self) -> ApiResult<Vec<Employee>> {
        Ok(self.store.find_all().await?)
    }

    #[instrument(name = "employees.get", skip(self))]
    pub async fn get(&self, id: i64) -> ApiResult<Employee> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(RESOURCE, id))
    }

    #[instrument(name = "employees.create", skip_all)]
    pub async fn create(&self, payload: EmployeePayload) -> ApiResult<Employee> {
        let employee = validate(payload, Mode::Create).map_err(ApiError::ValidationFailed)?;
        let stored = self.store.save(employee).await?;
        info!(id = ?stored.id, "employee created");
        Ok(stored)
    }

    /// Replace the record at `id`. A missing record is left alone and the
    /// call still succeeds.
    #[instrument(name = "employees.update", skip(self, payload))]
    pub async fn update(&self, id: i64, payload: EmployeePayload) -> ApiResult<()> {
        let employee =
            validate(payload, Mode::Update { path_id: id }).map_err(ApiError::ValidationFailed)?;
        if !self.store.exists_by_id(id).await? {
            debug!("employee missing, update skipped");
            return Ok(());
        }
        self.store.save(employee).await?;
        info!("employee updated");
        Ok(())
    }

    #[instrument(name = "employees.delete", skip(self))]
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(ApiError::not_found(RESOURCE, id));
        }
        self.store.delete_by_id(id).await?;
        info!("employee deleted");
        Ok(())
    }

    pub async fn store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}
