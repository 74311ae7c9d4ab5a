use async_trait::async_trait;
use entity::employee;
use platform_api::ApiError;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryOrder, Set, Statement,
};
use thiserror::Error;
use tracing::debug;

use crate::Employee;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error")]
    Db(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        ApiError::internal(anyhow::Error::new(value))
    }
}

/// CRUD primitives keyed by employee id.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Employee>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>>;

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool>;

    /// Insert when `employee.id` is absent, otherwise replace the stored row.
    /// Replacing a row that no longer exists leaves the table untouched.
    async fn save(&self, employee: Employee) -> StoreResult<Employee>;

    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    async fn ping(&self) -> StoreResult<()>;
}

#[derive(Clone, Debug)]
pub struct SeaOrmEmployeeStore {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeStore for SeaOrmEmployeeStore {
    async fn find_all(&self) -> StoreResult<Vec<Employee>> {
        let rows = employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>> {
        let row = employee::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Employee::from))
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let count = employee::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn save(&self, employee: Employee) -> StoreResult<Employee> {
        let mut model = employee::ActiveModel {
            id: NotSet,
            name: Set(employee.name.clone()),
            salary: Set(employee.salary),
            department: Set(employee.department.clone()),
        };
        let stored = match employee.id {
            None => model.insert(&self.db).await?,
            Some(id) => {
                model.id = Set(id);
                match model.update(&self.db).await {
                    Ok(row) => row,
                    Err(DbErr::RecordNotUpdated) => {
                        debug!(id, "employee row gone, replace skipped");
                        return Ok(employee);
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        };
        Ok(stored.into())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        employee::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn store() -> SeaOrmEmployeeStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmEmployeeStore::new(db)
    }

    #[tokio::test]
    async fn insert_assigns_ids_in_order() {
        let store = store().await;
        assert!(store.find_all().await.unwrap().is_empty());

        let foo = store.save(Employee::new("Foo", 1, "it")).await.unwrap();
        let bar = store.save(Employee::new("Bar", 2, "it")).await.unwrap();
        let (Some(foo_id), Some(bar_id)) = (foo.id, bar.id) else {
            panic!("ids were not assigned");
        };
        assert_ne!(foo_id, bar_id);

        let names: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Foo", "Bar"]);
    }

    #[tokio::test]
    async fn save_with_id_replaces_the_row() {
        let store = store().await;
        let stored = store.save(Employee::new("Foo", 1, "it")).await.unwrap();
        let id = stored.id.unwrap();

        store
            .save(Employee::new("Bar", 1000, "hr").with_id(id))
            .await
            .unwrap();

        let reloaded = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(reloaded, Employee::new("Bar", 1000, "hr").with_id(id));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_changes_nothing() {
        let store = store().await;
        let ghost = Employee::new("Bar", 1, "hr").with_id(999);

        let returned = store.save(ghost.clone()).await.unwrap();
        assert_eq!(returned, ghost);
        assert!(!store.exists_by_id(999).await.unwrap());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = store().await;
        let id = store
            .save(Employee::new("Foo", 1, "it"))
            .await
            .unwrap()
            .id
            .unwrap();
        assert!(store.exists_by_id(id).await.unwrap());

        store.delete_by_id(id).await.unwrap();
        assert!(!store.exists_by_id(id).await.unwrap());
        assert!(store.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ping_succeeds_on_live_connection() {
        store().await.ping().await.unwrap();
    }
}
