//! Setting accessors.

use crate::error::StoreError;
use crate::model::Setting;
use crate::queries;
use crate::store::Store;

impl Store {
    pub async fn list_settings(&self) -> Result<Vec<Setting>, StoreError> {
        let settings = sqlx::query_as(queries::SELECT_SETTINGS)
            .fetch_all(&self.pool)
            .await?;
        Ok(settings)
    }

    pub async fn get_setting(&self, key: &str) -> Result<String, StoreError> {
        sqlx::query_scalar(queries::SELECT_SETTING_VALUE)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Insert or replace the value stored under `key`.
    pub async fn set_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(queries::UPSERT_SETTING)
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(StoreError::write)?;
        Ok(())
    }

    pub async fn delete_setting(&self, key: &str) -> Result<(), StoreError> {
        let result = sqlx::query(queries::DELETE_SETTING)
            .bind(key)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
