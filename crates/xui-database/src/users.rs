//! User accessors.

use crate::error::StoreError;
use crate::model::User;
use crate::queries;
use crate::store::Store;

impl Store {
    pub async fn count_users(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar(queries::COUNT_USERS)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, StoreError> {
        sqlx::query_as(queries::SELECT_USER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<User, StoreError> {
        sqlx::query_as(queries::SELECT_USER_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Insert a user. Fails with [`StoreError::Conflict`] on a taken username.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, StoreError> {
        sqlx::query_as(queries::INSERT_USER)
            .bind(username)
            .bind(password)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::write)
    }

    pub async fn update_user_credentials(
        &self,
        id: i64,
        username: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(queries::UPDATE_USER)
            .bind(username)
            .bind(password)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::write)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
