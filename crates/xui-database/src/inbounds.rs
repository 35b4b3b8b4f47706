//! Inbound accessors.

use tracing::debug;

use crate::error::StoreError;
use crate::model::{Inbound, InboundConfig, NewInbound};
use crate::queries;
use crate::store::Store;

impl Store {
    pub async fn list_inbounds(&self) -> Result<Vec<Inbound>, StoreError> {
        let inbounds = sqlx::query_as(queries::SELECT_INBOUNDS)
            .fetch_all(&self.pool)
            .await?;
        Ok(inbounds)
    }

    pub async fn get_inbound(&self, id: i64) -> Result<Inbound, StoreError> {
        sqlx::query_as(queries::SELECT_INBOUND_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    pub async fn get_inbound_by_tag(&self, tag: &str) -> Result<Inbound, StoreError> {
        sqlx::query_as(queries::SELECT_INBOUND_BY_TAG)
            .bind(tag)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Insert an inbound. Fails with [`StoreError::Conflict`] on a taken tag.
    pub async fn create_inbound(&self, new: &NewInbound) -> Result<Inbound, StoreError> {
        let c = &new.config;
        sqlx::query_as(queries::INSERT_INBOUND)
            .bind(new.user_id)
            .bind(c.total)
            .bind(&c.remark)
            .bind(c.enable)
            .bind(c.expiry_time)
            .bind(&c.listen)
            .bind(c.port)
            .bind(&c.protocol)
            .bind(&c.settings)
            .bind(&c.stream_settings)
            .bind(&new.tag)
            .bind(&c.sniffing)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::write)
    }

    /// Replace the configuration columns of inbound `id`.
    ///
    /// Traffic counters are left alone, so this may run concurrently with
    /// [`add_inbound_traffic`](Self::add_inbound_traffic).
    pub async fn update_inbound_config(
        &self,
        id: i64,
        config: &InboundConfig,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(queries::UPDATE_INBOUND_CONFIG)
            .bind(config.total)
            .bind(&config.remark)
            .bind(config.enable)
            .bind(config.expiry_time)
            .bind(&config.listen)
            .bind(config.port)
            .bind(&config.protocol)
            .bind(&config.settings)
            .bind(&config.stream_settings)
            .bind(&config.sniffing)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::write)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub async fn delete_inbound(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(queries::DELETE_INBOUND)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Atomically add `up`/`down` bytes to the inbound tagged `tag`.
    ///
    /// Returns [`StoreError::NotFound`] when no inbound carries the tag and
    /// [`StoreError::CounterOverflow`] when either sum would pass `i64::MAX`;
    /// the row is unchanged in both cases.
    pub async fn add_inbound_traffic(
        &self,
        tag: &str,
        up: i64,
        down: i64,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(queries::ADD_INBOUND_TRAFFIC)
            .bind(up)
            .bind(down)
            .bind(tag)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            let exists: i64 = sqlx::query_scalar(queries::INBOUND_TAG_EXISTS)
                .bind(tag)
                .fetch_one(&self.pool)
                .await?;
            return Err(if exists != 0 {
                StoreError::CounterOverflow {
                    tag: tag.to_string(),
                }
            } else {
                StoreError::NotFound
            });
        }
        debug!(tag, up, down, "inbound traffic added");
        Ok(())
    }

    /// Zero the counters of inbound `id`.
    pub async fn reset_inbound_traffic(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(queries::RESET_INBOUND_TRAFFIC)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
