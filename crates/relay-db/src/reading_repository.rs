use crate::{DbError, Result as DbErrorResult};

use relay_core::{ChangeKind, MeasurementValue, SensorReading};

use std::collections::BTreeMap;

use sqlx::SqlitePool;

/// Durable store for sensor readings, keyed by (device_id, timestamp).
pub struct ReadingRepository {
    pool: SqlitePool,
}

impl ReadingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Write one reading and report whether it created a new row
    /// (`Insert`) or replaced an existing one (`Modify`). Only `Insert`
    /// writes are broadcast downstream.
    pub async fn record(&self, reading: &SensorReading) -> DbErrorResult<ChangeKind> {
        let fields_json = serde_json::to_string(&reading.fields)
            .map_err(|e| DbError::decode(format!("cannot encode measurement fields: {e}")))?;

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
                INSERT INTO sensor_readings (device_id, timestamp, fields)
                VALUES (?, ?, ?)
                ON CONFLICT(device_id, timestamp) DO NOTHING
            "#,
        )
        .bind(&reading.device_id)
        .bind(reading.timestamp)
        .bind(&fields_json)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let kind = if inserted == 1 {
            ChangeKind::Insert
        } else {
            sqlx::query(
                "UPDATE sensor_readings SET fields = ? WHERE device_id = ? AND timestamp = ?",
            )
            .bind(&fields_json)
            .bind(&reading.device_id)
            .bind(reading.timestamp)
            .execute(&mut *tx)
            .await?;

            ChangeKind::Modify
        };

        tx.commit().await?;

        Ok(kind)
    }

    pub async fn find(
        &self,
        device_id: &str,
        timestamp: i64,
    ) -> DbErrorResult<Option<SensorReading>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT fields FROM sensor_readings WHERE device_id = ? AND timestamp = ?",
        )
        .bind(device_id)
        .bind(timestamp)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(fields_json,)| {
            let fields: BTreeMap<String, MeasurementValue> = serde_json::from_str(&fields_json)
                .map_err(|e| {
                    DbError::decode(format!(
                        "invalid fields for reading {device_id}@{timestamp}: {e}"
                    ))
                })?;

            Ok(SensorReading::new(device_id, timestamp, fields))
        })
        .transpose()
    }
}

impl Clone for ReadingRepository {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}
