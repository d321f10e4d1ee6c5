mod common;

use common::create_test_pool;

use relay_core::{ChangeKind, MeasurementValue, SensorReading};
use relay_db::ReadingRepository;

use std::collections::BTreeMap;

use googletest::prelude::*;

fn sample_reading(device_id: &str, timestamp: i64) -> SensorReading {
    let mut fields = BTreeMap::new();
    fields.insert("temperature".to_string(), MeasurementValue::Float(23.5));
    fields.insert("humidity".to_string(), MeasurementValue::Integer(60));
    SensorReading::new(device_id, timestamp, fields)
}

#[tokio::test]
async fn given_new_reading_when_recorded_then_change_kind_is_insert() {
    // Given: An empty store
    let pool = create_test_pool().await;
    let repo = ReadingRepository::new(pool);

    // When: Recording a reading for a fresh (device, timestamp) key
    let kind = repo.record(&sample_reading("arduino_remote", 1000)).await.unwrap();

    // Then: The write is an insert and the row is durable
    assert_that!(kind, eq(ChangeKind::Insert));
    let stored = repo.find("arduino_remote", 1000).await.unwrap().unwrap();
    assert_that!(
        stored.fields.get("temperature"),
        some(eq(&MeasurementValue::Float(23.5)))
    );
    assert_that!(
        stored.fields.get("humidity"),
        some(eq(&MeasurementValue::Integer(60)))
    );
}

#[tokio::test]
async fn given_existing_reading_when_recorded_again_then_change_kind_is_modify() {
    // Given: A stored reading
    let pool = create_test_pool().await;
    let repo = ReadingRepository::new(pool);
    repo.record(&sample_reading("arduino_remote", 1000)).await.unwrap();

    // When: Recording the same key with different measurements
    let mut fields = BTreeMap::new();
    fields.insert("temperature".to_string(), MeasurementValue::Float(24.0));
    let kind = repo
        .record(&SensorReading::new("arduino_remote", 1000, fields))
        .await
        .unwrap();

    // Then: The write is a modify and the fields are replaced
    assert_that!(kind, eq(ChangeKind::Modify));
    let stored = repo.find("arduino_remote", 1000).await.unwrap().unwrap();
    assert_that!(
        stored.fields.get("temperature"),
        some(eq(&MeasurementValue::Float(24.0)))
    );
    assert_that!(stored.fields.get("humidity"), none());
}

#[tokio::test]
async fn given_existing_reading_when_recorded_at_new_timestamp_then_insert_again() {
    // Given: A stored reading
    let pool = create_test_pool().await;
    let repo = ReadingRepository::new(pool);
    repo.record(&sample_reading("arduino_remote", 1000)).await.unwrap();

    // When: Recording the same device at a later timestamp
    let kind = repo.record(&sample_reading("arduino_remote", 2000)).await.unwrap();

    // Then: A new row, a new insert
    assert_that!(kind, eq(ChangeKind::Insert));
}

#[tokio::test]
async fn given_empty_store_when_finding_unknown_reading_then_returns_none() {
    let pool = create_test_pool().await;
    let repo = ReadingRepository::new(pool);

    let result = repo.find("no-such-device", 0).await.unwrap();

    assert_that!(result, none());
}
