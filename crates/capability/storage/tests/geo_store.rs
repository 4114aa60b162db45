use domain::{Coordinate, GeofenceSpec, StoreAddress, TrackedObject};
use orbit_storage::{GeoCommand, GeoStore, InMemoryGeoStore, StorageError, Tile38Store};
use std::time::Duration;

fn sample_fence() -> GeofenceSpec {
    GeofenceSpec::new(
        TrackedObject::default(),
        Coordinate::new("33.4484", "112.0740"),
        "5000",
    )
}

#[tokio::test]
async fn set_point_is_idempotent() {
    let once = InMemoryGeoStore::new();
    let twice = InMemoryGeoStore::new();
    let position = Coordinate::new("-12.3456", "98.7654");

    once.set_point("earth-orbit", "iss", &position)
        .await
        .expect("write");
    twice
        .set_point("earth-orbit", "iss", &position)
        .await
        .expect("write");
    twice
        .set_point("earth-orbit", "iss", &position)
        .await
        .expect("write");

    assert_eq!(once.len(), 1);
    assert_eq!(twice.len(), 1);
    assert_eq!(
        once.point("earth-orbit", "iss"),
        twice.point("earth-orbit", "iss")
    );
}

#[tokio::test]
async fn set_point_overwrites_previous() {
    let store = InMemoryGeoStore::new();
    store
        .set_point("earth-orbit", "iss", &Coordinate::new("1", "2"))
        .await
        .expect("write");
    store
        .set_point("earth-orbit", "iss", &Coordinate::new("3", "4"))
        .await
        .expect("write");
    assert_eq!(
        store.point("earth-orbit", "iss"),
        Some(Coordinate::new("3", "4"))
    );
}

#[tokio::test]
async fn register_geofence_records_command() {
    let store = InMemoryGeoStore::new();
    let fence = sample_fence();
    store.register_geofence(&fence).await.expect("fence");

    assert_eq!(store.fences(), vec![fence.clone()]);
    assert_eq!(store.commands(), vec![GeoCommand::nearby_fence(&fence)]);
    assert!(store.is_empty());
}

#[tokio::test]
async fn injected_failures_are_reported() {
    let store = InMemoryGeoStore::new();
    store.fail_geofence();
    let err = store.register_geofence(&sample_fence()).await.unwrap_err();
    assert!(matches!(err, StorageError::Command(_)));
    assert!(store.fences().is_empty());

    store.fail_next_set_points(1);
    let position = Coordinate::new("1", "2");
    assert!(store.set_point("earth-orbit", "iss", &position).await.is_err());
    assert!(store.point("earth-orbit", "iss").is_none());
    store
        .set_point("earth-orbit", "iss", &position)
        .await
        .expect("second write");
    assert_eq!(store.point("earth-orbit", "iss"), Some(position));
}

#[tokio::test]
async fn tile38_reports_unreachable_store() {
    let address = StoreAddress::new("127.0.0.1", 1);
    let result = Tile38Store::connect(&address, Duration::from_secs(2)).await;
    assert!(matches!(result, Err(StorageError::Connect(_))));
}
