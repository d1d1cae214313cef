mod common;

use std::sync::Arc;

use serde_json::json;

use mirage_commons::Selector;
use mirage_link::MirageClient;

use common::{fixture_client, person_record, schema, FakeTransport};

#[tokio::test]
async fn navigates_from_finder_through_both_association_kinds() {
    let (_, client) = fixture_client();
    let car = &client.find_by("Car", "brand", "Mercedes 300").await.unwrap()[0];

    let owner = car.singular("owner", &client).await.unwrap().unwrap();
    assert_eq!(owner.kind(), "Person");
    assert_eq!(owner.field("name"), Some(&json!("Hans")));

    let drivers = car.plural("drivers").unwrap();
    assert_eq!(drivers.size(), 2);
    let second = drivers.at(1, &client).await.unwrap().unwrap();
    assert_eq!(second.field("name"), Some(&json!("Greta")));
}

#[tokio::test]
async fn singular_association_resolves_at_most_once() {
    let (transport, client) = fixture_client();
    let car = client.find("Car", 1).await.unwrap();

    for _ in 0..3 {
        let owner = car.singular("owner", &client).await.unwrap().unwrap();
        assert_eq!(owner.id(), 1);
    }
    assert_eq!(transport.hits("/people/1"), 1);
}

#[tokio::test]
async fn null_singular_association_is_none_without_a_request() {
    let transport = Arc::new(
        FakeTransport::new().route("/metadata", 200, schema()).route(
            "/cars/2",
            200,
            json!({
                "id": 2,
                "type": "Car",
                "brand": "Trabant",
                "wheels": 4,
                "owner": null,
                "drivers": {"count": 0}
            }),
        ),
    );
    let client = MirageClient::builder()
        .transport(transport.clone())
        .build()
        .unwrap();

    let car = client.find("Car", 2).await.unwrap();
    let before = transport.total_hits();
    assert!(car.singular("owner", &client).await.unwrap().is_none());
    assert_eq!(transport.total_hits(), before);
}

#[tokio::test]
async fn collection_element_access_is_cached_per_index() {
    let (transport, client) = fixture_client();
    let car = client.find("Car", 1).await.unwrap();
    let drivers = car.plural("drivers").unwrap();

    let first = drivers.at(0, &client).await.unwrap().unwrap();
    let again = drivers.at(0, &client).await.unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(transport.hits("/cars/1/drivers/0"), 1);
}

#[tokio::test]
async fn missing_collection_element_is_none_and_cached() {
    let (transport, client) = fixture_client();
    let car = client.find("Car", 1).await.unwrap();
    let drivers = car.plural("drivers").unwrap();

    assert!(drivers.at(5, &client).await.unwrap().is_none());
    assert!(drivers.at(5, &client).await.unwrap().is_none());
    assert_eq!(transport.hits("/cars/1/drivers/5"), 1);
}

#[tokio::test]
async fn slice_issues_one_batch_request_and_seeds_the_cache() {
    let (transport, client) = fixture_client();
    let car = client.find("Car", 1).await.unwrap();
    let drivers = car.plural("drivers").unwrap();

    let selector = Selector::range(0, 1).unwrap();
    let batch = drivers.slice(&selector, &client).await.unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(transport.hits("/cars/1/drivers/0..1"), 1);

    // Seeded per index, so element access needs no further requests.
    let first = drivers.at(0, &client).await.unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &batch[0]));
    assert_eq!(transport.hits("/cars/1/drivers/0"), 0);
    assert_eq!(transport.hits("/cars/1/drivers/1"), 0);
}

#[tokio::test]
async fn list_selector_preserves_request_order() {
    let (_, client) = fixture_client();
    let car = client.find("Car", 1).await.unwrap();
    let drivers = car.plural("drivers").unwrap();

    let selector: Selector = "1,0".parse().unwrap();
    let batch = drivers.slice(&selector, &client).await.unwrap();
    let names: Vec<_> = batch.iter().map(|p| p.field("name").cloned()).collect();
    assert_eq!(names, vec![Some(json!("Greta")), Some(json!("Hans"))]);
}

#[tokio::test]
async fn first_last_and_to_vec_cover_the_declared_size() {
    let (transport, client) = fixture_client();
    let car = client.find("Car", 1).await.unwrap();
    let drivers = car.plural("drivers").unwrap();

    let all = drivers.to_vec(&client).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(transport.hits("/cars/1/drivers/0..1"), 1);

    let first = drivers.first(&client).await.unwrap().unwrap();
    let last = drivers.last(&client).await.unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &all[0]));
    assert!(Arc::ptr_eq(&last, &all[1]));
}

#[tokio::test]
async fn empty_collection_yields_nothing_without_requests() {
    let transport = Arc::new(
        FakeTransport::new().route("/metadata", 200, schema()).route(
            "/cars/2",
            200,
            json!({
                "id": 2,
                "type": "Car",
                "brand": "Trabant",
                "wheels": 4,
                "owner": null,
                "drivers": {"count": 0}
            }),
        ),
    );
    let client = MirageClient::builder()
        .transport(transport.clone())
        .build()
        .unwrap();

    let car = client.find("Car", 2).await.unwrap();
    let drivers = car.plural("drivers").unwrap();
    assert!(drivers.is_empty());

    let before = transport.total_hits();
    assert!(drivers.to_vec(&client).await.unwrap().is_empty());
    assert!(drivers.first(&client).await.unwrap().is_none());
    assert!(drivers.last(&client).await.unwrap().is_none());
    assert_eq!(transport.total_hits(), before);
}

#[tokio::test]
async fn identical_records_share_one_proxy_instance() {
    let (_, client) = fixture_client();

    let direct = client.find("Person", 1).await.unwrap();
    let car = client.find("Car", 1).await.unwrap();
    let via_owner = car.singular("owner", &client).await.unwrap().unwrap();
    let via_drivers = car
        .plural("drivers")
        .unwrap()
        .at(0, &client)
        .await
        .unwrap()
        .unwrap();

    assert!(Arc::ptr_eq(&direct, &via_owner));
    assert!(Arc::ptr_eq(&direct, &via_drivers));
}

#[tokio::test]
async fn disabled_cache_builds_fresh_proxies() {
    let transport = Arc::new(
        FakeTransport::new()
            .route("/metadata", 200, schema())
            .route("/people/1", 200, person_record(1, "Hans", 60)),
    );
    let client = MirageClient::builder()
        .transport(transport)
        .without_cache()
        .build()
        .unwrap();

    let one = client.find("Person", 1).await.unwrap();
    let two = client.find("Person", 1).await.unwrap();
    assert!(!Arc::ptr_eq(&one, &two));
    assert_eq!(one.id(), two.id());
}
