//! Gateway behaviour against the in-memory document store

mod common;

use common::InMemoryStore;
use cosmos_gateway::core::Gateway;
use cosmos_gateway::domain::{
    GatewayError, Offer, PartitionKeySpec, PartitionKeyValue, QuerySpec, ScaleOutcome,
};
use serde_json::json;
use std::sync::Arc;
use test_case::test_case;

const DB: &str = "FamilyDatabase";
const CONTAINER: &str = "FamilyContainer";

fn gateway_with(store: Arc<InMemoryStore>) -> Gateway {
    Gateway::new(store, PartitionKeySpec::hash(["/partitionKey"]))
}

async fn setup() -> (Arc<InMemoryStore>, Gateway) {
    let store = Arc::new(InMemoryStore::new());
    let gateway = gateway_with(store.clone());
    gateway.create_database(DB).await.unwrap();
    gateway.create_container(DB, CONTAINER).await.unwrap();
    (store, gateway)
}

fn usa() -> PartitionKeyValue {
    PartitionKeyValue::from("USA")
}

#[tokio::test]
async fn test_create_database_is_idempotent() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = gateway_with(store);

    let first = gateway.create_database(DB).await.unwrap();
    let second = gateway.create_database(DB).await.unwrap();

    assert_eq!(first.id, DB);
    assert_eq!(first, second);
    assert_eq!(gateway.read_database(DB).await.unwrap().id, DB);
}

#[tokio::test]
async fn test_read_missing_database_is_not_found() {
    let gateway = gateway_with(Arc::new(InMemoryStore::new()));

    let err = gateway.read_database("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_read_container_returns_creation_partition_key() {
    let (_, gateway) = setup().await;

    let container = gateway.read_container(DB, CONTAINER).await.unwrap();
    assert_eq!(container.id, CONTAINER);
    assert_eq!(container.partition_key, PartitionKeySpec::hash(["/partitionKey"]));

    // A second create leaves the existing container untouched
    let again = gateway.create_container(DB, CONTAINER).await.unwrap();
    assert_eq!(again, container);
}

#[tokio::test]
async fn test_scale_container_replaces_matching_offer_only() {
    let (store, gateway) = setup().await;
    store.add_offer(Offer {
        id: "unrelated".to_string(),
        offer_resource_id: "rid-other".to_string(),
        throughput: Some(1000),
    });

    let outcome = gateway.scale_container(DB, CONTAINER, 500).await.unwrap();

    let container = gateway.read_container(DB, CONTAINER).await.unwrap();
    let offers = store.offers();
    let matching = offers
        .iter()
        .find(|o| Some(&o.offer_resource_id) == container.resource_id.as_ref())
        .unwrap();

    assert_eq!(
        outcome,
        ScaleOutcome::Scaled {
            offer_id: matching.id.clone(),
            throughput: 500
        }
    );
    assert_eq!(matching.throughput, Some(500));

    let unrelated = offers.iter().find(|o| o.id == "unrelated").unwrap();
    assert_eq!(unrelated.throughput, Some(1000));
    assert_eq!(store.offer_replacements(), 1);
}

#[tokio::test]
async fn test_scale_container_without_matching_offer_is_noop() {
    let store = Arc::new(InMemoryStore::serverless());
    let gateway = gateway_with(store.clone());
    gateway.create_database(DB).await.unwrap();
    gateway.create_container(DB, CONTAINER).await.unwrap();
    store.add_offer(Offer {
        id: "unrelated".to_string(),
        offer_resource_id: "rid-other".to_string(),
        throughput: Some(1000),
    });

    let outcome = gateway.scale_container(DB, CONTAINER, 500).await.unwrap();

    assert_eq!(outcome, ScaleOutcome::NoMatchingOffer);
    assert_eq!(store.offer_replacements(), 0);
    assert_eq!(store.offers()[0].throughput, Some(1000));
}

#[tokio::test]
async fn test_scale_container_swallows_bad_request() {
    let (store, gateway) = setup().await;
    store.fail_offer_replace_with(400);

    let outcome = gateway.scale_container(DB, CONTAINER, 500).await.unwrap();

    assert!(matches!(outcome, ScaleOutcome::Rejected { .. }));
    assert_eq!(store.offer_replacements(), 0);
}

#[tokio::test]
async fn test_scale_container_propagates_other_errors() {
    let (store, gateway) = setup().await;
    store.fail_offer_replace_with(429);

    let err = gateway.scale_container(DB, CONTAINER, 500).await.unwrap_err();
    assert_eq!(err.status(), Some(429));

    let missing = gateway.scale_container(DB, "missing", 500).await.unwrap_err();
    assert!(missing.is_not_found());
}

#[test_case(450 ; "not a multiple of 100")]
#[test_case(1_500_000 ; "above the usual account limit")]
#[tokio::test]
async fn test_scale_container_leaves_throughput_checks_to_the_service(throughput: u32) {
    let (store, gateway) = setup().await;
    store.fail_offer_replace_with(400);

    let outcome = gateway
        .scale_container(DB, CONTAINER, throughput)
        .await
        .unwrap();

    assert!(matches!(outcome, ScaleOutcome::Rejected { .. }));
    assert_eq!(store.offer_replacements(), 0);
}

#[test_case(300 ; "below minimum")]
#[test_case(450 ; "not a multiple of 100")]
#[test_case(1_500_000 ; "above the usual account limit")]
#[tokio::test]
async fn test_scale_container_without_offer_ignores_throughput_value(throughput: u32) {
    let store = Arc::new(InMemoryStore::serverless());
    let gateway = gateway_with(store.clone());
    gateway.create_database(DB).await.unwrap();
    gateway.create_container(DB, CONTAINER).await.unwrap();

    let outcome = gateway
        .scale_container(DB, CONTAINER, throughput)
        .await
        .unwrap();

    assert_eq!(outcome, ScaleOutcome::NoMatchingOffer);
    assert!(store.offers().is_empty());
}

#[tokio::test]
async fn test_scale_container_propagates_bad_request_reading_container() {
    let (store, gateway) = setup().await;
    store.fail_container_read_with(400);

    let err = gateway.scale_container(DB, CONTAINER, 500).await.unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(store.offer_replacements(), 0);
}

#[tokio::test]
async fn test_create_item_then_read_item() {
    let (_, gateway) = setup().await;
    let item = json!({
        "id": "Andersen.1",
        "partitionKey": "USA",
        "lastName": "Andersen",
        "children": [{"firstName": "Henriette", "grade": 5}]
    });

    let created = gateway.create_item(DB, CONTAINER, &item).await.unwrap();
    let read = gateway
        .read_item(DB, CONTAINER, "Andersen.1", &usa())
        .await
        .unwrap();

    for (field, value) in item.as_object().unwrap() {
        assert_eq!(&read[field], value, "field {field}");
    }
    assert_eq!(created, read);
}

#[tokio::test]
async fn test_create_item_upserts_existing() {
    let (store, gateway) = setup().await;

    gateway
        .create_item(DB, CONTAINER, &json!({"id": "1", "partitionKey": "USA", "v": 1}))
        .await
        .unwrap();
    let updated = gateway
        .create_item(DB, CONTAINER, &json!({"id": "1", "partitionKey": "USA", "v": 2}))
        .await
        .unwrap();

    assert_eq!(updated["v"], 2);
    assert_eq!(store.item_count(DB, CONTAINER), 1);
}

#[test_case(json!({"partitionKey": "USA"}) ; "missing id")]
#[test_case(json!({"id": "1"}) ; "missing partition key")]
#[test_case(json!({"id": "1", "partitionKey": {"nested": true}}) ; "non scalar partition key")]
#[tokio::test]
async fn test_create_item_rejects_unaddressable_documents(item: serde_json::Value) {
    let (store, gateway) = setup().await;

    let err = gateway.create_item(DB, CONTAINER, &item).await.unwrap_err();

    assert!(matches!(err, GatewayError::Validation(_)));
    assert_eq!(store.item_count(DB, CONTAINER), 0);
}

#[tokio::test]
async fn test_read_missing_item_is_not_found() {
    let (_, gateway) = setup().await;

    let err = gateway
        .read_item(DB, CONTAINER, "nope", &usa())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_read_all_items() {
    let (_, gateway) = setup().await;
    assert!(gateway.read_all_items(DB, CONTAINER).await.unwrap().is_empty());

    for id in ["1", "2", "3"] {
        gateway
            .create_item(DB, CONTAINER, &json!({"id": id, "partitionKey": "USA"}))
            .await
            .unwrap();
    }

    assert_eq!(gateway.read_all_items(DB, CONTAINER).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_parameterized_query_returns_matching_subset() {
    let (_, gateway) = setup().await;
    for (id, country) in [("1", "USA"), ("2", "Canada"), ("3", "USA"), ("4", "Mexico")] {
        gateway
            .create_item(DB, CONTAINER, &json!({"id": id, "partitionKey": country}))
            .await
            .unwrap();
    }

    let query = QuerySpec::new("SELECT * FROM root r WHERE r.partitionKey = @pk")
        .with_parameter("@pk", "USA")
        .unwrap();
    let results = gateway.query_items(DB, CONTAINER, &query).await.unwrap();

    let mut ids: Vec<_> = results
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn test_query_scoped_to_partition() {
    let (_, gateway) = setup().await;
    for (id, country) in [("1", "USA"), ("2", "Canada")] {
        gateway
            .create_item(
                DB,
                CONTAINER,
                &json!({"id": id, "partitionKey": country, "kind": "family"}),
            )
            .await
            .unwrap();
    }

    let query = QuerySpec::new("SELECT * FROM root r WHERE r.kind = 'family'")
        .with_partition_key("Canada");
    let results = gateway.query_items(DB, CONTAINER, &query).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], "2");
}

#[tokio::test]
async fn test_delete_items_by_query_deletes_every_match() {
    let (store, gateway) = setup().await;
    for (id, last_name) in [("1", "Smith"), ("2", "Smith"), ("3", "Jones"), ("4", "Smith")] {
        gateway
            .create_item(
                DB,
                CONTAINER,
                &json!({"id": id, "partitionKey": "USA", "lastName": last_name}),
            )
            .await
            .unwrap();
    }

    let query = QuerySpec::new("SELECT * FROM root r WHERE r.lastName = @name")
        .with_parameter("@name", "Smith")
        .unwrap();
    let deleted = gateway
        .delete_items_by_query(DB, CONTAINER, "partitionKey", &query)
        .await
        .unwrap();

    assert_eq!(deleted, 3);
    assert_eq!(store.delete_calls(), 3);
    assert!(gateway.query_items(DB, CONTAINER, &query).await.unwrap().is_empty());
    assert_eq!(store.item_count(DB, CONTAINER), 1);
}

#[tokio::test]
async fn test_delete_items_by_query_with_no_matches() {
    let (store, gateway) = setup().await;

    let query = QuerySpec::new("SELECT * FROM root r WHERE r.lastName = 'Nobody'");
    let deleted = gateway
        .delete_items_by_query(DB, CONTAINER, "partitionKey", &query)
        .await
        .unwrap();

    assert_eq!(deleted, 0);
    assert_eq!(store.delete_calls(), 0);
}

#[tokio::test]
async fn test_delete_items_by_query_fails_when_any_delete_fails() {
    let (store, gateway) = setup().await;
    for id in ["1", "2", "3"] {
        gateway
            .create_item(DB, CONTAINER, &json!({"id": id, "partitionKey": "USA"}))
            .await
            .unwrap();
    }
    store.fail_delete_of("2");

    let query = QuerySpec::new("SELECT * FROM root r WHERE r.partitionKey = 'USA'");
    let err = gateway
        .delete_items_by_query(DB, CONTAINER, "partitionKey", &query)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("Delete by query over 3 match(es) stopped"));
    // No rollback: the item whose delete failed is still there
    let remaining = gateway.read_all_items(DB, CONTAINER).await.unwrap();
    assert!(remaining.iter().any(|item| item["id"] == "2"));
}

#[tokio::test]
async fn test_delete_items_by_query_requires_key_field_on_every_match() {
    let (store, gateway) = setup().await;
    gateway
        .create_item(DB, CONTAINER, &json!({"id": "1", "partitionKey": "USA"}))
        .await
        .unwrap();

    let query = QuerySpec::new("SELECT * FROM root r");
    let err = gateway
        .delete_items_by_query(DB, CONTAINER, "lastName", &query)
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Validation(_)));
    assert_eq!(store.delete_calls(), 0);
}

#[tokio::test]
async fn test_replace_item_then_read_item() {
    let (_, gateway) = setup().await;
    let mut item = json!({
        "id": "Andersen.1",
        "partitionKey": "USA",
        "children": [{"grade": 5}]
    });
    gateway.create_item(DB, CONTAINER, &item).await.unwrap();

    item["children"][0]["grade"] = json!(6);
    let replaced = gateway
        .replace_item(DB, CONTAINER, &item, &usa())
        .await
        .unwrap();
    let read = gateway
        .read_item(DB, CONTAINER, "Andersen.1", &usa())
        .await
        .unwrap();

    assert_eq!(replaced, item);
    assert_eq!(read, item);
}

#[tokio::test]
async fn test_replace_missing_item_fails() {
    let (_, gateway) = setup().await;

    let err = gateway
        .replace_item(DB, CONTAINER, &json!({"id": "ghost", "partitionKey": "USA"}), &usa())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let no_id = gateway
        .replace_item(DB, CONTAINER, &json!({"partitionKey": "USA"}), &usa())
        .await
        .unwrap_err();
    assert!(matches!(no_id, GatewayError::Validation(_)));
}

#[tokio::test]
async fn test_delete_item() {
    let (_, gateway) = setup().await;
    let item = json!({"id": "1", "partitionKey": "USA"});
    gateway.create_item(DB, CONTAINER, &item).await.unwrap();

    gateway.delete_item(DB, CONTAINER, &item).await.unwrap();

    let err = gateway.delete_item(DB, CONTAINER, &item).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_nested_partition_key_path() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = Gateway::new(store, PartitionKeySpec::hash(["/address/country"]));
    gateway.create_database(DB).await.unwrap();
    gateway.create_container(DB, CONTAINER).await.unwrap();

    let item = json!({"id": "1", "address": {"country": "NZ"}});
    gateway.create_item(DB, CONTAINER, &item).await.unwrap();

    let read = gateway
        .read_item(DB, CONTAINER, "1", &PartitionKeyValue::from("NZ"))
        .await
        .unwrap();
    assert_eq!(read, item);

    gateway.delete_item(DB, CONTAINER, &item).await.unwrap();
    assert!(gateway.read_all_items(DB, CONTAINER).await.unwrap().is_empty());
}
