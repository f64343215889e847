//! Account info integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn fresh_account_info_shape() {
    let harness = TestHarness::new().await;
    let alice = harness.register("alice").await;

    let response = harness
        .server
        .get("/api/info")
        .add_header("authorization", TestHarness::bearer(&alice))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["coins"], 1000);
    assert!(body["inventory"].as_array().expect("inventory").is_empty());
    assert!(body["coinHistory"]["received"]
        .as_array()
        .expect("received")
        .is_empty());
    assert!(body["coinHistory"]["sent"]
        .as_array()
        .expect("sent")
        .is_empty());
}

#[tokio::test]
async fn info_is_read_only() {
    let harness = TestHarness::new().await;
    let alice = harness.register("alice").await;

    for _ in 0..3 {
        harness
            .server
            .get("/api/info")
            .add_header("authorization", TestHarness::bearer(&alice))
            .await
            .assert_status_ok();
    }

    assert_eq!(harness.balance_of("alice").await, 1000);
}

#[tokio::test]
async fn info_reflects_activity_in_order() {
    let harness = TestHarness::new().await;
    let alice = harness.register("alice").await;
    harness.register("bob").await;
    harness.register("carol").await;

    for (to, amount) in [("bob", 10), ("carol", 20), ("bob", 30)] {
        harness
            .server
            .post("/api/sendCoin")
            .add_header("authorization", TestHarness::bearer(&alice))
            .json(&json!({"toUser": to, "amount": amount}))
            .await
            .assert_status_ok();
    }

    let body: serde_json::Value = harness
        .server
        .get("/api/info")
        .add_header("authorization", TestHarness::bearer(&alice))
        .await
        .json();

    assert_eq!(body["coins"], 1000 - 10 - 20 - 30);
    let sent = body["coinHistory"]["sent"].as_array().expect("sent");
    assert_eq!(sent.len(), 3);
    // Insertion order, oldest first.
    assert_eq!(sent[0]["toUser"], "bob");
    assert_eq!(sent[0]["amount"], 10);
    assert_eq!(sent[1]["toUser"], "carol");
    assert_eq!(sent[2]["amount"], 30);
}

#[tokio::test]
async fn token_identifies_the_account() {
    let harness = TestHarness::new().await;
    harness.register("alice").await;
    let bob = harness.register("bob").await;
    harness.set_balance("bob", 42).await;

    let body: serde_json::Value = harness
        .server
        .get("/api/info")
        .add_header("authorization", TestHarness::bearer(&bob))
        .await
        .json();

    assert_eq!(body["coins"], 42);
}
