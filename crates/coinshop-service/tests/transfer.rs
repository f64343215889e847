//! Coin transfer integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn transfer_moves_coins_between_accounts() {
    let harness = TestHarness::new().await;
    let alice = harness.register("alice").await;
    harness.register("bob").await;

    let response = harness
        .server
        .post("/api/sendCoin")
        .add_header("authorization", TestHarness::bearer(&alice))
        .json(&json!({"toUser": "bob", "amount": 250}))
        .await;

    response.assert_status_ok();
    assert_eq!(harness.balance_of("alice").await, 750);
    assert_eq!(harness.balance_of("bob").await, 1250);
}

#[tokio::test]
async fn insufficient_funds_is_402_and_moves_nothing() {
    let harness = TestHarness::new().await;
    let alice = harness.register("alice").await;
    harness.register("bob").await;
    harness.set_balance("alice", 10).await;

    let response = harness
        .server
        .post("/api/sendCoin")
        .add_header("authorization", TestHarness::bearer(&alice))
        .json(&json!({"toUser": "bob", "amount": 50}))
        .await;

    response.assert_status(axum::http::StatusCode::PAYMENT_REQUIRED);
    assert_eq!(harness.balance_of("alice").await, 10);
    assert_eq!(harness.balance_of("bob").await, 1000);
}

#[tokio::test]
async fn unknown_recipient_is_400_and_sender_keeps_coins() {
    let harness = TestHarness::new().await;
    let alice = harness.register("alice").await;

    let response = harness
        .server
        .post("/api/sendCoin")
        .add_header("authorization", TestHarness::bearer(&alice))
        .json(&json!({"toUser": "nobody", "amount": 50}))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_recipient");
    assert_eq!(harness.balance_of("alice").await, 1000);
}

#[tokio::test]
async fn self_transfer_is_rejected() {
    let harness = TestHarness::new().await;
    let alice = harness.register("alice").await;

    let response = harness
        .server
        .post("/api/sendCoin")
        .add_header("authorization", TestHarness::bearer(&alice))
        .json(&json!({"toUser": "alice", "amount": 10}))
        .await;

    response.assert_status_bad_request();
    assert_eq!(harness.balance_of("alice").await, 1000);
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let harness = TestHarness::new().await;
    let alice = harness.register("alice").await;
    harness.register("bob").await;

    for amount in [0, -5] {
        let response = harness
            .server
            .post("/api/sendCoin")
            .add_header("authorization", TestHarness::bearer(&alice))
            .json(&json!({"toUser": "bob", "amount": amount}))
            .await;
        response.assert_status_bad_request();
    }

    assert_eq!(harness.balance_of("alice").await, 1000);
    assert_eq!(harness.balance_of("bob").await, 1000);
}

#[tokio::test]
async fn transfers_show_up_in_both_histories() {
    let harness = TestHarness::new().await;
    let alice = harness.register("alice").await;
    let bob = harness.register("bob").await;

    harness
        .server
        .post("/api/sendCoin")
        .add_header("authorization", TestHarness::bearer(&alice))
        .json(&json!({"toUser": "bob", "amount": 30}))
        .await
        .assert_status_ok();

    let alice_info: serde_json::Value = harness
        .server
        .get("/api/info")
        .add_header("authorization", TestHarness::bearer(&alice))
        .await
        .json();
    assert_eq!(alice_info["coinHistory"]["sent"][0]["toUser"], "bob");
    assert_eq!(alice_info["coinHistory"]["sent"][0]["amount"], 30);

    let bob_info: serde_json::Value = harness
        .server
        .get("/api/info")
        .add_header("authorization", TestHarness::bearer(&bob))
        .await
        .json();
    assert_eq!(bob_info["coinHistory"]["received"][0]["fromUser"], "alice");
    assert_eq!(bob_info["coinHistory"]["received"][0]["amount"], 30);
}
