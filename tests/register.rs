use credstore::{
    core::user::{Source, UserRecord},
    store::local::UserStore as _,
    Error,
};
use http::StatusCode;
use serde_json::json;

mod common;

use common::{ann, store_with, Reply, ScriptedClient};

#[tokio::test]
async fn accepted_registration_is_replicated_locally() {
    let client = ScriptedClient::replying([Reply::Json(
        StatusCode::CREATED,
        json!({ "success": true, "message": "User registered successfully" }),
    )]);
    let (store, memory) = store_with(client.clone(), vec![]).await;

    let outcome = store.register(ann()).await.unwrap();

    assert_eq!(outcome.source, Source::Server);
    assert_eq!(outcome.message, "User registered successfully");

    // The accepted record is present locally exactly once.
    let records = memory.load().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].username, "ann");

    let (uri, body) = &client.requests()[0];
    assert_eq!(uri, "http://127.0.0.1:5000/api/register");
    assert_eq!(body["username"], "ann");
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["password"], "p");
}

#[tokio::test]
async fn remote_rejection_is_authoritative() {
    let client = ScriptedClient::replying([Reply::Json(
        StatusCode::BAD_REQUEST,
        json!({ "success": false, "message": "Username already taken" }),
    )]);
    let (store, memory) = store_with(client, vec![]).await;

    let err = store.register(ann()).await.unwrap_err();

    assert!(matches!(err, Error::RemoteRejected { .. }));
    assert_eq!(err.to_string(), "Username already taken");

    // A rejection never falls back to the local store.
    assert!(memory.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejection_without_message_uses_the_generic_one() {
    let client = ScriptedClient::replying([Reply::Json(
        StatusCode::BAD_REQUEST,
        json!({ "success": false }),
    )]);
    let (store, _) = store_with(client, vec![]).await;

    let err = store.register(ann()).await.unwrap_err();
    assert_eq!(err.to_string(), "Registration failed");
}

#[tokio::test]
async fn unreachable_authority_registers_locally() {
    let client = ScriptedClient::replying([Reply::Unreachable]);
    let (store, memory) = store_with(client, vec![]).await;

    let outcome = store.register(ann()).await.unwrap();

    assert_eq!(outcome.source, Source::Local);
    assert_eq!(outcome.message, "User registered successfully (local mode)");

    let records = memory.load().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].username, "ann");
}

#[tokio::test]
async fn local_fallback_rejects_a_duplicate_email() {
    let client = ScriptedClient::replying([Reply::Unreachable]);
    let (store, memory) = store_with(client, vec![ann()]).await;

    let err = store
        .register(UserRecord::new("bob", "a@x.com", "q"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateEmail));
    assert_eq!(err.to_string(), "Email already registered");

    // The store is unchanged.
    let records = memory.load().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].username, "ann");
}

#[tokio::test]
async fn local_fallback_rejects_a_duplicate_username() {
    let client = ScriptedClient::replying([Reply::Unreachable]);
    let (store, memory) = store_with(client, vec![ann()]).await;

    let err = store
        .register(UserRecord::new("ann", "b@x.com", "q"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateUsername));
    assert_eq!(err.to_string(), "Username already taken");
    assert_eq!(memory.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn email_check_wins_when_both_collide() {
    let client = ScriptedClient::replying([Reply::Unreachable]);
    let (store, _) = store_with(client, vec![ann()]).await;

    // Same username AND same email: only the email violation is reported.
    let err = store
        .register(UserRecord::new("ann", "a@x.com", "q"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateEmail));
}

#[tokio::test]
async fn malformed_reply_does_not_fall_back() {
    let client = ScriptedClient::replying([Reply::Json(
        StatusCode::OK,
        serde_json::Value::String("not an object".into()),
    )]);
    let (store, memory) = store_with(client, vec![]).await;

    let err = store.register(ann()).await.unwrap_err();

    assert!(matches!(err, Error::Unexpected { .. }));
    assert!(memory.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn membership_queries_are_local_only() {
    // No scripted replies at all: any network call would panic the client.
    let client = ScriptedClient::default();
    let (store, _) = store_with(client, vec![ann()]).await;

    assert!(store.email_exists("a@x.com").await.unwrap());
    assert!(!store.email_exists("b@x.com").await.unwrap());
    assert!(store.username_exists("ann").await.unwrap());
    assert!(!store.username_exists("bob").await.unwrap());
}
