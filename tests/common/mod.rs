#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use credstore::{
    config::BaseUrl,
    core::{
        user::UserRecord,
        util::{AsyncHttpClient, HttpClientError},
    },
    store::{local::MemoryStore, CredentialStore},
};
use http::{Request, Response, StatusCode};
use serde_json::Value;

/// One scripted exchange.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer with this status and JSON body.
    Json(StatusCode, Value),
    /// Fail as if no connection could be established.
    Unreachable,
}

/// HTTP client that answers each request from a fixed script and records
/// every request it was handed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClient {
    script: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl ScriptedClient {
    pub fn replying(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            script: Arc::new(Mutex::new(replies.into_iter().collect())),
            requests: Arc::default(),
        }
    }

    /// Every request seen so far, as (uri, parsed JSON body) pairs.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AsyncHttpClient for ScriptedClient {
    async fn execute(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<Response<Vec<u8>>, HttpClientError> {
        let body: Value = serde_json::from_slice(request.body()).unwrap_or(Value::Null);
        self.requests
            .lock()
            .unwrap()
            .push((request.uri().to_string(), body));

        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted client ran out of replies");

        match reply {
            Reply::Json(status, value) => Ok(Response::builder()
                .status(status)
                .body(serde_json::to_vec(&value).unwrap())
                .unwrap()),
            Reply::Unreachable => Err(HttpClientError::Unreachable(anyhow::anyhow!(
                "connection refused"
            ))),
        }
    }
}

pub fn authority() -> BaseUrl {
    "http://127.0.0.1:5000".parse().unwrap()
}

/// Build a store backed by the scripted client and a memory store seeded with
/// `records`. The returned [MemoryStore] shares state with the built store.
pub async fn store_with(
    client: ScriptedClient,
    records: Vec<UserRecord>,
) -> (CredentialStore, MemoryStore) {
    use credstore::store::local::UserStore as _;

    let memory = MemoryStore::default();
    memory.save(records).await.unwrap();

    let store = CredentialStore::builder()
        .with_authority(authority())
        .with_http_client(client)
        .with_user_store(memory.clone())
        .build()
        .unwrap();

    (store, memory)
}

pub fn ann() -> UserRecord {
    UserRecord::new("ann", "a@x.com", "p")
}
