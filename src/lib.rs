//! A dual-mode credential store: a client library that registers and
//! authenticates users against a remote authority over HTTP, and degrades to
//! a local record store whenever the authority cannot be reached.
//!
//! # Usage
//!
//! Build a [`CredentialStore`] from an authority base url, an HTTP client and
//! a local user store:
//!
//! ```ignore
//! use credstore::config::BaseUrl;
//! use credstore::core::user::UserRecord;
//! use credstore::core::util::ReqwestClient;
//! use credstore::store::{local::JsonFileStore, CredentialStore};
//!
//! let authority: BaseUrl = "http://127.0.0.1:5000".parse()?;
//!
//! let store = CredentialStore::builder()
//!     .with_authority(authority)
//!     .with_http_client(ReqwestClient::new()?)
//!     .with_user_store(JsonFileStore::new("users.json"))
//!     .build()?;
//!
//! // Registration prefers the authority; when it is unreachable the record
//! // lands in the local store instead.
//! let outcome = store
//!     .register(UserRecord::new("ann", "ann@example.com", "hunter2"))
//!     .await?;
//! println!("{} ({:?})", outcome.message, outcome.source);
//!
//! // Login follows the same preference order.
//! let login = store.login("ann", "hunter2").await?;
//! assert_eq!(login.user.username, "ann");
//! ```
//!
//! The store's behavior can be customized by implementing the
//! [`AsyncHttpClient`] and [`UserStore`] traits.
//!
//! [`CredentialStore`]: crate::store::CredentialStore
//! [`AsyncHttpClient`]: crate::core::util::AsyncHttpClient
//! [`UserStore`]: crate::store::local::UserStore
//!
//! # Fallback semantics
//!
//! The remote authority is canonical. The local store only answers when the
//! authority is *unreachable* at the transport level:
//!
//! 1. An authority reply — acceptance or rejection — is final. A rejection
//!    ("Username already taken" server-side, "Invalid credentials") is
//!    surfaced verbatim and the local store is never consulted.
//! 2. Only a connection-level failure enters fallback mode. Local
//!    registration then enforces email uniqueness before username
//!    uniqueness; local login requires an exact username and password match.
//! 3. The two record sets are never reconciled. A user registered in local
//!    mode does not exist server-side, and vice versa; fallback mode is a
//!    degraded shadow of the remote, not a replica.
//!
//! # Sessions and chat
//!
//! [`Session`] holds the at-most-one signed-in [`CurrentUser`] for the
//! lifetime of the surrounding application session. [`ChatRelay`] forwards
//! chat messages to the authority and substitutes a canned reply whenever the
//! endpoint cannot answer.
//!
//! [`Session`]: crate::store::session::Session
//! [`CurrentUser`]: crate::store::session::CurrentUser
//! [`ChatRelay`]: crate::chat::ChatRelay

pub mod chat;
pub mod config;
pub mod core;
pub mod error;
pub mod store;

pub use error::Error;
pub use store::{CredentialStore, CredentialStoreBuilder, Login, Registration};
