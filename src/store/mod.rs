use std::sync::Arc;

use anyhow::{bail, Context as _};
use http::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{
    config::BaseUrl,
    core::{
        api::{ApiReply, LoginReply, LoginRequest, RegisterRequest},
        user::{now_rfc3339, AuthenticatedUser, Source, UserRecord},
        util::{base_request, AsyncHttpClient, HttpClientError},
    },
    error::Error,
};

pub mod local;
pub mod session;

use local::UserStore;

const LOCAL_REGISTER_MESSAGE: &str = "User registered successfully (local mode)";
const LOCAL_LOGIN_MESSAGE: &str = "Login successful (local mode)";

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub message: String,
    pub source: Source,
}

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    pub user: AuthenticatedUser,
    pub message: String,
    pub source: Source,
}

/// Dual-mode credential store.
///
/// Every operation asks the remote authority first. Only when the authority
/// cannot be reached at all does the store degrade to its local record list;
/// an authority that answers — even with a rejection — is authoritative.
///
/// The remote and local record sets are independent and never reconciled: a
/// user registered in local mode does not exist server-side, and vice versa.
/// Fallback mode is a degraded shadow of the remote, not a replica.
#[derive(Clone)]
pub struct CredentialStore {
    authority: BaseUrl,
    http_client: Arc<dyn AsyncHttpClient + Send + Sync>,
    user_store: Arc<dyn UserStore + Send + Sync>,
}

impl CredentialStore {
    /// Build a new credential store.
    pub fn builder() -> CredentialStoreBuilder {
        CredentialStoreBuilder::default()
    }

    /// Register a user, preferring the remote authority.
    ///
    /// A reachable authority decides alone: its rejection message is returned
    /// verbatim and the local store is left untouched. On acceptance the
    /// record is also appended locally as best-effort replication. Only an
    /// unreachable authority triggers local-only registration, which enforces
    /// email uniqueness first, then username uniqueness.
    pub async fn register(&self, user: UserRecord) -> Result<Registration, Error> {
        let body = RegisterRequest::from(&user);

        match self.post_json("api/register", &body).await {
            Ok((status, bytes)) => {
                let reply: ApiReply = parse_json(&bytes)?;

                if !status.is_success() {
                    return Err(Error::RemoteRejected {
                        message: reply
                            .message
                            .unwrap_or_else(|| "Registration failed".to_string()),
                    });
                }

                // Best-effort replication: a local store failure does not undo
                // a registration the authority has already accepted.
                if let Err(e) = self.append_record(user).await {
                    warn!(error = %e, "failed to replicate accepted registration locally");
                }

                Ok(Registration {
                    message: reply.message.unwrap_or_default(),
                    source: Source::Server,
                })
            }
            Err(HttpClientError::Unreachable(cause)) => {
                debug!(%cause, "remote authority unreachable, registering locally");
                self.register_local(user).await
            }
            Err(HttpClientError::Other(e)) => Err(Error::Unexpected {
                message: e.to_string(),
            }),
        }
    }

    /// Log a user in, preferring the remote authority.
    ///
    /// When the authority is unreachable, the local store answers instead: an
    /// exact username and password match yields a local-mode login with
    /// `last_login` set to now, otherwise the transport failure is returned.
    pub async fn login(&self, username: &str, password: &str) -> Result<Login, Error> {
        let body = LoginRequest { username, password };

        match self.post_json("api/login", &body).await {
            Ok((status, bytes)) => {
                if !status.is_success() {
                    let reply: ApiReply = parse_json(&bytes)?;
                    return Err(Error::RemoteRejected {
                        message: reply.message.unwrap_or_else(|| "Login failed".to_string()),
                    });
                }

                let reply: LoginReply = parse_json(&bytes)?;
                Ok(Login {
                    user: reply.user,
                    message: reply.message.unwrap_or_default(),
                    source: Source::Server,
                })
            }
            Err(HttpClientError::Unreachable(cause)) => {
                debug!(%cause, "remote authority unreachable, attempting local login");

                let users = self.load_users().await?;
                let record = users
                    .iter()
                    .find(|u| u.username == username && u.password == password);

                match record {
                    Some(u) => Ok(Login {
                        user: AuthenticatedUser {
                            id: None,
                            username: u.username.clone(),
                            email: u.email.clone(),
                            join_date: u.join_date.clone(),
                            last_login: now_rfc3339(),
                        },
                        message: LOCAL_LOGIN_MESSAGE.to_string(),
                        source: Source::Local,
                    }),
                    None => Err(Error::RemoteUnreachable(cause)),
                }
            }
            Err(HttpClientError::Other(e)) => Err(Error::Unexpected {
                message: e.to_string(),
            }),
        }
    }

    /// Whether any local record uses this email. Never consults the remote.
    pub async fn email_exists(&self, email: &str) -> Result<bool, Error> {
        Ok(self.load_users().await?.iter().any(|u| u.email == email))
    }

    /// Whether any local record uses this username. Never consults the remote.
    pub async fn username_exists(&self, username: &str) -> Result<bool, Error> {
        Ok(self
            .load_users()
            .await?
            .iter()
            .any(|u| u.username == username))
    }

    async fn register_local(&self, user: UserRecord) -> Result<Registration, Error> {
        let mut users = self.load_users().await?;

        // Email is checked before username; only the first violation is
        // reported.
        if users.iter().any(|u| u.email == user.email) {
            return Err(Error::DuplicateEmail);
        }
        if users.iter().any(|u| u.username == user.username) {
            return Err(Error::DuplicateUsername);
        }

        users.push(user);
        self.save_users(users).await?;

        Ok(Registration {
            message: LOCAL_REGISTER_MESSAGE.to_string(),
            source: Source::Local,
        })
    }

    async fn append_record(&self, user: UserRecord) -> Result<(), Error> {
        let mut users = self.load_users().await?;
        users.push(user);
        self.save_users(users).await
    }

    async fn load_users(&self) -> Result<Vec<UserRecord>, Error> {
        self.user_store.load().await.map_err(Error::Store)
    }

    async fn save_users(&self, users: Vec<UserRecord>) -> Result<(), Error> {
        self.user_store.save(users).await.map_err(Error::Store)
    }

    async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(StatusCode, Vec<u8>), HttpClientError> {
        let url = self
            .authority
            .join(path)
            .context("unable to construct the authority endpoint url")?;

        let request = base_request()
            .method("POST")
            .uri(url.as_str())
            .body(serde_json::to_vec(body).context("unable to serialize the request body")?)
            .context("unable to construct the request")?;

        let response = self.http_client.execute(request).await?;

        Ok((response.status(), response.into_body()))
    }
}

fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(bytes).map_err(|e| Error::Unexpected {
        message: format!("unable to parse the authority response: {e}"),
    })
}

/// Builder struct for [CredentialStore].
#[derive(Clone, Default)]
pub struct CredentialStoreBuilder {
    authority: Option<BaseUrl>,
    http_client: Option<Arc<dyn AsyncHttpClient + Send + Sync>>,
    user_store: Option<Arc<dyn UserStore + Send + Sync>>,
}

impl CredentialStoreBuilder {
    /// Build the credential store.
    pub fn build(self) -> anyhow::Result<CredentialStore> {
        let Self {
            authority,
            http_client,
            user_store,
        } = self;

        let Some(authority) = authority else {
            bail!("authority base url is required")
        };

        let Some(http_client) = http_client else {
            bail!("http client is required")
        };

        let Some(user_store) = user_store else {
            bail!("user store is required")
        };

        Ok(CredentialStore {
            authority,
            http_client,
            user_store,
        })
    }

    /// Set the base url of the remote authority.
    pub fn with_authority(mut self, authority: BaseUrl) -> Self {
        self.authority = Some(authority);
        self
    }

    /// Set the HTTP client used to reach the authority.
    pub fn with_http_client<C: AsyncHttpClient + Send + Sync + 'static>(
        mut self,
        http_client: C,
    ) -> Self {
        self.http_client = Some(Arc::new(http_client));
        self
    }

    /// Set the local user store used for replication and fallback.
    pub fn with_user_store<S: UserStore + Send + Sync + 'static>(mut self, user_store: S) -> Self {
        self.user_store = Some(Arc::new(user_store));
        self
    }
}
