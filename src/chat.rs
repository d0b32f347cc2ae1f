use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use tracing::warn;

use crate::{
    config::BaseUrl,
    core::{
        api::{ChatReply, ChatRequest},
        util::{base_request, AsyncHttpClient},
    },
};

/// The reply substituted whenever the chat endpoint cannot answer.
pub const FALLBACK_REPLY: &str =
    "Sorry, I don't have enough information to answer that question";

const GUEST_USER: &str = "guest";

/// Relay for chat messages.
///
/// Forwards each message to the authority's chat endpoint and hands back its
/// reply. Unlike the credential operations, the relay never fails: transport
/// errors, HTTP errors and malformed bodies all degrade to [FALLBACK_REPLY].
#[derive(Clone)]
pub struct ChatRelay {
    authority: BaseUrl,
    http_client: Arc<dyn AsyncHttpClient + Send + Sync>,
}

impl ChatRelay {
    pub fn new<C: AsyncHttpClient + Send + Sync + 'static>(
        authority: BaseUrl,
        http_client: C,
    ) -> Self {
        Self {
            authority,
            http_client: Arc::new(http_client),
        }
    }

    /// Send a message on behalf of `username`, or as the guest user when no
    /// one is signed in.
    pub async fn send(&self, message: &str, username: Option<&str>) -> String {
        match self
            .try_send(message, username.unwrap_or(GUEST_USER))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "chat endpoint could not answer, degrading");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn try_send(&self, message: &str, user: &str) -> Result<String> {
        let url = self
            .authority
            .join("chat")
            .context("unable to construct the chat endpoint url")?;

        let body = serde_json::to_vec(&ChatRequest { message, user })
            .context("unable to serialize the chat request")?;

        let request = base_request()
            .method("POST")
            .uri(url.as_str())
            .body(body)
            .context("unable to construct the chat request")?;

        let response = self
            .http_client
            .execute(request)
            .await
            .context("chat request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("chat request was unsuccessful (status: {status})")
        }

        let reply: ChatReply = serde_json::from_slice(response.body())
            .context("unable to parse the chat reply")?;

        Ok(reply.response)
    }
}
