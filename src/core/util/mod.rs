use anyhow::Context;
use async_trait::async_trait;
use http::{Request, Response};
use thiserror::Error;

/// Generic HTTP client.
///
/// A trait is used here so to facilitate native HTTP/TLS when compiled for mobile applications.
#[async_trait]
pub trait AsyncHttpClient {
    async fn execute(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<Response<Vec<u8>>, HttpClientError>;
}

/// Transport-level outcome of a failed HTTP exchange.
///
/// `Unreachable` is the one condition the store treats as fallback-eligible;
/// every other failure is surfaced to the caller as-is.
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("unable to connect to the remote host")]
    Unreachable(#[source] anyhow::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub(crate) fn base_request() -> http::request::Builder {
    Request::builder().header(http::header::CONTENT_TYPE, "application/json")
}

#[derive(Debug)]
pub struct ReqwestClient(reqwest::Client);

impl AsRef<reqwest::Client> for ReqwestClient {
    fn as_ref(&self) -> &reqwest::Client {
        &self.0
    }
}

impl ReqwestClient {
    pub fn new() -> anyhow::Result<Self> {
        reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .context("unable to build http_client")
            .map(Self)
    }
}

#[async_trait]
impl AsyncHttpClient for ReqwestClient {
    async fn execute(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<Response<Vec<u8>>, HttpClientError> {
        let request = request.try_into().context("unable to convert request")?;

        let response = self.0.execute(request).await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                HttpClientError::Unreachable(e.into())
            } else {
                HttpClientError::Other(e.into())
            }
        })?;

        let mut builder = Response::builder()
            .status(response.status())
            .version(response.version());

        builder
            .headers_mut()
            .context("unable to set headers")?
            .extend(response.headers().clone());

        let body = response
            .bytes()
            .await
            .context("failed to extract response body")?
            .to_vec();

        Ok(builder.body(body).context("unable to construct response")?)
    }
}
