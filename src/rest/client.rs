//! itBit REST API client implementation.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use url::Url;

use crate::auth::{APPLICATION_JSON, Clock, CredentialsProvider, NonceProvider, Signer};
use crate::error::{ApiError, ItbitError};
use crate::rest::endpoints::ITBIT_BASE_URL;

/// The itBit REST API client.
///
/// Public market data needs no configuration. Wallet and trading endpoints
/// need credentials, and listing wallets also needs the account's user id.
///
/// # Example
///
/// ```rust,no_run
/// use itbit_api_client::rest::ItbitClient;
/// use itbit_api_client::types::Symbol;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ItbitClient::new();
///     let ticker = client.get_ticker(&Symbol::xbt_usd()).await?;
///     println!("{} - {} {}", ticker.bid, ticker.ask, ticker.pair);
///     Ok(())
/// }
/// ```
///
/// For signed endpoints, provide credentials:
///
/// ```rust,no_run
/// use itbit_api_client::auth::StaticCredentials;
/// use itbit_api_client::rest::ItbitClient;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ItbitClient::builder()
///         .credentials(Arc::new(StaticCredentials::new("client_key", "client_secret")))
///         .user_id("user-id")
///         .build();
///
///     for wallet in client.get_all_wallets().await? {
///         println!("{} ({})", wallet.name, wallet.id);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ItbitClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    signer: Option<Signer>,
    user_id: Option<String>,
    span: tracing::Span,
}

impl ItbitClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> ItbitClientBuilder {
        ItbitClientBuilder::new()
    }

    /// The configured user id, required for listing wallets.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Resolve an endpoint path against the base URL.
    ///
    /// The returned URL is exactly what goes on the wire, so it is also what
    /// gets signed.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, ItbitError> {
        let url = if path.is_empty() {
            self.base_url.clone()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Ok(Url::parse(&url)?)
    }

    /// Make an unsigned GET request.
    ///
    /// Only `content-type` is set; authentication headers are never attached.
    pub(crate) async fn public_get<T>(&self, path: &str) -> Result<T, ItbitError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(path)?;
        async {
            let response = self
                .http_client
                .get(url)
                .header(CONTENT_TYPE, APPLICATION_JSON)
                .send()
                .await?;
            let body = Self::read_success_body(response).await?;
            Self::parse_body(&body)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Make a signed request and decode the JSON response.
    pub(crate) async fn signed_request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ItbitError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.signed_send(method, path, body).await?;
        Self::parse_body(&body)
    }

    /// Make a signed request and return the raw success body.
    ///
    /// The body is serialized once; the signature covers exactly the bytes
    /// that are sent.
    pub(crate) async fn signed_send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, ItbitError>
    where
        B: Serialize + ?Sized,
    {
        let signer = self.signer.as_ref().ok_or(ItbitError::MissingCredentials)?;
        let url = self.endpoint_url(path)?;
        let payload = match body {
            Some(body) => serde_json::to_vec(body)?,
            None => Vec::new(),
        };

        let headers = signer
            .sign(method.as_str(), url.as_str(), &payload)?
            .to_header_map()?;

        async {
            let mut request = self.http_client.request(method, url).headers(headers);
            if !payload.is_empty() {
                request = request.body(payload);
            }
            let response = request.send().await?;
            Self::read_success_body(response).await
        }
        .instrument(self.span.clone())
        .await
    }

    /// Read a response body, turning non-success statuses into errors.
    async fn read_success_body(response: reqwest::Response) -> Result<String, ItbitError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let error: ApiError = serde_json::from_str(&body).map_err(|e| {
            ItbitError::InvalidResponse(format!(
                "Failed to parse HTTP {} error body: {}. Body: {}",
                status, e, body
            ))
        })?;
        tracing::debug!(
            %status,
            code = error.code,
            request_id = %error.request_id,
            "itBit rejected request"
        );
        Err(ItbitError::Api { status, error })
    }

    fn parse_body<T>(body: &str) -> Result<T, ItbitError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            ItbitError::InvalidResponse(format!("Failed to parse response: {}. Body: {}", e, body))
        })
    }
}

impl Default for ItbitClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ItbitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItbitClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.signer.is_some())
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Builder for [`ItbitClient`].
pub struct ItbitClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    clock: Option<Arc<dyn Clock>>,
    user_id: Option<String>,
    user_agent: Option<String>,
    span: Option<tracing::Span>,
}

impl ItbitClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: ITBIT_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            clock: None,
            user_id: None,
            user_agent: None,
            span: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    ///
    /// A trailing slash is dropped so paths join cleanly.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the credentials provider for signed requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the user id whose wallets are listed.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set a custom nonce provider.
    ///
    /// Share one provider between every client using the same credentials.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom timestamp source.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the span every request of this client is recorded under.
    pub fn span(mut self, span: tracing::Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Build the client.
    pub fn build(self) -> ItbitClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("itbit-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("itbit-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        // No retry middleware: a retried signed request would replay its nonce.
        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let signer = self.credentials.map(|credentials| {
            let mut signer = Signer::new(credentials);
            if let Some(provider) = self.nonce_provider {
                signer = signer.with_nonce_provider(provider);
            }
            if let Some(clock) = self.clock {
                signer = signer.with_clock(clock);
            }
            signer
        });

        ItbitClient {
            http_client: client,
            base_url: self.base_url,
            signer,
            user_id: self.user_id,
            span: self.span.unwrap_or_else(|| tracing::debug_span!("itbit")),
        }
    }
}

impl Default for ItbitClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
