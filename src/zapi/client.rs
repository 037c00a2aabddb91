//! ZAPI HTTP client
//!
//! Thin transport over the Zephyr for Jira REST API: joins endpoints onto the
//! configured server, attaches Basic credentials and decodes JSON bodies.
//! Resource operations live in the sibling modules as further `impl` blocks.

use crate::auth::{BoxedAuthProvider, create_auth_provider};
use crate::config::JiraConfig;
use crate::error::{ZapiError, ZapiResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Path prefix shared by every ZAPI endpoint
pub const API_PREFIX: &str = "/rest/zapi/latest";

/// ZAPI client
pub struct ZapiClient {
    http: Client,
    base_url: String,
    auth: BoxedAuthProvider,
}

impl std::fmt::Debug for ZapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZapiClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth.auth_type())
            .finish()
    }
}

impl ZapiClient {
    /// Create a new ZAPI client from configuration
    pub fn new(config: &JiraConfig, auth: BoxedAuthProvider) -> ZapiResult<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .user_agent(format!("zapi-client/{}", env!("CARGO_PKG_VERSION")));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().map_err(ZapiError::Request)?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            auth,
        })
    }

    /// Create a client using the Basic credentials in the configuration
    pub fn from_config(config: &JiraConfig) -> crate::error::Result<Self> {
        let auth = create_auth_provider(config)?;
        Ok(Self::new(config, auth)?)
    }

    /// Server this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an API endpoint
    fn url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, endpoint)
    }

    /// Add authentication to a request
    async fn authenticate(&self, request: RequestBuilder) -> ZapiResult<RequestBuilder> {
        let header = self.auth.get_auth_header().await?;
        Ok(request.header(header.header_name(), header.header_value()))
    }

    /// Send a request once; transport failures are returned as-is
    async fn execute(&self, request: RequestBuilder) -> ZapiResult<Response> {
        let request = self.authenticate(request).await?;
        request.send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            ZapiError::Request(e)
        })
    }

    /// Decode a JSON body regardless of the HTTP status.
    ///
    /// ZAPI reports many logical failures as JSON with a non-2xx status
    /// (`{"Error": ...}`), and callers inspect those bodies. Only a body that
    /// fails to decode becomes an error.
    async fn decode<T: DeserializeOwned>(response: Response) -> ZapiResult<T> {
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str(&body) {
            Ok(data) => {
                if !status.is_success() {
                    warn!(status = status.as_u16(), "ZAPI returned non-success status");
                }
                Ok(data)
            }
            Err(e) if status.is_success() => Err(ZapiError::InvalidResponse(format!(
                "Failed to parse response: {}",
                e
            ))),
            Err(_) => Err(ZapiError::from_response(status.as_u16(), &body)),
        }
    }

    /// Decode a JSON body, treating any non-2xx status as an error
    async fn decode_success<T: DeserializeOwned>(response: Response) -> ZapiResult<T> {
        let status = response.status();
        if status.is_success() {
            return Self::decode(response).await;
        }

        let body = response.text().await?;
        Err(ZapiError::from_response(status.as_u16(), &body))
    }

    /// Make a GET request
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ZapiResult<T> {
        let request = self.http.get(self.url(endpoint));
        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    /// Make a GET request with query parameters
    #[instrument(skip(self, query), fields(endpoint = %endpoint))]
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        query: &Q,
    ) -> ZapiResult<T> {
        let request = self.http.get(self.url(endpoint)).query(query);
        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    /// Make a POST request with a JSON body
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ZapiResult<T> {
        let request = self.http.post(self.url(endpoint)).json(body);
        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    /// Make a POST request whose response must be a 2xx to be meaningful
    ///
    /// Used where a field of the body is read back as a new resource id.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn post_created<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ZapiResult<T> {
        let request = self.http.post(self.url(endpoint)).json(body);
        let response = self.execute(request).await?;
        Self::decode_success(response).await
    }

    /// Make a POST request and report only the HTTP status
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn post_for_status<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ZapiResult<StatusCode> {
        let request = self.http.post(self.url(endpoint)).json(body);
        let response = self.execute(request).await?;
        let status = response.status();
        debug!(status = status.as_u16(), "POST completed");
        Ok(status)
    }

    /// Make a DELETE request
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ZapiResult<T> {
        let request = self.http.delete(self.url(endpoint));
        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    /// URL-encode a caller-supplied id for use as a path segment
    pub fn encode_segment(id: &str) -> String {
        urlencoding::encode(id).to_string()
    }
}
