//! HTTP client for the console's remote API

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use super::envelope::{ApiEnvelope, CallOutcome};
use super::request::RequestOptions;
use crate::auth::AuthContext;
use crate::error::GatewayError;

const JSON: &str = "application/json";

/// Single chokepoint for calls to the remote API
///
/// Authenticated calls fail closed: without a stored credential nothing is
/// sent, and a 401 from the server signs the operator out.
#[derive(Clone)]
pub struct ApiGateway {
    client: reqwest::Client,
    origin: Url,
    auth: AuthContext,
}

impl ApiGateway {
    pub fn new(origin: Url, auth: AuthContext) -> Self {
        Self::with_client(reqwest::Client::new(), origin, auth)
    }

    pub fn with_client(client: reqwest::Client, origin: Url, auth: AuthContext) -> Self {
        Self {
            client,
            origin,
            auth,
        }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Append `path` to the origin and add the query in order
    ///
    /// Any path prefix on the origin is kept.
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.origin.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        ))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Authenticated call
    pub async fn call<T>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<CallOutcome<T>, GatewayError>
    where
        T: DeserializeOwned,
    {
        let Some(token) = self.auth.token() else {
            warn!("No stored credential for {}, signing out", path);
            self.auth.logout().await;
            return Ok(CallOutcome::SignedOut);
        };

        self.execute(path, options, Some(&token)).await
    }

    /// Authenticated call, with both handled failures reported as `None`
    pub async fn fetch<T>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<ApiEnvelope<T>>, GatewayError>
    where
        T: DeserializeOwned,
    {
        Ok(self.call(path, options).await?.into_envelope())
    }

    /// Call that needs no credential (the sign-in endpoints)
    ///
    /// A 401 here is an ordinary rejection and does not sign anyone out.
    pub async fn call_public<T>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<CallOutcome<T>, GatewayError>
    where
        T: DeserializeOwned,
    {
        self.execute(path, options, None).await
    }

    async fn execute<T>(
        &self,
        path: &str,
        options: RequestOptions,
        token: Option<&str>,
    ) -> Result<CallOutcome<T>, GatewayError>
    where
        T: DeserializeOwned,
    {
        let url = self.build_url(path, &options.query)?;
        let headers = merge_headers(&options.headers, token)?;

        debug!(method = %options.method, %url, "Sending request");

        let mut request = self
            .client
            .request(options.method.clone(), url)
            .headers(headers);

        if options.sends_body() {
            if let Some(body) = &options.body {
                request = request.body(serde_json::to_vec(body)?);
            }
        }

        let response = request.send().await?;
        let status = response.status();

        if token.is_some() && status == StatusCode::UNAUTHORIZED {
            warn!("Server rejected credential on {}, signing out", path);
            self.auth.logout().await;
            return Ok(CallOutcome::SignedOut);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.to_ascii_lowercase().contains(JSON) {
            error!(
                path,
                status = status.as_u16(),
                "Expected JSON but got content type {:?}",
                content_type
            );
            return Ok(CallOutcome::UnexpectedContentType(content_type));
        }

        let bytes = response.bytes().await?;
        // Typed only after the status check; a rejection may carry any data shape
        let raw: ApiEnvelope<serde_json::Value> = serde_json::from_slice(&bytes)?;

        let data = match raw.data {
            Some(value) if status.is_success() && !value.is_null() => {
                Some(serde_json::from_value(value)?)
            }
            _ => None,
        };

        Ok(CallOutcome::Envelope(ApiEnvelope {
            status: if raw.status == 0 {
                status.as_u16()
            } else {
                raw.status
            },
            message: raw.message,
            data,
        }))
    }
}

/// Default content type, then caller headers, then the bearer credential
fn merge_headers(
    extra: &[(String, String)],
    token: Option<&str>,
) -> Result<HeaderMap, GatewayError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));

    for (name, value) in extra {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| GatewayError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| GatewayError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            GatewayError::InvalidHeader {
                name: AUTHORIZATION.to_string(),
                reason: e.to_string(),
            }
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
