use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::error::{rejection_message, ApiError};
use crate::config::ApiConfig;

/// Thin JSON client bound to one API origin.
///
/// Cloning is cheap; every store holds its own clone sharing one
/// connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder().connect_timeout(config.connect_timeout());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|source| ApiError::Transport {
            path: base_url.to_string(),
            source,
        })?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins an endpoint path and an optional id segment onto the base URL.
    ///
    /// The id is pushed as a single, percent-encoded path segment.
    pub fn url(&self, path: &str, id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        id: Option<&str>,
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, id, |req| req).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, None, |req| req.query(query))
            .await
    }

    pub async fn post<B, T>(&self, path: &str, id: Option<&str>, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, id, |req| req.json(body))
            .await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PUT, path, None, |req| req.json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, id: &str) -> Result<T, ApiError> {
        self.execute(Method::DELETE, path, Some(id), |req| req)
            .await
    }

    async fn execute<T, F>(
        &self,
        method: Method,
        path: &str,
        id: Option<&str>,
        prepare: F,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path, id)?;
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!(
            "api_request",
            method = %method,
            path = %url.path(),
            request_id = %request_id
        );

        async move {
            let endpoint = url.path().to_string();
            let request =
                prepare(self.http.request(method, url)).header("x-request-id", &request_id);

            let response = request.send().await.map_err(|source| {
                tracing::warn!(error = %source, "Request failed");
                ApiError::Transport {
                    path: endpoint.clone(),
                    source,
                }
            })?;

            let status = response.status();
            let body = response.bytes().await.map_err(|source| ApiError::Transport {
                path: endpoint.clone(),
                source,
            })?;

            if !status.is_success() {
                let message = rejection_message(&body);
                tracing::warn!(
                    status = status.as_u16(),
                    reason = message.as_deref().unwrap_or(""),
                    "Request rejected"
                );
                return Err(ApiError::Rejected {
                    path: endpoint,
                    status: status.as_u16(),
                    message,
                });
            }

            tracing::debug!(
                status = status.as_u16(),
                bytes = body.len(),
                "Request completed"
            );
            serde_json::from_value(success_body(&body)).map_err(|source| ApiError::Decode {
                path: endpoint,
                source,
            })
        }
        .instrument(span)
        .await
    }
}

/// Reads a 2xx body as JSON.
///
/// An empty body is `null` and a non-JSON body is kept as a string, so
/// callers expecting an envelope still succeed while list reads fail to
/// decode.
fn success_body(body: &[u8]) -> Value {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
