//! The request gateway: one HTTP client for every backend call.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use schoolhub_core::config::ApiConfig;
use schoolhub_core::error::{AppError, ErrorKind};
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::SessionProvider;
use schoolhub_core::types::ClearReason;

use super::policy::AuthPolicy;

/// Sends requests to the backend origin on behalf of the session.
///
/// Before a request leaves, the gateway attaches `Authorization: Bearer`
/// unless the path is public. When no token is stored yet it waits a bounded
/// time for one, then sends the request without it. When the backend answers
/// 401 to a non-public request, the session is invalidated once (unless a
/// different token has been stored since the request left) and the
/// rejection is handed back unchanged. Nothing is retried.
#[derive(Debug, Clone)]
pub struct RequestGateway {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionProvider>,
    policy: AuthPolicy,
}

impl RequestGateway {
    /// Create a gateway for the configured backend origin.
    pub fn new(config: &ApiConfig, session: Arc<dyn SessionProvider>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;
        Self::with_client(http, config, session)
    }

    /// Create a gateway around an existing `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        config: &ApiConfig,
        session: Arc<dyn SessionProvider>,
    ) -> AppResult<Self> {
        let base = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&base).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid API base URL '{}'", config.base_url),
                e,
            )
        })?;

        Ok(Self {
            http,
            base_url,
            session,
            policy: AuthPolicy::from_config(config),
        })
    }

    /// The backend origin.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session this gateway authenticates as.
    pub fn session(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }

    /// `GET path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(Method::GET, path, |req| req).await?;
        Ok(response.json().await?)
    }

    /// `GET path?query` and decode the JSON body.
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(Method::GET, path, |req| req.query(query)).await?;
        Ok(response.json().await?)
    }

    /// `POST path` with a JSON body and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, |req| req.json(body)).await?;
        Ok(response.json().await?)
    }

    /// `POST path` with a form-encoded body and decode the JSON response.
    pub async fn post_form<B, T>(&self, path: &str, form: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, |req| req.form(form)).await?;
        Ok(response.json().await?)
    }

    /// Send one request through both interceptors.
    ///
    /// `build` customizes the request (body, query) before the token is
    /// attached.
    pub async fn send<F>(&self, method: Method, path: &str, build: F) -> AppResult<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url_for(path)?;
        let public = self.policy.is_public(path);

        let mut request = build(self.http.request(method.clone(), url));
        let attached = if public {
            None
        } else {
            let token = self.resolve_token().await?;
            match &token {
                Some(token) => request = request.bearer_auth(token),
                None => warn!(%method, path, "No token available to attach"),
            }
            token
        };

        debug!(%method, path, public, "Sending request");
        let response = request.send().await.map_err(|e| {
            error!(%method, path, error = %e, "Request failed");
            AppError::from(e)
        })?;

        self.intercept_response(path, public, attached.as_deref(), response)
            .await
    }

    fn url_for(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Invalid request path '{path}'"),
                    e,
                )
            })
    }

    /// Current token, or one that shows up within the policy's wait.
    ///
    /// A wait that times out yields `None` so the request still goes out.
    async fn resolve_token(&self) -> AppResult<Option<String>> {
        if let Some(token) = self.session.get().await?.token {
            return Ok(Some(token));
        }

        warn!(
            wait_ms = self.policy.token_wait().as_millis() as u64,
            "No token stored. Waiting for token..."
        );
        match self.session.await_token(self.policy.token_wait()).await {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind == ErrorKind::Timeout => {
                error!("Failed to retrieve token: {}", e.message);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Pass successes through; turn failures into [`AppError::http`].
    ///
    /// A 401 clears the session only while it still holds the token the
    /// request went out with, so a rejection of a stale token cannot undo a
    /// login that completed in the meantime.
    async fn intercept_response(
        &self,
        path: &str,
        public: bool,
        attached: Option<&str>,
        response: Response,
    ) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::UNAUTHORIZED && !public {
            self.clear_after_unauthorized(path, attached).await;
        }

        Err(AppError::http(status.as_u16(), body))
    }

    async fn clear_after_unauthorized(&self, path: &str, attached: Option<&str>) {
        let current = match self.session.get().await {
            Ok(session) => session.token,
            Err(e) => {
                error!(path, error = %e, "Failed to read session after 401");
                return;
            }
        };

        if current.as_deref() != attached {
            warn!(path, "Received 401 for a replaced token. Keeping current session.");
            return;
        }

        warn!(path, "Received 401 Unauthorized response. Clearing session.");
        if let Err(e) = self.session.invalidate(ClearReason::Unauthorized).await {
            error!(path, error = %e, "Failed to clear session after 401");
        }
    }
}
