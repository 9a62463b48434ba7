use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::config::Environ;
use crate::error::ApiError;
use crate::models::{Destination, Paged, Source, View};
use crate::session::SessionStore;

pub const LOGIN_ROUTE: &str = "/login";
pub const DASHBOARD_ROUTE: &str = "/";

/// Capability for the navigation side effects of the client and the forms:
/// `/login` on an expired session, `/` after a successful submission.
pub trait Navigator: Send + Sync {
    fn push(&self, route: &str);
}

/// Navigator for embeddings with no page to move; logs the transition.
#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn push(&self, route: &str) {
        debug!(route, "navigation requested");
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client bound to the backend base URL. Sends JSON on every request
/// and resolves the bearer credential from the session store at dispatch
/// time, so a login or logout takes effect on the next call without
/// rebuilding the client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        // A trailing slash keeps Url::join from replacing the last path
        // segment of the base URL.
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            http,
            base_url: Url::parse(&base)?,
            session,
            navigator,
        })
    }

    pub fn from_environ(
        environ: &Environ,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        Self::new(&environ.base_url, session, navigator)
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        self.dispatch(self.http.get(url)).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        self.dispatch(self.http.post(url).json(body)).await
    }

    /// GET and decode the JSON body. Backs the list-fetching glue.
    pub async fn fetcher<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Ok(self.get(path).await?.json::<T>().await?)
    }

    pub async fn sources(&self) -> Result<Paged<Source>, ApiError> {
        self.fetcher("/sources").await
    }

    pub async fn views(&self) -> Result<Paged<View>, ApiError> {
        self.fetcher("/views").await
    }

    pub async fn destinations(&self) -> Result<Paged<Destination>, ApiError> {
        self.fetcher("/destinations").await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn dispatch(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        // Credential freshness: read the store immediately before dispatch,
        // never at client construction.
        let req = match self.session.get() {
            Some(secret) => req.bearer_auth(secret),
            None => req,
        };

        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let message = Self::error_message(resp).await;
        if status == StatusCode::UNAUTHORIZED {
            // Ordering contract: clear the session, then redirect, then let
            // the caller observe the rejection.
            info!("session rejected by backend, redirecting to login");
            self.session.clear();
            self.navigator.push(LOGIN_ROUTE);
        }

        Err(ApiError::Api { status, message })
    }

    async fn error_message(resp: Response) -> String {
        let status = resp.status();
        match resp.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        }
    }
}
