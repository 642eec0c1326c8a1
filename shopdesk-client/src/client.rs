//! The authenticated request client.
//!
//! [`ApiClient`] performs HTTP calls against the dashboard backend,
//! attaching the current access credential and transparently recovering
//! from credential expiry. The recovery protocol guarantees:
//!
//! - at most one refresh cycle is in flight at any instant; callers that
//!   hit a 401 while a cycle is running queue on it instead of racing a
//!   second refresh;
//! - the queue drains exactly once per cycle: every queued caller is
//!   resumed with the new credential, or every one is rejected with the
//!   refresh failure;
//! - each original request is retried at most once after a refresh; a
//!   retry that is still unauthorized propagates an error instead of
//!   starting another cycle.
//!
//! Token state is mirrored into the [`SessionStore`] before the in-memory
//! copy is updated, so a restarted client restores the last known pair.

use crate::config::ClientConfig;
use crate::store::{keys, MemoryStore, SessionStore};
use parking_lot::Mutex;
use reqwest::{header, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shopdesk_core::{
    ApiError, AuthError, Result, Session, TransportError, User, ValidateResponse,
};
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, error, warn};

/// Fallback when a failure response carries no parseable `message`.
const GENERIC_ERROR_MESSAGE: &str = "request failed";

type LogoutCallback = Arc<dyn Fn() + Send + Sync>;
type RefreshOutcome = std::result::Result<String, AuthError>;

/// Failure payload shape: `{"message": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Shared mutable client state.
///
/// Everything the refresh protocol coordinates on lives behind one lock:
/// the token pair, the in-flight flag, and the wait queue. The lock is
/// never held across an await point; check-and-set of the flag happens in
/// a single critical section.
#[derive(Default)]
struct AuthState {
    access: Option<String>,
    refresh: Option<String>,
    refreshing: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// What a caller that observed a 401 should do next.
enum Recovery {
    /// The credential already rotated underneath us; retry with it.
    RetryNow(String),
    /// A refresh cycle is running; suspend until it settles.
    Wait(oneshot::Receiver<RefreshOutcome>),
    /// This caller leads the refresh cycle with the given refresh token.
    Lead(String),
    /// Nothing to refresh with.
    Fail,
}

struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    trusted: bool,
    store: Arc<dyn SessionStore>,
    state: Mutex<AuthState>,
    on_logout: Mutex<Option<LogoutCallback>>,
}

/// Authenticated API client. Cheap to clone; clones share one session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("authenticated", &self.access_token().is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client with an in-memory session store.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Create a client backed by the given session store.
    ///
    /// The store is read once here to restore the last known token pair
    /// optimistically; validity is only discovered on first use.
    pub fn with_store(config: ClientConfig, store: Arc<dyn SessionStore>) -> Self {
        let http = config.build_http_client();
        let trusted = config.is_trusted_origin();
        let state = AuthState {
            access: store.get(keys::ACCESS_TOKEN),
            refresh: store.get(keys::REFRESH_TOKEN),
            ..AuthState::default()
        };
        Self {
            inner: Arc::new(Inner {
                http,
                config,
                trusted,
                store,
                state: Mutex::new(state),
                on_logout: Mutex::new(None),
            }),
        }
    }

    /// The current access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.inner.state.lock().access.clone()
    }

    /// The current refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        self.inner.state.lock().refresh.clone()
    }

    /// The cached user record from the session store, if any.
    pub fn current_user(&self) -> Option<User> {
        let raw = self.inner.store.get(keys::USER)?;
        serde_json::from_str(&raw).ok()
    }

    /// Whether authorized calls can be attempted: either a token is held,
    /// or this deployment origin bypasses authentication entirely.
    pub fn can_request(&self) -> bool {
        self.access_token().is_some() || self.inner.trusted
    }

    /// Register the callback invoked when the session is torn down,
    /// whether by an explicit [`logout`](Self::logout) or by refresh
    /// exhaustion. A single subscriber; registering again replaces it.
    pub fn on_logout(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self.inner.on_logout.lock() = Some(Arc::new(callback));
    }

    #[cfg(test)]
    pub(crate) fn is_refreshing(&self) -> bool {
        self.inner.state.lock().refreshing
    }

    /// Exchange credentials for a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let body = serde_json::json!({ "email": email, "password": password });
        let token = self.access_token();
        let response = self
            .execute(Method::POST, "/auth/login", &[], Some(&body), token.as_deref())
            .await?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            warn!(message, "login rejected");
            return Err(AuthError::InvalidCredentials(message).into());
        }

        let session: Session = response.json().await.map_err(transport)?;
        self.install_pair(&session.access_token, &session.refresh_token);
        self.store_user(&session.user);
        debug!(user = %session.user.email, "login succeeded");
        Ok(session)
    }

    /// Best-effort refresh for startup.
    ///
    /// Returns `None` on any failure instead of erroring, and never
    /// triggers logout: a rejected refresh at boot must not destroy a
    /// possibly-still-valid session restored from the store.
    pub async fn silent_refresh(&self) -> Option<Session> {
        let refresh = self.refresh_token()?;
        match self.refresh_call(&refresh).await {
            Ok(session) => {
                self.install_pair(&session.access_token, &session.refresh_token);
                debug!("silent refresh succeeded");
                Some(session)
            }
            Err(err) => {
                warn!(error = %err, "silent refresh failed, keeping stored session");
                None
            }
        }
    }

    /// Check the current access token against the server.
    pub async fn validate(&self) -> Result<ValidateResponse> {
        self.request(Method::GET, "/auth/validate", &[], None).await
    }

    /// Fetch the authenticated user's profile.
    pub async fn profile(&self) -> Result<User> {
        self.request(Method::GET, "/auth/profile", &[], None).await
    }

    /// End the session: fire a best-effort server-side invalidation (not
    /// awaited), clear both tokens and the cached user record, and invoke
    /// the registered logout callback.
    pub fn logout(&self) {
        if let Some(refresh) = self.refresh_token() {
            let http = self.inner.http.clone();
            let url = format!("{}/auth/logout", self.inner.config.base_url);
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        let body = serde_json::json!({ "refreshToken": refresh });
                        let sent = http
                            .post(&url)
                            .header(header::CONTENT_TYPE, "application/json")
                            .json(&body)
                            .send()
                            .await;
                        if let Err(err) = sent {
                            error!(error = %err, "server-side logout failed");
                        }
                    });
                }
                Err(_) => warn!("no async runtime, skipping server-side logout"),
            }
        }

        self.clear_session();
        debug!("session cleared");

        // Clone out of the slot so the callback runs without the lock held
        // and may call back into the client.
        let callback = self.inner.on_logout.lock().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Perform an authorized request and decode the JSON response.
    ///
    /// Callers never observe a raw 401: credential expiry is resolved by
    /// the refresh protocol, and only an unrecoverable session failure
    /// surfaces, as [`AuthError`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<T> {
        let response = self.authorized(method, path, query, body).await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(ApiError::api(status, Self::error_message(response).await));
        }
        response.json().await.map_err(transport)
    }

    /// Authorized request that expects no response body.
    pub async fn request_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<()> {
        let response = self.authorized(method, path, query, body).await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(ApiError::api(status, Self::error_message(response).await));
        }
        Ok(())
    }

    /// Authorized request returning the raw response bytes (exports).
    pub async fn request_bytes(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
    ) -> Result<bytes::Bytes> {
        let response = self.authorized(method, path, query, None).await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(ApiError::api(status, Self::error_message(response).await));
        }
        response.bytes().await.map_err(transport)
    }

    /// Issue a request with the current credential, running the refresh
    /// protocol on a 401. Returns a response that is never 401.
    async fn authorized(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Response> {
        let token = self.access_token();
        debug!(%method, path, "issuing request");
        let response = self
            .execute(method.clone(), path, query, body, token.as_deref())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let message = Self::error_message(response).await;
        let fresh = self.recover_unauthorized(token.as_deref(), message).await?;

        debug!(path, "retrying request with refreshed credential");
        let response = self.execute(method, path, query, body, Some(&fresh)).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            // One retry per request; do not re-enter the refresh protocol.
            let message = Self::error_message(response).await;
            return Err(AuthError::Unauthorized(message).into());
        }
        Ok(response)
    }

    /// Decide how a caller recovers from a 401 it received while holding
    /// `used` as its credential, then carry that recovery out. Returns
    /// the access token to retry with.
    async fn recover_unauthorized(&self, used: Option<&str>, message: String) -> Result<String> {
        let recovery = {
            let mut state = self.inner.state.lock();
            if state.access.as_deref() != used {
                // A refresh cycle settled between our send and this 401.
                match state.access.clone() {
                    Some(token) => Recovery::RetryNow(token),
                    None => Recovery::Fail,
                }
            } else if state.access.is_none() {
                Recovery::Fail
            } else if state.refreshing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Recovery::Wait(rx)
            } else if let Some(refresh) = state.refresh.clone() {
                state.refreshing = true;
                Recovery::Lead(refresh)
            } else {
                Recovery::Fail
            }
        };

        match recovery {
            Recovery::RetryNow(token) => Ok(token),
            Recovery::Fail => Err(AuthError::MissingCredentials(message).into()),
            Recovery::Wait(rx) => {
                debug!("refresh in progress, queueing request");
                let outcome = rx.await.map_err(|_| {
                    AuthError::RefreshExhausted("refresh cycle dropped its queue".to_owned())
                })?;
                Ok(outcome?)
            }
            Recovery::Lead(refresh) => self.run_refresh_cycle(&refresh).await,
        }
    }

    /// Run the single in-flight refresh cycle, then settle the queue:
    /// resolve every waiter with the new credential on success, or reject
    /// every waiter and force logout on failure.
    async fn run_refresh_cycle(&self, refresh: &str) -> Result<String> {
        debug!("access token expired, starting refresh");
        match self.refresh_call(refresh).await {
            Ok(session) => {
                self.install_pair(&session.access_token, &session.refresh_token);
                let waiters = self.settle_cycle();
                debug!(waiters = waiters.len(), "token refreshed, resuming queued requests");
                for waiter in waiters {
                    let _ = waiter.send(Ok(session.access_token.clone()));
                }
                Ok(session.access_token)
            }
            Err(err) => {
                let failure = AuthError::RefreshExhausted(err.to_string());
                let waiters = self.settle_cycle();
                warn!(
                    waiters = waiters.len(),
                    error = %err,
                    "refresh failed, rejecting queued requests and ending session"
                );
                for waiter in waiters {
                    let _ = waiter.send(Err(failure.clone()));
                }
                self.logout();
                Err(failure.into())
            }
        }
    }

    /// Clear the in-flight flag and take the wait queue, in one step.
    fn settle_cycle(&self) -> Vec<oneshot::Sender<RefreshOutcome>> {
        let mut state = self.inner.state.lock();
        state.refreshing = false;
        std::mem::take(&mut state.waiters)
    }

    /// The refresh call itself. Deliberately outside the authorized
    /// request path so a rejected refresh can never recurse into another
    /// refresh cycle.
    async fn refresh_call(&self, refresh: &str) -> Result<Session> {
        let url = format!("{}/auth/refresh", self.inner.config.base_url);
        let body = serde_json::json!({ "refreshToken": refresh });
        let pending = self
            .inner
            .http
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send();

        let response = match self.inner.config.refresh_timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| {
                    ApiError::from(TransportError::timeout("refresh call exceeded deadline"))
                })?
                .map_err(transport)?,
            None => pending.await.map_err(transport)?,
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = Self::error_message(response).await;
            return Err(ApiError::api(status, message));
        }
        response.json().await.map_err(transport)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.inner.config.base_url, path);
        let mut request = self
            .inner
            .http
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(transport)
    }

    /// Store the new token pair: durable storage first, then memory.
    fn install_pair(&self, access: &str, refresh: &str) {
        self.inner.store.put(keys::ACCESS_TOKEN, access);
        self.inner.store.put(keys::REFRESH_TOKEN, refresh);
        let mut state = self.inner.state.lock();
        state.access = Some(access.to_owned());
        state.refresh = Some(refresh.to_owned());
    }

    fn store_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => self.inner.store.put(keys::USER, &raw),
            Err(err) => error!(error = %err, "failed to serialize user record"),
        }
    }

    fn clear_session(&self) {
        self.inner.store.remove(keys::ACCESS_TOKEN);
        self.inner.store.remove(keys::REFRESH_TOKEN);
        self.inner.store.remove(keys::USER);
        let mut state = self.inner.state.lock();
        state.access = None;
        state.refresh = None;
    }

    async fn error_message(response: Response) -> String {
        response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_owned())
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    let inner = if err.is_timeout() {
        TransportError::timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::connect(err.to_string())
    } else {
        TransportError::new(err.to_string())
    };
    inner.into()
}
