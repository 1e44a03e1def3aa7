//! Authorized request dispatcher.
//!
//! Every backend call passes through [`Dispatcher`]. It is the only place
//! where bearer tokens are attached to requests and where authorization
//! failures are turned into session invalidation. Callers never duplicate
//! either concern.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use vantage_core::error::{AuthError, Error};
use vantage_core::{ApiUrl, TokenStore};

use crate::client::ApiClient;

/// Policy invoked when a live session is invalidated by the backend.
///
/// In a UI this is where "redirect to the login view" happens; the CLI
/// uses it to drop the persisted session file. Invoked exactly once per
/// failing response that carried a token.
pub trait InvalidationHook: Send + Sync {
    fn session_invalidated(&self);
}

/// Hook that does nothing. Default when no policy is installed.
#[derive(Debug, Default)]
pub struct NoopHook;

impl InvalidationHook for NoopHook {
    fn session_invalidated(&self) {}
}

/// The single choke point for backend calls.
///
/// Reads the token store before each dispatch and attaches the token as
/// a bearer credential when present; requests without a stored token go
/// out unauthenticated (the login endpoint is public). A 401 response
/// to a request that carried a token clears the store and invokes the
/// invalidation hook; a 401 to an unauthenticated request is passed
/// through untouched.
///
/// Cheap to clone; clones share the same store and hook.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    hook: Arc<dyn InvalidationHook>,
}

impl Dispatcher {
    /// Create a dispatcher with no invalidation policy installed.
    pub fn new(base: ApiUrl, store: Arc<dyn TokenStore>) -> Self {
        Self::with_hook(base, store, Arc::new(NoopHook))
    }

    /// Create a dispatcher with an invalidation policy.
    pub fn with_hook(
        base: ApiUrl,
        store: Arc<dyn TokenStore>,
        hook: Arc<dyn InvalidationHook>,
    ) -> Self {
        Self {
            inner: Arc::new(DispatcherInner {
                client: ApiClient::new(base),
                store,
                hook,
            }),
        }
    }

    /// Returns the token store backing this dispatcher.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.store
    }

    /// Returns the backend base URL.
    pub fn base(&self) -> &ApiUrl {
        self.inner.client.base()
    }

    /// GET an endpoint and decode the JSON response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, Error> {
        let token = self.inner.store.get();
        let had_token = token.is_some();
        let result = self
            .inner
            .client
            .get(path, None::<&()>, token.as_ref())
            .await;
        self.check_authorization(had_token, result)
    }

    /// GET an endpoint with query parameters and decode the JSON response.
    pub async fn get_query<Q, R>(&self, path: &str, params: &Q) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let token = self.inner.store.get();
        let had_token = token.is_some();
        let result = self
            .inner
            .client
            .get(path, Some(params), token.as_ref())
            .await;
        self.check_authorization(had_token, result)
    }

    /// POST a form-encoded body and decode the JSON response.
    pub async fn post_form<F, R>(&self, path: &str, form: &F) -> Result<R, Error>
    where
        F: Serialize,
        R: DeserializeOwned,
    {
        let token = self.inner.store.get();
        let had_token = token.is_some();
        let result = self.inner.client.post_form(path, form, token.as_ref()).await;
        self.check_authorization(had_token, result)
    }

    /// Apply the invalidation policy to a completed request.
    ///
    /// `had_token` is evaluated per request at dispatch time: concurrent
    /// requests racing against an invalidation each make their own call,
    /// and the net effect (cleared store, hook fired) is idempotent.
    fn check_authorization<R>(
        &self,
        had_token: bool,
        result: Result<R, Error>,
    ) -> Result<R, Error> {
        match result {
            Err(Error::Api(e)) if e.is_unauthorized() && had_token => {
                warn!("stored token rejected by backend, clearing session");
                self.inner.store.clear();
                self.inner.hook.session_invalidated();
                Err(Error::Auth(AuthError::SessionExpired))
            }
            Err(Error::Api(e)) if e.is_unauthorized() => {
                debug!("unauthenticated request rejected, no session to clear");
                Err(Error::Api(e))
            }
            other => other,
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base", self.inner.client.base())
            .finish_non_exhaustive()
    }
}
