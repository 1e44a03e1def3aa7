//! Session controller: the single source of truth for "who is logged in".

use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument};

use vantage_core::error::{AuthError, Error};
use vantage_core::models::TokenResponse;
use vantage_core::{AccessToken, AuthenticatedUser, Credentials, Result};

use crate::dispatcher::Dispatcher;
use crate::endpoints;

/// Authentication state of the application instance.
///
/// `Unknown` holds only until the first hydration completes; after that
/// the controller cycles between `Anonymous` and `Authenticated`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Hydration has not completed yet.
    Unknown,
    /// No live session.
    Anonymous,
    /// A live session with the given user.
    Authenticated(AuthenticatedUser),
}

/// Controls the session lifecycle over a [`Dispatcher`].
///
/// Owns the in-memory authentication state; the token itself lives only
/// in the dispatcher's token store. Cheap to clone; clones share state.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vantage_core::{ApiUrl, Credentials, MemoryTokenStore};
/// use vantage_http::{Dispatcher, SessionController};
///
/// # async fn example() -> vantage_core::Result<()> {
/// let base = ApiUrl::new("http://localhost:8000")?;
/// let dispatcher = Dispatcher::new(base, Arc::new(MemoryTokenStore::new()));
/// let session = SessionController::new(dispatcher);
///
/// let user = session.login(&Credentials::new("admin@example.com", "password")).await?;
/// println!("logged in as {}", user.email);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    dispatcher: Dispatcher,
    state: RwLock<SessionState>,
}

impl SessionController {
    /// Create a controller in the `Unknown` state.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                dispatcher,
                state: RwLock::new(SessionState::Unknown),
            }),
        }
    }

    /// Returns the dispatcher this controller operates through.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Turn a persisted token into a live session.
    ///
    /// With no stored token this resolves to `Anonymous` without any
    /// network call. With a token, `/auth/me` decides: success means
    /// `Authenticated`, any failure means `Anonymous` (a 401 will have
    /// already cleared the store through the dispatcher).
    #[instrument(skip(self))]
    pub async fn hydrate(&self) -> SessionState {
        if self.inner.dispatcher.store().get().is_none() {
            debug!("no stored token, skipping hydration call");
            self.set_state(SessionState::Anonymous);
            return SessionState::Anonymous;
        }

        let state = match endpoints::me(&self.inner.dispatcher).await {
            Ok(user) => {
                debug!(email = %user.email, "session hydrated");
                SessionState::Authenticated(user)
            }
            Err(e) => {
                debug!(error = %e, "hydration failed");
                SessionState::Anonymous
            }
        };

        self.set_state(state.clone());
        state
    }

    /// Authenticate with the backend.
    ///
    /// On success the returned token is persisted and the session is
    /// re-hydrated, so `current_user()` reflects the new session before
    /// this returns. On failure state and store are left as they were.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` when the backend rejects the
    /// pair; a transport error when the request cannot complete.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthenticatedUser> {
        info!("logging in");

        let response: TokenResponse =
            match endpoints::login(&self.inner.dispatcher, credentials).await {
                Ok(response) => response,
                // A 401 from the login endpoint is a rejected credential
                // pair, even when a stale stored token rode along on the
                // request and tripped the invalidation policy.
                Err(Error::Api(e)) if e.is_unauthorized() => {
                    return Err(AuthError::InvalidCredentials.into());
                }
                Err(Error::Auth(AuthError::SessionExpired)) => {
                    return Err(AuthError::InvalidCredentials.into());
                }
                Err(e) => return Err(e),
            };

        self.inner
            .dispatcher
            .store()
            .set(AccessToken::new(response.access_token));

        match endpoints::me(&self.inner.dispatcher).await {
            Ok(user) => {
                debug!(email = %user.email, "login complete");
                self.set_state(SessionState::Authenticated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                self.set_state(SessionState::Anonymous);
                Err(e)
            }
        }
    }

    /// End the session. Always succeeds.
    ///
    /// Clears the token store and resets state synchronously; no request
    /// issued after this carries the old token.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        info!("logging out");
        self.inner.dispatcher.store().clear();
        self.set_state(SessionState::Anonymous);
    }

    /// Returns the user from the latest completed transition.
    ///
    /// Never triggers a network call.
    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        match &*self.inner.state.read().unwrap() {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// Returns the current session state.
    pub fn state(&self) -> SessionState {
        self.inner.state.read().unwrap().clone()
    }

    fn set_state(&self, state: SessionState) {
        *self.inner.state.write().unwrap() = state;
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &*self.inner.state.read().unwrap())
            .finish_non_exhaustive()
    }
}
