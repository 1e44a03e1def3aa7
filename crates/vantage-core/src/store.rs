//! Token storage contract.

use std::sync::RwLock;

use crate::token::AccessToken;

/// Storage for at most one bearer token.
///
/// This is the only place a token may be persisted. Absence of a token
/// means the user is unauthenticated, regardless of any other in-memory
/// state. Implementations must not fail: `get` has no side effects,
/// `set` overwrites, and `clear` is idempotent.
pub trait TokenStore: Send + Sync {
    /// Returns the current token, if one is stored.
    fn get(&self) -> Option<AccessToken>;

    /// Persists a token, overwriting any previous value.
    fn set(&self, token: AccessToken);

    /// Removes any stored token. Idempotent.
    fn clear(&self);
}

/// In-memory token store.
///
/// Does not survive process restart; suitable for tests and for
/// embedding the client where no durable session is wanted.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a token.
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<AccessToken> {
        self.token.read().unwrap().clone()
    }

    fn set(&self, token: AccessToken) {
        *self.token.write().unwrap() = Some(token);
    }

    fn clear(&self) {
        *self.token.write().unwrap() = None;
    }
}
