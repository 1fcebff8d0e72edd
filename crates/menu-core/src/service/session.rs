//! Shared session handle.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::domain::{Session, TokenStoreError};
use crate::ports::TokenStore;

type Listener = Box<dyn Fn() + Send + Sync>;

/// Cloneable view of the client's single session.
///
/// Reads are in-memory only. The store is touched on [`activate`],
/// [`login`] and [`clear`].
///
/// [`activate`]: SessionHandle::activate
/// [`login`]: SessionHandle::login
/// [`clear`]: SessionHandle::clear
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<RwLock<Session>>,
    store: Arc<dyn TokenStore>,
    listeners: Arc<RwLock<Vec<Listener>>>,
}

impl SessionHandle {
    /// Create an unauthenticated handle. Call [`SessionHandle::activate`] to
    /// pick up a persisted token.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::absent())),
            store,
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Read the persisted token once and install it. No server validation.
    pub fn activate(&self) -> Result<bool, TokenStoreError> {
        let session = Session::from_token(self.store.load()?);
        let authenticated = session.is_authenticated();
        *self.session.write() = session;
        debug!(authenticated, "session activated");
        Ok(authenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().token().map(str::to_owned)
    }

    pub fn snapshot(&self) -> Session {
        self.session.read().clone()
    }

    /// Run `listener` after every sign-in and sign-out, whoever triggers it.
    pub fn on_change(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.listeners.write().push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in self.listeners.read().iter() {
            listener();
        }
    }

    /// Persist `token`, then install it.
    pub fn login(&self, token: &str) -> Result<(), TokenStoreError> {
        self.store.save(token)?;
        *self.session.write() = Session::from_token(Some(token.to_owned()));
        info!("signed in");
        self.notify();
        Ok(())
    }

    /// Drop the token in memory and in the store.
    ///
    /// The in-memory session is cleared and listeners run even when the
    /// store fails.
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        *self.session.write() = Session::absent();
        info!("signed out");
        self.notify();
        self.store.clear()
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("session", &*self.session.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryTokenStore;

    #[test]
    fn test_starts_unauthenticated_until_activated() {
        let handle = SessionHandle::new(Arc::new(MemoryTokenStore::with_token("abc")));
        assert!(!handle.is_authenticated());

        assert!(handle.activate().unwrap());
        assert!(handle.is_authenticated());
        assert_eq!(handle.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_login_persists_and_clear_removes() {
        let store = Arc::new(MemoryTokenStore::new());
        let handle = SessionHandle::new(store.clone());

        handle.login("tok").unwrap();
        assert!(handle.is_authenticated());
        assert_eq!(store.load().unwrap().as_deref(), Some("tok"));

        handle.clear().unwrap();
        assert!(!handle.is_authenticated());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let handle = SessionHandle::new(Arc::new(MemoryTokenStore::new()));
        let other = handle.clone();
        handle.login("tok").unwrap();
        assert!(other.is_authenticated());
    }

    #[test]
    fn test_listeners_run_on_login_and_clear() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let handle = SessionHandle::new(Arc::new(MemoryTokenStore::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        handle.clone().on_change(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        handle.login("tok").unwrap();
        handle.clear().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
