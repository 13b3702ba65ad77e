//! The cart synchronization core.
//!
//! Every operation (startup, refresh and each mutation) runs under one FIFO
//! session lock for its whole identity, gateway and commit sequence. A second
//! caller queues behind the first, so a missing identity is never resolved
//! twice at once and snapshot replacements apply in issue order.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use shopfront_core::{
    CartGateway, CartIdentity, CartLineInput, CartLineUpdate, CartSnapshot, RemoteError,
};
use tokio::sync::{watch, Mutex, MutexGuard};

use crate::error::CartError;
use crate::identity::IdentityStore;
use crate::state::CartState;

#[derive(Debug, Default)]
struct Session {
    initialized: bool,
    snapshot: Option<Arc<CartSnapshot>>,
}

impl Session {
    fn identity(&self) -> Option<CartIdentity> {
        self.snapshot.as_ref().map(|s| s.id.clone())
    }
}

/// Exclusive access to the session for one operation.
///
/// If the operation's future is dropped while a mutation is pending, the
/// guard republishes the committed session so observers are not left with a
/// pending state that no longer matches it.
struct SessionGuard<'a> {
    session: MutexGuard<'a, Session>,
    state: &'a watch::Sender<CartState>,
}

impl Deref for SessionGuard<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.session
    }
}

impl DerefMut for SessionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        let session = &*self.session;
        self.state.send_if_modified(|state| {
            if !state.pending {
                return false;
            }
            tracing::debug!("cart operation cancelled; republishing committed state");
            state.pending = false;
            state.initialized = session.initialized;
            state.snapshot.clone_from(&session.snapshot);
            true
        });
    }
}

/// Single owner of the shopper's cart identity and snapshot.
pub struct CartSync<G, S> {
    gateway: G,
    identity_store: S,
    session: Mutex<Session>,
    state: watch::Sender<CartState>,
    open: watch::Sender<bool>,
}

impl<G: CartGateway, S: IdentityStore> CartSync<G, S> {
    /// Creates the core in the loading state. Nothing is read or fetched
    /// until [`Self::initialize`] or the first operation.
    #[must_use]
    pub fn new(gateway: G, identity_store: S) -> Self {
        let (state, _) = watch::channel(CartState::default());
        let (open, _) = watch::channel(false);
        Self {
            gateway,
            identity_store,
            session: Mutex::new(Session::default()),
            state,
            open,
        }
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    #[must_use]
    pub fn identity_store(&self) -> &S {
        &self.identity_store
    }

    /// The most recently committed state.
    #[must_use]
    pub fn state(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every committed state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Runs the startup protocol if it has not run yet.
    ///
    /// Never fails: a stale or unreachable persisted cart is discarded and
    /// the problem is recorded in [`CartState::error`].
    pub async fn initialize(&self) -> CartState {
        let mut session = self.lock().await;
        self.ensure_initialized(&mut session).await;
        self.state()
    }

    /// Fetches the held cart again and applies the startup adoption rules.
    ///
    /// Uses the in-session identity, falling back to the persisted one.
    pub async fn refresh_cart(&self) -> CartState {
        let mut session = self.lock().await;
        if session.initialized {
            self.mark_pending();
            let identity = session.identity().or_else(|| self.read_persisted());
            self.validate(&mut session, identity).await;
        } else {
            self.ensure_initialized(&mut session).await;
        }
        self.state()
    }

    /// Adds `quantity` of `variant_id`, creating the remote cart first if
    /// none is held.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] if `quantity` is 0.
    /// - [`CartError::Remote`] if creating the cart or adding the line fails.
    pub async fn add_item(
        &self,
        variant_id: &str,
        quantity: u32,
    ) -> Result<CartSnapshot, CartError> {
        let mut session = self.lock().await;
        if quantity == 0 {
            return Err(self.reject(
                "add_item",
                CartError::InvalidQuantity {
                    quantity: 0,
                    reason: "must be at least 1",
                },
            ));
        }
        self.ensure_initialized(&mut session).await;
        self.mark_pending();

        let result = match self.get_or_create_identity(&mut session).await {
            Ok(identity) => {
                let lines = [CartLineInput {
                    merchandise_id: variant_id.to_owned(),
                    quantity,
                }];
                self.gateway.add_lines(&identity, &lines).await
            }
            Err(e) => Err(e),
        };
        self.settle(&mut session, "add_item", result)
    }

    /// Removes one line from the held cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::NoActiveCart`] if no cart is held.
    /// - [`CartError::Remote`] if the removal fails.
    pub async fn remove_item(&self, line_id: &str) -> Result<CartSnapshot, CartError> {
        let mut session = self.lock().await;
        self.ensure_initialized(&mut session).await;
        self.remove_locked(&mut session, line_id).await
    }

    /// Sets a line's quantity. A quantity of 0 or less removes the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::NoActiveCart`] if no cart is held.
    /// - [`CartError::InvalidQuantity`] if `quantity` does not fit a line.
    /// - [`CartError::Remote`] if the update fails.
    pub async fn update_item_quantity(
        &self,
        line_id: &str,
        quantity: i64,
    ) -> Result<CartSnapshot, CartError> {
        let mut session = self.lock().await;
        self.ensure_initialized(&mut session).await;

        if quantity <= 0 {
            return self.remove_locked(&mut session, line_id).await;
        }
        let Ok(quantity) = u32::try_from(quantity) else {
            return Err(self.reject(
                "update_item_quantity",
                CartError::InvalidQuantity {
                    quantity,
                    reason: "exceeds the maximum line quantity",
                },
            ));
        };

        let Some(identity) = session.identity() else {
            return Err(self.reject("update_item_quantity", CartError::NoActiveCart));
        };
        self.mark_pending();
        let lines = [CartLineUpdate {
            line_id: line_id.to_owned(),
            quantity,
        }];
        let result = self.gateway.update_lines(&identity, &lines).await;
        self.settle(&mut session, "update_item_quantity", result)
    }

    pub fn open_cart(&self) {
        self.open.send_replace(true);
    }

    pub fn close_cart(&self) {
        self.open.send_replace(false);
    }

    /// Flips the UI-open flag and returns the new value.
    pub fn toggle_cart(&self) -> bool {
        let mut now_open = false;
        self.open.send_modify(|open| {
            *open = !*open;
            now_open = *open;
        });
        now_open
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    #[must_use]
    pub fn subscribe_open(&self) -> watch::Receiver<bool> {
        self.open.subscribe()
    }

    async fn ensure_initialized(&self, session: &mut Session) {
        if session.initialized {
            return;
        }
        let persisted = self.read_persisted();
        self.validate(session, persisted).await;
    }

    /// Fetch-and-validate: adopts the remote cart behind `identity`, or
    /// discards the identity when the cart is gone or unreachable.
    async fn validate(&self, session: &mut Session, identity: Option<CartIdentity>) {
        let Some(identity) = identity else {
            session.initialized = true;
            session.snapshot = None;
            self.publish(session, None);
            return;
        };

        let result = self.gateway.get_cart(&identity).await;
        session.initialized = true;
        match result {
            Ok(Some(snapshot)) => {
                if snapshot.id != identity {
                    self.persist(&snapshot.id);
                }
                tracing::debug!(cart_id = %snapshot.id, lines = snapshot.lines.len(), "adopted remote cart");
                session.snapshot = Some(Arc::new(snapshot));
                self.publish(session, None);
            }
            Ok(None) | Err(RemoteError::NotFound(_)) => {
                tracing::info!(cart_id = %identity, "remote cart no longer exists; starting fresh");
                self.forget_persisted();
                session.snapshot = None;
                self.publish(session, None);
            }
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!(cart_id = %identity, error = %e, "cart unreachable during validation; discarding identity");
                } else {
                    tracing::error!(cart_id = %identity, error = %e, "cart rejected during validation; discarding identity");
                }
                self.forget_persisted();
                session.snapshot = None;
                self.publish(session, Some(e.to_string()));
            }
        }
    }

    async fn get_or_create_identity(
        &self,
        session: &mut Session,
    ) -> Result<CartIdentity, RemoteError> {
        if let Some(identity) = session.identity() {
            return Ok(identity);
        }
        let snapshot = self.gateway.create_cart(&[]).await?;
        tracing::info!(cart_id = %snapshot.id, "created cart");
        Ok(self.adopt(session, snapshot).id.clone())
    }

    async fn remove_locked(
        &self,
        session: &mut Session,
        line_id: &str,
    ) -> Result<CartSnapshot, CartError> {
        let Some(identity) = session.identity() else {
            return Err(self.reject("remove_item", CartError::NoActiveCart));
        };
        self.mark_pending();
        let result = self
            .gateway
            .remove_lines(&identity, &[line_id.to_owned()])
            .await;
        self.settle(session, "remove_item", result)
    }

    /// Replaces the snapshot, persisting the identity when it changed.
    fn adopt(&self, session: &mut Session, snapshot: CartSnapshot) -> Arc<CartSnapshot> {
        let held = session.snapshot.as_ref().map(|s| &s.id);
        if held != Some(&snapshot.id) {
            self.persist(&snapshot.id);
        }
        let snapshot = Arc::new(snapshot);
        session.snapshot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Commits the outcome of a mutation and publishes it.
    fn settle(
        &self,
        session: &mut Session,
        operation: &'static str,
        result: Result<CartSnapshot, RemoteError>,
    ) -> Result<CartSnapshot, CartError> {
        match result {
            Ok(snapshot) => {
                let snapshot = self.adopt(session, snapshot);
                tracing::debug!(operation, cart_id = %snapshot.id, items = snapshot.total_quantity(), "cart updated");
                self.publish(session, None);
                Ok(CartSnapshot::clone(&snapshot))
            }
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!(operation, error = %e, "cart operation failed; retrying may succeed");
                } else {
                    tracing::info!(operation, error = %e, "cart operation rejected");
                }
                if let RemoteError::NotFound(ref id) = e {
                    tracing::info!(cart_id = %id, "held cart expired; discarding identity");
                    session.snapshot = None;
                    self.forget_persisted();
                }
                self.publish(session, Some(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Records a failure detected before any remote call. The committed
    /// snapshot is left as it is.
    fn reject(&self, operation: &'static str, err: CartError) -> CartError {
        tracing::debug!(operation, error = %err, "cart operation rejected locally");
        let message = err.to_string();
        self.state.send_modify(|state| {
            state.pending = false;
            state.error = Some(message);
        });
        err
    }

    async fn lock(&self) -> SessionGuard<'_> {
        SessionGuard {
            session: self.session.lock().await,
            state: &self.state,
        }
    }

    fn mark_pending(&self) {
        self.state.send_modify(|state| state.pending = true);
    }

    fn publish(&self, session: &Session, error: Option<String>) {
        self.state.send_replace(CartState {
            initialized: session.initialized,
            pending: false,
            snapshot: session.snapshot.clone(),
            error,
        });
    }

    fn read_persisted(&self) -> Option<CartIdentity> {
        self.identity_store.get().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read persisted cart identity");
            None
        })
    }

    fn persist(&self, identity: &CartIdentity) {
        if let Err(e) = self.identity_store.set(identity) {
            tracing::warn!(cart_id = %identity, error = %e, "failed to persist cart identity");
        }
    }

    fn forget_persisted(&self) {
        if let Err(e) = self.identity_store.clear() {
            tracing::warn!(error = %e, "failed to clear persisted cart identity");
        }
    }
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
