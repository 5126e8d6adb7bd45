//! Reactive Cart Store
//!
//! Every mutation updates memory first, then writes local storage and, when
//! logged in, queues a remote write. Persistence failures are reported but
//! never undo the mutation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};

use super::{load_local, save_local, Cart, Donation, WriteQueue};
use crate::api::{self, ApiClient};
use crate::error::{ApiError, CartError};
use crate::flash::{FlashChannel, Severity};
use crate::models::LineItem;
use crate::session::SessionStore;
use crate::storage::SharedStorage;

/// Outcome of the latest remote cart write
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Saving,
    Saved,
    Failed(String),
}

#[derive(Clone, Copy)]
pub struct CartStore {
    cart: RwSignal<Cart>,
    sync: RwSignal<SyncState>,
    /// Snapshots paired with the token they were taken under
    queue: StoredValue<WriteQueue<(String, Vec<LineItem>)>>,
    storage: StoredValue<SharedStorage>,
    api: StoredValue<ApiClient>,
    session: SessionStore,
    flash: FlashChannel,
}

impl CartStore {
    /// Create the store with whatever cart this device saved last
    pub fn new(storage: SharedStorage, api: ApiClient, session: SessionStore, flash: FlashChannel) -> Self {
        let cart = load_local(storage.as_ref());
        Self {
            cart: RwSignal::new(cart),
            sync: RwSignal::new(SyncState::Idle),
            queue: StoredValue::new(WriteQueue::new()),
            storage: StoredValue::new(storage),
            api: StoredValue::new(api),
            session,
            flash,
        }
    }

    pub fn add(&self, donation: Donation) -> Result<LineItem, CartError> {
        let item = self
            .cart
            .try_update(|c| c.add(donation).cloned())
            .unwrap_or(Err(CartError::Unavailable))?;
        info!(
            "Added line item {} for campaign {} to cart",
            item.id, item.campaign_id
        );
        self.persist();
        Ok(item)
    }

    /// Remove by line item id; unknown ids are ignored
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.cart.try_update(|c| c.remove(id)).unwrap_or(false);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear(&self) {
        self.cart.update(Cart::clear);
        self.persist();
    }

    pub fn list(&self) -> Vec<LineItem> {
        self.cart.with(|c| c.list().to_vec())
    }

    pub fn list_untracked(&self) -> Vec<LineItem> {
        self.cart.with_untracked(|c| c.list().to_vec())
    }

    pub fn total(&self) -> f64 {
        self.cart.with(Cart::total)
    }

    pub fn count(&self) -> usize {
        self.cart.with(Cart::count)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.with(Cart::is_empty)
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync.get()
    }

    /// Reload from local storage, dropping in-memory state
    pub fn load(&self) {
        let cart = self.storage.with_value(|s| load_local(s.as_ref()));
        self.cart.set(cart);
    }

    /// Write local storage now and queue a remote write when logged in
    pub fn persist(&self) {
        self.save_local_only();
        if let Some(token) = self.session.token_untracked() {
            self.enqueue_remote(token, self.list_untracked());
        }
    }

    /// Detach the cart from the account on logout: parked writes are
    /// dropped and the result of a running one is ignored. The local cart
    /// stays.
    pub fn forget_remote(&self) {
        let mut dropped = false;
        self.queue.update_value(|q| dropped = q.drop_pending());
        if dropped {
            debug!("Dropped a queued remote cart write");
        }
        self.sync.set(SyncState::Idle);
    }

    /// After login: adopt the account's cart when it has items, otherwise
    /// upload the one built while logged out
    pub fn sync_after_login(&self) {
        let Some(token) = self.session.token_untracked() else {
            return;
        };
        let store = *self;
        spawn_local(async move {
            let api = store.api.get_value();
            match api::get_cart(&api, Some(&token)).await {
                Ok(remote) => {
                    if !store.adopt_remote(remote) {
                        store.persist();
                    }
                }
                Err(e) => warn!("Could not load account cart: {}", e),
            }
        });
    }

    /// Replace the cart with the account's one when that has items.
    /// Returns false, leaving the cart alone, when it is empty.
    fn adopt_remote(&self, remote: Vec<LineItem>) -> bool {
        if remote.is_empty() {
            return false;
        }
        info!("Using {} cart items from account", remote.len());
        self.cart.update(|c| c.replace(remote));
        self.save_local_only();
        true
    }

    fn save_local_only(&self) {
        let saved = self
            .cart
            .with_untracked(|c| self.storage.with_value(|s| save_local(s.as_ref(), c)));
        if let Err(e) = saved {
            warn!("Could not save cart locally: {}", e);
        }
    }

    fn enqueue_remote(&self, token: String, snapshot: Vec<LineItem>) {
        let mut start = None;
        self.queue.update_value(|q| start = q.submit((token, snapshot)));
        let Some(first) = start else {
            debug!("Remote cart write queued behind the running one");
            return;
        };

        let store = *self;
        spawn_local(async move {
            let mut next = Some(first);
            while let Some((token, items)) = next {
                store.sync.set(SyncState::Saving);
                let api = store.api.get_value();
                let result = api::put_cart(&api, Some(&token), &items).await;
                if store.session.token_untracked().as_deref() == Some(token.as_str()) {
                    store.on_remote_write(result);
                } else {
                    debug!("Session changed during a remote cart write, ignoring its result");
                    store.sync.set(SyncState::Idle);
                }

                let mut following = None;
                store.queue.update_value(|q| following = q.finish());
                next = following;
            }
        });
    }

    fn on_remote_write(&self, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                debug!("Remote cart saved");
                self.sync.set(SyncState::Saved);
            }
            Err(e) => {
                warn!("Remote cart save failed: {}", e);
                self.sync.set(SyncState::Failed(e.to_string()));
                self.flash.show("Your cart could not be saved to your account", Severity::Warning);
            }
        }
    }
}
