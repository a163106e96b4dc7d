//! Application state shared by every page.
//!
//! The session record, the pinned jar items and the active account only
//! change through [`AppStore`], which writes through to durable storage and
//! notifies subscribers.

use crate::config::Config;
use crate::constants::{PINNED_JAR_ITEMS_KEY, SESSION_KEY};
use crate::error::StorageError;
use crate::jar::{PinSet, annotate_pins};
use crate::models::{JarItem, SessionUser, UserId};
use crate::storage::{KeyValueStore, load_json, save_json};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    SessionChanged { user_id: Option<UserId> },
    PinsChanged { item_id: i64, pinned: bool },
    ActiveAccountChanged { account_id: Option<i64> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&StoreEvent)>;

pub struct AppStore<S: KeyValueStore> {
    storage: S,
    session_key: String,
    pins_key: String,
    session: Option<SessionUser>,
    pins: PinSet,
    active_account: Option<i64>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> AppStore<S> {
    /// Loads the stored session and pins. Unreadable records are logged and ignored.
    pub fn open(storage: S, config: &Config) -> Self {
        let session_key = config.storage_key(SESSION_KEY);
        let pins_key = config.storage_key(PINNED_JAR_ITEMS_KEY);

        let session = match load_json::<SessionUser>(&storage, &session_key) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring stored session: {}", e);
                None
            }
        };
        let pins = PinSet::load(&storage, &pins_key);

        Self {
            storage,
            session_key,
            pins_key,
            session,
            pins,
            active_account: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }

    fn emit(&self, event: StoreEvent) {
        for (_, listener) in &self.listeners {
            listener(&event);
        }
    }

    // Session

    pub fn session(&self) -> Option<&SessionUser> {
        self.session.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn sign_in(&mut self, user: SessionUser) -> Result<(), StorageError> {
        save_json(&mut self.storage, &self.session_key, &user)?;
        tracing::info!("Signed in as {}", user.username);
        let user_id = Some(user.id);
        self.session = Some(user);
        self.emit(StoreEvent::SessionChanged { user_id });
        Ok(())
    }

    /// Clears the session. Pins stay, they belong to the device.
    ///
    /// The in-memory session is always cleared; a failure to remove the
    /// stored copy is returned afterwards.
    pub fn sign_out(&mut self) -> Result<(), StorageError> {
        self.session = None;
        tracing::info!("Signed out");
        self.emit(StoreEvent::SessionChanged { user_id: None });
        self.set_active_account(None);
        self.storage.remove(&self.session_key)
    }

    // Pins

    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    /// Flips the pin and persists the whole set. On a storage failure the
    /// in-memory set is left as it was.
    pub fn toggle_pin(&mut self, item_id: i64) -> Result<bool, StorageError> {
        let mut next = self.pins.clone();
        let pinned = next.toggle(item_id);
        next.save(&mut self.storage, &self.pins_key)?;
        self.pins = next;
        self.emit(StoreEvent::PinsChanged { item_id, pinned });
        Ok(pinned)
    }

    /// Forgets the pin of a deleted item.
    pub fn forget_item(&mut self, item_id: i64) -> Result<(), StorageError> {
        let mut next = self.pins.clone();
        if next.unpin(item_id) {
            next.save(&mut self.storage, &self.pins_key)?;
            self.pins = next;
            self.emit(StoreEvent::PinsChanged {
                item_id,
                pinned: false,
            });
        }
        Ok(())
    }

    /// Merges the local pins into freshly fetched items.
    pub fn annotate(&self, items: &mut [JarItem]) {
        annotate_pins(items, &self.pins);
    }

    // Accounts

    pub fn active_account(&self) -> Option<i64> {
        self.active_account
    }

    pub fn set_active_account(&mut self, account_id: Option<i64>) {
        if self.active_account != account_id {
            self.active_account = account_id;
            self.emit(StoreEvent::ActiveAccountChanged { account_id });
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
