use std::cell::RefCell;
use std::rc::Rc;

use jubuddy::constants::{PINNED_JAR_ITEMS_KEY, SESSION_KEY};
use jubuddy::jar::priority_items;
use jubuddy::models::{JarItem, JarStatus, SessionUser};
use jubuddy::{AppStore, Config, KeyValueStore, MemoryStorage, StorageError, StoreEvent};

fn user(id: i64, username: &str) -> SessionUser {
    SessionUser {
        id,
        username: username.to_string(),
        profile: serde_json::Map::new(),
    }
}

fn item(id: i64, status: JarStatus) -> JarItem {
    JarItem {
        id,
        name: format!("Item {}", id),
        cost: 100.0 * id as f64,
        status,
        date_added: "2024-03-01".to_string(),
        hold_until: None,
        is_expired: false,
        is_pinned: false,
    }
}

/// Storage that rejects every write.
#[derive(Default)]
struct ReadOnlyStorage {
    inner: MemoryStorage,
}

impl KeyValueStore for ReadOnlyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_string(),
            reason: "quota exceeded".to_string(),
        })
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read only".to_string()))
    }
}

#[test]
fn session_survives_reopen() {
    let config = Config::default();
    let mut store = AppStore::open(MemoryStorage::new(), &config);
    assert!(store.session().is_none());

    store.sign_in(user(7, "ana")).unwrap();
    assert_eq!(store.user_id(), Some(7));

    let storage = store.storage().clone();
    let reopened = AppStore::open(storage, &config);
    assert_eq!(reopened.session(), Some(&user(7, "ana")));
}

#[test]
fn sign_out_clears_session_but_keeps_pins() {
    let config = Config::default();
    let mut store = AppStore::open(MemoryStorage::new(), &config);
    store.sign_in(user(7, "ana")).unwrap();
    store.toggle_pin(3).unwrap();
    store.set_active_account(Some(2));

    store.sign_out().unwrap();

    assert!(store.session().is_none());
    assert_eq!(store.active_account(), None);
    assert!(store.pins().contains(3));
    let storage = store.storage();
    assert_eq!(storage.get(&config.storage_key(SESSION_KEY)).unwrap(), None);
}

#[test]
fn pins_persist_on_every_toggle() {
    let config = Config::default();
    let mut store = AppStore::open(MemoryStorage::new(), &config);

    assert!(store.toggle_pin(4).unwrap());
    assert!(store.toggle_pin(1).unwrap());
    assert!(!store.toggle_pin(4).unwrap());
    assert!(store.toggle_pin(6).unwrap());

    let raw = store
        .storage()
        .get(&config.storage_key(PINNED_JAR_ITEMS_KEY))
        .unwrap();
    assert_eq!(raw.as_deref(), Some("[1,6]"));

    let reopened = AppStore::open(store.storage().clone(), &config);
    assert_eq!(reopened.pins().ids(), &[1, 6]);
}

#[test]
fn fetched_items_are_annotated_and_prioritised() {
    let config = Config::default();
    let mut store = AppStore::open(MemoryStorage::new(), &config);
    store.toggle_pin(3).unwrap();
    store.toggle_pin(1).unwrap();
    store.toggle_pin(2).unwrap();

    let mut items = vec![
        item(1, JarStatus::OnHold),
        item(2, JarStatus::Purchased),
        item(3, JarStatus::OnHold),
        item(4, JarStatus::OnHold),
    ];
    store.annotate(&mut items);

    let pinned: Vec<i64> = items.iter().filter(|i| i.is_pinned).map(|i| i.id).collect();
    assert_eq!(pinned, vec![1, 2, 3]);
    let priority: Vec<i64> = priority_items(&items, store.pins())
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(priority, vec![3, 1]);
}

#[test]
fn deleting_an_item_forgets_its_pin() {
    let config = Config::default();
    let mut store = AppStore::open(MemoryStorage::new(), &config);
    store.toggle_pin(8).unwrap();

    store.forget_item(8).unwrap();
    store.forget_item(99).unwrap();

    assert!(store.pins().is_empty());
}

#[test]
fn corrupt_records_are_ignored_on_open() {
    let config = Config::default();
    let mut storage = MemoryStorage::new();
    storage
        .set(&config.storage_key(SESSION_KEY), "{not json")
        .unwrap();
    storage
        .set(&config.storage_key(PINNED_JAR_ITEMS_KEY), "\"oops\"")
        .unwrap();

    let store = AppStore::open(storage, &config);

    assert!(store.session().is_none());
    assert!(store.pins().is_empty());
}

#[test]
fn failed_pin_write_leaves_pins_untouched() {
    let config = Config::default();
    let mut store = AppStore::open(ReadOnlyStorage::default(), &config);

    let err = store.toggle_pin(5).unwrap_err();

    assert!(matches!(err, StorageError::Write { .. }));
    assert!(!store.pins().contains(5));
    assert!(store.sign_in(user(1, "ben")).is_err());
    assert!(store.session().is_none());
}

#[test]
fn subscribers_see_changes_until_unsubscribed() {
    let config = Config::default();
    let mut store = AppStore::open(MemoryStorage::new(), &config);
    let seen: Rc<RefCell<Vec<StoreEvent>>> = Rc::default();

    let sink = Rc::clone(&seen);
    let id = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    store.sign_in(user(7, "ana")).unwrap();
    store.toggle_pin(2).unwrap();
    store.set_active_account(Some(11));
    store.set_active_account(Some(11));
    store.unsubscribe(id);
    store.toggle_pin(2).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            StoreEvent::SessionChanged { user_id: Some(7) },
            StoreEvent::PinsChanged {
                item_id: 2,
                pinned: true
            },
            StoreEvent::ActiveAccountChanged {
                account_id: Some(11)
            },
        ]
    );
}

#[test]
fn storage_keys_use_the_configured_prefix() {
    let config = Config {
        storage_prefix: "profile-b".to_string(),
        ..Config::default()
    };
    let mut store = AppStore::open(MemoryStorage::new(), &config);
    store.toggle_pin(1).unwrap();

    assert_eq!(
        store.storage().get("profile-b.pinned_jar_items").unwrap().as_deref(),
        Some("[1]")
    );
    assert_eq!(store.storage().get("jubuddy.pinned_jar_items").unwrap(), None);
}

#[test]
fn sign_out_clears_memory_even_when_storage_fails() {
    let config = Config::default();
    let mut storage = ReadOnlyStorage::default();
    storage
        .inner
        .set(
            &config.storage_key(SESSION_KEY),
            &serde_json::to_string(&user(7, "ana")).unwrap(),
        )
        .unwrap();
    let mut store = AppStore::open(storage, &config);
    assert_eq!(store.user_id(), Some(7));
    store.set_active_account(Some(3));

    let err = store.sign_out().unwrap_err();

    assert!(matches!(err, StorageError::Unavailable(_)));
    assert!(store.session().is_none());
    assert_eq!(store.active_account(), None);
}
