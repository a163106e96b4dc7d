use jubuddy::{KeyValueStore, MemoryStorage, StorageError};

/// `window.localStorage`, or an in-memory map when the browser refuses access
/// (private mode, disabled storage). The in-memory fallback lasts for the tab.
pub enum BrowserStorage {
    Local(web_sys::Storage),
    Memory(MemoryStorage),
}

impl BrowserStorage {
    pub fn open() -> Self {
        match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => BrowserStorage::Local(storage),
            _ => {
                dioxus::logger::tracing::warn!("localStorage unavailable, pins and session will not persist");
                BrowserStorage::Memory(MemoryStorage::new())
            }
        }
    }
}

fn js_error(err: wasm_bindgen::JsValue) -> String {
    format!("{:?}", err)
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            BrowserStorage::Local(storage) => storage
                .get_item(key)
                .map_err(|e| StorageError::Unavailable(js_error(e))),
            BrowserStorage::Memory(memory) => memory.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            BrowserStorage::Local(storage) => {
                storage
                    .set_item(key, value)
                    .map_err(|e| StorageError::Write {
                        key: key.to_string(),
                        reason: js_error(e),
                    })
            }
            BrowserStorage::Memory(memory) => memory.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match self {
            BrowserStorage::Local(storage) => storage
                .remove_item(key)
                .map_err(|e| StorageError::Unavailable(js_error(e))),
            BrowserStorage::Memory(memory) => memory.remove(key),
        }
    }
}
