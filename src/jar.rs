//! Virtual jar items and the locally pinned priority set.
//!
//! Pins are a per-device preference. They are kept in local storage, merged
//! into freshly fetched items on every load, and never sent to the backend.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_JAR_ITEM_NAME_LENGTH;
use crate::error::{StorageError, ValidationError};
use crate::models::{CreateJarItemPayload, JarItem, JarStatus, UserId};
use crate::storage::{KeyValueStore, load_json, save_json};

/// Pinned item ids in the order they were pinned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinSet {
    ids: Vec<i64>,
}

impl PinSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(id) {
                set.ids.push(id);
            }
        }
        set
    }

    /// Reads the stored set. Unreadable data is logged and treated as empty.
    pub fn load(store: &impl KeyValueStore, key: &str) -> Self {
        match load_json::<Vec<i64>>(store, key) {
            Ok(Some(ids)) => Self::from_ids(ids),
            Ok(None) => Self::new(),
            Err(e) => {
                tracing::warn!("Ignoring stored pins: {}", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore, key: &str) -> Result<(), StorageError> {
        save_json(store, key, &self.ids)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Flips membership of `id`; returns whether it is now pinned.
    pub fn toggle(&mut self, id: i64) -> bool {
        match self.ids.iter().position(|&pinned| pinned == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    /// Returns whether `id` was pinned.
    pub fn unpin(&mut self, id: i64) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&pinned| pinned != id);
        self.ids.len() != before
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Sets `is_pinned` on every item from the local pin set.
pub fn annotate_pins(items: &mut [JarItem], pins: &PinSet) {
    for item in items.iter_mut() {
        item.is_pinned = pins.contains(item.id);
    }
}

/// Pinned items still purchasable, in the order they were pinned.
pub fn priority_items<'a>(items: &'a [JarItem], pins: &PinSet) -> Vec<&'a JarItem> {
    pins.ids()
        .iter()
        .filter_map(|id| items.iter().find(|item| item.id == *id))
        .filter(|item| can_purchase(item).is_ok())
        .collect()
}

/// Items on hold whose name matches `search`.
pub fn active_items<'a>(items: &'a [JarItem], search: &str) -> Vec<&'a JarItem> {
    let needle = search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| item.status == JarStatus::OnHold && !item.is_expired)
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .collect()
}

/// Purchased and expired items.
pub fn history_items(items: &[JarItem]) -> Vec<&JarItem> {
    items
        .iter()
        .filter(|item| item.status.is_terminal() || item.is_expired)
        .collect()
}

pub fn jar_total(items: &[&JarItem]) -> f64 {
    items.iter().map(|item| item.cost).sum()
}

pub fn can_purchase(item: &JarItem) -> Result<(), ValidationError> {
    if item.status == JarStatus::OnHold && !item.is_expired {
        Ok(())
    } else {
        Err(ValidationError::ItemNotOnHold("purchased"))
    }
}

/// Deletion is offered for items on hold and for items already in history.
pub fn can_delete(item: &JarItem) -> bool {
    item.status == JarStatus::OnHold || item.status.is_terminal()
}

pub fn validate_new_item(
    name: &str,
    raw_cost: &str,
    user_id: UserId,
) -> Result<CreateJarItemPayload, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required("Item name"));
    }
    if name.chars().count() > MAX_JAR_ITEM_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "Item name",
            max: MAX_JAR_ITEM_NAME_LENGTH,
        });
    }

    let cost = raw_cost
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or(ValidationError::InvalidAmount)?;

    Ok(CreateJarItemPayload {
        user_id,
        name: name.to_string(),
        cost,
    })
}
