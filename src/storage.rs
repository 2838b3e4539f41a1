use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;
use crate::models::Session;

pub const USER_ID_KEY: &str = "user_id";
pub const NAME_KEY: &str = "name";
pub const MONTHLY_LIMIT_KEY: &str = "monthlyLimit";

/// String key/value persistence, the shape of the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            _ => Err(StorageError::Unavailable),
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }
}

/// In-process store used off the browser.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Reads and writes the persisted session and the local monthly limit.
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The name goes in first so a tab reacting to the `user_id` write
    /// already sees the matching name.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        self.storage.set(NAME_KEY, &session.display_name)?;
        self.storage.set(USER_ID_KEY, &session.user_id)
    }

    /// `None` whenever no usable user id is stored; that is the logged-out signal.
    pub fn load(&self) -> Option<Session> {
        let user_id = self
            .storage
            .get(USER_ID_KEY)
            .filter(|id| !id.trim().is_empty())?;
        let display_name = self.storage.get(NAME_KEY).unwrap_or_default();
        Some(Session {
            user_id,
            display_name,
        })
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(USER_ID_KEY)?;
        self.storage.remove(NAME_KEY)
    }

    pub fn load_monthly_limit(&self, default: f64) -> f64 {
        self.storage
            .get(MONTHLY_LIMIT_KEY)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|limit| limit.is_finite())
            .unwrap_or(default)
    }

    pub fn save_monthly_limit(&self, limit: f64) -> Result<(), StorageError> {
        self.storage.set(MONTHLY_LIMIT_KEY, &limit.to_string())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl SessionStore<BrowserStorage> {
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }
}

/// True when a `storage` event for `key` can change the signed-in identity.
/// A `None` key is what the browser sends for `localStorage.clear()`.
pub fn affects_session(key: Option<&str>) -> bool {
    matches!(key, None | Some(USER_ID_KEY) | Some(NAME_KEY))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            user_id: "7".into(),
            display_name: "Asha Rao".into(),
        }
    }

    #[test]
    fn save_then_load_returns_pair() {
        let store = SessionStore::new(MemoryStorage::new());
        store.save(&session()).unwrap();
        assert_eq!(store.load(), Some(session()));
    }

    #[test]
    fn clear_removes_both_fields() {
        let store = SessionStore::new(MemoryStorage::new());
        store.save(&session()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
        assert_eq!(store.storage().get(NAME_KEY), None);
    }

    #[test]
    fn blank_user_id_means_logged_out() {
        let storage = MemoryStorage::new();
        storage.set(USER_ID_KEY, "").unwrap();
        storage.set(NAME_KEY, "Ghost").unwrap();
        assert_eq!(SessionStore::new(storage).load(), None);
    }

    #[test]
    fn missing_name_loads_empty() {
        let storage = MemoryStorage::new();
        storage.set(USER_ID_KEY, "3").unwrap();
        let loaded = SessionStore::new(storage).load().unwrap();
        assert_eq!(loaded.display_name, "");
    }

    #[test]
    fn monthly_limit_round_trips_and_defaults() {
        let store = SessionStore::new(MemoryStorage::new());
        assert_eq!(store.load_monthly_limit(10_000.0), 10_000.0);
        store.save_monthly_limit(2500.5).unwrap();
        assert_eq!(store.load_monthly_limit(10_000.0), 2500.5);
        store.storage().set(MONTHLY_LIMIT_KEY, "lots").unwrap();
        assert_eq!(store.load_monthly_limit(10_000.0), 10_000.0);
    }

    #[test]
    fn only_identity_or_clear_events_matter() {
        assert!(affects_session(Some("user_id")));
        assert!(affects_session(Some("name")));
        assert!(affects_session(None));
        assert!(!affects_session(Some("monthlyLimit")));
    }

    /// Records the session another tab would load after each write event.
    #[derive(Default)]
    struct ObservedStorage {
        inner: MemoryStorage,
        seen: RefCell<Vec<(String, Option<Session>)>>,
    }

    impl KeyValueStore for ObservedStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value)?;
            let other_tab = self.inner.get(USER_ID_KEY).map(|user_id| Session {
                user_id,
                display_name: self.inner.get(NAME_KEY).unwrap_or_default(),
            });
            self.seen.borrow_mut().push((key.to_string(), other_tab));
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn other_tabs_never_see_a_new_id_with_the_old_name() {
        let storage = ObservedStorage::default();
        storage.inner.set(USER_ID_KEY, "1").unwrap();
        storage.inner.set(NAME_KEY, "Old User").unwrap();

        let store = SessionStore::new(storage);
        store.save(&session()).unwrap();

        let seen = store.storage().seen.borrow();
        let on_id_event = seen
            .iter()
            .find(|(key, _)| key == USER_ID_KEY)
            .and_then(|(_, loaded)| loaded.clone());
        assert_eq!(on_id_event, Some(session()));
        assert!(seen
            .iter()
            .all(|(key, _)| affects_session(Some(key.as_str()))));
    }
}
