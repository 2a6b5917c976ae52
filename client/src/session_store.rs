use std::{cell::RefCell, rc::Rc};

use dioxus::logger::tracing::debug;
use shared::{Session, StoredUser};

use crate::config::ClientConfig;

/// Persisted session identity.
///
/// Writes report success as `bool` and log their own failures; a store that
/// cannot be read behaves as if nobody is logged in.
pub trait SessionStore {
    fn load_user(&self) -> Option<StoredUser>;

    fn save_user(&self, user: &StoredUser) -> bool;

    fn remove_user(&self) -> bool;

    fn user_name(&self) -> Option<String> {
        self.load_user().map(|user| user.login)
    }

    fn session(&self) -> Session {
        self.load_user().into()
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: RefCell<Option<StoredUser>>,
}

impl MemorySessionStore {
    pub fn with_user(user: StoredUser) -> Self {
        Self {
            user: RefCell::new(Some(user)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load_user(&self) -> Option<StoredUser> {
        self.user.borrow().clone()
    }

    fn save_user(&self, user: &StoredUser) -> bool {
        *self.user.borrow_mut() = Some(user.clone());
        true
    }

    fn remove_user(&self) -> bool {
        self.user.borrow_mut().take();
        true
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileSessionStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::{
        path::{Path, PathBuf},
        sync::LazyLock,
    };

    use platform_dirs::AppDirs;
    use shared::{
        StoredUser,
        storage::{GeneralStorage, RawStorage},
    };

    use super::SessionStore;
    use crate::config::ClientConfig;

    pub static FALLBACK_DATA_PATH: LazyLock<PathBuf> =
        LazyLock::new(|| PathBuf::from(crate::config::DEFAULT_APP_NAME));

    /// Keeps the user in a postcard file under the platform data dir.
    pub struct FileSessionStore {
        base_path: PathBuf,
        file_name: String,
    }

    impl FileSessionStore {
        pub fn new(base_path: impl AsRef<Path>, file_name: impl Into<String>) -> Self {
            Self {
                base_path: base_path.as_ref().to_path_buf(),
                file_name: file_name.into(),
            }
        }

        pub fn from_config(config: &ClientConfig) -> Self {
            let data_dir = AppDirs::new(Some(config.app_name.as_str()), false)
                .map_or(FALLBACK_DATA_PATH.to_path_buf(), |dirs| dirs.data_dir);
            Self::new(data_dir, config.session_file.clone())
        }
    }

    impl RawStorage for FileSessionStore {
        fn get_base_path(&self) -> &PathBuf {
            &self.base_path
        }
    }

    impl GeneralStorage for FileSessionStore {}

    impl SessionStore for FileSessionStore {
        fn load_user(&self) -> Option<StoredUser> {
            self.load(&self.file_name)
        }

        fn save_user(&self, user: &StoredUser) -> bool {
            self.store(&self.file_name, user)
        }

        fn remove_user(&self) -> bool {
            self.remove(&self.file_name)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserSessionStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use dioxus::logger::tracing::warn;
    use shared::StoredUser;
    use web_sys::Storage;

    use super::SessionStore;

    /// Keeps the user as JSON in `window.localStorage`.
    pub struct BrowserSessionStore {
        storage: Storage,
        key: String,
    }

    impl BrowserSessionStore {
        /// `None` when the page has no usable `localStorage`.
        pub fn new(key: impl Into<String>) -> Option<Self> {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            Some(Self {
                storage,
                key: key.into(),
            })
        }
    }

    impl SessionStore for BrowserSessionStore {
        fn load_user(&self) -> Option<StoredUser> {
            let raw = match self.storage.get_item(&self.key) {
                Ok(raw) => raw?,
                Err(err) => {
                    warn!("Failed to read {:?} from localStorage: {err:?}", self.key);
                    return None;
                }
            };
            match serde_json::from_str(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!("Discarding unreadable {:?} in localStorage: {err}", self.key);
                    None
                }
            }
        }

        fn save_user(&self, user: &StoredUser) -> bool {
            let raw = match serde_json::to_string(user) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!("Failed to encode user for localStorage: {err}");
                    return false;
                }
            };
            if let Err(err) = self.storage.set_item(&self.key, &raw) {
                warn!("Failed to write {:?} to localStorage: {err:?}", self.key);
                false
            } else {
                true
            }
        }

        fn remove_user(&self) -> bool {
            if let Err(err) = self.storage.remove_item(&self.key) {
                warn!("Failed to remove {:?} from localStorage: {err:?}", self.key);
                false
            } else {
                true
            }
        }
    }
}

/// The store the running platform should use.
pub fn platform_store(config: &ClientConfig) -> Rc<dyn SessionStore> {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(store) = BrowserSessionStore::new(config.browser_key.clone()) {
            debug!("Using localStorage key {:?} for the session", config.browser_key);
            return Rc::new(store);
        }
        dioxus::logger::tracing::info!("localStorage is unavailable, session will not survive a reload");
        Rc::new(MemorySessionStore::default())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        debug!("Using the {:?} data dir for the session", config.app_name);
        Rc::new(FileSessionStore::from_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SessionToken;

    fn alice() -> StoredUser {
        StoredUser {
            login: "alice".to_owned(),
            token: SessionToken([3; 32]),
        }
    }

    #[test]
    fn memory_store_starts_anonymous() {
        let store = MemorySessionStore::default();
        assert_eq!(store.user_name(), None);
        assert_eq!(store.session(), Session::Anonymous);
    }

    #[test]
    fn memory_store_holds_and_forgets_user() {
        let store = MemorySessionStore::default();
        assert!(store.save_user(&alice()));
        assert_eq!(store.user_name().as_deref(), Some("alice"));
        assert!(store.session().is_authenticated());
        assert!(store.remove_user());
        assert_eq!(store.load_user(), None);
        assert!(store.remove_user());
    }

    #[test]
    fn empty_login_reads_as_anonymous() {
        let store = MemorySessionStore::with_user(StoredUser {
            login: String::new(),
            token: SessionToken([0; 32]),
        });
        assert_eq!(store.user_name().as_deref(), Some(""));
        assert_eq!(store.session(), Session::Anonymous);
    }

    #[test]
    fn file_store_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path(), "session.bin");
        assert_eq!(store.load_user(), None);
        assert!(store.save_user(&alice()));

        let reopened = FileSessionStore::new(dir.path(), "session.bin");
        assert_eq!(reopened.load_user(), Some(alice()));
        assert!(reopened.remove_user());
        assert_eq!(store.session(), Session::Anonymous);
    }

    #[test]
    fn file_store_read_creates_no_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("my-rpo"), "session.bin");
        assert_eq!(store.session(), Session::Anonymous);
        assert!(!dir.path().join("my-rpo").exists());
    }

    #[test]
    fn file_store_uses_configured_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path(), "nested/me.bin");
        assert!(store.save_user(&alice()));
        assert!(dir.path().join("nested").join("me.bin").exists());
    }
}
