//! Session persistence: the key-value boundary and the token store on top of it.
//!
//! The client never touches a global store. Callers inject a
//! [`KeyValueStore`] (browser `localStorage` bridge, file, memory) and the
//! [`TokenStore`] is the only component that reads or writes session keys.
//!
//! # Example
//!
//! ```rust
//! use organic_store::auth::TokenStore;
//!
//! let tokens = TokenStore::in_memory();
//! tokens.save("access-123", "refresh-456");
//! assert_eq!(tokens.access_token().as_deref(), Some("access-123"));
//!
//! tokens.clear();
//! assert!(tokens.access_token().is_none());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::auth::{Session, UserProfile};
use crate::config::StorageKeys;

/// A string-keyed, string-valued persistence layer.
///
/// All operations are infallible from the caller's point of view: absent
/// keys read as `None`, and implementations that can fail internally (disk,
/// browser quota) log the failure and carry on.
///
/// # Implementing a Store
///
/// ```rust
/// use std::collections::HashMap;
/// use std::sync::Mutex;
/// use organic_store::auth::KeyValueStore;
///
/// #[derive(Default)]
/// struct MyStore(Mutex<HashMap<String, String>>);
///
/// impl KeyValueStore for MyStore {
///     fn get(&self, key: &str) -> Option<String> {
///         self.0.lock().unwrap().get(key).cloned()
///     }
///     fn set(&self, key: &str, value: &str) {
///         self.0.lock().unwrap().insert(key.to_string(), value.to_string());
///     }
///     fn remove(&self, key: &str) {
///         self.0.lock().unwrap().remove(key);
///     }
/// }
/// ```
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);

    /// Removes several keys at once.
    ///
    /// Implementations backed by a lock should override this so that no
    /// reader observes a partially removed set.
    fn remove_many(&self, keys: &[&str]) {
        for key in keys {
            self.remove(key);
        }
    }
}

/// In-memory [`KeyValueStore`] for tests, CLIs and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn remove_many(&self, keys: &[&str]) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            entries.remove(*key);
        }
    }
}

/// [`KeyValueStore`] persisted as a JSON object in a single file.
///
/// Every write replaces the file atomically through a temp file and a
/// rename. On Unix the file is readable and writable by its owner only
/// (`0600`). Write failures are logged and the in-memory copy stays
/// authoritative for the rest of the process.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading existing entries if the file exists.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read, or
    /// [`io::ErrorKind::InvalidData`] if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&contents)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Returns the file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let result = serde_json::to_string_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            .and_then(|contents| self.write_atomically(&contents));

        if let Err(e) = result {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to persist session store"
            );
        }
    }

    /// Writes `contents` to a sibling temp file readable only by the owner,
    /// then renames it over the store file.
    fn write_atomically(&self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        drop(file);

        // A stale temp file keeps its old mode when reopened
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &self.path)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        self.remove_many(&[key]);
    }

    fn remove_many(&self, keys: &[&str]) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() != before {
            self.persist(&entries);
        }
    }
}

/// One line of the locally held guest cart.
///
/// The guest cart is an opaque JSON array owned by the UI; only the product
/// id and quantity are typed, anything else the UI stores is preserved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuestCartItem {
    /// The product in the cart line.
    #[serde(rename = "productId", alias = "product_id")]
    pub product_id: String,

    /// Number of units.
    pub quantity: u32,

    /// Any other fields the UI keeps with the line (name, price, image...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GuestCartItem {
    /// Creates a cart line with no extra fields.
    #[must_use]
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            extra: Map::new(),
        }
    }
}

/// The single owner of session state.
///
/// Holds the access token, refresh token and cached user profile in an
/// injected [`KeyValueStore`], plus the guest cart which outlives sessions.
///
/// `TokenStore` is cheap to clone; clones share the same backing store.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("keys", &self.keys)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

// Verify TokenStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenStore>();
};

impl TokenStore {
    /// Creates a token store over `store` using the given key names.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Creates a token store over a fresh [`MemoryStore`] with default keys.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), StorageKeys::default())
    }

    /// Returns the key names in use.
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Stores a token pair.
    ///
    /// An empty `refresh` leaves any stored refresh token untouched.
    pub fn save(&self, access: &str, refresh: &str) {
        self.store.set(&self.keys.access_token, access);
        if !refresh.is_empty() {
            self.store.set(&self.keys.refresh_token, refresh);
        }
    }

    /// Returns the access token, if one is stored.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read_non_empty(&self.keys.access_token)
    }

    /// Returns the refresh token, if one is stored.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.read_non_empty(&self.keys.refresh_token)
    }

    /// Returns the cached user profile.
    ///
    /// A stored value that no longer parses is treated as absent.
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.store.get(&self.keys.user)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cached user profile");
                None
            }
        }
    }

    /// Caches the user profile.
    pub fn save_user(&self, profile: &UserProfile) {
        match serde_json::to_string(profile) {
            Ok(raw) => self.store.set(&self.keys.user, &raw),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize user profile"),
        }
    }

    /// Removes the access token, refresh token and cached user in one step.
    ///
    /// Idempotent. The guest cart is kept.
    pub fn clear(&self) {
        self.store.remove_many(&self.keys.session_keys());
    }

    /// Returns `true` if an access token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Returns a snapshot of the current session, if logged in.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        let access_token = self.access_token()?;
        Some(Session::new(
            access_token,
            self.refresh_token(),
            self.user(),
        ))
    }

    /// Returns the guest cart. Missing or unreadable carts read as empty.
    #[must_use]
    pub fn guest_cart(&self) -> Vec<GuestCartItem> {
        self.store
            .get(&self.keys.cart)
            .and_then(|raw| {
                serde_json::from_str(&raw)
                    .map_err(|e| tracing::warn!(error = %e, "Ignoring unreadable guest cart"))
                    .ok()
            })
            .unwrap_or_default()
    }

    /// Replaces the guest cart.
    pub fn save_guest_cart(&self, items: &[GuestCartItem]) {
        match serde_json::to_string(items) {
            Ok(raw) => self.store.set(&self.keys.cart, &raw),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize guest cart"),
        }
    }

    /// Adds `quantity` units of a product to the guest cart, merging with an
    /// existing line for the same product. Returns the updated cart.
    pub fn add_guest_item(&self, product_id: &str, quantity: u32) -> Vec<GuestCartItem> {
        let mut items = self.guest_cart();
        match items.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => items.push(GuestCartItem::new(product_id, quantity)),
        }
        self.save_guest_cart(&items);
        items
    }

    /// Removes the guest cart.
    pub fn clear_guest_cart(&self) {
        self.store.remove(&self.keys.cart);
    }

    fn read_non_empty(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|value| !value.is_empty())
    }
}
