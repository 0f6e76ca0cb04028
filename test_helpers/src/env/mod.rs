//! Helpers for safely mutating environment variables in tests.
//!
//! Composition settings read `PAGE_PROPS_*` variables, so tests that load
//! settings must not observe each other's environment. Every mutation
//! acquires a global re-entrant mutex and returns an RAII guard that
//! restores the prior state when dropped. Stacked guards for one key
//! restore in LIFO order.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("PAGE_PROPS_MAX_NESTING_DEPTH", "4");
//! // The variable holds `4` for the duration of the guard.
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Variables read by the composition settings loader.
pub const SETTINGS_VARS: [&str; 2] = [
    "PAGE_PROPS_ATTRIBUTE_NAME_FORMATTER",
    "PAGE_PROPS_MAX_NESTING_DEPTH",
];

/// Callers must hold `ENV_MUTEX`.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Callers must hold `ENV_MUTEX`.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

fn mutate_locked<F>(key: String, mutator: F, _guard: &ReentrantMutexGuard<'static, ()>) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        if let Some(val) = self.original.take() {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env_set_var(&self.key, &val) };
        } else {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env_remove_var(&self.key) };
        }
    }
}

/// RAII guard that serialises environment access for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets an environment variable while holding the global lock.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        // SAFETY: `self.guard` holds `ENV_MUTEX`.
        mutate_locked(key.into(), |k| unsafe { env_set_var(k, value.as_ref()) }, &self.guard)
    }

    /// Removes an environment variable while holding the global lock.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        // SAFETY: `self.guard` holds `ENV_MUTEX`.
        mutate_locked(key.into(), |k| unsafe { env_remove_var(k) }, &self.guard)
    }
}

/// Holds the environment lock while retaining guards.
///
/// Guards are restored before the lock is released.
///
/// ```
/// use test_helpers::env;
///
/// let _scope = env::scope_with(|lock| vec![lock.set_var("PAGE_PROPS_MAX_NESTING_DEPTH", "2")]);
/// assert_eq!(std::env::var("PAGE_PROPS_MAX_NESTING_DEPTH").as_deref(), Ok("2"));
/// ```
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    _lock: EnvVarLock,
    guards: Vec<EnvVarGuard>,
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore while the lock is still held.
        drop(std::mem::take(&mut self.guards));
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Acquire the global environment lock for the lifetime of the guard.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        guard: ENV_MUTEX.lock(),
    }
}

/// Create a scope after running `builder` while holding the lock.
pub fn scope_with<F>(builder: F) -> EnvScope
where
    F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
{
    let lock = lock();
    let guards = builder(&lock);
    EnvScope {
        _lock: lock,
        guards,
    }
}

/// Clear every settings variable for the lifetime of the returned scope.
///
/// ```
/// use test_helpers::env;
///
/// let _scope = env::clear_settings();
/// assert!(std::env::var("PAGE_PROPS_ATTRIBUTE_NAME_FORMATTER").is_err());
/// ```
pub fn clear_settings() -> EnvScope {
    scope_with(|lock| {
        SETTINGS_VARS
            .iter()
            .map(|key| lock.remove_var(*key))
            .collect()
    })
}
