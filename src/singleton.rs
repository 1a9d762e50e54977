//! Process-wide typed instance registry.
//!
//! Holds at most one instance per type. The first [`install`](Registry::install)
//! wins; later installs of the same type are dropped and the existing instance
//! is handed back. Instances live until removed or until the registry is
//! cleared with [`shutdown`].
//!
//! ```
//! use lunekit::singleton;
//!
//! struct AudioManager {
//!     volume: f32,
//! }
//!
//! let first = singleton::install(AudioManager { volume: 0.8 });
//! let second = singleton::install(AudioManager { volume: 0.1 });
//! assert_eq!(second.volume, 0.8);
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! assert_eq!(singleton::instance::<AudioManager>().unwrap().volume, 0.8);
//! ```

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;

type Instance = Arc<dyn Any + Send + Sync>;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Map from type to its single shared instance.
#[derive(Debug, Default)]
pub struct Registry {
    instances: RwLock<HashMap<TypeId, Instance>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register `value` as the instance of `T`, unless one already exists.
    ///
    /// Returns whichever instance is registered afterwards.
    pub fn install<T: Any + Send + Sync>(&self, value: T) -> Arc<T> {
        let mut instances = self.write();
        if let Some(existing) = instances.get(&TypeId::of::<T>()) {
            log::warn!("{} already installed, discarding duplicate", type_name::<T>());
            return downcast(existing.clone());
        }
        let instance = Arc::new(value);
        instances.insert(TypeId::of::<T>(), instance.clone());
        log::info!("installed {}", type_name::<T>());
        instance
    }

    /// The instance of `T`, if installed.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.read().get(&TypeId::of::<T>()).cloned().map(downcast)
    }

    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.read().contains_key(&TypeId::of::<T>())
    }

    /// Unregister the instance of `T`. Outstanding `Arc`s stay valid.
    pub fn remove<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let removed = self.write().remove(&TypeId::of::<T>()).map(downcast);
        if removed.is_some() {
            log::info!("removed {}", type_name::<T>());
        }
        removed
    }

    /// Drop every registered instance.
    pub fn clear(&self) {
        let mut instances = self.write();
        log::info!("clearing {} instance(s)", instances.len());
        instances.clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Each operation is a single map call, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Instance>> {
        self.instances.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Instance>> {
        self.instances.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// Entries are keyed by their own TypeId, so the downcast cannot fail.
fn downcast<T: Any + Send + Sync>(instance: Instance) -> Arc<T> {
    match instance.downcast::<T>() {
        Ok(instance) => instance,
        Err(_) => unreachable!("registry entry stored under the wrong TypeId"),
    }
}

/// [`Registry::install`] on the global registry.
pub fn install<T: Any + Send + Sync>(value: T) -> Arc<T> {
    Registry::global().install(value)
}

/// [`Registry::get`] on the global registry.
pub fn instance<T: Any + Send + Sync>() -> Option<Arc<T>> {
    Registry::global().get()
}

/// Clear the global registry. Call once at process teardown.
pub fn shutdown() {
    Registry::global().clear();
}
