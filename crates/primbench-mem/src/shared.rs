//! Read-mostly shared state: one small map published once, read from every
//! thread through a different synchronisation primitive.

use std::collections::HashMap;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

pub type Map = HashMap<i32, i32>;

/// A map that many threads read concurrently.
pub trait SharedMap: Send + Sync + Sized {
    const NAME: &'static str;

    fn new(map: Map) -> Self;

    fn get(&self, key: i32) -> Option<i32>;

    /// Replace the published map.
    fn store(&self, map: Map);
}

/// The map used by the parallel read bench: `{1: 1}`
pub fn fixture() -> Map {
    HashMap::from([(1, 1)])
}

/// Raw `AtomicPtr` to a leaked box.
///
/// Replaced maps are kept alive until drop, since readers may still hold a
/// pointer to them.
pub struct AtomicPtrMap {
    ptr: AtomicPtr<Map>,
    retired: parking_lot::Mutex<Vec<*mut Map>>,
}

// SAFETY: the pointed-to maps are only read through shared references and are
// freed only in `Drop`, when no reader can exist.
unsafe impl Send for AtomicPtrMap {}
unsafe impl Sync for AtomicPtrMap {}

impl SharedMap for AtomicPtrMap {
    const NAME: &'static str = "atomic_ptr";

    fn new(map: Map) -> Self {
        Self {
            ptr: AtomicPtr::new(Box::into_raw(Box::new(map))),
            retired: parking_lot::Mutex::new(Vec::new()),
        }
    }

    fn get(&self, key: i32) -> Option<i32> {
        // SAFETY: the pointer always comes from `Box::into_raw` and is not freed
        // before `self` is dropped.
        let map = unsafe { &*self.ptr.load(Ordering::Acquire) };
        map.get(&key).copied()
    }

    fn store(&self, map: Map) {
        let old = self.ptr.swap(Box::into_raw(Box::new(map)), Ordering::AcqRel);
        self.retired.lock().push(old);
    }
}

impl Drop for AtomicPtrMap {
    fn drop(&mut self) {
        let current = *self.ptr.get_mut();
        for ptr in self.retired.get_mut().drain(..).chain(std::iter::once(current)) {
            // SAFETY: each pointer was produced by `Box::into_raw` exactly once
            // and `&mut self` rules out concurrent readers.
            drop(unsafe { Box::from_raw(ptr) });
        }
    }
}

pub struct ArcSwapMap(ArcSwap<Map>);

impl SharedMap for ArcSwapMap {
    const NAME: &'static str = "arc_swap";

    fn new(map: Map) -> Self {
        Self(ArcSwap::new(Arc::new(map)))
    }

    fn get(&self, key: i32) -> Option<i32> {
        self.0.load().get(&key).copied()
    }

    fn store(&self, map: Map) {
        self.0.store(Arc::new(map));
    }
}

pub struct ParkingLotRwLockMap(parking_lot::RwLock<Map>);

impl SharedMap for ParkingLotRwLockMap {
    const NAME: &'static str = "parking_lot_rwlock";

    fn new(map: Map) -> Self {
        Self(parking_lot::RwLock::new(map))
    }

    fn get(&self, key: i32) -> Option<i32> {
        self.0.read().get(&key).copied()
    }

    fn store(&self, map: Map) {
        *self.0.write() = map;
    }
}

pub struct StdRwLockMap(std::sync::RwLock<Map>);

impl SharedMap for StdRwLockMap {
    const NAME: &'static str = "std_rwlock";

    fn new(map: Map) -> Self {
        Self(std::sync::RwLock::new(map))
    }

    fn get(&self, key: i32) -> Option<i32> {
        // a poisoned lock still holds a valid map
        let guard = self.0.read().unwrap_or_else(|e| e.into_inner());
        guard.get(&key).copied()
    }

    fn store(&self, map: Map) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = map;
    }
}

pub const ALGORITHMS: &[&str] = &[
    AtomicPtrMap::NAME,
    ArcSwapMap::NAME,
    ParkingLotRwLockMap::NAME,
    StdRwLockMap::NAME,
];
