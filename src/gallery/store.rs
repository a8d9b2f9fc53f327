//! The persisted, observable image list.

use std::path::Path;
use std::sync::Mutex;

use crate::utils::OptimizerResult;

use super::slot::JsonSlot;

/// Fixed durable key under which the list survives restarts.
const STORE_KEY: &str = "images";

/// Callback invoked with the current list on subscription and after every
/// committed mutation.
pub type Observer = Box<dyn Fn(&[String]) + Send + Sync + 'static>;

struct Inner {
    images: Vec<String>,
    observers: Vec<Observer>,
}

/// An ordered list of image strings with observer notification and durable
/// persistence under the fixed key `images`.
///
/// Mutations are serialized by a mutex; the slot write and the observer
/// notifications happen inside the same critical section as the mutation, so
/// observers never see a state that was not persisted and no two mutations
/// interleave their writes.
pub struct ImageStore {
    slot: JsonSlot,
    inner: Mutex<Inner>,
}

impl ImageStore {
    /// Opens the store, rehydrating from the durable slot. An absent or
    /// unparsable slot yields an empty list.
    pub fn open(data_dir: &Path) -> OptimizerResult<Self> {
        let slot = JsonSlot::open(data_dir, STORE_KEY)?;
        let images = slot.load();

        Ok(Self {
            slot,
            inner: Mutex::new(Inner {
                images,
                observers: Vec::new(),
            }),
        })
    }

    /// Registers `observer` and immediately invokes it with the current list.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        observer(&inner.images);
        inner.observers.push(Box::new(observer));
    }

    /// Returns a copy of the current list.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().images.clone()
    }

    /// Appends `image` to the end of the list.
    pub fn add(&self, image: String) -> OptimizerResult<Vec<String>> {
        let mut inner = self.lock();
        inner.images.push(image);
        self.commit(&mut inner)
    }

    /// Removes the element at `index`, keeping the relative order of the
    /// rest. An out-of-bounds index leaves the list unchanged; observers are
    /// still notified, matching the filter-based semantics of the original
    /// contract.
    pub fn remove(&self, index: usize) -> OptimizerResult<Vec<String>> {
        let mut inner = self.lock();
        if index < inner.images.len() {
            inner.images.remove(index);
        }
        self.commit(&mut inner)
    }

    /// Replaces the entire list atomically. Observers see exactly one
    /// notification carrying the new list.
    pub fn set(&self, images: Vec<String>) -> OptimizerResult<Vec<String>> {
        let mut inner = self.lock();
        inner.images = images;
        self.commit(&mut inner)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another mutation panicked after its
        // state was already consistent; recover rather than propagate.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Persists the current list, then notifies observers. Runs under the
    /// caller's lock.
    fn commit(&self, inner: &mut Inner) -> OptimizerResult<Vec<String>> {
        self.slot.persist(&inner.images)?;
        for observer in &inner.observers {
            observer(&inner.images);
        }
        Ok(inner.images.clone())
    }
}
