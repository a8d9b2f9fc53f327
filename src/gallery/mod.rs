//! Persisted, observable image list.
//!
//! Maintains an ordered list of image strings, mutable via add/remove/set,
//! with synchronous observer notification and durable persistence under the
//! fixed key `images` so the list survives restarts.

mod slot;
mod store;

pub use store::ImageStore;
