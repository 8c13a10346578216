//! Request-level caching in front of a remote data provider.
//!
//! A [`MemoizingFetcher`] hands out one shared result per key. Concurrent
//! callers asking for the same key wait on the same in-flight request
//! instead of issuing duplicates. Failures are not cached, so the next
//! caller retries.

use crate::ApiError;
use dioxus_logger::tracing::debug;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// A remote source of values, keyed by `Key`.
pub trait Provider {
    type Key: Clone + Eq + Hash + Display;
    type Value: Clone;

    /// Performs one uncached lookup.
    async fn get(&self, key: &Self::Key) -> Result<Self::Value, ApiError>;
}

/// Anything that can resolve a key to a value asynchronously.
///
/// This is the only contract the selection coordinator depends on.
pub trait Fetch<K, V> {
    async fn fetch(&self, key: &K) -> Result<V, ApiError>;
}

impl<K, V, T: Fetch<K, V> + ?Sized> Fetch<K, V> for &T {
    async fn fetch(&self, key: &K) -> Result<V, ApiError> {
        (**self).fetch(key).await
    }
}

pub struct MemoizingFetcher<P: Provider> {
    provider: P,
    cells: Mutex<HashMap<P::Key, Arc<OnceCell<P::Value>>>>,
}

impl<P: Provider> MemoizingFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key` without issuing a request.
    pub async fn cached(&self, key: &P::Key) -> Option<P::Value> {
        let cells = self.cells.lock().await;
        cells.get(key).and_then(|cell| cell.get().cloned())
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: Provider> Fetch<P::Key, P::Value> for MemoizingFetcher<P> {
    async fn fetch(&self, key: &P::Key) -> Result<P::Value, ApiError> {
        // The map lock is only held to find the cell, never across the request.
        let cell = {
            let mut cells = self.cells.lock().await;
            cells.entry(key.clone()).or_default().clone()
        };

        let value = cell
            .get_or_try_init(|| async {
                debug!("cache miss, requesting {}", key);
                self.provider.get(key).await
            })
            .await?;

        Ok(value.clone())
    }
}
