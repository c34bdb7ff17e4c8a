//! In-flight request deduplication
//!
//! Maps a key to a shared future so concurrent callers asking for the same
//! key await one underlying request. The map lives for one batch; it is not
//! a cache across calls.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

pub struct InflightRequests<'a, K, T>
where
    T: Clone,
{
    entries: HashMap<K, Shared<BoxFuture<'a, T>>>,
}

impl<'a, K, T> InflightRequests<'a, K, T>
where
    K: Eq + Hash,
    T: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Return the in-flight future for `key`, starting it with `start` when
    /// no request for that key exists yet.
    pub fn get_or_insert_with<F, Fut>(&mut self, key: K, start: F) -> Shared<BoxFuture<'a, T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'a,
    {
        self.entries
            .entry(key)
            .or_insert_with(|| start().boxed().shared())
            .clone()
    }

    /// Number of distinct requests started
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, K, T> Default for InflightRequests<'a, K, T>
where
    K: Eq + Hash,
    T: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
