//! Keyed cache for metadata requests.
//!
//! At most one request is in flight per key; every caller asking for a key
//! while it is pending awaits the same shared future and sees the same value
//! or the same error. Successful results stay until invalidated, failures are
//! evicted so the next caller retries.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::debug;

use crate::error::{Error, Result};
use crate::language::Language;
use crate::metadata::{ListKind, MediaType};

/// Identity of one cached result. The language is always part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    List {
        media: MediaType,
        kind: ListKind,
        language: Language,
    },
    Custom {
        id: String,
        language: Language,
    },
    Details {
        media: MediaType,
        id: u64,
        language: Language,
    },
}

impl QueryKey {
    pub fn language(&self) -> Language {
        match self {
            QueryKey::List { language, .. }
            | QueryKey::Custom { language, .. }
            | QueryKey::Details { language, .. } => *language,
        }
    }
}

type SharedFetch<V> = Shared<BoxFuture<'static, std::result::Result<Arc<V>, Arc<Error>>>>;

enum Slot<V> {
    Pending(SharedFetch<V>),
    Ready(Arc<V>),
}

struct Inner<K, V> {
    entries: HashMap<K, Slot<V>>,
    generation: u64,
}

pub struct QueryCache<K, V> {
    inner: Mutex<Inner<K, V>>,
}

impl<K, V> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                generation: 0,
            }),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached value for `key`, joining an in-flight request or
    /// starting one with `fetcher` when there is neither.
    pub async fn fetch<F, Fut>(&self, key: K, fetcher: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let (shared, generation) = {
            let mut inner = self.lock();
            let generation = inner.generation;
            match inner.entries.get(&key) {
                Some(Slot::Ready(value)) => return Ok(Arc::clone(value)),
                Some(Slot::Pending(shared)) => {
                    debug!(key = ?key, "Joining in-flight request");
                    (shared.clone(), generation)
                }
                None => {
                    debug!(key = ?key, "Cache miss, fetching");
                    let fut = fetcher();
                    let shared = async move { fut.await.map(Arc::new).map_err(Arc::new) }
                        .boxed()
                        .shared();
                    inner
                        .entries
                        .insert(key.clone(), Slot::Pending(shared.clone()));
                    (shared, generation)
                }
            }
        };

        let outcome = shared.clone().await;
        self.settle(&key, &shared, generation, &outcome);
        outcome.map_err(Error::Shared)
    }

    /// Replace the pending slot with its outcome, unless the cache has been
    /// invalidated or the slot already belongs to a newer request.
    fn settle(
        &self,
        key: &K,
        shared: &SharedFetch<V>,
        generation: u64,
        outcome: &std::result::Result<Arc<V>, Arc<Error>>,
    ) {
        let mut inner = self.lock();
        if inner.generation != generation {
            return;
        }

        let is_ours = matches!(
            inner.entries.get(key),
            Some(Slot::Pending(pending)) if pending.ptr_eq(shared)
        );
        if !is_ours {
            return;
        }

        match outcome {
            Ok(value) => {
                inner
                    .entries
                    .insert(key.clone(), Slot::Ready(Arc::clone(value)));
            }
            Err(e) => {
                debug!(key = ?key, error = %e, "Evicting failed request");
                inner.entries.remove(key);
            }
        }
    }

    /// Cached value without starting a request
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        match self.lock().entries.get(key) {
            Some(Slot::Ready(value)) => Some(Arc::clone(value)),
            _ => None,
        }
    }

    #[cfg(test)]
    fn is_pending(&self, key: &K) -> bool {
        matches!(self.lock().entries.get(key), Some(Slot::Pending(_)))
    }

    /// Drop every entry. Requests still in flight complete for their current
    /// waiters but are not stored.
    pub fn invalidate_all(&self) {
        let mut inner = self.lock();
        let dropped = inner.entries.len();
        inner.entries.clear();
        inner.generation += 1;
        debug!(dropped, "Invalidated query cache");
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn list_key(language: Language) -> QueryKey {
        QueryKey::List {
            media: MediaType::Movie,
            kind: ListKind::Popular,
            language,
        }
    }

    #[tokio::test]
    async fn test_second_fetch_hits_cache() {
        let cache: QueryCache<QueryKey, u32> = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            let value = cache
                .fetch(list_key(Language::EnglishUs), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await
                .unwrap();
            assert_eq!(*value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.peek(&list_key(Language::EnglishUs)).as_deref(), Some(&7));
    }

    #[tokio::test]
    async fn test_languages_are_independent_entries() {
        let cache: QueryCache<QueryKey, &'static str> = QueryCache::new();

        let en = cache
            .fetch(list_key(Language::EnglishUs), || async { Ok("english") })
            .await
            .unwrap();
        let ar = cache
            .fetch(list_key(Language::ArabicSa), || async { Ok("arabic") })
            .await
            .unwrap();

        assert_eq!(*en, "english");
        assert_eq!(*ar, "arabic");
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_request() {
        let cache: Arc<QueryCache<QueryKey, Vec<u64>>> = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let spawn_fetch = || {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            tokio::spawn(async move {
                cache
                    .fetch(list_key(Language::EnglishUs), move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(vec![1, 2, 3])
                    })
                    .await
            })
        };

        let a = spawn_fetch();
        let b = spawn_fetch();
        let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_waiters_share_failure_and_entry_is_evicted() {
        let cache: Arc<QueryCache<QueryKey, u32>> = Arc::new(QueryCache::new());
        let key = list_key(Language::ArabicSa);

        let first = {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .fetch(key, || async {
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Err(Error::Metadata("boom".to_string()))
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(cache.is_pending(&key));

        let second = cache
            .fetch(key.clone(), || async { Ok(1) })
            .await
            .unwrap_err();
        let first = first.await.unwrap().unwrap_err();

        assert_eq!(first.to_string(), "Metadata error: boom");
        assert_eq!(second.to_string(), first.to_string());
        assert!(cache.is_empty());

        let retried = cache.fetch(key, || async { Ok(2) }).await.unwrap();
        assert_eq!(*retried, 2);
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_refetch() {
        let cache: QueryCache<QueryKey, u32> = QueryCache::new();
        let key = list_key(Language::EnglishUs);

        cache.fetch(key.clone(), || async { Ok(1) }).await.unwrap();
        cache.invalidate_all();
        assert!(cache.peek(&key).is_none());

        let value = cache.fetch(key, || async { Ok(2) }).await.unwrap();
        assert_eq!(*value, 2);
    }

    #[tokio::test]
    async fn test_late_result_is_not_stored_after_invalidation() {
        let cache: Arc<QueryCache<QueryKey, u32>> = Arc::new(QueryCache::new());
        let key = list_key(Language::EnglishUs);

        let pending = {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .fetch(key, || async {
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(1)
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.invalidate_all();

        assert_eq!(*pending.await.unwrap().unwrap(), 1);
        assert!(cache.peek(&key).is_none());
    }
}
