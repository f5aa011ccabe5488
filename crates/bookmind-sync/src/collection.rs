#![allow(async_fn_in_trait)]

//! Keyed in-memory collection with optimistic mutations.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OnceCell, watch};
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::query::LiveQuery;
use crate::types::Keyed;

/// Contents of a collection as broadcast to subscribers.
pub type Entries<T> = Arc<Vec<T>>;

/// Remote side of a collection.
pub trait CollectionSource {
    type Item: Keyed;

    async fn fetch(&self) -> Result<Vec<Self::Item>, SyncError>;

    /// Persist an optimistic entry; returns the server's record.
    async fn create(&self, item: &Self::Item) -> Result<Self::Item, SyncError>;

    /// `before` is the last value the server confirmed, `after` the
    /// optimistic one.
    async fn update(&self, before: &Self::Item, after: &Self::Item)
    -> Result<Self::Item, SyncError>;

    async fn delete(&self, item: &Self::Item) -> Result<(), SyncError>;
}

pub struct Collection<S: CollectionSource> {
    source: S,
    entries: watch::Sender<Entries<S::Item>>,
    hydrated: OnceCell<()>,
    /// Last server-confirmed value per key.
    confirmed: Mutex<HashMap<String, S::Item>>,
    /// Per-key commit order; a mutation waits for the one before it.
    turns: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl<S: CollectionSource> Collection<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: watch::Sender::new(Arc::new(Vec::new())),
            hydrated: OnceCell::new(),
            confirmed: Mutex::new(HashMap::new()),
            turns: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replace the contents with the server's view.
    ///
    /// Unconfirmed optimistic entries are dropped.
    pub async fn hydrate(&self) -> Result<(), SyncError> {
        let items = self.source.fetch().await?;
        debug!(count = items.len(), "collection hydrated");
        *self.confirmed_map() = items
            .iter()
            .map(|item| (item.key().to_owned(), item.clone()))
            .collect();
        self.entries.send_replace(Arc::new(items));
        Ok(())
    }

    /// Hydrate once; concurrent callers share the same fetch. A failed
    /// fetch is retried by the next caller.
    pub async fn ensure_hydrated(&self) -> Result<(), SyncError> {
        self.hydrated
            .get_or_try_init(|| self.hydrate())
            .await
            .map(|_| ())
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated.initialized()
    }

    pub fn get(&self, key: &str) -> Option<S::Item> {
        self.entries.borrow().iter().find(|e| e.key() == key).cloned()
    }

    pub fn snapshot(&self) -> Vec<S::Item> {
        self.entries.borrow().as_ref().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self) -> watch::Receiver<Entries<S::Item>> {
        self.entries.subscribe()
    }

    /// A query over this collection, re-run on every change to the
    /// contents or to `params`.
    pub fn live<P, F>(&self, params: watch::Receiver<P>, run: F) -> LiveQuery<S::Item, P>
    where
        F: Fn(&[S::Item], &P) -> Vec<S::Item> + Send + Sync + 'static,
    {
        LiveQuery::new(self.subscribe(), params, run)
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    pub async fn insert(&self, item: S::Item) -> Result<S::Item, SyncError> {
        let key = item.key().to_owned();
        if self.get(&key).is_some() {
            return Err(SyncError::Validation(format!("duplicate key {key}")));
        }
        self.entries.send_modify(|entries| Arc::make_mut(entries).push(item.clone()));

        match self.source.create(&item).await {
            Ok(confirmed) => {
                self.remember(confirmed.clone());
                self.settle(&key, &item, Some(confirmed.clone()));
                Ok(confirmed)
            }
            Err(err) => {
                warn!(%key, error = %err, "insert rejected, rolling back");
                self.settle(&key, &item, None);
                Err(err)
            }
        }
    }

    /// Merge-update an entry and forward the change to the source.
    pub async fn update<M>(&self, key: &str, mutate: M) -> Result<S::Item, SyncError>
    where
        M: FnOnce(&mut S::Item) -> Result<(), SyncError>,
    {
        self.apply_optimistic(key, mutate, |before, after| async move {
            self.source.update(&before, &after).await.map(Some)
        })
        .await
    }

    /// Apply `mutate` locally, then run `commit`.
    ///
    /// The local change is visible at once. Commits for the same key run in
    /// call order, and each receives the last server-confirmed value
    /// alongside the optimistic one. `commit` returns the server's record,
    /// or `None` to keep the optimistic value. On failure the entry goes
    /// back to the confirmed value unless something else has replaced it
    /// in the meantime. An error from `mutate` leaves the collection
    /// untouched and nothing is sent.
    pub async fn apply_optimistic<M, C, Fut>(
        &self,
        key: &str,
        mutate: M,
        commit: C,
    ) -> Result<S::Item, SyncError>
    where
        M: FnOnce(&mut S::Item) -> Result<(), SyncError>,
        C: FnOnce(S::Item, S::Item) -> Fut,
        Fut: Future<Output = Result<Option<S::Item>, SyncError>>,
    {
        let before = self
            .get(key)
            .ok_or_else(|| SyncError::NotFound(key.to_owned()))?;
        let mut after = before.clone();
        mutate(&mut after)?;
        if after == before {
            return Ok(before);
        }
        self.settle(key, &before, Some(after.clone()));

        let turn = self.turn(key);
        let _turn = turn.lock().await;
        let base = self.confirmed_map().get(key).cloned().unwrap_or(before);

        match commit(base.clone(), after.clone()).await {
            Ok(confirmed) => {
                let settled = confirmed.unwrap_or_else(|| after.clone());
                self.remember(settled.clone());
                self.settle(key, &after, Some(settled.clone()));
                Ok(settled)
            }
            Err(err) => {
                warn!(%key, error = %err, "mutation rejected, rolling back");
                self.settle(key, &after, Some(base));
                Err(err)
            }
        }
    }

    pub async fn delete(&self, key: &str) -> Result<(), SyncError> {
        let (index, item) = {
            let entries = self.entries.borrow();
            let index = entries
                .iter()
                .position(|e| e.key() == key)
                .ok_or_else(|| SyncError::NotFound(key.to_owned()))?;
            (index, entries[index].clone())
        };
        self.entries.send_modify(|entries| {
            Arc::make_mut(entries).remove(index);
        });

        let turn = self.turn(key);
        let _turn = turn.lock().await;
        if let Err(err) = self.source.delete(&item).await {
            warn!(%key, error = %err, "delete rejected, restoring entry");
            self.entries.send_if_modified(|entries| {
                if entries.iter().any(|e| e.key() == key) {
                    return false;
                }
                let entries = Arc::make_mut(entries);
                entries.insert(index.min(entries.len()), item);
                true
            });
            return Err(err);
        }
        self.confirmed_map().remove(key);
        self.turns().remove(key);
        Ok(())
    }

    fn confirmed_map(&self) -> MutexGuard<'_, HashMap<String, S::Item>> {
        self.confirmed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn turns(&self) -> MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        self.turns.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remember(&self, item: S::Item) {
        self.confirmed_map().insert(item.key().to_owned(), item);
    }

    fn turn(&self, key: &str) -> Arc<AsyncMutex<()>> {
        Arc::clone(
            self.turns()
                .entry(key.to_owned())
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        )
    }

    /// Swap the entry at `key` for `replacement` (or remove it) only while
    /// it still equals `expected`.
    fn settle(&self, key: &str, expected: &S::Item, replacement: Option<S::Item>) -> bool {
        self.entries.send_if_modified(|entries| {
            let Some(index) = entries
                .iter()
                .position(|e| e.key() == key && e == expected)
            else {
                return false;
            };
            let entries = Arc::make_mut(entries);
            match replacement {
                Some(item) => entries[index] = item,
                None => {
                    entries.remove(index);
                }
            }
            true
        })
    }
}
