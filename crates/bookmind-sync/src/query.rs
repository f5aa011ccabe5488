//! Live queries over a collection.

use std::sync::Arc;

use futures::Stream;
use tokio::sync::watch;

use crate::collection::Entries;

type Runner<T, P> = Arc<dyn Fn(&[T], &P) -> Vec<T> + Send + Sync>;

/// A filter/sort over a collection that follows later changes.
///
/// The result is recomputed from the latest contents and parameters; no
/// event is lost between two reads, although several quick changes may
/// collapse into one result.
pub struct LiveQuery<T, P> {
    entries: watch::Receiver<Entries<T>>,
    params: watch::Receiver<P>,
    run: Runner<T, P>,
    entries_closed: bool,
    params_closed: bool,
}

impl<T, P> Clone for LiveQuery<T, P> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            params: self.params.clone(),
            run: Arc::clone(&self.run),
            entries_closed: self.entries_closed,
            params_closed: self.params_closed,
        }
    }
}

impl<T, P> LiveQuery<T, P> {
    pub fn new<F>(entries: watch::Receiver<Entries<T>>, params: watch::Receiver<P>, run: F) -> Self
    where
        F: Fn(&[T], &P) -> Vec<T> + Send + Sync + 'static,
    {
        Self {
            entries,
            params,
            run: Arc::new(run),
            entries_closed: false,
            params_closed: false,
        }
    }

    /// Result over the current contents and parameters.
    pub fn current(&self) -> Vec<T> {
        let entries = self.entries.borrow();
        let params = self.params.borrow();
        (self.run)(entries.as_slice(), &*params)
    }

    fn mark_seen(&mut self) -> Vec<T> {
        let entries = self.entries.borrow_and_update();
        let params = self.params.borrow_and_update();
        (self.run)(entries.as_slice(), &*params)
    }

    /// Wait for the next change to the contents or the parameters.
    ///
    /// `None` once both the collection and the parameter sender are gone.
    pub async fn changed(&mut self) -> Option<Vec<T>> {
        loop {
            tokio::select! {
                res = self.entries.changed(), if !self.entries_closed => match res {
                    Ok(()) => return Some(self.mark_seen()),
                    Err(_) => self.entries_closed = true,
                },
                res = self.params.changed(), if !self.params_closed => match res {
                    Ok(()) => return Some(self.mark_seen()),
                    Err(_) => self.params_closed = true,
                },
                else => return None,
            }
        }
    }

    /// Current result followed by one item per change.
    pub fn into_stream(self) -> impl Stream<Item = Vec<T>> {
        futures::stream::unfold((self, true), |(mut query, first)| async move {
            let next = if first {
                query.mark_seen()
            } else {
                query.changed().await?
            };
            Some((next, (query, false)))
        })
    }
}
