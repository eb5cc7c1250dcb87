//! Memoized record categories.
//!
//! The category list is fetched at most once per [`CategoryCache`] as long as
//! the first fetch returned something. An empty result is not memoized, so
//! the next call asks the server again.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use registry_core::{Category, Params, SearchResponse};
use registry_http::GetResource;
use tracing::{debug, warn};

use crate::error::Result;

/// Categories in server order plus an index by id.
#[derive(Debug, Clone, Default)]
pub struct Categories {
    ordered: Vec<Arc<Category>>,
    by_id: HashMap<String, Arc<Category>>,
}

impl Categories {
    /// Build from a `_search` response. A repeated id keeps its first position
    /// but the index points at the last occurrence. Hits without an `_id`
    /// are skipped.
    pub fn from_response(response: SearchResponse) -> Self {
        if response.is_empty() {
            return Self::default();
        }
        let ordered: Vec<Arc<Category>> = response
            .hits
            .hits
            .into_iter()
            .filter(|hit| match hit.id.as_deref() {
                Some(id) if !id.is_empty() => true,
                _ => {
                    warn!(source = ?hit.source, "skipping category hit without id");
                    false
                }
            })
            .map(|hit| Arc::new(Category::from_hit(hit)))
            .collect();
        let by_id = ordered
            .iter()
            .map(|category| (category.id.clone(), Arc::clone(category)))
            .collect();
        Self { ordered, by_id }
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.ordered.iter().map(|category| category.as_ref())
    }

    /// Look up a category by id.
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.by_id.get(id).map(|category| category.as_ref())
    }

}

/// Holds the categories once fetched.
///
/// Once a non-empty list is stored it is never replaced or invalidated. The lock is never held across an await. Two concurrent first calls may
/// both fetch; whichever stores last wins and both see an equivalent list.
#[derive(Debug, Default)]
pub struct CategoryCache {
    slot: RwLock<Arc<Categories>>,
}

impl CategoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached categories, without fetching.
    pub fn cached(&self) -> Arc<Categories> {
        let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Return the cached categories, fetching them through `search` when the
    /// cache is empty.
    pub async fn get_or_fetch(&self, search: &GetResource) -> Result<Arc<Categories>> {
        let cached = self.cached();
        if !cached.is_empty() {
            debug!(count = cached.len(), "categories served from cache");
            return Ok(cached);
        }

        let response: SearchResponse = search.call_as(&Params::new()).await?;
        let fetched = Arc::new(Categories::from_response(response));
        debug!(count = fetched.len(), "categories fetched");

        if !fetched.is_empty() {
            self.store(Arc::clone(&fetched));
        }
        Ok(fetched)
    }

    fn store(&self, categories: Arc<Categories>) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = categories;
    }
}
