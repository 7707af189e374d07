// SPDX-License-Identifier: GPL-3.0-only

//! The catalog store: list and detail caches, user overrides and the
//! loading/error state the front-end renders from.

use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicUsize, Ordering},
};

use dashmap::DashMap;

use crate::{
    api::{CatalogSource, DEFAULT_ARTWORK_BASE_URL},
    entities::{DetailRecord, ListEntry, Override, Overrides},
    storage::Storage,
};

/// Storage key the overrides are persisted under
pub const OVERRIDES_KEY: &str = "pokemon_overrides";

/// How many Pokémon `fetch_list` asks for when the caller has no preference
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Everything that can go wrong in a catalog action
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Could not load Pokémon list.")]
    ListFetch,
    #[error("Could not fetch Pokémon details.")]
    DetailFetch,
    #[error("Could not save Pokémon overrides.")]
    Persist,
}

pub struct Catalog<S, T> {
    source: S,
    storage: T,
    artwork_base_url: String,
    list: RwLock<Vec<ListEntry>>,
    details: DashMap<String, Arc<DetailRecord>>,
    overrides: RwLock<Overrides>,
    in_flight: AtomicUsize,
    error: RwLock<Option<CatalogError>>,
}

impl<S, T> std::fmt::Debug for Catalog<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("details", &self.details.len())
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .field("error", &self.error.read().ok().and_then(|e| *e))
            .finish()
    }
}

/// Keeps the loading flag raised while alive
struct Loading<'a>(&'a AtomicUsize);

impl<'a> Loading<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S: CatalogSource, T: Storage> Catalog<S, T> {
    /// Creates the store, reading the saved overrides from `storage`
    pub fn new(source: S, storage: T) -> Self {
        let overrides = load_overrides(&storage);

        Self {
            source,
            storage,
            artwork_base_url: DEFAULT_ARTWORK_BASE_URL.to_string(),
            list: RwLock::new(Vec::new()),
            details: DashMap::new(),
            overrides: RwLock::new(overrides),
            in_flight: AtomicUsize::new(0),
            error: RwLock::new(None),
        }
    }

    pub fn with_artwork_base_url(mut self, artwork_base_url: impl Into<String>) -> Self {
        self.artwork_base_url = artwork_base_url.into();
        self
    }

    /// Replaces the list with the first `limit` Pokémon.
    ///
    /// On failure the previous list is kept and the error is recorded.
    pub async fn fetch_list(&self, limit: usize) -> Result<(), CatalogError> {
        let _loading = Loading::start(&self.in_flight);
        self.set_error(None);

        match self.source.fetch_list(limit).await {
            Ok(page) => {
                let entries: Vec<ListEntry> = page
                    .results
                    .into_iter()
                    .map(|r| ListEntry::from_resource(r.name, r.url, &self.artwork_base_url))
                    .collect();

                tracing::info!(count = entries.len(), "loaded Pokémon list");
                *self.list.write().unwrap_or_else(PoisonError::into_inner) = entries;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, limit, "failed to fetch the Pokémon list");
                self.set_error(Some(CatalogError::ListFetch));
                Err(CatalogError::ListFetch)
            }
        }
    }

    /// Returns the details of a Pokémon by id or name, fetching them only the first time.
    ///
    /// Keys are trimmed and lowercased, `" Pikachu"` and `"pikachu"` share a cache slot.
    /// `None` means the fetch failed, `error()` tells why.
    pub async fn fetch_detail(&self, key: impl ToString) -> Option<Arc<DetailRecord>> {
        let key = normalize_key(&key.to_string());
        if let Some(cached) = self.cached_detail(&key) {
            return Some(cached);
        }

        let _loading = Loading::start(&self.in_flight);

        let record = self.source.fetch_detail(&key).await.and_then(|payload| {
            DetailRecord::from_payload(payload).map_err(anywho::Error::from)
        });

        match record {
            Ok(mut record) => {
                // the override is read and the record inserted under one lock
                let overrides = self.overrides.read().unwrap_or_else(PoisonError::into_inner);
                if let Some(personal) = overrides.get(&record.id) {
                    record.personal = personal.clone();
                }

                let record = Arc::new(record);
                self.details.insert(key, Arc::clone(&record));
                Some(record)
            }
            Err(e) => {
                tracing::error!(error = %e, %key, "failed to fetch Pokémon details");
                self.set_error(Some(CatalogError::DetailFetch));
                None
            }
        }
    }

    /// Merges `patch` onto the override of `id`, persists every override and
    /// refreshes any cached detail of that Pokémon.
    ///
    /// When persisting fails nothing changes, in memory or on disk.
    pub fn save_override(&self, id: i64, patch: Override) -> Result<Override, CatalogError> {
        let mut overrides = self.overrides.write().unwrap_or_else(PoisonError::into_inner);
        let previous = overrides.get(&id).cloned();

        let mut merged = previous.clone().unwrap_or_default();
        merged.merge(&patch);
        overrides.insert(id, merged.clone());

        if let Err(e) = persist_overrides(&self.storage, &overrides) {
            tracing::error!(error = %e, id, "failed to persist Pokémon overrides");
            match previous {
                Some(previous) => overrides.insert(id, previous),
                None => overrides.remove(&id),
            };
            return Err(CatalogError::Persist);
        }

        // the overrides stay locked until the cache matches what was just stored
        for mut entry in self.details.iter_mut() {
            if entry.id == id {
                let updated = entry.with_personal(merged.clone());
                *entry.value_mut() = Arc::new(updated);
            }
        }
        drop(overrides);

        tracing::debug!(id, "saved Pokémon override");
        Ok(merged)
    }

    /// The nickname of `id` when one is set, `default_name` otherwise
    pub fn display_name(&self, id: i64, default_name: &str) -> String {
        self.override_for(id)
            .and_then(|o| o.nickname)
            .filter(|nickname| !nickname.is_empty())
            .unwrap_or_else(|| default_name.to_string())
    }

    /// The custom description of `id`, empty when there is none
    pub fn custom_description(&self, id: i64) -> String {
        self.override_for(id)
            .and_then(|o| o.description)
            .unwrap_or_default()
    }

    /// Filters the current list by name or nickname, ignoring case
    pub fn search(&self, query: &str) -> Vec<ListEntry> {
        let query = query.trim().to_lowercase();
        let list = self.list();
        if query.is_empty() {
            return list;
        }

        list.into_iter()
            .filter(|entry| {
                entry.name.to_lowercase().contains(&query)
                    || entry.id.is_some_and(|id| {
                        self.display_name(id, "").to_lowercase().contains(&query)
                    })
            })
            .collect()
    }

    pub fn list(&self) -> Vec<ListEntry> {
        self.list
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The cached details under `key`, without fetching
    pub fn cached_detail(&self, key: &str) -> Option<Arc<DetailRecord>> {
        self.details.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn overrides(&self) -> Overrides {
        self.overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// The last recorded failure, cleared when a list fetch starts
    pub fn error(&self) -> Option<CatalogError> {
        *self.error.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn override_for(&self, id: i64) -> Option<Override> {
        self.overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn set_error(&self, error: Option<CatalogError>) {
        *self.error.write().unwrap_or_else(PoisonError::into_inner) = error;
    }
}

/// Cache and request key for an id or name
fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Reads the overrides from storage, a missing or unreadable value is an empty map
fn load_overrides(storage: &impl Storage) -> Overrides {
    match storage.get_item(OVERRIDES_KEY) {
        Ok(Some(contents)) => match serde_json::from_str(&contents) {
            Ok(overrides) => overrides,
            Err(e) => {
                tracing::warn!(error = %e, "stored Pokémon overrides are malformed, ignoring them");
                Overrides::new()
            }
        },
        Ok(None) => Overrides::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read stored Pokémon overrides");
            Overrides::new()
        }
    }
}

fn persist_overrides(storage: &impl Storage, overrides: &Overrides) -> Result<(), anywho::Error> {
    let serialized = serde_json::to_string(overrides)?;
    storage.set_item(OVERRIDES_KEY, &serialized)
}
