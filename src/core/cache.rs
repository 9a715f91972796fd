// SPDX-License-Identifier: GPL-3.0-only

use std::{collections::HashMap, future::Future, sync::Arc};

use tokio::sync::{Mutex, OnceCell};

use super::api::{Collection, FetchError, PokeSource, page_path, resource_path};
use crate::entities::{
    Ability, Cursor, NamedResource, Pokemon, PokemonType, ResourceList, Species,
};

/// Keyed store that runs at most one fetch per key at a time.
///
/// Concurrent callers asking for the same key wait on the same fetch. Successful
/// results stay until [`KeyedCache::invalidate`]; failures are not stored, so the
/// next caller fetches again.
pub struct KeyedCache<V> {
    entries: Mutex<HashMap<String, Arc<OnceCell<Arc<V>>>>>,
}

impl<V> Default for KeyedCache<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V> KeyedCache<V> {
    /// Returns the cached value for `key`, or runs `fetch` to fill it
    pub async fn get<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(key.to_string()).or_default())
        };

        if let Some(value) = cell.get() {
            tracing::trace!(key, "cache hit");
            return Ok(Arc::clone(value));
        }

        cell.get_or_try_init(|| async move { fetch().await.map(Arc::new) })
            .await
            .cloned()
    }

    /// Value for `key` if it is already loaded
    #[cfg(test)]
    pub async fn peek(&self, key: &str) -> Option<Arc<V>> {
        let entries = self.entries.lock().await;
        entries.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Drops the value stored under `key`; returns whether there was one.
    ///
    /// A fetch still in flight keeps its entry, so callers arriving meanwhile
    /// join it instead of starting a second one.
    pub async fn invalidate(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(cell) if cell.initialized() => entries.remove(key).is_some(),
            _ => false,
        }
    }
}

/// Cached, typed access to a [`PokeSource`].
///
/// Every view goes through this instead of the source so that two views asking
/// for the same resource share one request. Keys are the resource paths
/// (`pokemon/25`, `pokemon?offset=0&limit=12`).
#[derive(Clone)]
pub struct CachedDex {
    source: Arc<dyn PokeSource>,
    pokemon: Arc<KeyedCache<Pokemon>>,
    pages: Arc<KeyedCache<ResourceList>>,
    species: Arc<KeyedCache<Species>>,
    types: Arc<KeyedCache<PokemonType>>,
    abilities: Arc<KeyedCache<Ability>>,
}

impl CachedDex {
    pub fn new(source: Arc<dyn PokeSource>) -> Self {
        Self {
            source,
            pokemon: Arc::default(),
            pages: Arc::default(),
            species: Arc::default(),
            types: Arc::default(),
            abilities: Arc::default(),
        }
    }

    pub async fn pokemon(&self, id: i64) -> Result<Arc<Pokemon>, FetchError> {
        let id = id.to_string();
        self.pokemon
            .get(&resource_path(Collection::Pokemon, &id), || {
                self.source.pokemon(&id)
            })
            .await
    }

    /// Fetches a Pokémon through a listing url. Numbered urls share the
    /// `pokemon/{id}` key with [`CachedDex::pokemon`].
    pub async fn pokemon_at(&self, url: &str) -> Result<Arc<Pokemon>, FetchError> {
        self.pokemon
            .get(&pokemon_key_for_url(url), || self.source.pokemon_at(url))
            .await
    }

    pub async fn species(&self, id: i64) -> Result<Arc<Species>, FetchError> {
        let id = id.to_string();
        self.species
            .get(&resource_path(Collection::PokemonSpecies, &id), || {
                self.source.species(&id)
            })
            .await
    }

    pub async fn pokemon_type(&self, name: &str) -> Result<Arc<PokemonType>, FetchError> {
        self.types
            .get(&resource_path(Collection::Type, name), || {
                self.source.pokemon_type(name)
            })
            .await
    }

    pub async fn ability(&self, id: &str) -> Result<Arc<Ability>, FetchError> {
        self.abilities
            .get(&resource_path(Collection::Ability, id), || {
                self.source.ability(id)
            })
            .await
    }

    pub async fn page(
        &self,
        collection: Collection,
        cursor: Cursor,
    ) -> Result<Arc<ResourceList>, FetchError> {
        self.pages
            .get(&page_path(collection, cursor), || {
                self.source.page(collection, cursor)
            })
            .await
    }

    /// Drops `key` from every store, the next request for it goes to the source
    pub async fn invalidate(&self, key: &str) {
        let dropped = self.pokemon.invalidate(key).await
            | self.pages.invalidate(key).await
            | self.species.invalidate(key).await
            | self.types.invalidate(key).await
            | self.abilities.invalidate(key).await;

        tracing::debug!(key, dropped, "invalidated");
    }
}

/// Cache key for a Pokémon resource url
pub fn pokemon_key_for_url(url: &str) -> String {
    let reference = NamedResource {
        name: String::new(),
        url: url.to_string(),
    };

    match reference.id() {
        Some(id) if url.contains("/pokemon/") => {
            resource_path(Collection::Pokemon, &id.to_string())
        }
        _ => url.to_string(),
    }
}
