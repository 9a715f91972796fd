// SPDX-License-Identifier: GPL-3.0-only

//! In-memory [`PokeSource`] for tests.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::Barrier;

use super::api::{Collection, FetchError, PokeSource, page_path, resource_path};
use crate::entities::{
    Ability, Cursor, NamedResource, Pokemon, PokemonType, ResourceList, Species, fixtures,
};

#[derive(Default)]
pub struct FakeDex {
    pokemon: BTreeMap<i64, Pokemon>,
    species: HashMap<i64, Species>,
    types: HashMap<String, PokemonType>,
    abilities: Vec<Ability>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    type_barrier: Option<Arc<Barrier>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl FakeDex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pokemon(mut self, id: i64, name: &str, types: &[&str]) -> Self {
        self.pokemon
            .insert(id, fixtures::pokemon(id, name, types));
        self
    }

    /// Registers `count` Pokémon with ids `1..=count`, all of type normal
    pub fn with_many_pokemon(mut self, count: i64) -> Self {
        for id in 1..=count {
            self.pokemon
                .insert(id, fixtures::pokemon(id, &format!("mon-{id}"), &["normal"]));
        }
        self
    }

    pub fn with_type(mut self, name: &str, weak_to: &[&str]) -> Self {
        self.types
            .insert(name.to_string(), fixtures::pokemon_type(name, weak_to));
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_species(mut self, species: Species) -> Self {
        self.species.insert(species.id, species);
        self
    }

    /// Makes every request for this path fail with a 500
    pub fn failing(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Type lookups wait until `parties` of them are in flight at once
    pub fn with_type_barrier(mut self, parties: usize) -> Self {
        self.type_barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    /// How many times a path was requested
    pub fn calls(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    async fn hit(&self, path: &str) -> Result<(), FetchError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(path) {
            return Err(FetchError::Status {
                status: 500,
                url: path.to_string(),
            });
        }
        Ok(())
    }

    fn lookup_pokemon(&self, path: &str, id: &str) -> Result<Pokemon, FetchError> {
        self.pokemon
            .values()
            .find(|pokemon| pokemon.id.to_string() == id || pokemon.name == id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}

#[async_trait]
impl PokeSource for FakeDex {
    async fn pokemon(&self, id: &str) -> Result<Pokemon, FetchError> {
        let path = resource_path(Collection::Pokemon, id);
        self.hit(&path).await?;
        self.lookup_pokemon(&path, id)
    }

    async fn pokemon_at(&self, url: &str) -> Result<Pokemon, FetchError> {
        self.hit(url).await?;
        let id = NamedResource {
            name: String::new(),
            url: url.to_string(),
        }
        .id()
        .ok_or_else(|| FetchError::NotFound(url.to_string()))?;
        self.lookup_pokemon(url, &id.to_string())
    }

    async fn species(&self, id: &str) -> Result<Species, FetchError> {
        let path = resource_path(Collection::PokemonSpecies, id);
        self.hit(&path).await?;
        id.parse::<i64>()
            .ok()
            .and_then(|id| self.species.get(&id))
            .cloned()
            .ok_or(FetchError::NotFound(path))
    }

    async fn pokemon_type(&self, id: &str) -> Result<PokemonType, FetchError> {
        let path = resource_path(Collection::Type, id);
        if let Some(barrier) = &self.type_barrier {
            barrier.wait().await;
        }
        self.hit(&path).await?;
        self.types
            .get(id)
            .cloned()
            .ok_or(FetchError::NotFound(path))
    }

    async fn ability(&self, id: &str) -> Result<Ability, FetchError> {
        let path = resource_path(Collection::Ability, id);
        self.hit(&path).await?;
        self.abilities
            .iter()
            .find(|ability| ability.id.to_string() == id || ability.name == id)
            .cloned()
            .ok_or(FetchError::NotFound(path))
    }

    async fn page(
        &self,
        collection: Collection,
        cursor: Cursor,
    ) -> Result<ResourceList, FetchError> {
        let path = page_path(collection, cursor);
        self.hit(&path).await?;

        let count = self.pokemon.len() as i64;
        let results = self
            .pokemon
            .values()
            .skip(cursor.offset as usize)
            .take(cursor.limit as usize)
            .map(|pokemon| fixtures::resource("pokemon", &pokemon.name, pokemon.id))
            .collect();
        let end = cursor.offset + cursor.limit;

        Ok(ResourceList {
            count,
            next: (end < count).then(|| {
                format!(
                    "{}/pokemon?offset={end}&limit={}",
                    fixtures::TEST_BASE,
                    cursor.limit
                )
            }),
            previous: None,
            results,
        })
    }
}
