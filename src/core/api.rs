// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::entities::{Ability, Cursor, Pokemon, PokemonType, ResourceList, Species};

/// Public PokéAPI root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Ways a request to the data source can fail
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("could not decode {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Collection endpoints that can be paged through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Collection {
    Pokemon,
    PokemonSpecies,
    Ability,
    Type,
    Generation,
}

impl Collection {
    pub fn path(self) -> &'static str {
        match self {
            Collection::Pokemon => "pokemon",
            Collection::PokemonSpecies => "pokemon-species",
            Collection::Ability => "ability",
            Collection::Type => "type",
            Collection::Generation => "generation",
        }
    }
}

/// Path of a single resource, `pokemon/25`. Also used as its cache key.
pub fn resource_path(collection: Collection, id: &str) -> String {
    format!("{}/{id}", collection.path())
}

/// Path of one page of a collection, `pokemon?offset=0&limit=12`. Also used as its cache key.
pub fn page_path(collection: Collection, cursor: Cursor) -> String {
    format!(
        "{}?offset={}&limit={}",
        collection.path(),
        cursor.offset,
        cursor.limit
    )
}

/// Where Pokémon data comes from.
///
/// Identifiers are either numeric ids or names, exactly as PokéAPI accepts them.
/// Implementations are handed around as `Arc<dyn PokeSource>`.
#[async_trait]
pub trait PokeSource: Send + Sync {
    async fn pokemon(&self, id: &str) -> Result<Pokemon, FetchError>;

    /// Fetches a Pokémon through a resource url taken from a listing
    async fn pokemon_at(&self, url: &str) -> Result<Pokemon, FetchError>;

    async fn species(&self, id: &str) -> Result<Species, FetchError>;

    async fn pokemon_type(&self, id: &str) -> Result<PokemonType, FetchError>;

    async fn ability(&self, id: &str) -> Result<Ability, FetchError>;

    async fn page(&self, collection: Collection, cursor: Cursor)
    -> Result<ResourceList, FetchError>;
}

/// [`PokeSource`] talking to a PokéAPI compatible server over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|err| FetchError::Transport {
                url: base_url.to_string(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Absolute url for a path, absolute urls pass through untouched
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url_for(path);
        tracing::debug!(%url, "fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| FetchError::Transport {
                url: url.clone(),
                reason: err.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<T>().await.map_err(|err| FetchError::Decode {
            url,
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl PokeSource for HttpSource {
    async fn pokemon(&self, id: &str) -> Result<Pokemon, FetchError> {
        self.get_json(&resource_path(Collection::Pokemon, id)).await
    }

    async fn pokemon_at(&self, url: &str) -> Result<Pokemon, FetchError> {
        self.get_json(url).await
    }

    async fn species(&self, id: &str) -> Result<Species, FetchError> {
        self.get_json(&resource_path(Collection::PokemonSpecies, id))
            .await
    }

    async fn pokemon_type(&self, id: &str) -> Result<PokemonType, FetchError> {
        self.get_json(&resource_path(Collection::Type, id)).await
    }

    async fn ability(&self, id: &str) -> Result<Ability, FetchError> {
        self.get_json(&resource_path(Collection::Ability, id)).await
    }

    async fn page(
        &self,
        collection: Collection,
        cursor: Cursor,
    ) -> Result<ResourceList, FetchError> {
        self.get_json(&page_path(collection, cursor)).await
    }
}
