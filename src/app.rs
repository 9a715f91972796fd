// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use futures::{FutureExt, future::BoxFuture};

use crate::config::DexConfig;
use crate::core::{
    api::{Collection, FetchError, page_path, resource_path},
    cache::{CachedDex, pokemon_key_for_url},
    weakness::{AggregationError, Weaknesses, aggregate_weaknesses},
};
use crate::entities::{Cursor, Pokemon, ResourceList, Species};

mod location;
mod pagination;
pub mod runtime;
mod view;

pub use location::{Location, LocationError};
pub use pagination::PaginationAction;

/// Async work started by [`DexApp::update`], resolving to the message to feed back
pub type Task = BoxFuture<'static, Message>;

/// Identifies one mounting of a page. Results started for an older mount are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Navigate(Location),
    Paginate(PaginationAction),
    Back,
    OpenCard(usize),
    Reload,
    /// Remounts the current location once a reload has dropped its cache keys
    Remount(MountId),
    PageLoaded {
        mount: MountId,
        result: Result<Arc<ResourceList>, FetchError>,
    },
    CardLoaded {
        mount: MountId,
        index: usize,
        result: Result<Arc<Pokemon>, FetchError>,
    },
    PokemonLoaded {
        mount: MountId,
        result: Result<Arc<Pokemon>, FetchError>,
    },
    SpeciesLoaded {
        mount: MountId,
        result: Result<Arc<Species>, FetchError>,
    },
    WeaknessesLoaded {
        mount: MountId,
        result: Result<Weaknesses, AggregationError>,
    },
}

/// Identifies the status of a piece of remote data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Failed,
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Identifies a page in the application.
#[derive(Debug, Clone)]
pub enum Page {
    List(ListPage),
    Detail(DetailPage),
}

#[derive(Debug, Clone)]
pub struct ListPage {
    pub cursor: Cursor,
    pub listing: Loadable<Arc<ResourceList>>,
    /// One entry per listing result, in listing order
    pub cards: Vec<Loadable<Arc<Pokemon>>>,
}

#[derive(Debug, Clone)]
pub struct DetailPage {
    pub id: i64,
    pub pokemon: Loadable<Arc<Pokemon>>,
    pub species: Loadable<Arc<Species>>,
    pub weaknesses: Loadable<Weaknesses>,
}

/// The viewer's state. Only the run loop owns and mutates it; everything
/// that touches the network runs in the [`Task`]s `update` hands back.
pub struct DexApp {
    /// Cached access to PokéAPI
    dex: CachedDex,
    /// Pokémon per list page
    items_per_page: i64,
    /// Where the viewer currently is
    location: Location,
    /// Generation of the mounted page
    mount: MountId,
    /// Currently mounted page
    page: Page,
}

impl DexApp {
    pub fn new(dex: CachedDex, config: &DexConfig) -> Self {
        let cursor = Cursor::new(0, config.items_per_page);
        Self {
            dex,
            items_per_page: cursor.limit,
            location: Location::default(),
            mount: MountId::default(),
            page: Page::List(ListPage {
                cursor,
                listing: Loadable::Loading,
                cards: Vec::new(),
            }),
        }
    }

    pub fn can_next(&self) -> bool {
        self.paginate_target(PaginationAction::Next).is_some()
    }

    pub fn can_previous(&self) -> bool {
        self.paginate_target(PaginationAction::Previous).is_some()
    }

    pub fn can_back(&self) -> bool {
        matches!(self.location, Location::Detail { .. })
    }

    /// The sprite the `open` command hands to the desktop
    pub fn current_sprite(&self) -> Option<String> {
        match &self.page {
            Page::Detail(page) => page
                .pokemon
                .ready()
                .and_then(|pokemon| pokemon.artwork_sprite())
                .map(str::to_string),
            Page::List(_) => None,
        }
    }

    pub fn update(&mut self, message: Message) -> Vec<Task> {
        match message {
            Message::Navigate(location) => self.mount(location),

            Message::Paginate(action) => match self.paginate_target(action) {
                Some(location) => self.mount(location),
                None => Vec::new(),
            },

            Message::Back => match self.location {
                Location::Detail { offset, .. } => self.mount(Location::List { offset }),
                Location::List { .. } => Vec::new(),
            },

            Message::OpenCard(index) => match self.card_target(index) {
                Some(location) => self.mount(location),
                None => Vec::new(),
            },

            Message::Reload => vec![self.reload()],

            Message::Remount(mount) => {
                if self.is_stale(mount) {
                    return Vec::new();
                }
                self.mount(self.location)
            }

            Message::PageLoaded { mount, result } => {
                if self.is_stale(mount) {
                    return Vec::new();
                }
                let Page::List(page) = &mut self.page else {
                    return Vec::new();
                };

                match result {
                    Ok(listing) => {
                        page.cards = vec![Loadable::Loading; listing.results.len()];
                        page.listing = Loadable::Ready(Arc::clone(&listing));
                        listing
                            .results
                            .iter()
                            .enumerate()
                            .map(|(index, reference)| self.load_card(index, &reference.url))
                            .collect()
                    }
                    Err(err) => {
                        tracing::warn!(%err, "failed to load Pokémon list");
                        page.listing = Loadable::Failed;
                        Vec::new()
                    }
                }
            }

            Message::CardLoaded {
                mount,
                index,
                result,
            } => {
                if self.is_stale(mount) {
                    return Vec::new();
                }
                if let Page::List(page) = &mut self.page
                    && let Some(card) = page.cards.get_mut(index)
                {
                    *card = match result {
                        Ok(pokemon) => Loadable::Ready(pokemon),
                        Err(err) => {
                            tracing::warn!(%err, index, "failed to load card");
                            Loadable::Failed
                        }
                    };
                }
                Vec::new()
            }

            Message::PokemonLoaded { mount, result } => {
                if self.is_stale(mount) {
                    return Vec::new();
                }
                let Page::Detail(page) = &mut self.page else {
                    return Vec::new();
                };

                match result {
                    Ok(pokemon) => {
                        let type_names = pokemon.type_names();
                        page.pokemon = Loadable::Ready(pokemon);
                        page.weaknesses = Loadable::Loading;
                        vec![self.load_weaknesses(type_names)]
                    }
                    Err(err) => {
                        tracing::warn!(%err, id = page.id, "failed to load Pokémon");
                        page.pokemon = Loadable::Failed;
                        Vec::new()
                    }
                }
            }

            Message::SpeciesLoaded { mount, result } => {
                if self.is_stale(mount) {
                    return Vec::new();
                }
                if let Page::Detail(page) = &mut self.page {
                    page.species = match result {
                        Ok(species) => Loadable::Ready(species),
                        Err(err) => {
                            tracing::debug!(%err, id = page.id, "no species panel");
                            Loadable::Failed
                        }
                    };
                }
                Vec::new()
            }

            Message::WeaknessesLoaded { mount, result } => {
                if self.is_stale(mount) {
                    return Vec::new();
                }
                if let Page::Detail(page) = &mut self.page {
                    page.weaknesses = match result {
                        Ok(weaknesses) => Loadable::Ready(weaknesses),
                        Err(err) => {
                            tracing::warn!(%err, id = page.id, "failed to aggregate weaknesses");
                            Loadable::Failed
                        }
                    };
                }
                Vec::new()
            }
        }
    }

    fn paginate_target(&self, action: PaginationAction) -> Option<Location> {
        let has_next = match &self.page {
            Page::List(page) => page.listing.ready().is_some_and(|listing| listing.has_next()),
            Page::Detail(_) => false,
        };
        pagination::target(self.location, action, has_next, self.items_per_page)
    }

    fn card_target(&self, index: usize) -> Option<Location> {
        let Page::List(page) = &self.page else {
            return None;
        };
        let reference = page.listing.ready()?.results.get(index)?;
        let id = page
            .cards
            .get(index)
            .and_then(Loadable::ready)
            .map(|pokemon| pokemon.id)
            .or_else(|| reference.id())?;

        Some(Location::Detail {
            id,
            offset: page.cursor.offset,
        })
    }

    fn is_stale(&self, mount: MountId) -> bool {
        let stale = mount != self.mount;
        if stale {
            tracing::trace!(?mount, current = ?self.mount, "dropping stale result");
        }
        stale
    }

    /// Replaces the current page with a fresh one for `location` and starts its loads
    fn mount(&mut self, location: Location) -> Vec<Task> {
        self.mount = MountId(self.mount.0 + 1);
        self.location = location;
        tracing::debug!(%location, mount = self.mount.0, "mounting page");

        match location {
            Location::List { offset } => {
                let cursor = Cursor::new(offset, self.items_per_page);
                self.page = Page::List(ListPage {
                    cursor,
                    listing: Loadable::Loading,
                    cards: Vec::new(),
                });
                vec![self.load_page(cursor)]
            }
            Location::Detail { id, .. } => {
                self.page = Page::Detail(DetailPage {
                    id,
                    pokemon: Loadable::Loading,
                    species: Loadable::Loading,
                    weaknesses: Loadable::Loading,
                });
                vec![self.load_pokemon(id), self.load_species(id)]
            }
        }
    }

    fn load_page(&self, cursor: Cursor) -> Task {
        let dex = self.dex.clone();
        let mount = self.mount;
        async move {
            let result = dex.page(Collection::Pokemon, cursor).await;
            Message::PageLoaded { mount, result }
        }
        .boxed()
    }

    fn load_card(&self, index: usize, url: &str) -> Task {
        let dex = self.dex.clone();
        let mount = self.mount;
        let url = url.to_string();
        async move {
            let result = dex.pokemon_at(&url).await;
            Message::CardLoaded {
                mount,
                index,
                result,
            }
        }
        .boxed()
    }

    fn load_pokemon(&self, id: i64) -> Task {
        let dex = self.dex.clone();
        let mount = self.mount;
        async move {
            let result = dex.pokemon(id).await;
            Message::PokemonLoaded { mount, result }
        }
        .boxed()
    }

    fn load_species(&self, id: i64) -> Task {
        let dex = self.dex.clone();
        let mount = self.mount;
        async move {
            let result = dex.species(id).await;
            Message::SpeciesLoaded { mount, result }
        }
        .boxed()
    }

    fn load_weaknesses(&self, type_names: Vec<String>) -> Task {
        let dex = self.dex.clone();
        let mount = self.mount;
        async move {
            let result = aggregate_weaknesses(&dex, &type_names).await;
            Message::WeaknessesLoaded { mount, result }
        }
        .boxed()
    }

    /// Drops the current page's cache keys, then remounts it
    fn reload(&self) -> Task {
        let dex = self.dex.clone();
        let mount = self.mount;
        let keys = self.cache_keys();
        async move {
            for key in &keys {
                dex.invalidate(key).await;
            }
            Message::Remount(mount)
        }
        .boxed()
    }

    fn cache_keys(&self) -> Vec<String> {
        match &self.page {
            Page::List(page) => {
                let mut keys = vec![page_path(Collection::Pokemon, page.cursor)];
                if let Some(listing) = page.listing.ready() {
                    keys.extend(
                        listing
                            .results
                            .iter()
                            .map(|reference| pokemon_key_for_url(&reference.url)),
                    );
                }
                keys
            }
            Page::Detail(page) => {
                let id = page.id.to_string();
                let mut keys = vec![
                    resource_path(Collection::Pokemon, &id),
                    resource_path(Collection::PokemonSpecies, &id),
                ];
                if let Some(pokemon) = page.pokemon.ready() {
                    keys.extend(
                        pokemon
                            .type_names()
                            .iter()
                            .map(|name| resource_path(Collection::Type, name)),
                    );
                }
                keys
            }
        }
    }
}
