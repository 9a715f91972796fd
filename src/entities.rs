// SPDX-License-Identifier: GPL-3.0-only

mod ability;
mod pokemon;
mod pokemon_type;
mod resource;
mod species;

pub use ability::Ability;
pub use pokemon::{Pokemon, PokemonAbility, PokemonSprites, PokemonStat, PokemonTypeSlot};
pub use pokemon_type::{PokemonType, TypeRelations};
pub use resource::{Cursor, NamedResource, ResourceList};
pub use species::{FlavorText, Genus, Species};

/// Language used when picking localized entries from PokéAPI records
pub const ENGLISH: &str = "en";
